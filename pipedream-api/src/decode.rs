//! Uniform decoding and classification of API responses.

use bytes::Bytes;
use reqwest::{StatusCode, header::HeaderMap};
use serde::{Deserialize, de::DeserializeOwned, de::IgnoredAny};
use serde_json::{Map, Value};

/// Status codes treated as success when the caller supplies none
pub const DEFAULT_ACCEPTABLE: &[StatusCode] = &[StatusCode::OK];

/// Statuses used by endpoints that answer with any flavour of success
pub const ANY_SUCCESS: &[StatusCode] = &[
    StatusCode::OK,
    StatusCode::CREATED,
    StatusCode::ACCEPTED,
    StatusCode::NO_CONTENT,
];

const EMPTY_BODY: &str = "[empty body]";
const NON_JSON_BODY: &str = "[non-JSON body]";

/// A response whose body has been read completely.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    /// Drain `response`. The connection is released whether or not reading succeeds.
    pub async fn read(response: reqwest::Response) -> Result<Self, reqwest::Error> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(Self {
            status,
            headers,
            body,
        })
    }
}

#[derive(Debug)]
pub enum ResponseError {
    /// The body could not be read
    Body(reqwest::Error),
    /// Status outside the accepted set; `body` is compacted for logging
    UnexpectedStatus {
        status: StatusCode,
        body: String,
        parse_error: Option<serde_json::Error>,
    },
    /// Accepted status, but the body did not match the expected shape
    Decode(serde_json::Error),
}

impl ResponseError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ResponseError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ResponseError::Decode(_))
    }
}

impl std::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseError::Body(e) => write!(f, "reading response body: {}", e),
            ResponseError::UnexpectedStatus {
                status,
                body,
                parse_error,
            } => {
                write!(
                    f,
                    "unexpected status code: {}, body: {}",
                    status.as_u16(),
                    body
                )?;
                if let Some(e) = parse_error {
                    write!(f, "\ndecoding response body: {}", e)?;
                }
                Ok(())
            }
            ResponseError::Decode(e) => write!(f, "decoding response body: {}", e),
        }
    }
}

impl std::error::Error for ResponseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResponseError::Body(e) => Some(e),
            ResponseError::UnexpectedStatus { parse_error, .. } => parse_error
                .as_ref()
                .map(|e| e as &(dyn std::error::Error + 'static)),
            ResponseError::Decode(e) => Some(e),
        }
    }
}

/// Read `response` and decode it into `T`, accepting the statuses in
/// `acceptable` (exactly `200` when empty).
pub async fn decode_response<T>(
    response: reqwest::Response,
    acceptable: &[StatusCode],
) -> Result<T, ResponseError>
where
    T: DeserializeOwned,
{
    let raw = RawResponse::read(response)
        .await
        .map_err(ResponseError::Body)?;
    classify(raw.status, &raw.body, acceptable)
}

/// Classify an already read response.
///
/// The body is always parsed, so a status failure can report a parse failure
/// alongside it.
pub fn classify<T>(
    status: StatusCode,
    body: &[u8],
    acceptable: &[StatusCode],
) -> Result<T, ResponseError>
where
    T: DeserializeOwned,
{
    let acceptable = if acceptable.is_empty() {
        DEFAULT_ACCEPTABLE
    } else {
        acceptable
    };

    let parsed = parse_body::<T>(body);

    if !acceptable.contains(&status) {
        return Err(ResponseError::UnexpectedStatus {
            status,
            body: compact(body),
            parse_error: parsed.err(),
        });
    }

    parsed.map_err(ResponseError::Decode)
}

fn parse_body<T>(body: &[u8]) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned,
{
    if is_blank(body) {
        // An empty body decodes into anything that tolerates having no fields
        return <T as Deserialize>::deserialize(Value::Null)
            .or_else(|_| <T as Deserialize>::deserialize(Value::Object(Map::new())))
            .or_else(|_| serde_json::from_slice(body));
    }
    serde_json::from_slice(body)
}

/// Render `body` on one line with insignificant JSON whitespace removed.
pub fn compact(body: &[u8]) -> String {
    if is_blank(body) {
        return EMPTY_BODY.to_string();
    }
    if serde_json::from_slice::<IgnoredAny>(body).is_err() {
        return NON_JSON_BODY.to_string();
    }

    let text = String::from_utf8_lossy(body);
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for ch in text.chars() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            in_string = true;
            out.push(ch);
        } else if !ch.is_ascii_whitespace() {
            out.push(ch);
        }
    }

    out
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct App {
        id: String,
        name: String,
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Lenient {
        #[serde(default)]
        id: Option<String>,
    }

    #[test]
    fn test_compact_preserves_unicode_escapes() {
        let body = br#"{ "a" : "x \u00e9 \" y",
            "b" : [ 1 , "tab\t here" ] }"#;

        assert_eq!(
            compact(body),
            r#"{"a":"x \u00e9 \" y","b":[1,"tab\t here"]}"#
        );
        // Escaped backslash right before the closing quote ends the string
        assert_eq!(compact(br#"{ "p" : "C:\\" , "q" : 1 }"#), r#"{"p":"C:\\","q":1}"#);
        assert_eq!(compact("{ \"k\" : \"é  ü\" }".as_bytes()), "{\"k\":\"é  ü\"}");
    }

    #[test]
    fn test_success_populates_target() {
        let app: App = classify(
            StatusCode::OK,
            br#"{"id":"apn_123","name":"x"}"#,
            DEFAULT_ACCEPTABLE,
        )
        .unwrap();

        assert_eq!(
            app,
            App {
                id: "apn_123".into(),
                name: "x".into()
            }
        );
    }

    #[test]
    fn test_unexpected_status_echoes_compacted_body() {
        let err = classify::<App>(
            StatusCode::NOT_FOUND,
            b"{\n  \"error\": \"not found\"\n}",
            &[],
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("404"));
        assert!(message.contains(r#"{"error":"not found"}"#));
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_malformed_body_on_success_is_decode_error() {
        let err = classify::<App>(StatusCode::OK, b"not json", &[]).unwrap_err();

        assert!(err.is_decode());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_malformed_body_on_failure_reports_both() {
        let err = classify::<App>(StatusCode::INTERNAL_SERVER_ERROR, b"not json", &[]).unwrap_err();

        match &err {
            ResponseError::UnexpectedStatus {
                status,
                body,
                parse_error,
            } => {
                assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, NON_JSON_BODY);
                assert!(parse_error.is_some());
            }
            other => panic!("expected status error, got {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("decoding response body"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_custom_acceptable_set() {
        let app: App = classify(
            StatusCode::CREATED,
            br#"{"id":"apn_1","name":"created"}"#,
            &[StatusCode::OK, StatusCode::CREATED],
        )
        .unwrap();
        assert_eq!(app.name, "created");

        // 201 is not accepted by default
        let err = classify::<App>(StatusCode::CREATED, br#"{"id":"a","name":"b"}"#, &[]).unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::CREATED));
    }

    #[test]
    fn test_empty_body_decodes_into_lenient_targets() {
        let lenient: Lenient = classify(StatusCode::OK, b"", &[]).unwrap();
        assert_eq!(lenient, Lenient::default());

        assert!(classify::<()>(StatusCode::OK, b"  ", &[]).is_ok());

        let nothing: Option<App> = classify(StatusCode::OK, b"", &[]).unwrap();
        assert!(nothing.is_none());
    }

    #[test]
    fn test_empty_body_into_strict_target_is_decode_error() {
        let err = classify::<App>(StatusCode::OK, b"", &[]).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_empty_body_on_failure_uses_marker() {
        let err = classify::<Lenient>(StatusCode::BAD_GATEWAY, b"", &[]).unwrap_err();
        assert!(err.to_string().contains("body: [empty body]"));
    }

    #[test]
    fn test_compact_keeps_whitespace_inside_strings() {
        let body = br#"{ "message" : "two  words",  "list": [1, 2 ] }"#;
        assert_eq!(compact(body), r#"{"message":"two  words","list":[1,2]}"#);
    }

    #[test]
    fn test_compact_handles_escaped_quotes() {
        let body = br#"{ "quote": "say \"hi\" now" }"#;
        assert_eq!(compact(body), r#"{"quote":"say \"hi\" now"}"#);
    }

    #[test]
    fn test_compact_marks_non_json() {
        assert_eq!(compact(b"<html>oops</html>"), NON_JSON_BODY);
        assert_eq!(compact(br#"{"a":1} trailing"#), NON_JSON_BODY);
    }

    #[tokio::test]
    async fn test_decode_response_reads_reqwest_response() {
        let response = http::Response::builder()
            .status(200)
            .body(r#"{"id":"apn_123","name":"x"}"#)
            .unwrap();

        let app: App = decode_response(reqwest::Response::from(response), &[])
            .await
            .unwrap();
        assert_eq!(app.id, "apn_123");
    }

    #[tokio::test]
    async fn test_decode_response_reports_status_failure() {
        let response = http::Response::builder()
            .status(404)
            .body(r#"{"error":"not found"}"#)
            .unwrap();

        let err = decode_response::<App>(reqwest::Response::from(response), &[])
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }
}
