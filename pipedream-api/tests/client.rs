use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use pipedream_api::endpoints::{
    ComponentType,
    accounts::{GetRestAccount, ListAccounts, ListRestAccounts},
    components::{ConfigureComponent, ListComponents},
    proxy::Proxy,
    registry::{CreateComponent, GetRegistryComponent, SearchRegistryComponents},
    subscriptions::DeleteSubscription,
    users::GetCurrentUser,
    workflows::{
        CreateWorkflow, GetWorkflowDetails, GetWorkflowEmits, GetWorkflowErrors, UpdateWorkflow,
        WorkflowSettings, WorkflowStep,
    },
};
use pipedream_api::{AuthMode, Client, PipedreamError, Request, Settings};
use reqwest::{Method, StatusCode, header::HeaderMap};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

fn settings_for(server: &MockServer) -> Settings {
    Settings::for_project("proj_test")
        .connect_url(format!("{}/v1/connect", server.uri()))
        .rest_url(format!("{}/v1", server.uri()))
        .client_credentials("client-id", "client-secret")
        .api_key("pd-api-key")
        .allowed_origins(["https://app.example"])
}

async fn mount_token(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-1",
            "token_type": "Bearer",
            "expires_in": 3600,
        })))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_connect_call_carries_bearer_and_environment() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/v1/connect/proj_test/accounts"))
        .and(header("authorization", "Bearer tok-1"))
        .and(header("x-pd-environment", "development"))
        .and(query_param("external_user_id", "user_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page_info": { "count": 1 },
            "data": [{ "id": "apn_1", "healthy": true }],
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();

    for _ in 0..2 {
        let accounts = client
            .send(Request::accounts().for_user("user_1").list())
            .await
            .unwrap();
        assert_eq!(accounts.data[0].id, "apn_1");
        assert_eq!(accounts.page_info.count, Some(1));
    }
}

#[tokio::test]
async fn test_rest_call_uses_api_key() {
    let server = MockServer::start().await;
    mount_token(&server, 0).await;
    Mock::given(method("GET"))
        .and(path("/v1/users/me"))
        .and(header("authorization", "Bearer pd-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "u_1", "username": "dev" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();
    let user = client.send(GetCurrentUser).await.unwrap();

    assert_eq!(user.data.id, "u_1");
}

#[tokio::test]
async fn test_auth_mode_can_be_overridden() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/v1/users/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": "u_1" } })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();
    let user = client
        .send_with_auth(GetCurrentUser, AuthMode::OAuth)
        .await
        .unwrap();

    assert_eq!(user.data.id, "u_1");
}

#[tokio::test]
async fn test_unexpected_status_names_operation() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/v1/connect/proj_test/accounts/apn_missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("{\n  \"error\": \"record not found\"\n}"),
        )
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();
    let err = client
        .send(Request::accounts().get("apn_missing"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    // The body also fails to decode as an account, which is reported after the status
    let message = err.to_string();
    assert!(message.starts_with(
        r#"getting account: unexpected status code: 404, body: {"error":"record not found"}"#
    ));
    assert!(message.contains("\ndecoding response body: "));
}

#[tokio::test]
async fn test_mismatched_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/v1/connect/proj_test/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "nope" })))
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();
    let err = client.send(ListAccounts::new()).await.unwrap_err();

    assert!(err.response_error().unwrap().is_decode());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_delete_requires_no_content() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("DELETE"))
        .and(path("/v1/connect/proj_test/accounts/apn_1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/connect/proj_test/accounts/apn_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "deleted": true })))
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();
    let accounts = Request::accounts();

    assert!(client.send(accounts.delete("apn_1")).await.is_ok());

    let err = client.send(accounts.delete("apn_2")).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::OK));
    assert!(err.to_string().starts_with("deleting account: "));
}

#[tokio::test]
async fn test_token_failure_aborts_before_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/connect/proj_test/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();
    let err = client.send(ListAccounts::new()).await.unwrap_err();

    assert!(err.auth_error().is_some());
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(err.to_string().starts_with("listing accounts: acquiring access token"));
}

#[tokio::test]
async fn test_proxy_forwards_request_and_passes_status_through() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    let target = "https://api.example.com/v1/items?page=2";
    let encoded = URL_SAFE_NO_PAD.encode(target);
    Mock::given(method("POST"))
        .and(path(format!("/v1/connect/proj_test/proxy/{}", encoded)))
        .and(query_param("external_user_id", "user_1"))
        .and(query_param("account_id", "apn_1"))
        .and(header("x-upstream-trace", "abc"))
        .and(body_json(json!({ "name": "widget" })))
        .respond_with(
            ResponseTemplate::new(418)
                .insert_header("x-upstream", "yes")
                .set_body_string("short and stout"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut headers = HeaderMap::new();
    headers.insert("x-upstream-trace", "abc".parse().unwrap());
    let proxy = Proxy::new(Method::POST, target, "user_1", "apn_1")
        .headers(headers)
        .body(json!({ "name": "widget" }));

    let client = Client::new(settings_for(&server)).unwrap();
    let response = client.send(proxy).await.unwrap();

    assert_eq!(response.status, StatusCode::IM_A_TEAPOT);
    assert_eq!(response.headers["x-upstream"], "yes");
    assert_eq!(response.text(), "short and stout");
}

#[tokio::test]
async fn test_invalid_proxy_request_never_leaves_the_client() {
    let server = MockServer::start().await;
    mount_token(&server, 0).await;

    let client = Client::new(settings_for(&server)).unwrap();
    let err = client
        .send(Proxy::get("not a url", "user_1", "apn_1"))
        .await
        .unwrap_err();

    assert!(matches!(err.root(), PipedreamError::InvalidRequest(_)));
    assert!(err.to_string().starts_with("proxying request: Invalid request: invalid url"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unset_query_values_are_omitted() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/v1/connect/proj_test/actions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();
    client
        .send(ListComponents::new(ComponentType::Actions))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let listing = requests
        .iter()
        .find(|r| r.url.path() == "/v1/connect/proj_test/actions")
        .unwrap();
    assert!(listing.url.query().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_user_token_uses_configured_origins() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/v1/connect/proj_test/tokens"))
        .and(body_json(json!({
            "external_user_id": "user_1",
            "allowed_origins": ["https://app.example"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "ctok_1",
            "connect_link_url": "https://pipedream.com/_static/connect.html?token=ctok_1",
            "expires_at": "2026-01-01T00:00:00Z",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();
    let token = client.send(client.user_token("user_1")).await.unwrap();

    assert_eq!(token.token, "ctok_1");
    assert!(token.expires_at.is_some());
}

#[tokio::test]
async fn test_component_errors_are_reported_by_check() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/v1/connect/proj_test/components/configure"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "options": [],
            "errors": ["auth expired", "reconnect"],
        })))
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();
    let options = client
        .send(ConfigureComponent::new("slack-send-message", "channel", "user_1"))
        .await
        .unwrap();

    assert_eq!(options.check().unwrap_err(), "auth expired.reconnect");
}

#[tokio::test]
async fn test_subscription_delete_accepts_empty_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/subscriptions"))
        .and(query_param("emitter_id", "dc_1"))
        .and(query_param("listener_id", "p_1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();

    assert!(client.send(DeleteSubscription::new("dc_1", "p_1")).await.is_ok());
}

#[tokio::test]
async fn test_workflow_lifecycle_over_rest() {
    let server = MockServer::start().await;
    mount_token(&server, 0).await;
    Mock::given(method("POST"))
        .and(path("/v1/workflows"))
        .and(header("authorization", "Bearer pd-api-key"))
        .and(body_json(json!({
            "org_id": "o_1",
            "project_id": "proj_1",
            "template_id": "tch_1",
            "steps": [{ "namespace": "send_message", "props": { "channel": "C1" } }],
            "settings": { "name": "alerts", "auto_deploy": true },
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": "p_1", "name": "alerts", "active": true, "steps": [], "triggers": [] },
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/workflows/p_1"))
        .and(body_json(json!({ "active": false, "org_id": "o_1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "p_1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/workflows/p_1"))
        .and(query_param("org_id", "o_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "triggers": [{ "id": "hi_1", "active": true, "endpoint_url": "https://hook" }],
            "steps": [{ "id": "c_1", "namespace": "send_message" }],
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/workflows/p_1/event_summaries"))
        .and(query_param("org_id", "o_1"))
        .and(query_param("expand", "event"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page_info": { "count": 1 },
            "data": [{ "id": "e_1", "indexed_at_ms": 1, "event": { "raw_event": { "n": 1 } } }],
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/workflows/p_1/$errors/event_summaries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "e_2", "error": { "code": "Timeout", "cellId": "c_1" } }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();

    let created = client
        .send(
            CreateWorkflow::new("o_1", "proj_1", "tch_1")
                .steps(vec![WorkflowStep::new("send_message").prop("channel", "C1")])
                .settings(WorkflowSettings {
                    name: Some("alerts".into()),
                    auto_deploy: true,
                }),
        )
        .await
        .unwrap();
    assert_eq!(created.data.id, "p_1");
    assert!(created.data.active);

    let updated = client.send(UpdateWorkflow::new("p_1", "o_1", false)).await.unwrap();
    assert_eq!(updated["id"], "p_1");

    let details = client.send(GetWorkflowDetails::new("p_1", "o_1")).await.unwrap();
    assert_eq!(details.triggers[0].endpoint_url.as_deref(), Some("https://hook"));
    assert_eq!(details.steps[0].namespace.as_deref(), Some("send_message"));

    let emits = client
        .send(GetWorkflowEmits::new("p_1", "o_1").expand(true).limit(5u32))
        .await
        .unwrap();
    assert_eq!(emits.data[0].event.as_ref().unwrap()["raw_event"]["n"], 1);

    let errors = client.send(GetWorkflowErrors::new("p_1")).await.unwrap();
    assert_eq!(errors.data[0].error.code.as_deref(), Some("Timeout"));
}

#[tokio::test]
async fn test_workflow_details_without_org_never_leaves_the_client() {
    let server = MockServer::start().await;

    let client = Client::new(settings_for(&server)).unwrap();
    let err = client.send(GetWorkflowDetails::new("p_1", "")).await.unwrap_err();

    assert!(matches!(err.root(), PipedreamError::InvalidRequest(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_registry_create_get_and_search() {
    let server = MockServer::start().await;
    mount_token(&server, 0).await;
    Mock::given(method("POST"))
        .and(path("/v1/components"))
        .and(header("authorization", "Bearer pd-api-key"))
        .and(body_json(json!({ "component_url": "https://github.com/acme/c.mjs" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "sc_1", "code_hash": "abc", "name": "acme", "version": "0.0.1" },
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/components/registry/slack-send-message"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "sc_2",
                "configurable_props": [{ "name": "channel", "type": "string", "remoteOptions": true }],
            },
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/components/search"))
        .and(query_param("query", "post to slack"))
        .and(query_param("app", "slack"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sources": [],
            "actions": ["slack-send-message"],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();

    let created = client
        .send(CreateComponent::from_url("https://github.com/acme/c.mjs"))
        .await
        .unwrap();
    assert_eq!(created.data.unwrap().code_hash.as_deref(), Some("abc"));

    let fetched = client
        .send(GetRegistryComponent::new("slack-send-message"))
        .await
        .unwrap();
    assert!(fetched.data.unwrap().configurable_props[0].remote_options);

    let found = client
        .send(SearchRegistryComponents::new("post to slack").app("slack"))
        .await
        .unwrap();
    assert_eq!(found.actions, ["slack-send-message"]);

    let err = client.send(CreateComponent::default()).await.unwrap_err();
    assert!(matches!(err.root(), PipedreamError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_rest_accounts_use_api_key() {
    let server = MockServer::start().await;
    mount_token(&server, 0).await;
    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .and(header("authorization", "Bearer pd-api-key"))
        .and(query_param("app", "github"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "apn_1", "healthy": true }],
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/accounts/apn_1"))
        .and(query_param("include_credentials", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "apn_1", "credentials": { "oauth_access_token": "gho_x" } },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();

    let accounts = client.send(ListRestAccounts::new().app("github")).await.unwrap();
    assert!(accounts.data[0].healthy);

    let account = client
        .send(GetRestAccount::new("apn_1").include_credentials(true))
        .await
        .unwrap();
    assert_eq!(account.data.credentials.unwrap()["oauth_access_token"], "gho_x");
}
