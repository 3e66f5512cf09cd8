use serde::Serialize;

pub const GRANT_TYPE: &str = "client_credentials";

// POST /oauth/token
#[derive(Serialize)]
pub struct TokenRequest<'a> {
    pub grant_type: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}
