#![allow(dead_code)]

use acct_auth::{FirebaseClient, FirebaseEndpoints, ServiceAccount, TokenClaims};

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const PROJECT_ID: &str = "demo-project";
pub const WEB_API_KEY: &str = "test-web-api-key";
pub const KID: &str = "test-key-1";

pub const PRIVATE_KEY_PEM: &str = include_str!("../fixtures/test_rsa_private.pem");
pub const JWK_JSON: &str = include_str!("../fixtures/test_jwk.json");

pub fn jwks_body() -> Value {
    let jwk: Value = serde_json::from_str(JWK_JSON).unwrap();
    json!({ "keys": [jwk] })
}

pub fn service_account(token_uri: &str) -> ServiceAccount {
    let json = json!({
        "type": "service_account",
        "project_id": PROJECT_ID,
        "private_key_id": "ignored",
        "private_key": PRIVATE_KEY_PEM,
        "client_email": format!("firebase-adminsdk@{}.iam.gserviceaccount.com", PROJECT_ID),
        "token_uri": token_uri,
    });
    ServiceAccount::from_json(&json.to_string()).unwrap()
}

/// A client whose every endpoint points at the mock server
pub fn create_test_client(server: &MockServer) -> FirebaseClient {
    let endpoints = FirebaseEndpoints::new(
        &format!("{}/v1", server.uri()),
        &format!("{}/jwks", server.uri()),
        Duration::from_secs(3600),
    );
    FirebaseClient::new(
        service_account(&format!("{}/token", server.uri())),
        WEB_API_KEY,
        endpoints,
    )
    .unwrap()
}

pub fn valid_claims(uid: &str) -> TokenClaims {
    let now = Utc::now().timestamp();
    TokenClaims {
        sub: Some(uid.to_string()),
        user_id: Some(uid.to_string()),
        email: Some("ada@example.com".to_string()),
        email_verified: true,
        exp: now + 3600,
        iat: now,
        aud: PROJECT_ID.to_string(),
        iss: format!("https://securetoken.google.com/{}", PROJECT_ID),
    }
}

/// Sign an ID token with the fixture key, as the provider would
pub fn sign_id_token(claims: &TokenClaims, kid: &str) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    encode(
        &header,
        claims,
        &EncodingKey::from_rsa_pem(PRIVATE_KEY_PEM.as_bytes()).unwrap(),
    )
    .unwrap()
}
