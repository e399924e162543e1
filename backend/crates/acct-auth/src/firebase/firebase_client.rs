//! Firebase Authentication over its REST APIs.
//!
//! Three kinds of calls are made:
//! - public Identity Toolkit calls keyed by the web API key (sign-up, sign-in,
//!   self-deletion);
//! - admin Identity Toolkit calls authorized with an OAuth2 access token
//!   obtained by signing a JWT with the service-account key;
//! - ID token verification against the provider's published signing keys.

use crate::firebase::access_token_cache::AccessTokenCache;
use crate::firebase::public_key_cache::PublicKeyCache;
use crate::{
    ActionCodeSettings, FirebaseEndpoints, IdentityProvider, ProviderError, ProviderResult,
    ProviderSession, ServiceAccount, TokenClaims,
};

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
};
use log::{debug, info, warn};
use reqwest::{Client as ReqwestClient, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ADMIN_SCOPES: &str = "https://www.googleapis.com/auth/cloud-platform \
                            https://www.googleapis.com/auth/firebase \
                            https://www.googleapis.com/auth/identitytoolkit \
                            https://www.googleapis.com/auth/userinfo.email";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const TOKEN_LEEWAY_SECS: u64 = 30;

pub struct FirebaseClient {
    http: ReqwestClient,
    endpoints: FirebaseEndpoints,
    web_api_key: String,
    service_account: ServiceAccount,
    signing_key: EncodingKey,
    access_tokens: AccessTokenCache,
    public_keys: PublicKeyCache,
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeResponse {
    oob_link: Option<String>,
}

impl FirebaseClient {
    #[track_caller]
    pub fn new(
        service_account: ServiceAccount,
        web_api_key: &str,
        endpoints: FirebaseEndpoints,
    ) -> ProviderResult<Self> {
        let signing_key = EncodingKey::from_rsa_pem(service_account.private_key.as_bytes())
            .map_err(|e| ProviderError::credentials(format!("Invalid private key: {}", e)))?;

        let http = ReqwestClient::builder().timeout(REQUEST_TIMEOUT).build()?;
        let public_keys = PublicKeyCache::new(endpoints.key_refresh);

        Ok(Self {
            http,
            endpoints,
            web_api_key: web_api_key.to_string(),
            service_account,
            signing_key,
            access_tokens: AccessTokenCache::new(),
            public_keys,
        })
    }

    /// Build a client from a service-account JSON file
    #[track_caller]
    pub fn from_credentials_file(
        path: &Path,
        web_api_key: &str,
        endpoints: FirebaseEndpoints,
    ) -> ProviderResult<Self> {
        let service_account = ServiceAccount::from_file(path)?;
        info!(
            "Firebase credentials loaded for project {} ({})",
            service_account.project_id, service_account.client_email
        );
        Self::new(service_account, web_api_key, endpoints)
    }

    pub fn project_id(&self) -> &str {
        &self.service_account.project_id
    }

    // =========================================================================
    // OAuth2 and signing keys
    // =========================================================================

    async fn access_token(&self) -> ProviderResult<String> {
        self.access_tokens
            .get_or_fetch(|| self.fetch_access_token())
            .await
    }

    async fn fetch_access_token(&self) -> ProviderResult<(String, Duration)> {
        let now = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.service_account.client_email,
            scope: ADMIN_SCOPES,
            aud: &self.service_account.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &self.signing_key)?;

        debug!("Exchanging service-account assertion for an access token");
        let response = self
            .http
            .post(&self.service_account.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
            .send()
            .await?;

        let token: AccessTokenResponse = read_response(response).await?;
        Ok((token.access_token, Duration::from_secs(token.expires_in)))
    }

    async fn fetch_public_keys(&self) -> ProviderResult<HashMap<String, DecodingKey>> {
        debug!("Fetching ID token signing keys from {}", self.endpoints.jwks_url);
        let response = self.http.get(&self.endpoints.jwks_url).send().await?;
        let set: JwkSet = read_response(response).await?;

        let mut keys = HashMap::new();
        for jwk in &set.keys {
            let Some(kid) = jwk.common.key_id.clone() else {
                continue;
            };
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    keys.insert(kid, key);
                }
                Err(e) => warn!("Skipping unusable signing key {}: {}", kid, e),
            }
        }

        Ok(keys)
    }

    // =========================================================================
    // Transport
    // =========================================================================

    async fn post_public<T: DeserializeOwned>(&self, method: &str, body: &Value) -> ProviderResult<T> {
        let request = self
            .http
            .post(self.endpoints.public(method))
            .query(&[("key", self.web_api_key.as_str())])
            .json(body);
        self.execute(request).await
    }

    async fn post_admin<T: DeserializeOwned>(&self, method: &str, body: &Value) -> ProviderResult<T> {
        let token = self.access_token().await?;
        let request = self
            .http
            .post(self.endpoints.admin(self.project_id(), method))
            .bearer_auth(token)
            .json(body);

        let result = self.execute(request).await;
        if let Err(ProviderError::Rejected { status, .. }) = &result
            && *status == StatusCode::UNAUTHORIZED.as_u16()
        {
            warn!("Admin access token rejected, dropping cached token");
            self.access_tokens.clear().await;
        }
        result
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ProviderResult<T> {
        let response = request.send().await?;
        read_response(response).await
    }

    async fn send_oob_code(
        &self,
        request_type: &str,
        email: &str,
        settings: &ActionCodeSettings,
    ) -> ProviderResult<String> {
        let body = json!({
            "requestType": request_type,
            "email": email,
            "returnOobLink": true,
            "continueUrl": settings.url,
            "canHandleCodeInApp": settings.handle_code_in_app,
        });

        let response: OobCodeResponse = self.post_admin("sendOobCode", &body).await?;
        response
            .oob_link
            .ok_or_else(|| ProviderError::response("sendOobCode returned no oobLink"))
    }
}

/// Decode a success body, or turn an error body into `ProviderError::Rejected`.
///
/// Identity Toolkit errors look like `{"error": {"code": 400, "message": "EMAIL_EXISTS"}}`;
/// the OAuth2 token endpoint answers `{"error": "invalid_grant", "error_description": ...}`.
async fn read_response<T: DeserializeOwned>(response: Response) -> ProviderResult<T> {
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        let message = match body.get("error") {
            Some(Value::Object(error)) => error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("UNKNOWN_ERROR")
                .to_string(),
            Some(Value::String(code)) => body
                .get("error_description")
                .and_then(Value::as_str)
                .map(|description| format!("{}: {}", code, description))
                .unwrap_or_else(|| code.clone()),
            _ => format!("HTTP {}", status.as_u16()),
        };
        return Err(ProviderError::rejected(status.as_u16(), message));
    }

    serde_json::from_value(body)
        .map_err(|e| ProviderError::response(format!("Malformed response body: {}", e)))
}

#[async_trait]
impl IdentityProvider for FirebaseClient {
    async fn verify_id_token(&self, id_token: &str) -> ProviderResult<TokenClaims> {
        let header = decode_header(id_token)?;
        if header.alg != Algorithm::RS256 {
            return Err(ProviderError::invalid_token(format!(
                "unexpected algorithm {:?}",
                header.alg
            )));
        }
        let kid = header
            .kid
            .ok_or_else(|| ProviderError::invalid_token("token header has no kid"))?;

        let key = self
            .public_keys
            .get(&kid, || self.fetch_public_keys())
            .await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.project_id()]);
        validation.set_issuer(&[self.service_account.token_issuer()]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);
        validation.leeway = TOKEN_LEEWAY_SECS;

        let data = decode::<TokenClaims>(id_token, &key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => ProviderError::invalid_token("token expired"),
            ErrorKind::InvalidAudience => ProviderError::invalid_token("wrong audience"),
            ErrorKind::InvalidIssuer => ProviderError::invalid_token("wrong issuer"),
            _ => ProviderError::from(e),
        })?;

        Ok(data.claims)
    }

    async fn create_account(&self, email: &str, password: &str) -> ProviderResult<ProviderSession> {
        let body = json!({"email": email, "password": password, "returnSecureToken": true});
        self.post_public("signUp", &body).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<ProviderSession> {
        let body = json!({"email": email, "password": password, "returnSecureToken": true});
        self.post_public("signInWithPassword", &body).await
    }

    async fn delete_account(&self, uid: &str) -> ProviderResult<()> {
        let _: Value = self.post_admin("delete", &json!({"localId": uid})).await?;
        Ok(())
    }

    async fn delete_account_with_token(&self, id_token: &str) -> ProviderResult<()> {
        let _: Value = self
            .post_public("delete", &json!({"idToken": id_token}))
            .await?;
        Ok(())
    }

    async fn update_email(&self, uid: &str, email: &str) -> ProviderResult<()> {
        let body = json!({"localId": uid, "email": email});
        let _: Value = self.post_admin("update", &body).await?;
        Ok(())
    }

    async fn generate_email_verification_link(
        &self,
        email: &str,
        settings: &ActionCodeSettings,
    ) -> ProviderResult<String> {
        self.send_oob_code("VERIFY_EMAIL", email, settings).await
    }

    async fn generate_password_reset_link(
        &self,
        email: &str,
        settings: &ActionCodeSettings,
    ) -> ProviderResult<String> {
        self.send_oob_code("PASSWORD_RESET", email, settings).await
    }
}
