#![allow(dead_code)]

//! Test infrastructure for acct-server API tests

use acct_auth::{
    ActionCodeSettings, IdentityProvider, ProviderError, ProviderResult, ProviderSession,
    TokenClaims,
};
use acct_core::{NewUser, PasswordHasher, User};
use acct_mail::{MailTask, TaskQueue};
use acct_server::{AppState, build_router};

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::sync::mpsc::Receiver;
use tower::ServiceExt;

pub const PASSWORD: &str = "Str0ng!pass";
pub const TEST_BCRYPT_COST: u32 = 4;

// =========================================================================
// Fake identity provider
// =========================================================================

struct Account {
    uid: String,
    password: String,
}

#[derive(Default)]
struct FakeState {
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, TokenClaims>,
    next_uid: usize,
    fail_delete: bool,
    fail_update_email: bool,
    deleted_uids: Vec<String>,
    deleted_tokens: Vec<String>,
    email_updates: Vec<(String, String)>,
    verify_calls: usize,
}

/// In-memory identity provider with switchable failures and a call log
#[derive(Default)]
pub struct FakeProvider {
    state: Mutex<FakeState>,
}

impl FakeProvider {
    /// Register an account and return `(uid, id_token)`
    pub fn register(&self, email: &str, password: &str, email_verified: bool) -> (String, String) {
        let mut state = self.state.lock().unwrap();
        state.next_uid += 1;
        let uid = format!("uid-{}", state.next_uid);
        state.accounts.insert(
            email.to_string(),
            Account {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );
        let token = format!("token-{}", uid);
        state
            .tokens
            .insert(token.clone(), claims(&uid, email, email_verified));
        (uid, token)
    }

    /// Issue a verified token for a subject that may have no account at all
    pub fn issue_token(&self, uid: &str, email_verified: bool) -> String {
        let token = format!("token-{}", uid);
        self.state
            .lock()
            .unwrap()
            .tokens
            .insert(token.clone(), claims(uid, "someone@example.com", email_verified));
        token
    }

    pub fn fail_delete(&self) {
        self.state.lock().unwrap().fail_delete = true;
    }

    pub fn fail_update_email(&self) {
        self.state.lock().unwrap().fail_update_email = true;
    }

    pub fn deleted_uids(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted_uids.clone()
    }

    pub fn deleted_tokens(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted_tokens.clone()
    }

    pub fn email_updates(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().email_updates.clone()
    }

    pub fn verify_calls(&self) -> usize {
        self.state.lock().unwrap().verify_calls
    }

    fn session(uid: &str, email: &str, kind: &str) -> ProviderSession {
        ProviderSession {
            local_id: uid.to_string(),
            id_token: format!("token-{}", uid),
            refresh_token: format!("refresh-{}", uid),
            expires_in: "3600".to_string(),
            kind: kind.to_string(),
            email: email.to_string(),
        }
    }
}

fn claims(uid: &str, email: &str, email_verified: bool) -> TokenClaims {
    TokenClaims {
        sub: Some(uid.to_string()),
        user_id: Some(uid.to_string()),
        email: Some(email.to_string()),
        email_verified,
        exp: 0,
        iat: 0,
        aud: "demo-project".to_string(),
        iss: "https://securetoken.google.com/demo-project".to_string(),
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn verify_id_token(&self, id_token: &str) -> ProviderResult<TokenClaims> {
        let mut state = self.state.lock().unwrap();
        state.verify_calls += 1;
        state
            .tokens
            .get(id_token)
            .cloned()
            .ok_or_else(|| ProviderError::invalid_token("unknown token"))
    }

    async fn create_account(&self, email: &str, password: &str) -> ProviderResult<ProviderSession> {
        if self.state.lock().unwrap().accounts.contains_key(email) {
            return Err(ProviderError::rejected(400, "EMAIL_EXISTS"));
        }
        let (uid, _) = self.register(email, password, false);
        Ok(Self::session(&uid, email, "identitytoolkit#SignupNewUserResponse"))
    }

    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<ProviderSession> {
        let state = self.state.lock().unwrap();
        match state.accounts.get(email) {
            Some(account) if account.password == password => Ok(Self::session(
                &account.uid,
                email,
                "identitytoolkit#VerifyPasswordResponse",
            )),
            _ => Err(ProviderError::rejected(400, "INVALID_LOGIN_CREDENTIALS")),
        }
    }

    async fn delete_account(&self, uid: &str) -> ProviderResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_delete {
            return Err(ProviderError::rejected(404, "USER_NOT_FOUND"));
        }
        state.accounts.retain(|_, account| account.uid != uid);
        state.deleted_uids.push(uid.to_string());
        Ok(())
    }

    async fn delete_account_with_token(&self, id_token: &str) -> ProviderResult<()> {
        self.state
            .lock()
            .unwrap()
            .deleted_tokens
            .push(id_token.to_string());
        Ok(())
    }

    async fn update_email(&self, uid: &str, email: &str) -> ProviderResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_update_email {
            return Err(ProviderError::rejected(400, "USER_NOT_FOUND"));
        }
        state
            .email_updates
            .push((uid.to_string(), email.to_string()));
        Ok(())
    }

    async fn generate_email_verification_link(
        &self,
        email: &str,
        _: &ActionCodeSettings,
    ) -> ProviderResult<String> {
        Ok(format!("https://auth.example.test/verify?email={}", email))
    }

    async fn generate_password_reset_link(
        &self,
        email: &str,
        _: &ActionCodeSettings,
    ) -> ProviderResult<String> {
        Ok(format!("https://auth.example.test/reset?email={}", email))
    }
}

// =========================================================================
// Application under test
// =========================================================================

pub struct TestApp {
    pub state: AppState,
    pub provider: Arc<FakeProvider>,
    mail: Option<Receiver<MailTask>>,
}

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(SqliteConnectOptions::new().filename(":memory:"))
        .await
        .expect("Failed to create test database");

    acct_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn create_test_app() -> TestApp {
    let pool = create_test_pool().await;
    let provider = Arc::new(FakeProvider::default());
    let (queue, receiver) = TaskQueue::channel(16);

    let state = AppState::new(
        pool,
        Arc::clone(&provider) as Arc<dyn IdentityProvider>,
        queue,
        PasswordHasher::new(TEST_BCRYPT_COST),
    );

    TestApp {
        state,
        provider,
        mail: Some(receiver),
    }
}

impl TestApp {
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Create a provider account and its local record. Returns the record and a bearer token.
    pub async fn seed_user(&self, email: &str, first_name: &str, verified: bool) -> (User, String) {
        let (uid, token) = self.provider.register(email, PASSWORD, verified);
        let hash = PasswordHasher::new(TEST_BCRYPT_COST)
            .hash(PASSWORD)
            .expect("Failed to hash password");

        let user = self
            .state
            .users
            .create(&NewUser::new(
                uid,
                email.to_string(),
                hash,
                first_name.to_string(),
                "Lovelace".to_string(),
            ))
            .await
            .expect("Failed to seed user");

        (user, token)
    }

    /// Tasks queued so far
    pub fn queued_mail(&mut self) -> Vec<MailTask> {
        let mut tasks = Vec::new();
        if let Some(ref mut receiver) = self.mail {
            while let Ok(task) = receiver.try_recv() {
                tasks.push(task);
            }
        }
        tasks
    }

    /// Stop the consumer side so every enqueue fails
    pub fn close_mail_queue(&mut self) {
        self.mail = None;
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }
}

// =========================================================================
// Requests
// =========================================================================

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}
