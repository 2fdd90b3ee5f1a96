use std::sync::Arc;

use auth::Authenticator;
use auth::Claims;
use auth::JwtHandler;
use auth::PasswordHasher;
use chrono::Duration;
use chrono::Utc;
use numeric_service::domain::identity::service::IdentityService;
use numeric_service::inbound::http::router::create_router;
use numeric_service::outbound::repositories::InMemoryCredentialRepository;
use serde_json::json;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheap Argon2 parameters keep the suite fast
        let password_hasher =
            PasswordHasher::with_params(1024, 1, 1).expect("Failed to create password hasher");
        let authenticator = Arc::new(Authenticator::with_password_hasher(
            JWT_SECRET,
            password_hasher,
        ));

        let repository = Arc::new(InMemoryCredentialRepository::new());
        let identity_service = Arc::new(
            IdentityService::new(repository, authenticator, Duration::minutes(30))
                .expect("Failed to create identity service"),
        );

        let router = create_router(identity_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with the token query parameter
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).query(&[("token", token)])
    }

    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/register")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register a user and return a fresh access token for it
    pub async fn token_for(&self, username: &str, password: &str) -> String {
        self.register(username, password).await;

        let body: serde_json::Value = self
            .login(username, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        body["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }

    /// Sign a token for `subject` that expired `seconds_ago` seconds ago
    pub fn expired_token(&self, subject: &str, seconds_ago: i64) -> String {
        let claims = Claims {
            sub: subject.to_string(),
            iat: Utc::now().timestamp() - seconds_ago - 60,
            exp: Utc::now().timestamp() - seconds_ago,
        };
        self.jwt_handler
            .encode(&claims)
            .expect("Failed to encode token")
    }
}
