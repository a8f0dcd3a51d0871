use std::sync::Arc;

use auth::Authenticator;
use auth::HashingCost;
use chrono::Duration;
use credential_service::credential::service::CredentialService;
use credential_service::inbound::http::router::create_router;
use credential_service::portfolio::models::Holding;
use credential_service::portfolio::models::Position;
use credential_service::portfolio::service::PortfolioService;
use credential_service::repositories::InMemoryCredentialStore;
use credential_service::repositories::InMemoryPortfolioRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
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

        // Minimum practical Argon2 cost for tests
        let authenticator = Arc::new(
            Authenticator::with_settings(
                TEST_SECRET,
                HashingCost {
                    memory_kib: 1024,
                    iterations: 1,
                    parallelism: 1,
                },
                Duration::hours(1),
            )
            .expect("Failed to create authenticator"),
        );

        let credential_service = Arc::new(CredentialService::new(
            Arc::new(InMemoryCredentialStore::new()),
            Arc::clone(&authenticator),
        ));
        let portfolio_service = Arc::new(PortfolioService::new(Arc::new(
            InMemoryPortfolioRepository::new(sample_holdings(), sample_positions()),
        )));

        let router = create_router(
            credential_service,
            portfolio_service,
            Arc::clone(&authenticator),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            authenticator,
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

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and assert it succeeded
    pub async fn signup(&self, username: &str, password: &str) {
        let response = self
            .post("/signup")
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    /// Log in and return the issued token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/login")
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Login response has no token")
            .to_string()
    }
}

pub fn sample_holdings() -> Vec<Holding> {
    vec![
        Holding {
            name: "BHARTIARTL".to_string(),
            qty: 2,
            avg: 538.05,
            price: 541.15,
            net: "+0.58%".to_string(),
            day: "+2.99%".to_string(),
        },
        Holding {
            name: "HDFCBANK".to_string(),
            qty: 2,
            avg: 1383.4,
            price: 1522.35,
            net: "+10.04%".to_string(),
            day: "+0.11%".to_string(),
        },
    ]
}

pub fn sample_positions() -> Vec<Position> {
    vec![Position {
        product: "CNC".to_string(),
        name: "EVEREADY".to_string(),
        qty: 2,
        avg: 316.27,
        price: 312.35,
        net: "+0.58%".to_string(),
        day: "-1.24%".to_string(),
        is_loss: true,
    }]
}
