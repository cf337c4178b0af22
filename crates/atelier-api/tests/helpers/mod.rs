//! Test helpers: build AppState and router with in-memory fakes.
//!
//! Run from workspace root: `cargo test -p atelier-api`.

#![allow(dead_code)]

pub mod fakes;

use std::sync::Arc;

use atelier_api::setup::routes;
use atelier_api::state::AppState;
use atelier_api::ContactNotifier;
use atelier_core::{Config, ServerConfig};
use atelier_db::ContactStore;
use atelier_services::{EmailValidator, MxResolver};
use axum_test::TestServer;

pub use fakes::{FailingNotifier, FixedResolver, InMemoryContactStore, RecordingNotifier};

pub const ALLOWED_ORIGIN: &str = "https://studio.test";

/// Test application: server plus handles on the fakes behind it.
pub struct TestApp {
    pub server: TestServer,
    pub contacts: Arc<InMemoryContactStore>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Builder for the test router; defaults to a working store, no notifier, static checks only.
pub struct TestAppBuilder {
    contacts: Arc<InMemoryContactStore>,
    notifier: Option<Arc<dyn ContactNotifier>>,
    resolver: Option<Arc<dyn MxResolver>>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(InMemoryContactStore::default()),
            notifier: None,
            resolver: None,
        }
    }

    pub fn contacts(mut self, contacts: InMemoryContactStore) -> Self {
        self.contacts = Arc::new(contacts);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn ContactNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn MxResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub async fn build(self) -> TestApp {
        let config = test_config();
        let email_validator = match self.resolver {
            Some(resolver) => EmailValidator::with_resolver(resolver),
            None => EmailValidator::new(),
        };

        let state = Arc::new(AppState {
            config: config.clone(),
            contacts: self.contacts.clone() as Arc<dyn ContactStore>,
            notifier: self.notifier,
            email_validator: Arc::new(email_validator),
        });

        let router = routes::setup_routes(&config, state)
            .await
            .expect("router builds");
        let server = TestServer::new(router).expect("test server starts");

        TestApp {
            server,
            contacts: self.contacts,
        }
    }
}

pub async fn setup_test_app() -> TestApp {
    TestAppBuilder::new().build().await
}

pub fn test_config() -> Config {
    let server = ServerConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgresql://localhost/atelier_test".to_string()),
        "CORS_ORIGINS" => Some(ALLOWED_ORIGIN.to_string()),
        "ENVIRONMENT" => Some("test".to_string()),
        _ => None,
    })
    .expect("test config");
    Config(Box::new(server))
}
