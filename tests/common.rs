#![allow(dead_code)]

use clap::Parser as _;
use notice_board::AppBuilder;
use notice_board::api::{MgmtState, app_router, mgmt_router};
use notice_board::config::Config;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::sync::Once;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("notice_board=debug".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

pub fn get_test_config() -> Config {
    Config::try_parse_from(["notice-board", "--host", "127.0.0.1", "--port", "0", "--storage", "memory"])
        .expect("test config should parse")
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
    pub shutdown: CancellationToken,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_config(get_test_config()).await
    }

    pub async fn spawn_with_config(config: Config) -> Self {
        setup_tracing();

        let app = AppBuilder::new(config.clone()).build();
        let shutdown = CancellationToken::new();

        let router = app_router(config, app.notice_service, shutdown.clone());
        let mgmt = mgmt_router(MgmtState { repository: app.repository });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_url = format!("http://{}", listener.local_addr().unwrap());
        let mgmt_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());

        let token = shutdown.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).with_graceful_shutdown(async move { token.cancelled().await }).await.unwrap();
        });
        let token = shutdown.clone();
        tokio::spawn(async move {
            axum::serve(mgmt_listener, mgmt).with_graceful_shutdown(async move { token.cancelled().await }).await.unwrap();
        });

        Self { server_url, mgmt_url, client: reqwest::Client::new(), shutdown }
    }

    pub fn notices_url(&self) -> String {
        format!("{}/api/v1/notices", self.server_url)
    }

    pub fn notice_url(&self, id: impl std::fmt::Display) -> String {
        format!("{}/api/v1/notices/{}", self.server_url, id)
    }

    pub async fn create_notice(&self, title: &str, message: &str) -> Value {
        let resp = self
            .client
            .post(self.notices_url())
            .json(&json!({ "title": title, "message": message }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        resp.json().await.unwrap()
    }

    pub async fn create_notice_id(&self, title: &str, message: &str) -> i64 {
        self.create_notice(title, message).await["id"].as_i64().unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
