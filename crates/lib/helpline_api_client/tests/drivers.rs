//! Drivers against a live relay bound to an ephemeral port.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::post;
use helpline_api::{AppState, config::ApiConfig};
use helpline_api_client::RelayClient;
use helpline_api_client::driver::{ChatDriver, TranscriptView, start_bot};
use helpline_core::Message;
use helpline_core::completion::{CompletionError, CompletionProvider};
use helpline_core::dashboard::{BotLauncher, START_FAILED_MESSAGE};
use helpline_core::failure::{NETWORK_PROBLEM_MESSAGE, UNREACHABLE_MESSAGE};
use helpline_core::session::{SessionState, display_content};
use helpline_core::transcript::GREETING;

/// Replies with the last user message shouted back.
struct Shout;

#[async_trait]
impl CompletionProvider for Shout {
    async fn complete(&self, _: &str, messages: &[Message]) -> Result<String, CompletionError> {
        Ok(messages
            .last()
            .map(|m| m.content.to_uppercase())
            .unwrap_or_default())
    }
}

struct Broken;

#[async_trait]
impl CompletionProvider for Broken {
    async fn complete(&self, _: &str, _: &[Message]) -> Result<String, CompletionError> {
        Err(CompletionError::Decode("truncated".into()))
    }
}

/// Captures what the transcript looked like at every scroll.
#[derive(Default)]
struct Snapshots(Vec<Vec<String>>);

impl TranscriptView for Snapshots {
    fn scroll_to_latest(&mut self, session: &helpline_core::session::ChatSession) {
        self.0.push(
            session
                .transcript()
                .messages()
                .iter()
                .map(|m| display_content(m).to_string())
                .collect(),
        );
    }
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await });
    format!("http://{addr}")
}

async fn relay_with(provider: Arc<dyn CompletionProvider>) -> String {
    let state = AppState {
        provider,
        config: ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            provider_base_url: "http://unused.invalid".into(),
            api_key: None,
            model: "llama3-8b-8192".into(),
        },
    };
    serve(helpline_api::router(state)).await
}

#[tokio::test]
async fn round_trip_fills_placeholder() {
    let server = relay_with(Arc::new(Shout)).await;
    let mut driver = ChatDriver::new(RelayClient::new(&server).unwrap());
    let mut view = Snapshots::default();

    driver.send("Hello", &mut view).await;

    assert_eq!(
        view.0,
        vec![
            vec![GREETING.to_string(), "Hello".into(), "...".into()],
            vec![GREETING.to_string(), "Hello".into(), "HELLO".into()],
        ]
    );
    assert_eq!(driver.session().state(), SessionState::Idle);
    assert_eq!(driver.session().transcript().len(), 3);
}

#[tokio::test]
async fn relay_500_becomes_network_problem() {
    let server = relay_with(Arc::new(Broken)).await;
    let mut driver = ChatDriver::new(RelayClient::new(&server).unwrap());
    let mut view = Snapshots::default();

    driver.send("Hello", &mut view).await;

    let session = driver.session();
    assert_eq!(session.state(), SessionState::Error);
    assert_eq!(session.error(), Some(NETWORK_PROBLEM_MESSAGE));
    assert_eq!(
        session.transcript().last(),
        Some(&Message::assistant(NETWORK_PROBLEM_MESSAGE))
    );
}

#[tokio::test]
async fn reply_without_content_is_an_empty_answer() {
    for body in ["{}", r#"{"content":null}"#] {
        let server = serve(Router::new().route(
            "/api/chat",
            post(move || async move { ([(header::CONTENT_TYPE, "application/json")], body) }),
        ))
        .await;
        let mut driver = ChatDriver::new(RelayClient::new(&server).unwrap());
        let mut view = Snapshots::default();

        driver.send("Hello", &mut view).await;

        let session = driver.session();
        assert_eq!(session.state(), SessionState::Idle, "body {body}");
        assert_eq!(session.error(), None);
        assert_eq!(session.transcript().last(), Some(&Message::assistant("")));
    }
}

#[tokio::test]
async fn closed_port_becomes_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut driver = ChatDriver::new(RelayClient::new(&format!("http://{addr}")).unwrap());
    let mut view = Snapshots::default();
    driver.send("Hello", &mut view).await;

    assert_eq!(driver.session().error(), Some(UNREACHABLE_MESSAGE));
    assert_eq!(driver.session().transcript().len(), 3);
}

#[tokio::test]
async fn start_bot_success_and_failure() {
    let ok = serve(Router::new().route("/api/start-bot", post(|| async { StatusCode::NO_CONTENT }))).await;
    let mut launcher = BotLauncher::new();
    assert!(start_bot(&mut launcher, &RelayClient::new(&ok).unwrap()).await);
    assert!(launcher.is_running());
    assert!(!start_bot(&mut launcher, &RelayClient::new(&ok).unwrap()).await);

    let down = serve(Router::new().route(
        "/api/start-bot",
        post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    ))
    .await;
    let mut launcher = BotLauncher::new();
    assert!(start_bot(&mut launcher, &RelayClient::new(&down).unwrap()).await);
    assert!(!launcher.is_running());
    assert_eq!(launcher.error(), Some(START_FAILED_MESSAGE));
}
