//! Integration tests for the live-reload server and the control loop.
//!
//! Plain requests go over raw TCP so the exact status line can be checked;
//! browsers are played by a WebSocket client.

use arbor_cli::dev::{
    AppLauncher, AppProcess, BuildRunner, DevCommand, DevContext, DevServer, Orchestrator,
    OrchestratorHandle, ServerState, Signal,
};
use async_trait::async_trait;
use futures::StreamExt;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout, Duration};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

const RELOAD: &str = r#"{"command":"reload"}"#;

async fn start_server(state: ServerState) -> SocketAddr {
    let server = DevServer::bind(SocketAddr::from(([127, 0, 0, 1], 0)), state)
        .await
        .unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());
    addr
}

async fn http_get(addr: SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

type Browser = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn open_browser(addr: SocketAddr) -> Browser {
    let (browser, response) = connect_async(format!("ws://{addr}/live-reload"))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 101);
    browser
}

async fn next_text(browser: &mut Browser) -> String {
    loop {
        match browser.next().await {
            Some(Ok(Message::Text(text))) => return text.as_str().to_string(),
            Some(Ok(_)) => continue,
            other => panic!("session ended without a message: {other:?}"),
        }
    }
}

async fn wait_for_sessions(context: &DevContext, expected: usize) {
    for _ in 0..200 {
        if context.session_count() == expected {
            return;
        }
        sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "expected {expected} sessions, found {}",
        context.session_count()
    );
}

fn detached_state() -> (ServerState, mpsc::Receiver<Signal>) {
    let (tx, rx) = mpsc::channel(8);
    let state = ServerState {
        context: Arc::new(DevContext::new()),
        orchestrator: OrchestratorHandle::new(tx),
    };
    (state, rx)
}

#[tokio::test]
async fn test_listening_answers_ok_and_signals_ready() {
    let (state, mut signals) = detached_state();
    let addr = start_server(state).await;

    let response = http_get(addr, "/listening").await;
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");

    let signal = timeout(Duration::from_secs(2), signals.recv()).await.unwrap();
    assert!(matches!(signal, Some(Signal::Ready)));
}

#[tokio::test]
async fn test_live_reload_requires_upgrade() {
    let (state, _signals) = detached_state();
    let addr = start_server(state).await;

    let response = http_get(addr, "/live-reload").await;
    assert!(response.starts_with("HTTP/1.1 501"), "{response}");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let (state, _signals) = detached_state();
    let addr = start_server(state).await;

    let response = http_get(addr, "/reload").await;
    assert!(response.starts_with("HTTP/1.1 404"), "{response}");
}

#[tokio::test]
async fn test_session_receives_broadcast_and_unregisters() {
    let (state, _signals) = detached_state();
    let context = Arc::clone(&state.context);
    let addr = start_server(state).await;

    let mut first = open_browser(addr).await;
    let mut second = open_browser(addr).await;
    wait_for_sessions(&context, 2).await;

    assert_eq!(context.broadcast(&DevCommand::Reload), 2);
    assert_eq!(next_text(&mut first).await, RELOAD);
    assert_eq!(next_text(&mut second).await, RELOAD);

    drop(first);
    wait_for_sessions(&context, 1).await;
    drop(second);
    wait_for_sessions(&context, 0).await;
}

struct InstantBuilder {
    builds: AtomicUsize,
}

#[async_trait]
impl BuildRunner for InstantBuilder {
    async fn build(&self) -> bool {
        self.builds.fetch_add(1, Ordering::SeqCst);
        true
    }
}

struct NoopApp;

#[async_trait]
impl AppProcess for NoopApp {
    async fn stop(&mut self) {}
}

struct CountingLauncher {
    launches: AtomicUsize,
}

#[async_trait]
impl AppLauncher for CountingLauncher {
    async fn launch(&self) -> Option<Box<dyn AppProcess>> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        Some(Box::new(NoopApp))
    }
}

async fn wait_for_launches(launcher: &CountingLauncher, expected: usize) {
    for _ in 0..200 {
        if launcher.launches.load(Ordering::SeqCst) == expected {
            return;
        }
        sleep(Duration::from_millis(10)).await;
    }
    panic!("app was not launched {expected} times");
}

#[tokio::test]
async fn test_ready_after_restart_reloads_browsers() {
    let builder = Arc::new(InstantBuilder {
        builds: AtomicUsize::new(0),
    });
    let launcher = Arc::new(CountingLauncher {
        launches: AtomicUsize::new(0),
    });
    let context = Arc::new(DevContext::new());
    let orchestrator = Orchestrator::new(builder.clone(), launcher.clone(), Arc::clone(&context));
    let handle = orchestrator.handle();
    let control = tokio::spawn(orchestrator.run());

    let addr = start_server(ServerState {
        context: Arc::clone(&context),
        orchestrator: handle.clone(),
    })
    .await;
    let mut browser = open_browser(addr).await;
    wait_for_sessions(&context, 1).await;

    // initial build and launch, then the app reports in
    handle.request_build().await;
    wait_for_launches(&launcher, 1).await;
    assert!(http_get(addr, "/listening").await.starts_with("HTTP/1.1 200"));

    // an edit rebuilds and restarts; the next ready reloads the browser
    handle.request_build().await;
    wait_for_launches(&launcher, 2).await;
    sleep(Duration::from_millis(50)).await;
    assert!(http_get(addr, "/listening").await.starts_with("HTTP/1.1 200"));

    let message = timeout(Duration::from_secs(2), next_text(&mut browser)).await.unwrap();
    assert_eq!(message, RELOAD);
    assert_eq!(builder.builds.load(Ordering::SeqCst), 2);

    handle.shutdown().await;
    control.await.unwrap();
}
