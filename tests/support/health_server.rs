// ABOUTME: In-process HTTP health endpoint for probe tests.
// ABOUTME: Answers healthy, degraded, 500 or garbage, hangs, or drops the connection.

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// How the fixture answers the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// 200 {"status": "healthy"}
    Healthy,
    /// 200 {"status": "degraded"}
    Degraded,
    /// 500 {"status": "healthy"}
    ServerError,
    /// 200 with a body that is not JSON
    Garbage,
    /// 200 JSON without a status field
    NoStatus,
    /// Accept and never answer
    Hang,
    /// Accept and close without answering
    Drop,
}

pub struct HealthServer {
    url: String,
    mode: Arc<Mutex<Mode>>,
    requests: Arc<AtomicUsize>,
    task: tokio::task::JoinHandle<()>,
}

impl HealthServer {
    pub async fn start(mode: Mode) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let mode = Arc::new(Mutex::new(mode));
        let requests = Arc::new(AtomicUsize::new(0));

        let task = {
            let mode = mode.clone();
            let requests = requests.clone();
            tokio::spawn(async move {
                loop {
                    let Ok((stream, _)) = listener.accept().await else {
                        return;
                    };
                    requests.fetch_add(1, Ordering::SeqCst);
                    let current = *mode.lock();
                    tokio::spawn(answer(stream, current));
                }
            })
        };

        Self {
            url: format!("http://{}/health", addr),
            mode,
            requests,
            task,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_mode(&self, mode: Mode) {
        *self.mode.lock() = mode;
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Drop for HealthServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn answer(mut stream: TcpStream, mode: Mode) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let (status, body) = match mode {
        Mode::Healthy => ("200 OK", r#"{"status": "healthy"}"#),
        Mode::Degraded => ("200 OK", r#"{"status": "degraded"}"#),
        Mode::ServerError => ("500 Internal Server Error", r#"{"status": "healthy"}"#),
        Mode::Garbage => ("200 OK", "<html>definitely not json</html>"),
        Mode::NoStatus => ("200 OK", r#"{"uptime": 42}"#),
        Mode::Hang => {
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
            return;
        }
        Mode::Drop => return,
    };

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}
