#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use noventer_dashboard::api::{ApiError, ApiRequest, ApiResult, ApiTransport};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

type Scripted = (Duration, ApiResult<Value>);

/// Transport answering from per-request scripts, optionally after a delay.
///
/// Responses are keyed by full path and query first and by bare path second,
/// and consumed in order.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<HashMap<String, VecDeque<Scripted>>>,
    sent: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, key: &str, response: ApiResult<Value>) -> Self {
        self.respond_after(key, Duration::ZERO, response)
    }

    pub fn respond_after(self, key: &str, delay: Duration, response: ApiResult<Value>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push_back((delay, response));
        self
    }

    /// Path and query of every request sent so far.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, path: &str) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|sent| sent.starts_with(path))
            .collect()
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn request(&self, request: ApiRequest) -> ApiResult<Value> {
        let key = request.path_and_query()?;
        self.sent.lock().unwrap().push(key.clone());

        let scripted = {
            let mut responses = self.responses.lock().unwrap();
            responses
                .get_mut(&key)
                .and_then(VecDeque::pop_front)
                .or_else(|| {
                    responses
                        .get_mut(&request.path)
                        .and_then(VecDeque::pop_front)
                })
        };

        match scripted {
            Some((delay, response)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                response
            }
            None => Err(ApiError::NotFound { message: None }),
        }
    }
}

pub fn envelope(count: usize, results: Vec<Value>) -> Value {
    json!({"count": count, "next": null, "previous": null, "results": results})
}

pub fn attendance(id: i32, employee: i32) -> Value {
    json!({
        "id": id,
        "employee": employee,
        "check_in": "2025-05-01T08:59:00+05:00",
        "check_out": null,
        "work_status_data": "Ishda"
    })
}

pub fn client(id: i32, name: &str, branch_name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "phone": format!("+99890{id:07}"),
        "branch_name": branch_name,
        "created_at": "2025-04-10T12:00:00+05:00"
    })
}

pub fn clients(count: i32) -> Value {
    Value::Array(
        (1..=count)
            .map(|id| client(id, &format!("Mijoz {id}"), "Yashnabod 1"))
            .collect(),
    )
}

/// Local HTTP backend answering every request with one fixed status and body.
pub struct FixedBackend {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl FixedBackend {
    pub async fn start(status: u16, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/api/v1", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|window| window == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(read) => head.extend_from_slice(&buf[..read]),
                    }
                }
                seen.lock()
                    .unwrap()
                    .push(String::from_utf8_lossy(&head).to_lowercase());

                let response = format!(
                    "HTTP/1.1 {status} Status\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self {
            base_url,
            requests,
            handle,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lowercased request heads received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for FixedBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
