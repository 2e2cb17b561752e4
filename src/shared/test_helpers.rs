//! Fake collection endpoint for submission tests.
//!
//! Spins up an `axum` server on a random port bound to 127.0.0.1 that
//! accepts `POST /submit-log` multipart bodies, records every part, and
//! replies with a scripted status and body.

#[cfg(test)]
use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
#[cfg(test)]
use std::net::SocketAddr;
#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use tokio::net::TcpListener;
#[cfg(test)]
use tokio::sync::Mutex;

/// One multipart part as the endpoint saw it
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ReceivedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

#[cfg(test)]
impl ReceivedPart {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub headers: HeaderMap,
    pub query: Option<String>,
    pub parts: Vec<ReceivedPart>,
}

#[cfg(test)]
impl ReceivedRequest {
    pub fn field(&self, name: &str) -> Option<&ReceivedPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    pub fn fields_named(&self, name: &str) -> Vec<&ReceivedPart> {
        self.parts.iter().filter(|p| p.name == name).collect()
    }
}

#[cfg(test)]
struct EndpointState {
    status: StatusCode,
    body: String,
    requests: Vec<ReceivedRequest>,
}

/// Handle to the running fake endpoint
#[cfg(test)]
pub struct FakeCollectionEndpoint {
    addr: SocketAddr,
    state: Arc<Mutex<EndpointState>>,
}

#[cfg(test)]
impl FakeCollectionEndpoint {
    /// Start an endpoint that answers every request with `status` and `body`
    pub async fn start(status: StatusCode, body: &str) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(EndpointState {
            status,
            body: body.to_string(),
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/submit-log", post(accept_log))
            .with_state(state.clone());

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, state })
    }

    /// Endpoint URL (e.g. `http://127.0.0.1:PORT/submit-log`)
    pub fn url(&self) -> String {
        format!("http://{}/submit-log", self.addr)
    }

    pub async fn requests(&self) -> Vec<ReceivedRequest> {
        self.state.lock().await.requests.clone()
    }
}

/// URL of a listener that accepts each connection and closes it at once
#[cfg(test)]
pub async fn hangup_url() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            drop(stream);
        }
    });

    Ok(format!("http://{}/submit-log", addr))
}

/// URL of a listener that accepts connections and never answers
#[cfg(test)]
pub async fn silent_url() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    Ok(format!("http://{}/submit-log", addr))
}

#[cfg(test)]
async fn accept_log(
    State(state): State<Arc<Mutex<EndpointState>>>,
    uri: axum::http::Uri,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut parts = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        parts.push(ReceivedPart {
            name,
            file_name,
            content_type,
            data,
        });
    }

    let mut state = state.lock().await;
    state.requests.push(ReceivedRequest {
        headers,
        query: uri.query().map(str::to_string),
        parts,
    });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}
