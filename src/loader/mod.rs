use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::profile::ProfileRecord;

/// Fall 2025 ITIS 3135 roster, full records.
pub const DEFAULT_ENDPOINT: &str = "https://dvonb.xyz/api/2025-fall/itis-3135/students?full=1";

pub const DEFAULT_USER_AGENT: &str = concat!("rosterview/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP {code}: Failed to fetch student data")]
    Status { code: u16 },

    #[error("{message}")]
    Transport { message: String },

    #[error("failed to parse student data: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },
}

impl From<reqwest::Error> for LoadError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => LoadError::Status {
                code: status.as_u16(),
            },
            None => LoadError::Transport {
                message: e.to_string(),
            },
        }
    }
}

/// Lifecycle of the one-shot roster fetch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "camelCase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl LoadStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadStatus::Ready)
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStatus::Idle => f.write_str("idle"),
            LoadStatus::Loading => f.write_str("loading"),
            LoadStatus::Ready => f.write_str("ready"),
            LoadStatus::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Where roster records come from.
#[async_trait]
pub trait RosterSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<ProfileRecord>, LoadError>;
}

/// Decodes a roster payload: a JSON array of profile objects.
pub fn parse_roster(body: &[u8]) -> Result<Vec<ProfileRecord>, LoadError> {
    serde_json::from_slice(body).map_err(|source| LoadError::Decode { source })
}

#[derive(Clone, Debug)]
pub struct HttpLoaderOptions {
    pub endpoint: String,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpLoaderOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Single GET against a fixed URL. No retries.
#[derive(Clone, Debug)]
pub struct HttpLoader {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpLoader {
    pub fn new(options: HttpLoaderOptions) -> Result<Self, LoadError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(options.user_agent);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|source| LoadError::ClientBuild { source })?;
        Ok(Self {
            client,
            endpoint: options.endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RosterSource for HttpLoader {
    async fn fetch(&self) -> Result<Vec<ProfileRecord>, LoadError> {
        log::debug!("fetching roster from {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::debug!(
                "roster request failed: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            );
            return Err(LoadError::Status {
                code: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        log::trace!("roster payload is {} bytes", body.len());
        parse_roster(&body)
    }
}

/// In-memory source, used by demos and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    records: Vec<ProfileRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<ProfileRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RosterSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<ProfileRecord>, LoadError> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Serves exactly one canned HTTP/1.1 response and returns its URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}/students?full=1")
    }

    fn loader_for(endpoint: String) -> HttpLoader {
        HttpLoader::new(HttpLoaderOptions {
            endpoint,
            timeout: Some(Duration::from_secs(5)),
            ..HttpLoaderOptions::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn http_loader_decodes_records() {
        let url = serve_once(
            "200 OK",
            r#"[{"name":{"first":"Ann","last":"Lee"}},{"name":{"first":"Bob","last":"Ray"}}]"#,
        )
        .await;
        let records = loader_for(url).fetch().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].display_name(), "Bob Ray");
    }

    #[tokio::test]
    async fn http_loader_reports_status() {
        let url = serve_once("503 Service Unavailable", "").await;
        let err = loader_for(url).fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::Status { code: 503 }));
        assert_eq!(err.to_string(), "HTTP 503: Failed to fetch student data");
    }

    #[tokio::test]
    async fn http_loader_reports_bad_json() {
        let url = serve_once("200 OK", r#"{"not":"an array"}"#).await;
        let err = loader_for(url).fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
    }

    #[test]
    fn parse_roster_accepts_empty_array() {
        assert!(parse_roster(b"[]").unwrap().is_empty());
        assert!(parse_roster(b"not json").is_err());
    }

    #[test]
    fn load_status_display() {
        assert_eq!(LoadStatus::Failed("boom".into()).to_string(), "failed: boom");
        assert!(LoadStatus::Ready.is_ready());
    }
}
