//! Main Tunebox server client.

use crate::error::{map_send_error, read_json, ClientError, Result};
use crate::library::LibraryClient;
use crate::types::{ClientConfig, HealthResponse};
use crate::upload::UploadClient;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Main client for a Tunebox server.
///
/// Holds the bearer token and hands out library and upload clients.
///
/// # Example
///
/// ```ignore
/// use tunebox_client::{ClientConfig, TuneboxClient};
///
/// let client = TuneboxClient::new(ClientConfig::with_token("http://localhost:3003", token))?;
///
/// let health = client.health().await?;
/// println!("Server {} is {}", health.version, health.status);
///
/// let songs = client.library().await?.client().list_songs().await?;
/// println!("Found {} songs", songs.len());
/// ```
#[derive(Clone)]
pub struct TuneboxClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
}

impl TuneboxClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Tunebox/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(ClientConfig {
                url,
                access_token: config.access_token,
            })),
        })
    }

    /// Get the server URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Set the bearer token (e.g., from stored credentials).
    pub async fn set_token(&self, access_token: impl Into<String>) {
        self.config.write().await.access_token = Some(access_token.into());
    }

    /// Forget the bearer token.
    pub async fn clear_token(&self) {
        self.config.write().await.access_token = None;
        info!("Token cleared");
    }

    /// Check that the server is up. Does not require a token.
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/api/health", self.url().await);
        debug!(url = %url, "Checking server health");

        let response = self.http.get(&url).send().await.map_err(map_send_error)?;
        let health: HealthResponse = read_json(response, "health response").await?;

        info!(status = %health.status, version = %health.version, "Connected to server");
        Ok(health)
    }

    /// Get a library client for song, playlist and favorite operations.
    ///
    /// Returns an error if not authenticated.
    pub async fn library(&self) -> Result<LibraryClientHandle> {
        let (url, access_token) = self.credentials().await?;
        Ok(LibraryClientHandle {
            http: self.http.clone(),
            url,
            access_token,
        })
    }

    /// Get an upload client.
    ///
    /// Returns an error if not authenticated.
    pub async fn upload(&self) -> Result<UploadClientHandle> {
        let (url, access_token) = self.credentials().await?;
        Ok(UploadClientHandle {
            http: self.http.clone(),
            url,
            access_token,
        })
    }

    async fn credentials(&self) -> Result<(String, String)> {
        let config = self.config.read().await;
        let access_token = config
            .access_token
            .clone()
            .ok_or(ClientError::AuthRequired)?;
        Ok((config.url.clone(), access_token))
    }
}

/// Handle for library operations.
pub struct LibraryClientHandle {
    http: Client,
    url: String,
    access_token: String,
}

impl LibraryClientHandle {
    /// Get the library client.
    pub fn client(&self) -> LibraryClient<'_> {
        LibraryClient::new(&self.http, &self.url, &self.access_token)
    }
}

/// Handle for upload operations.
pub struct UploadClientHandle {
    http: Client,
    url: String,
    access_token: String,
}

impl UploadClientHandle {
    /// Get the upload client.
    pub fn client(&self) -> UploadClient<'_> {
        UploadClient::new(&self.http, &self.url, &self.access_token)
    }
}
