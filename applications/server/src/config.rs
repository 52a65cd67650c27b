/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_uploads")]
    pub uploads: UploadSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadSettings {
    /// Where uploaded audio is written and served from
    #[serde(default = "default_upload_directory")]
    pub directory: PathBuf,

    /// Leading segment of stored file references and of the static route
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("config.toml"))
    }

    /// Load configuration from `path` (if present) and environment.
    ///
    /// Environment variables use the `TUNEBOX_` prefix and a double
    /// underscore between section and key, e.g. `TUNEBOX_AUTH__JWT_SECRET`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = config::Config::builder();

        if path.exists() {
            settings = settings.add_source(config::File::from(path.to_path_buf()));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("TUNEBOX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set TUNEBOX_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if self.uploads.max_upload_bytes == 0 {
            return Err(ServerError::Config(
                "uploads.max_upload_bytes must be greater than zero".to_string(),
            ));
        }

        let prefix = self.uploads.url_prefix.trim_matches('/');
        if prefix.is_empty() || prefix.contains('/') {
            return Err(ServerError::Config(format!(
                "uploads.url_prefix must be a single path segment, got {:?}",
                self.uploads.url_prefix
            )));
        }

        Ok(())
    }
}

impl UploadSettings {
    /// Prefix without surrounding slashes
    pub fn prefix(&self) -> &str {
        self.url_prefix.trim_matches('/')
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3003
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/tunebox.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    24
}

fn default_uploads() -> UploadSettings {
    UploadSettings {
        directory: default_upload_directory(),
        url_prefix: default_url_prefix(),
        max_upload_bytes: default_max_upload_bytes(),
    }
}

fn default_upload_directory() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_url_prefix() -> String {
    "uploads".to_string()
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            uploads: default_uploads(),
        }
    }
}
