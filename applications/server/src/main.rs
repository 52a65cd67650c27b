/// Tunebox Server - music library server
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tunebox_core::UserId;
use tunebox_library::LibraryService;
use tunebox_server::{
    config::ServerConfig, create_router, services::AuthService, state::AppState, FileStorage,
};

#[derive(Parser)]
#[command(name = "tunebox-server")]
#[command(about = "Tunebox music library server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml)
    #[arg(short, long, global = true, env = "TUNEBOX_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print an access token for a user id (development helper)
    IssueToken {
        /// User id to put in the token subject
        #[arg(short, long)]
        user: String,
    },
    /// Remove every song, playlist and favorite record
    ResetDb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tunebox_server=info,tunebox_library=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::IssueToken { user } => issue_token(&config, &user)?,
        Commands::ResetDb => reset_db(&config).await?,
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<ServerConfig> {
    let config = match path {
        Some(path) => {
            anyhow::ensure!(path.exists(), "config file {} not found", path.display());
            ServerConfig::load_from(path)?
        }
        None => ServerConfig::load()?,
    };
    config.validate()?;
    Ok(config)
}

async fn open_library(config: &ServerConfig) -> anyhow::Result<LibraryService> {
    ensure_database_dir(&config.storage.database_url).await?;
    let store = tunebox_storage::connect(&config.storage.database_url).await?;
    tracing::info!("Database connected");

    let file_storage = FileStorage::new(
        config.uploads.directory.clone(),
        config.uploads.prefix().to_string(),
    );
    file_storage.initialize().await?;
    tracing::info!(dir = %config.uploads.directory.display(), "File storage initialized");

    Ok(LibraryService::new(Arc::new(store), Arc::new(file_storage)))
}

/// Create the parent directory of a file-backed SQLite database
async fn ensure_database_dir(database_url: &str) -> anyhow::Result<()> {
    if database_url.contains(":memory:") {
        return Ok(());
    }

    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = path.split('?').next().unwrap_or(path);

    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Tunebox Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let library = open_library(&config).await?;

    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
    ));
    tracing::info!("Auth service initialized");

    let app_state = AppState::new(library, auth_service);
    let app = create_router(app_state, &config.uploads);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

fn issue_token(config: &ServerConfig, user: &str) -> anyhow::Result<()> {
    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
    );
    let token = auth_service.create_access_token(&UserId::new(user.trim()))?;

    println!("{}", token);
    Ok(())
}

async fn reset_db(config: &ServerConfig) -> anyhow::Result<()> {
    let library = open_library(config).await?;
    library.reset().await?;

    tracing::info!("All library records removed");
    Ok(())
}
