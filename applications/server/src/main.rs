/// Numis Server - backend for the numismatic admin panel
use axum::Router;
use clap::{Parser, Subcommand};
use numis_server::{
    api,
    config::ServerConfig,
    services::{AuthService, ImageStorage},
    state::AppState,
};
use numis_storage::{users, LocalRecordStore};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "numis-server")]
#[command(about = "Numis admin backend: auth, coin records and images", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "NUMIS_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create an administrator, or reset the password of an existing one
    AddUser {
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long, env = "NUMIS_NEW_USER_PASSWORD")]
        password: String,
    },
    /// List all administrators
    ListUsers,
    /// Print the default configuration as TOML
    DefaultConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "numis_server=info,numis_storage=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => serve(&cli.config).await?,
        Commands::AddUser { email, password } => add_user(&cli.config, &email, &password).await?,
        Commands::ListUsers => list_users(&cli.config).await?,
        Commands::DefaultConfig => print!("{}", ServerConfig::default().to_toml()?),
    }

    Ok(())
}

async fn serve(config_path: &std::path::Path) -> anyhow::Result<()> {
    let config = ServerConfig::load_from(config_path)?;
    config.validate()?;

    tracing::info!("Starting Numis Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let pool = numis_storage::create_pool(&config.storage.database_url).await?;
    numis_storage::run_migrations(&pool).await?;
    let records = Arc::new(LocalRecordStore::new(pool));
    tracing::info!("Database connected");

    let image_storage = ImageStorage::new(
        config.storage.image_storage_path.clone(),
        config.server.public_url.clone(),
    );
    image_storage.initialize().await?;
    let image_storage = Arc::new(image_storage);
    tracing::info!(
        "Image storage at {}",
        config.storage.image_storage_path.display()
    );

    let auth_service = Arc::new(auth_service(&config));

    let app_state = AppState::new(
        records,
        auth_service,
        image_storage,
        config.storage.max_upload_bytes,
    );

    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(app_state: AppState) -> Router {
    api::router(app_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
}

fn auth_service(config: &ServerConfig) -> AuthService {
    AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    )
}

async fn add_user(config_path: &std::path::Path, email: &str, password: &str) -> anyhow::Result<()> {
    let config = ServerConfig::load_from(config_path)?;
    let pool = numis_storage::create_pool(&config.storage.database_url).await?;
    numis_storage::run_migrations(&pool).await?;

    if password.len() < 8 {
        anyhow::bail!("Password must be at least 8 characters");
    }

    let user = match users::find_by_email(&pool, email).await? {
        Some(existing) => {
            tracing::info!("Resetting password for {}", existing.email);
            existing
        }
        None => users::create(&pool, email).await?,
    };

    let password_hash = auth_service(&config).hash_password(password)?;
    users::set_password_hash(&pool, &user.id, &password_hash).await?;

    println!("User ready: {} ({})", user.email, user.id);
    Ok(())
}

async fn list_users(config_path: &std::path::Path) -> anyhow::Result<()> {
    let config = ServerConfig::load_from(config_path)?;
    let pool = numis_storage::create_pool(&config.storage.database_url).await?;
    numis_storage::run_migrations(&pool).await?;

    let users = users::get_all(&pool).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {}", user.id, user.email);
    }

    Ok(())
}
