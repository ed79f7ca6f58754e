/// Adboard Server - Digital out-of-home playlist backend
use adboard_server::{
    api,
    config::ServerConfig,
    hub::NotificationHub,
    middleware,
    services::{AuthService, MediaStorage},
    state::AppState,
};
use adboard_storage::Database;
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "adboard-server")]
#[command(about = "Adboard digital out-of-home playlist server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Email address (used as the login)
        #[arg(short, long)]
        email: String,
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adboard_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            serve().await?;
        }
        Commands::AddUser {
            email,
            name,
            password,
        } => {
            add_user(&email, &name, &password).await?;
        }
        Commands::ListUsers => {
            list_users().await?;
        }
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Adboard Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let db = Database::new(&config.storage.database_url).await?;
    let db = Arc::new(db);
    tracing::info!("Database connected");

    // Initialize media storage
    let media_storage = MediaStorage::new(config.storage.media_storage_path.clone());
    media_storage.initialize().await?;
    let media_storage = Arc::new(media_storage);
    tracing::info!("Media storage initialized");

    // Initialize auth service
    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    );
    let auth_service = Arc::new(auth_service);
    tracing::info!("Auth service initialized");

    // Initialize notification hub
    let hub = Arc::new(NotificationHub::new());

    // Build application state
    let app_state = AppState::new(
        db,
        Arc::clone(&auth_service),
        Arc::clone(&media_storage),
        hub,
    );

    // Build router
    let app = create_router(app_state, auth_service, &media_storage);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn create_router(
    app_state: AppState,
    auth_service: Arc<AuthService>,
    media_storage: &MediaStorage,
) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/refresh", post(api::auth::refresh))
        .route("/realtime/ws", get(api::realtime::websocket_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Ads
        .route("/ads", get(api::ads::list_ads))
        .route("/ads", post(api::ads::create_ad))
        .route("/ads/:id", get(api::ads::get_ad))
        .route("/ads/:id", patch(api::ads::update_ad))
        .route("/ads/:id", delete(api::ads::delete_ad))
        // Displays
        .route("/displays", get(api::displays::list_displays))
        .route("/displays", post(api::displays::create_display))
        .route("/displays/mine", get(api::displays::list_my_displays))
        .route("/displays/:id", get(api::displays::get_display))
        .route("/displays/:id", put(api::displays::update_display))
        .route("/displays/:id", delete(api::displays::delete_display))
        // Playlists
        .route("/displays/:id/ads", get(api::playlist::list_linked_ads))
        .route("/displays/:id/ads/order", patch(api::playlist::reorder))
        .route("/displays/:id/ads/order", put(api::playlist::reorder))
        .route("/displays/:id/ads/:ad_id", post(api::playlist::link_ad))
        .route("/displays/:id/ads/:ad_id", delete(api::playlist::unlink_ad))
        .route(
            "/displays/:id/ads/:ad_id/override",
            patch(api::playlist::set_override),
        )
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&auth_service),
            middleware::auth_middleware,
        ));

    // Combine routes; uploaded media is served statically
    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .nest_service("/uploads", ServeDir::new(media_storage.base_path()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn add_user(email: &str, name: &str, password: &str) -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    config.validate()?;
    let db = Database::new(&config.storage.database_url).await?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    );

    let password_hash = auth_service.hash_password(password)?;
    let user = adboard_storage::users::create(db.pool(), email, name, &password_hash).await?;

    println!("Created user {} ({})", user.name, user.id);

    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let db = Database::new(&config.storage.database_url).await?;

    let users = adboard_storage::users::get_all(db.pool()).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {}", user.id, user.name);
    }

    Ok(())
}
