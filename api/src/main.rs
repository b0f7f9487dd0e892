use std::net::SocketAddr;

use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

use enigma::application::use_cases::auth::seed_admin::SeedAdmin;
use enigma::bootstrap::app_context::{AppContext, AppServices};
use enigma::bootstrap::config::Config;
use enigma::presentation::http::router::build_router;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
            http::Method::PATCH,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        // Production requires FRONTEND_URL (enforced in Config), so this only denies
        _ if cfg.is_production => {
            base.allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
        }
        // Development convenience
        _ => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "enigma=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        port = cfg.api_port,
        backend = ?cfg.data_backend,
        page_size = cfg.page_size,
        production = cfg.is_production,
        "Starting Enigma backend"
    );

    let services = AppServices::from_config(&cfg).await?;
    let ctx = AppContext::new(cfg.clone(), services);

    if let (Some(email), Some(password)) = (&cfg.admin_email, &cfg.admin_password) {
        let repo = ctx.user_repo();
        SeedAdmin {
            repo: repo.as_ref(),
        }
        .execute(email, password)
        .await?;
    }

    let app = build_router(ctx).layer(cors_layer(&cfg));

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = ?e, "shutdown_signal_failed");
            }
            info!("shutdown_requested");
        })
        .await?;
    Ok(())
}
