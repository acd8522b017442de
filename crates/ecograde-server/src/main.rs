mod api;
mod auth;
mod middleware;
mod scheduler;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ecograde_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = ecograde_db::PoolConfig::from_app_config(&config);
    let pool = ecograde_db::connect_pool(&config.database_url, pool_config).await?;
    ecograde_db::run_migrations(&pool).await?;

    let _scheduler = scheduler::build_scheduler(pool.clone()).await?;

    let foodfacts = ecograde_foodfacts::FoodFactsClient::with_base_url(
        config.foodfacts_request_timeout_secs,
        &config.foodfacts_user_agent,
        &config.foodfacts_base_url,
    )?;

    let app = build_app(
        AppState {
            pool,
            foodfacts,
            session_ttl_hours: config.session_ttl_hours,
        },
        default_rate_limit_state(),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "ecograde-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
