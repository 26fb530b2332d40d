use std::process::ExitCode;

use lang_portal_backend::config::Config;
use lang_portal_backend::logging::{self, LogSettings};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    let _log_guard = logging::init_tracing(&LogSettings::from_env(&config.log_level));

    let state = match lang_portal_backend::init_state(&config).await {
        Ok(state) => state,
        Err(err) => {
            tracing::error!(error = %err, path = %config.db.path.display(), "database initialization failed");
            return ExitCode::FAILURE;
        }
    };
    let pool = state.pool().clone();

    let app = lang_portal_backend::create_app(state, &config.cors_origins);

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%addr, error = %err, "bind listener failed");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        %addr,
        database = %config.db.path.display(),
        cors_origins = ?config.cors_origins,
        "lang-portal backend listening"
    );

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    if let Err(e) = server.await {
        tracing::error!(error = %e, "server error");
    }

    tracing::info!("HTTP server stopped, closing database pool");
    pool.close().await;
    tracing::info!("Graceful shutdown complete");

    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
