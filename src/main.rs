use anyhow::{bail, Context, Result};
use axum::{serve, Router};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::{TcpListener, UnixListener};
use tokio::signal;
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{error, info, warn, Level};
use ui_server::core::config::Config;
use ui_server::core::routes::{build_router, API_PREFIX};
use ui_server::core::startup::build_state;
use ui_server::core::tracing_init::init_tracing;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("config.toml")
    };

    // Load and validate configuration
    let config = Config::from_file(&config_path).context(format!(
        "Failed to load configuration from '{}'",
        config_path.display()
    ))?;

    init_tracing(&config.logging);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.num_threads)
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(config, config_path))
}

async fn async_main(config: Config, config_path: PathBuf) -> Result<()> {
    info!(
        config_path = %config_path.display(),
        port = ?config.server.port,
        unix_socket = ?config.server.unix_socket,
        num_threads = config.server.num_threads,
        backend = ?config.database.backend,
        log_level = %config.logging.level,
        "UI account service starting"
    );

    let server_config = config.server.clone();

    // Keys and store come up before any listener is bound
    let state = Arc::new(build_state(&config).await?);

    let app = build_router(Arc::clone(&state)).layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                    .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
            )
            .layer(TimeoutLayer::new(server_config.request_timeout())),
    );

    // Every listener watches the same shutdown flag
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut servers = Vec::new();

    if let Some(port) = server_config.port {
        let addr = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&addr)
            .await
            .context(format!("Failed to bind TCP listener to {}", addr))?;

        info!(address = %addr, prefix = API_PREFIX, "TCP listener bound");

        let app = app.clone();
        let mut rx = shutdown_rx.clone();
        servers.push(tokio::spawn(async move {
            serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = rx.changed().await;
                })
                .await
                .context("TCP server error")
        }));
    }

    if let Some(unix_socket) = &server_config.unix_socket {
        let listener = bind_unix(unix_socket)?;

        info!(path = %unix_socket.display(), "Unix socket listener bound");

        servers.push(tokio::spawn(serve_unix(listener, app, shutdown_rx.clone())));
    }

    if servers.is_empty() {
        error!("No listeners configured");
        bail!("No listeners configured");
    }

    info!("HTTP server(s) started, waiting for shutdown signal");

    shutdown_signal().await;
    let _ = shutdown_tx.send(true);

    let drain = async {
        for server in servers {
            match server.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!(error = %e, "Server task failed"),
                Err(e) => error!(error = %e, "Server task panicked"),
            }
        }
    };

    if tokio::time::timeout(server_config.graceful_timeout(), drain)
        .await
        .is_err()
    {
        warn!(
            graceful_timeout_seconds = server_config.graceful_timeout,
            "Graceful shutdown timed out, dropping in-flight requests"
        );
    }

    info!("Shutting down");

    Ok(())
}

fn bind_unix(path: &Path) -> Result<UnixListener> {
    // Remove a stale socket file left by a previous run
    if path.exists() {
        std::fs::remove_file(path)
            .context(format!("Failed to remove existing Unix socket: {}", path.display()))?;
    }

    UnixListener::bind(path)
        .context(format!("Failed to bind Unix socket listener to {}", path.display()))
}

async fn serve_unix(
    listener: UnixListener,
    app: Router,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    use tower::Service;

    let mut make_service = app.into_make_service();

    loop {
        let socket = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((socket, _)) => socket,
                Err(e) => {
                    error!(error = %e, "Failed to accept Unix socket connection");
                    continue;
                }
            },
            _ = shutdown.changed() => break,
        };

        let tower_service = match make_service.call(&socket).await {
            Ok(svc) => svc,
            Err(infallible) => match infallible {},
        };

        tokio::spawn(async move {
            let socket = hyper_util::rt::TokioIo::new(socket);

            let hyper_service =
                hyper::service::service_fn(move |request: hyper::Request<hyper::body::Incoming>| {
                    tower_service.clone().call(request)
                });

            if let Err(err) =
                hyper_util::server::conn::auto::Builder::new(hyper_util::rt::TokioExecutor::new())
                    .serve_connection_with_upgrades(socket, hyper_service)
                    .await
            {
                error!(error = %err, "Error serving Unix socket connection");
            }
        });
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Shutdown signal received, starting graceful shutdown");
}

