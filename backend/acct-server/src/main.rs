use acct_server::{AppState, ServerError, build_router, logger};

use acct_auth::{ActionCodeSettings, FirebaseClient, FirebaseEndpoints, IdentityProvider};
use acct_config::Config;
use acct_core::PasswordHasher;
use acct_mail::{
    EmailSender, LogEmailSender, MailWorker, SmtpEmailSender, SmtpSettings, TaskQueue,
};

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path = config.log_file_path()?;
    if let Some(dir) = log_file_path.as_ref().and_then(|p| p.parent()) {
        std::fs::create_dir_all(dir).map_err(|e| ServerError::LogDirectory {
            path: dir.display().to_string(),
            source: e,
        })?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting acct-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Database
    let database_path = config.database_path()?;
    let pool = acct_db::connect(&database_path, config.database.max_connections)
        .await
        .map_err(ServerError::from)?;
    info!("Database ready: {}", database_path.display());

    // Identity provider: constructed once, startup fails without it
    let provider = create_provider(&config)?;

    // Mail queue and worker
    let sender = create_email_sender(&config)?;
    let (mail_queue, mail_receiver) = TaskQueue::channel(config.mail.queue_capacity);
    let worker = MailWorker::new(
        Arc::clone(&provider),
        sender,
        ActionCodeSettings {
            url: config.firebase.action_url.clone(),
            handle_code_in_app: config.firebase.handle_code_in_app,
        },
        &config.mail.team_name,
    );
    let worker_handle = tokio::spawn(worker.run(mail_receiver));

    // Build application state and router
    let hasher = PasswordHasher::new(config.security.bcrypt_cost);
    let app_state = AppState::new(pool.clone(), provider, mail_queue, hasher);
    let app = build_router(app_state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router held the last queue handle; the worker drains and exits
    if let Err(e) = worker_handle.await {
        warn!("Mail worker ended abnormally: {}", e);
    }
    pool.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}

fn create_provider(config: &Config) -> Result<Arc<dyn IdentityProvider>, ServerError> {
    let credentials_path: PathBuf = config.credentials_path()?;
    let web_api_key = config.firebase.web_api_key.clone().unwrap_or_default();
    let endpoints = FirebaseEndpoints::new(
        &config.firebase.identity_toolkit_url,
        &config.firebase.jwks_url,
        Duration::from_secs(config.firebase.key_refresh_secs),
    );

    let client = FirebaseClient::from_credentials_file(&credentials_path, &web_api_key, endpoints)
        .inspect_err(|e| error!("Identity provider initialization failed: {}", e))?;
    info!("Identity provider ready for project {}", client.project_id());

    Ok(Arc::new(client))
}

fn create_email_sender(config: &Config) -> Result<Arc<dyn EmailSender>, ServerError> {
    match config.mail.smtp {
        Some(ref smtp) => {
            let sender = SmtpEmailSender::new(SmtpSettings {
                host: smtp.host.clone(),
                port: smtp.port,
                username: smtp.username.clone(),
                password: smtp.password.clone(),
                from_address: config.mail.from_address.clone(),
            })?;
            info!("Mail: SMTP via {}:{}", smtp.host, smtp.port);
            Ok(Arc::new(sender))
        }
        None => {
            warn!("Mail: no SMTP configured, messages are written to the log");
            Ok(Arc::new(LogEmailSender::new()))
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => error!("Failed to listen for SIGINT: {}", e),
    }
}
