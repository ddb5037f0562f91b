use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::{
    api::CallbackSlot,
    cli::dashboard,
    collaborator::HttpCollaborator,
    config,
    error::AppError,
    info,
    management::{LoadOptions, LoadOrchestrator},
    server,
    session::{CallbackOutcome, Session},
    view, warning,
};

const CALLBACK_POLL: Duration = Duration::from_millis(250);
// Lets the browser follow the clean-URL redirect before the listener goes away.
const CALLBACK_GRACE: Duration = Duration::from_millis(500);

/// Signs in through the analysis service and opens the dashboard.
///
/// 1. Binds the local callback listener on the configured origin
/// 2. Asks the service for the Spotify authorization URL (`/login`)
/// 3. Opens it in the browser, or prints it if no browser can be started
/// 4. Waits for the service to redirect back with `session_id` or `error`
/// 5. Starts the session and hands over to the interactive dashboard
///
/// Nothing is retried automatically; on failure the login screen is shown
/// with the reason and the user can run the command again.
pub async fn login() {
    let collaborator = HttpCollaborator::from_env();
    let orchestrator = LoadOrchestrator::new(collaborator.clone(), LoadOptions::from_env());

    match authenticate(&collaborator).await {
        Ok(session) => dashboard::run(orchestrator, session).await,
        Err(e) => {
            orchestrator.report(&e).await;
            println!("{}", view::login::render(Some(&e.user_message())));
            std::process::exit(1);
        }
    }
}

async fn authenticate(collaborator: &HttpCollaborator) -> Result<Session, AppError> {
    let listener = server::bind_callback_listener()
        .await
        .map_err(AppError::Config)?;

    let slot: CallbackSlot = Arc::new(Mutex::new(None));
    let server = tokio::spawn(server::serve_callbacks(listener, Arc::clone(&slot)));

    let auth_url = match collaborator.login_url().await {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(error = %e, "login initiation failed");
            server.abort();
            return Err(AppError::LoginInitiation);
        }
    };

    info!("Opening the Spotify login in your browser...");
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let outcome = wait_for_callback(Arc::clone(&slot), config::login_timeout()).await;
    tokio::time::sleep(CALLBACK_GRACE).await;
    server.abort();

    match outcome {
        Some(CallbackOutcome::Session(session)) => Ok(session),
        Some(CallbackOutcome::AuthError(code)) => Err(AppError::AuthRedirect(code)),
        Some(CallbackOutcome::Empty) | None => Err(AppError::CallbackTimeout),
    }
}

/// Polls the callback slot until the listener fills it or `max_wait` passes.
pub(crate) async fn wait_for_callback(
    slot: CallbackSlot,
    max_wait: Duration,
) -> Option<CallbackOutcome> {
    let deadline = tokio::time::Instant::now() + max_wait;

    while tokio::time::Instant::now() < deadline {
        if let Some(outcome) = slot.lock().await.clone() {
            return Some(outcome);
        }
        tokio::time::sleep(CALLBACK_POLL).await;
    }

    None
}
