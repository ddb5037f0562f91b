use crate::{
    cli::spinner,
    collaborator::HttpCollaborator,
    error,
    management::{LoadOptions, LoadOrchestrator, Phase},
    session::Session,
    types::{GenderFilter, TimeRange},
    view,
};

/// Prints the breakdown of one time range for an existing session and
/// exits. Exits with status 1 when the range cannot be loaded.
pub async fn show(session_id: String, range: TimeRange, filter: GenderFilter) {
    let options = LoadOptions {
        initial_range: range,
        ..LoadOptions::from_env()
    };
    let orchestrator = LoadOrchestrator::new(HttpCollaborator::from_env(), options);

    let pb = spinner(view::loading(range));
    let start = orchestrator.start_session(Session::new(session_id)).await;
    pb.finish_and_clear();

    // One-shot: the other ranges are never shown.
    if let Some(prefetch) = start.prefetch {
        prefetch.abort();
    }

    let snapshot = orchestrator.snapshot().await;
    match &snapshot.phase {
        Phase::Ready(_) => println!("{}", view::snapshot(&snapshot, filter)),
        Phase::Failed { message, .. } => error!("{}", message),
        Phase::LoggedOut { notice } => error!(
            "{}",
            notice.as_deref().unwrap_or("The session is no longer valid.")
        ),
        Phase::Loading(_) => error!("The service did not return any artists."),
    }
}
