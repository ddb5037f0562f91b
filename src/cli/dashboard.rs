use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    cli::spinner,
    collaborator::{ArtistSource, HttpCollaborator},
    management::{LoadOptions, LoadOrchestrator, LoadOutcome, Phase},
    session::Session,
    success,
    types::{GenderFilter, TimeRange},
    view, warning,
};

const HELP: &str = "Commands:
  1 | 2 | 3 | <range>   switch time range (short_term, medium_term, long_term)
  f <filter>            filter artists: all, male, female, unknown
  r                     redraw
  l                     log out
  q                     quit
  h                     this help";

/// One line typed at the dashboard prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Select(TimeRange),
    Filter(GenderFilter),
    Redraw,
    Logout,
    Quit,
    Help,
}

pub fn parse_action(line: &str) -> Result<Action, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head.to_ascii_lowercase().as_str() {
        "" | "r" | "redraw" => Ok(Action::Redraw),
        "q" | "quit" | "exit" => Ok(Action::Quit),
        "l" | "logout" => Ok(Action::Logout),
        "h" | "help" | "?" => Ok(Action::Help),
        "f" | "filter" => {
            if rest.is_empty() {
                return Err("filter needs a value: all, male, female or unknown".to_string());
            }
            rest.parse::<GenderFilter>().map(Action::Filter)
        }
        _ => line
            .parse::<TimeRange>()
            .map(Action::Select)
            .map_err(|_| format!("unknown command '{}', type h for help", line)),
    }
}

/// Interactive dashboard for an existing session token.
pub async fn dashboard(session_id: String) {
    let orchestrator =
        LoadOrchestrator::new(HttpCollaborator::from_env(), LoadOptions::from_env());
    run(orchestrator, Session::new(session_id)).await;
}

/// Starts `session` and runs the prompt loop until the user quits or logs
/// out.
pub(crate) async fn run<S>(orchestrator: LoadOrchestrator<S>, session: Session)
where
    S: ArtistSource + 'static,
{
    let initial = orchestrator.options().initial_range;
    let pb = spinner(view::loading(initial));
    // The prefetch task keeps running on its own; nothing waits for it here.
    let _ = orchestrator.start_session(session).await;
    pb.finish_and_clear();

    let mut filter = GenderFilter::All;
    if !draw(&orchestrator, filter).await {
        return;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        println!("(1/2/3 range, f <filter>, l logout, q quit, h help)");
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warning!("Cannot read input: {}", e);
                break;
            }
        };

        let action = match parse_action(&line) {
            Ok(action) => action,
            Err(e) => {
                warning!("{}", e);
                continue;
            }
        };

        match action {
            Action::Select(range) => {
                select(&orchestrator, range).await;
                if !draw(&orchestrator, filter).await {
                    return;
                }
            }
            Action::Filter(f) => {
                filter = f;
                draw(&orchestrator, filter).await;
            }
            Action::Redraw => {
                draw(&orchestrator, filter).await;
            }
            Action::Logout => {
                orchestrator.logout().await;
                success!("Logged out.");
                draw(&orchestrator, GenderFilter::All).await;
                return;
            }
            Action::Quit => return,
            Action::Help => println!("{}", HELP),
        }
    }
}

async fn select<S>(orchestrator: &LoadOrchestrator<S>, range: TimeRange)
where
    S: ArtistSource + 'static,
{
    if orchestrator.is_cached(range).await {
        orchestrator.select_range(range).await;
        return;
    }

    let pb = spinner(view::loading(range));
    let outcome = orchestrator.select_range(range).await;
    pb.finish_and_clear();

    if let LoadOutcome::Failed(e) = outcome {
        tracing::debug!(error = %e, "range selection failed");
    }
}

/// Prints the current state. Returns false once the session is gone.
async fn draw<S>(orchestrator: &LoadOrchestrator<S>, filter: GenderFilter) -> bool
where
    S: ArtistSource + 'static,
{
    let snapshot = orchestrator.snapshot().await;
    println!("{}", view::snapshot(&snapshot, filter));
    !matches!(snapshot.phase, Phase::LoggedOut { .. })
}
