use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use topgender::{
    cli, config, error, logging,
    types::{GenderFilter, TimeRange},
    utils, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightMagenta.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in with Spotify and open the dashboard
    Login,

    /// Open the dashboard for an existing session
    Dashboard(DashboardOptions),

    /// Print the breakdown for one time range and exit
    Show(ShowOptions),

    /// Check that the analysis service is reachable
    Status,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct DashboardOptions {
    /// Session token handed out by the analysis service
    #[clap(long)]
    pub session_id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowOptions {
    /// Session token handed out by the analysis service
    #[clap(long)]
    pub session_id: String,

    /// Time range: short_term (4 weeks), medium_term (6 months), long_term (1 year)
    #[clap(long, default_value = "short_term", value_parser = utils::parse_time_range)]
    pub range: TimeRange,

    /// Only list artists of one gender: all, male, female, unknown
    #[clap(long, default_value = "all", value_parser = utils::parse_gender_filter)]
    pub filter: GenderFilter,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    if let Err(e) = logging::init_logging() {
        warning!("Logging disabled: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Login => cli::login().await,
        Command::Dashboard(opt) => cli::dashboard(opt.session_id).await,
        Command::Show(opt) => cli::show(opt.session_id, opt.range, opt.filter).await,
        Command::Status => cli::status().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
