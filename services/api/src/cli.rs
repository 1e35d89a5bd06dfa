use crate::report::{run_evaluate, run_fetch, run_rules, EvaluateArgs, FetchArgs, RulesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_checklist::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "loan-checklist",
    about = "Evaluate loan applications against the underwriting checklist",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP dashboard (default command)
    Serve(ServeArgs),
    /// Evaluate an application record stored in a local JSON file
    Evaluate(EvaluateArgs),
    /// Fetch an application record from the configured source and evaluate it
    Fetch(FetchArgs),
    /// List the active checklist rules in evaluation order
    Rules(RulesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Fetch(args) => run_fetch(args).await,
        Command::Rules(args) => run_rules(args),
    }
}
