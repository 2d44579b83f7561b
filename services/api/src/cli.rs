use crate::commands::{
    run_assess, run_evaluate, run_positions, AssessArgs, EvaluateArgs, PositionsArgs,
};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_matcher::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Job Matcher",
    about = "Match candidate qualifications against the position catalog",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List the positions and constraints in the active catalog
    Positions(PositionsArgs),
    /// Evaluate a JSON fact mapping against every position
    Evaluate(EvaluateArgs),
    /// Validate raw candidate answers and export a match report
    Assess(AssessArgs),
    /// Walk a sample candidate through intake, evaluation and export
    Demo(DemoArgs),
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
        Command::Positions(args) => run_positions(args),
        Command::Evaluate(args) => run_evaluate(args),
        Command::Assess(args) => run_assess(args),
        Command::Demo(args) => run_demo(args),
    }
}
