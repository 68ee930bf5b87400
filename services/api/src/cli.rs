use crate::demo::{run_analyze, run_demo, AnalyzeArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use vehicle_check::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Vehicle History Checker",
    about = "Analyse UK vehicle MOT history, emission-zone compliance, and road tax from the command line",
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
    /// Analyse vehicle and MOT history payloads from JSON files
    Analyze(AnalyzeArgs),
    /// Run the analysis pipeline against a bundled sample vehicle
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
        Command::Analyze(args) => run_analyze(args),
        Command::Demo(args) => run_demo(args),
    }
}
