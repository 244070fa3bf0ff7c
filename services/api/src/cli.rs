use crate::planning::{run_plan, run_simulation, PlanArgs, SimulateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rail_induction::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Rail Induction Planner",
    about = "Plan nightly train induction and run what-if scenarios from the command line",
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
    /// Evaluate every train in a fleet snapshot and print the induction plan
    Plan(PlanArgs),
    /// Re-plan the fleet with forced statuses or removed trains
    Simulate(SimulateArgs),
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
        Command::Plan(args) => run_plan(args),
        Command::Simulate(args) => run_simulation(args),
    }
}
