mod cli;
mod infra;
mod planning;
mod routes;
mod server;

use rail_induction::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
