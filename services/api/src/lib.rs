mod cli;
mod infra;
mod routes;
mod server;

use hiring_desk::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
