mod cli;
mod demo;
mod infra;

use lc_stp::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
