// error.rs - Errors raised by the simulation engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A row task panicked or was cancelled before it reported back.
    #[error("row task failed: {0}")]
    RowTask(#[from] tokio::task::JoinError),

    /// The row-task runtime could not be started.
    #[error("could not start row-task runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}
