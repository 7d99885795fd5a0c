// error.rs - Error types for the visualizer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The engine failed while stepping or toggling; the animation loop stops.
    #[error("engine failure: {0}")]
    Engine(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The engine could not be set up.
    #[error("engine setup failed: {0}")]
    Setup(#[from] conway::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("ui failed: {0}")]
    Ui(String),
}

impl Error {
    pub fn engine(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Engine(Box::new(err))
    }
}
