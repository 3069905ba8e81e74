use thiserror::Error;

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::persistence::PersistenceError;

/// Any failure the app reports from file operations
#[derive(Debug, Error)]
pub enum MapError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type MapResult<T> = Result<T, MapError>;
