//! FILENAME: session/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Render target failure: {0}")]
    Render(String),
}
