//! Errors raised at the I/O boundary. The controllers themselves never fail.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// User input named no known controller mode
    #[error("invalid controller mode {0:?}, expected one of P / PI / PID")]
    InvalidMode(String),

    /// Reading user input or writing the trajectory log failed
    #[error("I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
