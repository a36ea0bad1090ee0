//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input error
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] puzzle_solver::RegistrationError),

    /// Executor error
    #[error("{0}")]
    Executor(#[from] ExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),
}

/// Errors reading puzzle inputs
#[derive(Error, Debug)]
pub enum InputError {
    /// An input file exists but could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Standard input could not be read
    #[error("Failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),
}
