//! Crate error type.

use std::path::PathBuf;

use thiserror::Error as ThisError;

use crate::models::Violation;

/// Errors surfaced by instance loading and by the solver.
///
/// Infeasible insertions are not errors: the search treats them as a
/// plain "reject this candidate" signal.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("invalid instance: {0}")]
    InvalidInstance(String),
    #[error("customer {customer} cannot be served by any vehicle: {reason}")]
    UnservableCustomer { customer: usize, reason: String },
    #[error("invariant violated after {context}: {violations:?}")]
    InvariantViolation {
        context: String,
        violations: Vec<Violation>,
    },
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_instance(message: impl Into<String>) -> Self {
        Self::InvalidInstance(message.into())
    }

    pub fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub fn invariant(context: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self::InvariantViolation {
            context: context.into(),
            violations,
        }
    }
}
