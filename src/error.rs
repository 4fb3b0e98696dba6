use thiserror::Error;

use crate::distribution::ParameterKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A value violates the validity constraint of its distribution family.
    #[error("invalid parameter for {family}: {reason}")]
    InvalidParameter { family: &'static str, reason: String },

    /// Parameters of one kind were handed to a family expecting another.
    #[error("parameter type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        expected: ParameterKind,
        found: ParameterKind,
    },

    #[error("no column named {0:?}")]
    NotFound(String),

    #[error("sample row {index} out of range (table holds {count} samples)")]
    RowOutOfRange { index: usize, count: usize },

    /// The hardware random number source stopped producing values.
    #[error("random source failure: {0}")]
    RandomSource(String),

    #[error("failed to start sampling workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(family: &'static str, reason: impl ToString) -> Self {
        Self::InvalidParameter {
            family,
            reason: reason.to_string(),
        }
    }
}
