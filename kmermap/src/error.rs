use thiserror::Error;

use crate::mappability::params::MAX_ERRORS;

/// Fatal conditions of a mappability run. All of them are raised before any
/// batch is searched.
#[derive(Debug, Error)]
pub enum MappabilityError {
    #[error("{0} errors requested, at most {max} are supported", max = MAX_ERRORS)]
    UnsupportedErrors(u8),

    #[error("k-mer length must be positive")]
    InvalidLength,

    #[error("k={k} is too short for {errors} errors (need k >= errors + 2)")]
    KmerTooShort { k: usize, errors: u8 },

    #[error("overlap {overlap} too large for k={k} and {errors} errors (max {max})")]
    OverlapTooLarge { overlap: usize, k: usize, errors: u8, max: usize },

    #[error("segment '{file}': chromosome lengths sum to {expected} but the index holds {actual} characters")]
    IndexInconsistency { file: String, expected: u64, actual: u64 },

    #[error("index has no sequences")]
    EmptyDirectory,

    #[error("cannot build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
