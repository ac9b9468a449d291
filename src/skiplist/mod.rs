//! Probabilistic linked hierarchy of sorted subsequences.

mod config;
mod list;
mod node;

pub use self::config::SkipListConfig;
pub use self::list::{IntoIter, Iter, SkipList};

use std::error;
use std::fmt;
use std::result;

/// Errors raised while configuring a `SkipList`.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The promotion probability was not strictly between 0 and 1.
    InvalidProbability(f64),
    /// The maximum tower height was zero.
    InvalidMaxHeight(usize),
    /// The random number generator seed was all zeros.
    InvalidSeed,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidProbability(probability) => write!(
                f,
                "promotion probability must be in the open interval (0, 1), got {}",
                probability,
            ),
            Error::InvalidMaxHeight(max_height) => {
                write!(f, "maximum height must be at least 1, got {}", max_height)
            },
            Error::InvalidSeed => write!(f, "seed must contain at least one non-zero word"),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
