//! An implementation of the HyperLogLog algorithm for cardinality estimation
//! over streams of byte strings.
//!
//! HyperLogLog is an probabilistic algorithm for estimating the number of
//! *distinct* elements (*cardinality*) of a multiset. The original algorithm,
//! described by P. Flajolet et al. in *HyperLogLog: the analysis of a
//! near-optimal cardinality estimation algorithm*, can estimate cardinalities
//! well beyond 10<sup>9</sup> with a typical accuracy of 2% while using memory
//! of 1.5 kilobytes.
//!
//! Elements are arbitrary byte buffers. They are hashed with [`hash`], a
//! MurmurHash3 with a fixed seed, so the same stream always yields the same
//! estimate. Empty elements cannot be hashed and are dropped.
//!
//! ```
//! use hllsketch::{HyperLogLog, Sketch};
//!
//! let mut hll = Sketch::new(7).unwrap();
//!
//! for i in 0u32..100 {
//!     hll.insert(&i.to_le_bytes());
//! }
//!
//! assert!((hll.count() - 100.0).abs() < 40.0);
//! ```

#![cfg_attr(feature = "bench-units", feature(test))]

use std::error;
use std::fmt;

mod common;
mod hash;
mod hyperloglog;

pub use crate::hash::{hash, HashValue, SEED};
pub use crate::hyperloglog::Sketch;

/// A trait that should be implemented by any HyperLogLog variant.
pub trait HyperLogLog {
    /// Adds a new element to the multiset.
    fn insert<V>(&mut self, value: &V)
    where
        V: AsRef<[u8]> + ?Sized;
    /// Estimates the cardinality of the multiset.
    fn count(&self) -> f64;
}

#[derive(Debug, PartialEq)]
pub enum HyperLogLogError {
    InvalidPrecision,
    AllocationFailed,
}

impl fmt::Display for HyperLogLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HyperLogLogError::InvalidPrecision => {
                "precision is out of bounds.".fmt(f)
            },
            HyperLogLogError::AllocationFailed => {
                "registers could not be allocated.".fmt(f)
            },
        }
    }
}

impl error::Error for HyperLogLogError {}
