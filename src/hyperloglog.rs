use tracing::{debug, trace};

use crate::common::*;
use crate::hash::{hash, HashValue};
use crate::HyperLogLog;
use crate::HyperLogLogError;

/// Implements the HyperLogLog algorithm for cardinality estimation over
/// byte strings.
///
/// This implementation is based on the original paper of P. Flajolet et al:
///
/// *HyperLogLog: the analysis of a near-optimal cardinality estimation
/// algorithm.*
///
/// - Hashes elements with [`hash`](crate::hash()), a fixed-seed 64-bit
///   MurmurHash3, so estimates are reproducible across runs and platforms.
/// - Uses the top `precision` bits of a hash as the register index and one
///   8-bit register per index.
/// - Applies the small range (linear counting) correction, but no large
///   range correction.
///
/// A `Sketch` expects a single writer. Callers ingesting from several
/// threads should keep one sketch per thread or serialize the inserts.
///
/// # Examples
///
/// ```
/// use hllsketch::{HyperLogLog, Sketch};
///
/// let mut hll = Sketch::new(14).unwrap();
///
/// hll.insert("12345");
/// hll.insert("23456");
/// hll.insert("12345");
///
/// assert_eq!(hll.count().round() as u32, 2);
/// ```
///
/// # References
///
/// - ["HyperLogLog: the analysis of a near-optimal cardinality estimation
///   algorithm", Philippe Flajolet, Éric Fusy, Olivier Gandouet and Frédéric
///   Meunier.](http://algo.inria.fr/flajolet/Publications/FlFuGaMe07.pdf)
///
#[derive(Clone, Debug)]
pub struct Sketch {
    count:     usize,
    precision: u8,
    registers: Registers,
}

impl Sketch {
    // Minimum precision allowed.
    const MIN_PRECISION: u8 = 1;
    // Maximum precision allowed, one less than the hash width.
    const MAX_PRECISION: u8 = HashValue::BITS as u8 - 1;

    /// Creates a new Sketch instance with `2^precision` registers.
    ///
    /// Fails with [`HyperLogLogError::InvalidPrecision`] unless
    /// `1 <= precision < 64`, and with [`HyperLogLogError::AllocationFailed`]
    /// if the registers cannot be allocated.
    pub fn new(precision: u8) -> Result<Self, HyperLogLogError> {
        // Ensure the specified precision is within bounds.
        if precision < Self::MIN_PRECISION || precision > Self::MAX_PRECISION {
            debug!(precision, "rejected sketch precision");
            return Err(HyperLogLogError::InvalidPrecision);
        }

        // Calculate register count based on given precision.
        let count = <Self as HyperLogLogCommon>::register_count(precision)
            .ok_or_else(|| {
                debug!(precision, "register count overflows usize");
                HyperLogLogError::AllocationFailed
            })?;

        let mut buf = Vec::new();
        if let Err(err) = buf.try_reserve_exact(count) {
            debug!(precision, count, %err, "failed to allocate registers");
            return Err(HyperLogLogError::AllocationFailed);
        }
        buf.resize(count, 0);

        Ok(Sketch {
            count:     count,
            precision: precision,
            registers: Registers::from_zeroed(buf),
        })
    }

    /// Adds an element that may be absent.
    ///
    /// `None` is dropped like an empty element.
    pub fn insert_opt(&mut self, value: Option<&[u8]>) {
        match value {
            Some(value) => self.insert(value),
            None => trace!("dropped absent element"),
        }
    }

    /// Adds an already hashed element.
    ///
    /// The top `precision` bits of `hash` select the register, the rank is
    /// one plus the leading zeros of the remaining bits.
    pub fn insert_hash(&mut self, hash: HashValue) {
        // Calculate the register's index.
        let index = u64::extract(hash, 64, 64 - self.precision) as usize;

        // Shift left the bits of the index.
        let remainder = hash << self.precision;

        // Count leading zeros, capped at the remainder's width.
        let rank = if remainder == 0 {
            HashValue::BITS as u8 - self.precision + 1
        } else {
            remainder.leading_zeros() as u8 + 1
        };

        // Update the register with the max leading zeros counts.
        self.registers.set_greater(index, rank);
    }

    /// Returns the precision of the Sketch instance.
    #[inline]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Returns the number of registers, `2^precision`.
    #[inline]
    pub fn register_count(&self) -> usize {
        self.count
    }

    /// Returns the number of registers still set to zero.
    #[inline]
    pub fn zeros(&self) -> usize {
        self.registers.zeros()
    }

    /// Returns an iterator to the registers' values.
    #[inline]
    pub fn registers(&self) -> impl Iterator<Item = u8> + '_ {
        self.registers.iter()
    }
}

impl HyperLogLogCommon for Sketch {}

impl HyperLogLog for Sketch {
    /// Adds a new element to the multiset.
    ///
    /// Empty elements cannot be hashed and are dropped.
    fn insert<V>(&mut self, value: &V)
    where
        V: AsRef<[u8]> + ?Sized,
    {
        match hash(value.as_ref()) {
            Some(hash) => self.insert_hash(hash),
            None => trace!("dropped empty element"),
        }
    }

    /// Estimates the cardinality of the multiset.
    fn count(&self) -> f64 {
        // Calculate the raw estimate.
        let (raw, zeros) =
            Self::estimate_raw(self.registers.iter(), self.count);

        if raw <= 2.5 * self.count as f64 && zeros != 0 {
            // Apply small range correction.
            return Self::linear_count(self.count, zeros);
        }

        raw
    }
}
