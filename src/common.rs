// A Registers struct.
//
// Contains a number of 8-bit registers, one per bucket, and keeps track of
// how many of them are still set to zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Registers {
    // A buffer containing registers.
    buf:   Vec<u8>,
    // The number of registers set to zero.
    zeros: usize,
}

impl Registers {
    // The largest value a register can hold, a rank over a 64-bit hash.
    pub const MAX_VALUE: u8 = 64;

    // Creates a new Registers struct from a zeroed buffer.
    pub fn from_zeroed(buf: Vec<u8>) -> Registers {
        debug_assert!(buf.iter().all(|&val| val == 0));

        Registers {
            zeros: buf.len(),
            buf:   buf,
        }
    }

    // Creates a new Registers struct with `count` registers.
    #[allow(dead_code)]
    pub fn with_count(count: usize) -> Registers {
        Self::from_zeroed(vec![0; count])
    }

    #[inline] // Returns an iterator that emits Register values.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.buf.iter().copied()
    }

    #[inline] // Returns the value of the Register at `index`.
    #[allow(dead_code)]
    pub fn get(&self, index: usize) -> u8 {
        self.buf[index]
    }

    #[inline] // Sets the value of the Register at `index` to `value`,
              // if `value` is greater than its current value.
    pub fn set_greater(&mut self, index: usize, value: u8) {
        debug_assert!(value <= Self::MAX_VALUE);

        let cur = self.buf[index];

        if value > cur {
            if cur == 0 {
                self.zeros -= 1;
            }

            self.buf[index] = value;
        }
    }

    #[inline]
    pub fn zeros(&self) -> usize {
        self.zeros
    }

    #[inline] // Returns the number of registers.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.buf.len()
    }
}

// A trait for sharing common HyperLogLog related functionality.
pub trait HyperLogLogCommon {
    #[inline] // Returns the "raw" HyperLogLog estimate as defined by
              // P. Flajolet et al. for a given `precision`.
              //
              // Also returns the count of registers set to 0.
    fn estimate_raw<I>(registers: I, count: usize) -> (f64, usize)
    where
        I: Iterator<Item = u8>,
    {
        let (mut raw, mut zeros) = (0.0, 0);

        for value in registers {
            raw += 2f64.powi(-i32::from(value));
            zeros += if value == 0 { 1 } else { 0 };
        }

        let m = count as f64;

        raw = Self::alpha(count) * m * m / raw;

        (raw, zeros)
    }

    #[inline] // Estimates the count of distinct elements using linear
              // counting.
    fn linear_count(count: usize, zeros: usize) -> f64 {
        count as f64 * (count as f64 / zeros as f64).ln()
    }

    #[inline] // Returns the alpha constant based on the register count.
    fn alpha(count: usize) -> f64 {
        match count {
            16 => 0.673,
            32 => 0.697,
            64 => 0.709,
            _ => 0.7213 / (1.0 + 1.079 / count as f64),
        }
    }

    #[inline] // Returns the number of registers based on precision,
              // or `None` if it does not fit in a `usize`.
    fn register_count(precision: u8) -> Option<usize> {
        1usize.checked_shl(u32::from(precision))
    }
}

// A trait for extracting a range of bits from a value.
pub trait BitExtract<T> {
    // Extracts bits nums(hi..lo], with hi exclusive using LSB 0 indexing.
    fn extract(num: T, hi: u8, lo: u8) -> T;
}

impl BitExtract<u64> for u64 {
    #[inline]
    fn extract(num: u64, hi: u8, lo: u8) -> u64 {
        (num << (64 - hi)) >> (64 - (hi - lo))
    }
}
