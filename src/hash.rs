use std::io::Cursor;

use murmur3::murmur3_x86_128;

/// The output of hashing a single element.
pub type HashValue = u64;

/// Seed of the underlying MurmurHash3 function.
///
/// Fixed so that the same element hashes to the same value across runs and
/// platforms.
pub const SEED: u32 = 42;

/// Hashes `value` into a [`HashValue`].
///
/// Computes the 128-bit MurmurHash3 (x86 variant) of `value` using [`SEED`]
/// and keeps its low 64 bits. Returns `None` when `value` is empty, since
/// there is nothing to count.
///
/// # Examples
///
/// ```
/// use hllsketch::hash;
///
/// assert!(hash(b"hello world").is_some());
/// assert_eq!(hash(b"hello world"), hash(b"hello world"));
/// assert_eq!(hash(b""), None);
/// ```
pub fn hash(value: &[u8]) -> Option<HashValue> {
    if value.is_empty() {
        return None;
    }

    // Reading from an in-memory cursor does not fail.
    let wide = murmur3_x86_128(&mut Cursor::new(value), SEED).ok()?;

    // Drops the higher 64 bits.
    Some(wide as HashValue)
}
