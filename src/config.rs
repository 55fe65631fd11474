//! Tunables shared by the array hash table and the burst-trie layer.
//!
//! Centralizing these as named constants (rather than scattering literals
//! through the implementation) makes the trade-offs they encode easy to
//! find and easy to change together.

/// Bucket record count above which a bucket becomes eligible for bursting
/// the next time an insert reaches it. Higher values mean deeper buckets,
/// fewer trie levels, slower linear scans but lower per-key memory
/// overhead.
pub const MAX_BUCKET_SIZE: usize = 8192;

/// Average number of records per slot the array hash table tolerates
/// before it doubles its slot count. Kept relatively high because each
/// slot is a single contiguous, cache-coherent buffer and scanning it is
/// cheap compared to a cache miss on a fresh allocation.
pub const AHT_LOAD_FACTOR: f64 = 10.0;

/// Initial number of slots a freshly created array hash table allocates.
pub const AHT_INITIAL_SLOTS: usize = 8;

/// Largest key length representable by the slot record encoding: the
/// high bit of the two-byte length prefix is reserved as the long-form
/// marker, leaving 15 bits for the length itself.
pub const MAX_KEY_LEN: usize = 0x7FFF;
