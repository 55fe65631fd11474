//! The string hash used to pick an array hash table slot.
//!
//! The algorithm itself is an implementation detail — any reasonably
//! uniform, deterministic 32-bit string hash would do here. We reuse
//! [`siphasher`], the same crate the trie-indexing code this module is
//! descended from uses for its leaf hashes, seeded once per process
//! rather than per call.

use siphasher::sip::SipHasher13;
use std::hash::Hasher;
use std::sync::OnceLock;

/// Process-wide SipHash key, generated once on first use.
///
/// The teacher's equivalent (`patch::SIP_KEY`) is a `static mut` guarded
/// by `std::sync::Once`; `OnceLock` gives the same "initialize exactly
/// once, read freely afterwards" behavior without unsafe interior
/// mutability.
fn sip_keys() -> (u64, u64) {
    static KEYS: OnceLock<(u64, u64)> = OnceLock::new();
    *KEYS.get_or_init(|| {
        // A fixed-but-arbitrary seed keeps hashing deterministic within
        // a process without requiring callers to pull in a CSPRNG; the
        // hash is never used for anything security sensitive.
        (0x9E3779B97F4A7C15, 0xC2B2AE3D27D4EB4F)
    })
}

/// Hash an arbitrary byte string down to a 32-bit digest suitable for
/// indexing into an array hash table's slot array.
///
/// Truncating a 64-bit SipHash output rather than using a native 32-bit
/// hash keeps the implementation small while still giving a reasonably
/// uniform distribution for the slot counts this structure ever reaches.
pub fn hash_bytes(bytes: &[u8]) -> u32 {
    let (k0, k1) = sip_keys();
    let mut hasher = SipHasher13::new_with_keys(k0, k1);
    hasher.write(bytes);
    hasher.finish() as u32
}
