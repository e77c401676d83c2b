//! UUID-based identifiers for clips, tracks, sequences and media.
//!
//! All identifiers are RFC 4122 UUIDs stored as 16 raw bytes. The planner
//! treats them as opaque: it compares them and asks an [`IdGenerator`] for
//! fresh ones, nothing else.

use sha2::{Digest, Sha256};

/// A 16-byte UUID identifier.
pub type Id = [u8; 16];

/// The zero/nil UUID.
pub const NIL_ID: Id = [0u8; 16];

/// Derives a UUIDv8 from input bytes using SHA-256.
///
/// ```text
/// hash = SHA-256(input_bytes)[0:16]
/// hash[6] = (hash[6] & 0x0F) | 0x80  // version 8
/// hash[8] = (hash[8] & 0x3F) | 0x80  // RFC 4122 variant
/// ```
pub fn derived_uuid(input: &[u8]) -> Id {
    let hash = Sha256::digest(input);
    let mut id = [0u8; 16];
    id.copy_from_slice(&hash[..16]);

    // Set version 8 (bits 4-7 of byte 6)
    id[6] = (id[6] & 0x0F) | 0x80;
    // Set RFC 4122 variant (bits 6-7 of byte 8)
    id[8] = (id[8] & 0x3F) | 0x80;

    id
}

/// Formats a UUID as non-hyphenated lowercase hex.
pub fn format_id(id: &Id) -> String {
    let mut s = String::with_capacity(32);
    for byte in id {
        s.push_str(&format!("{:02x}", byte));
    }
    s
}

/// Source of fresh clip identities.
///
/// The planner calls [`IdGenerator::next_id`] exactly once per `Insert`
/// action it emits. Implementations must never hand out the same id twice.
pub trait IdGenerator {
    fn next_id(&mut self) -> Id;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &mut G {
    fn next_id(&mut self) -> Id {
        (**self).next_id()
    }
}

/// Random UUIDv4 identities.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> Id {
        uuid::Uuid::new_v4().into_bytes()
    }
}

/// Deterministic identities derived from a seed and a running counter.
///
/// ```text
/// id = derived_uuid(seed || counter_be)
/// ```
///
/// Two generators built from the same seed yield the same sequence, which
/// keeps plans reproducible in tests and replays.
#[derive(Debug, Clone)]
pub struct DerivedIds {
    seed: Vec<u8>,
    counter: u64,
}

impl DerivedIds {
    /// Creates a generator for the given seed.
    pub fn new(seed: impl AsRef<[u8]>) -> Self {
        Self {
            seed: seed.as_ref().to_vec(),
            counter: 0,
        }
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.counter
    }
}

impl IdGenerator for DerivedIds {
    fn next_id(&mut self) -> Id {
        let mut input = Vec::with_capacity(self.seed.len() + 8);
        input.extend_from_slice(&self.seed);
        input.extend_from_slice(&self.counter.to_be_bytes());
        self.counter += 1;
        derived_uuid(&input)
    }
}
