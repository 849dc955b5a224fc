//! Support code referenced by generated messages.
//!
//! Generated code only reaches into this module through the runtime path
//! (`{rt}::runtime::...`), so everything here is part of the contract
//! between the generator and the code it emits.

mod list;
mod text;

pub use list::SealedList;
pub use text::{escape_string, parse_field_value, TextCursor, TextPrinter, TextTokenizer};

use std::hash::{Hash, Hasher};

/// Hashes one field value for a message hash code.
///
/// Generated `hash_code` implementations XOR these together, so equal
/// messages hash equally regardless of field order. The hasher is FNV-1a,
/// so a value's hash depends only on its `Hash` impl and the target's
/// endianness and pointer width, never on the compiler release.
pub fn hash_value<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = Fnv1a::default();
    value.hash(&mut hasher);
    hasher.finish()
}

/// FNV-1a, 64-bit
#[derive(Debug, Clone, Copy)]
struct Fnv1a(u64);

impl Default for Fnv1a {
    fn default() -> Self {
        Self(0xcbf2_9ce4_8422_2325)
    }
}

impl Hasher for Fnv1a {
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 ^= u64::from(*byte);
            self.0 = self.0.wrapping_mul(0x0100_0000_01b3);
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}
