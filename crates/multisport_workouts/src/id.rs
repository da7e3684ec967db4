//! Default identifiers for segment items.

use rand::{RngExt, rng};

const ID_LEN: usize = 7;
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a short random base-36 id for a segment item.
///
/// Ids are only expected to be unique within one in-memory workout; callers
/// that persist workouts should supply their own.
pub fn generate_item_id() -> String {
    let mut rng = rng();
    (0..ID_LEN)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}
