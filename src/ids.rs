use rand::Rng;

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const INDEX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const ELEMENT_ID_LEN: usize = 20;

/// Opaque element identifier: 20 characters drawn uniformly from the
/// 62-symbol alphanumeric alphabet.
///
/// No uniqueness check is made against existing elements; the collision
/// probability at this length is accepted as negligible.
pub fn element_id(rng: &mut impl Rng) -> String {
    random_string(rng, ID_ALPHABET, ELEMENT_ID_LEN)
}

/// Render seed in `[1_000_000_000, 3_000_000_000)`, the band consuming
/// renderers expect for reproducible-looking jitter.
pub fn render_seed(rng: &mut impl Rng) -> u32 {
    rng.gen_range(0..2_000_000_000u32) + 1_000_000_000
}

/// Two-letter fractional-index token used for element ordering metadata.
pub fn fractional_index(rng: &mut impl Rng) -> String {
    random_string(rng, INDEX_ALPHABET, 2)
}

fn random_string(rng: &mut impl Rng, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}
