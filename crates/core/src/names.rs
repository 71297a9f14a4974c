use rand::Rng;

/// Shortest name produced by [`generate_name`].
pub const MIN_NAME_LEN: usize = 8;
/// Longest name produced by [`generate_name`].
pub const MAX_NAME_LEN: usize = 15;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a random identifier matching `[A-Za-z][A-Za-z0-9]{7,14}`.
///
/// Names are not unique on their own; [`crate::RenameTable`] checks for collisions.
pub fn generate_name<R: Rng>(rng: &mut R) -> String {
    let len = rng.random_range(MIN_NAME_LEN..=MAX_NAME_LEN);
    let mut name = String::with_capacity(len);
    name.push(LETTERS[rng.random_range(0..LETTERS.len())] as char);
    for _ in 1..len {
        name.push(ALPHANUMERIC[rng.random_range(0..ALPHANUMERIC.len())] as char);
    }
    name
}
