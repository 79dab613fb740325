use crate::constants::{GENERATED_PASSWORD_LENGTH, PASSWORD_ALPHABET};
use rand::{rngs::OsRng, Rng};

/// Generate a password of `GENERATED_PASSWORD_LENGTH` characters, each drawn
/// uniformly and independently from `PASSWORD_ALPHABET`.
pub fn generate() -> String {
    generate_with(&mut OsRng)
}

pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..GENERATED_PASSWORD_LENGTH)
        .map(|_| char::from(PASSWORD_ALPHABET[rng.gen_range(0..PASSWORD_ALPHABET.len())]))
        .collect()
}
