//! Session and player token generation.
//!
//! Tokens are lowercase, URL-safe strings drawn from the OS's cryptographically
//! secure RNG. Session ids are short enough to read out loud; player ids are
//! longer because they act as the player's only credential.

use rand::rngs::OsRng;
use rand::{Rng, TryRngCore};

use crate::errors::domain::{DomainError, InfraErrorKind};

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a session id.
pub const SESSION_ID_LEN: usize = 6;
/// Length of a player id.
pub const PLAYER_ID_LEN: usize = 10;

/// Attempts made before giving up on finding an unused token.
const MAX_ATTEMPTS: usize = 32;

/// Generate one random token of `len` characters.
pub fn generate_token(len: usize) -> String {
    let mut rng = OsRng.unwrap_err();
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Generate a token of `len` characters for which `taken` returns false.
///
/// Retries on collision; fails with `TokenSpaceExhausted` after
/// `MAX_ATTEMPTS` consecutive collisions.
pub fn unique_token<F>(len: usize, mut taken: F) -> Result<String, DomainError>
where
    F: FnMut(&str) -> bool,
{
    for _ in 0..MAX_ATTEMPTS {
        let candidate = generate_token(len);
        if !taken(&candidate) {
            return Ok(candidate);
        }
    }
    Err(DomainError::infra(
        InfraErrorKind::TokenSpaceExhausted,
        format!("no free {len}-character token after {MAX_ATTEMPTS} attempts"),
    ))
}
