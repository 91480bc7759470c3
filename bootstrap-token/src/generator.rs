use std::sync::Mutex;

use rand::{rngs::OsRng, RngCore};

use crate::token::{token_from_id_and_secret, BOOTSTRAP_TOKEN_ID_LEN, BOOTSTRAP_TOKEN_SECRET_LEN};

const VALID_BOOTSTRAP_TOKEN_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// Largest multiple of 36 below 256, anything at or above this would bias the modulo
const MAX_BYTE_VALUE: u8 = 252;

/// Produces new bootstrap tokens and knows how to put the two halves of one back together.
pub trait TokenGenerator {
    type Error;

    /// Generate a new random token in the form `<token-id>.<token-secret>`
    fn generate(&self) -> Result<String, Self::Error>;

    fn compose(&self, id: &str, secret: &str) -> String {
        token_from_id_and_secret(id, secret)
    }
}

/// Generates tokens from a cryptographically secure random number generator.
///
/// The RNG sits behind a mutex so the generator can be shared by reference.
pub struct RandomTokenGenerator<R = OsRng> {
    rng: Mutex<R>,
}

impl RandomTokenGenerator<OsRng> {
    pub fn new() -> Self {
        Self::from_rng(OsRng)
    }
}

impl Default for RandomTokenGenerator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> RandomTokenGenerator<R> {
    pub fn from_rng(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn random_chars(rng: &mut R, length: usize) -> Result<String, rand::Error> {
        let mut token = String::with_capacity(length);
        let mut buf = [0u8; 1];

        while token.len() < length {
            rng.try_fill_bytes(&mut buf)?;

            if buf[0] < MAX_BYTE_VALUE {
                let index = buf[0] as usize % VALID_BOOTSTRAP_TOKEN_CHARS.len();
                token.push(VALID_BOOTSTRAP_TOKEN_CHARS[index] as char);
            }
        }

        Ok(token)
    }
}

impl<R: RngCore> TokenGenerator for RandomTokenGenerator<R> {
    type Error = rand::Error;

    fn generate(&self) -> Result<String, Self::Error> {
        // A poisoned lock only means another thread panicked mid-draw, the RNG itself is still usable
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let id = Self::random_chars(&mut rng, BOOTSTRAP_TOKEN_ID_LEN)?;
        let secret = Self::random_chars(&mut rng, BOOTSTRAP_TOKEN_SECRET_LEN)?;

        Ok(token_from_id_and_secret(&id, &secret))
    }
}
