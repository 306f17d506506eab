//! Short key generation.
//!
//! Keys and secret keys are drawn uniformly from uppercase ASCII letters and
//! digits. Secret keys double as admin credentials, so the generator uses
//! [`rand::rng`], a cryptographically secure generator seeded from the OS.

use rand::Rng;
use std::future::Future;

/// Characters a key may contain.
pub const KEY_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default key length (36^5 ≈ 60 million combinations).
pub const DEFAULT_KEY_LENGTH: usize = 5;

/// Generates fixed-length random keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyGenerator {
    length: usize,
}

impl KeyGenerator {
    /// Creates a generator producing keys of `length` characters.
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Generates one random key.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlchemy::utils::key_generator::KeyGenerator;
    ///
    /// let key = KeyGenerator::new(5).generate_key();
    /// assert_eq!(key.len(), 5);
    /// assert!(key.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    /// ```
    pub fn generate_key(&self) -> String {
        let mut rng = rand::rng();

        (0..self.length)
            .map(|_| {
                let idx = rng.random_range(0..KEY_ALPHABET.len());
                KEY_ALPHABET[idx] as char
            })
            .collect()
    }

    /// Generates keys until `exists` reports a candidate as free.
    ///
    /// There is no attempt limit. At the default length a collision is rare
    /// enough that this returns after one call in practice.
    pub fn generate_unique_key<F>(&self, mut exists: F) -> String
    where
        F: FnMut(&str) -> bool,
    {
        loop {
            let candidate = self.generate_key();
            if !exists(&candidate) {
                return candidate;
            }
        }
    }

    /// Async variant of [`Self::generate_unique_key`] for fallible lookups.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `exists`.
    pub async fn generate_unique_key_async<F, Fut, E>(&self, mut exists: F) -> Result<String, E>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<bool, E>>,
    {
        loop {
            let candidate = self.generate_key();
            if !exists(candidate.clone()).await? {
                return Ok(candidate);
            }
        }
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_LENGTH)
    }
}
