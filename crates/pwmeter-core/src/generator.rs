//! Constrained random password generation.
//!
//! Every requested character class contributes one mandatory character, the
//! remaining positions are filled uniformly from the combined alphabet, and
//! the result is shuffled so mandatory characters have no fixed position.

use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::strength::SPECIAL_CHARS;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

/// Special characters used when no class was requested.
pub const FALLBACK_SPECIAL_CHARS: &str = "!@#$%^&*";

/// Length used when the caller does not choose one.
pub const DEFAULT_LENGTH: usize = 12;

/// Lengths offered by interactive front ends.
pub const UI_LENGTH_RANGE: RangeInclusive<usize> = 8..=32;

/// Which character classes a generated password must draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharClasses {
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub special: bool,
}

impl Default for CharClasses {
    fn default() -> Self {
        Self {
            uppercase: true,
            lowercase: true,
            digits: true,
            special: true,
        }
    }
}

impl CharClasses {
    /// No class selected. Generation falls back to the default alphabet.
    pub fn none() -> Self {
        Self {
            uppercase: false,
            lowercase: false,
            digits: false,
            special: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.uppercase || self.lowercase || self.digits || self.special)
    }

    /// Selected class alphabets in mandatory-selection order.
    fn pools(&self) -> Vec<&'static str> {
        if self.is_empty() {
            return vec![LOWERCASE, UPPERCASE, DIGITS, FALLBACK_SPECIAL_CHARS];
        }

        [
            (self.lowercase, LOWERCASE),
            (self.uppercase, UPPERCASE),
            (self.digits, DIGITS),
            (self.special, SPECIAL_CHARS),
        ]
        .into_iter()
        .filter_map(|(enabled, pool)| enabled.then_some(pool))
        .collect()
    }
}

/// Generate a password of exactly `length` characters using the thread-local
/// CSPRNG.
pub fn generate(length: usize, classes: CharClasses) -> String {
    generate_with(&mut rand::rng(), length, classes)
}

/// Generate a password with a caller-supplied cryptographically secure RNG.
///
/// A `length` of zero yields an empty string. When `length` is smaller than
/// the number of requested classes, only the first `length` mandatory
/// characters (in lowercase, uppercase, digits, special order) are kept.
pub fn generate_with<R>(rng: &mut R, length: usize, classes: CharClasses) -> String
where
    R: Rng + CryptoRng + ?Sized,
{
    if classes.is_empty() {
        tracing::debug!("no character classes requested, using default alphabet");
    }

    let pools: Vec<Vec<char>> = classes
        .pools()
        .into_iter()
        .map(|pool| pool.chars().collect())
        .collect();
    let alphabet: Vec<char> = pools.iter().flatten().copied().collect();

    let mut password: Vec<char> = pools.iter().map(|pool| pick(rng, pool)).collect();
    password.truncate(length);

    while password.len() < length {
        password.push(pick(rng, &alphabet));
    }

    password.shuffle(rng);

    tracing::debug!(length, ?classes, "generated password");
    password.into_iter().take(length).collect()
}

/// Uniformly draw one character. `pool` is never empty here: every pool is
/// one of the non-empty class constants or their union.
fn pick<R>(rng: &mut R, pool: &[char]) -> char
where
    R: Rng + ?Sized,
{
    pool[rng.random_range(0..pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn default_classes_are_all_enabled() {
        let classes = CharClasses::default();
        assert!(classes.uppercase && classes.lowercase && classes.digits && classes.special);
        assert!(!classes.is_empty());
        assert!(CharClasses::none().is_empty());
    }

    #[test]
    fn exact_length_with_all_classes() {
        let pwd = generate(DEFAULT_LENGTH, CharClasses::default());
        assert_eq!(pwd.chars().count(), DEFAULT_LENGTH);
        assert!(pwd.chars().any(|c| c.is_ascii_lowercase()));
        assert!(pwd.chars().any(|c| c.is_ascii_uppercase()));
        assert!(pwd.chars().any(|c| c.is_ascii_digit()));
        assert!(pwd.chars().any(|c| SPECIAL_CHARS.contains(c)));
    }

    #[test]
    fn single_class_stays_in_alphabet() {
        let classes = CharClasses {
            digits: true,
            ..CharClasses::none()
        };
        let pwd = generate_with(&mut seeded(), 32, classes);
        assert_eq!(pwd.len(), 32);
        assert!(pwd.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn empty_request_falls_back_to_mixed_alphabet() {
        let pwd = generate_with(&mut seeded(), 10, CharClasses::none());
        assert_eq!(pwd.chars().count(), 10);
        assert!(pwd.chars().any(|c| c.is_ascii_lowercase()));
        assert!(pwd.chars().any(|c| c.is_ascii_uppercase()));
        assert!(pwd.chars().any(|c| c.is_ascii_digit()));
        assert!(pwd.chars().any(|c| FALLBACK_SPECIAL_CHARS.contains(c)));
        assert!(pwd
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || FALLBACK_SPECIAL_CHARS.contains(c)));
    }

    #[test]
    fn short_length_truncates_mandatory_in_selection_order() {
        // Only lowercase and uppercase survive truncation to two characters.
        let pwd = generate_with(&mut seeded(), 2, CharClasses::default());
        assert_eq!(pwd.len(), 2);
        assert!(pwd.chars().any(|c| c.is_ascii_lowercase()));
        assert!(pwd.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn zero_length_is_empty() {
        assert_eq!(generate(0, CharClasses::default()), "");
        assert_eq!(generate(0, CharClasses::none()), "");
    }

    #[test]
    fn single_character_password() {
        let classes = CharClasses {
            special: true,
            ..CharClasses::none()
        };
        let pwd = generate_with(&mut seeded(), 1, classes);
        assert_eq!(pwd.chars().count(), 1);
        assert!(SPECIAL_CHARS.contains(pwd.as_str()));
    }

    #[test]
    fn same_seed_same_password() {
        let a = generate_with(&mut seeded(), 20, CharClasses::default());
        let b = generate_with(&mut seeded(), 20, CharClasses::default());
        assert_eq!(a, b);
    }

    #[test]
    fn char_classes_partial_deserialize_fills_defaults() {
        let classes: CharClasses = toml::from_str("special = false").unwrap();
        assert!(!classes.special);
        assert!(classes.uppercase && classes.lowercase && classes.digits);
    }
}
