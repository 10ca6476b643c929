//! Short code generation.
//!
//! Codes are [`SHORT_CODE_LENGTH`] characters, each drawn independently and
//! uniformly from the 62-symbol [`ALPHABET`]. The random source is injected so
//! tests can seed it.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Length of every generated short code.
pub const SHORT_CODE_LENGTH: usize = 8;

/// Symbols a short code is drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Produces candidate short codes.
///
/// Implementations do not check uniqueness; the shortening engine does.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Whether `code` has the shape of a generated code: exactly
/// [`SHORT_CODE_LENGTH`] symbols, all from [`ALPHABET`].
pub fn is_well_formed(code: &str) -> bool {
    code.len() == SHORT_CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}

/// Generator drawing from a shared random number generator.
pub struct RandomCodeGenerator<R = StdRng> {
    rng: Mutex<R>,
}

impl<R: RngCore + Send> RandomCodeGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl RandomCodeGenerator<StdRng> {
    /// Generator seeded from the operating system's entropy source.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Deterministic generator: equal seeds yield equal code sequences.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore + Send> CodeGenerator for RandomCodeGenerator<R> {
    fn generate(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        (0..SHORT_CODE_LENGTH)
            .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = RandomCodeGenerator::from_os_rng().generate();
        assert_eq!(code.len(), SHORT_CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_uses_alphanumeric_characters() {
        let generator = RandomCodeGenerator::from_os_rng();

        for _ in 0..200 {
            let code = generator.generate();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_alphabet_has_62_distinct_symbols() {
        let symbols: HashSet<u8> = ALPHABET.iter().copied().collect();
        assert_eq!(symbols.len(), 62);
        assert!(ALPHABET.iter().all(u8::is_ascii_alphanumeric));
    }

    #[test]
    fn test_same_seed_yields_same_sequence() {
        let first = RandomCodeGenerator::seeded(7);
        let second = RandomCodeGenerator::seeded(7);

        for _ in 0..10 {
            assert_eq!(first.generate(), second.generate());
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let generator = RandomCodeGenerator::seeded(42);
        let codes: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generated_codes_are_well_formed() {
        let generator = RandomCodeGenerator::seeded(3);

        assert!((0..100).all(|_| is_well_formed(&generator.generate())));
    }

    #[test]
    fn test_is_well_formed_rejects_foreign_shapes() {
        assert!(is_well_formed("aB3dE6gH"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("abc"));
        assert!(!is_well_formed("toolongcode"));
        assert!(!is_well_formed("ab\0cdefg"));
        assert!(!is_well_formed("abc-defg"));
        assert!(!is_well_formed("abcdéfg"));
    }

    #[test]
    fn test_every_symbol_is_reachable() {
        let generator = RandomCodeGenerator::seeded(1);
        let seen: HashSet<char> = (0..2000)
            .flat_map(|_| generator.generate().chars().collect::<Vec<_>>())
            .collect();

        assert_eq!(seen.len(), ALPHABET.len());
    }
}
