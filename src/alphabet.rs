//! # Alphabet
//!
//! The closed set of bytes that random generation and mutation may produce.
//!
//! ```rust
//! use strevolve::alphabet::Alphabet;
//!
//! let alphabet = Alphabet::default();
//! assert_eq!(alphabet.len(), 84);
//! assert!(alphabet.contains(b'Q'));
//! assert!(!alphabet.contains(b'~'));
//! ```

use crate::{
    error::{GeneticError, Result},
    rng::RandomNumberGenerator,
};

const PUNCTUATION: &[u8] = b"=_!@#$%^&*()<>[];:'\" \n";

/// An ordered, duplicate-free, non-empty set of allowed symbols.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
}

impl Alphabet {
    /// Builds a custom alphabet.
    ///
    /// Duplicates are dropped, keeping the first occurrence. An empty set is
    /// rejected, since nothing could ever be generated from it.
    pub fn new(symbols: impl Into<Vec<u8>>) -> Result<Self> {
        let mut seen = [false; 256];
        let symbols: Vec<u8> = symbols
            .into()
            .into_iter()
            .filter(|&b| !std::mem::replace(&mut seen[b as usize], true))
            .collect();

        if symbols.is_empty() {
            return Err(GeneticError::Configuration(
                "Allowed-symbol alphabet cannot be empty".to_string(),
            ));
        }

        Ok(Self { symbols })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false` for a constructed alphabet.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Draws one symbol uniformly at random.
    pub fn sample(&self, rng: &mut RandomNumberGenerator) -> u8 {
        self.symbols[rng.gen_index(self.symbols.len())]
    }
}

impl Default for Alphabet {
    /// Lowercase letters, uppercase letters, digits, then a fixed set of
    /// punctuation and whitespace.
    fn default() -> Self {
        let symbols = (b'a'..=b'z')
            .chain(b'A'..=b'Z')
            .chain(b'0'..=b'9')
            .chain(PUNCTUATION.iter().copied())
            .collect();
        Self { symbols }
    }
}
