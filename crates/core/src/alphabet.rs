//! Alphabets and the registry that maps a numeral base to its symbol set.
//!
//! An [`Alphabet`] is an ordered, duplicate-free sequence of byte symbols; its
//! length is its base. The [`AlphabetRegistry`] is built once, then shared
//! read-only (usually behind an `Arc`) by every codec that needs it.
//!
//! # Standard Alphabets
//!
//! ```text
//! base  29   abcdefghijklmnopqrstuvwxyz, .     (page text)
//! base  36   0-9 a-z                           (addresses)
//! base  64   A-Z a-z 0-9 + /                   (addresses)
//! base 256   every byte, identity order        (binary pages)
//! ```

use crate::error::{AlphabetError, Result};
use std::collections::BTreeMap;

/// Page text: lowercase letters, comma, space, period.
pub const BASE29_SYMBOLS: &[u8] = b"abcdefghijklmnopqrstuvwxyz, .";

/// Alphanumeric address alphabet.
pub const BASE36_SYMBOLS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Standard base64 ordering.
pub const BASE64_SYMBOLS: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// An ordered set of distinct byte symbols.
///
/// # Invariants
/// - 2 to 256 symbols, no duplicates
/// - `index[s] == Some(i)` iff `symbols[i] == s`
/// - `filler` is one of `symbols`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
    index: [Option<u8>; 256],
    filler: u8,
}

impl Alphabet {
    /// Build an alphabet from its symbols in digit order.
    ///
    /// # Errors
    /// - `AlphabetError::InvalidSize` for fewer than two symbols
    /// - `AlphabetError::DuplicateSymbol` if a symbol repeats
    pub fn new(symbols: &[u8]) -> Result<Self> {
        if symbols.len() < 2 || symbols.len() > 256 {
            return Err(AlphabetError::InvalidSize {
                size: symbols.len(),
            }
            .into());
        }

        let mut index = [None; 256];
        for (position, &symbol) in symbols.iter().enumerate() {
            let slot = &mut index[symbol as usize];
            if slot.is_some() {
                return Err(AlphabetError::DuplicateSymbol { symbol }.into());
            }
            // len <= 256 was checked above
            *slot = Some(position as u8);
        }

        let filler = if index[b' ' as usize].is_some() {
            b' '
        } else {
            symbols[0]
        };

        Ok(Self {
            symbols: symbols.to_vec(),
            index,
            filler,
        })
    }

    /// The byte-identity alphabet: symbol `i` is byte `i`. Pads with the
    /// zero byte.
    pub fn bytes() -> Self {
        let symbols: Vec<u8> = (0..=255u8).collect();
        let mut index = [None; 256];
        for &b in &symbols {
            index[b as usize] = Some(b);
        }
        Self {
            symbols,
            index,
            filler: 0,
        }
    }

    /// Number of symbols, i.e. the numeral base.
    pub fn base(&self) -> usize {
        self.symbols.len()
    }

    /// Symbols in digit order.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// The symbol for digit zero.
    pub fn zero(&self) -> u8 {
        self.symbols[0]
    }

    /// Digit position of `symbol`.
    ///
    /// # Errors
    /// Returns `AlphabetError::SymbolNotInAlphabet` if the symbol is absent.
    pub fn index_of(&self, symbol: u8) -> Result<u8> {
        self.index[symbol as usize].ok_or_else(|| {
            AlphabetError::SymbolNotInAlphabet {
                symbol,
                base: self.base(),
            }
            .into()
        })
    }

    /// True if `symbol` is a digit of this alphabet.
    pub fn contains(&self, symbol: u8) -> bool {
        self.index[symbol as usize].is_some()
    }

    /// Filler used for deterministic padding: space for text alphabets that
    /// have one, otherwise the zero symbol. Binary pages pad with byte 0.
    pub fn filler(&self) -> u8 {
        self.filler
    }

    /// True if every symbol is a printable, non-space ASCII character.
    pub fn is_printable_ascii(&self) -> bool {
        self.symbols.iter().all(|s| s.is_ascii_graphic())
    }

    /// True if pages in this alphabet read as text: every symbol is a
    /// printable ASCII character or space.
    pub fn is_text(&self) -> bool {
        self.symbols
            .iter()
            .all(|&s| s.is_ascii_graphic() || s == b' ')
    }
}

/// Maps each registered base to its alphabet.
///
/// Populate it with [`register`](Self::register), then share it immutably.
#[derive(Debug, Clone, Default)]
pub struct AlphabetRegistry {
    alphabets: BTreeMap<usize, Alphabet>,
}

impl AlphabetRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the four standard alphabets (bases 29, 36, 64, 256).
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for symbols in [BASE29_SYMBOLS, BASE36_SYMBOLS, BASE64_SYMBOLS] {
            // Constant tables, known to be valid
            if let Ok(alphabet) = Alphabet::new(symbols) {
                registry.alphabets.insert(alphabet.base(), alphabet);
            }
        }
        registry.alphabets.insert(256, Alphabet::bytes());
        registry
    }

    /// Add an alphabet under its own base.
    ///
    /// # Errors
    /// Returns `AlphabetError::DuplicateBase` if the base is already taken.
    pub fn register(&mut self, alphabet: Alphabet) -> Result<()> {
        let base = alphabet.base();
        if self.alphabets.contains_key(&base) {
            return Err(AlphabetError::DuplicateBase { base }.into());
        }
        self.alphabets.insert(base, alphabet);
        Ok(())
    }

    /// Alphabet registered for `base`.
    ///
    /// # Errors
    /// Returns `AlphabetError::UnsupportedBase` for unregistered bases.
    pub fn charset_for(&self, base: usize) -> Result<&Alphabet> {
        self.alphabets
            .get(&base)
            .ok_or_else(|| AlphabetError::UnsupportedBase { base }.into())
    }

    /// Digit position of `symbol` in the alphabet for `base`.
    pub fn index_of(&self, symbol: u8, base: usize) -> Result<u8> {
        self.charset_for(base)?.index_of(symbol)
    }

    /// Registered bases in ascending order.
    pub fn bases(&self) -> impl Iterator<Item = usize> + '_ {
        self.alphabets.keys().copied()
    }
}
