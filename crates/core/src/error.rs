//! Error types for the babel addressing engine.
//!
//! Every failure here is a deterministic function of the input: a base with no
//! registered alphabet, a symbol that cannot be indexed, an address that does
//! not split into its five fields. Nothing is transient, so nothing is retried.

use thiserror::Error;

/// Top-level error type for all operations in the engine.
///
/// Each variant corresponds to a specific failure domain:
/// - Alphabet: registry lookups and symbol indexing
/// - Numeral: positional conversion that has no textual form
/// - Content: input that the content alphabet cannot express
/// - Address: malformed addresses and out-of-range coordinates
/// - I/O: stream adapters
#[derive(Debug, Error)]
pub enum Error {
    /// Alphabet registry or symbol lookup failed
    #[error("alphabet error: {0}")]
    Alphabet(#[from] AlphabetError),

    /// Positional numeral conversion failed
    #[error("numeral error: {0}")]
    Numeral(#[from] NumeralError),

    /// Content could not be fitted to a page
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// Address parsing or validation failed
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// Stream I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Codec configuration is inconsistent
    #[error("configuration error: {0}")]
    Config(String),
}

/// Alphabet registry errors.
#[derive(Debug, Error)]
pub enum AlphabetError {
    /// No alphabet is registered for the requested base
    #[error("unsupported base: {base}")]
    UnsupportedBase { base: usize },

    /// A symbol has no index in the alphabet
    #[error("symbol '{}' is not in the base-{base} alphabet", .symbol.escape_ascii())]
    SymbolNotInAlphabet { symbol: u8, base: usize },

    /// The same symbol appears twice in an alphabet definition
    #[error("duplicate symbol '{}' in alphabet", .symbol.escape_ascii())]
    DuplicateSymbol { symbol: u8 },

    /// Alphabets need at least two symbols
    #[error("alphabet size {size} is outside 2..=256")]
    InvalidSize { size: usize },

    /// A second alphabet was registered for an existing base
    #[error("base {base} is already registered")]
    DuplicateBase { base: usize },
}

/// Positional numeral conversion errors.
#[derive(Debug, Error)]
pub enum NumeralError {
    /// Nothing to decode (empty input, or a bare sign marker)
    #[error("numeral has no digits")]
    Empty,

    /// The sign marker is itself a digit of this base
    #[error("negative values cannot be written in base {base}: the sign marker is a digit")]
    SignUnrepresentable { base: usize },
}

/// Content fitting errors.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Content holds a symbol the content alphabet cannot express
    #[error("content symbol '{}' at position {position} is outside the base-{base} alphabet", .symbol.escape_ascii())]
    ExceedsAlphabet {
        symbol: u8,
        position: usize,
        base: usize,
    },
}

/// Address errors.
#[derive(Debug, Error)]
pub enum AddressError {
    /// Address does not have the `region:wall:shelf:volume:page` shape
    #[error("malformed address: {reason}")]
    Malformed { reason: String },

    /// A coordinate field is outside `1..=max`
    #[error("{field} {value} is outside 1..={max}")]
    CoordinateOutOfRange {
        field: &'static str,
        value: u64,
        max: u32,
    },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
