//! babel-core: reversible content addressing in the manner of the Library of Babel
//!
//! Any page of content maps to a textual address, and any address maps back to
//! exactly one page. Nothing is stored: a page is recomputed from its address
//! with arbitrary-precision arithmetic every time it is looked up.
//!
//! # Architecture
//!
//! The modules are layered leaf-first:
//! - `alphabet`: symbol sets and the base → alphabet registry
//! - `numeral`: positional conversion between big integers and symbols
//! - `coordinate`: random wall/shelf/volume/page coordinates and their seed
//! - `fitter`: truncating or padding content to the page length
//! - `address`: the `REGION:WALL:SHELF:VOLUME:PAGE` text format
//! - `codec`: fusing coordinate and content into one address integer
//! - `stream`: `Read`/`Write` adapters over the codec
//!
//! # Example
//!
//! ```
//! use babel_core::{Codec, Padding};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let codec = Codec::standard().unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//!
//! let address = codec.compute_address(b"hello world", Padding::Filler, &mut rng).unwrap();
//! let page = codec.search(&address).unwrap();
//! assert!(page.starts_with(b"hello world"));
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: every failure is a structured [`Error`]
//! - **Explicit randomness**: callers pass the RNG for each call
//! - **Shared configuration**: the alphabet registry is immutable once built

pub mod address;
pub mod alphabet;
pub mod codec;
pub mod coordinate;
pub mod error;
pub mod fitter;
pub mod numeral;
pub mod stream;

// Re-export commonly used types
pub use address::Address;
pub use alphabet::{Alphabet, AlphabetRegistry};
pub use codec::{Codec, CodecConfig};
pub use coordinate::{Coordinate, CoordinateBounds};
pub use error::{Error, Result};
pub use fitter::{Normalization, Padding};
