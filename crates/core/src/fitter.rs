//! Normalising content to the fixed page length.
//!
//! The arithmetic stage always works on exactly `target_len` symbols, so
//! content is fitted first:
//!
//! - **Too long**: keep the *last* `target_len` symbols. Decoding returns the
//!   last `target_len` symbols of the recovered number too, so the two
//!   policies mirror each other.
//! - **Too short, [`Padding::Filler`]**: right-pad with the alphabet's filler
//!   (space for text, zero byte for binary).
//! - **Too short, [`Padding::Random`]**: place the content at a uniformly
//!   random offset in `[0, target_len - len]` and fill both sides with
//!   uniformly drawn alphabet symbols.
//!
//! Content is validated against the alphabet before anything else happens.

use crate::alphabet::Alphabet;
use crate::error::{ContentError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// How short content is brought up to the page length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    /// Random placement with random fill symbols
    Random,
    /// Content first, then the alphabet's filler symbol
    Filler,
}

impl Padding {
    pub fn from_flag(pad_random: bool) -> Self {
        if pad_random {
            Padding::Random
        } else {
            Padding::Filler
        }
    }
}

/// How content symbols outside the alphabet are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Reject content with `ContentError::ExceedsAlphabet`
    #[default]
    Strict,
    /// Lowercase ASCII letters, then drop whatever is still unknown
    Lenient,
}

/// Fit `content` to exactly `target_len` symbols of `alphabet`.
///
/// # Errors
/// Returns `ContentError::ExceedsAlphabet` for the first symbol that is not in
/// the alphabet. No padding is drawn in that case.
pub fn fit<R: Rng + ?Sized>(
    content: &[u8],
    target_len: usize,
    alphabet: &Alphabet,
    padding: Padding,
    rng: &mut R,
) -> Result<Vec<u8>> {
    validate(content, alphabet, 0)?;

    if content.len() >= target_len {
        if content.len() > target_len {
            tracing::warn!(
                len = content.len(),
                target_len,
                "content longer than a page, keeping the last {} symbols",
                target_len
            );
        }
        return Ok(content[content.len() - target_len..].to_vec());
    }

    let mut page = Vec::with_capacity(target_len);
    match padding {
        Padding::Filler => {
            page.extend_from_slice(content);
            page.resize(target_len, alphabet.filler());
        }
        Padding::Random => {
            let offset = rng.gen_range(0..=target_len - content.len());
            tracing::trace!(offset, len = content.len(), "random placement");

            push_random_symbols(&mut page, offset, alphabet, rng);
            page.extend_from_slice(content);
            let tail = target_len - page.len();
            push_random_symbols(&mut page, tail, alphabet, rng);
        }
    }

    Ok(page)
}

/// Apply a normalisation mode. Strict content is returned untouched; the
/// validation happens in [`fit`].
///
/// Lenient mode only lowercases when the alphabet has no uppercase letters,
/// so case-sensitive alphabets are not folded.
pub fn normalize(content: &[u8], alphabet: &Alphabet, mode: Normalization) -> Vec<u8> {
    match mode {
        Normalization::Strict => content.to_vec(),
        Normalization::Lenient => {
            let fold = !alphabet.symbols().iter().any(u8::is_ascii_uppercase);
            let kept: Vec<u8> = content
                .iter()
                .map(|&b| if fold { b.to_ascii_lowercase() } else { b })
                .filter(|&b| alphabet.contains(b))
                .collect();

            if kept.len() < content.len() {
                tracing::warn!(
                    dropped = content.len() - kept.len(),
                    "dropped symbols outside the content alphabet"
                );
            }
            kept
        }
    }
}

/// Padding RNG seeded by content length.
///
/// Every content of the same length gets the same placement and fill, so this
/// is only meant for reproducible tests and fixtures.
pub fn length_seeded_rng(content_len: usize) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(content_len as u64)
}

/// Check every symbol; `offset` is added to reported positions so stream
/// chunks report positions within the whole stream.
pub(crate) fn validate(content: &[u8], alphabet: &Alphabet, offset: usize) -> Result<()> {
    match content.iter().position(|&b| !alphabet.contains(b)) {
        Some(position) => Err(ContentError::ExceedsAlphabet {
            symbol: content[position],
            position: offset + position,
            base: alphabet.base(),
        }
        .into()),
        None => Ok(()),
    }
}

fn push_random_symbols<R: Rng + ?Sized>(
    page: &mut Vec<u8>,
    count: usize,
    alphabet: &Alphabet,
    rng: &mut R,
) {
    let symbols = alphabet.symbols();
    page.extend((0..count).map(|_| symbols[rng.gen_range(0..symbols.len())]));
}
