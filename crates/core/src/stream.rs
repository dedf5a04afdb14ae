//! Reader and writer adapters around the buffer-based codec.
//!
//! A page only ever keeps the last N symbols of its content, so the reader
//! adapter holds at most `2 × N` bytes no matter how long the source is.
//! Every byte is still validated, so a bad symbol early in a long stream
//! fails the call exactly as it would for an in-memory buffer.

use crate::address::Address;
use crate::codec::Codec;
use crate::error::Result;
use crate::fitter::{self, Normalization, Padding};
use rand::Rng;
use std::io::{ErrorKind, Read, Write};

const READ_CHUNK: usize = 8192;

impl Codec {
    /// [`compute_address`](Codec::compute_address) over a byte source.
    pub fn compute_address_from_reader<Rd: Read, R: Rng + ?Sized>(
        &self,
        mut reader: Rd,
        padding: Padding,
        rng: &mut R,
    ) -> Result<Address> {
        let alphabet = self.content_alphabet()?;
        let normalization = self.config().normalization;
        let keep = self.config().max_page_len;

        let mut tail: Vec<u8> = Vec::with_capacity(keep.saturating_mul(2).min(1 << 20));
        let mut chunk = [0u8; READ_CHUNK];
        let mut consumed = 0usize;
        let mut dropped = 0usize;

        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            let normalized = fitter::normalize(&chunk[..n], alphabet, normalization);
            if normalization == Normalization::Strict {
                fitter::validate(&normalized, alphabet, consumed)?;
            }
            consumed += normalized.len();
            tail.extend_from_slice(&normalized);

            if tail.len() > keep.saturating_mul(2) {
                let excess = tail.len() - keep;
                tail.drain(..excess);
                dropped += excess;
            }
        }

        if dropped > 0 {
            tracing::warn!(dropped, "stream longer than a page, earlier symbols discarded");
        }
        tracing::debug!(consumed, "read content stream");

        // Already normalised; lenient normalisation is idempotent
        self.compute_address(&tail, padding, rng)
    }

    /// [`search`](Codec::search) into a byte sink. Returns the bytes written.
    pub fn search_to_writer<W: Write>(&self, address: &Address, mut writer: W) -> Result<usize> {
        let page = self.search(address)?;
        writer.write_all(&page)?;
        writer.flush()?;
        Ok(page.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::AlphabetRegistry;
    use crate::codec::CodecConfig;
    use crate::error::{ContentError, Error};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::io::Cursor;
    use std::sync::Arc;

    fn codec(max_page_len: usize) -> Codec {
        let config = CodecConfig {
            max_page_len,
            ..CodecConfig::default()
        };
        Codec::new(Arc::new(AlphabetRegistry::standard()), config).unwrap()
    }

    #[test]
    fn test_reader_matches_buffer() {
        let codec = codec(64);
        let content = b"a short page of text.";

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let from_reader = codec
            .compute_address_from_reader(Cursor::new(content), Padding::Random, &mut rng)
            .unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let from_buffer = codec
            .compute_address(content, Padding::Random, &mut rng)
            .unwrap();

        assert_eq!(from_reader, from_buffer);
    }

    #[test]
    fn test_long_stream_keeps_last_page() {
        let codec = codec(16);
        let mut content = b"x".repeat(50_000);
        content.extend_from_slice(b"the final page..");

        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let address = codec
            .compute_address_from_reader(Cursor::new(&content), Padding::Filler, &mut rng)
            .unwrap();
        assert_eq!(codec.search(&address).unwrap(), b"the final page..");
    }

    #[test]
    fn test_stream_reports_absolute_position() {
        let codec = codec(16);
        let mut content = b"y".repeat(20_000);
        content.push(b'#');

        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let result = codec.compute_address_from_reader(Cursor::new(&content), Padding::Filler, &mut rng);
        assert!(matches!(
            result,
            Err(Error::Content(ContentError::ExceedsAlphabet {
                symbol: b'#',
                position: 20_000,
                ..
            }))
        ));
    }

    #[test]
    fn test_search_to_writer() {
        let codec = codec(8);
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let address = codec
            .compute_address(b"ink", Padding::Filler, &mut rng)
            .unwrap();

        let mut sink = Vec::new();
        let written = codec.search_to_writer(&address, &mut sink).unwrap();
        assert_eq!(written, 8);
        assert_eq!(sink, b"ink     ");
    }
}
