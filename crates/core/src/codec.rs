//! Address codec: content to address and back.
//!
//! # Encoding
//!
//! ```text
//! content ──fit──► page (N symbols) ──positional value──► V
//! random coordinate ──────────────────────────────────► seed
//!
//! A = seed × base^N + V  ──address alphabet──►  REGION:WALL:SHELF:VOLUME:PAGE
//! ```
//!
//! `base` is the content alphabet's size and `N` the page length, so the seed
//! and the content never share a place value.
//!
//! # Decoding
//!
//! The inverse recomputes `V = A - seed × base^N` and writes it back out in
//! the content alphabet. Content is never stored; it is recomputed from the
//! address every time.
//!
//! Decoding is total: any well-formed address yields a page. A value outside
//! `[0, base^N)` is reduced modulo `base^N`, which keeps the last `N` symbols,
//! the same last-N policy the fitter applies to long content.

use crate::address::{Address, FIELD_SEPARATOR};
use crate::alphabet::{Alphabet, AlphabetRegistry};
use crate::coordinate::{Coordinate, CoordinateBounds};
use crate::error::{Error, Result};
use crate::fitter::{self, Normalization, Padding};
use crate::numeral::{self, SIGN_MARKER};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::One;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Page length of the text deployment, in symbols.
pub const MAX_PAGE_LEN: usize = 3200;

/// Page length of the binary deployment, in bytes.
pub const BINARY_PAGE_LEN: usize = 100_000;

/// Content base of the text deployment.
pub const TEXT_BASE: usize = 29;

/// Address base of the text deployment.
pub const ADDRESS_BASE: usize = 36;

/// Everything that parameterises a codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Base whose alphabet page content is written in
    pub content_base: usize,

    /// Base whose alphabet the address region is written in
    pub address_base: usize,

    /// Page length N the arithmetic operates over
    pub max_page_len: usize,

    /// Coordinate field bounds
    pub bounds: CoordinateBounds,

    /// Regions shorter than this are lifted to at least this many symbols
    pub min_address_len: Option<usize>,

    /// Treatment of content symbols outside the content alphabet
    pub normalization: Normalization,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            content_base: TEXT_BASE,
            address_base: ADDRESS_BASE,
            max_page_len: MAX_PAGE_LEN,
            bounds: CoordinateBounds::default(),
            min_address_len: None,
            normalization: Normalization::Strict,
        }
    }
}

impl CodecConfig {
    /// Raw byte pages with base64 addresses.
    pub fn binary() -> Self {
        Self {
            content_base: 256,
            address_base: 64,
            max_page_len: BINARY_PAGE_LEN,
            ..Self::default()
        }
    }
}

/// Converts between content and addresses.
///
/// Immutable after construction; share it freely across threads. Randomness
/// is supplied per call.
#[derive(Debug, Clone)]
pub struct Codec {
    registry: Arc<AlphabetRegistry>,
    config: CodecConfig,
    /// base^N
    page_modulus: BigUint,
    /// (max seed + 1) × base^N, an upper bound for every fused value
    lift_modulus: BigUint,
}

impl Codec {
    /// Build a codec over a shared registry.
    ///
    /// # Errors
    /// - `AlphabetError::UnsupportedBase` if either base is unregistered
    /// - `Error::Config` if the address alphabet is not printable ASCII, or
    ///   contains the field separator or sign marker, or if the page length,
    ///   bounds or minimum address length are out of range
    pub fn new(registry: Arc<AlphabetRegistry>, config: CodecConfig) -> Result<Self> {
        registry.charset_for(config.content_base)?;
        let address = registry.charset_for(config.address_base)?;

        if !address.is_printable_ascii() {
            return Err(Error::Config(format!(
                "address base {} must use printable ASCII symbols",
                config.address_base
            )));
        }
        for reserved in [FIELD_SEPARATOR as u8, SIGN_MARKER] {
            if address.contains(reserved) {
                return Err(Error::Config(format!(
                    "address base {} contains reserved symbol '{}'",
                    config.address_base, reserved as char
                )));
            }
        }

        let exponent = u32::try_from(config.max_page_len)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| {
                Error::Config(format!("page length {} is out of range", config.max_page_len))
            })?;

        if !config.bounds.is_valid() {
            return Err(Error::Config(format!(
                "coordinate bounds must all be at least 1: {:?}",
                config.bounds
            )));
        }

        if let Some(min) = config.min_address_len {
            if min == 0 || u32::try_from(min).is_err() {
                return Err(Error::Config(format!(
                    "minimum address length {min} is out of range"
                )));
            }
        }

        let page_modulus = BigUint::from(config.content_base).pow(exponent);
        let max_seed = config.bounds.max_coordinate().seed(&config.bounds);
        let lift_modulus = (max_seed + BigUint::one()) * &page_modulus;

        Ok(Self {
            registry,
            config,
            page_modulus,
            lift_modulus,
        })
    }

    /// Text codec over the standard registry.
    pub fn standard() -> Result<Self> {
        Self::new(Arc::new(AlphabetRegistry::standard()), CodecConfig::default())
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn content_alphabet(&self) -> Result<&Alphabet> {
        self.registry.charset_for(self.config.content_base)
    }

    pub fn address_alphabet(&self) -> Result<&Alphabet> {
        self.registry.charset_for(self.config.address_base)
    }

    /// Compute an address for `content`.
    ///
    /// The coordinate and any random padding are drawn from `rng`. With
    /// filler padding, two calls on the same content usually give different
    /// addresses that both search back to the same page.
    ///
    /// # Errors
    /// Returns `ContentError::ExceedsAlphabet` (strict normalisation) before
    /// any arithmetic happens.
    pub fn compute_address<R: Rng + ?Sized>(
        &self,
        content: &[u8],
        padding: Padding,
        rng: &mut R,
    ) -> Result<Address> {
        let content_alphabet = self.content_alphabet()?;
        let address_alphabet = self.address_alphabet()?;

        let normalized = fitter::normalize(content, content_alphabet, self.config.normalization);
        let page = fitter::fit(
            &normalized,
            self.config.max_page_len,
            content_alphabet,
            padding,
            rng,
        )?;
        let value = self.page_value(&page)?;

        let coordinate = Coordinate::generate(&self.config.bounds, rng);
        let seed = coordinate.seed(&self.config.bounds);
        let fused = seed * &self.page_modulus + value;

        let mut region = numeral::encode_unsigned(&fused, address_alphabet);
        if let Some(min) = self.config.min_address_len {
            if region.len() < min {
                let lifted = self.lift(fused, &region, min, address_alphabet);
                region = numeral::encode_unsigned(&lifted, address_alphabet);
            }
        }

        tracing::debug!(
            content_len = content.len(),
            page_len = page.len(),
            region_len = region.len(),
            %coordinate,
            "computed address"
        );

        // Address alphabet is printable ASCII, checked in `new`
        let region: String = region.into_iter().map(char::from).collect();
        Ok(Address::new(region, &coordinate, &self.config.bounds))
    }

    /// Recompute the page an address points at. Always exactly N symbols.
    ///
    /// # Errors
    /// - `AddressError::CoordinateOutOfRange` for coordinate fields past
    ///   their bounds
    /// - `AlphabetError::SymbolNotInAlphabet` for region symbols outside the
    ///   address alphabet
    pub fn search(&self, address: &Address) -> Result<Vec<u8>> {
        let content_alphabet = self.content_alphabet()?;
        let address_alphabet = self.address_alphabet()?;

        let coordinate = Coordinate::from_address(address, &self.config.bounds)?;
        let seed = coordinate.seed(&self.config.bounds);

        let fused = numeral::decode(address.region().as_bytes(), address_alphabet)?;
        let offset = BigInt::from(seed * &self.page_modulus);
        let value = fused - offset;

        let modulus = BigInt::from(self.page_modulus.clone());
        let reduced = value.mod_floor(&modulus);
        if reduced != value {
            tracing::debug!("region value outside one page, keeping the last page");
        }
        let (_, value) = reduced.into_parts();

        let digits = numeral::encode_unsigned(&value, content_alphabet);
        let n = self.config.max_page_len;
        let mut page = Vec::with_capacity(n);
        // value < base^N, so there are at most N digits
        page.resize(n.saturating_sub(digits.len()), content_alphabet.zero());
        page.extend_from_slice(&digits[digits.len().saturating_sub(n)..]);

        tracing::debug!(%coordinate, page_len = page.len(), "searched address");
        Ok(page)
    }

    /// Parse an address string, then [`search`](Self::search) it.
    pub fn search_str(&self, address: &str) -> Result<Vec<u8>> {
        self.search(&address.parse()?)
    }

    /// Positional value of a page, most significant symbol first.
    pub fn page_value(&self, page: &[u8]) -> Result<BigUint> {
        let alphabet = self.content_alphabet()?;
        let digits = page
            .iter()
            .map(|&s| alphabet.index_of(s))
            .collect::<Result<Vec<u8>>>()?;
        // Indices come from the alphabet, so each is < base
        Ok(BigUint::from_radix_be(&digits, alphabet.base() as u32).unwrap_or_default())
    }

    /// Raise `fused` by `k × lift_modulus` so it needs at least `min` address
    /// digits. `k` is derived from a hash of the short region. The lift is a
    /// multiple of base^N and vanishes when decoding.
    fn lift(&self, fused: BigUint, region: &[u8], min: usize, address: &Alphabet) -> BigUint {
        // `min` fits in u32, checked in `new`
        let floor = BigUint::from(address.base()).pow(min as u32 - 1);
        let k_min = ((floor + &self.lift_modulus - BigUint::one()) / &self.lift_modulus)
            .max(BigUint::one());

        let digest = Sha256::digest(region);
        let mut word = [0u8; 8];
        word.copy_from_slice(&digest[..8]);
        let k = &k_min + BigUint::from(u64::from_le_bytes(word)) % &k_min;

        tracing::trace!(region_len = region.len(), min, "lifting short region");
        fused + k * &self.lift_modulus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::error::{AddressError, AlphabetError, ContentError};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_config() -> CodecConfig {
        CodecConfig {
            max_page_len: 40,
            ..CodecConfig::default()
        }
    }

    fn small_codec() -> Codec {
        Codec::new(Arc::new(AlphabetRegistry::standard()), small_config()).unwrap()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_round_trip_filler() {
        let codec = small_codec();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let address = codec
            .compute_address(b"hello world", Padding::Filler, &mut rng)
            .unwrap();
        let page = codec.search(&address).unwrap();

        let mut expected = b"hello world".to_vec();
        expected.resize(40, b' ');
        assert_eq!(page, expected);
    }

    #[test]
    fn test_round_trip_random() {
        let codec = small_codec();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..50 {
            let address = codec
                .compute_address(b"the library", Padding::Random, &mut rng)
                .unwrap();
            let page = codec.search(&address).unwrap();
            assert_eq!(page.len(), 40);
            assert!(contains(&page, b"the library"));
        }
    }

    #[test]
    fn test_leading_zero_symbols_survive() {
        // 'a' is digit zero in base 29
        let codec = small_codec();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let content = b"aaaa. a";
        let address = codec
            .compute_address(content, Padding::Filler, &mut rng)
            .unwrap();
        let page = codec.search(&address).unwrap();
        assert!(page.starts_with(content));
    }

    #[test]
    fn test_address_shape() {
        let codec = Codec::standard().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let address = codec
            .compute_address(b"abc", Padding::Random, &mut rng)
            .unwrap();

        let text = address.to_string();
        let fields: Vec<&str> = text.split(':').collect();
        assert_eq!(fields.len(), 5);
        assert!(fields[0]
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
        assert_eq!(fields[1].len(), 1);
        assert_eq!(fields[2].len(), 1);
        assert_eq!(fields[3].len(), 2);
        assert_eq!(fields[4].len(), 3);
    }

    #[test]
    fn test_fused_value_layout() {
        let codec = small_codec();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let address = codec
            .compute_address(b"xyz", Padding::Filler, &mut rng)
            .unwrap();

        let coordinate = Coordinate::from_address(&address, &codec.config().bounds).unwrap();
        let seed = coordinate.seed(&codec.config().bounds);

        let mut page = b"xyz".to_vec();
        page.resize(40, b' ');
        let value = codec.page_value(&page).unwrap();
        let expected = seed * BigUint::from(29u32).pow(40) + value;

        let alphabet = codec.address_alphabet().unwrap();
        let decoded = numeral::decode_unsigned(address.region().as_bytes(), alphabet).unwrap();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_exceeds_alphabet_rejected() {
        let codec = small_codec();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let result = codec.compute_address(b"Hello", Padding::Filler, &mut rng);
        assert!(matches!(
            result,
            Err(Error::Content(ContentError::ExceedsAlphabet { symbol: b'H', .. }))
        ));
    }

    #[test]
    fn test_lenient_normalization() {
        let config = CodecConfig {
            normalization: Normalization::Lenient,
            ..small_config()
        };
        let codec = Codec::new(Arc::new(AlphabetRegistry::standard()), config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let address = codec
            .compute_address(b"Hello, World!", Padding::Filler, &mut rng)
            .unwrap();
        let page = codec.search(&address).unwrap();
        assert!(page.starts_with(b"hello, world "));
    }

    #[test]
    fn test_truncation_mirrors_search() {
        let codec = small_codec();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut content = vec![b'q'];
        content.extend(std::iter::repeat(b'z').take(40));
        let address = codec
            .compute_address(&content, Padding::Random, &mut rng)
            .unwrap();
        assert_eq!(codec.search(&address).unwrap(), vec![b'z'; 40]);
    }

    #[test]
    fn test_arbitrary_region_yields_page() {
        let codec = small_codec();
        for text in ["0:1:1:1:1", "simpleaddress:4:4:4:300", "-zz:2:3:4:5"] {
            let page = codec.search_str(text).unwrap();
            assert_eq!(page.len(), 40);
            assert_eq!(codec.search_str(text).unwrap(), page);
        }
    }

    #[test]
    fn test_search_validates_coordinate() {
        let codec = small_codec();
        let result = codec.search_str("simpleaddress:3322:4:4:300");
        assert!(matches!(
            result,
            Err(Error::Address(AddressError::CoordinateOutOfRange { field: "wall", .. }))
        ));
    }

    #[test]
    fn test_search_rejects_foreign_region_symbol() {
        let codec = small_codec();
        let result = codec.search_str("ABC:1:1:1:1");
        assert!(matches!(
            result,
            Err(Error::Alphabet(AlphabetError::SymbolNotInAlphabet { symbol: b'A', base: 36 }))
        ));
    }

    #[test]
    fn test_min_address_len() {
        let config = CodecConfig {
            max_page_len: 4,
            min_address_len: Some(60),
            ..CodecConfig::default()
        };
        let codec = Codec::new(Arc::new(AlphabetRegistry::standard()), config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let address = codec
            .compute_address(b"ab", Padding::Filler, &mut rng)
            .unwrap();
        assert!(address.region().len() >= 60);
        assert_eq!(codec.search(&address).unwrap(), b"ab  ");
    }

    #[test]
    fn test_binary_codec() {
        let config = CodecConfig {
            max_page_len: 64,
            ..CodecConfig::binary()
        };
        let codec = Codec::new(Arc::new(AlphabetRegistry::standard()), config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(10);

        let content: Vec<u8> = (0..=40u8).chain([0, 0, 255]).collect();
        let address = codec
            .compute_address(&content, Padding::Filler, &mut rng)
            .unwrap();
        let page = codec.search(&address).unwrap();
        assert_eq!(&page[..content.len()], &content[..]);
        assert!(page[content.len()..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_binary_filler_is_zero_byte() {
        let config = CodecConfig {
            max_page_len: 8,
            ..CodecConfig::binary()
        };
        let codec = Codec::new(Arc::new(AlphabetRegistry::standard()), config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let address = codec
            .compute_address(&[9, 9], Padding::Filler, &mut rng)
            .unwrap();
        assert_eq!(codec.search(&address).unwrap(), vec![9, 9, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_rejects_bad_configs() {
        let registry = Arc::new(AlphabetRegistry::standard());

        let unsupported = CodecConfig {
            content_base: 30,
            ..CodecConfig::default()
        };
        assert!(matches!(
            Codec::new(registry.clone(), unsupported),
            Err(Error::Alphabet(AlphabetError::UnsupportedBase { base: 30 }))
        ));

        // Base 29 holds a space, base 256 holds ':' and '-'
        for address_base in [29, 256] {
            let config = CodecConfig {
                address_base,
                ..CodecConfig::default()
            };
            assert!(matches!(
                Codec::new(registry.clone(), config),
                Err(Error::Config(_))
            ));
        }

        let empty_page = CodecConfig {
            max_page_len: 0,
            ..CodecConfig::default()
        };
        assert!(matches!(
            Codec::new(registry.clone(), empty_page),
            Err(Error::Config(_))
        ));

        let bad_bounds = CodecConfig {
            bounds: CoordinateBounds {
                walls: 0,
                ..CoordinateBounds::default()
            },
            ..CodecConfig::default()
        };
        assert!(matches!(
            Codec::new(registry, bad_bounds),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_address_alphabet_with_separator_rejected() {
        let mut registry = AlphabetRegistry::standard();
        registry.register(Alphabet::new(b"01:").unwrap()).unwrap();
        let config = CodecConfig {
            address_base: 3,
            ..CodecConfig::default()
        };
        assert!(matches!(
            Codec::new(Arc::new(registry), config),
            Err(Error::Config(_))
        ));
    }
}
