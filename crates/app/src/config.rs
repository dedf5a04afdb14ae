//! Configuration for the babel command-line tool.
//!
//! Resolution order, later wins:
//! 1. Built-in defaults (the text deployment, random padding, fresh entropy)
//! 2. An optional TOML file given with `--config`
//! 3. Command-line flags
//!
//! # File Format
//!
//! ```toml
//! random_padding = true
//! seed = 42
//!
//! [codec]
//! content_base = 29
//! address_base = 36
//! max_page_len = 3200
//! normalization = "lenient"
//!
//! [codec.bounds]
//! walls = 4
//! shelves = 5
//! volumes = 32
//! pages = 410
//! ```

use crate::cli::CodecArgs;
use anyhow::{Context, Result};
use babel_core::codec::{BINARY_PAGE_LEN, CodecConfig};
use babel_core::fitter::{self, Normalization, Padding};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use std::path::Path;

/// Where each call's randomness comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seeding {
    /// Fresh OS entropy for every call
    Entropy,
    /// Fixed seed, offset per call so calls stay independent
    Fixed(u64),
    /// Seeded from the content length; same-length contents collide
    ContentLength,
}

impl Seeding {
    /// RNG for call number `call` on content of `content_len` symbols.
    pub fn rng(&self, content_len: usize, call: u64) -> ChaCha8Rng {
        match *self {
            Seeding::Entropy => ChaCha8Rng::from_entropy(),
            Seeding::Fixed(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(call)),
            Seeding::ContentLength => fitter::length_seeded_rng(content_len),
        }
    }
}

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub codec: Option<CodecConfig>,
    pub random_padding: Option<bool>,
    pub seed: Option<u64>,
    pub length_seeded: bool,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }
}

/// Fully resolved configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub codec: CodecConfig,
    pub padding: Padding,
    pub seeding: Seeding,
}

impl Config {
    /// Merge defaults, the optional config file and command-line flags.
    pub fn resolve(args: &CodecArgs, file: Option<&Path>) -> Result<Self> {
        let file = match file {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let mut codec = file.codec.unwrap_or_default();
        if args.binary {
            let binary = CodecConfig::binary();
            codec.content_base = binary.content_base;
            codec.address_base = binary.address_base;
            codec.max_page_len = BINARY_PAGE_LEN;
        }
        if let Some(base) = args.content_base {
            codec.content_base = base;
        }
        if let Some(base) = args.address_base {
            codec.address_base = base;
        }
        if let Some(len) = args.page_len {
            codec.max_page_len = len;
        }
        if let Some(len) = args.min_address_len {
            codec.min_address_len = Some(len);
        }
        if args.lenient {
            codec.normalization = Normalization::Lenient;
        }

        let random_padding = !args.no_random_padding && file.random_padding.unwrap_or(true);

        let seeding = if args.length_seeded {
            Seeding::ContentLength
        } else if let Some(seed) = args.seed {
            Seeding::Fixed(seed)
        } else if file.length_seeded {
            Seeding::ContentLength
        } else if let Some(seed) = file.seed {
            Seeding::Fixed(seed)
        } else {
            Seeding::Entropy
        };

        Ok(Self {
            codec,
            padding: Padding::from_flag(random_padding),
            seeding,
        })
    }

    /// Print the configuration in human-readable form (to stderr, so stdout
    /// only carries addresses and pages).
    pub fn print(&self) {
        eprintln!("=== Configuration ===");
        eprintln!("Content base:   {}", self.codec.content_base);
        eprintln!("Address base:   {}", self.codec.address_base);
        eprintln!("Page length:    {} symbols", self.codec.max_page_len);
        match self.codec.min_address_len {
            Some(len) => eprintln!("Min address:    {len} symbols"),
            None => eprintln!("Min address:    (none)"),
        }
        eprintln!("Normalization:  {:?}", self.codec.normalization);
        eprintln!();
        eprintln!("=== Coordinates ===");
        eprintln!("Walls:   {}", self.codec.bounds.walls);
        eprintln!("Shelves: {}", self.codec.bounds.shelves);
        eprintln!("Volumes: {}", self.codec.bounds.volumes);
        eprintln!("Pages:   {}", self.codec.bounds.pages);
        eprintln!();
        eprintln!("=== Randomness ===");
        eprintln!("Padding: {:?}", self.padding);
        match self.seeding {
            Seeding::Entropy => eprintln!("Seeding: fresh entropy per call"),
            Seeding::Fixed(seed) => eprintln!("Seeding: fixed seed {seed}"),
            Seeding::ContentLength => eprintln!("Seeding: content length (testing only)"),
        }
        eprintln!();
    }
}
