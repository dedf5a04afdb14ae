//! Command-line interface definition.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "babel")]
#[command(version, about = "Find the address of any page of content, or the page at any address")]
pub struct Cli {
    /// TOML file with codec defaults (flags override it)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the resolved configuration to stderr
    #[arg(long, global = true)]
    pub print_config: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub codec: CodecArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for the codec and randomness configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct CodecArgs {
    /// Raw bytes with base64 addresses (base 256 content, 100000-byte pages)
    #[arg(long, global = true)]
    pub binary: bool,

    /// Base of the content alphabet
    #[arg(long, global = true, value_name = "BASE")]
    pub content_base: Option<usize>,

    /// Base of the address alphabet
    #[arg(long, global = true, value_name = "BASE")]
    pub address_base: Option<usize>,

    /// Page length in content symbols
    #[arg(long, global = true, value_name = "N")]
    pub page_len: Option<usize>,

    /// Lift short address regions to at least this many symbols
    #[arg(long, global = true, value_name = "N")]
    pub min_address_len: Option<usize>,

    /// Lowercase content and drop symbols outside the content alphabet
    #[arg(long, global = true)]
    pub lenient: bool,

    /// Pad short content with the filler symbol instead of random symbols
    #[arg(long, global = true)]
    pub no_random_padding: bool,

    /// Seed for all randomness (deterministic addresses)
    #[arg(long, global = true, conflicts_with = "length_seeded")]
    pub seed: Option<u64>,

    /// Seed padding and coordinates from the content length (testing only)
    #[arg(long, global = true)]
    pub length_seeded: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the address of some content
    Address {
        /// Content given inline
        #[arg(short, long, conflicts_with = "input")]
        text: Option<String>,

        /// Read content from a file (default: stdin)
        #[arg(short, long, value_name = "PATH")]
        input: Option<PathBuf>,
    },

    /// Recompute the page stored at an address
    Search {
        /// The address (default: read from --input or stdin)
        address: Option<String>,

        /// Read the address from a file
        #[arg(short, long, value_name = "PATH", conflicts_with = "address")]
        input: Option<PathBuf>,

        /// Write the page to a file (default: stdout)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Round-trip generated sample content and check the results
    Verify {
        /// Number of samples
        #[arg(long, default_value_t = 8)]
        samples: usize,

        /// Sample length in symbols (default: a quarter page)
        #[arg(long, value_name = "N")]
        len: Option<usize>,
    },

    /// List the registered alphabets
    Alphabets,
}
