//! Sample content generation for the `verify` command.
//!
//! Samples are drawn from the content alphabet only, so every sample is valid
//! input under strict normalisation. They mix a few shapes that stress
//! different parts of the positional arithmetic:
//! - Runs of one symbol (including the zero symbol, which becomes leading
//!   zero digits)
//! - Uniformly random symbols
//! - Short repeating patterns

use babel_core::Alphabet;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `len` symbols of sample content from `alphabet`.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `len`: exact length of the sample
pub fn generate_sample(seed: u64, len: usize, alphabet: &Alphabet) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let symbols = alphabet.symbols();
    let mut data = Vec::with_capacity(len);

    while data.len() < len {
        let run = (len - data.len()).min(rng.gen_range(1..=64));

        match rng.gen_range(0..10u8) {
            // 30% runs of a single symbol, a third of those the zero symbol
            0..=2 => {
                let symbol = if rng.gen_bool(1.0 / 3.0) {
                    alphabet.zero()
                } else {
                    symbols[rng.gen_range(0..symbols.len())]
                };
                data.extend(std::iter::repeat(symbol).take(run));
            }

            // 20% repeating patterns
            3..=4 => {
                let pattern = generate_pattern(&mut rng, symbols);
                data.extend(pattern.iter().cycle().take(run));
            }

            // 50% uniformly random symbols
            _ => {
                data.extend((0..run).map(|_| symbols[rng.gen_range(0..symbols.len())]));
            }
        }
    }

    data
}

/// Generate a small repeating pattern.
fn generate_pattern(rng: &mut ChaCha8Rng, symbols: &[u8]) -> Vec<u8> {
    let pattern_len = rng.gen_range(2..=8);
    (0..pattern_len)
        .map(|_| symbols[rng.gen_range(0..symbols.len())])
        .collect()
}
