//! Masked code generator.
//!
//! Every `digit` placeholder becomes a random `0-9`, every `letter`
//! placeholder a random `A-Z`, and any other character is kept as is.

use fixture_core::FixtureValue;
use rand::Rng;

/// Generate a code following `mask`.
pub fn generate_masked_code<R: Rng>(
    rng: &mut R,
    mask: &str,
    digit: char,
    letter: char,
) -> FixtureValue {
    let code: String = mask
        .chars()
        .map(|c| {
            if c == digit {
                char::from(b'0' + rng.gen_range(0..10u8))
            } else if c == letter {
                char::from(rng.gen_range(b'A'..=b'Z'))
            } else {
                c
            }
        })
        .collect();

    FixtureValue::Text(code)
}
