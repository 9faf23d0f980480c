//! Value generators for each column rule.
//!
//! [`generate_value`] is the single interpreter for [`ColumnRule`]; the
//! submodules hold the per-kind sampling logic.

pub mod choice;
pub mod locale_text;
pub mod masked;
pub mod numeric;
pub mod timestamp;

use crate::generator::{GeneratorError, KeyPools};
use fixture_core::{ColumnRule, FixtureValue, KeyRef, Locale};
use rand::Rng;

/// Evaluate one rule once.
///
/// `reference` rules draw from `pools`; a missing or empty pool is an error.
pub fn generate_value<R: Rng>(
    rule: &ColumnRule,
    rng: &mut R,
    locale: Locale,
    pools: &KeyPools,
) -> Result<FixtureValue, GeneratorError> {
    match rule {
        ColumnRule::Constant { value } => Ok(FixtureValue::try_from(value)?),

        ColumnRule::OneOf { values } => choice::generate_one_of(rng, values),

        ColumnRule::Reference {
            table,
            column,
            optional,
        } => {
            let candidates = pools.candidates(&KeyRef::new(table, column))?;
            Ok(choice::generate_reference(rng, candidates, *optional))
        }

        ColumnRule::IntRange { min, max } => Ok(numeric::generate_int_range(rng, *min, *max)),

        ColumnRule::MaskedCode {
            mask,
            digit,
            letter,
        } => Ok(masked::generate_masked_code(rng, mask, *digit, *letter)),

        ColumnRule::Timestamp {
            start_year,
            end_year,
            format,
        } => timestamp::generate_timestamp(rng, *start_year, *end_year, format),

        ColumnRule::Locale(text) => Ok(FixtureValue::Text(
            locale_text::generate_locale_text(rng, locale, text),
        )),
    }
}
