//! Locale-aware text generators backed by the `fake` corpus.
//!
//! All fakers are driven through `fake_with_rng`, so the output depends only
//! on the caller's random source and the locale.

use fake::faker::address::raw::{CityName, PostCode, StateName, StreetName};
use fake::faker::internet::raw::Username;
use fake::faker::lorem::raw::{Sentence, Words};
use fake::faker::name::raw::{FirstName, LastName, Name, Title};
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::{Data, EN, FR_FR};
use fake::Fake;
use fixture_core::{Locale, LocaleText};
use rand::seq::SliceRandom;
use rand::Rng;

/// Words per generated sentence.
const SENTENCE_WORDS: std::ops::Range<usize> = 4..10;

/// Generate one text value of the given kind.
pub fn generate_locale_text<R: Rng>(rng: &mut R, locale: Locale, text: &LocaleText) -> String {
    match locale {
        Locale::En => render(EN, text, rng),
        Locale::FrFr => render(FR_FR, text, rng),
    }
}

fn render<L: Data + Copy, R: Rng + ?Sized>(locale: L, text: &LocaleText, rng: &mut R) -> String {
    match text {
        LocaleText::FirstName => FirstName(locale).fake_with_rng(rng),
        LocaleText::LastName => LastName(locale).fake_with_rng(rng),
        LocaleText::FullName => Name(locale).fake_with_rng(rng),
        LocaleText::Title => Title(locale).fake_with_rng(rng),
        LocaleText::Email { domains } => {
            let user: String = Username(locale).fake_with_rng(rng);
            let user = user.to_lowercase();
            match domains.choose(rng) {
                Some(domain) => format!("{user}@{domain}"),
                None => user,
            }
        }
        LocaleText::Telephone => PhoneNumber(locale).fake_with_rng(rng),
        LocaleText::StreetName => StreetName(locale).fake_with_rng(rng),
        LocaleText::City => CityName(locale).fake_with_rng(rng),
        LocaleText::State => StateName(locale).fake_with_rng(rng),
        LocaleText::PostalCode => PostCode(locale).fake_with_rng(rng),
        LocaleText::Words {
            quantity,
            title_case,
        } => {
            let words: Vec<String> = Words(locale, *quantity..*quantity + 1).fake_with_rng(rng);
            if *title_case {
                words
                    .iter()
                    .map(|w| capitalize(w))
                    .collect::<Vec<_>>()
                    .join(" ")
            } else {
                words.join(" ")
            }
        }
        LocaleText::Sentence => Sentence(locale, SENTENCE_WORDS).fake_with_rng(rng),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
