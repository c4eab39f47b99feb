use once_cell::sync::Lazy;
use regex::Regex;

use super::location::Location;
use super::phonology::{extract_trailing_particle, Particle};

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[가-힣A-Za-z0-9]+").expect("valid token regex"));

/// One matched token, ready for grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub matched_chunk: String,
    pub replacement_chunk: String,
    pub particle: Option<Particle>,
    pub location: Location,
}

/// Split text into runs of Hangul syllables, Latin letters and digits.
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Find every token of `text` that contains `find_word`.
///
/// The matched chunk runs from the start of the token to the end of the last
/// occurrence of `find_word`. What follows is taken as the particle when it
/// is exactly one of the recognised particles; any other tail is left alone
/// and does not appear in the clause.
pub fn find_occurrences(
    text: &str,
    location: &Location,
    find_word: &str,
    replace_word: &str,
) -> Vec<Occurrence> {
    if find_word.is_empty() {
        return Vec::new();
    }

    tokenize(text)
        .into_iter()
        .filter_map(|token| {
            let end = token.rfind(find_word)? + find_word.len();
            let (chunk, particle) = match extract_trailing_particle(token, find_word) {
                (chunk, Some(particle)) if chunk.len() == end => (chunk, Some(particle)),
                _ => (&token[..end], None),
            };

            Some(Occurrence {
                matched_chunk: chunk.to_string(),
                replacement_chunk: chunk.replace(find_word, replace_word),
                particle,
                location: location.clone(),
            })
        })
        .collect()
}
