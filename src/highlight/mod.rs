//! Place-name highlighting
//!
//! Wraps occurrences of place names in trip notes with a clickable marker
//! carrying the place's index:
//!
//! ```text
//! <a href='#' class='place-link' data-place-index='0'>Tokyo Tower</a>
//! ```
//!
//! Matching runs over the entity-decoded notes and collects non-overlapping
//! spans before anything is rendered, so a marker is never nested inside
//! another one. Places are tried longest name first; a place with no exact
//! occurrence falls back to its [`core_names`] candidates.

pub mod core_names;
pub mod entities;

pub use core_names::{core_names, Strategy, GENERIC_WORDS};
pub use entities::{decode_entities, escape_text};

use crate::trip::GeocodedPlace;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Core-name candidates shorter than this are not tried
pub const MIN_FALLBACK_CHARS: usize = 4;

/// A name to look for and the index its marker should carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightPlace {
    pub name: String,
    pub index: usize,
}

impl HighlightPlace {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

/// Claimed byte range of the decoded text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
    index: usize,
}

#[derive(Debug, Default)]
struct Claims {
    spans: Vec<Span>,
}

impl Claims {
    fn overlaps(&self, start: usize, end: usize) -> bool {
        self.spans.iter().any(|s| s.start < end && start < s.end)
    }

    /// Claim every free case-insensitive occurrence of `needle`
    fn claim_all(&mut self, haystack: &str, needle: &str, index: usize) -> usize {
        let re = match RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => re,
            Err(e) => {
                debug!("Skipping unmatchable name '{}': {}", needle, e);
                return 0;
            }
        };

        let mut claimed = 0;
        for m in re.find_iter(haystack) {
            if m.as_str().is_empty() || self.overlaps(m.start(), m.end()) {
                continue;
            }
            self.spans.push(Span {
                start: m.start(),
                end: m.end(),
                index,
            });
            claimed += 1;
        }
        claimed
    }

    fn render(mut self, text: &str) -> String {
        self.spans.sort_by_key(|s| s.start);

        let mut out = String::with_capacity(text.len() + self.spans.len() * 64);
        let mut cursor = 0;
        for span in &self.spans {
            out.push_str(&escape_text(&text[cursor..span.start]));
            out.push_str(&format!(
                "<a href='#' class='place-link' data-place-index='{}'>",
                span.index
            ));
            out.push_str(&escape_text(&text[span.start..span.end]));
            out.push_str("</a>");
            cursor = span.end;
        }
        out.push_str(&escape_text(&text[cursor..]));
        out
    }
}

/// Wrap place names found in `text` with place-link markers
///
/// Blank text or an empty place list returns `text` unchanged. Otherwise the
/// result is HTML: text outside markers is escaped.
pub fn highlight(text: &str, places: &[HighlightPlace]) -> String {
    if text.trim().is_empty() || places.is_empty() {
        return text.to_string();
    }

    let decoded = decode_entities(text);

    let mut ordered: Vec<(String, usize)> = places
        .iter()
        .map(|p| (decode_entities(p.name.trim()).into_owned(), p.index))
        .filter(|(name, _)| !name.trim().is_empty())
        .collect();
    ordered.sort_by_key(|(name, _)| std::cmp::Reverse(name.chars().count()));

    let mut claims = Claims::default();
    for (name, index) in &ordered {
        if claims.claim_all(&decoded, name, *index) > 0 {
            continue;
        }

        let lowered = name.to_lowercase();
        for candidate in core_names(name) {
            if candidate.chars().count() < MIN_FALLBACK_CHARS || candidate.to_lowercase() == lowered
            {
                continue;
            }
            let claimed = claims.claim_all(&decoded, &candidate, *index);
            if claimed > 0 {
                debug!("Matched '{}' via core name '{}'", name, candidate);
            }
        }
    }

    claims.render(&decoded)
}

/// Highlight geocoded places, using each place's position in the slice as
/// its marker index
pub fn highlight_places(text: &str, places: &[GeocodedPlace]) -> String {
    let targets: Vec<HighlightPlace> = places
        .iter()
        .enumerate()
        .map(|(i, p)| HighlightPlace::new(p.name.clone(), i))
        .collect();
    highlight(text, &targets)
}
