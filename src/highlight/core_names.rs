//! Core-name candidates for fuzzy place matching
//!
//! A place called "Hamarikyu Garden" is often written differently in the
//! notes ("jardin Hamarikyu"). Each [`Strategy`] derives shorter variants of
//! the name; [`core_names`] runs them all and cleans up the result.

use regex::Regex;
use std::sync::OnceLock;

/// Words too generic to highlight on their own
pub const GENERIC_WORDS: [&str; 16] = [
    "Garden",
    "Museum",
    "Temple",
    "Market",
    "Street",
    "Shrine",
    "Park",
    "Castle",
    "Palace",
    "Tower",
    "Station",
    "Hotel",
    "Restaurant",
    "Bar",
    "Cafe",
    "Scramble",
];

/// Candidates shorter than this are discarded
pub const MIN_CANDIDATE_CHARS: usize = 3;

/// A way of deriving match candidates from a place name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The name itself
    FullName,
    /// The name minus one trailing generic word ("Hamarikyu Garden" → "Hamarikyu")
    StripGenericSuffix,
    /// Hyphenated compounds ("Edo-Tokyo", "Senso-ji")
    HyphenCompound,
    /// Capitalised words of three or more letters, generic words excluded
    CapitalizedWord,
    /// A capitalised word followed by another capitalised word
    CapitalizedPair,
}

impl Strategy {
    /// All strategies, in the order their candidates are collected
    pub const ALL: [Strategy; 5] = [
        Strategy::FullName,
        Strategy::StripGenericSuffix,
        Strategy::HyphenCompound,
        Strategy::CapitalizedWord,
        Strategy::CapitalizedPair,
    ];

    pub fn candidates(&self, name: &str) -> Vec<String> {
        match self {
            Self::FullName => vec![name.to_string()],
            Self::StripGenericSuffix => {
                let stripped = generic_suffix_re().replace(name, "");
                if stripped != name {
                    vec![stripped.into_owned()]
                } else {
                    Vec::new()
                }
            }
            Self::HyphenCompound => hyphen_compound_re()
                .find_iter(name)
                .map(|m| m.as_str().to_string())
                .collect(),
            Self::CapitalizedWord => capitalized_word_re()
                .find_iter(name)
                .map(|m| m.as_str())
                .filter(|word| !GENERIC_WORDS.contains(word))
                .map(str::to_string)
                .collect(),
            Self::CapitalizedPair => {
                let words: Vec<&str> = name.split_whitespace().collect();
                words
                    .windows(2)
                    .filter(|pair| {
                        capitalized_token_re().is_match(pair[0])
                            && pair[1].chars().next().is_some_and(char::is_uppercase)
                    })
                    .map(|pair| format!("{} {}", pair[0], pair[1]))
                    .collect()
            }
        }
    }
}

fn generic_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"(?i)\s+(?:{})$", GENERIC_WORDS.join("|")))
            .expect("generic suffix pattern")
    })
}

fn hyphen_compound_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\p{L}\p{L}+-\p{L}\p{L}+")
            .expect("hyphen compound pattern")
    })
}

fn capitalized_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b\p{Lu}\p{Ll}{2,}\b")
            .expect("capitalized word pattern")
    })
}

fn capitalized_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\p{Lu}\p{Ll}{2,}$")
            .expect("capitalized token pattern")
    })
}

fn is_standalone_generic(candidate: &str) -> bool {
    !candidate.contains(' ')
        && !candidate.contains('-')
        && GENERIC_WORDS
            .iter()
            .any(|word| word.eq_ignore_ascii_case(candidate))
}

/// Every candidate for `name`, deduplicated, longest first
pub fn core_names(name: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for strategy in Strategy::ALL {
        for candidate in strategy.candidates(name) {
            if !names.contains(&candidate) {
                names.push(candidate);
            }
        }
    }

    names.retain(|n| n.chars().count() >= MIN_CANDIDATE_CHARS && !is_standalone_generic(n));
    names.sort_by_key(|n| std::cmp::Reverse(n.chars().count()));
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_generic_suffix() {
        assert_eq!(
            Strategy::StripGenericSuffix.candidates("Hamarikyu Garden"),
            vec!["Hamarikyu"]
        );
        assert_eq!(
            Strategy::StripGenericSuffix.candidates("Meiji jingu shrine"),
            vec!["Meiji jingu"]
        );
        assert!(Strategy::StripGenericSuffix
            .candidates("Garden of Eden")
            .is_empty());
    }

    #[test]
    fn test_hyphen_compounds() {
        assert_eq!(
            Strategy::HyphenCompound.candidates("Edo-Tokyo Museum"),
            vec!["Edo-Tokyo"]
        );
        assert_eq!(Strategy::HyphenCompound.candidates("Senso-ji"), vec!["Senso-ji"]);
        assert_eq!(
            Strategy::HyphenCompound.candidates("Café-Restaurant Étoile"),
            vec!["Café-Restaurant"]
        );
    }

    #[test]
    fn test_capitalized_words_skip_generic() {
        assert_eq!(
            Strategy::CapitalizedWord.candidates("Tsukiji Outer Market"),
            vec!["Tsukiji", "Outer"]
        );
        assert_eq!(
            Strategy::CapitalizedWord.candidates("Château de Vincennes"),
            vec!["Château", "Vincennes"]
        );
    }

    #[test]
    fn test_capitalized_pairs() {
        assert_eq!(
            Strategy::CapitalizedPair.candidates("Shibuya Scramble Crossing"),
            vec!["Shibuya Scramble", "Scramble Crossing"]
        );
        assert!(Strategy::CapitalizedPair
            .candidates("Arc de Triomphe")
            .is_empty());
    }

    #[test]
    fn test_core_names_ordering_and_filtering() {
        let names = core_names("Hamarikyu Garden");
        assert_eq!(names, vec!["Hamarikyu Garden", "Hamarikyu"]);

        // "Tower" alone is generic; "Tokyo Tower" survives as a pair
        let names = core_names("Tokyo Tower");
        assert!(names.contains(&"Tokyo".to_string()));
        assert!(!names.contains(&"Tower".to_string()));
        assert_eq!(names[0], "Tokyo Tower");
    }

    #[test]
    fn test_core_names_dedup_and_min_length() {
        let names = core_names("Ueno Ueno");
        assert_eq!(names.iter().filter(|n| *n == "Ueno").count(), 1);
        assert!(core_names("Ab").is_empty());
    }

    #[test]
    fn test_generic_rejection_is_case_insensitive() {
        assert!(is_standalone_generic("museum"));
        assert!(!is_standalone_generic("Museum Island"));
        assert!(!is_standalone_generic("Park-Hyatt"));
    }
}
