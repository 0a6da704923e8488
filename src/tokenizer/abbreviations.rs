// Abbreviation vetoes for sentence boundaries.
// A candidate boundary whose sentence ends in one of these is not a boundary.

use std::collections::HashSet;

/// Titles that precede a proper noun, as in "Dr. Smith" or "Mrs. Johnson".
pub const TITLE_ABBREVIATIONS: &[&str] = &[
    "Mr.", "Mrs.", "Ms.", "Dr.", "Prof.", "Sr.", "Jr.", "St.",
];

/// Abbreviations that always continue into the next word.
pub const JOINING_ABBREVIATIONS: &[&str] = &["vs.", "e.g.", "i.e.", "cf."];

/// Words that commonly open a sentence. A single capital letter followed by one
/// of these is a standalone letter ("saw A. It was"), not an initial.
pub const SENTENCE_OPENERS: &[&str] = &[
    "A", "An", "And", "As", "At", "But", "He", "Her", "His", "I", "If", "In", "It", "Its",
    "My", "No", "Now", "On", "Our", "She", "So", "That", "The", "Their", "Then", "There",
    "These", "They", "This", "Those", "We", "What", "When", "Yet", "You",
];

const QUOTE_CHARS: &[char] = &[
    '"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '(', '[', '{',
];

/// Lookup for words that end in a period without ending the sentence
pub struct AbbreviationChecker {
    abbreviations: HashSet<&'static str>,
}

impl AbbreviationChecker {
    pub fn new() -> Self {
        Self {
            abbreviations: TITLE_ABBREVIATIONS
                .iter()
                .chain(JOINING_ABBREVIATIONS)
                .copied()
                .collect(),
        }
    }

    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(word)
    }

    /// Single capital letter followed by a period, as in "J. R. R. Tolkien".
    /// The pronoun "I." is never an initial.
    pub fn is_initial(word: &str) -> bool {
        let mut chars = word.chars();
        matches!(
            (chars.next(), chars.next(), chars.next()),
            (Some(letter), Some('.'), None) if letter.is_uppercase() && letter != 'I'
        )
    }

    /// Check whether the last word of `text` is a listed abbreviation.
    /// Quotes and brackets around the word are ignored.
    pub fn ends_with_abbreviation(&self, text: &str) -> bool {
        last_word(text).is_some_and(|word| self.is_abbreviation(word))
    }

    pub fn ends_with_initial(text: &str) -> bool {
        last_word(text).is_some_and(Self::is_initial)
    }

    /// Decide whether a candidate boundary between `text` and `following` is vetoed.
    /// Listed abbreviations always veto. An initial vetoes unless `following`
    /// opens with a common sentence opener.
    pub fn vetoes_boundary(&self, text: &str, following: &str) -> bool {
        self.ends_with_abbreviation(text)
            || (Self::ends_with_initial(text) && !starts_with_sentence_opener(following))
    }
}

fn last_word(text: &str) -> Option<&str> {
    text.split_whitespace()
        .last()
        .map(|word| word.trim_matches(|c: char| QUOTE_CHARS.contains(&c)))
}

fn starts_with_sentence_opener(text: &str) -> bool {
    let Some(word) = text.split_whitespace().next() else {
        return false;
    };
    let word = word.trim_start_matches(|c: char| QUOTE_CHARS.contains(&c));
    if AbbreviationChecker::is_initial(word) {
        return false;
    }
    let head = word.split(|c: char| !c.is_alphabetic()).next().unwrap_or(word);
    SENTENCE_OPENERS.contains(&head)
}

impl Default for AbbreviationChecker {
    fn default() -> Self {
        Self::new()
    }
}
