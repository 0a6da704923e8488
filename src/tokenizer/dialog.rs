// Dialog-aware sentence boundary detection.
// One compiled regex per scan state; matches drive state transitions and boundary decisions.

use anyhow::Result;
use regex_automata::{meta::Regex, Input};
use std::collections::HashMap;
use tracing::debug;

use super::AbbreviationChecker;

// Compositional pattern components
const SENTENCE_END: &str = r"[.!?]+";
const SEPARATOR: &str = r"\s+";
const SENTENCE_START: &str = r"[\p{Lu}\x22\x27\u{201C}\u{2018}\(\[\{]";
const HARD_BREAK: &str = r"\r?\n[ \t]*\r?\n";
const DIALOG_OPEN: &str = r"[\x22\x27\u{201C}\u{2018}\(\[\{]";
const DIALOG_CLOSE: &str = r"[\x22\x27\u{201D}\u{2019}\)\]\}]";

const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?'];
const CLOSING_DELIMITERS: &[char] = &['"', '\'', '\u{201D}', '\u{2019}', ')', ']', '}'];

/// Kind of quotation or parenthetical the scanner is inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteKind {
    Double,
    Single,
    SmartDouble,
    SmartSingle,
    Round,
    Square,
    Curly,
}

impl QuoteKind {
    pub const ALL: [QuoteKind; 7] = [
        QuoteKind::Double,
        QuoteKind::Single,
        QuoteKind::SmartDouble,
        QuoteKind::SmartSingle,
        QuoteKind::Round,
        QuoteKind::Square,
        QuoteKind::Curly,
    ];

    pub fn from_opener(ch: char) -> Option<Self> {
        match ch {
            '"' => Some(QuoteKind::Double),
            '\'' => Some(QuoteKind::Single),
            '\u{201C}' => Some(QuoteKind::SmartDouble),
            '\u{2018}' => Some(QuoteKind::SmartSingle),
            '(' => Some(QuoteKind::Round),
            '[' => Some(QuoteKind::Square),
            '{' => Some(QuoteKind::Curly),
            _ => None,
        }
    }

    fn closer_pattern(self) -> &'static str {
        match self {
            QuoteKind::Double => r"\x22",
            QuoteKind::Single => r"\x27",
            QuoteKind::SmartDouble => r"\u{201D}",
            QuoteKind::SmartSingle => r"\u{2019}",
            QuoteKind::Round => r"\)",
            QuoteKind::Square => r"\]",
            QuoteKind::Curly => r"\}",
        }
    }

    /// Single-quote closers double as apostrophes ("don't", "don’t").
    fn closer_may_be_apostrophe(self) -> bool {
        matches!(self, QuoteKind::Single | QuoteKind::SmartSingle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanState {
    Narrative,
    Quoted(QuoteKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Sentence end, optional closer, separator, sentence start
    Boundary,
    /// Blank line
    HardBreak,
    DialogOpen(QuoteKind),
    DialogClose,
}

pub struct DialogStateMachine {
    patterns: HashMap<ScanState, Regex>,
    abbreviation_checker: AbbreviationChecker,
}

impl DialogStateMachine {
    pub fn new() -> Result<Self> {
        let mut patterns = HashMap::new();

        // Closers are allowed here for quotations that were never opened
        let narrative_boundary =
            format!("{SENTENCE_END}{DIALOG_CLOSE}*{SEPARATOR}{SENTENCE_START}");
        let narrative_pattern =
            format!("(?:{narrative_boundary})|(?:{HARD_BREAK})|(?:{DIALOG_OPEN})");
        patterns.insert(ScanState::Narrative, Regex::new(&narrative_pattern)?);

        for kind in QuoteKind::ALL {
            let close = kind.closer_pattern();
            let dialog_boundary = format!("{SENTENCE_END}{close}{SEPARATOR}{SENTENCE_START}");
            let dialog_pattern = format!("(?:{dialog_boundary})|(?:{close})|(?:{HARD_BREAK})");
            patterns.insert(ScanState::Quoted(kind), Regex::new(&dialog_pattern)?);
        }

        Ok(Self {
            patterns,
            abbreviation_checker: AbbreviationChecker::new(),
        })
    }

    pub fn state_count(&self) -> usize {
        self.patterns.len()
    }

    /// Split `text` into trimmed sentence slices in document order.
    pub fn detect_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut state = ScanState::Narrative;
        let mut sentence_start = 0;
        let mut cursor = 0;
        let mut quote_opened_at = 0;
        let mut matches_seen = 0usize;

        // A quoted state left at end of text still falls back below
        while cursor < text.len() || matches!(state, ScanState::Quoted(_)) {
            let Some(pattern) = self.patterns.get(&state) else {
                break;
            };
            let Some(found) = pattern.find(Input::new(text).range(cursor..)) else {
                if let ScanState::Quoted(kind) = state {
                    // Never closed: rescan its contents as narrative
                    debug!(?kind, position = quote_opened_at, "Unclosed quotation");
                    state = ScanState::Narrative;
                    cursor = quote_opened_at;
                    continue;
                }
                break;
            };
            matches_seen += 1;

            let (match_start, match_end) = (found.start(), found.end());
            let matched = &text[match_start..match_end];

            match Self::classify_match(matched, state) {
                MatchType::Boundary => {
                    let (separator_start, next_start) = separator_bounds(matched);
                    let sentence_end = match_start + separator_start;
                    let candidate = &text[sentence_start..sentence_end];
                    let following = &text[match_start + next_start..];

                    if self.abbreviation_checker.vetoes_boundary(candidate, following) {
                        // Not a boundary; keep scanning after the punctuation
                        cursor = sentence_end;
                    } else {
                        push_sentence(&mut sentences, candidate);
                        sentence_start = match_start + next_start;
                        cursor = sentence_start;
                    }
                    state = ScanState::Narrative;
                }
                MatchType::HardBreak => {
                    if !joins_across_break(text, match_start) {
                        push_sentence(&mut sentences, &text[sentence_start..match_start]);
                        sentence_start = match_end;
                        state = ScanState::Narrative;
                    }
                    cursor = match_end;
                }
                MatchType::DialogOpen(kind) => {
                    if opens_quotation(text, kind, match_start, match_end) {
                        state = ScanState::Quoted(kind);
                        quote_opened_at = match_end;
                    }
                    cursor = match_end;
                }
                MatchType::DialogClose => {
                    let apostrophe = matches!(state, ScanState::Quoted(kind) if kind.closer_may_be_apostrophe())
                        && follows_word_char(text, match_start)
                        && precedes_word_char(text, match_end);
                    if !apostrophe {
                        state = ScanState::Narrative;
                    }
                    cursor = match_end;
                }
            }
        }

        if sentence_start < text.len() {
            push_sentence(&mut sentences, &text[sentence_start..]);
        }

        debug!(
            matches = matches_seen,
            sentences = sentences.len(),
            "Dialog state machine scan complete"
        );
        sentences
    }

    fn classify_match(matched: &str, state: ScanState) -> MatchType {
        let Some(first) = matched.chars().next() else {
            return MatchType::DialogClose;
        };

        if first == '\r' || first == '\n' {
            return MatchType::HardBreak;
        }
        if TERMINAL_PUNCTUATION.contains(&first) {
            return MatchType::Boundary;
        }

        match state {
            ScanState::Narrative => match QuoteKind::from_opener(first) {
                Some(kind) => MatchType::DialogOpen(kind),
                None => MatchType::Boundary,
            },
            ScanState::Quoted(_) => MatchType::DialogClose,
        }
    }
}

/// Byte offsets within a boundary match where the separator starts and where the next sentence starts.
fn separator_bounds(matched: &str) -> (usize, usize) {
    let separator_start = matched.find(char::is_whitespace).unwrap_or(matched.len());
    let next_start = matched[separator_start..]
        .find(|c: char| !c.is_whitespace())
        .map_or(matched.len(), |offset| separator_start + offset);
    (separator_start, next_start)
}

/// A blank line continues the sentence unless terminal punctuation or a closer precedes it.
fn joins_across_break(text: &str, break_start: usize) -> bool {
    match text[..break_start].trim_end().chars().next_back() {
        Some(ch) => !(TERMINAL_PUNCTUATION.contains(&ch) || CLOSING_DELIMITERS.contains(&ch)),
        None => false,
    }
}

/// An opener must lead into a word. A straight quote glued to the word before it
/// is an apostrophe or a unit mark (`5"`), and `'` before a lowercase letter or
/// digit is an elision (`'em`, `'90s`).
fn opens_quotation(text: &str, kind: QuoteKind, start: usize, end: usize) -> bool {
    let Some(next) = text[end..].chars().next() else {
        return false;
    };
    if next.is_whitespace() {
        return false;
    }

    match kind {
        QuoteKind::Double | QuoteKind::Single if follows_word_char(text, start) => false,
        QuoteKind::Single => !(next.is_lowercase() || next.is_numeric()),
        _ => true,
    }
}

fn follows_word_char(text: &str, pos: usize) -> bool {
    text[..pos].chars().next_back().is_some_and(char::is_alphanumeric)
}

fn precedes_word_char(text: &str, pos: usize) -> bool {
    text[pos..].chars().next().is_some_and(char::is_alphanumeric)
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, raw: &'a str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    static SHARED_MACHINE: OnceLock<DialogStateMachine> = OnceLock::new();

    fn get_machine() -> &'static DialogStateMachine {
        SHARED_MACHINE.get_or_init(|| DialogStateMachine::new().unwrap())
    }

    #[test]
    fn test_compiles_one_pattern_per_state() {
        assert_eq!(get_machine().state_count(), 1 + QuoteKind::ALL.len());
    }

    #[test]
    fn test_classify_match() {
        assert_eq!(DialogStateMachine::classify_match(". T", ScanState::Narrative), MatchType::Boundary);
        assert_eq!(DialogStateMachine::classify_match("\n\n", ScanState::Narrative), MatchType::HardBreak);
        assert_eq!(DialogStateMachine::classify_match("\r\n\r\n", ScanState::Narrative), MatchType::HardBreak);
        assert_eq!(
            DialogStateMachine::classify_match("\u{201C}", ScanState::Narrative),
            MatchType::DialogOpen(QuoteKind::SmartDouble)
        );
        assert_eq!(
            DialogStateMachine::classify_match(")", ScanState::Quoted(QuoteKind::Round)),
            MatchType::DialogClose
        );
        assert_eq!(
            DialogStateMachine::classify_match("!\" T", ScanState::Quoted(QuoteKind::Double)),
            MatchType::Boundary
        );
    }

    #[test]
    fn test_separator_bounds() {
        assert_eq!(separator_bounds(". T"), (1, 2));
        assert_eq!(separator_bounds("?\"  \"T"), (2, 4));
        assert_eq!(separator_bounds(".\r\n\r\nT"), (1, 5));
    }

    #[test]
    fn test_joins_across_break() {
        assert!(joins_across_break("to hear:\n\n", 8));
        assert!(joins_across_break("CHAPTER I\n\n", 9));
        assert!(!joins_across_break("The end.\n\n", 8));
        assert!(!joins_across_break("\"Go!\"  \n\n", 7));
        assert!(!joins_across_break("\n\n", 0));
    }

    #[test]
    fn test_slices_borrow_from_source() {
        let text = "Hello world. This is a test.";
        let sentences = get_machine().detect_sentences(text);

        assert_eq!(sentences, vec!["Hello world.", "This is a test."]);
        let range = text.as_bytes().as_ptr_range();
        for sentence in sentences {
            assert!(range.contains(&sentence.as_ptr()));
        }
    }

    #[test]
    fn test_boundary_requires_capitalized_start() {
        let sentences = get_machine().detect_sentences("It was 5 p.m. and late. Then we left.");
        assert_eq!(sentences, vec!["It was 5 p.m. and late.", "Then we left."]);
    }

    #[test]
    fn test_apostrophes_do_not_open_quotes() {
        let text = "The hermit's scroll was old. It didn't matter. Not much.";
        let sentences = get_machine().detect_sentences(text);
        assert_eq!(
            sentences,
            vec!["The hermit's scroll was old.", "It didn't matter.", "Not much."]
        );
    }

    #[test]
    fn test_apostrophe_inside_single_quote_dialog() {
        let text = "He said, 'I don't know.' Then he left.";
        let sentences = get_machine().detect_sentences(text);
        assert_eq!(sentences, vec!["He said, 'I don't know.'", "Then he left."]);
    }

    #[test]
    fn test_opening_quote_after_boundary_still_opens_dialog() {
        let text = "She waited. \"Come in, sir. Sit down,\" she said. He sat.";
        let sentences = get_machine().detect_sentences(text);
        assert_eq!(
            sentences,
            vec!["She waited.", "\"Come in, sir. Sit down,\" she said.", "He sat."]
        );
    }

    #[test]
    fn test_abbreviation_before_quote_closes_dialog() {
        let text = "He shouted \"Dr.\" Smith turned around. Nobody else did.";
        let sentences = get_machine().detect_sentences(text);
        assert_eq!(
            sentences,
            vec!["He shouted \"Dr.\" Smith turned around.", "Nobody else did."]
        );
    }

    #[test]
    fn test_opens_quotation() {
        assert!(opens_quotation("\"Hi", QuoteKind::Double, 0, 1));
        assert!(opens_quotation("said 'I", QuoteKind::Single, 5, 6));
        assert!(!opens_quotation("a 5\" screen", QuoteKind::Double, 3, 4));
        assert!(!opens_quotation("Give 'em", QuoteKind::Single, 5, 6));
        assert!(!opens_quotation("the '90s", QuoteKind::Single, 4, 5));
        assert!(!opens_quotation("end.\" Next", QuoteKind::Double, 4, 5));
        assert!(!opens_quotation("trailing \"", QuoteKind::Double, 9, 10));
    }

    #[test]
    fn test_unclosed_quote_falls_back_to_narrative() {
        let text = "He said \"Wait. Then he ran. She followed.";
        let sentences = get_machine().detect_sentences(text);
        assert_eq!(sentences, vec!["He said \"Wait.", "Then he ran.", "She followed."]);

        let trailing_break = "He said \"Wait. Then we ran:\n\n";
        let sentences = get_machine().detect_sentences(trailing_break);
        assert_eq!(sentences, vec!["He said \"Wait.", "Then we ran:"]);
    }

    #[test]
    fn test_closer_without_opener_still_ends_sentence() {
        let text = "He said, 'hello there.' She left.";
        let sentences = get_machine().detect_sentences(text);
        assert_eq!(sentences, vec!["He said, 'hello there.'", "She left."]);
    }

    #[test]
    fn test_unclosed_quote_resets_at_paragraph_break() {
        let text = "\"It was long ago. We were young.\n\nThe war came. It ended.";
        let sentences = get_machine().detect_sentences(text);
        assert_eq!(
            sentences,
            vec![
                "\"It was long ago. We were young.",
                "The war came.",
                "It ended.",
            ]
        );
    }
}
