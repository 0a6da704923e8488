// Sentence tokenizer adapter.
// The boundary model is bundled as compiled-in rules, so loading it never touches the network.

use anyhow::Result;
use tracing::info;

pub mod abbreviations;
pub mod dialog;
pub mod normalization;

pub use abbreviations::AbbreviationChecker;
pub use dialog::DialogStateMachine;
pub use normalization::{normalize_sentence, normalize_sentence_into};

/// Anything that can turn document text into an ordered sentence sequence.
///
/// Paragraph numbering depends on the boundary decisions made here, so swapping
/// implementations can shift which sentences land in which paragraph.
pub trait SentenceSplitter {
    /// Split `text` into sentences in document order. Returned sentences are
    /// single-line and non-empty.
    fn split_sentences(&self, text: &str) -> Vec<String>;
}

/// Rule-based sentence tokenizer backed by the dialog state machine
pub struct SentenceTokenizer {
    machine: DialogStateMachine,
}

impl SentenceTokenizer {
    /// Compile the boundary model. Failure here is a startup error.
    pub fn new() -> Result<Self> {
        let machine = DialogStateMachine::new()?;
        info!(
            states = machine.state_count(),
            "Compiled sentence boundary model"
        );
        Ok(Self { machine })
    }

    /// Raw sentence slices borrowed from `text`, trimmed but not normalized
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.machine.detect_sentences(text)
    }

    /// Sentences normalized to a single line each
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let raw = self.split(text);
        let mut buffer = String::new();
        let mut sentences = Vec::with_capacity(raw.len());

        for sentence in raw {
            normalize_sentence_into(sentence, &mut buffer);
            sentences.push(buffer.clone());
        }

        sentences
    }
}

impl SentenceSplitter for SentenceTokenizer {
    fn split_sentences(&self, text: &str) -> Vec<String> {
        self.tokenize(text)
    }
}
