//! Immutable sentence sequence and its fixed-size paragraph view.

use crate::tokenizer::SentenceSplitter;

/// Number of sentences in every paragraph except possibly the last
pub const PARAGRAPH_SIZE: usize = 4;

/// A loaded document, reduced to its ordered sentences.
///
/// Paragraphs are never stored; each is a borrowed slice computed on request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sentences: Vec<String>,
}

impl Document {
    pub fn new(sentences: Vec<String>) -> Self {
        Self { sentences }
    }

    /// Tokenize `text` once into a document
    pub fn from_text<S: SentenceSplitter + ?Sized>(text: &str, splitter: &S) -> Self {
        Self::new(splitter.split_sentences(text))
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// `ceil(sentence_count / PARAGRAPH_SIZE)`
    pub fn paragraph_count(&self) -> usize {
        self.sentences.len().div_ceil(PARAGRAPH_SIZE)
    }

    /// Sentences at positions `[4n, 4n+4)`, clipped to the document.
    /// Indices at or past `paragraph_count()` yield an empty slice.
    pub fn paragraph(&self, index: usize) -> &[String] {
        let Some(start) = index.checked_mul(PARAGRAPH_SIZE) else {
            return &[];
        };
        if start >= self.sentences.len() {
            return &[];
        }
        let end = (start + PARAGRAPH_SIZE).min(self.sentences.len());
        &self.sentences[start..end]
    }

    /// All paragraphs in order
    pub fn paragraphs(&self) -> std::slice::Chunks<'_, String> {
        self.sentences.chunks(PARAGRAPH_SIZE)
    }
}
