pub mod command;
pub mod document;
pub mod reader;
pub mod server;
pub mod tokenizer;

// Re-export main types for convenient access
pub use command::{Command, CommandError};
pub use document::{Document, PARAGRAPH_SIZE};
pub use server::{LoopState, ParagraphServer, SessionStats};
pub use tokenizer::{SentenceSplitter, SentenceTokenizer};
