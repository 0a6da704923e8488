// Integration test utilities and common code
// Shared by the library pipeline tests and the binary tests via #[path]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding documents to serve
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Write a text document under the fixture root
    pub fn create_text_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }
}

/// `count` simple sentences on one line: "This is sentence 1. This is sentence 2. ..."
pub fn numbered_text(count: usize) -> String {
    (1..=count)
        .map(|i| format!("This is sentence {i}."))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The sentences `numbered_text(count)` tokenizes into
pub fn numbered_sentences(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("This is sentence {i}.")).collect()
}

/// Join sentences as protocol output lines
pub fn as_lines(sentences: &[String]) -> String {
    sentences.iter().map(|s| format!("{s}\n")).collect()
}
