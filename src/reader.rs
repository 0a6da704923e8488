use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, BufReader};
use tracing::{debug, info};

/// Buffer size for reading the document (8KB)
const READ_BUFFER_SIZE: usize = 8192;

/// Statistics for the one-time document read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub bytes_read: u64,
    pub duration_ms: u64,
}

/// Read the full document as UTF-8 text.
///
/// The file handle lives only for the duration of this call.
pub async fn read_document<P: AsRef<Path>>(file_path: P) -> Result<(String, ReadStats)> {
    let path = file_path.as_ref();
    let start_time = std::time::Instant::now();

    debug!("Starting read of document: {}", path.display());

    let text = {
        let file = File::open(path)
            .await
            .with_context(|| format!("Failed to open file {}", path.display()))?;

        let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .await
            .with_context(|| format!("Failed to read {} as UTF-8 text", path.display()))?;
        text
    };

    let stats = ReadStats {
        file_path: path.display().to_string(),
        bytes_read: text.len() as u64,
        duration_ms: start_time.elapsed().as_millis() as u64,
    };

    info!(
        "Read {}: {} bytes in {}ms",
        stats.file_path, stats.bytes_read, stats.duration_ms
    );

    Ok((text, stats))
}
