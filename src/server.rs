// Line-oriented command loop serving paragraphs of a loaded document.
// Single task, one request at a time; the document is only ever borrowed.

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Counters reported when the loop finishes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub commands_handled: u64,
    pub commands_ignored: u64,
    pub commands_rejected: u64,
}

pub struct ParagraphServer<'d> {
    document: &'d Document,
    state: LoopState,
    stats: SessionStats,
}

impl<'d> ParagraphServer<'d> {
    pub fn new(document: &'d Document) -> Self {
        Self {
            document,
            state: LoopState::Running,
            stats: SessionStats::default(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Handle one request line, writing and flushing any response.
    pub async fn handle_line<W>(&mut self, line: &str, out: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                // WHY: a bad index is reported to the caller and the loop keeps running
                warn!(line, error = %err, "Rejected command");
                self.stats.commands_rejected += 1;
                out.write_all(format!("error: {err}\n").as_bytes()).await?;
                out.flush().await?;
                return Ok(());
            }
        };

        debug!(?command, "Dispatching command");

        match command {
            Command::Exit => {
                self.state = LoopState::Stopped;
                self.stats.commands_handled += 1;
            }
            Command::GetParagraphCount => {
                let count = self.document.paragraph_count();
                out.write_all(format!("{count}\n").as_bytes()).await?;
                out.flush().await?;
                self.stats.commands_handled += 1;
            }
            Command::GetParagraph(index) => {
                for sentence in self.document.paragraph(index) {
                    out.write_all(sentence.as_bytes()).await?;
                    out.write_all(b"\n").await?;
                }
                out.flush().await?;
                self.stats.commands_handled += 1;
            }
            Command::Ignored => {
                self.stats.commands_ignored += 1;
            }
        }

        Ok(())
    }

    /// Serve requests from `input` until `exit` or end of stream.
    /// Bytes that are not UTF-8 are replaced, so such a line is ignored rather than fatal.
    pub async fn serve<R, W>(&mut self, mut input: R, mut output: W) -> Result<SessionStats>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(
            sentences = self.document.sentence_count(),
            paragraphs = self.document.paragraph_count(),
            "Serving paragraphs"
        );

        let mut buffer = Vec::new();

        while self.state == LoopState::Running {
            buffer.clear();
            if input.read_until(b'\n', &mut buffer).await? == 0 {
                self.state = LoopState::Stopped;
                break;
            }

            let line = String::from_utf8_lossy(&buffer);
            let line = line.trim_end_matches(&['\n', '\r'][..]);
            self.handle_line(line, &mut output).await?;
        }

        info!(
            handled = self.stats.commands_handled,
            ignored = self.stats.commands_ignored,
            rejected = self.stats.commands_rejected,
            "Command loop finished"
        );

        Ok(self.stats.clone())
    }
}
