//! Output sinks: where rendered text goes.
//!
//! The renderer only needs two operations, `write` and `write_line`. Each
//! sink decides what a "line" means for its destination.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use console::Term;
use tracing::{info, warn};

/// Destination for rendered text.
pub trait OutputSink {
    /// Write `text` without a line terminator.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Write `text` followed by a line terminator.
    fn write_line(&mut self, text: &str) -> io::Result<()>;
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn write(&mut self, text: &str) -> io::Result<()> {
        (**self).write(text)
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        (**self).write_line(text)
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn write(&mut self, text: &str) -> io::Result<()> {
        (**self).write(text)
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        (**self).write_line(text)
    }
}

/// Echoes everything to standard output immediately.
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    term: Term,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for ConsoleSink {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.term.write_str(text)
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.term.write_line(text)
    }
}

/// Appends to a file, one write and flush per completed line.
///
/// The file is created when the sink is built; an existing file is kept
/// and appended to.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: File,
    pending: String,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let existed = path.exists();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        if existed {
            warn!(path = %path.display(), "Output file already exists, appending");
        } else {
            info!(path = %path.display(), "Output file created");
        }

        Ok(Self {
            path,
            file,
            pending: String::new(),
        })
    }

    /// Path of the target file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.pending.push_str(text);
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.pending.push_str(text);
        self.pending.push('\n');
        self.file.write_all(self.pending.as_bytes())?;
        self.file.flush()?;
        self.pending.clear();
        Ok(())
    }
}

/// Turns every completed line into one `info` log event.
#[derive(Debug, Default)]
pub struct LogSink {
    pending: String,
    lines: Vec<String>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines logged so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn emit(&mut self) {
        let line = std::mem::take(&mut self.pending);
        info!(target: "dbprint::table", "{line}");
        self.lines.push(line);
    }
}

impl OutputSink for LogSink {
    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            self.pending.push_str(first);
        }
        for part in parts {
            self.emit();
            self.pending.push_str(part);
        }
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.emit();
        Ok(())
    }
}

/// Collects all output in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferSink {
    buffer: String,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Take the collected text.
    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl OutputSink for BufferSink {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.buffer.push_str(text);
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.buffer.push_str(text);
        self.buffer.push('\n');
        Ok(())
    }
}
