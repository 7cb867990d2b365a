//! Line-oriented output sinks.
//!
//! A sink receives one fully composed line per enabled emission. Writes are
//! synchronous and errors are returned to the emitting caller.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

/// Consumer of composed log lines.
pub trait LineSink: Send + Sync {
    /// Write one line. The sink appends the line terminator.
    fn write_line(&self, line: &str) -> io::Result<()>;
}

impl<S: LineSink + ?Sized> LineSink for Arc<S> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

impl<S: LineSink + ?Sized> LineSink for Box<S> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

/// Writes to the process's standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl LineSink for StdoutSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", line)
    }
}

/// Writes to any `io::Write`, flushing after every line.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> LineSink for WriterSink<W> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        writer.flush()
    }
}

/// Appends lines to a file, creating parent directories as needed.
pub struct FileSink {
    writer: WriterSink<BufWriter<File>>,
    path: PathBuf,
}

impl FileSink {
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            writer: WriterSink::new(BufWriter::new(file)),
            path,
        })
    }

    /// Path to the file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSink for FileSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.writer.write_line(line)
    }
}

/// Collects lines in memory. Mostly useful in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl LineSink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}

/// Forwards lines as `tracing` debug events under the `chandebug` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LineSink for TracingSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        tracing::debug!(target: "chandebug", "{}", line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_sink_collects_lines() {
        let sink = MemorySink::new();
        sink.write_line("first").unwrap();
        sink.write_line("second").unwrap();

        assert_eq!(sink.lines(), vec!["first", "second"]);
        assert_eq!(sink.take().len(), 2);
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_writer_sink_appends_newlines() {
        let sink = WriterSink::new(Vec::new());
        sink.write_line("api hello").unwrap();
        sink.write_line("db ready").unwrap();

        let bytes = sink.into_inner();
        assert_eq!(String::from_utf8(bytes).unwrap(), "api hello\ndb ready\n");
    }

    #[test]
    fn test_file_sink_creates_directories_and_appends() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logs").join("debug.log");

        let sink = FileSink::create(&path).unwrap();
        sink.write_line("first").unwrap();
        drop(sink);

        let sink = FileSink::create(&path).unwrap();
        sink.write_line("second").unwrap();
        assert_eq!(sink.path(), path.as_path());

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_shared_sink_through_arc() {
        let sink = Arc::new(MemorySink::new());
        let boxed: Box<dyn LineSink> = Box::new(Arc::clone(&sink));
        boxed.write_line("shared").unwrap();
        assert_eq!(sink.lines(), vec!["shared"]);
    }
}
