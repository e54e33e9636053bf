use std::io::{self, BufWriter, Write};

use crate::error::Result;

/// Receiver of generated queries, one fully formed URL per call.
pub trait Sink {
    fn emit(&mut self, line: &str) -> Result<()>;

    /// Called once after the last line of a run.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collects lines in memory.
impl Sink for Vec<String> {
    fn emit(&mut self, line: &str) -> Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

/// Writes one line per URL through a buffered writer.
pub struct WriterSink<W: Write> {
    writer: BufWriter<W>,
    lines: usize,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            lines: 0,
        }
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|err| err.into_error())
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn emit(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")?;
        self.lines += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
