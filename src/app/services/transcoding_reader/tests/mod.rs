//! Test utilities for the transcoding reader

use std::io::{self, Read};

use super::TranscodingReader;

// Test modules
mod reader_tests;

/// Reader yielding its data, then failing with the given error kind
pub struct FailingReader {
    data: Vec<u8>,
    pos: usize,
    kind: io::ErrorKind,
}

impl FailingReader {
    pub fn new(data: &[u8], kind: io::ErrorKind) -> Self {
        Self {
            data: data.to_vec(),
            pos: 0,
            kind,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos < self.data.len() {
            let n = buf.len().min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        } else {
            Err(io::Error::new(self.kind, "simulated read failure"))
        }
    }
}

/// Reader that reports `Interrupted` before every successful read
pub struct InterruptingReader<R> {
    inner: R,
    interrupt_next: bool,
}

impl<R: Read> InterruptingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            interrupt_next: true,
        }
    }
}

impl<R: Read> Read for InterruptingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt_next {
            self.interrupt_next = false;
            return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
        }
        self.interrupt_next = true;
        self.inner.read(buf)
    }
}

/// Decode a whole byte slice from Windows-1252 through the reader
pub fn transcode_all(bytes: &[u8]) -> String {
    let mut reader = TranscodingReader::new(bytes, encoding_rs::WINDOWS_1252);
    let mut out = String::new();
    reader.read_to_string(&mut out).unwrap();
    out
}
