//! Streaming decoder over an arbitrary byte source

use std::io::{self, Read};

use encoding_rs::{CoderResult, Decoder, Encoding};
use tracing::debug;

use crate::constants::TRANSCODE_BUFFER_SIZE;

/// Reader that decodes a legacy-encoded byte stream into UTF-8
///
/// Single-byte codepages define all 256 byte values, so decoding never
/// fails on content; the only errors are those of the inner reader.
/// ASCII bytes (delimiters, quotes, newlines) map to themselves.
pub struct TranscodingReader<R> {
    inner: R,
    decoder: Decoder,
    encoding: &'static Encoding,
    input: Vec<u8>,
    input_pos: usize,
    input_len: usize,
    output: Vec<u8>,
    output_pos: usize,
    output_len: usize,
    eof: bool,
    finished: bool,
    bytes_consumed: u64,
}

impl<R: Read> TranscodingReader<R> {
    /// Wrap a byte source encoded in `encoding`
    pub fn new(inner: R, encoding: &'static Encoding) -> Self {
        Self::with_capacity(inner, encoding, TRANSCODE_BUFFER_SIZE)
    }

    /// Wrap a byte source with a custom read buffer size
    pub fn with_capacity(inner: R, encoding: &'static Encoding, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        debug!(
            "Transcoding from {} with {} byte buffer",
            encoding.name(),
            capacity
        );
        Self {
            inner,
            decoder: encoding.new_decoder_without_bom_handling(),
            encoding,
            input: vec![0; capacity],
            input_pos: 0,
            input_len: 0,
            // Every single-byte code point fits in 3 UTF-8 bytes
            output: vec![0; capacity * 3 + 4],
            output_pos: 0,
            output_len: 0,
            eof: false,
            finished: false,
            bytes_consumed: 0,
        }
    }

    /// Source encoding
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Raw bytes pulled from the inner reader so far
    pub fn bytes_consumed(&self) -> u64 {
        self.bytes_consumed
    }

    /// Recover the inner reader
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill_input(&mut self) -> io::Result<()> {
        loop {
            match self.inner.read(&mut self.input) {
                Ok(n) => {
                    self.input_pos = 0;
                    self.input_len = n;
                    self.bytes_consumed += n as u64;
                    if n == 0 {
                        self.eof = true;
                    }
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn decode_pending(&mut self) -> io::Result<()> {
        if self.input_pos == self.input_len && !self.eof {
            self.fill_input()?;
        }

        let last = self.eof;
        let (result, read, written, _) = self.decoder.decode_to_utf8(
            &self.input[self.input_pos..self.input_len],
            &mut self.output,
            last,
        );
        self.input_pos += read;
        self.output_pos = 0;
        self.output_len = written;

        if last && result == CoderResult::InputEmpty {
            self.finished = true;
        }
        Ok(())
    }
}

impl<R: Read> Read for TranscodingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            if self.output_pos < self.output_len {
                let n = buf.len().min(self.output_len - self.output_pos);
                buf[..n].copy_from_slice(&self.output[self.output_pos..self.output_pos + n]);
                self.output_pos += n;
                return Ok(n);
            }
            if self.finished {
                return Ok(0);
            }
            self.decode_pending()?;
        }
    }
}
