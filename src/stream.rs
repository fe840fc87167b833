//! Byte-stream plumbing: copies, limits, tees and positional reads.

use crate::error::Result;
use std::io::{self, ErrorKind, Read, Write};
use tracing::debug;

const DEFAULT_BUF_SIZE: usize = 8 * 1024;

/// Copies `reader` into `writer` until EOF and returns the byte count.
pub fn copy<R, W>(reader: &mut R, writer: &mut W) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let written = io::copy(reader, writer)?;
    debug!(written, "copy finished");
    Ok(written)
}

/// Like [`copy`], but stages every chunk through `buf`.
///
/// An empty `buf` falls back to an internally allocated one.
pub fn copy_buffer<R, W>(reader: &mut R, writer: &mut W, buf: &mut [u8]) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    if buf.is_empty() {
        let mut fallback = vec![0u8; DEFAULT_BUF_SIZE];
        return copy_buffer(reader, writer, &mut fallback);
    }

    let mut written = 0u64;
    loop {
        let n = match reader.read(buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        writer.write_all(&buf[..n])?;
        written += n as u64;
    }
    debug!(written, buf_len = buf.len(), "buffered copy finished");
    Ok(written)
}

/// Copies exactly `n` bytes, failing with `UnexpectedEof` if the reader runs dry.
pub fn copy_n<R, W>(reader: &mut R, writer: &mut W, n: u64) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let written = io::copy(&mut reader.take(n), writer)?;
    if written < n {
        return Err(io::Error::new(
            ErrorKind::UnexpectedEof,
            format!("copied {} of {} bytes", written, n),
        )
        .into());
    }
    Ok(written)
}

/// A reader that yields at most `n` bytes of `reader`.
pub fn limit_reader<R: Read>(reader: R, n: u64) -> io::Take<R> {
    reader.take(n)
}

/// Drains `reader` into memory.
pub fn read_all<R: Read + ?Sized>(reader: &mut R) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    reader.read_to_end(&mut out)?;
    Ok(out)
}

/// Writes everything it reads to a side writer before handing it back.
///
/// There is no internal buffering: a failed side write turns into a read error.
pub struct TeeReader<R, W> {
    reader: R,
    writer: W,
}

impl<R: Read, W: Write> TeeReader<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: Read, W: Write> Read for TeeReader<R, W> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        if n > 0 {
            self.writer.write_all(&buf[..n])?;
        }
        Ok(n)
    }
}

/// In-memory reader over a string with positional reads that leave the
/// cursor alone.
#[derive(Debug, Clone)]
pub struct StringReader {
    data: Vec<u8>,
    pos: usize,
}

impl StringReader {
    pub fn new(s: impl Into<String>) -> Self {
        Self {
            data: s.into().into_bytes(),
            pos: 0,
        }
    }

    /// Bytes not yet consumed by `read`.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Reads from absolute `offset` without moving the cursor.
    ///
    /// Returns a short count near the end and `0` past it.
    pub fn read_at(&self, buf: &mut [u8], offset: u64) -> usize {
        let Ok(start) = usize::try_from(offset) else {
            return 0;
        };
        if start >= self.data.len() {
            return 0;
        }
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        n
    }

    /// Fills `buf` from `offset`, or fails with `UnexpectedEof`.
    pub fn read_exact_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()> {
        let n = self.read_at(buf, offset);
        if n < buf.len() {
            return Err(io::Error::new(
                ErrorKind::UnexpectedEof,
                format!("read {} of {} bytes at offset {}", n, buf.len(), offset),
            ));
        }
        Ok(())
    }
}

impl Read for StringReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.remaining());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// A sink that can pull its input straight from a reader.
pub trait ReadFrom {
    fn read_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<u64>;
}

/// Forwards whatever it reads to the wrapped writer.
#[derive(Debug)]
pub struct WriterAdapter<W> {
    inner: W,
}

impl<W: Write> WriterAdapter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ReadFrom for WriterAdapter<W> {
    fn read_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<u64> {
        copy(reader, &mut self.inner)
    }
}

/// Remembers only the chunk passed to the most recent `write`.
#[derive(Debug, Default)]
pub struct LastChunkWriter {
    content: Vec<u8>,
}

impl LastChunkWriter {
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

impl Write for LastChunkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.content = buf.to_vec();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Walks a [`StringReader`] through positional reads interleaved with
/// cursor-moving copies. Each snapshot is written to `out` as `b: [..]` when
/// taken, alongside the copied text.
///
/// Returns every `read_at` snapshot taken along the way.
pub fn read_at_walkthrough<W: Write + ?Sized>(out: &mut W) -> Result<Vec<[u8; 3]>> {
    let mut reader = StringReader::new("Something provided to be read...\n");
    let mut snapshots = Vec::new();
    let mut snapshot = |reader: &StringReader, out: &mut W| -> Result<()> {
        let mut b = [0u8; 3];
        reader.read_exact_at(&mut b, 1)?;
        writeln!(out, "b: {:?}", b)?;
        snapshots.push(b);
        Ok(())
    };

    snapshot(&reader, out)?;
    snapshot(&reader, out)?;
    copy_n(&mut reader, out, 3)?;
    snapshot(&reader, out)?;
    copy(&mut reader, out)?;
    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_moves_everything() {
        let mut reader = StringReader::new("Hello World!\n");
        let mut out = Vec::new();
        assert_eq!(copy(&mut reader, &mut out).unwrap(), 13);
        assert_eq!(out, b"Hello World!\n");
    }

    #[test]
    fn copy_buffer_reuses_a_tiny_buffer() {
        let mut buf = [0u8; 2];
        let mut out = Vec::new();
        copy_buffer(&mut StringReader::new("Reader 1\n"), &mut out, &mut buf).unwrap();
        copy_buffer(&mut StringReader::new("Reader 2\n"), &mut out, &mut buf).unwrap();
        assert_eq!(out, b"Reader 1\nReader 2\n");
    }

    #[test]
    fn copy_buffer_accepts_empty_buffer() {
        let mut out = Vec::new();
        let n = copy_buffer(&mut StringReader::new("abc"), &mut out, &mut []).unwrap();
        assert_eq!(n, 3);
        assert_eq!(out, b"abc");
    }

    #[test]
    fn limit_reader_stops_after_n_bytes() {
        let mut limited = limit_reader(StringReader::new("Something...\n"), 4);
        let mut out = Vec::new();
        copy(&mut limited, &mut out).unwrap();
        assert_eq!(out, b"Some");
    }

    #[test]
    fn tee_reader_mirrors_reads() {
        let text = "Something provided to be read...\n";
        let mut side = Vec::new();
        let read = {
            let mut tee = TeeReader::new(StringReader::new(text), &mut side);
            read_all(&mut tee).unwrap()
        };
        assert_eq!(read, text.as_bytes());
        assert_eq!(side, text.as_bytes());
    }

    #[test]
    fn tee_reader_surfaces_side_write_failure() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let mut tee = TeeReader::new(StringReader::new("x"), Broken);
        let err = tee.read(&mut [0u8; 4]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BrokenPipe);
    }

    #[test]
    fn read_at_leaves_cursor_untouched() {
        let mut out = Vec::new();
        let snapshots = read_at_walkthrough(&mut out).unwrap();
        assert_eq!(snapshots, vec![[111, 109, 101]; 3]);
        let expected = "b: [111, 109, 101]\n\
            b: [111, 109, 101]\n\
            Somb: [111, 109, 101]\n\
            ething provided to be read...\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn read_at_near_and_past_the_end() {
        let reader = StringReader::new("abcd");
        let mut buf = [0u8; 3];
        assert_eq!(reader.read_at(&mut buf, 2), 2);
        assert_eq!(&buf[..2], b"cd");
        assert_eq!(reader.read_at(&mut buf, 4), 0);
        assert_eq!(reader.read_at(&mut buf, u64::MAX), 0);
        let err = reader.read_exact_at(&mut buf, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn copy_n_reports_short_source() {
        let mut out = Vec::new();
        let err = copy_n(&mut StringReader::new("ab"), &mut out, 5).unwrap_err();
        match err {
            crate::DemoError::Io(e) => assert_eq!(e.kind(), ErrorKind::UnexpectedEof),
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(out, b"ab");
    }

    #[test]
    fn writer_adapter_forwards() {
        let mut adapter = WriterAdapter::new(Vec::new());
        let n = adapter
            .read_from(&mut StringReader::new("Something provided to be read...\n"))
            .unwrap();
        assert_eq!(n, 33);
        assert_eq!(adapter.into_inner(), b"Something provided to be read...\n");
    }

    #[test]
    fn last_chunk_writer_keeps_only_latest_write() {
        let mut adapter = WriterAdapter::new(LastChunkWriter::default());
        let mut source = (&b"abc"[..]).chain(&b"def"[..]);
        adapter.read_from(&mut source).unwrap();
        assert_eq!(adapter.get_ref().content(), b"def");
    }
}
