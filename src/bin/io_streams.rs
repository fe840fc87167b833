//! Byte-stream utilities: copy, buffered copy, limits, tees and positional reads.
//!
//! Run with: cargo run --bin io_streams

use std::io;
use std_idioms::demo::{heading, key_points, section};
use std_idioms::stream::{
    copy, copy_buffer, limit_reader, read_all, read_at_walkthrough, LastChunkWriter, ReadFrom,
    StringReader, TeeReader, WriterAdapter,
};
use std_idioms::{logging, Result};

fn main() -> Result<()> {
    logging::init();
    heading("Byte Streams");
    let mut stdout = io::stdout();

    section("copy");
    copy(&mut StringReader::new("Hello World!\n"), &mut stdout)?;

    section("copy_buffer (one tiny buffer, two readers)");
    let mut buf = [b'H', b'H'];
    copy_buffer(&mut StringReader::new("Reader 1\n"), &mut stdout, &mut buf)?;
    copy_buffer(&mut StringReader::new("Reader 2\n"), &mut stdout, &mut buf)?;

    section("limit_reader(4)");
    copy(&mut limit_reader(StringReader::new("Something...\n"), 4), &mut stdout)?;
    println!();

    section("TeeReader");
    let mut tee = TeeReader::new(
        StringReader::new("Something provided to be read...\n"),
        io::stdout(),
    );
    read_all(&mut tee)?;

    section("read_at");
    read_at_walkthrough(&mut stdout)?;

    section("ReadFrom");
    let text = "Something provided to be read...\n";
    WriterAdapter::new(io::stdout()).read_from(&mut StringReader::new(text))?;
    let mut last = WriterAdapter::new(LastChunkWriter::default());
    last.read_from(&mut StringReader::new(text))?;
    println!("last chunk: {:?}", String::from_utf8_lossy(last.get_ref().content()));

    key_points(&[
        "io::copy drains a reader into a writer until EOF",
        "Read::take caps how much a reader will yield",
        "A tee reader mirrors every byte it reads into a second writer",
        "Positional reads do not move the read cursor",
    ]);
    Ok(())
}
