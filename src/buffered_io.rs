use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    io::{
        self, Read, Write, BufReader,
        BufWriter, BufRead, ErrorKind
    },
};


/// A source of single bytes. `Ok(None)` marks the end of input.
pub trait ByteReader {
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Read a big-endian u64, or None if input ends first.
    fn read_u64(&mut self) -> io::Result<Option<u64>> {
        let mut value = 0u64;
        for _ in 0..8 {
            match self.read_byte()? {
                Some(byte) => value = (value << 8) | byte as u64,
                None => return Ok(None),
            }
        }
        Ok(Some(value))
    }
}
impl<R: Read> ByteReader for BufReader<R> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            let byte = match self.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if byte.is_some() {
                self.consume(1);
            }
            return Ok(byte);
        }
    }
}
impl ByteReader for &[u8] {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self.split_first() {
            Some((&byte, rest)) => {
                *self = rest;
                Ok(Some(byte))
            }
            None => Ok(None),
        }
    }
}
impl<T: ByteReader + ?Sized> ByteReader for &mut T {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }
}


/// A sink for single bytes.
pub trait ByteWriter {
    fn write_byte(&mut self, output: u8) -> io::Result<()>;

    /// Write a u64, most significant byte first.
    fn write_u64(&mut self, output: u64) -> io::Result<()> {
        for byte in output.to_be_bytes() {
            self.write_byte(byte)?;
        }
        Ok(())
    }
    /// Push buffered bytes to the underlying sink.
    fn flush_buffer(&mut self) -> io::Result<()> {
        Ok(())
    }
}
impl<W: Write> ByteWriter for BufWriter<W> {
    fn write_byte(&mut self, output: u8) -> io::Result<()> {
        self.write_all(&[output])
    }
    fn flush_buffer(&mut self) -> io::Result<()> {
        self.flush()
    }
}
impl ByteWriter for Vec<u8> {
    fn write_byte(&mut self, output: u8) -> io::Result<()> {
        self.push(output);
        Ok(())
    }
}
impl<T: ByteWriter + ?Sized> ByteWriter for &mut T {
    fn write_byte(&mut self, output: u8) -> io::Result<()> {
        (**self).write_byte(output)
    }
    fn flush_buffer(&mut self) -> io::Result<()> {
        (**self).flush_buffer()
    }
}


/// An output file that is only created once something is written to it
/// or it is flushed, so a run that fails before producing output leaves
/// no file behind.
pub struct DelayedFile {
    path:  PathBuf,
    file:  Option<File>,
}
impl DelayedFile {
    pub fn new(path: &Path) -> DelayedFile {
        DelayedFile {
            path:  path.to_path_buf(),
            file:  None,
        }
    }
    pub fn is_created(&self) -> bool {
        self.file.is_some()
    }
    /// Remove the file if it was created.
    pub fn discard(mut self) -> io::Result<()> {
        if self.file.take().is_some() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
    fn file(&mut self) -> io::Result<&mut File> {
        let file = match self.file.take() {
            Some(file) => file,
            None => File::create(&self.path)?,
        };
        Ok(self.file.insert(file))
    }
}
impl Write for DelayedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file()?.write(buf)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.file()?.flush()
    }
}


/// Counts the bytes passing through a reader or writer.
pub struct Counter<T> {
    inner:  T,
    count:  u64,
}
impl<T> Counter<T> {
    pub fn new(inner: T) -> Counter<T> {
        Counter { inner, count: 0 }
    }
    pub fn count(&self) -> u64 {
        self.count
    }
    pub fn into_inner(self) -> T {
        self.inner
    }
}
impl<T: ByteReader> ByteReader for Counter<T> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.inner.read_byte()?;
        self.count += byte.is_some() as u64;
        Ok(byte)
    }
}
impl<T: ByteWriter> ByteWriter for Counter<T> {
    fn write_byte(&mut self, output: u8) -> io::Result<()> {
        self.inner.write_byte(output)?;
        self.count += 1;
        Ok(())
    }
    fn flush_buffer(&mut self) -> io::Result<()> {
        self.inner.flush_buffer()
    }
}


/// Opens `path` for buffered reading, or stdin if there is no path.
pub fn new_input(path: Option<&Path>) -> io::Result<BufReader<Box<dyn Read>>> {
    let input: Box<dyn Read> = match path {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    Ok(BufReader::with_capacity(1 << 16, input))
}

/// Command line output, a delayed file or stdout.
pub enum Output {
    File(BufWriter<DelayedFile>),
    Stdout(BufWriter<io::Stdout>),
}
impl Output {
    /// Drop buffered bytes and remove the output file if one was created.
    /// Bytes already written to stdout can't be taken back.
    pub fn discard(self) -> io::Result<()> {
        match self {
            Output::File(out) => out.into_parts().0.discard(),
            Output::Stdout(_) => Ok(()),
        }
    }
}
impl ByteWriter for Output {
    fn write_byte(&mut self, output: u8) -> io::Result<()> {
        match self {
            Output::File(out) => out.write_byte(output),
            Output::Stdout(out) => out.write_byte(output),
        }
    }
    fn flush_buffer(&mut self) -> io::Result<()> {
        match self {
            Output::File(out) => out.flush_buffer(),
            Output::Stdout(out) => out.flush_buffer(),
        }
    }
}

/// Buffered writer to a delayed file at `path`, or stdout if there is no path.
pub fn new_output(path: Option<&Path>) -> Output {
    match path {
        Some(path) => Output::File(BufWriter::with_capacity(1 << 16, DelayedFile::new(path))),
        None => Output::Stdout(BufWriter::with_capacity(1 << 16, io::stdout())),
    }
}

/// Length of the file at `path`, 0 if it can't be read.
pub fn file_len(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
