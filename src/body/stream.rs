use bytes::Bytes;
use std::{
    fs::{File, OpenOptions},
    io::{self, Cursor, Read, Seek, SeekFrom, Write},
};

use super::BodyError;

/// Textual open mode in the POSIX `fopen` style.
///
/// One primary letter (`r`, `w`, `a`, `x`, `c`), an optional `+` widening
/// the mode to read and write, and an ignored `b`/`t`. Readability and
/// writability of a stream follow from the mode alone: `r` or `+` make it
/// readable, anything except a bare `r` makes it writable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenMode {
    primary: Primary,
    plus: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Primary {
    /// `r`: read from the start, the target must exist.
    Read,
    /// `w`: write from the start, create or truncate.
    Write,
    /// `a`: write at the end, create when missing.
    Append,
    /// `x`: write from the start, the target must not exist.
    CreateNew,
    /// `c`: write from the start, create when missing, keep contents.
    WriteKeep,
}

impl OpenMode {
    /// `r`, the default for request bodies.
    pub const READ: OpenMode = OpenMode { primary: Primary::Read, plus: false };

    /// `r+`.
    pub const READ_WRITE: OpenMode = OpenMode { primary: Primary::Read, plus: true };

    /// `w+`, the scratch mode used for response bodies.
    pub const WRITE_PLUS: OpenMode = OpenMode { primary: Primary::Write, plus: true };

    /// Parse a textual mode such as `"r"`, `"a+"` or `"wb+"`.
    ///
    /// # Errors
    ///
    /// Returns [`BodyError::InvalidSource`] when the mode has no primary
    /// letter, more than one, or an unknown character.
    pub fn parse(mode: &str) -> Result<OpenMode, BodyError> {
        let mut primary = None;
        let mut plus = false;
        for ch in mode.chars() {
            let letter = match ch {
                'r' => Primary::Read,
                'w' => Primary::Write,
                'a' => Primary::Append,
                'x' => Primary::CreateNew,
                'c' => Primary::WriteKeep,
                '+' => {
                    plus = true;
                    continue;
                }
                'b' | 't' => continue,
                _ => return Err(invalid_mode(mode)),
            };
            if primary.replace(letter).is_some() {
                return Err(invalid_mode(mode));
            }
        }
        match primary {
            Some(primary) => Ok(OpenMode { primary, plus }),
            None => Err(invalid_mode(mode)),
        }
    }

    #[inline]
    pub fn readable(&self) -> bool {
        matches!(self.primary, Primary::Read) || self.plus
    }

    #[inline]
    pub fn writable(&self) -> bool {
        !matches!(self.primary, Primary::Read) || self.plus
    }

    /// Returns the canonical textual form.
    pub fn as_str(&self) -> &'static str {
        match (self.primary, self.plus) {
            (Primary::Read, false) => "r",
            (Primary::Read, true) => "r+",
            (Primary::Write, false) => "w",
            (Primary::Write, true) => "w+",
            (Primary::Append, false) => "a",
            (Primary::Append, true) => "a+",
            (Primary::CreateNew, false) => "x",
            (Primary::CreateNew, true) => "x+",
            (Primary::WriteKeep, false) => "c",
            (Primary::WriteKeep, true) => "c+",
        }
    }

    fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self.primary {
            Primary::Read => {
                options.read(true);
            }
            Primary::Write => {
                options.write(true).create(true).truncate(true);
            }
            Primary::Append => {
                options.append(true).create(true);
            }
            Primary::CreateNew => {
                options.write(true).create_new(true);
            }
            Primary::WriteKeep => {
                options.write(true).create(true);
            }
        }
        if self.plus {
            options.read(true);
            if matches!(self.primary, Primary::Read) {
                options.write(true);
            }
        }
        options
    }
}

fn invalid_mode(mode: &str) -> BodyError {
    BodyError::InvalidSource(format!("unknown open mode `{mode}`"))
}

impl Default for OpenMode {
    #[inline]
    fn default() -> Self {
        OpenMode::READ
    }
}

impl std::str::FromStr for OpenMode {
    type Err = BodyError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ===== BodyStream =====

#[derive(Debug)]
enum StreamResource {
    File(File),
    Memory(Cursor<Vec<u8>>),
    Stdin(io::Stdin),
}

/// An exclusively owned byte stream resource paired with its open mode.
///
/// This is the transferable handle a [`Body`][super::Body] attaches and
/// detaches. Capability checks happen here: the mode gates reads and
/// writes, the resource kind gates seeks (process input is not seekable).
#[derive(Debug)]
pub struct BodyStream {
    resource: StreamResource,
    mode: OpenMode,
    hit_eof: bool,
}

impl BodyStream {
    /// Open a stream identifier.
    ///
    /// `mem:` prefixed names (and plain `mem`) open an empty in-memory
    /// stream, `stdin` the process input, anything else is a filesystem
    /// path opened per `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`BodyError::InvalidSource`] when a path cannot be opened.
    pub fn open(ident: &str, mode: OpenMode) -> Result<BodyStream, BodyError> {
        if ident == "stdin" {
            return Ok(BodyStream::stdin());
        }
        if ident == "mem" || ident.starts_with("mem:") {
            return Ok(BodyStream::memory(mode));
        }
        match mode.open_options().open(ident) {
            Ok(file) => Ok(BodyStream::from_file(file, mode)),
            Err(err) => Err(BodyError::InvalidSource(format!(
                "cannot open `{ident}`: {err}"
            ))),
        }
    }

    /// An empty in-memory stream.
    pub fn memory(mode: OpenMode) -> BodyStream {
        BodyStream {
            resource: StreamResource::Memory(Cursor::new(Vec::new())),
            mode,
            hit_eof: false,
        }
    }

    /// An in-memory stream preloaded with `contents`, positioned at the
    /// start, readable and writable.
    pub fn with_bytes(contents: impl Into<Vec<u8>>) -> BodyStream {
        BodyStream {
            resource: StreamResource::Memory(Cursor::new(contents.into())),
            mode: OpenMode::READ_WRITE,
            hit_eof: false,
        }
    }

    /// The process input, read-only and not seekable.
    pub fn stdin() -> BodyStream {
        BodyStream {
            resource: StreamResource::Stdin(io::stdin()),
            mode: OpenMode::READ,
            hit_eof: false,
        }
    }

    /// Adopt an already opened file. `mode` must describe how the file was
    /// opened; capability checks trust it.
    pub fn from_file(file: File, mode: OpenMode) -> BodyStream {
        BodyStream {
            resource: StreamResource::File(file),
            mode,
            hit_eof: false,
        }
    }

    #[inline]
    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    #[inline]
    pub fn readable(&self) -> bool {
        self.mode.readable()
    }

    #[inline]
    pub fn writable(&self) -> bool {
        self.mode.writable() && !matches!(self.resource, StreamResource::Stdin(_))
    }

    #[inline]
    pub fn seekable(&self) -> bool {
        !matches!(self.resource, StreamResource::Stdin(_))
    }

    /// Total size of the underlying resource, when it has one.
    pub fn size(&self) -> Option<u64> {
        match &self.resource {
            StreamResource::File(file) => file.metadata().ok().map(|meta| meta.len()),
            StreamResource::Memory(cursor) => Some(cursor.get_ref().len() as u64),
            StreamResource::Stdin(_) => None,
        }
    }

    /// Read up to `len` bytes from the current position.
    pub fn read(&mut self, len: usize) -> Result<Bytes, BodyError> {
        if !self.readable() {
            return Err(BodyError::NotReadable);
        }
        let mut buf = vec![0u8; len];
        let n = self.resource.read(&mut buf)?;
        if n == 0 && len > 0 {
            self.hit_eof = true;
        }
        buf.truncate(n);
        Ok(Bytes::from(buf))
    }

    /// Read everything remaining from the current position.
    pub fn contents(&mut self) -> Result<Bytes, BodyError> {
        if !self.readable() {
            return Err(BodyError::NotReadable);
        }
        let mut buf = Vec::new();
        self.resource.read_to_end(&mut buf)?;
        self.hit_eof = true;
        Ok(Bytes::from(buf))
    }

    /// Write the whole buffer at the current position.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, BodyError> {
        if !self.writable() {
            return Err(BodyError::NotWritable);
        }
        self.resource.write_all(data)?;
        Ok(data.len())
    }

    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64, BodyError> {
        if !self.seekable() {
            return Err(BodyError::NotSeekable);
        }
        let at = self.resource.seek(pos)?;
        self.hit_eof = false;
        Ok(at)
    }

    pub fn rewind(&mut self) -> Result<u64, BodyError> {
        self.seek(SeekFrom::Start(0))
    }

    /// Current position.
    pub fn tell(&mut self) -> Result<u64, BodyError> {
        if !self.seekable() {
            return Err(BodyError::NotSeekable);
        }
        Ok(self.resource.stream_position()?)
    }

    /// Cut or zero-extend the resource to `size`, leaving the position
    /// untouched.
    pub fn truncate(&mut self, size: u64) -> Result<(), BodyError> {
        if !self.writable() {
            return Err(BodyError::NotWritable);
        }
        match &mut self.resource {
            StreamResource::File(file) => file.set_len(size)?,
            StreamResource::Memory(cursor) => cursor.get_mut().resize(size as usize, 0),
            StreamResource::Stdin(_) => return Err(BodyError::NotWritable),
        }
        Ok(())
    }

    /// Whether the position is at or past the end.
    ///
    /// For process input, which has no known size, this reports whether a
    /// read already came back empty.
    pub fn eof(&mut self) -> Result<bool, BodyError> {
        match &mut self.resource {
            StreamResource::File(file) => {
                let pos = file.stream_position()?;
                Ok(pos >= file.metadata()?.len())
            }
            StreamResource::Memory(cursor) => {
                Ok(cursor.position() >= cursor.get_ref().len() as u64)
            }
            StreamResource::Stdin(_) => Ok(self.hit_eof),
        }
    }
}

// ===== Resource io =====

impl Read for StreamResource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            StreamResource::File(file) => file.read(buf),
            StreamResource::Memory(cursor) => cursor.read(buf),
            StreamResource::Stdin(stdin) => stdin.read(buf),
        }
    }
}

impl Write for StreamResource {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            StreamResource::File(file) => file.write(buf),
            StreamResource::Memory(cursor) => cursor.write(buf),
            StreamResource::Stdin(_) => Err(io::ErrorKind::Unsupported.into()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            StreamResource::File(file) => file.flush(),
            StreamResource::Memory(_) => Ok(()),
            StreamResource::Stdin(_) => Err(io::ErrorKind::Unsupported.into()),
        }
    }
}

impl Seek for StreamResource {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            StreamResource::File(file) => file.seek(pos),
            StreamResource::Memory(cursor) => cursor.seek(pos),
            StreamResource::Stdin(_) => Err(io::ErrorKind::Unsupported.into()),
        }
    }
}
