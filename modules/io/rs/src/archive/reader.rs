use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

use eyre::{bail, ensure, eyre, Result, WrapErr};

use repkit_core_rs::source::RecordSource;

use super::algorithm::Algorithm;
use super::record::Alignment;
use super::{HEADER_LEN, MAGIC, VERSION};

/// Streaming reader over a framed alignment archive.
///
/// Frames are decoded lazily, one batch ahead of the consumer. A clean EOF at
/// a frame boundary ends the archive; EOF anywhere else is a truncation error.
pub struct Reader<R> {
    inner: R,
    algorithm: Algorithm,
    queue: VecDeque<Alignment>,
    // Bytes consumed from the container / container size, for progress
    consumed: u64,
    total: Option<u64>,
    exhausted: bool,
    frame: Vec<u8>,
}

impl Reader<BufReader<File>> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .wrap_err_with(|| format!("Failed to open alignment archive: {}", path.display()))?;
        let total = file.metadata().ok().map(|meta| meta.len());
        Self::new(BufReader::new(file), total)
            .wrap_err_with(|| format!("Failed to read alignment archive: {}", path.display()))
    }
}

impl<R: Read> Reader<R> {
    /// Wrap any byte stream positioned at the start of an archive. `total` is
    /// the container size, if known, and enables progress estimation.
    pub fn new(mut inner: R, total: Option<u64>) -> Result<Self> {
        let mut header = [0u8; HEADER_LEN];
        inner
            .read_exact(&mut header)
            .wrap_err("Failed to read the alignment archive header")?;
        ensure!(
            &header[..MAGIC.len()] == MAGIC,
            "Not an alignment archive (bad magic)"
        );
        ensure!(
            header[4] == VERSION,
            "Unsupported alignment archive version: {}",
            header[4]
        );
        let algorithm = Algorithm::from_byte(header[5])?;

        Ok(Self {
            inner,
            algorithm,
            queue: VecDeque::new(),
            consumed: HEADER_LEN as u64,
            total,
            exhausted: false,
            frame: Vec::new(),
        })
    }

    /// Decode the next frame into the queue. `Ok(false)` is a clean end of
    /// the archive.
    fn read_frame(&mut self) -> Result<bool> {
        let mut prefix = [0u8; 4];
        match read_fully(&mut self.inner, &mut prefix)? {
            0 => {
                self.exhausted = true;
                return Ok(false);
            }
            4 => {}
            stray => bail!(
                "Truncated alignment archive: {} stray bytes after the last frame",
                stray
            ),
        }

        let length = u32::from_le_bytes(prefix) as usize;
        self.frame.resize(length, 0);
        self.inner
            .read_exact(&mut self.frame)
            .wrap_err("Truncated alignment archive: frame payload cut short")?;
        self.consumed += 4 + length as u64;

        let records: Vec<Alignment> = match self.algorithm {
            Algorithm::None => bitcode::decode(&self.frame),
            Algorithm::Deflate => {
                let mut raw = Vec::new();
                flate2::read::DeflateDecoder::new(&self.frame[..])
                    .read_to_end(&mut raw)
                    .wrap_err("Failed to inflate an archive frame")?;
                bitcode::decode(&raw)
            }
        }
        .map_err(|err| eyre!("Failed to decode an archive frame: {err}"))?;

        self.queue.extend(records);
        Ok(true)
    }
}

impl<R: Read> RecordSource for Reader<R> {
    type Item = Alignment;

    fn pull(&mut self) -> Result<Option<Alignment>> {
        while self.queue.is_empty() && !self.exhausted {
            self.read_frame()?;
        }
        Ok(self.queue.pop_front())
    }

    fn progress(&self) -> Option<f64> {
        self.total.map(|total| {
            if total == 0 {
                1.0
            } else {
                self.consumed.min(total) as f64 / total as f64
            }
        })
    }
}

/// Fill the buffer from the reader, stopping early only at EOF. Returns the
/// number of bytes actually read.
fn read_fully(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(read) => filled += read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}
