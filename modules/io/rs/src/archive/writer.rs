use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use eyre::{Result, WrapErr};

use super::algorithm::Algorithm;
use super::record::Alignment;
use super::{MAGIC, VERSION};

/// Batching writer producing framed alignment archives.
///
/// Records accumulate into frames of `batch_size` and are encoded on flush;
/// `finish` must be called to write the trailing partial frame.
pub struct Writer<W: Write> {
    inner: W,
    algorithm: Algorithm,
    batch: Vec<Alignment>,
    batch_size: usize,
}

impl Writer<BufWriter<File>> {
    pub fn from_path(path: impl AsRef<Path>, algorithm: Algorithm) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .wrap_err_with(|| format!("Failed to create alignment archive: {}", path.display()))?;
        Self::new(BufWriter::new(file), algorithm)
    }
}

impl<W: Write> Writer<W> {
    pub const DEFAULT_BATCH_SIZE: usize = 1024;

    pub fn new(mut inner: W, algorithm: Algorithm) -> Result<Self> {
        inner
            .write_all(MAGIC)
            .and_then(|_| inner.write_all(&[VERSION, algorithm.to_byte()]))
            .wrap_err("Failed to write the alignment archive header")?;

        Ok(Self {
            inner,
            algorithm,
            batch: Vec::with_capacity(Self::DEFAULT_BATCH_SIZE),
            batch_size: Self::DEFAULT_BATCH_SIZE,
        })
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn write(&mut self, alignment: Alignment) -> Result<()> {
        self.batch.push(alignment);
        if self.batch.len() >= self.batch_size {
            self.flush_frame()?;
        }
        Ok(())
    }

    fn flush_frame(&mut self) -> Result<()> {
        if self.batch.is_empty() {
            return Ok(());
        }

        let payload = bitcode::encode(&self.batch);
        let payload = match self.algorithm {
            Algorithm::None => payload,
            Algorithm::Deflate => {
                let mut encoder = flate2::write::DeflateEncoder::new(
                    Vec::with_capacity(payload.len()),
                    flate2::Compression::default(),
                );
                encoder
                    .write_all(&payload)
                    .wrap_err("Failed to deflate an archive frame")?;
                encoder
                    .finish()
                    .wrap_err("Failed to deflate an archive frame")?
            }
        };

        self.inner
            .write_all(&(payload.len() as u32).to_le_bytes())
            .and_then(|_| self.inner.write_all(&payload))
            .wrap_err("Failed to write an archive frame")?;
        self.batch.clear();
        Ok(())
    }

    /// Flush pending records and return the underlying sink, fully flushed.
    pub fn finish(mut self) -> Result<W> {
        self.flush_frame()?;
        self.inner
            .flush()
            .wrap_err("Failed to flush the alignment archive")?;
        Ok(self.inner)
    }
}
