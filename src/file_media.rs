//! File sources and file-to-file helpers.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

use crate::compress::PpmEncoder;
use crate::decompress::PpmDecoder;
use crate::error::Result;
use crate::ppm::ModelOrder;

/// Local file implementation.
#[derive(Debug, Clone)]
pub struct LocalFileMedia {
    path: PathBuf,
    name: String,
    length: u64,
}

impl LocalFileMedia {
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            length: metadata.len(),
        })
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Buffered reader over the whole file.
    pub fn open(&self) -> std::io::Result<BufReader<File>> {
        Ok(BufReader::new(File::open(&self.path)?))
    }

    /// Sync read
    pub fn read_all_sync(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(self.length as usize);
        self.open()?.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    /// Async read
    #[cfg(feature = "async")]
    #[cfg_attr(docsrs, doc(cfg(feature = "async")))]
    pub async fn read_all(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}

/// Decompress `input` into `output`, streaming through buffered I/O.
/// Returns the number of bytes written.
pub fn decompress_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    order: ModelOrder,
) -> Result<u64> {
    let source = LocalFileMedia::new(input)?;
    let mut sink = BufWriter::new(File::create(output)?);
    let written = PpmDecoder::new(order).decompress_to(source.open()?, &mut sink)?;
    tracing::info!(
        file = source.name(),
        packed = source.length(),
        written,
        "decompressed file"
    );
    Ok(written)
}

/// Compress `input` into `output`. Returns the number of bytes read.
pub fn compress_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    order: ModelOrder,
) -> Result<u64> {
    let source = LocalFileMedia::new(input)?;
    let sink = BufWriter::new(File::create(output)?);
    let mut encoder = PpmEncoder::new(sink, order);
    std::io::copy(&mut source.open()?, &mut encoder)?;
    let read = encoder.bytes_read();
    encoder.finish()?;
    tracing::info!(file = source.name(), read, "compressed file");
    Ok(read)
}

/// Async variant of [`decompress_file`]. File I/O goes through tokio; the
/// decoding itself is sequential and runs on the calling task.
#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub async fn decompress_file_async(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    order: ModelOrder,
) -> Result<u64> {
    let packed = tokio::fs::read(input).await?;
    let data = PpmDecoder::new(order).decompress(&packed)?;
    tokio::fs::write(output, &data).await?;
    Ok(data.len() as u64)
}

/// Async variant of [`compress_file`].
#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub async fn compress_file_async(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    order: ModelOrder,
) -> Result<u64> {
    let data = tokio::fs::read(input).await?;
    let packed = crate::compress::compress(&data, order)?;
    tokio::fs::write(output, &packed).await?;
    Ok(data.len() as u64)
}
