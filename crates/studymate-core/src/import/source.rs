//! Readable import sources.

use std::future::Future;
use std::io;

/// A byte source read chunk by chunk so the controller can report progress.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// The file-backed implementation lives in studymate-infra.
pub trait ImportSource: Send {
    /// File name of the source. Selects the format and the document title.
    fn name(&self) -> &str;

    /// Total size in bytes, if known up front.
    fn total_bytes(&self) -> Option<u64>;

    /// Next chunk, or `None` once the source is exhausted.
    fn read_chunk(&mut self) -> impl Future<Output = io::Result<Option<Vec<u8>>>> + Send;
}

/// In-memory source, e.g. for piped input.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    data: Vec<u8>,
    position: usize,
    chunk_size: usize,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>, chunk_size: usize) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            position: 0,
            chunk_size: chunk_size.max(1),
        }
    }
}

impl ImportSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn total_bytes(&self) -> Option<u64> {
        Some(self.data.len() as u64)
    }

    async fn read_chunk(&mut self) -> io::Result<Option<Vec<u8>>> {
        if self.position >= self.data.len() {
            return Ok(None);
        }
        let end = (self.position + self.chunk_size).min(self.data.len());
        let chunk = self.data[self.position..end].to_vec();
        self.position = end;
        Ok(Some(chunk))
    }
}
