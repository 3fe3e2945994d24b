//! File-backed import source.

use std::io;
use std::path::Path;

use tokio::io::AsyncReadExt;

use studymate_core::import::ImportSource;

/// Reads a local file in fixed-size chunks.
pub struct FileSource {
    name: String,
    file: tokio::fs::File,
    total_bytes: u64,
    chunk_size: usize,
}

impl FileSource {
    /// Open `path` for chunked reading. The file name (not the full path)
    /// becomes the source name.
    pub async fn open(path: &Path, chunk_size: usize) -> io::Result<Self> {
        let file = tokio::fs::File::open(path).await?;
        let total_bytes = file.metadata().await?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            file,
            total_bytes,
            chunk_size: chunk_size.max(1),
        })
    }
}

impl ImportSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn total_bytes(&self) -> Option<u64> {
        Some(self.total_bytes)
    }

    async fn read_chunk(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut buf = vec![0u8; self.chunk_size];
        let n = self.file.read(&mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        buf.truncate(n);
        Ok(Some(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use studymate_core::import::ImportController;
    use studymate_types::config::ImportSettings;
    use studymate_types::import::ImportEvent;

    #[tokio::test]
    async fn test_reads_in_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        tokio::fs::write(&path, "0123456789").await.unwrap();

        let mut source = FileSource::open(&path, 4).await.unwrap();
        assert_eq!(source.name(), "notes.txt");
        assert_eq!(source.total_bytes(), Some(10));

        let mut chunks = Vec::new();
        while let Some(chunk) = source.read_chunk().await.unwrap() {
            chunks.push(chunk);
        }
        assert_eq!(chunks.concat(), b"0123456789");
        assert!(chunks.iter().all(|c| c.len() <= 4));
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileSource::open(&dir.path().join("nope.txt"), 16).await.is_err());
    }

    #[tokio::test]
    async fn test_import_text_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("小说.txt");
        tokio::fs::write(&path, "第一章 开始\n春天来了\n第二章 结束\n秋天到了")
            .await
            .unwrap();

        let controller = ImportController::new(ImportSettings {
            parse_delay_ms: 0,
            settle_delay_ms: 0,
            read_chunk_bytes: 8,
        });
        let source = FileSource::open(&path, 8).await.unwrap();
        let (_handle, events) = controller.start(source);
        let events: Vec<ImportEvent> = events.collect().await;

        match events.last() {
            Some(ImportEvent::Completed { document }) => {
                assert_eq!(document.title, "小说");
                assert_eq!(document.chapters.len(), 2);
                assert_eq!(document.chapters[1].text, "秋天到了");
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }
}
