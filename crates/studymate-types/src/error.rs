use thiserror::Error;

/// Errors related to persona roster operations.
#[derive(Debug, Error)]
pub enum PersonaError {
    #[error("persona not found: '{0}'")]
    NotFound(String),

    #[error("invalid persona name: {0}")]
    InvalidName(String),

    #[error("cannot delete the last remaining persona")]
    LastPersona,

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to editing an imported document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("chapter {index} out of range (document has {len} chapters)")]
    ChapterOutOfRange { index: usize, len: usize },

    #[error("chapter title must not be blank")]
    EmptyTitle,
}

impl DocumentError {
    /// Human-readable notice for this failure.
    pub fn notice(&self) -> String {
        match self {
            DocumentError::ChapterOutOfRange { .. } => "章节不存在！".to_string(),
            DocumentError::EmptyTitle => "章节标题不能为空！".to_string(),
        }
    }
}

/// Terminal failures of an import session.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read source: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid document JSON: {0}")]
    InvalidJson(String),

    #[error("document contains no chapters")]
    NoChapters,
}

impl ImportError {
    /// Human-readable notice for this failure.
    pub fn notice(&self) -> String {
        match self {
            ImportError::Read(_) => "文件读取失败，请重试".to_string(),
            ImportError::InvalidJson(_) | ImportError::NoChapters => {
                "JSON文件解析失败，请检查文件格式".to_string()
            }
        }
    }
}

/// Errors from repository operations (used by trait definitions in studymate-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

impl From<RepositoryError> for PersonaError {
    fn from(err: RepositoryError) -> Self {
        PersonaError::StorageError(err.to_string())
    }
}
