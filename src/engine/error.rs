#[derive(Debug)]
pub enum EngineError {
    /// Import payload was not valid JSON, or not a JSON object.
    ImportParse(String),
    /// Persisting the state snapshot failed.
    StorageWrite(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::ImportParse(e) => write!(f, "could not read import payload: {e}"),
            EngineError::StorageWrite(e) => write!(f, "storage write failed: {e}"),
        }
    }
}

impl std::error::Error for EngineError {}
