use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("missing worker program")]
    MissingProgram,
    #[error("spawn failed: {0}")]
    Spawn(String),
    #[error("upload failed: {0}")]
    Upload(String),
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ExecError {
    fn from(e: std::io::Error) -> Self {
        ExecError::Io(e.to_string())
    }
}
