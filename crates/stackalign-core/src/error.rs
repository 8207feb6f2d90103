use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackAlignError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid stack: {0}")]
    InvalidStack(String),

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Registration failed: {0}")]
    Registration(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StackAlignError>;
