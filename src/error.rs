//! Error types for the frame solver

use thiserror::Error;

/// Main error type for model building and analysis
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("node '{0}' not found in model")]
    NodeNotFound(String),

    #[error("element '{0}' not found in model")]
    ElementNotFound(String),

    #[error("material '{0}' not found in model")]
    MaterialNotFound(String),

    #[error("section '{0}' not found in model")]
    SectionNotFound(String),

    #[error("load combination '{0}' not found in model")]
    LoadCombinationNotFound(String),

    #[error("load case '{0}' not found in model")]
    LoadCaseNotFound(String),

    #[error("duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("no load cases selected - register at least one case before solving")]
    NoLoadCases,

    #[error("singular stiffness matrix - model may be a mechanism or under-restrained")]
    Singular,

    #[error("model not analyzed - run solve() first")]
    NotAnalyzed,

    #[error("analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for frame solver operations
pub type FrameResult<T> = Result<T, FrameError>;
