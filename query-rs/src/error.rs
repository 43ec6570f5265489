use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, QueryError>;
