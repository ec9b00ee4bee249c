use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid candidate: '{0}'")]
    InvalidCandidate(String),
}
