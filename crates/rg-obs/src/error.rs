use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObsError {
    #[error("tree depth {requested} exceeds the maximum of {max}")]
    DepthTooLarge { requested: usize, max: usize },
}

pub type ObsResult<T> = Result<T, ObsError>;
