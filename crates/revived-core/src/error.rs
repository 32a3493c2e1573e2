use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// `dispatch` was called while the root reducer was running.
    #[error("dispatch called from inside a reducer")]
    DispatchInReducer,

    #[error("replace_reducer called from inside a reducer")]
    ReplaceInReducer,

    #[error("action payload must serialize to a JSON object")]
    PayloadNotObject,

    #[error("action payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
