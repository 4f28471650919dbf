use thiserror::Error;

/// Failures from the store collaborator. None are retried here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),
    /// The write never reached the store or the connection dropped.
    #[error("store request failed: {0}")]
    Request(String),
    /// The store answered with a non-success status.
    #[error("store rejected the write with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("store response malformed: {0}")]
    MalformedResponse(String),
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        StoreError::Backend(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_and_body() {
        let err = StoreError::Rejected {
            status: 422,
            body: "UNKNOWN_FIELD_NAME".into(),
        };
        assert_eq!(
            err.to_string(),
            "store rejected the write with status 422: UNKNOWN_FIELD_NAME"
        );
        assert_eq!(
            StoreError::backend("poisoned lock"),
            StoreError::Backend("poisoned lock".into())
        );
    }
}
