use crate::core::FundId;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },

    #[error("no match for {selector:?} at index {index} ({found} found)")]
    NotFound {
        selector: String,
        index: usize,
        found: usize,
    },
}

/// Aborts a whole aggregation; carries the fund that failed first.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    #[error("failed to fetch the {fund} page")]
    Fetch {
        fund: FundId,
        #[source]
        source: FetchError,
    },

    #[error("failed to locate the {fund} rate")]
    Extract {
        fund: FundId,
        #[source]
        source: ExtractError,
    },
}

impl RateError {
    pub fn fund(&self) -> FundId {
        match self {
            RateError::Fetch { fund, .. } | RateError::Extract { fund, .. } => *fund,
        }
    }
}

/// Flattens an error and its sources into one line for logging.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
