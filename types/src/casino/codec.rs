use super::HistoryLog;

/// Error decoding a persisted record.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid balance record: {0:?}")]
    InvalidBalance(String),
    #[error("invalid history record: {0}")]
    InvalidHistory(#[from] serde_json::Error),
}

/// Balance is stored as a plain integer string.
pub fn encode_balance(balance: u64) -> String {
    balance.to_string()
}

pub fn decode_balance(raw: &str) -> Result<u64, CodecError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| CodecError::InvalidBalance(raw.to_string()))
}

/// History is stored as a JSON array of entries, oldest first.
pub fn encode_history(history: &HistoryLog) -> Result<String, CodecError> {
    Ok(serde_json::to_string(history)?)
}

pub fn decode_history(raw: &str) -> Result<HistoryLog, CodecError> {
    Ok(serde_json::from_str(raw)?)
}
