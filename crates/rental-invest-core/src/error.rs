use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvestError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Degenerate amortization: {context}")]
    DegenerateAmortization { context: String },
}

impl InvestError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        InvestError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
