/// Failures the core raises on its own, before any HTTP call.
#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    /// A client-side precondition failed; nothing was sent.
    #[error("{0}")]
    Validation(String),
}
