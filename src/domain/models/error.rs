use thiserror::Error;

/// Rejections surfaced by the session store. None of them are fatal, the
/// state is left untouched or a safe default is substituted.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("There is nothing to send.")]
    EmptyMessage,
    #[error("Select a message before entering annotation mode.")]
    SelectionRequired,
    #[error("Invalid annotation: {0}")]
    InvalidAnnotation(String),
    #[error("The resolver failed: {0}")]
    ResolverFailure(String),
}
