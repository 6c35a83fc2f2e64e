//! # Framework Errors
//!
//! Common error types used by the actor runtime and its clients.

/// Errors that can occur within the actor runtime itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Model error: {0}")]
    ModelError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recover the model's own error type, if this error carries one.
    pub fn downcast_model<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            FrameworkError::ModelError(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}
