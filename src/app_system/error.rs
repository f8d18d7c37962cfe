use thiserror::Error;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Tracing setup failed: {0}")]
    Tracing(String),
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}
