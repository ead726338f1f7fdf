use nw_core::{AgentId, NwError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("no enemy with id {0}")]
    UnknownAgent(AgentId),

    #[error(transparent)]
    Core(#[from] NwError),
}

pub type SimResult<T> = Result<T, SimError>;
