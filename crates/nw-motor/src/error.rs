use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotorError {
    #[error("patrol waypoint {index} is not finite")]
    NonFiniteWaypoint { index: usize },

    #[error("motor configuration error: {0}")]
    Config(String),
}

pub type MotorResult<T> = Result<T, MotorError>;
