use rg_core::{AgentId, CoreError, Position};
use rg_grid::GridError;
use rg_obs::ObsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("{agent} starts at {position}, which is outside the grid or has no track")]
    InvalidStart { agent: AgentId, position: Position },

    #[error("{agent} has target {position} outside the grid")]
    InvalidTarget { agent: AgentId, position: Position },

    #[error("{agent} has speed {speed}; speed must lie in (0, 1]")]
    InvalidSpeed { agent: AgentId, speed: f32 },

    #[error("generator returned {got} agents, expected {expected}")]
    AgentCountMismatch { expected: usize, got: usize },

    #[error("generator returned a {}x{} rail, expected {}x{}", got.0, got.1, expected.0, expected.1)]
    RailSize {
        expected: (usize, usize),
        got:      (usize, usize),
    },

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("observation error: {0}")]
    Obs(#[from] ObsError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type EnvResult<T> = Result<T, EnvError>;
