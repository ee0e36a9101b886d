use thiserror::Error;

use av_core::VehicleId;
use av_msg::MsgError;
use av_vehicle::AgentError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("duplicate vehicle id {0}")]
    DuplicateVehicle(VehicleId),

    #[error("vehicle construction failed: {0}")]
    Agent(#[from] AgentError),

    #[error("status codec error: {0}")]
    Codec(#[from] MsgError),
}

pub type SimResult<T> = Result<T, SimError>;
