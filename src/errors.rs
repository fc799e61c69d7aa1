use rust_decimal::Decimal;
use thiserror::Error;

/// why an argument was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    #[error("must be a non-negative finite number")]
    NonNegativeFiniteRequired,

    #[error("must be a positive integer")]
    PositiveIntegerRequired,

    #[error("must be between {min} and {}", upper_bound(.max))]
    OutOfRange {
        min: Decimal,
        max: Option<Decimal>,
    },

    /// valid on its own but drives an intermediate amount past the decimal range
    #[error("is too large to calculate with")]
    TooLarge,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("invalid argument {name}: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: InvalidReason,
    },
}

impl SimulationError {
    pub fn invalid(name: &'static str, reason: InvalidReason) -> Self {
        SimulationError::InvalidArgument { name, reason }
    }

    /// the argument pushed a calculation past the representable range
    pub fn too_large(name: &'static str) -> Self {
        SimulationError::InvalidArgument { name, reason: InvalidReason::TooLarge }
    }

    /// name of the offending parameter
    pub fn argument(&self) -> &'static str {
        match self {
            SimulationError::InvalidArgument { name, .. } => name,
        }
    }

    pub fn reason(&self) -> InvalidReason {
        match self {
            SimulationError::InvalidArgument { reason, .. } => *reason,
        }
    }
}

fn upper_bound(max: &Option<Decimal>) -> String {
    match max {
        Some(m) => m.to_string(),
        None => "unbounded".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
