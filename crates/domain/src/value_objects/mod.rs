pub mod allocation;
pub mod optimization_result;
pub mod risk_profile;
pub mod simulation_result;

pub use allocation::{Allocation, AllocationEntry};
pub use optimization_result::{OptimizationResult, ProjectedYield};
pub use risk_profile::RiskProfile;
pub use simulation_result::{ProtocolReturn, SimulationDay, SimulationPosition};
