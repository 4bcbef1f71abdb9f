pub mod challenge;
pub mod launcher;
pub mod options;
pub mod ranking;

pub use challenge::{Challenge, TargetChallenge};
pub use launcher::{DriverState, EvolutionLauncher, EvolutionResult, GenerationReport, StopSignal};
pub use options::{EvolutionOptions, GaParams, LogLevel};
pub use ranking::RankingStage;
