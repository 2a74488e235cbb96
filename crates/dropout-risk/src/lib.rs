//! Early warning engine turning four self-reported stress ratings into a
//! dropout-risk band, ranked contributing factors and support actions.

pub mod assessment;
pub mod audit;
pub mod cohort;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflow;
