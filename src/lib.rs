pub mod bfd;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod problem;
pub mod render;
pub mod search;
pub mod solver;
pub mod strategy;
pub mod types;

pub use error::{PlanError, Result};
pub use problem::Problem;
pub use strategy::{Planner, PlannerConfig, Strategy};
pub use types::{Action, Observation};
