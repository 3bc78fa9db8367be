use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bfd;
use crate::error::{PlanError, Result};
use crate::problem::Problem;
use crate::solver::BranchAndBound;
use crate::types::{Action, Observation, Placement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "StrategyId", into = "String")]
pub enum Strategy {
    /// Greedy Best-Fit-Decreasing.
    #[default]
    Bfd,
    /// Exhaustive best-first branch and bound.
    BranchAndBound,
}

impl Strategy {
    pub fn from_policy_id(id: i64) -> Result<Self> {
        match id {
            1 => Ok(Strategy::Bfd),
            2 => Ok(Strategy::BranchAndBound),
            _ => Err(PlanError::InvalidStrategy(id.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Bfd => "bfd",
            Strategy::BranchAndBound => "bb",
        }
    }
}

impl FromStr for Strategy {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bfd" | "1" => Ok(Strategy::Bfd),
            "bb" | "branch-and-bound" | "2" => Ok(Strategy::BranchAndBound),
            _ => Err(PlanError::InvalidStrategy(s.to_string())),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Strategy> for String {
    fn from(s: Strategy) -> Self {
        s.name().to_string()
    }
}

/// Accepts either a strategy name or a numeric policy id.
#[derive(Deserialize)]
#[serde(untagged)]
enum StrategyId {
    Id(i64),
    Name(String),
}

impl TryFrom<StrategyId> for Strategy {
    type Error = PlanError;

    fn try_from(id: StrategyId) -> Result<Self> {
        match id {
            StrategyId::Id(n) => Strategy::from_policy_id(n),
            StrategyId::Name(s) => s.parse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub strategy: Strategy,
    /// Caps branch-and-bound node expansions. `None` searches exhaustively.
    #[serde(default)]
    pub node_budget: Option<u64>,
}

/// Picks one placement per call with a strategy fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Builds a planner from a strategy name or policy id, rejecting anything else.
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(Self::new(PlannerConfig {
            strategy: name.parse()?,
            node_budget: None,
        }))
    }

    pub fn strategy(&self) -> Strategy {
        self.config.strategy
    }

    pub fn plan(&self, problem: &Problem) -> Option<Placement> {
        match self.config.strategy {
            Strategy::Bfd => bfd::plan(&problem.products, &problem.sheets),
            Strategy::BranchAndBound => BranchAndBound::with_node_budget(self.config.node_budget)
                .solve(&problem.products, &problem.sheets),
        }
    }

    pub fn decide(&self, problem: &Problem) -> Action {
        let action = Action::from(self.plan(problem));
        tracing::debug!(strategy = %self.config.strategy, %action, "decision");
        action
    }

    pub fn decide_observation(&self, obs: &Observation) -> Result<Action> {
        let problem = Problem::try_from(obs)?;
        Ok(self.decide(&problem))
    }
}
