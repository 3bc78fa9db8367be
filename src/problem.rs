use crate::error::{PlanError, Result};
use crate::grid::Sheet;
use crate::types::{Observation, Product};

/// Validated decision input: the current sheets and the remaining demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub products: Vec<Product>,
    pub sheets: Vec<Sheet>,
}

impl Problem {
    pub fn new(products: Vec<Product>, sheets: Vec<Sheet>) -> Self {
        Self { products, sheets }
    }

    pub fn remaining_quantity(&self) -> u64 {
        self.products.iter().map(|p| p.quantity as u64).sum()
    }
}

impl TryFrom<&Observation> for Problem {
    type Error = PlanError;

    fn try_from(obs: &Observation) -> Result<Self> {
        for (index, p) in obs.products.iter().enumerate() {
            if p.quantity > 0 && p.size.is_empty() {
                return Err(PlanError::ZeroSizedProduct { index });
            }
        }
        let sheets = obs
            .stocks
            .iter()
            .enumerate()
            .map(|(i, stock)| Sheet::from_columns(i, stock))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            products: obs.products.clone(),
            sheets,
        })
    }
}
