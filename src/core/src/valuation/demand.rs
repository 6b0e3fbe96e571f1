use crate::league::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MIN_DEMAND_MULTIPLIER: f64 = 0.85;
const MAX_DEMAND_MULTIPLIER: f64 = 1.25;

/// League-wide free agent supply and team demand per position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketConditions {
    pub supply: BTreeMap<Position, u32>,
    pub demand: BTreeMap<Position, u32>,
}

impl MarketConditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the positions of available free agents and of open team needs.
    pub fn observe<S, D>(supply: S, demand: D) -> Self
    where
        S: IntoIterator<Item = Position>,
        D: IntoIterator<Item = Position>,
    {
        let mut conditions = MarketConditions::new();
        for position in supply {
            *conditions.supply.entry(position).or_insert(0) += 1;
        }
        for position in demand {
            *conditions.demand.entry(position).or_insert(0) += 1;
        }
        conditions
    }

    pub fn with_supply(mut self, position: Position, count: u32) -> Self {
        self.supply.insert(position, count);
        self
    }

    pub fn with_demand(mut self, position: Position, count: u32) -> Self {
        self.demand.insert(position, count);
        self
    }

    /// Scarcity multiplier. Positions without data are priced neutrally.
    pub fn multiplier(&self, position: Position) -> f64 {
        let Some(demand) = self.demand.get(&position) else {
            return 1.0;
        };

        match self.supply.get(&position) {
            Some(supply) if *supply > 0 => {
                let ratio = *demand as f64 / *supply as f64;
                (0.85 + 0.15 * ratio).clamp(MIN_DEMAND_MULTIPLIER, MAX_DEMAND_MULTIPLIER)
            }
            _ => MAX_DEMAND_MULTIPLIER,
        }
    }
}
