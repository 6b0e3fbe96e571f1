use crate::shared::Money;
use serde::{Deserialize, Serialize};

/// Money a team has set aside for free agent signings this offseason, measured in
/// first-year cap dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamBudget {
    pub team_id: u32,
    pub total: Money,
    /// Cap space held back for in-season moves.
    pub reserve: Money,
    pub committed: Money,
}

impl TeamBudget {
    pub fn new(team_id: u32, total: Money, reserve: Money) -> Self {
        TeamBudget {
            team_id,
            total: total.max(0),
            reserve: reserve.max(0),
            committed: 0,
        }
    }

    pub fn remaining(&self) -> Money {
        (self.total - self.committed).max(0)
    }

    pub fn can_afford(&self, amount: Money) -> bool {
        amount <= self.remaining()
    }

    pub fn commit(mut self, amount: Money) -> Self {
        self.committed += amount;
        self
    }

    pub fn refund(mut self, amount: Money) -> Self {
        self.committed = (self.committed - amount).max(0);
        self
    }

    /// Makes the in-season reserve spendable, used once camp opens and rosters must be filled.
    pub fn release_reserve(mut self) -> Self {
        self.total += self.reserve;
        self.reserve = 0;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_reduces_remaining() {
        let budget = TeamBudget::new(1, 30_000, 5_000).commit(12_000);
        assert_eq!(budget.remaining(), 18_000);
        assert!(budget.can_afford(18_000));
        assert!(!budget.can_afford(18_001));
        assert_eq!(budget.refund(20_000).committed, 0);
    }

    #[test]
    fn released_reserve_can_be_spent() {
        let budget = TeamBudget::new(1, 10_000, 4_000).commit(10_000);
        assert!(!budget.can_afford(1_000));

        let budget = budget.release_reserve();
        assert_eq!(budget.remaining(), 4_000);
        assert_eq!(budget.reserve, 0);
    }
}
