use crate::shared::Money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyReason {
    Cut,
    Trade,
    Restructure,
    Retirement,
}

/// Dead money charged against a cap year, independent of any live contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapPenalty {
    pub player_id: u32,
    pub reason: PenaltyReason,
    pub amount: Money,
    pub year: i32,
    /// League years until the charge is fully in the past, counting the current one.
    pub years_remaining: u8,
}

impl CapPenalty {
    pub fn new(player_id: u32, reason: PenaltyReason, amount: Money, year: i32, current_year: i32) -> Self {
        CapPenalty {
            player_id,
            reason,
            amount,
            year,
            years_remaining: (year - current_year + 1).max(0) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_remaining_counts_the_current_year() {
        assert_eq!(CapPenalty::new(1, PenaltyReason::Cut, 500, 2024, 2024).years_remaining, 1);
        assert_eq!(CapPenalty::new(1, PenaltyReason::Cut, 500, 2025, 2024).years_remaining, 2);
    }
}
