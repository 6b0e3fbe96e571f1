use crate::ai::TeamStrategy;
use crate::free_agency::TeamBudget;
use crate::shared::{Money, round_money};
use log::debug;

/// Splits cap space into a free agency budget and an in-season reserve.
pub fn allocate_fa_budget(team_id: u32, cap_space: Money, strategy: TeamStrategy) -> TeamBudget {
    let space = cap_space.max(0);
    let reserve = round_money(space as f64 * strategy.reserve_share());

    debug!(
        "team {} ({}) budget: {} of {} cap space, {} held back",
        team_id,
        strategy,
        space - reserve,
        space,
        reserve
    );

    TeamBudget::new(team_id, space - reserve, reserve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_depends_on_strategy() {
        let win_now = allocate_fa_budget(1, 40_000, TeamStrategy::WinNow);
        let rebuild = allocate_fa_budget(2, 40_000, TeamStrategy::Rebuild);

        assert_eq!(win_now.total, 36_000);
        assert_eq!(win_now.reserve, 4_000);
        assert_eq!(rebuild.total, 30_000);
        assert_eq!(rebuild.reserve, 10_000);
    }

    #[test]
    fn capped_out_team_has_nothing_to_spend() {
        let budget = allocate_fa_budget(3, -2_500, TeamStrategy::Balanced);
        assert_eq!(budget.remaining(), 0);
        assert_eq!(budget.reserve, 0);
    }
}
