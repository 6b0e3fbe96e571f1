use crate::shared::{Money, round_money};
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// AAV as a share of the cap needed for each compensatory round, best round first.
const ROUND_THRESHOLDS: [(f64, u8); 4] = [(0.08, 3), (0.05, 4), (0.03, 5), (0.015, 6)];
const LAST_ROUND: u8 = 7;

/// An unrestricted free agent changing teams during the market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensatoryTransaction {
    pub player_id: u32,
    pub from_team_id: u32,
    pub to_team_id: u32,
    pub aav: Money,
    pub year: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompensatoryLedger {
    pub transactions: Vec<CompensatoryTransaction>,
}

impl CompensatoryLedger {
    pub fn record(&mut self, transaction: CompensatoryTransaction) {
        self.transactions.push(transaction);
    }

    pub fn losses(&self, team_id: u32) -> impl Iterator<Item = &CompensatoryTransaction> {
        self.transactions.iter().filter(move |t| t.from_team_id == team_id)
    }

    pub fn gains(&self, team_id: u32) -> impl Iterator<Item = &CompensatoryTransaction> {
        self.transactions.iter().filter(move |t| t.to_team_id == team_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensatoryPick {
    pub team_id: u32,
    pub round: u8,
    pub draft_year: i32,
    pub lost_player_id: u32,
    pub aav: Money,
}

pub fn compensatory_round(aav: Money, salary_cap: Money) -> u8 {
    if salary_cap <= 0 {
        return LAST_ROUND;
    }
    let share = aav as f64 / salary_cap as f64;

    ROUND_THRESHOLDS
        .iter()
        .find(|(threshold, _)| share >= *threshold)
        .map(|(_, round)| *round)
        .unwrap_or(LAST_ROUND)
}

/// Picks for teams that lost more qualifying free agents than they signed. Every qualifying
/// signing cancels the most valuable loss it is worth at least as much as, or the cheapest
/// loss when it outvalues none. What remains is paid out best round first.
pub fn award_picks(
    ledger: &CompensatoryLedger,
    salary_cap: Money,
    qualifying_share: f64,
    max_per_team: usize,
) -> Vec<CompensatoryPick> {
    let floor = round_money(salary_cap as f64 * qualifying_share);
    let qualifying: Vec<&CompensatoryTransaction> = ledger.transactions.iter().filter(|t| t.aav >= floor).collect();

    let teams: BTreeSet<u32> = qualifying.iter().map(|t| t.from_team_id).collect();

    let mut picks = Vec::new();
    for team_id in teams {
        let mut losses: Vec<&CompensatoryTransaction> = qualifying
            .iter()
            .copied()
            .filter(|t| t.from_team_id == team_id)
            .sorted_by(|a, b| b.aav.cmp(&a.aav).then(a.player_id.cmp(&b.player_id)))
            .collect();
        let gains: Vec<Money> = qualifying
            .iter()
            .filter(|t| t.to_team_id == team_id)
            .map(|t| t.aav)
            .sorted_by(|a, b| b.cmp(a))
            .collect();

        if losses.len() <= gains.len() {
            continue;
        }

        for gain in gains {
            let cancelled = losses.iter().position(|loss| loss.aav <= gain).unwrap_or(losses.len() - 1);
            losses.remove(cancelled);
        }

        debug!("team {}: {} net compensatory losses", team_id, losses.len());

        picks.extend(losses.into_iter().take(max_per_team).map(|loss| CompensatoryPick {
            team_id,
            round: compensatory_round(loss.aav, salary_cap),
            draft_year: loss.year + 1,
            lost_player_id: loss.player_id,
            aav: loss.aav,
        }));
    }

    picks.sort_by(|a, b| a.round.cmp(&b.round).then(b.aav.cmp(&a.aav)).then(a.team_id.cmp(&b.team_id)));
    picks
}
