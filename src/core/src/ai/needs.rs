use crate::cap::SalaryCapState;
use crate::league::{Player, Position};
use crate::shared::Money;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NeedLevel {
    None,
    Depth,
    Moderate,
    Critical,
}

impl NeedLevel {
    /// How much more than asking price a team offers to fill the hole.
    pub fn offer_multiplier(&self) -> f64 {
        match self {
            NeedLevel::Critical => 1.15,
            NeedLevel::Moderate => 1.05,
            NeedLevel::Depth => 0.95,
            NeedLevel::None => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionNeed {
    pub position: Position,
    pub level: NeedLevel,
    pub count: usize,
    pub minimum: usize,
    /// Average rating of the players who would start, empty starting spots count as zero.
    pub starter_rating: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CapSituation {
    Strapped,
    Tight,
    Comfortable,
    Flush,
}

impl CapSituation {
    pub fn from_space(cap_space: Money, salary_cap: Money) -> Self {
        if salary_cap <= 0 {
            return CapSituation::Strapped;
        }

        let share = cap_space as f64 / salary_cap as f64;
        if share >= 0.20 {
            CapSituation::Flush
        } else if share >= 0.10 {
            CapSituation::Comfortable
        } else if share >= 0.03 {
            CapSituation::Tight
        } else {
            CapSituation::Strapped
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamNeeds {
    pub team_id: u32,
    pub needs: BTreeMap<Position, PositionNeed>,
    pub cap_situation: CapSituation,
    pub cap_space: Money,
    pub roster_size: usize,
}

impl TeamNeeds {
    pub fn level(&self, position: Position) -> NeedLevel {
        self.needs.get(&position).map_or(NeedLevel::None, |n| n.level)
    }

    /// Open needs, most urgent first.
    pub fn priorities(&self) -> Vec<&PositionNeed> {
        let mut open: Vec<&PositionNeed> = self.needs.values().filter(|n| n.level != NeedLevel::None).collect();
        open.sort_by(|a, b| b.level.cmp(&a.level).then(a.position.cmp(&b.position)));
        open
    }

    pub fn open_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.needs.values().filter(|n| n.level != NeedLevel::None).map(|n| n.position)
    }

    /// Bodies needed to reach every position minimum.
    pub fn missing_players(&self) -> usize {
        self.needs.values().map(|n| n.minimum.saturating_sub(n.count)).sum()
    }
}

fn classify(position: Position, count: usize, starter_rating: f64) -> NeedLevel {
    let ideal = position.ideal_starter_rating() as f64;

    if count < position.starters() || starter_rating < ideal - 15.0 {
        NeedLevel::Critical
    } else if count < position.roster_minimum() || starter_rating < ideal - 7.0 {
        NeedLevel::Moderate
    } else if count == position.roster_minimum() || starter_rating < ideal {
        NeedLevel::Depth
    } else {
        NeedLevel::None
    }
}

pub fn assess_team_needs(team_id: u32, roster: &[&Player], cap: &SalaryCapState) -> TeamNeeds {
    let needs: BTreeMap<Position, PositionNeed> = Position::ALL
        .iter()
        .map(|position| {
            let mut ratings: Vec<u8> = roster
                .iter()
                .filter(|p| p.position == *position)
                .map(|p| p.rating)
                .collect();
            ratings.sort_unstable_by(|a, b| b.cmp(a));

            let starters = position.starters();
            let starter_rating =
                ratings.iter().take(starters).map(|r| *r as f64).sum::<f64>() / starters as f64;
            let level = classify(*position, ratings.len(), starter_rating);

            (
                *position,
                PositionNeed {
                    position: *position,
                    level,
                    count: ratings.len(),
                    minimum: position.roster_minimum(),
                    starter_rating,
                },
            )
        })
        .collect();

    let cap_space = cap.offseason_cap_space();
    let cap_situation = CapSituation::from_space(cap_space, cap.salary_cap);

    debug!(
        "team {} needs: {} open positions, cap {:?}",
        team_id,
        needs.values().filter(|n| n.level != NeedLevel::None).count(),
        cap_situation
    );

    TeamNeeds {
        team_id,
        needs,
        cap_situation,
        cap_space,
        roster_size: roster.len(),
    }
}
