use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    OffensiveLine,
    DefensiveLine,
    Linebacker,
    Cornerback,
    Safety,
    Kicker,
    Punter,
}

/// Positions that age alike share a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionGroup {
    Passer,
    Rusher,
    Receiver,
    Trenches,
    Coverage,
    Specialist,
}

impl Position {
    pub const ALL: [Position; 11] = [
        Position::Quarterback,
        Position::RunningBack,
        Position::WideReceiver,
        Position::TightEnd,
        Position::OffensiveLine,
        Position::DefensiveLine,
        Position::Linebacker,
        Position::Cornerback,
        Position::Safety,
        Position::Kicker,
        Position::Punter,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::OffensiveLine => "OL",
            Position::DefensiveLine => "DL",
            Position::Linebacker => "LB",
            Position::Cornerback => "CB",
            Position::Safety => "S",
            Position::Kicker => "K",
            Position::Punter => "P",
        }
    }

    pub fn group(&self) -> PositionGroup {
        match self {
            Position::Quarterback => PositionGroup::Passer,
            Position::RunningBack => PositionGroup::Rusher,
            Position::WideReceiver | Position::TightEnd => PositionGroup::Receiver,
            Position::OffensiveLine | Position::DefensiveLine => PositionGroup::Trenches,
            Position::Linebacker | Position::Cornerback | Position::Safety => {
                PositionGroup::Coverage
            }
            Position::Kicker | Position::Punter => PositionGroup::Specialist,
        }
    }

    /// Minimum bodies a roster carries at the position.
    pub fn roster_minimum(&self) -> usize {
        match self {
            Position::Quarterback => 2,
            Position::RunningBack => 3,
            Position::WideReceiver => 5,
            Position::TightEnd => 3,
            Position::OffensiveLine => 8,
            Position::DefensiveLine => 6,
            Position::Linebacker => 5,
            Position::Cornerback => 5,
            Position::Safety => 4,
            Position::Kicker | Position::Punter => 1,
        }
    }

    pub fn starters(&self) -> usize {
        match self {
            Position::WideReceiver | Position::Linebacker | Position::Cornerback => 3,
            Position::OffensiveLine => 5,
            Position::DefensiveLine => 4,
            Position::Safety => 2,
            _ => 1,
        }
    }

    /// Starter rating a contender expects at the position.
    pub fn ideal_starter_rating(&self) -> u8 {
        match self {
            Position::Quarterback => 85,
            Position::Kicker | Position::Punter => 75,
            _ => 78,
        }
    }

    pub fn is_specialist(&self) -> bool {
        self.group() == PositionGroup::Specialist
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_position_has_room_for_its_starters() {
        for position in Position::ALL {
            assert!(position.roster_minimum() >= position.starters(), "{}", position);
        }
    }

    #[test]
    fn groups() {
        assert_eq!(Position::TightEnd.group(), PositionGroup::Receiver);
        assert_eq!(Position::Safety.group(), PositionGroup::Coverage);
        assert!(Position::Punter.is_specialist());
    }
}
