use crate::league::Position;
use serde::{Deserialize, Serialize};

/// Player record as supplied by the game-state layer. Ratings and ages are produced
/// elsewhere; the economy only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub position: Position,
    pub age: u8,
    /// Accrued seasons.
    pub experience: u8,
    /// Overall rating, 0-100.
    pub rating: u8,
    pub drafted: bool,
    pub draft_round: Option<u8>,
    pub team_id: Option<u32>,
}

impl Player {
    pub fn new(id: u32, name: &str, position: Position, age: u8, experience: u8, rating: u8) -> Self {
        Player {
            id,
            name: name.to_string(),
            position,
            age,
            experience,
            rating: rating.min(100),
            drafted: true,
            draft_round: None,
            team_id: None,
        }
    }

    pub fn with_draft(mut self, round: Option<u8>) -> Self {
        self.drafted = round.is_some();
        self.draft_round = round;
        self
    }

    pub fn with_team(mut self, team_id: Option<u32>) -> Self {
        self.team_id = team_id;
        self
    }
}
