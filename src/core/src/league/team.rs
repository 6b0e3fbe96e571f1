use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub abbreviation: String,
    pub roster: Vec<u32>,
}

impl Team {
    pub fn new(id: u32, name: &str, abbreviation: &str) -> Self {
        Team {
            id,
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
            roster: Vec::new(),
        }
    }

    pub fn with_roster(mut self, roster: Vec<u32>) -> Self {
        self.roster = roster;
        self
    }

    pub fn add_player(&mut self, player_id: u32) {
        if !self.roster.contains(&player_id) {
            self.roster.push(player_id);
        }
    }

    pub fn remove_player(&mut self, player_id: u32) {
        self.roster.retain(|id| *id != player_id);
    }
}
