use economy::league::{Player, Position};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const FIRST_NAMES: [&str; 24] = [
    "Aaron", "Brandon", "Caleb", "Darius", "Elijah", "Marcus", "Jalen", "Tyler", "Devin", "Isaiah", "Jordan",
    "Malik", "Nate", "Omar", "Quinn", "Reggie", "Trent", "Xavier", "Zach", "Andre", "Cole", "Derek", "Evan",
    "Lamar",
];

const LAST_NAMES: [&str; 24] = [
    "Adams", "Brooks", "Carter", "Dawson", "Ellis", "Foster", "Graham", "Hayes", "Irving", "Jenkins", "Knox",
    "Lawson", "Mitchell", "Nelson", "Owens", "Parker", "Reed", "Simmons", "Turner", "Vaughn", "Walker", "Young",
    "Banks", "Coleman",
];

/// Seeded source of league players. Ids are handed out in generation order.
pub struct PlayerGenerator {
    rng: StdRng,
    next_id: u32,
}

impl PlayerGenerator {
    pub fn with_seed(seed: u64) -> Self {
        PlayerGenerator {
            rng: StdRng::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// A player at `position`; starters come from the upper rating band.
    pub fn generate(&mut self, position: Position, starter: bool, team_id: Option<u32>) -> Player {
        let id = self.next_id;
        self.next_id += 1;

        let max_age = if position.is_specialist() { 38 } else { 34 };
        let age: u8 = self.rng.random_range(22..=max_age);
        let late_start: u8 = self.rng.random_range(0..=1);
        let experience = (age - 22).saturating_sub(late_start);

        let rating: u8 = if starter {
            self.rng.random_range(66..=93)
        } else {
            self.rng.random_range(50..=74)
        };

        let draft_round = if self.rng.random_range(0.0..1.0) < 0.8 {
            let best_round: u8 = if starter { 1 } else { 3 };
            Some(self.rng.random_range(best_round..=7))
        } else {
            None
        };

        Player::new(id, &self.generate_name(), position, age, experience, rating)
            .with_draft(draft_round)
            .with_team(team_id)
    }

    /// Veterans nobody kept last season, available from day one.
    pub fn generate_unsigned(&mut self, position: Position) -> Player {
        let mut player = self.generate(position, false, None);
        player.age = player.age.max(27);
        player.experience = player.experience.max(5);
        player
    }

    fn generate_name(&mut self) -> String {
        let first = FIRST_NAMES[self.rng.random_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[self.rng.random_range(0..LAST_NAMES.len())];
        format!("{} {}", first, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_generation_order() {
        let mut generator = PlayerGenerator::with_seed(1);
        let first = generator.generate(Position::Quarterback, true, Some(1));
        let second = generator.generate(Position::Kicker, false, None);

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.team_id, Some(1));
        assert_eq!(second.team_id, None);
    }

    #[test]
    fn starters_rate_higher_than_the_backup_floor() {
        let mut generator = PlayerGenerator::with_seed(9);
        for _ in 0..50 {
            let starter = generator.generate(Position::Linebacker, true, None);
            assert!(starter.rating >= 66);
            assert!(starter.experience <= starter.age - 22);
        }
    }

    #[test]
    fn same_seed_same_players() {
        let mut a = PlayerGenerator::with_seed(77);
        let mut b = PlayerGenerator::with_seed(77);

        for position in Position::ALL {
            assert_eq!(a.generate(position, true, None), b.generate(position, true, None));
        }
    }
}
