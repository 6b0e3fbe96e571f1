use crate::generators::PlayerGenerator;
use economy::cap::SalaryCapState;
use economy::config::OffseasonConfig;
use economy::contract::{
    ContractError, ContractGenerator, ContractIdSequence, ContractOffer, ContractType, PlayerContract,
};
use economy::league::{Player, Position, Team};
use economy::shared::Money;
use economy::valuation::{MarketConditions, MarketValueCalculator};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const CITIES: [(&str, &str); 32] = [
    ("Albany", "ALB"), ("Birmingham", "BIR"), ("Boise", "BOI"), ("Charleston", "CHS"), ("Columbus", "CLB"),
    ("Dayton", "DAY"), ("El Paso", "ELP"), ("Fresno", "FRE"), ("Hartford", "HFD"), ("Honolulu", "HON"),
    ("Louisville", "LOU"), ("Memphis", "MEM"), ("Mobile", "MOB"), ("Omaha", "OMA"), ("Orlando", "ORL"),
    ("Portland", "POR"), ("Providence", "PRO"), ("Raleigh", "RAL"), ("Reno", "REN"), ("Richmond", "RIC"),
    ("Rochester", "ROC"), ("Sacramento", "SAC"), ("Salt Lake", "SLC"), ("San Antonio", "SAT"), ("Spokane", "SPO"),
    ("St. Louis", "STL"), ("Syracuse", "SYR"), ("Toledo", "TOL"), ("Tucson", "TUC"), ("Tulsa", "TUL"),
    ("Wichita", "WIC"), ("Anchorage", "ANC"),
];

const NICKNAMES: [&str; 8] = ["Rangers", "Stallions", "Comets", "Ironmen", "Hawks", "Pioneers", "Thunder", "Mariners"];

/// Salt separating the contract stream from the player stream of the same seed.
const CONTRACT_STREAM: u64 = 0x00C0_FFEE;

/// Bodies carried at each position on top of the roster minimum.
fn roster_extras(position: Position) -> usize {
    match position {
        Position::OffensiveLine | Position::DefensiveLine => 2,
        Position::TightEnd | Position::Kicker | Position::Punter => 0,
        _ => 1,
    }
}

/// A league as it stands at the end of the previous league year.
#[derive(Debug, Clone)]
pub struct GeneratedLeague {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub caps: Vec<SalaryCapState>,
}

pub struct LeagueGenerator;

impl LeagueGenerator {
    pub fn generate(config: &OffseasonConfig) -> Result<GeneratedLeague, ContractError> {
        let mut player_generator = PlayerGenerator::with_seed(config.seed);
        let mut rng = StdRng::seed_from_u64(config.seed ^ CONTRACT_STREAM);
        let mut contract_ids = ContractIdSequence::default();

        let last_year = config.year - 1;
        let salary_cap = config.baseline_cap(last_year);

        let mut teams = Vec::with_capacity(config.teams as usize);
        let mut players = Vec::new();
        let mut caps = Vec::with_capacity(config.teams as usize);

        for team_id in 1..=config.teams {
            let index = (team_id - 1) as usize;
            let (city, abbreviation) = CITIES[index % CITIES.len()];
            let name = format!("{} {}", city, NICKNAMES[index % NICKNAMES.len()]);

            let roster = Self::generate_roster(&mut player_generator, team_id);
            let target_usage = rng.random_range(0.86..0.99);
            let contracts = Self::generate_contracts(
                &roster,
                team_id,
                last_year,
                salary_cap,
                target_usage,
                &mut contract_ids,
                &mut rng,
            )?;

            let cap = contracts
                .into_iter()
                .fold(SalaryCapState::new(team_id, last_year, salary_cap), |cap, contract| {
                    cap.sign_contract(contract)
                });

            debug!(
                "generated {} ({}): {} players, {} of {} used",
                name,
                abbreviation,
                roster.len(),
                cap.cap_usage(last_year),
                salary_cap
            );

            teams.push(Team::new(team_id, &name, abbreviation).with_roster(roster.iter().map(|p| p.id).collect()));
            players.extend(roster);
            caps.push(cap);
        }

        // a few veterans nobody kept
        for position in Position::ALL {
            for _ in 0..config.teams / 8 {
                players.push(player_generator.generate_unsigned(position));
            }
        }

        info!("generated league: {} teams, {} players", teams.len(), players.len());

        Ok(GeneratedLeague { teams, players, caps })
    }

    fn generate_roster(generator: &mut PlayerGenerator, team_id: u32) -> Vec<Player> {
        Position::ALL
            .iter()
            .flat_map(|position| {
                let size = position.roster_minimum() + roster_extras(*position);
                (0..size).map(move |slot| (*position, slot < position.starters()))
            })
            .map(|(position, starter)| generator.generate(position, starter, Some(team_id)))
            .collect()
    }

    /// Rookie deals for young draftees, minimum deals for young undrafted players and
    /// market deals for everyone else, the market deals scaled so the team lands near
    /// `target_usage` of the cap.
    fn generate_contracts(
        roster: &[Player],
        team_id: u32,
        year: i32,
        salary_cap: Money,
        target_usage: f64,
        ids: &mut ContractIdSequence,
        rng: &mut StdRng,
    ) -> Result<Vec<PlayerContract>, ContractError> {
        let conditions = MarketConditions::new();
        let mut contracts = Vec::with_capacity(roster.len());
        let mut veterans: Vec<(&Player, ContractOffer)> = Vec::new();

        for player in roster {
            match (player.draft_round, player.experience) {
                (Some(round), experience) if experience <= 3 => {
                    let pick = (round as u16 - 1) * 32 + rng.random_range(1..=32);
                    let signed_year = year - experience as i32;
                    let contract = ContractGenerator::rookie_contract(ids, player, team_id, pick, signed_year)?;
                    contracts.push(Self::age_contract(contract, experience));
                }
                (None, experience) if experience <= 2 => {
                    let contract = ContractGenerator::undrafted_contract(ids, player, team_id, year - experience as i32)?;
                    contracts.push(Self::age_contract(contract, experience));
                }
                _ => {
                    let valuation = MarketValueCalculator::calculate(player, year, &conditions);
                    veterans.push((player, valuation.to_offer()));
                }
            }
        }

        let fixed: Money = contracts.iter().map(|c| c.cap_hit_for_year(year)).sum();
        let market: Money = veterans.iter().map(|(_, offer)| offer.aav()).sum();
        let room = salary_cap as f64 * target_usage - fixed as f64;
        let factor = if market > 0 {
            (room / market as f64).clamp(0.3, 1.2)
        } else {
            1.0
        };

        for (player, offer) in veterans {
            let offer = offer.scaled(factor);
            let elapsed = rng.random_range(0..offer.years);
            let contract = ContractGenerator::create_contract(
                ids,
                &offer,
                player.id,
                team_id,
                player.position,
                year - elapsed as i32,
                ContractType::Veteran,
            )?;
            contracts.push(Self::age_contract(contract, elapsed));
        }

        Ok(contracts)
    }

    fn age_contract(contract: PlayerContract, seasons: u8) -> PlayerContract {
        (0..seasons.min(contract.total_years.saturating_sub(1))).fold(contract, |c, _| c.advance_year())
    }
}
