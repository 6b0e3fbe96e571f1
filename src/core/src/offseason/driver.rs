use crate::ai::{
    Bidder, CapMove, NeedLevel, OfferEvaluation, TeamPersonality, TeamStrategy, allocate_fa_budget, assess_team_needs,
    choose_tag, choose_tender, evaluate_free_agent, pick_roster_fillers, relieve_cap, run_bidding_war,
    should_match_offer_sheet, worth_offer_sheet,
};
use crate::cap::SalaryCapState;
use crate::config::OffseasonConfig;
use crate::contract::{
    ContractIdSequence, ContractOffer, FranchiseTagger, PlayerContract, TagType, TeamTagStatus, minimum_salary,
};
use crate::free_agency::{
    FreeAgencyPhase, FreeAgencyState, FreeAgent, OfferSheet, SigningSource, TenderOffer, asking_aav,
};
use crate::league::{LeagueCalendar, Player, Position, Team};
use crate::offseason::OffseasonReport;
use crate::shared::{CurrencyFormatter, Money, SeededRandom, round_money};
use crate::valuation::{MarketConditions, MarketValueCalculator, SkillTier};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Share of the cap every team clears before the market opens.
const CAP_SPACE_TARGET: f64 = 0.05;
/// New targets a team goes after per day.
const OFFERS_PER_DAY: usize = 3;

pub fn roster_minimum() -> usize {
    Position::ALL.iter().map(|p| p.roster_minimum()).sum()
}

/// One team's side of the offseason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamOffseason {
    pub team: Team,
    pub cap: SalaryCapState,
    pub tags: TeamTagStatus,
    pub personality: TeamPersonality,
    pub cap_moves: Vec<CapMove>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    pub team_id: u32,
    pub player_id: u32,
    pub tag_type: TagType,
    pub value: Money,
}

/// Drives one league offseason: closes the old league year, runs free agency day by day
/// and books every signing back onto the team cap ledgers.
#[derive(Debug, Clone)]
pub struct Offseason {
    pub config: OffseasonConfig,
    pub year: i32,
    pub calendar: LeagueCalendar,
    pub players: BTreeMap<u32, Player>,
    pub teams: BTreeMap<u32, TeamOffseason>,
    pub market: FreeAgencyState,
    pub conditions: MarketConditions,
    pub tagged: Vec<TagRecord>,
    rng: SeededRandom,
    booked_signings: usize,
    started: bool,
}

impl Offseason {
    /// `caps` hold the ledgers of the league year that is ending; teams without one start
    /// from an empty ledger.
    pub fn new(config: OffseasonConfig, teams: Vec<Team>, players: Vec<Player>, caps: Vec<SalaryCapState>) -> Self {
        let year = config.year;
        let players: BTreeMap<u32, Player> = players.into_iter().map(|p| (p.id, p)).collect();
        let mut caps: BTreeMap<u32, SalaryCapState> = caps.into_iter().map(|c| (c.team_id, c)).collect();

        let teams = teams
            .into_iter()
            .map(|team| {
                let cap = caps
                    .remove(&team.id)
                    .unwrap_or_else(|| SalaryCapState::new(team.id, year - 1, config.baseline_cap(year - 1)));
                let roster: Vec<&Player> = team.roster.iter().filter_map(|id| players.get(id)).collect();
                let personality = TeamPersonality::for_strategy(TeamStrategy::from_roster(&roster));

                (
                    team.id,
                    TeamOffseason {
                        tags: TeamTagStatus::new(team.id, year),
                        team,
                        cap,
                        personality,
                        cap_moves: Vec::new(),
                    },
                )
            })
            .collect::<BTreeMap<u32, TeamOffseason>>();

        let contract_ids = ContractIdSequence::after(teams.values().flat_map(|entry| entry.cap.contracts.values()));

        Offseason {
            market: FreeAgencyState::new(year, config.baseline_cap(year), config.market.clone())
                .with_contract_ids(contract_ids),
            rng: SeededRandom::new(config.seed),
            calendar: LeagueCalendar::new(year),
            year,
            players,
            teams,
            conditions: MarketConditions::new(),
            tagged: Vec::new(),
            booked_signings: 0,
            started: false,
            config,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.market.phase == FreeAgencyPhase::Closed
    }

    pub fn roster(&self, team_id: u32) -> Vec<&Player> {
        self.teams
            .get(&team_id)
            .map(|entry| entry.team.roster.iter().filter_map(|id| self.players.get(id)).collect())
            .unwrap_or_default()
    }

    // ==================== League year rollover ====================

    /// Opens the new league year: cap ledgers roll over, expiring players are tagged or
    /// released into the pool, teams clear cap space, tender their restricted players and
    /// set their free agency budgets.
    pub fn begin(mut self) -> Self {
        if self.started {
            warn!("offseason {} already started", self.year);
            return self;
        }
        self.started = true;

        info!("offseason {}: {} teams, {} players", self.year, self.teams.len(), self.players.len());

        let mut departures = self.roll_over_caps();
        departures.extend(self.clear_cap_space());
        departures.extend(
            self.players
                .values()
                .filter(|p| p.team_id.is_none())
                .map(|p| (p.id, None)),
        );
        departures.sort_unstable();
        departures.dedup_by_key(|d| d.0);

        for (player_id, _) in &departures {
            if let Some(player) = self.players.get_mut(player_id) {
                player.team_id = None;
            }
        }

        let supply: Vec<Position> = departures
            .iter()
            .filter_map(|(id, _)| self.players.get(id))
            .map(|p| p.position)
            .collect();
        self.refresh_conditions_with(supply);

        let personalities: Vec<(u32, TeamPersonality)> = self
            .teams
            .keys()
            .map(|id| (*id, TeamPersonality::for_strategy(TeamStrategy::from_roster(&self.roster(*id)))))
            .collect();
        for (team_id, personality) in personalities {
            if let Some(entry) = self.teams.get_mut(&team_id) {
                debug!("team {} plays {}", team_id, personality.strategy);
                entry.personality = personality;
            }
        }

        let mut market = self.market;
        for (player_id, previous_team_id) in &departures {
            if let Some(player) = self.players.get(player_id) {
                let value = MarketValueCalculator::calculate(player, self.year, &self.conditions);
                market = market.add_free_agent(player.clone(), *previous_team_id, value);
            }
        }

        let tenders: Vec<(u32, u32, _)> = market
            .free_agents
            .values()
            .filter_map(|agent| Some((agent.previous_team_id?, agent.id, choose_tender(agent)?)))
            .collect();
        for (team_id, free_agent_id, level) in tenders {
            market = market.place_tender(team_id, free_agent_id, level);
        }

        for (team_id, entry) in &self.teams {
            let tendered: Money = market
                .tenders
                .values()
                .filter(|t| t.team_id == *team_id && t.is_outstanding())
                .map(|t| t.salary)
                .sum();
            let budget = allocate_fa_budget(
                *team_id,
                entry.cap.offseason_cap_space() - tendered,
                entry.personality.strategy,
            );
            market = market.with_budget(budget);
        }

        self.market = market;
        self
    }

    /// Closes every ledger's old year and tags the best expiring players. Returns the
    /// players whose contracts ran out.
    fn roll_over_caps(&mut self) -> Vec<(u32, Option<u32>)> {
        let baseline = self.config.baseline_cap(self.year);
        let mut departures = Vec::new();

        for (team_id, entry) in self.teams.iter_mut() {
            let advance = entry.cap.clone().advance_year(baseline);
            entry.cap = advance.state;
            entry.tags = TeamTagStatus::new(*team_id, self.year);

            let expiring: Vec<(&PlayerContract, &Player)> = advance
                .expired
                .iter()
                .filter_map(|c| self.players.get(&c.player_id).map(|p| (c, p)))
                .collect();

            let mut tagged_player = None;
            if let Some((player_id, tag_type, tag_count)) =
                choose_tag(&expiring, &entry.tags, entry.cap.offseason_cap_space(), &self.conditions)
            {
                let tagged = self
                    .players
                    .get(&player_id)
                    .map(|player| {
                        FranchiseTagger::apply(&mut self.market.contract_ids, player, &entry.tags, tag_type, tag_count)
                    });

                match tagged {
                    Some(Ok(outcome)) => {
                        self.tagged.push(TagRecord {
                            team_id: *team_id,
                            player_id,
                            tag_type: outcome.tag_type,
                            value: outcome.value,
                        });
                        entry.cap = entry.cap.clone().sign_contract(outcome.contract);
                        entry.tags = outcome.status;
                        tagged_player = Some(player_id);
                    }
                    Some(Err(error)) => warn!("team {} could not tag player {}: {}", team_id, player_id, error),
                    None => {}
                }
            }

            for contract in &advance.expired {
                if Some(contract.player_id) == tagged_player {
                    continue;
                }
                entry.team.remove_player(contract.player_id);
                departures.push((contract.player_id, Some(*team_id)));
            }
        }

        departures
    }

    /// Teams short of their cap space target restructure, ask for pay cuts and release
    /// players. Released players hit the market without a previous team so they never
    /// count toward compensatory picks.
    fn clear_cap_space(&mut self) -> Vec<(u32, Option<u32>)> {
        let mut departures = Vec::new();

        for (team_id, entry) in self.teams.iter_mut() {
            let target = round_money(entry.cap.salary_cap as f64 * CAP_SPACE_TARGET);
            let mut rng = self.rng.fork(*team_id as u64);

            let relief =
                relieve_cap(entry.cap.clone(), &self.players, target, &mut self.market.contract_ids, &mut rng);
            for released in &relief.released {
                entry.team.remove_player(released.player_id);
                departures.push((released.player_id, None));
            }
            entry.cap = relief.state;
            entry.cap_moves.extend(relief.moves);
        }

        departures
    }

    // ==================== Market days ====================

    /// Plays one offseason day in the current phase, then ends the day.
    pub fn simulate_day(mut self) -> Self {
        if !self.started {
            self = self.begin();
        }
        if self.is_finished() {
            return self;
        }

        let phase = self.market.phase;
        debug!("offseason day {} ({})", self.market.day, phase);

        self = match phase {
            FreeAgencyPhase::LegalTampering => self.run_tampering(),
            FreeAgencyPhase::Day1Frenzy => self.run_frenzy(),
            FreeAgencyPhase::Day2Frenzy | FreeAgencyPhase::Trickle => self.run_open_market(),
            FreeAgencyPhase::TrainingCamp => self.run_open_market().sign_roster_fillers(),
            FreeAgencyPhase::PreFreeAgency | FreeAgencyPhase::Closed => self,
        };

        self = self.decide_offer_sheets();
        self.book_signings();

        self.market = self.market.advance_day();
        self.book_signings();

        if self.market.phase == FreeAgencyPhase::TrainingCamp && self.market.phase_day == 0 {
            self = self.release_reserves();
        }

        self.refresh_conditions();
        self
    }

    /// Runs days until the market closes.
    pub fn play_out(mut self) -> Self {
        if !self.started {
            self = self.begin();
        }
        while !self.is_finished() {
            self = self.simulate_day();
        }
        self
    }

    /// Plays the whole offseason and reports on it.
    pub fn run(self) -> (Self, OffseasonReport) {
        let finished = self.play_out();
        let report = OffseasonReport::from_offseason(&finished);
        report.log();
        (finished, report)
    }

    fn per_team_rng(&self, team_id: u32) -> SeededRandom {
        self.rng.fork(((self.market.day as u64) << 32) | team_id as u64)
    }

    fn tender_elsewhere(&self, team_id: u32, free_agent_id: u32) -> Option<&TenderOffer> {
        self.market
            .tenders
            .get(&free_agent_id)
            .filter(|t| t.is_outstanding() && t.team_id != team_id)
    }

    /// Every team's targets for today. Teams plan in parallel from the same snapshot; the
    /// result is ordered by need, then team, then each team's own order.
    fn plan_offers(&self) -> Vec<OfferEvaluation> {
        let entries: Vec<&TeamOffseason> = self.teams.values().collect();

        let mut plans: Vec<OfferEvaluation> = entries
            .par_iter()
            .map(|entry| self.plan_team(entry))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();

        plans.sort_by(|a, b| b.need.cmp(&a.need).then(a.team_id.cmp(&b.team_id)));
        plans
    }

    fn plan_team(&self, entry: &TeamOffseason) -> Vec<OfferEvaluation> {
        let team_id = entry.team.id;
        let roster = self.roster(team_id);
        if roster.len() >= self.config.market.roster_limit {
            return Vec::new();
        }

        let needs = assess_team_needs(team_id, &roster, &entry.cap);
        let mut budget = self.market.budget_remaining(team_id).unwrap_or(0);

        let mut candidates: Vec<&FreeAgent> = self
            .market
            .available_free_agents()
            .filter(|a| needs.level(a.position()) != NeedLevel::None)
            .filter(|a| self.market.pending_offer(team_id, a.id).is_none())
            .filter(|a| self.market.negotiations.get(team_id, a.id).is_none())
            .filter(|a| self.market.pending_offer_sheet(a.id).is_none())
            .filter(|a| {
                !self
                    .market
                    .tenders
                    .get(&a.id)
                    .is_some_and(|t| t.is_outstanding() && (t.team_id == team_id || t.level.is_exclusive()))
            })
            .collect();
        candidates.sort_by(|a, b| {
            needs
                .level(b.position())
                .cmp(&needs.level(a.position()))
                .then(b.market_aav().cmp(&a.market_aav()))
                .then(a.id.cmp(&b.id))
        });

        let mut plans: Vec<OfferEvaluation> = Vec::new();
        let mut positions: Vec<Position> = Vec::new();
        for agent in candidates {
            if plans.len() >= OFFERS_PER_DAY {
                break;
            }
            if positions.contains(&agent.position()) {
                continue;
            }

            let asking = asking_aav(agent, &self.conditions);
            if let Some(plan) = evaluate_free_agent(team_id, agent, asking, &needs, &entry.personality, budget) {
                budget -= plan.offer.aav();
                positions.push(agent.position());
                plans.push(plan);
            }
        }

        plans
    }

    fn run_tampering(mut self) -> Self {
        let plans = self.plan_offers();

        for plan in plans {
            if self.tender_elsewhere(plan.team_id, plan.free_agent_id).is_some() {
                continue;
            }
            self.market = self.market.negotiate(plan.team_id, plan.free_agent_id, &plan.offer);
        }
        self
    }

    /// Day one: players wanted by several teams go to a bidding war, everyone else gets
    /// plain offers.
    fn run_frenzy(mut self) -> Self {
        let plans = self.plan_offers();
        let mut by_agent: BTreeMap<u32, Vec<OfferEvaluation>> = BTreeMap::new();
        for plan in plans {
            by_agent.entry(plan.free_agent_id).or_default().push(plan);
        }

        for (free_agent_id, group) in by_agent {
            let Some(agent) = self.market.free_agent(free_agent_id).filter(|a| a.is_on_market()) else {
                continue;
            };
            let contested = group.len() >= 2 && agent.market_value.tier >= SkillTier::Starter;

            let tendered = self.market.tenders.get(&free_agent_id).is_some_and(|t| t.is_outstanding());

            if contested && !tendered {
                self = self.open_bidding_war(free_agent_id, &group);
            } else {
                for plan in group {
                    self = self.place_offer(plan);
                }
            }
        }

        self.market = self.market.resolve_offers(&self.conditions);
        self
    }

    fn open_bidding_war(mut self, free_agent_id: u32, group: &[OfferEvaluation]) -> Self {
        let Some(opening) = group
            .iter()
            .max_by(|a, b| a.offer.aav().cmp(&b.offer.aav()).then(b.team_id.cmp(&a.team_id)))
        else {
            return self;
        };

        let bidders: Vec<Bidder> = group
            .iter()
            .filter_map(|plan| {
                let entry = self.teams.get(&plan.team_id)?;
                Some(Bidder {
                    team_id: plan.team_id,
                    valuation_aav: plan.valuation_aav,
                    personality: entry.personality.clone(),
                })
            })
            .collect();
        let teams: Vec<u32> = bidders.iter().map(|b| b.team_id).collect();

        let mut rng = self.rng.fork(((self.market.day as u64) << 32) | (1 << 31) | free_agent_id as u64);
        let opened = self
            .market
            .try_start_bidding_war(free_agent_id, teams, opening.team_id, opening.offer.to_terms());

        match opened {
            Ok(started) => {
                info!("bidding war for free agent {} between {} teams", free_agent_id, bidders.len());
                self.market = run_bidding_war(started, free_agent_id, &bidders, &mut rng);
            }
            Err(error) => {
                debug!("no bidding war for free agent {}: {}", free_agent_id, error);
                for plan in group {
                    self = self.place_offer(plan.clone());
                }
            }
        }

        self
    }

    /// Submits a planned offer, or an offer sheet when another team holds a tender on the player.
    fn place_offer(mut self, plan: OfferEvaluation) -> Self {
        let tender = self
            .tender_elsewhere(plan.team_id, plan.free_agent_id)
            .map(|t| (t.level.is_exclusive(), t.compensation));

        match tender {
            None => self.market = self.market.submit_offer(plan.team_id, plan.free_agent_id, &plan.offer),
            Some((false, compensation)) if worth_offer_sheet(plan.need, compensation) => {
                self.market = self.market.sign_offer_sheet(plan.team_id, plan.free_agent_id, &plan.offer)
            }
            Some(_) => {}
        }
        self
    }

    fn run_open_market(mut self) -> Self {
        for plan in self.plan_offers() {
            self = self.place_offer(plan);
        }
        self.market = self.market.resolve_offers(&self.conditions);
        self
    }

    /// Original teams answer offer sheets the day after they are signed.
    fn decide_offer_sheets(mut self) -> Self {
        let day = self.market.day;
        let pending: Vec<OfferSheet> = self
            .market
            .offer_sheets
            .values()
            .filter(|s| s.is_pending() && s.signed_day < day)
            .cloned()
            .collect();

        for sheet in pending {
            let matched = match (self.teams.get(&sheet.original_team_id), self.market.free_agent(sheet.free_agent_id)) {
                (Some(entry), Some(agent)) => should_match_offer_sheet(
                    &sheet,
                    agent.market_aav(),
                    entry.cap.offseason_cap_space(),
                    &entry.personality,
                ),
                _ => false,
            };

            self.market = if matched {
                self.market.match_offer_sheet(sheet.id)
            } else {
                self.market.decline_to_match(sheet.id)
            };
        }

        self
    }

    /// Teams below the roster floor sign the cheapest remaining players at the minimum.
    fn sign_roster_fillers(mut self) -> Self {
        let floor = roster_minimum();
        let team_ids: Vec<u32> = self.teams.keys().copied().collect();

        for team_id in team_ids {
            let Some(entry) = self.teams.get(&team_id) else {
                continue;
            };
            let roster = self.roster(team_id);
            if roster.len() >= floor {
                continue;
            }

            let needs = assess_team_needs(team_id, &roster, &entry.cap);
            let candidates: Vec<&FreeAgent> = self
                .market
                .available_free_agents()
                .filter(|a| self.tender_elsewhere(team_id, a.id).is_none())
                .collect();
            let mut rng = self.per_team_rng(team_id);
            let picks = pick_roster_fillers(&needs, &candidates, floor - roster.len(), &mut rng);

            let offers: Vec<(u32, ContractOffer)> = picks
                .into_iter()
                .filter_map(|id| self.market.free_agent(id))
                .map(|a| (a.id, ContractOffer::new(1, 0, minimum_salary(a.player.experience))))
                .collect();

            for (free_agent_id, offer) in offers {
                self.market = self
                    .market
                    .sign_free_agent(team_id, free_agent_id, &offer, SigningSource::RosterFiller);
            }
            self.book_signings();
        }

        self
    }

    /// Camp opens: the money held back for the season is free for roster fillers.
    fn release_reserves(mut self) -> Self {
        let budgets: Vec<_> = self.market.team_budgets.values().cloned().collect();
        for budget in budgets {
            self.market = self.market.with_budget(budget.release_reserve());
        }
        self
    }

    /// Moves new signings onto team rosters and cap ledgers.
    fn book_signings(&mut self) {
        let signings = self.market.signings_since(self.booked_signings).to_vec();
        self.booked_signings = self.market.signings.len();

        for signing in signings {
            if let Some(entry) = self.teams.get_mut(&signing.team_id) {
                debug!(
                    "booking contract {} for team {}, cap hit {}",
                    signing.contract.id,
                    signing.team_id,
                    CurrencyFormatter::format(signing.contract.cap_hit_for_year(self.year))
                );
                entry.cap = entry.cap.clone().sign_contract(signing.contract);
                entry.team.add_player(signing.player_id);
            }
            if let Some(player) = self.players.get_mut(&signing.player_id) {
                player.team_id = Some(signing.team_id);
            }
        }
    }

    fn refresh_conditions(&mut self) {
        let supply: Vec<Position> = self.market.available_free_agents().map(|a| a.position()).collect();
        self.refresh_conditions_with(supply);
    }

    /// League-wide supply and demand: every open need on every team against the players available.
    fn refresh_conditions_with(&mut self, supply: Vec<Position>) {
        let entries: Vec<&TeamOffseason> = self.teams.values().collect();
        let demand: Vec<Position> = entries
            .par_iter()
            .map(|entry| {
                let roster = self.roster(entry.team.id);
                assess_team_needs(entry.team.id, &roster, &entry.cap)
                    .open_positions()
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();

        self.conditions = MarketConditions::observe(supply, demand);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::contract::{ContractGenerator, ContractType};

    /// Teams one body over every position minimum, a quarter of contracts running out.
    pub(crate) fn sample_league(teams: u32) -> (Vec<Team>, Vec<Player>, Vec<SalaryCapState>) {
        let mut team_list = Vec::new();
        let mut players = Vec::new();
        let mut caps = Vec::new();
        let mut next_id = 1u32;
        let mut contract_ids = ContractIdSequence::default();

        for team_id in 1..=teams {
            let mut cap = SalaryCapState::new(team_id, 2023, 238_700);
            let mut roster = Vec::new();

            for position in Position::ALL {
                for _ in 0..=position.roster_minimum() {
                    let rating = 62 + ((next_id * 7 + team_id * 3) % 30) as u8;
                    let age = 23 + (next_id % 10) as u8;
                    let player = Player::new(next_id, &format!("Player {}", next_id), position, age, age - 21, rating)
                        .with_team(Some(team_id));

                    let years = 1 + (next_id % 4) as u8;
                    let offer = ContractOffer::new(years, 200, 800 + rating as Money * 20);
                    let contract = ContractGenerator::create_contract(
                        &mut contract_ids,
                        &offer,
                        next_id,
                        team_id,
                        position,
                        2023,
                        ContractType::Veteran,
                    )
                    .unwrap();

                    cap = cap.sign_contract(contract);
                    roster.push(next_id);
                    players.push(player);
                    next_id += 1;
                }
            }

            team_list.push(Team::new(team_id, &format!("Team {}", team_id), &format!("T{}", team_id)).with_roster(roster));
            caps.push(cap);
        }

        (team_list, players, caps)
    }

    fn offseason(teams: u32, seed: u64) -> Offseason {
        let (teams, players, caps) = sample_league(teams);
        let config = OffseasonConfig {
            seed,
            ..OffseasonConfig::default()
        };
        Offseason::new(config, teams, players, caps)
    }

    #[test]
    fn roster_minimum_covers_every_position() {
        assert_eq!(roster_minimum(), 43);
    }

    #[test]
    fn begin_rolls_caps_and_fills_the_pool() {
        let offseason = offseason(4, 1).begin();

        assert!(offseason.is_started());
        assert!(!offseason.market.free_agents.is_empty());
        for entry in offseason.teams.values() {
            assert_eq!(entry.cap.current_year, 2024);
            assert!(entry.cap.offseason_cap_space() >= 0);
        }

        for agent in offseason.market.free_agents.values() {
            assert_eq!(offseason.players[&agent.player_id()].team_id, None);
            if let Some(team_id) = agent.previous_team_id {
                assert!(!offseason.teams[&team_id].team.roster.contains(&agent.player_id()));
            }
        }
    }

    #[test]
    fn begin_twice_changes_nothing() {
        let once = offseason(2, 3).begin();
        let agents = once.market.free_agents.len();

        let twice = once.begin();
        assert_eq!(twice.market.free_agents.len(), agents);
    }

    #[test]
    fn simulate_day_starts_the_offseason() {
        let offseason = offseason(2, 5).simulate_day();

        assert!(offseason.is_started());
        assert_eq!(offseason.market.day, 1);
        assert_eq!(offseason.market.phase, FreeAgencyPhase::PreFreeAgency);
    }

    #[test]
    fn every_signing_is_booked() {
        let offseason = offseason(4, 11).play_out();

        assert!(offseason.is_finished());
        assert!(!offseason.market.signings.is_empty());

        for signing in &offseason.market.signings {
            let entry = &offseason.teams[&signing.team_id];
            assert!(entry.team.roster.contains(&signing.player_id));
            assert!(entry.cap.contract_for_player(signing.player_id).is_some());
            assert_eq!(offseason.players[&signing.player_id].team_id, Some(signing.team_id));
        }
    }

    #[test]
    fn same_seed_same_offseason() {
        let (_, first) = offseason(4, 42).run();
        let (_, second) = offseason(4, 42).run();

        assert_eq!(first.signings, second.signings);
        assert_eq!(first.tenders, second.tenders);
        assert_eq!(first.cap_moves, second.cap_moves);
    }

    #[test]
    fn same_seed_same_ledgers() {
        let (first, _) = offseason(4, 42).run();
        let (second, _) = offseason(4, 42).run();

        assert!(!first.market.signings.is_empty());
        assert_eq!(first.market.signings, second.market.signings);
        assert_eq!(first.tagged, second.tagged);
        for (team_id, entry) in &first.teams {
            assert_eq!(entry.cap, second.teams[team_id].cap);
        }
    }

    #[test]
    fn market_contract_ids_follow_the_ledgers() {
        let offseason = offseason(2, 5);
        let highest = offseason
            .teams
            .values()
            .flat_map(|entry| entry.cap.contracts.keys())
            .max()
            .copied()
            .unwrap();

        let mut ids = offseason.market.contract_ids.clone();
        assert_eq!(ids.next_id(), highest + 1);
    }
}
