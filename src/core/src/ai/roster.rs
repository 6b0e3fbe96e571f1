use crate::ai::{NeedLevel, TeamNeeds, TeamPersonality};
use crate::cap::SalaryCapState;
use crate::contract::{
    ContractCutter, ContractIdSequence, ContractRestructurer, ContractType, CutRequest, CutType,
    DESIGNATED_POST_JUNE_1_LIMIT, FranchiseTagger, PayCutNegotiator, PlayerContract, RestructureRequest, TagType,
    TeamTagStatus, minimum_salary,
};
use crate::free_agency::{DraftCompensation, FreeAgent, FreeAgentType, OfferSheet, TenderLevel};
use crate::league::{LeagueCalendar, Player};
use crate::shared::{Money, RandomSource, round_money};
use crate::valuation::{MarketConditions, MarketValueCalculator, SkillTier};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Oldest player a team still restructures; older contracts are cut or trimmed instead.
const RESTRUCTURE_MAX_AGE: u8 = 31;
const PAY_CUT_MIN_AGE: u8 = 30;
const PAY_CUT_RATIO: f64 = 0.75;
/// Players rated this high are kept whatever they cost.
const CORE_PLAYER_RATING: u8 = 80;
/// Most a filler may be worth on the market before a team looks elsewhere.
const FILLER_VALUE_LIMIT: f64 = 3.0;

// ==================== Tags and tenders ====================

/// Picks the expiring player worth a tag. The franchise tag goes to the most valuable
/// player whose market price is close to the tag value; the transition tag is the fallback
/// once the franchise tag is used.
pub fn choose_tag(
    expiring: &[(&PlayerContract, &Player)],
    status: &TeamTagStatus,
    cap_space: Money,
    conditions: &MarketConditions,
) -> Option<(u32, TagType, u8)> {
    let tag_type = [TagType::Franchise, TagType::Transition]
        .into_iter()
        .find(|t| !status.is_used(*t))?;

    expiring
        .iter()
        .filter(|(_, player)| {
            SkillTier::from_rating(player.rating) >= SkillTier::ProBowl && player.age <= 30 && player.experience >= 4
        })
        .filter_map(|(contract, player)| {
            let tag_count = match contract.contract_type {
                ContractType::FranchiseTag | ContractType::TransitionTag => 2,
                _ => 1,
            };
            let value = FranchiseTagger::tag_value(player.position, tag_type, tag_count, status.year);
            let market = MarketValueCalculator::calculate(player, status.year, conditions).aav;

            (value <= cap_space && market as f64 >= value as f64 * 0.85).then_some((player, tag_count, market))
        })
        .max_by(|a, b| a.2.cmp(&b.2).then(b.0.id.cmp(&a.0.id)))
        .map(|(player, tag_count, _)| (player.id, tag_type, tag_count))
}

pub fn choose_tender(agent: &FreeAgent) -> Option<TenderLevel> {
    let rating = agent.player.rating;
    match agent.free_agent_type {
        FreeAgentType::ExclusiveRights if rating >= 55 => Some(TenderLevel::ExclusiveRights),
        FreeAgentType::Restricted => match rating {
            85.. => Some(TenderLevel::FirstRound),
            75..=84 => Some(TenderLevel::SecondRound),
            65..=74 if agent.player.drafted => Some(TenderLevel::OriginalRound),
            65..=74 => Some(TenderLevel::RightOfFirstRefusal),
            _ => None,
        },
        _ => None,
    }
}

/// Whether an outside team goes after a tendered player. Nobody gives up a first round pick
/// for a player it only wants as depth.
pub fn worth_offer_sheet(need: NeedLevel, compensation: DraftCompensation) -> bool {
    match compensation {
        DraftCompensation::FirstRound => need == NeedLevel::Critical,
        _ => need >= NeedLevel::Moderate,
    }
}

pub fn should_match_offer_sheet(
    sheet: &OfferSheet,
    market_aav: Money,
    cap_space: Money,
    personality: &TeamPersonality,
) -> bool {
    let aav = sheet.offer.aav();
    if aav > cap_space {
        return false;
    }

    // a first round pick back makes letting him go easier
    let tolerance = match sheet.compensation {
        DraftCompensation::FirstRound => personality.escalation_ceiling() * 0.9,
        _ => personality.escalation_ceiling(),
    };
    aav as f64 <= market_aav as f64 * tolerance
}

// ==================== Cap relief ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CapMove {
    Restructure { player_id: u32, amount: Money, savings: Money },
    PayCut { player_id: u32, savings: Money },
    Release { player_id: u32, cut_type: CutType, savings: Money },
}

impl CapMove {
    pub fn savings(&self) -> Money {
        match self {
            CapMove::Restructure { savings, .. } | CapMove::PayCut { savings, .. } | CapMove::Release { savings, .. } => {
                *savings
            }
        }
    }
}

pub struct CapRelief {
    pub state: SalaryCapState,
    pub moves: Vec<CapMove>,
    pub released: Vec<PlayerContract>,
}

/// Clears cap space until `target_space` is reached: restructures first, then pay cuts for
/// aging veterans, then releases of non-core players.
pub fn relieve_cap(
    cap: SalaryCapState,
    players: &BTreeMap<u32, Player>,
    target_space: Money,
    ids: &mut ContractIdSequence,
    rng: &mut impl RandomSource,
) -> CapRelief {
    let year = cap.current_year;
    let mut relief = CapRelief {
        state: cap,
        moves: Vec::new(),
        released: Vec::new(),
    };

    if relief.state.offseason_cap_space() >= target_space {
        return relief;
    }

    restructure_contracts(&mut relief, players, target_space, year, ids);
    request_pay_cuts(&mut relief, players, target_space, year, ids, rng);
    release_players(&mut relief, players, target_space, year);

    if !relief.moves.is_empty() {
        info!(
            "team {} cleared {} in {} moves",
            relief.state.team_id,
            relief.moves.iter().map(|m| m.savings()).sum::<Money>(),
            relief.moves.len()
        );
    }

    relief
}

fn needs_space(relief: &CapRelief, target_space: Money) -> bool {
    relief.state.offseason_cap_space() < target_space
}

fn restructure_contracts(
    relief: &mut CapRelief,
    players: &BTreeMap<u32, Player>,
    target_space: Money,
    year: i32,
    ids: &mut ContractIdSequence,
) {
    let mut candidates: Vec<(PlayerContract, u8, Money)> = relief
        .state
        .active_contracts()
        .filter(|c| c.years_remaining >= 2)
        .filter_map(|c| {
            let player = players.get(&c.player_id)?;
            let amount = ContractRestructurer::max_amount(c, year, player.experience);
            (player.age <= RESTRUCTURE_MAX_AGE && amount > 0).then(|| (c.clone(), player.experience, amount))
        })
        .collect();
    candidates.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.id.cmp(&b.0.id)));

    for (contract, player_experience, amount) in candidates {
        if !needs_space(relief, target_space) {
            return;
        }

        let request = RestructureRequest {
            year,
            amount,
            void_years: 0,
            player_experience,
        };
        match ContractRestructurer::restructure(ids, &contract, &request) {
            Ok(outcome) => {
                relief.moves.push(CapMove::Restructure {
                    player_id: contract.player_id,
                    amount,
                    savings: outcome.current_year_savings,
                });
                relief.state = relief.state.clone().replace_contract(contract.id, outcome.contract);
            }
            Err(error) => debug!("restructure of contract {} skipped: {}", contract.id, error),
        }
    }
}

fn request_pay_cuts(
    relief: &mut CapRelief,
    players: &BTreeMap<u32, Player>,
    target_space: Money,
    year: i32,
    ids: &mut ContractIdSequence,
    rng: &mut impl RandomSource,
) {
    let candidates: Vec<(PlayerContract, Player)> = relief
        .state
        .active_contracts()
        .filter_map(|c| {
            let player = players.get(&c.player_id)?;
            let eligible = player.age >= PAY_CUT_MIN_AGE
                && player.rating < CORE_PLAYER_RATING
                && c.cap_savings(year) > 2 * minimum_salary(player.experience);
            eligible.then(|| (c.clone(), player.clone()))
        })
        .collect();

    for (contract, player) in candidates {
        if !needs_space(relief, target_space) {
            return;
        }

        let new_salary = round_money(contract.cap_savings(year) as f64 * PAY_CUT_RATIO);
        match PayCutNegotiator::request(ids, &contract, &player, year, new_salary, rng) {
            Ok(outcome) => {
                relief.moves.push(CapMove::PayCut {
                    player_id: player.id,
                    savings: outcome.old_salary - outcome.new_salary,
                });
                relief.state = relief.state.clone().replace_contract(contract.id, outcome.contract);
            }
            Err(error) => debug!("pay cut for player {} failed: {}", player.id, error),
        }
    }
}

fn release_players(relief: &mut CapRelief, players: &BTreeMap<u32, Player>, target_space: Money, year: i32) {
    let calendar = LeagueCalendar::new(year);

    let mut candidates: Vec<(PlayerContract, u8)> = relief
        .state
        .active_contracts()
        .filter_map(|c| {
            let player = players.get(&c.player_id)?;
            (player.rating < CORE_PLAYER_RATING).then(|| (c.clone(), player.rating))
        })
        .collect();
    candidates.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.id.cmp(&b.0.id)));

    for (contract, _) in candidates {
        if !needs_space(relief, target_space) {
            return;
        }

        let recommendation = ContractCutter::recommend(&contract, year);
        let cut_type = if recommendation.cut_type == CutType::PostJune1
            && relief.state.designated_post_june_1_used < DESIGNATED_POST_JUNE_1_LIMIT
        {
            CutType::DesignatedPostJune1
        } else {
            CutType::Standard
        };

        let request = CutRequest {
            cut_type,
            date: calendar.offseason_start(),
            designated_used: relief.state.designated_post_june_1_used,
        };

        let savings = ContractCutter::analyze(&contract, year, cut_type).net_cap_change;
        if savings <= 0 {
            continue;
        }

        match ContractCutter::cut(&contract, &request, &calendar) {
            Ok(outcome) => {
                relief.moves.push(CapMove::Release {
                    player_id: contract.player_id,
                    cut_type,
                    savings,
                });
                relief.state = relief.state.clone().release(&outcome);
                relief.released.push(outcome.contract);
            }
            Err(error) => debug!("release of contract {} skipped: {}", contract.id, error),
        }
    }
}

// ==================== Roster fillers ====================

/// Free agents a team signs at the minimum to reach its roster floor. Positions below
/// their minimum come first; within them the team takes whoever it believes is best, its
/// read of a filler's rating being off by up to five points either way.
pub fn pick_roster_fillers(
    needs: &TeamNeeds,
    candidates: &[&FreeAgent],
    slots: usize,
    rng: &mut impl RandomSource,
) -> Vec<u32> {
    if slots == 0 {
        return Vec::new();
    }

    let mut open: BTreeMap<_, usize> = needs
        .needs
        .values()
        .map(|n| (n.position, n.minimum.saturating_sub(n.count)))
        .collect();

    let mut ranked: Vec<(i64, &FreeAgent)> = candidates
        .iter()
        .filter(|a| {
            a.market_aav() as f64 <= minimum_salary(a.player.experience) as f64 * FILLER_VALUE_LIMIT
        })
        .map(|a| (a.player.rating as i64 + rng.range_i64(-5, 5), *a))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.id.cmp(&b.1.id)));

    let mut picks = Vec::new();
    for (perceived, agent) in &ranked {
        if picks.len() >= slots {
            break;
        }
        if let Some(count) = open.get_mut(&agent.position()).filter(|n| **n > 0) {
            *count -= 1;
            debug!("team {} fills {} with free agent {} (reads as {})", needs.team_id, agent.position(), agent.id, perceived);
            picks.push(agent.id);
        }
    }

    for (_, agent) in &ranked {
        if picks.len() >= slots {
            break;
        }
        if !picks.contains(&agent.id) {
            picks.push(agent.id);
        }
    }

    picks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::assess_team_needs;
    use crate::contract::{ContractGenerator, ContractIdSequence, ContractOffer};
    use crate::league::Position;
    use crate::shared::FixedRandom;

    fn free_agent(id: u32, position: Position, experience: u8, rating: u8, drafted: bool) -> FreeAgent {
        let player = Player::new(id, "Player", position, 25, experience, rating).with_draft(drafted.then_some(2));
        let value = MarketValueCalculator::calculate(&player, 2024, &MarketConditions::new());
        FreeAgent::new(id, player, Some(1), value)
    }

    #[test]
    fn tender_levels_by_rating() {
        assert_eq!(choose_tender(&free_agent(1, Position::Safety, 3, 88, true)), Some(TenderLevel::FirstRound));
        assert_eq!(choose_tender(&free_agent(2, Position::Safety, 3, 78, true)), Some(TenderLevel::SecondRound));
        assert_eq!(choose_tender(&free_agent(3, Position::Safety, 3, 70, true)), Some(TenderLevel::OriginalRound));
        assert_eq!(
            choose_tender(&free_agent(4, Position::Safety, 3, 70, false)),
            Some(TenderLevel::RightOfFirstRefusal)
        );
        assert_eq!(choose_tender(&free_agent(5, Position::Safety, 2, 60, true)), Some(TenderLevel::ExclusiveRights));
        assert_eq!(choose_tender(&free_agent(6, Position::Safety, 6, 90, true)), None);
    }

    #[test]
    fn franchise_tag_for_the_star() {
        let star = Player::new(10, "Star", Position::WideReceiver, 27, 5, 93);
        let backup = Player::new(11, "Backup", Position::WideReceiver, 27, 5, 70);
        let offer = ContractOffer::new(4, 2_000, 5_000);
        let mut ids = ContractIdSequence::default();
        let contract =
            ContractGenerator::create_contract(&mut ids, &offer, 10, 1, Position::WideReceiver, 2020, ContractType::Veteran)
                .unwrap();
        let expiring = vec![(&contract, &star), (&contract, &backup)];

        let status = TeamTagStatus::new(1, 2024);
        let choice = choose_tag(&expiring, &status, 100_000, &MarketConditions::new());
        assert_eq!(choice, Some((10, TagType::Franchise, 1)));

        assert_eq!(choose_tag(&expiring, &status, 5_000, &MarketConditions::new()), None);
    }

    #[test]
    fn restructure_before_releasing() {
        let player = Player::new(7, "Tackle", Position::OffensiveLine, 27, 6, 84);
        let offer = ContractOffer::new(4, 2_000, 20_000);
        let mut ids = ContractIdSequence::default();
        let contract =
            ContractGenerator::create_contract(&mut ids, &offer, 7, 1, Position::OffensiveLine, 2024, ContractType::Veteran)
                .unwrap();

        let cap = SalaryCapState::new(1, 2024, 30_000).sign_contract(contract);
        let players = BTreeMap::from([(7, player)]);

        let relief = relieve_cap(cap, &players, 15_000, &mut ids, &mut FixedRandom(0.0));

        assert_eq!(relief.moves.len(), 1);
        assert!(matches!(relief.moves[0], CapMove::Restructure { player_id: 7, .. }));
        assert!(relief.released.is_empty());
        assert!(relief.state.offseason_cap_space() >= 15_000);
    }

    #[test]
    fn fillers_go_to_empty_positions() {
        let needs = assess_team_needs(1, &[], &SalaryCapState::new(1, 2024, 255_400));
        let kicker = free_agent(1, Position::Kicker, 4, 55, true);
        let second_kicker = free_agent(2, Position::Kicker, 4, 56, true);
        let guard = free_agent(3, Position::OffensiveLine, 4, 52, true);
        let candidates = vec![&kicker, &second_kicker, &guard];

        let picks = pick_roster_fillers(&needs, &candidates, 2, &mut FixedRandom(0.5));
        assert_eq!(picks.len(), 2);
        assert!(picks.contains(&3));

        assert!(picks.contains(&2));
        assert!(pick_roster_fillers(&needs, &candidates, 0, &mut FixedRandom(0.5)).is_empty());
    }
}
