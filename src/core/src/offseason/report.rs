use crate::ai::CapMove;
use crate::cap::CapSummary;
use crate::free_agency::{
    CompensatoryPick, DraftCompensation, FreeAgencyEventKind, FreeAgencyPhase, FreeAgentStatus, SigningSource,
    TenderLevel, award_picks,
};
use crate::league::Position;
use crate::offseason::{Offseason, TagRecord};
use crate::shared::{CurrencyFormatter, Money};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigningLine {
    pub team_id: u32,
    pub player_id: u32,
    pub position: Position,
    pub years: u8,
    pub aav: Money,
    pub guaranteed: Money,
    pub day: u32,
    pub phase: FreeAgencyPhase,
    pub source: SigningSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenderLine {
    pub team_id: u32,
    pub player_id: u32,
    pub level: TenderLevel,
    pub salary: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferSheetLine {
    pub player_id: u32,
    pub original_team_id: u32,
    pub offering_team_id: u32,
    pub aav: Money,
    pub matched: bool,
    pub compensation: DraftCompensation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiddingWarLine {
    pub player_id: u32,
    pub teams: usize,
    pub rounds: u32,
    pub winner: Option<u32>,
    pub aav: Money,
}

/// Everything that happened in one offseason, in a form ready for display or persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffseasonReport {
    pub year: i32,
    pub days: u32,
    pub signings: Vec<SigningLine>,
    pub tags: Vec<TagRecord>,
    pub tenders: Vec<TenderLine>,
    pub offer_sheets: Vec<OfferSheetLine>,
    pub bidding_wars: Vec<BiddingWarLine>,
    pub compensatory_picks: Vec<CompensatoryPick>,
    pub retired: Vec<u32>,
    pub unsigned: Vec<u32>,
    pub cap_moves: BTreeMap<u32, Vec<CapMove>>,
    pub caps: Vec<CapSummary>,
}

impl OffseasonReport {
    pub fn from_offseason(offseason: &Offseason) -> Self {
        let market = &offseason.market;
        let player_of = |free_agent_id: u32| market.free_agent(free_agent_id).map(|a| a.player_id());

        let signings = market
            .signings
            .iter()
            .map(|s| SigningLine {
                team_id: s.team_id,
                player_id: s.player_id,
                position: s.contract.position,
                years: s.contract.total_years,
                aav: s.contract.aav(),
                guaranteed: s.contract.guaranteed_money,
                day: s.day,
                phase: s.phase,
                source: s.source,
            })
            .collect();

        let tenders = market
            .tenders
            .values()
            .map(|t| TenderLine {
                team_id: t.team_id,
                player_id: t.player_id,
                level: t.level,
                salary: t.salary,
            })
            .collect();

        let offer_sheets = market
            .events
            .iter()
            .filter_map(|event| match &event.kind {
                FreeAgencyEventKind::OfferSheetMatched { sheet_id, .. } => Some((*sheet_id, true)),
                FreeAgencyEventKind::OfferSheetDeclined { sheet_id, .. } => Some((*sheet_id, false)),
                _ => None,
            })
            .filter_map(|(sheet_id, matched)| {
                let sheet = market.offer_sheets.get(&sheet_id)?;
                Some(OfferSheetLine {
                    player_id: sheet.player_id,
                    original_team_id: sheet.original_team_id,
                    offering_team_id: sheet.offering_team_id,
                    aav: sheet.offer.aav(),
                    matched,
                    compensation: if matched { DraftCompensation::None } else { sheet.compensation },
                })
            })
            .collect();

        let bidding_wars = market
            .bidding_wars
            .values()
            .filter_map(|war| {
                let agent = market.free_agent(war.free_agent_id)?;
                Some(BiddingWarLine {
                    player_id: agent.player_id(),
                    teams: war.participating_teams.len(),
                    rounds: war.rounds_elapsed,
                    winner: agent.signed_team_id,
                    aav: war.current_high_bid.aav(),
                })
            })
            .collect();

        let rules = &market.rules;
        let compensatory_picks = award_picks(
            &market.compensatory,
            market.salary_cap,
            rules.compensatory_qualifying_share,
            rules.compensatory_picks_per_team,
        );

        let retired = market
            .events
            .iter()
            .filter_map(|event| match event.kind {
                FreeAgencyEventKind::PlayerRetired { player_id, .. } => Some(player_id),
                _ => None,
            })
            .collect();

        let unsigned = market
            .free_agents
            .values()
            .filter(|a| a.status == FreeAgentStatus::Available || a.status == FreeAgentStatus::Negotiating)
            .filter_map(|a| player_of(a.id))
            .collect();

        let cap_moves = offseason
            .teams
            .iter()
            .filter(|(_, entry)| !entry.cap_moves.is_empty())
            .map(|(team_id, entry)| (*team_id, entry.cap_moves.clone()))
            .collect();

        let caps = offseason.teams.values().map(|entry| CapSummary::new(&entry.cap)).collect();

        OffseasonReport {
            year: offseason.year,
            days: market.day,
            signings,
            tags: offseason.tagged.clone(),
            tenders,
            offer_sheets,
            bidding_wars,
            compensatory_picks,
            retired,
            unsigned,
            cap_moves,
            caps,
        }
    }

    pub fn total_spent(&self) -> Money {
        self.signings.iter().map(|s| s.aav).sum()
    }

    pub fn signings_by_team(&self) -> BTreeMap<u32, Vec<&SigningLine>> {
        let mut by_team: BTreeMap<u32, Vec<&SigningLine>> = BTreeMap::new();
        for line in &self.signings {
            by_team.entry(line.team_id).or_default().push(line);
        }
        by_team
    }

    /// The biggest contract of the offseason, ties to the earlier signing.
    pub fn headline_signing(&self) -> Option<&SigningLine> {
        self.signings
            .iter()
            .rev()
            .max_by_key(|s| s.aav)
    }

    pub fn log(&self) {
        info!(
            "offseason {} finished after {} days: {} signings worth {} per year",
            self.year,
            self.days,
            self.signings.len(),
            CurrencyFormatter::format(self.total_spent())
        );

        if let Some(headline) = self.headline_signing() {
            info!(
                "biggest deal: player {} ({}) to team {}, {} years at {}",
                headline.player_id,
                headline.position,
                headline.team_id,
                headline.years,
                CurrencyFormatter::format(headline.aav)
            );
        }

        for tag in &self.tags {
            info!(
                "{} tag: team {} on player {} for {}",
                tag.tag_type,
                tag.team_id,
                tag.player_id,
                CurrencyFormatter::format(tag.value)
            );
        }

        info!(
            "{} tenders, {} offer sheets, {} bidding wars",
            self.tenders.len(),
            self.offer_sheets.len(),
            self.bidding_wars.len()
        );
        for sheet in self.offer_sheets.iter().filter(|s| !s.matched) {
            info!(
                "team {} lost player {} to team {} on an offer sheet, receives {}",
                sheet.original_team_id, sheet.player_id, sheet.offering_team_id, sheet.compensation
            );
        }

        for (team_id, moves) in &self.cap_moves {
            let savings: Money = moves.iter().map(|m| m.savings()).sum();
            info!(
                "team {} cleared {} in {} cap moves",
                team_id,
                CurrencyFormatter::format(savings),
                moves.len()
            );
        }

        for pick in &self.compensatory_picks {
            info!(
                "compensatory pick: team {} gets a round {} pick in {} for player {}",
                pick.team_id, pick.round, pick.draft_year, pick.lost_player_id
            );
        }

        info!("{} players retired, {} left unsigned", self.retired.len(), self.unsigned.len());

        for cap in &self.caps {
            info!(
                "team {}: {} used of {}, space {}, dead money {}",
                cap.team_id, cap.cap_usage_display, cap.salary_cap_display, cap.cap_space_display, cap.dead_money_display
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OffseasonConfig;
    use crate::offseason::driver::tests::sample_league;

    fn played() -> (Offseason, OffseasonReport) {
        let (teams, players, caps) = sample_league(4);
        Offseason::new(OffseasonConfig::default(), teams, players, caps).run()
    }

    #[test]
    fn report_mirrors_the_market() {
        let (offseason, report) = played();

        assert_eq!(report.year, 2024);
        assert_eq!(report.signings.len(), offseason.market.signings.len());
        assert_eq!(report.tenders.len(), offseason.market.tenders.len());
        assert_eq!(report.caps.len(), 4);
        assert_eq!(report.days, offseason.market.day);
    }

    #[test]
    fn total_spent_adds_up_team_lines() {
        let (_, report) = played();

        let by_team: Money = report
            .signings_by_team()
            .values()
            .flat_map(|lines| lines.iter().map(|l| l.aav))
            .sum();
        assert_eq!(report.total_spent(), by_team);
    }

    #[test]
    fn unsigned_players_were_never_signed() {
        let (offseason, report) = played();

        for player_id in &report.unsigned {
            assert!(!offseason.market.signings.iter().any(|s| s.player_id == *player_id));
            assert!(!report.retired.contains(player_id));
        }
    }

    #[test]
    fn headline_is_the_biggest_deal() {
        let (_, report) = played();

        if let Some(headline) = report.headline_signing() {
            assert!(report.signings.iter().all(|s| s.aav <= headline.aav));
        }
    }
}
