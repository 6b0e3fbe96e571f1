use crate::contract::ContractError;
use crate::free_agency::FreeAgencyPhase;
use thiserror::Error;

/// Why a free agency action was not applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FreeAgencyError {
    #[error("Players cannot be signed during {phase}")]
    SigningClosed { phase: FreeAgencyPhase },
    #[error("Negotiations are only allowed during legal tampering, not {phase}")]
    NegotiationClosed { phase: FreeAgencyPhase },
    #[error("Tenders must be placed before the market opens, not during {phase}")]
    TenderWindowClosed { phase: FreeAgencyPhase },
    #[error("Unknown free agent {id}")]
    UnknownFreeAgent { id: u32 },
    #[error("Unknown offer {id}")]
    UnknownOffer { id: u32 },
    #[error("Free agent {id} is no longer on the market")]
    NotOnMarket { id: u32 },
    #[error("Offer {id} is no longer pending")]
    OfferNotPending { id: u32 },
    #[error("Team {team_id} does not have the budget for this offer")]
    InsufficientBudget { team_id: u32 },
    #[error("Team {team_id} already has an offer out to free agent {free_agent_id}")]
    DuplicateOffer { team_id: u32, free_agent_id: u32 },
    #[error("Free agent {id} is tendered and can only sign an offer sheet")]
    Tendered { id: u32 },
    #[error("Free agent {id} is retained by an exclusive rights tender")]
    ExclusiveRightsRetained { id: u32 },
    #[error("Free agent {id} is not eligible for that tender")]
    TenderNotApplicable { id: u32 },
    #[error("Free agent {id} has no tender")]
    NoTender { id: u32 },
    #[error("Free agent {id} already has a pending offer sheet")]
    OfferSheetPending { id: u32 },
    #[error("Offer sheet {id} is already resolved")]
    OfferSheetResolved { id: u32 },
    #[error("Unknown offer sheet {id}")]
    UnknownOfferSheet { id: u32 },
    #[error("A bidding war needs at least two teams")]
    NotEnoughBidders,
    #[error("The bidding war for free agent {id} is over")]
    BiddingClosed { id: u32 },
    #[error("No bidding war for free agent {id}")]
    UnknownBiddingWar { id: u32 },
    #[error("Team {team_id} is not bidding")]
    NotBidding { team_id: u32 },
    #[error("Bid does not beat the current high bid")]
    BidTooLow,
    #[error(transparent)]
    Contract(#[from] ContractError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_is_named_in_message() {
        let error = FreeAgencyError::SigningClosed {
            phase: FreeAgencyPhase::LegalTampering,
        };
        assert_eq!(error.to_string(), "Players cannot be signed during legal tampering");
    }

    #[test]
    fn contract_errors_pass_through() {
        let error: FreeAgencyError = ContractError::InvalidYears.into();
        assert_eq!(error.to_string(), "Contract length must be at least one year");
    }
}
