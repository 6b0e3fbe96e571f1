use serde::{Deserialize, Serialize};
use std::fmt;

/// Free agency runs through these phases in order, never skipping and never going back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FreeAgencyPhase {
    PreFreeAgency,
    LegalTampering,
    Day1Frenzy,
    Day2Frenzy,
    Trickle,
    TrainingCamp,
    Closed,
}

impl FreeAgencyPhase {
    pub const ORDER: [FreeAgencyPhase; 7] = [
        FreeAgencyPhase::PreFreeAgency,
        FreeAgencyPhase::LegalTampering,
        FreeAgencyPhase::Day1Frenzy,
        FreeAgencyPhase::Day2Frenzy,
        FreeAgencyPhase::Trickle,
        FreeAgencyPhase::TrainingCamp,
        FreeAgencyPhase::Closed,
    ];

    pub fn next(&self) -> Option<FreeAgencyPhase> {
        match self {
            FreeAgencyPhase::PreFreeAgency => Some(FreeAgencyPhase::LegalTampering),
            FreeAgencyPhase::LegalTampering => Some(FreeAgencyPhase::Day1Frenzy),
            FreeAgencyPhase::Day1Frenzy => Some(FreeAgencyPhase::Day2Frenzy),
            FreeAgencyPhase::Day2Frenzy => Some(FreeAgencyPhase::Trickle),
            FreeAgencyPhase::Trickle => Some(FreeAgencyPhase::TrainingCamp),
            FreeAgencyPhase::TrainingCamp => Some(FreeAgencyPhase::Closed),
            FreeAgencyPhase::Closed => None,
        }
    }

    pub fn can_sign_players(&self) -> bool {
        matches!(
            self,
            FreeAgencyPhase::Day1Frenzy
                | FreeAgencyPhase::Day2Frenzy
                | FreeAgencyPhase::Trickle
                | FreeAgencyPhase::TrainingCamp
        )
    }

    /// Talks without a binding signature.
    pub fn can_negotiate(&self) -> bool {
        *self == FreeAgencyPhase::LegalTampering
    }

    /// Tenders and tags go out before the market opens.
    pub fn can_tender(&self) -> bool {
        matches!(self, FreeAgencyPhase::PreFreeAgency | FreeAgencyPhase::LegalTampering)
    }

    pub fn is_frenzy(&self) -> bool {
        matches!(self, FreeAgencyPhase::Day1Frenzy | FreeAgencyPhase::Day2Frenzy)
    }
}

impl fmt::Display for FreeAgencyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FreeAgencyPhase::PreFreeAgency => "pre free agency",
            FreeAgencyPhase::LegalTampering => "legal tampering",
            FreeAgencyPhase::Day1Frenzy => "day 1 frenzy",
            FreeAgencyPhase::Day2Frenzy => "day 2 frenzy",
            FreeAgencyPhase::Trickle => "trickle",
            FreeAgencyPhase::TrainingCamp => "training camp",
            FreeAgencyPhase::Closed => "closed",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_followed_by_next() {
        for pair in FreeAgencyPhase::ORDER.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(FreeAgencyPhase::Closed.next(), None);
    }

    #[test]
    fn signing_window() {
        assert!(!FreeAgencyPhase::PreFreeAgency.can_sign_players());
        assert!(!FreeAgencyPhase::LegalTampering.can_sign_players());
        assert!(FreeAgencyPhase::Day1Frenzy.can_sign_players());
        assert!(FreeAgencyPhase::TrainingCamp.can_sign_players());
        assert!(!FreeAgencyPhase::Closed.can_sign_players());
        assert!(FreeAgencyPhase::LegalTampering.can_negotiate());
        assert!(!FreeAgencyPhase::Day1Frenzy.can_negotiate());
    }
}
