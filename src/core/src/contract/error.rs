use crate::contract::TagType;
use crate::shared::{CurrencyFormatter, Money};
use thiserror::Error;

fn money(amount: &Money) -> String {
    CurrencyFormatter::format(*amount)
}

/// Why a contract operation was refused. The display text is meant for the front-office screen.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractError {
    #[error("Contract is not active")]
    NotActive,
    #[error("Contract has no years remaining")]
    NoYearsRemaining,
    #[error("Contract length must be at least one year")]
    InvalidYears,
    #[error("Amount must be positive")]
    NonPositiveAmount,
    #[error("Year {year} is outside the contract")]
    YearOutsideContract { year: i32 },
    #[error("Maximum restructure amount is {}", money(.max))]
    ExceedsRestructureMaximum { max: Money },
    #[error("New salary must be below the current salary of {}", money(.current))]
    PayCutNotLower { current: Money },
    #[error("Salary cannot drop below the minimum of {}", money(.minimum))]
    BelowMinimumSalary { minimum: Money },
    #[error("Player refused the pay cut")]
    PayCutRefused,
    #[error("Post-June 1 releases are only available on or after June 1")]
    PostJune1Unavailable,
    #[error("Designated post-June 1 releases are limited to {limit} per year")]
    DesignatedLimitReached { limit: u8 },
    #[error("Extension length must be between 1 and {max} years")]
    InvalidExtensionLength { max: u8 },
    #[error("The {tag_type} tag has already been used in {year}")]
    TagAlreadyUsed { tag_type: TagType, year: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restructure_message_formats_money() {
        let error = ContractError::ExceedsRestructureMaximum { max: 6_705 };
        assert_eq!(error.to_string(), "Maximum restructure amount is $6.7M");
    }

    #[test]
    fn tag_message_names_the_tag() {
        let error = ContractError::TagAlreadyUsed {
            tag_type: TagType::Franchise,
            year: 2025,
        };
        assert_eq!(error.to_string(), "The franchise tag has already been used in 2025");
    }
}
