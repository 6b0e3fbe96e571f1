use crate::shared::Money;

/// League minimum salary by accrued seasons; everything past seven sits on the last tier.
const MINIMUM_SALARY_BY_EXPERIENCE: [Money; 8] = [795, 915, 985, 1_055, 1_125, 1_125, 1_125, 1_210];

pub fn minimum_salary(experience: u8) -> Money {
    let tier = (experience as usize).min(MINIMUM_SALARY_BY_EXPERIENCE.len() - 1);
    MINIMUM_SALARY_BY_EXPERIENCE[tier]
}

pub fn veteran_minimum() -> Money {
    MINIMUM_SALARY_BY_EXPERIENCE[MINIMUM_SALARY_BY_EXPERIENCE.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_salary_caps_at_seven_years() {
        assert_eq!(minimum_salary(0), 795);
        assert_eq!(minimum_salary(3), 1_055);
        assert_eq!(minimum_salary(7), 1_210);
        assert_eq!(minimum_salary(15), 1_210);
        assert_eq!(veteran_minimum(), 1_210);
    }

    #[test]
    fn minimum_salary_never_decreases() {
        for exp in 0..12u8 {
            assert!(minimum_salary(exp + 1) >= minimum_salary(exp));
        }
    }
}
