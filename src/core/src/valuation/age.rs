use crate::league::PositionGroup;

const AGE_FLOOR: f64 = 0.5;
const YOUTH_PREMIUM: f64 = 1.10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeCurve {
    pub peak_age: u8,
    pub decline_rate: f64,
}

impl AgeCurve {
    pub fn for_group(group: PositionGroup) -> Self {
        let (peak_age, decline_rate) = match group {
            PositionGroup::Passer => (29, 0.06),
            PositionGroup::Rusher => (26, 0.12),
            PositionGroup::Receiver => (27, 0.08),
            PositionGroup::Trenches => (28, 0.06),
            PositionGroup::Coverage => (27, 0.09),
            PositionGroup::Specialist => (31, 0.03),
        };

        AgeCurve { peak_age, decline_rate }
    }

    /// Value multiplier at `age`: a premium well before the peak, flat up to it, then
    /// compounding decline down to the floor.
    pub fn multiplier(&self, age: u8) -> f64 {
        if age.saturating_add(3) <= self.peak_age {
            return YOUTH_PREMIUM;
        }
        if age <= self.peak_age {
            return 1.0;
        }

        let years_past_peak = (age - self.peak_age) as i32;
        (1.0 - self.decline_rate).powi(years_past_peak).max(AGE_FLOOR)
    }
}
