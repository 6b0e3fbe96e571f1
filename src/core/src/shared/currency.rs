/// Money in thousands of dollars. `12_500` is $12.5M.
pub type Money = i64;

pub struct CurrencyFormatter;

impl CurrencyFormatter {
    /// Formats an amount the way the front office screens show it: `$12.5M`, `$795K`.
    pub fn format(amount: Money) -> String {
        let sign = if amount < 0 { "-" } else { "" };
        let abs = amount.unsigned_abs();

        if abs >= 1000 {
            format!("{}${:.1}M", sign, abs as f64 / 1000.0)
        } else {
            format!("{}${}K", sign, abs)
        }
    }

    pub fn format_signed(amount: Money) -> String {
        if amount > 0 {
            format!("+{}", Self::format(amount))
        } else {
            Self::format(amount)
        }
    }
}

/// Rounds a fractional amount to whole thousands.
pub fn round_money(amount: f64) -> Money {
    amount.round() as Money
}

/// Multiplies an amount by a factor, rounding to whole thousands.
pub fn scale_money(amount: Money, factor: f64) -> Money {
    round_money(amount as f64 * factor)
}
