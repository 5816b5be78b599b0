pub mod car;
pub mod education;

pub const CURRENCY: &str = "FCFA";

/// Formats an amount with comma thousands separators, e.g. `216,000`.
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut res = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            res.push(',');
        }
        res.push(c);
    }
    res
}
