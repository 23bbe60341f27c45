//! Price and financing arithmetic.

/// Monthly payment for `price` over `months` at `apr` percent, 2 decimals.
///
/// Zero APR divides evenly; otherwise the standard amortizing-loan formula
/// `P·r·(1+r)^n / ((1+r)^n − 1)` with `r = apr/100/12`.
pub fn calculate_monthly_payment(price: f64, months: u32, apr: f64) -> String {
    if months == 0 {
        return format!("{:.2}", 0.0);
    }
    let n = months as f64;
    let payment = if apr <= 0.0 {
        price / n
    } else {
        let r = apr / 100.0 / 12.0;
        let growth = (1.0 + r).powf(n);
        price * r * growth / (growth - 1.0)
    };
    format!("{:.2}", payment)
}

/// Whole-percent discount from `original` down to `price`.
///
/// `None` unless both prices are positive and `price` is below `original`.
pub fn discount_percent(original: f64, price: f64) -> Option<i64> {
    if original <= 0.0 || price <= 0.0 || price >= original {
        return None;
    }
    Some(((original - price) / original * 100.0).round() as i64)
}

/// `$1,299.99` style: thousands separators, 2 decimals.
pub fn format_price(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_apr_divides_evenly() {
        assert_eq!(calculate_monthly_payment(1200.0, 12, 0.0), "100.00");
    }

    #[test]
    fn test_interest_raises_payment() {
        let with_interest: f64 = calculate_monthly_payment(1200.0, 12, 12.0).parse().unwrap();
        assert!(with_interest > 100.0);
        // 1% monthly over 12 months
        assert_eq!(calculate_monthly_payment(1200.0, 12, 12.0), "106.62");
    }

    #[test]
    fn test_zero_months() {
        assert_eq!(calculate_monthly_payment(1200.0, 0, 5.0), "0.00");
    }

    #[test]
    fn test_discount() {
        assert_eq!(discount_percent(1000.0, 800.0), Some(20));
        assert_eq!(discount_percent(1499.99, 1299.99), Some(13));
        assert_eq!(discount_percent(0.0, 800.0), None);
    }

    #[test]
    fn test_no_discount_when_price_not_lower() {
        assert_eq!(discount_percent(800.0, 1000.0), None);
        assert_eq!(discount_percent(1000.0, 1000.0), None);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1299.99), "$1,299.99");
        assert_eq!(format_price(5.0), "$5.00");
        assert_eq!(format_price(1234567.891), "$1,234,567.89");
        assert_eq!(format_price(999.999), "$1,000.00");
    }
}
