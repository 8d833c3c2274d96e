//! Parsing and display of money amounts.
//!
//! Form input is parsed permissively: the longest numeric prefix wins, and
//! anything unparsable, non-finite or negative becomes zero.

/// Clamp a numeric amount to a finite, non-negative value.
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse a user-typed amount such as `"12.50"`, `"1e3"` or `"30 quid"`.
pub fn coerce_amount(input: &str) -> f64 {
    let trimmed = input.trim();
    let bytes = trimmed.as_bytes();
    let end = trimmed
        .char_indices()
        .take_while(|&(i, c)| match c {
            '0'..='9' | '.' | 'e' | 'E' => true,
            // Signs lead the number or its exponent
            '+' | '-' => i == 0 || matches!(bytes[i - 1], b'e' | b'E'),
            _ => false,
        })
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);

    let value = (1..=end)
        .rev()
        .find_map(|n| trimmed[..n].parse::<f64>().ok())
        .unwrap_or(0.0);

    sanitize_amount(value)
}

/// Format an amount as currency, e.g. `£1,234.50`.
pub fn format_money(amount: f64, symbol: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let negative = amount < 0.0 && fixed != "0.00";
    format!(
        "{}{}{}.{}",
        if negative { "-" } else { "" },
        symbol,
        grouped,
        fraction
    )
}

/// Like [`format_money`] but renders a missing amount as `N/A`.
pub fn format_optional_money(amount: Option<f64>, symbol: &str) -> String {
    amount
        .map(|a| format_money(a, symbol))
        .unwrap_or_else(|| "N/A".to_string())
}
