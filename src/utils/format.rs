use crate::domain::model::Mode;

/// `$10,000.00` style; negatives put the sign before the symbol.
pub fn format_currency(value: f64, symbol: &str) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", sign, symbol, group_thousands(whole), cents)
}

pub fn format_fixed(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

pub fn format_percent(value: f64, precision: usize) -> String {
    format!("{:.*}%", precision, value)
}

pub fn format_mode(mode: &Mode, precision: usize) -> String {
    match mode {
        Mode::NoMode => mode.to_string(),
        Mode::Values(values) => values
            .iter()
            .map(|v| format_fixed(*v, precision))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
