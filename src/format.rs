//! Display formatting utilities
//!
//! Pure functions producing en-US strings for the charts and tables.

/// Format as US dollars: `$1,234.56`, `-$1,234.56`
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("${}", non_finite(value));
    }
    let (negative, digits) = signed_fixed(value, 2);
    format!("{}${}", if negative { "-" } else { "" }, digits)
}

/// Format a value in the 0-100 domain as a percentage: `12.50%`
pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}%", non_finite(value));
    }
    let (negative, digits) = signed_fixed(value, 2);
    format!("{}{}%", if negative { "-" } else { "" }, digits)
}

/// Percentage gain of `current` over `purchase`; 0 when there is no purchase price
pub fn calculate_gain_loss(current: f64, purchase: f64) -> f64 {
    if purchase == 0.0 || purchase.is_nan() {
        return 0.0;
    }
    (current - purchase) / purchase * 100.0
}

/// Grouped number with up to three fraction digits: `1,234.5`
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value).to_string();
    }
    let (negative, digits) = signed_fixed(value, 3);
    let digits = match digits.split_once('.') {
        Some((int, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                int.to_string()
            } else {
                format!("{int}.{frac}")
            }
        }
        None => digits,
    };
    format!("{}{}", if negative { "-" } else { "" }, digits)
}

/// Fixed-point rendering without locale grouping, like JS `toFixed`
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return non_finite(value).to_string();
    }
    let digits = round_half_away(value.abs(), decimals);
    if value < 0.0 {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Extra digits printed to tell an exact binary tie from a near miss
const TIE_DIGITS: usize = 30;

/// Fixed-point digits of a finite, non-negative value with exact ties rounded
/// up. `format!` alone rounds ties to even (`0.125` -> `0.12`).
fn round_half_away(value: f64, decimals: usize) -> String {
    let wide = format!("{value:.prec$}", prec = decimals + TIE_DIGITS);
    let (kept, tail) = wide.split_at(wide.len() - TIE_DIGITS);
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');
    if is_tie {
        bump_last_digit(kept.trim_end_matches('.'))
    } else {
        format!("{value:.decimals$}")
    }
}

/// Add one unit in the last place of a plain decimal string
fn bump_last_digit(digits: &str) -> String {
    let mut chars: Vec<char> = digits.chars().collect();
    for ch in chars.iter_mut().rev() {
        match *ch {
            '.' => {}
            '9' => *ch = '0',
            d => {
                *ch = char::from_digit(d.to_digit(10).unwrap_or(0) + 1, 10).unwrap_or(d);
                return chars.into_iter().collect();
            }
        }
    }
    std::iter::once('1').chain(chars).collect()
}

/// Rounded absolute value with thousands separators, plus whether a minus
/// sign is needed (never for values that round to zero)
fn signed_fixed(value: f64, decimals: usize) -> (bool, String) {
    let rounded = round_half_away(value.abs(), decimals);
    let is_zero = rounded.chars().all(|c| c == '0' || c == '.');
    let grouped = match rounded.split_once('.') {
        Some((int, frac)) => format!("{}.{}", group_thousands(int), frac),
        None => group_thousands(&rounded),
    };
    (value.is_sign_negative() && !is_zero, grouped)
}

fn group_thousands(int_digits: &str) -> String {
    let len = int_digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn non_finite(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value.is_sign_negative() {
        "-∞"
    } else {
        "∞"
    }
}
