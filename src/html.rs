//! Formatting helpers shared by the page views.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// numfmt switches to scientific notation for amounts this large.
const SCIENTIFIC_NOTATION_CUTOFF: f64 = 1e12;

/// Format `number` with an explicit sign, two decimal places, thousands
/// separators and `symbol` as a suffix, e.g. "+1,234.50 ₽" or "-12.30 ₽".
///
/// The amount is rounded to the nearest cent. Amounts that round to zero keep
/// the sign of `number`, only zero itself is unsigned.
pub fn format_currency(number: f64, symbol: &str) -> String {
    static AMOUNT_FMT: OnceLock<Formatter> = OnceLock::new();

    let amount_fmt = AMOUNT_FMT.get_or_init(|| {
        Formatter::currency("")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let sign = if number < 0.0 {
        "-"
    } else if number > 0.0 {
        "+"
    } else {
        ""
    };
    let amount = (number.abs() * 100.0).round() / 100.0;

    let mut formatted_string = if amount == 0.0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "0.00".to_owned()
    } else if amount >= SCIENTIFIC_NOTATION_CUTOFF {
        group_thousands(&format!("{amount:.2}"))
    } else {
        amount_fmt.fmt_string(amount)
    };

    // numfmt omits trailing zeros, so we must add them ourselves.
    // For example, "12.30" is rendered as "12.3" so we append "0".
    match formatted_string.find('.') {
        None => formatted_string.push_str(".00"),
        Some(point) if formatted_string.len() - point == 2 => formatted_string.push('0'),
        Some(_) => {}
    }

    format!("{sign}{formatted_string} {symbol}")
}

/// Insert a comma between each group of three integer digits of the plain decimal `digits`.
fn group_thousands(digits: &str) -> String {
    let (integer, fraction) = digits.split_at(digits.find('.').unwrap_or(digits.len()));
    let mut grouped = String::with_capacity(digits.len() + integer.len() / 3);

    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped + fraction
}
