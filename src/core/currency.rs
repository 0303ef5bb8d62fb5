//! Amount formatting in the uz-UZ convention: space-grouped thousands,
//! comma decimal separator, currency suffix per deployment.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrencyStyle {
    /// Terse symbol suffix, e.g. `125 000$`.
    #[default]
    Symbol,
    /// Spelled-out unit, e.g. `125 000 so'm`.
    Word,
}

impl CurrencyStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "symbol" => Some(Self::Symbol),
            "word" => Some(Self::Word),
            _ => None,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Symbol => "$",
            Self::Word => " so'm",
        }
    }
}

/// Format an amount with uz-UZ grouping and the configured suffix.
/// Non-finite input coerces to zero. Fractions keep up to three digits,
/// trailing zeros trimmed.
pub fn format_uzs(amount: f64, style: CurrencyStyle) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let negative = amount < 0.0;
    let milli = (amount.abs() * 1000.0).round() as u64;
    let int_part = milli / 1000;
    let frac_part = milli % 1000;

    let mut out = String::new();
    if negative && milli > 0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if frac_part > 0 {
        let digits = format!("{frac_part:03}");
        out.push(',');
        out.push_str(digits.trim_end_matches('0'));
    }
    out.push_str(style.suffix());
    out
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
