//! Locale-aware currency formatting
//!
//! A small built-in table covers the locales TripSpent knows how to format.
//! Formatting never fails from the caller's point of view: an unknown locale
//! yields [`FALLBACK`].

use crate::models::Money;

/// Shown when an amount cannot be formatted for the requested locale
pub const FALLBACK: &str = "$0.00";

/// Locale used when nothing is configured
pub const DEFAULT_LOCALE: &str = "en_US";

#[derive(Debug, Clone, Copy)]
struct CurrencyStyle {
    symbol: &'static str,
    /// "1.234,50 €" rather than "€1,234.50"
    symbol_after: bool,
    decimal: char,
    grouping: char,
    fraction_digits: u32,
}

const DOLLAR: CurrencyStyle = CurrencyStyle {
    symbol: "$",
    symbol_after: false,
    decimal: '.',
    grouping: ',',
    fraction_digits: 2,
};

const EURO_DOT_GROUPED: CurrencyStyle = CurrencyStyle {
    symbol: "€",
    symbol_after: true,
    decimal: ',',
    grouping: '.',
    fraction_digits: 2,
};

const LOCALES: &[(&str, CurrencyStyle)] = &[
    ("en_US", DOLLAR),
    ("en_CA", DOLLAR),
    (
        "en_GB",
        CurrencyStyle {
            symbol: "£",
            ..DOLLAR
        },
    ),
    ("de_DE", EURO_DOT_GROUPED),
    ("es_ES", EURO_DOT_GROUPED),
    (
        "fr_FR",
        CurrencyStyle {
            grouping: ' ',
            ..EURO_DOT_GROUPED
        },
    ),
    (
        "ja_JP",
        CurrencyStyle {
            symbol: "¥",
            fraction_digits: 0,
            ..DOLLAR
        },
    ),
];

/// Reduce a POSIX locale name to `ll_RR` form
///
/// `de_DE.UTF-8`, `de-DE` and `de_DE@euro` all become `de_DE`; `C` and
/// `POSIX` map to the default locale.
pub fn normalize_locale(raw: &str) -> String {
    let base = raw
        .trim()
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('-', "_");

    if base.is_empty() || base == "C" || base == "POSIX" {
        return DEFAULT_LOCALE.to_string();
    }

    match base.split_once('_') {
        Some((lang, region)) => format!("{}_{}", lang.to_lowercase(), region.to_uppercase()),
        None => base.to_lowercase(),
    }
}

fn style_for(locale: &str) -> Option<CurrencyStyle> {
    let locale = normalize_locale(locale);
    LOCALES
        .iter()
        .find(|(name, _)| *name == locale)
        .map(|(_, style)| *style)
}

/// Whether `locale` is one the formatter knows
pub fn is_supported(locale: &str) -> bool {
    style_for(locale).is_some()
}

/// Names of every supported locale
pub fn supported_locales() -> impl Iterator<Item = &'static str> {
    LOCALES.iter().map(|(name, _)| *name)
}

/// Format `amount` as currency for `locale`
pub fn format_currency(amount: Money, locale: &str) -> String {
    match style_for(locale) {
        Some(style) => render(amount, style),
        None => {
            tracing::debug!(locale, "no currency style for locale");
            FALLBACK.to_string()
        }
    }
}

fn render(amount: Money, style: CurrencyStyle) -> String {
    let cents = amount.cents().unsigned_abs();
    let (units, fraction) = if style.fraction_digits == 0 {
        // Half away from zero
        ((cents + 50) / 100, None)
    } else {
        (cents / 100, Some(cents % 100))
    };

    let mut number = group_digits(units, style.grouping);
    if let Some(fraction) = fraction {
        number.push(style.decimal);
        number.push_str(&format!("{:02}", fraction));
    }

    let sign = if amount.cents() < 0 { "-" } else { "" };
    if style.symbol_after {
        format!("{}{} {}", sign, number, style.symbol)
    } else {
        format!("{}{}{}", sign, style.symbol, number)
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Pick the first non-empty of the given locale variables
fn locale_from_vars(candidates: &[Option<String>]) -> String {
    candidates
        .iter()
        .flatten()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .map(normalize_locale)
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Locale from `LC_ALL`, `LC_MONETARY` or `LANG`, in that order
pub fn locale_from_env() -> String {
    let vars: Vec<Option<String>> = ["LC_ALL", "LC_MONETARY", "LANG"]
        .iter()
        .map(|name| std::env::var(name).ok())
        .collect();
    locale_from_vars(&vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    #[test]
    fn test_us_dollars() {
        assert_eq!(format_currency(money(123450), "en_US"), "$1,234.50");
        assert_eq!(format_currency(money(5), "en_US"), "$0.05");
        assert_eq!(format_currency(money(100_000_000), "en_US"), "$1,000,000.00");
        assert_eq!(format_currency(money(-450), "en_US"), "-$4.50");
    }

    #[test]
    fn test_euro_locales() {
        assert_eq!(format_currency(money(123450), "de_DE"), "1.234,50 €");
        assert_eq!(format_currency(money(123450), "fr_FR"), "1 234,50 €");
        assert_eq!(format_currency(money(99), "es_ES"), "0,99 €");
    }

    #[test]
    fn test_other_locales() {
        assert_eq!(format_currency(money(123450), "en_GB"), "£1,234.50");
        assert_eq!(format_currency(money(123450), "ja_JP"), "¥1,235");
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        assert_eq!(format_currency(money(123450), "xx_YY"), FALLBACK);
        assert_eq!(format_currency(money(123450), ""), "$1,234.50");
    }

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("de_DE.UTF-8"), "de_DE");
        assert_eq!(normalize_locale("fr-fr"), "fr_FR");
        assert_eq!(normalize_locale("es_ES@euro"), "es_ES");
        assert_eq!(normalize_locale("C"), "en_US");
        assert_eq!(normalize_locale("POSIX"), "en_US");
        assert!(is_supported("en_GB.utf8"));
        assert!(!is_supported("pt_BR"));
    }

    #[test]
    fn test_locale_precedence() {
        let vars = [None, Some("de_DE.UTF-8".to_string()), Some("en_GB".to_string())];
        assert_eq!(locale_from_vars(&vars), "de_DE");

        let vars = [Some(String::new()), None, Some("ja_JP".to_string())];
        assert_eq!(locale_from_vars(&vars), "ja_JP");

        assert_eq!(locale_from_vars(&[None, None, None]), "en_US");
    }
}
