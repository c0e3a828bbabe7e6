//! Region name standardization.
//!
//! Event and survey extracts spell the same state several ways
//! ("FCT Abuja", "Federal Capital Territory", "fct"). Names are
//! title-cased first, then passed through a fixed alias table so both
//! tables land on one canonical spelling before any join.

/// Alias table applied after title-casing. Left side is the title-cased
/// spelling as it appears in the wild, right side the canonical name.
const REGION_ALIASES: &[(&str, &str)] = &[
    ("Fct Abuja", "FCT"),
    ("Fct", "FCT"),
    ("Federal Capital Territory", "FCT"),
    ("Nassarawa", "Nasarawa"),
    ("Rivers State", "Rivers"),
    ("Lagos State", "Lagos"),
];

/// Standardizes a region name: trims, collapses whitespace, title-cases,
/// then resolves known aliases.
#[must_use]
pub fn standardize_region_name(raw: &str) -> String {
    let titled = title_case(raw);
    for (alias, canonical) in REGION_ALIASES {
        if titled == *alias {
            return (*canonical).to_string();
        }
    }
    titled
}

/// Title-cases a name word by word, collapsing runs of whitespace.
#[must_use]
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_cases_and_trims() {
        assert_eq!(standardize_region_name("  borno "), "Borno");
        assert_eq!(standardize_region_name("AKWA  IBOM"), "Akwa Ibom");
        assert_eq!(standardize_region_name("cross river"), "Cross River");
    }

    #[test]
    fn resolves_capital_territory_aliases() {
        assert_eq!(standardize_region_name("FCT Abuja"), "FCT");
        assert_eq!(standardize_region_name("fct"), "FCT");
        assert_eq!(standardize_region_name("FEDERAL CAPITAL TERRITORY"), "FCT");
    }

    #[test]
    fn resolves_spelling_aliases() {
        assert_eq!(standardize_region_name("Nassarawa"), "Nasarawa");
        assert_eq!(standardize_region_name("rivers state"), "Rivers");
        assert_eq!(standardize_region_name("Lagos State"), "Lagos");
    }

    #[test]
    fn leaves_canonical_names_alone() {
        assert_eq!(standardize_region_name("Borno"), "Borno");
        assert_eq!(standardize_region_name("Nasarawa"), "Nasarawa");
        assert_eq!(standardize_region_name("Lagos"), "Lagos");
    }
}
