//! Script variant locale codes

/// Locale used when no variant applies.
pub const DEFAULT_LOCALE: &str = "zh";

/// Exact (case-insensitive) option states that pick a script.
const SCRIPT_CODES: &[(&str, &str)] = &[
    ("simplification", "zh-Hans"),
    ("simplified", "zh-Hans"),
    ("!traditional", "zh-Hans"),
    ("traditional", "zh-Hant"),
    ("!simplification", "zh-Hant"),
    ("!simplified", "zh-Hant"),
];

/// Region keywords matched anywhere in the option name, in order.
const REGION_CODES: &[(&str, &str)] = &[
    ("taiwan", "zh-TW"),
    ("tw", "zh-TW"),
    ("hongkong", "zh-HK"),
    ("hong_kong", "zh-HK"),
    ("hk", "zh-HK"),
    ("macau", "zh-MO"),
    ("macao", "zh-MO"),
    ("mo", "zh-MO"),
    ("singapore", "zh-SG"),
    ("sg", "zh-SG"),
    ("china", "zh-CN"),
    ("cn", "zh-CN"),
];

/// Options whose presence in a switch declares script variants.
const SCRIPT_OPTIONS: &[&str] = &["simplification", "simplified", "traditional"];

/// Locale code for a variant name such as `traditional`, `!simplified` or `zh_hk`.
pub fn locale_code(variant: &str) -> &'static str {
    if let Some((_, code)) = SCRIPT_CODES
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(variant))
    {
        return *code;
    }

    let lower = variant.to_ascii_lowercase();
    REGION_CODES
        .iter()
        .find(|(key, _)| lower.contains(*key))
        .map(|(_, code)| *code)
        .unwrap_or(DEFAULT_LOCALE)
}

/// True for the option names that make a switch a script selector.
pub fn is_script_option(option: &str) -> bool {
    SCRIPT_OPTIONS
        .iter()
        .any(|name| name.eq_ignore_ascii_case(option))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_codes() {
        assert_eq!(locale_code("simplification"), "zh-Hans");
        assert_eq!(locale_code("!traditional"), "zh-Hans");
        assert_eq!(locale_code("Traditional"), "zh-Hant");
        assert_eq!(locale_code("!simplified"), "zh-Hant");
    }

    #[test]
    fn test_region_codes() {
        assert_eq!(locale_code("zh_hk"), "zh-HK");
        assert_eq!(locale_code("zh_TW"), "zh-TW");
        assert_eq!(locale_code("hong_kong"), "zh-HK");
        assert_eq!(locale_code("zh_sg"), "zh-SG");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(locale_code("zh_simp"), DEFAULT_LOCALE);
        assert_eq!(locale_code(""), DEFAULT_LOCALE);
    }

    #[test]
    fn test_script_options() {
        assert!(is_script_option("Simplification"));
        assert!(is_script_option("traditional"));
        assert!(!is_script_option("zh_trad"));
        assert!(!is_script_option("!traditional"));
    }
}
