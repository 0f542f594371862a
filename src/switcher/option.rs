//! Option declarations

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::script::locale_code;

/// Current value of a switcher entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// A toggle option, on or off
    Toggle(bool),
    /// The active member of an option group
    State(String),
}

impl OptionValue {
    pub fn state(state: impl Into<String>) -> Self {
        OptionValue::State(state.into())
    }

    /// Label used to look up style sections: `name`/`!name` for a toggle,
    /// the active member for a group.
    pub fn label(&self, option: &str) -> String {
        match self {
            OptionValue::Toggle(true) => option.to_string(),
            OptionValue::Toggle(false) => format!("!{}", option),
            OptionValue::State(state) => state.clone(),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Toggle(on) => write!(f, "{}", on),
            OptionValue::State(state) => write!(f, "\"{}\"", state),
        }
    }
}

/// A named set of mutually exclusive states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionGroup {
    pub name: String,
    pub states: Vec<String>,
}

impl OptionGroup {
    pub fn new<S: Into<String>>(name: impl Into<String>, states: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            states: states.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, state: &str) -> bool {
        self.states.iter().any(|s| s == state)
    }

    /// True if `option` names this group or one of its states.
    pub fn owns(&self, option: &str) -> bool {
        self.name == option || self.contains(option)
    }

    /// The group name followed by its states, without repeats.
    pub fn option_names(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        for state in &self.states {
            if !names.contains(&state.as_str()) {
                names.push(state);
            }
        }
        names
    }
}

/// An orthography profile with the option overrides it implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptVariant {
    pub name: String,
    pub locale: String,
    pub overrides: BTreeMap<String, OptionValue>,
}

impl ScriptVariant {
    /// A variant with no overrides and the locale derived from its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            locale: locale_code(&name).to_string(),
            name,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_override(mut self, option: impl Into<String>, value: OptionValue) -> Self {
        self.overrides.insert(option.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(OptionValue::Toggle(true).label("ascii_mode"), "ascii_mode");
        assert_eq!(OptionValue::Toggle(false).label("ascii_mode"), "!ascii_mode");
        assert_eq!(OptionValue::state("dark").label("color_scheme"), "dark");
    }

    #[test]
    fn test_group_names() {
        let group = OptionGroup::new("zh_simp", ["zh_simp", "zh_trad"]);
        assert_eq!(group.option_names(), vec!["zh_simp", "zh_trad"]);
        assert!(group.owns("zh_trad"));
        assert!(!group.owns("ascii_mode"));

        let named = OptionGroup::new("color_scheme", ["light", "dark"]);
        assert_eq!(named.option_names(), vec!["color_scheme", "light", "dark"]);
    }

    #[test]
    fn test_variant_locale() {
        let variant = ScriptVariant::new("!simplification");
        assert_eq!(variant.locale, "zh-Hant");
        assert_eq!(variant.with_locale("zh-TW").locale, "zh-TW");
    }

    #[test]
    fn test_untagged_serde() {
        let json = serde_json::to_string(&[OptionValue::Toggle(true), OptionValue::state("dark")]).unwrap();
        assert_eq!(json, r#"[true,"dark"]"#);
    }
}
