//! Option switcher state machine
//!
//! State: `{groups, toggles, script variant}` held as one versioned value.
//! Every mutation builds a candidate state, validates it against the
//! declarations, and only then replaces the committed state, so a failed
//! call leaves everything (including the version) untouched.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use rime_session::{OptionSource, SessionId};
use serde::Serialize;
use tracing::debug;

use super::option::{OptionGroup, OptionValue, ScriptVariant};
use super::script::DEFAULT_LOCALE;

/// Errors for switcher construction and updates
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwitcherError {
    #[error("Unknown option: '{0}'")]
    UnknownOption(String),

    #[error("Option '{0}' does not belong to any group")]
    NotInGroup(String),

    #[error("Illegal value {value} for option '{option}'")]
    IllegalValue { option: String, value: String },

    #[error("Declared option '{0}' is missing from the switcher")]
    MissingOption(String),

    #[error("Option '{0}' is declared more than once")]
    DuplicateOption(String),

    #[error("Group '{0}' has no states")]
    EmptyGroup(String),

    #[error("Unknown script variant: '{0}'")]
    UnknownScriptVariant(String),

    #[error("Script variant '{0}' is declared more than once")]
    DuplicateScriptVariant(String),
}

/// A committed switcher state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitcherState {
    /// Bumped by one on every successful mutation
    pub version: u64,

    /// Group name or toggle name to current value
    pub options: BTreeMap<String, OptionValue>,

    /// Name of the current script variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_variant: Option<String>,
}

/// Validated runtime option state for one schema.
#[derive(Debug, Clone, Serialize)]
pub struct OptionSwitcher {
    schema_id: String,
    groups: Vec<OptionGroup>,
    toggles: BTreeSet<String>,
    script_variants: Vec<ScriptVariant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_script_variant: Option<String>,
    state: SwitcherState,
}

impl OptionSwitcher {
    /// Build a switcher from declarations.
    ///
    /// Toggles are the switcher keys that are not group names and hold a
    /// [`OptionValue::Toggle`]. Construction fails if any option name is
    /// claimed twice (two groups, or a group and a toggle), if a group is
    /// missing from `switcher`, if a value is outside its option's domain,
    /// or if a variant override or the default variant is undeclared.
    pub fn new(
        schema_id: impl Into<String>,
        switcher: BTreeMap<String, OptionValue>,
        groups: Vec<OptionGroup>,
        default_script_variant: Option<String>,
        script_variants: Vec<ScriptVariant>,
    ) -> Result<Self, SwitcherError> {
        let mut claimed: HashSet<&str> = HashSet::new();
        for group in &groups {
            if group.states.is_empty() {
                return Err(SwitcherError::EmptyGroup(group.name.clone()));
            }
            let mut seen = HashSet::new();
            for state in &group.states {
                if !seen.insert(state.as_str()) {
                    return Err(SwitcherError::DuplicateOption(state.clone()));
                }
            }
            for name in group.option_names() {
                if !claimed.insert(name) {
                    return Err(SwitcherError::DuplicateOption(name.to_string()));
                }
            }
        }

        let group_names: HashSet<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        let mut toggles = BTreeSet::new();
        for (name, value) in &switcher {
            if matches!(value, OptionValue::Toggle(_)) && !group_names.contains(name.as_str()) {
                if claimed.contains(name.as_str()) {
                    return Err(SwitcherError::DuplicateOption(name.clone()));
                }
                toggles.insert(name.clone());
            }
        }

        let mut variant_names = HashSet::new();
        for variant in &script_variants {
            if !variant_names.insert(variant.name.as_str()) {
                return Err(SwitcherError::DuplicateScriptVariant(variant.name.clone()));
            }
        }

        let switcher_obj = Self {
            schema_id: schema_id.into(),
            groups,
            toggles,
            script_variants,
            default_script_variant: None,
            state: SwitcherState {
                version: 0,
                options: BTreeMap::new(),
                script_variant: None,
            },
        };

        switcher_obj.validate_map(&switcher)?;
        for variant in &switcher_obj.script_variants {
            for (option, value) in &variant.overrides {
                switcher_obj.check_value(option, value)?;
            }
        }
        if let Some(default) = &default_script_variant {
            if switcher_obj.variant(default).is_none() {
                return Err(SwitcherError::UnknownScriptVariant(default.clone()));
            }
        }

        Ok(Self {
            default_script_variant: default_script_variant.clone(),
            state: SwitcherState {
                version: 0,
                options: switcher,
                script_variant: default_script_variant,
            },
            ..switcher_obj
        })
    }

    /// An empty switcher used before any schema is loaded.
    pub fn empty(schema_id: impl Into<String>) -> Self {
        Self {
            schema_id: schema_id.into(),
            groups: Vec::new(),
            toggles: BTreeSet::new(),
            script_variants: Vec::new(),
            default_script_variant: None,
            state: SwitcherState {
                version: 0,
                options: BTreeMap::new(),
                script_variant: None,
            },
        }
    }

    pub fn schema_id(&self) -> &str {
        &self.schema_id
    }

    pub fn state(&self) -> &SwitcherState {
        &self.state
    }

    /// The merged option map.
    pub fn switcher(&self) -> &BTreeMap<String, OptionValue> {
        &self.state.options
    }

    pub fn version(&self) -> u64 {
        self.state.version
    }

    pub fn is_empty(&self) -> bool {
        self.state.options.is_empty()
    }

    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    pub fn toggles(&self) -> impl Iterator<Item = &str> {
        self.toggles.iter().map(String::as_str)
    }

    pub fn script_variants(&self) -> &[ScriptVariant] {
        &self.script_variants
    }

    pub fn default_script_variant(&self) -> Option<&str> {
        self.default_script_variant.as_deref()
    }

    pub fn current_script_variant(&self) -> Option<&str> {
        self.state.script_variant.as_deref()
    }

    /// Locale of the current variant, or `zh` when there is none.
    pub fn script_locale(&self) -> &str {
        self.current_script_variant()
            .and_then(|name| self.variant(name))
            .map_or(DEFAULT_LOCALE, |variant| variant.locale.as_str())
    }

    pub fn value(&self, option: &str) -> Option<&OptionValue> {
        self.state.options.get(option)
    }

    /// Group whose name or states include `option`.
    pub fn group_of(&self, option: &str) -> Option<&OptionGroup> {
        self.groups
            .iter()
            .find(|g| g.name == option)
            .or_else(|| self.groups.iter().find(|g| g.contains(option)))
    }

    /// Active state of the group named by, or containing, `option`.
    pub fn group_state(&self, option: &str) -> Option<&str> {
        let group = self.group_of(option)?;
        match self.state.options.get(&group.name)? {
            OptionValue::State(state) => Some(state),
            OptionValue::Toggle(_) => None,
        }
    }

    /// True if a toggle is on or a group member is the active state.
    pub fn is_active(&self, option: &str) -> bool {
        match self.state.options.get(option) {
            Some(OptionValue::Toggle(on)) => *on,
            _ => self.group_of(option).is_some_and(|group| {
                group.contains(option) && self.group_state(&group.name) == Some(option)
            }),
        }
    }

    /// Active state labels (`name`/`!name` for toggles, active members for groups).
    pub fn option_states(&self) -> BTreeSet<String> {
        self.state
            .options
            .iter()
            .map(|(name, value)| value.label(name))
            .collect()
    }

    /// The state expanded into engine options: each toggle, and every
    /// member of every group (on only for the active member).
    pub fn engine_options(&self) -> Vec<(String, bool)> {
        let mut options = Vec::new();
        for group in &self.groups {
            let active = self.group_state(&group.name);
            for state in &group.states {
                options.push((state.clone(), active == Some(state.as_str())));
            }
        }
        for toggle in &self.toggles {
            if let Some(OptionValue::Toggle(on)) = self.state.options.get(toggle) {
                options.push((toggle.clone(), *on));
            }
        }
        options
    }

    /// Replace the whole option map.
    ///
    /// `switcher` must have exactly the declared keys, each with a legal
    /// value. On error nothing changes.
    pub fn update_switcher(&mut self, switcher: BTreeMap<String, OptionValue>) -> Result<(), SwitcherError> {
        if let Err(e) = self.validate_map(&switcher) {
            return Err(self.rejected("update_switcher", e));
        }
        let script_variant = self.state.script_variant.clone();
        self.commit(switcher, script_variant);
        Ok(())
    }

    /// Make `state` the active member of the group named by, or containing,
    /// `option`. Every other member becomes inactive in the same commit.
    pub fn update_group_state(&mut self, state: &str, option: &str) -> Result<(), SwitcherError> {
        let group = match self.group_of(option) {
            Some(group) => group,
            None => return Err(self.rejected("update_group_state", SwitcherError::NotInGroup(option.to_string()))),
        };
        if !group.contains(state) {
            let e = SwitcherError::IllegalValue {
                option: group.name.clone(),
                value: OptionValue::state(state).to_string(),
            };
            return Err(self.rejected("update_group_state", e));
        }

        let mut options = self.state.options.clone();
        options.insert(group.name.clone(), OptionValue::state(state));
        let script_variant = self.state.script_variant.clone();
        self.commit(options, script_variant);
        Ok(())
    }

    /// Turn a toggle on or off.
    pub fn update_toggle(&mut self, option: &str, on: bool) -> Result<(), SwitcherError> {
        if !self.toggles.contains(option) {
            return Err(self.rejected("update_toggle", SwitcherError::UnknownOption(option.to_string())));
        }
        let mut options = self.state.options.clone();
        options.insert(option.to_string(), OptionValue::Toggle(on));
        let script_variant = self.state.script_variant.clone();
        self.commit(options, script_variant);
        Ok(())
    }

    /// Switch to a declared script variant, applying its overrides.
    pub fn update_current_script_variant(&mut self, variant: &str) -> Result<(), SwitcherError> {
        let declared = match self.variant(variant) {
            Some(declared) => declared,
            None => {
                let e = SwitcherError::UnknownScriptVariant(variant.to_string());
                return Err(self.rejected("update_current_script_variant", e));
            }
        };

        let mut options = self.state.options.clone();
        for (option, value) in &declared.overrides {
            options.insert(option.clone(), value.clone());
        }
        let name = declared.name.clone();
        self.commit(options, Some(name));
        Ok(())
    }

    /// Pull option values back from an engine session.
    ///
    /// A group takes its first member the engine reports on (or keeps its
    /// state), a toggle takes the reported value, and the script variant
    /// becomes the first one whose condition holds. Returns whether the
    /// committed state changed.
    pub fn reconcile<S: OptionSource + ?Sized>(
        &mut self,
        source: &S,
        session: SessionId,
    ) -> Result<bool, SwitcherError> {
        if session.is_none() || self.is_empty() {
            return Ok(false);
        }

        let mut options = self.state.options.clone();
        for group in &self.groups {
            if let Some(on) = group.states.iter().find(|s| source.get_option(session, s)) {
                options.insert(group.name.clone(), OptionValue::state(on.as_str()));
            }
        }
        for toggle in &self.toggles {
            options.insert(toggle.clone(), OptionValue::Toggle(source.get_option(session, toggle)));
        }

        let script_variant = self
            .script_variants
            .iter()
            .find(|variant| match variant.name.strip_prefix('!') {
                Some(option) => !source.get_option(session, option),
                None => source.get_option(session, &variant.name),
            })
            .map(|variant| variant.name.clone())
            .or_else(|| self.state.script_variant.clone());

        if options == self.state.options && script_variant == self.state.script_variant {
            return Ok(false);
        }
        if let Err(e) = self.validate_map(&options) {
            return Err(self.rejected("reconcile", e));
        }
        debug!(schema = %self.schema_id, %session, "reconciled switcher from session");
        self.commit(options, script_variant);
        Ok(true)
    }

    pub(crate) fn variant(&self, name: &str) -> Option<&ScriptVariant> {
        self.script_variants.iter().find(|v| v.name == name)
    }

    /// Check one entry against its option's domain.
    fn check_value(&self, option: &str, value: &OptionValue) -> Result<(), SwitcherError> {
        let legal = if let Some(group) = self.groups.iter().find(|g| g.name == option) {
            matches!(value, OptionValue::State(state) if group.contains(state))
        } else if self.toggles.contains(option) {
            matches!(value, OptionValue::Toggle(_))
        } else {
            return Err(SwitcherError::UnknownOption(option.to_string()));
        };

        if legal {
            Ok(())
        } else {
            Err(SwitcherError::IllegalValue {
                option: option.to_string(),
                value: value.to_string(),
            })
        }
    }

    /// Check a full map: legal values and exactly the declared keys.
    pub(crate) fn validate_map(&self, switcher: &BTreeMap<String, OptionValue>) -> Result<(), SwitcherError> {
        for (option, value) in switcher {
            self.check_value(option, value)?;
        }
        let declared = self
            .groups
            .iter()
            .map(|g| &g.name)
            .chain(self.toggles.iter());
        for name in declared {
            if !switcher.contains_key(name) {
                return Err(SwitcherError::MissingOption(name.clone()));
            }
        }
        Ok(())
    }

    pub(crate) fn commit(&mut self, options: BTreeMap<String, OptionValue>, script_variant: Option<String>) {
        self.state = SwitcherState {
            version: self.state.version + 1,
            options,
            script_variant,
        };
    }

    fn rejected(&self, operation: &str, error: SwitcherError) -> SwitcherError {
        debug!(schema = %self.schema_id, operation, error = %error, "rejected switcher update");
        error
    }
}
