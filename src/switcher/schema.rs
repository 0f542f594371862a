//! Building a switcher from a schema's `switches` list
//!
//! Only options with a matching `style/<state>` section are tracked, since
//! those are the ones that change how the candidate panel looks.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::option::{OptionGroup, OptionValue, ScriptVariant};
use super::script::is_script_option;
use super::switcher::{OptionSwitcher, SwitcherError};
use crate::config::ConfigStore;

const SWITCHES: &str = "switches";
const STYLE_ROOT: &str = "style";

/// Script variants found so far, and which one `reset` selects.
#[derive(Default)]
struct Scripts {
    variants: Vec<ScriptVariant>,
    default: Option<String>,
}

impl ConfigStore {
    /// Build the option switcher declared by the open schema.
    ///
    /// Without an open schema this returns an empty switcher. Declaring the
    /// same option twice is an error.
    pub fn option_switcher_for_schema(&self) -> Result<OptionSwitcher, SwitcherError> {
        let schema_id = match self.schema_id() {
            Some(id) if self.is_open() && !id.is_empty() && id != "." => id,
            _ => return Ok(OptionSwitcher::empty("")),
        };

        let count = self.list_size(SWITCHES);
        if count == 0 {
            return Ok(OptionSwitcher::empty(schema_id));
        }

        let mut switcher = BTreeMap::new();
        let mut groups = Vec::new();
        let mut scripts: Option<Scripts> = None;

        for i in 0..count {
            let item = format!("{}/@{}", SWITCHES, i);
            let reset = self.get_or_default::<i64>(format!("{}/reset", item).as_str());

            if let Some(name) = self.get::<String>(format!("{}/name", item).as_str()) {
                let tracked = self.has_section(&style_path(&format!("!{}", name)))
                    || self.has_section(&style_path(&name));
                if tracked {
                    insert_unique(&mut switcher, &name, OptionValue::Toggle(reset != 0))?;
                }
                if scripts.is_none() && is_script_option(&name) {
                    scripts = Some(toggle_scripts(&name, reset != 0, tracked));
                }
                continue;
            }

            let options = self.list(&format!("{}/options", item));
            let Some(first) = options.first().cloned() else {
                debug!(schema = schema_id, index = i, "skipping switch with neither name nor options");
                continue;
            };

            let active = match usize::try_from(reset).ok().filter(|&r| r < options.len()) {
                Some(index) => index,
                None => {
                    warn!(schema = schema_id, group = %first, reset, "reset out of range, using first option");
                    0
                }
            };

            let tracked = options.iter().any(|option| self.has_section(&style_path(option)));
            if tracked {
                insert_unique(&mut switcher, &first, OptionValue::state(options[active].as_str()))?;
                groups.push(OptionGroup::new(first.as_str(), options.iter().cloned()));
            }
            if scripts.is_none() && options.iter().any(|option| is_script_option(option)) {
                scripts = Some(group_scripts(&first, &options, active, tracked));
            }
        }

        let scripts = scripts.unwrap_or_default();
        debug!(
            schema = schema_id,
            options = switcher.len(),
            variants = scripts.variants.len(),
            "built option switcher"
        );
        OptionSwitcher::new(schema_id, switcher, groups, scripts.default, scripts.variants)
    }
}

fn style_path(state: &str) -> String {
    format!("{}/{}", STYLE_ROOT, state)
}

fn insert_unique(
    switcher: &mut BTreeMap<String, OptionValue>,
    name: &str,
    value: OptionValue,
) -> Result<(), SwitcherError> {
    if switcher.insert(name.to_string(), value).is_some() {
        return Err(SwitcherError::DuplicateOption(name.to_string()));
    }
    Ok(())
}

fn toggle_scripts(name: &str, on: bool, tracked: bool) -> Scripts {
    let variant = |label: String, value: bool| {
        let variant = ScriptVariant::new(label);
        if tracked {
            variant.with_override(name, OptionValue::Toggle(value))
        } else {
            variant
        }
    };
    let on_label = name.to_string();
    let off_label = format!("!{}", name);

    Scripts {
        default: Some(if on { on_label.clone() } else { off_label.clone() }),
        variants: vec![variant(on_label, true), variant(off_label, false)],
    }
}

fn group_scripts(group: &str, options: &[String], active: usize, tracked: bool) -> Scripts {
    let variants = options
        .iter()
        .map(|option| {
            let variant = ScriptVariant::new(option.as_str());
            if tracked {
                variant.with_override(group, OptionValue::state(option.as_str()))
            } else {
                variant
            }
        })
        .collect();

    Scripts {
        default: Some(options[active].clone()),
        variants,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use rime_document::{DocumentId, MemoryDocumentStore};
    use std::sync::Arc;

    fn open_schema(schema_id: &str, yaml: &str) -> ConfigStore {
        let documents = MemoryDocumentStore::new().with(DocumentId::schema(schema_id), yaml);
        let mut store = ConfigStore::new(Arc::new(documents), Settings::default());
        store.open_with_schema_id(schema_id).unwrap();
        store
    }

    const LUNA: &str = r#"
schema:
  schema_id: luna_pinyin
switches:
  - name: ascii_mode
    reset: 0
  - name: full_shape
  - options: [zh_simp, zh_trad, zh_hk]
    reset: 1
  - name: simplification
    reset: 1
style:
  "!ascii_mode":
    font_point: 14
  zh_hk:
    font_face: "PingFang HK"
  simplification:
    font_face: "PingFang SC"
"#;

    #[test]
    fn test_tracks_styled_options_only() {
        let store = open_schema("luna_pinyin", LUNA);
        let switcher = store.option_switcher_for_schema().unwrap();

        assert_eq!(switcher.schema_id(), "luna_pinyin");
        assert_eq!(switcher.value("ascii_mode"), Some(&OptionValue::Toggle(false)));
        assert_eq!(switcher.value("full_shape"), None);
        assert_eq!(switcher.group_state("zh_simp"), Some("zh_trad"));
        assert_eq!(switcher.value("simplification"), Some(&OptionValue::Toggle(true)));
    }

    #[test]
    fn test_first_script_switch_defines_variants() {
        let store = open_schema("luna_pinyin", LUNA);
        let switcher = store.option_switcher_for_schema().unwrap();

        let names: Vec<_> = switcher.script_variants().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["simplification", "!simplification"]);
        assert_eq!(switcher.current_script_variant(), Some("simplification"));
        assert_eq!(switcher.script_locale(), "zh-Hans");
    }

    #[test]
    fn test_script_variant_sets_toggle() {
        let store = open_schema("luna_pinyin", LUNA);
        let mut switcher = store.option_switcher_for_schema().unwrap();

        switcher.update_current_script_variant("!simplification").unwrap();
        assert_eq!(switcher.value("simplification"), Some(&OptionValue::Toggle(false)));
        assert_eq!(switcher.script_locale(), "zh-Hant");
    }

    #[test]
    fn test_group_script_variants() {
        let yaml = r#"
switches:
  - options: [simplification, traditional]
    reset: 0
style:
  traditional:
    font_face: "PingFang TC"
"#;
        let store = open_schema("cangjie5", yaml);
        let mut switcher = store.option_switcher_for_schema().unwrap();

        assert_eq!(switcher.current_script_variant(), Some("simplification"));
        switcher.update_current_script_variant("traditional").unwrap();
        assert_eq!(switcher.group_state("simplification"), Some("traditional"));
        assert_eq!(switcher.script_locale(), "zh-Hant");
    }

    #[test]
    fn test_untracked_script_variant_has_no_overrides() {
        let yaml = "switches:\n  - name: traditional\n    reset: 1\n";
        let store = open_schema("bopomofo", yaml);
        let switcher = store.option_switcher_for_schema().unwrap();

        assert!(switcher.is_empty());
        assert_eq!(switcher.current_script_variant(), Some("traditional"));
        assert!(switcher.script_variants().iter().all(|v| v.overrides.is_empty()));
    }

    #[test]
    fn test_reset_out_of_range_uses_first() {
        let yaml = "switches:\n  - options: [light, dark]\n    reset: 5\nstyle:\n  dark: {}\n";
        let store = open_schema("demo", yaml);
        let switcher = store.option_switcher_for_schema().unwrap();
        assert_eq!(switcher.group_state("light"), Some("light"));
    }

    #[test]
    fn test_duplicate_switch_rejected() {
        let yaml = "switches:\n  - name: ascii_mode\n  - name: ascii_mode\nstyle:\n  ascii_mode: {}\n";
        let store = open_schema("demo", yaml);
        assert_eq!(
            store.option_switcher_for_schema().unwrap_err(),
            SwitcherError::DuplicateOption("ascii_mode".to_string())
        );
    }

    #[test]
    fn test_no_switches_is_empty() {
        let store = open_schema("demo", "schema:\n  name: Demo\n");
        let switcher = store.option_switcher_for_schema().unwrap();
        assert!(switcher.is_empty());
        assert_eq!(switcher.schema_id(), "demo");
    }

    #[test]
    fn test_not_a_schema_is_empty() {
        let documents = MemoryDocumentStore::new().with(DocumentId::config("squirrel"), "style: {}\n");
        let mut store = ConfigStore::new(Arc::new(documents), Settings::default());
        store.open_base_config().unwrap();

        let switcher = store.option_switcher_for_schema().unwrap();
        assert!(switcher.is_empty());
        assert_eq!(switcher.schema_id(), "");
    }
}
