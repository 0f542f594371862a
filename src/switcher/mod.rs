//! Runtime option switcher
//!
//! Tracks option groups, toggles and the current script variant for one
//! schema. Mutations are validated and committed atomically; see
//! [`OptionSwitcher`].

mod option;
mod schema;
mod script;
#[allow(clippy::module_inception)]
mod switcher;

pub use option::{OptionGroup, OptionValue, ScriptVariant};
pub use script::{is_script_option, locale_code, DEFAULT_LOCALE};
pub use switcher::{OptionSwitcher, SwitcherError, SwitcherState};
