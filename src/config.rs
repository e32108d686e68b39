use crate::draft_file::DRAFT_FILENAME;
use crate::draft_parser;
use crate::error::FocusError;
use crate::state::ApplicationState;
use crate::storage::STATE_FILENAME;
use std::ffi::OsString;
use std::path::PathBuf;

/// Overrides the focus home directory when set
pub const FOCUS_HOME_ENV: &str = "FOCUS_HOME";
/// Directory name for focus data inside the user's home directory.
pub const FOCUS_DIR: &str = ".focus";

/// Preference keys settable through `focus config`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Editor,
    Milestone,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Editor => "editor",
            ConfigKey::Milestone => "milestone",
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[ConfigKey::Editor, ConfigKey::Milestone]
    }

    pub fn from_name(name: &str) -> Option<ConfigKey> {
        ConfigKey::all().iter().copied().find(|key| key.as_str() == name)
    }

    /// Current value of this preference, `None` when unset.
    pub fn get(&self, state: &ApplicationState) -> Option<String> {
        match self {
            ConfigKey::Editor => Some(state.editor.clone()),
            ConfigKey::Milestone => state.current_milestone.clone(),
        }
    }

    /// Sets this preference.
    ///
    /// The editor cannot be blank. A blank milestone clears it. The milestone
    /// is copied into new drafts, so it cannot start with `@` or `//`.
    pub fn set(&self, state: &mut ApplicationState, value: &str) -> Result<(), FocusError> {
        let value = value.trim();
        match self {
            ConfigKey::Milestone if !draft_parser::is_plain_content(value) => {
                Err(FocusError::InvalidArgs(format!(
                    "milestone cannot start with `{}` or `{}`: {value}",
                    draft_parser::FIELD_MARKER,
                    draft_parser::COMMENT_MARKER
                )))
            }
            ConfigKey::Editor if value.is_empty() => Err(FocusError::InvalidArgs(
                "editor cannot be empty".to_string(),
            )),
            ConfigKey::Editor => {
                state.editor = value.to_string();
                Ok(())
            }
            ConfigKey::Milestone => {
                state.current_milestone = Some(value)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string);
                Ok(())
            }
        }
    }
}

/// Locations of the files focus owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub home: PathBuf,
    pub state_file: PathBuf,
    pub draft_file: PathBuf,
}

impl Paths {
    /// Lay out the focus files under `home`.
    pub fn under(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Paths {
            state_file: home.join(STATE_FILENAME),
            draft_file: home.join(DRAFT_FILENAME),
            home,
        }
    }

    /// Resolve from `$FOCUS_HOME`, falling back to `~/.focus`.
    pub fn from_env() -> Result<Self, FocusError> {
        let user_home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
        resolve_home(std::env::var_os(FOCUS_HOME_ENV), user_home)
            .map(Paths::under)
            .ok_or_else(|| {
                FocusError::NotFound(format!(
                    "cannot locate a home directory; set {FOCUS_HOME_ENV}"
                ))
            })
    }
}

fn resolve_home(focus_home: Option<OsString>, user_home: Option<OsString>) -> Option<PathBuf> {
    match focus_home.filter(|h| !h.is_empty()) {
        Some(home) => Some(PathBuf::from(home)),
        None => user_home
            .filter(|h| !h.is_empty())
            .map(|h| PathBuf::from(h).join(FOCUS_DIR)),
    }
}
