use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Behavioral category of an application. Sizing policy is keyed on this tag
/// rather than on product names.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Archetype {
    /// Editors and IDEs.
    CodeWorkspace,
    /// Terminals, shells and chat: chronological text that reads fine narrow.
    TextStream,
    /// Browsers, viewers and design surfaces that need width to be useful.
    ContentCanvas,
    /// Compact utilities that only need to be glanced at.
    GlanceableMonitor,
    Unknown,
}

/// An application as reported by the window enumeration service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningApp {
    pub name: String,
    #[serde(default)]
    pub minimized: bool,
}

impl RunningApp {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), minimized: false }
    }

    pub fn minimized(name: impl Into<String>) -> Self {
        Self { name: name.into(), minimized: true }
    }
}

impl From<&str> for RunningApp {
    fn from(name: &str) -> Self { RunningApp::new(name) }
}

impl From<String> for RunningApp {
    fn from(name: String) -> Self { RunningApp::new(name) }
}

impl FromStr for RunningApp {
    type Err = String;

    /// `Name` or `Name:minimized`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let (name, minimized) = match raw.rsplit_once(':') {
            Some((name, flag)) if flag.eq_ignore_ascii_case("minimized") => (name.trim(), true),
            _ => (raw, false),
        };
        if name.is_empty() {
            return Err("app name must not be empty".to_string());
        }
        Ok(RunningApp { name: name.to_string(), minimized })
    }
}

/// A classified application, as produced by the relevance filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub name: String,
    pub archetype: Archetype,
    #[serde(default)]
    pub minimized: bool,
    /// Position in the caller's input list; the final tie-breaker everywhere.
    #[serde(skip)]
    pub input_index: usize,
}
