use serde::{Deserialize, Serialize};

use crate::common::collections::HashMap;
use crate::model::ContextCategory;
use crate::model::geometry::Rect;

/// Placement requested explicitly by the command source. When valid it
/// replaces the generated placement for that app.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManualOverride {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Relative stacking request; higher is closer to the front.
    #[serde(default)]
    pub layer: Option<i32>,
    #[serde(default)]
    pub focus: Option<bool>,
}

impl ManualOverride {
    pub fn rect(&self) -> Rect { Rect::new(self.x, self.y, self.width, self.height) }
}

/// Manual overrides keyed by app name.
pub type Overrides = HashMap<String, ManualOverride>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// A learned, soft preference for one app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceHint {
    pub app: String,
    /// Context the hint was learned in; `None` applies everywhere.
    #[serde(default)]
    pub context: Option<ContextCategory>,
    #[serde(default)]
    pub preferred_side: Option<Side>,
    #[serde(default)]
    pub preferred_width_fraction: Option<f64>,
    pub confidence: f64,
}

/// Snapshot of the preference store handed in by the caller, who owns its
/// lifecycle and persistence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PreferenceSnapshot {
    #[serde(default)]
    pub hints: Vec<PreferenceHint>,
}

impl PreferenceSnapshot {
    /// The most specific hint for `app` in `context` whose confidence clears
    /// `threshold`. A context-specific hint beats a global one; among equals
    /// the first listed wins.
    pub fn hint_for(
        &self,
        app: &str,
        context: ContextCategory,
        threshold: f64,
    ) -> Option<&PreferenceHint> {
        let usable = |h: &&PreferenceHint| {
            h.app == app && h.confidence.is_finite() && h.confidence >= threshold
        };
        self.hints
            .iter()
            .filter(usable)
            .find(|h| h.context == Some(context))
            .or_else(|| self.hints.iter().filter(usable).find(|h| h.context.is_none()))
    }
}
