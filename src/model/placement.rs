use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

use crate::model::Archetype;
use crate::model::geometry::{PixelFrame, Rect, ScreenSize};

/// Layout function of an app for a single invocation. Declaration order is
/// stacking order, front first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    IntoStaticStr
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Primary,
    SideColumn,
    PeekLayer,
    Corner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub app: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowPlacement {
    pub app: String,
    pub rect: Rect,
    /// 0 is the back; the focused window has the highest layer.
    pub layer: u32,
    pub role: Role,
    pub focused: bool,
    pub archetype: Archetype,
    #[serde(default, skip_serializing_if = "is_false")]
    pub minimized: bool,
    /// The rectangle came verbatim from a manual override.
    #[serde(default, skip_serializing_if = "is_false")]
    pub overridden: bool,
}

fn is_false(value: &bool) -> bool { !*value }

impl WindowPlacement {
    pub fn to_pixels(&self, screen: ScreenSize) -> PixelFrame { self.rect.to_pixels(screen) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Growth under the size caps could not reach the coverage target.
    DegradedCoverage { achieved: f64, target: f64 },
    /// A window stays below the minimum visible area after nudging.
    DegradedVisibility { app: String, visible: f64, required: f64 },
    /// A manual override was rejected and the generated placement kept.
    InvalidOverride { app: String, reason: String },
    /// An archetype minimum could not be honored at this screen size.
    ConstraintConflict {
        app: String,
        constraint: String,
        requested: f64,
        applied: f64,
    },
    /// The side-by-side roles need more width than the screen has.
    Crowded { required: f64, available: f64 },
}

impl Diagnostic {
    /// Whether the issue means the layout fell short of its goals, as opposed
    /// to a rejected input.
    pub fn degrades(&self) -> bool { !matches!(self, Diagnostic::InvalidOverride { .. }) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDiagnostics {
    pub coverage_achieved: f64,
    pub target_coverage: f64,
    pub degraded: bool,
    #[serde(default)]
    pub issues: Vec<Diagnostic>,
}

impl LayoutDiagnostics {
    pub fn new(coverage_achieved: f64, target_coverage: f64, issues: Vec<Diagnostic>) -> Self {
        let degraded = issues.iter().any(Diagnostic::degrades);
        Self {
            coverage_achieved,
            target_coverage,
            degraded,
            issues,
        }
    }

    pub fn coverage_shortfall(&self) -> f64 {
        (self.target_coverage - self.coverage_achieved).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub placements: Vec<WindowPlacement>,
    pub diagnostics: LayoutDiagnostics,
}

impl LayoutResult {
    pub fn focused(&self) -> Option<&WindowPlacement> { self.placements.iter().find(|p| p.focused) }

    pub fn placement(&self, app: &str) -> Option<&WindowPlacement> {
        self.placements.iter().find(|p| p.app == app)
    }

    pub fn role_assignments(&self) -> Vec<RoleAssignment> {
        self.placements
            .iter()
            .map(|p| RoleAssignment { app: p.app.clone(), role: p.role })
            .collect()
    }
}
