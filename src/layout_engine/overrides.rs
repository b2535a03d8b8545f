use thiserror::Error;
use tracing::{debug, warn};

use crate::common::collections::HashMap;
use crate::model::geometry::EPSILON;
use crate::model::{Diagnostic, ManualOverride, Overrides, Rect, WindowPlacement};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OverrideError {
    #[error("coordinates must be finite")]
    NotFinite,

    #[error("width and height must be positive, got {width}x{height}")]
    EmptyArea { width: f64, height: f64 },

    #[error("origin ({x}, {y}) lies off screen")]
    OffScreen { x: f64, y: f64 },

    #[error("extends past the screen edge to ({right}, {bottom})")]
    PastEdge { right: f64, bottom: f64 },
}

pub fn validate_override(rect: &Rect) -> Result<(), OverrideError> {
    if !rect.is_finite() {
        return Err(OverrideError::NotFinite);
    }
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Err(OverrideError::EmptyArea { width: rect.width, height: rect.height });
    }
    if rect.x < 0.0 || rect.y < 0.0 {
        return Err(OverrideError::OffScreen { x: rect.x, y: rect.y });
    }
    if rect.right() > 1.0 + EPSILON || rect.bottom() > 1.0 + EPSILON {
        return Err(OverrideError::PastEdge {
            right: rect.right(),
            bottom: rect.bottom(),
        });
    }
    Ok(())
}

/// Pins valid overrides onto their placements and reports the invalid ones,
/// which leave the generated placement in effect.
///
/// A valid override may also move focus to its app and request a stacking
/// position: `layer` is compared against the generated layers, where the
/// front window has `n - 1`. The focused window always ends up in front and
/// layers stay unique. Overrides for apps that are not in the layout are
/// ignored.
pub fn apply_overrides(
    placements: &mut [WindowPlacement],
    overrides: &Overrides,
) -> Vec<Diagnostic> {
    let mut issues = Vec::new();
    if overrides.is_empty() {
        return issues;
    }

    let mut accepted: HashMap<String, ManualOverride> = HashMap::default();
    for placement in placements.iter_mut() {
        let Some(manual) = overrides.get(&placement.app) else {
            continue;
        };
        let rect = manual.rect();
        match validate_override(&rect) {
            Ok(()) => {
                debug!(app = %placement.app, ?rect, "pinned by override");
                placement.rect = rect;
                placement.overridden = true;
                accepted.insert(placement.app.clone(), *manual);
            }
            Err(err) => {
                warn!(app = %placement.app, ?rect, "rejecting override: {err}");
                issues.push(Diagnostic::InvalidOverride {
                    app: placement.app.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    let mut unmatched: Vec<&String> =
        overrides.keys().filter(|app| !placements.iter().any(|p| &p.app == *app)).collect();
    unmatched.sort();
    for app in unmatched {
        debug!(%app, "override for an app outside the layout, ignoring");
    }

    // Front-most request wins when several apps ask for focus.
    let focus_request = placements
        .iter()
        .filter(|p| accepted.get(&p.app).and_then(|m| m.focus) == Some(true))
        .max_by_key(|p| p.layer)
        .map(|p| p.app.clone());
    if let Some(app) = focus_request {
        debug!(%app, "override moves focus");
        for placement in placements.iter_mut() {
            placement.focused = placement.app == app;
        }
    }

    let requested: HashMap<String, i64> = accepted
        .iter()
        .filter_map(|(app, manual)| manual.layer.map(|layer| (app.clone(), i64::from(layer))))
        .collect();
    restack(placements, &requested);

    issues
}

/// Reassigns unique layers: focused first, then by requested or generated
/// layer, then by generated layer. Leaves `placements` ordered front to back.
pub fn restack(placements: &mut [WindowPlacement], requested: &HashMap<String, i64>) {
    placements.sort_by(|a, b| {
        let effective = |p: &WindowPlacement| {
            requested.get(&p.app).copied().unwrap_or(i64::from(p.layer))
        };
        b.focused
            .cmp(&a.focused)
            .then_with(|| effective(b).cmp(&effective(a)))
            .then_with(|| b.layer.cmp(&a.layer))
    });
    let count = placements.len();
    for (index, placement) in placements.iter_mut().enumerate() {
        placement.layer = (count - 1 - index) as u32;
    }
}
