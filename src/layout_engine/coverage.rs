use tracing::{debug, trace};

use crate::common::config::GeometrySettings;
use crate::layout_engine::cascade::{height_limit, width_limit};
use crate::model::geometry::{EPSILON, screen_coverage, uncovered_area};
use crate::model::{
    Diagnostic, LayoutDiagnostics, LayoutResult, Rect, Role, ScreenSize, WindowPlacement,
};

/// Increments tried when growing an edge toward its limit.
const GROWTH_STEPS: u32 = 8;
/// Grid resolution per axis when searching for a better position.
const NUDGE_STEPS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Right,
    Bottom,
    Left,
    Top,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Right, Edge::Bottom, Edge::Left, Edge::Top];
}

fn lerp(from: f64, to: f64, t: f64) -> f64 { from + (to - from) * t }

fn lerp_rect(from: Rect, to: Rect, t: f64) -> Rect {
    Rect::new(
        lerp(from.x, to.x, t),
        lerp(from.y, to.y, t),
        lerp(from.width, to.width, t),
        lerp(from.height, to.height, t),
    )
}

/// Fraction of the screen covered by the windows that are actually shown.
pub fn coverage_of(placements: &[WindowPlacement]) -> f64 {
    let shown: Vec<Rect> = placements.iter().filter(|p| !p.minimized).map(|p| p.rect).collect();
    screen_coverage(&shown)
}

fn occluders_above(placements: &[WindowPlacement], layer: u32) -> Vec<Rect> {
    placements
        .iter()
        .filter(|p| !p.minimized && p.layer > layer)
        .map(|p| p.rect)
        .collect()
}

/// Area of the placement at `index` not hidden by windows stacked above it.
pub fn visible_area(placements: &[WindowPlacement], index: usize) -> f64 {
    let placement = &placements[index];
    uncovered_area(&placement.rect, &occluders_above(placements, placement.layer))
}

/// Post-processes generated placements: grows them toward the coverage
/// target, then nudges windows that ended up hidden, then reports what could
/// not be achieved. Overridden placements are never moved or resized.
pub struct CoverageNormalizer<'a> {
    geometry: &'a GeometrySettings,
    target_coverage: f64,
    min_visible_area: f64,
}

impl<'a> CoverageNormalizer<'a> {
    pub fn new(geometry: &'a GeometrySettings, target_coverage: f64, min_visible_area: f64) -> Self {
        Self {
            geometry,
            target_coverage,
            min_visible_area,
        }
    }

    /// The configured fraction, raised on small screens so a window always
    /// shows at least a clickable square.
    fn required_visible_area(&self, screen: ScreenSize) -> f64 {
        let strip = self.geometry.min_visible_strip_px;
        self.min_visible_area.max(screen.fraction_x(strip) * screen.fraction_y(strip))
    }

    pub fn normalize(
        &self,
        mut placements: Vec<WindowPlacement>,
        screen: ScreenSize,
        mut issues: Vec<Diagnostic>,
    ) -> LayoutResult {
        for placement in placements.iter_mut().filter(|p| !p.overridden) {
            placement.rect = placement.rect.clamp_to_screen();
        }

        let required = self.required_visible_area(screen);
        self.fill_coverage(&mut placements, required);
        self.ensure_visibility(&mut placements, required, &mut issues);

        for placement in placements.iter_mut().filter(|p| !p.overridden) {
            placement.rect = placement.rect.clamp_to_screen();
        }

        let coverage = coverage_of(&placements);
        if coverage + EPSILON < self.target_coverage {
            debug!(coverage, target = self.target_coverage, "coverage target missed");
            issues.push(Diagnostic::DegradedCoverage {
                achieved: coverage,
                target: self.target_coverage,
            });
        }

        LayoutResult {
            placements,
            diagnostics: LayoutDiagnostics::new(coverage, self.target_coverage, issues),
        }
    }

    fn is_anchored(placement: &WindowPlacement, edge: Edge) -> bool {
        match placement.role {
            Role::Primary => matches!(edge, Edge::Left | Edge::Top),
            Role::SideColumn => edge == Edge::Right,
            Role::PeekLayer | Role::Corner => false,
        }
    }

    /// The placement with `edge` pushed as far as its role allows, or `None`
    /// when that edge cannot move.
    fn extended(&self, placement: &WindowPlacement, edge: Edge) -> Option<Rect> {
        let g = self.geometry;
        let r = placement.rect;
        let max_width = width_limit(g, placement.role, placement.archetype, placement.focused)
            .max(r.width)
            .min(1.0);
        let max_height = height_limit(g, placement.role).max(r.height).min(1.0);

        let grown = match edge {
            Edge::Right => {
                let right = (r.x + max_width).min(1.0);
                Rect::new(r.x, r.y, right - r.x, r.height)
            }
            Edge::Left => {
                let x = (r.right() - max_width).max(0.0);
                Rect::new(x, r.y, r.right() - x, r.height)
            }
            Edge::Bottom => {
                let bottom = (r.y + max_height).min(1.0);
                Rect::new(r.x, r.y, r.width, bottom - r.y)
            }
            Edge::Top => {
                let y = (r.bottom() - max_height).max(0.0);
                Rect::new(r.x, y, r.width, r.bottom() - y)
            }
        };
        (grown.area() > r.area() + EPSILON).then_some(grown)
    }

    /// Grows placements back to front, one edge at a time, taking the
    /// smallest step that reaches the target. A step is rejected when it
    /// hides a window further than the visibility minimum allows.
    fn fill_coverage(&self, placements: &mut [WindowPlacement], required: f64) {
        let mut coverage = coverage_of(placements);
        if coverage + EPSILON >= self.target_coverage {
            return;
        }

        let mut order: Vec<usize> = (0..placements.len())
            .filter(|&i| !placements[i].overridden && !placements[i].minimized)
            .collect();
        order.sort_by_key(|&i| placements[i].layer);

        for index in order {
            for edge in Edge::ALL {
                if coverage + EPSILON >= self.target_coverage {
                    return;
                }
                if Self::is_anchored(&placements[index], edge) {
                    continue;
                }
                let Some(full) = self.extended(&placements[index], edge) else {
                    continue;
                };

                let original = placements[index].rect;
                let before: Vec<f64> =
                    (0..placements.len()).map(|i| visible_area(placements, i)).collect();
                let mut accepted: Option<(Rect, f64)> = None;
                for step in 1..=GROWTH_STEPS {
                    let candidate = lerp_rect(original, full, step as f64 / GROWTH_STEPS as f64);
                    placements[index].rect = candidate;
                    if !keeps_others_visible(placements, index, &before, required) {
                        break;
                    }
                    let grown = coverage_of(placements);
                    if grown > coverage + EPSILON {
                        accepted = Some((candidate, grown));
                        if grown + EPSILON >= self.target_coverage {
                            break;
                        }
                    }
                }

                placements[index].rect = original;
                if let Some((rect, grown)) = accepted {
                    trace!(app = %placements[index].app, ?edge, ?rect, coverage = grown, "grew");
                    placements[index].rect = rect;
                    coverage = grown;
                }
            }
        }
    }

    /// Range of origins the placement may be moved to, or `None` for roles
    /// that are fixed in place.
    fn offset_range(
        &self,
        placements: &[WindowPlacement],
        placement: &WindowPlacement,
    ) -> Option<((f64, f64), (f64, f64))> {
        let free_x = (0.0, (1.0 - placement.rect.width).max(0.0));
        let free_y = (0.0, (1.0 - placement.rect.height).max(0.0));
        match placement.role {
            Role::Primary | Role::SideColumn => None,
            Role::Corner => Some((free_x, free_y)),
            Role::PeekLayer => {
                let primary = placements.iter().find(|p| p.role == Role::Primary)?;
                let lo = (primary.rect.right() - self.geometry.peek_overlap_max).max(free_x.0);
                let hi = (primary.rect.right() - self.geometry.peek_overlap_min).min(free_x.1);
                let xs = if lo <= hi { (lo, hi) } else { free_x };
                Some((xs, free_y))
            }
        }
    }

    /// Closest position within the role's range that meets `required`, or
    /// failing that the most visible one if it beats the current position.
    fn nudge(
        &self,
        placements: &[WindowPlacement],
        index: usize,
        required: f64,
    ) -> Option<(Rect, f64)> {
        let placement = &placements[index];
        let (xs, ys) = self.offset_range(placements, placement)?;
        let occluders = occluders_above(placements, placement.layer);
        let current = uncovered_area(&placement.rect, &occluders);

        let mut closest: Option<(Rect, f64, f64)> = None;
        let mut most_visible = (placement.rect, current);
        for xi in 0..=NUDGE_STEPS {
            let x = lerp(xs.0, xs.1, xi as f64 / NUDGE_STEPS as f64);
            for yi in 0..=NUDGE_STEPS {
                let y = lerp(ys.0, ys.1, yi as f64 / NUDGE_STEPS as f64);
                let candidate = Rect::new(x, y, placement.rect.width, placement.rect.height);
                let visible = uncovered_area(&candidate, &occluders);
                if visible + EPSILON >= required {
                    let displacement = (x - placement.rect.x).hypot(y - placement.rect.y);
                    if closest.is_none_or(|(_, _, d)| displacement < d - EPSILON) {
                        closest = Some((candidate, visible, displacement));
                    }
                } else if visible > most_visible.1 + EPSILON {
                    most_visible = (candidate, visible);
                }
            }
        }

        closest
            .map(|(rect, visible, _)| (rect, visible))
            .or_else(|| (most_visible.1 > current + EPSILON).then_some(most_visible))
    }

    /// Checks every shown, unfocused window front to back so that moving one
    /// is accounted for when judging those below it.
    fn ensure_visibility(
        &self,
        placements: &mut [WindowPlacement],
        required: f64,
        issues: &mut Vec<Diagnostic>,
    ) {
        let mut order: Vec<usize> = (0..placements.len())
            .filter(|&i| !placements[i].focused && !placements[i].minimized)
            .collect();
        order.sort_by_key(|&i| std::cmp::Reverse(placements[i].layer));

        for index in order {
            let mut visible = visible_area(placements, index);
            if visible + EPSILON >= required {
                continue;
            }
            if !placements[index].overridden {
                if let Some((rect, moved_visible)) = self.nudge(placements, index, required) {
                    debug!(
                        app = %placements[index].app,
                        from = ?placements[index].rect,
                        to = ?rect,
                        visible = moved_visible,
                        "nudged hidden window"
                    );
                    placements[index].rect = rect;
                    visible = moved_visible;
                }
            }
            if visible + EPSILON < required {
                debug!(app = %placements[index].app, visible, required, "window stays hidden");
                issues.push(Diagnostic::DegradedVisibility {
                    app: placements[index].app.clone(),
                    visible,
                    required,
                });
            }
        }
    }
}

/// Growing `grown` may not push any other window's visible area below the
/// smaller of what it had and what it needs.
fn keeps_others_visible(
    placements: &[WindowPlacement],
    grown: usize,
    before: &[f64],
    required: f64,
) -> bool {
    (0..placements.len())
        .filter(|&i| i != grown && !placements[i].minimized)
        .all(|i| visible_area(placements, i) + EPSILON >= before[i].min(required))
}

/// Normalizes with the default geometry limits.
pub fn normalize(
    placements: Vec<WindowPlacement>,
    screen: ScreenSize,
    target_coverage: f64,
    min_visible_area: f64,
) -> LayoutResult {
    let geometry = GeometrySettings::default();
    CoverageNormalizer::new(&geometry, target_coverage, min_visible_area).normalize(
        placements,
        screen,
        Vec::new(),
    )
}
