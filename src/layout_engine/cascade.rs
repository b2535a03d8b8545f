use tracing::{debug, trace};

use crate::common::config::GeometrySettings;
use crate::layout_engine::focus::priority_order;
use crate::model::geometry::{EPSILON, MIN_EXTENT, uncovered_area};
use crate::model::{
    AppDescriptor, Archetype, ContextCategory, Diagnostic, PreferenceSnapshot, Rect, Role,
    ScreenSize, Side, WindowPlacement,
};

/// Width lost by the side column for every app beyond the second.
const SIDE_COLUMN_SHRINK_PER_APP: f64 = 0.02;

/// Screen corner a corner-role window is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub fn place(self, width: f64, height: f64) -> Rect {
        let (x, y) = match self {
            Quadrant::TopLeft => (0.0, 0.0),
            Quadrant::TopRight => (1.0 - width, 0.0),
            Quadrant::BottomLeft => (0.0, 1.0 - height),
            Quadrant::BottomRight => (1.0 - width, 1.0 - height),
        };
        Rect::new(x.max(0.0), y.max(0.0), width, height)
    }

    /// Candidate order; bottom quadrants first since the primary window is
    /// anchored to the top.
    pub fn preference_order(side: Option<Side>) -> [Quadrant; 4] {
        use Quadrant::*;
        match side {
            None => [BottomLeft, BottomRight, TopRight, TopLeft],
            Some(Side::Left) => [BottomLeft, TopLeft, BottomRight, TopRight],
            Some(Side::Right) => [BottomRight, TopRight, BottomLeft, TopLeft],
        }
    }
}

/// Widest a placement may become: hard for text streams, soft otherwise.
pub(crate) fn width_limit(
    geometry: &GeometrySettings,
    role: Role,
    archetype: Archetype,
    focused: bool,
) -> f64 {
    let stream_cap = if focused {
        geometry.side_column_focused_cap
    } else {
        geometry.side_column_cap
    };
    match role {
        Role::Primary if archetype == Archetype::TextStream => geometry.side_column_focused_cap,
        Role::Primary => 1.0,
        Role::SideColumn => stream_cap,
        Role::PeekLayer => geometry.peek_max_width,
        Role::Corner => geometry.corner_max_width,
    }
}

pub(crate) fn height_limit(geometry: &GeometrySettings, role: Role) -> f64 {
    match role {
        Role::Corner => geometry.corner_max_height,
        Role::Primary | Role::SideColumn | Role::PeekLayer => 1.0,
    }
}

/// Functional minimum width of a content canvas on this screen.
pub(crate) fn canvas_min_width(geometry: &GeometrySettings, screen: ScreenSize) -> f64 {
    geometry.canvas_min_width.max(screen.fraction_x(geometry.canvas_min_px))
}

/// Clamps `value` into `[lower, upper]`. When the bounds contradict each
/// other the upper bound wins and the conflict is recorded.
fn clamp_recording(
    app: &AppDescriptor,
    constraint: &str,
    value: f64,
    lower: f64,
    upper: f64,
    issues: &mut Vec<Diagnostic>,
) -> f64 {
    if lower > upper + EPSILON {
        debug!(app = %app.name, constraint, lower, upper, "minimum exceeds cap");
        issues.push(Diagnostic::ConstraintConflict {
            app: app.name.clone(),
            constraint: constraint.to_string(),
            requested: lower,
            applied: upper,
        });
        return upper;
    }
    value.clamp(lower.min(upper), upper)
}

/// Raw placements as produced by the generator, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedLayout {
    /// Front to back.
    pub placements: Vec<WindowPlacement>,
    pub issues: Vec<Diagnostic>,
}

/// Turns roles into rectangles with closed-form formulas over the app count
/// and the screen size.
pub struct CascadeGenerator<'a> {
    geometry: &'a GeometrySettings,
    preferences: &'a PreferenceSnapshot,
    confidence_threshold: f64,
}

/// Per-invocation values shared by the role formulas.
struct Frame {
    screen: ScreenSize,
    context: ContextCategory,
    /// 0 for a single app, 1 from four apps on.
    primary_crowding: f64,
    /// 0 up to two apps, 1 from four apps on.
    crowding: f64,
    extra_apps: f64,
}

impl<'a> CascadeGenerator<'a> {
    pub fn new(
        geometry: &'a GeometrySettings,
        preferences: &'a PreferenceSnapshot,
        confidence_threshold: f64,
    ) -> Self {
        Self {
            geometry,
            preferences,
            confidence_threshold,
        }
    }

    /// Roles in stacking order, front first: the primary, then at most one
    /// side column (first text stream by focus priority), at most one peek
    /// layer (first content canvas), then every other app as a corner.
    pub fn assign_roles<'b>(
        &self,
        apps: &'b [AppDescriptor],
        primary: &str,
        context: ContextCategory,
    ) -> Vec<(&'b AppDescriptor, Role)> {
        let ordered = priority_order(apps, context);
        let primary_app = ordered
            .iter()
            .copied()
            .find(|app| app.name == primary)
            .or_else(|| ordered.first().copied());

        let mut roles = Vec::with_capacity(ordered.len());
        let Some(primary_app) = primary_app else {
            return roles;
        };
        roles.push((primary_app, Role::Primary));

        let mut side_taken = false;
        let mut peek_taken = false;
        for app in ordered.into_iter().filter(|app| app.name != primary_app.name) {
            let role = match app.archetype {
                Archetype::TextStream if !side_taken => {
                    side_taken = true;
                    Role::SideColumn
                }
                Archetype::ContentCanvas if !peek_taken => {
                    peek_taken = true;
                    Role::PeekLayer
                }
                _ => Role::Corner,
            };
            roles.push((app, role));
        }

        // The role order is the stacking order; corners keep priority order.
        roles.sort_by_key(|(_, role)| *role);
        trace!(
            roles = ?roles.iter().map(|(app, role)| (app.name.as_str(), *role)).collect::<Vec<_>>(),
            "assigned roles"
        );
        roles
    }

    pub fn generate(
        &self,
        apps: &[AppDescriptor],
        primary: &str,
        context: ContextCategory,
        screen: ScreenSize,
    ) -> GeneratedLayout {
        let roles = self.assign_roles(apps, primary, context);
        let count = roles.len();
        let frame = Frame {
            screen,
            context,
            primary_crowding: count.saturating_sub(1).min(3) as f64 / 3.0,
            crowding: count.saturating_sub(2).min(2) as f64 / 2.0,
            extra_apps: count.saturating_sub(2).min(3) as f64,
        };

        let mut issues = Vec::new();
        let corner_sizes: Vec<(f64, f64)> = roles
            .iter()
            .filter(|(_, role)| *role == Role::Corner)
            .map(|(app, _)| self.corner_size(app, &frame))
            .collect();
        let tallest_corner = corner_sizes.iter().map(|(_, h)| *h).reduce(f64::max);
        let mut corner_sizes = corner_sizes.into_iter();

        let mut placements: Vec<WindowPlacement> = Vec::with_capacity(count);
        let mut primary_rect = Rect::SCREEN;
        let mut side_rect: Option<Rect> = None;
        for (index, (app, role)) in roles.iter().enumerate() {
            let rect = match role {
                Role::Primary => {
                    primary_rect = self.primary_rect(app, &frame, tallest_corner, &mut issues);
                    primary_rect
                }
                Role::SideColumn => {
                    let rect = self.side_column_rect(app, &frame, &mut issues);
                    side_rect = Some(rect);
                    rect
                }
                Role::PeekLayer => {
                    self.peek_rect(app, &frame, primary_rect, side_rect, &mut issues)
                }
                Role::Corner => {
                    let (width, height) = corner_sizes.next().unwrap_or((
                        self.geometry.corner_width,
                        self.geometry.corner_height,
                    ));
                    self.corner_rect(app, &frame, width, height, &placements)
                }
            };
            debug!(app = %app.name, %role, ?rect, "generated");
            placements.push(WindowPlacement {
                app: app.name.clone(),
                rect,
                layer: (count - 1 - index) as u32,
                role: *role,
                focused: *role == Role::Primary,
                archetype: app.archetype,
                minimized: app.minimized,
                overridden: false,
            });
        }

        if let Some(issue) = self.crowding(&placements, screen) {
            issues.push(issue);
        }

        GeneratedLayout { placements, issues }
    }

    /// Blends a confident width hint into a formula width.
    fn blended_width(&self, app: &AppDescriptor, context: ContextCategory, formula: f64) -> f64 {
        let Some(hint) = self.preferences.hint_for(&app.name, context, self.confidence_threshold)
        else {
            return formula;
        };
        let Some(preferred) = hint
            .preferred_width_fraction
            .filter(|w| w.is_finite() && *w > 0.0 && *w <= 1.0)
        else {
            return formula;
        };
        let confidence = hint.confidence.clamp(0.0, 1.0);
        let blended = formula * (1.0 - confidence) + preferred * confidence;
        debug!(app = %app.name, formula, preferred, confidence, blended, "blended width hint");
        blended
    }

    fn preferred_side(&self, app: &AppDescriptor, context: ContextCategory) -> Option<Side> {
        self.preferences
            .hint_for(&app.name, context, self.confidence_threshold)
            .and_then(|hint| hint.preferred_side)
    }

    fn primary_rect(
        &self,
        app: &AppDescriptor,
        frame: &Frame,
        tallest_corner: Option<f64>,
        issues: &mut Vec<Diagnostic>,
    ) -> Rect {
        let g = self.geometry;
        let (mut width, mut height) = match app.archetype {
            Archetype::Unknown => (
                (g.primary_width_min + g.primary_width_max) / 2.0,
                (g.primary_height_min + 1.0) / 2.0,
            ),
            _ => (
                g.primary_width_max
                    - (g.primary_width_max - g.primary_width_min) * frame.primary_crowding,
                1.0,
            ),
        };
        if let Some(corner_height) = tallest_corner {
            height = height.min((1.0 - corner_height).max(g.primary_height_min));
        }

        width = self.blended_width(app, frame.context, width);
        let mut lower = frame.screen.fraction_x(g.primary_min_px);
        if app.archetype == Archetype::ContentCanvas {
            lower = lower.max(canvas_min_width(g, frame.screen));
        }
        let upper = width_limit(g, Role::Primary, app.archetype, true);
        width = clamp_recording(app, "primary_min_px", width, lower, upper, issues);

        Rect::new(0.0, 0.0, width, height)
    }

    fn side_column_rect(
        &self,
        app: &AppDescriptor,
        frame: &Frame,
        issues: &mut Vec<Diagnostic>,
    ) -> Rect {
        let g = self.geometry;
        let cap = width_limit(g, Role::SideColumn, app.archetype, false);
        let formula = (cap - SIDE_COLUMN_SHRINK_PER_APP * frame.extra_apps).max(MIN_EXTENT);
        let width = self.blended_width(app, frame.context, formula);
        let lower = frame.screen.fraction_x(g.side_column_min_px);
        let width = clamp_recording(app, "side_column_min_px", width, lower, cap, issues);
        Rect::new(1.0 - width, 0.0, width, 1.0)
    }

    /// The peek layer starts inside the primary window so a strip of the
    /// primary shows beside it, and reaches toward the side column.
    fn peek_rect(
        &self,
        app: &AppDescriptor,
        frame: &Frame,
        primary: Rect,
        side: Option<Rect>,
        issues: &mut Vec<Diagnostic>,
    ) -> Rect {
        let g = self.geometry;
        let min_width = canvas_min_width(g, frame.screen);
        let overlap = g.peek_overlap_min + (g.peek_overlap_max - g.peek_overlap_min) * frame.crowding;
        let start = (primary.right() - overlap).max(0.0);
        let reach = side.map_or(1.0, |s| s.x);

        let formula = (reach - start).max(min_width);
        let width = self.blended_width(app, frame.context, formula);
        let upper = g.peek_max_width.max(min_width).min(1.0);
        let width = clamp_recording(app, "canvas_min_width", width, min_width, upper, issues);

        let height = g.peek_height_max - (g.peek_height_max - g.peek_height_min) * frame.crowding;
        let x = start.min(1.0 - width).max(0.0);
        let y = (1.0 - height) / 2.0;
        Rect::new(x, y, width, height)
    }

    fn corner_size(&self, app: &AppDescriptor, frame: &Frame) -> (f64, f64) {
        let g = self.geometry;
        let (width, height) = match app.archetype {
            Archetype::Unknown => (
                (g.corner_width + g.corner_max_width) / 2.0,
                (g.corner_height + g.corner_max_height) / 2.0,
            ),
            _ => (g.corner_width, g.corner_height),
        };
        let width = self.blended_width(app, frame.context, width);
        // The clickable minimum beats the soft maximum.
        let width = width
            .min(g.corner_max_width)
            .max(frame.screen.fraction_x(g.corner_min_px_width))
            .clamp(MIN_EXTENT, 1.0);
        let height = height
            .max(frame.screen.fraction_y(g.corner_min_px_height))
            .clamp(MIN_EXTENT, 1.0);
        (width, height)
    }

    /// Anchors the corner in whichever quadrant leaves it the most visible
    /// area under the windows already stacked above it.
    fn corner_rect(
        &self,
        app: &AppDescriptor,
        frame: &Frame,
        width: f64,
        height: f64,
        above: &[WindowPlacement],
    ) -> Rect {
        let occluders: Vec<Rect> = above.iter().filter(|p| !p.minimized).map(|p| p.rect).collect();
        let mut best: Option<(Rect, f64)> = None;
        for quadrant in Quadrant::preference_order(self.preferred_side(app, frame.context)) {
            let rect = quadrant.place(width, height);
            let visible = uncovered_area(&rect, &occluders);
            trace!(app = %app.name, ?quadrant, visible, "corner candidate");
            if best.is_none_or(|(_, v)| visible > v + EPSILON) {
                best = Some((rect, visible));
            }
        }
        best.map(|(rect, _)| rect).unwrap_or_else(|| Quadrant::BottomLeft.place(width, height))
    }

    /// Flags screens too narrow for the minimum widths of the side-by-side
    /// roles plus a reachable strip of the peek layer.
    fn crowding(&self, placements: &[WindowPlacement], screen: ScreenSize) -> Option<Diagnostic> {
        let g = self.geometry;
        if placements.is_empty() {
            return None;
        }
        let has = |role: Role| placements.iter().any(|p| p.role == role);

        let mut required = screen.fraction_x(g.primary_min_px);
        if has(Role::SideColumn) {
            required += screen.fraction_x(g.side_column_min_px);
        }
        if has(Role::PeekLayer) {
            required += screen.fraction_x(g.min_visible_strip_px);
        }

        (required > 1.0 + EPSILON).then(|| {
            debug!(required, %screen, "screen too narrow for minimum widths");
            Diagnostic::Crowded { required, available: 1.0 }
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::PreferenceHint;

    fn app(name: &str, archetype: Archetype, input_index: usize) -> AppDescriptor {
        AppDescriptor {
            name: name.to_string(),
            archetype,
            minimized: false,
            input_index,
        }
    }

    fn coding_apps() -> Vec<AppDescriptor> {
        vec![
            app("Cursor", Archetype::CodeWorkspace, 0),
            app("Terminal", Archetype::TextStream, 1),
            app("Arc", Archetype::ContentCanvas, 2),
        ]
    }

    fn generate(
        apps: &[AppDescriptor],
        primary: &str,
        context: ContextCategory,
        screen: ScreenSize,
        preferences: &PreferenceSnapshot,
    ) -> GeneratedLayout {
        let geometry = GeometrySettings::default();
        CascadeGenerator::new(&geometry, preferences, 0.6).generate(apps, primary, context, screen)
    }

    fn find<'p>(layout: &'p GeneratedLayout, name: &str) -> &'p WindowPlacement {
        layout.placements.iter().find(|p| p.app == name).unwrap()
    }

    #[test]
    fn assigns_one_role_per_archetype_and_demotes_the_rest() {
        let geometry = GeometrySettings::default();
        let preferences = PreferenceSnapshot::default();
        let generator = CascadeGenerator::new(&geometry, &preferences, 0.6);
        let apps = vec![
            app("Slack", Archetype::TextStream, 0),
            app("Cursor", Archetype::CodeWorkspace, 1),
            app("Terminal", Archetype::TextStream, 2),
            app("Arc", Archetype::ContentCanvas, 3),
            app("Safari", Archetype::ContentCanvas, 4),
        ];
        let roles: Vec<(&str, Role)> = generator
            .assign_roles(&apps, "Cursor", ContextCategory::Coding)
            .into_iter()
            .map(|(app, role)| (app.name.as_str(), role))
            .collect();
        assert_eq!(roles, vec![
            ("Cursor", Role::Primary),
            ("Terminal", Role::SideColumn),
            ("Arc", Role::PeekLayer),
            // corners follow focus priority: Safari 0.5 + 0.05 browser bonus,
            // Slack 0.6 - 0.1 for chat while coding
            ("Safari", Role::Corner),
            ("Slack", Role::Corner),
        ]);
    }

    #[test]
    fn cascade_for_a_coding_session() {
        let layout = generate(
            &coding_apps(),
            "Cursor",
            ContextCategory::Coding,
            ScreenSize::new(1440.0, 900.0),
            &PreferenceSnapshot::default(),
        );
        assert!(layout.issues.is_empty(), "{:?}", layout.issues);

        let primary = find(&layout, "Cursor");
        let side = find(&layout, "Terminal");
        let peek = find(&layout, "Arc");

        assert!(primary.focused);
        assert_eq!((primary.rect.x, primary.rect.y), (0.0, 0.0));
        assert!((0.55..=0.75).contains(&primary.rect.width));
        assert_eq!(primary.rect.height, 1.0);

        assert!(side.rect.width <= 0.30 + EPSILON);
        assert!((side.rect.right() - 1.0).abs() < EPSILON);
        assert_eq!(side.rect.height, 1.0);

        assert!(peek.rect.width >= 0.45 - EPSILON);
        assert!(peek.rect.x < primary.rect.right(), "peek must overlap the primary");
        assert!((0.80..=0.95).contains(&peek.rect.height));

        assert_eq!((primary.layer, side.layer, peek.layer), (2, 1, 0));
    }

    #[test]
    fn more_apps_shrink_the_primary_share() {
        let screen = ScreenSize::new(2560.0, 1440.0);
        let preferences = PreferenceSnapshot::default();
        let two = generate(&coding_apps()[..2], "Cursor", ContextCategory::Coding, screen, &preferences);
        let three = generate(&coding_apps(), "Cursor", ContextCategory::Coding, screen, &preferences);
        assert!(find(&three, "Cursor").rect.width < find(&two, "Cursor").rect.width);
    }

    #[test]
    fn focused_text_stream_is_capped() {
        let apps = vec![
            app("Slack", Archetype::TextStream, 0),
            app("Arc", Archetype::ContentCanvas, 1),
        ];
        let layout = generate(
            &apps,
            "Slack",
            ContextCategory::Communication,
            ScreenSize::new(2560.0, 1440.0),
            &PreferenceSnapshot::default(),
        );
        let slack = find(&layout, "Slack");
        assert_eq!(slack.role, Role::Primary);
        assert!(slack.rect.width <= 0.55 + EPSILON);
    }

    #[test]
    fn canvas_minimum_follows_pixels_on_small_screens() {
        let layout = generate(
            &coding_apps(),
            "Cursor",
            ContextCategory::Coding,
            ScreenSize::new(1024.0, 768.0),
            &PreferenceSnapshot::default(),
        );
        let peek = find(&layout, "Arc");
        assert!(peek.rect.width >= 640.0 / 1024.0 - EPSILON);
        assert!(peek.rect.right() <= 1.0 + EPSILON);
    }

    #[test]
    fn corners_pick_the_most_visible_quadrant_and_stay_clickable() {
        let apps = vec![
            app("Cursor", Archetype::CodeWorkspace, 0),
            app("Terminal", Archetype::TextStream, 1),
            app("Activity Monitor", Archetype::GlanceableMonitor, 2),
        ];
        let screen = ScreenSize::new(1440.0, 900.0);
        let layout = generate(
            &apps,
            "Cursor",
            ContextCategory::Coding,
            screen,
            &PreferenceSnapshot::default(),
        );
        let primary = find(&layout, "Cursor");
        let corner = find(&layout, "Activity Monitor");

        assert_eq!(corner.role, Role::Corner);
        assert_eq!(corner.layer, 0);
        assert!(primary.rect.height < 1.0, "primary makes room for the corner");
        assert!(corner.rect.width * screen.width >= 320.0 - 1e-6);
        assert!(corner.rect.height * screen.height >= 220.0 - 1e-6);
        // bottom-left sits under the primary's free strip, bottom-right under
        // the side column
        assert_eq!(corner.rect.x, 0.0);
        assert!((corner.rect.bottom() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn preferred_side_moves_corners() {
        let apps = vec![
            app("Cursor", Archetype::CodeWorkspace, 0),
            app("Spotify", Archetype::GlanceableMonitor, 1),
        ];
        let preferences = PreferenceSnapshot {
            hints: vec![PreferenceHint {
                app: "Spotify".to_string(),
                context: None,
                preferred_side: Some(Side::Right),
                preferred_width_fraction: None,
                confidence: 0.9,
            }],
        };
        let layout = generate(
            &apps,
            "Cursor",
            ContextCategory::Coding,
            ScreenSize::new(1440.0, 900.0),
            &preferences,
        );
        let corner = find(&layout, "Spotify");
        assert!((corner.rect.right() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn confident_width_hints_are_blended_not_copied() {
        let screen = ScreenSize::new(2560.0, 1440.0);
        let hint = |confidence| PreferenceSnapshot {
            hints: vec![PreferenceHint {
                app: "Terminal".to_string(),
                context: Some(ContextCategory::Coding),
                preferred_side: None,
                preferred_width_fraction: Some(0.20),
                confidence,
            }],
        };
        let baseline = find(
            &generate(&coding_apps(), "Cursor", ContextCategory::Coding, screen, &hint(0.1)),
            "Terminal",
        )
        .rect
        .width;
        let blended = find(
            &generate(&coding_apps(), "Cursor", ContextCategory::Coding, screen, &hint(0.8)),
            "Terminal",
        )
        .rect
        .width;

        assert!(blended < baseline);
        assert!(blended > 0.20);
        assert!((blended - (baseline * 0.2 + 0.20 * 0.8)).abs() < 1e-9);
    }

    #[test]
    fn width_hints_cannot_break_the_side_column_cap() {
        let preferences = PreferenceSnapshot {
            hints: vec![PreferenceHint {
                app: "Terminal".to_string(),
                context: None,
                preferred_side: None,
                preferred_width_fraction: Some(0.9),
                confidence: 1.0,
            }],
        };
        let layout = generate(
            &coding_apps(),
            "Cursor",
            ContextCategory::Coding,
            ScreenSize::new(1440.0, 900.0),
            &preferences,
        );
        assert!(find(&layout, "Terminal").rect.width <= 0.30 + EPSILON);
    }

    #[test]
    fn narrow_screens_report_conflicts() {
        let apps = vec![
            app("Cursor", Archetype::CodeWorkspace, 0),
            app("Terminal", Archetype::TextStream, 1),
            app("Arc", Archetype::ContentCanvas, 2),
            app("Activity Monitor", Archetype::GlanceableMonitor, 3),
        ];
        let layout = generate(
            &apps,
            "Cursor",
            ContextCategory::General,
            ScreenSize::new(800.0, 600.0),
            &PreferenceSnapshot::default(),
        );
        assert!(layout.issues.iter().any(|i| matches!(i, Diagnostic::Crowded { .. })));
        assert!(layout.issues.iter().any(|i| matches!(
            i,
            Diagnostic::ConstraintConflict { app, .. } if app == "Terminal"
        )));
        for placement in &layout.placements {
            assert!(placement.rect.is_within_screen(), "{placement:?}");
        }
    }

    #[test]
    fn layers_follow_role_order() {
        let apps = vec![
            app("Notes", Archetype::Unknown, 0),
            app("Arc", Archetype::ContentCanvas, 1),
            app("Terminal", Archetype::TextStream, 2),
            app("Cursor", Archetype::CodeWorkspace, 3),
        ];
        let layout = generate(
            &apps,
            "Cursor",
            ContextCategory::Coding,
            ScreenSize::new(1920.0, 1080.0),
            &PreferenceSnapshot::default(),
        );
        let layers: Vec<(Role, u32)> = layout.placements.iter().map(|p| (p.role, p.layer)).collect();
        assert_eq!(layers, vec![
            (Role::Primary, 3),
            (Role::SideColumn, 2),
            (Role::PeekLayer, 1),
            (Role::Corner, 0),
        ]);
    }
}
