use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::common::config::{Config, Settings};
use crate::layout_engine::cascade::{CascadeGenerator, GeneratedLayout};
use crate::layout_engine::classifier::Classifier;
use crate::layout_engine::coverage::CoverageNormalizer;
use crate::layout_engine::overrides::apply_overrides;
use crate::layout_engine::{LayoutError, filter_for_context, resolve_primary};
use crate::model::{
    AppDescriptor, Archetype, ContextCategory, LayoutResult, Overrides, PreferenceSnapshot,
    RunningApp, ScreenSize,
};

/// Everything one arrangement depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRequest {
    pub apps: Vec<RunningApp>,
    #[serde(default)]
    pub intent: String,
    pub screen: ScreenSize,
    #[serde(default)]
    pub overrides: Overrides,
    #[serde(default)]
    pub preferences: PreferenceSnapshot,
}

impl LayoutRequest {
    pub fn new<A: Into<RunningApp>>(
        apps: impl IntoIterator<Item = A>,
        intent: impl Into<String>,
        screen: ScreenSize,
    ) -> Self {
        Self {
            apps: apps.into_iter().map(Into::into).collect(),
            intent: intent.into(),
            screen,
            overrides: Overrides::default(),
            preferences: PreferenceSnapshot::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_preferences(mut self, preferences: PreferenceSnapshot) -> Self {
        self.preferences = preferences;
        self
    }
}

/// Runs the whole pipeline: classify, filter, resolve the primary, generate
/// the cascade, apply overrides and normalize. Holds no state between calls;
/// equal requests give equal results.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    settings: Settings,
    classifier: Classifier,
}

impl Default for LayoutEngine {
    fn default() -> Self { Self::new(&Config::default()) }
}

impl LayoutEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            settings: config.settings.clone(),
            classifier: Classifier::new(&config.classifier),
        }
    }

    pub fn settings(&self) -> &Settings { &self.settings }

    pub fn classify(&self, name: &str) -> Archetype { self.classifier.classify(name) }

    /// The apps that would take part in a layout for `context`, most relevant
    /// first.
    pub fn select(&self, apps: &[RunningApp], context: ContextCategory) -> Vec<AppDescriptor> {
        filter_for_context(&self.classifier, apps, context, self.settings.max_apps)
    }

    pub fn arrange(&self, request: &LayoutRequest) -> Result<LayoutResult, LayoutError> {
        let _span = debug_span!("arrange", apps = request.apps.len(), screen = %request.screen)
            .entered();

        let screen = request.screen;
        if !screen.is_valid() {
            return Err(LayoutError::InvalidScreenSize {
                width: screen.width,
                height: screen.height,
            });
        }

        let context = ContextCategory::from_intent(&request.intent);
        debug!(intent = %request.intent, %context, "derived context");

        let selected = self.select(&request.apps, context);
        let primary = resolve_primary(&selected, context)?;

        let geometry = &self.settings.geometry;
        let GeneratedLayout { mut placements, mut issues } = CascadeGenerator::new(
            geometry,
            &request.preferences,
            self.settings.preference_confidence_threshold,
        )
        .generate(&selected, &primary.name, context, screen);

        issues.extend(apply_overrides(&mut placements, &request.overrides));

        let result = CoverageNormalizer::new(
            geometry,
            self.settings.target_coverage,
            self.settings.min_visible_area,
        )
        .normalize(placements, screen, issues);

        debug!(
            coverage = result.diagnostics.coverage_achieved,
            degraded = result.diagnostics.degraded,
            issues = result.diagnostics.issues.len(),
            "arranged"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::layout_engine::coverage::visible_area;
    use crate::model::geometry::{EPSILON, screen_coverage};
    use crate::model::{Diagnostic, ManualOverride, PreferenceHint, Rect, Role};

    const LAPTOP: ScreenSize = ScreenSize { width: 1440.0, height: 900.0 };
    const SMALL: ScreenSize = ScreenSize { width: 800.0, height: 600.0 };

    fn coding_request() -> LayoutRequest {
        LayoutRequest::new(["Cursor", "Terminal", "Arc"], "i want to code", LAPTOP)
    }

    fn arrange(request: &LayoutRequest) -> LayoutResult {
        LayoutEngine::default().arrange(request).unwrap()
    }

    fn assert_invariants(result: &LayoutResult) {
        let focused: Vec<_> = result.placements.iter().filter(|p| p.focused).collect();
        assert_eq!(focused.len(), 1, "exactly one focused placement");
        let top = result.placements.iter().map(|p| p.layer).max().unwrap();
        assert_eq!(focused[0].layer, top);

        let mut layers: Vec<u32> = result.placements.iter().map(|p| p.layer).collect();
        layers.sort_unstable();
        layers.dedup();
        assert_eq!(layers.len(), result.placements.len(), "layers are unique");

        for placement in &result.placements {
            let r = placement.rect;
            assert!(r.x >= 0.0 && r.y >= 0.0, "{placement:?}");
            assert!(r.right() <= 1.0 + EPSILON, "{placement:?}");
            assert!(r.bottom() <= 1.0 + EPSILON, "{placement:?}");
            assert!(r.width > 0.0 && r.height > 0.0, "{placement:?}");
        }
    }

    #[test]
    fn coding_scenario() {
        let result = arrange(&coding_request());
        assert_invariants(&result);

        assert_eq!(result.focused().unwrap().app, "Cursor");
        assert_eq!(result.placement("Cursor").unwrap().role, Role::Primary);
        assert!(result.placement("Terminal").unwrap().rect.width <= 0.35);
        assert!(result.placement("Arc").unwrap().rect.width >= 0.45);

        let rects: Vec<Rect> = result.placements.iter().map(|p| p.rect).collect();
        assert!(screen_coverage(&rects) >= 0.90);
        assert!(result.diagnostics.coverage_achieved >= 0.90);
        assert!(!result.diagnostics.degraded, "{:?}", result.diagnostics.issues);

        let roles: Vec<(String, Role)> =
            result.role_assignments().into_iter().map(|a| (a.app, a.role)).collect();
        assert_eq!(roles, vec![
            ("Cursor".to_string(), Role::Primary),
            ("Terminal".to_string(), Role::SideColumn),
            ("Arc".to_string(), Role::PeekLayer),
        ]);
    }

    #[test]
    fn every_window_stays_reachable() {
        let result = arrange(&coding_request());
        for index in 0..result.placements.len() {
            assert!(visible_area(&result.placements, index) >= 0.03 - EPSILON);
        }
    }

    #[test]
    fn identical_requests_give_identical_results() {
        let requests = [
            coding_request(),
            LayoutRequest::new(["Figma", "Slack", "Safari", "Spotify"], "design a mockup", LAPTOP),
            LayoutRequest::new(["Cursor", "Terminal", "Arc", "Activity Monitor"], "", SMALL),
        ];
        for request in &requests {
            let first = serde_json::to_string(&arrange(request)).unwrap();
            let second = serde_json::to_string(&arrange(request)).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn invariants_hold_across_inputs() {
        let app_sets: &[&[&str]] = &[
            &["Cursor"],
            &["Terminal"],
            &["Cursor", "Terminal"],
            &["Cursor", "Terminal", "Arc"],
            &["Slack", "Arc", "Xcode", "Spotify"],
            &["Frobnicator", "Zorblax"],
            &["Figma", "Preview", "Safari", "Notes"],
            &["Activity Monitor", "Calendar", "Spotify"],
        ];
        let intents = ["i want to code", "design", "read papers", "reply to email", "whatever"];
        let screens = [
            LAPTOP,
            SMALL,
            ScreenSize::new(2560.0, 1440.0),
            ScreenSize::new(1080.0, 1920.0),
            ScreenSize::new(320.0, 240.0),
        ];
        for apps in app_sets {
            for intent in intents {
                for screen in screens {
                    let request = LayoutRequest::new(apps.iter().copied(), intent, screen);
                    let result = arrange(&request);
                    assert!(!result.placements.is_empty());
                    assert_invariants(&result);
                }
            }
        }
    }

    #[test]
    fn small_screen_shrinks_gracefully() {
        let request =
            LayoutRequest::new(["Cursor", "Terminal", "Arc", "Activity Monitor"], "set up my desk", SMALL);
        let result = arrange(&request);

        assert_eq!(result.placements.len(), 4);
        assert_invariants(&result);
        assert!(result.diagnostics.degraded);
        assert!(
            result
                .diagnostics
                .issues
                .iter()
                .any(|i| matches!(i, Diagnostic::Crowded { .. }))
        );

        let diagnostics = &result.diagnostics;
        let expected = (diagnostics.target_coverage - diagnostics.coverage_achieved).max(0.0);
        assert!((diagnostics.coverage_shortfall() - expected).abs() < EPSILON);
        assert!(diagnostics.coverage_shortfall() <= diagnostics.target_coverage);
    }

    #[test]
    fn focus_does_not_depend_on_input_order() {
        let apps = ["Terminal", "Arc", "Cursor", "Slack"];
        let orders: [[usize; 4]; 4] = [[0, 1, 2, 3], [3, 2, 1, 0], [2, 0, 3, 1], [1, 3, 0, 2]];
        for intent in ["i want to code", "research", "chat with the team", ""] {
            let primaries: Vec<String> = orders
                .iter()
                .map(|order| {
                    let request =
                        LayoutRequest::new(order.iter().map(|&i| apps[i]), intent, LAPTOP);
                    arrange(&request).focused().unwrap().app.clone()
                })
                .collect();
            assert!(primaries.windows(2).all(|w| w[0] == w[1]), "{intent}: {primaries:?}");
        }
    }

    #[test]
    fn valid_override_round_trips() {
        let pinned = ManualOverride {
            x: 0.55,
            y: 0.0,
            width: 0.2,
            height: 1.0,
            layer: None,
            focus: None,
        };
        let request = coding_request()
            .with_overrides([("Arc".to_string(), pinned)].into_iter().collect());
        let result = arrange(&request);

        let arc = result.placement("Arc").unwrap();
        assert_eq!(arc.rect, pinned.rect());
        assert!(arc.overridden);
        assert!(result.diagnostics.issues.is_empty(), "{:?}", result.diagnostics.issues);
        assert_invariants(&result);
    }

    #[test]
    fn buried_override_is_kept_but_reported_hidden() {
        let under_cursor = ManualOverride {
            x: 0.0,
            y: 0.0,
            width: 0.3,
            height: 1.0,
            layer: None,
            focus: None,
        };
        let request = coding_request()
            .with_overrides([("Terminal".to_string(), under_cursor)].into_iter().collect());
        let result = arrange(&request);

        let terminal = result.placement("Terminal").unwrap();
        assert_eq!(terminal.rect, under_cursor.rect());
        assert!(terminal.overridden);

        let issues = &result.diagnostics.issues;
        assert!(!issues.iter().any(|i| matches!(i, Diagnostic::InvalidOverride { .. })));
        assert!(issues.iter().any(|i| matches!(
            i,
            Diagnostic::DegradedVisibility { app, .. } if app == "Terminal"
        )));
        assert!(result.diagnostics.degraded);
        assert_invariants(&result);
    }

    #[test]
    fn invalid_override_is_reported_not_applied() {
        let off_screen = ManualOverride {
            x: 0.7,
            y: 0.1,
            width: 0.6,
            height: 0.5,
            layer: None,
            focus: Some(true),
        };
        let request = coding_request()
            .with_overrides([("Arc".to_string(), off_screen)].into_iter().collect());
        let result = arrange(&request);
        let baseline = arrange(&coding_request());

        assert!(matches!(
            result.diagnostics.issues.as_slice(),
            [Diagnostic::InvalidOverride { app, .. }] if app == "Arc"
        ));
        assert!(!result.diagnostics.degraded);
        assert_eq!(result.placements, baseline.placements);
    }

    #[test]
    fn focus_override_keeps_invariants() {
        let mut focus_terminal = ManualOverride {
            x: 0.5,
            y: 0.0,
            width: 0.5,
            height: 1.0,
            layer: None,
            focus: Some(true),
        };
        let request = coding_request()
            .with_overrides([("Terminal".to_string(), focus_terminal)].into_iter().collect());
        let result = arrange(&request);
        assert_eq!(result.focused().unwrap().app, "Terminal");
        assert_invariants(&result);

        focus_terminal.focus = Some(false);
        let request = coding_request()
            .with_overrides([("Terminal".to_string(), focus_terminal)].into_iter().collect());
        assert_eq!(arrange(&request).focused().unwrap().app, "Cursor");
    }

    #[test]
    fn minimized_apps_are_placed_but_not_required_to_show() {
        let request = LayoutRequest::new(
            [RunningApp::new("Cursor"), RunningApp::minimized("Terminal"), RunningApp::new("Arc")],
            "i want to code",
            LAPTOP,
        );
        let result = arrange(&request);
        let terminal = result.placement("Terminal").unwrap();
        assert!(terminal.minimized);
        assert!(!result.diagnostics.issues.iter().any(|i| matches!(
            i,
            Diagnostic::DegradedVisibility { app, .. } if app == "Terminal"
        )));
        assert_invariants(&result);
    }

    #[test]
    fn confident_preferences_bend_the_formula() {
        let narrow_terminal = PreferenceSnapshot {
            hints: vec![PreferenceHint {
                app: "Terminal".to_string(),
                context: Some(ContextCategory::Coding),
                preferred_side: None,
                preferred_width_fraction: Some(0.2),
                confidence: 0.9,
            }],
        };
        let baseline = arrange(&coding_request());
        let hinted = arrange(&coding_request().with_preferences(narrow_terminal.clone()));

        let before = baseline.placement("Terminal").unwrap().rect.width;
        let after = hinted.placement("Terminal").unwrap().rect.width;
        assert!(after < before, "{after} < {before}");
        assert!(after >= 0.2);

        let mut unsure = narrow_terminal;
        unsure.hints[0].confidence = 0.3;
        assert_eq!(arrange(&coding_request().with_preferences(unsure)), baseline);
    }

    #[test]
    fn empty_input_is_a_hard_error() {
        let engine = LayoutEngine::default();
        let empty = LayoutRequest::new(Vec::<RunningApp>::new(), "code", LAPTOP);
        assert_eq!(engine.arrange(&empty), Err(LayoutError::EmptyInput));

        let blank = LayoutRequest::new(["", "  "], "code", LAPTOP);
        assert_eq!(engine.arrange(&blank), Err(LayoutError::EmptyInput));
    }

    #[test]
    fn unusable_screen_is_a_hard_error() {
        let engine = LayoutEngine::default();
        let request = LayoutRequest::new(["Cursor"], "code", ScreenSize::new(0.0, 900.0));
        assert_eq!(
            engine.arrange(&request),
            Err(LayoutError::InvalidScreenSize { width: 0.0, height: 900.0 })
        );
    }

    #[test]
    fn settings_are_honored() {
        let mut config = Config::default();
        config.settings.max_apps = 2;
        let engine = LayoutEngine::new(&config);
        let result = engine.arrange(&coding_request()).unwrap();
        let apps: Vec<&str> = result.placements.iter().map(|p| p.app.as_str()).collect();
        assert_eq!(apps, vec!["Cursor", "Terminal"]);
    }

    #[test]
    fn placements_convert_to_screen_units() {
        let result = arrange(&coding_request());
        let cursor = result.placement("Cursor").unwrap();
        let frame = cursor.to_pixels(LAPTOP);
        assert_eq!((frame.x, frame.y), (0.0, 0.0));
        assert_eq!(frame.height, 900.0);
        assert!((frame.width - (cursor.rect.width * 1440.0).round()).abs() < f64::EPSILON);
    }
}
