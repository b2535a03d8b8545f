use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::common::collections::HashSet;
use crate::layout_engine::classifier::{Classifier, normalize_name};
use crate::model::{AppDescriptor, Archetype, ContextCategory, RunningApp};

/// How far the filter lowers its threshold per retry when nothing qualifies.
const THRESHOLD_STEP: f64 = 0.1;

/// How much an app of `archetype` matters for `context`, in `0..=1`.
pub fn relevance_score(archetype: Archetype, context: ContextCategory) -> f64 {
    use Archetype::*;
    use ContextCategory::*;
    match (context, archetype) {
        (Coding, CodeWorkspace) => 1.0,
        (Coding, TextStream) => 0.85,
        (Coding, ContentCanvas) => 0.7,
        (Coding, GlanceableMonitor) => 0.2,
        (Coding, Unknown) => 0.4,

        (Design, ContentCanvas) => 1.0,
        (Design, CodeWorkspace) => 0.5,
        (Design, TextStream) => 0.4,
        (Design, GlanceableMonitor) => 0.2,
        (Design, Unknown) => 0.45,

        (Research, ContentCanvas) => 1.0,
        (Research, TextStream) => 0.5,
        (Research, CodeWorkspace) => 0.45,
        (Research, GlanceableMonitor) => 0.2,
        (Research, Unknown) => 0.45,

        (Communication, TextStream) => 1.0,
        (Communication, ContentCanvas) => 0.6,
        (Communication, CodeWorkspace) => 0.3,
        (Communication, GlanceableMonitor) => 0.3,
        (Communication, Unknown) => 0.45,

        (General, CodeWorkspace) => 0.7,
        (General, ContentCanvas) => 0.7,
        (General, TextStream) => 0.6,
        (General, Unknown) => 0.5,
        (General, GlanceableMonitor) => 0.4,
    }
}

/// Minimum relevance an app needs to take part in a layout for `context`.
/// The bound is inclusive: an app scoring exactly the threshold is kept.
pub fn relevance_threshold(context: ContextCategory) -> f64 {
    match context {
        ContextCategory::Coding => 0.5,
        ContextCategory::Design
        | ContextCategory::Research
        | ContextCategory::Communication => 0.45,
        ContextCategory::General => 0.3,
    }
}

/// Name-pattern adjustments that separate apps sharing an archetype.
struct Refinement {
    archetype: Archetype,
    /// `None` applies in every context.
    context: Option<ContextCategory>,
    pattern: &'static str,
    adjust: f64,
}

const REFINEMENTS: &[Refinement] = &[
    Refinement {
        archetype: Archetype::CodeWorkspace,
        context: None,
        pattern: r"cursor|zed|windsurf|code|fleet",
        adjust: 0.08,
    },
    Refinement {
        archetype: Archetype::CodeWorkspace,
        context: None,
        pattern: r"\bn?vim\b|emacs|eclipse|sublime|atom",
        adjust: -0.05,
    },
    Refinement {
        archetype: Archetype::TextStream,
        context: Some(ContextCategory::Coding),
        pattern: r"term|shell|warp|ghostty|kitty|alacritty|wezterm|console",
        adjust: 0.08,
    },
    Refinement {
        archetype: Archetype::TextStream,
        context: Some(ContextCategory::Coding),
        pattern: r"chat|messag|mail|slack|discord|teams|telegram|whatsapp",
        adjust: -0.1,
    },
    Refinement {
        archetype: Archetype::TextStream,
        context: Some(ContextCategory::Communication),
        pattern: r"chat|messag|mail|slack|discord|teams|telegram|whatsapp",
        adjust: 0.08,
    },
    Refinement {
        archetype: Archetype::ContentCanvas,
        context: Some(ContextCategory::Design),
        pattern: r"figma|sketch|photoshop|illustrator|canvas",
        adjust: 0.08,
    },
    Refinement {
        archetype: Archetype::ContentCanvas,
        context: Some(ContextCategory::Research),
        pattern: r"pdf|reader|preview|notes|obsidian|notion",
        adjust: 0.03,
    },
    Refinement {
        archetype: Archetype::ContentCanvas,
        context: None,
        pattern: r"browser|safari|chrom|firefox|\bedge\b|brave|\barc\b|opera|vivaldi",
        adjust: 0.05,
    },
];

static COMPILED_REFINEMENTS: Lazy<Vec<Regex>> = Lazy::new(|| {
    REFINEMENTS
        .iter()
        .map(|r| Regex::new(r.pattern).expect("built-in refinement pattern"))
        .collect()
});

/// Sum of all refinements matching the app's normalized name.
pub(crate) fn name_refinement(name: &str, archetype: Archetype, context: ContextCategory) -> f64 {
    let normalized = normalize_name(name);
    REFINEMENTS
        .iter()
        .zip(COMPILED_REFINEMENTS.iter())
        .filter(|(r, _)| r.archetype == archetype && r.context.is_none_or(|c| c == context))
        .filter(|(_, regex)| regex.is_match(&normalized))
        .map(|(r, _)| r.adjust)
        .sum()
}

/// Tie-breaker for equal relevance: the same table refined by name patterns.
pub fn priority_score(app: &AppDescriptor, context: ContextCategory) -> f64 {
    relevance_score(app.archetype, context) + name_refinement(&app.name, app.archetype, context)
}

fn by_score_desc(a: (f64, f64), b: (f64, f64)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| b.1.total_cmp(&a.1))
}

/// Classifies `apps`, derives the context from `intent` and keeps the most
/// relevant ones. See [`filter_for_context`].
pub fn filter(
    classifier: &Classifier,
    apps: &[RunningApp],
    intent: &str,
    max_count: usize,
) -> Vec<AppDescriptor> {
    filter_for_context(classifier, apps, ContextCategory::from_intent(intent), max_count)
}

/// Scores every app for `context`, sorts by relevance then priority (stable,
/// so equal apps keep their input order), drops those under the context
/// threshold and truncates to `max_count`.
///
/// The result is never empty for a nonempty input: the threshold is lowered
/// step by step until something qualifies. Repeated names keep their first
/// occurrence.
pub fn filter_for_context(
    classifier: &Classifier,
    apps: &[RunningApp],
    context: ContextCategory,
    max_count: usize,
) -> Vec<AppDescriptor> {
    let max_count = max_count.max(1);

    let mut seen = HashSet::default();
    let mut scored: Vec<(AppDescriptor, f64, f64)> = Vec::with_capacity(apps.len());
    for (input_index, app) in apps.iter().enumerate() {
        let name = app.name.trim();
        if name.is_empty() || !seen.insert(name.to_string()) {
            debug!(app = %app.name, "skipping empty or repeated app name");
            continue;
        }
        let descriptor = AppDescriptor {
            name: name.to_string(),
            archetype: classifier.classify(name),
            minimized: app.minimized,
            input_index,
        };
        let relevance = relevance_score(descriptor.archetype, context);
        let priority = priority_score(&descriptor, context);
        trace!(app = %descriptor.name, archetype = %descriptor.archetype, relevance, priority);
        scored.push((descriptor, relevance, priority));
    }

    scored.sort_by(|a, b| by_score_desc((a.1, a.2), (b.1, b.2)));

    let mut threshold = relevance_threshold(context);
    loop {
        let kept: Vec<AppDescriptor> = scored
            .iter()
            .filter(|(_, relevance, _)| *relevance >= threshold)
            .take(max_count)
            .map(|(descriptor, _, _)| descriptor.clone())
            .collect();
        if !kept.is_empty() || scored.is_empty() || threshold <= 0.0 {
            debug!(%context, threshold, kept = kept.len(), "relevance filter");
            return kept;
        }
        threshold = (threshold - THRESHOLD_STEP).max(0.0);
        debug!(%context, threshold, "no app cleared the threshold, relaxing");
    }
}
