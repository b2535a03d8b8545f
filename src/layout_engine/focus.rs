use tracing::debug;

use crate::layout_engine::LayoutError;
use crate::layout_engine::relevance::name_refinement;
use crate::model::{AppDescriptor, Archetype, ContextCategory};

/// How strongly an app of `archetype` should hold focus in `context`. Tuned
/// separately from relevance: a terminal is very relevant while coding but
/// should not take focus from the editor.
pub fn focus_score(archetype: Archetype, context: ContextCategory) -> f64 {
    use Archetype::*;
    use ContextCategory::*;
    match (context, archetype) {
        (Coding, CodeWorkspace) => 1.0,
        (Coding, TextStream) => 0.6,
        (Coding, ContentCanvas) => 0.5,
        (Coding, Unknown) => 0.35,
        (Coding, GlanceableMonitor) => 0.1,

        (Design, ContentCanvas) => 1.0,
        (Design, CodeWorkspace) => 0.5,
        (Design, Unknown) => 0.4,
        (Design, TextStream) => 0.3,
        (Design, GlanceableMonitor) => 0.1,

        (Research, ContentCanvas) => 1.0,
        (Research, TextStream) => 0.45,
        (Research, CodeWorkspace) => 0.4,
        (Research, Unknown) => 0.4,
        (Research, GlanceableMonitor) => 0.1,

        (Communication, TextStream) => 1.0,
        (Communication, ContentCanvas) => 0.5,
        (Communication, Unknown) => 0.4,
        (Communication, CodeWorkspace) => 0.3,
        (Communication, GlanceableMonitor) => 0.1,

        (General, CodeWorkspace) => 0.8,
        (General, ContentCanvas) => 0.75,
        (General, TextStream) => 0.55,
        (General, Unknown) => 0.5,
        (General, GlanceableMonitor) => 0.1,
    }
}

pub fn focus_priority(app: &AppDescriptor, context: ContextCategory) -> f64 {
    focus_score(app.archetype, context) + name_refinement(&app.name, app.archetype, context)
}

/// `apps` ordered by descending focus priority, ties by input order. The
/// order does not depend on how `apps` itself is ordered.
pub fn priority_order(apps: &[AppDescriptor], context: ContextCategory) -> Vec<&AppDescriptor> {
    let mut ordered: Vec<(&AppDescriptor, f64)> =
        apps.iter().map(|app| (app, focus_priority(app, context))).collect();
    ordered.sort_by(|(a, pa), (b, pb)| {
        pb.total_cmp(pa).then_with(|| a.input_index.cmp(&b.input_index))
    });
    ordered.into_iter().map(|(app, _)| app).collect()
}

/// Picks the app that should hold focus.
pub fn resolve_primary<'a>(
    apps: &'a [AppDescriptor],
    context: ContextCategory,
) -> Result<&'a AppDescriptor, LayoutError> {
    let primary = priority_order(apps, context).into_iter().next().ok_or(LayoutError::EmptyInput)?;
    debug!(primary = %primary.name, archetype = %primary.archetype, %context, "resolved primary");
    Ok(primary)
}
