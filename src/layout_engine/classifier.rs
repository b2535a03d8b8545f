use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{trace, warn};

use crate::common::config::ClassifierSettings;
use crate::model::Archetype;

/// Well-known names whose category is not obvious from the name alone.
/// Keys are normalized (see [`normalize_name`]).
const KNOWN_APPS: &[(&str, Archetype)] = &[
    ("cursor", Archetype::CodeWorkspace),
    ("zed", Archetype::CodeWorkspace),
    ("windsurf", Archetype::CodeWorkspace),
    ("warp", Archetype::TextStream),
    ("ghostty", Archetype::TextStream),
    ("alacritty", Archetype::TextStream),
    ("kitty", Archetype::TextStream),
    ("wezterm", Archetype::TextStream),
    ("hyper", Archetype::TextStream),
    ("arc", Archetype::ContentCanvas),
    ("safari", Archetype::ContentCanvas),
    ("figma", Archetype::ContentCanvas),
    ("preview", Archetype::ContentCanvas),
    ("spotify", Archetype::GlanceableMonitor),
];

/// Ordered name heuristics; the first match wins.
const PATTERNS: &[(&str, Archetype)] = &[
    (
        r"term|shell|console|\btty\b|\bcli\b|chat|messag|mail|slack|discord|telegram|teams|whatsapp|\birc\b",
        Archetype::TextStream,
    ),
    (
        r"code|studio|\bide\b|charm|storm|intellij|\bn?vim\b|emacs|editor|sublime|eclipse|fleet",
        Archetype::CodeWorkspace,
    ),
    (
        r"browser|safari|chrom|firefox|\bedge\b|brave|opera|vivaldi|preview|viewer|reader|pdf|figma|sketch|canvas|photoshop|illustrator|notion|obsidian|notes|docs|\bword\b|pages|keynote",
        Archetype::ContentCanvas,
    ),
    (
        r"monitor|stats|activity|clock|weather|calendar|music|player|timer|meter|widget|status|battery",
        Archetype::GlanceableMonitor,
    ),
];

static BUILTIN_PATTERNS: Lazy<Vec<(Regex, Archetype)>> = Lazy::new(|| {
    PATTERNS
        .iter()
        .map(|(pattern, archetype)| {
            (Regex::new(pattern).expect("built-in classifier pattern"), *archetype)
        })
        .collect()
});

static DEFAULT_CLASSIFIER: Lazy<Classifier> = Lazy::new(Classifier::default);

/// Classifies with the built-in tables only.
pub fn classify(name: &str) -> Archetype { DEFAULT_CLASSIFIER.classify(name) }

/// Lowercases, trims and drops a trailing `.app`.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    match lowered.strip_suffix(".app") {
        Some(stripped) => stripped.trim_end().to_string(),
        None => lowered,
    }
}

/// Maps application names to archetypes: user rules first, then the curated
/// table, then the built-in patterns, then [`Archetype::Unknown`].
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    user_rules: Vec<(Regex, Archetype)>,
}

impl Classifier {
    pub fn new(settings: &ClassifierSettings) -> Self {
        let user_rules = settings
            .rules
            .iter()
            .filter_map(|rule| match Regex::new(&rule.pattern) {
                Ok(regex) => Some((regex, rule.archetype)),
                Err(err) => {
                    warn!("Skipping classifier rule '{}': {}", rule.pattern, err);
                    None
                }
            })
            .collect();
        Self { user_rules }
    }

    pub fn classify(&self, name: &str) -> Archetype {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return Archetype::Unknown;
        }

        let archetype = self
            .user_rules
            .iter()
            .find(|(regex, _)| regex.is_match(&normalized))
            .map(|(_, archetype)| *archetype)
            .or_else(|| {
                KNOWN_APPS
                    .iter()
                    .find(|(known, _)| *known == normalized)
                    .map(|(_, archetype)| *archetype)
            })
            .or_else(|| {
                BUILTIN_PATTERNS
                    .iter()
                    .find(|(regex, _)| regex.is_match(&normalized))
                    .map(|(_, archetype)| *archetype)
            })
            .unwrap_or(Archetype::Unknown);

        trace!(name, %archetype, "classified");
        archetype
    }
}
