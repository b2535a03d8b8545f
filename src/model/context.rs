use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Coarse classification of what the user wants to do.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContextCategory {
    Coding,
    Design,
    Research,
    Communication,
    #[default]
    General,
}

/// Keywords per category, in tie-break order. Matching is substring
/// containment on the lowercased intent, so stems like "debug" also catch
/// "debugging".
const CONTEXT_KEYWORDS: &[(ContextCategory, &[&str])] = &[
    (ContextCategory::Coding, &[
        "code", "coding", "program", "develop", "debug", "compile", "refactor", "script",
        "engineer", "commit", "deploy", "hack",
    ]),
    (ContextCategory::Design, &[
        "design", "draw", "sketch", "mockup", "prototype", "illustrat", "wirefram", "figma",
        "photo", "paint",
    ]),
    (ContextCategory::Research, &[
        "research", "read", "study", "learn", "browse", "investigat", "search", "paper", "article",
        "docs",
    ]),
    (ContextCategory::Communication, &[
        "chat", "message", "email", "mail", "meeting", "talk", "communicat", "reply", "respond",
        "call", "slack",
    ]),
];

impl ContextCategory {
    /// Derives the category from free text. The category with the most
    /// keyword hits wins; ties go to the earlier category and no hits at all
    /// means [`ContextCategory::General`].
    pub fn from_intent(intent: &str) -> ContextCategory {
        let normalized = intent.trim().to_lowercase();
        if normalized.is_empty() {
            return ContextCategory::General;
        }

        let mut best = ContextCategory::General;
        let mut best_hits = 0;
        for (category, keywords) in CONTEXT_KEYWORDS {
            let hits = keywords.iter().filter(|k| normalized.contains(*k)).count();
            if hits > best_hits {
                best = *category;
                best_hits = hits;
            }
        }
        best
    }
}
