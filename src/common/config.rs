use std::path::{Path, PathBuf};

use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::Archetype;

const MAX_APPS: usize = 16;

pub fn config_file() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".cascade.toml")
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub classifier: ClassifierSettings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Upper bound on how many apps the relevance filter keeps.
    #[serde(default = "default_max_apps")]
    pub max_apps: usize,
    /// Fraction of the screen the union of all windows should cover.
    #[serde(default = "default_target_coverage")]
    pub target_coverage: f64,
    /// Minimum unoccluded area per window, as a fraction of screen area.
    #[serde(default = "default_min_visible_area")]
    pub min_visible_area: f64,
    /// Preference hints below this confidence are ignored.
    #[serde(default = "default_preference_confidence_threshold")]
    pub preference_confidence_threshold: f64,
    #[serde(default)]
    pub geometry: GeometrySettings,
}

/// Policy constants for the cascade geometry. Fractions are of the screen
/// extent along the same axis; `*_px` values are converted with the screen size
/// of each invocation.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct GeometrySettings {
    #[serde(default = "default_primary_width_min")]
    pub primary_width_min: f64,
    #[serde(default = "default_primary_width_max")]
    pub primary_width_max: f64,
    #[serde(default = "default_primary_height_min")]
    pub primary_height_min: f64,
    #[serde(default = "default_primary_min_px")]
    pub primary_min_px: f64,

    /// Hard width cap for a text stream that is not focused.
    #[serde(default = "default_side_column_cap")]
    pub side_column_cap: f64,
    /// Hard width cap for a text stream that holds focus.
    #[serde(default = "default_side_column_focused_cap")]
    pub side_column_focused_cap: f64,
    #[serde(default = "default_side_column_min_px")]
    pub side_column_min_px: f64,

    #[serde(default = "default_canvas_min_width")]
    pub canvas_min_width: f64,
    #[serde(default = "default_canvas_min_px")]
    pub canvas_min_px: f64,

    #[serde(default = "default_peek_overlap_min")]
    pub peek_overlap_min: f64,
    #[serde(default = "default_peek_overlap_max")]
    pub peek_overlap_max: f64,
    #[serde(default = "default_peek_height_min")]
    pub peek_height_min: f64,
    #[serde(default = "default_peek_height_max")]
    pub peek_height_max: f64,
    #[serde(default = "default_peek_max_width")]
    pub peek_max_width: f64,

    #[serde(default = "default_corner_width")]
    pub corner_width: f64,
    #[serde(default = "default_corner_height")]
    pub corner_height: f64,
    #[serde(default = "default_corner_max_width")]
    pub corner_max_width: f64,
    #[serde(default = "default_corner_max_height")]
    pub corner_max_height: f64,
    /// Smallest corner window that is still comfortably clickable.
    #[serde(default = "default_corner_min_px_width")]
    pub corner_min_px_width: f64,
    #[serde(default = "default_corner_min_px_height")]
    pub corner_min_px_height: f64,

    /// Narrowest strip of a cascaded window that still counts as reachable.
    #[serde(default = "default_min_visible_strip_px")]
    pub min_visible_strip_px: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ClassifierSettings {
    /// Evaluated in order, before the built-in patterns.
    #[serde(default)]
    pub rules: Vec<ClassifierRule>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct ClassifierRule {
    /// Regular expression matched against the lowercased app name.
    pub pattern: String,
    pub archetype: Archetype,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_apps: default_max_apps(),
            target_coverage: default_target_coverage(),
            min_visible_area: default_min_visible_area(),
            preference_confidence_threshold: default_preference_confidence_threshold(),
            geometry: GeometrySettings::default(),
        }
    }
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            primary_width_min: default_primary_width_min(),
            primary_width_max: default_primary_width_max(),
            primary_height_min: default_primary_height_min(),
            primary_min_px: default_primary_min_px(),
            side_column_cap: default_side_column_cap(),
            side_column_focused_cap: default_side_column_focused_cap(),
            side_column_min_px: default_side_column_min_px(),
            canvas_min_width: default_canvas_min_width(),
            canvas_min_px: default_canvas_min_px(),
            peek_overlap_min: default_peek_overlap_min(),
            peek_overlap_max: default_peek_overlap_max(),
            peek_height_min: default_peek_height_min(),
            peek_height_max: default_peek_height_max(),
            peek_max_width: default_peek_max_width(),
            corner_width: default_corner_width(),
            corner_height: default_corner_height(),
            corner_max_width: default_corner_max_width(),
            corner_max_height: default_corner_max_height(),
            corner_min_px_width: default_corner_min_px_width(),
            corner_min_px_height: default_corner_min_px_height(),
            min_visible_strip_px: default_min_visible_strip_px(),
        }
    }
}

fn is_fraction(value: f64) -> bool { value.is_finite() && value > 0.0 && value <= 1.0 }

fn is_pixels(value: f64) -> bool { value.is_finite() && value >= 0.0 }

impl Settings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.max_apps == 0 {
            issues.push("max_apps must be at least 1".to_string());
        }
        if self.max_apps > MAX_APPS {
            issues.push(format!(
                "max_apps should not exceed {}, got {}",
                MAX_APPS, self.max_apps
            ));
        }

        if !is_fraction(self.target_coverage) {
            issues.push(format!(
                "target_coverage must be in (0, 1], got {}",
                self.target_coverage
            ));
        }

        if !(self.min_visible_area.is_finite()
            && self.min_visible_area >= 0.0
            && self.min_visible_area < 1.0)
        {
            issues.push(format!(
                "min_visible_area must be in [0, 1), got {}",
                self.min_visible_area
            ));
        }

        if !(0.0..=1.0).contains(&self.preference_confidence_threshold) {
            issues.push(format!(
                "preference_confidence_threshold must be in [0, 1], got {}",
                self.preference_confidence_threshold
            ));
        }

        issues.extend(self.geometry.validate());

        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;

        if self.max_apps == 0 || self.max_apps > MAX_APPS {
            self.max_apps = self.max_apps.clamp(1, MAX_APPS);
            fixes += 1;
        }

        if !is_fraction(self.target_coverage) {
            self.target_coverage = default_target_coverage();
            fixes += 1;
        }

        if !(self.min_visible_area.is_finite()
            && self.min_visible_area >= 0.0
            && self.min_visible_area < 1.0)
        {
            self.min_visible_area = default_min_visible_area();
            fixes += 1;
        }

        if !(0.0..=1.0).contains(&self.preference_confidence_threshold) {
            self.preference_confidence_threshold = default_preference_confidence_threshold();
            fixes += 1;
        }

        fixes += self.geometry.auto_fix_values();

        fixes
    }
}

macro_rules! check_fractions {
    ($self:ident, $issues:ident, $($field:ident),+ $(,)?) => {
        $(
            if !is_fraction($self.$field) {
                $issues.push(format!(
                    "geometry.{} must be in (0, 1], got {}",
                    stringify!($field),
                    $self.$field
                ));
            }
        )+
    };
}

macro_rules! check_pixels {
    ($self:ident, $issues:ident, $($field:ident),+ $(,)?) => {
        $(
            if !is_pixels($self.$field) {
                $issues.push(format!(
                    "geometry.{} must be non-negative, got {}",
                    stringify!($field),
                    $self.$field
                ));
            }
        )+
    };
}

macro_rules! fix_fractions {
    ($self:ident, $defaults:ident, $fixes:ident, $($field:ident),+ $(,)?) => {
        $(
            if !is_fraction($self.$field) {
                $self.$field = $defaults.$field;
                $fixes += 1;
            }
        )+
    };
}

macro_rules! fix_pixels {
    ($self:ident, $defaults:ident, $fixes:ident, $($field:ident),+ $(,)?) => {
        $(
            if !is_pixels($self.$field) {
                $self.$field = $defaults.$field;
                $fixes += 1;
            }
        )+
    };
}

impl GeometrySettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        check_fractions!(
            self,
            issues,
            primary_width_min,
            primary_width_max,
            primary_height_min,
            side_column_cap,
            side_column_focused_cap,
            canvas_min_width,
            peek_overlap_min,
            peek_overlap_max,
            peek_height_min,
            peek_height_max,
            peek_max_width,
            corner_width,
            corner_height,
            corner_max_width,
            corner_max_height,
        );
        check_pixels!(
            self,
            issues,
            primary_min_px,
            side_column_min_px,
            canvas_min_px,
            corner_min_px_width,
            corner_min_px_height,
            min_visible_strip_px,
        );

        let ranges = [
            ("primary_width", self.primary_width_min, self.primary_width_max),
            ("peek_overlap", self.peek_overlap_min, self.peek_overlap_max),
            ("peek_height", self.peek_height_min, self.peek_height_max),
            ("side_column_cap", self.side_column_cap, self.side_column_focused_cap),
            ("corner_width", self.corner_width, self.corner_max_width),
            ("corner_height", self.corner_height, self.corner_max_height),
        ];
        for (name, low, high) in ranges {
            if low > high {
                issues.push(format!("{name}: lower bound {low} exceeds upper bound {high}"));
            }
        }

        issues
    }

    /// Resets out-of-range values to their defaults. Inverted ranges are
    /// restored as a pair.
    pub fn auto_fix_values(&mut self) -> usize {
        let defaults = GeometrySettings::default();
        let mut fixes = 0;

        fix_fractions!(
            self,
            defaults,
            fixes,
            primary_width_min,
            primary_width_max,
            primary_height_min,
            side_column_cap,
            side_column_focused_cap,
            canvas_min_width,
            peek_overlap_min,
            peek_overlap_max,
            peek_height_min,
            peek_height_max,
            peek_max_width,
            corner_width,
            corner_height,
            corner_max_width,
            corner_max_height,
        );
        fix_pixels!(
            self,
            defaults,
            fixes,
            primary_min_px,
            side_column_min_px,
            canvas_min_px,
            corner_min_px_width,
            corner_min_px_height,
            min_visible_strip_px,
        );

        if self.primary_width_min > self.primary_width_max {
            self.primary_width_min = defaults.primary_width_min;
            self.primary_width_max = defaults.primary_width_max;
            fixes += 1;
        }
        if self.peek_overlap_min > self.peek_overlap_max {
            self.peek_overlap_min = defaults.peek_overlap_min;
            self.peek_overlap_max = defaults.peek_overlap_max;
            fixes += 1;
        }
        if self.peek_height_min > self.peek_height_max {
            self.peek_height_min = defaults.peek_height_min;
            self.peek_height_max = defaults.peek_height_max;
            fixes += 1;
        }
        if self.side_column_cap > self.side_column_focused_cap {
            self.side_column_cap = defaults.side_column_cap;
            self.side_column_focused_cap = defaults.side_column_focused_cap;
            fixes += 1;
        }
        if self.corner_width > self.corner_max_width {
            self.corner_width = defaults.corner_width;
            self.corner_max_width = defaults.corner_max_width;
            fixes += 1;
        }
        if self.corner_height > self.corner_max_height {
            self.corner_height = defaults.corner_height;
            self.corner_max_height = defaults.corner_max_height;
            fixes += 1;
        }

        fixes
    }
}

impl ClassifierSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for (index, rule) in self.rules.iter().enumerate() {
            if rule.pattern.trim().is_empty() {
                issues.push(format!("Classifier rule {} has an empty pattern", index));
                continue;
            }
            if let Err(err) = Regex::new(&rule.pattern) {
                issues.push(format!(
                    "Classifier rule {} has an invalid pattern '{}': {}",
                    index, rule.pattern, err
                ));
            }
        }

        issues
    }

    pub fn auto_fix(&mut self) -> usize {
        let before = self.rules.len();
        self.rules
            .retain(|rule| !rule.pattern.trim().is_empty() && Regex::new(&rule.pattern).is_ok());
        before - self.rules.len()
    }
}

fn default_max_apps() -> usize { 4 }

fn default_target_coverage() -> f64 { 0.95 }

fn default_min_visible_area() -> f64 { 0.03 }

fn default_preference_confidence_threshold() -> f64 { 0.6 }

fn default_primary_width_min() -> f64 { 0.55 }

fn default_primary_width_max() -> f64 { 0.75 }

fn default_primary_height_min() -> f64 { 0.85 }

fn default_primary_min_px() -> f64 { 640.0 }

fn default_side_column_cap() -> f64 { 0.30 }

fn default_side_column_focused_cap() -> f64 { 0.55 }

fn default_side_column_min_px() -> f64 { 360.0 }

fn default_canvas_min_width() -> f64 { 0.45 }

fn default_canvas_min_px() -> f64 { 640.0 }

fn default_peek_overlap_min() -> f64 { 0.15 }

fn default_peek_overlap_max() -> f64 { 0.25 }

fn default_peek_height_min() -> f64 { 0.80 }

fn default_peek_height_max() -> f64 { 0.95 }

fn default_peek_max_width() -> f64 { 0.80 }

fn default_corner_width() -> f64 { 0.22 }

fn default_corner_height() -> f64 { 0.22 }

fn default_corner_max_width() -> f64 { 0.40 }

fn default_corner_max_height() -> f64 { 0.45 }

fn default_corner_min_px_width() -> f64 { 320.0 }

fn default_corner_min_px_height() -> f64 { 220.0 }

fn default_min_visible_strip_px() -> f64 { 120.0 }

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&buf)
    }

    /// Loads `path` when it exists and falls back to the built-in defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Config> {
        if path.exists() {
            Self::read(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn default() -> Config {
        Self::parse(include_str!("../../cascade.default.toml"))
            .expect("embedded default config must parse")
    }

    /// Save the current config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml_string.as_bytes())?;

        Ok(())
    }

    /// Validates the entire configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        issues.extend(self.settings.validate());

        issues.extend(self.classifier.validate());

        issues
    }

    /// Attempts to fix configuration values automatically.
    /// Returns the number of fixes applied.
    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;

        fixes += self.settings.auto_fix_values();

        fixes += self.classifier.auto_fix();

        fixes
    }

    fn parse(buf: &str) -> anyhow::Result<Config> {
        let config: Config = toml::from_str(buf)?;
        Ok(config)
    }
}
