use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tolerance for comparing fractional coordinates against screen edges.
pub const EPSILON: f64 = 1e-6;

/// Smallest extent a placement may shrink to along either axis.
pub const MIN_EXTENT: f64 = 0.01;

/// Rectangle in screen fractions: the origin is the top-left corner and the
/// whole screen is `0..1` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const SCREEN: Rect = Rect { x: 0.0, y: 0.0, width: 1.0, height: 1.0 };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self { Self { x, y, width, height } }

    pub fn right(&self) -> f64 { self.x + self.width }

    pub fn bottom(&self) -> f64 { self.y + self.height }

    pub fn area(&self) -> f64 { self.width.max(0.0) * self.height.max(0.0) }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right - x <= 0.0 || bottom - y <= 0.0 {
            return None;
        }
        Some(Rect::new(x, y, right - x, bottom - y))
    }

    fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// True when the rectangle has positive area and lies on the screen,
    /// allowing [`EPSILON`] of slack on the far edges.
    pub fn is_within_screen(&self) -> bool {
        self.is_finite()
            && self.width > 0.0
            && self.height > 0.0
            && self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= 1.0 + EPSILON
            && self.bottom() <= 1.0 + EPSILON
    }

    /// Shrinks and shifts the rectangle until it satisfies
    /// [`Rect::is_within_screen`], keeping at least [`MIN_EXTENT`] per axis.
    pub fn clamp_to_screen(&self) -> Rect {
        let width = finite_or(self.width, MIN_EXTENT).clamp(MIN_EXTENT, 1.0);
        let height = finite_or(self.height, MIN_EXTENT).clamp(MIN_EXTENT, 1.0);
        let x = finite_or(self.x, 0.0).clamp(0.0, 1.0 - width);
        let y = finite_or(self.y, 0.0).clamp(0.0, 1.0 - height);
        Rect::new(x, y, width, height)
    }

    pub fn to_pixels(&self, screen: ScreenSize) -> PixelFrame {
        PixelFrame {
            x: (self.x * screen.width).round(),
            y: (self.y * screen.height).round(),
            width: (self.width * screen.width).round(),
            height: (self.height * screen.height).round(),
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Area of the union of `rects`, computed on the grid induced by their edges.
pub fn union_area(rects: &[Rect]) -> f64 {
    let rects: Vec<Rect> = rects.iter().copied().filter(|r| r.area() > 0.0).collect();
    if rects.is_empty() {
        return 0.0;
    }

    let xs = sorted_edges(rects.iter().flat_map(|r| [r.x, r.right()]));
    let ys = sorted_edges(rects.iter().flat_map(|r| [r.y, r.bottom()]));

    let mut total = 0.0;
    for xw in xs.windows(2) {
        let mid_x = (xw[0] + xw[1]) / 2.0;
        for yw in ys.windows(2) {
            let mid_y = (yw[0] + yw[1]) / 2.0;
            if rects.iter().any(|r| r.contains_point(mid_x, mid_y)) {
                total += (xw[1] - xw[0]) * (yw[1] - yw[0]);
            }
        }
    }
    total
}

/// Part of `target` not covered by any of `occluders`.
pub fn uncovered_area(target: &Rect, occluders: &[Rect]) -> f64 {
    let clipped: Vec<Rect> = occluders.iter().filter_map(|o| o.intersection(target)).collect();
    (target.area() - union_area(&clipped)).max(0.0)
}

/// Union area clipped to the screen, as a fraction of the screen.
pub fn screen_coverage(rects: &[Rect]) -> f64 {
    let clipped: Vec<Rect> = rects.iter().filter_map(|r| r.intersection(&Rect::SCREEN)).collect();
    union_area(&clipped)
}

fn sorted_edges(edges: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut edges: Vec<f64> = edges.collect();
    edges.sort_by(f64::total_cmp);
    edges.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
    edges
}

/// Screen size in the positioning collaborator's units (usually points).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    pub fn new(width: f64, height: f64) -> Self { Self { width, height } }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Horizontal pixel length as a screen fraction.
    pub fn fraction_x(&self, px: f64) -> f64 { px / self.width }

    /// Vertical pixel length as a screen fraction.
    pub fn fraction_y(&self, px: f64) -> f64 { px / self.height }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for ScreenSize {
    type Err = String;

    /// Parses `WIDTHxHEIGHT`, e.g. `1440x900`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (w, h) = raw
            .trim()
            .split_once(['x', 'X', '×'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{raw}'"))?;
        let width: f64 = w.trim().parse().map_err(|_| format!("invalid width '{w}'"))?;
        let height: f64 = h.trim().parse().map_err(|_| format!("invalid height '{h}'"))?;
        let size = ScreenSize::new(width, height);
        if !size.is_valid() {
            return Err(format!("screen size must be positive, got '{raw}'"));
        }
        Ok(size)
    }
}

/// A placement converted to screen units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}
