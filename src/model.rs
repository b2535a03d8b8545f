pub mod app;
pub mod context;
pub mod geometry;
pub mod hints;
pub mod placement;

pub use app::{AppDescriptor, Archetype, RunningApp};
pub use context::ContextCategory;
pub use geometry::{PixelFrame, Rect, ScreenSize};
pub use hints::{ManualOverride, Overrides, PreferenceHint, PreferenceSnapshot, Side};
pub use placement::{
    Diagnostic, LayoutDiagnostics, LayoutResult, Role, RoleAssignment, WindowPlacement,
};
