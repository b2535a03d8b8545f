//! Contextual cascade layout engine.
//!
//! Given the names of running applications and a free-text statement of what
//! the user wants to do, decide which screen region, stacking layer and role
//! each window gets. The whole pipeline is a pure function of its inputs.

pub mod common;
pub mod layout_engine;
pub mod model;

pub use layout_engine::{LayoutEngine, LayoutError, LayoutRequest};
pub use model::{
    AppDescriptor, Archetype, ContextCategory, LayoutDiagnostics, LayoutResult, Rect, Role,
    RunningApp, ScreenSize, WindowPlacement,
};
