use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("No candidate apps to arrange")]
    EmptyInput,
    #[error("Invalid screen size {width}x{height}: both dimensions must be positive")]
    InvalidScreenSize { width: f64, height: f64 },
}
