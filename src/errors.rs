//! Error Types
//!
//! This module defines the error types used throughout the subsystem.
//!
//! # Overview
//!
//! The main error type [`GfxError`] covers all failure modes including:
//! - Bad configuration (bake sizes, malformed environment-map images)
//! - Failures reported by the render backend or the output surface
//! - I/O and image codec errors
//! - Invariant violations detected across the backend boundary
//!
//! Every variant classifies into one of three coarse kinds via
//! [`GfxError::kind`]: configuration errors abort an operation before any
//! resources are touched, platform/render errors are caught at the frame
//! boundary (or abort a bake outright), and invariant violations indicate a
//! logic error elsewhere in the engine.
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, GfxError>`.

use thiserror::Error;

/// The main error type for the graphics subsystem.
#[derive(Error, Debug)]
pub enum GfxError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// The caller supplied a configuration value the subsystem cannot honor.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Environment cube map validation error.
    #[error("environment map error: {0}")]
    CubeMap(String),

    // ========================================================================
    // Platform & Render Errors
    // ========================================================================
    /// The render backend failed mid-frame or mid-bake.
    #[error("render backend error: {0}")]
    Backend(String),

    /// The output surface failed (swap, screenshot, ...).
    #[error("output surface error: {0}")]
    Surface(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding or decoding error.
    #[error("image error: {0}")]
    Image(String),

    // ========================================================================
    // Invariant Violations
    // ========================================================================
    /// A fixed internal invariant was broken; indicates a logic error, not
    /// bad external input.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl From<image::ImageError> for GfxError {
    fn from(err: image::ImageError) -> Self {
        GfxError::Image(err.to_string())
    }
}

/// Coarse error classification.
///
/// Frame-level handling branches on the kind, not on individual variants:
/// platform/render failures are logged and the frame is dropped, while
/// configuration errors surface to the caller before side effects occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    PlatformRender,
    InvariantViolation,
}

impl GfxError {
    /// Classifies this error into the three-way handling taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            GfxError::Configuration(_) | GfxError::CubeMap(_) => ErrorKind::Configuration,
            GfxError::Backend(_)
            | GfxError::Surface(_)
            | GfxError::Io(_)
            | GfxError::Image(_) => ErrorKind::PlatformRender,
            GfxError::InvariantViolation(_) => ErrorKind::InvariantViolation,
        }
    }
}

/// Alias for `Result<T, GfxError>`.
pub type Result<T> = std::result::Result<T, GfxError>;
