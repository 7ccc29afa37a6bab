//! Error types with rich diagnostics using miette
//!
//! Parse errors carry source spans for readable error messages. Layout errors
//! are scoped to a single feature; render errors abort the whole pass.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur while reading a map source
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("syntax error: {message}")]
    #[diagnostic(code(textmap::parse::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid number: {message}")]
    #[diagnostic(code(textmap::parse::invalid_number))]
    InvalidNumber {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid number")]
        span: SourceSpan,
    },

    #[error("unknown setting: {name}")]
    #[diagnostic(
        code(textmap::parse::unknown_setting),
        help("known settings are factor, trim, debug and admin_level")
    )]
    UnknownSetting {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a setting")]
        span: SourceSpan,
    },

    #[error("invalid value for {name}: {reason}")]
    #[diagnostic(code(textmap::parse::invalid_setting))]
    InvalidSetting {
        name: String,
        reason: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("rejected")]
        span: SourceSpan,
    },

    #[error("extent declared more than once")]
    #[diagnostic(code(textmap::parse::duplicate_extent))]
    DuplicateExtent {
        #[source_code]
        src: NamedSource<String>,
        #[label("second extent")]
        span: SourceSpan,
    },

    #[error("missing extent")]
    #[diagnostic(
        code(textmap::parse::missing_extent),
        help("declare the rendered area with `extent minX minY maxX maxY`")
    )]
    MissingExtent,
}

// ============================================================================
// Layout Errors
// ============================================================================

/// Errors scoped to one feature; the render pass logs them and moves on
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("feature has {count} coordinate(s), at least 2 are needed")]
    #[diagnostic(code(textmap::layout::empty_geometry))]
    EmptyGeometry { count: usize },

    #[error("coordinate {index} is not finite")]
    #[diagnostic(code(textmap::layout::invalid_coordinate))]
    InvalidCoordinate { index: usize },

    #[error("text metrics for {content:?} are not finite ({width} x {height})")]
    #[diagnostic(code(textmap::layout::non_finite_metrics))]
    NonFiniteMetrics {
        content: String,
        width: f64,
        height: f64,
    },

    #[error("layout target {what} is invalid: {source}")]
    #[diagnostic(code(textmap::layout::invalid_target))]
    InvalidTarget {
        what: &'static str,
        source: NumericError,
    },

    #[error("{layout} layout cannot be placed on a {anchor} anchor")]
    #[diagnostic(code(textmap::layout::anchor_mismatch))]
    AnchorMismatch {
        layout: &'static str,
        anchor: &'static str,
    },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that abort a render pass
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("invalid extent: {width} x {height}")]
    #[diagnostic(
        code(textmap::render::invalid_extent),
        help("the extent must be finite and at least one whole unit wide and tall")
    )]
    InvalidExtent { width: f64, height: f64 },

    #[error("invalid font factor: {value}")]
    #[diagnostic(code(textmap::render::invalid_factor))]
    InvalidFactor { value: f64 },

    #[error("render cancelled after {completed} feature(s)")]
    #[diagnostic(code(textmap::render::cancelled))]
    Cancelled { completed: usize },
}
