//! Syntax tree of a parsed map source

use crate::feature::Feature;
use crate::types::{Envelope, Length};

/// A parsed map source: the rendered extent, option overrides and features
/// in source order.
#[derive(Debug, Clone)]
pub struct MapSource {
    pub extent: Envelope,
    pub settings: Vec<Setting>,
    pub features: Vec<Feature>,
}

/// A validated `name = value` option override
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Setting {
    /// Multiplier applied to every base font size
    Factor(f64),
    /// Distance trimmed off both ends of linear features
    Trim(Length),
    /// Draw red outlines for feature paths
    Debug(bool),
    /// Administrative level to keep; `None` keeps all
    AdminLevel(Option<i64>),
}
