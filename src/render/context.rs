//! Rendering context - tracks state during one render pass

use std::collections::HashMap;
use std::sync::atomic::Ordering;

use crate::errors::RenderError;
use crate::feature::AreaKind;
use crate::types::Envelope;

use super::RenderOptions;
use super::geometry::{DeviceTransform, canvas_size};

/// Outcome counts of a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    /// Features that produced primitives
    pub drawn: usize,
    /// Features dropped by the filter stage or with too little geometry
    pub skipped: usize,
    /// Features whose layout failed
    pub failed: usize,
}

impl RenderSummary {
    pub fn total(&self) -> usize {
        self.drawn + self.skipped + self.failed
    }
}

/// Rendering context
pub struct RenderContext<'a> {
    pub options: &'a RenderOptions,
    pub extent: Envelope,
    pub transform: DeviceTransform,
    pub summary: RenderSummary,
    /// Ids handed out so far, per prefix
    counters: HashMap<&'static str, usize>,
}

impl<'a> RenderContext<'a> {
    /// Validate the extent and options and start a pass
    pub fn new(extent: &Envelope, options: &'a RenderOptions) -> Result<Self, RenderError> {
        let (width, height) = (extent.width().raw(), extent.height().raw());
        let canvas = canvas_size(extent);
        if extent.is_empty()
            || !(width.is_finite() && height.is_finite())
            || canvas.0 < 1
            || canvas.1 < 1
        {
            return Err(RenderError::InvalidExtent { width, height });
        }
        if !(options.factor.is_finite() && options.factor > 0.0) {
            return Err(RenderError::InvalidFactor {
                value: options.factor,
            });
        }
        Ok(Self {
            options,
            extent: *extent,
            transform: DeviceTransform::for_extent(extent),
            summary: RenderSummary::default(),
            counters: HashMap::new(),
        })
    }

    fn bump(&mut self, key: &'static str) -> usize {
        let n = self.counters.entry(key).or_insert(0);
        *n += 1;
        *n
    }

    /// Id of the next road or railway path, starting at `road1`
    pub fn road_id(&mut self) -> String {
        format!("road{}", self.bump("road"))
    }

    /// Id of the next waterway path, starting at `waterway1`
    pub fn waterway_id(&mut self) -> String {
        format!("waterway{}", self.bump("waterway"))
    }

    /// Id of the next clip region for an area kind, e.g. `luses1Land`
    pub fn clip_id(&mut self, kind: AreaKind) -> String {
        let key = match kind {
            AreaKind::Water => "luses:water",
            AreaKind::Land => "luses:land",
            AreaKind::Admin => "luses:admin",
        };
        format!("luses{}{}", self.bump(key), kind)
    }

    /// Error out if the caller raised the cancel flag
    pub fn check_cancelled(&self) -> Result<(), RenderError> {
        match &self.options.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(RenderError::Cancelled {
                completed: self.summary.total(),
            }),
            _ => Ok(()),
        }
    }
}
