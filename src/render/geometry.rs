//! Geometry adapter: world coordinates to trimmed device-space polylines

use glam::{DVec2, dvec2};

use crate::errors::LayoutError;
use crate::types::{Coord, Envelope, Length};

/// Whole-unit canvas size for an extent, truncated toward zero
pub fn canvas_size(extent: &Envelope) -> (i64, i64) {
    (
        extent.width().raw().trunc() as i64,
        extent.height().raw().trunc() as i64,
    )
}

/// Maps world coordinates into device space: translated by the world origin
/// and flipped so Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceTransform {
    pub world_origin: DVec2,
    pub canvas_height: f64,
}

impl DeviceTransform {
    pub fn new(world_origin: DVec2, canvas_height: f64) -> Self {
        Self {
            world_origin,
            canvas_height,
        }
    }

    /// Transform onto the extent's canvas, see [`canvas_size`]
    pub fn for_extent(extent: &Envelope) -> Self {
        let (_, height) = canvas_size(extent);
        Self::new(
            dvec2(extent.min.x.raw(), extent.min.y.raw()),
            height as f64,
        )
    }

    pub fn apply(&self, c: Coord) -> DVec2 {
        dvec2(
            c.x.raw() - self.world_origin.x,
            self.canvas_height - (c.y.raw() - self.world_origin.y),
        )
    }

    /// Device point of an envelope's top-left corner
    pub fn top_left(&self, envelope: &Envelope) -> DVec2 {
        self.apply(Coord::new(envelope.min.x, envelope.max.y))
    }
}

/// Two consecutive polyline points in device space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceSegment {
    pub start: DVec2,
    pub end: DVec2,
}

impl DeviceSegment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Ratio of `amount` to this segment's length, clamped to `[0, 1]`.
    /// `None` for a zero-length segment.
    fn trim_ratio(&self, amount: f64) -> Option<f64> {
        let len = self.length();
        if len == 0.0 {
            return None;
        }
        Some((amount / len).clamp(0.0, 1.0))
    }
}

/// A feature polyline in device space, ends optionally shortened
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrimmedPath {
    segments: Vec<DeviceSegment>,
}

impl TrimmedPath {
    pub fn segments(&self) -> &[DeviceSegment] {
        &self.segments
    }

    /// Total length of all segments
    pub fn length(&self) -> Length {
        Length(self.segments.iter().map(DeviceSegment::length).sum())
    }

    /// Vertices in order: the first segment's start, then every segment's end
    pub fn points(&self) -> Vec<DVec2> {
        let mut points = Vec::with_capacity(self.segments.len() + 1);
        if let Some(first) = self.segments.first() {
            points.push(first.start);
        }
        points.extend(self.segments.iter().map(|s| s.end));
        points
    }
}

/// Build the device-space polyline for a feature's coordinates.
///
/// The first segment's start moves toward its end by `trim`, and the last
/// segment's end moves toward its start by the same distance. Interior
/// segments are untouched and coordinate order is preserved.
pub fn build_path(
    coords: &[Coord],
    transform: &DeviceTransform,
    trim: Length,
) -> Result<TrimmedPath, LayoutError> {
    if coords.len() < 2 {
        return Err(LayoutError::EmptyGeometry {
            count: coords.len(),
        });
    }
    let trim = Length::try_non_negative(trim.raw())
        .map_err(|source| LayoutError::InvalidTarget {
            what: "trim distance",
            source,
        })?
        .raw();

    let mut points = Vec::with_capacity(coords.len());
    for (index, c) in coords.iter().enumerate() {
        if !c.is_finite() {
            return Err(LayoutError::InvalidCoordinate { index });
        }
        points.push(transform.apply(*c));
    }

    let mut segments: Vec<DeviceSegment> = points
        .windows(2)
        .map(|w| DeviceSegment::new(w[0], w[1]))
        .collect();

    if trim > 0.0 {
        let last = segments.len() - 1;
        // Both ratios come from the untrimmed segments
        let first = segments[0];
        let tail = segments[last];
        let start_ratio = first.trim_ratio(trim);
        let end_ratio = tail.trim_ratio(trim);

        if let Some(r) = start_ratio {
            segments[0].start = first.start.lerp(first.end, r);
        }
        if let Some(mut r) = end_ratio {
            if last == 0 {
                // One segment trimmed from both ends; the end stops where the start is
                r = r.min(1.0 - start_ratio.unwrap_or(0.0));
            }
            segments[last].end = tail.end.lerp(tail.start, r);
        }
    }

    Ok(TrimmedPath { segments })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn c(x: f64, y: f64) -> Coord {
        Point::new(Length(x), Length(y))
    }

    fn approx(a: DVec2, b: DVec2) -> bool {
        a.distance(b) < 1e-9
    }

    fn identity(height: f64) -> DeviceTransform {
        DeviceTransform::new(DVec2::ZERO, height)
    }

    #[test]
    fn transform_flips_and_translates() {
        let extent = Envelope::from_corners(c(100.0, 200.0), c(150.0, 240.0));
        let t = DeviceTransform::for_extent(&extent);
        assert_eq!(t.apply(c(100.0, 200.0)), dvec2(0.0, 40.0));
        assert_eq!(t.apply(c(150.0, 240.0)), dvec2(50.0, 0.0));
        assert_eq!(t.apply(c(110.0, 230.0)), dvec2(10.0, 10.0));
    }

    #[test]
    fn fractional_extent_flips_against_the_truncated_canvas() {
        let extent = Envelope::from_corners(c(0.0, 0.0), c(100.4, 49.6));
        assert_eq!(canvas_size(&extent), (100, 49));
        let t = DeviceTransform::for_extent(&extent);
        assert_eq!(t.apply(c(0.0, 0.0)), dvec2(0.0, 49.0));
        assert_eq!(t.apply(c(10.0, 49.0)), dvec2(10.0, 0.0));
    }

    #[test]
    fn top_left_of_envelope() {
        let t = DeviceTransform::new(dvec2(100.0, 200.0), 40.0);
        let env = Envelope::from_corners(c(110.0, 210.0), c(130.0, 230.0));
        assert_eq!(t.top_left(&env), dvec2(10.0, 10.0));
    }

    #[test]
    fn fewer_than_two_coordinates_is_empty_geometry() {
        let t = identity(10.0);
        assert_eq!(
            build_path(&[], &t, Length::ZERO),
            Err(LayoutError::EmptyGeometry { count: 0 })
        );
        assert_eq!(
            build_path(&[c(1.0, 1.0)], &t, Length::ZERO),
            Err(LayoutError::EmptyGeometry { count: 1 })
        );
    }

    #[test]
    fn non_finite_coordinate_is_rejected() {
        let t = identity(10.0);
        let coords = [c(0.0, 0.0), c(f64::NAN, 1.0), c(2.0, 2.0)];
        assert_eq!(
            build_path(&coords, &t, Length::ZERO),
            Err(LayoutError::InvalidCoordinate { index: 1 })
        );
    }

    #[test]
    fn untrimmed_path_keeps_order_and_duplicates() {
        let t = identity(10.0);
        let coords = [c(0.0, 10.0), c(3.0, 6.0), c(3.0, 6.0), c(0.0, 10.0)];
        let path = build_path(&coords, &t, Length::ZERO).unwrap();
        assert_eq!(path.segments().len(), 3);
        assert_eq!(
            path.points(),
            vec![
                dvec2(0.0, 0.0),
                dvec2(3.0, 4.0),
                dvec2(3.0, 4.0),
                dvec2(0.0, 0.0)
            ]
        );
        assert_eq!(path.length(), Length(10.0));
    }

    #[test]
    fn trim_shortens_only_the_outer_ends() {
        let t = identity(0.0);
        // Device y = -y; lengths are unaffected by the flip
        let coords = [c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0), c(20.0, 10.0)];
        let path = build_path(&coords, &t, Length(2.0)).unwrap();
        let s = path.segments();
        assert!(approx(s[0].start, dvec2(2.0, 0.0)));
        assert!(approx(s[0].end, dvec2(10.0, 0.0)));
        assert_eq!(s[1], DeviceSegment::new(dvec2(10.0, 0.0), dvec2(10.0, -10.0)));
        assert!(approx(s[2].start, dvec2(10.0, -10.0)));
        assert!(approx(s[2].end, dvec2(18.0, -10.0)));
        assert!((path.length().raw() - 26.0).abs() < 1e-9);
    }

    #[test]
    fn trim_longer_than_segment_collapses_without_inverting() {
        let t = identity(0.0);
        let coords = [c(0.0, 0.0), c(3.0, 0.0), c(3.0, 5.0), c(4.0, 5.0)];
        let path = build_path(&coords, &t, Length(100.0)).unwrap();
        let s = path.segments();
        // First segment's start reaches its end, last segment's end reaches its start
        assert!(approx(s[0].start, s[0].end));
        assert!(approx(s[2].end, s[2].start));
        assert!((path.length().raw() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn single_segment_trim_never_inverts() {
        let t = identity(0.0);
        let coords = [c(0.0, 0.0), c(4.0, 0.0)];

        let path = build_path(&coords, &t, Length(1.0)).unwrap();
        let s = path.segments()[0];
        assert!(approx(s.start, dvec2(1.0, 0.0)));
        assert!(approx(s.end, dvec2(3.0, 0.0)));

        let path = build_path(&coords, &t, Length(3.0)).unwrap();
        let s = path.segments()[0];
        assert!(s.start.x <= s.end.x + 1e-9);
        assert!(path.length().raw() < 1e-9);
    }

    #[test]
    fn single_segment_end_moves_by_the_full_trim() {
        let t = identity(0.0);
        let path = build_path(&[c(0.0, 0.0), c(10.0, 0.0)], &t, Length(4.0)).unwrap();
        let s = path.segments()[0];
        assert!(approx(s.start, dvec2(4.0, 0.0)));
        assert!(approx(s.end, dvec2(6.0, 0.0)));
        assert!((path.length().raw() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn zero_length_segment_skips_trim() {
        let t = identity(0.0);
        let coords = [c(5.0, 5.0), c(5.0, 5.0), c(9.0, 5.0)];
        let path = build_path(&coords, &t, Length(1.0)).unwrap();
        let s = path.segments();
        assert_eq!(s[0].start, dvec2(5.0, -5.0));
        assert!(approx(s[1].end, dvec2(8.0, -5.0)));
    }

    #[test]
    fn negative_trim_is_an_invalid_target() {
        let t = identity(0.0);
        let coords = [c(0.0, 0.0), c(4.0, 0.0)];
        assert!(matches!(
            build_path(&coords, &t, Length(-1.0)),
            Err(LayoutError::InvalidTarget { .. })
        ));
    }
}
