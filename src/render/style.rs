//! Classification tables: feature type to label title and style
//!
//! Reference: http://wiki.openstreetmap.org/wiki/Key:highway

use crate::feature::{AreaKind, Feature, Layer};
use crate::types::{Color, Length};

use super::defaults;
use super::types::{FontSpec, LabelStyle};

/// Label size bucket; the font size is the bucket's base size times the
/// render factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Path,
    NarrowRoad,
    MediumWideRoad,
    WideRoad,
    Rail,
    River,
    Area,
}

impl SizeClass {
    pub fn base_size(self) -> f64 {
        match self {
            SizeClass::Path => defaults::PATH_FONT_SIZE,
            SizeClass::NarrowRoad => defaults::NARROW_ROAD_FONT_SIZE,
            SizeClass::MediumWideRoad => defaults::MEDIUM_WIDE_ROAD_FONT_SIZE,
            SizeClass::WideRoad => defaults::WIDE_ROAD_FONT_SIZE,
            SizeClass::Rail => defaults::RAIL_FONT_SIZE,
            SizeClass::River => defaults::RIVER_FONT_SIZE,
            SizeClass::Area => defaults::AREA_FONT_SIZE,
        }
    }
}

/// Title and style for a classified feature
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    pub title: String,
    pub size: SizeClass,
    pub style: LabelStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Styled(LabelSpec),
    /// Not drawn; removed before layout
    Skip,
}

impl Classification {
    pub fn is_skip(&self) -> bool {
        matches!(self, Classification::Skip)
    }
}

/// Maps a feature's layer and attributes to a label, or skips it
pub trait Classifier {
    fn classify(&self, feature: &Feature) -> Classification;
}

/// One row of a lookup table
#[derive(Debug, Clone, Copy)]
struct Entry {
    kind: &'static str,
    rule: Rule,
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Label {
        color: Color,
        size: SizeClass,
        /// Title used when the feature has no name
        title: Option<&'static str>,
    },
    Skip,
}

const fn label(kind: &'static str, color: Color, size: SizeClass) -> Entry {
    Entry {
        kind,
        rule: Rule::Label {
            color,
            size,
            title: None,
        },
    }
}

const fn titled(kind: &'static str, color: Color, size: SizeClass, title: &'static str) -> Entry {
    Entry {
        kind,
        rule: Rule::Label {
            color,
            size,
            title: Some(title),
        },
    }
}

const fn skip(kind: &'static str) -> Entry {
    Entry {
        kind,
        rule: Rule::Skip,
    }
}

use SizeClass::{Area, MediumWideRoad, NarrowRoad, Path, Rail, River, WideRoad};

#[rustfmt::skip]
static ROADS: &[Entry] = &[
    // Wide roads
    label("motorway", Color::CRIMSON, WideRoad),
    label("motorway_link", Color::CRIMSON, MediumWideRoad),
    label("trunk", Color::CRIMSON, WideRoad),
    label("trunk_link", Color::CRIMSON, WideRoad),
    label("primary", Color::ORANGE_RED, WideRoad),
    label("primary_link", Color::ORANGE_RED, WideRoad),
    titled("secondary", Color::DARK_ORANGE, WideRoad, "подлез"),
    label("secondary_link", Color::DARK_ORANGE, WideRoad),
    label("tertiary", Color::ORANGE, WideRoad),
    label("tertiary_link", Color::ORANGE, WideRoad),
    // Streets
    label("unclassified", Color::DARK_CYAN, MediumWideRoad),
    label("residential", Color::DARK_CYAN, MediumWideRoad),
    label("service", Color::DARK_CYAN, NarrowRoad),
    titled("living_street", Color::DODGER_BLUE, MediumWideRoad, "пешеходна улица"),
    titled("pedestrian", Color::DODGER_BLUE, MediumWideRoad, "пешеходна улица"),
    titled("road", Color::YELLOW_GREEN, NarrowRoad, "път"),
    titled("raceway", Color::CRIMSON, NarrowRoad, "писта"),
    // Paths
    label("track", Color::YELLOW_GREEN, Path),
    titled("footway", Color::BURLY_WOOD, Path, "алея"),
    titled("path", Color::BURLY_WOOD, Path, "алея"),
    titled("steps", Color::BURLY_WOOD, Path, "стъпала"),
    titled("cycleway", Color::STEEL_BLUE, Path, "велоалея"),
    titled("bridleway", Color::SADDLE_BROWN, Path, "пътека за езда"),
];

static RAILWAYS: &[Entry] = &[titled("rail", Color::BLACK, Rail, "железопътна линия")];

#[rustfmt::skip]
static WATERWAYS: &[Entry] = &[
    titled("river", Color::NAVY, River, "река"),
    titled("stream", Color::NAVY, River, "поток"),
    titled("canal", Color::NAVY, River, "канал"),
    titled("drain", Color::NAVY, River, "отводнителен канал"),
    titled("ditch", Color::BLUE, River, "канавка"),
];

#[rustfmt::skip]
static AREAS: &[Entry] = &[
    titled("park", Color::LIGHT_GREEN, Area, "парк"),
    titled("grass", Color::LIGHT_GREEN, Area, "тревна площ"),
    titled("garden", Color::LIGHT_GREEN, Area, "градина"),
    titled("forest", Color::LIGHT_GREEN, Area, "дървесна растителност"),
    titled("wood", Color::LIGHT_GREEN, Area, "дървесна растителност"),
    titled("swimming_pool", Color::LIGHT_BLUE, Area, "плувен басейн"),
    skip("residential"),
    titled("footway", Color::LIGHT_GRAY, Area, "площадка"),
    titled("parking", Color::LIGHT_GRAY, Area, "паркинг"),
    titled("pitch", Color::LIGHT_GRAY, Area, "игрище"),
];

/// Default title of `*_link` roads without a table title
const LINK_TITLE: &str = "естакада";

fn lookup(table: &[Entry], kind: &str) -> Option<Rule> {
    table.iter().find(|e| e.kind == kind).map(|e| e.rule)
}

/// Label color for area types missing from the table
fn area_fallback_color(kind: AreaKind) -> Color {
    match kind {
        AreaKind::Admin | AreaKind::Land => Color::LIGHT_GRAY,
        AreaKind::Water => Color::LIGHT_BLUE,
    }
}

/// The built-in tables with sizes scaled by `factor`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltinClassifier {
    pub factor: f64,
}

impl Default for BuiltinClassifier {
    fn default() -> Self {
        Self {
            factor: defaults::FACTOR,
        }
    }
}

impl BuiltinClassifier {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    fn font(&self, family: &str, size: SizeClass) -> FontSpec {
        FontSpec::new(family, Length(size.base_size() * self.factor))
    }

    fn road(&self, feature: &Feature, table: &[Entry]) -> Classification {
        let kind = feature.attrs().kind.as_str();
        let Some(Rule::Label { color, size, title }) = lookup(table, kind) else {
            return Classification::Skip;
        };
        let default = match title {
            Some(t) => t,
            None if kind.contains("_link") => LINK_TITLE,
            None => kind,
        };
        let title = feature.title_or(default);
        let title = if size == SizeClass::Path {
            title.to_lowercase()
        } else {
            title.to_uppercase()
        };
        let style = LabelStyle::new(self.font(defaults::ROAD_FONT, size), color).with_halo(true);
        Classification::Styled(LabelSpec { title, size, style })
    }

    fn waterway(&self, feature: &Feature) -> Classification {
        let kind = feature.attrs().kind.as_str();
        let Some(Rule::Label { color, size, title }) = lookup(WATERWAYS, kind) else {
            return Classification::Skip;
        };
        let title = feature.title_or(title.unwrap_or(kind)).to_string();
        let font = self.font(defaults::WATERWAY_FONT, size).bold(true).italic(true);
        let style = LabelStyle::new(font, color).with_halo(true);
        Classification::Styled(LabelSpec { title, size, style })
    }

    fn area(&self, feature: &Feature, area: AreaKind) -> Classification {
        let kind = feature.attrs().kind.as_str();
        let (color, size, default) = match lookup(AREAS, kind) {
            Some(Rule::Skip) => return Classification::Skip,
            Some(Rule::Label { color, size, title }) => (color, size, title.unwrap_or(kind)),
            None => (area_fallback_color(area), SizeClass::Area, kind),
        };
        let title = feature.title_or(default).to_string();
        let style = LabelStyle::new(self.font(defaults::AREA_FONT, size), color);
        Classification::Styled(LabelSpec { title, size, style })
    }
}

impl Classifier for BuiltinClassifier {
    fn classify(&self, feature: &Feature) -> Classification {
        match feature.layer() {
            Layer::Road => self.road(feature, ROADS),
            Layer::Railway => self.road(feature, RAILWAYS),
            Layer::Waterway => self.waterway(feature),
            Layer::LandUse | Layer::WaterArea | Layer::Admin => match feature.layer().area_kind() {
                Some(area) => self.area(feature, area),
                None => Classification::Skip,
            },
        }
    }
}
