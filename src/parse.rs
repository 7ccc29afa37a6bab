//! Parse pest pairs into a [`MapSource`]

use miette::SourceSpan;
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;

use crate::ast::{MapSource, Setting};
use crate::errors::{ParseError, SourceContext};
use crate::feature::{Attributes, Feature, Layer};
use crate::types::{Coord, Envelope, Length, Point};
use crate::{MapFeedParser, Rule};

/// Parse a map source read from an unnamed input
pub fn parse(source: &str) -> Result<MapSource, miette::Report> {
    parse_named("<input>", source)
}

/// Parse a map source; `name` is used in diagnostics
pub fn parse_named(name: &str, source: &str) -> Result<MapSource, miette::Report> {
    let reader = Reader {
        ctx: SourceContext::new(name, source),
    };
    reader.program().map_err(miette::Report::new)
}

struct Reader {
    ctx: SourceContext,
}

fn span_of(pair: &Pair<'_, Rule>) -> SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

impl Reader {
    fn program(&self) -> Result<MapSource, ParseError> {
        let pairs = MapFeedParser::parse(Rule::program, &self.ctx.source).map_err(|e| {
            let (start, end) = match e.location {
                InputLocation::Pos(p) => (p, p),
                InputLocation::Span((s, e)) => (s, e),
            };
            ParseError::Syntax {
                message: e.variant.message().to_string(),
                src: self.ctx.named_source(),
                span: (start, end - start).into(),
            }
        })?;

        let mut extent: Option<Envelope> = None;
        let mut settings = Vec::new();
        let mut features = Vec::new();

        for program in pairs {
            for statement in program.into_inner() {
                if statement.as_rule() != Rule::statement {
                    continue;
                }
                let Some(inner) = statement.into_inner().next() else {
                    continue;
                };
                match inner.as_rule() {
                    Rule::extent_stmt => {
                        if extent.is_some() {
                            return Err(ParseError::DuplicateExtent {
                                src: self.ctx.named_source(),
                                span: span_of(&inner),
                            });
                        }
                        extent = Some(self.extent(inner)?);
                    }
                    Rule::assignment => settings.push(self.assignment(inner)?),
                    Rule::feature => features.push(self.feature(inner)?),
                    _ => {}
                }
            }
        }

        let extent = extent.ok_or(ParseError::MissingExtent)?;
        Ok(MapSource {
            extent,
            settings,
            features,
        })
    }

    fn number(&self, pair: Pair<'_, Rule>) -> Result<f64, ParseError> {
        let invalid = |message: String| ParseError::InvalidNumber {
            message,
            src: self.ctx.named_source(),
            span: span_of(&pair),
        };
        let value: f64 = pair.as_str().parse().map_err(|e| invalid(format!("{e}")))?;
        if !value.is_finite() {
            return Err(invalid("out of range".to_string()));
        }
        Ok(value)
    }

    fn numbers(&self, pair: Pair<'_, Rule>) -> Result<Vec<f64>, ParseError> {
        pair.into_inner()
            .filter(|p| p.as_rule() == Rule::number)
            .map(|p| self.number(p))
            .collect()
    }

    fn extent(&self, pair: Pair<'_, Rule>) -> Result<Envelope, ParseError> {
        let n = self.numbers(pair)?;
        // The grammar guarantees exactly four numbers
        Ok(Envelope::from_corners(
            Point::new(Length(n[0]), Length(n[1])),
            Point::new(Length(n[2]), Length(n[3])),
        ))
    }

    fn assignment(&self, pair: Pair<'_, Rule>) -> Result<Setting, ParseError> {
        let mut inner = pair.into_inner();
        let (Some(ident), Some(value)) = (inner.next(), inner.next()) else {
            unreachable!("grammar: assignment = ident ~ \"=\" ~ value");
        };
        let name = ident.as_str().to_string();
        let value_span = span_of(&value);
        let Some(value) = value.into_inner().next() else {
            unreachable!("grammar: value = number | boolean");
        };

        let rejected = |reason: &str| ParseError::InvalidSetting {
            name: name.clone(),
            reason: reason.to_string(),
            src: self.ctx.named_source(),
            span: value_span,
        };
        let flag = |value: &Pair<'_, Rule>| matches!(value.as_str(), "true" | "on");

        match (name.as_str(), value.as_rule()) {
            ("factor", Rule::number) => {
                let v = self.number(value)?;
                if v <= 0.0 {
                    return Err(rejected("must be positive"));
                }
                Ok(Setting::Factor(v))
            }
            ("trim", Rule::number) => {
                let v = self.number(value)?;
                Length::try_non_negative(v)
                    .map(Setting::Trim)
                    .map_err(|e| rejected(&e.to_string()))
            }
            ("debug", Rule::boolean) => Ok(Setting::Debug(flag(&value))),
            ("admin_level", Rule::number) => {
                let v = self.number(value)?;
                if v.fract() != 0.0 {
                    return Err(rejected("must be a whole number"));
                }
                Ok(Setting::AdminLevel(Some(v as i64)))
            }
            ("admin_level", Rule::boolean) if !flag(&value) => Ok(Setting::AdminLevel(None)),
            ("factor" | "trim" | "admin_level", _) => Err(rejected("expected a number")),
            ("debug", _) => Err(rejected("expected on or off")),
            _ => Err(ParseError::UnknownSetting {
                name: name.clone(),
                src: self.ctx.named_source(),
                span: span_of(&ident),
            }),
        }
    }

    fn feature(&self, pair: Pair<'_, Rule>) -> Result<Feature, ParseError> {
        let mut layer = Layer::Road;
        let mut attrs = Attributes::default();
        let mut coords = Vec::new();

        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::layer => {
                    if let Some(l) = Layer::from_keyword(part.as_str()) {
                        layer = l;
                    }
                }
                Rule::string => attrs.kind = unescape(part),
                Rule::attribute => {
                    let Some(attr) = part.into_inner().next() else {
                        continue;
                    };
                    let rule = attr.as_rule();
                    let span = span_of(&attr);
                    let Some(value) = attr.into_inner().next() else {
                        continue;
                    };
                    match rule {
                        Rule::name_attr => attrs.name = Some(unescape(value)),
                        Rule::order_attr => attrs.order = Some(self.number(value)?),
                        Rule::level_attr => {
                            let v = self.number(value)?;
                            if v.fract() != 0.0 {
                                return Err(ParseError::InvalidNumber {
                                    message: "level must be a whole number".to_string(),
                                    src: self.ctx.named_source(),
                                    span,
                                });
                            }
                            attrs.level = Some(v as i64);
                        }
                        _ => {}
                    }
                }
                Rule::coords => {
                    for coord in part.into_inner() {
                        coords.push(self.coord(coord)?);
                    }
                }
                _ => {}
            }
        }

        Ok(Feature::new(layer, attrs, coords))
    }

    fn coord(&self, pair: Pair<'_, Rule>) -> Result<Coord, ParseError> {
        let n = self.numbers(pair)?;
        Ok(Point::new(Length(n[0]), Length(n[1])))
    }
}

/// Decode the escapes allowed inside a quoted string
fn unescape(string: Pair<'_, Rule>) -> String {
    let raw = string
        .into_inner()
        .next()
        .map(|inner| inner.as_str())
        .unwrap_or_default();

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> MapSource {
        match parse(source) {
            Ok(map) => map,
            Err(e) => panic!("failed to parse: {e:?}"),
        }
    }

    #[test]
    fn parse_extent_only() {
        let map = parse_ok("extent 10 20 110 70");
        assert_eq!(map.extent.min, Point::new(Length(10.0), Length(20.0)));
        assert_eq!(map.extent.max, Point::new(Length(110.0), Length(70.0)));
        assert!(map.features.is_empty());
    }

    #[test]
    fn parse_road_with_attributes() {
        let map = parse_ok(
            r#"
            extent 0 0 100 100
            road "primary" name "бул. Витоша" order 5 { 1 2, 3 4, 5.5 -6 }
            "#,
        );
        assert_eq!(map.features.len(), 1);
        let f = &map.features[0];
        assert_eq!(f.layer(), Layer::Road);
        assert_eq!(f.attrs().kind, "primary");
        assert_eq!(f.attrs().name.as_deref(), Some("бул. Витоша"));
        assert_eq!(f.attrs().order, Some(5.0));
        assert_eq!(f.coords().len(), 3);
        assert_eq!(f.coords()[2], Point::new(Length(5.5), Length(-6.0)));
    }

    #[test]
    fn parse_every_layer_keyword() {
        let map = parse_ok(
            r#"
            extent 0 0 1 1
            road "service" {}
            railway "rail" { 0 0, 1 1 }
            waterway "river" { 0 0, 1 1 }
            landuse "park" { 0 0, 1 0, 1 1, }
            waterarea "riverbank" { 0 0, 1 0, 1 1 }
            admin "administrative" level 8 { 0 0, 1 0, 1 1 }
            "#,
        );
        let layers: Vec<Layer> = map.features.iter().map(|f| f.layer()).collect();
        assert_eq!(
            layers,
            vec![
                Layer::Road,
                Layer::Railway,
                Layer::Waterway,
                Layer::LandUse,
                Layer::WaterArea,
                Layer::Admin
            ]
        );
        assert_eq!(map.features[5].attrs().level, Some(8));
        assert!(map.features[0].coords().is_empty());
    }

    #[test]
    fn parse_settings() {
        let map = parse_ok(
            r#"
            extent 0 0 1 1
            factor = 1.5
            trim = 2
            debug = on
            admin_level = off
            "#,
        );
        assert_eq!(
            map.settings,
            vec![
                Setting::Factor(1.5),
                Setting::Trim(Length(2.0)),
                Setting::Debug(true),
                Setting::AdminLevel(None),
            ]
        );
    }

    #[test]
    fn parse_comments_and_escapes() {
        let map = parse_ok(
            "# a comment\nextent 0 0 1 1 // trailing\nroad \"residential\" name \"say \\\"hi\\\"\" { 0 0, 1 1 }\n",
        );
        assert_eq!(map.features[0].attrs().name.as_deref(), Some("say \"hi\""));
    }

    #[test]
    fn missing_extent_is_an_error() {
        let err = parse("road \"primary\" { 0 0, 1 1 }").unwrap_err();
        assert!(err.to_string().contains("missing extent"));
    }

    #[test]
    fn duplicate_extent_is_an_error() {
        let err = parse("extent 0 0 1 1\nextent 0 0 2 2").unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn unknown_setting_is_an_error() {
        let err = parse("extent 0 0 1 1\nzoom = 3").unwrap_err();
        assert!(err.to_string().contains("unknown setting: zoom"));
    }

    #[test]
    fn negative_factor_is_rejected() {
        let err = parse("extent 0 0 1 1\nfactor = -1").unwrap_err();
        assert!(err.to_string().contains("invalid value for factor"));
    }

    #[test]
    fn unknown_layer_is_a_syntax_error() {
        let err = parse("extent 0 0 1 1\nbuilding \"yes\" { 0 0, 1 1 }").unwrap_err();
        assert!(err.to_string().starts_with("syntax error"));
    }
}
