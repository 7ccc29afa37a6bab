//! Renders map features as SVG where every feature is covered edge-to-edge by
//! a repeating text label.
//!
//! Linear features (roads, railways, waterways) get their label flowed along
//! the whole path; areas (land use, water, administrative) get staggered rows
//! of the label clipped to the polygon.

pub mod ast;
pub mod errors;
pub mod feature;
pub mod log;
pub mod parse;
pub mod render;
pub mod types;

use pest_derive::Parser;

pub use errors::{LayoutError, ParseError, RenderError};
pub use render::{RenderOptions, RenderSummary, Rendered};

#[derive(Parser)]
#[grammar = "mapfeed.pest"]
pub struct MapFeedParser;

/// Render map source text to SVG with the default options.
///
/// Returns the SVG string on success, or an error with diagnostics.
pub fn render_map(source: &str) -> Result<String, miette::Report> {
    render_map_with_options(source, &RenderOptions::default())
}

/// Render map source text to SVG. Settings in the source override `options`.
pub fn render_map_with_options(
    source: &str,
    options: &RenderOptions,
) -> Result<String, miette::Report> {
    let map = parse::parse(source)?;
    let rendered = render::render(&map, options)?;
    Ok(rendered.svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn parse_extent() {
        let result = MapFeedParser::parse(Rule::program, "extent 0 0 10 10");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_feature_with_trailing_comma() {
        let input = r#"road "primary" { 0 0, 1 1, }"#;
        let result = MapFeedParser::parse(Rule::program, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_negative_and_exponent_numbers() {
        let input = r#"waterway "river" { -1.5 2e3, 3 -4 }"#;
        let result = MapFeedParser::parse(Rule::program, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn reject_unterminated_string() {
        let input = r#"road "primary { 0 0, 1 1 }"#;
        assert!(MapFeedParser::parse(Rule::program, input).is_err());
    }

    #[test]
    fn render_map_produces_svg() {
        let svg = render_map(
            r#"
            extent 0 0 100 50
            road "primary" name "Витоша" { 0 25, 100 25 }
            "#,
        )
        .unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("ВИТОША●"));
    }

    #[test]
    fn render_map_reports_parse_errors() {
        let err = render_map("road \"primary\" { 0 0, 1 1 }").unwrap_err();
        assert!(err.to_string().contains("missing extent"));
    }

    #[test]
    fn render_map_reports_bad_extent() {
        let err = render_map("extent 0 0 0 10").unwrap_err();
        assert!(err.to_string().starts_with("invalid extent"));
    }
}
