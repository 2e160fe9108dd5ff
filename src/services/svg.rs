//! SVG document assembly for tinted floor plans.
//!
//! The document embeds the floor image as a data URI and overlays one filled
//! polygon per location. Elements are written through [`Element`], which
//! escapes every attribute value, so location data can never break the markup.

use std::fmt::Write;

use crate::models::ColorTier;
use crate::services::image_probe::Dimensions;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// One tinted location outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolygonOverlay {
    /// Title attribute, the location code.
    pub title: String,
    /// Outline in SVG `points` syntax.
    pub points: String,
    /// Fill tier.
    pub tier: ColorTier,
}

/// An SVG element under construction.
struct Element {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
}

impl Element {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
        }
    }

    fn attr(mut self, key: &'static str, value: impl ToString) -> Self {
        self.attributes.push((key, value.to_string()));
        self
    }

    fn write_open_tag(&self, out: &mut String, self_closing: bool) {
        let _ = write!(out, "<{}", self.name);
        for (key, value) in &self.attributes {
            let _ = write!(out, r#" {}="{}""#, key, htmlize::escape_all_quotes(value.as_str()));
        }
        out.push_str(if self_closing { "/>" } else { ">" });
    }

    fn write_empty(&self, out: &mut String) {
        self.write_open_tag(out, true);
    }
}

/// Assembles the floor document.
///
/// Polygons are emitted in the order given. `mime_type` labels the embedded
/// image's data URI; `image_base64` is embedded verbatim.
pub fn assemble(
    dims: Dimensions,
    mime_type: &str,
    image_base64: &str,
    polygons: &[PolygonOverlay],
) -> Vec<u8> {
    let mut out = String::with_capacity(image_base64.len() + polygons.len() * 128 + 512);

    out.push_str(XML_DECLARATION);
    out.push('\n');

    let root = Element::new("svg")
        .attr("viewBox", format!("0 0 {} {}", dims.width, dims.height))
        .attr("xmlns", SVG_NS)
        .attr("xmlns:xlink", XLINK_NS)
        .attr("xml:space", "preserve");
    root.write_open_tag(&mut out, false);
    out.push('\n');

    out.push_str("  ");
    Element::new("image")
        .attr("x", 0)
        .attr("y", 0)
        .attr("width", dims.width)
        .attr("height", dims.height)
        .attr("xlink:href", format!("data:{mime_type};base64,{image_base64}"))
        .write_empty(&mut out);
    out.push('\n');

    for polygon in polygons {
        out.push_str("  ");
        Element::new("polygon")
            .attr("title", &polygon.title)
            .attr("points", &polygon.points)
            .attr("fill", polygon.tier.color())
            .attr("stroke", "black")
            .attr("stroke-width", 0)
            .write_empty(&mut out);
        out.push('\n');
    }

    let _ = write!(out, "</{}>", root.name);
    out.into_bytes()
}
