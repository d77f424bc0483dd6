use std::fmt::{self, Write};

use crate::models::Wheel;

use super::layout::{layout, marker_path};

const HUB_RADIUS: f64 = 0.3;
const LABEL_START_OFFSET: &str = "15%";

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders `wheel` as a standalone SVG document, turned by `rotation` degrees.
///
/// The marker is drawn outside the rotated group so it stays fixed at
/// fraction 0, where the resolver reads the result.
pub fn render_svg(wheel: &Wheel, rotation: f64) -> Result<String, fmt::Error> {
    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="roulette-wheel" viewBox="-1 -1 2 2">"#
    )?;
    writeln!(
        svg,
        r#"  <g class="roulette-wheel-spin" transform="rotate({rotation})">"#
    )?;

    for (slice, label) in layout(wheel.labels.len()).iter().zip(&wheel.labels) {
        let path_id = format!("slot-{}", escape_xml(&label.id));
        writeln!(svg, "    <g>")?;
        writeln!(
            svg,
            r#"      <path d="{}" fill="{}"/>"#,
            slice.sector_path(),
            escape_xml(&label.color)
        )?;
        writeln!(
            svg,
            r#"      <defs><path id="{path_id}" d="{}"/></defs>"#,
            slice.label_path()
        )?;
        writeln!(
            svg,
            r##"      <text class="roulette-wheel-label" alignment-baseline="middle"><textPath href="#{path_id}" startOffset="{LABEL_START_OFFSET}">{}</textPath></text>"##,
            escape_xml(&label.text)
        )?;
        writeln!(svg, "    </g>")?;
    }

    writeln!(
        svg,
        r#"    <circle cx="0" cy="0" r="{HUB_RADIUS}" fill="white"/>"#
    )?;
    writeln!(svg, "  </g>")?;
    writeln!(
        svg,
        r#"  <path class="roulette-wheel-marker" d="{}"/>"#,
        marker_path()
    )?;
    svg.push_str("</svg>\n");
    Ok(svg)
}
