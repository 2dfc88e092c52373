//! Button face rendering.
//!
//! Builds the SVG markup for a reading and encodes it as a self-contained
//! `data:` URL accepted by the host's `setImage`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::core::system_monitor::Reading;

/// Side of the square button canvas in pixels
pub const CANVAS_SIZE: u32 = 144;

const FONT_FAMILY: &str = "Arial, sans-serif";
const TEXT_COLOR: &str = "#FFFFFF";
const UNIT_FONT_SIZE: u32 = 14;

/// Font size for the large line, shrinking as the drawn text gets longer.
pub fn font_size_for(text: &str) -> u32 {
    match text.chars().count() {
        0..=3 => 48,
        4 => 40,
        5 => 36,
        _ => 32,
    }
}

/// Build the raw SVG markup for a value and unit.
///
/// Network rates put the unit on its own line above the value; everything
/// else draws `value + unit` as one centered string.
pub fn render_svg(value: &str, unit: &str) -> String {
    let center = CANVAS_SIZE / 2;

    if is_network_unit(unit) {
        let font_size = font_size_for(value);
        format!(
            r#"<svg width="{size}" height="{size}" xmlns="http://www.w3.org/2000/svg"><text x="{center}" y="35" text-anchor="middle" font-family="{family}" font-size="{unit_size}" font-weight="bold" fill="{color}">{unit}</text><text x="{center}" y="90" text-anchor="middle" font-family="{family}" font-size="{font_size}" font-weight="bold" fill="{color}">{value}</text></svg>"#,
            size = CANVAS_SIZE,
            family = FONT_FAMILY,
            unit_size = UNIT_FONT_SIZE,
            color = TEXT_COLOR,
            unit = escape_xml(unit),
            value = escape_xml(value),
        )
    } else {
        let text = format!("{}{}", value, unit);
        let font_size = font_size_for(&text);
        format!(
            r#"<svg width="{size}" height="{size}" xmlns="http://www.w3.org/2000/svg"><text x="{center}" y="85" text-anchor="middle" font-family="{family}" font-size="{font_size}" font-weight="bold" fill="{color}">{text}</text></svg>"#,
            size = CANVAS_SIZE,
            family = FONT_FAMILY,
            color = TEXT_COLOR,
            text = escape_xml(&text),
        )
    }
}

/// Encode SVG markup as a base64 `data:` URL.
pub fn to_data_url(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

/// Render a reading straight to the image string pushed to the host.
pub fn render_reading(reading: &Reading) -> String {
    to_data_url(&render_svg(&reading.value, &reading.unit))
}

fn is_network_unit(unit: &str) -> bool {
    unit == "MB/s"
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
