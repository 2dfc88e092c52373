// Button face rendering and value formatting

pub mod formatters;
pub mod svg;

pub use formatters::{format_fixed, format_rate_mb, percent_of};
pub use svg::{font_size_for, render_reading, render_svg, to_data_url};
