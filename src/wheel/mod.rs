pub mod layout;
pub mod resolver;
pub mod spin;
pub mod svg;

pub use layout::{layout, marker_path, point_on_circle, Slice};
pub use resolver::{resolve, tilt};
pub use spin::{random_offset, revolution_bias, SpinPlan, SpinState};
pub use svg::render_svg;
