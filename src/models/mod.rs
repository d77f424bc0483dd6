pub mod collection;
pub mod palette;
pub mod wheel;

pub use collection::WheelCollection;
pub use palette::{assign_colors, PALETTE};
pub use wheel::{Label, SpinRecord, Wheel, WheelInput, MAX_LABELS};
