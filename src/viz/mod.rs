//! Pure mapping from a record's magnitude to its render attributes:
//! radius, color and share of a reference total.

pub mod bucket;
pub mod color;
pub mod gradient;
pub mod radius;
pub mod share;

pub use bucket::{classify, Bucket, ClassificationTable, LegendEntry};
pub use color::Rgb;
pub use gradient::{gradient_color, ramp};
pub use radius::{scale_radius, RadiusConfig, ScaleMode};
pub use share::{format_share, share_of_total, ShareConfig, ShareReference};
