pub mod key;
pub mod params;

pub use key::validate_key;
pub use params::{parse_quality, parse_width};
