pub mod decode;
pub mod dimensions;
pub mod encode;
pub mod orientation;
pub mod params;
pub mod pipeline;
pub mod resize;

pub use decode::decode_image;
pub use dimensions::calculate_fit_dimensions;
pub use encode::encode_jpeg;
pub use orientation::{apply_orientation, read_orientation, Orientation};
pub use params::ResizeParams;
pub use pipeline::{process_image, ProcessedImage};
pub use resize::resize_image;
