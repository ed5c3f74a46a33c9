pub mod multipart;
pub mod resolve;

pub use multipart::extract_image_part;
pub use resolve::{resolve_payload, ExtractedImage, PayloadOrigin};
