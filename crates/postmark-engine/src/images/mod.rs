//! CPU-side decoded images, uploaded to the GPU lazily by the image renderer.

mod store;

pub use store::{ImageData, ImageError, ImageId, ImageStore};
