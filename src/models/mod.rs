pub mod image;
pub mod search;

pub use image::ImageResult;
pub use search::SearchRecord;
