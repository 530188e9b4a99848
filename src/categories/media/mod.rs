//! Media blocks: single images, galleries and embedded maps

pub mod gallery;
pub mod image;
pub mod map;

pub use gallery::{GalleryImage, GalleryProps};
pub use image::ImageProps;
pub use map::MapProps;
