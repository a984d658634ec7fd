use image::{DynamicImage, Rgba, RgbaImage};
use std::path::Path;
use tempfile::TempDir;

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// Write a real decodable image; format follows the path extension.
pub fn write_image(path: &Path, width: u32, height: u32) {
    DynamicImage::new_rgb8(width, height).save(path).unwrap();
}

/// Write a real image filled with a single color.
pub fn write_colored_image(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    let [r, g, b] = rgb;
    let img = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));
    DynamicImage::ImageRgba8(img).save(path).unwrap();
}
