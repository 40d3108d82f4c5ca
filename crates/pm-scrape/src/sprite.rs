//! Turning arbitrary photos into small square card sprites.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

/// Side length of the low-resolution pass, as a divisor of the sprite size.
const PIXELATE: u32 = 4;

/// Center-crop to a square, then pixelate to a `size`×`size` sprite.
pub fn to_sprite(img: &DynamicImage, size: u32) -> RgbaImage {
    let size = size.max(1);
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let side = w.min(h).max(1);
    let square = imageops::crop_imm(&rgba, (w - side.min(w)) / 2, (h - side.min(h)) / 2, side, side)
        .to_image();

    let low = (size / PIXELATE).max(1);
    let small = imageops::resize(&square, low, low, FilterType::Triangle);
    imageops::resize(&small, size, size, FilterType::Nearest)
}
