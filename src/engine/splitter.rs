//! Grid splitting of frames

use image::{imageops, GrayImage};

use crate::domain::errors::DomainError;

/// Split `image` into `block x block` equal sub-images, row-major.
///
/// The image is cut into `block` horizontal strips, each strip into
/// `block` pieces. Remainder pixels on the right and bottom edges are
/// left out so every piece has the same shape.
pub fn split_blocks(image: &GrayImage, block: u32) -> Result<Vec<GrayImage>, DomainError> {
    let (width, height) = image.dimensions();
    if block == 0 || block > width || block > height {
        return Err(DomainError::BadArgs(format!(
            "cannot split a {}x{} frame into {}x{} blocks",
            width, height, block, block
        )));
    }

    let piece_w = width / block;
    let piece_h = height / block;
    let mut pieces = Vec::with_capacity((block * block) as usize);
    for row in 0..block {
        for col in 0..block {
            pieces.push(imageops::crop_imm(image, col * piece_w, row * piece_h, piece_w, piece_h).to_image());
        }
    }
    Ok(pieces)
}
