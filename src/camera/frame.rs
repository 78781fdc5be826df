//! Frame and still-image types for the capture surface.

use crate::error::AppResult;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

/// JPEG quality used for captured stills.
const STILL_JPEG_QUALITY: u8 = 85;

/// A single video frame in RGB8 layout.
///
/// Frames are produced by a [`super::FrameSource`] at its native resolution
/// and shared by `Arc`; they are never mutated after production.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGB8 pixels, `width * height * 3` bytes.
    pub pixels: Vec<u8>,
}

impl Frame {
    /// Create a frame from an RGB8 buffer.
    ///
    /// # Panics
    /// Debug-asserts that the buffer length matches the resolution.
    pub fn from_rgb8(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 3) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an egui image for preview rendering.
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgb(
            [self.width as usize, self.height as usize],
            &self.pixels,
        )
    }
}

/// A captured still: the frame rasterized at native resolution and
/// JPEG-encoded, self-contained and ready for display, storage, or a future
/// upload to a recognition backend.
#[derive(Debug, Clone)]
pub struct EncodedStill {
    width: u32,
    height: u32,
    jpeg: Vec<u8>,
}

impl EncodedStill {
    /// Encode a frame into a JPEG still at the frame's native resolution.
    pub fn from_frame(frame: &Frame) -> AppResult<Self> {
        let mut jpeg = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut jpeg, STILL_JPEG_QUALITY);
        encoder.write_image(
            &frame.pixels,
            frame.width,
            frame.height,
            ExtendedColorType::Rgb8,
        )?;
        Ok(Self {
            width: frame.width,
            height: frame.height,
            jpeg,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw JPEG bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.jpeg
    }

    /// Render as a `data:` URI, the wire-friendly form a recognition backend
    /// would receive.
    pub fn to_data_uri(&self) -> String {
        format!("data:image/jpeg;base64,{}", BASE64.encode(&self.jpeg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take((width * height * 3) as usize)
            .collect();
        Frame::from_rgb8(width, height, pixels)
    }

    #[test]
    fn still_keeps_native_resolution() {
        let frame = solid_frame(64, 48, [200, 120, 40]);
        let still = EncodedStill::from_frame(&frame).expect("encode");
        assert_eq!((still.width(), still.height()), (64, 48));

        let decoded = image::load_from_memory(still.as_bytes()).expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    #[test]
    fn data_uri_has_jpeg_prefix() {
        let frame = solid_frame(8, 8, [0, 0, 0]);
        let still = EncodedStill::from_frame(&frame).expect("encode");
        let uri = still.to_data_uri();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        assert!(uri.len() > "data:image/jpeg;base64,".len());
    }

    #[test]
    fn color_image_matches_resolution() {
        let frame = solid_frame(16, 9, [10, 20, 30]);
        let img = frame.to_color_image();
        assert_eq!(img.size, [16, 9]);
    }
}
