//! Image preprocessing into the model's input tensor contract.

use crate::constants::CHANNELS;
use crate::error::{Error, Result};
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use ndarray::Array4;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

static LIVE_TENSORS: AtomicUsize = AtomicUsize::new(0);

/// Number of currently live input tensors.
///
/// Introspection hook for verifying that classification calls release their
/// intermediates on every exit path.
pub fn live_tensor_count() -> usize {
    LIVE_TENSORS.load(Ordering::SeqCst)
}

/// Image surface handed to the classifier by UI code.
#[derive(Debug)]
pub enum ImageSource {
    /// Decoded bitmap.
    Bitmap(DynamicImage),
    /// Raw RGBA video frame.
    Frame {
        /// Frame width in pixels.
        width: u32,
        /// Frame height in pixels.
        height: u32,
        /// RGBA pixel data, `width * height * 4` bytes.
        pixels: Vec<u8>,
    },
}

/// Model input tensor: shape `[1, size, size, 3]`, `f32` values in `[0, 1]`.
///
/// Created fresh per classification call and exclusively owned by it; the
/// backing buffer is released on drop.
#[derive(Debug)]
pub struct InputTensor {
    data: Array4<f32>,
}

impl InputTensor {
    fn new(data: Array4<f32>) -> Self {
        LIVE_TENSORS.fetch_add(1, Ordering::SeqCst);
        Self { data }
    }

    /// Borrow the underlying array.
    pub fn array(&self) -> &Array4<f32> {
        &self.data
    }

    /// Tensor shape as `[batch, height, width, channels]`.
    pub fn shape(&self) -> [usize; 4] {
        let s = self.data.shape();
        [s[0], s[1], s[2], s[3]]
    }
}

impl Drop for InputTensor {
    fn drop(&mut self) {
        LIVE_TENSORS.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Decode encoded image bytes into a bitmap.
pub fn decode_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| Error::ImageDecode { source: e })
}

/// Convert an image source into the model input tensor.
///
/// Plain aspect-ratio-ignoring resize to a `target_size` square, alpha
/// channel dropped, channel order R,G,B, each byte divided by 255 into
/// `[0, 1]`. No letterboxing, cropping or mean/std normalization: the resize
/// policy must match the input statistics the network was trained on.
///
/// `target_size` is part of the model configuration, never a free parameter
/// chosen per call.
pub fn to_input_tensor(source: ImageSource, target_size: u32) -> Result<InputTensor> {
    let bitmap = match source {
        ImageSource::Bitmap(bitmap) => bitmap,
        ImageSource::Frame {
            width,
            height,
            pixels,
        } => {
            let expected = width as usize * height as usize * 4;
            let actual = pixels.len();
            if actual != expected {
                return Err(Error::InvalidFrame {
                    width,
                    height,
                    expected,
                    actual,
                });
            }
            let frame = RgbaImage::from_raw(width, height, pixels).ok_or(Error::InvalidFrame {
                width,
                height,
                expected,
                actual,
            })?;
            DynamicImage::ImageRgba8(frame)
        }
    };

    let size = target_size as usize;
    let resized = bitmap
        .resize_exact(target_size, target_size, FilterType::Triangle)
        .into_rgba8();

    let mut data = Array4::<f32>::zeros((1, size, size, CHANNELS));
    for (x, y, pixel) in resized.enumerate_pixels() {
        let [r, g, b, _] = pixel.0;
        data[[0, y as usize, x as usize, 0]] = f32::from(r) / 255.0;
        data[[0, y as usize, x as usize, 1]] = f32::from(g) / 255.0;
        data[[0, y as usize, x as usize, 2]] = f32::from(b) / 255.0;
    }

    debug!("Preprocessed input tensor: [1, {size}, {size}, {CHANNELS}]");
    Ok(InputTensor::new(data))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::Rgba;
    use serial_test::serial;

    fn test_bitmap(width: u32, height: u32) -> DynamicImage {
        let mut img = RgbaImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgba([
                u8::try_from(x % 256).unwrap(),
                u8::try_from(y % 256).unwrap(),
                128,
                255,
            ]);
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    #[serial]
    fn test_tensor_shape_and_value_range() {
        let tensor = to_input_tensor(ImageSource::Bitmap(test_bitmap(800, 600)), 64).unwrap();
        assert_eq!(tensor.shape(), [1, 64, 64, 3]);
        for &value in tensor.array() {
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    #[serial]
    fn test_non_square_input_is_stretched() {
        // Plain resize ignores aspect ratio; a 100x10 image still fills the
        // whole square.
        let tensor = to_input_tensor(ImageSource::Bitmap(test_bitmap(100, 10)), 32).unwrap();
        assert_eq!(tensor.shape(), [1, 32, 32, 3]);
    }

    #[test]
    #[serial]
    fn test_alpha_channel_is_dropped() {
        let mut img = RgbaImage::new(4, 4);
        for pixel in img.pixels_mut() {
            *pixel = Rgba([255, 0, 0, 0]); // fully transparent red
        }
        let tensor =
            to_input_tensor(ImageSource::Bitmap(DynamicImage::ImageRgba8(img)), 4).unwrap();

        // Red channel survives regardless of alpha.
        assert!((tensor.array()[[0, 0, 0, 0]] - 1.0).abs() < 1e-6);
        assert!(tensor.array()[[0, 0, 0, 1]].abs() < 1e-6);
    }

    #[test]
    #[serial]
    fn test_raw_frame_source() {
        let pixels = vec![255u8; 8 * 8 * 4];
        let tensor = to_input_tensor(
            ImageSource::Frame {
                width: 8,
                height: 8,
                pixels,
            },
            16,
        )
        .unwrap();
        assert_eq!(tensor.shape(), [1, 16, 16, 3]);
    }

    #[test]
    #[serial]
    fn test_invalid_frame_buffer() {
        let result = to_input_tensor(
            ImageSource::Frame {
                width: 8,
                height: 8,
                pixels: vec![0u8; 10],
            },
            16,
        );
        assert!(matches!(result, Err(Error::InvalidFrame { .. })));
    }

    #[test]
    #[serial]
    fn test_live_tensor_count_tracks_drops() {
        let before = live_tensor_count();
        let tensor = to_input_tensor(ImageSource::Bitmap(test_bitmap(10, 10)), 8).unwrap();
        assert_eq!(live_tensor_count(), before + 1);
        drop(tensor);
        assert_eq!(live_tensor_count(), before);
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_bytes(b"definitely not an image");
        assert!(matches!(result, Err(Error::ImageDecode { .. })));
    }
}
