//! Image frames delivered by the input stream.

use crate::error::{DecalError, Result};

/// Pixel encoding of a raw image buffer.
///
/// These match the raw sensor-image encodings the display consumes; decoding
/// compressed streams is out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelEncoding {
    /// 8-bit RGBA, 4 bytes per pixel.
    Rgba8,
    /// 8-bit RGB, 3 bytes per pixel.
    Rgb8,
    /// 8-bit BGRA, 4 bytes per pixel.
    Bgra8,
    /// 8-bit BGR, 3 bytes per pixel.
    Bgr8,
    /// 8-bit grayscale, 1 byte per pixel.
    Mono8,
}

impl PixelEncoding {
    /// Bytes per pixel for this encoding.
    #[must_use]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8 | Self::Bgra8 => 4,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Mono8 => 1,
        }
    }
}

/// One image received from the input stream.
///
/// Frames are immutable once constructed; the delivery path publishes them as
/// `Arc<ImageFrame>` handles so the render tick never observes a partially
/// written buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFrame {
    width: u32,
    height: u32,
    encoding: PixelEncoding,
    data: Vec<u8>,
    seq: u64,
}

impl ImageFrame {
    /// Creates a frame, validating the buffer length against the dimensions.
    pub fn new(
        width: u32,
        height: u32,
        encoding: PixelEncoding,
        data: Vec<u8>,
        seq: u64,
    ) -> Result<Self> {
        let expected = width as usize * height as usize * encoding.bytes_per_pixel();
        if data.len() != expected {
            return Err(DecalError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            encoding,
            data,
            seq,
        })
    }

    /// Returns the image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the pixel encoding.
    #[must_use]
    pub fn encoding(&self) -> PixelEncoding {
        self.encoding
    }

    /// Returns the raw pixel buffer.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the delivery sequence number.
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Returns whether the frame has zero spatial extent.
    ///
    /// Zero-sized frames leave the owning quad's projector uninitialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height, used to shape the decal frustum.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Converts the buffer to tightly packed RGBA8.
    ///
    /// This is encoding normalization, not decoding; each pixel is remapped
    /// channel-wise. Alpha-less encodings become fully opaque.
    #[must_use]
    pub fn to_rgba8(&self) -> Vec<u8> {
        let pixels = self.width as usize * self.height as usize;
        let mut out = Vec::with_capacity(pixels * 4);
        match self.encoding {
            PixelEncoding::Rgba8 => out.extend_from_slice(&self.data),
            PixelEncoding::Bgra8 => {
                for px in self.data.chunks_exact(4) {
                    out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
                }
            }
            PixelEncoding::Rgb8 => {
                for px in self.data.chunks_exact(3) {
                    out.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
            }
            PixelEncoding::Bgr8 => {
                for px in self.data.chunks_exact(3) {
                    out.extend_from_slice(&[px[2], px[1], px[0], 255]);
                }
            }
            PixelEncoding::Mono8 => {
                for &v in &self.data {
                    out.extend_from_slice(&[v, v, v, 255]);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_validation() {
        let err = ImageFrame::new(2, 2, PixelEncoding::Rgb8, vec![0u8; 5], 0);
        assert!(matches!(
            err,
            Err(DecalError::SizeMismatch {
                expected: 12,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_aspect_ratio() {
        let frame =
            ImageFrame::new(640, 480, PixelEncoding::Mono8, vec![0u8; 640 * 480], 0).unwrap();
        assert!((frame.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_zero_sized_frame() {
        let frame = ImageFrame::new(0, 0, PixelEncoding::Rgba8, Vec::new(), 0).unwrap();
        assert!(frame.is_empty());
        assert_eq!(frame.aspect_ratio(), 1.0);
    }

    #[test]
    fn test_bgr_normalization() {
        let frame = ImageFrame::new(1, 1, PixelEncoding::Bgr8, vec![10, 20, 30], 0).unwrap();
        assert_eq!(frame.to_rgba8(), vec![30, 20, 10, 255]);
    }

    #[test]
    fn test_mono_normalization() {
        let frame = ImageFrame::new(2, 1, PixelEncoding::Mono8, vec![7, 9], 0).unwrap();
        assert_eq!(frame.to_rgba8(), vec![7, 7, 7, 255, 9, 9, 9, 255]);
    }
}
