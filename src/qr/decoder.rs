//! QR code decoder using rqrr

use crate::error::{Error, Result};
use crate::ids::Identifier;
use image::{DynamicImage, GrayImage, Luma, imageops};

/// Light margin added around images before detection, in pixels.
///
/// Rasters rendered without a border have no quiet zone of their own.
const QUIET_ZONE_PX: u32 = 64;

/// QR code decoder
pub struct QrDecoder {
    quiet_zone: u32,
}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {
            quiet_zone: QUIET_ZONE_PX,
        }
    }

    /// Decode the first QR code found in an image
    pub fn decode(&self, img: &DynamicImage) -> Result<String> {
        self.decode_gray(&img.to_luma8())
    }

    /// Decode the first QR code found in a grayscale image
    pub fn decode_gray(&self, img: &GrayImage) -> Result<String> {
        let mut padded = GrayImage::from_pixel(
            img.width() + 2 * self.quiet_zone,
            img.height() + 2 * self.quiet_zone,
            Luma([255]),
        );
        imageops::replace(
            &mut padded,
            img,
            i64::from(self.quiet_zone),
            i64::from(self.quiet_zone),
        );

        let mut prepared = rqrr::PreparedImage::prepare(padded);
        let grids = prepared.detect_grids();

        let grid = grids.first().ok_or(Error::NoQrCodeFound)?;

        match grid.decode() {
            Ok((meta, content)) => {
                tracing::debug!(
                    "Decoded QR: version={:?}, ecc_level={:?}, length={}",
                    meta.version,
                    meta.ecc_level,
                    content.len()
                );
                Ok(content)
            }
            Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
        }
    }

    /// Recover the card identifier embedded in an image
    pub fn decode_identifier(&self, img: &DynamicImage) -> Result<Identifier> {
        let text = self.decode(img)?;
        text.parse()
            .map_err(|_| Error::QrDecode(format!("QR content is not an identifier: {text}")))
    }
}

impl Default for QrDecoder {
    fn default() -> Self {
        Self::new()
    }
}
