//! QR code encoder

use crate::error::{Error, Result};
use crate::qr::QrOptions;
use image::{GrayImage, Luma, imageops};
use qrcode::QrCode;
use qrcode::types::QrError;

/// QR code encoder
///
/// The symbol version is the smallest one holding the payload at the
/// configured EC level, so output dimensions depend on the payload.
pub struct QrEncoder {
    options: QrOptions,
}

impl QrEncoder {
    /// Create a new QR encoder with the given rendering options
    pub fn new(options: QrOptions) -> Self {
        Self { options }
    }

    /// Rendering options in use
    pub fn options(&self) -> &QrOptions {
        &self.options
    }

    /// Encode a text payload into a monochrome QR raster
    pub fn encode(&self, data: &str) -> Result<GrayImage> {
        let level = self.options.ec_level;
        let code = QrCode::with_error_correction_level(data.as_bytes(), level.to_qrcode())
            .map_err(|e| match e {
                QrError::DataTooLong => Error::PayloadTooLarge {
                    len: data.len(),
                    level: level.to_string(),
                },
                other => Error::QrEncode(format!("Failed to create QR code: {other}")),
            })?;

        let module = self.options.module_size.max(1);
        let margin = self.options.border.checked_mul(module);
        let side = (code.width() as u32)
            .checked_mul(module)
            .zip(margin)
            .and_then(|(symbol, margin)| symbol.checked_add(margin.checked_mul(2)?));
        let (Some(margin), Some(_)) = (margin, side) else {
            return Err(Error::Config(format!(
                "QR raster of {} modules at {module} px with a {}-module border exceeds u32 pixels",
                code.width(),
                self.options.border
            )));
        };

        let symbol = code
            .render::<Luma<u8>>()
            .quiet_zone(false)
            .module_dimensions(module, module)
            .build();

        if margin == 0 {
            return Ok(symbol);
        }

        let mut framed = GrayImage::from_pixel(
            symbol.width() + 2 * margin,
            symbol.height() + 2 * margin,
            Luma([255]),
        );
        imageops::replace(&mut framed, &symbol, i64::from(margin), i64::from(margin));
        Ok(framed)
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new(QrOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::{EcLevel, QrDecoder};

    const SAMPLE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[test]
    fn test_dimensions_follow_module_size() {
        let encoder = QrEncoder::default();
        let qr = encoder.encode(SAMPLE_ID).unwrap();
        let modules = QrCode::with_error_correction_level(SAMPLE_ID, qrcode::EcLevel::Q)
            .unwrap()
            .width() as u32;

        assert_eq!(qr.width(), qr.height());
        assert_eq!(qr.width(), modules * 8);
    }

    #[test]
    fn test_zero_border_starts_with_finder_pattern() {
        let qr = QrEncoder::default().encode(SAMPLE_ID).unwrap();
        // Top-left finder pattern is dark right at the edge without a border.
        assert_eq!(qr.get_pixel(0, 0), &Luma([0]));
        assert_eq!(qr.get_pixel(7, 7), &Luma([0]));
    }

    #[test]
    fn test_border_adds_light_margin() {
        let plain = QrEncoder::default().encode(SAMPLE_ID).unwrap();
        let bordered = QrEncoder::new(QrOptions {
            border: 2,
            ..QrOptions::default()
        })
        .encode(SAMPLE_ID)
        .unwrap();

        assert_eq!(bordered.width(), plain.width() + 2 * 2 * 8);
        assert_eq!(bordered.get_pixel(0, 0), &Luma([255]));
        assert_eq!(bordered.get_pixel(16, 16), &Luma([0]));
    }

    #[test]
    fn test_larger_payload_grows_symbol() {
        let encoder = QrEncoder::default();
        let short = encoder.encode("a").unwrap();
        let long = encoder.encode(&SAMPLE_ID.repeat(4)).unwrap();
        assert!(long.width() > short.width());
    }

    #[test]
    fn test_oversized_payload_is_rejected() {
        let encoder = QrEncoder::default();
        let payload = "x".repeat(4000);
        let err = encoder.encode(&payload).unwrap_err();
        assert!(matches!(err, Error::PayloadTooLarge { len: 4000, .. }));
    }

    #[test]
    fn test_oversized_dimensions_are_config_errors() {
        let huge_module = QrEncoder::new(QrOptions {
            module_size: u32::MAX,
            ..QrOptions::default()
        });
        assert!(matches!(huge_module.encode(SAMPLE_ID), Err(Error::Config(_))));

        let huge_border = QrEncoder::new(QrOptions {
            border: u32::MAX,
            ..QrOptions::default()
        });
        assert!(matches!(huge_border.encode(SAMPLE_ID), Err(Error::Config(_))));

        let wide_border = QrEncoder::new(QrOptions {
            border: u32::MAX / 16,
            ..QrOptions::default()
        });
        assert!(matches!(wide_border.encode(SAMPLE_ID), Err(Error::Config(_))));
    }

    #[test]
    fn test_round_trip() {
        let decoder = QrDecoder::new();
        for level in [EcLevel::L, EcLevel::Q, EcLevel::H] {
            let encoder = QrEncoder::new(QrOptions {
                ec_level: level,
                ..QrOptions::default()
            });
            for payload in [SAMPLE_ID, "hello card", "https://example.com/c?id=42"] {
                let qr = encoder.encode(payload).unwrap();
                assert_eq!(decoder.decode_gray(&qr).unwrap(), payload);
            }
        }
    }
}
