//! Card composition
//!
//! A card is a private copy of the background template with the QR raster
//! pasted relative to the template center and, optionally, the identifier
//! written as a label.

mod text;

pub use text::{Label, TextOptions};

use crate::error::{Error, Result};
use crate::ids::Identifier;
use image::{ColorType, DynamicImage, GrayImage, ImageBuffer, Rgba, imageops};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pixel offsets of the card overlays
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    /// Horizontal shift of the QR code from the centered position
    pub qr_offset_x: i32,
    /// Vertical shift of the QR code from the centered position
    pub qr_offset_y: i32,
    /// Label left edge relative to the template's horizontal center
    pub text_offset_x: i32,
    /// Label top edge, absolute
    pub text_y: i32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            qr_offset_x: 0,
            qr_offset_y: 107,
            text_offset_x: -240,
            text_y: 810,
        }
    }
}

/// Working pixels of a card: 16-bit RGBA, wide enough for every 8- and 16-bit template.
pub type Canvas = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Background template shared by every card of a run
#[derive(Debug, Clone)]
pub struct Template {
    image: Canvas,
    color: ColorType,
}

impl Template {
    /// Open the background image.
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path).map_err(|e| Error::ResourceLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            color = ?image.color(),
            "Loaded background template"
        );
        Ok(Self::from_image(image))
    }

    /// Wrap an already decoded image.
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            color: image.color(),
            image: image.to_rgba16(),
        }
    }

    /// Template pixels
    pub fn image(&self) -> &Canvas {
        &self.image
    }

    /// Color model of the source image
    pub fn color(&self) -> ColorType {
        self.color
    }

    /// Center point, integer-divided
    pub fn center(&self) -> (i64, i64) {
        (
            i64::from(self.image.width() / 2),
            i64::from(self.image.height() / 2),
        )
    }
}

/// A composited card bound to its identifier
#[derive(Debug, Clone)]
pub struct CardImage {
    identifier: Identifier,
    image: Canvas,
    color: ColorType,
}

impl CardImage {
    /// Identifier encoded on this card
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Composited pixels
    pub fn image(&self) -> &Canvas {
        &self.image
    }

    /// Image in the template's color model and bit depth
    pub fn to_dynamic(&self) -> DynamicImage {
        let rgba = DynamicImage::ImageRgba16(self.image.clone());
        match self.color {
            ColorType::L8 => DynamicImage::ImageLuma8(rgba.to_luma8()),
            ColorType::La8 => DynamicImage::ImageLumaA8(rgba.to_luma_alpha8()),
            ColorType::Rgb8 => DynamicImage::ImageRgb8(rgba.to_rgb8()),
            ColorType::Rgba8 => DynamicImage::ImageRgba8(rgba.to_rgba8()),
            ColorType::L16 => DynamicImage::ImageLuma16(rgba.to_luma16()),
            ColorType::La16 => DynamicImage::ImageLumaA16(rgba.to_luma_alpha16()),
            ColorType::Rgb16 => DynamicImage::ImageRgb16(rgba.to_rgb16()),
            ColorType::Rgb32F => DynamicImage::ImageRgb32F(rgba.to_rgb32f()),
            ColorType::Rgba32F => DynamicImage::ImageRgba32F(rgba.to_rgba32f()),
            _ => rgba,
        }
    }
}

/// Pastes QR rasters and labels onto copies of a template
pub struct CardCompositor {
    template: Template,
    placement: Placement,
    label: Option<Label>,
}

impl CardCompositor {
    /// Build a compositor; `label` is `None` when cards carry no text.
    pub fn new(template: Template, placement: Placement, label: Option<Label>) -> Self {
        Self {
            template,
            placement,
            label,
        }
    }

    /// Background template
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Top-left corner where a QR raster of the given size is pasted.
    pub fn qr_origin(&self, qr_width: u32, qr_height: u32) -> (i64, i64) {
        let (cx, cy) = self.template.center();
        (
            cx - i64::from(qr_width / 2) + i64::from(self.placement.qr_offset_x),
            cy - i64::from(qr_height / 2) + i64::from(self.placement.qr_offset_y),
        )
    }

    /// Top-left corner of the identifier label.
    pub fn text_origin(&self) -> (i32, i32) {
        let (cx, _) = self.template.center();
        (
            cx as i32 + self.placement.text_offset_x,
            self.placement.text_y,
        )
    }

    /// Compose one card. Neither the template nor `qr` is modified.
    pub fn compose(&self, qr: &GrayImage, identifier: &Identifier) -> CardImage {
        let mut canvas = self.template.image.clone();

        let qr_rgba = DynamicImage::ImageLuma8(qr.clone()).to_rgba16();
        let (x, y) = self.qr_origin(qr.width(), qr.height());
        imageops::replace(&mut canvas, &qr_rgba, x, y);

        if let Some(label) = &self.label {
            let (tx, ty) = self.text_origin();
            label.draw(&mut canvas, tx, ty, &identifier.to_string());
        }

        CardImage {
            identifier: *identifier,
            image: canvas,
            color: self.template.color,
        }
    }
}
