//! Identifier label rendering

use super::Canvas;
use crate::error::{Error, Result};
use image::Rgba;
use rusttype::{Font, Scale, point};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Label font and color settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Draw the identifier on the card
    pub enabled: bool,
    /// TrueType/OpenType font file
    pub font: PathBuf,
    /// Font size in pixels
    pub size: f32,
    /// Fill color as RGBA
    pub color: [u8; 4],
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            font: PathBuf::from("input/fonts/Open_Sans/OpenSans-Semibold.ttf"),
            size: 24.0,
            color: [0, 0, 0, 255],
        }
    }
}

/// A loaded font ready to draw identifier labels
pub struct Label {
    font: Font<'static>,
    scale: Scale,
    color: Rgba<u16>,
}

impl Label {
    /// Read and parse the configured font.
    pub fn load(options: &TextOptions) -> Result<Self> {
        let bytes = fs::read(&options.font).map_err(|e| Error::ResourceLoad {
            path: options.font.clone(),
            reason: e.to_string(),
        })?;
        let font = Font::try_from_vec(bytes).ok_or_else(|| Error::ResourceLoad {
            path: options.font.clone(),
            reason: "not a TrueType/OpenType font".to_string(),
        })?;

        tracing::debug!(font = %options.font.display(), size = options.size, "Loaded label font");

        Ok(Self {
            font,
            scale: Scale::uniform(options.size),
            color: Rgba(options.color.map(|c| u16::from(c) * 257)),
        })
    }

    /// Draw `text` with its top-left corner at (`x`, `y`).
    ///
    /// Glyph coverage is alpha-blended over the canvas; pixels outside the
    /// canvas are skipped.
    pub fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str) {
        let ascent = self.font.v_metrics(self.scale).ascent;
        let origin = point(x as f32, y as f32 + ascent);
        let [r, g, b, a] = self.color.0;
        let opacity = f32::from(a) / f32::from(u16::MAX);

        for glyph in self.font.layout(text, self.scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 || px as u32 >= canvas.width() || py as u32 >= canvas.height()
                {
                    return;
                }
                let sa = coverage * opacity;
                if sa <= 0.0 {
                    return;
                }
                let inv = 1.0 - sa;
                let dst = canvas.get_pixel_mut(px as u32, py as u32);
                dst.0[0] = (f32::from(r) * sa + f32::from(dst.0[0]) * inv).round() as u16;
                dst.0[1] = (f32::from(g) * sa + f32::from(dst.0[1]) * inv).round() as u16;
                dst.0[2] = (f32::from(b) * sa + f32::from(dst.0[2]) * inv).round() as u16;
                dst.0[3] = dst.0[3].max((sa * f32::from(u16::MAX)).round() as u16);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_is_resource_error() {
        let options = TextOptions {
            font: PathBuf::from("/definitely/not/here.ttf"),
            ..TextOptions::default()
        };
        assert!(matches!(
            Label::load(&options),
            Err(Error::ResourceLoad { .. })
        ));
    }

    #[test]
    fn test_garbage_font_is_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"this is not a font").unwrap();

        let options = TextOptions {
            font: path,
            ..TextOptions::default()
        };
        assert!(matches!(
            Label::load(&options),
            Err(Error::ResourceLoad { .. })
        ));
    }

    #[test]
    fn test_draw_darkens_text_area() {
        let Some(font) = crate::card::tests::system_font() else {
            eprintln!("no system font installed; skipping");
            return;
        };
        let label = Label::load(&TextOptions {
            font,
            ..TextOptions::default()
        })
        .unwrap();

        let mut canvas = Canvas::from_pixel(400, 80, Rgba([u16::MAX; 4]));
        label.draw(&mut canvas, 10, 20, "3fa85f64-5717");

        let dark = canvas.pixels().filter(|p| p.0[0] < u16::MAX / 2).count();
        assert!(dark > 0);
        // Nothing drawn above the requested top edge.
        assert!((0..400).all(|x| canvas.get_pixel(x, 0).0[0] == u16::MAX));
    }

    #[test]
    fn test_draw_clips_outside_canvas() {
        let Some(font) = crate::card::tests::system_font() else {
            eprintln!("no system font installed; skipping");
            return;
        };
        let label = Label::load(&TextOptions {
            font,
            ..TextOptions::default()
        })
        .unwrap();

        let mut canvas = Canvas::from_pixel(20, 20, Rgba([u16::MAX; 4]));
        label.draw(&mut canvas, -500, 810, "out of bounds");
        assert!(canvas.pixels().all(|p| p.0 == [u16::MAX; 4]));
    }
}
