//! Encode one identifier and save the bare QR raster next to a card built on a plain template
//!
//! Usage: cargo run --example generate_qr

use cardgen::{CardCompositor, Identifier, Placement, QrDecoder, QrEncoder, Template};
use image::{DynamicImage, Rgb, RgbImage};

fn main() -> cardgen::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let encoder = QrEncoder::default();
    let identifier = Identifier::new_random();

    let qr_image = encoder.encode(&identifier.to_string())?;
    qr_image.save("qr_output.png")?;
    println!("✓ QR code for {identifier} saved to qr_output.png");

    // Plain 1000x1200 template stands in for the printed background
    let template = Template::from_image(DynamicImage::ImageRgb8(RgbImage::from_pixel(
        1000,
        1200,
        Rgb([255, 255, 255]),
    )));
    let compositor = CardCompositor::new(template, Placement::default(), None);
    let card = compositor.compose(&qr_image, &identifier);
    card.to_dynamic().save("card_output.png")?;

    let decoded = QrDecoder::new().decode_identifier(&card.to_dynamic())?;
    println!("✓ Card saved to card_output.png, decodes back to {decoded}");

    Ok(())
}
