// qr.rs
// QR rendering of provisioning URIs, as PNG bytes or as a terminal block.

use image::{ImageFormat, Luma};
use qrcode::QrCode;
use qrcode::render::unicode;
use std::io::Cursor;

use crate::error::{Result, TotpError};

/// PNG of the QR code, at least `min_size` pixels per side.
pub fn render_png(uri: &str, min_size: u32) -> Result<Vec<u8>> {
    let code = QrCode::new(uri.as_bytes()).map_err(|e| TotpError::Qr(e.to_string()))?;
    let img = code
        .render::<Luma<u8>>()
        .min_dimensions(min_size, min_size)
        .build();

    // image 0.25: write_to requires Write + Seek -> Cursor<Vec<u8>>
    let mut cursor = Cursor::new(Vec::<u8>::new());
    image::DynamicImage::ImageLuma8(img)
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| TotpError::Qr(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// Unicode half-block rendering for scanning straight off a terminal.
pub fn render_terminal(uri: &str) -> Result<String> {
    let code = QrCode::new(uri.as_bytes()).map_err(|e| TotpError::Qr(e.to_string()))?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .build())
}
