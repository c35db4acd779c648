//! # QR Encoding
//!
//! Renders a Lightning invoice as a base64 PNG QR code.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops, DynamicImage, GrayImage, ImageFormat, Luma};
use pay_core::{PaymentError, PaymentResult};
use qrcode::QrCode;
use std::io::Cursor;

/// Pixel size of one QR module
const MODULE_PIXELS: u32 = 10;

/// Light border around the code, in modules
const BORDER_MODULES: u32 = 2;

/// Encode `data` as a PNG QR code, returned as standard base64
pub fn qr_png_base64(data: &str) -> PaymentResult<String> {
    let code = QrCode::new(data.as_bytes())
        .map_err(|e| PaymentError::Encoding(format!("QR encoding failed: {}", e)))?;

    let modules = code
        .render::<Luma<u8>>()
        .quiet_zone(false)
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .dark_color(Luma([0u8]))
        .light_color(Luma([255u8]))
        .build();

    let border = BORDER_MODULES * MODULE_PIXELS;
    let mut image = GrayImage::from_pixel(
        modules.width() + 2 * border,
        modules.height() + 2 * border,
        Luma([255u8]),
    );
    imageops::overlay(&mut image, &modules, i64::from(border), i64::from(border));

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| PaymentError::Encoding(format!("PNG encoding failed: {}", e)))?;

    Ok(STANDARD.encode(png))
}
