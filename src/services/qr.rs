use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{
    DynamicImage, ImageFormat, Luma,
    imageops::{self, FilterType},
};
use qrcode::{EcLevel, QrCode};
use thiserror::Error;

pub const QR_IMAGE_WIDTH: u32 = 300;
const DATA_URL_PREFIX: &str = "data:image/png;base64,";

#[derive(Error, Debug)]
pub enum QrError {
    #[error("QR payload is empty")]
    EmptyPayload,
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("QR image rendering failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Renders `payload` as a square PNG QR code, `QR_IMAGE_WIDTH` pixels wide,
/// using the highest error-correction level.
pub fn encode_png(payload: &str) -> Result<Vec<u8>, QrError> {
    if payload.is_empty() {
        return Err(QrError::EmptyPayload);
    }

    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)?;
    let rendered = code.render::<Luma<u8>>().quiet_zone(true).build();
    // Nearest keeps module edges hard so scanners see two colours only.
    let scaled = imageops::resize(&rendered, QR_IMAGE_WIDTH, QR_IMAGE_WIDTH, FilterType::Nearest);

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(scaled).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(png)
}

pub fn encode_data_url(payload: &str) -> Result<String, QrError> {
    let png = encode_png(payload)?;
    Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(png)))
}
