//! QR code rendering for pet scan links

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops, DynamicImage, ImageBuffer, ImageFormat, Luma};
use petfinder_shared::constants::{QR_CONTENT_TYPE, QR_IMAGE_SIZE, QR_MARGIN_MODULES, SCAN_ROUTE_PREFIX};
use petfinder_shared::PetId;
use qrcode::{EcLevel, QrCode};
use tracing::error;

use crate::error::DomainError;

const DARK: Luma<u8> = Luma([0x00]);
const LIGHT: Luma<u8> = Luma([0xFF]);

/// An encoded QR image together with the URL it points at.
#[derive(Debug, Clone, PartialEq)]
pub struct QrImage {
    pub target_url: String,
    pub png: Vec<u8>,
}

impl QrImage {
    pub fn content_type(&self) -> &'static str {
        QR_CONTENT_TYPE
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", QR_CONTENT_TYPE, STANDARD.encode(&self.png))
    }
}

/// Turns pet identifiers into scannable PNGs of `<base>/scan/<petId>`.
///
/// Error correction is always `H`, output is a fixed square with black
/// modules on white and at least one module of margin.
#[derive(Debug, Clone)]
pub struct QrGenerator {
    base_url: String,
}

impl QrGenerator {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn scan_url(&self, pet_id: &PetId) -> String {
        format!("{}{}/{}", self.base_url, SCAN_ROUTE_PREFIX, pet_id)
    }

    pub fn generate(&self, pet_id: &PetId) -> Result<QrImage, DomainError> {
        let target_url = self.scan_url(pet_id);
        let png = render_png(&target_url)?;
        Ok(QrImage { target_url, png })
    }
}

fn render_png(data: &str) -> Result<Vec<u8>, DomainError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::H).map_err(|e| {
        error!("Error generating QR code: {}", e);
        DomainError::Encoding(e.to_string())
    })?;

    let modules = code.width() as u32 + 2 * QR_MARGIN_MODULES;
    if modules > QR_IMAGE_SIZE {
        return Err(DomainError::Encoding(format!(
            "{} modules do not fit in {}px",
            modules, QR_IMAGE_SIZE
        )));
    }
    let module_px = QR_IMAGE_SIZE / modules;

    let symbol = code
        .render::<Luma<u8>>()
        .quiet_zone(false)
        .module_dimensions(module_px, module_px)
        .dark_color(DARK)
        .light_color(LIGHT)
        .build();

    let mut canvas = ImageBuffer::from_pixel(QR_IMAGE_SIZE, QR_IMAGE_SIZE, LIGHT);
    let offset = i64::from((QR_IMAGE_SIZE - symbol.width()) / 2);
    imageops::overlay(&mut canvas, &symbol, offset, offset);

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(canvas)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| {
            error!("Error encoding QR image: {}", e);
            DomainError::Encoding(e.to_string())
        })?;

    Ok(png)
}
