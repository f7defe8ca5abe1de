//! Application-wide constants

/// Storage bucket holding published QR images.
pub const DEFAULT_QR_BUCKET: &str = "pet-qr-codes";
/// Path prefix of QR objects inside the bucket.
pub const QR_OBJECT_PREFIX: &str = "qr-codes";
pub const QR_CONTENT_TYPE: &str = "image/png";
pub const QR_CACHE_CONTROL_SECS: u32 = 3600;

/// Edge length of a rendered QR image in pixels.
pub const QR_IMAGE_SIZE: u32 = 300;
/// Light margin around the symbol, in modules.
pub const QR_MARGIN_MODULES: u32 = 1;

pub const SCAN_ROUTE_PREFIX: &str = "/scan";

pub const DEFAULT_JWT_AUDIENCE: &str = "authenticated";
