//! Services backing the console pages

pub mod catalog;
pub mod entity;
pub mod qr;

pub use catalog::{Catalog, today};
pub use entity::EntityService;
pub use qr::{
    CameraHandle, CameraSource, CodeReader, DecodeAttempt, NoDecoder, QrScanSession, ScanPhase, ScanTicket,
    UnavailableCamera, default_camera,
};
