// overseer-api: Async Rust client for the skynet print-farm service

pub mod error;
pub mod skynet;
pub mod transport;

pub use error::Error;
pub use skynet::SkynetClient;
pub use skynet::operations::Method;
pub use skynet::models::{PrinterRef, RawFilamentChange, RawPrintJob, RawPrinter};
pub use transport::TransportConfig;
