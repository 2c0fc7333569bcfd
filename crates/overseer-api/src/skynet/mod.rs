// skynet API client modules
//
// Hand-written client for the print-farm service's `list/` and
// `operations/` endpoints.

pub mod client;
pub mod lists;
pub mod models;
pub mod operations;

pub use client::SkynetClient;
