//! Host-level errors
//!
//! The simulation itself cannot fail. These cover setting up and driving a
//! host: settings, output files, the page and the GPU surface.

use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to write snapshot: {0}")]
    Snapshot(#[from] std::io::Error),
    #[error("page element #{0} not found")]
    MissingElement(&'static str),
    #[error("render surface: {0}")]
    Surface(String),
}
