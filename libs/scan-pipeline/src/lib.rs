//! Core pipeline for the personalized food scanner client.
//!
//! The flow: a [`wizard::ProfileWizard`] collects a [`profile::HealthProfile`],
//! a [`camera::CameraSession`] produces a barcode from a decode backend, and a
//! [`orchestrator::ScanOrchestrator`] turns both into a request against the
//! remote scoring service and tracks the request lifecycle. [`render`] derives
//! presentation tiers from the returned score.

pub mod camera;
pub mod config;
pub mod errors;
pub mod orchestrator;
pub mod profile;
pub mod render;
pub mod scoring;
pub mod wizard;

pub use camera::{CameraDevice, CameraSession, DecodeOptions};
pub use config::{ScanConfig, load_config};
pub use errors::{CameraError, ScanError};
pub use orchestrator::{ScanOrchestrator, ScanState};
pub use profile::HealthProfile;
pub use render::ScoreTier;
pub use scoring::{HttpScoreService, ScanRequest, ScanResult, ScoreService};
pub use wizard::{ProfileWizard, WizardStep};
