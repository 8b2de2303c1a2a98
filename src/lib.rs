//! Offline R-peak detection and RR interval extraction for single-lead ECG
//! recordings, built on the Pan-Tompkins chain: high-pass, derivative,
//! squaring, moving window integration and adaptive peak picking.

pub mod context;
pub mod error;
pub mod export;
pub mod filters;
pub mod history;
pub mod ingest;
pub mod pipeline;
pub mod results;
pub mod signal;
pub mod threshold;

pub use context::{AnalysisContext, AnalysisParams};
pub use error::{EcgError, ExportError, IngestError};
pub use export::write_json;
pub use ingest::{read_csv, EcgRecord};
pub use results::{Intervals, Peaks};

/// Maximum number of samples analysed per lead.
pub const MAX_SAMPLES: usize = 10_000;

/// Number of leads in a standard recording.
pub const LEADS: usize = 12;

/// Nominal sampling rate of the recordings (Hz).
pub const SAMPLING_RATE_HZ: u32 = 500;

/// Highest heart rate considered physiologically plausible (BPM).
pub const HR_MAX_BPM: usize = 240;

/// Longest recording at the nominal sampling rate (seconds).
pub const DURATION_S: usize = MAX_SAMPLES / SAMPLING_RATE_HZ as usize;

/// Upper bound on the number of beats in one recording.
pub const MAX_BEATS: usize = HR_MAX_BPM * DURATION_S / 60 + 16;

/// Number of most recent RR intervals used for the short-term heart rate.
pub const MAX_RR_HISTORY: usize = 8;
