//! Delay detection engine.
//!
//! Three trigger surfaces share one per-record step (`DelayFlagger`):
//! - the operator batch command (`detect_and_flag`)
//! - the administrator action (`RunDelayDetection`)
//! - the implicit check when an intervention is viewed
//!   (`CheckInterventionDelayHandler`)

mod check_intervention;
mod detect_overdue;
mod flagger;

pub use check_intervention::CheckInterventionDelayHandler;
pub use detect_overdue::{
    DetectOverdueInterventionsHandler, DetectionRunResult, PreviewDelayDetectionCommand,
    RunDelayDetectionCommand,
};
pub use flagger::{DelayDefaults, DelayFlagger};
