pub mod debounce;
pub mod reconciler;

pub use debounce::DetectionDebouncer;
pub use reconciler::{ScanOutcome, ScanReconciler};
