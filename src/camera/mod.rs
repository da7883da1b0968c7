pub mod constraints;
mod loop_worker;
pub mod session;
pub mod state;

pub use constraints::{CaptureConstraints, DimensionRange, FacingMode, FrameRateRange};
pub use session::CameraSession;
pub use state::{CameraState, SessionPhase};
