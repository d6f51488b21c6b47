pub mod drill;
pub mod normalize;
pub mod phase;
pub mod scheduler;
pub mod validator;

pub use drill::{ColorTag, DisplayMetadata, DrillEngine, DrillEvent, DrillState, Segment, WordSource};
pub use phase::{DrillPhase, PhaseSequencer, StandardSequencer};
