//! Managerial accounting basics: the Revenue to EBITDA waterfall, a catalog
//! of teaching scenarios, and the session state a guided front end drives.

pub mod calculations;
pub mod format;
pub mod models;
pub mod scenario;
pub mod session;
pub mod steps;

pub use calculations::{ComparisonRow, Emphasis, OverflowError, compare, compute, try_compute};
pub use models::*;
pub use scenario::{Scenario, UnknownScenarioError};
pub use session::{Nudge, SessionError, SessionState};
pub use steps::{Highlight, Step, StepError};
