//! Sample model and the state derived from it.
//!
//! ## Submodules
//!
//! - [`sample`]: A single measurement outcome ([`Sample`])
//! - [`window`]: Bounded chronological history ([`SlidingWindow`])
//! - [`failure`]: Consecutive-failure state machine and status banner ([`FailureTracker`])
//! - [`stats`]: Rolling min/avg/max/current statistics ([`Stats`])
//! - [`duration`]: Interval parsing and elapsed-time formatting
//!
//! ## Data Flow
//!
//! ```text
//! LatencyProbe::measure()
//!        │
//!        ▼
//!     Sample ──▶ SlidingWindow::push() (evicts oldest when full)
//!        │
//!        ├──▶ FailureTracker::update() ──▶ StatusMessage
//!        │
//!        └──▶ Stats::compute(window)
//! ```

pub mod duration;
pub mod failure;
pub mod sample;
pub mod stats;
pub mod window;

pub use failure::{FailureState, FailureTracker, StatusKind, StatusMessage};
pub use sample::Sample;
pub use stats::Stats;
pub use window::SlidingWindow;
