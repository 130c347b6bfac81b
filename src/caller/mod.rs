//! Caller location subsystem.
//!
//! # Data Flow
//! ```text
//! logging call site
//!     → frame.rs (walk the stack, resolve one frame)
//!     → Frame { file, line }
//!     → location.rs ("parentDir/file", line)
//!     → `caller` / `line` log fields
//! ```
//!
//! # Design Decisions
//! - Nothing is cached between calls; every capture walks the live stack
//! - Unresolvable frames produce `Frame::default()`, never a panic

pub mod frame;
pub mod location;

pub use frame::{capture, Frame};
pub use location::format_location;

/// Capture the frame `skip` levels above the caller and format it.
///
/// `skip = 0` formats the location of the function calling `caller_location`.
#[inline(never)]
pub fn caller_location(skip: usize) -> (String, u32) {
    let frame = capture(skip + 1);
    format_location(&frame)
}
