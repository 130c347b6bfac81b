//! Single stack frame capture.
//!
//! # Responsibilities
//! - Walk the live call stack from the caller of [`capture`] outwards
//! - Skip a caller-chosen number of wrapper frames
//! - Resolve one frame into a source file and line
//!
//! # Design Decisions
//! - Frames belonging to the unwinder and to `capture` itself are never
//!   counted, so `skip = 0` always means "whoever called `capture`"
//! - The walk stops at the first frame past the skipped ones
//! - Missing debug info or a too-shallow stack yields `Frame::default()`
//!
//! # Limits
//! `skip` counts physical frames. Optimized builds inline small wrappers and
//! turn a wrapper ending in a tail call to `capture` into a jump, so neither
//! leaves a frame and a fixed `skip` overshoots. Mark such wrappers
//! `#[inline(never)]` and do not end them with the capturing call. Builds
//! without debug info (the default release profile) resolve nothing and
//! always yield `Frame::default()`.

use std::fmt;

/// Source location of one stack frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Source file path as recorded in debug info (usually absolute).
    pub file: String,
    /// 1-based line number, 0 when unknown.
    pub line: u32,
}

impl Frame {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// True for the zero-valued frame returned when nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.file.is_empty() && self.line == 0
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Demangled path suffix used when the unwinder cannot report symbol
/// start addresses.
const ANCHOR_SYMBOL: &str = "caller::frame::capture";

/// Capture the frame `skip` levels above the function calling `capture`.
///
/// Returns `Frame::default()` when the stack is shallower than `skip` or the
/// frame carries no file information. See the module docs for how optimized
/// builds shift `skip`.
#[inline(never)]
pub fn capture(skip: usize) -> Frame {
    let anchor = (capture as fn(usize) -> Frame) as usize;

    let mut anchored = false;
    let mut remaining = skip;
    let mut target: Option<backtrace::Frame> = None;

    backtrace::trace(|frame| {
        if !anchored {
            anchored = is_anchor(frame, anchor);
            return true;
        }
        if remaining > 0 {
            remaining -= 1;
            return true;
        }
        target = Some(frame.clone());
        false
    });

    if !anchored {
        tracing::trace!("capture frame not found on stack");
        return Frame::default();
    }

    match &target {
        Some(frame) => resolve(frame),
        None => {
            tracing::trace!(skip, "stack shallower than requested skip");
            Frame::default()
        }
    }
}

fn is_anchor(frame: &backtrace::Frame, anchor: usize) -> bool {
    if frame.symbol_address() as usize == anchor {
        return true;
    }

    let mut found = false;
    backtrace::resolve_frame(frame, |symbol| {
        if let Some(name) = symbol.name() {
            found |= format!("{name:#}").ends_with(ANCHOR_SYMBOL);
        }
    });
    found
}

/// Resolve a frame to its innermost source location.
///
/// Inlined calls report several symbols for one frame; the first one with a
/// file name wins.
fn resolve(frame: &backtrace::Frame) -> Frame {
    let mut resolved: Option<Frame> = None;
    backtrace::resolve_frame(frame, |symbol| {
        if resolved.is_some() {
            return;
        }
        if let Some(path) = symbol.filename() {
            resolved = Some(Frame {
                file: path.to_string_lossy().into_owned(),
                line: symbol.lineno().unwrap_or(0),
            });
        }
    });
    resolved.unwrap_or_default()
}
