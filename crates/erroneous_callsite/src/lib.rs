//! Call-site resolution for structured errors.
//!
//! Error constructors record where an error was raised. The constructor only
//! knows "how many frames up" it wants to look; this crate turns that depth
//! into a file and line.
//!
//! # Frame Numbering
//!
//! Depths are counted from the resolver outward:
//!
//! ```text
//! 0  resolution machinery (the `resolve` call)
//! 1  the constructor that asked for a location
//! 2  the constructor's caller          <- ANCHOR_DEPTH, the default
//! 3  the caller's caller
//! ```
//!
//! # Platform Support
//!
//! - **Native targets**: the anchor frame comes from `#[track_caller]`, every
//!   other depth walks the stack with the `backtrace` crate.
//! - **WASM targets**: only the anchor frame resolves.

use std::fmt;
use std::panic::Location;

/// Depth of the frame that called the constructor.
pub const ANCHOR_DEPTH: usize = 2;

/// A resolved file and line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// File path as reported by the compiler or debug info.
    pub file: String,
    /// 1-based line number.
    pub line: u32,
}

impl SourceLocation {
    /// Create a new source location.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        SourceLocation {
            file: file.into(),
            line,
        }
    }
}

impl From<&Location<'_>> for SourceLocation {
    fn from(location: &Location<'_>) -> Self {
        SourceLocation::new(location.file(), location.line())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Resolves a stack depth to a source location.
///
/// Returning `None` is not an error: the caller keeps going without a
/// location.
pub trait CallSite {
    /// Resolve the frame `depth` levels above the resolver.
    fn resolve(&self, depth: usize) -> Option<SourceLocation>;
}

impl<F> CallSite for F
where
    F: Fn(usize) -> Option<SourceLocation>,
{
    fn resolve(&self, depth: usize) -> Option<SourceLocation> {
        self(depth)
    }
}

/// Stack-walking resolver anchored at a `#[track_caller]` location.
///
/// The anchor is the frame at [`ANCHOR_DEPTH`], so the common case never
/// touches the unwinder.
#[derive(Clone, Copy, Debug)]
pub struct StackWalker {
    anchor: &'static Location<'static>,
}

impl StackWalker {
    /// Create a walker anchored at `anchor`.
    pub fn new(anchor: &'static Location<'static>) -> Self {
        StackWalker { anchor }
    }

    /// Create a walker anchored at the caller of the enclosing
    /// `#[track_caller]` function.
    #[track_caller]
    pub fn here() -> Self {
        StackWalker::new(Location::caller())
    }

    /// The anchor location.
    pub fn anchor(&self) -> &'static Location<'static> {
        self.anchor
    }
}

impl CallSite for StackWalker {
    fn resolve(&self, depth: usize) -> Option<SourceLocation> {
        if depth == ANCHOR_DEPTH {
            return Some(SourceLocation::from(self.anchor));
        }
        walk(self.anchor, depth)
    }
}

/// Walk the live stack and pick the frame `depth - ANCHOR_DEPTH` steps away
/// from the anchor frame.
#[cfg(not(target_arch = "wasm32"))]
#[inline(never)]
fn walk(anchor: &Location<'_>, depth: usize) -> Option<SourceLocation> {
    let trace = backtrace::Backtrace::new();

    // Inlined calls show up as extra symbols on one physical frame; each
    // symbol counts as a frame of its own.
    let frames: Vec<Option<SourceLocation>> = trace
        .frames()
        .iter()
        .flat_map(|frame| {
            let symbols = frame.symbols();
            if symbols.is_empty() {
                vec![None]
            } else {
                symbols
                    .iter()
                    .map(|symbol| {
                        let file = symbol.filename()?;
                        let line = symbol.lineno()?;
                        Some(SourceLocation::new(file.display().to_string(), line))
                    })
                    .collect()
            }
        })
        .collect();

    let Some(anchor_index) = frames.iter().position(|frame| {
        frame
            .as_ref()
            .is_some_and(|loc| loc.line == anchor.line() && same_file(&loc.file, anchor.file()))
    }) else {
        tracing::debug!(anchor = %anchor, "anchor frame not found in backtrace");
        return None;
    };

    let index = if depth >= ANCHOR_DEPTH {
        anchor_index.checked_add(depth - ANCHOR_DEPTH)?
    } else {
        anchor_index.checked_sub(ANCHOR_DEPTH - depth)?
    };

    let Some(mut resolved) = frames.get(index).cloned().flatten() else {
        tracing::debug!(depth, "no source location for requested frame");
        return None;
    };

    // Report walked frames in the same form `Location::file()` uses for the
    // anchor, so every depth yields comparable paths.
    if let Some(Some(anchor_frame)) = frames.get(anchor_index) {
        if let Some(root) = anchor_frame.file.strip_suffix(anchor.file()) {
            resolved.file = strip_root(&resolved.file, root);
        }
    }
    Some(resolved)
}

/// WASM version - there is no unwinder, so only the anchor resolves.
#[cfg(target_arch = "wasm32")]
fn walk(_anchor: &Location<'_>, _depth: usize) -> Option<SourceLocation> {
    None
}

/// Debug info may carry absolute paths while `Location` carries paths
/// relative to the workspace; compare by trailing components.
#[cfg(not(target_arch = "wasm32"))]
fn same_file(debug_info_path: &str, location_path: &str) -> bool {
    std::path::Path::new(debug_info_path).ends_with(location_path)
}

/// Drop the `root` prefix from `path`, leaving paths outside it untouched.
#[cfg(not(target_arch = "wasm32"))]
fn strip_root(path: &str, root: &str) -> String {
    if root.is_empty() {
        return path.to_owned();
    }
    match std::path::Path::new(path).strip_prefix(root) {
        Ok(relative) => relative.display().to_string(),
        Err(_) => path.to_owned(),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
