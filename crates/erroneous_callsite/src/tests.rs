use super::*;
use pretty_assertions::assert_eq;

#[track_caller]
fn resolve_here(depth: usize) -> Option<SourceLocation> {
    StackWalker::here().resolve(depth)
}

#[test]
fn test_anchor_depth_resolves_to_caller() {
    let expected_line = line!() + 1;
    let resolved = resolve_here(ANCHOR_DEPTH).unwrap();

    assert_eq!(resolved.file, file!());
    assert_eq!(resolved.line, expected_line);
}

#[test]
fn test_anchor_matches_location_caller() {
    let walker = StackWalker::here();
    let anchor = walker.anchor();

    assert_eq!(anchor.file(), file!());
    assert_eq!(walker.resolve(ANCHOR_DEPTH), Some(SourceLocation::from(anchor)));
}

/// Resolves from inside a plain frame, so depths above the anchor land in
/// the calling test.
#[inline(never)]
fn resolve_from_helper(depth: usize) -> Option<SourceLocation> {
    resolve_here(depth)
}

/// Like [`resolve_here`], also reporting the line of its own call.
#[track_caller]
#[inline(never)]
fn resolve_here_with_line(depth: usize) -> (Option<SourceLocation>, u32) {
    (StackWalker::here().resolve(depth), line!())
}

#[test]
fn test_inner_frame_is_the_helper() {
    let (inner, helper_line) = resolve_here_with_line(ANCHOR_DEPTH - 1);

    assert_eq!(inner, Some(SourceLocation::new(file!(), helper_line)));
}

#[test]
fn test_outer_frame_is_the_helpers_caller() {
    let expected_line = line!() + 1;
    let outer = resolve_from_helper(ANCHOR_DEPTH + 1);

    assert_eq!(outer, Some(SourceLocation::new(file!(), expected_line)));
}

#[test]
fn test_walked_and_anchored_paths_match() {
    let anchored = resolve_from_helper(ANCHOR_DEPTH).unwrap();
    let walked = resolve_from_helper(ANCHOR_DEPTH + 1).unwrap();

    assert_eq!(anchored.file, walked.file);
}

#[test]
fn test_unreachable_depth_is_none() {
    assert_eq!(resolve_here(usize::MAX), None);
}

#[test]
fn test_closure_call_site() {
    let stub = |depth: usize| (depth == 3).then(|| SourceLocation::new("stub.rs", 7));

    assert_eq!(stub.resolve(3).unwrap().to_string(), "stub.rs:7");
    assert_eq!(stub.resolve(2), None);
}

#[test]
fn test_source_location_display() {
    let loc = SourceLocation::new("src/main.rs", 42);
    assert_eq!(loc.to_string(), "src/main.rs:42");
}

#[test]
fn test_same_file_matches_trailing_components() {
    assert!(same_file("/home/dev/ws/crates/a/src/lib.rs", "crates/a/src/lib.rs"));
    assert!(same_file("crates/a/src/lib.rs", "crates/a/src/lib.rs"));
    assert!(!same_file("/home/dev/ws/crates/b/src/lib.rs", "crates/a/src/lib.rs"));
    assert!(!same_file("/x/mylib.rs", "lib.rs"));
}

#[test]
fn test_strip_root() {
    assert_eq!(strip_root("/ws/crates/a/src/lib.rs", "/ws/"), "crates/a/src/lib.rs");
    assert_eq!(strip_root("/ws/crates/a/src/lib.rs", "/ws"), "crates/a/src/lib.rs");
    assert_eq!(
        strip_root("/rustc/library/core/src/ops.rs", "/ws/"),
        "/rustc/library/core/src/ops.rs"
    );
    assert_eq!(strip_root("crates/a/src/lib.rs", ""), "crates/a/src/lib.rs");
}
