//! Caller capture through the public API.

use logmeta::caller::{caller_location, capture, format_location, Frame};
use logmeta::LogFields;

#[inline(never)]
fn log_helper() -> (String, u32) {
    // Report the location of whoever called the helper. `black_box` keeps the
    // call from becoming a tail jump that would drop this frame.
    std::hint::black_box(caller_location(1))
}

#[test]
fn capture_reports_this_file() {
    let frame = capture(0);
    assert!(frame.file.ends_with("caller.rs"), "unexpected frame {frame}");
    assert!(frame.line > 0);

    let (location, line) = format_location(&frame);
    assert_eq!(location, "tests/caller.rs");
    assert_eq!(line, frame.line);
}

#[test]
fn caller_location_skips_logging_wrappers() {
    let (direct, direct_line) = caller_location(0);
    let (wrapped, wrapped_line) = log_helper();

    assert_eq!(direct, "tests/caller.rs");
    assert_eq!(wrapped, "tests/caller.rs");
    assert!(wrapped_line > direct_line);
}

#[test]
fn deep_skip_degrades_to_empty_location() {
    assert_eq!(capture(usize::MAX), Frame::default());
    assert_eq!(caller_location(50_000), (String::new(), 0));
}

#[test]
fn capture_is_safe_from_many_threads() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| caller_location(0)))
        .collect();

    for handle in handles {
        let (location, line) = handle.join().unwrap();
        assert_eq!(location, "tests/caller.rs");
        assert!(line > 0);
    }
}

#[test]
fn log_fields_point_at_test() {
    let fields = LogFields::collect(0);
    assert_eq!(fields.caller, "tests/caller.rs");
    assert!(fields.line > 0);
}
