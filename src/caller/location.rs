//! Compact "parentDir/file" caller locations.

use super::frame::Frame;

const SEPARATOR: char = '/';

/// Format a frame as `("parentDir/file", line)`.
///
/// The location is empty when the path has no parent directory component:
/// no separator at all, a trailing separator, an empty base name, or a
/// directory whose only separator is its last character. The line number is
/// returned unchanged in every case.
pub fn format_location(frame: &Frame) -> (String, u32) {
    (short_location(&frame.file).unwrap_or_default(), frame.line)
}

fn short_location(path: &str) -> Option<String> {
    let (dir, base) = path.rsplit_once(SEPARATOR)?;
    if base.is_empty() {
        return None;
    }

    let sep = dir.rfind(SEPARATOR)?;
    if sep + 1 >= dir.len() {
        return None;
    }

    Some(format!("{}/{}", &dir[sep + 1..], base))
}
