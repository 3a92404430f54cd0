//! Lexical path algebra for POSIX targets.

use super::buffer::LazyBuf;

pub const SEPARATOR: u8 = b'/';

fn is_separator(c: u8) -> bool {
    c == SEPARATOR
}

pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
}

/// Joins `elem` onto `base` with exactly one separator between them.
pub fn join(base: &str, elem: &str) -> String {
    if base.is_empty() {
        return elem.to_string();
    }
    if elem.is_empty() {
        return base.to_string();
    }
    if base.ends_with('/') {
        format!("{base}{elem}")
    } else {
        format!("{base}/{elem}")
    }
}

/// Returns the shortest lexically equivalent path.
///
/// `..` at the root is dropped; in a relative path, leading `..` elements
/// that cannot be collapsed are kept. An empty result becomes `.`.
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let p = path.as_bytes();
    let n = p.len();
    let rooted = is_separator(p[0]);

    // r reads from p, the buffer cursor writes; dotdot marks where `..`
    // backtracking must stop.
    let mut out = LazyBuf::new(p, p, 0);
    let (mut r, mut dotdot) = (0, 0);
    if rooted {
        out.append(SEPARATOR);
        r = 1;
        dotdot = 1;
    }

    while r < n {
        if is_separator(p[r]) {
            r += 1;
        } else if p[r] == b'.' && (r + 1 == n || is_separator(p[r + 1])) {
            r += 1;
        } else if p[r] == b'.' && p[r + 1] == b'.' && (r + 2 == n || is_separator(p[r + 2])) {
            r += 2;
            if out.len() > dotdot {
                out.pop_segment(dotdot, is_separator);
            } else if !rooted {
                if out.len() > 0 {
                    out.append(SEPARATOR);
                }
                out.append(b'.');
                out.append(b'.');
                dotdot = out.len();
            }
        } else {
            if (rooted && out.len() != 1) || (!rooted && out.len() != 0) {
                out.append(SEPARATOR);
            }
            while r < n && !is_separator(p[r]) {
                out.append(p[r]);
                r += 1;
            }
        }
    }

    if out.len() == 0 {
        return ".".to_string();
    }
    out.into_string()
}

pub fn resolve(working_directory: &str, path: &str) -> String {
    if is_absolute(path) {
        clean(path)
    } else {
        clean(&join(working_directory, path))
    }
}
