//! Lexical path algebra for Windows targets.
//!
//! Both `\` and `/` are accepted as separators on input; output always uses `\`.

use super::buffer::LazyBuf;

pub const SEPARATOR: u8 = b'\\';

pub fn is_separator(c: u8) -> bool {
    c == b'\\' || c == b'/'
}

/// Kind of volume prefix at the start of a Windows path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeKind {
    None,
    /// `C:`
    DriveLetter,
    /// `\\host\share` or `\\.\UNC\host\share`
    Unc,
    /// `\\.\device`
    LocalDevice,
    /// `\\?\device` or `\??\device`
    RootLocalDevice,
}

/// Length and kind of a path's volume prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeInfo {
    pub len: usize,
    pub kind: VolumeKind,
}

impl VolumeInfo {
    const NONE: Self = Self {
        len: 0,
        kind: VolumeKind::None,
    };

    fn new(len: usize, kind: VolumeKind) -> Self {
        Self { len, kind }
    }
}

/// Classifies the volume prefix of `path`.
///
/// Drive letters are not checked against `A-Z`; any byte followed by `:` counts.
/// For device paths the component after the device marker is folded into the
/// prefix, so `..` can never expose the bare marker.
pub fn volume_info(path: &[u8]) -> VolumeInfo {
    if path.len() >= 2 && path[1] == b':' {
        return VolumeInfo::new(2, VolumeKind::DriveLetter);
    }
    if path.first().is_none_or(|&c| !is_separator(c)) {
        return VolumeInfo::NONE;
    }
    if has_prefix_fold(path, br"\\.\UNC") {
        // Host and share stay in the prefix even though Windows itself would
        // let `..` remove the host component here.
        return VolumeInfo::new(unc_len(path, br"\\.\UNC\".len()), VolumeKind::Unc);
    }
    if has_prefix_fold(path, br"\\.") {
        return VolumeInfo::new(device_len(path), VolumeKind::LocalDevice);
    }
    if has_prefix_fold(path, br"\\?") || has_prefix_fold(path, br"\??") {
        return VolumeInfo::new(device_len(path), VolumeKind::RootLocalDevice);
    }
    if path.len() >= 2 && is_separator(path[1]) {
        return VolumeInfo::new(unc_len(path, 2), VolumeKind::Unc);
    }
    VolumeInfo::NONE
}

/// Case-insensitive prefix match where any separator matches any separator.
/// The prefix must be followed by a separator or the end of the path.
fn has_prefix_fold(path: &[u8], prefix: &[u8]) -> bool {
    if path.len() < prefix.len() {
        return false;
    }
    let matches = prefix.iter().zip(path).all(|(&p, &s)| {
        if is_separator(p) {
            is_separator(s)
        } else {
            p.eq_ignore_ascii_case(&s)
        }
    });
    matches && path.get(prefix.len()).is_none_or(|&c| is_separator(c))
}

/// Index of the separator that ends the share component, or the full length.
fn unc_len(path: &[u8], prefix_len: usize) -> usize {
    path.iter()
        .enumerate()
        .skip(prefix_len)
        .filter(|&(_, &c)| is_separator(c))
        .nth(1)
        .map_or(path.len(), |(i, _)| i)
}

fn device_len(path: &[u8]) -> usize {
    if path.len() == 3 {
        return 3;
    }
    match path[4..].iter().position(|&c| is_separator(c)) {
        Some(i) => 4 + i,
        None => path.len(),
    }
}

pub fn is_absolute(path: &str) -> bool {
    let p = path.as_bytes();
    let vol_len = volume_info(p).len;
    if vol_len == 0 {
        return false;
    }
    if is_separator(p[0]) && p.get(1).is_some_and(|&c| is_separator(c)) {
        return true;
    }
    p.get(vol_len).is_some_and(|&c| is_separator(c))
}

/// Joins `elem` onto `base`.
///
/// - A base ending in a separator has leading separators stripped from
///   `elem`, so joining never manufactures a UNC prefix.
/// - A base ending in `:` stays drive-relative: `C:` + `f` is `C:f`.
/// - Joining `\` and `??` yields `\.\??` rather than a root local device.
pub fn join(base: &str, elem: &str) -> String {
    let mut out = String::with_capacity(base.len() + elem.len() + 2);
    let mut last: u8 = 0;

    for e in [base, elem] {
        let mut e = e;
        match last {
            _ if out.is_empty() => {}
            c if is_separator(c) => {
                e = e.trim_start_matches(['\\', '/']);
                if out.len() == 1
                    && e.starts_with("??")
                    && e.as_bytes().get(2).is_none_or(|&c| is_separator(c))
                {
                    out.push_str(".\\");
                }
            }
            b':' => {}
            _ => {
                out.push('\\');
                last = SEPARATOR;
            }
        }
        if let Some(&tail) = e.as_bytes().last() {
            out.push_str(e);
            last = tail;
        }
    }
    out
}

fn from_slash(path: &str) -> String {
    path.replace('/', "\\")
}

/// Returns the shortest lexically equivalent path without touching the
/// volume prefix.
pub fn clean(path: &str) -> String {
    let original = path.as_bytes();
    let vol_len = volume_info(original).len;
    let p = &original[vol_len..];

    if p.is_empty() {
        // A bare UNC or device prefix is already clean; a bare drive gets `.`.
        if vol_len > 0 && is_separator(original[0]) {
            return from_slash(path);
        }
        return from_slash(&format!("{path}."));
    }

    let n = p.len();
    let rooted = is_separator(p[0]);

    let mut out = LazyBuf::new(p, original, vol_len);
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
        out.append(b'.');
    }

    guard_volume_lookalike(&mut out);
    from_slash(&out.into_string())
}

/// Keeps collapsing from producing a volume prefix the input did not have.
///
/// `a\..\c:` must not become the drive path `c:`, and `\a\..\??\c:\x` must
/// not become the root local device path `\??\c:\x`.
fn guard_volume_lookalike(out: &mut LazyBuf<'_>) {
    if out.vol_len() != 0 {
        return;
    }
    let Some(written) = out.diverged() else {
        return;
    };

    let first_element_has_colon = written
        .iter()
        .take_while(|&&c| !is_separator(c))
        .any(|&c| c == b':');

    let prefix: &[u8] = if first_element_has_colon {
        b".\\"
    } else if written.len() >= 2
        && is_separator(written[0])
        && (written[1] == b':' || (written.len() >= 3 && written[1..3] == *b"??"))
    {
        b"\\."
    } else {
        return;
    };
    out.prepend(prefix);
}

pub fn resolve(working_directory: &str, path: &str) -> String {
    if is_absolute(path) {
        return clean(path);
    }
    let joined = join(working_directory, path);
    if joined.is_empty() {
        return joined;
    }
    clean(&joined)
}
