//! Copy-on-write output buffer shared by both cleaning algorithms.

use std::borrow::Cow;

/// Output buffer for lexical path cleaning.
///
/// Reads and writes share one cursor. As long as every appended byte equals
/// the input byte at the cursor, nothing is allocated and the result is a
/// slice of the input. The first mismatch copies the prefix written so far
/// into an owned buffer.
pub(super) struct LazyBuf<'a> {
    /// Input after the volume prefix.
    path: &'a [u8],
    /// Full input including the volume prefix.
    vol_and_path: &'a [u8],
    vol_len: usize,
    buf: Option<Vec<u8>>,
    w: usize,
}

impl<'a> LazyBuf<'a> {
    pub(super) fn new(path: &'a [u8], vol_and_path: &'a [u8], vol_len: usize) -> Self {
        Self {
            path,
            vol_and_path,
            vol_len,
            buf: None,
            w: 0,
        }
    }

    /// Number of bytes written after the volume prefix.
    pub(super) fn len(&self) -> usize {
        self.w
    }

    pub(super) fn vol_len(&self) -> usize {
        self.vol_len
    }

    fn index(&self, i: usize) -> u8 {
        match &self.buf {
            Some(buf) => buf[i],
            None => self.path[i],
        }
    }

    pub(super) fn append(&mut self, c: u8) {
        if self.buf.is_none() {
            if self.w < self.path.len() && self.path[self.w] == c {
                self.w += 1;
                return;
            }
            let mut buf = Vec::with_capacity(self.path.len() + 2);
            buf.extend_from_slice(&self.path[..self.w]);
            self.buf = Some(buf);
        }
        if let Some(buf) = self.buf.as_mut() {
            buf.truncate(self.w);
            buf.push(c);
        }
        self.w += 1;
    }

    /// Drops the last written element, never moving the cursor below `limit`.
    pub(super) fn pop_segment(&mut self, limit: usize, is_separator: impl Fn(u8) -> bool) {
        self.w -= 1;
        while self.w > limit && !is_separator(self.index(self.w)) {
            self.w -= 1;
        }
    }

    /// Written bytes, but only once the output has diverged from the input.
    pub(super) fn diverged(&self) -> Option<&[u8]> {
        self.buf.as_deref().map(|buf| &buf[..self.w])
    }

    /// Inserts `prefix` in front of the diverged output. No-op before divergence.
    pub(super) fn prepend(&mut self, prefix: &[u8]) {
        if let Some(buf) = self.buf.as_mut() {
            buf.truncate(self.w);
            buf.splice(0..0, prefix.iter().copied());
            self.w += prefix.len();
        }
    }

    pub(super) fn into_string(self) -> String {
        let bytes: Cow<'_, [u8]> = match self.buf {
            None => Cow::Borrowed(&self.vol_and_path[..self.vol_len + self.w]),
            Some(buf) => {
                let mut out = Vec::with_capacity(self.vol_len + self.w);
                out.extend_from_slice(&self.vol_and_path[..self.vol_len]);
                out.extend_from_slice(&buf[..self.w]);
                Cow::Owned(out)
            }
        };
        String::from_utf8_lossy(&bytes).into_owned()
    }
}
