use std::io::{Result, Write};

/// Hashes everything written to `inner` with blake3.
pub struct HashingForward<W: Write> {
    inner: W,
    hasher: blake3::Hasher,
    pub counted: u64,
}

impl<W: Write> HashingForward<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: blake3::Hasher::new(),
            counted: 0,
        }
    }

    /// Digest of the bytes the inner writer accepted so far.
    pub fn digest(&self) -> blake3::Hash {
        self.hasher.finalize()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for HashingForward<W> {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        self.counted += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_one_shot_hash() {
        let mut w = HashingForward::new(Vec::new());
        w.write_all(b"hello ").unwrap();
        w.write_all(b"maps").unwrap();
        assert_eq!(w.counted, 10);
        assert_eq!(w.digest(), blake3::hash(b"hello maps"));
        assert_eq!(w.into_inner(), b"hello maps");
    }
}
