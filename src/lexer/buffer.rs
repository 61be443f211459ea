//! Scratch buffer the lexer accumulates pending token text in.

/// Initial capacity for word and whitespace runs
pub const WORD_BUF_CAPACITY: usize = 40;
/// Initial capacity for quoted strings
pub const STRING_BUF_CAPACITY: usize = 128;

/// Growable byte buffer with amortized growth.
///
/// Only whole UTF-8 sequences are ever appended through the lexer, so a
/// snapshot is always valid text.
#[derive(Debug, Clone, Default)]
pub struct ScratchBuf {
    bytes: Vec<u8>,
}

impl ScratchBuf {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Grow to at least `capacity`, overshooting by half so repeated appends
    /// stay amortized O(1).
    fn ensure_capacity(&mut self, capacity: usize) {
        if self.bytes.capacity() >= capacity {
            return;
        }
        let target = capacity + capacity / 2;
        self.bytes.reserve_exact(target - self.bytes.len());
    }

    pub fn append(&mut self, data: &[u8]) {
        self.ensure_capacity(self.bytes.len() + data.len());
        self.bytes.extend_from_slice(data);
    }

    pub fn append_str(&mut self, s: &str) {
        self.append(s.as_bytes());
    }

    pub fn append_char(&mut self, c: char) {
        let mut utf8 = [0u8; 4];
        self.append(c.encode_utf8(&mut utf8).as_bytes());
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Owned copy of the current contents.
    pub fn snapshot(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Empty the buffer, keeping its allocation for reuse.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Snapshot then clear.
    pub fn take(&mut self) -> String {
        let s = self.snapshot();
        self.clear();
        s
    }
}
