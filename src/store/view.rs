use bytes::Bytes;

/// Reports the heap footprint of a cached value.
///
/// The LRU store charges every entry `key.len() + value.byte_size()` against
/// its budget, so implementations should return the size of the payload they
/// carry.
pub trait ByteSize {
    fn byte_size(&self) -> usize;
}

/// An immutable view over a value's bytes.
///
/// This is the only value type that crosses the cache boundary: loaders and
/// peers produce raw bytes, the group wraps them in a `ByteView`, and every
/// consumer afterwards shares the same frozen buffer. Cloning bumps a
/// reference count; there is no way to mutate the contents through any handle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByteView {
    data: Bytes,
}

impl ByteView {
    /// Copies the caller's buffer into a new view.
    ///
    /// The caller keeps ownership of `data` and may reuse it freely; the view
    /// is backed by its own allocation.
    pub fn copy_from(data: &[u8]) -> Self {
        Self {
            data: Bytes::copy_from_slice(data),
        }
    }

    /// Number of bytes held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a fresh copy of the bytes, detached from the view.
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.to_vec()
    }
}

impl From<Vec<u8>> for ByteView {
    /// Takes ownership of the buffer. No copy is needed: once moved in, no
    /// other handle to the allocation exists, so the contents are frozen.
    fn from(data: Vec<u8>) -> Self {
        Self {
            data: Bytes::from(data),
        }
    }
}

impl ByteSize for ByteView {
    fn byte_size(&self) -> usize {
        self.data.len()
    }
}

impl std::fmt::Display for ByteView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.data))
    }
}

impl AsRef<[u8]> for ByteView {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
