use crate::error::{CrlSetError, CrlSetResult};

/// Bounds-checked cursor over an untrusted byte buffer. Every read names
/// the field being read so truncation errors say what was missing.
pub(crate) struct ByteReader<'a> {
    buf: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    pub fn take(&mut self, n: usize, what: &'static str) -> CrlSetResult<&'a [u8]> {
        if self.buf.len() < n {
            return Err(CrlSetError::Truncated(what));
        }
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    pub fn u8(&mut self, what: &'static str) -> CrlSetResult<u8> {
        Ok(self.take(1, what)?[0])
    }

    pub fn u32_le(&mut self, what: &'static str) -> CrlSetResult<u32> {
        let bytes = self.take(4, what)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_advance() {
        let mut reader = ByteReader::new(&[0x01, 0x02, 0x03, 0x04, 0x05]);
        assert_eq!(reader.u8("byte").unwrap(), 0x01);
        assert_eq!(reader.u32_le("word").unwrap(), 0x0504_0302);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_truncated_read_fails() {
        let mut reader = ByteReader::new(&[0x01, 0x02]);
        assert!(matches!(
            reader.u32_le("word"),
            Err(CrlSetError::Truncated("word"))
        ));
        // A failed read consumes nothing.
        assert_eq!(reader.remaining(), 2);
    }
}
