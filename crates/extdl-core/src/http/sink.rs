//! Where a response body goes: memory for pages, a file for downloads.

use crate::storage::PartialFile;

/// Write target for one transfer, picked per request.
#[derive(Debug)]
pub enum Sink {
    Memory(Vec<u8>),
    File(PartialFile),
}

impl Sink {
    pub fn memory() -> Self {
        Sink::Memory(Vec::new())
    }

    pub fn write(&mut self, data: &[u8]) -> std::io::Result<()> {
        match self {
            Sink::Memory(buf) => {
                buf.extend_from_slice(data);
                Ok(())
            }
            Sink::File(file) => file.write_chunk(data),
        }
    }

    /// Bytes received so far.
    pub fn len(&self) -> u64 {
        match self {
            Sink::Memory(buf) => buf.len() as u64,
            Sink::File(file) => file.written(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Buffered body. A file sink is discarded (and its file removed).
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Sink::Memory(buf) => buf,
            Sink::File(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_accumulates() {
        let mut sink = Sink::memory();
        assert!(sink.is_empty());
        sink.write(b"<html>").unwrap();
        sink.write(b"</html>").unwrap();
        assert_eq!(sink.len(), 13);
        assert_eq!(sink.into_bytes(), b"<html></html>");
    }

    #[test]
    fn file_sink_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.bin");
        let mut sink = Sink::File(PartialFile::create(&path).unwrap());
        sink.write(b"abc").unwrap();
        assert_eq!(sink.len(), 3);
        match sink {
            Sink::File(f) => assert_eq!(f.commit().unwrap(), 3),
            Sink::Memory(_) => unreachable!(),
        }
        assert_eq!(std::fs::read(&path).unwrap(), b"abc");
    }
}
