//! Shared in-memory writer for capturing report output in tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Cloneable `Write` implementation over a shared byte buffer.
///
/// Hand one clone to a report sink and keep another in the test to read the
/// captured text back.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured output as UTF-8 text.
    ///
    /// # Panics
    /// Panics when the captured bytes are not valid UTF-8 or the buffer
    /// lock is poisoned; both only happen when a test already went wrong.
    #[must_use]
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().expect("buffer lock poisoned");
        String::from_utf8(bytes.clone()).expect("captured output was not UTF-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self
            .bytes
            .lock()
            .map_err(|_| io::Error::other("buffer lock poisoned"))?;
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
