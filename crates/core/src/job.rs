//! The composed print job.

/// Labels concatenated into one transmission, plus how many there are.
///
/// Labels are appended whole; the buffer is always a sequence of complete
/// `^XA` … `^XZ` formats with no separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelJob {
    buffer: Vec<u8>,
    label_count: u32,
}

impl LabelJob {
    /// An empty job.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one rendered label.
    pub fn push_label(&mut self, label: &[u8]) {
        self.buffer.extend_from_slice(label);
        self.label_count = self.label_count.saturating_add(1);
    }

    /// Number of labels in the job.
    pub fn label_count(&self) -> u32 {
        self.label_count
    }

    /// Returns `true` when there is nothing to print.
    pub fn is_empty(&self) -> bool {
        self.label_count == 0
    }

    /// The bytes to transmit.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}
