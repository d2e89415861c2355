/// Final text handed to the renderer, with the byte offset of every character slot.
///
/// Passthrough markup appears in `text` but owns no slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct OutputText {
    text: String,
    slot_offsets: Vec<usize>,
}

impl OutputText {
    pub(crate) fn push_slots(&mut self, s: &str) {
        let base = self.text.len();
        self.slot_offsets
            .extend(s.char_indices().map(|(i, _)| base + i));
        self.text.push_str(s);
    }

    pub(crate) fn push_verbatim(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Output string.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of character slots.
    pub fn char_count(&self) -> usize {
        self.slot_offsets.len()
    }

    /// Byte offset of slot `index` in [`as_str`](Self::as_str).
    pub fn slot_byte_offset(&self, index: usize) -> Option<usize> {
        self.slot_offsets.get(index).copied()
    }

    /// Character occupying slot `index`.
    pub fn slot_char(&self, index: usize) -> Option<char> {
        let offset = self.slot_byte_offset(index)?;
        self.text[offset..].chars().next()
    }
}
