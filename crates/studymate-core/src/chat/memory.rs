//! Bounded dialogue memory.
//!
//! A sliding window over the most recent utterances of the active persona.
//! Older entries are dropped, never summarized.

use std::collections::VecDeque;

use studymate_types::chat::Utterance;

/// Maximum number of utterances kept.
pub const MAX_MEMORY: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct DialogueMemory {
    entries: VecDeque<Utterance>,
}

impl DialogueMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an utterance, evicting from the front to stay within [`MAX_MEMORY`].
    pub fn append(&mut self, utterance: Utterance) {
        self.entries.push_back(utterance);
        while self.entries.len() > MAX_MEMORY {
            self.entries.pop_front();
        }
    }

    /// Oldest-first copy of the current window.
    pub fn snapshot(&self) -> Vec<Utterance> {
        self.entries.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Utterance> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studymate_types::chat::Speaker;

    #[test]
    fn test_append_within_cap() {
        let mut memory = DialogueMemory::new();
        memory.append(Utterance::user("a"));
        memory.append(Utterance::assistant("b"));
        assert_eq!(memory.len(), 2);
        assert_eq!(memory.snapshot()[1].role, Speaker::Assistant);
    }

    #[test]
    fn test_never_exceeds_cap_and_drops_oldest() {
        let mut memory = DialogueMemory::new();
        for i in 0..25 {
            memory.append(Utterance::user(i.to_string()));
            assert!(memory.len() <= MAX_MEMORY);
        }
        let snapshot = memory.snapshot();
        assert_eq!(snapshot.len(), MAX_MEMORY);
        assert_eq!(snapshot.first().unwrap().content, "15");
        assert_eq!(snapshot.last().unwrap().content, "24");
    }

    #[test]
    fn test_clear_empties() {
        let mut memory = DialogueMemory::new();
        memory.append(Utterance::user("a"));
        memory.clear();
        assert!(memory.is_empty());
        assert_eq!(memory.len(), 0);
    }
}
