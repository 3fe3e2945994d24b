//! Companion session state.
//!
//! Owns the active persona, its dialogue memory, the loaded study document
//! and the chapter cursor. Every core operation borrows what it needs from
//! here instead of reaching for ambient state.

use studymate_types::chat::ConversationTurn;
use studymate_types::document::{Chapter, Document};
use studymate_types::emotion::EmotionLabel;
use studymate_types::persona::Persona;

use crate::notify::NotificationSink;

use super::engine::ChatResponseEngine;
use super::memory::DialogueMemory;

pub struct CompanionSession {
    persona: Persona,
    memory: DialogueMemory,
    document: Option<Document>,
    chapter_index: usize,
    emotion: EmotionLabel,
}

impl CompanionSession {
    /// Start a session with empty memory.
    pub fn new(persona: Persona) -> Self {
        Self {
            persona,
            memory: DialogueMemory::new(),
            document: None,
            chapter_index: 0,
            emotion: EmotionLabel::default(),
        }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn memory(&self) -> &DialogueMemory {
        &self.memory
    }

    /// Emotion resolved by the most recent turn.
    pub fn emotion(&self) -> EmotionLabel {
        self.emotion
    }

    /// Image for the current emotion of the active persona.
    pub fn current_asset(&self) -> &str {
        self.persona.asset_for(self.emotion)
    }

    /// Activate another persona. Memory is cleared in the same step so no
    /// utterance ever spans two personas. Returns the greeting line.
    pub fn switch_persona(&mut self, persona: Persona) -> String {
        tracing::info!(persona = %persona.name, "switching persona");
        self.memory.clear();
        self.emotion = EmotionLabel::default();
        self.persona = persona;
        self.persona.greeting()
    }

    /// Forget the conversation but keep the persona.
    pub fn clear_memory(&mut self) {
        self.memory.clear();
    }

    /// Replace the study document and rewind to its first chapter.
    pub fn load_document(&mut self, document: Document) {
        self.document = Some(document);
        self.chapter_index = 0;
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.document.as_mut()
    }

    pub fn chapter_index(&self) -> usize {
        self.chapter_index
    }

    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.document.as_ref()?.chapter(self.chapter_index)
    }

    /// Move the cursor. Returns false (cursor unchanged) when out of range.
    pub fn go_to_chapter(&mut self, index: usize) -> bool {
        let in_range = self
            .document
            .as_ref()
            .is_some_and(|doc| index < doc.chapters.len());
        if in_range {
            self.chapter_index = index;
        }
        in_range
    }

    /// Send one user message through `engine`, using the current chapter as
    /// context.
    pub async fn send(
        &mut self,
        engine: &ChatResponseEngine,
        user_text: &str,
        sink: &dyn NotificationSink,
    ) -> ConversationTurn {
        let chapter = self
            .document
            .as_ref()
            .and_then(|doc| doc.chapter(self.chapter_index));
        let turn = engine
            .respond(user_text, &self.persona, &mut self.memory, chapter, sink)
            .await;
        self.emotion = turn.emotion;
        turn
    }
}
