//! Conversational response pipeline.
//!
//! `ChatResponseEngine::respond` always yields a `ConversationTurn`. Missing
//! configuration, transport errors, non-success statuses and malformed
//! payloads all converge on the same fallback: the emotion comes from the
//! user's own text, the reply echoes the input, only the user utterance is
//! remembered, and one notice is sent. The notice text is the only thing
//! that tells the branches apart.

use studymate_types::chat::{ConversationTurn, Utterance};
use studymate_types::config::ChatSettings;
use studymate_types::document::Chapter;
use studymate_types::llm::{CompletionRequest, LlmError};
use studymate_types::notification::Notification;
use studymate_types::persona::Persona;

use crate::emotion::{classify, map_tag, split_trailing_tag};
use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::complete_text;
use crate::notify::NotificationSink;

use super::memory::DialogueMemory;
use super::prompt::build_messages;

/// Why a turn took the fallback path.
#[derive(Debug, thiserror::Error)]
pub enum ChatFailure {
    #[error("remote endpoint is not configured")]
    MissingConfiguration,

    #[error(transparent)]
    Remote(#[from] LlmError),
}

impl ChatFailure {
    pub fn notification(&self) -> Notification {
        match self {
            ChatFailure::MissingConfiguration => Notification::warning("请先配置API设置！"),
            ChatFailure::Remote(err) => {
                Notification::error(format!("API调用失败，使用默认响应：{}", err.notice()))
            }
        }
    }
}

/// Deterministic reply used when no remote answer is available.
pub fn acknowledgement(user_text: &str) -> String {
    format!("我收到了你的消息：{user_text}")
}

/// Produces one conversation turn per user message.
///
/// `provider` is `None` when credentials or endpoint are missing; in that
/// case no network I/O is attempted.
pub struct ChatResponseEngine {
    provider: Option<BoxLlmProvider>,
    settings: ChatSettings,
}

impl ChatResponseEngine {
    pub fn new(provider: Option<BoxLlmProvider>, settings: ChatSettings) -> Self {
        Self { provider, settings }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Run one turn. Never fails.
    ///
    /// The caller must not start another turn on the same `memory` until this
    /// one resolves; the `&mut` borrow enforces that.
    pub async fn respond(
        &self,
        user_text: &str,
        persona: &Persona,
        memory: &mut DialogueMemory,
        chapter: Option<&Chapter>,
        sink: &dyn NotificationSink,
    ) -> ConversationTurn {
        let outcome = match &self.provider {
            None => Err(ChatFailure::MissingConfiguration),
            Some(provider) => {
                let request = CompletionRequest {
                    model: self.settings.model.clone(),
                    messages: build_messages(persona, memory, chapter, user_text),
                    max_tokens: self.settings.max_tokens,
                    temperature: Some(self.settings.temperature),
                };
                complete_text(provider, "chat", &request)
                    .await
                    .map_err(ChatFailure::from)
            }
        };

        match outcome {
            Ok(content) => accept_reply(user_text, &content, memory),
            Err(failure) => fallback(user_text, failure, memory, sink),
        }
    }
}

fn accept_reply(user_text: &str, content: &str, memory: &mut DialogueMemory) -> ConversationTurn {
    let (reply, emotion) = match split_trailing_tag(content) {
        Some((body, tag)) => (body, map_tag(tag)),
        None => (content.to_string(), classify(content)),
    };
    tracing::debug!(%emotion, reply_len = reply.len(), "remote reply accepted");

    memory.append(Utterance::user(user_text));
    memory.append(Utterance::assistant(reply.clone()));
    ConversationTurn::new(user_text, reply, emotion)
}

fn fallback(
    user_text: &str,
    failure: ChatFailure,
    memory: &mut DialogueMemory,
    sink: &dyn NotificationSink,
) -> ConversationTurn {
    match &failure {
        ChatFailure::MissingConfiguration => tracing::info!("chat endpoint not configured, using fallback"),
        ChatFailure::Remote(err) => tracing::warn!(error = %err, "chat request failed, using fallback"),
    }
    sink.notify(failure.notification());

    memory.append(Utterance::user(user_text));
    ConversationTurn::new(user_text, acknowledgement(user_text), classify(user_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{drain, NotificationBus};
    use crate::testing::MockProvider;
    use studymate_types::chat::Speaker;
    use studymate_types::emotion::EmotionLabel;
    use studymate_types::llm::MessageRole;
    use studymate_types::notification::Severity;

    fn engine_with(provider: Option<MockProvider>) -> ChatResponseEngine {
        ChatResponseEngine::new(provider.map(BoxLlmProvider::new), ChatSettings::default())
    }

    #[tokio::test]
    async fn test_tagged_reply_is_stripped_and_mapped() {
        let engine = engine_with(Some(MockProvider::replying("这题你做对了！ [proud]")));
        let persona = Persona::default_companion();
        let mut memory = DialogueMemory::new();
        let bus = NotificationBus::default();
        let mut rx = bus.subscribe();

        let turn = engine.respond("我做完了", &persona, &mut memory, None, &bus).await;

        assert_eq!(turn.reply, "这题你做对了！");
        assert_eq!(turn.emotion, EmotionLabel::Proud);
        assert_eq!(memory.len(), 2);
        assert_eq!(memory.snapshot()[1].content, "这题你做对了！");
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_untagged_reply_is_classified() {
        let engine = engine_with(Some(MockProvider::replying("别生气嘛")));
        let persona = Persona::default_companion();
        let mut memory = DialogueMemory::new();
        let bus = NotificationBus::default();

        let turn = engine.respond("hello", &persona, &mut memory, None, &bus).await;

        assert_eq!(turn.reply, "别生气嘛");
        assert_eq!(turn.emotion, EmotionLabel::Angry);
    }

    #[tokio::test]
    async fn test_unmapped_tag_falls_back_to_default() {
        let engine = engine_with(Some(MockProvider::replying("嗯嗯 [calm]")));
        let persona = Persona::default_companion();
        let mut memory = DialogueMemory::new();
        let bus = NotificationBus::default();

        let turn = engine.respond("hi", &persona, &mut memory, None, &bus).await;
        assert_eq!(turn.reply, "嗯嗯");
        assert_eq!(turn.emotion, EmotionLabel::Happy);
    }

    #[tokio::test]
    async fn test_cjk_tag_is_kept_and_reply_classified() {
        let engine = engine_with(Some(MockProvider::replying("真让人生气 [害羞]")));
        let persona = Persona::default_companion();
        let mut memory = DialogueMemory::new();
        let bus = NotificationBus::default();

        let turn = engine.respond("hi", &persona, &mut memory, None, &bus).await;

        assert_eq!(turn.reply, "真让人生气 [害羞]");
        assert_eq!(turn.emotion, EmotionLabel::Angry);
        assert_eq!(memory.snapshot()[1].content, "真让人生气 [害羞]");
    }

    #[tokio::test]
    async fn test_request_carries_settings_memory_and_chapter() {
        let mock = MockProvider::replying("ok");
        let requests = mock.requests();
        let engine = engine_with(Some(mock));
        let persona = Persona::new("阿星", "活泼");
        let mut memory = DialogueMemory::new();
        memory.append(Utterance::user("之前的问题"));
        let chapter = Chapter::new("第三章", "光合作用");
        let bus = NotificationBus::default();

        engine
            .respond("继续讲", &persona, &mut memory, Some(&chapter), &bus)
            .await;

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.model, "deepseek-chat");
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, 500);
        assert_eq!(request.messages.len(), 3);
        assert!(request.messages[0].content.contains("你是阿星，活泼"));
        assert!(request.messages[0].content.contains("光合作用"));
        assert_eq!(request.messages[1].content, "之前的问题");
        assert_eq!(request.messages[2].role, MessageRole::User);
    }

    #[tokio::test]
    async fn test_missing_configuration_falls_back_without_io() {
        let engine = engine_with(None);
        let persona = Persona::default_companion();
        let mut memory = DialogueMemory::new();
        let bus = NotificationBus::default();
        let mut rx = bus.subscribe();

        let turn = engine.respond("我好累", &persona, &mut memory, None, &bus).await;

        assert_eq!(turn.emotion, classify("我好累"));
        assert_eq!(turn.reply, "我收到了你的消息：我好累");
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.snapshot()[0].role, Speaker::User);

        let notices = drain(&mut rx);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Warning);
        assert_eq!(notices[0].message, "请先配置API设置！");
    }

    #[tokio::test]
    async fn test_unauthorized_matches_unconfigured_except_notice() {
        let persona = Persona::default_companion();
        let input = "为什么天是蓝的";

        let unconfigured = engine_with(None);
        let mut memory_a = DialogueMemory::new();
        let bus_a = NotificationBus::default();
        let mut rx_a = bus_a.subscribe();
        let turn_a = unconfigured
            .respond(input, &persona, &mut memory_a, None, &bus_a)
            .await;

        let rejected = engine_with(Some(MockProvider::failing(LlmError::Unauthorized)));
        let mut memory_b = DialogueMemory::new();
        let bus_b = NotificationBus::default();
        let mut rx_b = bus_b.subscribe();
        let turn_b = rejected
            .respond(input, &persona, &mut memory_b, None, &bus_b)
            .await;

        assert_eq!(turn_a.reply, turn_b.reply);
        assert_eq!(turn_a.emotion, turn_b.emotion);
        assert_eq!(turn_b.emotion, EmotionLabel::Confused);
        assert_eq!(memory_a.snapshot(), memory_b.snapshot());

        let notice_a = drain(&mut rx_a).remove(0);
        let notice_b = drain(&mut rx_b).remove(0);
        assert_ne!(notice_a.message, notice_b.message);
        assert!(notice_b.message.contains("API密钥无效"));
    }

    #[tokio::test]
    async fn test_empty_reply_is_malformed() {
        let engine = engine_with(Some(MockProvider::replying("")));
        let persona = Persona::default_companion();
        let mut memory = DialogueMemory::new();
        let bus = NotificationBus::default();
        let mut rx = bus.subscribe();

        let turn = engine.respond("hi", &persona, &mut memory, None, &bus).await;

        assert_eq!(turn.reply, "我收到了你的消息：hi");
        assert_eq!(memory.len(), 1);
        assert!(drain(&mut rx)[0].message.contains("API响应格式错误"));
    }

    #[tokio::test]
    async fn test_memory_cap_holds_across_turns() {
        let engine = engine_with(Some(MockProvider::replying("好的")));
        let persona = Persona::default_companion();
        let mut memory = DialogueMemory::new();
        let bus = NotificationBus::default();

        for i in 0..8 {
            engine
                .respond(&format!("第{i}句"), &persona, &mut memory, None, &bus)
                .await;
        }
        assert_eq!(memory.len(), crate::chat::memory::MAX_MEMORY);
        assert_eq!(memory.snapshot().last().unwrap().content, "好的");
    }
}
