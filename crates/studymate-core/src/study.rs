//! Study helpers that share the chat endpoint: translation, chapter
//! commentary, Markdown rendering and a connection probe.
//!
//! Like the chat pipeline, none of these fail to the caller. Failures are
//! reported through the notification sink and a substitute result is
//! returned where one exists.

use studymate_types::config::ApiConfig;
use studymate_types::document::Chapter;
use studymate_types::llm::{CompletionRequest, LlmError, Message};
use studymate_types::notification::{Notification, Severity};
use studymate_types::study::AnalysisItem;

use crate::document::render_markdown;
use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::complete_text;
use crate::notify::NotificationSink;

const TRANSLATE_PROMPT: &str =
    "你是一个专业的翻译助手，请将输入的中文文本翻译成英文。只返回翻译结果，不要包含任何其他说明或解释。";
const ANALYZE_PROMPT: &str = "你是一个AI吐槽助手，擅长对文章章节进行有趣的分析和吐槽。请根据输入的章节内容，生成有趣、有见解的吐槽和分析。";
const MARKDOWN_PROMPT: &str = "你是一个MARKDOWN处理器，请将输入的MARKDOWN文本转换为HTML格式。只返回转换后的HTML代码，不要包含任何其他说明或解释。";
const PROBE_PROMPT: &str = "你是一个API测试助手，只需要返回\"API测试成功\"即可。";

const MISSING_CONFIG_NOTICE: &str = "请先配置API设置！";

/// Remote study utilities. `provider` is `None` when unconfigured.
pub struct StudyAssistant {
    provider: Option<BoxLlmProvider>,
    model: String,
}

impl StudyAssistant {
    pub fn new(provider: Option<BoxLlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Translate a chapter body to English and store it on the chapter.
    ///
    /// Returns whether a translation was stored. The chapter is untouched on
    /// failure.
    pub async fn translate_chapter(&self, chapter: &mut Chapter, sink: &dyn NotificationSink) -> bool {
        let Some(provider) = &self.provider else {
            sink.notify(Notification::warning(MISSING_CONFIG_NOTICE));
            return false;
        };
        let request = self.request(
            TRANSLATE_PROMPT,
            format!("请将以下文本翻译成英文：\n\n{}", chapter.text),
            0.1,
            2000,
        );

        match complete_text(provider, "translate", &request).await {
            Ok(translation) => {
                chapter.translation = Some(translation);
                sink.notify(Notification::success("翻译成功！"));
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, chapter = %chapter.title, "translation failed");
                sink.notify(Notification::error(format!("翻译失败：{}", err.notice())));
                false
            }
        }
    }

    /// Humorous commentary on a chapter. Always returns at least one item.
    pub async fn analyze_chapter(
        &self,
        chapter: &Chapter,
        sink: &dyn NotificationSink,
    ) -> Vec<AnalysisItem> {
        let Some(provider) = &self.provider else {
            sink.notify(Notification::warning(MISSING_CONFIG_NOTICE));
            return vec![AnalysisItem::new(
                "默认分析",
                "这是一个默认的章节分析结果。",
                Severity::Info,
            )];
        };
        let request = self.request(
            ANALYZE_PROMPT,
            format!(
                "请分析以下章节内容并生成有趣的吐槽：\n\n章节标题：{}\n\n章节内容：{}",
                chapter.title, chapter.text
            ),
            0.8,
            1000,
        );

        match complete_text(provider, "analyze", &request).await {
            Ok(content) => vec![AnalysisItem::new("AI吐槽", content, Severity::Info)],
            Err(err) => {
                tracing::warn!(error = %err, chapter = %chapter.title, "analysis failed");
                sink.notify(Notification::error(err.notice()));
                vec![AnalysisItem::new(
                    "默认分析",
                    "API调用失败，无法生成分析结果。",
                    Severity::Error,
                )]
            }
        }
    }

    /// Convert Markdown to HTML, remotely when possible and with the local
    /// rules otherwise. `None` for blank input.
    pub async fn render_markdown(&self, markdown: &str, sink: &dyn NotificationSink) -> Option<String> {
        if markdown.trim().is_empty() {
            sink.notify(Notification::warning("请输入MARKDOWN内容！"));
            return None;
        }
        let Some(provider) = &self.provider else {
            return Some(render_markdown(markdown));
        };
        let request = self.request(MARKDOWN_PROMPT, markdown.to_string(), 0.1, 2000);

        match complete_text(provider, "markdown", &request).await {
            Ok(html) => Some(html),
            Err(err) => {
                tracing::warn!(error = %err, "remote markdown rendering failed, using local rules");
                sink.notify(Notification::warning(format!(
                    "{}，已使用本地转换",
                    err.notice()
                )));
                Some(render_markdown(markdown))
            }
        }
    }

    /// Send a minimal request to check credentials and endpoint.
    pub async fn test_connection(&self, config: &ApiConfig, sink: &dyn NotificationSink) -> bool {
        let Some(provider) = &self.provider else {
            sink.notify(Notification::warning(MISSING_CONFIG_NOTICE));
            return false;
        };
        let request = self.request(PROBE_PROMPT, "测试API连接".to_string(), 0.1, 50);

        match complete_text(provider, "probe", &request).await {
            Ok(_) => {
                sink.notify(Notification::success(format!(
                    "API测试成功！\n配置名称：{}\nAPI端点：{}",
                    config.name, config.endpoint
                )));
                true
            }
            Err(err) => {
                sink.notify(Notification::error(probe_failure(&err)));
                false
            }
        }
    }

    fn request(
        &self,
        system: &str,
        user: String,
        temperature: f64,
        max_tokens: u32,
    ) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::system(system), Message::user(user)],
            max_tokens,
            temperature: Some(temperature),
        }
    }
}

fn probe_failure(err: &LlmError) -> String {
    format!("API测试失败：{}", err.notice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{drain, NotificationBus};
    use crate::testing::MockProvider;

    fn assistant(mock: MockProvider) -> StudyAssistant {
        StudyAssistant::new(Some(BoxLlmProvider::new(mock)), "deepseek-chat")
    }

    #[tokio::test]
    async fn test_translate_stores_translation() {
        let mock = MockProvider::replying("The weather is nice today.");
        let requests = mock.requests();
        let study = assistant(mock);
        let bus = NotificationBus::default();
        let mut rx = bus.subscribe();
        let mut chapter = Chapter::new("第一章", "今天天气很好");

        assert!(study.translate_chapter(&mut chapter, &bus).await);
        assert_eq!(chapter.translation.as_deref(), Some("The weather is nice today."));
        assert_eq!(drain(&mut rx)[0].message, "翻译成功！");

        let request = &requests.lock().unwrap()[0];
        assert_eq!(request.temperature, Some(0.1));
        assert_eq!(request.max_tokens, 2000);
        assert!(request.messages[1].content.ends_with("今天天气很好"));
    }

    #[tokio::test]
    async fn test_translate_failure_leaves_chapter() {
        let study = assistant(MockProvider::failing(LlmError::Forbidden));
        let bus = NotificationBus::default();
        let mut rx = bus.subscribe();
        let mut chapter = Chapter::new("第一章", "正文");

        assert!(!study.translate_chapter(&mut chapter, &bus).await);
        assert!(chapter.translation.is_none());
        assert!(drain(&mut rx)[0].message.starts_with("翻译失败："));
    }

    #[tokio::test]
    async fn test_analyze_without_provider_returns_default() {
        let study = StudyAssistant::new(None, "deepseek-chat");
        let bus = NotificationBus::default();
        let items = study.analyze_chapter(&Chapter::new("t", "x"), &bus).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "默认分析");
        assert_eq!(items[0].kind, Severity::Info);
    }

    #[tokio::test]
    async fn test_analyze_success_and_failure() {
        let bus = NotificationBus::default();
        let chapter = Chapter::new("第一章", "正文");

        let ok = assistant(MockProvider::replying("吐槽内容"))
            .analyze_chapter(&chapter, &bus)
            .await;
        assert_eq!(ok[0], AnalysisItem::new("AI吐槽", "吐槽内容", Severity::Info));

        let failed = assistant(MockProvider::failing(LlmError::InternalServerError))
            .analyze_chapter(&chapter, &bus)
            .await;
        assert_eq!(failed[0].kind, Severity::Error);
    }

    #[tokio::test]
    async fn test_markdown_blank_input() {
        let study = StudyAssistant::new(None, "deepseek-chat");
        let bus = NotificationBus::default();
        assert!(study.render_markdown("  ", &bus).await.is_none());
    }

    #[tokio::test]
    async fn test_markdown_falls_back_to_local_rules() {
        let bus = NotificationBus::default();
        let offline = StudyAssistant::new(None, "deepseek-chat");
        assert_eq!(offline.render_markdown("# 标题", &bus).await.unwrap(), "<h1>标题</h1>");

        let failing = assistant(MockProvider::failing(LlmError::Unreachable("dns".into())));
        assert_eq!(failing.render_markdown("# 标题", &bus).await.unwrap(), "<h1>标题</h1>");

        let remote = assistant(MockProvider::replying("<h1>远程</h1>"));
        assert_eq!(remote.render_markdown("# 标题", &bus).await.unwrap(), "<h1>远程</h1>");
    }

    #[tokio::test]
    async fn test_connection_probe() {
        let config = ApiConfig {
            api_key: Some("sk".to_string()),
            ..ApiConfig::default()
        };
        let bus = NotificationBus::default();
        let mut rx = bus.subscribe();

        let mock = MockProvider::replying("API测试成功");
        let requests = mock.requests();
        assert!(assistant(mock).test_connection(&config, &bus).await);
        assert_eq!(requests.lock().unwrap()[0].max_tokens, 50);
        let notice = drain(&mut rx).remove(0);
        assert!(notice.message.contains("API端点：https://api.deepseek.com/v1"));

        let failing = assistant(MockProvider::failing(LlmError::Unauthorized));
        assert!(!failing.test_connection(&config, &bus).await);
        assert!(drain(&mut rx)[0].message.starts_with("API测试失败："));
    }
}
