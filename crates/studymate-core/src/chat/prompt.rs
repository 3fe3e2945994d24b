//! Request assembly for a companion turn.
//!
//! Order: one system instruction (persona plus optional chapter context),
//! the memory window replayed oldest-first, then the new user utterance.

use studymate_types::document::Chapter;
use studymate_types::llm::Message;
use studymate_types::persona::Persona;

use super::memory::DialogueMemory;

const EMOTION_INSTRUCTIONS: &str = "\n\n重要要求：\n\
1. 请根据对话上下文判断你的情绪状态\n\
2. 如果用户直接要求你展示某个表情，请响应并表现出该表情\n\
3. 在响应的最后，请用英文方括号[]括起来标注你的情绪状态，例如：[开心]、[难过]、[惊讶]等\n\
4. 情绪状态应该符合你的性格和当前对话情境";

/// System instruction embedding the persona and, if present, the chapter
/// currently being studied.
pub fn build_system_prompt(persona: &Persona, chapter: Option<&Chapter>) -> String {
    let mut prompt = format!("你是{}，{}", persona.name, persona.personality);
    if let Some(chapter) = chapter {
        prompt.push_str(&format!(
            "\n\n【当前学习章节】\n标题：{}\n内容：{}",
            chapter.title, chapter.text
        ));
    }
    prompt.push_str(EMOTION_INSTRUCTIONS);
    prompt
}

/// Full message list for one turn.
pub fn build_messages(
    persona: &Persona,
    memory: &DialogueMemory,
    chapter: Option<&Chapter>,
    user_text: &str,
) -> Vec<Message> {
    let mut messages = Vec::with_capacity(memory.len() + 2);
    messages.push(Message::system(build_system_prompt(persona, chapter)));
    messages.extend(memory.iter().map(Message::from));
    messages.push(Message::user(user_text));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use studymate_types::chat::Utterance;
    use studymate_types::llm::MessageRole;

    #[test]
    fn test_system_prompt_without_chapter() {
        let persona = Persona::new("小月", "温柔");
        let prompt = build_system_prompt(&persona, None);
        assert!(prompt.starts_with("你是小月，温柔\n\n重要要求："));
        assert!(!prompt.contains("当前学习章节"));
    }

    #[test]
    fn test_system_prompt_with_chapter() {
        let persona = Persona::new("小月", "温柔");
        let chapter = Chapter::new("第一章 开始", "今天天气很好");
        let prompt = build_system_prompt(&persona, Some(&chapter));
        assert!(prompt.contains("【当前学习章节】\n标题：第一章 开始\n内容：今天天气很好"));
        assert!(prompt.ends_with("当前对话情境"));
    }

    #[test]
    fn test_message_order() {
        let persona = Persona::new("小月", "温柔");
        let mut memory = DialogueMemory::new();
        memory.append(Utterance::user("早"));
        memory.append(Utterance::assistant("早上好"));

        let messages = build_messages(&persona, &memory, None, "今天学什么");
        let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User
            ]
        );
        assert_eq!(messages.last().unwrap().content, "今天学什么");
    }
}
