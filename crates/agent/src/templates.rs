//! Fixed reply texts per language

use companion_core::LanguageTag;

/// Reply to an empty message
pub fn conversation_starter(language: LanguageTag) -> &'static str {
    match language {
        LanguageTag::Korean => "무슨 얘기부터 시작해볼까? 오늘 기분은 어때?",
        LanguageTag::English => "What should we talk about first? How are you feeling today?",
        LanguageTag::Vietnamese => "Mình nói chuyện gì trước nhé? Hôm nay bạn thấy thế nào?",
    }
}

/// Question appended to model replies that don't already ask one
pub fn follow_up_question(language: LanguageTag) -> &'static str {
    match language {
        LanguageTag::Korean => "너 생각은 어때?",
        LanguageTag::English => "What do you think?",
        LanguageTag::Vietnamese => "Bạn nghĩ sao?",
    }
}

/// Deterministic reply used when the completion provider is unavailable.
/// `message` is embedded verbatim.
pub fn fallback_reply(message: &str, language: LanguageTag) -> String {
    match language {
        LanguageTag::Korean => format!(
            "\"{}\"라고 했구나. 지금은 간단 모드로 대화하고 있어. 조금 더 얘기해 줄래?",
            message
        ),
        LanguageTag::English => format!(
            "I heard you say \"{}\". I'm in a simplified mode right now. Want to tell me a bit more?",
            message
        ),
        LanguageTag::Vietnamese => format!(
            "Mình nghe bạn nói \"{}\". Hiện mình đang ở chế độ đơn giản. Bạn kể thêm chút nữa nhé?",
            message
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_embeds_message_verbatim() {
        for lang in LanguageTag::all() {
            let reply = fallback_reply("  오늘\n피곤해 ", *lang);
            assert!(reply.contains("  오늘\n피곤해 "));
        }
    }

    #[test]
    fn test_fixed_texts_are_non_empty() {
        for lang in LanguageTag::all() {
            assert!(!conversation_starter(*lang).is_empty());
            assert!(follow_up_question(*lang).ends_with('?'));
        }
    }
}
