//! Language resolution for chat and speech requests
//!
//! The server commits to one of three reply languages (Korean, English,
//! Vietnamese). A caller-supplied hint always wins; otherwise the text is
//! classified by script and the detected code is folded into the closed set,
//! with English as the default for anything inconclusive.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Reply language committed to for templating and provider hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LanguageTag {
    #[serde(rename = "ko")]
    Korean,
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "vi")]
    Vietnamese,
}

impl LanguageTag {
    /// Two-letter code sent to providers and returned to callers
    pub fn code(&self) -> &'static str {
        match self {
            Self::Korean => "ko",
            Self::English => "en",
            Self::Vietnamese => "vi",
        }
    }

    /// Human-readable name, used inside prompts
    pub fn name(&self) -> &'static str {
        match self {
            Self::Korean => "Korean",
            Self::English => "English",
            Self::Vietnamese => "Vietnamese",
        }
    }

    /// Parse a caller hint. Only the exact supported codes are accepted,
    /// after trimming and lowercasing.
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint.trim().to_lowercase().as_str() {
            "ko" => Some(Self::Korean),
            "en" => Some(Self::English),
            "vi" => Some(Self::Vietnamese),
            _ => None,
        }
    }

    /// Fold a detector code (possibly with a region suffix) into a tag
    pub fn from_detected_code(code: &str) -> Self {
        let code = code.trim().to_lowercase();
        if code.starts_with("ko") {
            Self::Korean
        } else if code.starts_with("vi") {
            Self::Vietnamese
        } else {
            Self::English
        }
    }

    pub fn all() -> &'static [LanguageTag] {
        &[Self::Korean, Self::English, Self::Vietnamese]
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Writing systems the detector can tell apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Hangul,
    Kana,
    Han,
    Cyrillic,
    Arabic,
    Thai,
    Devanagari,
    Latin,
}

impl Script {
    /// Classify a single character, `None` for digits, punctuation and
    /// scripts we do not track
    pub fn of(c: char) -> Option<Self> {
        match c {
            '\u{AC00}'..='\u{D7A3}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}' => {
                Some(Self::Hangul)
            }
            '\u{3040}'..='\u{30FF}' => Some(Self::Kana),
            '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' => Some(Self::Han),
            '\u{0400}'..='\u{04FF}' => Some(Self::Cyrillic),
            '\u{0600}'..='\u{06FF}' => Some(Self::Arabic),
            '\u{0E00}'..='\u{0E7F}' => Some(Self::Thai),
            '\u{0900}'..='\u{097F}' => Some(Self::Devanagari),
            c if c.is_ascii_alphabetic() => Some(Self::Latin),
            '\u{00C0}'..='\u{024F}' | '\u{1E00}'..='\u{1EFF}' if c.is_alphabetic() => {
                Some(Self::Latin)
            }
            _ => None,
        }
    }
}

/// Letters that only occur in Vietnamese among Latin-script languages
fn is_vietnamese_letter(c: char) -> bool {
    matches!(
        c,
        'ă' | 'Ă' | 'đ' | 'Đ' | 'ơ' | 'Ơ' | 'ư' | 'Ư' | 'ĩ' | 'Ĩ' | 'ũ' | 'Ũ' | '\u{1EA0}'..='\u{1EF9}'
    )
}

/// Frequent Vietnamese function words and pronouns. Several use only the
/// accented vowels Vietnamese shares with French and Portuguese.
const VIETNAMESE_WORDS: &[&str] = &[
    "tôi", "là", "và", "không", "của", "em", "anh", "chị", "bạn", "có", "này", "được",
    "người", "một", "với", "rất", "gì", "nhé", "chúng", "những", "đi", "yêu", "nhiều",
    "hôm", "vâng", "chào", "cảm", "ơn", "cũng", "lắm", "thì", "mà", "ở",
];

/// Per-script letter counts for one text, plus Vietnamese evidence
#[derive(Debug, Default)]
struct ScriptTally {
    counts: [usize; 8],
    vietnamese: usize,
    words: usize,
    accented_words: usize,
    vietnamese_words: usize,
}

impl ScriptTally {
    const ORDER: [Script; 8] = [
        Script::Hangul,
        Script::Kana,
        Script::Han,
        Script::Cyrillic,
        Script::Arabic,
        Script::Thai,
        Script::Devanagari,
        Script::Latin,
    ];

    fn from_text(text: &str) -> Self {
        let mut tally = Self::default();
        for c in text.chars() {
            if let Some(script) = Script::of(c) {
                let idx = Self::ORDER.iter().position(|s| *s == script).unwrap_or(7);
                tally.counts[idx] += 1;
            }
            if is_vietnamese_letter(c) {
                tally.vietnamese += 1;
            }
        }

        for word in text.split(|c: char| !c.is_alphabetic()).filter(|w| !w.is_empty()) {
            tally.words += 1;
            if !word.is_ascii() {
                tally.accented_words += 1;
            }
            if VIETNAMESE_WORDS.contains(&word.to_lowercase().as_str()) {
                tally.vietnamese_words += 1;
            }
        }
        tally
    }

    /// Latin text reads as Vietnamese when it has a Vietnamese-only letter,
    /// or accented text with common Vietnamese words: two of them, or one
    /// when at least half the words carry accents
    fn is_vietnamese(&self) -> bool {
        if self.vietnamese > 0 {
            return true;
        }
        if self.vietnamese_words == 0 || self.accented_words == 0 {
            return false;
        }
        self.vietnamese_words >= 2 || self.accented_words * 2 >= self.words
    }

    fn count(&self, script: Script) -> usize {
        Self::ORDER
            .iter()
            .position(|s| *s == script)
            .map(|idx| self.counts[idx])
            .unwrap_or(0)
    }

    /// Script with the most letters; earlier entries in `ORDER` win ties
    fn dominant(&self) -> Option<Script> {
        let mut best: Option<(Script, usize)> = None;
        for (script, count) in Self::ORDER.iter().zip(self.counts.iter()) {
            if *count == 0 {
                continue;
            }
            match best {
                Some((_, best_count)) if *count <= best_count => {}
                _ => best = Some((*script, *count)),
            }
        }
        best.map(|(script, _)| script)
    }
}

/// Detect the language of `text` and return a detector code
///
/// Codes follow ISO 639-1 where possible (`ko`, `ja`, `ru`, `vi`, `en`...),
/// with `zh-cn` for Han-only text. Classification is purely a function of the
/// characters and words present, so the same input always yields the same
/// code.
pub fn detect(text: &str) -> Result<&'static str> {
    let tally = ScriptTally::from_text(text);
    let dominant = tally
        .dominant()
        .ok_or_else(|| Error::Detection("no alphabetic characters to classify".to_string()))?;

    let code = match dominant {
        Script::Hangul => "ko",
        Script::Kana => "ja",
        Script::Han if tally.count(Script::Kana) > 0 => "ja",
        Script::Han => "zh-cn",
        Script::Cyrillic => "ru",
        Script::Arabic => "ar",
        Script::Thai => "th",
        Script::Devanagari => "hi",
        Script::Latin if tally.is_vietnamese() => "vi",
        Script::Latin => "en",
    };
    Ok(code)
}

/// Resolve the reply language for `text`
///
/// A supported hint overrides detection. Detection failures and codes
/// outside the supported set resolve to English. Never fails.
pub fn resolve(text: &str, hint: Option<&str>) -> LanguageTag {
    if let Some(tag) = hint.and_then(LanguageTag::from_hint) {
        return tag;
    }

    match detect(text) {
        Ok(code) => LanguageTag::from_detected_code(code),
        Err(e) => {
            tracing::debug!(error = %e, "Language detection inconclusive, using English");
            LanguageTag::English
        }
    }
}
