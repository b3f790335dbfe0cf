//! Text chunking for length-limited TTS providers
//!
//! Splits text into pieces of at most `max_chars` characters. A piece ends
//! after the last sentence/clause punctuation in the second half of the
//! window, else after the last whitespace, else at the limit. Grapheme
//! clusters are never split.

use unicode_segmentation::UnicodeSegmentation;

const BREAK_PUNCTUATION: &[&str] = &[
    ".", "!", "?", ",", ";", ":", "…", "。", "！", "？", "，", "、", "；", "\n",
];

/// Splits text into provider-sized chunks
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    max_chars: usize,
}

impl TextChunker {
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(1),
        }
    }

    /// Split `text` into trimmed, non-empty chunks, in order
    pub fn split(&self, text: &str) -> Vec<String> {
        let graphemes: Vec<&str> = text.trim().graphemes(true).collect();
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < graphemes.len() {
            let end = self.window_end(&graphemes, start);
            let cut = if end == graphemes.len() {
                end
            } else {
                find_break(&graphemes[start..end], graphemes[end]).map_or(end, |i| start + i)
            };

            let piece = graphemes[start..cut].concat();
            let piece = piece.trim();
            if !piece.is_empty() {
                chunks.push(piece.to_string());
            }
            start = cut;
        }

        chunks
    }

    /// Largest end index such that `graphemes[start..end]` fits the limit.
    /// Always advances by at least one grapheme.
    fn window_end(&self, graphemes: &[&str], start: usize) -> usize {
        let mut end = start;
        let mut chars = 0;
        while end < graphemes.len() {
            let n = graphemes[end].chars().count();
            if chars + n > self.max_chars && end > start {
                break;
            }
            chars += n;
            end += 1;
        }
        end
    }
}

/// Cut position (exclusive) inside `window`: after the last punctuation
/// if it leaves at least half the window, else at the window end when
/// `next` is whitespace, else after the last whitespace
fn find_break(window: &[&str], next: &str) -> Option<usize> {
    if let Some(i) = window.iter().rposition(|g| BREAK_PUNCTUATION.contains(g)) {
        if (i + 1) * 2 >= window.len() {
            return Some(i + 1);
        }
    }
    if next.trim().is_empty() {
        return Some(window.len());
    }
    window
        .iter()
        .rposition(|g| g.trim().is_empty())
        .map(|i| i + 1)
}
