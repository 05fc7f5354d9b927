//! Answer clean-up applied after generation

use super::Personality;

const DECEPTIVE_MAX_CHARS: usize = 80;
const DEFAULT_MAX_CHARS: usize = 300;
/// How far back from the limit to look for a sentence ending
const CUT_WINDOW: usize = 30;
const SENTENCE_ENDINGS: &[char] = &['。', '！', '？', '.', ',', '!', '?'];
const AI_MARKER_PHRASES: &[&str] = &["我认为", "综上所述", "总的来说", "首先", "其次", "因此"];

pub fn max_chars(personality: Personality) -> usize {
    match personality {
        Personality::Deceptive => DECEPTIVE_MAX_CHARS,
        _ => DEFAULT_MAX_CHARS,
    }
}

/// Shorten overly long answers and, for the deceptive personality, strip the
/// phrases that make text read machine-written.
pub fn post_process(answer: &str, personality: Personality) -> String {
    let mut answer = truncate(answer, max_chars(personality));

    if personality == Personality::Deceptive {
        for phrase in AI_MARKER_PHRASES {
            answer = answer.replace(phrase, "");
        }
        answer = answer.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    answer.trim().to_string()
}

/// Limits count chars, not bytes. Keeps the punctuation mark it cuts after.
fn truncate(answer: &str, max_len: usize) -> String {
    let chars: Vec<char> = answer.chars().collect();
    if chars.len() <= max_len {
        return answer.to_string();
    }

    let floor = max_len.saturating_sub(CUT_WINDOW);
    let cut = (floor + 1..=max_len)
        .rev()
        .find(|&i| SENTENCE_ENDINGS.contains(&chars[i]));

    match cut {
        Some(i) => chars[..=i].iter().collect(),
        None => {
            let mut head: String = chars[..max_len].iter().collect();
            head.push_str("...");
            head
        }
    }
}
