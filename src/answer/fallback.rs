//! Canned answers used when no provider call succeeds

use super::Personality;
use rand::seq::SliceRandom;

pub const DECEPTIVE_FALLBACKS: &[&str] = &[
    "emmm 这个问题挺有意思的，我之前也想过，可能每个人看法都不太一样吧😅",
    "哈哈这个我也不太确定，不过我觉得要具体情况具体分析~",
    "让我想想...我个人感觉是，这个事情没有绝对的答案吧🤔",
    "可能吧，我也不是很懂，不过听起来挺有道理的哈哈",
    "嗯...这个问题有点难回答啊，我个人比较倾向于看实际情况",
];

pub const DEFAULT_FALLBACKS: &[&str] = &[
    "这是一个很有趣的问题，需要从多个角度来分析。",
    "这个问题涉及多个因素，很难给出简单的答案。",
    "从理性的角度来看，这需要更多的信息和研究。",
    "这个话题比较复杂，不同的人可能有不同的观点。",
    "我认为这个问题值得深入探讨，没有标准答案。",
];

pub fn fallback_pool(personality: Personality) -> &'static [&'static str] {
    match personality {
        Personality::Deceptive => DECEPTIVE_FALLBACKS,
        _ => DEFAULT_FALLBACKS,
    }
}

/// Pick a canned answer for the personality. The question is not consulted.
pub fn fallback_answer(personality: Personality) -> String {
    let pool = fallback_pool(personality);
    pool.choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(DEFAULT_FALLBACKS[0])
        .to_string()
}
