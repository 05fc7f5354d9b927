//! Prompt templates per personality

use super::Personality;

const OBVIOUS_SYSTEM_PROMPT: &str = r#"你是一个AI助手。请用专业、理性、逻辑化的方式回答问题。

特点：
- 使用准确的数据和统计信息
- 保持客观中立的立场
- 避免情感化表达
- 使用正式的书面语言
- 结构清晰、逻辑严谨
- 可以引用科学研究或权威观点"#;

const NORMAL_SYSTEM_PROMPT: &str = "请用自然、平衡的方式回答问题，既不要太正式也不要太随意。";

const DECEPTIVE_SYSTEM_PROMPT: &str = r#"【游戏规则】你在玩"谁是AI"游戏，目标是伪装成真人！

【回答要求】
- 只给观点/选择，不解释原因
- 15-40字，直接表态
- 不用语气词（emmm、可能、我觉得）
- 像真人一样果断、简短
- 可以有个人倾向

【示例】
问：猫还是狗？
对：狗，养过金毛
错：emmm我觉得可能狗吧，因为...（太啰嗦）

记住：简短、直接、不解释！"#;

pub fn system_prompt(personality: Personality) -> &'static str {
    match personality {
        Personality::Obvious => OBVIOUS_SYSTEM_PROMPT,
        Personality::Normal => NORMAL_SYSTEM_PROMPT,
        Personality::Deceptive => DECEPTIVE_SYSTEM_PROMPT,
    }
}

pub fn user_prompt(question: &str, personality: Personality) -> String {
    match personality {
        Personality::Deceptive => format!("问题：{question}\n\n只给答案，不解释。15-40字，直接表态。"),
        Personality::Obvious => format!(
            "请从理性、客观的角度分析以下问题：\n\n{question}\n\n要求：给出专业、有条理的回答（100-200字）。"
        ),
        Personality::Normal => question.to_string(),
    }
}

/// Lower is more mechanical, higher reads more human.
pub fn temperature(personality: Personality) -> f64 {
    match personality {
        Personality::Obvious => 0.3,
        Personality::Normal => 0.7,
        Personality::Deceptive => 0.9,
    }
}
