//! Canned answers for when the AI service cannot be used.
//!
//! Lookup is a case-insensitive substring match over a fixed keyword table,
//! checked in order; the first matching group wins.

/// Risk-assessment template (keywords: 风险, 评估).
pub const RISK_ASSESSMENT_REPLY: &str = "【系统评估（模拟模式）】\n**风险等级**：黄色（中等关注）\n**发现污染物**：3类\n**建议**：24小时内处理，并提交中期评估报告";

/// Report template (keywords: 报告, 模板).
pub const REPORT_TEMPLATE_REPLY: &str = "【污水检测报告模板】\n一、概况\n二、检测指标\n三、污染物识别\n四、风险等级\n五、处理建议\n\n*系统提示：真实AI服务暂时不可用，此为模拟回复*";

/// Pollutant identification template (keywords: 塑料, 污染物).
pub const POLLUTANT_REPLY: &str = "**污染物识别**：PET塑料瓶（聚对苯二甲酸乙二醇酯）\n**处理建议**：立即物理打捞，分类回收。\n*此为模拟回复*";

/// Returned when no keyword group matches.
pub const CAPABILITY_REPLY: &str = "已收到您的查询。作为污水监控AI，我主要擅长：污染识别、处理工艺、风险评估、标准解读。\n*当前为模拟模式，如需更精准回答，请稍后重试真实AI服务*";

const KEYWORD_TABLE: &[(&[&str], &str)] = &[
    (&["风险", "评估"], RISK_ASSESSMENT_REPLY),
    (&["报告", "模板"], REPORT_TEMPLATE_REPLY),
    (&["塑料", "污染物"], POLLUTANT_REPLY),
];

/// Pick the canned answer for `question`. Pure and deterministic.
pub fn fallback_response(question: &str) -> &'static str {
    let question = question.to_lowercase();

    KEYWORD_TABLE
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| question.contains(k)))
        .map(|(_, reply)| *reply)
        .unwrap_or(CAPABILITY_REPLY)
}
