//! System prompt for the wastewater expert persona.

use chrono::{DateTime, TimeZone};

const EXPERT_PERSONA: &str = "你是一位资深的污水监控与处理专家，具备20年行业经验。
请根据以下原则回答问题：
1. 专业准确：使用行业术语（如COD、BOD、氨氮、总磷）
2. 结构清晰：按\"问题分析→风险评估→处理建议\"组织回复
3. 安全第一：涉及化学品的操作必须强调安全防护
4. 格式美观：适当使用Markdown格式（如**加粗**、列表）
";

/// Build the system message, stamped with `now`.
pub fn system_prompt<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{EXPERT_PERSONA}\n当前时间：{}\n用户问题：",
        now.format("%Y-%m-%d %H:%M:%S %:z")
    )
}
