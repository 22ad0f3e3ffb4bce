//! One-shot question to the AI gateway from the terminal.

use anyhow::Result;
use console::style;

use sewage_types::ai::AiQuery;

use crate::state::AppState;

/// Run the gateway once and print the answer with its source.
pub async fn ask(state: &AppState, question: &str, json: bool) -> Result<()> {
    let query = AiQuery::parse(Some(question))?;
    let answer = state.gateway.get_reply(&query).await;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "answer": answer.text,
                "source": answer.source,
                "response_time_ms": answer.latency_ms,
            }))?
        );
        return Ok(());
    }

    let source = if answer.is_fallback() {
        style(answer.source.as_str()).yellow()
    } else {
        style(answer.source.as_str()).green()
    };

    println!();
    println!("{}", answer.text);
    println!();
    println!(
        "  {} {} {}",
        style("source:").dim(),
        source,
        style(format!("({} ms)", answer.latency_ms)).dim()
    );
    println!();

    Ok(())
}
