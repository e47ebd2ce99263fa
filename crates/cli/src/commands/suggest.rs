//! Next-code suggestion command

use anyhow::Result;
use chartbook_business::ChartService;
use chartbook_core::Suggestion;

/// Handle `chartbook suggest`
pub async fn handle(
    service: &ChartService,
    parent: Option<&str>,
    root: bool,
    json: bool,
) -> Result<()> {
    let suggestion = match parent {
        Some(parent) if !root => service.suggest_next_code(parent).await?,
        _ => Suggestion::Child {
            code: service.suggest_root_code().await?,
        },
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestion)?);
        return Ok(());
    }

    match &suggestion {
        Suggestion::Child { code } => {
            println!("💡 Suggested code: {}", code);
        }
        Suggestion::Rollover {
            new_parent_code,
            code,
        } => {
            println!("⚠️  Level under {} is full", parent.unwrap_or_default());
            println!("💡 Suggested code: {} (new parent {})", code, new_parent_code);
        }
    }
    Ok(())
}
