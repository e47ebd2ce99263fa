//! Account management commands

use anyhow::Result;
use chartbook_business::ChartService;
use chartbook_core::{Account, NewAccount};

use crate::AccountAction;

/// Handle account subcommands
pub async fn handle(service: &ChartService, action: AccountAction, json: bool) -> Result<()> {
    match action {
        AccountAction::Create {
            code,
            name,
            r#type,
            posting,
        } => {
            let account = service
                .create_account(NewAccount::new(code, name, r#type, posting))
                .await?;
            print_account("✅ Created account", &account, json)?;
        }
        AccountAction::List { tree } => {
            let accounts = service.list_accounts().await?;
            list_accounts(&accounts, tree, json)?;
        }
        AccountAction::Show { id } => {
            let account = service.get_account(id).await?;
            print_account("📄 Account", &account, json)?;
        }
        AccountAction::Update {
            id,
            code,
            name,
            r#type,
            posting,
        } => {
            let mut account = service.get_account(id).await?;
            if let Some(code) = code {
                account.code = code;
            }
            if let Some(name) = name {
                account.name = name;
            }
            if let Some(account_type) = r#type {
                account.account_type = account_type;
            }
            if let Some(posting) = posting {
                account.accepts_entries = posting;
            }

            let account = service.update_account(id, account).await?;
            print_account("✅ Updated account", &account, json)?;
        }
        AccountAction::Delete { id } => {
            let account = service.delete_account(id).await?;
            print_account("🗑️  Deleted account", &account, json)?;
        }
    }

    Ok(())
}

fn print_account(title: &str, account: &Account, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(account)?);
        return Ok(());
    }

    println!("{}:", title);
    println!("   ID:       {}", account.id);
    println!("   Code:     {}", account.code);
    println!("   Name:     {}", account.name);
    println!("   Type:     {}", account.account_type);
    println!("   Postings: {}", if account.accepts_entries { "yes" } else { "no" });
    Ok(())
}

fn list_accounts(accounts: &[Account], tree: bool, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(accounts)?);
        return Ok(());
    }

    if accounts.is_empty() {
        println!("No accounts found.");
        return Ok(());
    }

    if tree {
        for account in accounts {
            let indent = "  ".repeat(account.depth().saturating_sub(1));
            println!("{}{}", indent, account);
        }
        return Ok(());
    }

    println!(
        "{:<6} {:<14} {:<30} {:<12} {}",
        "ID", "CODE", "NAME", "TYPE", "POSTING"
    );
    println!("{}", "-".repeat(72));
    for account in accounts {
        println!(
            "{:<6} {:<14} {:<30} {:<12} {}",
            account.id,
            account.code,
            account.name,
            account.account_type,
            if account.accepts_entries { "yes" } else { "" }
        );
    }
    println!();
    println!("Total: {} account(s)", accounts.len());
    Ok(())
}
