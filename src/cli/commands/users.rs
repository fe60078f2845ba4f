//! List users command handler

use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_list_users(config: Config) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let users = state.auth_service.list_users().await?;

    if users.is_empty() {
        println!("No users registered.");
        return Ok(());
    }

    println!("Users ({} total)", users.len());
    println!("{:-<70}", "");

    for user in users {
        let marker = if user.is_hero { " [hero]" } else { "" };
        println!("{}{}", user.username, marker);
        println!("  ID: {} | Joined: {}", user.id, user.created_at);
    }

    Ok(())
}
