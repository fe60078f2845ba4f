//! List heroes command handler

use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_list_heroes(config: Config) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let heroes = state.hero_service.list_heroes().await?;

    if heroes.is_empty() {
        println!("No heroes found.");
        return Ok(());
    }

    println!("Heroes ({} total)", heroes.len());
    println!("{:-<70}", "");

    for hero in heroes {
        let rating = if hero.review_count > 0 {
            format!("{:.2} ★ ({} reviews)", hero.average_rating, hero.review_count)
        } else {
            "no reviews".to_string()
        };

        println!("{:<16} {}", hero.name, rating);
        println!("  ID: {}", hero.id);
    }

    Ok(())
}
