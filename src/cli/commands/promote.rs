use crate::config::Config;
use crate::services::AuthError;
use crate::state::SharedState;

pub async fn cmd_promote(config: Config, username: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;

    match state.auth_service.promote(username).await {
        Ok(user) => {
            println!("✓ {} is now a hero account", user.username);
            match state.store.find_hero_by_name(&user.username).await? {
                Some(hero) => println!("  Linked hero profile: {} ({})", hero.name, hero.id),
                None => println!(
                    "  No hero profile named '{}'; incoming requests stay empty",
                    user.username
                ),
            }
            Ok(())
        }
        Err(AuthError::NotFound(msg)) => {
            println!("{msg}");
            println!("Use 'heroboard users' to see registered accounts");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
