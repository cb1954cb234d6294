use crate::config::Config;
use crate::db::Store;
use crate::services::seed::seed_movies;

pub async fn cmd_seed(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_url).await?;
    let count = seed_movies(&store).await?;

    println!("Database seeded with {count} movies");
    Ok(())
}
