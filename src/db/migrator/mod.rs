use sea_orm_migration::prelude::*;

mod m20251020_initial;
mod m20251021_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251020_initial::Migration),
            Box::new(m20251021_add_lookup_indexes::Migration),
        ]
    }
}
