use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    /// UUID v4, hyphenated
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub title: String,

    /// Lowercased `title` used for case-insensitive lookups
    pub title_key: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub genre_name: Option<String>,
    pub genre_description: Option<String>,
    pub genre_key: Option<String>,

    pub director_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub director_bio: Option<String>,
    pub director_birth_year: Option<i32>,
    pub director_death_year: Option<i32>,
    pub director_key: Option<String>,

    pub image_url: String,

    pub featured: bool,

    pub runtime_minutes: Option<i32>,

    pub rating: String,

    /// JSON array of cast member names
    #[sea_orm(column_type = "Text")]
    pub cast: String,

    /// Monotonic insertion order; lookups return the earliest match.
    pub seq: i64,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
