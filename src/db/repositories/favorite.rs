use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::{prelude::*, user_favorites};

pub struct FavoriteRepository {
    conn: DatabaseConnection,
}

impl FavoriteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Movie ids in the order they were favorited
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<String>> {
        UserFavorites::find()
            .select_only()
            .column(user_favorites::Column::MovieId)
            .filter(user_favorites::Column::UserId.eq(user_id))
            .order_by_asc(user_favorites::Column::Id)
            .into_tuple::<String>()
            .all(&self.conn)
            .await
            .context("Failed to list favorites")
    }

    /// Link `movie_id` to the user unless it already is.
    /// Returns whether a new link was created.
    pub async fn add(&self, user_id: &str, movie_id: &str) -> Result<bool> {
        let active_model = user_favorites::ActiveModel {
            user_id: Set(user_id.to_string()),
            movie_id: Set(movie_id.to_string()),
            added_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let inserted = UserFavorites::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    user_favorites::Column::UserId,
                    user_favorites::Column::MovieId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to add favorite")?;

        Ok(inserted > 0)
    }

    /// Unlink `movie_id`. Returns whether a link existed.
    pub async fn remove(&self, user_id: &str, movie_id: &str) -> Result<bool> {
        let result = UserFavorites::delete_many()
            .filter(user_favorites::Column::UserId.eq(user_id))
            .filter(user_favorites::Column::MovieId.eq(movie_id))
            .exec(&self.conn)
            .await
            .context("Failed to remove favorite")?;

        Ok(result.rows_affected > 0)
    }
}
