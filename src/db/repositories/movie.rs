use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{info, warn};

use crate::entities::{movies, prelude::*};
use crate::models::movie::{Director, Genre, Movie, NewMovie};

/// Unicode-lowercased form stored alongside searchable names.
fn lookup_key(value: &str) -> String {
    value.trim().to_lowercase()
}

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: movies::Model) -> Movie {
        let genre = model.genre_name.map(|name| Genre {
            name,
            description: model.genre_description.unwrap_or_default(),
        });

        let director = model.director_name.map(|name| Director {
            name,
            bio: model.director_bio.unwrap_or_default(),
            birth_year: model.director_birth_year,
            death_year: model.director_death_year,
        });

        let cast = serde_json::from_str(&model.cast).unwrap_or_else(|e| {
            warn!(movie_id = %model.id, error = %e, "Unreadable cast column, treating as empty");
            Vec::new()
        });

        Movie {
            id: model.id,
            title: model.title,
            description: model.description,
            genre,
            director,
            image_url: model.image_url,
            featured: model.featured,
            runtime_minutes: model.runtime_minutes,
            rating: model.rating,
            cast,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    fn to_active_model(movie: &NewMovie, seq: i64, now: &str) -> movies::ActiveModel {
        movies::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            title: Set(movie.title.trim().to_string()),
            title_key: Set(lookup_key(&movie.title)),
            description: Set(movie.description.clone()),
            genre_name: Set(movie.genre.as_ref().map(|g| g.name.trim().to_string())),
            genre_description: Set(movie.genre.as_ref().map(|g| g.description.clone())),
            genre_key: Set(movie.genre.as_ref().map(|g| lookup_key(&g.name))),
            director_name: Set(movie.director.as_ref().map(|d| d.name.trim().to_string())),
            director_bio: Set(movie.director.as_ref().map(|d| d.bio.clone())),
            director_birth_year: Set(movie.director.as_ref().and_then(|d| d.birth_year)),
            director_death_year: Set(movie.director.as_ref().and_then(|d| d.death_year)),
            director_key: Set(movie.director.as_ref().map(|d| lookup_key(&d.name))),
            image_url: Set(movie.image_url.clone()),
            featured: Set(movie.featured),
            runtime_minutes: Set(movie.runtime_minutes),
            rating: Set(movie.rating.clone()),
            cast: Set(serde_json::to_string(&movie.cast).unwrap_or_else(|_| "[]".to_string())),
            seq: Set(seq),
            created_at: Set(now.to_string()),
            updated_at: Set(now.to_string()),
        }
    }

    /// Every movie in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Movie>> {
        let rows = Movies::find()
            .order_by_asc(movies::Column::Seq)
            .all(&self.conn)
            .await
            .context("Failed to list movies")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        let count = Movies::find_by_id(id.to_string())
            .count(&self.conn)
            .await
            .context("Failed to check movie existence")?;

        Ok(count > 0)
    }

    /// Case-insensitive exact match against a `*_key` column, earliest inserted row wins.
    ///
    /// Keys are folded in Rust on write and on read, since `SQLite`'s
    /// `lower()` only folds ASCII.
    async fn find_first_ci(&self, column: movies::Column, needle: &str) -> Result<Option<Movie>> {
        let row = Movies::find()
            .filter(column.eq(needle.to_lowercase()))
            .order_by_asc(movies::Column::Seq)
            .one(&self.conn)
            .await
            .with_context(|| format!("Failed to query movies by {column:?}"))?;

        Ok(row.map(Self::map_model))
    }

    pub async fn find_by_title(&self, title: &str) -> Result<Option<Movie>> {
        self.find_first_ci(movies::Column::TitleKey, title).await
    }

    pub async fn find_genre(&self, name: &str) -> Result<Option<Genre>> {
        Ok(self
            .find_first_ci(movies::Column::GenreKey, name)
            .await?
            .and_then(|m| m.genre))
    }

    pub async fn find_director(&self, name: &str) -> Result<Option<Director>> {
        Ok(self
            .find_first_ci(movies::Column::DirectorKey, name)
            .await?
            .and_then(|m| m.director))
    }

    pub async fn count(&self) -> Result<u64> {
        Movies::find()
            .count(&self.conn)
            .await
            .context("Failed to count movies")
    }

    /// Clears the catalog and inserts `movies` in order, atomically.
    /// Favorites are left alone and may point at identifiers that are gone.
    pub async fn replace_all(&self, movies: &[NewMovie]) -> Result<usize> {
        let now = chrono::Utc::now().to_rfc3339();
        let txn = self.conn.begin().await?;

        let removed = Movies::delete_many()
            .exec(&txn)
            .await
            .context("Failed to clear movies")?
            .rows_affected;

        if !movies.is_empty() {
            let models = movies
                .iter()
                .zip(0_i64..)
                .map(|(movie, seq)| Self::to_active_model(movie, seq, &now));

            Movies::insert_many(models)
                .exec_without_returning(&txn)
                .await
                .context("Failed to insert movies")?;
        }

        txn.commit().await?;

        info!(removed, inserted = movies.len(), "Replaced movie catalog");
        Ok(movies.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;

    async fn temp_repo() -> (MovieRepository, std::path::PathBuf) {
        let path =
            std::env::temp_dir().join(format!("yusmov-movie-repo-{}.db", uuid::Uuid::new_v4()));
        let store = Store::new(&format!("sqlite:{}", path.display()))
            .await
            .unwrap();
        (MovieRepository::new(store.conn.clone()), path)
    }

    fn accented_movie() -> NewMovie {
        NewMovie {
            title: "Amélie".to_string(),
            description: "A shy waitress decides to change the lives of those around her.".to_string(),
            genre: Some(Genre {
                name: "Comédie".to_string(),
                description: "Films meant to amuse.".to_string(),
            }),
            director: Some(Director {
                name: "Jean-Pierre Jeunet".to_string(),
                bio: String::new(),
                birth_year: Some(1953),
                death_year: None,
            }),
            rating: "R".to_string(),
            cast: vec!["Audrey Tautou".to_string()],
            ..NewMovie::default()
        }
    }

    #[tokio::test]
    async fn test_lookup_folds_non_ascii_case() {
        let (repo, path) = temp_repo().await;
        repo.replace_all(&[accented_movie()]).await.unwrap();

        let movie = repo.find_by_title("AMÉLIE").await.unwrap().unwrap();
        assert_eq!(movie.title, "Amélie");
        assert_eq!(movie.cast, vec!["Audrey Tautou".to_string()]);

        let genre = repo.find_genre("COMÉDIE").await.unwrap().unwrap();
        assert_eq!(genre.name, "Comédie");

        let director = repo.find_director("jean-pierre JEUNET").await.unwrap();
        assert_eq!(director.unwrap().birth_year, Some(1953));

        assert!(repo.find_by_title("Amelie").await.unwrap().is_none());

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_lookup_treats_wildcards_literally() {
        let (repo, path) = temp_repo().await;
        repo.replace_all(&[accented_movie()]).await.unwrap();

        assert!(repo.find_by_title("Am%").await.unwrap().is_none());
        assert!(repo.find_by_title("Am_lie").await.unwrap().is_none());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_unreadable_cast_reads_as_empty() {
        let model = movies::Model {
            id: uuid::Uuid::new_v4().to_string(),
            title: "Broken".to_string(),
            title_key: "broken".to_string(),
            description: String::new(),
            genre_name: None,
            genre_description: None,
            genre_key: None,
            director_name: None,
            director_bio: None,
            director_birth_year: None,
            director_death_year: None,
            director_key: None,
            image_url: String::new(),
            featured: false,
            runtime_minutes: None,
            rating: String::new(),
            cast: "{not json".to_string(),
            seq: 0,
            created_at: String::new(),
            updated_at: String::new(),
        };

        let movie = MovieRepository::map_model(model);
        assert!(movie.cast.is_empty());
        assert!(movie.genre.is_none());
        assert!(movie.director.is_none());
    }
}
