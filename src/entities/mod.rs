pub mod prelude;

pub mod movies;
pub mod user_favorites;
pub mod users;
