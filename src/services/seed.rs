//! Demo catalog loaded by `yusmov seed`.

use anyhow::Result;
use tracing::info;

use crate::db::Store;
use crate::models::movie::{Director, Genre, NewMovie};

fn entry(
    title: &str,
    description: &str,
    image_url: &str,
    genre: (&str, &str),
    director: &str,
) -> NewMovie {
    NewMovie {
        title: title.to_string(),
        description: description.to_string(),
        genre: Some(Genre {
            name: genre.0.to_string(),
            description: genre.1.to_string(),
        }),
        director: Some(Director {
            name: director.to_string(),
            bio: String::new(),
            birth_year: None,
            death_year: None,
        }),
        image_url: image_url.to_string(),
        ..NewMovie::default()
    }
}

/// The fixed gothic demo list, in catalog order.
#[must_use]
pub fn demo_movies() -> Vec<NewMovie> {
    vec![
        entry(
            "The Crow",
            "A man brutally murdered comes back to life as an undead avenger of his fiancée's death.",
            "https://m.media-amazon.com/images/I/81YFfHuh-PL._AC_SY679_.jpg",
            ("Gothic Superhero", "Dark, tragic, and gothic revenge themes."),
            "Alex Proyas",
        ),
        entry(
            "Beetlejuice",
            "A recently deceased couple hire a sleazy ghost to help haunt their former home.",
            "https://m.media-amazon.com/images/I/71R1K9Uu1oL._AC_SY679_.jpg",
            ("Dark Comedy", "Gothic humor with Tim Burton flair."),
            "Tim Burton",
        ),
        entry(
            "Interview with the Vampire",
            "A journalist interviews a vampire who tells the story of his immortal life.",
            "https://m.media-amazon.com/images/I/71t4GZ9J+fL._AC_SY679_.jpg",
            ("Horror", "Romantic, gothic vampire storytelling."),
            "Neil Jordan",
        ),
        entry(
            "Edward Scissorhands",
            "An artificial man with scissors for hands lives in isolation until love draws him out.",
            "https://m.media-amazon.com/images/I/71DjSl4Xn6L._AC_SY679_.jpg",
            ("Romantic Fantasy", "Tragic and gothic suburban fairytale."),
            "Tim Burton",
        ),
        entry(
            "Nosferatu",
            "The classic 1922 silent film about Count Orlok, a vampire who preys on the living.",
            "https://m.media-amazon.com/images/I/71+E0e0JbrL._AC_SY679_.jpg",
            ("Horror", "Silent-era gothic horror."),
            "F.W. Murnau",
        ),
        entry(
            "Dracula (1931)",
            "Bela Lugosi stars in this iconic portrayal of Count Dracula.",
            "https://m.media-amazon.com/images/I/71h7V8c5oDL._AC_SY679_.jpg",
            ("Horror", "Classic Universal gothic horror."),
            "Tod Browning",
        ),
        entry(
            "Crimson Peak",
            "A young woman marries into a mysterious family and discovers terrifying secrets.",
            "https://m.media-amazon.com/images/I/81i5Fdbzj1L._AC_SY679_.jpg",
            ("Gothic Romance", "Haunted house gothic by Guillermo del Toro."),
            "Guillermo del Toro",
        ),
        entry(
            "Sleepy Hollow",
            "Ichabod Crane investigates murders linked to the Headless Horseman.",
            "https://m.media-amazon.com/images/I/81FxHj6fHYL._AC_SY679_.jpg",
            (
                "Horror Mystery",
                "Tim Burton’s gothic reimagining of the classic tale.",
            ),
            "Tim Burton",
        ),
        entry(
            "The Addams Family",
            "The quirky, macabre Addams family faces off against a con artist.",
            "https://m.media-amazon.com/images/I/71EwQ6tFb0L._AC_SY679_.jpg",
            ("Dark Comedy", "Gothic humor with iconic characters."),
            "Barry Sonnenfeld",
        ),
        entry(
            "Only Lovers Left Alive",
            "Two sophisticated vampires reunite in Detroit, exploring love and ennui.",
            "https://m.media-amazon.com/images/I/81gY8dPSNML._AC_SY679_.jpg",
            ("Romantic Horror", "Indie gothic exploration of immortality."),
            "Jim Jarmusch",
        ),
    ]
}

/// Replaces the whole movie collection with [`demo_movies`].
pub async fn seed_movies(store: &Store) -> Result<usize> {
    let movies = demo_movies();
    let inserted = store.replace_movies(&movies).await?;
    info!(count = inserted, "Database seeded with demo movies");
    Ok(inserted)
}
