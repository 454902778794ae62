mod catalog;
mod film;
mod genre;
mod load;

pub use catalog::Catalog;
pub use film::Film;
pub use genre::{genre_color, genre_description, KNOWN_GENRES};
pub use load::load_catalog;
