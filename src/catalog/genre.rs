//! Display side table for genre labels.
//!
//! The genre set is open: new labels may appear in the dataset at any time.
//! Unknown genres fall back to a neutral color and a generic description
//! instead of failing.

/// Known genre labels with display color and description, in canonical
/// enumeration order. This order also breaks ties in genre rankings.
pub const KNOWN_GENRES: &[(&str, &str, &str)] = &[
    (
        "Action",
        "#ef4444",
        "High-octane stunts, fights, and hero-centric narratives",
    ),
    (
        "Romance",
        "#ec4899",
        "Love stories and relationship-driven plots",
    ),
    (
        "Drama",
        "#3b82f6",
        "Character-focused storytelling with emotional depth",
    ),
    ("Comedy", "#eab308", "Humor-driven entertainment and satire"),
    (
        "Thriller",
        "#a855f7",
        "Suspense, mystery, and psychological tension",
    ),
    (
        "Horror",
        "#f97316",
        "Supernatural and fear-inducing narratives",
    ),
    (
        "Family",
        "#6366f1",
        "Multi-generational stories and family dynamics",
    ),
    (
        "Musical",
        "#14b8a6",
        "Music-centric films with elaborate song sequences",
    ),
];

const FALLBACK_COLOR: &str = "#9ca3af";
const FALLBACK_DESCRIPTION: &str = "Films outside the core genre set";

pub fn genre_color(genre: &str) -> &'static str {
    KNOWN_GENRES
        .iter()
        .find(|(name, _, _)| *name == genre)
        .map(|(_, color, _)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

pub fn genre_description(genre: &str) -> &'static str {
    KNOWN_GENRES
        .iter()
        .find(|(name, _, _)| *name == genre)
        .map(|(_, _, description)| *description)
        .unwrap_or(FALLBACK_DESCRIPTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_genre_has_dedicated_color() {
        assert_eq!(genre_color("Action"), "#ef4444");
        assert_ne!(genre_color("Drama"), FALLBACK_COLOR);
    }

    #[test]
    fn unknown_genre_falls_back() {
        assert_eq!(genre_color("Docufiction"), FALLBACK_COLOR);
        assert_eq!(genre_description("Docufiction"), FALLBACK_DESCRIPTION);
    }
}
