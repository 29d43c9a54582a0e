//! Static lookup tables: category synonyms and subcategories, country aliases.
//!
//! These are plain data. Matching logic lives in the place-filters crate;
//! this module only answers "which entry does this string belong to".

/// One row of the category table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryEntry {
    /// Canonical display name
    pub name: &'static str,
    /// Lowercase spellings that resolve to this entry
    pub synonyms: &'static [&'static str],
    /// Refinements offered under this category
    pub subcategories: &'static [&'static str],
}

/// Name of the entry that "event"/"ticket" queries are additionally
/// widened to.
pub const TICKETS_TO_EVENT: &str = "Tickets to Event";

pub static CATEGORY_TABLE: &[CategoryEntry] = &[
    CategoryEntry {
        name: "Cafe",
        synonyms: &["cafe", "café", "coffee", "coffee shop", "coffeeshop"],
        subcategories: &["Coffee Shop", "Bakery Cafe", "Tea House", "Dessert Cafe"],
    },
    CategoryEntry {
        name: "Restaurant",
        synonyms: &["restaurant", "restaurants", "dining", "diner", "eatery"],
        subcategories: &["Fine Dining", "Casual Dining", "Fast Food", "Street Food", "Buffet"],
    },
    CategoryEntry {
        name: "Nature",
        synonyms: &[
            "nature", "park", "parks", "outdoor", "hiking", "trail", "forest", "wildlife",
            "natural",
        ],
        subcategories: &["National Park", "Garden", "Beach", "Lake", "Hiking Trail"],
    },
    CategoryEntry {
        name: "Adventure",
        synonyms: &[
            "adventure",
            "adventures",
            "adventure sports",
            "extreme sports",
            "rock climbing",
            "zip line",
            "zipline",
            "bungee",
            "rafting",
            "kayaking",
            "surfing",
            "skydiving",
            "paragliding",
        ],
        subcategories: &["Rock Climbing", "Zip Line", "Rafting", "Skydiving", "Paragliding"],
    },
    CategoryEntry {
        name: "Entertainment",
        synonyms: &[
            "entertainment",
            "theater",
            "theatre",
            "cinema",
            "movie",
            "movies",
            "concert",
            "music",
            "live music",
            "comedy",
            "show",
            "shows",
            "event",
            "events",
            "nightlife",
            "club",
            "bars",
        ],
        subcategories: &["Theater", "Cinema", "Live Music", "Comedy Club"],
    },
    CategoryEntry {
        name: "Museum",
        synonyms: &["museum", "museums", "gallery", "art gallery", "exhibition"],
        subcategories: &["Art Museum", "History Museum", "Science Museum"],
    },
    CategoryEntry {
        name: "Nightlife",
        synonyms: &["nightlife", "club", "clubs", "bar", "bars", "pub", "lounge"],
        subcategories: &["Cocktail Bar", "Night Club", "Pub", "Rooftop Bar"],
    },
    CategoryEntry {
        name: TICKETS_TO_EVENT,
        synonyms: &["tickets to event", "tickets", "ticket"],
        subcategories: &["Concert", "Festival", "Sports Event", "Workshop"],
    },
];

/// Find the table entry whose name or synonym equals `query`
/// (case and whitespace insensitive).
///
/// Synonyms overlap between entries ("nightlife" is also an Entertainment
/// spelling), so a name match beats any synonym; among synonyms the first
/// entry wins.
pub fn lookup_category(query: &str) -> Option<&'static CategoryEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    CATEGORY_TABLE
        .iter()
        .find(|entry| entry.name.to_lowercase() == query)
        .or_else(|| {
            CATEGORY_TABLE
                .iter()
                .find(|entry| entry.synonyms.contains(&query.as_str()))
        })
}

/// Subcategories offered under a category label; empty when unknown.
pub fn subcategories_for(category: &str) -> &'static [&'static str] {
    lookup_category(category)
        .map(|entry| entry.subcategories)
        .unwrap_or(&[])
}

/// Groups of interchangeable country names, lowercase. The first element is
/// the short canonical form.
pub static COUNTRY_ALIASES: &[&[&str]] = &[
    &[
        "usa",
        "us",
        "u.s.a.",
        "u.s.",
        "united states",
        "united states of america",
        "america",
    ],
    &["uk", "u.k.", "united kingdom", "great britain", "britain"],
    &["uae", "u.a.e.", "united arab emirates"],
    &["south korea", "korea, republic of", "republic of korea"],
    &["russia", "russian federation"],
    &["czechia", "czech republic"],
    &["netherlands", "the netherlands", "holland"],
];

/// The alias group containing `country`, if any.
pub fn country_aliases(country: &str) -> Option<&'static [&'static str]> {
    let country = country.trim().to_lowercase();
    COUNTRY_ALIASES
        .iter()
        .copied()
        .find(|group| group.contains(&country.as_str()))
}

/// Collapse the long forms reverse geocoders emit to the short names the
/// places API stores ("United States of America" -> "USA").
///
/// Only the US and UK are rewritten; other names come back trimmed but
/// otherwise untouched.
pub fn normalize_country(country: &str) -> String {
    match country.trim() {
        "United States" | "United States of America" => "USA".to_string(),
        "United Kingdom" | "Great Britain" => "UK".to_string(),
        other => other.to_string(),
    }
}
