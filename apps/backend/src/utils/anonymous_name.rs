//! Festive anonymous display names for participants.
//!
//! Participants appear inside a group under an "Adjective Noun" pseudonym so
//! the draw stays anonymous. Uniqueness within a group is enforced by the
//! caller against the existing participant set.

use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "Jolly", "Merry", "Festive", "Snowy", "Sparkly", "Frosty", "Cozy", "Twinkling", "Cheerful",
    "Glittering", "Magical", "Wintry", "Gleaming", "Dazzling", "Shimmering", "Radiant",
    "Enchanted", "Whimsical", "Joyful", "Bright", "Dancing", "Singing", "Bouncing", "Prancing",
    "Sleepy", "Hungry", "Clumsy", "Dizzy", "Giggly", "Sneaky",
];

const NOUNS: &[&str] = &[
    "Reindeer", "Snowflake", "Gingerbread", "Elf", "Angel", "Snowman", "Star", "Cookie",
    "Ornament", "Candle", "Bell", "Mittens", "Scarf", "Sleigh", "Present", "Stocking",
    "Nutcracker", "Penguin", "Cardinal", "Hedgehog", "Owl", "Fox", "Bear", "Squirrel", "Unicorn",
    "Dragon", "Phoenix", "Griffin", "Chimera",
];

/// Generate a candidate anonymous name.
pub fn generate_anonymous_name() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    format!("{adjective} {noun}")
}
