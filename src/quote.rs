//! Static quote set and random selection

use rand::RngExt;

use crate::models::Quote;
use crate::{InfoHubError, Result};

/// (text, author)
pub const QUOTES: [(&str, &str); 10] = [
    (
        "The only way to do great work is to love what you do.",
        "Steve Jobs",
    ),
    (
        "Innovation distinguishes between a leader and a follower.",
        "Steve Jobs",
    ),
    (
        "Life is what happens when you're busy making other plans.",
        "John Lennon",
    ),
    (
        "The future belongs to those who believe in the beauty of their dreams.",
        "Eleanor Roosevelt",
    ),
    (
        "It is during our darkest moments that we must focus to see the light.",
        "Aristotle",
    ),
    (
        "The only impossible journey is the one you never begin.",
        "Tony Robbins",
    ),
    (
        "Believe you can and you're halfway there.",
        "Theodore Roosevelt",
    ),
    (
        "Success is not final, failure is not fatal.",
        "Winston Churchill",
    ),
    (
        "Don't watch the clock; do what it does. Keep going.",
        "Sam Levenson",
    ),
    (
        "The best time to plant a tree was 20 years ago. The second best time is now.",
        "Chinese Proverb",
    ),
];

/// Quote at `index`, if there is one
pub fn quote_at(index: usize) -> Result<Quote> {
    QUOTES
        .get(index)
        .map(|(text, author)| Quote {
            text: (*text).to_string(),
            author: (*author).to_string(),
        })
        .ok_or_else(|| InfoHubError::internal("Could not fetch quote"))
}

/// Pick one quote uniformly at random. Consecutive calls may repeat.
pub fn random_quote() -> Result<Quote> {
    let index = rand::rng().random_range(0..QUOTES.len());
    quote_at(index)
}
