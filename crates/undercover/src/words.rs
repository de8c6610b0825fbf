//! Word list loading.
//!
//! A locator is empty (built-in list), an `http(s)://` URL, or a local file
//! path. Custom lists are plain text with one `word,word` pair per line;
//! blank lines and lines starting with `#` are skipped, and lines that do not
//! hold exactly two non-empty fields are dropped.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use undercover_engine::{SecureRng, WordPair};

/// Connect and read timeout for remote word lists.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Error loading a word list.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum WordSourceError {
    /// The list could not be retrieved.
    #[display("Failed to load word list: {}", _0)]
    FetchFailed(String),

    /// The list was retrieved but no line held a valid pair.
    #[display("No valid word pairs found")]
    NoValidPairs,
}

impl std::error::Error for WordSourceError {}

/// Supplies the word pairs a match draws from.
#[async_trait]
pub trait WordSource: Send + Sync {
    /// Loads the pairs for `locator`; an empty locator means the built-in list.
    async fn load(&self, locator: &str) -> Result<Vec<WordPair>, WordSourceError>;
}

/// Default [`WordSource`]: built-in list, HTTP or local file.
#[derive(Debug, Clone)]
pub struct WordLoader {
    client: reqwest::Client,
}

impl WordLoader {
    /// Creates a loader with the standard timeouts.
    #[instrument]
    pub fn new() -> Result<Self, WordSourceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(FETCH_TIMEOUT)
            .read_timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| WordSourceError::FetchFailed(e.to_string()))?;
        Ok(Self { client })
    }

    #[instrument(skip(self))]
    async fn fetch_remote(&self, url: &str) -> Result<String, WordSourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WordSourceError::FetchFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Word list request rejected");
            return Err(WordSourceError::FetchFailed(format!("HTTP {}", status.as_u16())));
        }

        response
            .text()
            .await
            .map_err(|e| WordSourceError::FetchFailed(e.to_string()))
    }

    #[instrument]
    async fn read_local(path: &str) -> Result<String, WordSourceError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| WordSourceError::FetchFailed(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl WordSource for WordLoader {
    #[instrument(skip(self))]
    async fn load(&self, locator: &str) -> Result<Vec<WordPair>, WordSourceError> {
        let locator = locator.trim();
        if locator.is_empty() {
            debug!("Using built-in word list");
            return Ok(default_pairs());
        }

        let text = if locator.starts_with("http://") || locator.starts_with("https://") {
            self.fetch_remote(locator).await?
        } else {
            Self::read_local(locator).await?
        };

        let pairs = parse_word_list(&text)?;
        info!(count = pairs.len(), "Word list loaded");
        Ok(pairs)
    }
}

/// Parses a custom word list.
///
/// # Errors
///
/// [`WordSourceError::NoValidPairs`] when no line parses.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn parse_word_list(text: &str) -> Result<Vec<WordPair>, WordSourceError> {
    let pairs: Vec<WordPair> = text
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            match fields.as_slice() {
                [a, b] if !a.is_empty() && !b.is_empty() => Some(WordPair::new(*a, *b)),
                _ => {
                    debug!(line, "Dropping malformed word list line");
                    None
                }
            }
        })
        .collect();

    if pairs.is_empty() {
        return Err(WordSourceError::NoValidPairs);
    }
    Ok(pairs)
}

/// Picks one pair uniformly with the secure source.
pub fn pick_pair<'a>(pairs: &'a [WordPair], rng: &mut SecureRng) -> Option<&'a WordPair> {
    if pairs.is_empty() {
        return None;
    }
    pairs.get(rng.index(pairs.len()))
}

/// The built-in word list.
pub fn default_pairs() -> Vec<WordPair> {
    DEFAULT_PAIRS
        .iter()
        .map(|(a, b)| WordPair::new(*a, *b))
        .collect()
}

const DEFAULT_PAIRS: &[(&str, &str)] = &[
    // Food and drink
    ("Coffee", "Tea"),
    ("Pancake", "Waffle"),
    ("Sushi", "Rice"),
    ("Butter", "Margarine"),
    ("Soup", "Stew"),
    ("Burger", "Sandwich"),
    ("Biscuit", "Cookie"),
    ("Jam", "Jelly"),
    ("Yogurt", "Ice Cream"),
    ("Wine", "Champagne"),
    ("Tofu", "Cheese"),
    ("Rice", "Quinoa"),
    ("Tortilla", "Bread"),
    ("Muffin", "Cupcake"),
    ("Tomato", "Apple"),
    ("Onion", "Garlic"),
    ("Salt", "Sugar"),
    ("Honey", "Sugar"),
    ("Water", "Vodka"),
    ("Milk", "Soy Milk"),
    ("Date", "Fig"),
    ("Kiwi", "Avocado"),
    ("Curry", "Chili"),
    ("Cabbage", "Lettuce"),
    ("Fries", "Chips"),
    ("Ketchup", "Mustard"),
    // Animals and nature
    ("Bee", "Wasp"),
    ("Dinosaur", "Lizard"),
    ("Unicorn", "Horse"),
    ("Frog", "Toad"),
    ("Wolf", "Dog"),
    ("Lion", "Tiger"),
    ("Penguin", "Puffin"),
    ("Shark", "Dolphin"),
    ("Eagle", "Falcon"),
    ("Butterfly", "Moth"),
    ("Spider", "Scorpion"),
    ("Crocodile", "Alligator"),
    ("Duck", "Swan"),
    ("Horse", "Donkey"),
    ("Whale", "Orca"),
    ("Mushroom", "Moss"),
    ("Tree", "Bush"),
    ("Sun", "Star"),
    ("Sea", "Lake"),
    ("Rain", "Hail"),
    ("Tornado", "Hurricane"),
    ("Copper", "Bronze"),
    ("Ruby", "Ring"),
    ("Bat", "Rat"),
    ("Seal", "Walrus"),
    ("Crane", "Stork"),
    ("Desert", "Camel"),
    ("Savannah", "Safari"),
    ("Mountain", "Volcano"),
    ("Seagull", "Tide"),
    ("Cave", "Tunnel"),
    ("Island", "Peninsula"),
    ("Glacier", "Iceberg"),
    ("Stream", "River"),
    ("Wood", "Timber"),
    // Objects
    ("Pen", "Pencil"),
    ("Soap", "Shampoo"),
    ("Towel", "Napkin"),
    ("Fork", "Spoon"),
    ("Sofa", "Chair"),
    ("Sofa", "Stool"),
    ("Pillow", "Bed"),
    ("Blanket", "Bed"),
    ("Glass", "Cup"),
    ("Umbrella", "Raincoat"),
    ("Glasses", "Contact Lenses"),
    ("Watch", "Bracelet"),
    ("Ring", "Earring"),
    ("Hoodie", "Jacket"),
    ("Shoe", "Boot"),
    ("Glove", "Mitten"),
    ("Suitcase", "Backpack"),
    ("Laptop", "Tablet"),
    ("Headphones", "Earbuds"),
    ("Fan", "Air Conditioner"),
    ("Oven", "Microwave"),
    ("Broom", "Mop"),
    ("Candle", "Flashlight"),
    ("Suit", "Tie"),
    ("Deck", "Patio"),
    ("Check", "Receipt"),
    ("Drill", "Saw"),
    ("Cast", "Mold"),
    ("Bolt", "Screw"),
    ("File", "Folder"),
    ("Press", "Iron"),
    ("Cabinet", "Drawer"),
    ("Rope", "String"),
    ("Helmet", "Cap"),
    ("Chain", "Cuff"),
    ("Frame", "Border"),
    ("Shutter", "Blind"),
    ("Key", "Code"),
    ("Pad", "Mat"),
    ("Screen", "Monitor"),
    ("Stapler", "Puncher"),
    // Places
    ("Cinema", "Theater"),
    ("Library", "Bookstore"),
    ("Prison", "Zoo"),
    ("Hotel", "Hospital"),
    ("School", "University"),
    ("Museum", "Gallery"),
    ("Bakery", "Cafe"),
    ("Gym", "Bench"),
    ("Church", "Priest"),
    ("Elevator", "Escalator"),
    ("Pool", "Beach"),
    ("Bar", "Pub"),
    ("City", "Village"),
    ("Street", "Road"),
    ("Lighthouse", "Beacon"),
    ("Office", "Garage"),
    ("Wall", "Fence"),
    ("Manure", "Farm"),
    ("Garden", "Farm"),
    ("Garden", "Park"),
    // Characters and culture
    ("Batman", "Superman"),
    ("Dumbledore", "Gandalf"),
    ("Star Wars", "Star Trek"),
    ("Mario", "Luigi"),
    ("Vampire", "Werewolf"),
    ("Zombie", "Ghost"),
    ("Santa Claus", "Jesus"),
    ("Sherlock Holmes", "James Bond"),
    ("Tintin", "Asterix"),
    ("Pokemon", "Digimon"),
    ("Facebook", "Instagram"),
    ("Youtube", "TikTok"),
    ("Android", "iPhone"),
    ("Angel", "Fairy"),
    ("Cyclops", "Giant"),
    ("Pirate", "Viking"),
    ("King", "Throne"),
    // Abstract
    ("Love", "Lust"),
    ("Smart", "Cunning"),
    ("Salary", "Wealth"),
    ("Holiday", "Vacation"),
    ("Medicine", "Science"),
    ("History", "Legend"),
    ("Music", "Noise"),
    ("Painting", "Photo"),
    ("Gift", "Bribe"),
    ("Secret", "Lie"),
    ("Bank", "Shore"),
    ("Tear", "Rip"),
    ("Tie", "Knot"),
    ("Strike", "Protest"),
    ("Spring", "Morning"),
    ("Night", "Winter"),
    ("Knight", "Sword"),
    ("Punch", "Slap"),
    ("Match", "Lighter"),
    ("Newspaper", "Book"),
    ("Lawyer", "Judge"),
    ("Discount", "Receipt"),
    ("Ticket", "Bus"),
    ("Spike", "Thorn"),
    ("Cap", "Lid"),
    ("Light", "Feather"),
    ("Heavy", "Dense"),
    ("Sharp", "Pointy"),
    ("Smooth", "Slick"),
    // Travel
    ("Car", "Van"),
    ("Hotel", "Resort"),
    ("Beach", "Sand"),
    ("Ship", "Boat"),
    ("Boat", "Raft"),
    ("Train", "Metro"),
    ("Clock", "Schedule"),
];
