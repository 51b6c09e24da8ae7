use crate::models::ArtistPopularity;
use log::info;
use rand::seq::SliceRandom;
use std::path::Path;
use thiserror::Error;

/// Upper bound on a single random pick, mirroring the public endpoint cap.
pub const MAX_PICK: usize = 20;

const BUNDLED_ROSTER: &str = include_str!("../data/artists.json");

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Failed to read roster file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Roster file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Roster contains no artists")]
    Empty,
}

/// A fixed list of pre-fetched `(name, id, popularity)` tuples used to draw
/// theme artists. Loaded once at startup; refreshed offline via the
/// `refresh-roster` command rather than per session.
#[derive(Debug, Clone)]
pub struct Roster {
    artists: Vec<ArtistPopularity>,
}

impl Roster {
    pub fn new(artists: Vec<ArtistPopularity>) -> Result<Self, RosterError> {
        if artists.is_empty() {
            return Err(RosterError::Empty);
        }
        Ok(Self { artists })
    }

    /// The roster shipped with the binary.
    pub fn bundled() -> Result<Self, RosterError> {
        let artists: Vec<ArtistPopularity> = serde_json::from_str(BUNDLED_ROSTER)?;
        Self::new(artists)
    }

    /// Loads a roster from a JSON file (same format as the bundled one).
    pub fn load(path: &Path) -> Result<Self, RosterError> {
        let raw = std::fs::read_to_string(path)?;
        let artists: Vec<ArtistPopularity> = serde_json::from_str(&raw)?;
        info!("Loaded {} artists from {}", artists.len(), path.display());
        Self::new(artists)
    }

    /// Writes the roster back out as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), RosterError> {
        let json = serde_json::to_string_pretty(&self.artists)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Picks `count` distinct artists at random, without replacement.
    /// `count` is clamped to `1..=MAX_PICK` and to the roster size.
    pub fn pick(&self, count: usize) -> Vec<ArtistPopularity> {
        let amount = count.clamp(1, MAX_PICK).min(self.artists.len());
        self.artists
            .choose_multiple(&mut rand::thread_rng(), amount)
            .cloned()
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.artists.iter().map(|artist| artist.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }
}
