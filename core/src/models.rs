/*
    spotpop | Web service for the Spotify popularity battle game.
    Copyright (C) 2025  Israel Alberto Roldan Vega

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An artist as returned by the catalog search: identifier, display name and
/// a 0-100 popularity score. Fetched fresh per lookup, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistPopularity {
    pub id: String,
    pub name: String,
    pub popularity: u8,
}

/// A candidate ranked against a reference popularity. Lower diff is better.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCandidate {
    pub name: String,
    pub popularity: u8,
    pub diff: u8,
}

/// Outcome of a single guessing round: the theme artist, the player's answer
/// and the absolute popularity difference between the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub theme_name: String,
    pub theme_popularity: u8,
    pub answer_name: String,
    pub answer_popularity: u8,
    pub diff: u8,
}

impl RoundResult {
    pub fn new(theme: &ArtistPopularity, answer: &ArtistPopularity) -> Self {
        Self {
            theme_name: theme.name.clone(),
            theme_popularity: theme.popularity,
            answer_name: answer.name.clone(),
            answer_popularity: answer.popularity,
            diff: theme.popularity.abs_diff(answer.popularity),
        }
    }
}

impl fmt::Display for RoundResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) vs {} ({}) -> diff {}",
            self.theme_name,
            self.theme_popularity,
            self.answer_name,
            self.answer_popularity,
            self.diff
        )
    }
}

/// One leaderboard record. Created on explicit submission, never mutated.
/// Serialized field names match the stored document format
/// (`{name, score, createdAt}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub score: f64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl RankingEntry {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
            created_at: Utc::now(),
        }
    }
}
