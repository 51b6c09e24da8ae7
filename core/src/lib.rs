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

pub mod auth;
pub mod leaderboard;
pub mod lookup;
pub mod models;
pub mod roster;
pub mod scoring;
pub mod session;

// Re-export key items for convenience
pub use auth::get_spotify_client;
pub use leaderboard::{JsonFileStore, MemoryStore, RankingStore, LEADERBOARD_CAPACITY};
pub use lookup::{PopularitySource, SpotifyLookup};
pub use models::{ArtistPopularity, RankedCandidate, RankingEntry, RoundResult};
pub use roster::Roster;
pub use scoring::rank_candidates;
pub use session::{GameSession, SessionPhase};
