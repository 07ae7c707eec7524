//! Request descriptors for every endpoint the app calls
//!
//! `game` holds the official API reads, `user` the companion API writes.
//! Descriptors are built per call site and carry the base [`Endpoint`] they
//! target, so `url_string` depends on nothing but the descriptor itself.
//!
//! [`Endpoint`]: crate::web::Endpoint

pub mod game;
pub mod user;

pub use game::{
    BattleLogRequest, CardsRequest, ClanRequest, ClanSearchRequest, PlayerRankingsRequest,
    PlayerRequest, RankingLocation,
};
pub use user::{RefreshSessionRequest, RegisterRequest, RemoveDeckRequest, SaveDeckRequest};
