//! Query dispatch - maps each query onto its descriptor

use crate::api::{
    BattleLogRequest, CardsRequest, ClanRequest, ClanSearchRequest, PlayerRankingsRequest,
    PlayerRequest, RefreshSessionRequest, RegisterRequest, RemoveDeckRequest, SaveDeckRequest,
};
use crate::config::ClientConfig;
use crate::messages::{ApiPayload, ApiQuery};
use crate::web::{Endpoint, FetchError, WebClient};

/// Base URLs descriptors are pointed at
#[derive(Clone, Debug)]
pub struct Endpoints {
    pub game: Endpoint,
    pub user: Endpoint,
}

impl From<&ClientConfig> for Endpoints {
    fn from(config: &ClientConfig) -> Self {
        Endpoints {
            game: config.api_base.clone(),
            user: config.user_api_base.clone(),
        }
    }
}

/// Build the descriptor for `query` and run it
pub async fn execute_query(
    client: &WebClient,
    endpoints: &Endpoints,
    query: &ApiQuery,
) -> Result<ApiPayload, FetchError> {
    let game = &endpoints.game;
    let user = &endpoints.user;

    let payload = match query {
        ApiQuery::Player { tag } => {
            let player = client.get(&PlayerRequest::new(tag.as_str()).at(game)).await?;
            ApiPayload::Player(Box::new(player))
        }
        ApiQuery::BattleLog { tag } => {
            ApiPayload::BattleLog(client.get(&BattleLogRequest::new(tag.as_str()).at(game)).await?)
        }
        ApiQuery::Clan { tag } => {
            let clan = client.get(&ClanRequest::new(tag.as_str()).at(game)).await?;
            ApiPayload::Clan(Box::new(clan))
        }
        ApiQuery::SearchClans { name, limit } => ApiPayload::ClanSearch(
            client
                .get(&ClanSearchRequest::new(name.as_str(), *limit).at(game))
                .await?,
        ),
        ApiQuery::PlayerRankings { location, limit } => ApiPayload::Rankings(
            client
                .get(&PlayerRankingsRequest::new(location.clone(), *limit).at(game))
                .await?,
        ),
        ApiQuery::Cards => ApiPayload::Cards(client.get(&CardsRequest::new().at(game)).await?),
        ApiQuery::Register { device_id } => {
            let session = client
                .post(&RegisterRequest::new(device_id.as_str()).at(user))
                .await?;
            client.set_session_token(Some(session.token.clone()));
            ApiPayload::Session(session)
        }
        ApiQuery::SaveDeck { name, cards } => ApiPayload::Deck(
            client
                .post(&SaveDeckRequest::new(name.as_str(), cards.clone()).at(user))
                .await?,
        ),
        ApiQuery::RemoveDeck { deck_id } => ApiPayload::Deck(
            client
                .post(&RemoveDeckRequest::new(deck_id.as_str()).at(user))
                .await?,
        ),
        ApiQuery::RefreshSession => {
            let session = client.post(&RefreshSessionRequest::new().at(user)).await?;
            client.set_session_token(Some(session.token.clone()));
            ApiPayload::Session(session)
        }
    };

    Ok(payload)
}
