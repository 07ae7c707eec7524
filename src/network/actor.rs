//! Network actor - runs API queries in the Tokio async runtime

use std::collections::HashMap;
use std::time::Instant;

use tokio::sync::{mpsc, oneshot};
use tokio::task::{self, JoinError, JoinSet};

use crate::config::ClientConfig;
use crate::messages::{ApiPayload, ApiQuery, NetworkCommand, NetworkResponse};
use crate::network::fetch::{execute_query, Endpoints};
use crate::web::{FetchError, WebClient};

/// A query being executed, with every request id waiting on it
struct InFlight {
    ticket: u64,
    waiters: Vec<u64>,
    cancel_tx: oneshot::Sender<()>,
}

/// What a finished task hands back; `result` is `None` when it was cancelled
struct Finished {
    query: ApiQuery,
    ticket: u64,
    result: Option<Result<ApiPayload, FetchError>>,
    time_ms: u64,
}

/// Network actor that processes fetch commands
pub struct NetworkActor {
    client: WebClient,
    endpoints: Endpoints,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<Finished>,
    /// Query and ticket of each running task, to settle its waiters if it dies
    tasks: HashMap<task::Id, (ApiQuery, u64)>,
    in_flight: HashMap<ApiQuery, InFlight>,
    queries_by_id: HashMap<u64, ApiQuery>,
    next_ticket: u64,
}

impl NetworkActor {
    pub fn new(config: &ClientConfig, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        Self::with_client(WebClient::new(config), Endpoints::from(config), response_tx)
    }

    pub fn with_client(
        client: WebClient,
        endpoints: Endpoints,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            client,
            endpoints,
            response_tx,
            active_requests: JoinSet::new(),
            tasks: HashMap::new(),
            in_flight: HashMap::new(),
            queries_by_id: HashMap::new(),
            next_ticket: 0,
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Fetch { id, query }) => self.fetch(id, query),
                        Some(NetworkCommand::Cancel(id)) => self.cancel(id),
                        Some(NetworkCommand::Shutdown) | None => {
                            self.cancel_all();
                            break;
                        }
                    }
                }

                Some(joined) = self.active_requests.join_next_with_id() => {
                    match joined {
                        Ok((task_id, finished)) => {
                            self.tasks.remove(&task_id);
                            self.finish(finished);
                        }
                        Err(e) => self.task_failed(e),
                    }
                }
            }
        }
    }

    fn fetch(&mut self, id: u64, query: ApiQuery) {
        self.queries_by_id.insert(id, query.clone());

        if let Some(pending) = self.in_flight.get_mut(&query) {
            tracing::debug!(id, query = query.label(), "Joining in-flight request");
            pending.waiters.push(id);
            return;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let (cancel_tx, mut cancel_rx) = oneshot::channel();
        self.in_flight.insert(
            query.clone(),
            InFlight {
                ticket,
                waiters: vec![id],
                cancel_tx,
            },
        );

        let client = self.client.clone();
        let endpoints = self.endpoints.clone();
        let tracked = query.clone();
        tracing::info!(id, query = query.label(), "Executing request");

        let handle = self.active_requests.spawn(async move {
            let start = Instant::now();
            let result = tokio::select! {
                biased;

                _ = &mut cancel_rx => None,
                result = execute_query(&client, &endpoints, &query) => Some(result),
            };
            Finished {
                query,
                ticket,
                result,
                time_ms: start.elapsed().as_millis() as u64,
            }
        });
        self.tasks.insert(handle.id(), (tracked, ticket));
    }

    fn cancel(&mut self, id: u64) {
        let Some(query) = self.queries_by_id.remove(&id) else {
            return;
        };
        tracing::info!(id, query = query.label(), "Cancelling request");
        let _ = self.response_tx.send(NetworkResponse::Cancelled { id });

        let now_idle = match self.in_flight.get_mut(&query) {
            Some(pending) => {
                pending.waiters.retain(|w| *w != id);
                pending.waiters.is_empty()
            }
            None => false,
        };
        if now_idle {
            if let Some(pending) = self.in_flight.remove(&query) {
                let _ = pending.cancel_tx.send(());
            }
        }
    }

    fn cancel_all(&mut self) {
        for (_, pending) in self.in_flight.drain() {
            let _ = pending.cancel_tx.send(());
            for id in pending.waiters {
                let _ = self.response_tx.send(NetworkResponse::Cancelled { id });
            }
        }
        self.queries_by_id.clear();
    }

    /// A task panicked: its waiters still get one terminal response
    fn task_failed(&mut self, e: JoinError) {
        tracing::error!(error = %e, "Fetch task failed");
        let Some((query, ticket)) = self.tasks.remove(&e.id()) else {
            return;
        };
        self.finish(Finished {
            query,
            ticket,
            result: Some(Err(FetchError::Request(format!("fetch task failed: {e}")))),
            time_ms: 0,
        });
    }

    fn finish(&mut self, finished: Finished) {
        let Finished {
            query,
            ticket,
            result,
            time_ms,
        } = finished;

        // A cancelled call whose query was re-issued must not settle the new one
        if self.in_flight.get(&query).map(|p| p.ticket) != Some(ticket) {
            return;
        }
        let Some(pending) = self.in_flight.remove(&query) else {
            return;
        };
        let Some(result) = result else {
            return;
        };

        for id in pending.waiters {
            self.queries_by_id.remove(&id);
            let response = match &result {
                Ok(payload) => NetworkResponse::Success {
                    id,
                    payload: payload.clone(),
                    time_ms,
                },
                Err(error) => NetworkResponse::Error {
                    id,
                    error: error.clone(),
                    time_ms,
                },
            };
            match &response {
                NetworkResponse::Error { error, .. } => {
                    tracing::warn!(id, query = query.label(), error = %error, time_ms, "Request failed")
                }
                _ => tracing::info!(id, query = query.label(), time_ms, "Request completed"),
            }
            let _ = self.response_tx.send(response);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use crate::web::client::tests::{http_response, test_client};
    use crate::web::{BuildError, Endpoint};

    /// Loopback server answering every connection after `delay`; returns base URL and hit counter
    async fn slow_server(
        body: &'static str,
        delay: Duration,
    ) -> (String, std::sync::Arc<std::sync::atomic::AtomicUsize>) {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    let _ = socket.read(&mut buf).await;
                    tokio::time::sleep(delay).await;
                    let _ = socket
                        .write_all(http_response("200 OK", body).as_bytes())
                        .await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        (format!("http://{}", addr), hits)
    }

    fn actor_for(base: &str) -> (NetworkActor, mpsc::UnboundedReceiver<NetworkResponse>) {
        let config = ClientConfig {
            api_base: Endpoint::from_owned(base),
            api_token: Some("api-token".into()),
            ..ClientConfig::default()
        };
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();
        let actor = NetworkActor::with_client(test_client(&config), Endpoints::from(&config), resp_tx);
        (actor, resp_rx)
    }

    fn spawn_actor(
        base: &str,
    ) -> (
        mpsc::UnboundedSender<NetworkCommand>,
        mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let (actor, resp_rx) = actor_for(base);
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        tokio::spawn(actor.run(cmd_rx));
        (cmd_tx, resp_rx)
    }

    async fn panicking_fetch() -> Finished {
        panic!("decoder blew up")
    }

    const CARDS: &str = r#"{"items":[{"id":26000000,"name":"Knight","maxLevel":14,"iconUrls":{}}]}"#;

    #[tokio::test]
    async fn test_identical_queries_share_one_call() {
        let (base, hits) = slow_server(CARDS, Duration::from_millis(100)).await;
        let (cmd_tx, mut resp_rx) = spawn_actor(&base);

        cmd_tx.send(NetworkCommand::Fetch { id: 1, query: ApiQuery::Cards }).unwrap();
        cmd_tx.send(NetworkCommand::Fetch { id: 2, query: ApiQuery::Cards }).unwrap();

        let mut ids = vec![];
        for _ in 0..2 {
            match resp_rx.recv().await.unwrap() {
                NetworkResponse::Success { id, payload: ApiPayload::Cards(cards), .. } => {
                    assert_eq!(cards.items.len(), 1);
                    ids.push(id);
                }
                other => panic!("unexpected response: {other:?}"),
            }
        }
        ids.sort();
        assert_eq!(ids, [1, 2]);
        assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancelled_id_gets_single_cancelled_response() {
        let (base, _hits) = slow_server(CARDS, Duration::from_millis(200)).await;
        let (cmd_tx, mut resp_rx) = spawn_actor(&base);

        cmd_tx.send(NetworkCommand::Fetch { id: 1, query: ApiQuery::Cards }).unwrap();
        cmd_tx.send(NetworkCommand::Fetch { id: 2, query: ApiQuery::Cards }).unwrap();
        cmd_tx.send(NetworkCommand::Cancel(1)).unwrap();

        assert!(matches!(
            resp_rx.recv().await.unwrap(),
            NetworkResponse::Cancelled { id: 1 }
        ));
        assert!(matches!(
            resp_rx.recv().await.unwrap(),
            NetworkResponse::Success { id: 2, .. }
        ));

        // Nothing else is delivered for id 1
        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        assert!(resp_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_cancel_last_waiter_aborts_call() {
        let (base, _hits) = slow_server(CARDS, Duration::from_millis(300)).await;
        let (cmd_tx, mut resp_rx) = spawn_actor(&base);

        cmd_tx.send(NetworkCommand::Fetch { id: 7, query: ApiQuery::Cards }).unwrap();
        cmd_tx.send(NetworkCommand::Cancel(7)).unwrap();
        assert!(matches!(
            resp_rx.recv().await.unwrap(),
            NetworkResponse::Cancelled { id: 7 }
        ));

        // A fresh query for the same data is a new call and completes normally
        cmd_tx.send(NetworkCommand::Fetch { id: 8, query: ApiQuery::Cards }).unwrap();
        assert!(matches!(
            resp_rx.recv().await.unwrap(),
            NetworkResponse::Success { id: 8, .. }
        ));
    }

    #[tokio::test]
    async fn test_build_errors_are_reported_per_id() {
        let (cmd_tx, mut resp_rx) = spawn_actor("http://127.0.0.1:9");
        cmd_tx
            .send(NetworkCommand::Fetch {
                id: 3,
                query: ApiQuery::Clan { tag: String::new() },
            })
            .unwrap();
        match resp_rx.recv().await.unwrap() {
            NetworkResponse::Error { id, error, .. } => {
                assert_eq!(id, 3);
                assert_eq!(error, FetchError::Build(BuildError::UrlUnavailable));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_shutdown_cancels_every_waiter() {
        let (base, _hits) = slow_server(CARDS, Duration::from_millis(500)).await;
        let (cmd_tx, mut resp_rx) = spawn_actor(&base);

        cmd_tx.send(NetworkCommand::Fetch { id: 1, query: ApiQuery::Cards }).unwrap();
        cmd_tx.send(NetworkCommand::Fetch { id: 2, query: ApiQuery::Cards }).unwrap();
        cmd_tx
            .send(NetworkCommand::Fetch {
                id: 3,
                query: ApiQuery::Player { tag: "2PP".into() },
            })
            .unwrap();
        cmd_tx.send(NetworkCommand::Shutdown).unwrap();

        let mut cancelled = vec![];
        while let Some(response) = resp_rx.recv().await {
            match response {
                NetworkResponse::Cancelled { id } => cancelled.push(id),
                other => panic!("unexpected response: {other:?}"),
            }
        }
        cancelled.sort();
        assert_eq!(cancelled, [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_panicked_task_still_settles_waiters() {
        let (base, hits) = slow_server(CARDS, Duration::from_millis(10)).await;
        let (mut actor, mut resp_rx) = actor_for(&base);

        // Two waiters on a call whose task panics
        let (cancel_tx, _cancel_rx) = oneshot::channel();
        actor.in_flight.insert(
            ApiQuery::Cards,
            InFlight {
                ticket: 0,
                waiters: vec![1, 2],
                cancel_tx,
            },
        );
        actor.queries_by_id.insert(1, ApiQuery::Cards);
        actor.queries_by_id.insert(2, ApiQuery::Cards);
        actor.next_ticket = 1;
        let handle = actor.active_requests.spawn(panicking_fetch());
        actor.tasks.insert(handle.id(), (ApiQuery::Cards, 0));

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        tokio::spawn(actor.run(cmd_rx));

        let mut failed = vec![];
        for _ in 0..2 {
            match resp_rx.recv().await.unwrap() {
                NetworkResponse::Error { id, error: FetchError::Request(_), .. } => failed.push(id),
                other => panic!("unexpected response: {other:?}"),
            }
        }
        failed.sort();
        assert_eq!(failed, [1, 2]);

        // The dead call is gone, so the same query runs again
        cmd_tx.send(NetworkCommand::Fetch { id: 3, query: ApiQuery::Cards }).unwrap();
        assert!(matches!(
            resp_rx.recv().await.unwrap(),
            NetworkResponse::Success { id: 3, .. }
        ));
        assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
