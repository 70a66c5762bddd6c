//! Uphold reserve transaction client.

use async_trait::async_trait;
use indexmap::IndexSet;
use rust_decimal::RoundingStrategy;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::identifiers::parse_identifiers;
use super::settings::UpholdConfig;
use super::PROVIDER;
use crate::adapter::outbound::http::HttpClient;
use crate::adapter::outbound::resource::Location;
use crate::domain::order::{parse_amount, parse_timestamp_ms};
use crate::domain::{Exchange, OrderSet, TransactionOrder, Watermark};
use crate::error::Result;
use crate::port::outbound::OrderSource;

/// `GET /v0/reserve/transactions/{id}`, reduced to the fields we read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReserveTransaction {
    created_at: String,
    destination: Destination,
}

#[derive(Debug, Deserialize)]
struct Destination {
    amount: String,
}

/// Looks up curated Uphold purchases by id.
pub struct UpholdClient {
    http: HttpClient,
    config: UpholdConfig,
    ids: Location,
}

impl UpholdClient {
    /// # Errors
    ///
    /// Returns an error when the id list location is not a valid URL.
    pub fn new(http: HttpClient, config: UpholdConfig) -> Result<Self> {
        let ids = Location::parse(&config.ids)?;
        Ok(Self { http, config, ids })
    }

    async fn identifiers(&self) -> Result<IndexSet<String>> {
        let content = self.ids.read_text(&self.http, PROVIDER).await?;
        let ids = parse_identifiers(&content);
        debug!(count = ids.len(), location = %self.ids, "Loaded Uphold transaction ids");
        Ok(ids)
    }

    async fn transaction(&self, id: &str) -> Result<TransactionOrder> {
        let url = format!(
            "{}/v0/reserve/transactions/{id}",
            self.config.api_url.trim_end_matches('/')
        );
        let detail: ReserveTransaction = self.http.json(PROVIDER, self.http.get(&url)).await?;

        let date = parse_timestamp_ms(&detail.created_at)?;
        let amount = parse_amount(&detail.destination.amount)?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        Ok(TransactionOrder {
            amount: format!("{amount:.2}"),
            date,
            source: Exchange::Uphold,
        })
    }

    /// Look up each id, keeping those dated after `since`.
    ///
    /// An id whose lookup fails is logged and left out; it is retried on the
    /// next run because it is still missing from the snapshot.
    async fn lookup<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a String>,
        since: i64,
    ) -> OrderSet {
        let mut orders = OrderSet::new();
        for id in ids {
            match self.transaction(id).await {
                Ok(order) if order.date > since => {
                    orders.insert(id.clone(), order);
                }
                Ok(_) => {}
                Err(err) => warn!(id = %id, error = %err, "Skipping Uphold transaction"),
            }
        }
        orders
    }
}

#[async_trait]
impl OrderSource for UpholdClient {
    fn exchange(&self) -> Exchange {
        Exchange::Uphold
    }

    async fn fetch_orders(&self, watermark: &Watermark) -> Result<OrderSet> {
        let ids = self.identifiers().await?;

        let orders = match watermark {
            Watermark::Known(known) => {
                if ids.len() <= known.len() {
                    info!(listed = ids.len(), known = known.len(), "No new Uphold transactions");
                    return Ok(OrderSet::new());
                }
                let missing: Vec<&String> = ids.iter().filter(|id| !known.contains(*id)).collect();
                debug!(count = missing.len(), "Requesting new Uphold transactions");
                self.lookup(missing, 0).await
            }
            Watermark::Since(since) => self.lookup(&ids, *since).await,
        };

        info!(listed = ids.len(), fetched = orders.len(), "Uphold transactions retrieved");
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    struct Fixture {
        server: MockServer,
        _dir: tempfile::TempDir,
        client: UpholdClient,
    }

    async fn fixture(ids: &str) -> Fixture {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactionIDs");
        std::fs::write(&path, ids).unwrap();

        let config = UpholdConfig {
            enabled: true,
            api_url: server.base_url(),
            ids: path.to_string_lossy().into_owned(),
        };
        let client = UpholdClient::new(HttpClient::default(), config).unwrap();
        Fixture {
            server,
            _dir: dir,
            client,
        }
    }

    async fn mock_detail(server: &MockServer, id: &str, created_at: &str, amount: &str) {
        let path = format!("/v0/reserve/transactions/{id}");
        let body = json!({"createdAt": created_at, "destination": {"amount": amount}});
        server
            .mock_async(|when, then| {
                when.method(GET).path(path);
                then.status(200).json_body(body);
            })
            .await;
    }

    #[tokio::test]
    async fn full_fetch_rounds_amounts_to_cents() {
        let f = fixture("# reserve\ntx-1\ntx-2\n").await;
        mock_detail(&f.server, "tx-1", "2021-03-01T00:00:00.000Z", "1000.005").await;
        mock_detail(&f.server, "tx-2", "2021-04-01T00:00:00.000Z", "25").await;

        let orders = f.client.fetch_orders(&Watermark::full()).await.unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders["tx-1"].amount, "1000.01");
        assert_eq!(orders["tx-2"].amount, "25.00");
        assert_eq!(orders["tx-2"].source, Exchange::Uphold);
    }

    #[tokio::test]
    async fn unchanged_list_requests_nothing() {
        let f = fixture("tx-1\ntx-2\n").await;
        let detail = f
            .server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(500);
            })
            .await;

        let known: BTreeSet<String> = ["tx-1", "tx-2"].iter().map(|s| s.to_string()).collect();
        let orders = f.client.fetch_orders(&Watermark::Known(known)).await.unwrap();

        assert!(orders.is_empty());
        detail.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn grown_list_fetches_only_missing_ids() {
        let f = fixture("tx-1\ntx-2\ntx-3\n").await;
        mock_detail(&f.server, "tx-3", "2022-01-01T00:00:00Z", "7.5").await;

        let known: BTreeSet<String> = ["tx-1", "tx-2"].iter().map(|s| s.to_string()).collect();
        let orders = f.client.fetch_orders(&Watermark::Known(known)).await.unwrap();

        assert_eq!(orders.keys().collect::<Vec<_>>(), vec!["tx-3"]);
        assert_eq!(orders["tx-3"].amount, "7.50");
    }

    #[tokio::test]
    async fn failed_lookup_is_skipped() {
        let f = fixture("tx-ok\ntx-missing\n").await;
        mock_detail(&f.server, "tx-ok", "2022-01-01T00:00:00Z", "1").await;
        f.server
            .mock_async(|when, then| {
                when.method(GET).path("/v0/reserve/transactions/tx-missing");
                then.status(404);
            })
            .await;

        let orders = f.client.fetch_orders(&Watermark::full()).await.unwrap();

        assert_eq!(orders.len(), 1);
        assert!(orders.contains_key("tx-ok"));
    }

    #[tokio::test]
    async fn missing_id_list_is_an_error() {
        let client = UpholdClient::new(
            HttpClient::default(),
            UpholdConfig {
                ids: "/nonexistent/transactionIDs".into(),
                ..UpholdConfig::default()
            },
        )
        .unwrap();

        assert!(client.fetch_orders(&Watermark::full()).await.is_err());
    }
}
