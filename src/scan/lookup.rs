//! Card database lookup.

use std::future::Future;

use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::card::{CardDetails, CardRecord, Ruling};
use super::config::ScanConfig;
use super::error::{Result, ScanError, ScanStage};

/// Something that can find a card by exact name.
pub trait CardLookup {
    /// The card and its rulings. `ScanError::CardNotFound` when the
    /// database has no such card.
    fn lookup(&self, name: &str) -> impl Future<Output = Result<CardDetails>> + Send;
}

/// Lookup against the Scryfall REST API.
#[derive(Clone, Debug)]
pub struct ScryfallClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct RulingList {
    data: Vec<Ruling>,
}

impl ScryfallClient {
    pub fn new(http: reqwest::Client, config: &ScanConfig) -> Self {
        Self {
            http,
            base_url: config.card_api_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.http
            .get(url)
            .query(query)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ScanError::transport(ScanStage::Lookup, e))?
            .json()
            .await
            .map_err(|e| ScanError::transport(ScanStage::Lookup, e))
    }

    async fn rulings(&self, card: &CardRecord) -> Result<Vec<Ruling>> {
        match &card.rulings_uri {
            Some(uri) => parse_rulings(self.get_json(uri, &[]).await?),
            None => Ok(Vec::new()),
        }
    }
}

impl CardLookup for ScryfallClient {
    async fn lookup(&self, name: &str) -> Result<CardDetails> {
        let url = format!("{}/cards/named", self.base_url);
        debug!(%url, name, "looking up card");

        let card = parse_card(self.get_json(&url, &[("exact", name)]).await?)?;
        let rulings = self.rulings(&card).await?;
        Ok(CardDetails { card, rulings })
    }
}

/// Decode a card response. Error envelopes become `CardNotFound`.
pub fn parse_card(body: Value) -> Result<CardRecord> {
    if body.get("object").and_then(Value::as_str) == Some("error") {
        let details = body
            .get("details")
            .and_then(Value::as_str)
            .unwrap_or("Card not found");
        return Err(ScanError::CardNotFound(details.to_string()));
    }
    serde_json::from_value(body).map_err(|e| ScanError::transport(ScanStage::Lookup, e))
}

/// Decode a rulings list response.
pub fn parse_rulings(body: Value) -> Result<Vec<Ruling>> {
    serde_json::from_value::<RulingList>(body)
        .map(|list| list.data)
        .map_err(|e| ScanError::transport(ScanStage::Lookup, e))
}
