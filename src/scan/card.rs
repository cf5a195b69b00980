//! Card records as returned by the card database.

use serde::{Deserialize, Serialize};

/// Market prices, as decimal strings in each currency.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prices {
    #[serde(default)]
    pub eur: Option<String>,
    #[serde(default)]
    pub eur_foil: Option<String>,
    #[serde(default)]
    pub usd: Option<String>,
    #[serde(default)]
    pub usd_foil: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUris {
    #[serde(default)]
    pub normal: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

/// One card, reduced to the fields the scanner shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    pub type_line: String,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub prices: Prices,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
    #[serde(default)]
    pub rulings_uri: Option<String>,
}

impl CardRecord {
    /// Best image to show, preferring the normal size.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        let uris = self.image_uris.as_ref()?;
        uris.normal.as_deref().or(uris.large.as_deref())
    }

    /// Price lines for display, regular before foil, euro before dollar.
    ///
    /// ```
    /// use ccg_companion::scan::{CardRecord, Prices};
    ///
    /// let card = CardRecord {
    ///     name: "Sol Ring".into(),
    ///     type_line: "Artifact".into(),
    ///     oracle_text: None,
    ///     mana_cost: None,
    ///     prices: Prices { eur: Some("1.20".into()), usd_foil: Some("3.50".into()), ..Prices::default() },
    ///     image_uris: None,
    ///     rulings_uri: None,
    /// };
    /// assert_eq!(card.price_lines(), vec!["Standard: 1.20 €", "Foil: 3.50 $"]);
    /// ```
    #[must_use]
    pub fn price_lines(&self) -> Vec<String> {
        let prices = &self.prices;
        [
            (&prices.eur, "Standard", "€"),
            (&prices.eur_foil, "Foil", "€"),
            (&prices.usd, "Standard", "$"),
            (&prices.usd_foil, "Foil", "$"),
        ]
        .into_iter()
        .filter_map(|(price, label, currency)| {
            price.as_ref().map(|p| format!("{label}: {p} {currency}"))
        })
        .collect()
    }
}

/// An official ruling on a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruling {
    pub published_at: String,
    pub comment: String,
}

/// A located card together with its rulings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    pub card: CardRecord,
    pub rulings: Vec<Ruling>,
}
