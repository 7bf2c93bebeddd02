/// Coin domain types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{CoinId, ImageRef, Price};
use crate::error::NumisError;

/// Relative orientation of obverse and reverse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Coin alignment: reverse is upside down when flipped vertically (↑↓)
    CoinAlignment,
    /// Medal alignment: both sides upright when flipped horizontally (↑↑)
    MedalAlignment,
}

impl Orientation {
    /// All orientations, in display order
    pub const ALL: [Orientation; 2] = [Orientation::CoinAlignment, Orientation::MedalAlignment];

    /// Stable storage key
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::CoinAlignment => "coin_alignment",
            Orientation::MedalAlignment => "medal_alignment",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Orientation::CoinAlignment => "Coin alignment ↑↓",
            Orientation::MedalAlignment => "Medal alignment ↑↑",
        }
    }
}

impl FromStr for Orientation {
    type Err = NumisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coin_alignment" => Ok(Orientation::CoinAlignment),
            "medal_alignment" => Ok(Orientation::MedalAlignment),
            other => Err(NumisError::invalid_input(format!(
                "Unknown orientation: {other}"
            ))),
        }
    }
}

/// Historical, denomination, technical and cataloguing metadata
///
/// Every text field is optional; empty input is stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinDetails {
    // Historical
    pub issuer: Option<String>,
    pub authority: Option<String>,
    pub year: Option<String>,
    pub coin_type: Option<String>,

    // Denomination
    pub face_value: Option<String>,
    pub monetary_unit: Option<String>,

    // Physical characteristics
    pub composition: Option<String>,
    pub weight: Option<f64>,
    pub diameter: Option<f64>,
    pub thickness: Option<f64>,
    pub shape: Option<String>,
    pub technique: Option<String>,
    pub orientation: Option<Orientation>,

    // Cataloguing
    #[serde(default)]
    pub demonetized: bool,
    pub catalog_number: Option<String>,
    pub references: Option<String>,
}

/// Coin record as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Server-assigned identifier
    pub id: CoinId,

    pub name: String,

    /// Ordered price list (multi-currency)
    pub prices: Vec<Price>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub country: String,

    #[serde(default)]
    pub stock: u32,

    /// Listed publicly; only meaningful while `stock > 0`
    #[serde(default)]
    pub active: bool,

    /// Ordered image gallery
    #[serde(default)]
    pub images: Vec<ImageRef>,

    #[serde(flatten)]
    pub details: CoinDetails,

    /// Server-assigned creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Coin {
    /// Build a stored record from a write payload
    pub fn from_payload(id: CoinId, payload: CoinPayload, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: payload.name,
            prices: payload.prices,
            description: payload.description,
            country: payload.country,
            stock: payload.stock,
            active: payload.active,
            images: payload.images,
            details: payload.details,
            created_at,
        }
    }

    /// First price in the list, used as the headline price
    pub fn primary_price(&self) -> Option<&Price> {
        self.prices.first()
    }

    /// A coin can only be listed while there is stock to sell
    pub fn can_activate(&self) -> bool {
        self.stock > 0
    }

    /// Apply an update in place
    pub fn apply(&mut self, update: CoinUpdate) {
        match update {
            CoinUpdate::Full(payload) => {
                self.name = payload.name;
                self.prices = payload.prices;
                self.description = payload.description;
                self.country = payload.country;
                self.stock = payload.stock;
                self.active = payload.active;
                self.images = payload.images;
                self.details = payload.details;
            }
            CoinUpdate::Active(active) => self.active = active,
        }
    }

    /// Current values as a write payload
    pub fn to_payload(&self) -> CoinPayload {
        CoinPayload {
            name: self.name.clone(),
            prices: self.prices.clone(),
            description: self.description.clone(),
            country: self.country.clone(),
            stock: self.stock,
            active: self.active,
            images: self.images.clone(),
            details: self.details.clone(),
        }
    }
}

/// Full write body for creating or replacing a coin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinPayload {
    pub name: String,
    pub prices: Vec<Price>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(flatten)]
    pub details: CoinDetails,
}

impl CoinPayload {
    /// `active` must never be set without stock
    pub fn is_consistent(&self) -> bool {
        !self.active || self.stock > 0
    }
}

/// Partial update of a coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum CoinUpdate {
    /// Replace every editable field
    Full(CoinPayload),
    /// Only flip the listing flag
    Active(bool),
}

impl From<CoinPayload> for CoinUpdate {
    fn from(payload: CoinPayload) -> Self {
        CoinUpdate::Full(payload)
    }
}

/// Server-side equality filter for listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinFilter {
    /// Only coins whose `active` flag equals this value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl CoinFilter {
    /// Every coin
    pub fn all() -> Self {
        Self::default()
    }

    /// Only publicly listed coins
    pub fn active_only() -> Self {
        Self { active: Some(true) }
    }

    /// Whether a coin passes the filter
    pub fn matches(&self, coin: &Coin) -> bool {
        self.active.map_or(true, |active| coin.active == active)
    }
}
