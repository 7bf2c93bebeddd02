//! Working copy of a coin record while it is being edited
//!
//! A [`CoinDraft`] holds every form field as the user typed it. Front ends
//! change it through [`CoinDraft::apply`] with a [`DraftAction`]; validation
//! and payload assembly live in [`crate::validate`] and read the draft
//! without touching it.

use crate::adapter::ImageFile;
use crate::error::DraftError;
use crate::keyed::{KeyedList, RowKey};
use crate::preview::{PreviewHandle, PreviewRegistry};
use numis_core::types::{Coin, CurrencyCode, ImageRef, Orientation};

/// Most images a coin can carry
pub const MAX_IMAGES: usize = 5;

/// One price line as typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRow {
    pub amount: String,
    pub currency: CurrencyCode,
}

impl Default for PriceRow {
    fn default() -> Self {
        Self {
            amount: String::new(),
            currency: CurrencyCode::default(),
        }
    }
}

/// Which half of a price row to replace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceField {
    Amount(String),
    Currency(CurrencyCode),
}

/// A picked file waiting to be uploaded, with its preview
#[derive(Debug)]
pub struct StagedImage {
    file: ImageFile,
    preview: PreviewHandle,
}

impl StagedImage {
    pub fn file(&self) -> &ImageFile {
        &self.file
    }

    pub fn preview_url(&self) -> &str {
        self.preview.url()
    }
}

/// Free-text fields of the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    Description,
    Country,
    Stock,
    Issuer,
    Authority,
    Year,
    CoinType,
    FaceValue,
    MonetaryUnit,
    Composition,
    Weight,
    Diameter,
    Thickness,
    Shape,
    Technique,
    CatalogNumber,
    References,
}

/// Every edit a front end can make to a draft
#[derive(Debug, Clone)]
pub enum DraftAction {
    SetText(TextField, String),
    SetOrientation(Option<Orientation>),
    SetDemonetized(bool),
    AddPriceRow,
    RemovePriceRow(RowKey),
    UpdatePriceRow(RowKey, PriceField),
    AddFiles(Vec<ImageFile>),
    RemoveStaged(RowKey),
    RemoveExisting(RowKey),
}

/// The structured form state for one coin
#[derive(Debug)]
pub struct CoinDraft {
    // Basic
    pub name: String,
    pub description: String,
    pub country: String,
    pub stock: String,

    // Historical
    pub issuer: String,
    pub authority: String,
    pub year: String,
    pub coin_type: String,

    // Denomination
    pub face_value: String,
    pub monetary_unit: String,

    // Technical
    pub composition: String,
    pub weight: String,
    pub diameter: String,
    pub thickness: String,
    pub shape: String,
    pub technique: String,
    pub orientation: Option<Orientation>,

    // Cataloguing
    pub demonetized: bool,
    pub catalog_number: String,
    pub references: String,

    prices: KeyedList<PriceRow>,
    staged: KeyedList<StagedImage>,
    existing: KeyedList<ImageRef>,
    previews: PreviewRegistry,
}

impl CoinDraft {
    /// Empty draft for a new coin: stock "0" and one blank ARS price row
    pub fn new(previews: PreviewRegistry) -> Self {
        let mut prices = KeyedList::new();
        prices.push(PriceRow::default());

        Self {
            name: String::new(),
            description: String::new(),
            country: String::new(),
            stock: "0".to_string(),
            issuer: String::new(),
            authority: String::new(),
            year: String::new(),
            coin_type: String::new(),
            face_value: String::new(),
            monetary_unit: String::new(),
            composition: String::new(),
            weight: String::new(),
            diameter: String::new(),
            thickness: String::new(),
            shape: String::new(),
            technique: String::new(),
            orientation: None,
            demonetized: false,
            catalog_number: String::new(),
            references: String::new(),
            prices,
            staged: KeyedList::new(),
            existing: KeyedList::new(),
            previews,
        }
    }

    /// Draft seeded from a stored record
    pub fn from_coin(coin: &Coin, previews: PreviewRegistry) -> Self {
        let mut draft = Self::new(previews);
        let details = &coin.details;

        draft.name.clone_from(&coin.name);
        if !coin.prices.is_empty() {
            draft.prices = coin
                .prices
                .iter()
                .map(|p| PriceRow {
                    amount: p.amount.to_string(),
                    currency: p.currency,
                })
                .collect();
        }
        draft.description.clone_from(&coin.description);
        draft.country.clone_from(&coin.country);
        draft.stock = coin.stock.to_string();
        draft.existing = coin.images.iter().cloned().collect();

        draft.issuer = text(details.issuer.as_deref());
        draft.authority = text(details.authority.as_deref());
        draft.year = text(details.year.as_deref());
        draft.coin_type = text(details.coin_type.as_deref());
        draft.face_value = text(details.face_value.as_deref());
        draft.monetary_unit = text(details.monetary_unit.as_deref());
        draft.composition = text(details.composition.as_deref());
        draft.weight = number(details.weight);
        draft.diameter = number(details.diameter);
        draft.thickness = number(details.thickness);
        draft.shape = text(details.shape.as_deref());
        draft.technique = text(details.technique.as_deref());
        draft.orientation = details.orientation;
        draft.demonetized = details.demonetized;
        draft.catalog_number = text(details.catalog_number.as_deref());
        draft.references = text(details.references.as_deref());

        draft
    }

    /// Apply one edit
    ///
    /// Only `AddFiles` can be refused; a refused edit leaves the draft as it was.
    pub fn apply(&mut self, action: DraftAction) -> Result<(), DraftError> {
        match action {
            DraftAction::SetText(field, value) => *self.text_mut(field) = value,
            DraftAction::SetOrientation(orientation) => self.orientation = orientation,
            DraftAction::SetDemonetized(demonetized) => self.demonetized = demonetized,
            DraftAction::AddPriceRow => {
                self.add_price_row();
            }
            DraftAction::RemovePriceRow(key) => {
                self.remove_price_row(key);
            }
            DraftAction::UpdatePriceRow(key, field) => {
                self.update_price_row(key, field);
            }
            DraftAction::AddFiles(files) => {
                self.add_files(files)?;
            }
            DraftAction::RemoveStaged(key) => {
                self.remove_staged(key);
            }
            DraftAction::RemoveExisting(key) => {
                self.remove_existing(key);
            }
        }
        Ok(())
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Name => &mut self.name,
            TextField::Description => &mut self.description,
            TextField::Country => &mut self.country,
            TextField::Stock => &mut self.stock,
            TextField::Issuer => &mut self.issuer,
            TextField::Authority => &mut self.authority,
            TextField::Year => &mut self.year,
            TextField::CoinType => &mut self.coin_type,
            TextField::FaceValue => &mut self.face_value,
            TextField::MonetaryUnit => &mut self.monetary_unit,
            TextField::Composition => &mut self.composition,
            TextField::Weight => &mut self.weight,
            TextField::Diameter => &mut self.diameter,
            TextField::Thickness => &mut self.thickness,
            TextField::Shape => &mut self.shape,
            TextField::Technique => &mut self.technique,
            TextField::CatalogNumber => &mut self.catalog_number,
            TextField::References => &mut self.references,
        }
    }

    // Prices

    /// Append a blank row in the default currency
    pub fn add_price_row(&mut self) -> RowKey {
        self.prices.push(PriceRow::default())
    }

    /// Remove a row unless it is the last one
    pub fn remove_price_row(&mut self, key: RowKey) -> bool {
        if self.prices.len() < 2 {
            return false;
        }
        self.prices.remove(key).is_some()
    }

    /// Replace the amount or currency of a row; no validation
    pub fn update_price_row(&mut self, key: RowKey, field: PriceField) -> bool {
        let Some(row) = self.prices.get_mut(key) else {
            return false;
        };
        match field {
            PriceField::Amount(amount) => row.amount = amount,
            PriceField::Currency(currency) => row.currency = currency,
        }
        true
    }

    pub fn prices(&self) -> &KeyedList<PriceRow> {
        &self.prices
    }

    // Images

    /// Stage files for upload, allocating one preview each
    pub fn add_files(&mut self, files: Vec<ImageFile>) -> Result<(), DraftError> {
        if self.image_count() + files.len() > MAX_IMAGES {
            return Err(DraftError::MaxImages { limit: MAX_IMAGES });
        }

        for file in files {
            let preview = self.previews.allocate(&file.name);
            self.staged.push(StagedImage { file, preview });
        }
        Ok(())
    }

    /// Drop a staged file; its preview is revoked with it
    pub fn remove_staged(&mut self, key: RowKey) -> bool {
        self.staged.remove(key).is_some()
    }

    /// Drop a stored image from the working list; the object itself stays
    pub fn remove_existing(&mut self, key: RowKey) -> bool {
        self.existing.remove(key).is_some()
    }

    pub fn staged(&self) -> &KeyedList<StagedImage> {
        &self.staged
    }

    pub fn existing(&self) -> &KeyedList<ImageRef> {
        &self.existing
    }

    /// Staged plus existing images
    pub fn image_count(&self) -> usize {
        self.staged.len() + self.existing.len()
    }
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
