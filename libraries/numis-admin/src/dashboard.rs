//! Dashboard controller
//!
//! Holds the raw coin list as loaded from the backend plus the user's
//! filter/sort controls. The visible list is always derived from those two,
//! never stored.

use crate::adapter::Adapter;
use crate::collate::{compare_names, contains_ignore_case};
use crate::i18n::MessageKey;
use crate::settings::SettingsContext;
use crate::toast::{Toast, ToastKind, ToastQueue};
use numis_core::types::{Coin, CoinId, CoinUpdate};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl ActiveFilter {
    fn matches(self, coin: &Coin) -> bool {
        match self {
            ActiveFilter::All => true,
            ActiveFilter::Active => coin.active,
            ActiveFilter::Inactive => !coin.active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CountryFilter {
    #[default]
    All,
    Exactly(String),
}

impl CountryFilter {
    fn matches(&self, coin: &Coin) -> bool {
        match self {
            CountryFilter::All => true,
            CountryFilter::Exactly(country) => coin.country == *country,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest first, as the backend returns them
    #[default]
    CreatedDesc,
    NameAsc,
    /// Highest primary price first; coins without a price go last
    PriceDesc,
}

/// Totals over the unfiltered list
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Sum of primary price amounts, currencies mixed
    pub price_sum: f64,
    pub stock_sum: u64,
}

impl DashboardStats {
    pub fn compute(coins: &[Coin]) -> Self {
        let total = coins.len();
        let active = coins.iter().filter(|c| c.active).count();
        Self {
            total,
            active,
            inactive: total - active,
            price_sum: coins
                .iter()
                .filter_map(|c| c.primary_price())
                .map(|p| p.amount)
                .sum(),
            stock_sum: coins.iter().map(|c| u64::from(c.stock)).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(CoinId),
    Failed(String),
    /// `confirm_delete` without a pending request
    NothingPending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Activated,
    Deactivated,
    /// Activation refused because the coin has no stock
    Refused,
    NotFound,
    Failed(String),
}

pub struct Dashboard {
    adapter: Adapter,
    settings: SettingsContext,
    coins: Vec<Coin>,
    query: String,
    active_filter: ActiveFilter,
    country_filter: CountryFilter,
    sort: SortOrder,
    pending_delete: Option<CoinId>,
    toasts: ToastQueue,
    loading: bool,
}

impl Dashboard {
    pub fn new(adapter: Adapter, settings: SettingsContext) -> Self {
        Self {
            adapter,
            settings,
            coins: Vec::new(),
            query: String::new(),
            active_filter: ActiveFilter::default(),
            country_filter: CountryFilter::default(),
            sort: SortOrder::default(),
            pending_delete: None,
            toasts: ToastQueue::new(),
            loading: false,
        }
    }

    /// Fetch every coin; a failed fetch leaves the list empty
    pub async fn load(&mut self) {
        self.loading = true;
        self.coins = match self.adapter.list_records().await {
            Ok(coins) => coins,
            Err(e) => {
                error!(error = %e, "Failed to load coins");
                Vec::new()
            }
        };
        self.loading = false;
    }

    // Controls

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_active_filter(&mut self, filter: ActiveFilter) {
        self.active_filter = filter;
    }

    pub fn set_country_filter(&mut self, filter: CountryFilter) {
        self.country_filter = filter;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn active_filter(&self) -> ActiveFilter {
        self.active_filter
    }

    pub fn country_filter(&self) -> &CountryFilter {
        &self.country_filter
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    // Derived views

    /// Filtered and sorted coins
    pub fn visible(&self) -> Vec<&Coin> {
        let query = self.query.trim();
        let mut coins: Vec<&Coin> = self
            .coins
            .iter()
            .filter(|c| query.is_empty() || contains_ignore_case(&c.name, query))
            .filter(|c| self.active_filter.matches(c))
            .filter(|c| self.country_filter.matches(c))
            .collect();

        match self.sort {
            SortOrder::CreatedDesc => coins.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::NameAsc => coins.sort_by(|a, b| compare_names(&a.name, &b.name)),
            SortOrder::PriceDesc => coins.sort_by(|a, b| compare_price_desc(a, b)),
        }
        coins
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::compute(&self.coins)
    }

    /// Distinct non-empty countries of the loaded coins, sorted
    pub fn countries(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .coins
            .iter()
            .map(|c| c.country.trim())
            .filter(|c| !c.is_empty())
            .collect();
        let mut countries: Vec<String> = set.into_iter().map(str::to_string).collect();
        countries.sort_by(|a, b| compare_names(a, b));
        countries
    }

    /// The raw list, in load order
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // Delete

    /// Ask for confirmation before deleting
    pub fn request_delete(&mut self, id: CoinId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<&CoinId> {
        self.pending_delete.as_ref()
    }

    /// Delete the pending coin: its images one by one, then the record
    ///
    /// Image delete failures are logged and never stop the record delete.
    pub async fn confirm_delete(&mut self) -> DeleteOutcome {
        let Some(id) = self.pending_delete.take() else {
            return DeleteOutcome::NothingPending;
        };

        let paths: Vec<String> = self
            .coins
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.images.iter().map(|i| i.path.clone()).collect())
            .unwrap_or_default();

        for path in &paths {
            if let Err(e) = self.adapter.delete_file(path).await {
                warn!(coin_id = %id, path = %path, error = %e, "Image delete failed");
            }
        }

        let outcome = match self.adapter.delete_record(&id).await {
            Ok(()) => {
                info!(coin_id = %id, images = paths.len(), "Coin deleted");
                self.notify(MessageKey::Deleted, ToastKind::Success);
                DeleteOutcome::Deleted(id)
            }
            Err(e) => {
                self.notify(MessageKey::DashboardError, ToastKind::Error);
                DeleteOutcome::Failed(e.message)
            }
        };

        self.load().await;
        outcome
    }

    // Toggle

    /// Flip a coin's listing flag; activation needs stock
    pub async fn toggle_active(&mut self, id: &CoinId) -> ToggleOutcome {
        let Some(coin) = self.coins.iter().find(|c| &c.id == id) else {
            return ToggleOutcome::NotFound;
        };

        let activate = !coin.active;
        if activate && !coin.can_activate() {
            self.notify(MessageKey::CannotActivate, ToastKind::Warning);
            return ToggleOutcome::Refused;
        }

        let outcome = match self
            .adapter
            .update_record(id, CoinUpdate::Active(activate))
            .await
        {
            Ok(()) if activate => {
                self.notify(MessageKey::Activated, ToastKind::Success);
                ToggleOutcome::Activated
            }
            Ok(()) => {
                self.notify(MessageKey::Deactivated, ToastKind::Success);
                ToggleOutcome::Deactivated
            }
            Err(e) => {
                self.notify(MessageKey::DashboardError, ToastKind::Error);
                ToggleOutcome::Failed(e.message)
            }
        };

        self.load().await;
        outcome
    }

    // Toasts

    fn notify(&mut self, key: MessageKey, kind: ToastKind) {
        self.toasts
            .push(Toast::new(self.settings.message(key), kind));
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }
}

fn compare_price_desc(a: &Coin, b: &Coin) -> Ordering {
    match (a.primary_price(), b.primary_price()) {
        (Some(pa), Some(pb)) => pb.amount.total_cmp(&pa.amount),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
