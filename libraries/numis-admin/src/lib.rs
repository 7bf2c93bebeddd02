//! Numis Admin
//!
//! Front-end independent logic of the numismatic admin panel.
//!
//! # Architecture
//!
//! ```text
//! RouteGuard ──> page ──> CoinForm ──> Adapter ──> RecordStore / ObjectStore
//!                  └────> Dashboard ───┘
//! ```
//!
//! - [`form::CoinForm`] owns a [`draft::CoinDraft`], validates it, uploads
//!   staged images and persists the record, rolling uploads back when the
//!   record write fails.
//! - [`dashboard::Dashboard`] filters, sorts and summarises the coin list and
//!   performs deletes and activation toggles.
//! - [`session::AuthContext`] follows the auth provider's session;
//!   [`guard::RouteGuard`] gates pages on it.
//! - [`settings::SettingsContext`] carries theme and language to every page.
//!
//! Rendering is left to the front end: it reads state through accessors and
//! feeds edits back as [`draft::DraftAction`] values.

#![forbid(unsafe_code)]

pub mod adapter;
pub mod collate;
pub mod dashboard;
pub mod draft;
pub mod error;
pub mod form;
pub mod guard;
pub mod i18n;
pub mod keyed;
pub mod preview;
pub mod session;
pub mod settings;
pub mod toast;
pub mod validate;

pub use adapter::{Adapter, AdapterError, AdapterResult, ImageFile, Uploaded};
pub use dashboard::{
    ActiveFilter, CountryFilter, Dashboard, DashboardStats, DeleteOutcome, SortOrder,
    ToggleOutcome,
};
pub use draft::{CoinDraft, DraftAction, PriceField, PriceRow, TextField, MAX_IMAGES};
pub use error::{DraftError, FormError, ValidationError};
pub use form::{CoinForm, FormMode, LoadOutcome, Redirect, SubmitOutcome, SubmitPhase};
pub use guard::{GuardDecision, Route, RouteGuard};
pub use i18n::{translate, Language, MessageKey};
pub use keyed::{KeyedList, RowKey};
pub use preview::{PreviewHandle, PreviewRegistry};
pub use session::AuthContext;
pub use settings::{Settings, SettingsContext, Theme};
pub use toast::{Toast, ToastKind, ToastQueue, TOAST_TTL};
pub use validate::{assemble_payload, validate};
