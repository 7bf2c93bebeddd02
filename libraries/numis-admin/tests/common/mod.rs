//! In-memory backend for admin panel tests
//!
//! Implements every backend trait, records each call in order and lets a test
//! make individual operations fail.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use numis_admin::{Adapter, ImageFile, PreviewRegistry, SettingsContext};
use numis_core::types::*;
use numis_core::{AuthProvider, NumisError, ObjectStore, RecordStore, SessionWatch};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

pub const PASSWORD: &str = "correct horse";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    PutObject(String),
    DeleteObject(String),
    Create(CoinPayload),
    Update(CoinId, CoinUpdate),
    Delete(CoinId),
    Get(CoinId),
    List,
}

#[derive(Default)]
struct State {
    coins: Vec<Coin>,
    objects: HashSet<String>,
    calls: Vec<Call>,
    uploads_before_failure: Option<usize>,
    fail_create: Option<String>,
    fail_update: Option<String>,
    fail_delete_record: bool,
    fail_list: bool,
    failing_object_deletes: HashSet<String>,
}

pub struct FakeBackend {
    state: Mutex<State>,
    session: watch::Sender<Option<AuthUser>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        let (session, _) = watch::channel(None);
        Arc::new(Self {
            state: Mutex::new(State::default()),
            session,
        })
    }

    /// Seed a stored coin; later seeds are newer
    pub fn seed(&self, payload: CoinPayload) -> Coin {
        let mut state = self.state.lock().unwrap();
        let age = 1000 - state.coins.len() as i64;
        let coin = Coin::from_payload(CoinId::generate(), payload, Utc::now() - Duration::minutes(age));
        for image in &coin.images {
            state.objects.insert(image.path.clone());
        }
        state.coins.insert(0, coin.clone());
        coin
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Create(_) | Call::Update(..) | Call::Delete(_)))
            .collect()
    }

    pub fn coin(&self, id: &CoinId) -> Option<Coin> {
        self.state
            .lock()
            .unwrap()
            .coins
            .iter()
            .find(|c| &c.id == id)
            .cloned()
    }

    pub fn coin_count(&self) -> usize {
        self.state.lock().unwrap().coins.len()
    }

    pub fn has_object(&self, path: &str) -> bool {
        self.state.lock().unwrap().objects.contains(path)
    }

    pub fn fail_uploads_after(&self, successes: usize) {
        self.state.lock().unwrap().uploads_before_failure = Some(successes);
    }

    pub fn fail_create(&self, message: &str) {
        self.state.lock().unwrap().fail_create = Some(message.to_string());
    }

    pub fn fail_update(&self, message: &str) {
        self.state.lock().unwrap().fail_update = Some(message.to_string());
    }

    pub fn fail_delete_record(&self) {
        self.state.lock().unwrap().fail_delete_record = true;
    }

    pub fn fail_list(&self) {
        self.state.lock().unwrap().fail_list = true;
    }

    pub fn fail_object_delete(&self, path: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_object_deletes
            .insert(path.to_string());
    }
}

#[async_trait]
impl RecordStore for FakeBackend {
    async fn create_coin(&self, payload: CoinPayload) -> numis_core::Result<Coin> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create(payload.clone()));
        if let Some(message) = &state.fail_create {
            return Err(NumisError::storage(message.clone()));
        }
        let coin = Coin::from_payload(CoinId::generate(), payload, Utc::now());
        state.coins.insert(0, coin.clone());
        Ok(coin)
    }

    async fn get_coin(&self, id: &CoinId) -> numis_core::Result<Option<Coin>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Get(id.clone()));
        Ok(state.coins.iter().find(|c| &c.id == id).cloned())
    }

    async fn list_coins(&self, filter: CoinFilter) -> numis_core::Result<Vec<Coin>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::List);
        if state.fail_list {
            return Err(NumisError::network("backend unreachable"));
        }
        Ok(state
            .coins
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn update_coin(&self, id: &CoinId, update: CoinUpdate) -> numis_core::Result<Coin> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Update(id.clone(), update.clone()));
        if let Some(message) = &state.fail_update {
            return Err(NumisError::storage(message.clone()));
        }
        let coin = state
            .coins
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| NumisError::CoinNotFound(id.clone()))?;
        coin.apply(update);
        Ok(coin.clone())
    }

    async fn delete_coin(&self, id: &CoinId) -> numis_core::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Delete(id.clone()));
        if state.fail_delete_record {
            return Err(NumisError::storage("delete refused"));
        }
        let before = state.coins.len();
        state.coins.retain(|c| &c.id != id);
        if state.coins.len() == before {
            return Err(NumisError::CoinNotFound(id.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for FakeBackend {
    async fn put_object(
        &self,
        path: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> numis_core::Result<String> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::PutObject(path.to_string()));
        if let Some(remaining) = state.uploads_before_failure.as_mut() {
            if *remaining == 0 {
                return Err(NumisError::object_storage("bucket full"));
            }
            *remaining -= 1;
        }
        if !state.objects.insert(path.to_string()) {
            return Err(NumisError::object_storage(format!("object exists: {path}")));
        }
        Ok(format!("https://cdn.test/{path}"))
    }

    async fn delete_object(&self, path: &str) -> numis_core::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::DeleteObject(path.to_string()));
        if state.failing_object_deletes.contains(path) {
            return Err(NumisError::object_storage("object locked"));
        }
        state.objects.remove(path);
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for FakeBackend {
    async fn sign_in(&self, email: &str, password: &str) -> numis_core::Result<AuthUser> {
        if password != PASSWORD {
            return Err(NumisError::auth("Invalid email or password"));
        }
        let user = AuthUser::new(UserId::new("admin-1"), email);
        self.session.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> numis_core::Result<()> {
        self.session.send_replace(None);
        Ok(())
    }

    fn subscribe(&self) -> SessionWatch {
        self.session.subscribe()
    }
}

impl FakeBackend {
    /// Simulate the provider ending the session on its own
    pub fn expire_session(&self) {
        self.session.send_replace(None);
    }
}

pub fn adapter(backend: &Arc<FakeBackend>) -> Adapter {
    Adapter::new(backend.clone(), backend.clone())
}

pub fn settings() -> SettingsContext {
    SettingsContext::default()
}

pub fn previews() -> PreviewRegistry {
    PreviewRegistry::new()
}

pub fn jpeg(name: &str) -> ImageFile {
    ImageFile::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF])
}

/// A complete payload with `image_count` images and the given stock
pub fn payload(name: &str, stock: u32, image_count: usize) -> CoinPayload {
    CoinPayload {
        name: name.to_string(),
        prices: vec![Price::new(100.0, CurrencyCode::Ars)],
        description: String::new(),
        country: "Argentina".to_string(),
        stock,
        active: stock > 0,
        images: (0..image_count)
            .map(|i| {
                let path = format!("1700000000000_{name}_{i}.jpg");
                ImageRef::new(format!("https://cdn.test/{path}"), path)
            })
            .collect(),
        details: CoinDetails::default(),
    }
}
