// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog store: categories, cities and statuses.
//!
//! Creates and updates re-fetch the whole collection so server-computed
//! fields (incident counts) stay consistent. Deletes filter the local list.

use super::{track, ActionState};
use crate::error::Result;
use crate::models::{
    Category, City, CreateCategoryDto, CreateCityDto, CreateStatusDto, Status, UpdateCategoryDto,
    UpdateCityDto, UpdateStatusDto,
};
use crate::services::ApiClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;

/// Snapshot of all catalog collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogsState {
    pub categories: Vec<Category>,
    pub cities: Vec<City>,
    pub statuses: Vec<Status>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ActionState for CatalogsState {
    fn loading_mut(&mut self) -> &mut bool {
        &mut self.is_loading
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }
}

/// Failure messages for one catalog collection.
#[derive(Debug, Clone, Copy)]
pub struct CatalogMessages {
    pub fetch: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

/// A catalog collection served under `/<PATH>` and `/<PATH>/:id`.
pub trait CatalogEntry: DeserializeOwned + Clone {
    const PATH: &'static str;
    const MESSAGES: CatalogMessages;

    fn id(&self) -> u64;
    fn list(state: &CatalogsState) -> &[Self];
    fn list_mut(state: &mut CatalogsState) -> &mut Vec<Self>;
}

impl CatalogEntry for Category {
    const PATH: &'static str = "categories";
    const MESSAGES: CatalogMessages = CatalogMessages {
        fetch: "Error al cargar las categorías",
        create: "Error al crear la categoría",
        update: "Error al actualizar la categoría",
        delete: "Error al eliminar la categoría",
    };

    fn id(&self) -> u64 {
        self.category_id
    }

    fn list(state: &CatalogsState) -> &[Self] {
        &state.categories
    }

    fn list_mut(state: &mut CatalogsState) -> &mut Vec<Self> {
        &mut state.categories
    }
}

impl CatalogEntry for City {
    const PATH: &'static str = "cities";
    const MESSAGES: CatalogMessages = CatalogMessages {
        fetch: "Error al cargar las ciudades",
        create: "Error al crear la ciudad",
        update: "Error al actualizar la ciudad",
        delete: "Error al eliminar la ciudad",
    };

    fn id(&self) -> u64 {
        self.city_id
    }

    fn list(state: &CatalogsState) -> &[Self] {
        &state.cities
    }

    fn list_mut(state: &mut CatalogsState) -> &mut Vec<Self> {
        &mut state.cities
    }
}

impl CatalogEntry for Status {
    const PATH: &'static str = "statuses";
    const MESSAGES: CatalogMessages = CatalogMessages {
        fetch: "Error al cargar los estados",
        create: "Error al crear el estado",
        update: "Error al actualizar el estado",
        delete: "Error al eliminar el estado",
    };

    fn id(&self) -> u64 {
        self.status_id
    }

    fn list(state: &CatalogsState) -> &[Self] {
        &state.statuses
    }

    fn list_mut(state: &mut CatalogsState) -> &mut Vec<Self> {
        &mut state.statuses
    }
}

pub struct CatalogsStore {
    api: ApiClient,
    state: watch::Sender<CatalogsState>,
}

impl CatalogsStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: watch::Sender::new(CatalogsState::default()),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> CatalogsState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<CatalogsState> {
        self.state.subscribe()
    }

    // ─── Generic collection actions ──────────────────────────────────

    /// Replace the local collection with the server's.
    pub async fn fetch<C: CatalogEntry>(&self) -> Result<()> {
        track(&self.state, C::MESSAGES.fetch, async {
            let items: Vec<C> = self.api.get(C::PATH).await?;
            tracing::debug!(collection = C::PATH, count = items.len(), "Fetched catalog");
            self.state.send_modify(|s| *C::list_mut(s) = items);
            Ok(())
        })
        .await
    }

    /// Create an entry, then re-fetch the collection.
    pub async fn create<C: CatalogEntry, B: Serialize>(&self, body: &B) -> Result<()> {
        track(&self.state, C::MESSAGES.create, async {
            self.api.post(C::PATH, body).await?;
            self.fetch::<C>().await
        })
        .await
    }

    /// Update an entry, then re-fetch the collection.
    pub async fn update<C: CatalogEntry, B: Serialize>(&self, id: u64, body: &B) -> Result<()> {
        track(&self.state, C::MESSAGES.update, async {
            self.api.patch(&format!("{}/{}", C::PATH, id), body).await?;
            self.fetch::<C>().await
        })
        .await
    }

    /// Delete an entry and drop it from the local collection.
    pub async fn delete<C: CatalogEntry>(&self, id: u64) -> Result<()> {
        track(&self.state, C::MESSAGES.delete, async {
            self.api.delete(&format!("{}/{}", C::PATH, id)).await?;
            self.state
                .send_modify(|s| C::list_mut(s).retain(|item| item.id() != id));
            tracing::debug!(collection = C::PATH, id, "Deleted catalog entry");
            Ok(())
        })
        .await
    }

    /// Look up a loaded entry by id. No network call.
    pub fn get_by_id<C: CatalogEntry>(&self, id: u64) -> Option<C> {
        C::list(&self.state.borrow())
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    // ─── Categories ──────────────────────────────────────────────────

    pub async fn fetch_categories(&self) -> Result<()> {
        self.fetch::<Category>().await
    }

    pub async fn create_category(&self, data: &CreateCategoryDto) -> Result<()> {
        self.create::<Category, _>(data).await
    }

    pub async fn update_category(&self, id: u64, data: &UpdateCategoryDto) -> Result<()> {
        self.update::<Category, _>(id, data).await
    }

    pub async fn delete_category(&self, id: u64) -> Result<()> {
        self.delete::<Category>(id).await
    }

    pub fn get_category_by_id(&self, id: u64) -> Option<Category> {
        self.get_by_id(id)
    }

    // ─── Cities ──────────────────────────────────────────────────────

    pub async fn fetch_cities(&self) -> Result<()> {
        self.fetch::<City>().await
    }

    pub async fn create_city(&self, data: &CreateCityDto) -> Result<()> {
        self.create::<City, _>(data).await
    }

    pub async fn update_city(&self, id: u64, data: &UpdateCityDto) -> Result<()> {
        self.update::<City, _>(id, data).await
    }

    pub async fn delete_city(&self, id: u64) -> Result<()> {
        self.delete::<City>(id).await
    }

    pub fn get_city_by_id(&self, id: u64) -> Option<City> {
        self.get_by_id(id)
    }

    // ─── Statuses ────────────────────────────────────────────────────

    pub async fn fetch_statuses(&self) -> Result<()> {
        self.fetch::<Status>().await
    }

    pub async fn create_status(&self, data: &CreateStatusDto) -> Result<()> {
        self.create::<Status, _>(data).await
    }

    pub async fn update_status(&self, id: u64, data: &UpdateStatusDto) -> Result<()> {
        self.update::<Status, _>(id, data).await
    }

    pub async fn delete_status(&self, id: u64) -> Result<()> {
        self.delete::<Status>(id).await
    }

    pub fn get_status_by_id(&self, id: u64) -> Option<Status> {
        self.get_by_id(id)
    }

    // ─── Helpers ─────────────────────────────────────────────────────

    /// Fetch the three collections concurrently.
    ///
    /// Waits for all of them; returns the first failure in category, city,
    /// status order.
    pub async fn fetch_all_catalogs(&self) -> Result<()> {
        let (categories, cities, statuses) = futures_util::future::join3(
            self.fetch_categories(),
            self.fetch_cities(),
            self.fetch_statuses(),
        )
        .await;

        categories.and(cities).and(statuses)
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }
}
