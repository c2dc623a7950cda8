//! Client-side entity caches.
//!
//! Each [`EntityStore`] owns one collection slot and one "current selection"
//! slot. Operations are only available for entities whose backend exposes the
//! matching endpoint, expressed through the capability traits below.
//!
//! Cache policy:
//! - `list` replaces the collection wholesale; a failed `list` empties it.
//! - `create` appends the server's record on success and leaves the
//!   collection untouched otherwise.
//! - `remove` drops the record locally before the request and never puts it
//!   back, even when the backend refuses.
//! - `get_one` overwrites the selection slot; last fetch wins.

pub mod agent;
pub mod booking;
pub mod organization;
pub mod service;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::GatewayError;
use crate::gateway::{RemoteGateway, RequestBody, Route};
use crate::models::{Agent, Booking, Organization, Service};
use crate::notify::NotificationSink;

pub type AgentStore = EntityStore<Agent>;
pub type BookingStore = EntityStore<Booking>;
pub type OrganizationStore = EntityStore<Organization>;
pub type ServiceStore = EntityStore<Service>;

/// A record type the console caches
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Human label used in diagnostics
    const KIND: &'static str;
}

/// Records carrying a server-assigned identifier
pub trait Keyed: Resource {
    fn id(&self) -> &str;
}

pub trait Listable: Resource {
    const LISTED: Option<&'static str>;
    const LIST_FAILED: &'static str;

    fn list_route() -> Route;
}

pub trait Creatable: Resource {
    /// Client-side input for a new record
    type Draft: Send + Sync;

    const CREATED: &'static str;
    const CREATE_FAILED: &'static str;

    fn create_route() -> Route;
    fn create_body(draft: &Self::Draft) -> Result<RequestBody, GatewayError>;
}

pub trait Removable: Keyed {
    const REMOVED: &'static str;
    const REMOVE_FAILED: &'static str;

    fn remove_route(id: &str) -> Route;
}

pub trait Fetchable: Resource {
    const FETCH_FAILED: &'static str;

    fn fetch_route(id: &str) -> Route;
}

/// Cache of one entity type, mediating every read and write against the backend
pub struct EntityStore<T> {
    gateway: Arc<dyn RemoteGateway>,
    notifier: Arc<dyn NotificationSink>,
    items: RwLock<Vec<T>>,
    current: RwLock<Option<T>>,
}

impl<T: Resource> EntityStore<T> {
    pub fn new(gateway: Arc<dyn RemoteGateway>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            gateway,
            notifier,
            items: RwLock::new(Vec::new()),
            current: RwLock::new(None),
        }
    }

    /// Copy of the cached collection, in backend order
    pub fn snapshot(&self) -> Vec<T> {
        self.read_items().clone()
    }

    /// Copy of the current selection slot
    pub fn current(&self) -> Option<T> {
        self.read_current().clone()
    }

    pub fn len(&self) -> usize {
        self.read_items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_items().is_empty()
    }

    pub(crate) fn gateway(&self) -> &dyn RemoteGateway {
        self.gateway.as_ref()
    }

    pub(crate) fn notifier(&self) -> &dyn NotificationSink {
        self.notifier.as_ref()
    }

    pub(crate) fn set_current(&self, record: Option<T>) {
        *self.write_current() = record;
    }

    /// Log the failure and raise exactly one error notification
    pub(crate) fn report(&self, operation: &str, message: &str, err: &GatewayError) {
        warn!("{} {} failed: {}", T::KIND, operation, err);
        self.notifier.notify_error(message);
    }

    fn read_items(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_items(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_current(&self) -> RwLockReadGuard<'_, Option<T>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_current(&self) -> RwLockWriteGuard<'_, Option<T>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Keyed> EntityStore<T> {
    /// Look a record up in the cached collection
    pub fn find(&self, id: &str) -> Option<T> {
        self.read_items().iter().find(|r| r.id() == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read_items().iter().any(|r| r.id() == id)
    }
}

impl<T: Listable> EntityStore<T> {
    /// Replace the collection with the backend's. Failure empties it.
    pub async fn list(&self) {
        let fetched = T::list_route()
            .fetch::<Vec<T>>(self.gateway(), RequestBody::Empty)
            .await;

        match fetched {
            Ok(records) => {
                info!("Cached {} {} records", records.len(), T::KIND);
                *self.write_items() = records;
                if let Some(message) = T::LISTED {
                    self.notifier.notify_success(message);
                }
            }
            Err(err) => {
                self.write_items().clear();
                self.report("list", T::LIST_FAILED, &err);
            }
        }
    }
}

impl<T: Creatable> EntityStore<T> {
    /// Send a new record; append the server's copy on success
    pub async fn create(&self, draft: &T::Draft) {
        let created = match T::create_body(draft) {
            Ok(body) => T::create_route().fetch::<T>(self.gateway(), body).await,
            Err(err) => Err(err),
        };

        match created {
            Ok(record) => {
                self.write_items().push(record);
                info!("Appended new {} record", T::KIND);
                self.notifier.notify_success(T::CREATED);
            }
            Err(err) => self.report("create", T::CREATE_FAILED, &err),
        }
    }
}

impl<T: Removable> EntityStore<T> {
    /// Drop the record locally, then ask the backend to delete it.
    /// The local removal stands whatever the backend answers.
    pub async fn remove(&self, id: &str) {
        let removed = {
            let mut items = self.write_items();
            let before = items.len();
            items.retain(|r| r.id() != id);
            before - items.len()
        };
        info!("Dropped {} cached {} record(s) for {}", removed, T::KIND, id);

        match T::remove_route(id)
            .call(self.gateway(), RequestBody::Empty)
            .await
        {
            Ok(_) => self.notifier.notify_success(T::REMOVED),
            Err(err) => self.report("remove", T::REMOVE_FAILED, &err),
        }
    }
}

impl<T: Fetchable> EntityStore<T> {
    /// Fetch one record into the selection slot
    pub async fn get_one(&self, id: &str) {
        match T::fetch_route(id)
            .fetch::<T>(self.gateway(), RequestBody::Empty)
            .await
        {
            Ok(record) => self.set_current(Some(record)),
            Err(err) => self.report("get_one", T::FETCH_FAILED, &err),
        }
    }
}
