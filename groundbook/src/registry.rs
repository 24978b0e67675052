//! Venue registry: create, read, update and delete venue records.
//!
//! Deleting a venue never touches its bookings. Those stay in the store
//! with a `groundId` that no longer resolves, and readers are expected to
//! cope with that.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::store::{self, Collection, RecordStore};
use crate::venue::{Venue, VenueConfig, VenuePatch};

/// CRUD access to the venues collection.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use groundbook::store::MemoryStore;
/// use groundbook::{VenueConfig, VenueRegistry};
///
/// let registry = VenueRegistry::new(Arc::new(MemoryStore::new()));
/// let venue = registry.create(VenueConfig::new("City Arena", "Ali")).unwrap();
/// assert_eq!(registry.get(venue.id()).unwrap(), venue);
/// assert_eq!(registry.list().unwrap().len(), 1);
/// ```
#[derive(Clone)]
pub struct VenueRegistry {
    store: Arc<dyn RecordStore>,
}

impl VenueRegistry {
    /// Creates a registry over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Looks up a venue, returning `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn find(&self, id: &str) -> Result<Option<Venue>> {
        find_venue(self.store.as_ref(), id)
    }

    /// Returns the venue with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such venue exists, or a store error.
    pub fn get(&self, id: &str) -> Result<Venue> {
        self.find(id)?.ok_or_else(|| Error::venue_not_found(id))
    }

    /// Returns every venue in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list(&self) -> Result<Vec<Venue>> {
        store::load(self.store.as_ref(), Collection::Venues)
    }

    /// Registers a new venue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `config` breaks a rule, or a
    /// store error.
    pub fn create(&self, config: VenueConfig) -> Result<Venue> {
        let venue = Venue::new(config)?;
        store::modify(self.store.as_ref(), Collection::Venues, |venues: &mut Vec<Venue>| {
            venues.push(venue.clone());
            Ok(())
        })?;
        log::info!("Registered venue {} ({})", venue.name(), venue.id());
        Ok(venue)
    }

    /// Merges `patch` into the venue with `id` and stores the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, [`Error::InvalidConfig`]
    /// if the merged venue breaks a rule, or a store error.
    pub fn update(&self, id: &str, patch: &VenuePatch) -> Result<Venue> {
        let updated = store::modify(
            self.store.as_ref(),
            Collection::Venues,
            |venues: &mut Vec<Venue>| {
                let slot = venues
                    .iter_mut()
                    .find(|venue| venue.id() == id)
                    .ok_or_else(|| Error::venue_not_found(id))?;
                *slot = slot.apply(patch)?;
                Ok(slot.clone())
            },
        )?;
        log::info!("Updated venue {id}");
        Ok(updated)
    }

    /// Removes the venue with `id` and returns the removed record.
    ///
    /// Bookings made for the venue are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, or a store error.
    pub fn delete(&self, id: &str) -> Result<Venue> {
        let removed = store::modify(
            self.store.as_ref(),
            Collection::Venues,
            |venues: &mut Vec<Venue>| {
                let index = venues
                    .iter()
                    .position(|venue| venue.id() == id)
                    .ok_or_else(|| Error::venue_not_found(id))?;
                Ok(venues.remove(index))
            },
        )?;
        log::info!("Deleted venue {} ({id})", removed.name());
        Ok(removed)
    }
}

pub(crate) fn find_venue(store: &dyn RecordStore, id: &str) -> Result<Option<Venue>> {
    let venues: Vec<Venue> = store::load(store, Collection::Venues)?;
    Ok(venues.into_iter().find(|venue| venue.id() == id))
}
