use std::collections::HashMap;

use crate::model::{ContactInfo, RawContact, Wid};
use crate::source::MessagingSource;

/// Per-run contact cache in front of a [`MessagingSource`].
///
/// Entries are written once and never updated, failure placeholders included,
/// so a failed lookup is not retried within the run. All access goes through
/// `&mut self`; the cache is checked before every lookup, which makes
/// resolution of one id single-flight.
pub struct ContactResolver<'a> {
    source: &'a dyn MessagingSource,
    cache: HashMap<Wid, ContactInfo>,
    /// Owned contacts mapped to their display name.
    saved: HashMap<Wid, String>,
    lookups: usize,
}

impl<'a> ContactResolver<'a> {
    pub fn new(source: &'a dyn MessagingSource) -> Self {
        Self {
            source,
            cache: HashMap::new(),
            saved: HashMap::new(),
            lookups: 0,
        }
    }

    /// Warms the cache from a bulk contact fetch. Only owned contacts are
    /// taken; the account owner is never registered as a saved contact.
    /// Returns how many contacts were seeded.
    pub fn seed(&mut self, contacts: &[RawContact], self_id: &Wid) -> usize {
        let mut seeded = 0;
        for contact in contacts {
            let Some(id) = &contact.id else {
                continue;
            };
            if !contact.is_owned_contact || id == self_id || self.cache.contains_key(id) {
                continue;
            }
            let info = contact.info();
            let name = info
                .address_book_name
                .clone()
                .or_else(|| info.profile_nickname.clone())
                .or_else(|| info.phone_number.clone())
                .unwrap_or_else(|| id.local_part().to_string());
            self.saved.insert(id.clone(), name);
            self.cache.insert(id.clone(), info);
            seeded += 1;
        }
        tracing::info!(seeded, "seeded contact cache");
        seeded
    }

    /// Contact details for `id`, looked up at most once per run.
    pub fn resolve(&mut self, id: &Wid) -> ContactInfo {
        if let Some(info) = self.cache.get(id) {
            return info.clone();
        }

        self.lookups += 1;
        let info = match self.source.lookup_contact(id) {
            Ok(contact) => contact.info(),
            Err(e) => {
                tracing::debug!(contact = %id, error = %e, "contact lookup failed");
                ContactInfo::unknown()
            }
        };
        self.cache.insert(id.clone(), info.clone());
        info
    }

    /// Whether `id` was seeded as an owned contact.
    pub fn is_saved(&self, id: &Wid) -> bool {
        self.saved.contains_key(id)
    }

    pub fn display_name(&self, id: &Wid) -> Option<&str> {
        self.saved.get(id).map(String::as_str)
    }

    pub fn saved_ids(&self) -> impl Iterator<Item = &Wid> {
        self.saved.keys()
    }

    /// Number of lookups sent to the source so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups
    }
}
