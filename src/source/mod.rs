//! Messaging data sources.
//!
//! A source is reached in two phases: a concrete `connect` blocks until the
//! backing store or bridge is usable and returns a [`ReadyHandle`]; after that
//! every call is a plain synchronous request.

pub mod sqlite_source;
pub mod http_source;

pub use http_source::{BridgeConfig, HttpSource};
pub use sqlite_source::SqliteSource;

use crate::error::ChatGraphResult;
use crate::model::{Account, RawChat, RawContact, Wid};

/// Read-only view of one messaging account.
pub trait MessagingSource {
    /// Bulk contact list, owned and unowned.
    fn list_contacts(&self) -> ChatGraphResult<Vec<RawContact>>;

    /// Every chat, groups and direct chats alike.
    fn list_chats(&self) -> ChatGraphResult<Vec<RawChat>>;

    /// Single contact lookup. May fail for ids the source does not know.
    fn lookup_contact(&self, id: &Wid) -> ChatGraphResult<RawContact>;

    /// Profile picture URL. `Ok(None)` means the contact has no picture.
    fn profile_pic_url(&self, id: &Wid) -> ChatGraphResult<Option<String>>;
}

/// A connected source together with the account it serves.
pub struct ReadyHandle {
    account: Account,
    source: Box<dyn MessagingSource>,
}

impl ReadyHandle {
    pub fn new(account: Account, source: Box<dyn MessagingSource>) -> Self {
        Self { account, source }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn source(&self) -> &dyn MessagingSource {
        self.source.as_ref()
    }
}
