use std::path::Path;
use std::time::Duration;

use crate::error::{ChatGraphError, ChatGraphResult};
use crate::model::{groups_from_chats, Account, GroupRecord, RawChat};
use crate::ops::ContactResolver;
use crate::source::{BridgeConfig, HttpSource, ReadyHandle, SqliteSource};

use super::Cli;

/// A connected source plus the helpers every command needs.
pub struct CliContext {
    pub handle: ReadyHandle,
}

impl CliContext {
    /// Connects to the bridge when one is configured, otherwise to the
    /// snapshot store.
    pub fn connect(cli: &Cli) -> ChatGraphResult<Self> {
        let handle = match &cli.bridge {
            Some(url) => HttpSource::connect(bridge_config(cli, url))?,
            None => {
                if !cli.db.exists() {
                    return Err(ChatGraphError::Other(format!(
                        "Database {} does not exist. Run 'import' or 'capture' first.",
                        cli.db.display()
                    )));
                }
                SqliteSource::connect(&cli.db)?
            }
        };
        Ok(Self { handle })
    }

    pub fn account(&self) -> &Account {
        self.handle.account()
    }

    pub fn chats(&self) -> ChatGraphResult<Vec<RawChat>> {
        self.handle.source().list_chats()
    }

    pub fn groups(&self) -> ChatGraphResult<Vec<GroupRecord>> {
        Ok(groups_from_chats(&self.chats()?))
    }

    /// A resolver warmed with the source's bulk contact list.
    pub fn seeded_resolver(&self) -> ChatGraphResult<ContactResolver<'_>> {
        let contacts = self.handle.source().list_contacts()?;
        let mut resolver = ContactResolver::new(self.handle.source());
        resolver.seed(&contacts, &self.account().id);
        Ok(resolver)
    }
}

pub fn bridge_config(cli: &Cli, url: &str) -> BridgeConfig {
    BridgeConfig {
        base_url: url.to_string(),
        timeout: Duration::from_secs(cli.bridge_timeout_secs),
        ready_attempts: cli.ready_attempts,
        ready_interval: Duration::from_millis(cli.ready_interval_ms),
    }
}

/// Creates the directory holding `db_path` if needed.
pub fn ensure_parent_dir(db_path: &Path) -> ChatGraphResult<()> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn print_error(e: &ChatGraphError) {
    eprintln!("Error: {}", e);
}
