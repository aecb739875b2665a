//! App core.
//!
//! Wires the engine to its collaborators: the session store, the
//! browser host, the options engine, and the command dispatcher. The
//! demo binary and the integration tests drive the engine through this
//! struct; a real extension would replace the simulated host with the
//! runtime's own.

use std::error::Error;
use std::sync::Arc;

use crate::browser::{BrowserHost, SimulatedBrowser};
use crate::managers::group_manager::GroupManager;
use crate::services::commands::CommandDispatcher;
use crate::services::options::{OptionsEngine, OptionsEngineTrait};
use crate::store::MemoryStore;
use crate::types::errors::GroupError;
use crate::types::group::CreationReason;
use crate::types::options::Options;
use crate::types::tab::{TabId, WindowId};

/// Central struct holding the engine and its collaborators.
pub struct App {
    pub store: Arc<MemoryStore>,
    pub browser: Arc<SimulatedBrowser>,
    pub groups: GroupManager<MemoryStore, SimulatedBrowser>,
    pub options_engine: OptionsEngine,
    pub dispatcher: CommandDispatcher,
}

impl App {
    /// Creates a new App over a fresh store and simulated browser.
    ///
    /// `options_path` overrides the platform config location, mainly
    /// for tests.
    pub fn new(options_path: Option<String>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let browser = Arc::new(SimulatedBrowser::new());
        let groups = GroupManager::new(store.clone(), browser.clone());
        let options_engine = OptionsEngine::new(options_path);
        let dispatcher = CommandDispatcher::new(Options::default());
        Self {
            store,
            browser,
            groups,
            options_engine,
            dispatcher,
        }
    }

    /// Startup sequence: load options, make sure every window has a
    /// group, heal stale tab assignments, and backfill legacy group
    /// records.
    pub async fn init(&mut self) -> Result<(), Box<dyn Error>> {
        let options = self.options_engine.load()?;
        self.groups.set_retry_policy(options.retry);
        self.dispatcher.update_options(options);
        log::info!("initializing group engine");

        self.groups.setup_windows().await?;
        self.groups.validate_all().await?;
        self.groups.migrate_all().await?;

        log::info!("finished setup");
        Ok(())
    }

    /// Re-reads the options file and swaps the new values into the
    /// dispatcher and the engine's retry policy.
    pub fn reload_options(&mut self) -> Result<(), Box<dyn Error>> {
        let options = self.options_engine.load()?;
        self.groups.set_retry_policy(options.retry);
        self.dispatcher.update_options(options);
        Ok(())
    }

    /// Handles a keyboard command for a window. Returns whether the
    /// command was known and enabled.
    pub async fn handle_command(
        &self,
        window: WindowId,
        name: &str,
    ) -> Result<bool, GroupError> {
        match self.dispatcher.offset_for(name) {
            Some(offset) => {
                self.groups.change_active_group_by(window, offset).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Opens an ordinary tab and runs it through the creation (and, if
    /// focused, activation) handlers, the way host events would.
    pub async fn open_tab(&self, window: WindowId, active: bool) -> Result<TabId, GroupError> {
        let id = self.browser.create_tab(window, active)?;
        let tab = self.browser.get_tab(id).await?;
        self.groups
            .handle_tab_created(&tab, CreationReason::Normal)
            .await?;
        if active {
            self.groups.handle_tab_activated(id).await?;
        }
        Ok(id)
    }

    /// Opens the management-view tab for a window.
    pub async fn open_management_view(&self, window: WindowId) -> Result<TabId, GroupError> {
        let id = self.browser.create_tab(window, true)?;
        let tab = self.browser.get_tab(id).await?;
        self.groups
            .handle_tab_created(&tab, CreationReason::OpeningManagementView)
            .await?;
        self.groups.handle_tab_activated(id).await?;
        Ok(id)
    }
}
