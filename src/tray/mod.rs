mod event_loop;
pub mod icon;
pub mod platform;
pub mod shell;

pub use event_loop::{LoopState, TickStatus};

use crate::config::TrayConfig;
use crate::error::TrayResult;
use crate::menu::{self, MenuTree};
use icon::{IconManager, IconSource};
use platform::TrayIconShell;
use shell::Shell;
use std::path::Path;

/// A notification-area icon with its popup menu.
///
/// Owns the menu tree, the native popup built from it and the icon. Every
/// method must be called from the thread that created the tray.
pub struct Tray<S: Shell> {
    shell: S,
    icon: IconManager<S::Icon>,
    tree: Option<MenuTree>,
    popup: Option<S::Popup>,
    state: LoopState,
    active: bool,
}

impl Tray<TrayIconShell> {
    /// Creates the tray with the `tray-icon` backend.
    pub fn system(tooltip: &str, config: TrayConfig) -> TrayResult<Self> {
        Self::initialize(TrayIconShell::new(tooltip), config)
    }
}

impl<S: Shell> Tray<S> {
    pub fn initialize(mut shell: S, config: TrayConfig) -> TrayResult<Self> {
        shell.attach()?;
        log::info!("Tray icon added to the notification area");

        let mut tray = Self {
            shell,
            icon: IconManager::new(),
            tree: None,
            popup: None,
            state: LoopState::Idle,
            active: true,
        };
        tray.update(config);
        Ok(tray)
    }

    /// Replaces the menu and refreshes the icon.
    ///
    /// The new popup is installed and the new icon is active before the old
    /// popup is destroyed. If the new popup cannot be built the previous menu
    /// stays in place.
    pub fn update(&mut self, config: TrayConfig) {
        if !self.active {
            log::warn!("Ignoring update of a tray that was shut down");
            return;
        }

        let tree = config.menu.and_then(menu::build_tree);
        let popup = match tree.as_ref().map(|t| menu::materialize(&mut self.shell, t)) {
            None => None,
            Some(Ok(popup)) => Some(popup),
            Some(Err(e)) => {
                log::error!("Failed to build tray menu, keeping the previous one: {}", e);
                self.icon.refresh(&mut self.shell, config.icon.as_deref());
                return;
            }
        };

        self.shell.install_menu(popup.as_ref());
        self.icon.refresh(&mut self.shell, config.icon.as_deref());

        if let Some(previous) = std::mem::replace(&mut self.popup, popup) {
            self.shell.destroy_popup(previous);
        }
        // Native entries carry identities, not references into the tree, so
        // the old tree can outlive the installation of the new popup.
        self.tree = tree;

        log::info!(
            "Tray menu updated: {} items",
            self.tree.as_ref().map_or(0, MenuTree::len)
        );
    }

    /// Removes the tray and releases everything it owns. The next
    /// [`Tray::tick`] reports [`TickStatus::Quit`]. Calling it again does
    /// nothing.
    pub fn shutdown(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        self.shell.detach();
        self.icon.release(&mut self.shell);
        if let Some(popup) = self.popup.take() {
            self.shell.destroy_popup(popup);
        }
        self.icon.remove_default_file();
        self.tree = None;
        self.shell.post_quit();

        log::info!("Tray shut down");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn tree(&self) -> Option<&MenuTree> {
        self.tree.as_ref()
    }

    pub fn popup(&self) -> Option<&S::Popup> {
        self.popup.as_ref()
    }

    pub fn icon_source(&self) -> &IconSource {
        self.icon.source()
    }

    pub fn default_icon_file(&self) -> Option<&Path> {
        self.icon.default_file()
    }

    pub fn has_icon(&self) -> bool {
        self.icon.has_icon()
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell
    }
}

impl<S: Shell> Drop for Tray<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
