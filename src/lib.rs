//! A notification-area icon with a hierarchical popup menu.
//!
//! The host describes the menu with a [`TrayConfig`], creates a [`Tray`] and
//! then calls [`Tray::tick`] from its own loop. Each tick handles at most one
//! platform message: a click on the icon opens the popup, a selection runs
//! the item's callback.

pub mod config;
pub mod error;
pub mod menu;
pub mod tray;

pub use config::{Callback, ItemDescriptor, TrayConfig};
pub use error::{TrayError, TrayResult};
pub use menu::{ItemId, MenuItem};
pub use tray::icon::IconSource;
pub use tray::platform::TrayIconShell;
pub use tray::shell::{NativeEntry, Shell, ShellMessage};
pub use tray::{LoopState, TickStatus, Tray};
