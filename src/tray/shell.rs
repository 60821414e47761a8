use crate::error::TrayResult;
use crate::menu::ItemId;
use std::path::Path;

/// What a native command entry displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeEntry<'a> {
    pub id: ItemId,
    pub text: &'a str,
    pub checked: bool,
    pub disabled: bool,
}

/// One platform message, as seen by the tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellMessage {
    Quit,
    /// The user clicked the notification entry.
    TrayActivated,
    /// A popup command was chosen.
    Command(ItemId),
    /// Handled by the platform, nothing for the tray to do.
    Other,
}

/// Native notification-area and popup-menu primitives.
///
/// Every call happens on the thread that drives [`crate::Tray::tick`]; the
/// window and notification entry behind a shell are thread-affine.
pub trait Shell {
    type Popup;
    type Icon;

    /// Registers the hidden window and adds the notification entry.
    fn attach(&mut self) -> TrayResult<()>;

    /// Removes the notification entry and unregisters the window.
    fn detach(&mut self);

    /// Creates one popup level. `owner` is the entry the popup will hang off,
    /// or `None` for the root level.
    fn create_popup(&mut self, owner: Option<&NativeEntry<'_>>) -> TrayResult<Self::Popup>;

    fn append_separator(&mut self, popup: &Self::Popup) -> TrayResult<()>;

    fn append_command(&mut self, popup: &Self::Popup, entry: &NativeEntry<'_>) -> TrayResult<()>;

    /// Appends `child` as the nested popup of `entry`. The parent owns `child`
    /// from then on; on error the shell releases `child` itself.
    fn append_submenu(
        &mut self,
        popup: &Self::Popup,
        entry: &NativeEntry<'_>,
        child: Self::Popup,
    ) -> TrayResult<()>;

    /// Updates the displayed checkmark of the entry carrying `id` anywhere in
    /// `popup`. Returns `false` when no such entry exists.
    fn set_checked(&mut self, popup: &Self::Popup, id: ItemId, checked: bool) -> bool;

    fn install_menu(&mut self, popup: Option<&Self::Popup>);

    /// Releases `popup` together with every popup nested in it.
    fn destroy_popup(&mut self, popup: Self::Popup);

    fn load_icon(&mut self, path: &Path) -> TrayResult<Self::Icon>;

    fn install_icon(&mut self, icon: &Self::Icon) -> TrayResult<()>;

    fn destroy_icon(&mut self, icon: Self::Icon);

    /// Takes at most one pending message off the queue without blocking.
    fn next_message(&mut self) -> Option<ShellMessage>;

    /// Shows `popup` at the cursor and tracks it modally. Returns the chosen
    /// identity, or `None` when the popup was dismissed or the selection will
    /// arrive later as a [`ShellMessage::Command`].
    fn track_popup(&mut self, popup: &Self::Popup) -> Option<ItemId>;

    /// Makes the next [`Shell::next_message`] report [`ShellMessage::Quit`].
    fn post_quit(&mut self);
}
