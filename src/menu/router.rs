use super::tree::{ItemId, MenuTree};
use crate::tray::shell::Shell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The item's callback ran (or it had none) and its checkmark was written back.
    Handled,
    /// The callback returned an error; it was logged and the menu is unchanged
    /// apart from whatever the callback did to the item.
    Failed,
    /// No such item in the active menu, or the item is disabled.
    Dropped,
}

/// Routes a command selection to the item carrying `id`.
///
/// The callback sees the item's previous checked state and may change it;
/// the resulting state is then written to the native entry. Identities that
/// do not resolve come from a popup that was rebuilt while the selection was
/// in flight and are dropped.
pub fn route<S: Shell>(
    shell: &mut S,
    tree: Option<&mut MenuTree>,
    popup: Option<&S::Popup>,
    id: ItemId,
) -> DispatchOutcome {
    let (Some(tree), Some(popup)) = (tree, popup) else {
        log::debug!("Dropping selection {} with no active menu", id);
        return DispatchOutcome::Dropped;
    };
    let Some(item) = tree.get_mut(id) else {
        log::debug!("Dropping stale selection {}", id);
        return DispatchOutcome::Dropped;
    };
    if item.is_disabled() {
        log::debug!("Ignoring selection of disabled item {} ({})", id, item.text());
        return DispatchOutcome::Dropped;
    }

    log::debug!("Menu event: {} ({})", id, item.text());

    let mut outcome = DispatchOutcome::Handled;
    if let Some(mut callback) = item.callback.take() {
        if let Err(e) = callback(item) {
            log::error!("Error handling menu event {} ({}): {:#}", id, item.text(), e);
            outcome = DispatchOutcome::Failed;
        }
        item.callback = Some(callback);
    }

    if !shell.set_checked(popup, id, item.is_checked()) {
        log::debug!("Item {} has no native checkmark to update", id);
    }

    outcome
}
