use super::tree::{MenuEntry, MenuItem, MenuTree};
use crate::error::{TrayError, TrayResult};
use crate::tray::shell::{NativeEntry, Shell};

/// Renders `tree` into a fresh native popup.
///
/// A failure part-way through destroys whatever was already created, so the
/// caller either gets a complete popup or nothing.
pub fn materialize<S: Shell>(shell: &mut S, tree: &MenuTree) -> TrayResult<S::Popup> {
    materialize_level(shell, tree, tree.root(), None)
}

pub(crate) fn native_entry(item: &MenuItem) -> NativeEntry<'_> {
    NativeEntry {
        id: item.id,
        text: &item.text,
        checked: item.checked,
        disabled: item.disabled,
    }
}

fn materialize_level<S: Shell>(
    shell: &mut S,
    tree: &MenuTree,
    level: &[MenuEntry],
    owner: Option<&NativeEntry<'_>>,
) -> TrayResult<S::Popup> {
    let popup = shell.create_popup(owner)?;

    for entry in level {
        if let Err(e) = append_entry(shell, tree, &popup, entry) {
            shell.destroy_popup(popup);
            return Err(e);
        }
    }

    Ok(popup)
}

fn append_entry<S: Shell>(
    shell: &mut S,
    tree: &MenuTree,
    popup: &S::Popup,
    entry: &MenuEntry,
) -> TrayResult<()> {
    let id = match entry {
        MenuEntry::Separator => return shell.append_separator(popup),
        MenuEntry::Item(id) => *id,
    };
    let item = tree
        .get(id)
        .ok_or_else(|| TrayError::menu(format!("menu level refers to unknown item {}", id)))?;
    let native = native_entry(item);

    match item.submenu() {
        Some(children) => {
            let child = materialize_level(shell, tree, children, Some(&native))?;
            shell.append_submenu(popup, &native, child)
        }
        None => shell.append_command(popup, &native),
    }
}
