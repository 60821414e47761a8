use super::tree::{ItemId, MenuEntry, MenuItem, MenuTree, ID_FIRST, SEPARATOR_TEXT};
use crate::config::ItemDescriptor;

/// Builds the menu tree for a level of descriptors.
///
/// Returns `None` when nothing renderable remains, leaving the tray with an
/// icon but no popup. Identities are handed out depth-first: an item gets its
/// identity before any item of its submenu, and the submenu is finished before
/// the next sibling.
pub fn build_tree(items: Vec<ItemDescriptor>) -> Option<MenuTree> {
    let mut builder = TreeBuilder {
        next_id: ID_FIRST,
        items: Vec::new(),
    };
    let root = builder.build_level(items);
    if root.is_empty() {
        return None;
    }

    Some(MenuTree {
        items: builder.items,
        root,
    })
}

/// Converts host text into what the native menu can display. Native strings
/// end at the first NUL, so anything after it is dropped.
pub fn native_text(text: &str) -> Option<String> {
    let converted = text.split('\0').next().unwrap_or_default();
    (!converted.is_empty()).then(|| converted.to_string())
}

struct TreeBuilder {
    next_id: u32,
    items: Vec<MenuItem>,
}

impl TreeBuilder {
    fn build_level(&mut self, descriptors: Vec<ItemDescriptor>) -> Vec<MenuEntry> {
        let mut level = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            let Some(text) = descriptor.text.as_deref().and_then(native_text) else {
                log::warn!("Skipping menu item without text: {:?}", descriptor);
                continue;
            };

            if text == SEPARATOR_TEXT {
                level.push(MenuEntry::Separator);
                continue;
            }

            let id = self.allocate();
            let index = self.items.len();
            self.items.push(MenuItem {
                id,
                text,
                checked: descriptor.checked,
                disabled: descriptor.disabled,
                submenu: None,
                callback: descriptor.callback,
            });

            if let Some(children) = descriptor.submenu.filter(|c| !c.is_empty()) {
                let submenu = self.build_level(children);
                if !submenu.is_empty() {
                    self.items[index].submenu = Some(submenu);
                }
            }

            level.push(MenuEntry::Item(id));
        }

        level
    }

    fn allocate(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }
}
