use crate::config::Callback;
use std::fmt;

/// Identity of the first item of every freshly built tree.
pub const ID_FIRST: u32 = 1000;

/// Item text that renders as a separator instead of a command.
pub const SEPARATOR_TEXT: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One position of a menu level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Separator,
    Item(ItemId),
}

pub struct MenuItem {
    pub(crate) id: ItemId,
    pub(crate) text: String,
    pub(crate) checked: bool,
    pub(crate) disabled: bool,
    pub(crate) submenu: Option<Vec<MenuEntry>>,
    pub(crate) callback: Option<Callback>,
}

impl MenuItem {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn submenu(&self) -> Option<&[MenuEntry]> {
        self.submenu.as_deref()
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("checked", &self.checked)
            .field("disabled", &self.disabled)
            .field("submenu", &self.submenu)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Arena of menu items indexed by identity.
///
/// Items are stored in pre-order, so identities are contiguous from
/// [`ID_FIRST`] and `items[id - ID_FIRST]` is the item carrying `id`.
/// Levels only refer to items by identity.
#[derive(Debug)]
pub struct MenuTree {
    pub(crate) items: Vec<MenuItem>,
    pub(crate) root: Vec<MenuEntry>,
}

impl MenuTree {
    pub fn root(&self) -> &[MenuEntry] {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&MenuItem> {
        self.index_of(id).map(|i| &self.items[i])
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut MenuItem> {
        self.index_of(id).map(move |i| &mut self.items[i])
    }

    /// Items in identity order, which is also pre-order visitation order.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter()
    }

    pub fn find_by_text(&self, text: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.text == text)
    }

    fn index_of(&self, id: ItemId) -> Option<usize> {
        let index = id.0.checked_sub(ID_FIRST)? as usize;
        (index < self.items.len()).then_some(index)
    }
}
