use crate::error::{TrayError, TrayResult};
use crate::menu::MenuItem;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Invoked after a menu entry is selected. The item's `checked` flag still
/// holds its previous state; whatever the callback leaves there is shown.
pub type Callback = Box<dyn FnMut(&mut MenuItem) -> anyhow::Result<()>>;

/// Parsed leniently: a field of the wrong type reads as absent and a menu
/// entry that is not a table is skipped.
#[derive(Debug, Default, Deserialize)]
pub struct TrayConfig {
    /// `None` keeps the current icon, `""` selects the bundled default.
    #[serde(default, deserialize_with = "lenient::path")]
    pub icon: Option<PathBuf>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub menu: Option<Vec<ItemDescriptor>>,
}

#[derive(Default, Deserialize)]
pub struct ItemDescriptor {
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub checked: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub disabled: bool,
    #[serde(default, deserialize_with = "lenient::items")]
    pub submenu: Option<Vec<ItemDescriptor>>,
    #[serde(skip)]
    pub callback: Option<Callback>,
}

impl TrayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_icon(mut self, icon: impl Into<PathBuf>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_menu(mut self, menu: Vec<ItemDescriptor>) -> Self {
        self.menu = Some(menu);
        self
    }

    pub fn from_toml_str(content: &str) -> TrayResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> TrayResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> TrayResult<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(TrayError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Visits every descriptor depth-first, parents before their submenus.
    pub fn for_each_item_mut(&mut self, f: &mut dyn FnMut(&mut ItemDescriptor)) {
        if let Some(menu) = self.menu.as_mut() {
            visit_mut(menu, f);
        }
    }
}

fn visit_mut(items: &mut [ItemDescriptor], f: &mut dyn FnMut(&mut ItemDescriptor)) {
    for item in items {
        f(&mut *item);
        if let Some(submenu) = item.submenu.as_mut() {
            visit_mut(submenu, f);
        }
    }
}

impl ItemDescriptor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn separator() -> Self {
        Self::new(crate::menu::SEPARATOR_TEXT)
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn submenu(mut self, items: Vec<ItemDescriptor>) -> Self {
        self.submenu = Some(items);
        self
    }

    pub fn on_select<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut MenuItem) -> anyhow::Result<()> + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }
}

mod lenient {
    use super::ItemDescriptor;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::path::PathBuf;

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => {
                log::warn!("Ignoring non-string value {}", other);
                None
            }
        })
    }

    pub fn path<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<PathBuf>, D::Error> {
        Ok(string(deserializer)?.map(PathBuf::from))
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => b,
            Value::Null => false,
            other => {
                log::warn!("Ignoring non-boolean value {}", other);
                false
            }
        })
    }

    pub fn items<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<ItemDescriptor>>, D::Error> {
        let entries = match Value::deserialize(deserializer)? {
            Value::Array(entries) => entries,
            Value::Null => return Ok(None),
            other => {
                log::warn!("Ignoring menu that is not a list: {}", other);
                return Ok(None);
            }
        };

        Ok(Some(entries.into_iter().filter_map(item).collect()))
    }

    fn item(value: Value) -> Option<ItemDescriptor> {
        match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("Skipping malformed menu item: {}", e);
                None
            }
        }
    }
}

impl fmt::Debug for ItemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemDescriptor")
            .field("text", &self.text)
            .field("checked", &self.checked)
            .field("disabled", &self.disabled)
            .field("submenu", &self.submenu)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}
