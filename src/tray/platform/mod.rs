#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
use self::linux as native;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
use self::windows as native;

#[cfg(not(any(target_os = "linux", target_os = "windows")))]
mod native {
    use super::Pump;
    use crate::error::TrayResult;

    pub(super) fn init() -> TrayResult<()> {
        Ok(())
    }

    pub(super) fn pump_one() -> Pump {
        Pump::Empty
    }
}

use super::shell::{NativeEntry, ShellMessage, Shell};
use crate::error::{TrayError, TrayResult};
use crate::menu::ItemId;
use std::path::Path;
use tray_icon::menu::{
    CheckMenuItem, ContextMenu, MenuEvent, MenuId, MenuItemKind, PredefinedMenuItem, Submenu,
};
use tray_icon::{Icon, MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};

const ROOT_MENU_ID: &str = "__root__";

/// Result of pulling one message off the platform queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pump {
    Empty,
    Dispatched,
    Quit,
}

/// [`Shell`] backed by `tray-icon`.
///
/// `tray-icon` opens and tracks the popup itself when the entry is clicked,
/// so selections come back as [`ShellMessage::Command`] on a later tick.
pub struct TrayIconShell {
    tooltip: String,
    tray: Option<TrayIcon>,
    quit_posted: bool,
}

impl TrayIconShell {
    pub fn new(tooltip: impl Into<String>) -> Self {
        Self {
            tooltip: tooltip.into(),
            tray: None,
            quit_posted: false,
        }
    }
}

impl Shell for TrayIconShell {
    type Popup = Submenu;
    type Icon = Icon;

    fn attach(&mut self) -> TrayResult<()> {
        if self.tray.is_some() {
            return Ok(());
        }
        native::init()?;

        let tray = TrayIconBuilder::new()
            .with_tooltip(&self.tooltip)
            .with_menu_on_left_click(true)
            .build()
            .map_err(TrayError::attach)?;

        self.tray = Some(tray);
        Ok(())
    }

    fn detach(&mut self) {
        if self.tray.take().is_some() {
            log::debug!("Removed tray icon from the notification area");
        }
    }

    fn create_popup(&mut self, owner: Option<&NativeEntry<'_>>) -> TrayResult<Submenu> {
        let Some(entry) = owner else {
            return Ok(Submenu::with_id(MenuId::new(ROOT_MENU_ID), "", true));
        };
        // muda submenus have no checkmark.
        if entry.checked {
            log::debug!("Submenu {} ({}) cannot show a checkmark", entry.id, entry.text);
        }
        Ok(Submenu::with_id(menu_id(entry.id), entry.text, !entry.disabled))
    }

    fn append_separator(&mut self, popup: &Submenu) -> TrayResult<()> {
        popup
            .append(&PredefinedMenuItem::separator())
            .map_err(TrayError::menu)
    }

    fn append_command(&mut self, popup: &Submenu, entry: &NativeEntry<'_>) -> TrayResult<()> {
        let item = CheckMenuItem::with_id(
            menu_id(entry.id),
            entry.text,
            !entry.disabled,
            entry.checked,
            None,
        );
        popup.append(&item).map_err(TrayError::menu)
    }

    fn append_submenu(
        &mut self,
        popup: &Submenu,
        _entry: &NativeEntry<'_>,
        child: Submenu,
    ) -> TrayResult<()> {
        popup.append(&child).map_err(TrayError::menu)
    }

    fn set_checked(&mut self, popup: &Submenu, id: ItemId, checked: bool) -> bool {
        set_checked_in(popup, &menu_id(id), checked)
    }

    fn install_menu(&mut self, popup: Option<&Submenu>) {
        let Some(tray) = &self.tray else {
            return;
        };
        let menu = popup.map(|p| Box::new(p.clone()) as Box<dyn ContextMenu>);
        tray.set_menu(menu);
    }

    fn destroy_popup(&mut self, popup: Submenu) {
        drop(popup);
    }

    fn load_icon(&mut self, path: &Path) -> TrayResult<Icon> {
        let image = image::open(path)
            .map_err(|e| TrayError::icon(format!("{:?}: {}", path, e)))?
            .into_rgba8();
        let (width, height) = image.dimensions();
        Icon::from_rgba(image.into_raw(), width, height)
            .map_err(|e| TrayError::icon(format!("{:?}: {}", path, e)))
    }

    fn install_icon(&mut self, icon: &Icon) -> TrayResult<()> {
        let Some(tray) = &self.tray else {
            return Err(TrayError::icon("tray is not attached"));
        };
        tray.set_icon(Some(icon.clone())).map_err(TrayError::icon)
    }

    fn destroy_icon(&mut self, icon: Icon) {
        drop(icon);
    }

    fn next_message(&mut self) -> Option<ShellMessage> {
        if self.quit_posted {
            return Some(ShellMessage::Quit);
        }
        if let Some(message) = poll_tray_events() {
            return Some(message);
        }

        match native::pump_one() {
            Pump::Empty => None,
            Pump::Quit => Some(ShellMessage::Quit),
            Pump::Dispatched => Some(poll_tray_events().unwrap_or(ShellMessage::Other)),
        }
    }

    fn track_popup(&mut self, _popup: &Submenu) -> Option<ItemId> {
        None
    }

    fn post_quit(&mut self) {
        self.quit_posted = true;
    }
}

fn menu_id(id: ItemId) -> MenuId {
    MenuId::new(id.to_string())
}

fn set_checked_in(popup: &Submenu, id: &MenuId, checked: bool) -> bool {
    for item in popup.items() {
        match item {
            MenuItemKind::Check(check) if check.id() == id => {
                check.set_checked(checked);
                return true;
            }
            MenuItemKind::Submenu(submenu) => {
                if set_checked_in(&submenu, id, checked) {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

fn poll_tray_events() -> Option<ShellMessage> {
    if let Ok(event) = TrayIconEvent::receiver().try_recv() {
        return Some(tray_message(&event));
    }
    if let Ok(event) = MenuEvent::receiver().try_recv() {
        return Some(menu_message(&event));
    }
    None
}

fn tray_message(event: &TrayIconEvent) -> ShellMessage {
    match event {
        TrayIconEvent::Click {
            button: MouseButton::Left | MouseButton::Right,
            button_state: MouseButtonState::Up,
            ..
        } => ShellMessage::TrayActivated,
        _ => ShellMessage::Other,
    }
}

fn menu_message(event: &MenuEvent) -> ShellMessage {
    match event.id.0.parse::<u32>() {
        Ok(id) => ShellMessage::Command(ItemId(id)),
        Err(_) => {
            log::debug!("Ignoring menu event with foreign id: {}", event.id.0);
            ShellMessage::Other
        }
    }
}
