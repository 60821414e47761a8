#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use traylet::{ItemId, NativeEntry, Shell, ShellMessage, TrayError, TrayResult};

pub type Popup = Rc<RefCell<PopupNode>>;

#[derive(Debug)]
pub struct PopupNode {
    pub serial: usize,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
pub enum Entry {
    Separator,
    Command {
        id: u32,
        text: String,
        checked: bool,
        disabled: bool,
    },
    Submenu {
        id: u32,
        text: String,
        child: Popup,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeIcon {
    pub serial: usize,
    pub path: PathBuf,
}

/// Everything the shell saw, kept alive after the tray is gone.
#[derive(Debug, Default)]
pub struct Stats {
    pub attached: bool,
    pub detached: bool,
    pub popups_created: usize,
    pub popups_destroyed: usize,
    pub icons_created: usize,
    pub icons_destroyed: usize,
    pub double_frees: usize,
    pub live_popups: HashSet<usize>,
    pub live_icons: HashSet<usize>,
    pub installed_menu: Option<usize>,
    pub installed_icon: Option<FakeIcon>,
    pub popups_tracked: usize,
    pub checked_writes: Vec<(u32, bool)>,
    /// `(id, checked)` of the entry each nested popup was created for.
    pub popup_owners: Vec<(u32, bool)>,
    /// Whether `RecordingShell::watched_path` existed at each popup destruction.
    pub watched_at_destroy: Vec<bool>,
    pub log: Vec<String>,
}

impl Stats {
    pub fn assert_balanced(&self) {
        assert_eq!(self.popups_created, self.popups_destroyed, "popup leak: {:?}", self.live_popups);
        assert_eq!(self.icons_created, self.icons_destroyed, "icon leak: {:?}", self.live_icons);
        assert_eq!(self.double_frees, 0, "double free");
    }

    pub fn position(&self, line: &str) -> usize {
        self.log
            .iter()
            .position(|l| l == line)
            .unwrap_or_else(|| panic!("{:?} not in log {:?}", line, self.log))
    }
}

pub type SharedStats = Rc<RefCell<Stats>>;

#[derive(Default)]
pub struct RecordingShell {
    stats: SharedStats,
    messages: VecDeque<ShellMessage>,
    selections: VecDeque<Option<ItemId>>,
    next_serial: usize,
    quit_posted: bool,
    pub fail_attach: bool,
    pub fail_append: bool,
    pub watched_path: Option<PathBuf>,
}

impl RecordingShell {
    pub fn new() -> (Self, SharedStats) {
        let shell = Self::default();
        let stats = Rc::clone(&shell.stats);
        (shell, stats)
    }

    pub fn push_message(&mut self, message: ShellMessage) {
        self.messages.push_back(message);
    }

    /// What the next tracked popup returns.
    pub fn push_selection(&mut self, selection: Option<ItemId>) {
        self.selections.push_back(selection);
    }

    fn serial(&mut self) -> usize {
        self.next_serial += 1;
        self.next_serial
    }

    fn release(&mut self, popup: &Popup) {
        let node = popup.borrow();
        let mut stats = self.stats.borrow_mut();
        if stats.live_popups.remove(&node.serial) {
            stats.popups_destroyed += 1;
        } else {
            stats.double_frees += 1;
        }
        drop(stats);

        for entry in &node.entries {
            if let Entry::Submenu { child, .. } = entry {
                self.release(child);
            }
        }
    }
}

impl Shell for RecordingShell {
    type Popup = Popup;
    type Icon = FakeIcon;

    fn attach(&mut self) -> TrayResult<()> {
        if self.fail_attach {
            return Err(TrayError::attach("window class registration failed"));
        }
        self.stats.borrow_mut().attached = true;
        Ok(())
    }

    fn detach(&mut self) {
        let mut stats = self.stats.borrow_mut();
        stats.detached = true;
        stats.log.push("detach".to_string());
    }

    fn create_popup(&mut self, owner: Option<&NativeEntry<'_>>) -> TrayResult<Popup> {
        let serial = self.serial();
        let mut stats = self.stats.borrow_mut();
        if let Some(entry) = owner {
            stats.popup_owners.push((entry.id.0, entry.checked));
        }
        stats.popups_created += 1;
        stats.live_popups.insert(serial);
        Ok(Rc::new(RefCell::new(PopupNode {
            serial,
            entries: Vec::new(),
        })))
    }

    fn append_separator(&mut self, popup: &Popup) -> TrayResult<()> {
        popup.borrow_mut().entries.push(Entry::Separator);
        Ok(())
    }

    fn append_command(&mut self, popup: &Popup, entry: &NativeEntry<'_>) -> TrayResult<()> {
        if self.fail_append {
            return Err(TrayError::menu("InsertMenuItem failed"));
        }
        popup.borrow_mut().entries.push(Entry::Command {
            id: entry.id.0,
            text: entry.text.to_string(),
            checked: entry.checked,
            disabled: entry.disabled,
        });
        Ok(())
    }

    fn append_submenu(
        &mut self,
        popup: &Popup,
        entry: &NativeEntry<'_>,
        child: Popup,
    ) -> TrayResult<()> {
        popup.borrow_mut().entries.push(Entry::Submenu {
            id: entry.id.0,
            text: entry.text.to_string(),
            child,
        });
        Ok(())
    }

    fn set_checked(&mut self, popup: &Popup, id: ItemId, checked: bool) -> bool {
        let found = set_checked_in(popup, id.0, checked);
        if found {
            self.stats.borrow_mut().checked_writes.push((id.0, checked));
        }
        found
    }

    fn install_menu(&mut self, popup: Option<&Popup>) {
        let serial = popup.map(|p| p.borrow().serial);
        let mut stats = self.stats.borrow_mut();
        stats.installed_menu = serial;
        stats.log.push(format!("install_menu {:?}", serial));
    }

    fn destroy_popup(&mut self, popup: Popup) {
        let serial = popup.borrow().serial;
        let mut stats = self.stats.borrow_mut();
        stats.log.push(format!("destroy_popup {}", serial));
        if let Some(path) = &self.watched_path {
            stats.watched_at_destroy.push(path.exists());
        }
        drop(stats);
        self.release(&popup);
    }

    fn load_icon(&mut self, path: &Path) -> TrayResult<FakeIcon> {
        if !path.is_file() {
            return Err(TrayError::icon(format!("{:?} does not exist", path)));
        }
        let serial = self.serial();
        let mut stats = self.stats.borrow_mut();
        stats.icons_created += 1;
        stats.live_icons.insert(serial);
        Ok(FakeIcon {
            serial,
            path: path.to_path_buf(),
        })
    }

    fn install_icon(&mut self, icon: &FakeIcon) -> TrayResult<()> {
        let mut stats = self.stats.borrow_mut();
        stats.installed_icon = Some(icon.clone());
        stats.log.push(format!("install_icon {}", icon.serial));
        Ok(())
    }

    fn destroy_icon(&mut self, icon: FakeIcon) {
        let mut stats = self.stats.borrow_mut();
        stats.log.push(format!("destroy_icon {}", icon.serial));
        if stats.live_icons.remove(&icon.serial) {
            stats.icons_destroyed += 1;
        } else {
            stats.double_frees += 1;
        }
    }

    fn next_message(&mut self) -> Option<ShellMessage> {
        if self.quit_posted {
            return Some(ShellMessage::Quit);
        }
        self.messages.pop_front()
    }

    fn track_popup(&mut self, _popup: &Popup) -> Option<ItemId> {
        self.stats.borrow_mut().popups_tracked += 1;
        self.selections.pop_front().flatten()
    }

    fn post_quit(&mut self) {
        self.quit_posted = true;
        self.stats.borrow_mut().log.push("post_quit".to_string());
    }
}

fn set_checked_in(popup: &Popup, id: u32, value: bool) -> bool {
    for entry in popup.borrow_mut().entries.iter_mut() {
        match entry {
            Entry::Command { id: entry_id, checked, .. } if *entry_id == id => {
                *checked = value;
                return true;
            }
            Entry::Submenu { child, .. } => {
                if set_checked_in(child, id, value) {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

/// Identities of every command and submenu entry in pre-order.
pub fn preorder_ids(popup: &Popup) -> Vec<u32> {
    let mut ids = Vec::new();
    for entry in &popup.borrow().entries {
        match entry {
            Entry::Separator => {}
            Entry::Command { id, .. } => ids.push(*id),
            Entry::Submenu { id, child, .. } => {
                ids.push(*id);
                ids.extend(preorder_ids(child));
            }
        }
    }
    ids
}

pub fn command_checked(popup: &Popup, id: u32) -> Option<bool> {
    for entry in &popup.borrow().entries {
        match entry {
            Entry::Command { id: entry_id, checked, .. } if *entry_id == id => return Some(*checked),
            Entry::Submenu { child, .. } => {
                if let Some(checked) = command_checked(child, id) {
                    return Some(checked);
                }
            }
            _ => {}
        }
    }
    None
}
