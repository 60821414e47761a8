use super::shell::{Shell, ShellMessage};
use super::Tray;
use crate::menu::{self, ItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    /// A popup is being tracked by the shell.
    PopupOpen,
    /// A selection is being resolved and its callback run.
    Dispatching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Continue,
    Quit,
}

impl TickStatus {
    pub fn is_quit(self) -> bool {
        self == TickStatus::Quit
    }

    /// `0` to keep going, `-1` once quit was requested.
    pub fn code(self) -> i32 {
        match self {
            TickStatus::Continue => 0,
            TickStatus::Quit => -1,
        }
    }
}

impl<S: Shell> Tray<S> {
    /// Processes at most one pending platform message and returns.
    ///
    /// Never waits for a message to arrive; the host calls this repeatedly
    /// from its own loop. Only opening a popup blocks, until the user picks
    /// an entry or dismisses it.
    pub fn tick(&mut self) -> TickStatus {
        let Some(message) = self.shell.next_message() else {
            return TickStatus::Continue;
        };

        match message {
            ShellMessage::Quit => {
                log::debug!("Quit message received");
                return TickStatus::Quit;
            }
            ShellMessage::TrayActivated => self.open_popup(),
            ShellMessage::Command(id) => self.dispatch(id),
            ShellMessage::Other => {}
        }

        TickStatus::Continue
    }

    fn open_popup(&mut self) {
        let Some(popup) = self.popup.as_ref() else {
            log::debug!("Tray clicked with no menu");
            return;
        };

        self.state = LoopState::PopupOpen;
        let selection = self.shell.track_popup(popup);
        self.state = LoopState::Idle;

        if let Some(id) = selection {
            self.dispatch(id);
        }
    }

    fn dispatch(&mut self, id: ItemId) {
        self.state = LoopState::Dispatching;
        let outcome = menu::route(&mut self.shell, self.tree.as_mut(), self.popup.as_ref(), id);
        self.state = LoopState::Idle;
        log::trace!("Selection {} finished: {:?}", id, outcome);
    }
}
