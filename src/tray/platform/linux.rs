use super::Pump;
use crate::error::{TrayError, TrayResult};

pub(super) fn init() -> TrayResult<()> {
    gtk::init().map_err(|e| {
        log::error!("Failed to initialize GTK");
        TrayError::attach(e)
    })
}

/// Runs a single non-blocking GTK main loop iteration.
pub(super) fn pump_one() -> Pump {
    if !gtk::events_pending() {
        return Pump::Empty;
    }
    gtk::main_iteration_do(false);
    Pump::Dispatched
}
