use super::Pump;
use crate::error::TrayResult;
use ::windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, PeekMessageW, TranslateMessage, MSG, PM_REMOVE, WM_QUIT,
};

pub(super) fn init() -> TrayResult<()> {
    Ok(())
}

/// Removes one message from this thread's queue, if any, and hands it to its
/// window procedure. Never blocks.
pub(super) fn pump_one() -> Pump {
    let mut msg = MSG::default();
    let available = unsafe { PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE) }.as_bool();
    if !available {
        return Pump::Empty;
    }
    if msg.message == WM_QUIT {
        return Pump::Quit;
    }

    unsafe {
        let _ = TranslateMessage(&msg);
        let _ = DispatchMessageW(&msg);
    }
    Pump::Dispatched
}
