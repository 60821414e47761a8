use anyhow::{Context, Result};
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use traylet::{ItemDescriptor, MenuItem, TickStatus, Tray, TrayConfig};

const TICK_INTERVAL: Duration = Duration::from_millis(10);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting traylet...");

    let mut config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => TrayConfig::load(&path)
            .with_context(|| format!("Failed to load tray config {:?}", path))?,
        None => default_config(),
    };

    let quit_requested = Rc::new(Cell::new(false));
    attach_callbacks(&mut config, &quit_requested);

    let mut tray = Tray::system("traylet", config)?;

    loop {
        if quit_requested.get() && tray.is_active() {
            log::info!("Quit requested");
            tray.shutdown();
        }
        if let TickStatus::Quit = tray.tick() {
            break;
        }
        std::thread::sleep(TICK_INTERVAL);
    }

    log::info!("Exiting...");
    Ok(())
}

fn default_config() -> TrayConfig {
    TrayConfig::new().with_icon("").with_menu(vec![
        ItemDescriptor::new("Show"),
        ItemDescriptor::separator(),
        ItemDescriptor::new("Quit"),
    ])
}

fn attach_callbacks(config: &mut TrayConfig, quit_requested: &Rc<Cell<bool>>) {
    config.for_each_item_mut(&mut |item: &mut ItemDescriptor| {
        if item.callback.is_some() {
            return;
        }
        let quit_requested = Rc::clone(quit_requested);
        item.callback = Some(Box::new(move |item: &mut MenuItem| -> anyhow::Result<()> {
            log::info!("Selected {} ({})", item.text(), item.id());
            if item.text() == "Quit" {
                quit_requested.set(true);
            } else {
                item.set_checked(!item.is_checked());
            }
            Ok(())
        }));
    });
}
