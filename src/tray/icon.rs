use super::shell::Shell;
use crate::error::{TrayError, TrayResult};
use image::codecs::ico::IcoEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

const ICON_SIZE: u32 = 32;
const FILL: [u8; 4] = [0x2f, 0x80, 0xed, 0xff];
const RING: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    Unset,
    /// The synthesized default image, written to a temp file.
    Default(PathBuf),
    Custom(PathBuf),
}

impl IconSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            IconSource::Unset => None,
            IconSource::Default(path) | IconSource::Custom(path) => Some(path),
        }
    }
}

/// Owns the icon shown in the notification entry and the default icon file.
pub struct IconManager<I> {
    source: IconSource,
    default_file: Option<TempPath>,
    installed: Option<I>,
}

impl<I> IconManager<I> {
    pub fn new() -> Self {
        Self {
            source: IconSource::Unset,
            default_file: None,
            installed: None,
        }
    }

    pub fn source(&self) -> &IconSource {
        &self.source
    }

    pub fn default_file(&self) -> Option<&Path> {
        self.default_file.as_deref()
    }

    pub fn has_icon(&self) -> bool {
        self.installed.is_some()
    }

    /// Resolves the requested source and swaps the native icon.
    ///
    /// `None` keeps the current source (the default one if nothing was chosen
    /// yet), an empty path selects the default icon. Any failure leaves the
    /// previous icon and its source in place.
    pub fn refresh<S: Shell<Icon = I>>(&mut self, shell: &mut S, requested: Option<&Path>) {
        let source = match self.select(requested) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("Keeping previous tray icon: {}", e);
                return;
            }
        };
        let Some(path) = source.path() else {
            return;
        };

        let icon = match shell.load_icon(path) {
            Ok(icon) => icon,
            Err(e) => {
                log::warn!("Keeping previous tray icon: {}", e);
                return;
            }
        };
        if let Err(e) = shell.install_icon(&icon) {
            log::warn!("Keeping previous tray icon: {}", e);
            shell.destroy_icon(icon);
            return;
        }

        self.source = source;
        if let Some(previous) = self.installed.replace(icon) {
            shell.destroy_icon(previous);
        }
    }

    /// Destroys the installed icon.
    pub fn release<S: Shell<Icon = I>>(&mut self, shell: &mut S) {
        if let Some(icon) = self.installed.take() {
            shell.destroy_icon(icon);
        }
    }

    /// Deletes the default icon file, if one was written.
    pub fn remove_default_file(&mut self) {
        if let Some(file) = self.default_file.take() {
            let path = file.to_path_buf();
            if let Err(e) = file.close() {
                log::warn!("Failed to remove default icon {:?}: {}", path, e);
            }
        }
    }

    /// The source `requested` resolves to. Only becomes current once its
    /// icon is installed.
    fn select(&mut self, requested: Option<&Path>) -> TrayResult<IconSource> {
        Ok(match requested {
            Some(path) if !path.as_os_str().is_empty() => IconSource::Custom(path.to_path_buf()),
            None if self.source != IconSource::Unset => self.source.clone(),
            _ => IconSource::Default(self.ensure_default_file()?),
        })
    }

    fn ensure_default_file(&mut self) -> TrayResult<PathBuf> {
        if let Some(file) = &self.default_file {
            return Ok(file.to_path_buf());
        }

        let bytes = default_icon_bytes()?;
        let mut file = tempfile::Builder::new()
            .prefix("traylet-")
            .suffix(".ico")
            .tempfile()
            .map_err(TrayError::DefaultIcon)?;
        file.write_all(&bytes).map_err(TrayError::DefaultIcon)?;
        file.flush().map_err(TrayError::DefaultIcon)?;

        let path = file.into_temp_path();
        log::debug!("Wrote default tray icon to {:?}", path);
        let resolved = path.to_path_buf();
        self.default_file = Some(path);
        Ok(resolved)
    }
}

impl<I> Default for IconManager<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// The default icon as an ICO file.
pub fn default_icon_bytes() -> TrayResult<Vec<u8>> {
    let rgba = default_icon_rgba(ICON_SIZE);
    let mut bytes = Vec::new();
    IcoEncoder::new(&mut bytes)
        .write_image(&rgba, ICON_SIZE, ICON_SIZE, ExtendedColorType::Rgba8)
        .map_err(|e| TrayError::DefaultIcon(std::io::Error::other(e)))?;
    Ok(bytes)
}

fn default_icon_rgba(size: u32) -> Vec<u8> {
    let mut data = vec![0u8; (size * size * 4) as usize];
    let center = size as i32 / 2;
    let outer = center - 1;
    let inner = outer - 2;

    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let dx = x - center;
            let dy = y - center;
            let dist_sq = dx * dx + dy * dy;

            let color = if dist_sq <= inner * inner {
                FILL
            } else if dist_sq <= outer * outer {
                RING
            } else {
                continue;
            };
            let i = ((y as u32 * size + x as u32) * 4) as usize;
            data[i..i + 4].copy_from_slice(&color);
        }
    }

    data
}
