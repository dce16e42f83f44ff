use std::path::{Path, PathBuf};
use tracing::warn;

pub const ICON_FILE: &str = "KeyTask.png";
pub const ICON_SIZE: u32 = 64;

/// Square RGBA image used for the tray and window icons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Steel-blue square with a white inner square.
pub fn fallback_icon() -> IconImage {
    const BACKGROUND: [u8; 4] = [70, 130, 180, 255];
    const FOREGROUND: [u8; 4] = [255, 255, 255, 255];
    let inner = 16..=48;

    let mut rgba = Vec::with_capacity((ICON_SIZE * ICON_SIZE * 4) as usize);
    for y in 0..ICON_SIZE {
        for x in 0..ICON_SIZE {
            if inner.contains(&x) && inner.contains(&y) {
                rgba.extend_from_slice(&FOREGROUND);
            } else {
                rgba.extend_from_slice(&BACKGROUND);
            }
        }
    }

    IconImage {
        rgba,
        width: ICON_SIZE,
        height: ICON_SIZE,
    }
}

pub fn load_icon(path: &Path) -> image::ImageResult<IconImage> {
    let image = image::open(path)?
        .resize_exact(ICON_SIZE, ICON_SIZE, image::imageops::FilterType::Triangle)
        .into_rgba8();
    Ok(IconImage {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

/// `KeyTask.png` beside the executable, falling back to the generated icon.
pub fn app_icon() -> IconImage {
    let path = icon_path();
    match load_icon(&path) {
        Ok(icon) => icon,
        Err(e) => {
            warn!("using built-in icon, could not load {:?}: {}", path, e);
            fallback_icon()
        }
    }
}

fn icon_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(ICON_FILE)))
        .unwrap_or_else(|| PathBuf::from(ICON_FILE))
}
