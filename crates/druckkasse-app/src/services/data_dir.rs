// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::PathBuf;

/// Return the application data directory, creating it if needed.
pub fn data_dir() -> PathBuf {
    let base = base_dir(
        std::env::var("XDG_DATA_HOME").ok(),
        std::env::var("HOME").ok(),
    );
    let dir = base.join("druckkasse");
    std::fs::create_dir_all(&dir).ok();
    dir
}

/// XDG data dir, then `~/.local/share`, then `/tmp`.
fn base_dir(xdg_data_home: Option<String>, home: Option<String>) -> PathBuf {
    if let Some(xdg) = xdg_data_home.filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg);
    }
    if let Some(home) = home.filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".local").join("share");
    }
    PathBuf::from("/tmp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_wins() {
        assert_eq!(
            base_dir(Some("/xdg".into()), Some("/home/kiosk".into())),
            PathBuf::from("/xdg")
        );
    }

    #[test]
    fn home_fallback() {
        assert_eq!(
            base_dir(None, Some("/home/kiosk".into())),
            PathBuf::from("/home/kiosk/.local/share")
        );
        assert_eq!(
            base_dir(Some(String::new()), Some("/home/kiosk".into())),
            PathBuf::from("/home/kiosk/.local/share")
        );
    }

    #[test]
    fn last_resort_is_tmp() {
        assert_eq!(base_dir(None, None), PathBuf::from("/tmp"));
    }
}
