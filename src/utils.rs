use crate::{HarnessError, Result, session::BrowserKind};
use std::path::PathBuf;

/// Locates the executable for a browser kind, preferring well-known install
/// locations over `$PATH` lookup.
pub fn find_browser_executable(kind: BrowserKind) -> Result<PathBuf> {
    for candidate in standard_locations(kind) {
        let path = PathBuf::from(candidate);
        if path.exists() {
            return Ok(path);
        }
    }

    for binary in path_binaries(kind) {
        if let Ok(path) = which::which(binary) {
            return Ok(path);
        }
    }

    Err(HarnessError::LaunchFailed(format!(
        "Could not find a {} executable. Specify one with [browser].binary_path",
        kind
    )))
}

#[cfg(target_os = "linux")]
fn standard_locations(kind: BrowserKind) -> &'static [&'static str] {
    match kind {
        BrowserKind::Chrome => &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ],
        BrowserKind::Firefox => &["/usr/bin/firefox", "/snap/bin/firefox"],
        BrowserKind::Edge => &["/usr/bin/microsoft-edge", "/usr/bin/microsoft-edge-stable"],
    }
}

#[cfg(target_os = "macos")]
fn standard_locations(kind: BrowserKind) -> &'static [&'static str] {
    match kind {
        BrowserKind::Chrome => &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
        ],
        BrowserKind::Firefox => &["/Applications/Firefox.app/Contents/MacOS/firefox"],
        BrowserKind::Edge => &["/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge"],
    }
}

#[cfg(target_os = "windows")]
fn standard_locations(kind: BrowserKind) -> &'static [&'static str] {
    match kind {
        BrowserKind::Chrome => &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ],
        BrowserKind::Firefox => &[r"C:\Program Files\Mozilla Firefox\firefox.exe"],
        BrowserKind::Edge => &[r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe"],
    }
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn standard_locations(_kind: BrowserKind) -> &'static [&'static str] {
    &[]
}

fn path_binaries(kind: BrowserKind) -> &'static [&'static str] {
    if cfg!(windows) {
        match kind {
            BrowserKind::Chrome => &["chrome.exe", "chromium.exe"],
            BrowserKind::Firefox => &["firefox.exe"],
            BrowserKind::Edge => &["msedge.exe"],
        }
    } else {
        match kind {
            BrowserKind::Chrome => &["google-chrome", "chromium", "chromium-browser", "chrome"],
            BrowserKind::Firefox => &["firefox"],
            BrowserKind::Edge => &["microsoft-edge", "msedge"],
        }
    }
}
