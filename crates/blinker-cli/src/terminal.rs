//! Observers that render the cycle in a terminal.

use std::io::Write;

use blinker_core::{Event, StatusObserver};
use notify_rust::Notification;

const APP_NAME: &str = "Blinker";

/// Rewrites a single status line in place; notices go to stderr and,
/// optionally, to the desktop notification area.
pub struct TerminalObserver {
    desktop: bool,
}

impl TerminalObserver {
    pub fn new(desktop: bool) -> Self {
        Self { desktop }
    }
}

impl StatusObserver for TerminalObserver {
    fn status(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "\r\x1b[2K{text}");
        let _ = out.flush();
    }

    fn notice(&self, text: &str) {
        eprintln!("\r\x1b[2K{text}");
        if self.desktop {
            send_desktop_notification(text);
        }
    }
}

/// Prints every event as one JSON line on stdout.
pub struct JsonObserver {
    desktop: bool,
}

impl JsonObserver {
    pub fn new(desktop: bool) -> Self {
        Self { desktop }
    }
}

impl StatusObserver for JsonObserver {
    fn status(&self, _text: &str) {}

    fn notice(&self, text: &str) {
        if self.desktop {
            send_desktop_notification(text);
        }
    }

    fn event(&self, event: &Event) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!("failed to encode event: {e}"),
        }
    }
}

/// Fire-and-forget: the notification daemon round-trip happens off the
/// tick task.
fn send_desktop_notification(body: &str) {
    let body = body.to_string();
    let show = move || {
        if let Err(e) = Notification::new()
            .appname(APP_NAME)
            .summary(APP_NAME)
            .body(&body)
            .show()
        {
            tracing::debug!("desktop notification failed: {e}");
        }
    };
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn_blocking(show);
        }
        Err(_) => show(),
    }
}
