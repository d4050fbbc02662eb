use std::backtrace::Backtrace;
use std::panic::{self, PanicHookInfo};
use std::sync::OnceLock;

static HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

/// Install a panic hook that logs the payload, location and top of the backtrace.
///
/// Does nothing if already installed. The search thread still catches the
/// panic itself and turns it into an `error` event.
pub fn install_panic_hook() {
    if HOOK_INSTALLED.set(()).is_err() {
        return;
    }

    panic::set_hook(Box::new(|info: &PanicHookInfo<'_>| {
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };

        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "<unknown>".to_string());

        let thread = std::thread::current();
        let backtrace = Backtrace::capture().to_string();
        let frames: Vec<&str> =
            backtrace.lines().map(str::trim).filter(|l| !l.is_empty()).take(8).collect();
        let summary = if frames.is_empty() { "<no backtrace>".to_string() } else { frames.join(" | ") };

        log::error!(
            target: "panic",
            "panic in thread '{}': payload='{payload}' location={location} backtrace={summary}",
            thread.name().unwrap_or("<unnamed>")
        );
    }));
}
