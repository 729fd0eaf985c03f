//! Copying text out of process via the platform clipboard command.

use std::io::Write;
use std::process::{Command, Stdio};

/// Side-effect-only sink the controller copies through. Trait-shaped so
/// tests can record writes instead of spawning processes.
pub trait ClipboardSink: Send + Sync {
    fn write_all(&self, text: &str) -> Result<(), String>;
}

/// The real sink: tries each platform clipboard command in order.
pub struct SystemClipboard;

#[cfg(target_os = "macos")]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[("cmd", &["/C", "clip"])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

impl ClipboardSink for SystemClipboard {
    fn write_all(&self, text: &str) -> Result<(), String> {
        for (program, args) in CLIPBOARD_COMMANDS {
            if pipe_through(program, args, text).is_ok() {
                return Ok(());
            }
        }
        Err("no clipboard command available (install wl-copy, xclip, or xsel)".to_string())
    }
}

fn pipe_through(program: &str, args: &[&str], input: &str) -> Result<(), String> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|_| format!("clipboard command `{program}` not available"))?;

    if let Some(mut stdin) = child.stdin.take() {
        let _ = stdin.write_all(input.as_bytes());
    }

    match child.wait() {
        Ok(status) if status.success() => Ok(()),
        _ => Err(format!("clipboard command `{program}` failed")),
    }
}
