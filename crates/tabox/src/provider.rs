//! Shell-backed dynamic text.
//!
//! The render library treats `$(...)` segments as opaque commands and asks
//! its provider for the replacement text; this is the one place in the
//! binary where commands actually run.

use std::process::Command;

use tabox_render::DynamicTextProvider;

/// Resolves `$(...)` segments by running them through `sh -c`.
///
/// Failures are swallowed into empty text: a broken command in a title
/// should not take the whole table down.
pub struct ShellProvider;

impl DynamicTextProvider for ShellProvider {
    fn resolve(&self, command: &str) -> String {
        match Command::new("sh").arg("-c").arg(command).output() {
            Ok(out) => String::from_utf8_lossy(&out.stdout)
                .trim_end_matches('\n')
                .to_string(),
            Err(_) => String::new(),
        }
    }
}
