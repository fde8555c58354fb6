use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use bind_logging::bind_warn;
use chrono::Local;
use fetchbind_engine::{AsyncState, ViewFrame, ViewSink};

/// Paints each frame as one line on stdout.
#[derive(Debug, Default)]
pub(crate) struct TerminalView {
    write_failed: AtomicBool,
}

impl TerminalView {
    /// Write failures are reported once; later frames keep trying silently.
    fn paint(&self, out: &mut dyn Write, state: &AsyncState<Vec<String>>) {
        if let Err(err) = write_line(out, state) {
            if !self.write_failed.swap(true, Ordering::Relaxed) {
                bind_warn!("Failed to write frame to stdout: {}", err);
            }
        }
    }
}

impl ViewSink<Vec<String>> for TerminalView {
    fn render(&self, frame: ViewFrame<Vec<String>>) {
        let mut stdout = io::stdout().lock();
        self.paint(&mut stdout, &frame.state);
    }
}

fn write_line(out: &mut dyn Write, state: &AsyncState<Vec<String>>) -> io::Result<()> {
    writeln!(
        out,
        "[{}] {}",
        Local::now().format("%H:%M:%S%.3f"),
        format_frame(state)
    )?;
    out.flush()
}

pub(crate) fn format_frame(state: &AsyncState<Vec<String>>) -> String {
    let mut parts = Vec::with_capacity(3);
    if state.loading {
        parts.push("loading...".to_string());
    }
    if let Some(error) = &state.error {
        parts.push(format!("error: {error}"));
    }
    match &state.value {
        Some(users) if users.is_empty() => parts.push("no users".to_string()),
        Some(users) => parts.push(format!("users: {}", users.join(", "))),
        None if parts.is_empty() => parts.push("-".to_string()),
        None => {}
    }
    parts.join(" | ")
}
