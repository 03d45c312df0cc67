//! Console collaborator: a single guarded write-line primitive.
//!
//! Report lines from the monitor and immediate lines from trigger handlers
//! share one output stream; the mutex inside [`StdoutConsole`] guarantees a
//! line from one context never interleaves mid-line with another.

use std::io::Write;

use parking_lot::Mutex;

/// The one output primitive the sentinel consumes.
pub trait Console: Send + Sync {
    /// Write a single complete line to the shared output stream.
    fn write_line(&self, line: &str);
}

/// Stdout-backed console. Each `write_line` holds the lock for the whole
/// line, so concurrent callers serialize per line.
#[derive(Debug, Default)]
pub struct StdoutConsole {
    guard: Mutex<()>,
}

impl Console for StdoutConsole {
    fn write_line(&self, line: &str) {
        let _held = self.guard.lock();
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        // Console output is best-effort; a closed stdout must not take the
        // monitor loop down with it.
        let _ = writeln!(handle, "{line}");
        let _ = handle.flush();
    }
}

/// In-memory console for tests: collects every line in order.
#[derive(Debug, Default)]
pub struct MemoryConsole {
    lines: Mutex<Vec<String>>,
}

impl MemoryConsole {
    /// A fresh, empty console.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl Console for MemoryConsole {
    fn write_line(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{Console, MemoryConsole};

    #[test]
    fn memory_console_preserves_order() {
        let console = MemoryConsole::new();
        console.write_line("first");
        console.write_line("second");
        assert_eq!(console.lines(), vec!["first", "second"]);
    }

    #[test]
    fn concurrent_writers_produce_whole_lines() {
        let console = Arc::new(MemoryConsole::new());
        let handles: Vec<_> = (0..4)
            .map(|writer| {
                let console = Arc::clone(&console);
                std::thread::spawn(move || {
                    for i in 0..16 {
                        console.write_line(&format!("writer {writer} line {i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("writer thread panicked");
        }
        let lines = console.lines();
        assert_eq!(lines.len(), 64);
        assert!(lines.iter().all(|line| line.starts_with("writer ")));
    }
}
