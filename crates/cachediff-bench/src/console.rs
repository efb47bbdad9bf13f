//! Console rendering of grids and run outcomes.

use std::fmt::Write as _;
use std::io::{self, Write};

use cachediff_arena::AllocationError;
use cachediff_core::{Cell, Dimensionality};
use cachediff_engine::{RunHooks, RunSummary};

/// Render a grid the way the debug dump prints it.
///
/// Values are tab-terminated with one decimal. A line is one row; 2D
/// prints the full matrix and 3D the `z = extent / 2` slice, each
/// followed by an empty line.
///
/// # Panics
///
/// Panics if `cells` is shorter than `extent^ndim`.
pub fn format_grid(cells: &[Cell], dimensionality: Dimensionality, extent: usize) -> String {
    let mut out = String::new();
    let mut row = |cells: &mut dyn Iterator<Item = Cell>| {
        for c in cells {
            // Writing into a String cannot fail.
            let _ = write!(out, "{c:.1}\t");
        }
        out.push('\n');
    };
    match dimensionality {
        Dimensionality::One => row(&mut cells[..extent].iter().copied()),
        Dimensionality::Two => {
            for x in 0..extent {
                row(&mut cells[x * extent..(x + 1) * extent].iter().copied());
            }
        }
        Dimensionality::Three => {
            let z = extent / 2;
            for x in 0..extent {
                row(&mut (0..extent).map(|y| cells[x * extent * extent + y * extent + z]));
            }
        }
    }
    if dimensionality != Dimensionality::One {
        out.push('\n');
    }
    out
}

/// [`RunHooks`] that write to a console-like sink.
///
/// Grids are printed on every `debug_print`. The failure and success
/// messages are printed only when `announce` is set, which the runner
/// ties to the config's `debug_trace`. The first write error is kept and
/// later writes are skipped.
#[derive(Debug)]
pub struct ConsoleHooks<W: Write> {
    out: W,
    announce: bool,
    error: Option<io::Error>,
}

impl ConsoleHooks<io::Stdout> {
    /// Hooks writing to standard output.
    pub fn stdout(announce: bool) -> Self {
        Self::new(io::stdout(), announce)
    }
}

impl<W: Write> ConsoleHooks<W> {
    /// Hooks writing to `out`.
    pub fn new(out: W, announce: bool) -> Self {
        Self {
            out,
            announce,
            error: None,
        }
    }

    /// Take the first write error, if any occurred.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Consume the hooks, returning the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_all(text.as_bytes()) {
            self.error = Some(e);
        }
    }
}

impl<W: Write> RunHooks for ConsoleHooks<W> {
    fn report_allocation_failure(&mut self, _error: &AllocationError) {
        if self.announce {
            self.emit("Error: Failed to allocate memory\n");
        }
    }

    fn report_completion(&mut self, _summary: &RunSummary) {
        if self.announce {
            self.emit("Simulation completed successfully\n");
        }
    }

    fn debug_print(&mut self, cells: &[Cell], dimensionality: Dimensionality, extent: usize) {
        let text = format_grid(cells, dimensionality, extent);
        self.emit(&text);
    }
}
