//! Terminal rendering of the popup surface.
//!
//! The popup renders after every change, so this renderer only writes what
//! differs from the previous frame.

use lens_core::presenter::{PopupSurface, Renderer, ResultPanel, StatusKind, StatusLine};

use std::io::{Stdout, Write, stdout};
use std::sync::Mutex;

use log::warn;

struct Frame<W> {
    out: W,
    status: Option<StatusLine>,
    key_status: Option<StatusLine>,
    result: ResultPanel,
}

pub struct TerminalRenderer<W: Write + Send> {
    frame: Mutex<Frame<W>>,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(stdout())
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            frame: Mutex::new(Frame {
                out,
                status: None,
                key_status: None,
                result: ResultPanel::Empty,
            }),
        }
    }

    /// Recover the writer, e.g. to inspect captured output.
    pub fn into_inner(self) -> W {
        match self.frame.into_inner() {
            Ok(frame) => frame.out,
            Err(poisoned) => poisoned.into_inner().out,
        }
    }
}

fn tag(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::Info => "info",
        StatusKind::Error => "error",
        StatusKind::Success => "ok",
    }
}

fn write_frame<W: Write>(frame: &mut Frame<W>, surface: &PopupSurface) -> std::io::Result<()> {
    if surface.api_key_status != frame.key_status {
        if let Some(line) = &surface.api_key_status {
            writeln!(frame.out, "[key:{}] {}", tag(line.kind), line.message)?;
        }
        frame.key_status = surface.api_key_status.clone();
    }

    if surface.status != frame.status {
        if let Some(line) = &surface.status {
            writeln!(frame.out, "[{}] {}", tag(line.kind), line.message)?;
        }
        frame.status = surface.status.clone();
    }

    if surface.result != frame.result {
        if let (ResultPanel::Error(text) | ResultPanel::Analysis(text), Some(heading)) =
            (&surface.result, surface.result.heading())
        {
            writeln!(frame.out, "\n{heading}\n{text}")?;
        }
        frame.result = surface.result.clone();
    }

    frame.out.flush()
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn render(&self, surface: &PopupSurface) {
        let mut frame = match self.frame.lock() {
            Ok(frame) => frame,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Err(e) = write_frame(&mut frame, surface) {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}
