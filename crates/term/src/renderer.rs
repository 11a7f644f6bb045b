//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are diffed against the previous one and only changed spans are
//! written. Mouse capture is enabled while the alternate screen is active so
//! tiles can be picked with a click.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, event,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Unchanged cells between two changed spans that are re-printed instead of
/// emitting another cursor move. A `MoveTo` costs about as much as this many
/// cells, and tiles are drawn as 4-cell blocks with single-cell gutters.
const MERGE_GAP: u16 = 3;

// Attribute escapes are written as bytes: crossterm's `SetAttribute` formats
// its SGR code through a heap `String`, and the diff path must not allocate.
const SGR_RESET: &[u8] = b"\x1b[0m";
const SGR_BOLD: &[u8] = b"\x1b[1m";
const SGR_DIM: &[u8] = b"\x1b[2m";

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: FrameBuffer,
    dirty: bool,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: FrameBuffer::new(0, 0),
            dirty: true,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Switch to the alternate screen in raw mode with mouse reporting.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(terminal::SetTitle("TUI Sheep"))?;
        self.buf.queue(event::EnableMouseCapture)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.dirty = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        Pen::default().finish(&mut self.buf)?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(event::DisableMouseCapture)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to repaint the whole screen (resize, menu switch).
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Draw a framebuffer and keep it as the reference for the next diff.
    ///
    /// The caller's buffer is swapped with the previous frame, so it comes
    /// back holding stale content and must be fully re-rendered (which
    /// `GameView::render_into` always does).
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let resized = self.last.width() != fb.width() || self.last.height() != fb.height();

        self.buf.clear();
        if self.dirty || resized {
            encode_full_into(fb, &mut self.buf)?;
            self.dirty = false;
        } else {
            encode_diff_into(&self.last, fb, &mut self.buf)?;
        }
        self.flush_buf()?;

        std::mem::swap(&mut self.last, fb);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut pen = Pen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        pen.print_span(out, fb, 0, y, fb.width())?;
    }
    pen.finish(out)
}

/// Encode only the cells that differ from `prev` into `out`.
///
/// Frames of different sizes are treated as entirely changed.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let same_size = prev.width() == next.width() && prev.height() == next.height();

    let mut pen = Pen::default();
    for y in 0..next.height() {
        if !same_size {
            out.queue(cursor::MoveTo(0, y))?;
            pen.print_span(out, next, 0, y, next.width())?;
            continue;
        }
        for (x, len) in ChangedSpans::new(prev, next, y) {
            out.queue(cursor::MoveTo(x, y))?;
            pen.print_span(out, next, x, y, len)?;
        }
    }
    pen.finish(out)
}

/// Tracks the terminal's active style so only the parts that change are sent.
#[derive(Debug, Default)]
struct Pen {
    current: Option<CellStyle>,
}

impl Pen {
    fn print_span(
        &mut self,
        out: &mut Vec<u8>,
        fb: &FrameBuffer,
        x: u16,
        y: u16,
        len: u16,
    ) -> Result<()> {
        for dx in 0..len {
            let cell = fb.get(x + dx, y).unwrap_or_default();
            self.set(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn set(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = self.current.replace(style);
        if prev == Some(style) {
            return Ok(());
        }

        // SGR reset clears colours too, so attribute changes repaint both.
        let attrs_changed = prev.map_or(true, |p| p.bold != style.bold || p.dim != style.dim);
        if attrs_changed {
            out.extend_from_slice(SGR_RESET);
            if style.bold {
                out.extend_from_slice(SGR_BOLD);
            }
            if style.dim {
                out.extend_from_slice(SGR_DIM);
            }
        }
        if attrs_changed || prev.map(|p| p.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(to_color(style.fg)))?;
        }
        if attrs_changed || prev.map(|p| p.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(to_color(style.bg)))?;
        }
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?;
        out.extend_from_slice(SGR_RESET);
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Changed `(x, len)` spans of one row, with short unchanged gaps merged.
struct ChangedSpans<'a> {
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    y: u16,
    x: u16,
}

impl<'a> ChangedSpans<'a> {
    fn new(prev: &'a FrameBuffer, next: &'a FrameBuffer, y: u16) -> Self {
        Self { prev, next, y, x: 0 }
    }

    fn differs(&self, x: u16) -> bool {
        self.prev.get(x, self.y) != self.next.get(x, self.y)
    }
}

impl Iterator for ChangedSpans<'_> {
    type Item = (u16, u16);

    fn next(&mut self) -> Option<Self::Item> {
        let w = self.next.width();
        while self.x < w && !self.differs(self.x) {
            self.x += 1;
        }
        if self.x >= w {
            return None;
        }

        let start = self.x;
        let mut end = start + 1;
        let mut x = end;
        while x < w {
            if self.differs(x) {
                end = x + 1;
            } else if x - end >= MERGE_GAP {
                break;
            }
            x += 1;
        }
        self.x = end;
        Some((start, end - start))
    }
}
