//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Each frame is compared with the previous one row by row; only rows that
//! changed are re-emitted. A size change (or [`TerminalRenderer::invalidate`])
//! forces a full redraw.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

pub struct TerminalRenderer {
    out: io::Stdout,
    prev: FrameBuffer,
    full_redraw: bool,
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
            out: io::stdout(),
            prev: FrameBuffer::new(0, 0),
            full_redraw: true,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor, mouse reporting on.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(EnableMouseCapture)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush()?;
        self.invalidate();
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to repaint everything (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.full_redraw = true;
    }

    pub fn draw(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        let prev = (!self.full_redraw).then_some(&self.prev);
        encode_frame_into(prev, frame, &mut self.buf)?;
        self.flush()?;

        self.prev.clone_from(frame);
        self.full_redraw = false;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode `next` into terminal commands, skipping rows identical in `prev`.
///
/// `prev = None` (or a size mismatch) clears the screen and writes every row.
pub fn encode_frame_into(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut style: Option<Style> = None;
    for y in dirty_rows(prev, next) {
        out.queue(cursor::MoveTo(0, y))?;
        for glyph in next.row(y) {
            write_glyph(out, *glyph, &mut style)?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Rows of `next` that differ from `prev` (all rows without a previous frame).
pub fn dirty_rows<'a>(prev: Option<&'a FrameBuffer>, next: &'a FrameBuffer) -> impl Iterator<Item = u16> + 'a {
    (0..next.height()).filter(move |&y| prev.map_or(true, |p| p.row(y) != next.row(y)))
}

fn write_glyph(out: &mut Vec<u8>, glyph: Glyph, current: &mut Option<Style>) -> Result<()> {
    if *current != Some(glyph.style) {
        let s = glyph.style;
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(SetForegroundColor(to_color(s.fg)))?;
        out.queue(SetBackgroundColor(to_color(s.bg)))?;
        if s.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if s.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        *current = Some(s);
    }
    out.queue(Print(glyph.ch))?;
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_previous_frame_every_row_is_dirty() {
        let next = FrameBuffer::new(4, 3);
        assert_eq!(dirty_rows(None, &next).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_only_changed_rows_are_dirty() {
        let prev = FrameBuffer::new(4, 3);
        let mut next = prev.clone();
        next.put_char(2, 1, '#', Style::default());
        assert_eq!(dirty_rows(Some(&prev), &next).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_identical_frames_emit_no_text() {
        let mut fb = FrameBuffer::new(6, 2);
        fb.put_str(0, 0, "match!", Style::default());

        let mut full = Vec::new();
        encode_frame_into(None, &fb, &mut full).unwrap();
        let mut diff = Vec::new();
        encode_frame_into(Some(&fb), &fb, &mut diff).unwrap();

        assert!(String::from_utf8_lossy(&full).contains("match!"));
        assert!(!String::from_utf8_lossy(&diff).contains("match!"));
        assert!(diff.len() < full.len());
    }
}
