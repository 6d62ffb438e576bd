use crate::surface::{FrameInfo, Glyphs, Surface};
use anyhow::{Context, Result};
use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Write};
use tracing::debug;

const HUD_ROWS: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bold: false,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }
    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    /// Out-of-bounds writes are dropped; the viewport can be larger than the screen.
    pub(crate) fn set(&mut self, x: u64, y: u64, c: Cell) {
        if x < u64::from(self.w) && y < u64::from(self.h) {
            let i = self.idx(x as u16, y as u16);
            self.cells[i] = c;
        }
    }
    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u64, y: u64, s: &str, fg: Color, bold: bool) {
    for (i, ch) in s.chars().enumerate() {
        buf.set(x + i as u64, y, Cell { ch, fg, bold });
    }
}

/// Raw-mode alternate screen that renders viewport rows below a one-line HUD.
pub(crate) struct Terminal {
    out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    prev: CellBuffer,
    cur: CellBuffer,
    glyphs: Glyphs,
    enable_color: bool,
    cursor: (u64, u64),
    ended: bool,
}

impl Terminal {
    fn r#unsized(glyphs: Glyphs, enable_color: bool) -> Self {
        Self {
            out: io::stdout(),
            cols: 0,
            rows: 0,
            prev: CellBuffer::new(0, 0),
            cur: CellBuffer::new(0, 0),
            glyphs,
            enable_color,
            cursor: (0, 0),
            ended: false,
        }
    }

    /// Raw mode goes on before the alternate screen, and the value exists from then on,
    /// so any later failure drops it and restores the terminal.
    pub(crate) fn begin(glyphs: Glyphs, enable_color: bool) -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut term = Self::r#unsized(glyphs, enable_color);
        execute!(
            term.out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(ClearType::All)
        )
        .context("failed to enter alternate screen")?;
        term.resize_if_needed().context("failed to query terminal size")?;
        Ok(term)
    }

    pub(crate) fn end(&mut self) -> Result<()> {
        if self.ended {
            return Ok(());
        }
        self.ended = true;
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn resize_if_needed(&mut self) -> Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        execute!(self.out, terminal::Clear(ClearType::All))?;
        Ok(true)
    }

    /// Overwrites the HUD line, keeping the last frame below it.
    pub(crate) fn status(&mut self, text: &str) -> Result<()> {
        for x in 0..u64::from(self.cur.w) {
            self.cur.set(x, 0, Cell::default());
        }
        draw_text(&mut self.cur, 0, 0, text, Color::Yellow, true);
        self.present(true)
    }

    fn color(&self, c: Color) -> Color {
        if self.enable_color {
            c
        } else {
            Color::White
        }
    }

    fn put(&mut self, ch: char, fg: Color) {
        let (x, y) = self.cursor;
        let fg = self.color(fg);
        self.cur.set(x, y, Cell { ch, fg, bold: false });
        self.cursor.0 += 1;
    }

    fn present(&mut self, diff_only: bool) -> Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bold = false;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if diff_only && c == self.prev.cells[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;

                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if c.bold != last_bold {
                    let attr = if c.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    };
                    queue!(self.out, SetAttribute(attr))?;
                    last_bold = c.bold;
                }

                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            ResetColor,
            EndSynchronizedUpdate
        )?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

impl Surface for Terminal {
    fn begin_frame(&mut self, info: &FrameInfo) {
        // a failed size query keeps the old buffers; present() reports real I/O errors
        if let Err(e) = self.resize_if_needed() {
            debug!(error = %e, "terminal size query failed, keeping previous size");
        }
        self.cur.clear();
        let hud = format!(
            "gen {}  pop {}  window {}x{}  [q] quit",
            info.generation, info.population, info.width, info.height
        );
        draw_text(&mut self.cur, 0, 0, &hud, Color::White, true);
        self.cursor = (0, u64::from(HUD_ROWS));
    }

    fn active(&mut self) {
        self.put(self.glyphs.alive, Color::Green);
    }

    fn dead(&mut self) {
        self.put(self.glyphs.dead, Color::Red);
    }

    fn end_row(&mut self) {
        self.cursor = (0, self.cursor.1 + 1);
    }

    fn end_frame(&mut self) -> Result<()> {
        self.present(true)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.end();
    }
}
