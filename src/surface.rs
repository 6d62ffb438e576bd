use anyhow::Result;
use std::io::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FrameInfo {
    pub(crate) generation: u64,
    pub(crate) population: usize,
    pub(crate) width: u64,
    pub(crate) height: u64,
}

/// Where a rendered viewport goes. Markers are buffered; `end_frame` publishes.
pub(crate) trait Surface {
    fn begin_frame(&mut self, info: &FrameInfo);
    fn active(&mut self);
    fn dead(&mut self);
    fn end_row(&mut self);
    fn end_frame(&mut self) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Glyphs {
    pub(crate) alive: char,
    pub(crate) dead: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            alive: 'O',
            dead: '+',
        }
    }
}

/// Plain text frames: a header line, then one line per viewport row.
pub(crate) struct TextSurface<W: Write> {
    out: W,
    glyphs: Glyphs,
    frame: String,
}

impl<W: Write> TextSurface<W> {
    pub(crate) fn new(out: W, glyphs: Glyphs) -> Self {
        Self {
            out,
            glyphs,
            frame: String::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for TextSurface<W> {
    fn begin_frame(&mut self, info: &FrameInfo) {
        self.frame.clear();
        self.frame.push_str(&format!(
            "generation {}  population {}\n",
            info.generation, info.population
        ));
    }

    fn active(&mut self) {
        self.frame.push(self.glyphs.alive);
    }

    fn dead(&mut self) {
        self.frame.push(self.glyphs.dead);
    }

    fn end_row(&mut self) {
        self.frame.push('\n');
    }

    fn end_frame(&mut self) -> Result<()> {
        self.frame.push('\n');
        self.out.write_all(self.frame.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
