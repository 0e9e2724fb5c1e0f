/// ASCII presentation of a frame buffer in the terminal
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use tri3d_core::FrameBuffer;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Downsamples a frame buffer onto a grid of terminal cells
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            char_buffer: vec![' '; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn chars(&self) -> &[char] {
        &self.char_buffer
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
    }

    /// Fill the character grid from `frame`.
    ///
    /// Each cell covers a block of pixels and takes the brightest one, so thin
    /// wireframe lines survive the downsampling.
    pub fn render_frame(&mut self, frame: &FrameBuffer) {
        self.clear();
        if self.width == 0 || self.height == 0 || frame.width() == 0 || frame.height() == 0 {
            return;
        }

        let mut brightness = vec![0.0_f32; self.width * self.height];
        for y in 0..frame.height() {
            let row = y * self.height / frame.height();
            for x in 0..frame.width() {
                let col = x * self.width / frame.width();
                let idx = row * self.width + col;
                let p = frame.pixels()[y * frame.width() + x];
                let luminance = (p.x + p.y + p.z) / (3.0 * 255.0);
                brightness[idx] = brightness[idx].max(luminance);
            }
        }

        for (cell, level) in self.char_buffer.iter_mut().zip(brightness) {
            let char_index = (level.clamp(0.0, 1.0) * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
            *cell = LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)];
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}
