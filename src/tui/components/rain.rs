//! Falling-glyph backdrop.
//!
//! Each column has a head that moves down one row per frame and writes a
//! random glyph. Written cells age every frame and disappear once older
//! than the trail, which stands in for a translucent fade.

use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Single-cell glyphs: half-width katakana, digits and hex letters.
const GLYPHS: &[char] = &[
    'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ', 'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', 'ﾀ', 'ﾁ', 'ﾂ',
    'ﾃ', 'ﾄ', 'ﾅ', 'ﾆ', 'ﾇ', 'ﾈ', 'ﾉ', 'ﾊ', 'ﾋ', 'ﾌ', 'ﾍ', 'ﾎ', 'ﾏ', 'ﾐ', 'ﾑ', 'ﾒ', 'ﾓ', 'ﾔ',
    'ﾕ', 'ﾖ', 'ﾗ', 'ﾘ', 'ﾙ', 'ﾚ', 'ﾛ', 'ﾜ', 'ｦ', 'ﾝ', '0', '1', '2', '3', '4', '5', '6', '7',
    '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

/// Frames a glyph stays visible after being written.
const TRAIL_LENGTH: u8 = 12;

/// Per-frame chance that a head past the bottom edge restarts at the top.
const RESTART_CHANCE: f64 = 0.025;

#[derive(Clone, Copy, Debug)]
struct Cell {
    glyph: char,
    age: u8,
}

/// Backdrop state sized to the terminal.
#[derive(Clone, Debug)]
pub struct MatrixRain {
    width: u16,
    height: u16,
    /// Head row per column. May run past `height` until it restarts.
    drops: Vec<u32>,
    cells: Vec<Option<Cell>>,
}

impl MatrixRain {
    /// Creates a backdrop with every head at the top row.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let mut rain = Self {
            width: 0,
            height: 0,
            drops: Vec::new(),
            cells: Vec::new(),
        };
        rain.resize(width, height);
        rain
    }

    /// Resets the backdrop to a new size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.drops = vec![0; width as usize];
        self.cells = vec![None; width as usize * height as usize];
    }

    /// Advances the animation by one frame.
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        for slot in &mut self.cells {
            let expired = match slot {
                Some(cell) => {
                    cell.age = cell.age.saturating_add(1);
                    cell.age > TRAIL_LENGTH
                }
                None => false,
            };
            if expired {
                *slot = None;
            }
        }

        let width = self.width as usize;
        for (column, drop) in self.drops.iter_mut().enumerate() {
            if *drop < u32::from(self.height) {
                let glyph = GLYPHS[rng.random_range(0..GLYPHS.len())];
                self.cells[*drop as usize * width + column] = Some(Cell { glyph, age: 0 });
            } else if rng.random_bool(RESTART_CHANCE) {
                *drop = 0;
                continue;
            }
            *drop = drop.saturating_add(1);
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of glyphs currently visible.
    pub fn lit_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    fn style_for(age: u8) -> Style {
        match age {
            0 => Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            1..=3 => Style::default().fg(Color::LightGreen),
            4..=7 => Style::default().fg(Color::Green),
            _ => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::DIM),
        }
    }
}

impl Widget for &MatrixRain {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = self.width as usize;
        let rows = area.height.min(self.height);
        let cols = area.width.min(self.width);

        for y in 0..rows {
            for x in 0..cols {
                if let Some(cell) = self.cells[y as usize * width + x as usize] {
                    buf[(area.x + x, area.y + y)]
                        .set_char(cell.glyph)
                        .set_style(MatrixRain::style_for(cell.age));
                }
            }
        }
    }
}
