//! Framebuffer and style types for terminal rendering.
//!
//! Drawing calls take signed coordinates and silently clip, so the hex
//! projection can place cells relative to a centre without bounds checks.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// From `0xRRGGBB`.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }

    /// Blend toward `other`; `percent` of 0 keeps `self`, 100 gives `other`.
    pub fn mix(self, other: Rgb, percent: u8) -> Rgb {
        let p = percent.min(100) as u16;
        let lerp = |a: u8, b: u8| ((a as u16 * (100 - p) + b as u16 * p) / 100) as u8;
        Rgb::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }
}

/// Minimal per-glyph styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub const fn fg(fg: Rgb) -> Self {
        Self {
            fg,
            bg: BACKGROUND,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}

pub const BACKGROUND: Rgb = Rgb::new(16, 16, 22);

impl Default for Style {
    fn default() -> Self {
        Self::fg(Rgb::new(220, 220, 220))
    }
}

/// A single terminal character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::new(' ', Style::default())
    }
}

/// 2D framebuffer of styled glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible. Contents are undefined
    /// afterwards; callers clear before drawing.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.glyphs
            .resize(width as usize * height as usize, Glyph::default());
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let inside = (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y);
        inside.then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.index(x as i32, y as i32).map(|i| self.glyphs[i])
    }

    /// Write one glyph; off-screen writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, glyph: Glyph) {
        if let Some(i) = self.index(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    pub fn clear(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Returns the column after the last character.
    pub fn put_str(&mut self, x: i32, y: i32, s: &str, style: Style) -> i32 {
        let mut cx = x;
        for ch in s.chars() {
            self.set(cx, y, Glyph::new(ch, style));
            cx += 1;
        }
        cx
    }

    /// Decimal without allocating. Returns the column after the last digit.
    pub fn put_u32(&mut self, x: i32, y: i32, n: u32, style: Style) -> i32 {
        let mut digits = [0u8; 10];
        let mut len = 0;
        let mut rest = n;
        loop {
            digits[len] = b'0' + (rest % 10) as u8;
            len += 1;
            rest /= 10;
            if rest == 0 {
                break;
            }
        }
        let mut cx = x;
        for &d in digits[..len].iter().rev() {
            self.set(cx, y, Glyph::new(d as char, style));
            cx += 1;
        }
        cx
    }

    /// Centre `s` horizontally within `[x, x + w)`.
    pub fn put_centered(&mut self, x: i32, w: i32, y: i32, s: &str, style: Style) {
        let len = s.chars().count() as i32;
        self.put_str(x + (w - len).max(0) / 2, y, s, style);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, glyph: Glyph) {
        for row in y..y + h {
            for col in x..x + w {
                self.set(col, row, glyph);
            }
        }
    }
}
