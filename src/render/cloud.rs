//! Word-cloud layout and rasterization.
//!
//! # Algorithm
//!
//! 1. Words (runs of at least two word characters) are counted and ranked by
//!    frequency, ties broken by the word itself. Purely numeric words are
//!    ignored. Case variants are counted together under their most common
//!    spelling, and a plural ending in `s` joins its singular when both occur.
//!    Only the top `max_words` are kept.
//! 2. Words are placed from most to least frequent. Each word's font size
//!    follows its frequency relative to the previous word, weighted by
//!    `relative_scaling`.
//! 3. A free spot is picked at random among all positions where the word's
//!    box fits on an occupancy grid (queried through a summed-area table). If
//!    there is none, the font size shrinks one step at a time. Once it drops
//!    below `min_font_size`, this word and all remaining ones are skipped.
//! 4. Glyphs are drawn with a random hue and their ink is marked on the grid.
//!    A word's box is the union of its advance box and its glyph masks, so
//!    overhanging ink stays inside the area that was checked for room.
//!
//! Rotation and bigram collocations are not supported.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

use image::{ImageFormat, Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use swash::scale::image::{Content, Image};
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::{Format, Vector};
use swash::{CacheKey, FontRef};
use tracing::debug;

use super::CloudRenderer;
use crate::config::CloudConfig;
use crate::error::{ChatcloudError, Result};

/// Side length of one occupancy cell in pixels.
const CELL: u32 = 4;

/// DejaVu Sans, used when no font path is configured. It covers Arabic and
/// Persian letters and their presentation forms.
pub const BUNDLED_FONT: &[u8] = include_bytes!("../../data/DejaVuSans.ttf");

/// Common English words dropped when [`CloudConfig::english_stopwords`] is set.
pub const ENGLISH_STOPWORDS: &str = include_str!("../../data/english_stopwords.txt");

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w[\w']+").expect("valid regex"));

static ENGLISH: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ENGLISH_STOPWORDS
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
});

/// A word as drawn on the image.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub font_size: u32,
    /// Left edge of the word's box in pixels.
    pub x: u32,
    /// Top edge of the word's box in pixels.
    pub y: u32,
    /// Box width including the margin.
    pub width: u32,
    /// Box height including the margin.
    pub height: u32,
    pub color: [u8; 3],
}

/// Counts the words of `text` and returns the `max_words` most frequent ones
/// with their frequency relative to the top word.
///
/// # Example
///
/// ```
/// use chatcloud::render::word_frequencies;
///
/// let words = word_frequencies("سلام سلام دنیا ۱۲", 10);
/// assert_eq!(words, [("سلام".to_string(), 1.0), ("دنیا".to_string(), 0.5)]);
///
/// let words = word_frequencies("Cat cats cat dog", 10);
/// assert_eq!(words, [("cat".to_string(), 1.0), ("dog".to_string(), 1.0 / 3.0)]);
/// ```
pub fn word_frequencies(text: &str, max_words: usize) -> Vec<(String, f32)> {
    rank_words(text, max_words, false)
}

/// Like [`word_frequencies`], also dropping [`ENGLISH_STOPWORDS`]
/// (compared case-insensitively).
pub fn word_frequencies_without_english(text: &str, max_words: usize) -> Vec<(String, f32)> {
    rank_words(text, max_words, true)
}

/// Spellings of one lowercase word in first-seen order, with counts.
type Variants<'a> = Vec<(&'a str, usize)>;

fn rank_words(text: &str, max_words: usize, drop_english: bool) -> Vec<(String, f32)> {
    let mut groups: HashMap<String, Variants<'_>> = HashMap::new();
    for found in WORD.find_iter(text) {
        let word = found.as_str();
        let word = word
            .strip_suffix("'s")
            .or_else(|| word.strip_suffix("'S"))
            .unwrap_or(word);
        if word.chars().all(char::is_numeric) {
            continue;
        }
        let lower = word.to_lowercase();
        if drop_english && ENGLISH.contains(lower.as_str()) {
            continue;
        }
        let variants = groups.entry(lower).or_default();
        match variants.iter_mut().find(|(spelling, _)| *spelling == word) {
            Some((_, count)) => *count += 1,
            None => variants.push((word, 1)),
        }
    }

    merge_plurals(&mut groups);

    let mut ranked: Vec<(&str, usize)> = groups
        .values()
        .filter_map(|variants| {
            let total: usize = variants.iter().map(|(_, count)| count).sum();
            let mut best: Option<(&str, usize)> = None;
            for &(spelling, count) in variants {
                if best.is_none_or(|(_, top)| count > top) {
                    best = Some((spelling, count));
                }
            }
            best.map(|(spelling, _)| (spelling, total))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(max_words);

    let Some(&(_, top)) = ranked.first() else {
        return Vec::new();
    };
    ranked
        .into_iter()
        .map(|(word, count)| (word.to_string(), count as f32 / top as f32))
        .collect()
}

/// Folds `xs` into `x` when both were seen. Words ending in `ss` stay apart.
fn merge_plurals(groups: &mut HashMap<String, Variants<'_>>) {
    let plurals: Vec<String> = groups
        .keys()
        .filter(|key| key.ends_with('s') && !key.ends_with("ss"))
        .filter(|key| groups.contains_key(&key[..key.len() - 1]))
        .cloned()
        .collect();

    for plural in plurals {
        let Some(variants) = groups.remove(&plural) else {
            continue;
        };
        let Some(singular) = groups.get_mut(&plural[..plural.len() - 1]) else {
            continue;
        };
        for (spelling, count) in variants {
            let stem = spelling.strip_suffix(['s', 'S']).unwrap_or(spelling);
            match singular.iter_mut().find(|(known, _)| *known == stem) {
                Some((_, total)) => *total += count,
                None => singular.push((stem, count)),
            }
        }
    }
}

/// An owned font file, validated on load.
pub struct GlyphFont {
    data: Vec<u8>,
    offset: u32,
    key: CacheKey,
}

impl GlyphFont {
    /// Parses the first face of a TrueType/OpenType font.
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        let face = FontRef::from_index(&data, 0)?;
        let (offset, key) = (face.offset, face.key);
        Some(Self { data, offset, key })
    }

    /// The embedded [`BUNDLED_FONT`].
    pub fn bundled() -> Result<Self> {
        Self::from_bytes(BUNDLED_FONT.to_vec())
            .ok_or_else(|| ChatcloudError::font("data/DejaVuSans.ttf", "bundled font is corrupt"))
    }

    /// Borrows the face for metrics and scaling.
    pub fn face(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }
}

impl std::fmt::Debug for GlyphFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphFont")
            .field("bytes", &self.data.len())
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

/// The default [`CloudRenderer`]: greedy random placement, `swash`
/// rasterization, PNG output.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCloudRenderer;

impl WordCloudRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Loads a TrueType/OpenType font file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatcloudError::Font`] if the file can't be read or parsed.
    pub fn load_font(path: &Path) -> Result<GlyphFont> {
        let bytes = fs::read(path).map_err(|e| ChatcloudError::font(path, e.to_string()))?;
        GlyphFont::from_bytes(bytes)
            .ok_or_else(|| ChatcloudError::font(path, "not a TrueType/OpenType font"))
    }

    /// Loads `config.font_path`, or the bundled font when it is `None`.
    pub fn configured_font(config: &CloudConfig) -> Result<GlyphFont> {
        match &config.font_path {
            Some(path) => Self::load_font(path),
            None => GlyphFont::bundled(),
        }
    }

    /// Lays out and draws `text`, returning the image and the words placed.
    pub fn rasterize(
        &self,
        font: &GlyphFont,
        text: &str,
        config: &CloudConfig,
    ) -> (RgbaImage, Vec<PlacedWord>) {
        let font = font.face();
        let mut image = RgbaImage::from_pixel(config.width, config.height, Rgba(config.background));
        let mut grid = OccupancyGrid::new(config.width, config.height);
        let mut context = ScaleContext::new();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let words = if config.english_stopwords {
            word_frequencies_without_english(text, config.max_words)
        } else {
            word_frequencies(text, config.max_words)
        };
        let scaling = config.relative_scaling;
        let min_size = config.min_font_size.max(1);
        let mut font_size = config.max_font_size;
        let mut last_freq = 1.0_f32;
        let mut placed = Vec::with_capacity(words.len());

        for (word, freq) in &words {
            if scaling > 0.0 {
                font_size = ((scaling * (freq / last_freq) + (1.0 - scaling)) * font_size as f32)
                    .round() as u32;
            }

            let found = loop {
                if font_size < min_size {
                    break None;
                }
                let layout = layout_word(font, &mut context, word, font_size);
                if let Some(position) = grid.sample_position(
                    layout.width + config.margin,
                    layout.height + config.margin,
                    &mut rng,
                ) {
                    break Some((layout, position));
                }
                font_size -= 1;
            };
            let Some((layout, (x, y))) = found else {
                debug!("No room left for {:?}, stopping after {} words", word, placed.len());
                break;
            };

            let color = random_color(&mut rng);
            let origin = (x + config.margin / 2, y + config.margin / 2);
            for glyph in &layout.masks {
                let position = (
                    i64::from(origin.0) + glyph.left,
                    i64::from(origin.1) + glyph.top,
                );
                blit_mask(&mut image, &mut grid, &glyph.mask, position, color);
            }
            grid.rebuild();

            placed.push(PlacedWord {
                word: word.clone(),
                font_size,
                x,
                y,
                width: layout.width + config.margin,
                height: layout.height + config.margin,
                color,
            });
            last_freq = *freq;
        }

        (image, placed)
    }
}

impl CloudRenderer for WordCloudRenderer {
    fn render(&self, text: &str, config: &CloudConfig) -> Result<Vec<u8>> {
        let font = Self::configured_font(config)?;
        let (image, placed) = self.rasterize(&font, text, config);
        debug!(
            "Placed {} words on a {}x{} canvas",
            placed.len(),
            config.width,
            config.height
        );
        encode_png(&image)
    }
}

/// Encodes an image as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Zero-width and directional formatting characters have no glyph to draw.
fn is_format_char(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}'
    )
}

/// A rendered glyph with its offset from the top-left of the word's box.
struct GlyphMask {
    left: i64,
    top: i64,
    mask: Image,
}

/// One word rendered at one size, ready to be placed.
struct WordLayout {
    masks: Vec<GlyphMask>,
    width: u32,
    height: u32,
}

/// Renders the glyphs of `word` left to right on one baseline and measures
/// the box covering both the advances and every inked pixel.
fn layout_word(font: FontRef<'_>, context: &mut ScaleContext, word: &str, size: u32) -> WordLayout {
    let size = size as f32;
    let metrics = font.metrics(&[]).scale(size);
    let advances = font.glyph_metrics(&[]).scale(size);
    let charmap = font.charmap();
    let mut scaler = context.builder(font).size(size).hint(false).build();
    let baseline = metrics.ascent;

    let mut masks = Vec::new();
    let mut caret = 0.0_f32;
    let (mut min_x, mut min_y) = (0_i64, 0_i64);
    let mut max_x = 0_i64;
    let mut max_y = (metrics.ascent + metrics.descent.abs()).ceil().max(0.0) as i64;
    for c in word.chars().filter(|&c| !is_format_char(c)) {
        let id = charmap.map(c);
        let rendered = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .offset(Vector::new(caret.fract(), baseline.fract()))
            .render(&mut scaler, id);
        if let Some(mask) = rendered {
            let placement = &mask.placement;
            if placement.width > 0 && placement.height > 0 && matches!(mask.content, Content::Mask) {
                let left = caret.floor() as i64 + i64::from(placement.left);
                let top = baseline.floor() as i64 - i64::from(placement.top);
                min_x = min_x.min(left);
                min_y = min_y.min(top);
                max_x = max_x.max(left + i64::from(placement.width));
                max_y = max_y.max(top + i64::from(placement.height));
                masks.push(GlyphMask { left, top, mask });
            }
        }
        caret += advances.advance_width(id);
    }
    max_x = max_x.max(caret.ceil() as i64);

    for glyph in &mut masks {
        glyph.left -= min_x;
        glyph.top -= min_y;
    }
    WordLayout {
        masks,
        width: (max_x - min_x).max(0) as u32,
        height: (max_y - min_y).max(0) as u32,
    }
}

/// Blends an alpha mask into the image and marks its ink on the grid.
fn blit_mask(
    image: &mut RgbaImage,
    grid: &mut OccupancyGrid,
    mask: &Image,
    (left, top): (i64, i64),
    color: [u8; 3],
) {
    let stride = mask.placement.width as usize;
    if stride == 0 || !matches!(mask.content, Content::Mask) {
        return;
    }
    let (width, height) = image.dimensions();
    for (index, &alpha) in mask.data.iter().enumerate() {
        if alpha == 0 {
            continue;
        }
        let px = left + (index % stride) as i64;
        let py = top + (index / stride) as i64;
        if px < 0 || py < 0 || px >= i64::from(width) || py >= i64::from(height) {
            continue;
        }
        let (px, py) = (px as u32, py as u32);
        blend(image.get_pixel_mut(px, py), color, f32::from(alpha) / 255.0);
        grid.mark(px, py);
    }
}

fn blend(pixel: &mut Rgba<u8>, color: [u8; 3], coverage: f32) {
    let coverage = coverage.min(1.0);
    for (channel, target) in pixel.0.iter_mut().zip(color) {
        *channel = (f32::from(*channel) * (1.0 - coverage) + f32::from(target) * coverage).round() as u8;
    }
    let alpha = f32::from(pixel.0[3]);
    pixel.0[3] = (alpha + (255.0 - alpha) * coverage).round() as u8;
}

/// Saturated color with a random hue, `hsl(0..=255, 80%, 50%)`.
fn random_color(rng: &mut impl Rng) -> [u8; 3] {
    let hue: u16 = rng.gen_range(0..=255);
    hsl_to_rgb(f32::from(hue), 0.8, 0.5)
}

/// Converts HSL (hue in degrees, saturation and lightness in `0.0..=1.0`).
fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [u8; 3] {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = (hue / 60.0).rem_euclid(6.0);
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}

/// Coarse occupancy map with a summed-area table for O(1) box queries.
struct OccupancyGrid {
    cols: usize,
    rows: usize,
    cells: Vec<bool>,
    /// `(rows + 1) x (cols + 1)`, first row and column are zero.
    sat: Vec<u32>,
}

impl OccupancyGrid {
    fn new(width: u32, height: u32) -> Self {
        let cols = width.div_ceil(CELL) as usize;
        let rows = height.div_ceil(CELL) as usize;
        Self {
            cols,
            rows,
            cells: vec![false; cols * rows],
            sat: vec![0; (cols + 1) * (rows + 1)],
        }
    }

    /// Marks the cell containing pixel `(x, y)`. Call [`rebuild`](Self::rebuild)
    /// before querying again.
    fn mark(&mut self, x: u32, y: u32) {
        let col = (x / CELL) as usize;
        let row = (y / CELL) as usize;
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = true;
        }
    }

    fn rebuild(&mut self) {
        let stride = self.cols + 1;
        for row in 0..self.rows {
            let mut row_sum = 0;
            for col in 0..self.cols {
                row_sum += u32::from(self.cells[row * self.cols + col]);
                self.sat[(row + 1) * stride + col + 1] = self.sat[row * stride + col + 1] + row_sum;
            }
        }
    }

    fn window_sum(&self, col: usize, row: usize, w: usize, h: usize) -> u32 {
        let stride = self.cols + 1;
        let outer = self.sat[(row + h) * stride + col + w] + self.sat[row * stride + col];
        let sides = self.sat[row * stride + col + w] + self.sat[(row + h) * stride + col];
        outer - sides
    }

    /// Picks a uniformly random free position for a `width` x `height` pixel
    /// box and returns its top-left corner in pixels.
    fn sample_position(&self, width: u32, height: u32, rng: &mut impl Rng) -> Option<(u32, u32)> {
        let w = (width.div_ceil(CELL) as usize).max(1);
        let h = (height.div_ceil(CELL) as usize).max(1);
        if w > self.cols || h > self.rows {
            return None;
        }

        let positions = || {
            (0..=self.rows - h).flat_map(move |row| (0..=self.cols - w).map(move |col| (col, row)))
        };
        let free = positions()
            .filter(|&(col, row)| self.window_sum(col, row, w, h) == 0)
            .count();
        if free == 0 {
            return None;
        }

        let pick = rng.gen_range(0..free);
        positions()
            .filter(|&(col, row)| self.window_sum(col, row, w, h) == 0)
            .nth(pick)
            .map(|(col, row)| (col as u32 * CELL, row as u32 * CELL))
    }
}
