use anyhow::Result;
use fontdue::{Font, FontSettings};
use log::info;

use crate::style::{TextStyle, Typeface};

/// Reference character used for advance measurement
const REFERENCE_GLYPH: char = 'M';

/// Fontdue-backed implementation of [`TextStyle`]
///
/// Holds one loaded monospace font and the mutable typeface/letter-spacing
/// pair the controller corrects during pre-draw. Letter spacing is modeled as
/// `advance + spacing_em * font_size`, matching how the host framework widens
/// glyph advances.
pub struct FontMeasurer {
    font: Font,
    font_size: f32,
    typeface: Typeface,
    letter_spacing: f32,
}

impl FontMeasurer {
    /// Build a measurer from raw font data
    pub fn from_bytes(data: &[u8], font_size: f32) -> Result<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to load font: {}", e))?;

        Ok(Self {
            font,
            font_size,
            typeface: Typeface::Monospace,
            letter_spacing: 0.0,
        })
    }

    /// Load a monospace font from well-known system locations
    pub fn from_system(font_size: f32) -> Result<Self> {
        let font_paths = vec![
            "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
            "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
            "/System/Library/Fonts/Monaco.ttf",
            "/System/Library/Fonts/Menlo.ttc",
        ];

        for path in font_paths {
            if let Ok(data) = std::fs::read(path) {
                info!("Loaded font from: {}", path);
                return Self::from_bytes(&data, font_size);
            }
        }

        anyhow::bail!("Could not find any monospace font")
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }
}

impl TextStyle for FontMeasurer {
    fn typeface(&self) -> Typeface {
        self.typeface.clone()
    }

    fn set_typeface(&mut self, typeface: Typeface) {
        self.typeface = typeface;
    }

    fn letter_spacing(&self) -> f32 {
        self.letter_spacing
    }

    fn set_letter_spacing(&mut self, em: f32) {
        self.letter_spacing = em;
    }

    fn measure_reference_glyph(&self) -> f32 {
        // Only one font is loaded; Named typefaces measure through it as
        // well, which is sound because calibration always forces Monospace
        let metrics = self.font.metrics(REFERENCE_GLYPH, self.font_size);
        metrics.advance_width + self.letter_spacing * self.font_size
    }
}
