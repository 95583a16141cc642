use serde::{Serialize, Serializer};

use crate::templates::TemplateId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Alpha-composites `self` over `base`. Used for the translucent avatar discs.
    pub fn over(self, base: Color, alpha: f32) -> Color {
        let mix = |fg: u8, bg: u8| -> u8 {
            (fg as f32 * alpha + bg as f32 * (1.0 - alpha)).round().clamp(0.0, 255.0) as u8
        };
        Color::rgb(mix(self.r, base.r), mix(self.g, base.g), mix(self.b, base.b))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

pub const TEMPLATE_BLUE: Color = Color::rgb(0x1E, 0x4E, 0x8C);
pub const TEMPLATE_MAROON: Color = Color::rgb(0x80, 0x1F, 0x3A);
pub const TEMPLATE_PURPLE: Color = Color::rgb(0x6B, 0x3F, 0xA0);
pub const FOREGROUND: Color = Color::rgb(0x1A, 0x1A, 0x1A);
pub const BACKGROUND: Color = Color::rgb(0xFF, 0xFF, 0xFF);
pub const PRIMARY_FOREGROUND: Color = Color::rgb(0xFF, 0xFF, 0xFF);
pub const MUTED_FOREGROUND: Color = Color::rgb(0x6B, 0x72, 0x80);
pub const BORDER: Color = Color::rgb(0xE5, 0xE7, 0xEB);

/// Colour mapping for one template. Layout geometry lives in the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub header_bg: Color,
    pub header_text: Color,
    pub accent: Color,
    pub accent_bg: Color,
}

impl Palette {
    pub fn for_template(id: TemplateId) -> Self {
        match id {
            TemplateId::Classic => Self::accented(TEMPLATE_BLUE),
            TemplateId::Modern => Self::accented(TEMPLATE_MAROON),
            TemplateId::Creative => Self::accented(TEMPLATE_PURPLE),
            TemplateId::Minimal => Palette {
                header_bg: BACKGROUND,
                header_text: FOREGROUND,
                accent: FOREGROUND,
                accent_bg: FOREGROUND,
            },
        }
    }

    fn accented(color: Color) -> Self {
        Palette {
            header_bg: color,
            header_text: PRIMARY_FOREGROUND,
            accent: color,
            accent_bg: color,
        }
    }
}
