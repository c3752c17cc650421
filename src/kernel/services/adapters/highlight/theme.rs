//! Built-in colour palettes.

use crate::kernel::services::ports::settings::DEFAULT_THEME;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColorGroup {
    Comment = 0,
    String = 1,
    Regex = 2,
    Keyword = 3,
    KeywordControl = 4,
    Type = 5,
    Number = 6,
    Function = 7,
    Macro = 8,
    Namespace = 9,
    Variable = 10,
    Constant = 11,
    Attribute = 12,
    Operator = 13,
    Tag = 14,
}

impl ColorGroup {
    pub const COUNT: usize = 15;
}

const _: () = assert!(ColorGroup::Tag as usize == ColorGroup::COUNT - 1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub foreground: u32,
    pub background: u32,
    pub gutter: u32,
    groups: [u32; ColorGroup::COUNT],
}

impl Palette {
    pub fn color(&self, group: ColorGroup) -> u32 {
        self.groups[group as usize]
    }

    pub fn foreground_hex(&self) -> String {
        hex(self.foreground)
    }
}

pub fn hex(rgb: u32) -> String {
    format!("#{:06x}", rgb & 0xFF_FFFF)
}

/// Parse `#rrggbb` into its components.
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let digits = color.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let rgb = u32::from_str_radix(digits, 16).ok()?;
    Some(((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

pub const THEME_NAMES: [&str; 4] = ["dark-plus", "light-plus", "monokai", "solarized-dark"];

pub fn builtin(name: &str) -> Option<Palette> {
    let palette = match name {
        "dark-plus" => Palette {
            name: "dark-plus",
            foreground: 0xD4D4D4,
            background: 0x1E1E1E,
            gutter: 0x858585,
            groups: [
                0x6A9955, // Comment
                0xCE9178, // String
                0xD16969, // Regex
                0x569CD6, // Keyword
                0xC586C0, // KeywordControl
                0x4EC9B0, // Type
                0xB5CEA8, // Number
                0xDCDCAA, // Function
                0x569CD6, // Macro
                0x4EC9B0, // Namespace
                0x9CDCFE, // Variable
                0x4FC1FF, // Constant
                0x4EC9B0, // Attribute
                0xD4D4D4, // Operator
                0x569CD6, // Tag
            ],
        },
        "light-plus" => Palette {
            name: "light-plus",
            foreground: 0x000000,
            background: 0xFFFFFF,
            gutter: 0x237893,
            groups: [
                0x008000, 0xA31515, 0x811F3F, 0x0000FF, 0xAF00DB, 0x267F99, 0x098658, 0x795E26,
                0x0000FF, 0x267F99, 0x001080, 0x0070C1, 0x267F99, 0x000000, 0x800000,
            ],
        },
        "monokai" => Palette {
            name: "monokai",
            foreground: 0xF8F8F2,
            background: 0x272822,
            gutter: 0x90908A,
            groups: [
                0x75715E, 0xE6DB74, 0xE6DB74, 0xF92672, 0xF92672, 0x66D9EF, 0xAE81FF, 0xA6E22E,
                0xA6E22E, 0xF8F8F2, 0xF8F8F2, 0xAE81FF, 0xA6E22E, 0xF92672, 0xF92672,
            ],
        },
        "solarized-dark" => Palette {
            name: "solarized-dark",
            foreground: 0x839496,
            background: 0x002B36,
            gutter: 0x586E75,
            groups: [
                0x586E75, 0x2AA198, 0xDC322F, 0x859900, 0x859900, 0xB58900, 0xD33682, 0x268BD2,
                0xCB4B16, 0xB58900, 0x839496, 0xCB4B16, 0x6C71C4, 0x859900, 0x268BD2,
            ],
        },
        _ => return None,
    };
    Some(palette)
}

/// The theme after `current` in [`THEME_NAMES`], wrapping around. Unknown
/// names continue from the default theme.
pub fn next_theme(current: &str) -> &'static str {
    let idx = THEME_NAMES
        .iter()
        .position(|name| *name == current)
        .or_else(|| THEME_NAMES.iter().position(|name| *name == DEFAULT_THEME))
        .unwrap_or(0);
    THEME_NAMES[(idx + 1) % THEME_NAMES.len()]
}
