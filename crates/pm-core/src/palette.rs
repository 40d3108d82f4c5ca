/// A named card color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    /// Human-readable name.
    pub name: &'static str,
    /// RGB value.
    pub rgb: [u8; 3],
}

/// The fixed card palette. Categories are assigned an index into this.
pub const PALETTE: &[PaletteColor] = &[
    PaletteColor { name: "crimson", rgb: [180, 48, 56] },
    PaletteColor { name: "amber", rgb: [222, 150, 40] },
    PaletteColor { name: "moss", rgb: [96, 140, 62] },
    PaletteColor { name: "teal", rgb: [40, 132, 140] },
    PaletteColor { name: "cobalt", rgb: [52, 84, 170] },
    PaletteColor { name: "violet", rgb: [124, 70, 160] },
    PaletteColor { name: "rose", rgb: [206, 112, 150] },
    PaletteColor { name: "slate", rgb: [100, 110, 124] },
];
