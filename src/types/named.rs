//! Named colour table.
//!
//! The classic PostScript colour names plus a subset of the X11 names.
//! Lookups are case-insensitive.

use std::collections::BTreeMap;

use super::Colour;

const NAMED_COLOURS: &[(&str, [u8; 3])] = &[
    ("brightred", [255, 0, 0]),
    ("brightgreen", [0, 255, 0]),
    ("brightblue", [0, 0, 255]),
    ("red", [204, 0, 0]),
    ("blue", [0, 0, 204]),
    ("darkred", [127, 0, 0]),
    ("darkgreen", [0, 127, 0]),
    ("darkblue", [0, 0, 127]),
    ("grey10", [25, 25, 25]),
    ("grey20", [51, 51, 51]),
    ("grey30", [76, 76, 76]),
    ("grey40", [102, 102, 102]),
    ("grey50", [127, 127, 127]),
    ("grey60", [153, 153, 153]),
    ("grey70", [178, 178, 178]),
    ("grey80", [204, 204, 204]),
    ("grey90", [229, 229, 229]),
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aqua", [0, 255, 255]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("blanchedalmond", [255, 255, 205]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cyan", [0, 255, 255]),
    ("gold", [255, 215, 0]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    // X11 green wins over the PostScript::Simple [0, 204, 0].
    ("green", [0, 128, 0]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("navy", [0, 0, 128]),
    ("orange", [255, 165, 0]),
    ("pink", [255, 192, 203]),
    ("purple", [128, 0, 128]),
    ("silver", [192, 192, 192]),
    ("snow", [255, 250, 250]),
    ("yellow", [255, 255, 0]),
];

/// Immutable table of named colours.
#[derive(Debug, Clone)]
pub struct ColourTable {
    colours: BTreeMap<String, Colour>,
}

impl ColourTable {
    /// The builtin table.
    pub fn builtin() -> Self {
        let colours = NAMED_COLOURS
            .iter()
            .map(|(name, [r, g, b])| (name.to_string(), Colour::rgb(*r, *g, *b)))
            .collect();
        Self { colours }
    }

    /// Look up a colour by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<Colour> {
        self.colours.get(&name.trim().to_ascii_lowercase()).copied()
    }

    /// Check if a name is in the table.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Resolve a colour given either as a name or as a hex string.
    pub fn resolve(&self, spec: &str) -> Option<Colour> {
        let spec = spec.trim();
        if spec.starts_with('#') {
            return Colour::from_hex(spec).ok();
        }
        self.get(spec)
    }

    /// All names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colours.keys().map(|s| s.as_str())
    }

    /// Get the number of colours.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}

impl Default for ColourTable {
    fn default() -> Self {
        Self::builtin()
    }
}
