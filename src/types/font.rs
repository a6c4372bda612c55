//! PostScript font faces and name resolution.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::{BidetError, Result};

/// The standard faces that can be re-encoded to ISO Latin-1.
pub const ISO_FONTS: &[&str] = &[
    "Courier",
    "Courier-Bold",
    "Courier-BoldOblique",
    "Courier-Oblique",
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-BoldOblique",
    "Helvetica-Oblique",
    "Symbol",
    "Times-Bold",
    "Times-BoldItalic",
    "Times-Italic",
    "Times-Roman",
];

/// Suffix appended to a face re-encoded with the Latin-1 table.
pub const ISO_SUFFIX: &str = "-iso";

/// Known font faces plus the style suffixes used to collapse them into families.
#[derive(Debug, Clone, Default)]
pub struct FontTable {
    extended: Vec<String>,
    /// Style suffixes, longest first.
    suffixes: Vec<String>,
}

impl FontTable {
    /// Create a table from an extended face list and a style suffix list.
    pub fn new(extended: Vec<String>, suffixes: Vec<String>) -> Self {
        let mut suffixes: Vec<String> = suffixes.into_iter().filter(|s| !s.is_empty()).collect();
        suffixes.sort_by(|a, b| b.len().cmp(&a.len()));

        Self {
            extended: extended.into_iter().filter(|s| !s.is_empty()).collect(),
            suffixes,
        }
    }

    /// Faces from the extended font list.
    pub fn extended(&self) -> &[String] {
        &self.extended
    }

    /// Style suffixes, longest first.
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Check if a face is one of the ISO-capable standard faces.
    pub fn is_iso(name: &str) -> bool {
        ISO_FONTS.contains(&name)
    }

    /// Collapse faces into family names by stripping one style suffix each.
    ///
    /// Order of first appearance is kept; duplicates are dropped.
    pub fn collapse<'a>(&self, faces: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut collapsed: Vec<String> = Vec::new();

        for face in faces {
            let mut family = face;
            for suffix in &self.suffixes {
                if let Some(stripped) = family.strip_suffix(suffix.as_str()) {
                    family = stripped.strip_suffix('-').unwrap_or(stripped);
                    break;
                }
            }

            if !collapsed.iter().any(|f| f == family) {
                collapsed.push(family.to_string());
            }
        }

        collapsed
    }

    /// Find the closest face by appending style suffixes, shortest first.
    pub fn search<'a>(&self, family: &str, candidates: &[&'a str]) -> Option<&'a str> {
        for suffix in self.suffixes.iter().rev() {
            for candidate in [format!("{family}{suffix}"), format!("{family}-{suffix}")] {
                if let Some(found) = candidates.iter().find(|c| **c == candidate) {
                    return Some(*found);
                }
            }
        }
        None
    }

    /// Resolve a requested face to a name the rasterizer knows.
    ///
    /// When `iso` is set only the standard faces qualify and the result names
    /// the re-encoded `-iso` variant.
    pub fn resolve(&self, font: &str, iso: bool) -> Result<String> {
        if iso {
            let candidates: Vec<&str> = ISO_FONTS.to_vec();
            let face = if Self::is_iso(font) {
                font
            } else {
                self.search(font, &candidates).ok_or_else(|| BidetError::Config {
                    message: format!("Invalid ISO font: {}", font),
                    help: Some(
                        "Text with accented characters needs a standard face; see --font list"
                            .to_string(),
                    ),
                })?
            };
            return Ok(format!("{face}{ISO_SUFFIX}"));
        }

        let mut candidates: Vec<&str> = self.extended.iter().map(|s| s.as_str()).collect();
        candidates.extend_from_slice(ISO_FONTS);

        if candidates.contains(&font) {
            return Ok(font.to_string());
        }

        self.search(font, &candidates)
            .map(|s| s.to_string())
            .ok_or_else(|| BidetError::Config {
                message: format!("Invalid font: {}", font),
                help: Some("Use --font list to see available faces".to_string()),
            })
    }

    /// Pick a random face. Latin-1 text restricts the pick to standard faces.
    pub fn pick_random<R: Rng + ?Sized>(&self, iso: bool, rng: &mut R) -> String {
        let pool: Vec<&str> = if iso || self.extended.is_empty() {
            ISO_FONTS.to_vec()
        } else {
            self.extended.iter().map(|s| s.as_str()).collect()
        };

        pool.choose(rng).copied().unwrap_or("Helvetica").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table() -> FontTable {
        FontTable::new(
            vec![
                "Palatino-Roman".to_string(),
                "Palatino-Bold".to_string(),
                "Bookman-Light".to_string(),
            ],
            vec!["Roman".to_string(), "Bold".to_string(), "BoldOblique".to_string()],
        )
    }

    #[test]
    fn test_suffixes_sorted_longest_first() {
        let t = table();
        assert_eq!(t.suffixes()[0], "BoldOblique");
    }

    #[test]
    fn test_resolve_exact() {
        let t = table();
        assert_eq!(t.resolve("Helvetica", false).unwrap(), "Helvetica");
        assert_eq!(t.resolve("Bookman-Light", false).unwrap(), "Bookman-Light");
    }

    #[test]
    fn test_resolve_by_family() {
        let t = table();
        // Shortest suffix is tried first: "Bold" before "Roman".
        assert_eq!(t.resolve("Palatino", false).unwrap(), "Palatino-Bold");
        assert_eq!(t.resolve("Times", false).unwrap(), "Times-Bold");
    }

    #[test]
    fn test_resolve_iso() {
        let t = table();
        assert_eq!(t.resolve("Courier", true).unwrap(), "Courier-iso");
        assert_eq!(t.resolve("Times", true).unwrap(), "Times-Bold-iso");
        assert!(t.resolve("Palatino", true).is_err());
    }

    #[test]
    fn test_resolve_unknown() {
        let t = table();
        assert!(t.resolve("Comic", false).is_err());
    }

    #[test]
    fn test_collapse() {
        let t = table();
        let families = t.collapse(t.extended().iter().map(|s| s.as_str()));
        assert_eq!(families, vec!["Palatino", "Bookman-Light"]);

        let iso = t.collapse(ISO_FONTS.iter().copied());
        assert!(iso.contains(&"Helvetica".to_string()));
        assert!(iso.contains(&"Times".to_string()));
    }

    #[test]
    fn test_pick_random_iso_only_standard() {
        let t = table();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let face = t.pick_random(true, &mut rng);
            assert!(FontTable::is_iso(&face));
        }
    }
}
