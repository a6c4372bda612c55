//! Paper sizes in PostScript points.

/// Default paper dimensions when the name is not in the table (A4, rounded).
pub const DEFAULT_PAPER: (f64, f64) = (595.0, 842.0);

const PAPER_SIZES: &[(&str, f64, f64)] = &[
    ("A0", 2384.0, 3370.0),
    ("A1", 1684.0, 2384.0),
    ("A2", 1191.0, 1684.0),
    ("A3", 841.88976, 1190.5512),
    ("A4", 595.27559, 841.88976),
    ("A5", 420.94488, 595.27559),
    ("A6", 297.0, 420.0),
    ("A7", 210.0, 297.0),
    ("A8", 148.0, 210.0),
    ("A9", 105.0, 148.0),
];

/// A paper size, possibly one from the table.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperSize {
    /// Table name, if the size came from the table.
    pub name: Option<String>,
    pub width: f64,
    pub height: f64,
}

impl PaperSize {
    /// Look up a named paper size (case-insensitive).
    pub fn lookup(name: &str) -> Option<Self> {
        PAPER_SIZES
            .iter()
            .find(|(n, _, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(n, w, h)| Self {
                name: Some(n.to_string()),
                width: *w,
                height: *h,
            })
    }

    /// Look up a named paper size, falling back to the default dimensions.
    pub fn named_or_default(name: &str) -> Self {
        Self::lookup(name).unwrap_or(Self {
            name: None,
            width: DEFAULT_PAPER.0,
            height: DEFAULT_PAPER.1,
        })
    }
}

impl Default for PaperSize {
    fn default() -> Self {
        Self::named_or_default("A4")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let a0 = PaperSize::lookup("a0").unwrap();
        assert_eq!(a0.name.as_deref(), Some("A0"));
        assert_eq!((a0.width, a0.height), (2384.0, 3370.0));
    }

    #[test]
    fn test_unknown_falls_back() {
        let p = PaperSize::named_or_default("letter");
        assert_eq!(p.name, None);
        assert_eq!((p.width, p.height), DEFAULT_PAPER);
    }
}
