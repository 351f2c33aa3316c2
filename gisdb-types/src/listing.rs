use std::fmt;

/// One row of a level-annotated tree traversal.
///
/// Renders as `<level><2*level spaces><payload>`, the layout the diagnostic
/// dumps of both indices use.
///
/// # Examples
///
/// ```
/// use gisdb_types::city::City;
/// use gisdb_types::listing::LevelEntry;
///
/// let entry = LevelEntry::new(2, City::new("B", 4, 5));
/// assert_eq!(entry.to_string(), "2    B (4, 5)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelEntry<P> {
    pub level: usize,
    pub payload: P,
}

impl<P> LevelEntry<P> {
    pub fn new(level: usize, payload: P) -> Self {
        Self { level, payload }
    }
}

impl<P: fmt::Display> fmt::Display for LevelEntry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:width$}{}",
            self.level,
            "",
            self.payload,
            width = 2 * self.level
        )
    }
}

/// Renders a traversal one entry per line, each line newline-terminated.
pub fn render<P: fmt::Display>(entries: &[LevelEntry<P>]) -> String {
    entries.iter().map(|entry| format!("{entry}\n")).collect()
}
