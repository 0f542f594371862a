//! Config path parsing
//!
//! Paths are `/`-separated. A segment of the form `@N` indexes a list,
//! `@last` addresses its final element. Empty segments are skipped, so
//! `style//font_point` and `/style/font_point` both mean `style/font_point`.

use std::fmt;

/// A single path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Map key
    Key(&'a str),
    /// List index
    Index(usize),
    /// Final list element
    Last,
}

/// A parsed config path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPath<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> ConfigPath<'a> {
    /// Parse a path string.
    ///
    /// Parsing never fails: `@` segments that are not a valid index are
    /// treated as plain keys.
    pub fn parse(path: &'a str) -> Self {
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix('@') {
                Some("last") => Segment::Last,
                Some(index) => index
                    .parse::<usize>()
                    .map(Segment::Index)
                    .unwrap_or(Segment::Key(s)),
                None => Segment::Key(s),
            })
            .collect();
        Self { segments }
    }

    /// The parsed segments, root first.
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// True for the empty path (the document root).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for ConfigPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            match segment {
                Segment::Key(key) => f.write_str(key)?,
                Segment::Index(index) => write!(f, "@{}", index)?,
                Segment::Last => f.write_str("@last")?,
            }
        }
        Ok(())
    }
}

/// Replace the last component of `path` with `replacement`.
///
/// A path without `/` is replaced entirely.
pub fn replace_last_component(path: &str, replacement: &str) -> String {
    match path.rfind('/') {
        Some(sep) => format!("{}{}", &path[..=sep], replacement),
        None => replacement.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys_and_indices() {
        let path = ConfigPath::parse("switches/@2/options/@last");
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("switches"),
                Segment::Index(2),
                Segment::Key("options"),
                Segment::Last,
            ]
        );
    }

    #[test]
    fn test_empty_segments_skipped() {
        let path = ConfigPath::parse("/style//font_point/");
        assert_eq!(path.to_string(), "style/font_point");
        assert!(ConfigPath::parse("").is_root());
    }

    #[test]
    fn test_bad_index_is_a_key() {
        let path = ConfigPath::parse("a/@x");
        assert_eq!(path.segments()[1], Segment::Key("@x"));
    }

    #[test]
    fn test_replace_last_component() {
        assert_eq!(
            replace_last_component("style/font_point", "font_size"),
            "style/font_size"
        );
        assert_eq!(replace_last_component("font_point", "font_size"), "font_size");
    }
}
