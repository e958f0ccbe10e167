use std::fmt;

use serde::{Serialize, Serializer};

pub const SEPARATOR: char = '.';
const ESCAPE: char = '\\';

/// Path of nested object keys identifying one node of a catalog tree.
///
/// Rendered canonically as dot-joined segments (`Common.buttons.save`).
/// A segment that itself contains `.` or `\` is escaped as `\.` / `\\`
/// so that rendering and [`KeyPath::parse`] are inverse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Single-segment path.
    pub fn root(segment: impl Into<String>) -> Self {
        Self {
            segments: vec![segment.into()],
        }
    }

    /// Parse a canonical dot-joined path.
    ///
    /// Returns `None` for the empty string and for any path with an empty
    /// segment (`"a..b"`, `"a."`, `".a"`).
    pub fn parse(text: &str) -> Option<Self> {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = text.chars();

        while let Some(c) = chars.next() {
            match c {
                ESCAPE => match chars.next() {
                    Some(next @ (SEPARATOR | ESCAPE)) => current.push(next),
                    Some(other) => {
                        current.push(ESCAPE);
                        current.push(other);
                    }
                    None => current.push(ESCAPE),
                },
                SEPARATOR => {
                    if current.is_empty() {
                        return None;
                    }
                    segments.push(std::mem::take(&mut current));
                }
                _ => current.push(c),
            }
        }

        if current.is_empty() {
            return None;
        }
        segments.push(current);
        Some(Self { segments })
    }

    /// Path extended by one segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: a `KeyPath` has at least one segment.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Every strict prefix of this path, shortest first.
    ///
    /// `A.B.C` yields `A`, `A.B`.
    pub fn ancestors(&self) -> impl Iterator<Item = KeyPath> + '_ {
        (1..self.segments.len()).map(|end| Self {
            segments: self.segments[..end].to_vec(),
        })
    }

    /// True if `prefix` equals this path or is one of its ancestors.
    pub fn starts_with(&self, prefix: &KeyPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            for c in segment.chars() {
                if c == SEPARATOR || c == ESCAPE {
                    write!(f, "{}", ESCAPE)?;
                }
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl Serialize for KeyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
