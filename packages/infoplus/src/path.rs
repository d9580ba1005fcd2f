//! Field paths used in error messages and validation reports.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Element { name: String, index: Option<usize> },
    Attribute(String),
    Content,
}

/// Location of a field inside a document, rendered XPath-like.
///
/// ```
/// use infoplus_model::path::FieldPath;
///
/// let path = FieldPath::root("ReisInformatieProductDVS")
///     .child("DynamischeVertrekStaat")
///     .indexed("VertrekTijd", 2)
///     .attribute("InfoStatus");
/// assert_eq!(
///     path.to_string(),
///     "/ReisInformatieProductDVS/DynamischeVertrekStaat/VertrekTijd[2]/@InfoStatus"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    #[must_use]
    pub fn root(name: impl Into<String>) -> Self {
        Self::default().child(name)
    }

    /// Path of a single-valued child element.
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        self.push(Segment::Element {
            name: name.into(),
            index: None,
        })
    }

    /// Path of one entry of a repeated group (1-based, as in XPath).
    #[must_use]
    pub fn indexed(&self, name: impl Into<String>, index: usize) -> Self {
        self.push(Segment::Element {
            name: name.into(),
            index: Some(index),
        })
    }

    #[must_use]
    pub fn attribute(&self, name: impl Into<String>) -> Self {
        self.push(Segment::Attribute(name.into()))
    }

    /// Path of the text content of the current element.
    #[must_use]
    pub fn content(&self) -> Self {
        self.push(Segment::Content)
    }

    fn push(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Element { name, index: None } => write!(f, "/{name}")?,
                Segment::Element {
                    name,
                    index: Some(i),
                } => write!(f, "/{name}[{i}]")?,
                Segment::Attribute(name) => write!(f, "/@{name}")?,
                Segment::Content => f.write_str("/text()")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path() {
        assert_eq!(FieldPath::default().to_string(), "/");
    }

    #[test]
    fn test_content_path() {
        let path = FieldPath::root("ReisInformatieProductDAS")
            .child("DynamischeAankomstStaat")
            .child("TreinAankomst")
            .indexed("AankomstTijd", 1)
            .content();
        assert_eq!(
            path.to_string(),
            "/ReisInformatieProductDAS/DynamischeAankomstStaat/TreinAankomst/AankomstTijd[1]/text()"
        );
    }

    #[test]
    fn test_paths_are_independent() {
        let base = FieldPath::root("A");
        let left = base.child("B");
        let right = base.child("C");
        assert_eq!(left.to_string(), "/A/B");
        assert_eq!(right.to_string(), "/A/C");
        assert_eq!(base.to_string(), "/A");
    }
}
