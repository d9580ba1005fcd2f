//! Types for the schema registry.

use crate::config::{CONTENT_FIELD, STATUS_ATTRIBUTE};
use crate::temporal::TemporalFormat;

/// Where a field lives in the XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A child element.
    Element,
    /// An unqualified attribute of the parent element.
    Attribute,
    /// The text content of the parent element.
    Content,
}

/// Semantic type of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Text,
    Integer,
    /// Enumerated code; the value must be one of the listed literals.
    Code(Vec<String>),
    Temporal(TemporalFormat),
    /// Nested record described by its own ordered field list.
    Record(Vec<FieldSpec>),
}

impl FieldType {
    /// Create an enumerated code type.
    #[must_use]
    pub fn code(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Code(values.into_iter().map(Into::into).collect())
    }

    /// Short description for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Text => "text".to_string(),
            Self::Integer => "integer".to_string(),
            Self::Code(values) => format!("one of {}", values.join(", ")),
            Self::Temporal(format) => format.to_string(),
            Self::Record(_) => "nested record".to_string(),
        }
    }
}

/// How often a field may occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurs {
    Required,
    Optional,
    /// Repeated group, stored as an ordered list.
    Repeated { min: usize, max: Option<usize> },
}

impl Occurs {
    #[must_use]
    pub fn min(&self) -> usize {
        match self {
            Self::Required => 1,
            Self::Optional => 0,
            Self::Repeated { min, .. } => *min,
        }
    }

    #[must_use]
    pub fn max(&self) -> Option<usize> {
        match self {
            Self::Required | Self::Optional => Some(1),
            Self::Repeated { max, .. } => *max,
        }
    }

    #[must_use]
    pub fn is_repeated(&self) -> bool {
        matches!(self, Self::Repeated { .. })
    }
}

/// Cross-field rule checked on every record a [`FieldSpec`] describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Entries of `later` must not precede entries of `earlier` that carry
    /// the same `paired_by` attribute value.
    NotBefore {
        earlier: String,
        later: String,
        paired_by: String,
    },
    /// Entries of the repeated `group` carry distinct `attribute` values.
    DistinctBy { group: String, attribute: String },
}

/// Declarative specification of one field of a document kind.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// XML local name (without namespace).
    pub name: String,

    pub node: NodeKind,

    pub field_type: FieldType,

    pub occurs: Occurs,

    /// Rules checked on each record value of this field.
    pub constraints: Vec<Constraint>,
}

impl FieldSpec {
    fn new(name: impl Into<String>, node: NodeKind, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            node,
            field_type,
            occurs: Occurs::Required,
            constraints: Vec::new(),
        }
    }

    /// A required child element.
    #[must_use]
    pub fn element(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::new(name, NodeKind::Element, field_type)
    }

    /// A required child element holding a nested record.
    #[must_use]
    pub fn record(name: impl Into<String>, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        Self::new(
            name,
            NodeKind::Element,
            FieldType::Record(fields.into_iter().collect()),
        )
    }

    /// A required attribute.
    #[must_use]
    pub fn attribute(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::new(name, NodeKind::Attribute, field_type)
    }

    /// The text content of the enclosing element.
    #[must_use]
    pub fn content(field_type: FieldType) -> Self {
        Self::new(CONTENT_FIELD, NodeKind::Content, field_type)
    }

    /// Mark the field optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.occurs = Occurs::Optional;
        self
    }

    /// Mark the field a repeated group.
    #[must_use]
    pub fn repeated(mut self, min: usize, max: Option<usize>) -> Self {
        self.occurs = Occurs::Repeated { min, max };
        self
    }

    /// Add a cross-field constraint.
    #[must_use]
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Require distinct `InfoStatus` values within each of the given groups.
    #[must_use]
    pub fn with_distinct_status(
        mut self,
        groups: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.constraints
            .extend(groups.into_iter().map(|group| Constraint::DistinctBy {
                group: group.into(),
                attribute: STATUS_ATTRIBUTE.to_string(),
            }));
        self
    }

    /// Whether a successfully decoded record always holds a value for this field.
    #[must_use]
    pub fn is_mandatory(&self) -> bool {
        self.occurs.min() > 0
    }

    /// Nested field specifications (empty for scalar fields).
    #[must_use]
    pub fn children(&self) -> &[FieldSpec] {
        match &self.field_type {
            FieldType::Record(fields) => fields,
            _ => &[],
        }
    }

    /// Look up a nested field by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&FieldSpec> {
        self.children().iter().find(|spec| spec.name == name)
    }

    /// Nested element fields, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &FieldSpec> {
        self.children()
            .iter()
            .filter(|spec| spec.node == NodeKind::Element)
    }

    /// Nested attribute fields.
    pub fn attributes(&self) -> impl Iterator<Item = &FieldSpec> {
        self.children()
            .iter()
            .filter(|spec| spec.node == NodeKind::Attribute)
    }

    /// The text content field, if the element carries one.
    #[must_use]
    pub fn content_spec(&self) -> Option<&FieldSpec> {
        self.children()
            .iter()
            .find(|spec| spec.node == NodeKind::Content)
    }
}
