//! Decoder walking a roxmltree DOM along a kind's field specifications.

use roxmltree::{Document, Node};

use crate::config::{CodecConfig, CONTENT_FIELD, UnknownElementPolicy};
use crate::error::{InfoPlusError, Result};
use crate::kind::DocumentKind;
use crate::model::{check_record, DocumentRecord, Record, Slot, Value};
use crate::path::FieldPath;
use crate::schema::{FieldSpec, FieldType, NodeKind, SchemaEntry};
use crate::temporal;
use crate::xml::{element_children, get_tag_name, get_text, has_tag, is_in_namespace, stray_text};

/// Decode a complete message of the entry's kind.
pub(crate) fn decode_document(
    entry: &SchemaEntry,
    config: &CodecConfig,
    bytes: &[u8],
) -> Result<DocumentRecord> {
    tracing::debug!(kind = %entry.kind, bytes = bytes.len(), "decoding document");

    let text = std::str::from_utf8(bytes)?;
    let document = Document::parse(text)?;
    let decoder = Decoder { entry, config };

    let envelope = document.root_element();
    let envelope_path = FieldPath::root(get_tag_name(envelope));
    if !has_tag(envelope, &entry.message_namespace, &entry.root_element) {
        return Err(decoder.mismatch(
            &envelope_path,
            format!(
                "expected <{}> in namespace {}, found <{}> in {}",
                entry.root_element,
                entry.message_namespace,
                get_tag_name(envelope),
                envelope.tag_name().namespace().unwrap_or("no namespace"),
            ),
        ));
    }

    let product_name = entry.product.name.as_str();
    let mut product_node = None;
    for child in element_children(envelope) {
        let child_path = envelope_path.child(get_tag_name(child));
        if !has_tag(child, &entry.data_namespace, product_name) {
            decoder.unknown(&child_path, "element")?;
        } else if product_node.replace(child).is_some() {
            return Err(decoder.mismatch(&child_path, "element occurs more than once"));
        }
    }
    let Some(product_node) = product_node else {
        return Err(decoder.mismatch(
            &envelope_path.child(product_name),
            "missing mandatory element",
        ));
    };

    let product = decoder.record(&entry.product, product_node, &FieldPath::root(product_name))?;

    // Cardinalities and cross-field rules are checked on the complete record.
    if let Some(violation) = check_record(entry.kind, &entry.product, &product)
        .into_iter()
        .next()
    {
        return Err(InfoPlusError::SchemaMismatch {
            kind: entry.kind,
            path: violation.path,
            reason: violation.message,
        });
    }

    Ok(DocumentRecord::new(entry.kind, product))
}

struct Decoder<'a> {
    entry: &'a SchemaEntry,
    config: &'a CodecConfig,
}

impl Decoder<'_> {
    fn kind(&self) -> DocumentKind {
        self.entry.kind
    }

    fn mismatch(&self, path: &FieldPath, reason: impl Into<String>) -> InfoPlusError {
        InfoPlusError::SchemaMismatch {
            kind: self.kind(),
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Apply the unknown-element policy to a node without a field specification.
    fn unknown(&self, path: &FieldPath, what: &str) -> Result<()> {
        match self.config.unknown_elements {
            UnknownElementPolicy::Skip => {
                tracing::debug!(kind = %self.kind(), path = %path, "skipping unknown {what}");
                Ok(())
            }
            UnknownElementPolicy::Reject => Err(self.mismatch(path, format!("unknown {what}"))),
        }
    }

    fn record(&self, spec: &FieldSpec, node: Node<'_, '_>, path: &FieldPath) -> Result<Record> {
        let mut record = Record::new();

        for attribute in node.attributes() {
            // xsi:* and other qualified attributes are not part of the data
            if attribute.namespace().is_some() {
                continue;
            }
            let name = attribute.name();
            let attribute_path = path.attribute(name);
            match spec.child(name).filter(|field| field.node == NodeKind::Attribute) {
                Some(field) => {
                    let value = self.scalar(field, attribute.value(), &attribute_path)?;
                    record.insert(name, Slot::One(value));
                }
                None => self.unknown(&attribute_path, "attribute")?,
            }
        }

        if let Some(field) = spec.content_spec() {
            let value = self.scalar(field, &get_text(node), &path.content())?;
            record.insert(CONTENT_FIELD, Slot::One(value));
        } else if let Some(text) = stray_text(node) {
            return Err(self.mismatch(path, format!("unexpected text content '{text}'")));
        }

        let fields: Vec<&FieldSpec> = spec.elements().collect();
        let mut found: Vec<Vec<Value>> = vec![Vec::new(); fields.len()];
        let mut last_position = 0;

        for child in element_children(node) {
            let name = get_tag_name(child);
            let position = fields
                .iter()
                .position(|field| field.name == name)
                .filter(|_| is_in_namespace(child, &self.entry.data_namespace));
            let Some(position) = position else {
                self.unknown(&path.child(name), "element")?;
                continue;
            };

            let field = fields[position];
            let entries = &mut found[position];
            let child_path = if field.occurs.is_repeated() {
                path.indexed(name, entries.len() + 1)
            } else {
                path.child(name)
            };

            if self.entry.strict_ordering && position < last_position {
                return Err(self.mismatch(
                    &child_path,
                    format!(
                        "element out of order: <{name}> must precede <{}>",
                        fields[last_position].name
                    ),
                ));
            }
            last_position = last_position.max(position);

            if !field.occurs.is_repeated() && !entries.is_empty() {
                return Err(self.mismatch(&child_path, "element occurs more than once"));
            }

            let value = match &field.field_type {
                FieldType::Record(_) => Value::Record(self.record(field, child, &child_path)?),
                _ => {
                    if let Some(nested) = element_children(child).next() {
                        return Err(self.mismatch(
                            &child_path.child(get_tag_name(nested)),
                            format!("<{name}> holds a {} value, not elements", field.field_type.describe()),
                        ));
                    }
                    self.scalar(field, &get_text(child), &child_path)?
                }
            };
            entries.push(value);
        }

        for (field, values) in fields.into_iter().zip(found) {
            if values.is_empty() {
                continue;
            }
            let slot = if field.occurs.is_repeated() {
                Slot::Many(values)
            } else {
                let mut values = values;
                match values.pop() {
                    Some(value) => Slot::One(value),
                    None => continue,
                }
            };
            record.insert(field.name.as_str(), slot);
        }

        Ok(record)
    }

    fn scalar(&self, field: &FieldSpec, raw: &str, path: &FieldPath) -> Result<Value> {
        match &field.field_type {
            FieldType::Text => Ok(Value::Text(raw.to_string())),
            FieldType::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| self.mismatch(path, format!("expected integer, found '{raw}'"))),
            FieldType::Code(allowed) => {
                let code = raw.trim();
                if allowed.iter().any(|value| value == code) {
                    Ok(Value::Code(code.to_string()))
                } else {
                    Err(self.mismatch(
                        path,
                        format!("expected {}, found '{code}'", field.field_type.describe()),
                    ))
                }
            }
            FieldType::Temporal(format) => temporal::parse_as(self.kind(), *format, raw.trim())
                .map(Value::Temporal)
                .map_err(|err| err.at_path(path.to_string())),
            FieldType::Record(_) => Err(self.mismatch(path, "expected an element, found text")),
        }
    }
}
