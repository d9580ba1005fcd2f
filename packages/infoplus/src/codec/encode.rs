//! Encoder writing a validated record with the quick-xml writer.

use std::borrow::Cow;

use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::Writer;

use crate::config::{CodecConfig, CONTENT_FIELD, DATA_PREFIX};
use crate::error::{InfoPlusError, Result};
use crate::kind::DocumentKind;
use crate::model::{check_record, DocumentRecord, Record, Value, Violation};
use crate::path::FieldPath;
use crate::schema::{FieldSpec, FieldType, SchemaEntry};
use crate::temporal;

/// Encode a document of the entry's kind, envelope included.
pub(crate) fn encode_document(
    entry: &SchemaEntry,
    config: &CodecConfig,
    document: &DocumentRecord,
) -> Result<Vec<u8>> {
    let violations = check_record(entry.kind, &entry.product, document.product());
    if !violations.is_empty() {
        return Err(InfoPlusError::IncompleteRecord {
            kind: entry.kind,
            violations,
        });
    }

    let mut writer = if config.indent > 0 {
        Writer::new_with_indent(Vec::new(), b' ', config.indent)
    } else {
        Writer::new(Vec::new())
    };

    if config.xml_declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    }

    let prefix_declaration = format!("xmlns:{DATA_PREFIX}");
    let mut envelope = BytesStart::new(entry.root_element.as_str());
    envelope.push_attribute(("xmlns", entry.message_namespace.as_str()));
    envelope.push_attribute((prefix_declaration.as_str(), entry.data_namespace.as_str()));
    writer.write_event(Event::Start(envelope))?;

    let encoder = Encoder { kind: entry.kind };
    encoder.write_record(
        &mut writer,
        &entry.product,
        document.product(),
        &FieldPath::root(&entry.product.name),
    )?;

    writer.write_event(Event::End(BytesEnd::new(entry.root_element.as_str())))?;

    let bytes = writer.into_inner();
    tracing::debug!(kind = %entry.kind, bytes = bytes.len(), "encoded document");
    Ok(bytes)
}

struct Encoder {
    kind: DocumentKind,
}

impl Encoder {
    fn write_record(
        &self,
        writer: &mut Writer<Vec<u8>>,
        spec: &FieldSpec,
        record: &Record,
        path: &FieldPath,
    ) -> Result<()> {
        let name = format!("{DATA_PREFIX}:{}", spec.name);
        let mut start = BytesStart::new(name.as_str());
        for field in spec.attributes() {
            if let Some(value) = record.get(&field.name) {
                let text = self.scalar_text(value, &path.attribute(&field.name))?;
                start.push_attribute(Attribute {
                    key: QName(field.name.as_bytes()),
                    value: match escape_attribute(&text) {
                        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
                        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
                    },
                });
            }
        }

        let content = match (spec.content_spec(), record.get(CONTENT_FIELD)) {
            (Some(_), Some(value)) => self.scalar_text(value, &path.content())?,
            _ => Cow::Borrowed(""),
        };
        let has_children = spec.elements().any(|field| record.slot(&field.name).is_some());

        if content.is_empty() && !has_children {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if !content.is_empty() {
            writer.write_event(Event::Text(BytesText::from_escaped(escape_text(&content))))?;
        }

        for field in spec.elements() {
            let repeated = field.occurs.is_repeated();
            for (i, value) in record.all(&field.name).iter().enumerate() {
                let child_path = if repeated {
                    path.indexed(&field.name, i + 1)
                } else {
                    path.child(&field.name)
                };
                match (&field.field_type, value) {
                    (FieldType::Record(_), Value::Record(nested)) => {
                        self.write_record(writer, field, nested, &child_path)?;
                    }
                    _ => self.write_leaf(writer, &field.name, value, &child_path)?,
                }
            }
        }

        writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
        Ok(())
    }

    fn write_leaf(
        &self,
        writer: &mut Writer<Vec<u8>>,
        name: &str,
        value: &Value,
        path: &FieldPath,
    ) -> Result<()> {
        let name = format!("{DATA_PREFIX}:{name}");
        let text = self.scalar_text(value, path)?;
        if text.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new(name.as_str())))?;
        } else {
            writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;
            writer.write_event(Event::Text(BytesText::from_escaped(escape_text(&text))))?;
            writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
        }
        Ok(())
    }

    fn scalar_text<'v>(&self, value: &'v Value, path: &FieldPath) -> Result<Cow<'v, str>> {
        match value {
            Value::Text(s) | Value::Code(s) => Ok(Cow::Borrowed(s.as_str())),
            Value::Integer(i) => Ok(Cow::Owned(i.to_string())),
            Value::Temporal(t) => temporal::format(self.kind, t)
                .map(Cow::Owned)
                .map_err(|err| err.at_path(path.to_string())),
            Value::Record(_) => Err(InfoPlusError::IncompleteRecord {
                kind: self.kind,
                violations: vec![Violation::new(path.to_string(), "expected a scalar value")],
            }),
        }
    }
}

/// Escape character data. A literal carriage return would come back as a
/// line feed, so it is written as a character reference.
fn escape_text(raw: &str) -> Cow<'_, str> {
    whitespace_references(partial_escape(raw), &['\r'])
}

/// Escape an attribute value. Parsers normalize literal tab, line feed and
/// carriage return in attributes to spaces.
fn escape_attribute(raw: &str) -> Cow<'_, str> {
    whitespace_references(escape(raw), &['\t', '\n', '\r'])
}

fn whitespace_references<'a>(escaped: Cow<'a, str>, whitespace: &[char]) -> Cow<'a, str> {
    if !escaped.contains(whitespace) {
        return escaped;
    }
    let mut out = String::with_capacity(escaped.len() + 8);
    for c in escaped.chars() {
        match c {
            '\t' if whitespace.contains(&c) => out.push_str("&#9;"),
            '\n' if whitespace.contains(&c) => out.push_str("&#10;"),
            '\r' if whitespace.contains(&c) => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
