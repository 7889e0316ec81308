//! Parsed manifest documents.
//!
//! A source file is a stream of zero or more YAML documents. Each one is loaded
//! into [`Document`], a closed set of variants, so the "drop null documents"
//! rule is a plain match rather than a check on an untyped value.
//!
//! `Document` drives serde directly instead of going through `serde_yaml::Value`:
//! integers wider than 64 bits survive, and a repeated mapping key keeps the
//! last value instead of failing the whole file.

use serde::de::{self, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_yaml::value::Tag;
use serde_yaml::Number;
use std::collections::BTreeSet;
use std::fmt;

/// Core `!!` tags the loader resolves without losing meaning.
const RESOLVED_CORE_TAGS: [&str; 7] = ["str", "int", "float", "bool", "null", "map", "seq"];

/// One YAML document from a source stream
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Null,
    Bool(bool),
    Number(Number),
    /// Negative integer below `i64::MIN`
    I128(i128),
    /// Integer above `u64::MAX`
    U128(u128),
    String(String),
    Sequence(Vec<Document>),
    /// Entries in source order
    Mapping(Vec<(Document, Document)>),
    /// Value carrying an explicit local tag such as `!Ref`
    Tagged { tag: Tag, value: Box<Document> },
}

impl Document {
    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    /// Serialize in block style. Non-ASCII text is emitted as-is, not escaped.
    ///
    /// The result always ends with a newline and carries no leading `---`.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Document::Null => serializer.serialize_unit(),
            Document::Bool(b) => serializer.serialize_bool(*b),
            Document::Number(n) => n.serialize(serializer),
            Document::I128(n) => serializer.serialize_i128(*n),
            Document::U128(n) => serializer.serialize_u128(*n),
            Document::String(s) => serializer.serialize_str(s),
            Document::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Document::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Document::Tagged { tag, value } => {
                // serde_yaml recognizes a single-entry map keyed by a collected Tag
                struct TagKey<'a>(&'a Tag);

                impl Serialize for TagKey<'_> {
                    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                        serializer.collect_str(self.0)
                    }
                }

                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(&TagKey(tag), value.as_ref())?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Document, E> {
        Ok(Document::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Document, E> {
        Ok(Document::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Document, E> {
        Ok(Document::Number(v.into()))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Document, E> {
        Ok(match i64::try_from(v) {
            Ok(small) => Document::Number(small.into()),
            Err(_) => Document::I128(v),
        })
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Document, E> {
        Ok(match u64::try_from(v) {
            Ok(small) => Document::Number(small.into()),
            Err(_) => Document::U128(v),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Document, E> {
        Ok(Document::Number(v.into()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Document, E> {
        Ok(Document::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Document, E> {
        Ok(Document::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Document, E> {
        Ok(Document::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Document, E> {
        Ok(Document::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Document, D::Error>
    where
        D: Deserializer<'de>,
    {
        Document::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Document, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Document::Sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Document, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries: Vec<(Document, Document)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<Document, Document>()? {
            // Repeated key: last value wins, first position is kept
            match entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
        }
        Ok(Document::Mapping(entries))
    }

    fn visit_enum<A>(self, data: A) -> Result<Document, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (tag, contents): (String, _) = data.variant()?;
        let value = contents.newtype_variant::<Document>()?;
        Ok(Document::Tagged {
            tag: Tag::new(tag),
            value: Box::new(value),
        })
    }
}

/// Parse a multi-document YAML stream.
///
/// The whole stream fails if any document in it is malformed, so a broken file
/// never contributes a partial set of documents.
pub fn parse_stream(source: &str) -> Result<Vec<Document>, serde_yaml::Error> {
    serde_yaml::Deserializer::from_str(source)
        .map(Document::deserialize)
        .collect()
}

/// Parse a stream and keep only the documents that will be written.
pub fn parse_non_null(source: &str) -> Result<Vec<Document>, serde_yaml::Error> {
    Ok(parse_stream(source)?
        .into_iter()
        .filter(|doc| !doc.is_null())
        .collect())
}

/// Core tags in `source` that the loader drops, e.g. `!!binary` or `!!timestamp`.
///
/// The value under such a tag is still written, but as its plain scalar or
/// collection. This is a line scanner: quoted text and comments are skipped,
/// block scalar bodies are not.
pub fn dropped_core_tags(source: &str) -> Vec<String> {
    let mut found = BTreeSet::new();
    for line in source.lines() {
        let mut quote: Option<char> = None;
        let mut prev = ' ';
        for (i, c) in line.char_indices() {
            if let Some(q) = quote {
                if c == q {
                    quote = None;
                }
                prev = c;
                continue;
            }
            let boundary = prev.is_whitespace() || matches!(prev, '[' | '{' | ',');
            match c {
                '#' if prev.is_whitespace() => break,
                '"' | '\'' if boundary => quote = Some(c),
                '!' if boundary => {
                    if let Some(name) = core_tag_name(&line[i..]) {
                        if !RESOLVED_CORE_TAGS.contains(&name) {
                            found.insert(format!("!!{}", name));
                        }
                    }
                }
                _ => {}
            }
            prev = c;
        }
    }
    found.into_iter().collect()
}

fn core_tag_name(text: &str) -> Option<&str> {
    let rest = text
        .strip_prefix("!!")
        .or_else(|| text.strip_prefix("!<tag:yaml.org,2002:"))?;
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}
