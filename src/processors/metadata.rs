// mediafile/src/processors/metadata.rs
use crate::core::Result;
use exif::experimental::Writer;
use exif::{Field, In, Rational, Reader, Tag, Value};
use std::io::Cursor;

/// EXIF fields keyed by resolved tag name, in the order the block lists them.
#[derive(Debug, Clone, Default)]
pub struct ExifFields {
    entries: Vec<(String, Value)>,
}

impl ExifFields {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    fn insert(&mut self, name: String, value: Value) {
        if !self.contains(&name) {
            self.entries.push((name, value));
        }
    }
}

/// Editable copy of the primary-image EXIF fields of a block.
#[derive(Debug)]
pub struct ExifEditor {
    fields: Vec<Field>,
    little_endian: bool,
}

impl ExifEditor {
    pub fn empty() -> Self {
        Self {
            fields: Vec::new(),
            little_endian: false,
        }
    }

    pub fn field(&self, tag: Tag) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    pub fn set_field(&mut self, tag: Tag, value: Value) {
        match self.fields.iter_mut().find(|f| f.tag == tag) {
            Some(field) => field.value = value,
            None => self.fields.push(Field {
                tag,
                ifd_num: In::PRIMARY,
                value,
            }),
        }
    }

    /// Stores pixel counts as `width/1` and `height/1`.
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.set_field(
            Tag::XResolution,
            Value::Rational(vec![Rational { num: width, denom: 1 }]),
        );
        self.set_field(
            Tag::YResolution,
            Value::Rational(vec![Rational { num: height, denom: 1 }]),
        );
    }

    /// TIFF-structured bytes, without the APP1 `Exif\0\0` header.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        for field in &self.fields {
            writer.push_field(field);
        }

        let mut buf = Cursor::new(Vec::new());
        writer.write(&mut buf, self.little_endian)?;
        Ok(buf.into_inner())
    }
}

pub struct MetadataProcessor;

impl MetadataProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Primary-image fields whose tag name is one of `names`.
    pub fn fields_named(&self, raw: &[u8], names: &[&str]) -> Result<ExifFields> {
        let exif = Reader::new().read_raw(raw.to_vec())?;

        let mut fields = ExifFields::default();
        for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
            let name = tag_name(field.tag);
            if names.contains(&name.as_str()) {
                fields.insert(name, field.value.clone());
            }
        }

        log::debug!("Matched {} of {} requested EXIF tags", fields.len(), names.len());
        Ok(fields)
    }

    pub fn parse(&self, raw: &[u8]) -> Result<ExifEditor> {
        let exif = Reader::new().read_raw(raw.to_vec())?;

        // Thumbnail data and IFD pointers are rebuilt by the writer, and it
        // cannot write values whose type the reader did not recognize.
        let fields = exif
            .fields()
            .filter(|f| f.ifd_num == In::PRIMARY)
            .filter(|f| !matches!(f.value, Value::Unknown(..)))
            .map(|f| Field {
                tag: f.tag,
                ifd_num: f.ifd_num,
                value: f.value.clone(),
            })
            .collect();

        Ok(ExifEditor {
            fields,
            little_endian: exif.little_endian(),
        })
    }
}

impl Default for MetadataProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable name from the codec's tag table; unknown tags fall back to
/// their numeric form.
pub fn tag_name(tag: Tag) -> String {
    tag.to_string()
}

/// First string component of an ASCII value.
pub fn ascii_value(value: &Value) -> Option<String> {
    match value {
        Value::Ascii(parts) => parts
            .first()
            .map(|bytes| String::from_utf8_lossy(bytes).trim_end_matches('\0').trim().to_string()),
        _ => None,
    }
}
