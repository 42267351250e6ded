//! Plugin manifest handling.
//!
//! The manifest is the catalog record shipped next to the plugin
//! (`{project}.json`). Only a handful of keys are rewritten for the
//! unofficial build, so it is kept as an ordered JSON object and every
//! other key passes through untouched.

use crate::{BundleError, BundleResult, UNOFFICIAL_SUFFIX};
use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::Path;

const NAME: &str = "Name";
const PUNCHLINE: &str = "Punchline";
const INTERNAL_NAME: &str = "InternalName";
const ICON_URL: &str = "IconUrl";

/// Plugin manifest as an ordered JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginManifest {
    fields: Map<String, Value>,
}

impl PluginManifest {
    /// Load a manifest from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> BundleResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => BundleError::MissingFile(path.display().to_string()),
            _ => BundleError::Io(e),
        })?;

        Self::from_json(&json)
    }

    /// Parse a manifest from JSON text.
    pub fn from_json(json: &str) -> BundleResult<Self> {
        let value: Value = serde_json::from_str(json)?;

        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(BundleError::InvalidManifest(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Serialize to 2-space indented, ASCII-only JSON.
    ///
    /// Non-ASCII characters are written as `\uXXXX` escapes of their UTF-16
    /// code units.
    pub fn to_json(&self) -> BundleResult<String> {
        let mut out = Vec::new();
        let formatter = AsciiFormatter(PrettyFormatter::with_indent(b"  "));
        let mut serializer = Serializer::with_formatter(&mut out, formatter);
        self.fields.serialize(&mut serializer)?;

        String::from_utf8(out)
            .map_err(|e| BundleError::Io(io::Error::new(ErrorKind::InvalidData, e)))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn name(&self) -> BundleResult<&str> {
        self.required_str(NAME)
    }

    pub fn internal_name(&self) -> BundleResult<&str> {
        self.required_str(INTERNAL_NAME)
    }

    /// Rewrite the manifest to describe the unofficial build.
    ///
    /// `Punchline` is prefixed with a notice naming the original plugin,
    /// `InternalName` gains the `Unofficial` suffix, `Name` gains
    /// ` (Unofficial)` and `IconUrl` points at `{icon_base_url}/{InternalName}.png`.
    /// Existing keys keep their position; a missing `IconUrl` is appended.
    pub fn into_unofficial(mut self, icon_base_url: &str) -> BundleResult<Self> {
        let name = self.required_str(NAME)?.to_string();
        let punchline = format!(
            "Unofficial/uncertified build of {name}. {}",
            self.required_str(PUNCHLINE)?
        );
        let internal_name = format!("{}{UNOFFICIAL_SUFFIX}", self.required_str(INTERNAL_NAME)?);
        let icon_url = format!(
            "{}/{internal_name}.png",
            icon_base_url.trim_end_matches('/')
        );

        self.fields.insert(PUNCHLINE.into(), Value::String(punchline));
        self.fields
            .insert(INTERNAL_NAME.into(), Value::String(internal_name));
        self.fields
            .insert(NAME.into(), Value::String(format!("{name} (Unofficial)")));
        self.fields.insert(ICON_URL.into(), Value::String(icon_url));

        Ok(self)
    }

    fn required_str(&self, key: &str) -> BundleResult<&str> {
        match self.fields.get(key) {
            Some(Value::String(value)) => Ok(value),
            Some(other) => Err(BundleError::InvalidManifest(format!(
                "{key} must be a string, found {}",
                json_kind(other)
            ))),
            None => Err(BundleError::InvalidManifest(format!("missing {key}"))),
        }
    }
}

/// Pretty printer that escapes every non-ASCII character.
struct AsciiFormatter<'a>(PrettyFormatter<'a>);

impl Formatter for AsciiFormatter<'_> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;

        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }

            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = index + ch.len_utf8();
        }

        writer.write_all(fragment[start..].as_bytes())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "manifest/manifest_tests.rs"]
mod manifest_tests;
