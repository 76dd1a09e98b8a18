use core::fmt::Write;

use serde_json::{Number, Value};

use crate::{PathStack, StreamError, TokenWriter};

// -----------------------------------------------------------------------------
// Frame

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Array,
    Object,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: Kind,
    count: usize,
}

// -----------------------------------------------------------------------------
// JsonWriter

/// A [`TokenWriter`] producing compact JSON text.
///
/// Object member names are deferred until their value arrives, so a `null`
/// member can be dropped entirely when [`serialize_nulls`] is off (the
/// default).
///
/// # Examples
///
/// ```
/// use qc_stream::{JsonWriter, TokenWriter};
///
/// let mut writer = JsonWriter::new();
/// writer.begin_object().unwrap();
/// writer.name("name").unwrap();
/// writer.string_value("qc \"core\"").unwrap();
/// writer.name("missing").unwrap();
/// writer.null_value().unwrap();
/// writer.end_object().unwrap();
/// assert_eq!(writer.finish().unwrap(), r#"{"name":"qc \"core\""}"#);
///
/// let mut writer = JsonWriter::new().with_serialize_nulls(true);
/// writer.begin_object().unwrap();
/// writer.name("missing").unwrap();
/// writer.null_value().unwrap();
/// writer.end_object().unwrap();
/// assert_eq!(writer.finish().unwrap(), r#"{"missing":null}"#);
/// ```
///
/// [`serialize_nulls`]: TokenWriter::serialize_nulls
#[derive(Debug, Default, Clone)]
pub struct JsonWriter {
    out: String,
    frames: Vec<Frame>,
    path: PathStack,
    deferred_name: Option<String>,
    serialize_nulls: bool,
    root_done: bool,
}

impl JsonWriter {
    /// Create a writer with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `null` object members instead of dropping them.
    pub fn with_serialize_nulls(mut self, serialize_nulls: bool) -> Self {
        self.serialize_nulls = serialize_nulls;
        self
    }

    /// Returns the text written so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Returns the document, failing if it is empty or still open.
    pub fn finish(self) -> Result<String, StreamError> {
        if !self.frames.is_empty() || self.deferred_name.is_some() || !self.root_done {
            return Err(StreamError::Incomplete {
                path: self.path.to_string(),
            });
        }
        Ok(self.out)
    }

    fn unbalanced(&self, reason: &'static str) -> StreamError {
        StreamError::Unbalanced {
            reason,
            path: self.path.to_string(),
        }
    }

    fn write_escaped(&mut self, s: &str) {
        // Infallible: `Value`'s `Display` only writes into a `String`.
        let _ = write!(self.out, "{}", Value::from(s));
    }

    /// Separator, pending name and structural checks before any value.
    fn before_value(&mut self) -> Result<(), StreamError> {
        let Some(frame) = self.frames.last_mut() else {
            if self.root_done {
                return Err(self.unbalanced("multiple top-level values"));
            }
            return Ok(());
        };
        let first = frame.count == 0;
        frame.count += 1;
        match frame.kind {
            Kind::Array => {
                if !first {
                    self.out.push(',');
                }
            }
            Kind::Object => {
                let Some(name) = self.deferred_name.take() else {
                    return Err(self.unbalanced("object value without a name"));
                };
                if !first {
                    self.out.push(',');
                }
                self.write_escaped(&name);
                self.out.push(':');
            }
        }
        Ok(())
    }

    fn after_value(&mut self) {
        self.path.value_done();
        if self.frames.is_empty() {
            self.root_done = true;
        }
    }

    fn close(&mut self, kind: Kind, token: char) -> Result<(), StreamError> {
        match self.frames.last() {
            Some(frame) if frame.kind == kind => {}
            _ => return Err(self.unbalanced("close does not match the open structure")),
        }
        if self.deferred_name.is_some() {
            return Err(self.unbalanced("dangling name"));
        }
        self.frames.pop();
        self.out.push(token);
        self.path.pop();
        self.after_value();
        Ok(())
    }
}

impl TokenWriter for JsonWriter {
    fn begin_array(&mut self) -> Result<(), StreamError> {
        self.before_value()?;
        self.out.push('[');
        self.frames.push(Frame {
            kind: Kind::Array,
            count: 0,
        });
        self.path.push_array();
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), StreamError> {
        self.close(Kind::Array, ']')
    }

    fn begin_object(&mut self) -> Result<(), StreamError> {
        self.before_value()?;
        self.out.push('{');
        self.frames.push(Frame {
            kind: Kind::Object,
            count: 0,
        });
        self.path.push_object();
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), StreamError> {
        self.close(Kind::Object, '}')
    }

    fn name(&mut self, name: &str) -> Result<(), StreamError> {
        if !self.path.in_object() {
            return Err(self.unbalanced("name outside of an object"));
        }
        if self.deferred_name.is_some() {
            return Err(self.unbalanced("name already pending"));
        }
        self.deferred_name = Some(name.to_owned());
        self.path.set_name(name);
        Ok(())
    }

    fn string_value(&mut self, value: &str) -> Result<(), StreamError> {
        self.before_value()?;
        self.write_escaped(value);
        self.after_value();
        Ok(())
    }

    fn int_value(&mut self, value: i64) -> Result<(), StreamError> {
        self.before_value()?;
        let _ = write!(self.out, "{value}");
        self.after_value();
        Ok(())
    }

    fn float_value(&mut self, value: f64) -> Result<(), StreamError> {
        let Some(number) = Number::from_f64(value) else {
            return Err(StreamError::NonFinite {
                value,
                path: self.path.to_string(),
            });
        };
        self.before_value()?;
        let _ = write!(self.out, "{number}");
        self.after_value();
        Ok(())
    }

    fn bool_value(&mut self, value: bool) -> Result<(), StreamError> {
        self.before_value()?;
        self.out.push_str(if value { "true" } else { "false" });
        self.after_value();
        Ok(())
    }

    fn null_value(&mut self) -> Result<(), StreamError> {
        if self.deferred_name.is_some() && !self.serialize_nulls {
            self.deferred_name = None;
            return Ok(());
        }
        self.before_value()?;
        self.out.push_str("null");
        self.after_value();
        Ok(())
    }

    fn serialize_nulls(&self) -> bool {
        self.serialize_nulls
    }

    fn path(&self) -> String {
        self.path.to_string()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::JsonWriter;
    use crate::{StreamError, TokenWriter};

    #[test]
    fn nested_structures_get_separators() {
        let mut writer = JsonWriter::new();
        writer.begin_object().unwrap();
        writer.name("list").unwrap();
        writer.begin_array().unwrap();
        writer.string_value("b").unwrap();
        writer.float_value(1.5).unwrap();
        writer.bool_value(false).unwrap();
        writer.null_value().unwrap();
        writer.end_array().unwrap();
        writer.name("n").unwrap();
        writer.int_value(-3).unwrap();
        writer.end_object().unwrap();
        assert_eq!(
            writer.finish().unwrap(),
            r#"{"list":["b",1.5,false,null],"n":-3}"#
        );
    }

    #[test]
    fn path_follows_writes() {
        let mut writer = JsonWriter::new();
        writer.begin_object().unwrap();
        writer.name("list").unwrap();
        writer.begin_array().unwrap();
        writer.string_value("a").unwrap();
        assert_eq!(writer.path(), "$.list[1]");
    }

    #[test]
    fn mismatched_close_is_rejected() {
        let mut writer = JsonWriter::new();
        writer.begin_array().unwrap();
        assert!(matches!(
            writer.end_object(),
            Err(StreamError::Unbalanced { .. })
        ));
    }

    #[test]
    fn value_without_name_is_rejected() {
        let mut writer = JsonWriter::new();
        writer.begin_object().unwrap();
        assert!(matches!(
            writer.string_value("x"),
            Err(StreamError::Unbalanced { .. })
        ));
    }

    #[test]
    fn unfinished_document_is_incomplete() {
        let mut writer = JsonWriter::new();
        writer.begin_array().unwrap();
        assert!(matches!(
            writer.finish(),
            Err(StreamError::Incomplete { .. })
        ));
        assert!(matches!(
            JsonWriter::new().finish(),
            Err(StreamError::Incomplete { .. })
        ));
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        let mut writer = JsonWriter::new();
        assert!(matches!(
            writer.float_value(f64::NAN),
            Err(StreamError::NonFinite { .. })
        ));
    }

    #[test]
    fn second_top_level_value_is_rejected() {
        let mut writer = JsonWriter::new();
        writer.int_value(1).unwrap();
        assert!(writer.int_value(2).is_err());
    }
}
