use core::mem;

use serde_json::{Number, Value};

use crate::{PathStack, StreamError, Token, TokenReader};

// -----------------------------------------------------------------------------
// Event

#[derive(Debug, Clone, PartialEq)]
enum Event {
    BeginArray,
    EndArray,
    BeginObject,
    EndObject,
    Name(String),
    String(String),
    Number(Number),
    Bool(bool),
    Null,
}

impl Event {
    const fn token(&self) -> Token {
        match self {
            Self::BeginArray => Token::BeginArray,
            Self::EndArray => Token::EndArray,
            Self::BeginObject => Token::BeginObject,
            Self::EndObject => Token::EndObject,
            Self::Name(_) => Token::Name,
            Self::String(_) => Token::String,
            Self::Number(_) => Token::Number,
            Self::Bool(_) => Token::Bool,
            Self::Null => Token::Null,
        }
    }
}

fn flatten(value: Value, out: &mut Vec<Event>) {
    match value {
        Value::Null => out.push(Event::Null),
        Value::Bool(b) => out.push(Event::Bool(b)),
        Value::Number(n) => out.push(Event::Number(n)),
        Value::String(s) => out.push(Event::String(s)),
        Value::Array(items) => {
            out.push(Event::BeginArray);
            for item in items {
                flatten(item, out);
            }
            out.push(Event::EndArray);
        }
        Value::Object(members) => {
            out.push(Event::BeginObject);
            for (name, member) in members {
                out.push(Event::Name(name));
                flatten(member, out);
            }
            out.push(Event::EndObject);
        }
    }
}

// -----------------------------------------------------------------------------
// JsonReader

/// A [`TokenReader`] over a JSON document.
///
/// The document is parsed up front by `serde_json` (member order preserved)
/// and flattened into a token buffer, which is then consumed pull-style.
///
/// # Examples
///
/// ```
/// use qc_stream::{JsonReader, Token, TokenReader};
///
/// let mut reader = JsonReader::parse(r#"[1, 2.5, null]"#).unwrap();
/// reader.begin_array().unwrap();
/// assert_eq!(reader.next_int().unwrap(), 1);
/// assert_eq!(reader.next_float().unwrap(), 2.5);
/// assert_eq!(reader.peek().unwrap(), Token::Null);
/// reader.next_null().unwrap();
/// assert!(!reader.has_next().unwrap());
/// reader.end_array().unwrap();
/// reader.finish().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct JsonReader {
    events: Vec<Event>,
    pos: usize,
    path: PathStack,
}

impl JsonReader {
    /// Parse `input` as a single JSON document.
    pub fn parse(input: &str) -> Result<Self, StreamError> {
        let value: Value = serde_json::from_str(input)?;
        Ok(Self::from_value(value))
    }

    /// Read tokens from an already parsed document.
    pub fn from_value(value: Value) -> Self {
        let mut events = Vec::new();
        flatten(value, &mut events);
        Self {
            events,
            pos: 0,
            path: PathStack::new(),
        }
    }

    /// Fails if tokens remain unread.
    pub fn finish(&self) -> Result<(), StreamError> {
        if self.pos < self.events.len() {
            return Err(StreamError::TrailingTokens {
                path: self.path.to_string(),
            });
        }
        Ok(())
    }

    #[inline]
    fn current(&self) -> Option<&Event> {
        self.events.get(self.pos)
    }

    fn unexpected(&self, expected: Token) -> StreamError {
        StreamError::UnexpectedToken {
            expected,
            found: self.current().map_or(Token::EndDocument, Event::token),
            path: self.path.to_string(),
        }
    }

    /// Consume the current event if it has the `expected` kind.
    fn take(&mut self, expected: Token) -> Result<Event, StreamError> {
        match self.events.get_mut(self.pos) {
            Some(event) if event.token() == expected => {
                self.pos += 1;
                Ok(mem::replace(event, Event::Null))
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn take_number(&mut self) -> Result<Number, StreamError> {
        match self.take(Token::Number)? {
            Event::Number(n) => Ok(n),
            _ => unreachable!("token kind checked by `take`"),
        }
    }
}

impl TokenReader for JsonReader {
    fn begin_array(&mut self) -> Result<(), StreamError> {
        self.take(Token::BeginArray)?;
        self.path.push_array();
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), StreamError> {
        self.take(Token::EndArray)?;
        self.path.pop();
        self.path.value_done();
        Ok(())
    }

    fn begin_object(&mut self) -> Result<(), StreamError> {
        self.take(Token::BeginObject)?;
        self.path.push_object();
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), StreamError> {
        self.take(Token::EndObject)?;
        self.path.pop();
        self.path.value_done();
        Ok(())
    }

    fn next_name(&mut self) -> Result<String, StreamError> {
        match self.take(Token::Name)? {
            Event::Name(name) => {
                self.path.set_name(&name);
                Ok(name)
            }
            _ => unreachable!("token kind checked by `take`"),
        }
    }

    fn next_string(&mut self) -> Result<String, StreamError> {
        match self.take(Token::String)? {
            Event::String(s) => {
                self.path.value_done();
                Ok(s)
            }
            _ => unreachable!("token kind checked by `take`"),
        }
    }

    fn next_int(&mut self) -> Result<i64, StreamError> {
        let number = self.take_number()?;
        let value = match number.as_i64() {
            Some(i) => Some(i),
            // `2.0` is accepted, `2.5` and `1e30` are not.
            None => number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64),
        };
        match value {
            Some(i) => {
                self.path.value_done();
                Ok(i)
            }
            None => Err(StreamError::NumberOutOfRange {
                value: number.to_string(),
                target: "i64",
                path: self.path.to_string(),
            }),
        }
    }

    fn next_float(&mut self) -> Result<f64, StreamError> {
        let number = self.take_number()?;
        match number.as_f64() {
            Some(f) => {
                self.path.value_done();
                Ok(f)
            }
            None => Err(StreamError::NumberOutOfRange {
                value: number.to_string(),
                target: "f64",
                path: self.path.to_string(),
            }),
        }
    }

    fn next_bool(&mut self) -> Result<bool, StreamError> {
        match self.take(Token::Bool)? {
            Event::Bool(b) => {
                self.path.value_done();
                Ok(b)
            }
            _ => unreachable!("token kind checked by `take`"),
        }
    }

    fn next_null(&mut self) -> Result<(), StreamError> {
        self.take(Token::Null)?;
        self.path.value_done();
        Ok(())
    }

    fn has_next(&mut self) -> Result<bool, StreamError> {
        Ok(!matches!(
            self.current(),
            None | Some(Event::EndArray | Event::EndObject)
        ))
    }

    fn peek(&mut self) -> Result<Token, StreamError> {
        Ok(self.current().map_or(Token::EndDocument, Event::token))
    }

    fn skip_value(&mut self) -> Result<(), StreamError> {
        let mut depth = 0_usize;
        loop {
            let Some(event) = self.events.get(self.pos) else {
                return Err(StreamError::Incomplete {
                    path: self.path.to_string(),
                });
            };
            match event {
                Event::BeginArray | Event::BeginObject => depth += 1,
                Event::EndArray | Event::EndObject => {
                    if depth == 0 {
                        return Err(StreamError::Unbalanced {
                            reason: "no value to skip",
                            path: self.path.to_string(),
                        });
                    }
                    depth -= 1;
                }
                _ => {}
            }
            let is_name = matches!(event, Event::Name(_));
            self.pos += 1;
            if depth == 0 && !is_name {
                break;
            }
        }
        self.path.value_done();
        Ok(())
    }

    fn path(&self) -> String {
        self.path.to_string()
    }
}

// -----------------------------------------------------------------------------
// Tests
