use core::fmt::{self, Debug, Display, Formatter, Write};

// -----------------------------------------------------------------------------
// PathStack

#[derive(Clone, Debug, PartialEq, Eq)]
enum Scope {
    /// Index of the element being read or written.
    Array(usize),
    /// Name of the member being read or written, once known.
    Object(Option<String>),
}

/// Stack of open arrays and objects, rendered as `$.list[1]`.
///
/// Readers and writers push a scope when they enter a structure, pop it when
/// they leave, and call [`value_done`](Self::value_done) after each complete
/// element so array indices advance.
///
/// # Examples
///
/// ```
/// use qc_stream::PathStack;
///
/// let mut path = PathStack::new();
/// path.push_object();
/// path.set_name("list");
/// path.push_array();
/// path.value_done();
/// assert_eq!(path.to_string(), "$.list[1]");
///
/// path.pop();
/// path.pop();
/// assert_eq!(path.to_string(), "$");
/// ```
#[derive(Default, Clone, PartialEq, Eq)]
pub struct PathStack {
    stack: Vec<Scope>,
}

impl PathStack {
    /// Create a new empty [`PathStack`].
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Enter an array.
    pub fn push_array(&mut self) {
        self.stack.push(Scope::Array(0));
    }

    /// Enter an object.
    pub fn push_object(&mut self) {
        self.stack.push(Scope::Object(None));
    }

    /// Leave the innermost structure.
    pub fn pop(&mut self) {
        self.stack.pop();
    }

    /// Record the member name in the innermost object.
    pub fn set_name(&mut self, name: &str) {
        if let Some(Scope::Object(slot)) = self.stack.last_mut() {
            *slot = Some(name.to_owned());
        }
    }

    /// Mark the current element of the innermost array as complete.
    pub fn value_done(&mut self) {
        if let Some(Scope::Array(index)) = self.stack.last_mut() {
            *index += 1;
        }
    }

    /// Number of open structures.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` if the innermost open structure is an object.
    pub fn in_object(&self) -> bool {
        matches!(self.stack.last(), Some(Scope::Object(_)))
    }
}

impl Display for PathStack {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('$')?;
        for scope in &self.stack {
            match scope {
                Scope::Array(index) => write!(f, "[{index}]")?,
                Scope::Object(Some(name)) => write!(f, ".{name}")?,
                Scope::Object(None) => {}
            }
        }
        Ok(())
    }
}

impl Debug for PathStack {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "`{self}`")
    }
}
