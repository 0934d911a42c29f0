//! Ordered attribute list.
//!
//! [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
//! "An element has an associated attribute list"
//!
//! A list rather than a map: documents are written back out, and attributes
//! must come out in the order they went in.

/// A single name/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, ASCII-lowercased by the parser.
    pub name: String,
    /// Attribute value as written in the source.
    pub value: String,
}

/// Ordered attribute list with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<Attribute>,
}

impl Attributes {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Value of the named attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Whether the named attribute is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|a| a.name == name)
    }

    /// Sets an attribute. An existing attribute keeps its position; a new one
    /// is appended.
    pub fn set(&mut self, name: &str, value: &str) {
        if let Some(existing) = self.entries.iter_mut().find(|a| a.name == name) {
            value.clone_into(&mut existing.value);
        } else {
            self.entries.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    }

    /// Adds an attribute only if no attribute of that name exists yet.
    ///
    /// Returns false if it was a duplicate. Duplicate attributes in markup
    /// are ignored after the first.
    pub fn insert_if_missing(&mut self, name: &str, value: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.set(name, value);
        true
    }

    /// Removes the named attribute, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|a| a.name == name)?;
        Some(self.entries.remove(index).value)
    }

    /// Iterate in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.iter()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            let name = name.into();
            let value = value.into();
            let _ = attrs.insert_if_missing(&name, &value);
        }
        attrs
    }
}
