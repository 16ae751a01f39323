//! Property annotations attached to entities.
//!
//! Properties are uninterpreted tags produced by the source scanner:
//!
//! - **Simple** properties are bare names (`Serializable`).
//! - **Complex** properties carry an ordered list of sub-properties
//!   (`Range(0, 100)`).
//!
//! The store only grows. There is no removal API.

/// A parameterized property: a tag name plus its ordered sub-properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComplexProperty {
    /// Tag name.
    pub name: String,
    /// Sub-properties in declaration order.
    pub sub_properties: Vec<String>,
}

impl ComplexProperty {
    /// Create a new complex property.
    pub fn new<I, S>(name: impl Into<String>, sub_properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            sub_properties: sub_properties.into_iter().map(Into::into).collect(),
        }
    }
}

/// The property set of one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    simple: Vec<String>,
    complex: Vec<ComplexProperty>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a simple tag. Attaching the same tag twice keeps one occurrence.
    ///
    /// Returns `true` if the tag was not present before.
    pub fn add_simple(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.has_simple(&name) {
            return false;
        }
        self.simple.push(name);
        true
    }

    /// Attach a complex tag. Re-attaching a tag name appends another entry.
    pub fn add_complex(&mut self, property: ComplexProperty) {
        self.complex.push(property);
    }

    /// Check if a simple tag is present.
    pub fn has_simple(&self, name: &str) -> bool {
        self.simple.iter().any(|p| p == name)
    }

    /// Check if at least one complex entry uses this tag name.
    pub fn has_complex(&self, name: &str) -> bool {
        self.complex.iter().any(|p| p.name == name)
    }

    /// Every complex entry registered under `name`, in attachment order.
    pub fn complex<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ComplexProperty> + 'a {
        self.complex.iter().filter(move |p| p.name == name)
    }

    /// All simple tags in attachment order.
    pub fn simple_properties(&self) -> &[String] {
        &self.simple
    }

    /// All complex entries in attachment order.
    pub fn complex_properties(&self) -> &[ComplexProperty] {
        &self.complex
    }

    pub fn simple_count(&self) -> usize {
        self.simple.len()
    }

    pub fn complex_count(&self) -> usize {
        self.complex.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simple.is_empty() && self.complex.is_empty()
    }

    /// Copy another property set into this one.
    ///
    /// This is a snapshot: later additions to `other` are not seen here.
    /// Complex entries already present verbatim are not duplicated, so a type
    /// that reaches the same ancestor twice does not accumulate copies.
    pub fn inherit_from(&mut self, other: &Properties) {
        for name in &other.simple {
            self.add_simple(name.clone());
        }
        for property in &other.complex {
            if !self.complex.contains(property) {
                self.complex.push(property.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_is_idempotent() {
        let mut props = Properties::new();
        assert!(props.add_simple("Serializable"));
        assert!(!props.add_simple("Serializable"));
        assert_eq!(props.simple_count(), 1);
        assert!(props.has_simple("Serializable"));
        assert!(!props.has_simple("Hidden"));
    }

    #[test]
    fn complex_is_additive() {
        let mut props = Properties::new();
        props.add_complex(ComplexProperty::new("Range", ["0", "10"]));
        props.add_complex(ComplexProperty::new("Range", ["5", "20"]));
        props.add_complex(ComplexProperty::new("Tooltip", ["hp"]));

        let ranges: Vec<_> = props.complex("Range").collect();
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].sub_properties, vec!["0", "10"]);
        assert_eq!(ranges[1].sub_properties, vec!["5", "20"]);
        assert_eq!(props.complex_count(), 3);
        assert!(props.has_complex("Tooltip"));
    }

    #[test]
    fn inherit_is_a_snapshot() {
        let mut parent = Properties::new();
        parent.add_simple("P1");
        parent.add_complex(ComplexProperty::new("C", ["x"]));

        let mut child = Properties::new();
        child.add_simple("Own");
        child.inherit_from(&parent);

        parent.add_simple("P2");

        assert!(child.has_simple("P1"));
        assert!(child.has_simple("Own"));
        assert!(!child.has_simple("P2"));
        assert_eq!(child.complex("C").count(), 1);
    }

    #[test]
    fn inherit_twice_does_not_duplicate() {
        let mut parent = Properties::new();
        parent.add_simple("P");
        parent.add_complex(ComplexProperty::new("C", ["x"]));

        let mut child = Properties::new();
        child.inherit_from(&parent);
        child.inherit_from(&parent);

        assert_eq!(child.simple_count(), 1);
        assert_eq!(child.complex_count(), 1);
    }

    #[test]
    fn empty_by_default() {
        assert!(Properties::new().is_empty());
    }
}
