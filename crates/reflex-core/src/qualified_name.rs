use std::fmt;

use crate::EntityId;

/// Separator between the segments of a qualified name.
pub const SCOPE_SEPARATOR: &str = "::";

/// Lexical path of an entity: its simple name plus the names of every
/// enclosing namespace or struct, outermost first.
///
/// # Examples
///
/// ```
/// use reflex_core::QualifiedName;
///
/// let player = QualifiedName::global("Player");
/// assert_eq!(player.to_string(), "Player");
///
/// let health = QualifiedName::new("health", vec!["game".into(), "Player".into()]);
/// assert_eq!(health.to_string(), "game::Player::health");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Simple name (e.g., "Player", "update")
    pub name: String,
    /// Enclosing scopes, outermost first. Empty at the database root.
    pub scope: Vec<String>,
}

impl QualifiedName {
    /// Create a new qualified name inside a scope.
    pub fn new(name: impl Into<String>, scope: Vec<String>) -> Self {
        Self {
            name: name.into(),
            scope,
        }
    }

    /// Create a qualified name at the database root.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: Vec::new(),
        }
    }

    /// Create from a qualified string (e.g., "game::Player").
    ///
    /// Leading "::" is normalized away: "::game::Player" == "game::Player".
    pub fn from_qualified_string(s: &str) -> Self {
        let mut parts: Vec<String> = s
            .split(SCOPE_SEPARATOR)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        match parts.pop() {
            Some(name) => Self { name, scope: parts },
            None => Self::global(""),
        }
    }

    /// Check if this name lives at the database root.
    pub fn is_global(&self) -> bool {
        self.scope.is_empty()
    }

    /// Iterate every segment, scopes first and the simple name last.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.scope
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
    }

    /// Create a child name within this one.
    ///
    /// Example: `game::Player` + `health` = `game::Player::health`
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut scope = self.scope.clone();
        scope.push(self.name.clone());
        Self {
            name: name.into(),
            scope,
        }
    }

    /// Get the enclosing scope as a QualifiedName (if any).
    pub fn parent(&self) -> Option<Self> {
        let (name, scope) = self.scope.split_last()?;
        Some(Self {
            name: name.clone(),
            scope: scope.to_vec(),
        })
    }

    /// Compute the entity id for this name.
    pub fn to_entity_id(&self) -> EntityId {
        EntityId::from_name(&self.to_string())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for scope in &self.scope {
            write!(f, "{}{}", scope, SCOPE_SEPARATOR)?;
        }
        write!(f, "{}", self.name)
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_qualified_string(s)
    }
}
