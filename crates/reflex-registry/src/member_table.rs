//! Insertion-ordered storage with a by-name index.
//!
//! Every registry in the database (fields, methods, nested archetypes,
//! namespace contents, enum values) is a [`MemberTable`]. Entries keep their
//! registration order for iteration; the name index maps each name to the
//! positions of every entry carrying it, so overload sets are preserved.

use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub(crate) struct MemberTable<T> {
    items: Vec<T>,
    by_name: FxHashMap<String, Vec<usize>>,
}

impl<T> Default for MemberTable<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }
}

impl<T> MemberTable<T> {
    /// Append an entry under `name`, returning its position.
    pub fn insert(&mut self, name: &str, item: T) -> usize {
        let pos = self.items.len();
        self.items.push(item);
        self.by_name.entry(name.to_string()).or_default().push(pos);
        pos
    }

    pub fn get(&self, pos: usize) -> Option<&T> {
        self.items.get(pos)
    }

    pub fn get_mut(&mut self, pos: usize) -> Option<&mut T> {
        self.items.get_mut(pos)
    }

    /// Positions of every entry named `name`, in registration order.
    pub fn positions(&self, name: &str) -> &[usize] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every entry named `name`, in registration order.
    pub fn named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a T> + use<'a, T> {
        let items = &self.items;
        self.positions(name).iter().filter_map(move |&pos| items.get(pos))
    }

    /// First entry named `name`.
    pub fn first(&self, name: &str) -> Option<&T> {
        self.named(name).next()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
        self.by_name.reserve(additional);
    }
}
