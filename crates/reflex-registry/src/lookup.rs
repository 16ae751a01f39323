//! The uniform predicate/visitor protocol shared by every container.
//!
//! Callbacks are optional closures returning `Result<bool, E>`:
//!
//! - `Ok(true)` accepts the entry (predicates) or continues the walk (visitors)
//! - `Ok(false)` rejects the entry or stops the walk
//! - `Err(e)` aborts immediately and is returned to the caller unchanged
//!
//! An absent callback (`None`) is not an error: searches find nothing and
//! walks report that they did not complete. Context that a C-style API would
//! pass as an opaque pointer is simply captured by the closure.

/// First item accepted by `predicate`.
pub fn find_first<T, E, F>(items: impl IntoIterator<Item = T>, predicate: Option<F>) -> Result<Option<T>, E>
where
    T: Copy,
    F: FnMut(T) -> Result<bool, E>,
{
    let Some(mut predicate) = predicate else {
        return Ok(None);
    };
    for item in items {
        if predicate(item)? {
            return Ok(Some(item));
        }
    }
    Ok(None)
}

/// Every item accepted by `predicate`, in container order.
///
/// A fault discards whatever was collected before it.
pub fn find_all<T, E, F>(items: impl IntoIterator<Item = T>, predicate: Option<F>) -> Result<Vec<T>, E>
where
    T: Copy,
    F: FnMut(T) -> Result<bool, E>,
{
    let Some(mut predicate) = predicate else {
        return Ok(Vec::new());
    };
    let mut found = Vec::new();
    for item in items {
        if predicate(item)? {
            found.push(item);
        }
    }
    Ok(found)
}

/// Visit items in container order until the visitor returns `false`.
///
/// Returns `Ok(true)` only when every item was visited.
pub fn visit_all<T, E, F>(items: impl IntoIterator<Item = T>, visitor: Option<F>) -> Result<bool, E>
where
    F: FnMut(T) -> Result<bool, E>,
{
    let Some(mut visitor) = visitor else {
        return Ok(false);
    };
    for item in items {
        if !visitor(item)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Generate `get_<x>_by_predicate`, `get_<x>s_by_predicate` and
/// `foreach_<x>` over a by-value iterator method of the view type.
macro_rules! predicate_lookups {
    ($what:literal, $item:ty, $iter:ident, $first:ident, $all:ident, $each:ident) => {
        #[doc = concat!("First ", $what, " accepted by `predicate`. `None` finds nothing.")]
        pub fn $first<F, E>(&self, predicate: Option<F>) -> Result<Option<$item>, E>
        where
            F: FnMut($item) -> Result<bool, E>,
        {
            $crate::lookup::find_first(self.$iter(), predicate)
        }

        #[doc = concat!("Every ", $what, " accepted by `predicate`, in container order.")]
        pub fn $all<F, E>(&self, predicate: Option<F>) -> Result<Vec<$item>, E>
        where
            F: FnMut($item) -> Result<bool, E>,
        {
            $crate::lookup::find_all(self.$iter(), predicate)
        }

        #[doc = concat!("Visit every ", $what, "; `Ok(true)` when the walk completed.")]
        pub fn $each<F, E>(&self, visitor: Option<F>) -> Result<bool, E>
        where
            F: FnMut($item) -> Result<bool, E>,
        {
            $crate::lookup::visit_all(self.$iter(), visitor)
        }
    };
}

pub(crate) use predicate_lookups;

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    type Pred = fn(u32) -> Result<bool, Infallible>;

    #[test]
    fn absent_callbacks() {
        assert_eq!(find_first([1u32, 2], None::<Pred>), Ok(None));
        assert_eq!(find_all([1u32, 2], None::<Pred>), Ok(vec![]));
        assert_eq!(visit_all([1u32, 2], None::<Pred>), Ok(false));
    }

    #[test]
    fn predicate_selects() {
        let even = |n: u32| Ok::<_, Infallible>(n % 2 == 0);
        assert_eq!(find_first([1u32, 2, 4], Some(even)), Ok(Some(2)));
        assert_eq!(find_all([1u32, 2, 4], Some(even)), Ok(vec![2, 4]));
        assert_eq!(find_first([1u32, 3], Some(even)), Ok(None));
    }

    #[test]
    fn fault_propagates_and_stops() {
        let mut calls = 0;
        let result = find_all([1u32, 2, 3], Some(|n: u32| {
            calls += 1;
            if n == 2 { Err("boom") } else { Ok(true) }
        }));
        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 2);
    }

    #[test]
    fn visitor_stops_early() {
        let mut calls = 0;
        let completed = visit_all([1u32, 2, 3], Some(|_| {
            calls += 1;
            Ok::<_, Infallible>(false)
        }));
        assert_eq!(completed, Ok(false));
        assert_eq!(calls, 1);

        let mut calls = 0;
        let completed = visit_all([1u32, 2, 3], Some(|_| {
            calls += 1;
            Ok::<_, Infallible>(true)
        }));
        assert_eq!(completed, Ok(true));
        assert_eq!(calls, 3);
    }
}
