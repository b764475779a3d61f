//! Position-ranked entities
//!
//! Modules are ranked within a course and lessons within a module. Within
//! one parent the server keeps positions contiguous (`0..n-1`) and unique,
//! ascending with display order.

use serde::{Deserialize, Serialize};

/// An entity with a stable id and an integer rank inside its parent scope
pub trait Ordered: Clone + Send + Sync + 'static {
    /// Server-assigned id, stable for the entity's lifetime
    fn id(&self) -> &str;

    /// Id of the enclosing scope (course for a module, module for a lesson)
    fn parent_id(&self) -> &str;

    fn position(&self) -> u32;

    fn set_position(&mut self, position: u32);
}

/// Body of the `PATCH .../{id}/reorder` endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRequest {
    /// Zero-based target position inside the parent scope
    pub position: u32,
}

/// Sort a freshly fetched list into display order.
///
/// Ties keep server order.
pub fn sort_by_position<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| item.position());
}

/// Rewrite positions so they match indices (`0..n-1`)
pub fn renumber<T: Ordered>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_position(index as u32);
    }
}

/// Whether positions already equal indices
pub fn is_contiguous<T: Ordered>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(index, item)| item.position() == index as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: &'static str,
        position: u32,
    }

    impl Ordered for Row {
        fn id(&self) -> &str {
            self.id
        }
        fn parent_id(&self) -> &str {
            "p"
        }
        fn position(&self) -> u32 {
            self.position
        }
        fn set_position(&mut self, position: u32) {
            self.position = position;
        }
    }

    #[test]
    fn sort_then_renumber_closes_gaps() {
        let mut rows = vec![
            Row { id: "c", position: 7 },
            Row { id: "a", position: 0 },
            Row { id: "b", position: 3 },
        ];
        sort_by_position(&mut rows);
        assert!(!is_contiguous(&rows));
        renumber(&mut rows);
        assert!(is_contiguous(&rows));
        let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
