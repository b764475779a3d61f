//! In-memory list of one scope's entities, kept in display order

use shared::Ordered;
use shared::ordering::{is_contiguous, renumber, sort_by_position};

/// Display-ordered cache whose positions always equal indices
#[derive(Debug, Clone)]
pub struct OrderedCache<T: Ordered> {
    items: Vec<T>,
}

impl<T: Ordered> Default for OrderedCache<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Ordered> OrderedCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with a server listing
    pub fn replace_all(&mut self, mut items: Vec<T>) {
        sort_by_position(&mut items);
        if !is_contiguous(&items) {
            tracing::debug!(len = items.len(), "Listing positions not contiguous, renumbering");
            renumber(&mut items);
        }
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Insert a newly created entity.
    ///
    /// Appended unless its position lands inside the list, in which case
    /// the followers shift down by one like they do on the server.
    pub fn insert(&mut self, entity: T) {
        let at = (entity.position() as usize).min(self.items.len());
        self.items.insert(at, entity);
        renumber(&mut self.items);
    }

    /// Remove an entity.
    ///
    /// Followers keep their positions; the server compacts them and the
    /// next listing or move renumbers locally.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.index_of(id)?;
        Some(self.items.remove(index))
    }

    /// Swap in a fresh copy of an entity, keeping its local position.
    ///
    /// Returns `false` when the id is not cached.
    pub fn replace(&mut self, mut entity: T) -> bool {
        match self.index_of(entity.id()) {
            Some(index) => {
                entity.set_position(index as u32);
                self.items[index] = entity;
                true
            }
            None => false,
        }
    }

    /// Move the item at `from` to index `to` and renumber.
    ///
    /// Both indices must be in bounds.
    pub fn move_item(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        renumber(&mut self.items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl<T: Ordered> OrderedCache<T> {
        fn from_items(items: Vec<T>) -> Self {
            let mut cache = Self::new();
            cache.replace_all(items);
            cache
        }

        fn ids(&self) -> Vec<String> {
            self.items.iter().map(|item| item.id().to_string()).collect()
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        title: String,
        position: u32,
    }

    impl Ordered for Row {
        fn id(&self) -> &str {
            &self.id
        }
        fn parent_id(&self) -> &str {
            "parent"
        }
        fn position(&self) -> u32 {
            self.position
        }
        fn set_position(&mut self, position: u32) {
            self.position = position;
        }
    }

    fn row(id: &str, position: u32) -> Row {
        Row {
            id: id.into(),
            title: id.to_uppercase(),
            position,
        }
    }

    fn cache(ids: &[&str]) -> OrderedCache<Row> {
        OrderedCache::from_items(
            ids.iter()
                .enumerate()
                .map(|(i, id)| row(id, i as u32))
                .collect(),
        )
    }

    fn positions(cache: &OrderedCache<Row>) -> Vec<u32> {
        cache.items().iter().map(|r| r.position).collect()
    }

    #[test]
    fn listing_is_sorted_and_renumbered() {
        let cache = OrderedCache::from_items(vec![row("c", 7), row("a", 1), row("b", 4)]);
        assert_eq!(cache.ids(), ["a", "b", "c"]);
        assert_eq!(positions(&cache), [0, 1, 2]);
    }

    #[test]
    fn move_down_and_up() {
        let mut c = cache(&["a", "b", "c", "d", "e"]);
        c.move_item(1, 3);
        assert_eq!(c.ids(), ["a", "c", "d", "b", "e"]);
        assert_eq!(positions(&c), [0, 1, 2, 3, 4]);

        let mut c = cache(&["a", "b", "c", "d"]);
        c.move_item(3, 0);
        assert_eq!(c.ids(), ["d", "a", "b", "c"]);
        assert_eq!(positions(&c), [0, 1, 2, 3]);
    }

    #[test]
    fn insert_appends_or_shifts() {
        let mut c = cache(&["a", "b"]);
        c.insert(row("z", 2));
        assert_eq!(c.ids(), ["a", "b", "z"]);

        c.insert(row("y", 0));
        assert_eq!(c.ids(), ["y", "a", "b", "z"]);
        assert_eq!(positions(&c), [0, 1, 2, 3]);

        c.insert(row("x", 99));
        assert_eq!(c.ids().last().map(String::as_str), Some("x"));
    }

    #[test]
    fn remove_leaves_positions_to_the_server() {
        let mut c = cache(&["a", "b", "c"]);
        assert_eq!(c.remove("b").map(|r| r.id), Some("b".to_string()));
        assert_eq!(c.ids(), ["a", "c"]);
        assert_eq!(positions(&c), [0, 2]);

        c.move_item(1, 0);
        assert_eq!(c.ids(), ["c", "a"]);
        assert_eq!(positions(&c), [0, 1]);
        assert!(c.remove("missing").is_none());
    }

    #[test]
    fn replace_keeps_local_position() {
        let mut c = cache(&["a", "b", "c"]);
        let mut fresh = row("b", 9);
        fresh.title = "renamed".into();
        assert!(c.replace(fresh));
        let b = c.get("b").unwrap();
        assert_eq!(b.title, "renamed");
        assert_eq!(b.position, 1);
        assert!(!c.replace(row("nope", 0)));
    }
}
