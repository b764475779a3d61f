//! Client-side ordered collections
//!
//! An [`OrderedStore`] holds the cached children of one parent scope
//! (the modules of a course, the lessons of a module) and keeps them in
//! step with the server while the user creates, edits, deletes and
//! drags items around.

mod cache;
mod collection;
mod ordered;
mod sequence;

pub use cache::OrderedCache;
pub use collection::ScopedCollection;
pub use ordered::{
    LessonStore, ModuleStore, OrderedStore, ReorderError, ReorderOutcome, ReorderValidation,
    StoreStatus,
};
pub use sequence::{RequestKind, ScopeSequencer, SequenceToken};
