//! Per-scope request sequencing
//!
//! Every list fetch and reorder against a scope takes a token. Only the
//! response carrying the latest token may touch the cache; anything older
//! was superseded while it was in flight.

/// Monotonic token handed to an in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceToken(u64);

impl SequenceToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// What the holder of a token is doing with the scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Full listing (open, refresh, resync)
    Fetch,
    Reorder,
}

#[derive(Debug, Default)]
pub struct ScopeSequencer {
    latest: u64,
    latest_kind: Option<RequestKind>,
}

impl ScopeSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token newer than every token issued before
    pub fn issue(&mut self, kind: RequestKind) -> SequenceToken {
        self.latest += 1;
        self.latest_kind = Some(kind);
        SequenceToken(self.latest)
    }

    pub fn is_current(&self, token: SequenceToken) -> bool {
        token.0 == self.latest
    }

    /// Kind of the request holding the newest token
    pub fn latest_kind(&self) -> Option<RequestKind> {
        self.latest_kind
    }
}
