//! Shared transcript store with generation-guarded slot resolution.

use super::model::{Answer, Exchange};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A reservation for one transcript position, captured at append time.
///
/// The generation ties the slot to the transcript contents it was issued
/// against: a `clear` (or a bulk `install`) bumps the generation, so a slot
/// issued beforehand can never write into a transcript the user has already
/// replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    index: usize,
    generation: u64,
}

impl Slot {
    /// The position this slot targets.
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Default)]
struct TranscriptInner {
    entries: Vec<Exchange>,
    generation: u64,
}

/// The ordered sequence of exchanges for one session.
///
/// `TranscriptStore` is cheap to clone and safe to share across concurrently
/// resolving submissions: every mutation runs to completion under the lock,
/// so appends, resolutions, and clears never interleave partially.
///
/// Exchanges are identified by position. `append` reserves a slot
/// synchronously so the pending placeholder renders immediately; the matching
/// `resolve` lands in that same slot regardless of how answers are ordered in
/// time.
#[derive(Debug, Clone, Default)]
pub struct TranscriptStore {
    inner: Arc<RwLock<TranscriptInner>>,
}

impl TranscriptStore {
    /// Creates an empty transcript store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pending exchange and returns the reserved slot.
    ///
    /// The returned index equals the transcript length immediately before the
    /// append. This is a pure local mutation and always succeeds.
    pub async fn append(&self, question: impl Into<String>, document: Option<String>) -> Slot {
        let mut inner = self.inner.write().await;
        let slot = Slot {
            index: inner.entries.len(),
            generation: inner.generation,
        };
        inner.entries.push(Exchange::pending(question, document));
        slot
    }

    /// Writes the answer into the slot's position.
    ///
    /// A slot issued before the last `clear` or `install` is silently
    /// discarded: from the user's perspective the transcript it belonged to
    /// no longer exists. Resolving the same slot twice overwrites (last
    /// write wins).
    pub async fn resolve(&self, slot: Slot, answer: impl Into<String>) {
        let mut inner = self.inner.write().await;
        if slot.generation != inner.generation {
            tracing::debug!(
                "[Transcript] Discarding stale resolution for slot {} (generation {} != {})",
                slot.index,
                slot.generation,
                inner.generation
            );
            return;
        }
        if let Some(exchange) = inner.entries.get_mut(slot.index) {
            exchange.answer = Answer::Resolved(answer.into());
        }
    }

    /// Empties the transcript and invalidates all outstanding slots.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.entries.clear();
        inner.generation += 1;
    }

    /// Replaces the transcript contents, used when hydrating history.
    ///
    /// Entries must already be in display order (oldest first). Outstanding
    /// slots are invalidated, same as `clear`.
    pub async fn install(&self, entries: Vec<Exchange>) {
        let mut inner = self.inner.write().await;
        inner.entries = entries;
        inner.generation += 1;
    }

    /// Returns a copy of the current exchanges in display order.
    pub async fn snapshot(&self) -> Vec<Exchange> {
        self.inner.read().await.entries.clone()
    }

    /// Number of exchanges in the transcript.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    /// True when the transcript holds no exchanges.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_returns_insertion_rank() {
        let store = TranscriptStore::new();

        for expected in 0..5 {
            let slot = store.append(format!("Q{expected}"), None).await;
            assert_eq!(slot.index(), expected);
        }

        assert_eq!(store.len().await, 5);
        let entries = store.snapshot().await;
        for (i, exchange) in entries.iter().enumerate() {
            assert_eq!(exchange.question, format!("Q{i}"));
            assert!(exchange.answer.is_pending());
        }
    }

    #[tokio::test]
    async fn test_resolve_targets_own_slot() {
        let store = TranscriptStore::new();
        let first = store.append("Q1", None).await;
        let second = store.append("Q2", None).await;

        // Answers arrive out of order; pairing must stay positional.
        store.resolve(second, "A2").await;
        store.resolve(first, "A1").await;

        let entries = store.snapshot().await;
        assert_eq!(entries[0].answer.text(), Some("A1"));
        assert_eq!(entries[1].answer.text(), Some("A2"));
    }

    #[tokio::test]
    async fn test_repeat_resolve_last_write_wins() {
        let store = TranscriptStore::new();
        let slot = store.append("Q", None).await;

        store.resolve(slot, "first").await;
        store.resolve(slot, "second").await;
        store.resolve(slot, "third").await;

        let entries = store.snapshot().await;
        assert_eq!(entries[0].answer.text(), Some("third"));
    }

    #[tokio::test]
    async fn test_clear_discards_stale_resolution() {
        let store = TranscriptStore::new();
        let stale = store.append("old question", None).await;

        store.clear().await;
        store.resolve(stale, "late answer").await;

        assert!(store.is_empty().await);

        // A slot from before the clear must never land in a new transcript,
        // even when the index exists again.
        let fresh = store.append("new question", None).await;
        store.resolve(stale, "late answer").await;
        let entries = store.snapshot().await;
        assert!(entries[0].answer.is_pending());

        store.resolve(fresh, "fresh answer").await;
        let entries = store.snapshot().await;
        assert_eq!(entries[0].answer.text(), Some("fresh answer"));
    }

    #[tokio::test]
    async fn test_install_replaces_contents_and_invalidates_slots() {
        let store = TranscriptStore::new();
        let stale = store.append("pre-hydration", None).await;

        store
            .install(vec![
                Exchange::resolved("Q1", "A1", None, "2024-01-01T00:00:00Z"),
                Exchange::resolved("Q2", "A2", None, "2024-01-02T00:00:00Z"),
            ])
            .await;

        store.resolve(stale, "late").await;

        let entries = store.snapshot().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].answer.text(), Some("A1"));
        assert_eq!(entries[1].answer.text(), Some("A2"));
    }
}
