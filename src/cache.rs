use std::ops::Range;

use tracing::trace;

use crate::errors::LayoutResult;
use crate::layout::LayoutEngine;
use crate::model::{Align, Row, WrapMode};

/// Per-line layout cache for an editing surface that lays out one logical
/// line at a time.
///
/// Entries are indexed by line number and only reused when the line content,
/// width and wrap mode all match. The owner keeps the indices in step with
/// its buffer through `on_lines_inserted` / `on_lines_deleted`.
#[derive(Debug, Default)]
pub struct LineCache {
    engine: LayoutEngine,
    entries: Vec<Option<CachedLine>>,
    /// Bumped by `invalidate_all`, entries from older generations are stale.
    generation: u64,
    stats: CacheStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Clone)]
struct CachedLine {
    content: String,
    width: usize,
    wrap: WrapMode,
    generation: u64,
    rows: Vec<Row>,
}

impl LineCache {
    pub fn new(engine: LayoutEngine) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// Number of line slots tracked, cached or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn is_cached(&self, index: usize) -> bool {
        matches!(self.entries.get(index), Some(Some(entry)) if entry.generation == self.generation)
    }

    /// Rows for line `index`, computed on a miss.
    pub fn layout_line(
        &mut self,
        index: usize,
        line: &str,
        width: usize,
        wrap: WrapMode,
    ) -> LayoutResult<&[Row]> {
        if index >= self.entries.len() {
            self.entries.resize_with(index + 1, || None);
        }

        let generation = self.generation;
        let fresh = self.entries[index].as_ref().is_some_and(|entry| {
            entry.generation == generation
                && entry.width == width
                && entry.wrap == wrap
                && entry.content == line
        });

        if fresh {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            trace!(index, width, %wrap, "line layout cache miss");
            let rows = self.engine.layout(line, width, Align::Left, wrap)?;
            self.entries[index] = Some(CachedLine {
                content: line.to_string(),
                width,
                wrap,
                generation,
                rows,
            });
        }

        Ok(self.entries[index]
            .as_ref()
            .map(|entry| entry.rows.as_slice())
            .unwrap_or_default())
    }

    pub fn invalidate(&mut self, index: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            *entry = None;
        }
    }

    pub fn invalidate_range(&mut self, range: Range<usize>) {
        let end = range.end.min(self.entries.len());
        for index in range.start..end {
            self.entries[index] = None;
        }
    }

    /// Drops every entry at once without touching the table.
    pub fn invalidate_all(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// `count` new lines now start at `at`; later entries shift down.
    pub fn on_lines_inserted(&mut self, at: usize, count: usize) {
        if count == 0 {
            return;
        }
        if at <= self.entries.len() {
            self.entries
                .splice(at..at, std::iter::repeat_with(|| None).take(count));
        } else {
            self.entries.resize_with(at + count, || None);
        }
    }

    /// Lines `at..at + count` are gone; later entries shift up.
    pub fn on_lines_deleted(&mut self, at: usize, count: usize) {
        if count == 0 || at >= self.entries.len() {
            return;
        }
        let end = (at + count).min(self.entries.len());
        self.entries.drain(at..end);
    }
}
