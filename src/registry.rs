use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{info, warn};
use parking_lot::RwLock;

use crate::autocomplete::PrefixIndex;
use crate::catalog::LabelSet;
use crate::error::Result;
use crate::perf::PerfTimer;

/// The live autocomplete index.
///
/// A published index is never mutated. Rebuilds construct a fresh
/// [`PrefixIndex`] and swap the pointer, so a reader holding a snapshot keeps
/// a consistent view while the swap happens.
pub struct SharedIndex {
    current: RwLock<Arc<PrefixIndex>>,
    generation: AtomicU64,
}

impl SharedIndex {
    pub fn new(index: PrefixIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
            generation: AtomicU64::new(0),
        }
    }

    pub fn from_labels(labels: &LabelSet) -> Self {
        Self::new(build(labels))
    }

    pub fn snapshot(&self) -> Arc<PrefixIndex> {
        Arc::clone(&*self.current.read())
    }

    pub fn search(&self, prefix: &str) -> Vec<String> {
        self.snapshot().search(prefix)
    }

    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.snapshot().suggest(prefix, limit)
    }

    pub fn replace(&self, index: PrefixIndex) {
        let old = std::mem::replace(&mut *self.current.write(), Arc::new(index));
        self.generation.fetch_add(1, Ordering::AcqRel);
        // Last reference may be ours; drop it outside the lock.
        drop(old);
    }

    pub fn rebuild(&self, labels: &LabelSet) {
        self.replace(build(labels));
    }

    /// Rebuilds from a label file. On error the current index stays live.
    pub fn reload_from_file(&self, path: &Path) -> Result<usize> {
        let labels = match LabelSet::load(path) {
            Ok(labels) => labels,
            Err(e) => {
                warn!("keeping previous index, reload of {} failed: {}", path.display(), e);
                return Err(e);
            }
        };
        self.rebuild(&labels);
        info!(
            "reloaded {} labels from {} (generation {})",
            labels.len(),
            path.display(),
            self.generation()
        );
        Ok(labels.len())
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

fn build(labels: &LabelSet) -> PrefixIndex {
    let timer = PerfTimer::start("index build");
    let index = PrefixIndex::from_labels(labels);
    timer.stop();
    index
}
