use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::foundation::core::PAGE_WIDTH_PX;
use crate::foundation::error::{VitaeError, VitaeResult};
use crate::template::layout::Layout;

/// Off-surface container export clones are attached to.
///
/// The interactive preview is never touched: export works on an [`OffscreenTarget`] that owns
/// its own copy of the layout at full page width, and detaches itself when dropped.
#[derive(Debug, Default)]
pub struct Stage {
    attached: Mutex<Vec<u64>>,
    next_id: AtomicU64,
}

impl Stage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of export clones currently attached.
    pub fn attached_count(&self) -> usize {
        self.attached.lock().map(|a| a.len()).unwrap_or(0)
    }

    /// Clone `layout` onto the stage at the fixed page width.
    pub fn attach(self: &Arc<Self>, layout: &Layout) -> VitaeResult<OffscreenTarget> {
        if layout.width_px != PAGE_WIDTH_PX {
            return Err(VitaeError::export(format!(
                "layout width {}px does not match page width {PAGE_WIDTH_PX}px",
                layout.width_px
            )));
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.attached
            .lock()
            .map_err(|_| VitaeError::export("offscreen stage lock poisoned"))?
            .push(id);
        tracing::debug!(id, "offscreen target attached");
        Ok(OffscreenTarget {
            stage: Arc::clone(self),
            id,
            layout: layout.clone(),
        })
    }

    fn detach(&self, id: u64) {
        // A poisoned lock still holds valid ids; recover it so the clone is always removed.
        let mut attached = match self.attached.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        attached.retain(|&a| a != id);
        tracing::debug!(id, "offscreen target detached");
    }
}

/// Scoped export clone. Detaches from its [`Stage`] on drop, on every exit path.
#[derive(Debug)]
pub struct OffscreenTarget {
    stage: Arc<Stage>,
    id: u64,
    layout: Layout,
}

impl OffscreenTarget {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}

impl Drop for OffscreenTarget {
    fn drop(&mut self) {
        self.stage.detach(self.id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/offscreen.rs"]
mod tests;
