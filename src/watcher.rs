use std::path::{Path, PathBuf};

use log::warn;
use notify::{Config, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelEvent {
    Changed(PathBuf),
}

pub struct LabelWatcher {
    watcher: notify::RecommendedWatcher,
}

impl LabelWatcher {
    pub fn new(tx: mpsc::Sender<LabelEvent>) -> Result<Self> {
        let (sync_tx, sync_rx) = std::sync::mpsc::channel::<notify::Result<notify::Event>>();

        let watcher = notify::RecommendedWatcher::new(sync_tx, Config::default())?;

        // Bridge from the notify thread to the async side.
        std::thread::spawn(move || {
            while let Ok(res) = sync_rx.recv() {
                match res {
                    Ok(event) => {
                        if !(event.kind.is_modify() || event.kind.is_create()) {
                            continue;
                        }
                        for path in event.paths {
                            if tx.blocking_send(LabelEvent::Changed(path)).is_err() {
                                return;
                            }
                        }
                    }
                    Err(e) => warn!("label watch error: {:?}", e),
                }
            }
        });

        Ok(Self { watcher })
    }

    pub fn watch(&mut self, path: &Path) -> Result<()> {
        self.watcher.watch(path, RecursiveMode::NonRecursive)?;
        Ok(())
    }
}
