//! Ordered command log and the synchronous submit path
//!
//! Submissions are serialized: the submit gate is held from ID allocation
//! until the entry has its final status, so IDs are strictly increasing and
//! two submissions never interleave. The log itself sits behind a separate
//! read/write lock that is only held for the append and for the final
//! update, which lets [`CommandQueue::list`] run while a desktop action is
//! still executing and observe the entry as `pending`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::executor::ActionExecutor;
use crate::parser;
use crate::platforms::DesktopEngine;
use crate::types::{CommandEntry, CommandSource, Outcome};
use crate::CommandError;

pub struct CommandQueue {
    executor: ActionExecutor,
    /// Next ID to hand out. Doubles as the submit gate.
    next_id: Mutex<u64>,
    log: RwLock<VecDeque<CommandEntry>>,
    max_entries: usize,
}

impl CommandQueue {
    pub fn new(executor: ActionExecutor, max_entries: usize) -> Self {
        Self {
            executor,
            next_id: Mutex::new(1),
            log: RwLock::new(VecDeque::new()),
            max_entries: max_entries.max(1),
        }
    }

    /// Build a queue around the engine using the configured directories and
    /// retention.
    pub fn from_config(config: &Config, engine: Arc<dyn DesktopEngine>) -> Self {
        let executor = ActionExecutor::new(
            engine,
            config.resolved_base_dir(),
            config.resolved_home_dir(),
        );
        Self::new(executor, config.max_log_entries)
    }

    /// Record, parse and execute a command, returning the finished entry.
    ///
    /// Blank text is rejected before an ID is allocated, so valid
    /// submissions always receive consecutive IDs.
    #[instrument(skip(self, text, source), fields(source = %source))]
    pub fn submit(&self, text: &str, source: CommandSource) -> Result<CommandEntry, CommandError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CommandError::Validation(
                "command text is required".to_string(),
            ));
        }

        let mut next_id = self.next_id.lock().unwrap_or_else(PoisonError::into_inner);
        let id = *next_id;
        *next_id += 1;

        let mut entry = CommandEntry::pending(id, text, source);
        self.append(entry.clone());

        let action = parser::parse(text);
        info!(id, kind = action.kind(), "executing command");
        let outcome = self.executor.execute(&action);

        entry.complete(outcome.clone());
        self.finish(id, outcome);
        info!(id, status = ?entry.status, "command finished");

        Ok(entry)
    }

    /// Snapshot of the retained entries, oldest first.
    pub fn list(&self) -> Vec<CommandEntry> {
        let log = self.log.read().unwrap_or_else(PoisonError::into_inner);
        log.iter().cloned().collect()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.log.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    fn append(&self, entry: CommandEntry) {
        let mut log = self.log.write().unwrap_or_else(PoisonError::into_inner);
        log.push_back(entry);
        while log.len() > self.max_entries {
            log.pop_front();
        }
    }

    fn finish(&self, id: u64, outcome: Outcome) {
        let mut log = self.log.write().unwrap_or_else(PoisonError::into_inner);
        // Entries are ordered by ID, so a binary search finds the slot.
        match log.binary_search_by_key(&id, |e| e.id) {
            Ok(index) => {
                if !log[index].complete(outcome) {
                    warn!(id, "entry already finished, ignoring second outcome");
                }
            }
            // Evicted while executing; the caller still gets the entry.
            Err(_) => warn!(id, "entry evicted before it finished"),
        }
    }
}
