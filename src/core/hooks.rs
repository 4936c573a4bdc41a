//! Pre/post hooks that bracket a unit of work with a changelog entry.
//!
//! ```text
//! pre_response()            -> baseline := current tree
//! ... work happens ...
//! post_response(summary)    -> entry for everything changed since pre_response
//! ```
//!
//! [`ChangelogHooks::with_changelog`] runs a closure between the two.

use crate::core::changelog::ChangelogEngine;
use crate::core::error::Result;
use crate::core::state::WorkspaceState;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_PREVIOUS_STATE: &str = "Pre-response workspace state";
pub const DEFAULT_CURRENT_STATE: &str = "Response execution completed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookOutcome {
    /// Rendered markdown entry that was written
    pub entry: String,
    /// Whether the workspace looked consistent after the write
    pub sync_ok: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub total_files: usize,
    pub next_answer: u32,
    /// Recovery ran because the integrity check failed
    pub recovered: bool,
}

pub struct ChangelogHooks<'a> {
    engine: &'a mut ChangelogEngine,
    max_sync_changes: usize,
}

impl<'a> ChangelogHooks<'a> {
    pub fn new(engine: &'a mut ChangelogEngine, max_sync_changes: usize) -> Self {
        Self {
            engine,
            max_sync_changes,
        }
    }

    /// Check integrity, recovering when needed, and report what is being tracked
    pub fn initialize_session(&mut self) -> Result<SessionInfo> {
        let recovered = if self.engine.validate_system_integrity() {
            false
        } else {
            log::warn!("Integrity check failed, rebuilding workspace state");
            self.recover()?;
            true
        };

        let state = self.engine.manager_mut().get_current_state(false)?;
        Ok(SessionInfo {
            total_files: state.total_files,
            next_answer: self.engine.answer_counter() + 1,
            recovered,
        })
    }

    fn recover(&mut self) -> Result<()> {
        let manager = self.engine.manager_mut();
        manager.cleanup_cache();
        let state = manager.get_current_state(true)?;
        log::debug!("Recovered workspace state {}", state.short_hash());

        if self.engine.ensure_changelog()? {
            log::info!(
                "Created missing changelog {}",
                self.engine.changelog_path().display()
            );
        }
        Ok(())
    }

    /// Rebaseline so the next entry covers only what happens from here on
    pub fn pre_response(&mut self) -> Result<Arc<WorkspaceState>> {
        let state = self.engine.manager_mut().reset_baseline()?;
        log::debug!("pre_response baseline {}", state.short_hash());
        Ok(state)
    }

    /// Write the changelog entry, then check that the workspace is in sync
    pub fn post_response(&mut self, summary: &str) -> Result<HookOutcome> {
        let entry = self
            .engine
            .update_changelog(summary, DEFAULT_PREVIOUS_STATE, DEFAULT_CURRENT_STATE)?;
        let sync_ok = self.validate_workspace_sync();

        Ok(HookOutcome { entry, sync_ok })
    }

    /// Run `work` between `pre_response` and `post_response`
    pub fn with_changelog<T>(
        &mut self,
        summary: &str,
        work: impl FnOnce() -> T,
    ) -> Result<(T, HookOutcome)> {
        self.pre_response()?;
        let value = work();
        let outcome = self.post_response(summary)?;
        Ok((value, outcome))
    }

    fn validate_workspace_sync(&mut self) -> bool {
        let manager = self.engine.manager_mut();

        match manager.get_current_state(false) {
            Ok(state) if !state.state_hash.is_empty() => {}
            Ok(_) => return false,
            Err(e) => {
                log::warn!("Workspace sync check failed: {e}");
                return false;
            }
        }

        match manager.detect_changes() {
            Ok(changes) if changes.len() > self.max_sync_changes => {
                log::warn!(
                    "Excessive changes detected after changelog update: {} (limit {})",
                    changes.len(),
                    self.max_sync_changes
                );
                false
            }
            Ok(_) => true,
            Err(e) => {
                log::warn!("Workspace sync check failed: {e}");
                false
            }
        }
    }
}
