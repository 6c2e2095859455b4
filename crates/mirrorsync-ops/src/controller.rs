//! One sync pass: walk, plan, apply.

use std::time::Instant;

use tracing::Dispatch;

use mirrorsync_analyze::comparator_for;
use mirrorsync_core::{
    CompareStrategy, ContentComparator, DEFAULT_CHUNK_SIZE, FolderSettings, SyncAction,
    SyncConfig, SyncError,
};
use mirrorsync_scan::{ActionPlanner, LevelWalker};

use crate::executor::FileSystemExecutor;
use crate::report::SyncReport;

/// Drives a full pass from the source tree to the destination tree.
///
/// The controller keeps no state between passes. Every call to
/// [`execute`](Self::execute) walks both trees again, so changes made by
/// other processes in between are picked up on the next pass.
pub struct SyncController {
    executor: FileSystemExecutor,
    comparator: Box<dyn ContentComparator + Send + Sync>,
    strategy: CompareStrategy,
    dispatch: Option<Dispatch>,
}

impl SyncController {
    /// Validate the roots and pick the comparator for `strategy`.
    pub fn new(settings: &FolderSettings, strategy: CompareStrategy) -> Result<Self, SyncError> {
        Self::with_chunk_size(settings, strategy, DEFAULT_CHUNK_SIZE)
    }

    /// Build a controller from a full config.
    pub fn from_config(config: &SyncConfig) -> Result<Self, SyncError> {
        Self::with_chunk_size(&config.folder_settings(), config.strategy, config.chunk_size)
    }

    fn with_chunk_size(
        settings: &FolderSettings,
        strategy: CompareStrategy,
        chunk_size: usize,
    ) -> Result<Self, SyncError> {
        if chunk_size == 0 {
            return Err(SyncError::InvalidConfig {
                message: "Chunk size must be greater than zero".to_string(),
            });
        }

        let executor = FileSystemExecutor::new(settings)?;
        let comparator = comparator_for(strategy, &executor.settings(), chunk_size);

        Ok(Self {
            executor,
            comparator,
            strategy,
            dispatch: None,
        })
    }

    /// Route this controller's log events to `dispatch`.
    ///
    /// Without one, events go to whatever subscriber is current for the
    /// calling thread.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// The executor used to apply actions.
    pub fn executor(&self) -> &FileSystemExecutor {
        &self.executor
    }

    /// Comparison strategy for files present on both sides.
    pub fn strategy(&self) -> CompareStrategy {
        self.strategy
    }

    /// Run one pass, applying every action as it is planned.
    ///
    /// Stops at the first error. Actions applied before it stay applied.
    pub fn execute(&self) -> Result<SyncReport, SyncError> {
        self.in_scope(|| self.run_pass())
    }

    /// List the actions a pass would start with, without applying them.
    ///
    /// Folders that do not exist yet in the destination are listed once; their
    /// contents show up as creates because the walk only reads the source.
    pub fn plan(&self) -> Result<Vec<SyncAction>, SyncError> {
        self.in_scope(|| {
            let walker = LevelWalker::new(&self.executor.settings())?;
            ActionPlanner::new(walker, self.comparator.as_ref()).collect()
        })
    }

    fn run_pass(&self) -> Result<SyncReport, SyncError> {
        let started = Instant::now();
        let mut report = SyncReport::default();

        tracing::debug!(
            source = %self.executor.source().display(),
            destination = %self.executor.destination().display(),
            strategy = %self.strategy,
            "Starting sync pass"
        );

        let walker = LevelWalker::new(&self.executor.settings())?;
        for action in ActionPlanner::new(walker, self.comparator.as_ref()) {
            let action = action?;
            let bytes = self.executor.apply(&action)?;
            let path = action.relative_path();
            tracing::info!(
                kind = %action.kind,
                path = %path.display(),
                "{} {}",
                action.kind,
                path.display()
            );
            report.record(action.kind, bytes);
        }

        report.elapsed = started.elapsed();
        tracing::info!(
            actions = report.total_actions(),
            bytes_copied = report.bytes_copied,
            "Sync pass finished: {report}"
        );
        Ok(report)
    }

    fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}

impl std::fmt::Debug for SyncController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncController")
            .field("executor", &self.executor)
            .field("strategy", &self.strategy)
            .field("dispatch", &self.dispatch.is_some())
            .finish()
    }
}
