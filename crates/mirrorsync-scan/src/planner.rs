//! Turns directory levels into sync actions.

use std::collections::VecDeque;

use mirrorsync_core::{ActionKind, ContentComparator, DirectoryLevel, SyncAction, SyncError};

/// Lazy stream of [`SyncAction`]s derived from a stream of [`DirectoryLevel`]s.
///
/// Per level, actions come out in a fixed order: file creates, file deletes,
/// file updates, folder creates, folder deletes. The next level is only
/// requested once the current one is drained. The first error ends the stream.
pub struct ActionPlanner<I, C> {
    levels: I,
    comparator: C,
    pending: VecDeque<Result<SyncAction, SyncError>>,
    finished: bool,
}

impl<I, C> ActionPlanner<I, C>
where
    I: Iterator<Item = Result<DirectoryLevel, SyncError>>,
    C: ContentComparator,
{
    /// Create a planner over `levels`, using `comparator` for files on both sides.
    pub fn new(levels: I, comparator: C) -> Self {
        Self {
            levels,
            comparator,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Queue every action for one level.
    fn plan_level(&mut self, level: &DirectoryLevel) {
        let root = &level.common_root;

        for name in level.files_to_create() {
            self.push(root, name, ActionKind::CreateFile);
        }

        for name in level.files_to_delete() {
            self.push(root, name, ActionKind::DeleteFile);
        }

        for name in level.files_to_check() {
            match self.comparator.differs(root, name) {
                Ok(true) => self.push(root, name, ActionKind::UpdateFile),
                Ok(false) => {}
                Err(err) => {
                    self.pending.push_back(Err(err));
                    self.finished = true;
                    return;
                }
            }
        }

        for name in level.folders_to_create() {
            self.push(root, name, ActionKind::CreateFolder);
        }

        for name in level.folders_to_delete() {
            self.push(root, name, ActionKind::DeleteFolder);
        }
    }

    fn push(&mut self, root: &str, name: &str, kind: ActionKind) {
        self.pending.push_back(Ok(SyncAction::new(root, name, kind)));
    }
}

impl<I, C> Iterator for ActionPlanner<I, C>
where
    I: Iterator<Item = Result<DirectoryLevel, SyncError>>,
    C: ContentComparator,
{
    type Item = Result<SyncAction, SyncError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(action) = self.pending.pop_front() {
                return Some(action);
            }
            if self.finished {
                return None;
            }

            match self.levels.next() {
                None => {
                    self.finished = true;
                    return None;
                }
                Some(Err(err)) => {
                    self.finished = true;
                    return Some(Err(err));
                }
                Some(Ok(level)) => self.plan_level(&level),
            }
        }
    }
}
