//! In-memory board store
//!
//! One `Board` aggregate behind a `RwLock`, explicitly constructed and
//! seeded - no ambient global. Every operation locks, validates its target
//! ids before touching anything, mutates in place, and returns an owned
//! copy of the affected entity. Readers always observe either the full
//! pre-mutation or the full post-mutation board, never a partial write.
//!
//! Writers serialize on the lock; concurrent callers get last-writer-wins
//! semantics with no cross-operation transactions.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use crate::board::{
    Board, CheckItem, CheckItemUpdate, Checklist, ChecklistUpdate, Column, ColumnUpdate, Comment,
    Task, TaskUpdate,
};
use crate::session::Session;
use crate::source::BoardSource;
use crate::{Error, Result};

/// In-memory board store
pub struct BoardStore {
    board: RwLock<Board>,
    session: Session,
}

/// Log a failure before rejecting the call
fn reject(err: Error) -> Error {
    warn!("board store: {err}");
    err
}

impl BoardStore {
    /// Create a store over an empty board
    pub fn new(session: Session) -> Self {
        Self::seeded(Board::default(), session)
    }

    /// Create a store seeded with an existing board
    pub fn seeded(board: Board, session: Session) -> Self {
        Self {
            board: RwLock::new(board),
            session,
        }
    }

    /// Create a store seeded from a board source (demo seed or content feed)
    pub async fn open(source: BoardSource, session: Session) -> Result<Self> {
        let board = source.resolve().await?;
        Ok(Self::seeded(board, session))
    }

    /// Identity all authored entities are attributed to
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Board>> {
        self.board
            .read()
            .map_err(|_| reject(Error::Internal("board lock poisoned".into())))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Board>> {
        self.board
            .write()
            .map_err(|_| reject(Error::Internal("board lock poisoned".into())))
    }

    /// Full board snapshot
    pub async fn board(&self) -> Result<Board> {
        Ok(self.read()?.clone())
    }

    /// Create a new column at the end of the board
    pub async fn create_column(&self, name: &str) -> Result<Column> {
        let mut board = self.write()?;
        let column = Column::new(name.to_string());
        board.columns.push(column.clone());
        Ok(column)
    }

    /// Overwrite the supplied fields of a column
    pub async fn update_column(&self, column_id: &str, update: ColumnUpdate) -> Result<Column> {
        let mut board = self.write()?;
        let column = board
            .column_mut(column_id)
            .ok_or_else(|| reject(Error::ColumnNotFound(column_id.to_string())))?;
        update.apply(column);
        Ok(column.clone())
    }

    /// Delete every task belonging to a column and empty its task list
    pub async fn clear_column(&self, column_id: &str) -> Result<()> {
        let mut board = self.write()?;
        if board.column(column_id).is_none() {
            return Err(reject(Error::ColumnNotFound(column_id.to_string())));
        }

        board.tasks.retain(|t| t.column_id != column_id);
        if let Some(column) = board.column_mut(column_id) {
            column.task_ids.clear();
        }
        Ok(())
    }

    /// Delete a column, cascading to every task it owns
    pub async fn delete_column(&self, column_id: &str) -> Result<()> {
        let mut board = self.write()?;
        if board.column(column_id).is_none() {
            return Err(reject(Error::ColumnNotFound(column_id.to_string())));
        }

        board.tasks.retain(|t| t.column_id != column_id);
        board.columns.retain(|c| c.id != column_id);
        Ok(())
    }

    /// Create a new task at the end of a column
    pub async fn create_task(&self, column_id: &str, name: &str) -> Result<Task> {
        let mut board = self.write()?;
        if board.column(column_id).is_none() {
            return Err(reject(Error::ColumnNotFound(column_id.to_string())));
        }

        let task = Task::new(
            column_id.to_string(),
            name.to_string(),
            self.session.user_id.clone(),
        );
        if let Some(column) = board.column_mut(column_id) {
            column.task_ids.push(task.id.clone());
        }
        board.tasks.push(task.clone());
        Ok(task)
    }

    /// Overwrite the supplied whitelisted fields of a task
    pub async fn update_task(&self, task_id: &str, update: TaskUpdate) -> Result<Task> {
        let mut board = self.write()?;
        let task = board
            .task_mut(task_id)
            .ok_or_else(|| reject(Error::TaskNotFound(task_id.to_string())))?;
        update.apply(task);
        Ok(task.clone())
    }

    /// Move a task to `position` within its own column, or into another
    /// column when `column_id` is given
    ///
    /// Out-of-range positions clamp to the end of the destination list. All
    /// id checks happen before anything is mutated, so a rejected call
    /// leaves the board untouched.
    pub async fn move_task(
        &self,
        task_id: &str,
        position: usize,
        column_id: Option<&str>,
    ) -> Result<()> {
        let mut board = self.write()?;

        let source_id = match board.task(task_id) {
            Some(task) => task.column_id.clone(),
            None => return Err(reject(Error::TaskNotFound(task_id.to_string()))),
        };
        if board.column(&source_id).is_none() {
            return Err(reject(Error::ColumnNotFound(source_id)));
        }
        if let Some(dest_id) = column_id
            && board.column(dest_id).is_none()
        {
            return Err(reject(Error::ColumnNotFound(dest_id.to_string())));
        }

        if let Some(source) = board.column_mut(&source_id) {
            source.task_ids.retain(|id| id != task_id);
        }

        let dest_id = column_id.unwrap_or(&source_id).to_string();
        if let Some(dest) = board.column_mut(&dest_id) {
            let position = position.min(dest.task_ids.len());
            dest.task_ids.insert(position, task_id.to_string());
        }
        if let Some(task) = board.task_mut(task_id) {
            task.column_id = dest_id;
        }
        Ok(())
    }

    /// Delete a task, removing it from its column's task list
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        let mut board = self.write()?;
        let column_id = match board.task(task_id) {
            Some(task) => task.column_id.clone(),
            None => return Err(reject(Error::TaskNotFound(task_id.to_string()))),
        };

        board.tasks.retain(|t| t.id != task_id);
        if let Some(column) = board.column_mut(&column_id) {
            column.task_ids.retain(|id| id != task_id);
        }
        Ok(())
    }

    /// Append a comment authored by the current session identity
    pub async fn add_comment(&self, task_id: &str, message: &str) -> Result<Comment> {
        let mut board = self.write()?;
        let task = board
            .task_mut(task_id)
            .ok_or_else(|| reject(Error::TaskNotFound(task_id.to_string())))?;

        let comment = Comment::new(self.session.user_id.clone(), message.to_string());
        task.comments.push(comment.clone());
        Ok(comment)
    }

    /// Append an empty checklist to a task
    pub async fn add_checklist(&self, task_id: &str, name: &str) -> Result<Checklist> {
        let mut board = self.write()?;
        let task = board
            .task_mut(task_id)
            .ok_or_else(|| reject(Error::TaskNotFound(task_id.to_string())))?;

        let checklist = Checklist::new(name.to_string());
        task.checklists.push(checklist.clone());
        Ok(checklist)
    }

    /// Overwrite the supplied fields of a checklist
    pub async fn update_checklist(
        &self,
        task_id: &str,
        checklist_id: &str,
        update: ChecklistUpdate,
    ) -> Result<Checklist> {
        let mut board = self.write()?;
        let task = board
            .task_mut(task_id)
            .ok_or_else(|| reject(Error::TaskNotFound(task_id.to_string())))?;
        let checklist = task
            .checklist_mut(checklist_id)
            .ok_or_else(|| reject(Error::ChecklistNotFound(checklist_id.to_string())))?;
        update.apply(checklist);
        Ok(checklist.clone())
    }

    /// Remove a checklist from a task
    ///
    /// An unknown checklist id succeeds without changing anything; only the
    /// task id is validated. Long-standing behavior callers rely on.
    pub async fn delete_checklist(&self, task_id: &str, checklist_id: &str) -> Result<()> {
        let mut board = self.write()?;
        let task = board
            .task_mut(task_id)
            .ok_or_else(|| reject(Error::TaskNotFound(task_id.to_string())))?;

        task.checklists.retain(|c| c.id != checklist_id);
        Ok(())
    }

    /// Append an incomplete check item to a checklist
    pub async fn add_check_item(
        &self,
        task_id: &str,
        checklist_id: &str,
        name: &str,
    ) -> Result<CheckItem> {
        let mut board = self.write()?;
        let task = board
            .task_mut(task_id)
            .ok_or_else(|| reject(Error::TaskNotFound(task_id.to_string())))?;
        let checklist = task
            .checklist_mut(checklist_id)
            .ok_or_else(|| reject(Error::ChecklistNotFound(checklist_id.to_string())))?;

        let check_item = CheckItem::new(name.to_string());
        checklist.check_items.push(check_item.clone());
        Ok(check_item)
    }

    /// Overwrite the supplied fields of a check item
    pub async fn update_check_item(
        &self,
        task_id: &str,
        checklist_id: &str,
        check_item_id: &str,
        update: CheckItemUpdate,
    ) -> Result<CheckItem> {
        let mut board = self.write()?;
        let task = board
            .task_mut(task_id)
            .ok_or_else(|| reject(Error::TaskNotFound(task_id.to_string())))?;
        let checklist = task
            .checklist_mut(checklist_id)
            .ok_or_else(|| reject(Error::ChecklistNotFound(checklist_id.to_string())))?;
        let check_item = checklist
            .check_items
            .iter_mut()
            .find(|i| i.id == check_item_id)
            .ok_or_else(|| reject(Error::CheckItemNotFound(check_item_id.to_string())))?;
        update.apply(check_item);
        Ok(check_item.clone())
    }

    /// Remove a check item from a checklist
    ///
    /// Same silent no-op as [`delete_checklist`](Self::delete_checklist)
    /// when the item id is unknown; the task and checklist ids are
    /// validated.
    pub async fn delete_check_item(
        &self,
        task_id: &str,
        checklist_id: &str,
        check_item_id: &str,
    ) -> Result<()> {
        let mut board = self.write()?;
        let task = board
            .task_mut(task_id)
            .ok_or_else(|| reject(Error::TaskNotFound(task_id.to_string())))?;
        let checklist = task
            .checklist_mut(checklist_id)
            .ok_or_else(|| reject(Error::ChecklistNotFound(checklist_id.to_string())))?;

        checklist.check_items.retain(|i| i.id != check_item_id);
        Ok(())
    }
}
