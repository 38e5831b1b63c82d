//! Board data model for tablero
//!
//! One board per store: ordered columns, an unordered task collection, and
//! the board members. Columns and tasks reference each other both ways
//! (`Column::task_ids` holds display order, `Task::column_id` holds
//! ownership) and the store keeps the two in sync on every mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::generate_id;

/// Completion state of a check item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CheckItemState {
    Complete,
    #[default]
    Incomplete,
}

impl CheckItemState {
    pub fn is_complete(&self) -> bool {
        matches!(self, CheckItemState::Complete)
    }
}

impl std::str::FromStr for CheckItemState {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "complete" | "done" => Ok(CheckItemState::Complete),
            "incomplete" | "open" => Ok(CheckItemState::Incomplete),
            _ => Err(crate::Error::InvalidState(s.to_string())),
        }
    }
}

impl std::fmt::Display for CheckItemState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckItemState::Complete => write!(f, "complete"),
            CheckItemState::Incomplete => write!(f, "incomplete"),
        }
    }
}

/// Board member (mirror of the signed-in users known to the board)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Identity-provider user id (opaque to the store)
    pub id: String,

    /// Display name
    pub name: String,

    /// Avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// File or media asset attached to a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
}

/// Comment on a task, append-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier
    pub id: String,

    /// Who wrote the comment (session identity at creation time)
    pub author_id: String,

    /// Store-assigned creation timestamp
    pub created_at: DateTime<Utc>,

    /// Comment body
    pub message: String,
}

impl Comment {
    /// Create a new comment with a fresh id and the current time
    pub fn new(author_id: String, message: String) -> Self {
        Self {
            id: generate_id(),
            author_id,
            created_at: Utc::now(),
            message,
        }
    }
}

/// Single entry of a checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckItem {
    /// Unique identifier
    pub id: String,

    /// Item text
    pub name: String,

    /// Completion state, starts incomplete
    pub state: CheckItemState,
}

impl CheckItem {
    pub fn new(name: String) -> Self {
        Self {
            id: generate_id(),
            name,
            state: CheckItemState::Incomplete,
        }
    }
}

/// Checklist owned by a single task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    /// Unique identifier
    pub id: String,

    /// Checklist title
    pub name: String,

    /// Items in display order
    #[serde(default)]
    pub check_items: Vec<CheckItem>,
}

impl Checklist {
    pub fn new(name: String) -> Self {
        Self {
            id: generate_id(),
            name,
            check_items: Vec::new(),
        }
    }

    /// Look up a check item by id
    pub fn check_item(&self, check_item_id: &str) -> Option<&CheckItem> {
        self.check_items.iter().find(|i| i.id == check_item_id)
    }
}

/// A card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,

    /// Owning column; always mirrored by that column's `task_ids`
    pub column_id: String,

    /// Task title
    pub name: String,

    /// Detailed description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,

    /// Whether the current user gets notifications for this task
    pub is_subscribed: bool,

    /// Labels/tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    /// Assigned member ids
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees_ids: Vec<String>,

    /// Attached media and documents
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,

    /// Checklists in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checklists: Vec<Checklist>,

    /// Comments in creation order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,

    /// Who created the task
    pub author_id: String,
}

impl Task {
    /// Create a new task with a fresh id and empty collections
    pub fn new(column_id: String, name: String, author_id: String) -> Self {
        Self {
            id: generate_id(),
            column_id,
            name,
            description: None,
            due: None,
            is_subscribed: false,
            labels: Vec::new(),
            assignees_ids: Vec::new(),
            attachments: Vec::new(),
            checklists: Vec::new(),
            comments: Vec::new(),
            author_id,
        }
    }

    /// Look up a checklist by id
    pub fn checklist(&self, checklist_id: &str) -> Option<&Checklist> {
        self.checklists.iter().find(|c| c.id == checklist_id)
    }

    /// Look up a checklist by id, mutably
    pub fn checklist_mut(&mut self, checklist_id: &str) -> Option<&mut Checklist> {
        self.checklists.iter_mut().find(|c| c.id == checklist_id)
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.id, self.column_id, self.name)
    }
}

/// Column on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Unique identifier
    pub id: String,

    /// Column title
    pub name: String,

    /// Task ids in display order; every entry references a task whose
    /// `column_id` is this column's id
    #[serde(default)]
    pub task_ids: Vec<String>,
}

impl Column {
    /// Create a new empty column with a fresh id
    pub fn new(name: String) -> Self {
        Self {
            id: generate_id(),
            name,
            task_ids: Vec::new(),
        }
    }
}

/// The board aggregate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Columns in display order
    #[serde(default)]
    pub columns: Vec<Column>,

    /// Tasks; membership in this collection defines existence
    #[serde(default)]
    pub tasks: Vec<Task>,

    /// Known members
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Board {
    /// Look up a column by id
    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// Look up a column by id, mutably
    pub fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    /// Look up a task by id
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Look up a task by id, mutably
    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }
}

/// Partial update for a column; unset fields keep their previous value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnUpdate {
    pub name: Option<String>,
}

impl ColumnUpdate {
    /// Overwrite only the supplied fields
    pub fn apply(&self, column: &mut Column) {
        if let Some(ref name) = self.name {
            column.name = name.clone();
        }
    }
}

/// Partial update for a task; only the whitelisted fields can be written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_subscribed: Option<bool>,
    pub labels: Option<Vec<String>>,
}

impl TaskUpdate {
    /// Overwrite only the supplied fields
    pub fn apply(&self, task: &mut Task) {
        if let Some(ref name) = self.name {
            task.name = name.clone();
        }
        if let Some(ref description) = self.description {
            task.description = Some(description.clone());
        }
        if let Some(is_subscribed) = self.is_subscribed {
            task.is_subscribed = is_subscribed;
        }
        if let Some(ref labels) = self.labels {
            task.labels = labels.clone();
        }
    }
}

/// Partial update for a checklist
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistUpdate {
    pub name: Option<String>,
}

impl ChecklistUpdate {
    pub fn apply(&self, checklist: &mut Checklist) {
        if let Some(ref name) = self.name {
            checklist.name = name.clone();
        }
    }
}

/// Partial update for a check item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckItemUpdate {
    pub name: Option<String>,
    pub state: Option<CheckItemState>,
}

impl CheckItemUpdate {
    pub fn apply(&self, check_item: &mut CheckItem) {
        if let Some(ref name) = self.name {
            check_item.name = name.clone();
        }
        if let Some(state) = self.state {
            check_item.state = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_parse_display_roundtrip() {
        for s in ["complete", "incomplete"] {
            let state: CheckItemState = s.parse().unwrap();
            assert_eq!(state.to_string(), s);
        }
        assert!("finished".parse::<CheckItemState>().is_err());
    }

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("col-1".into(), "Write docs".into(), "user-1".into());
        assert_eq!(task.column_id, "col-1");
        assert!(!task.is_subscribed);
        assert!(task.due.is_none());
        assert!(task.checklists.is_empty());
        assert!(task.comments.is_empty());
    }

    #[test]
    fn test_task_update_partial_merge() {
        let mut task = Task::new("col-1".into(), "Untouched".into(), "user-1".into());
        task.labels = vec!["red".into()];

        let update = TaskUpdate {
            description: Some("now described".into()),
            ..Default::default()
        };
        update.apply(&mut task);

        assert_eq!(task.name, "Untouched");
        assert_eq!(task.description.as_deref(), Some("now described"));
        assert_eq!(task.labels, vec!["red".to_string()]);
        assert!(!task.is_subscribed);
    }

    #[test]
    fn test_check_item_update_state() {
        let mut item = CheckItem::new("step one".into());
        assert_eq!(item.state, CheckItemState::Incomplete);

        let update = CheckItemUpdate {
            state: Some(CheckItemState::Complete),
            ..Default::default()
        };
        update.apply(&mut item);

        assert!(item.state.is_complete());
        assert_eq!(item.name, "step one");
    }

    #[test]
    fn test_board_lookups() {
        let mut board = Board::default();
        let column = Column::new("Todo".into());
        let column_id = column.id.clone();
        board.columns.push(column);

        let task = Task::new(column_id.clone(), "T1".into(), "user-1".into());
        let task_id = task.id.clone();
        board.column_mut(&column_id).unwrap().task_ids.push(task_id.clone());
        board.tasks.push(task);

        assert_eq!(board.column(&column_id).unwrap().task_ids, vec![task_id.clone()]);
        assert_eq!(board.task(&task_id).unwrap().column_id, column_id);
        assert!(board.column("missing").is_none());
        assert!(board.task("missing").is_none());
    }

    #[test]
    fn test_serde_snake_case_wire_shape() {
        let mut task = Task::new("col-1".into(), "T".into(), "user-1".into());
        task.attachments.push(Attachment {
            name: "Video".into(),
            url: "https://example.com/v".into(),
        });

        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("column_id").is_some());
        assert!(value.get("is_subscribed").is_some());
        // empty collections are skipped on the wire
        assert!(value.get("labels").is_none());
        assert!(value.get("comments").is_none());
        assert!(value.get("attachments").is_some());
    }
}
