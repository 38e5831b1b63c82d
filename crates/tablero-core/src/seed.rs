//! Demo board seed
//!
//! Construction-time seed used when no content feed is configured. Mirrors
//! the mock dataset the dashboard ships with: three columns, a few tasks in
//! flight, one checklist, one comment.

use crate::board::{Board, Checklist, Column, Comment, Task, TaskUpdate};
use crate::session::Session;

/// Build the demo board, authored by the given session identity
pub fn demo_board(session: &Session) -> Board {
    let author = session.user_id.clone();
    let mut board = Board {
        members: vec![session.member()],
        ..Board::default()
    };

    let mut todo = Column::new("Todo".into());
    let mut in_progress = Column::new("In Progress".into());
    let mut done = Column::new("Done".into());

    let mut design = Task::new(todo.id.clone(), "Design onboarding flow".into(), author.clone());
    TaskUpdate {
        description: Some("Sketch the first-run experience for new members.".into()),
        labels: Some(vec!["design".into()]),
        ..Default::default()
    }
    .apply(&mut design);

    let mut checklist = Checklist::new("Screens".into());
    checklist.check_items.push(crate::board::CheckItem::new("Welcome".into()));
    checklist.check_items.push(crate::board::CheckItem::new("Profile setup".into()));
    design.checklists.push(checklist);

    let mut api = Task::new(
        in_progress.id.clone(),
        "Wire the upload endpoint".into(),
        author.clone(),
    );
    api.labels = vec!["backend".into(), "media".into()];
    api.is_subscribed = true;
    api.comments.push(Comment::new(
        author.clone(),
        "Progress reporting still flaky on large files.".into(),
    ));

    let release = Task::new(done.id.clone(), "Cut 0.1.0 release notes".into(), author);

    todo.task_ids.push(design.id.clone());
    in_progress.task_ids.push(api.id.clone());
    done.task_ids.push(release.id.clone());

    board.tasks.push(design);
    board.tasks.push(api);
    board.tasks.push(release);
    board.columns.push(todo);
    board.columns.push(in_progress);
    board.columns.push(done);

    board
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_board_is_consistent() {
        let session = Session::with_profile("u-1", Some("Anika".into()), None);
        let board = demo_board(&session);

        assert_eq!(board.columns.len(), 3);
        assert_eq!(board.members.len(), 1);
        assert_eq!(board.members[0].id, "u-1");

        // every task is registered in exactly the column it claims
        for task in &board.tasks {
            let column = board.column(&task.column_id).unwrap();
            assert_eq!(
                column.task_ids.iter().filter(|id| **id == task.id).count(),
                1
            );
        }
        // and every task_ids entry points at a real task in that column
        for column in &board.columns {
            for id in &column.task_ids {
                assert_eq!(board.task(id).unwrap().column_id, column.id);
            }
        }
    }

    #[test]
    fn test_demo_board_authorship() {
        let session = Session::new("u-9");
        let board = demo_board(&session);
        assert!(board.tasks.iter().all(|t| t.author_id == "u-9"));
        let commented = board
            .tasks
            .iter()
            .find(|t| !t.comments.is_empty())
            .unwrap();
        assert_eq!(commented.comments[0].author_id, "u-9");
    }
}
