//! CLI command implementations

use anyhow::{Result, bail};
use colored::Colorize;
use tabled::{Table, Tabled};
use tablero_core::config::{CONFIG_FILE, TABLERO_DIR};
use tablero_core::{
    Board, BoardSource, BoardStore, CheckItemState, CheckItemUpdate, ChecklistUpdate, ColumnUpdate,
    Config, FeedClient, Session, Task, TaskUpdate, demo_board,
};

/// Load the nearest config, defaults when none is found
fn load_config() -> Result<Config> {
    let cwd = std::env::current_dir()?;
    match Config::find_from(&cwd) {
        Some(path) => Ok(Config::load(&path)?),
        None => Ok(Config::default()),
    }
}

fn session_from(config: &Config) -> Session {
    Session::with_profile(
        config.user.id.clone(),
        config.user.name.clone(),
        config.user.avatar.clone(),
    )
}

fn source_from(config: &Config, session: &Session) -> BoardSource {
    match config.feed.url {
        Some(ref url) => BoardSource::Feed(FeedClient::new(url.clone())),
        None => BoardSource::Seed(demo_board(session)),
    }
}

async fn open_store(config: &Config) -> Result<BoardStore> {
    let session = session_from(config);
    let source = source_from(config, &session);
    Ok(BoardStore::open(source, session).await?)
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let cut: String = name.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

pub fn init(feed_url: Option<String>, name: Option<String>) -> Result<()> {
    let dir = std::env::current_dir()?.join(TABLERO_DIR);
    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        bail!("tablero already initialized at {}", path.display());
    }

    let mut config = Config::default();
    config.user.name = name;
    config.feed.url = feed_url;

    if config.user.name.is_none() && config.feed.url.is_none() {
        std::fs::create_dir_all(&dir)?;
        std::fs::write(&path, Config::default_with_comments(&config.user.id))?;
    } else {
        config.save(&path)?;
    }

    println!("{} Initialized tablero in {}", "✓".green(), dir.display());
    println!("  User id: {}", config.user.id);
    match config.feed.url {
        Some(ref url) => println!("  Board source: content feed at {}", url),
        None => println!("  Board source: demo board"),
    }
    Ok(())
}

#[derive(Tabled)]
struct ColumnRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Column")]
    name: String,
    #[tabled(rename = "Tasks")]
    tasks: usize,
}

pub async fn board(json: bool) -> Result<()> {
    let config = load_config()?;
    let store = open_store(&config).await?;
    let board = store.board().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    let max = config.display.max_name_length;
    let rows: Vec<ColumnRow> = board
        .columns
        .iter()
        .map(|c| ColumnRow {
            id: c.id.clone(),
            name: truncate(&c.name, max),
            tasks: c.task_ids.len(),
        })
        .collect();
    println!("{}", Table::new(rows));

    for column in &board.columns {
        println!();
        println!("{}", truncate(&column.name, max).bold());
        if column.task_ids.is_empty() {
            println!("  {}", "(empty)".dimmed());
            continue;
        }
        for task_id in &column.task_ids {
            let Some(task) = board.task(task_id) else {
                continue;
            };
            print!("  {} {}", task.id.cyan(), truncate(&task.name, max));
            if !task.labels.is_empty() {
                print!(" {}", format!("[{}]", task.labels.join(", ")).dimmed());
            }
            let (done, total) = checklist_progress(task);
            if total > 0 {
                print!(" {}", format!("{done}/{total}").yellow());
            }
            if !task.comments.is_empty() {
                print!(" {}", format!("({} comments)", task.comments.len()).dimmed());
            }
            println!();
        }
    }
    Ok(())
}

fn checklist_progress(task: &Task) -> (usize, usize) {
    let mut done = 0;
    let mut total = 0;
    for checklist in &task.checklists {
        for item in &checklist.check_items {
            total += 1;
            if item.state.is_complete() {
                done += 1;
            }
        }
    }
    (done, total)
}

pub async fn show(task_id: &str, json: bool) -> Result<()> {
    let config = load_config()?;
    let store = open_store(&config).await?;
    let board = store.board().await?;

    let task = board
        .task(task_id)
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", task_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
        return Ok(());
    }

    let column_name = board
        .column(&task.column_id)
        .map(|c| c.name.as_str())
        .unwrap_or("?");

    println!("{} {}", task.id.cyan().bold(), task.name.bold());
    println!();
    println!("Column:     {}", column_name);
    println!("Author:     {}", member_name(&board, &task.author_id));
    println!("Subscribed: {}", task.is_subscribed);
    if let Some(due) = task.due {
        println!("Due:        {}", due.format(&config.display.date_format));
    }
    if !task.labels.is_empty() {
        println!("Labels:     {}", task.labels.join(", "));
    }
    if !task.assignees_ids.is_empty() {
        println!("Assignees:  {}", task.assignees_ids.join(", "));
    }

    if let Some(ref description) = task.description {
        println!();
        println!("{}", "Description:".bold());
        println!("{}", description);
    }

    if !task.attachments.is_empty() {
        println!();
        println!("{}", "Attachments:".bold());
        for attachment in &task.attachments {
            println!("  {} {}", attachment.name, attachment.url.dimmed());
        }
    }

    for checklist in &task.checklists {
        println!();
        println!("{} {}", "Checklist:".bold(), checklist.name);
        for item in &checklist.check_items {
            let glyph = match item.state {
                CheckItemState::Complete => "✓".green(),
                CheckItemState::Incomplete => "○".dimmed(),
            };
            println!("  {} {}", glyph, item.name);
        }
    }

    if !task.comments.is_empty() {
        println!();
        println!("{}", "Comments:".bold());
        for comment in &task.comments {
            println!(
                "  {} {}",
                member_name(&board, &comment.author_id).cyan(),
                comment
                    .created_at
                    .format(&config.display.date_format)
                    .to_string()
                    .dimmed()
            );
            println!("    {}", comment.message);
        }
    }
    Ok(())
}

fn member_name<'a>(board: &'a Board, user_id: &'a str) -> &'a str {
    board
        .members
        .iter()
        .find(|m| m.id == user_id)
        .map(|m| m.name.as_str())
        .unwrap_or(user_id)
}

/// Drive every store operation once against a fresh seeded store
pub async fn walkthrough(json: bool) -> Result<()> {
    let config = load_config()?;
    let session = session_from(&config);
    let store = BoardStore::seeded(demo_board(&session), session);

    macro_rules! step {
        ($label:expr, $entity:expr) => {
            if json {
                println!("{}", serde_json::to_string(&$entity)?);
            } else {
                println!("{} {}", "✓".green(), $label);
            }
        };
    }

    let backlog = store.create_column("Backlog").await?;
    step!(format!("created column {}", backlog.id.cyan()), backlog);
    let review = store.create_column("Review").await?;
    step!(format!("created column {}", review.id.cyan()), review);

    let task = store.create_task(&backlog.id, "Draft announcement").await?;
    step!(format!("created task {}", task.id.cyan()), task);

    let task = store
        .update_task(
            &task.id,
            TaskUpdate {
                description: Some("Announcement post for the 0.1.0 release.".into()),
                labels: Some(vec!["writing".into()]),
                is_subscribed: Some(true),
                ..Default::default()
            },
        )
        .await?;
    step!(format!("updated task {}", task.id.cyan()), task);

    let checklist = store.add_checklist(&task.id, "Review steps").await?;
    step!(format!("added checklist {}", checklist.id.cyan()), checklist);
    let checklist = store
        .update_checklist(
            &task.id,
            &checklist.id,
            ChecklistUpdate {
                name: Some("Publishing steps".into()),
            },
        )
        .await?;
    step!(format!("renamed checklist {}", checklist.id.cyan()), checklist);

    let item = store
        .add_check_item(&task.id, &checklist.id, "Proofread")
        .await?;
    step!(format!("added check item {}", item.id.cyan()), item);
    let extra = store
        .add_check_item(&task.id, &checklist.id, "Schedule post")
        .await?;
    step!(format!("added check item {}", extra.id.cyan()), extra);

    let item = store
        .update_check_item(
            &task.id,
            &checklist.id,
            &item.id,
            CheckItemUpdate {
                state: Some(CheckItemState::Complete),
                ..Default::default()
            },
        )
        .await?;
    step!(format!("completed check item {}", item.id.cyan()), item);

    store
        .delete_check_item(&task.id, &checklist.id, &extra.id)
        .await?;
    step!(format!("deleted check item {}", extra.id.cyan()), extra.id);

    let comment = store.add_comment(&task.id, "Ready for review.").await?;
    step!(format!("commented on {}", task.id.cyan()), comment);

    store.move_task(&task.id, 0, Some(&review.id)).await?;
    step!(
        format!("moved task {} to {}", task.id.cyan(), review.id.cyan()),
        task.id
    );
    store.move_task(&task.id, 0, None).await?;
    step!(format!("reordered task {}", task.id.cyan()), task.id);

    let review = store
        .update_column(
            &review.id,
            ColumnUpdate {
                name: Some("In Review".into()),
            },
        )
        .await?;
    step!(format!("renamed column {}", review.id.cyan()), review);

    store.delete_checklist(&task.id, &checklist.id).await?;
    step!(format!("deleted checklist {}", checklist.id.cyan()), checklist.id);

    store.clear_column(&review.id).await?;
    step!(format!("cleared column {}", review.id.cyan()), review.id);

    let doomed = store.create_task(&backlog.id, "Scratch task").await?;
    store.delete_task(&doomed.id).await?;
    step!(format!("deleted task {}", doomed.id.cyan()), doomed.id);

    store.delete_column(&backlog.id).await?;
    step!(format!("deleted column {}", backlog.id.cyan()), backlog.id);
    store.delete_column(&review.id).await?;
    step!(format!("deleted column {}", review.id.cyan()), review.id);

    let board = store.board().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        println!();
        println!(
            "Final board: {} columns, {} tasks, {} members",
            board.columns.len(),
            board.tasks.len(),
            board.members.len()
        );
    }
    Ok(())
}
