pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::debug;

use crate::app::{AppContext, Result};
use crate::backup;
use crate::editor::{DescriptionTicket, DraftField, EditorOutcome};

use self::app::TuiApp;
use self::event::{Action, AppEvent, EditorKey, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;
type DescriptionSender = mpsc::UnboundedSender<(DescriptionTicket, String)>;

pub async fn run(mut ctx: AppContext) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: &mut AppContext) -> Result<()> {
    let mut tui_app = TuiApp::new();
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (tx, mut rx) = mpsc::unbounded_channel();

    tui_app.sync(ctx.store.snapshot());

    loop {
        terminal.draw(|frame| layout::render(frame, &mut tui_app, &ctx.config))?;

        while let Ok((ticket, text)) = rx.try_recv() {
            if tui_app.generating == Some(ticket) {
                tui_app.generating = None;
            }
            if tui_app.editor.apply_description(ticket, text) {
                tui_app.set_status("Description generated");
            } else {
                debug!("discarding description for a closed editor");
            }
        }

        match event_handler.next()? {
            AppEvent::Key(key) => {
                if tui_app.editor.is_open() {
                    handle_editor_key(&mut tui_app, ctx, key, &tx);
                } else if let Some((item_id, item_name)) = tui_app.pending_delete.take() {
                    match key.code {
                        KeyCode::Char('y') | KeyCode::Char('Y') => {
                            match ctx.store.delete(&item_id) {
                                Ok(_) => {
                                    tui_app.sync(ctx.store.snapshot());
                                    tui_app.set_status(format!("Deleted: {}", item_name));
                                }
                                Err(e) => tui_app.set_status(format!("Delete failed: {}", e)),
                            }
                        }
                        _ => {
                            tui_app.set_status("Delete cancelled");
                        }
                    }
                } else {
                    let action = ctx.config.keybindings.get_action(&key);
                    handle_browse_action(&mut tui_app, ctx, action);
                }
            }
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_browse_action(tui_app: &mut TuiApp, ctx: &AppContext, action: Action) {
    match action {
        Action::Quit => {
            tui_app.should_quit = true;
        }
        Action::MoveUp => tui_app.move_up(),
        Action::MoveDown => tui_app.move_down(),
        Action::NextPage => tui_app.next_page(),
        Action::PrevPage => tui_app.prev_page(),
        Action::OpenItem => {
            if let Some(item) = tui_app.selected_item().cloned() {
                tui_app.clear_status();
                tui_app.editor.open_edit(&item);
            }
        }
        Action::AddItem => {
            tui_app.clear_status();
            tui_app.editor.open_create();
        }
        Action::DeleteItem => {
            if let Some(item) = tui_app.selected_item() {
                tui_app.pending_delete = Some((item.id.clone(), item.name.clone()));
            }
        }
        Action::Export => {
            let dir = ctx
                .config
                .display
                .backup_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from("."));
            match backup::export_to_dir(ctx.store.snapshot(), &dir) {
                Ok(path) => tui_app.set_status(format!("Backup written to {}", path.display())),
                Err(e) => tui_app.set_status(format!("Export failed: {}", e)),
            }
        }
        Action::None => {}
    }
}

fn handle_editor_key(
    tui_app: &mut TuiApp,
    ctx: &mut AppContext,
    key: KeyEvent,
    tx: &DescriptionSender,
) {
    if tui_app.editor.is_delete_pending() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let result = tui_app.editor.confirm_delete(&mut ctx.store);
                finish_commit(tui_app, ctx, result);
            }
            _ => {
                tui_app.editor.cancel_delete();
                tui_app.set_status("Delete cancelled");
            }
        }
        return;
    }

    match EditorKey::from(key) {
        EditorKey::Close => {
            tui_app.editor.cancel();
            tui_app.generating = None;
            tui_app.clear_status();
        }
        EditorKey::NextField => tui_app.editor.focus_next(),
        EditorKey::PrevField => tui_app.editor.focus_prev(),
        EditorKey::Backspace => tui_app.editor.pop_char(),
        EditorKey::Input(c) => tui_app.editor.push_char(c),
        EditorKey::Submit => {
            if tui_app.editor.is_locked() {
                tui_app.set_status("Sold items are read-only");
                return;
            }
            let result = if tui_app.editor.focus() == DraftField::SoldPrice {
                tui_app.editor.confirm_sale(&mut ctx.store)
            } else {
                tui_app.editor.submit(&mut ctx.store)
            };
            finish_commit(tui_app, ctx, result);
        }
        EditorKey::RequestDelete => match tui_app.editor.request_delete() {
            Ok(()) => tui_app.clear_status(),
            Err(e) => tui_app.set_status(e.to_string()),
        },
        EditorKey::Generate => start_generation(tui_app, ctx, tx),
        EditorKey::Ignore => {}
    }
}

fn start_generation(tui_app: &mut TuiApp, ctx: &AppContext, tx: &DescriptionSender) {
    let Some(ticket) = tui_app.editor.description_ticket() else {
        tui_app.set_status("Description cannot be changed for this item");
        return;
    };
    if tui_app.generating == Some(ticket) {
        return;
    }

    let keywords = tui_app.editor.draft().description.trim().to_string();
    if keywords.is_empty() {
        tui_app.set_status("Type a few keywords into the description first");
        return;
    }

    tui_app.generating = Some(ticket);
    tui_app.set_status("Generating description...");

    let assistant = ctx.assistant.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let text = assistant.generate_description(&keywords).await;
        // The receiver is gone once the UI has exited.
        let _ = tx.send((ticket, text));
    });
}

fn finish_commit(tui_app: &mut TuiApp, ctx: &AppContext, result: Result<EditorOutcome>) {
    match result {
        Ok(outcome) => {
            tui_app.generating = None;
            tui_app.sync(ctx.store.snapshot());
            let message = match outcome {
                EditorOutcome::Added(item) => {
                    tui_app.item_index = 0;
                    tui_app.list_state.select(Some(0));
                    format!("Added: {}", item.name)
                }
                EditorOutcome::Updated(_) => "Item updated".to_string(),
                EditorOutcome::Sold(_) => "Item marked as sold".to_string(),
                EditorOutcome::Deleted(_) => "Item deleted".to_string(),
                EditorOutcome::Missing(_) => "Item no longer exists".to_string(),
            };
            tui_app.set_status(message);
        }
        Err(e) => tui_app.set_status(e.to_string()),
    }
}
