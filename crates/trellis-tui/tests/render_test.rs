//! Render tests against ratatui's in-memory backend.

use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, layout::Position};
use trellis_tui::{App, AppEvent, KeyInput, Theme, ui};

fn app_with_size(cols: u16, rows: u16) -> App {
    let mut app = App::default();
    app.handle(AppEvent::Resize(cols, rows));
    app
}

fn draw(app: &App) -> Terminal<TestBackend> {
    let (cols, rows) = app.terminal_size();
    let mut terminal = Terminal::new(TestBackend::new(cols, rows)).unwrap();
    let theme = Theme::default();
    terminal.draw(|frame| ui::render(frame, app, &theme)).unwrap();
    terminal
}

fn row(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
}

fn screen(buffer: &Buffer) -> String {
    (0..buffer.area.height).map(|y| row(buffer, y) + "\n").collect()
}

fn room(app: &mut App, id: &str, name: &str) {
    app.handle(AppEvent::Room { room_id: id.into(), name: name.into() });
}

fn message(app: &mut App, id: &str, sender: &str, body: &str) {
    app.handle(AppEvent::Message {
        room_id: id.into(),
        sender: sender.into(),
        timestamp: 0,
        body: body.into(),
    });
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle(AppEvent::Key(KeyInput::Char(c)));
    }
}

#[test]
fn empty_app_shows_welcome_and_placeholder() {
    let app = app_with_size(60, 12);
    let terminal = draw(&app);
    let text = screen(terminal.backend().buffer());

    assert!(text.contains("Welcome to Matrix!"));
    assert!(text.contains("Send a message..."));
    assert!(text.contains(" Rooms "));
}

#[test]
fn message_in_selected_room_is_rendered() {
    let mut app = app_with_size(60, 12);
    room(&mut app, "!r1", "general");
    message(&mut app, "!r1", "@a", "hi");

    let terminal = draw(&app);
    let text = screen(terminal.backend().buffer());

    assert!(text.contains("12:00AM <@a> hi"));
    assert!(text.contains(" general "));
    assert!(!text.contains("Welcome to Matrix!"));
    assert!(app.transcript().at_bottom());
}

#[test]
fn latest_lines_visible_after_overflow() {
    let mut app = app_with_size(60, 12);
    room(&mut app, "!r1", "general");
    for i in 0..30 {
        message(&mut app, "!r1", "@a", &format!("line {i:02}"));
    }

    let terminal = draw(&app);
    let text = screen(terminal.backend().buffer());

    assert!(text.contains("line 29"));
    assert!(!text.contains("line 00"));
}

#[test]
fn selected_room_prefixed_and_unread_marked() {
    let mut app = app_with_size(60, 12);
    room(&mut app, "!r1", "general");
    room(&mut app, "!r2", "random");
    message(&mut app, "!r2", "@b", "psst");

    let terminal = draw(&app);
    let buffer = terminal.backend().buffer();

    assert!(row(buffer, 1).contains("> general"));
    assert!(row(buffer, 2).contains("random *"));
}

#[test]
fn composer_cursor_follows_text() {
    let mut app = app_with_size(60, 12);
    room(&mut app, "!r1", "general");
    app.handle(AppEvent::Key(KeyInput::Tab));
    type_text(&mut app, "hello");

    let mut terminal = draw(&app);

    // Composer inner area starts right of the 12-column room list, below
    // the 8-row transcript.
    assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(13 + 5, 9));
    assert!(row(terminal.backend().buffer(), 9).contains("hello"));
}

#[test]
fn long_draft_scrolls_to_keep_cursor_visible() {
    let mut app = app_with_size(60, 12);
    app.handle(AppEvent::Key(KeyInput::Tab));
    type_text(&mut app, &"abcdefghij".repeat(6));

    let mut terminal = draw(&app);
    let buffer = terminal.backend().buffer();

    // 60 characters in a 46-column pane: the first 15 scroll out of view.
    assert_eq!(buffer[(13, 9)].symbol(), "f");
    assert_eq!(buffer[(57, 9)].symbol(), "j");
    assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(58, 9));
}

#[test]
fn wide_draft_cursor_counts_columns() {
    let mut app = app_with_size(60, 12);
    app.handle(AppEvent::Key(KeyInput::Tab));
    type_text(&mut app, &"你".repeat(30));

    let mut terminal = draw(&app);

    // 22 double-width characters fill 44 of the 46 columns before the cursor.
    assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(13 + 44, 9));
    assert_eq!(terminal.backend().buffer()[(59, 9)].symbol(), "│");
}

#[test]
fn status_bar_shows_mode_and_help() {
    let app = app_with_size(80, 24);
    let terminal = draw(&app);
    let status = row(terminal.backend().buffer(), 23);

    insta::assert_snapshot!(status.trim(), @"NAVIGATE  enter send | tab switch pane | ↑/↓ rooms | ctrl+c quit");
}

#[test]
fn status_bar_shows_errors() {
    let mut app = app_with_size(80, 24);
    app.handle(AppEvent::Key(KeyInput::Tab));
    app.handle(AppEvent::Error { message: "send to !r1 failed".into() });

    let terminal = draw(&app);
    let status = row(terminal.backend().buffer(), 23);

    insta::assert_snapshot!(status.trim(), @"COMPOSE  Error: send to !r1 failed");
}

#[test]
fn status_bar_returns_to_help_after_key() {
    let mut app = app_with_size(80, 24);
    app.handle(AppEvent::Error { message: "send to !r1 failed".into() });
    app.handle(AppEvent::Key(KeyInput::Tab));

    let terminal = draw(&app);
    let status = row(terminal.backend().buffer(), 23);

    insta::assert_snapshot!(status.trim(), @"COMPOSE  enter send | tab switch pane | ↑/↓ rooms | ctrl+c quit");
}

#[test]
fn tiny_terminal_does_not_panic() {
    let mut app = app_with_size(4, 2);
    room(&mut app, "!r1", "general");
    message(&mut app, "!r1", "@a", "hello there");

    let terminal = draw(&app);
    assert_eq!(terminal.backend().buffer().area.width, 4);
}
