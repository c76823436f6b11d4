use ratatui::style::Modifier;
use ratatui::{Terminal, backend::TestBackend};
use tui_greeting::config::AppConfig;
use tui_greeting::internal::ui::app::App;
use tui_greeting::internal::ui::greeting;
use tui_greeting::utils::theme_loader::ThemeMode;

fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).unwrap()
}

/// Text of one buffer row with trailing blanks stripped.
fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[test]
fn test_greeting_preview_snapshot() {
    let mut terminal = test_terminal(80, 24);

    terminal.draw(|f| greeting::preview(f)).unwrap();

    insta::assert_snapshot!("greeting_preview", terminal.backend());
}

#[test]
fn test_greeting_preview_compact_snapshot() {
    // A smaller geometry still keeps the label on the line-box baseline row.
    let mut terminal = test_terminal(40, 8);

    terminal.draw(|f| greeting::preview(f)).unwrap();

    insta::assert_snapshot!("greeting_preview_compact", terminal.backend());
}

#[test]
fn test_preview_renders_exactly_one_label() {
    let mut terminal = test_terminal(80, 24);

    terminal.draw(|f| greeting::preview(f)).unwrap();

    // The 32pt line box is two rows tall with the label on its bottom row.
    assert_eq!(row_text(&terminal, 1), "Hello World");

    // Every other row is blank: the tree holds a single text node.
    for y in (0..24).filter(|y| *y != 1) {
        assert_eq!(row_text(&terminal, y), "", "row {} should be empty", y);
    }
}

#[test]
fn test_preview_draws_are_identical() {
    let mut first = test_terminal(80, 24);
    let mut second = test_terminal(80, 24);

    first.draw(|f| greeting::preview(f)).unwrap();
    second.draw(|f| greeting::preview(f)).unwrap();
    second.draw(|f| greeting::preview(f)).unwrap();

    assert_eq!(
        first.backend().buffer(),
        second.backend().buffer(),
        "repeated preview draws must produce the same cells"
    );
}

#[test]
fn test_preview_label_row_carries_bold() {
    let mut terminal = test_terminal(80, 24);

    terminal.draw(|f| greeting::preview(f)).unwrap();

    // 32pt sits in the bold tier; the label row carries the emphasis while
    // the box row above it stays plain. The backend's text dump does not
    // record modifiers, so this is checked on the cells directly.
    let label_row = greeting::line_box_rows(greeting::GREETING_POINT_SIZE) - 1;
    let buffer = terminal.backend().buffer();
    for x in 0..greeting::GREETING.len() as u16 {
        assert!(
            buffer[(x, label_row)]
                .style()
                .add_modifier
                .contains(Modifier::BOLD),
            "label cell {x} should be bold"
        );
    }
    assert!(
        !buffer[(0, label_row - 1)]
            .style()
            .add_modifier
            .contains(Modifier::BOLD),
        "the box row above the label stays plain"
    );
}

#[test]
fn test_app_shell_snapshot() {
    let app = App::with_config(AppConfig::default(), ThemeMode::Dark);
    let mut terminal = test_terminal(80, 24);

    terminal.draw(|f| app.ui(f)).unwrap();

    insta::assert_snapshot!("app_shell_default", terminal.backend());
}

#[test]
fn test_app_shell_chrome_around_greeting() {
    let app = App::with_config(AppConfig::default(), ThemeMode::Dark);
    let mut terminal = test_terminal(80, 24);

    terminal.draw(|f| app.ui(f)).unwrap();

    // Greeting sits inside the bordered content block, under one blank
    // line-box row (border row 1, box top row 2, label row 3).
    assert!(row_text(&terminal, 3).contains("Hello World"));

    // Top bar names the selected theme, status bar lists the key hints.
    assert!(row_text(&terminal, 0).contains("Theme: default (dark)"));
    assert!(row_text(&terminal, 23).contains("q: Quit | t: Switch Theme"));
}

#[test]
fn test_app_shell_notification_snapshot() {
    let mut app = App::with_config(AppConfig::default(), ThemeMode::Dark);
    app.notify_info("Theme switched");
    let mut terminal = test_terminal(80, 24);

    terminal.draw(|f| app.ui(f)).unwrap();

    insta::assert_snapshot!("app_shell_notification", terminal.backend());
}

#[test]
fn test_notification_popup_skips_tiny_areas() {
    // Below the popup minimum the overlay is skipped, so a pending
    // notification draws exactly the same cells as none at all.
    let mut app = App::with_config(AppConfig::default(), ThemeMode::Dark);
    let mut baseline = test_terminal(7, 2);
    baseline.draw(|f| app.ui(f)).unwrap();

    app.notify_info("Theme switched");
    let mut notified = test_terminal(7, 2);
    notified.draw(|f| app.ui(f)).unwrap();

    assert_eq!(baseline.backend().buffer(), notified.backend().buffer());
}
