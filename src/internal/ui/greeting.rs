//! The greeting banner: a vertical stack holding a single text label.
//!
//! `fragment()` builds the content, `render()` places it in an area with a
//! theme applied, and `preview()` is the no-input variant the snapshot tests
//! and headless checks draw.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::Paragraph;

use crate::utils::theme_loader::Theme;

/// Literal content of the banner's single text node.
pub const GREETING: &str = "Hello World";

/// Nominal type size of the label, in points.
pub const GREETING_POINT_SIZE: u16 = 32;

/// Approximate height of one terminal row, in points. Point sizes quantize to
/// whole rows of this height.
const CELL_POINT_HEIGHT: u16 = 16;

/// Sizes at or above this render with bold emphasis.
const BOLD_POINT_SIZE: u16 = 24;

/// Number of rows the label's line box occupies at `point_size`. Never zero.
pub fn line_box_rows(point_size: u16) -> u16 {
    point_size.div_ceil(CELL_POINT_HEIGHT).max(1)
}

/// Build the banner content: exactly one line, no inputs, no side effects.
/// Every call returns an equal value.
pub fn fragment() -> Text<'static> {
    Text::from(Line::from(GREETING))
}

/// Place the banner in `area`. The top of the area holds the label's line box
/// (sized from [`GREETING_POINT_SIZE`]); the label sits on the bottom row of
/// that box, approximating a baseline. Undersized areas clip instead of
/// panicking.
pub fn render(f: &mut Frame, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(line_box_rows(GREETING_POINT_SIZE)),
            Constraint::Min(0),
        ])
        .split(area);

    let line_box = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[0]);

    let label = Paragraph::new(fragment()).style(label_style(theme, GREETING_POINT_SIZE));
    f.render_widget(label, line_box[1]);
}

/// Preview variant: the banner across the whole frame with the built-in
/// theme. Takes no runtime input, so repeated draws are identical; the
/// snapshot tests pin its output.
#[allow(dead_code)]
pub fn preview(f: &mut Frame) {
    render(f, f.area(), &Theme::default());
}

fn label_style(theme: &Theme, point_size: u16) -> Style {
    let style = Style::default().fg(theme.foreground);
    match point_size >= BOLD_POINT_SIZE {
        true => style.add_modifier(Modifier::BOLD),
        false => style,
    }
}
