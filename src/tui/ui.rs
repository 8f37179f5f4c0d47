use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::state::App;
use crate::seed::LoadError;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{AddressPrompt, CardView, FilterPanel, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0)]);
    let [title_area, main_area] = layout.areas(frame.area());

    TitleBar::new(
        app.address().to_string(),
        app.status_message.clone(),
        app.filter.is_some(),
    )
    .render(frame, title_area);

    if let Some(card) = &tui.card {
        CardView::new(card).render(frame, main_area);
    }

    if let Some(panel) = tui.filter_panel.as_mut() {
        FilterPanel::new(panel).render(frame, main_area);
    }

    if let Some(prompt) = &tui.address_prompt {
        AddressPrompt::new(prompt).render(frame, main_area);
    }
}

/// Full-screen notice shown when the seed collection could not be loaded.
pub fn draw_error_view(frame: &mut Frame, source: &str, error: &LoadError) {
    let area = frame.area();
    let text = vec![
        Line::from(format!("Could not load cards from {source}")),
        Line::from(""),
        Line::from(error.to_string()),
        Line::from(""),
        Line::from("Press any key to exit."),
    ];
    let paragraph = Paragraph::new(text)
        .block(
            Block::bordered()
                .title(" ERROR ")
                .border_style(Style::default().fg(Color::Red)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, centered_band(area, 9));
}

fn centered_band(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect::new(area.x, area.y + (area.height - height) / 2, area.width, height)
}
