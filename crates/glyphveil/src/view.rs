//! Page rendering.
//!
//! Every function here draws from a [`Scene`] and nothing else, so the
//! whole page can be rendered into a test backend without a live terminal.

use glyphveil_background::{Canvas, Dissolve};
use glyphveil_core::{Tab, Theme};
use glyphveil_fonts::{LETTER_HEIGHT, banner_width, build_banner, can_render};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Margin, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Tabs, Wrap},
};

use crate::content::Content;
use crate::state::{GALLERY_COLUMNS, GALLERY_SLOTS, Section, ViewState};

/// Inputs for one frame of the page.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub state: &'a ViewState,
    pub content: &'a Content,
    pub canvas: &'a Canvas,
    pub dissolve: &'a Dissolve,
    pub now_ms: u64,
    pub year: i32,
}

/// Screen regions the event loop needs for pointer hit-testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitAreas {
    /// Hero card, when visible.
    pub card: Option<Rect>,
}

/// Draw the whole page.
pub fn render(frame: &mut Frame, scene: &Scene) -> HitAreas {
    let area = frame.area();
    let theme = scene.state.theme;

    frame.render_widget(scene.canvas, area);

    let [header, main, footer, help] = Layout::vertical([
        Constraint::Length(1), // Brand and tabs
        Constraint::Fill(1),   // Section
        Constraint::Length(1), // Footer
        Constraint::Length(1), // Key help
    ])
    .areas(area);

    render_header(frame, header, scene);

    let mut hit = HitAreas::default();
    match scene.state.section {
        Section::Hero => hit.card = Some(render_hero(frame, main, scene)),
        Section::Gallery => render_gallery(frame, main, scene),
    }

    render_footer(frame, footer, scene);
    render_help(frame, help, theme, scene.state.modal.is_some());

    if let Some(slot) = scene.state.modal {
        render_modal(frame, area, scene, slot);
    }

    hit
}

fn render_header(frame: &mut Frame, area: Rect, scene: &Scene) {
    let theme = scene.state.theme;
    let [brand, tabs] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(tabs_width())]).areas(area);

    let name = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        scene.content.brand.name().bold().fg(theme.text()),
    ]));
    frame.render_widget(name, brand);

    let selected = Tab::ALL
        .iter()
        .position(|t| *t == scene.state.tab)
        .unwrap_or(0);
    let tabs_widget = Tabs::new(Tab::ALL.iter().map(|t| format!(" {} ", t.label())))
        .select(selected)
        .style(Style::new().fg(theme.muted()))
        .highlight_style(Style::new().fg(theme.on_accent()).bg(theme.accent()).bold())
        .divider(" ");
    frame.render_widget(tabs_widget, tabs);
}

fn tabs_width() -> u16 {
    // Label plus padding, one divider between tabs, one trailing space.
    let labels: usize = Tab::ALL.iter().map(|t| t.label().len() + 2).sum();
    (labels + (Tab::ALL.len() - 1) * 3 + 1) as u16
}

/// Banner and card. Returns the card area.
fn render_hero(frame: &mut Frame, area: Rect, scene: &Scene) -> Rect {
    let theme = scene.state.theme;
    let name = scene.content.brand.name();

    let [_, banner, _, card_row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(LETTER_HEIGHT as u16),
        Constraint::Fill(1),
        Constraint::Length(14),
        Constraint::Length(1),
    ])
    .areas(area);

    if can_render(name) && banner_width(name) <= banner.width as usize {
        let lines: Vec<Line> = build_banner(name)
            .into_iter()
            .map(|s| Line::from(s).style(Style::new().fg(theme.text())))
            .collect();
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), banner);
    } else {
        let title = Paragraph::new(scene.content.product.bold().fg(theme.text()))
            .alignment(Alignment::Center);
        frame.render_widget(title, banner);
    }

    let [_, card, _] = Layout::horizontal([
        Constraint::Length(2),
        Constraint::Max(72),
        Constraint::Fill(1),
    ])
    .areas(card_row);

    render_card(frame, card, scene);
    card
}

fn render_card(frame: &mut Frame, area: Rect, scene: &Scene) {
    let theme = scene.state.theme;
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(theme.border()))
        .style(Style::new().bg(theme.background()));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    scene
        .dissolve
        .render(inner, frame.buffer_mut(), scene.now_ms, theme.background_rgb());

    let body = Paragraph::new(card_lines(scene))
        .wrap(Wrap { trim: true })
        .style(Style::new().fg(theme.text()));
    frame.render_widget(body, inner.inner(Margin::new(1, 0)));
}

/// Card body for the active tab.
fn card_lines<'a>(scene: &Scene<'a>) -> Vec<Line<'a>> {
    let theme = scene.state.theme;
    let content = scene.content;
    match scene.state.tab {
        Tab::General => vec![
            Line::from(content.product.bold().fg(theme.text())),
            Line::default(),
            Line::from(content.tagline.fg(theme.muted())),
            Line::default(),
            Line::from(vec![
                " 3 ".bold().fg(theme.on_accent()).bg(theme.accent()),
                " DOWNLOAD".fg(theme.text()),
            ]),
        ],
        Tab::Help => {
            let mut lines = vec![
                Line::from(content.help_title.bold().fg(theme.text())),
                Line::default(),
            ];
            lines.extend(
                content
                    .help_steps
                    .iter()
                    .map(|&step| Line::from(step.fg(theme.muted()))),
            );
            lines.push(Line::default());
            lines.push(Line::from(content.help_footnote.italic().fg(theme.muted())));
            lines
        }
        Tab::Download => {
            let mut lines = vec![
                Line::from("DOWNLOADS".bold().fg(theme.text())),
                Line::default(),
                Line::from(content.download_note.fg(theme.muted())),
                Line::default(),
            ];
            lines.extend(content.downloads.iter().map(|target| {
                Line::from(vec![
                    format!(" {:<8}", target.platform).bold().fg(theme.text()),
                    Span::raw(" "),
                    target.url.fg(theme.muted()).underlined(),
                ])
            }));
            lines
        }
    }
}

fn render_gallery(frame: &mut Frame, area: Rect, scene: &Scene) {
    let theme = scene.state.theme;
    let rows = GALLERY_SLOTS.div_ceil(GALLERY_COLUMNS);

    let [title, grid] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);
    let heading = Paragraph::new(vec![
        Line::from("Gallery".bold().fg(theme.text())),
        Line::from("Reference images".fg(theme.muted())),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(heading, title);

    let row_areas = Layout::vertical(vec![Constraint::Fill(1); rows])
        .flex(Flex::Center)
        .split(grid);
    for (r, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::horizontal(vec![Constraint::Fill(1); GALLERY_COLUMNS])
            .spacing(1)
            .split(row_area.inner(Margin::new(1, 0)));
        for (c, cell) in cells.iter().enumerate() {
            let slot = r * GALLERY_COLUMNS + c;
            let Some(item) = scene.content.gallery.get(slot) else {
                continue;
            };
            let selected = slot == scene.state.gallery_cursor;
            let border = if selected { theme.accent() } else { theme.border() };
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::new().fg(border))
                .title(format!(" {} ", item.title))
                .style(Style::new().bg(theme.background()));
            let mut lines = vec![Line::from(item.caption.fg(theme.muted()))];
            if selected {
                lines.push(Line::default());
                lines.push(Line::from(vec![
                    " View ".bold().fg(theme.on_accent()).bg(theme.accent()),
                ]));
            }
            frame.render_widget(Clear, *cell);
            frame.render_widget(
                Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
                *cell,
            );
        }
    }
}

fn render_modal(frame: &mut Frame, area: Rect, scene: &Scene, slot: usize) {
    let theme = scene.state.theme;
    let Some(item) = scene.content.gallery.get(slot) else {
        return;
    };

    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Percentage(60),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, modal, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Percentage(70),
        Constraint::Fill(1),
    ])
    .areas(middle);

    let block = Block::bordered()
        .border_type(BorderType::Double)
        .border_style(Style::new().fg(theme.accent()))
        .title(format!(" {} ", item.title))
        .title_bottom(Line::from(" × Esc ").right_aligned())
        .style(Style::new().bg(theme.background()));

    let body = Paragraph::new(vec![
        Line::default(),
        Line::from(format!("[ image {} / {} ]", slot + 1, GALLERY_SLOTS).fg(theme.muted()))
            .centered(),
        Line::default(),
        Line::from(item.caption.fg(theme.text())).centered(),
    ])
    .wrap(Wrap { trim: true })
    .block(block);

    frame.render_widget(Clear, modal);
    frame.render_widget(body, modal);
}

fn render_footer(frame: &mut Frame, area: Rect, scene: &Scene) {
    let theme = scene.state.theme;
    let copyright = format!(
        " © {} {}. All rights reserved.",
        scene.year,
        scene.content.brand.name()
    );
    let links = scene.content.footer_links.join("  ");
    let [left, right] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(links.chars().count() as u16 + 1),
    ])
    .areas(area);
    frame.render_widget(Paragraph::new(copyright.fg(theme.muted())), left);
    frame.render_widget(Paragraph::new(links.fg(theme.text())), right);
}

fn render_help(frame: &mut Frame, area: Rect, theme: Theme, modal_open: bool) {
    let key = |k: &'static str| k.bold().fg(theme.text());
    let label = |l: &'static str| l.fg(theme.muted());
    let spans = if modal_open {
        vec![key("esc"), label(" close  "), key("d"), label(" theme")]
    } else {
        vec![
            key("q"),
            label(" quit  "),
            key("1-3"),
            label(" tabs  "),
            key("tab"),
            label(" hero/gallery  "),
            key("←↑↓→"),
            label(" move  "),
            key("enter"),
            label(" view  "),
            key("d"),
            label(" theme  "),
            key("s"),
            label(" speed"),
        ]
    };
    frame.render_widget(Line::from(spans).centered(), area);
}

#[cfg(test)]
mod tests {
    use glyphveil_background::{Rgba, Surface};
    use glyphveil_core::{Brand, Size};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::state::{Action, update};

    fn draw(state: &ViewState) -> (String, HitAreas) {
        draw_sized(state, 100, 40)
    }

    fn draw_sized(state: &ViewState, width: u16, height: u16) -> (String, HitAreas) {
        let content = Content::for_brand(Brand::Gie);
        let mut canvas = Canvas::new(14, Rgba::opaque(state.theme.background_rgb()));
        canvas.set_size(Size::from_cells(width, height, 14));
        canvas.draw_glyph('×', 0.0, 14.0, Rgba::new(255, 255, 255, 1.0));
        let dissolve = Dissolve::new();
        let scene = Scene {
            state,
            content: &content,
            canvas: &canvas,
            dissolve: &dissolve,
            now_ms: 0,
            year: 2026,
        };

        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut hit = HitAreas::default();
        terminal
            .draw(|frame| hit = render(frame, &scene))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text = (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        (text, hit)
    }

    #[test]
    fn test_hero_general() {
        let (text, hit) = draw(&ViewState::default());
        assert!(text.contains("GIE Encryptor"));
        assert!(text.contains("HOME"));
        assert!(text.contains("© 2026 GIE. All rights reserved."));
        assert!(text.contains("█████"));
        assert!(hit.card.is_some());
    }

    #[test]
    fn test_narrow_hero_falls_back_to_title() {
        let (text, _) = draw_sized(&ViewState::default(), 16, 40);
        assert!(!text.contains("█████"));
        assert!(text.contains("GIE Encryptor"));
    }

    #[test]
    fn test_background_glyph_visible() {
        let (text, _) = draw(&ViewState::default());
        assert_eq!(text.lines().nth(1).and_then(|l| l.chars().next()), Some('×'));
    }

    #[test]
    fn test_download_tab() {
        let state = update(ViewState::default(), Action::SelectTab(Tab::Download));
        let (text, _) = draw(&state);
        assert!(text.contains("DOWNLOADS"));
        assert!(text.contains("Windows"));
        assert!(text.contains("Android"));
    }

    #[test]
    fn test_help_tab() {
        let state = update(ViewState::default(), Action::SelectTab(Tab::Help));
        let (text, _) = draw(&state);
        assert!(text.contains("HOW TO USE"));
        assert!(text.contains("Step I:"));
    }

    #[test]
    fn test_gallery_and_modal() {
        let state = update(ViewState::default(), Action::NextSection);
        let (text, hit) = draw(&state);
        assert!(text.contains("Reference images"));
        assert!(text.contains("Main window"));
        assert!(hit.card.is_none());

        let state = update(update(state, Action::MoveGallery(1, 0)), Action::OpenModal);
        let (text, _) = draw(&state);
        assert!(text.contains("[ image 2 / 6 ]"));
        assert!(text.contains("× Esc"));
    }

    #[test]
    fn test_light_theme_renders() {
        let state = update(ViewState::default(), Action::ToggleTheme);
        let (text, _) = draw(&state);
        assert!(text.contains("GIE Encryptor"));
    }
}
