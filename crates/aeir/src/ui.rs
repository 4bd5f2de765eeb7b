//! Foreground widgets drawn over the flight grid.

use aeir_core::{ChatMessage, Role};
use aeir_fonts::{GLYPH_HEIGHT, build_banner};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Wrap},
};

use crate::chat::ChatSession;
use crate::portfolio::Filter;

/// Brand accent (cyan 400).
pub const ACCENT: Color = Color::Rgb(34, 211, 238);
/// Muted text (slate 400).
const MUTED: Color = Color::Rgb(148, 163, 184);
/// Panel fill (slate 900).
const PANEL_BG: Color = Color::Rgb(15, 23, 42);

/// Services offered, as (title, description).
pub const SERVICES: &[(&str, &str)] = &[
    (
        "Real Estate",
        "Promote properties with striking 4K aerial footage that shows off location \
         and scale like never before.",
    ),
    (
        "Events & Weddings",
        "Capture your most important moments from above. Cinematic coverage for \
         weddings, concerts and corporate events.",
    ),
];

/// Contact line shown in the footer.
const CONTACT: &str = "info@aeir.space  ·  instagram.com/aeir_gr";

/// Hero copy: logo, badge, headline and tagline.
pub fn render_hero(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),                   // Badge
        Constraint::Length(1),                   // Spacing
        Constraint::Length(GLYPH_HEIGHT as u16), // Logo
        Constraint::Length(1),                   // Spacing
        Constraint::Length(1),                   // Headline
        Constraint::Length(1),                   // Tagline
        Constraint::Fill(1),
    ])
    .split(area);

    let badge = Paragraph::new("CINEMATIC FPV & AERIAL SYSTEMS")
        .style(Style::new().fg(ACCENT).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(badge, chunks[1]);

    let logo: Vec<Line> = build_banner("AEIR")
        .into_iter()
        .map(|row| Line::from(row).style(Style::new().fg(ACCENT)))
        .collect();
    frame.render_widget(Paragraph::new(logo).alignment(Alignment::Center), chunks[3]);

    let headline = Line::from(vec![
        "BEYOND THE ".bold().white(),
        Span::styled("HORIZON", Style::new().fg(ACCENT).add_modifier(Modifier::BOLD)),
    ])
    .centered();
    frame.render_widget(headline, chunks[5]);

    let tagline = Paragraph::new("Cinematic aerial photography and high-end video production.")
        .style(Style::new().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(tagline, chunks[6]);
}

/// Footer with contact details and key help.
pub fn render_footer(frame: &mut Frame, area: Rect, chat_open: bool) {
    let help = if chat_open {
        Line::from(vec![
            "enter".bold().fg(ACCENT),
            " send  ".dark_gray(),
            "esc".bold().fg(ACCENT),
            " close chat".dark_gray(),
        ])
    } else {
        Line::from(vec![
            "q".bold().fg(ACCENT),
            " quit  ".dark_gray(),
            "s".bold().fg(ACCENT),
            " services  ".dark_gray(),
            "p".bold().fg(ACCENT),
            " portfolio  ".dark_gray(),
            "a".bold().fg(ACCENT),
            " assistant  ".dark_gray(),
            Span::styled(CONTACT, Style::new().fg(MUTED)),
        ])
    };
    frame.render_widget(help.centered(), area);
}

/// Services section as a centered panel.
pub fn render_services(frame: &mut Frame, area: Rect) {
    let panel = centered(area, 64, (SERVICES.len() * 4 + 3) as u16);

    let mut lines = vec![
        Line::from("We provide complete aerial cinematography solutions tailored to you.")
            .style(Style::new().fg(MUTED)),
        Line::default(),
    ];
    for (title, description) in SERVICES {
        lines.push(Line::from(Span::styled(
            *title,
            Style::new().fg(ACCENT).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(*description).style(Style::new().fg(Color::Gray)));
        lines.push(Line::default());
    }

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(ACCENT))
        .title(" Our Services ")
        .style(Style::new().bg(PANEL_BG));

    frame.render_widget(Clear, panel);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        panel,
    );
}

/// Portfolio panel: filter chips above the matching projects.
pub fn render_portfolio(frame: &mut Frame, area: Rect, filter: Filter) {
    let panel = centered(area, 64, 12);

    let mut chips = Vec::new();
    for option in Filter::ALL {
        let chip = format!(" {} ", option.label());
        chips.push(if option == filter {
            Span::styled(chip, Style::new().fg(Color::Black).bg(ACCENT).bold())
        } else {
            Span::styled(chip, Style::new().fg(MUTED))
        });
        chips.push(Span::raw(" "));
    }

    let mut lines = vec![
        Line::from("A selection of our favourite shots. Every project tells its own story.")
            .style(Style::new().fg(MUTED)),
        Line::default(),
        Line::from(chips),
        Line::default(),
    ];
    for project in filter.projects() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<14}", project.category.label().to_uppercase()),
                Style::new().fg(ACCENT),
            ),
            Span::styled(project.title, Style::new().fg(Color::White).bold()),
        ]));
    }

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(ACCENT))
        .title(" Portfolio ")
        .title_bottom(Line::from(" f filter ").right_aligned())
        .style(Style::new().bg(PANEL_BG));

    frame.render_widget(Clear, panel);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        panel,
    );
}

/// Chat panel anchored to the bottom-right corner.
pub fn render_chat(frame: &mut Frame, area: Rect, chat: &ChatSession) {
    let width = area.width.min(48);
    let height = area.height.saturating_sub(2).min(20);
    let panel = Rect::new(
        area.right().saturating_sub(width + 1),
        area.bottom().saturating_sub(height + 1),
        width,
        height,
    );

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(ACCENT))
        .title(" ● AEIR Assistant ")
        .style(Style::new().bg(PANEL_BG));
    let inner = block.inner(panel);
    frame.render_widget(Clear, panel);
    frame.render_widget(block, panel);

    let [transcript_area, input_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

    let mut lines = visible_messages(chat.transcript(), transcript_area);
    if chat.is_loading() {
        lines.push(Line::from("• • •").style(Style::new().fg(MUTED)));
    }
    // Keep the newest lines in view
    let overflow = (lines.len() as u16).saturating_sub(transcript_area.height);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((overflow, 0)),
        transcript_area,
    );

    let input = Line::from(vec![
        "› ".fg(ACCENT),
        Span::raw(chat.input().to_string()),
        "█".fg(ACCENT),
    ]);
    frame.render_widget(input, input_area);
}

/// Newest messages that fit in `area`, oldest first.
fn visible_messages(messages: &[ChatMessage], area: Rect) -> Vec<Line<'static>> {
    let width = area.width.max(1) as usize;
    let mut budget = area.height as usize;
    let mut lines = Vec::new();

    for msg in messages.iter().rev() {
        let (label, style) = match msg.role {
            Role::User => ("you", Style::new().fg(ACCENT)),
            Role::Model => ("aeir", Style::new().fg(Color::Gray)),
        };
        let text = format!("{label} {}: {}", msg.timestamp.format("%H:%M"), msg.text);
        let rows = text.chars().count().div_ceil(width).max(1);
        if rows > budget && !lines.is_empty() {
            break;
        }
        budget = budget.saturating_sub(rows);
        lines.push(Line::from(Span::styled(text, style)));
    }

    lines.reverse();
    lines
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
