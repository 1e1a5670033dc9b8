//! Frame layout: header, history, composer and footer.

use audiotech_common::{ConversationState, Message, Role};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::quick_actions::{QUICK_ACTIONS, QUICK_ACTIONS_TITLE};

use super::app::{App, Notice};
use super::markdown::render_markdown;

const TITLE: &str = "AudioTech Pro";
const ONLINE: &str = "● Support AI Online";
const PRODUCTS: &str = "Logic Pro / Pro Tools / macOS Support";
const WELCOME_TITLE: &str = "Como posso ajudar seu estúdio hoje?";
const WELCOME_BODY: &str = "Sou seu especialista em Apple e Produção Musical. Envie fotos da tela, erros ou dúvidas sobre DAWs.";
const FOOTER: &str = "IA especializada em Áudio Pro. Para hardware físico, agende com a bancada.";
const USER_LABEL: &str = "Você";
const MODEL_LABEL: &str = "AudioTech AI";
const MAX_COMPOSER_LINES: u16 = 6;

const ACCENT: Color = Color::Rgb(96, 165, 250);
const MODEL_ACCENT: Color = Color::Rgb(234, 88, 12);
const MUTED: Color = Color::Rgb(107, 114, 128);

/// Draw the whole UI. Returns the largest useful scroll offset for the
/// history at this size.
pub fn render(frame: &mut Frame, app: &App) -> u16 {
    let composer_rows = (app.composer().line_count() as u16).clamp(1, MAX_COMPOSER_LINES);
    let [header, body, composer, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(composer_rows + 2),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header);
    let max_offset = if app.conversation().state().is_empty() {
        render_welcome(frame, body, app.quick_actions_visible());
        0
    } else {
        render_history(
            frame,
            body,
            app.conversation().state(),
            app.frame(),
            app.scroll_offset(),
        )
    };
    render_composer(frame, composer, app);
    render_footer(frame, footer, app);
    max_offset
}

fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::new().fg(MUTED));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let left = Text::from(vec![
        Line::from(TITLE.bold()),
        Line::from(ONLINE.fg(Color::Green)),
    ]);
    frame.render_widget(Paragraph::new(left), inner);
    frame.render_widget(
        Paragraph::new(PRODUCTS.fg(MUTED)).alignment(Alignment::Right),
        inner,
    );
}

fn render_welcome(frame: &mut Frame, area: Rect, show_quick_actions: bool) {
    let mut lines = vec![
        Line::default(),
        Line::from(WELCOME_TITLE.bold().fg(Color::White)),
        Line::from(WELCOME_BODY.fg(MUTED)),
    ];
    if show_quick_actions {
        lines.push(Line::default());
        lines.push(Line::from(
            QUICK_ACTIONS_TITLE
                .to_uppercase()
                .fg(MUTED)
                .add_modifier(Modifier::BOLD),
        ));
        for (index, action) in QUICK_ACTIONS.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("F{}  ", index + 1), Style::new().fg(ACCENT).bold()),
                Span::raw(action.label),
            ]));
        }
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Draw the history pinned to its last row, `scroll_offset` rows up from
/// the bottom. Returns the largest useful offset.
fn render_history(
    frame: &mut Frame,
    area: Rect,
    state: &ConversationState,
    anim_frame: u64,
    scroll_offset: u16,
) -> u16 {
    let paragraph = Paragraph::new(history_lines(state, anim_frame)).wrap(Wrap { trim: false });
    let total = u16::try_from(paragraph.line_count(area.width)).unwrap_or(u16::MAX);
    let max_offset = total.saturating_sub(area.height);
    let top = max_offset.saturating_sub(scroll_offset.min(max_offset));

    frame.render_widget(paragraph.scroll((top, 0)), area);
    max_offset
}

/// Lines for every message plus the loading indicator.
pub fn history_lines(state: &ConversationState, frame: u64) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in state.messages() {
        match message.role() {
            Role::User => push_user_message(&mut lines, message),
            Role::Model => push_model_message(&mut lines, message),
        }
        lines.push(Line::default());
    }
    if state.is_loading() {
        lines.push(loading_line(frame));
    }
    lines
}

fn push_user_message(lines: &mut Vec<Line<'static>>, message: &Message) {
    lines.push(
        Line::from(vec![
            Span::styled(message.time_label(), Style::new().fg(MUTED)),
            Span::raw("  "),
            Span::styled(USER_LABEL, Style::new().fg(ACCENT).bold()),
        ])
        .alignment(Alignment::Right),
    );
    if let Some(image) = message.image() {
        let label = image.label().unwrap_or("imagem");
        let kib = image.decoded_len().div_ceil(1024);
        lines.push(
            Line::from(Span::styled(
                format!("[imagem: {label} · {} · {kib} KB]", image.mime_type()),
                Style::new().fg(ACCENT).italic(),
            ))
            .alignment(Alignment::Right),
        );
    }
    if !message.content().is_empty() {
        for text in message.content().split('\n') {
            lines.push(Line::from(text.to_string()).alignment(Alignment::Right));
        }
    }
}

fn push_model_message(lines: &mut Vec<Line<'static>>, message: &Message) {
    lines.push(Line::from(vec![
        Span::styled(MODEL_LABEL, Style::new().fg(MODEL_ACCENT).bold()),
        Span::raw("  "),
        Span::styled(message.time_label(), Style::new().fg(MUTED)),
    ]));
    lines.extend(render_markdown(message.content()).lines);
}

/// Three dots with one raised, moving on every tick.
fn loading_line(frame: u64) -> Line<'static> {
    let lit = (frame % 3) as usize;
    let mut spans = vec![
        Span::styled(MODEL_LABEL, Style::new().fg(MODEL_ACCENT).bold()),
        Span::raw("  "),
    ];
    for dot in 0..3 {
        let style = if dot == lit {
            Style::new().fg(Color::White)
        } else {
            Style::new().fg(MUTED)
        };
        spans.push(Span::styled("● ", style));
    }
    Line::from(spans)
}

fn render_composer(frame: &mut Frame, area: Rect, app: &App) {
    let composer = app.composer();
    let loading = app.conversation().is_loading();

    let mut title = String::from(" Mensagem ");
    if let Some(image) = composer.image() {
        title = format!(" Mensagem · [img] {} ", image.label().unwrap_or("imagem"));
    }
    if loading {
        title.push_str("· aguardando resposta ");
    }
    let border = if loading { MUTED } else { ACCENT };
    let block = Block::bordered()
        .title(title)
        .border_style(Style::new().fg(border));
    let inner = block.inner(area);

    let (row, col) = composer.cursor_position();
    let row = row as u16;
    let visible_rows = inner.height.max(1);
    let scroll = row.saturating_sub(visible_rows - 1);

    let text = if composer.is_empty() {
        Text::from(Line::from(composer.placeholder().fg(MUTED)))
    } else {
        Text::from(composer.text().to_string())
    };
    frame.render_widget(Paragraph::new(text).block(block).scroll((scroll, 0)), area);

    let x = inner.x.saturating_add(col as u16).min(inner.right().saturating_sub(1));
    let y = inner.y.saturating_add(row - scroll);
    frame.set_cursor_position((x, y));
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let usage = format!(
        "{} · {} tokens ",
        app.model_name(),
        app.usage().total_tokens()
    );
    let [left, right] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(usage.chars().count() as u16),
    ])
    .areas(area);

    let status = match app.notice() {
        Some(Notice::Error(text)) => Line::from(text.clone().fg(Color::Red)),
        Some(Notice::Info(text)) => Line::from(text.clone().fg(Color::Cyan)),
        None => match app.conversation().state().last_error() {
            Some(error) => Line::from(error.to_string().fg(Color::Red)),
            None => Line::from(FOOTER.fg(MUTED)),
        },
    };
    frame.render_widget(Paragraph::new(status), left);
    frame.render_widget(Paragraph::new(usage.fg(MUTED)), right);
}
