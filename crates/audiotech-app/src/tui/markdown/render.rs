use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use unicode_width::UnicodeWidthStr;

use super::styles::MarkdownStyles;

mod code_block {
    pub const TOP_LEFT: &str = "┌";
    pub const TOP_RIGHT: &str = "┐";
    pub const BOTTOM_LEFT: &str = "└";
    pub const BOTTOM_RIGHT: &str = "┘";
    pub const HORIZONTAL: &str = "─";
    pub const VERTICAL: &str = "│";
}

pub fn render_markdown(input: &str) -> Text<'static> {
    let mut renderer = Renderer::new();
    renderer.run(input);
    Text::from(renderer.finish())
}

struct Renderer {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    styles: MarkdownStyles,
    inline_styles: Vec<Style>,
    /// Next number for ordered lists, `None` for bullet lists.
    list_stack: Vec<Option<u64>>,
    pending_marker: Option<Span<'static>>,
    in_code_block: bool,
    code_block_lang: Option<String>,
    code_block_buf: String,
}

impl Renderer {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            current: Vec::new(),
            styles: MarkdownStyles::default(),
            inline_styles: Vec::new(),
            list_stack: Vec::new(),
            pending_marker: None,
            in_code_block: false,
            code_block_lang: None,
            code_block_buf: String::new(),
        }
    }

    fn run(&mut self, input: &str) {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        let parser = Parser::new_ext(input, options);
        for event in parser {
            self.handle_event(event);
        }
        self.flush_line();
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }

    fn handle_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.push_inline_code(&code),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.flush_line(),
            Event::Rule => self.rule(),
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => self.push_heading_style(level),
            Tag::Emphasis => self.push_inline(self.styles.emphasis),
            Tag::Strong => self.push_inline(self.styles.strong),
            Tag::Strikethrough => self.push_inline(self.styles.strikethrough),
            Tag::BlockQuote(_) => self.push_inline(self.styles.blockquote),
            Tag::List(start) => {
                self.flush_line();
                self.list_stack.push(start);
            }
            Tag::Item => self.push_list_marker(),
            Tag::CodeBlock(kind) => self.start_code_block(kind),
            Tag::Link { .. } => self.push_inline(self.styles.link),
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.flush_line();
                self.inline_styles.pop();
            }
            TagEnd::Paragraph => {
                self.flush_line();
                if self.list_stack.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::BlockQuote(_)
            | TagEnd::Link => {
                self.inline_styles.pop();
            }
            TagEnd::List(_) => {
                self.flush_line();
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::CodeBlock => self.end_code_block(),
            _ => {}
        }
    }

    /// Nested styles accumulate, so bold inside a heading stays a heading.
    fn push_inline(&mut self, style: Style) {
        let base = self.inline_styles.last().copied().unwrap_or_default();
        self.inline_styles.push(base.patch(style));
    }

    fn push_text(&mut self, text: &str) {
        if self.in_code_block {
            self.code_block_buf.push_str(text);
            return;
        }
        self.current.push(self.styled_span(text));
    }

    fn push_inline_code(&mut self, code: &str) {
        self.current
            .push(Span::styled(format!(" {code} "), self.styles.code));
    }

    fn push_heading_style(&mut self, level: HeadingLevel) {
        self.flush_line();
        let style = match level {
            HeadingLevel::H1 => self.styles.h1,
            HeadingLevel::H2 => self.styles.h2,
            _ => self.styles.h3,
        };
        self.push_inline(style);
    }

    fn push_list_marker(&mut self) {
        self.flush_line();
        let depth = self.list_stack.len().saturating_sub(1);
        let indent = "  ".repeat(depth);
        let marker = match self.list_stack.last_mut() {
            Some(Some(num)) => {
                let value = format!("{indent}{num}. ");
                *num += 1;
                value
            }
            _ => format!("{indent}• "),
        };
        self.pending_marker = Some(Span::styled(marker, self.styles.list_marker));
    }

    fn start_code_block(&mut self, kind: CodeBlockKind<'_>) {
        self.flush_line();
        self.in_code_block = true;
        self.code_block_buf.clear();
        self.code_block_lang = match kind {
            CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
            _ => None,
        };
    }

    fn end_code_block(&mut self) {
        let lang = self.code_block_lang.take();
        let code = std::mem::take(&mut self.code_block_buf);
        let code_lines: Vec<&str> = code.trim_end_matches('\n').lines().collect();

        let content_width = code_lines
            .iter()
            .map(|l| l.width())
            .max()
            .unwrap_or(0)
            .max(20);
        // "│ " prefix and " │" suffix
        let box_width = content_width + 4;

        let header = lang.as_deref().unwrap_or("code");
        self.lines.push(build_header_line(
            header,
            box_width,
            self.styles.code_header,
            self.styles.code_border,
        ));
        for line in code_lines {
            self.lines.push(build_code_line(
                line,
                content_width,
                self.styles.code_border,
                self.styles.code_bg,
            ));
        }
        self.lines
            .push(build_bottom_line(box_width, self.styles.code_border));
        self.blank_line();

        self.in_code_block = false;
    }

    fn soft_break(&mut self) {
        self.current.push(self.styled_span(" "));
    }

    fn rule(&mut self) {
        self.flush_line();
        self.lines.push(Line::from("─".repeat(24)));
        self.blank_line();
    }

    fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn flush_line(&mut self) {
        if self.current.is_empty() && self.pending_marker.is_none() {
            return;
        }
        let mut spans = Vec::with_capacity(self.current.len() + 1);
        if let Some(marker) = self.pending_marker.take() {
            spans.push(marker);
        }
        spans.append(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn styled_span(&self, text: &str) -> Span<'static> {
        let style = self.inline_styles.last().copied().unwrap_or_default();
        Span::styled(text.to_string(), style)
    }
}

/// `┌─ lang ─────┐`
fn build_header_line(
    lang: &str,
    width: usize,
    header_style: Style,
    border_style: Style,
) -> Line<'static> {
    let label = format!(" {lang} ");
    // corners plus the leading dash
    let remaining = width.saturating_sub(3 + label.width());
    Line::from(vec![
        Span::styled(
            format!("{}{}", code_block::TOP_LEFT, code_block::HORIZONTAL),
            border_style,
        ),
        Span::styled(label, header_style),
        Span::styled(
            format!(
                "{}{}",
                code_block::HORIZONTAL.repeat(remaining),
                code_block::TOP_RIGHT
            ),
            border_style,
        ),
    ])
}

/// `│ code │`, padded to the box width.
fn build_code_line(
    code: &str,
    content_width: usize,
    border_style: Style,
    bg_style: Style,
) -> Line<'static> {
    let padding = " ".repeat(content_width.saturating_sub(code.width()));
    Line::from(vec![
        Span::styled(format!("{} ", code_block::VERTICAL), border_style),
        Span::styled(format!("{code}{padding}"), bg_style),
        Span::styled(format!(" {}", code_block::VERTICAL), border_style),
    ])
}

/// `└──────────┘`
fn build_bottom_line(width: usize, border_style: Style) -> Line<'static> {
    Line::from(Span::styled(
        format!(
            "{}{}{}",
            code_block::BOTTOM_LEFT,
            code_block::HORIZONTAL.repeat(width.saturating_sub(2)),
            code_block::BOTTOM_RIGHT
        ),
        border_style,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn numbered_steps_are_numbered_in_order() {
        let text = render_markdown("1. Abra o Logic\n2. Vá em **Preferências**\n3. Clique em Audio\n");
        assert_eq!(
            plain(&text),
            vec![
                "1. Abra o Logic",
                "2. Vá em Preferências",
                "3. Clique em Audio"
            ]
        );
    }

    #[test]
    fn strong_text_uses_strong_style() {
        let text = render_markdown("Pressione **Cmd + S** agora");
        let styles = MarkdownStyles::default();
        let bold = text.lines[0]
            .spans
            .iter()
            .find(|s| s.content == "Cmd + S")
            .unwrap();
        assert_eq!(bold.style, Style::default().patch(styles.strong));
    }

    #[test]
    fn paragraphs_are_separated_by_a_blank_line() {
        let text = render_markdown("Primeiro parágrafo.\n\nSegundo parágrafo.");
        assert_eq!(
            plain(&text),
            vec!["Primeiro parágrafo.", "", "Segundo parágrafo."]
        );
    }

    #[test]
    fn bullets_and_nested_lists_are_indented() {
        let text = render_markdown("- Spotlight\n  - Desativar indexação\n- Energy Saver\n");
        assert_eq!(
            plain(&text),
            vec!["• Spotlight", "  • Desativar indexação", "• Energy Saver"]
        );
    }

    #[test]
    fn code_block_is_boxed_with_language_header() {
        let text = render_markdown("```bash\nsudo mdutil -a -i off\n```");
        let lines = plain(&text);
        assert!(lines[0].starts_with("┌─ bash "));
        assert!(lines[0].ends_with('┐'));
        assert!(lines[1].starts_with("│ sudo mdutil -a -i off"));
        assert!(lines[1].ends_with(" │"));
        assert!(lines[2].starts_with('└'));
        assert_eq!(lines[0].width(), lines[1].width());
        assert_eq!(lines[1].width(), lines[2].width());
    }

    #[test]
    fn inline_code_is_padded() {
        let text = render_markdown("Rode `diskutil list` no Terminal");
        assert_eq!(plain(&text), vec!["Rode  diskutil list  no Terminal"]);
    }

    #[test]
    fn heading_is_its_own_line() {
        let text = render_markdown("## Passo a passo\nVerifique o cabo.");
        assert_eq!(plain(&text), vec!["Passo a passo", "Verifique o cabo."]);
    }
}
