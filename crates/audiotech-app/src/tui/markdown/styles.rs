use ratatui::style::{Color, Modifier, Style, Stylize};

#[derive(Debug, Clone)]
pub struct MarkdownStyles {
    pub h1: Style,
    pub h2: Style,
    pub h3: Style,
    pub code: Style,
    pub emphasis: Style,
    pub strong: Style,
    pub strikethrough: Style,
    pub list_marker: Style,
    pub link: Style,
    pub blockquote: Style,
    pub code_bg: Style,
    pub code_border: Style,
    pub code_header: Style,
}

impl Default for MarkdownStyles {
    fn default() -> Self {
        let accent = Color::Rgb(96, 165, 250);
        let dim_gray = Color::Rgb(75, 85, 99);
        let muted_gray = Color::Rgb(156, 163, 175);
        let code_bg_color = Color::Rgb(17, 24, 39);

        Self {
            h1: Style::new().bold().underlined().fg(Color::White),
            h2: Style::new().bold().fg(Color::White),
            h3: Style::new().bold().italic(),
            code: Style::new()
                .fg(Color::Rgb(147, 197, 253))
                .bg(code_bg_color)
                .add_modifier(Modifier::BOLD),
            emphasis: Style::new().italic(),
            // Menu names, shortcuts and paths are bolded in replies.
            strong: Style::new().bold().fg(accent),
            strikethrough: Style::new().crossed_out(),
            list_marker: Style::new().fg(accent),
            link: Style::new().fg(accent).underlined(),
            blockquote: Style::new().fg(muted_gray).italic(),
            code_bg: Style::new().bg(code_bg_color),
            code_border: Style::new().fg(dim_gray),
            code_header: Style::new().fg(muted_gray).add_modifier(Modifier::DIM),
        }
    }
}
