//! Message composer: a multi-line text buffer plus an optional image.

use std::path::PathBuf;

use audiotech_common::ImageAttachment;
use unicode_width::UnicodeWidthStr;

pub const PLACEHOLDER: &str = "Descreva seu problema ou envie uma foto da tela...";
pub const PLACEHOLDER_WITH_IMAGE: &str = "Adicione uma descrição...";

const IMAGE_COMMAND: &str = "/img";

/// A composer line that is a command rather than a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerCommand {
    Attach(PathBuf),
    Detach,
}

/// Recognise `/img <path>` and a bare `/img`.
pub fn parse_command(text: &str) -> Option<ComposerCommand> {
    let text = text.trim();
    if text == IMAGE_COMMAND {
        return Some(ComposerCommand::Detach);
    }
    let rest = text.strip_prefix(IMAGE_COMMAND)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(ComposerCommand::Attach(expand_home(rest.trim())))
}

fn expand_home(path: &str) -> PathBuf {
    let path = path.trim_matches(|c| c == '"' || c == '\'');
    match path.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        },
        None => PathBuf::from(path),
    }
}

/// Text buffer with a byte cursor that always sits on a char boundary.
#[derive(Debug, Default, Clone)]
pub struct Composer {
    text: String,
    cursor: usize,
    image: Option<ImageAttachment>,
}

impl Composer {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    pub fn attach(&mut self, image: ImageAttachment) {
        self.image = Some(image);
    }

    pub fn detach(&mut self) -> Option<ImageAttachment> {
        self.image.take()
    }

    pub fn placeholder(&self) -> &'static str {
        if self.image.is_some() {
            PLACEHOLDER_WITH_IMAGE
        } else {
            PLACEHOLDER
        }
    }

    /// Clear the text, keeping any attachment.
    pub fn clear_text(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Take text and attachment, leaving the composer empty.
    pub fn take(&mut self) -> (String, Option<ImageAttachment>) {
        self.cursor = 0;
        (std::mem::take(&mut self.text), self.image.take())
    }

    pub fn insert_str(&mut self, value: &str) {
        let normalized = value.replace("\r\n", "\n").replace('\r', "\n");
        self.text.insert_str(self.cursor, &normalized);
        self.cursor += normalized.len();
    }

    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = self.text[..self.cursor]
            .rfind('\n')
            .map(|idx| idx + 1)
            .unwrap_or(0);
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text[self.cursor..]
            .find('\n')
            .map(|idx| self.cursor + idx)
            .unwrap_or(self.text.len());
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Cursor as (row, display column).
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let row = before.matches('\n').count();
        let line_start = before.rfind('\n').map(|idx| idx + 1).unwrap_or(0);
        (row, before[line_start..].width())
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|ch| self.cursor + ch.len_utf8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_respects_multibyte_chars() {
        let mut composer = Composer::default();
        composer.insert_str("latência");
        composer.move_left();
        composer.move_left();
        composer.backspace();
        assert_eq!(composer.text(), "latênia");
        composer.move_end();
        composer.backspace();
        assert_eq!(composer.text(), "latêni");
        composer.move_home();
        composer.delete();
        assert_eq!(composer.text(), "atêni");
    }

    #[test]
    fn newline_and_cursor_position() {
        let mut composer = Composer::default();
        composer.insert_str("Olá");
        composer.newline();
        composer.insert_str("ação");
        assert_eq!(composer.line_count(), 2);
        assert_eq!(composer.cursor_position(), (1, 4));
        composer.move_home();
        assert_eq!(composer.cursor_position(), (1, 0));
    }

    #[test]
    fn pasted_carriage_returns_become_newlines() {
        let mut composer = Composer::default();
        composer.insert_str("um\r\ndois\rtrês");
        assert_eq!(composer.text(), "um\ndois\ntrês");
    }

    #[test]
    fn placeholder_changes_with_attachment() {
        let mut composer = Composer::default();
        assert_eq!(composer.placeholder(), PLACEHOLDER);
        composer.attach(ImageAttachment::from_bytes(b"\x89PNG\r\n\x1a\n"));
        assert_eq!(composer.placeholder(), PLACEHOLDER_WITH_IMAGE);
        assert!(composer.detach().is_some());
        assert_eq!(composer.placeholder(), PLACEHOLDER);
    }

    #[test]
    fn take_empties_text_and_attachment() {
        let mut composer = Composer::default();
        composer.insert_str("veja");
        composer.attach(ImageAttachment::from_bytes(b"\xff\xd8\xff"));
        let (text, image) = composer.take();
        assert_eq!(text, "veja");
        assert!(image.is_some());
        assert!(composer.is_empty());
        assert!(composer.image().is_none());
    }

    #[test]
    fn image_command_parsing() {
        assert_eq!(parse_command("/img"), Some(ComposerCommand::Detach));
        assert_eq!(parse_command("  /img  "), Some(ComposerCommand::Detach));
        assert_eq!(
            parse_command("/img /tmp/erro logic.png"),
            Some(ComposerCommand::Attach(PathBuf::from("/tmp/erro logic.png")))
        );
        assert_eq!(
            parse_command("/img \"/tmp/tela.jpg\""),
            Some(ComposerCommand::Attach(PathBuf::from("/tmp/tela.jpg")))
        );
        assert_eq!(parse_command("/imagem"), None);
        assert_eq!(parse_command("Meu plugin não valida"), None);
    }
}
