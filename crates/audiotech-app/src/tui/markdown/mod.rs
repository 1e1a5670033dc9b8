//! Markdown to ratatui `Text` for model replies.

mod render;
mod styles;

pub use render::render_markdown;
