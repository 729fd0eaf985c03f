//! Markdown-to-HTML conversion for the web surface.

use pulldown_cmark::{html, Options, Parser};

pub fn markdown_to_html(source: &str) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let mut output = String::new();
    html::push_html(&mut output, Parser::new_ext(source, options));
    output
}
