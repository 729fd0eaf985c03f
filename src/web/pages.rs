//! HTML page and fragment templates for the web surface.
//!
//! Plain string templates: the page posts forms with htmx and swaps the
//! returned fragments into the result region.

const DEFAULT_THEME: &str = "milkshake";

/// DaisyUI themes offered in the appearance dropdown.
const THEMES: &[&str] = &[
    "light",
    "dark",
    "cupcake",
    "bumblebee",
    "emerald",
    "corporate",
    "synthwave",
    "retro",
    "cyberpunk",
    "valentine",
    "halloween",
    "garden",
    "forest",
    "aqua",
    "lofi",
    "pastel",
    "fantasy",
    "wireframe",
    "black",
    "luxury",
    "dracula",
    "cmyk",
    "autumn",
    "business",
    "acid",
    "lemonade",
    "night",
    "coffee",
    "winter",
    "dim",
    "nord",
    "sunset",
    "milkshake",
    "mindful",
    "pursuit",
];

pub fn index_page(version: &str, default_model: &str, models: &[&str]) -> String {
    let model_choices = models
        .iter()
        .map(|model| {
            let selected = if *model == default_model { " selected" } else { "" };
            format!(r#"<option value="{model}"{selected}>{model}</option>"#)
        })
        .collect::<String>();

    let theme_choices = THEMES
        .iter()
        .map(|theme| {
            let selected = if *theme == DEFAULT_THEME { " selected" } else { "" };
            format!(r#"<option value="{theme}"{selected}>{theme}</option>"#)
        })
        .collect::<String>();

    format!(
        r##"<!DOCTYPE html>
<html lang="en" data-theme="{DEFAULT_THEME}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Promptforge</title>
<link href="https://cdn.jsdelivr.net/npm/daisyui@4/dist/full.min.css" rel="stylesheet" type="text/css">
<script src="https://cdn.tailwindcss.com"></script>
<script src="https://unpkg.com/htmx.org@1.9.12"></script>
</head>
<body class="min-h-screen bg-base-200">
<main class="container mx-auto max-w-3xl p-6 space-y-6">
<header class="flex items-baseline justify-between">
<h1 class="text-3xl font-bold">Promptforge</h1>
<select class="select select-sm" onchange="document.documentElement.dataset.theme=this.value">{theme_choices}</select>
</header>
<form hx-post="/prompt" hx-target="#result" class="card bg-base-100 p-6 space-y-4">
<textarea name="prompt" rows="4" class="textarea textarea-bordered w-full" placeholder="Enter your rough prompt here..."></textarea>
<div class="flex items-center gap-4">
<select name="model" class="select select-bordered">{model_choices}</select>
<button type="submit" class="btn btn-primary">Craft prompt</button>
</div>
</form>
<section id="result"></section>
<footer class="text-sm opacity-60">Promptforge v{version}</footer>
</main>
</body>
</html>
"##
    )
}

pub fn crafted_prompt_fragment(rendered_html: &str, raw_prompt: &str, model: &str) -> String {
    format!(
        r##"<div class="card bg-base-100 p-6 space-y-4">
<h2 class="text-xl font-semibold">Your crafted prompt</h2>
<div class="prose max-w-none">{rendered_html}</div>
<form hx-post="/execute" hx-target="#result">
<input type="hidden" name="model" value="{model}">
<textarea name="prompt" class="hidden">{escaped}</textarea>
<button type="submit" class="btn btn-secondary">Execute prompt</button>
</form>
</div>
"##,
        escaped = html_escape(raw_prompt),
    )
}

pub fn final_answer_fragment(rendered_html: &str) -> String {
    format!(
        r#"<div class="card bg-base-100 p-6 space-y-4">
<h2 class="text-xl font-semibold">Final answer</h2>
<div class="prose max-w-none">{rendered_html}</div>
</div>
"#
    )
}

pub fn error_fragment(message: &str) -> String {
    format!(
        r#"<div class="alert alert-error">{}</div>
"#,
        html_escape(message)
    )
}

fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_page_offers_models_and_themes() {
        let page = index_page("1.2.3", "gemini-2.5-flash", &["m-one", "gemini-2.5-flash"]);
        assert!(page.contains(r#"<option value="m-one">m-one</option>"#));
        assert!(page.contains(r#"<option value="gemini-2.5-flash" selected>"#));
        assert!(page.contains("milkshake"));
        assert!(page.contains("Promptforge v1.2.3"));
    }

    #[test]
    fn crafted_fragment_carries_the_raw_prompt_for_execution() {
        let fragment = crafted_prompt_fragment("<p>shown</p>", "raw & <tricky>", "model-x");
        assert!(fragment.contains("<p>shown</p>"));
        assert!(fragment.contains("raw &amp; &lt;tricky&gt;"));
        assert!(fragment.contains(r#"value="model-x""#));
        assert!(fragment.contains(r#"hx-post="/execute""#));
    }

    #[test]
    fn error_fragment_escapes_its_message() {
        let fragment = error_fragment("bad <input>");
        assert!(fragment.contains("bad &lt;input&gt;"));
    }

    #[test]
    fn model_escaping_keeps_quotes_out_of_attributes() {
        assert_eq!(html_escape(r#"a"b"#), "a&quot;b");
    }
}
