use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold pattern"));
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("valid italic pattern"));

/// Emoji that get a styling hook, with their span class.
const EMOJI_CLASSES: &[(&str, &str)] = &[
    ("✅", "checkmark"),
    ("❌", "cross"),
    ("🎉", "celebration"),
    ("💰", "money"),
    ("📱", "phone"),
    ("🏦", "bank"),
];

/// Render assistant text into the markup shown inside a bubble.
///
/// Input is escaped first, so only the tags produced here reach the DOM.
pub fn format_message(content: &str) -> String {
    let escaped = escape_html(content);
    let bold = BOLD.replace_all(&escaped, "<strong>${1}</strong>");
    let italic = ITALIC.replace_all(&bold, "<em>${1}</em>");

    let mut html = italic.into_owned();
    for (emoji, class) in EMOJI_CLASSES {
        if html.contains(emoji) {
            html = html.replace(emoji, &format!(r#"<span class="{class}">{emoji}</span>"#));
        }
    }
    html
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
