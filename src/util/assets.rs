use std::{borrow::Cow, sync::OnceLock};

use rust_embed::RustEmbed;

/// Embed the entire `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

const STYLESHEET: &str = "main.css";
const FAVICON: &str = "favicon.svg";
const COMMISSION_DATASET: &str = "commission_data.json";

static MAIN_CSS: OnceLock<String> = OnceLock::new();
static FAVICON_DATA_URI: OnceLock<String> = OnceLock::new();

/// Returns the contents of `assets/main.css`, or nothing if it was not embedded.
pub fn main_css() -> &'static str {
    MAIN_CSS
        .get_or_init(|| load_text(STYLESHEET).unwrap_or_default())
        .as_str()
}

/// Returns a data URI for the SVG favicon.
pub fn favicon_data_uri() -> &'static str {
    FAVICON_DATA_URI
        .get_or_init(|| {
            let svg = load_text(FAVICON).unwrap_or_default();
            format!("data:image/svg+xml,{}", escape_data_uri(&svg))
        })
        .as_str()
}

/// Raw bytes of the bundled commission dataset.
pub fn commission_dataset() -> Option<Cow<'static, [u8]>> {
    EmbeddedAssets::get(COMMISSION_DATASET).map(|file| file.data)
}

fn load_text(name: &str) -> Option<String> {
    let file = EmbeddedAssets::get(name)?;
    String::from_utf8(file.data.into_owned()).ok()
}

// Enough escaping for an inline SVG inside a `href` attribute.
fn escape_data_uri(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '%' => output.push_str("%25"),
            '#' => output.push_str("%23"),
            '"' => output.push('\''),
            '<' => output.push_str("%3C"),
            '>' => output.push_str("%3E"),
            '\n' | '\r' => output.push(' '),
            _ => output.push(ch),
        }
    }
    output
}
