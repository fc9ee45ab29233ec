use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;

use postmark_card::prelude::*;
use postmark_engine::logging::{init_logging, LoggingConfig};

#[derive(Parser, Debug)]
#[command(name = "postmark-viewer", version, about = "Open a greeting card in a window")]
struct Cli {
    /// Card record (JSON).
    card: PathBuf,

    /// Static preview: no tilt, no reveal, placeholders for blank text.
    #[arg(long)]
    preview: bool,

    /// Start with the envelope already open.
    #[arg(long)]
    open: bool,

    /// Behave like a touch device (no pointer tilt).
    #[arg(long)]
    touch: bool,

    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 1100.0)]
    width: f64,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 760.0)]
    height: f64,

    /// Font file for card text; a system font is used when omitted.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Log filter in env_logger syntax (overrides RUST_LOG).
    #[arg(long)]
    log: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig { env_filter: cli.log.clone(), ..LoggingConfig::default() });

    let content = read_card(&cli.card)?;
    if !cli.preview {
        content.validate().with_context(|| format!("card '{}'", cli.card.display()))?;
    }

    let title = match content.from_name.trim() {
        "" => "You've Got Mail".to_string(),
        from => format!("You've Got Mail from {from}"),
    };
    let initial_state = if cli.open { RevealState::Open } else { RevealState::Unopened };

    let mut app = Application::new()
        .title(title)
        .size(cli.width, cli.height)
        .card(content)
        .options(SceneOptions { preview: cli.preview, initial_state })
        .touch(cli.touch);
    if let Some(dir) = cli.card.parent() {
        app = app.photo_base(dir);
    }
    if let Some(font) = load_font(cli.font.as_deref())? {
        app = app.font(font);
    }
    app.run()
}

fn read_card(path: &Path) -> anyhow::Result<CardContent> {
    let src = std::fs::read_to_string(path).with_context(|| format!("read card '{}'", path.display()))?;
    let content = CardContent::from_json(&src).with_context(|| format!("parse card '{}'", path.display()))?;
    log::info!("loaded card for '{}' ({})", content.recipient_name, content.animation.as_str());
    Ok(content)
}

/// Explicit `--font` must load; otherwise the first common system font found.
fn load_font(explicit: Option<&Path>) -> anyhow::Result<Option<Vec<u8>>> {
    if let Some(path) = explicit {
        let bytes = std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        return Ok(Some(bytes));
    }
    let found = [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok());
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from(["postmark-viewer", "card.json", "--open", "--width", "800", "--log", "debug"]);
        assert_eq!(cli.card, PathBuf::from("card.json"));
        assert!(cli.open && !cli.preview && !cli.touch);
        assert_eq!(cli.width, 800.0);
        assert_eq!(cli.height, 760.0);
        assert_eq!(cli.log.as_deref(), Some("debug"));
    }

    #[test]
    fn missing_explicit_font_is_an_error() {
        assert!(load_font(Some(Path::new("/no/such/font.ttf"))).is_err());
    }
}
