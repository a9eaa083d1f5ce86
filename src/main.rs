use std::io::{self, IsTerminal, Read};

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "characa-card",
    version,
    about = "Render a character card image from card data"
)]
struct Cli {
    /// Card data JSON file (reads stdin when omitted)
    #[arg(short = 'c', long = "card")]
    card: Option<String>,

    /// Output PNG path (default: characa-<timestamp>.png)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Directory holding job icon images (<NameEn>.png)
    #[arg(long = "icons-dir")]
    icons_dir: Option<String>,

    /// Font file to use instead of the card's font choice
    #[arg(long = "font-path")]
    font_path: Option<String>,

    /// Render a preview at this width instead of the export resolution
    #[arg(long = "preview-width")]
    preview_width: Option<f32>,

    /// Enable verbose logging
    #[arg(long = "verbose")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    characa_card::logging::init(cli.verbose)?;

    let input = if cli.card.is_none() && !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Some(buffer)
    } else {
        None
    };

    let output = characa_card::run(
        characa_card::Config {
            card_path: cli.card,
            output: cli.output,
            icons_dir: cli.icons_dir,
            font_path: cli.font_path,
            preview_width: cli.preview_width,
            verbose: cli.verbose,
        },
        input,
    )
    .await?;

    println!("{}", output);
    Ok(())
}
