use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "umagen", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a caption card as a PNG.
    Render(RenderArgs),
    /// Print the computed caption geometry as JSON without rendering.
    Layout(CardArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    card: CardArgs,

    /// Output PNG path.
    #[arg(long, default_value = umagen::OUTPUT_FILE_NAME)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct CardArgs {
    /// Background image (PNG, JPEG, BMP, ...).
    #[arg(long)]
    background: PathBuf,

    /// Font file for the name and main text.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Default font used when `--font` is absent or unusable.
    #[arg(long)]
    default_font: Option<PathBuf>,

    /// JSON config with default options (flags override it).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Character name.
    #[arg(long)]
    name: Option<String>,

    /// Main text; `\n` separates lines.
    #[arg(long, conflicts_with = "text_file")]
    text: Option<String>,

    /// Read the main text from a file.
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Name font size in pixels.
    #[arg(long)]
    name_size: Option<u32>,

    /// Main text font size in pixels.
    #[arg(long)]
    text_size: Option<u32>,

    /// Do not draw the name and accent line.
    #[arg(long)]
    hide_name: bool,

    /// Draw a drop shadow under the text.
    #[arg(long)]
    shadow: bool,

    /// Shadow offset in pixels.
    #[arg(long)]
    shadow_offset: Option<u32>,

    /// Add a black band at the bottom for the text.
    #[arg(long)]
    letterbox: bool,

    /// With `--letterbox`, keep the image height by trimming the top.
    #[arg(long)]
    trim_top: bool,

    /// Print diagnostics about font resolution (tier, family name + SHA-256 of font bytes).
    #[arg(long)]
    dump_fonts: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Inputs read from disk, ready for the library.
struct LoadedCard {
    background: Vec<u8>,
    font: Option<Vec<u8>>,
    options: umagen::LayoutOptions,
    provider: umagen::FontProvider,
}

fn load_card(args: &CardArgs) -> anyhow::Result<LoadedCard> {
    let config = match &args.config {
        Some(path) => umagen::CardConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => umagen::CardConfig::default(),
    };
    let options = merge_options(config.options, args)?;
    options.validate()?;

    let background = std::fs::read(&args.background)
        .with_context(|| format!("read background '{}'", args.background.display()))?;
    let font = args
        .font
        .as_ref()
        .map(|p| std::fs::read(p).with_context(|| format!("read font '{}'", p.display())))
        .transpose()?;

    let default_font = args.default_font.as_deref().or(config.default_font.as_deref());
    let (provider, warning) = umagen::FontProvider::from_default_path(default_font);
    if let Some(w) = warning {
        eprintln!("warning: {w}");
    }

    Ok(LoadedCard {
        background,
        font,
        options,
        provider,
    })
}

fn merge_options(
    mut o: umagen::LayoutOptions,
    args: &CardArgs,
) -> anyhow::Result<umagen::LayoutOptions> {
    if let Some(name) = &args.name {
        o.name_text = name.clone();
    }
    if let Some(text) = &args.text {
        o.main_text = text.replace("\\n", "\n");
    }
    if let Some(path) = &args.text_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read text file '{}'", path.display()))?;
        o.main_text = text.trim_end_matches(['\n', '\r']).to_string();
    }
    if let Some(n) = args.name_size {
        o.name_size = n;
    }
    if let Some(n) = args.text_size {
        o.text_size = n;
    }
    if let Some(n) = args.shadow_offset {
        o.shadow_offset = n;
    }
    o.show_name &= !args.hide_name;
    o.shadow_enabled |= args.shadow;
    o.add_letterbox |= args.letterbox;
    o.trim_top |= args.trim_top;
    Ok(o)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let card = load_card(&args.card)?;
    let generated = umagen::generate(
        &card.background,
        card.font.as_deref(),
        &card.options,
        &card.provider,
    )?;

    report_fonts(
        &generated.name_font,
        &generated.text_font,
        args.card.dump_fonts,
    );

    let png = umagen::encode_png(&generated.image)?;
    write_output(&args.out, &png)?;

    eprintln!(
        "wrote {} ({}x{}, {})",
        args.out.display(),
        generated.image.width(),
        generated.image.height(),
        umagen::OUTPUT_MIME
    );
    Ok(())
}

fn cmd_layout(args: CardArgs) -> anyhow::Result<()> {
    let card = load_card(&args)?;
    let prepared = umagen::PreparedCard::prepare(
        &card.background,
        card.font.as_deref(),
        &card.options,
        &card.provider,
    )?;

    report_fonts(prepared.name_font(), prepared.text_font(), args.dump_fonts);

    let json = serde_json::to_string_pretty(prepared.geometry())
        .with_context(|| "serialize geometry JSON")?;
    println!("{json}");
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))
}

fn report_fonts(name: &umagen::FontResolution, text: &umagen::FontResolution, dump: bool) {
    for w in name.warnings().iter().chain(text.warnings()) {
        eprintln!("warning: {w}");
    }
    if !dump {
        return;
    }

    eprintln!("font diagnostics:");
    for (role, res) in [("name", name), ("text", text)] {
        let handle = res.handle();
        eprintln!("  {role}:");
        eprintln!("    source:   {:?}", res.source());
        eprintln!("    size_px:  {}", handle.size_px());
        match (handle.family_name(), handle.font_bytes()) {
            (Some(family), Some(bytes)) => {
                eprintln!("    family:   {family}");
                eprintln!("    sha256:   {}", sha256_hex(bytes));
            }
            _ => {
                eprintln!("    family:   built-in 8x8 (scale {})", handle.builtin_scale());
            }
        }
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
