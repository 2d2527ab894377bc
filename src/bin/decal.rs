use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "decal", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a PNG's embedded file record as JSON.
    Encode(EncodeArgs),
    /// Append a PNG to a scene document as an image element.
    Append(AppendArgs),
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// PNG image. Bare names are resolved under public/assets/pngs.
    image: PathBuf,
}

#[derive(Parser, Debug)]
struct AppendArgs {
    /// PNG image. Bare names are resolved under public/assets/pngs.
    image: PathBuf,

    /// Scene JSON document, rewritten in place.
    scene: PathBuf,

    /// Element width in scene units.
    #[arg(long)]
    width: Option<f64>,

    /// Element height in scene units.
    #[arg(long)]
    height: Option<f64>,

    /// Left edge of the element.
    #[arg(long)]
    x: Option<f64>,

    /// Top edge of the element.
    #[arg(long)]
    y: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Encode(args) => cmd_encode(args),
        Command::Append(args) => cmd_append(args),
    }
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let path = decal::resolve_image_path(&args.image);
    let file = decal::EmbeddedFile::from_path(&path, decal::unix_millis())?;

    let mut files = serde_json::Map::new();
    files.insert(file.id.clone(), serde_json::to_value(&file)?);
    let out = serde_json::Value::Object(serde_json::Map::from_iter([(
        "files".to_string(),
        serde_json::Value::Object(files),
    )]));

    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_append(args: AppendArgs) -> anyhow::Result<()> {
    let image = decal::resolve_image_path(&args.image);
    let placement = decal::Placement {
        x: args.x,
        y: args.y,
        width: args.width,
        height: args.height,
    };

    let outcome = decal::append_image(&image, &args.scene, placement)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
