use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use log::{LevelFilter, debug, info};
use umlsmith::config::Config;
use umlsmith::diagram::DiagramKind;
use umlsmith::export::{ExportFormat, write_rendered};
use umlsmith::gateway::{HttpGateway, PlantUmlCommand, RenderGateway};
use umlsmith::{Document, EntityStore, Session};

/// Build UML diagrams from a document and render them through PlantUML
#[derive(Parser, Debug)]
#[command(name = "umlsmith")]
#[command(version)]
#[command(
    about = "Generate PlantUML from diagram documents and render it to SVG, PNG or PDF",
    long_about = None
)]
struct Args {
    /// Diagram document: .toml, .yaml or .json (use "-" for stdin)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output path (.puml, .svg, .png, .pdf or an existing directory); prints PlantUML when omitted
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Render this diagram kind instead of the document's
    #[arg(short, long)]
    kind: Option<DiagramKind>,

    /// Renderer endpoint, overriding the config
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Render with the local plantuml executable instead of the HTTP renderer
    #[arg(long)]
    local: bool,

    /// Raster scale multiplier for PNG output
    #[arg(long, default_value_t = 1.0)]
    png_scale: f32,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", args.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
    debug!("parsed arguments: {:?}", args);

    let config = match &args.config {
        Some(path) => Config::load(path).map_err(|e| e.to_string())?,
        None => Config::default(),
    };

    let document = read_document(&args.input)?;
    let style = config
        .style
        .clone()
        .validated()
        .map_err(|e| format!("Invalid style in config: {}", e))?;
    let mut store = EntityStore::with_style(style);
    document
        .apply(&mut store)
        .map_err(|e| format!("Invalid document: {}", e))?;

    let mut session = Session::new(store);
    if let Some(kind) = args.kind {
        session.set_kind(kind);
    }

    let Some(output) = &args.output else {
        print!("{}", session.serialize());
        return Ok(());
    };

    let (path, format) = if output.is_dir() {
        (None, ExportFormat::Svg)
    } else {
        (Some(output.clone()), ExportFormat::from_path(output)?)
    };

    if !format.needs_render() {
        std::fs::write(output, session.serialize())
            .map_err(|e| format!("Failed to write PlantUML: {}", e))?;
        eprintln!("PlantUML saved to: {}", output.display());
        return Ok(());
    }

    let gateway = build_gateway(&args, &config);
    let rendered = session
        .generate(gateway.as_ref())
        .map_err(|e| e.to_string())?;
    let path = path.unwrap_or_else(|| output.join(&rendered.filename));

    write_rendered(&rendered.content, &path, format, args.png_scale)?;
    eprintln!("Diagram saved to: {}", path.display());
    Ok(())
}

fn read_document(input: &Path) -> Result<Document, String> {
    if input.to_str() == Some("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        return Document::from_toml(&buffer)
            .or_else(|_| Document::from_yaml(&buffer))
            .map_err(|e| e.to_string());
    }
    Document::load(input).map_err(|e| e.to_string())
}

fn build_gateway(args: &Args, config: &Config) -> Box<dyn RenderGateway> {
    if args.local {
        info!("rendering with local {}", config.gateway.plantuml);
        Box::new(PlantUmlCommand::new(&config.gateway.plantuml))
    } else {
        let url = args.server.as_deref().unwrap_or(&config.gateway.url);
        info!("rendering through {}", url);
        Box::new(HttpGateway::new(url, config.gateway.timeout()))
    }
}
