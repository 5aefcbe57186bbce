// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// Command line entry point.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args as ClapArgs, Parser, Subcommand};

use quadcrop::app::{AppMessage, AppModel, CropHandler, FileWriter, WriteOutcome, update};
use quadcrop::config::AppConfig;
use quadcrop::domain::document::core::file::ImageFile;
use quadcrop::domain::document::core::geometry::{CropArea, Point, QuadCropArea};
use quadcrop::domain::document::operations::detect::detect_document_bounds;
use quadcrop::domain::document::types::raster::RasterDocument;

/// Crop receipt images with automatic bounds detection.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Config file (defaults to the platform config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maximum canvas width in display pixels.
    #[arg(long, global = true)]
    max_width: Option<f64>,

    /// Maximum canvas height in display pixels.
    #[arg(long, global = true)]
    max_height: Option<f64>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Print the detected (or fallback) crop quad.
    Detect {
        file: PathBuf,
    },
    /// Crop an image and write `<prefix><name>`.
    Crop {
        file: PathBuf,
        #[command(flatten)]
        edit: EditArgs,
        /// Output directory (defaults to config, then the input's directory).
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Render the editor frame to a PNG.
    Preview {
        file: PathBuf,
        #[command(flatten)]
        edit: EditArgs,
        /// Output PNG path.
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Open the interactive editor window.
    #[cfg(feature = "gui")]
    Edit {
        file: PathBuf,
        /// Output directory (defaults to config, then the input's directory).
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Write a config file with the default settings.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(ClapArgs, Debug, Clone, Default)]
struct EditArgs {
    /// Quad corners as `x,y` pairs in image pixels: TL,TR,BL,BR.
    #[arg(long, value_parser = parse_quad, allow_hyphen_values = true)]
    quad: Option<QuadCropArea>,

    /// Drag gesture in display pixels, `X0,Y0:X1,Y1`. Repeatable.
    #[arg(long, value_parser = parse_drag, allow_hyphen_values = true)]
    drag: Vec<(Point, Point)>,
}

fn parse_numbers(s: &str) -> Result<Vec<f64>, String> {
    s.split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("invalid number '{v}': {e}")))
        .collect()
}

fn parse_quad(s: &str) -> Result<QuadCropArea, String> {
    let n = parse_numbers(s)?;
    let &[tlx, tly, trx, try_, blx, bly, brx, bry] = n.as_slice() else {
        return Err(format!("expected 8 numbers, got {}", n.len()));
    };
    Ok(QuadCropArea {
        top_left: Point::new(tlx, tly),
        top_right: Point::new(trx, try_),
        bottom_left: Point::new(blx, bly),
        bottom_right: Point::new(brx, bry),
    })
}

fn parse_drag(s: &str) -> Result<(Point, Point), String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected X0,Y0:X1,Y1, got '{s}'"))?;
    let point = |part: &str| -> Result<Point, String> {
        match parse_numbers(part)?.as_slice() {
            &[x, y] => Ok(Point::new(x, y)),
            _ => Err(format!("expected X,Y, got '{part}'")),
        }
    };
    Ok((point(from)?, point(to)?))
}

/// Number of pointer-move events a replayed drag is split into.
const DRAG_STEPS: u32 = 8;

/// Ignores session results.
struct Discard;

impl CropHandler for Discard {
    fn on_crop_complete(&mut self, _original: ImageFile, _cropped: ImageFile, _area: CropArea) {}

    fn on_cancel(&mut self) {}
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Command::InitConfig { force } = args.command {
        return init_config(args.config.as_deref(), force);
    }

    let config = load_config(&args)?;

    match args.command {
        Command::Detect { file } => detect(&config, &file),
        Command::Crop {
            file,
            edit,
            output_dir,
        } => crop(config, &file, &edit, output_dir),
        Command::Preview { file, edit, output } => preview(config, &file, &edit, &output),
        #[cfg(feature = "gui")]
        Command::Edit { file, output_dir } => {
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir_for(&file));
            quadcrop::ui::run(config, file, output_dir)
        }
        Command::InitConfig { .. } => Ok(()),
    }
}

fn init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(AppConfig::default_path)
        .ok_or_else(|| anyhow!("No config directory on this platform; pass --config"))?;
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    AppConfig::default().save(&path)?;
    println!("{}", path.display());
    Ok(())
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        // An explicit config must load.
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_or_default(None),
    };
    if let Some(width) = args.max_width {
        config.max_display_width = width;
    }
    if let Some(height) = args.max_height {
        config.max_display_height = height;
    }
    config.validate().context("Invalid settings")?;
    Ok(config)
}

fn open_document(path: &Path) -> Result<RasterDocument> {
    RasterDocument::open(path).with_context(|| format!("Failed to open {}", path.display()))
}

fn detect(config: &AppConfig, path: &Path) -> Result<()> {
    let document = open_document(path)?;
    let (width, height) = document.dimensions();

    let quad = match detect_document_bounds(document.image(), &config.detection()) {
        Some(quad) => {
            println!("detected: {quad}");
            quad
        }
        None => {
            let quad = QuadCropArea::inset(f64::from(width), f64::from(height), config.default_inset);
            println!("fallback: {quad}");
            quad
        }
    };

    let area = quad.bounding_box();
    println!("image: {width}x{height}");
    println!("crop area: {area} ({})", area.size_label());
    Ok(())
}

/// Open a session for `path` and replay the requested edits.
fn start_session(
    config: AppConfig,
    path: &Path,
    edit: &EditArgs,
    handler: &mut dyn CropHandler,
) -> Result<AppModel> {
    let mut model = AppModel::new(config);
    model.open(open_document(path)?);

    if let Some(quad) = edit.quad {
        let session = model.session.as_ref().ok_or_else(|| anyhow!("No active session"))?;
        let (w, h) = session.viewport.image_size();
        model.selection.reset(quad.clamped(w, h));
    }

    for (from, to) in &edit.drag {
        update(&mut model, AppMessage::PointerDown { x: from.x, y: from.y }, handler)?;
        for step in 1..=DRAG_STEPS {
            let t = f64::from(step) / f64::from(DRAG_STEPS);
            let x = from.x + (to.x - from.x) * t;
            let y = from.y + (to.y - from.y) * t;
            update(&mut model, AppMessage::PointerMove { x, y }, handler)?;
        }
        update(&mut model, AppMessage::PointerUp, handler)?;
    }

    Ok(model)
}

fn crop(config: AppConfig, path: &Path, edit: &EditArgs, output_dir: Option<PathBuf>) -> Result<()> {
    let output_dir = output_dir.unwrap_or_else(|| config.output_dir_for(path));
    let mut writer = FileWriter::new(output_dir);
    let mut model = start_session(config, path, edit, &mut writer)?;
    log::info!("Crop area: {}", model.crop_size_label());

    update(&mut model, AppMessage::Confirm, &mut writer)
        .with_context(|| format!("Failed to crop {}", path.display()))?;

    match writer.take_outcome() {
        Some(WriteOutcome::Written { path: written, area }) => {
            println!("{} ({area}, {})", written.display(), area.size_label());
            Ok(())
        }
        Some(WriteOutcome::Failed { name, error }) => Err(anyhow::Error::new(error)
            .context(format!("Failed to write {name} to {}", writer.output_dir().display()))),
        Some(WriteOutcome::Cancelled) | None => bail!("Crop finished without output"),
    }
}

fn preview(config: AppConfig, path: &Path, edit: &EditArgs, output: &Path) -> Result<()> {
    // Previews never confirm or cancel.
    let model = start_session(config, path, edit, &mut Discard)?;
    let frame = model.frame().ok_or_else(|| anyhow!("No active session"))?;
    frame
        .save(output)
        .with_context(|| format!("Failed to write preview {}", output.display()))?;
    println!("{} ({})", output.display(), model.crop_size_label());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn parses_quad_argument() {
        let quad = parse_quad("10,20,90,15,12,180,95,175").unwrap();
        assert_eq!(quad.top_right, Point::new(90.0, 15.0));
        assert_eq!(quad.bottom_left, Point::new(12.0, 180.0));
        assert!(parse_quad("1,2,3").is_err());
    }

    #[test]
    fn parses_drag_argument() {
        let (from, to) = parse_drag("10,20:-5.5,40").unwrap();
        assert_eq!(from, Point::new(10.0, 20.0));
        assert_eq!(to, Point::new(-5.5, 40.0));
        assert!(parse_drag("10,20").is_err());
        assert!(parse_drag("10:20").is_err());
    }

    #[test]
    fn crop_subcommand_with_drag() {
        let args = Args::try_parse_from([
            "quadcrop",
            "crop",
            "receipt.jpg",
            "--drag",
            "100,60:120,80",
            "--drag",
            "300,300:310,300",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.verbose, 1);
        let Command::Crop { edit, .. } = args.command else {
            panic!("expected crop");
        };
        assert_eq!(edit.drag.len(), 2);
    }

    #[test]
    fn init_config_writes_defaults_once() {
        let path = std::env::temp_dir().join(format!("quadcrop-init-{}.toml", std::process::id()));
        let _ = std::fs::remove_file(&path);

        init_config(Some(&path), false).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
        assert!(init_config(Some(&path), false).is_err());
        assert!(init_config(Some(&path), true).is_ok());
        let _ = std::fs::remove_file(&path);
    }
}
