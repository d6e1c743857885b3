use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use sheetpack::cli::{CliArgs, CompressionLevel};
use sheetpack::config::LoadedConfig;
use sheetpack::output::{ExporterRegistry, PngEncoder, SheetMap};
use sheetpack::packing::{DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_PADDING};
use sheetpack::sprite::{check_name_collisions, collect_image_paths, packed_name};
use sheetpack::{LoadOptions, PackingConstraints, SheetError, build_sheet, load_descriptors};

/// Which exporter failed, attached as context so the exit code can tell them apart
#[derive(Debug, Clone, Copy)]
enum ExportStage {
    Image,
    Map,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportStage::Image => write!(f, "failed to save sheet image"),
            ExportStage::Map => write!(f, "failed to save map"),
        }
    }
}

#[allow(clippy::print_stderr)]
fn main() {
    let cli = match CliArgs::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli) {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ExportStage>() {
        Some(ExportStage::Image) => 9,
        Some(ExportStage::Map) => 10,
        None => err.downcast_ref::<SheetError>().map_or(1, SheetError::exit_code),
    }
}

fn run(cli: &CliArgs) -> Result<()> {
    let merged = merge_config_with_args(cli)?;

    env_logger::Builder::new()
        .filter_level(if merged.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("Sheetpack v{}", env!("CARGO_PKG_VERSION"));

    // Exporters are resolved before any image is touched
    let registry =
        ExporterRegistry::with_defaults(PngEncoder::new(merged.opaque, merged.compress));
    let encoder = registry.image_encoder_for(&merged.image)?;
    let map_writer = merged
        .map
        .as_deref()
        .map(|path| registry.map_writer_for(path))
        .transpose()?;

    let paths = collect_image_paths(&merged.input, merged.input_list.as_deref())?;
    if map_writer.is_some() {
        check_name_collisions(&paths)?;
    }

    let descriptors = load_descriptors(
        &paths,
        LoadOptions {
            normalize: !merged.keep_format,
        },
    )?;
    info!("Loaded {} images", descriptors.len());

    let packed = build_sheet(&descriptors, &merged.constraints)?;

    create_parent_dir(&merged.image).context(ExportStage::Image)?;
    encoder
        .save(&packed.sheet, &merged.image)
        .context(ExportStage::Image)?;
    info!("Saved {}", merged.image.display());

    if let (Some(writer), Some(map_path)) = (map_writer, merged.map.as_deref()) {
        let image_name = packed_name(&merged.image);
        let map = SheetMap {
            image_name: &image_name,
            width: packed.sheet.width,
            height: packed.sheet.height,
            entries: &packed.entries,
        };

        create_parent_dir(map_path).context(ExportStage::Map)?;
        writer.save(&map, map_path).context(ExportStage::Map)?;
        info!("Saved {}", map_path.display());
    }

    info!("Done!");

    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

/// Merged configuration from CLI args and optional config file.
struct MergedConfig {
    input: Vec<PathBuf>,
    input_list: Option<PathBuf>,
    image: PathBuf,
    map: Option<PathBuf>,
    constraints: PackingConstraints,
    opaque: bool,
    keep_format: bool,
    compress: Option<CompressionLevel>,
    verbose: bool,
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &CliArgs) -> Result<MergedConfig> {
    let loaded_config = if let Some(config_path) = &args.config {
        Some(
            LoadedConfig::load(config_path)
                .with_context(|| format!("failed to load config: {}", config_path.display()))?,
        )
    } else {
        None
    };
    let lc = loaded_config.as_ref();

    // Input files: CLI args override config
    let input = if !args.input.is_empty() || args.input_list.is_some() {
        args.input.clone()
    } else if let Some(lc) = lc {
        lc.resolve_inputs()
            .context("failed to resolve input files from config")?
    } else {
        Vec::new()
    };

    let input_list = args
        .input_list
        .clone()
        .or_else(|| lc.and_then(LoadedConfig::input_list));

    let image = args
        .image
        .clone()
        .or_else(|| lc.and_then(LoadedConfig::image))
        .context("no output image given (use --image or set \"image\" in the config)")?;

    let map = args
        .map
        .clone()
        .or_else(|| lc.and_then(LoadedConfig::map));

    // Numeric fields: CLI > config > default
    let max_width = args
        .max_width
        .unwrap_or_else(|| lc.map_or(DEFAULT_MAX_WIDTH, |lc| lc.config.max_width));
    let max_height = args
        .max_height
        .unwrap_or_else(|| lc.map_or(DEFAULT_MAX_HEIGHT, |lc| lc.config.max_height));
    let padding = args
        .padding
        .unwrap_or_else(|| lc.map_or(DEFAULT_PADDING, |lc| lc.config.padding));

    // Boolean flags: CLI presence sets them to true, otherwise use config
    let pow2 = args.pow2 || lc.is_some_and(|lc| lc.config.pow2);
    let square = args.square || lc.is_some_and(|lc| lc.config.square);
    let opaque = args.opaque || lc.is_some_and(|lc| lc.config.opaque);
    let keep_format = args.keep_format || lc.is_some_and(|lc| lc.config.keep_format);

    let compress = match (args.compress, lc) {
        (Some(level), _) => Some(level),
        (None, Some(lc)) => lc.compression().context("invalid compress setting in config")?,
        (None, None) => None,
    };

    Ok(MergedConfig {
        input,
        input_list,
        image,
        map,
        constraints: PackingConstraints::new(max_width, max_height)
            .padding(padding)
            .power_of_two(pow2)
            .square(square),
        opaque,
        keep_format,
        compress,
        verbose: args.verbose,
    })
}
