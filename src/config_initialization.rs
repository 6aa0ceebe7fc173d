//! Configuration initialization and hierarchy management

use tracing::debug;

use crate::adapters::toml_config::{AppConfig, TomlConfigAdapter};
use crate::cli::{Cli, Commands, CutterArgs};
use crate::domain::model::DEFAULT_LOOP_THRESHOLD;
use crate::error::StageCutResult;

/// Resolve the configuration following precedence: CLI > Env > File > Defaults.
///
/// Environment variables are read by clap into the same optional fields as
/// the flags, so both layers are applied by [`apply_cli_overrides`].
pub fn initialize_configuration(cli: &Cli) -> StageCutResult<AppConfig> {
    let mut config = TomlConfigAdapter::load_or_default(cli.config.as_deref())?;
    apply_cli_overrides(&mut config, cli);
    config.validate()?;
    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

/// Apply CLI and environment overrides to configuration
pub fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }
    if let Some(format) = cli.log_format {
        config.log.format = format;
    }

    apply_cutter_overrides(config, cli.command.cutter_args());

    match &cli.command {
        Commands::Cut(_) => {}
        Commands::Pick(args) => {
            if let Some(frame_count) = args.frame_count {
                config.export.frame_count = frame_count;
            }
            if args.random {
                config.export.random = true;
            }
        }
        Commands::Thumbnail(args) => {
            if let Some(rate) = args.rate {
                config.export.thumbnail_rate = rate;
            }
            if args.vertical {
                config.export.vertical = true;
            }
        }
    }
}

fn apply_cutter_overrides(config: &mut AppConfig, args: &CutterArgs) {
    if let Some(fps) = args.fps {
        config.cut.fps = fps;
    }
    if let Some(step) = args.step {
        config.cut.step = step;
    }
    if let Some(block) = args.block {
        config.cut.block = block;
    }
    if let Some(compress_rate) = args.compress_rate {
        config.cut.compress_rate = compress_rate;
    }
    if let Some(threshold) = args.threshold {
        config.range.threshold = threshold;
    }
    if let Some(range_threshold) = args.range_threshold {
        config.range.range_threshold = Some(range_threshold.unwrap_or(DEFAULT_LOOP_THRESHOLD));
    }
    if let Some(offset) = args.offset {
        config.range.offset = offset;
    }
    if let Some(limit) = args.limit {
        config.range.limit = limit;
    }
}
