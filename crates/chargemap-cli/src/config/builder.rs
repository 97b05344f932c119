use super::defaults::{DefaultsConfig, forcefield_dir_from_env};
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::ColorArgs;
use crate::error::{CliError, Result};
use chargemap::core::topology::conditional::ConditionalMode;
use chargemap::engine::config::ColorizeConfigBuilder;
use std::ffi::OsString;
use tracing::debug;

pub fn build_config(args: &ColorArgs) -> Result<AppConfig> {
    build_config_with_env(args, |key| std::env::var_os(key))
}

fn build_config_with_env(
    args: &ColorArgs,
    env: impl Fn(&str) -> Option<OsString>,
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    let topology_file = file_config.topology.unwrap_or_default();
    let output_file = file_config.output.unwrap_or_default();

    let forcefield_dir = args
        .forcefield_dir
        .clone()
        .or(topology_file.forcefield_dir)
        .or_else(|| forcefield_dir_from_env(env))
        .ok_or_else(|| {
            CliError::Config(
                "No force-field directory. Pass --forcefield-dir, set 'topology.forcefield-dir' \
                 in the config file, or set GMXLIB/GMXDATA."
                    .to_string(),
            )
        })?;
    debug!("Using force-field directory {:?}", forcefield_dir);

    let file_defines = topology_file.defines.unwrap_or_default();
    let conditional_mode = if args.flat_conditionals {
        ConditionalMode::Flat
    } else if args.evaluate_conditionals {
        ConditionalMode::Evaluate
    } else if let Some(mode) = topology_file.conditional_mode {
        mode
    } else if !file_defines.is_empty() || !args.defines.is_empty() {
        ConditionalMode::Evaluate
    } else {
        defaults.conditional_mode
    };
    debug!("Conditional mode: {}", conditional_mode);
    let max_include_depth = args
        .max_include_depth
        .or(topology_file.max_include_depth)
        .unwrap_or(defaults.max_include_depth);
    let normalize_hydrogens = if args.no_hydrogen_fix {
        false
    } else {
        topology_file
            .normalize_hydrogens
            .unwrap_or(defaults.normalize_hydrogens)
    };

    let core_config = ColorizeConfigBuilder::new()
        .conditional_mode(conditional_mode)
        .defines(file_defines)
        .defines(args.defines.iter().cloned())
        .max_include_depth(max_include_depth)
        .normalize_hydrogens(normalize_hydrogens)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        topology: args.topology.clone(),
        forcefield_dir,
        structure: args.structure.clone().or(output_file.structure),
        script_path: args.script.clone().or(output_file.script),
        report_path: args.report.clone().or(output_file.report),
        representation: args
            .representation
            .clone()
            .or(output_file.representation)
            .unwrap_or(defaults.representation),
        core_config,
    })
}
