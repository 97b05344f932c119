use crate::cli::ColorArgs;
use crate::config::{AppConfig, build_config};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use chargemap::{
    core::io::{pml::PmlScript, report::ChargeReport},
    engine::{
        progress::ProgressReporter,
        sink::{FanOutSink, SinkError, StructureLoader},
    },
    workflows::{self, colorize::TraversalSummary},
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

type Script = PmlScript<Box<dyn Write>>;

pub fn run(args: ColorArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args)?;

    let summary = colorize(&config)?;
    print_summary(&summary);

    if summary.files_processed.len() == 1 && summary.colors_applied == 0 {
        warn!("No [ atoms ] records were found in {:?}.", config.topology);
    }
    Ok(())
}

fn colorize(config: &AppConfig) -> Result<TraversalSummary> {
    // No output file is created for a topology that cannot be found.
    let start = workflows::colorize::locate(&config.topology, &config.forcefield_dir)?;
    debug!("Top-level topology resolved to {}", start.display());

    let mut script = open_script(config)?;
    let mut report = match &config.report_path {
        Some(path) => Some(ChargeReport::create(path).map_err(|e| output_error(path, e))?),
        None => None,
    };

    if let Some(script) = script.as_mut() {
        prepare_script(script, config)?;
    }

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!(
        "Processing {:?} with force-field directory {:?}",
        config.topology, config.forcefield_dir
    );
    let result = {
        let mut sinks = FanOutSink::new();
        if let Some(script) = script.as_mut() {
            sinks.push(script);
        }
        if let Some(report) = report.as_mut() {
            sinks.push(report);
        }
        workflows::colorize::run(
            &config.topology,
            &config.forcefield_dir,
            &config.core_config,
            &mut sinks,
            &reporter,
        )
    };
    progress_handler.finish();
    let summary = result?;

    if let Some(script) = script {
        let target = script_target(config);
        script
            .finish()
            .map_err(|e| output_error(&target, e))?;
        info!("PyMOL script written to {}", target.display());
    }
    if let Some(report) = report {
        let path = config.report_path.clone().unwrap_or_default();
        report.finish().map_err(|e| sink_error(&path, e))?;
        info!("Charge report written to {}", path.display());
    }

    Ok(summary)
}

// The script goes to stdout only when no other output was requested.
fn open_script(config: &AppConfig) -> Result<Option<Script>> {
    let writer: Box<dyn Write> = match (&config.script_path, &config.report_path) {
        (Some(path), _) => {
            let file = File::create(path).map_err(|e| output_error(path, e))?;
            Box::new(BufWriter::new(file))
        }
        (None, None) => Box::new(io::stdout().lock()),
        (None, Some(_)) => return Ok(None),
    };
    Ok(Some(
        PmlScript::new(writer).with_representation(config.representation.clone()),
    ))
}

fn prepare_script(script: &mut Script, config: &AppConfig) -> Result<()> {
    let target = script_target(config);
    script
        .write_color_bar()
        .map_err(|e| output_error(&target, e))?;
    if let Some(structure) = &config.structure {
        script
            .load_structure(structure)
            .map_err(|e| sink_error(&target, e))?;
    }
    Ok(())
}

fn script_target(config: &AppConfig) -> PathBuf {
    config
        .script_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("<stdout>"))
}

fn print_summary(summary: &TraversalSummary) {
    eprintln!(
        "Colored {} atom group(s) from {} file(s).",
        summary.colors_applied,
        summary.files_processed.len()
    );
    if summary.records_skipped > 0 {
        eprintln!(
            "  {} atom record(s) skipped: charge is not a number.",
            summary.records_skipped
        );
    }
    for missing in &summary.missing_includes {
        eprintln!("  File {} does not exist!", missing);
    }
    if summary.includes_skipped > 0 {
        eprintln!("  {} include(s) not followed.", summary.includes_skipped);
    }
}

fn output_error(path: &Path, e: impl Into<anyhow::Error>) -> CliError {
    CliError::Output {
        path: path.to_path_buf(),
        source: e.into(),
    }
}

fn sink_error(path: &Path, e: SinkError) -> CliError {
    CliError::Output {
        path: path.to_path_buf(),
        source: anyhow::anyhow!(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chargemap::engine::config::ColorizeConfig;
    use std::fs;
    use tempfile::tempdir;

    fn app_config(root: &Path) -> AppConfig {
        AppConfig {
            topology: root.join("sim/topol.top"),
            forcefield_dir: root.join("ff"),
            structure: Some(PathBuf::from("conf.pdb")),
            script_path: Some(root.join("charges.pml")),
            report_path: Some(root.join("charges.csv")),
            representation: "sticks".to_string(),
            core_config: ColorizeConfig::default(),
        }
    }

    fn write(path: PathBuf, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn writes_script_and_report_for_include_tree() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(
            root.join("sim/topol.top"),
            "#include \"oplsaa.ff/ions.itp\"\n[ atoms ]\n1 opls_113 1 SOL OW 1 -0.8476 15.9994\n",
        );
        write(
            root.join("ff/oplsaa.ff/ions.itp"),
            "[ atoms ]\n1 opls_408 1 NA NA 1 1 22.98977\n",
        );
        let config = app_config(root);

        let summary = colorize(&config).unwrap();
        assert_eq!(summary.files_processed.len(), 2);
        assert_eq!(summary.colors_applied, 2);

        let script = fs::read_to_string(root.join("charges.pml")).unwrap();
        let lines: Vec<&str> = script.lines().collect();
        assert!(lines[0].starts_with("ramp_new color_bar"));
        assert_eq!(&lines[1..4], &["load conf.pdb", "hide everything", "show sticks"]);
        assert_eq!(lines[5], "color 0xff0000, resn NA and name NA");

        let report = fs::read_to_string(root.join("charges.csv")).unwrap();
        assert_eq!(report.lines().count(), 3);
        assert!(report.contains("SOL,OW,-0.8476,"));
    }

    #[test]
    fn missing_topology_fails_and_reports_path() {
        let dir = tempdir().unwrap();
        let mut config = app_config(dir.path());
        config.script_path = None;

        let result = colorize(&config);
        assert!(matches!(
            result,
            Err(CliError::Core(
                chargemap::engine::error::EngineError::NotFound { .. }
            ))
        ));
    }

    #[test]
    fn missing_topology_creates_no_output_files() {
        let dir = tempdir().unwrap();
        let config = app_config(dir.path());

        assert!(colorize(&config).is_err());
        assert!(!dir.path().join("charges.pml").exists());
        assert!(!dir.path().join("charges.csv").exists());
    }

    #[test]
    fn unwritable_script_path_is_an_output_error() {
        let dir = tempdir().unwrap();
        let mut config = app_config(dir.path());
        config.script_path = Some(dir.path().join("no/such/dir/charges.pml"));

        assert!(matches!(
            colorize(&config),
            Err(CliError::Output { .. })
        ));
    }
}
