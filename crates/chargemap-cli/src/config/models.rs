use chargemap::engine::config::ColorizeConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub topology: PathBuf,
    pub forcefield_dir: PathBuf,
    pub structure: Option<PathBuf>,
    pub script_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub representation: String,
    pub core_config: ColorizeConfig,
}
