use crate::reconstruct::RenderOptions;
use crate::utils::config::DEFAULT_PUML_PATH;
use std::path::PathBuf;

/// Arguments for the generate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the trace document (JSON)
    pub input: PathBuf,

    /// Output path for the PlantUML source
    pub output_puml: PathBuf,

    /// Output path for the JSON instruction stream (optional)
    pub output_json: Option<PathBuf>,

    /// Show gas used/limit on arrows
    pub show_gas: bool,

    /// Show decoded call parameters in labels
    pub show_params: bool,

    /// Optional style file (TOML)
    pub style: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl GenerateArgs {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_gas: self.show_gas,
            show_params: self.show_params,
        }
    }
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_puml: PathBuf::from(DEFAULT_PUML_PATH),
            output_json: None,
            show_gas: false,
            show_params: false,
            style: None,
            print_summary: false,
        }
    }
}
