//! `rw-radio render` command implementation.

use std::path::PathBuf;

use clap::Args;
use rw_radio::{DocumentEnv, RadioTransform, Rendered};
use rw_radio_config::{CliSettings, RadioConfig};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover rw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory bundled runtime files are copied into (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not copy runtime files.
    #[arg(long)]
    no_bundle: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the file cannot be read or
    /// runtime files cannot be bundled.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output: self.output,
            bundle: self.no_bundle.then_some(false),
        };
        let config = RadioConfig::load(self.config.as_deref(), Some(&cli_settings))?;

        let markdown = std::fs::read_to_string(&self.file).map_err(|source| CliError::Read {
            path: self.file.clone(),
            source,
        })?;
        let (rendered, env) = render_document(&markdown, &config)?;

        for warning in &rendered.output.warnings {
            output.warning(&format!("{}: {warning}", self.file.display()));
        }
        output.document(&rendered.html)?;

        if !env.meta.script.is_empty() {
            output.info(&format!(
                "Runtime: {} {}",
                env.meta.script.join(" "),
                env.meta.style.join(" ")
            ));
        }
        if !env.bundled.is_empty() {
            output.success(&format!(
                "Bundled runtime files into {}",
                config.output.display()
            ));
        }
        Ok(())
    }
}

/// Render one markdown document with the configured transform.
fn render_document(
    markdown: &str,
    config: &RadioConfig,
) -> Result<(Rendered, DocumentEnv), CliError> {
    let transform = RadioTransform::new(config.plugin_options());
    let mut env = DocumentEnv::new();
    let rendered = transform.render(markdown, &mut env, &config.transform_options())?;
    tracing::info!(
        inserted = rendered.output.inserted,
        pruned = rendered.output.pruned,
        unclosed = rendered.output.unclosed,
        "Rendered document"
    );
    Ok((rendered, env))
}
