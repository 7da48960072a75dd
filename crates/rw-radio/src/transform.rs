//! The radio list pass over a token stream.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::assets::{BUILTIN_SCRIPT, BUILTIN_STYLE, DocumentEnv, RuntimeFile, copy_runtime_files};
use crate::error::TransformError;
use crate::extract::extract;
use crate::grammar::{MARKER_LEN, find_close, match_open};
use crate::html::HtmlRenderer;
use crate::markdown::{parser_options, tokenize};
use crate::session::TransformSession;
use crate::synthesize::{Container, synthesize};
use crate::token::Token;

/// Attribute set on an open marker paragraph that has no matching close.
pub const UNCLOSED_ATTR: &str = "data-rw-unclosed-list";

/// Options fixed when the transform is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadioOptions {
    /// Script path recorded in the document metadata, relative to the output.
    pub runtime_js_path: String,
    /// Stylesheet path recorded in the document metadata, relative to the output.
    pub runtime_css_path: String,
    /// Extra classes added to every container.
    pub container_classes: String,
    /// Copy the runtime files into the output directory.
    pub bundle: bool,
    /// Directory holding custom runtime files. `None` bundles the runtime
    /// built into this crate.
    pub assets_dir: Option<PathBuf>,
}

impl Default for RadioOptions {
    fn default() -> Self {
        Self {
            runtime_js_path: "_assets/radio-extension.js".to_owned(),
            runtime_css_path: "_assets/radio-extension.css".to_owned(),
            container_classes: String::new(),
            bundle: true,
            assets_dir: None,
        }
    }
}

impl RadioOptions {
    #[must_use]
    pub fn with_runtime_js_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_js_path = path.into();
        self
    }

    #[must_use]
    pub fn with_runtime_css_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_css_path = path.into();
        self
    }

    #[must_use]
    pub fn with_container_classes(mut self, classes: impl Into<String>) -> Self {
        self.container_classes = classes.into();
        self
    }

    #[must_use]
    pub fn with_bundle(mut self, bundle: bool) -> Self {
        self.bundle = bundle;
        self
    }

    #[must_use]
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(dir.into());
        self
    }
}

/// Options of a single pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformOptions {
    /// Root directory bundled runtime files are copied into.
    pub output: PathBuf,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from("."),
        }
    }
}

/// Summary of one pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransformOutput {
    /// Radio lists replaced by synthesized tokens.
    pub inserted: usize,
    /// Radio lists removed because they had no options.
    pub pruned: usize,
    /// Open markers without a matching close marker.
    pub unclosed: usize,
    /// Human-readable diagnostics, prefixed with the source line when known.
    pub warnings: Vec<String>,
}

/// HTML and pass summary produced by [`RadioTransform::render`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub output: TransformOutput,
}

/// Replaces radio list markers in token streams.
///
/// One instance serves many documents. Each pass gets its own
/// [`TransformSession`], numbered from a shared counter.
///
/// # Example
///
/// ```
/// use rw_radio::{DocumentEnv, RadioOptions, RadioTransform, TransformOptions};
///
/// let transform = RadioTransform::new(RadioOptions::default().with_bundle(false));
/// let mut env = DocumentEnv::new();
/// let rendered = transform
///     .render(
///         "{% list radio group=os %}\n\n- Linux\n\n  apt\n\n- macOS\n\n  brew\n\n{% endlist %}\n",
///         &mut env,
///         &TransformOptions::default(),
///     )
///     .unwrap();
///
/// assert_eq!(rendered.output.inserted, 1);
/// assert!(rendered.html.contains(r#"data-rw-group="os""#));
/// assert_eq!(env.meta.script, vec!["_assets/radio-extension.js"]);
/// ```
#[derive(Debug, Default)]
pub struct RadioTransform {
    options: RadioOptions,
    runs: AtomicU64,
}

impl RadioTransform {
    #[must_use]
    pub fn new(options: RadioOptions) -> Self {
        Self {
            options,
            runs: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn options(&self) -> &RadioOptions {
        &self.options
    }

    /// Start a new pass.
    pub fn session(&self) -> TransformSession {
        TransformSession::new(self.runs.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Transform `tokens` in place using a fresh session.
    ///
    /// # Errors
    ///
    /// Returns an error if an option has no line mapping or bundling fails.
    pub fn process(
        &self,
        tokens: &mut Vec<Token>,
        env: &mut DocumentEnv,
        opts: &TransformOptions,
    ) -> Result<TransformOutput, TransformError> {
        let mut session = self.session();
        self.process_with_session(tokens, env, opts, &mut session)
    }

    /// Transform `tokens` in place.
    ///
    /// The runtime files are recorded in `env` only once bundling, when
    /// enabled, has succeeded.
    ///
    /// Markers are matched left to right. After a radio list is replaced the
    /// scan resumes just past the container open, so lists nested inside
    /// option bodies are transformed too. An empty list is removed and the
    /// scan resumes at the same index.
    ///
    /// # Errors
    ///
    /// Returns an error if an option has no line mapping or bundling fails.
    pub fn process_with_session(
        &self,
        tokens: &mut Vec<Token>,
        env: &mut DocumentEnv,
        opts: &TransformOptions,
        session: &mut TransformSession,
    ) -> Result<TransformOutput, TransformError> {
        let mut output = TransformOutput::default();
        let mut idx = 0;

        while idx < tokens.len() {
            let Some(marker) = match_open(tokens, idx) else {
                idx += 1;
                continue;
            };
            if marker.escaped {
                idx += 1;
                continue;
            }

            let line = line_of(&tokens[idx]);
            let Some(close) = find_close(tokens, idx + MARKER_LEN) else {
                tracing::warn!(line, "Radio list has no closing marker");
                output.warnings.push(with_line(
                    line,
                    "radio list is not closed (missing {% endlist %})",
                ));
                tokens[idx].attr_set(UNCLOSED_ATTR, "true");
                output.unclosed += 1;
                idx += MARKER_LEN;
                continue;
            };
            let end = (close + MARKER_LEN).min(tokens.len());

            let extraction = extract(&tokens[idx + MARKER_LEN..close]);
            if extraction.stray > 0 {
                tracing::warn!(
                    line,
                    stray = extraction.stray,
                    "Dropped content outside radio list items"
                );
                output.warnings.push(with_line(
                    line,
                    &format!(
                        "{} token(s) outside the list dropped from radio list",
                        extraction.stray
                    ),
                ));
            }

            if extraction.options.is_empty() {
                tracing::warn!(line, "Removed radio list without options");
                output
                    .warnings
                    .push(with_line(line, "radio list has no options, removed"));
                tokens.drain(idx..end);
                output.pruned += 1;
                continue;
            }

            let group = marker.group.unwrap_or_else(|| session.default_group());
            let count = extraction.options.len();
            let container = Container {
                group: &group,
                classes: &self.options.container_classes,
            };
            let replacement = synthesize(extraction.options, &container, session)?;
            tokens.splice(idx..end, replacement);
            tracing::debug!(
                run = session.run_id(),
                group = %group,
                options = count,
                line,
                "Synthesized radio list"
            );
            output.inserted += 1;
            idx += 1;
        }

        if output.inserted > 0 {
            if self.options.bundle {
                copy_runtime_files(
                    self.options.assets_dir.as_deref(),
                    &opts.output,
                    &[
                        RuntimeFile {
                            path: &self.options.runtime_js_path,
                            builtin: BUILTIN_SCRIPT,
                        },
                        RuntimeFile {
                            path: &self.options.runtime_css_path,
                            builtin: BUILTIN_STYLE,
                        },
                    ],
                    &mut env.bundled,
                )?;
            }
            env.require_runtime(&self.options.runtime_js_path, &self.options.runtime_css_path);
        }

        Ok(output)
    }

    /// Tokenize markdown, transform it and render HTML.
    ///
    /// # Errors
    ///
    /// Returns an error if the transform pass fails.
    pub fn render(
        &self,
        markdown: &str,
        env: &mut DocumentEnv,
        opts: &TransformOptions,
    ) -> Result<Rendered, TransformError> {
        let mut tokens = tokenize(markdown, parser_options(true));
        let output = self.process(&mut tokens, env, opts)?;
        let html = HtmlRenderer::new().render(&tokens);
        Ok(Rendered { html, output })
    }
}

/// 1-indexed source line of a token.
fn line_of(token: &Token) -> Option<usize> {
    token.map.map(|(start, _)| start + 1)
}

fn with_line(line: Option<usize>, message: &str) -> String {
    match line {
        Some(line) => format!("line {line}: {message}"),
        None => message.to_owned(),
    }
}
