//! Markdown to HTML through the radio list transform.
//!
//! Each test tokenizes a complete document with pulldown-cmark, runs one
//! transform pass and checks the token stream or the rendered HTML.

use pretty_assertions::assert_eq;
use rw_radio::{
    BUILTIN_SCRIPT, DocumentEnv, HtmlRenderer, RadioOptions, RadioTransform, Token, TokenKind,
    TransformError, TransformOptions, TransformOutput, UNCLOSED_ATTR, builtin_asset,
    parser_options, tokenize,
};

const INSTALL: &str = "\
# Install

{% list radio group=os %}

- Linux

  Install with apt.

- macOS

  Install with Homebrew.

- Windows

  Install with winget.

{% endlist %}

Done.
";

fn transform() -> RadioTransform {
    RadioTransform::new(RadioOptions::default().with_bundle(false))
}

fn process(markdown: &str) -> (Vec<Token>, TransformOutput) {
    let mut tokens = tokenize(markdown, parser_options(true));
    let output = transform()
        .process(&mut tokens, &mut DocumentEnv::new(), &TransformOptions::default())
        .unwrap();
    (tokens, output)
}

fn of_kind<'a>(tokens: &'a [Token], kind: &TokenKind) -> Vec<&'a Token> {
    tokens.iter().filter(|t| t.kind == *kind).collect()
}

fn has_class(token: &Token, class: &str) -> bool {
    token
        .attr_get("class")
        .is_some_and(|classes| classes.split(' ').any(|c| c == class))
}

#[test]
fn test_headers_and_panels_paired() {
    let (tokens, output) = process(INSTALL);
    assert_eq!(output.inserted, 1);

    let headers = of_kind(&tokens, &TokenKind::RadioButtonOpen);
    let panels = of_kind(&tokens, &TokenKind::RadioPanelOpen);
    assert_eq!(headers.len(), 3);
    assert_eq!(panels.len(), 3);

    for (idx, (header, panel)) in headers.iter().zip(&panels).enumerate() {
        let active = idx == 0;
        assert_eq!(header.attr_get("aria-controls"), panel.attr_get("id"));
        assert_eq!(panel.attr_get("aria-labelledby"), header.attr_get("data-rw-id"));
        assert_eq!(
            header.attr_get("data-rw-active"),
            Some(if active { "true" } else { "false" })
        );
        assert_eq!(has_class(header, "active"), active);
        assert_eq!(has_class(panel, "active"), active);
    }

    let titles: Vec<&str> = panels.iter().filter_map(|p| p.attr_get("data-title")).collect();
    assert_eq!(titles, vec!["Linux", "macOS", "Windows"]);
}

#[test]
fn test_surrounding_content_kept() {
    let (tokens, _) = process(INSTALL);
    assert_eq!(tokens[0].kind, TokenKind::Other("heading_open".to_owned()));
    let last_inline = tokens
        .iter()
        .rev()
        .find(|t| t.kind == TokenKind::Inline)
        .map(|t| t.content.as_str());
    assert_eq!(last_inline, Some("Done."));
    assert!(!tokens.iter().any(|t| t.content.contains("{% endlist %}")));
}

#[test]
fn test_header_list_spans_options() {
    let (tokens, _) = process(INSTALL);
    let list = of_kind(&tokens, &TokenKind::RadioListOpen)[0];
    let headers = of_kind(&tokens, &TokenKind::RadioButtonOpen);
    let (start, end) = list.map.unwrap();
    assert_eq!(start, 4);
    assert_eq!(Some(start), headers[0].map.map(|(s, _)| s));
    assert_eq!(Some(end), headers[2].map.map(|(_, e)| e));
}

#[test]
fn test_rendered_html() {
    let rendered = transform()
        .render(INSTALL, &mut DocumentEnv::new(), &TransformOptions::default())
        .unwrap();
    let html = rendered.html;

    assert!(html.starts_with("<h1>Install</h1>\n"));
    assert!(html.contains(r#"<div class="rw-radio" data-rw-group="os">"#));
    assert!(html.contains(r#"<div class="rw-radio-buttons" role="tablist">"#));
    assert!(html.contains(r#"role="tab""#));
    assert!(html.contains(r#"role="tabpanel""#));
    assert!(html.contains(">Linux</div>"));
    assert!(html.contains("<p>Install with Homebrew.</p>"));
    assert!(html.trim_end().ends_with("<p>Done.</p>"));
}

#[test]
fn test_escaped_marker_is_text() {
    let markdown = "\
`{% list radio %}`

- A

  a

{% endlist %}
";
    let (tokens, output) = process(markdown);
    assert_eq!(output, TransformOutput::default());
    assert!(of_kind(&tokens, &TokenKind::RadioOpen).is_empty());
    assert_eq!(of_kind(&tokens, &TokenKind::BulletListOpen).len(), 1);

    let html = HtmlRenderer::new().render(&tokens);
    assert!(html.contains("<code>{% list radio %}</code>"));
}

#[test]
fn test_nested_list_in_option_body() {
    let markdown = "\
{% list radio group=os %}

- Linux

  {% list radio group=pm %}

  - apt

    apt install

  - snap

    snap install

  {% endlist %}

- macOS

  brew install

{% endlist %}
";
    let (tokens, output) = process(markdown);
    assert_eq!(output.inserted, 2);

    let containers = of_kind(&tokens, &TokenKind::RadioOpen);
    let groups: Vec<Option<&str>> =
        containers.iter().map(|c| c.attr_get("data-rw-group")).collect();
    assert_eq!(groups, vec![Some("os"), Some("pm")]);

    // Outer options are Linux and macOS only; the inner list lives in Linux's panel.
    let titles: Vec<&str> = of_kind(&tokens, &TokenKind::RadioPanelOpen)
        .iter()
        .filter_map(|p| p.attr_get("data-title"))
        .collect();
    assert_eq!(titles, vec!["Linux", "apt", "snap", "macOS"]);
}

#[test]
fn test_unclosed_marker() {
    let markdown = "\
Intro.

{% list radio %}

- A

  a
";
    let (tokens, output) = process(markdown);
    assert_eq!(output.unclosed, 1);
    assert_eq!(output.warnings.len(), 1);
    assert!(output.warnings[0].starts_with("line 3:"));

    let flagged: Vec<&Token> = tokens
        .iter()
        .filter(|t| t.attr_get(UNCLOSED_ATTR) == Some("true"))
        .collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].kind, TokenKind::ParagraphOpen);
}

#[test]
fn test_empty_list_pruned_then_next_processed() {
    let markdown = "\
{% list radio %}

{% endlist %}

{% list radio group=g %}

- A

  a

{% endlist %}
";
    let (tokens, output) = process(markdown);
    assert_eq!(output.pruned, 1);
    assert_eq!(output.inserted, 1);
    assert_eq!(tokens[0].kind, TokenKind::RadioOpen);
    assert_eq!(tokens[0].attr_get("data-rw-group"), Some("g"));
}

#[test]
fn test_adjacent_empty_lists_all_pruned() {
    let markdown = "\
{% list radio %}

{% endlist %}

{% list radio %}

{% endlist %}

After.
";
    let (tokens, output) = process(markdown);
    assert_eq!(output.pruned, 2);
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].content, "After.");
}

#[test]
fn test_case_variants_share_key() {
    let markdown = "\
{% list radio group=g %}

- Alpha

  upper

- alpha

  lower

{% endlist %}
";
    let (tokens, _) = process(markdown);
    let headers = of_kind(&tokens, &TokenKind::RadioButtonOpen);
    assert_eq!(headers[0].attr_get("data-rw-key"), Some("alpha"));
    assert_eq!(headers[1].attr_get("data-rw-key"), Some("alpha"));
    assert_ne!(headers[0].attr_get("data-rw-id"), headers[1].attr_get("data-rw-id"));
}

#[test]
fn test_custom_anchor() {
    let markdown = "\
{% list radio group=g %}

- Label

  first

- Label {#custom}

  second

{% endlist %}
";
    let (tokens, _) = process(markdown);
    let headers = of_kind(&tokens, &TokenKind::RadioButtonOpen);
    assert_eq!(headers[0].attr_get("data-rw-id"), Some("label"));
    assert_eq!(headers[1].attr_get("data-rw-id"), Some("custom"));
    assert_eq!(headers[1].attr_get("data-rw-key"), Some("custom"));

    let titles: Vec<&str> = of_kind(&tokens, &TokenKind::RadioPanelOpen)
        .iter()
        .filter_map(|p| p.attr_get("data-title"))
        .collect();
    assert_eq!(titles, vec!["Label", "Label"]);
}

#[test]
fn test_bundles_runtime_once() {
    let assets = tempfile::tempdir().unwrap();
    std::fs::write(assets.path().join("radio-extension.js"), "// js").unwrap();
    std::fs::write(assets.path().join("radio-extension.css"), "/* css */").unwrap();
    let output = tempfile::tempdir().unwrap();

    let transform = RadioTransform::new(RadioOptions::default().with_assets_dir(assets.path()));
    let opts = TransformOptions {
        output: output.path().to_path_buf(),
    };
    let mut env = DocumentEnv::new();
    for _ in 0..2 {
        transform.render(INSTALL, &mut env, &opts).unwrap();
    }

    let js = output.path().join("_assets/radio-extension.js");
    assert_eq!(std::fs::read_to_string(js).unwrap(), "// js");
    assert!(output.path().join("_assets/radio-extension.css").is_file());
    assert_eq!(env.bundled.len(), 2);
    assert_eq!(env.meta.script, vec!["_assets/radio-extension.js"]);
}

#[test]
fn test_no_bundle_without_lists() {
    let output = tempfile::tempdir().unwrap();
    let transform =
        RadioTransform::new(RadioOptions::default().with_assets_dir(output.path().join("missing")));
    let opts = TransformOptions {
        output: output.path().to_path_buf(),
    };
    let mut env = DocumentEnv::new();
    let rendered = transform.render("Plain text.\n", &mut env, &opts).unwrap();
    assert_eq!(rendered.html, "<p>Plain text.</p>\n");
    assert!(env.meta.script.is_empty());
    assert!(env.bundled.is_empty());
}

#[test]
fn test_missing_asset_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let transform =
        RadioTransform::new(RadioOptions::default().with_assets_dir(dir.path().join("missing")));
    let opts = TransformOptions {
        output: dir.path().join("out"),
    };
    let err = transform
        .render(INSTALL, &mut DocumentEnv::new(), &opts)
        .unwrap_err();
    assert!(matches!(err, TransformError::MissingAsset(_)));
}

#[test]
fn test_default_options_render_with_builtin_runtime() {
    let output = tempfile::tempdir().unwrap();
    let opts = TransformOptions {
        output: output.path().to_path_buf(),
    };
    let mut env = DocumentEnv::new();

    let rendered = RadioTransform::new(RadioOptions::default())
        .render(INSTALL, &mut env, &opts)
        .unwrap();

    assert_eq!(rendered.output.inserted, 1);
    let script = std::fs::read(output.path().join("_assets/radio-extension.js")).unwrap();
    assert_eq!(Some(script), builtin_asset(BUILTIN_SCRIPT).map(|data| data.into_owned()));
    assert!(output.path().join("_assets/radio-extension.css").is_file());
    assert_eq!(env.meta.style, vec!["_assets/radio-extension.css"]);
}

#[test]
fn test_failed_bundle_leaves_metadata_empty() {
    let dir = tempfile::tempdir().unwrap();
    let transform =
        RadioTransform::new(RadioOptions::default().with_assets_dir(dir.path().join("missing")));
    let opts = TransformOptions {
        output: dir.path().join("out"),
    };
    let mut env = DocumentEnv::new();
    assert!(transform.render(INSTALL, &mut env, &opts).is_err());
    assert!(env.meta.script.is_empty());
    assert!(env.meta.style.is_empty());
}

#[test]
fn test_numbered_heading_stays_inline() {
    let rendered = transform()
        .render(
            "## 1. Introduction\n\n# - Dash\n",
            &mut DocumentEnv::new(),
            &TransformOptions::default(),
        )
        .unwrap();
    assert_eq!(rendered.html, "<h2>1. Introduction</h2>\n<h1>- Dash</h1>\n");
}

#[test]
fn test_reference_link_in_option_body() {
    let markdown = "\
{% list radio group=os %}

- Linux

  See [the docs][apt].

- macOS

  Use brew.

{% endlist %}

[apt]: https://example.com/apt
";
    let rendered = transform()
        .render(markdown, &mut DocumentEnv::new(), &TransformOptions::default())
        .unwrap();
    assert!(
        rendered
            .html
            .contains(r#"<p>See <a href="https://example.com/apt">the docs</a>.</p>"#),
        "{}",
        rendered.html
    );
    assert!(!rendered.html.contains("[apt]"));
}
