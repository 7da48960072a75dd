//! Building the replacement tokens for a radio list.

use rw_radio_common::{
    ACTIVE_ATTR, ACTIVE_CLASS, CONTAINER_CLASS, GROUP_ATTR, HEADER_CLASS, HEADER_LIST_CLASS,
    ID_ATTR, KEY_ATTR, PANEL_CLASS, ROLE_HEADER, ROLE_HEADER_LIST, ROLE_PANEL, flag,
};

use crate::error::TransformError;
use crate::extract::RadioOption;
use crate::name::OptionName;
use crate::session::TransformSession;
use crate::token::{LineRange, Token, TokenKind};

/// Container-level inputs of [`synthesize`].
pub(crate) struct Container<'a> {
    pub(crate) group: &'a str,
    /// Extra classes for the container, space separated.
    pub(crate) classes: &'a str,
}

/// Build the token tree for a radio list.
///
/// Layout: container, header list with one header per option, then one
/// panel per option holding the option body. The first option starts active.
pub(crate) fn synthesize(
    options: Vec<RadioOption>,
    container: &Container<'_>,
    session: &mut TransformSession,
) -> Result<Vec<Token>, TransformError> {
    let mut container_open = Token::block(TokenKind::RadioOpen, "div", 1);
    container_open.attr_set(
        "class",
        [CONTAINER_CLASS, container.classes.trim()]
            .iter()
            .filter(|class| !class.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" "),
    );
    container_open.attr_set(GROUP_ATTR, container.group);

    let mut list_open = Token::block(TokenKind::RadioListOpen, "div", 1)
        .with_map(Some(header_list_map(&options)?));
    list_open.attr_set("class", HEADER_LIST_CLASS);
    list_open.attr_set("role", ROLE_HEADER_LIST);

    let mut headers = Vec::with_capacity(options.len() * 3);
    let mut panels = Vec::new();

    for (idx, option) in options.into_iter().enumerate() {
        let active = idx == 0;
        let name = OptionName::parse(&option.name);
        let stable_id = session.stable_id(name.id_seed());
        let panel_id = session.panel_id();

        let mut header = Token::block(TokenKind::RadioButtonOpen, "div", 1).with_map(option.map);
        header.markup.clone_from(&option.markup);
        header.attr_set("id", stable_id.as_str());
        header.attr_set(ID_ATTR, stable_id.as_str());
        header.attr_set(KEY_ATTR, name.key());
        header.attr_set(ACTIVE_ATTR, flag(active));
        header.attr_set("class", HEADER_CLASS);
        header.attr_set("role", ROLE_HEADER);
        header.attr_set("aria-controls", panel_id.as_str());
        header.attr_set("aria-selected", flag(active));
        header.attr_set("tabindex", if active { "0" } else { "-1" });

        let mut panel = Token::block(TokenKind::RadioPanelOpen, "div", 1);
        panel.attr_set("id", panel_id);
        panel.attr_set("class", PANEL_CLASS);
        panel.attr_set("role", ROLE_PANEL);
        panel.attr_set("aria-labelledby", stable_id);
        panel.attr_set("data-title", name.label.as_str());

        if active {
            header.attr_join("class", ACTIVE_CLASS);
            panel.attr_join("class", ACTIVE_CLASS);
        }

        let mut label = Token::inline("");
        label.children.push(Token::text(name.label));

        headers.push(header);
        headers.push(label);
        headers.push(Token::block(TokenKind::RadioButtonClose, "div", -1));

        panels.push(panel);
        panels.extend(option.tokens);
        panels.push(Token::block(TokenKind::RadioPanelClose, "div", -1));
    }

    let mut tokens = Vec::with_capacity(headers.len() + panels.len() + 4);
    tokens.push(container_open);
    tokens.push(list_open);
    tokens.extend(headers);
    tokens.push(Token::block(TokenKind::RadioListClose, "div", -1));
    tokens.extend(panels);
    tokens.push(Token::block(TokenKind::RadioClose, "div", -1));
    Ok(tokens)
}

/// Lines from the start of the first option to the end of the last.
fn header_list_map(options: &[RadioOption]) -> Result<LineRange, TransformError> {
    let missing = |option: Option<&RadioOption>| TransformError::MissingLineMapping {
        name: option.map(|option| option.name.clone()).unwrap_or_default(),
    };
    let first = options.first();
    let start = first
        .and_then(|option| option.map)
        .map(|(start, _)| start)
        .ok_or_else(|| missing(first))?;
    let last = options.last();
    let end = last
        .and_then(|option| option.map)
        .map(|(_, end)| end)
        .ok_or_else(|| missing(last))?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn option(name: &str, map: Option<LineRange>) -> RadioOption {
        RadioOption {
            name: name.to_owned(),
            tokens: vec![
                Token::block(TokenKind::ParagraphOpen, "p", 1),
                Token::inline(format!("{name} body")),
                Token::block(TokenKind::ParagraphClose, "p", -1),
            ],
            map,
            markup: "-".to_owned(),
        }
    }

    fn build(options: Vec<RadioOption>) -> Vec<Token> {
        let mut session = TransformSession::new(1);
        let container = Container {
            group: "os",
            classes: "wide",
        };
        synthesize(options, &container, &mut session).unwrap()
    }

    fn of_kind<'a>(tokens: &'a [Token], kind: &TokenKind) -> Vec<&'a Token> {
        tokens.iter().filter(|t| t.kind == *kind).collect()
    }

    #[test]
    fn test_structure() {
        let tokens = build(vec![option("Linux", Some((2, 5))), option("macOS", Some((6, 9)))]);
        let kinds: Vec<&str> = tokens.iter().map(|t| t.kind.name()).collect();
        assert_eq!(
            kinds,
            vec![
                "radio_open",
                "radio_list_open",
                "radio_button_open",
                "inline",
                "radio_button_close",
                "radio_button_open",
                "inline",
                "radio_button_close",
                "radio_list_close",
                "radio_panel_open",
                "paragraph_open",
                "inline",
                "paragraph_close",
                "radio_panel_close",
                "radio_panel_open",
                "paragraph_open",
                "inline",
                "paragraph_close",
                "radio_panel_close",
                "radio_close",
            ]
        );
        assert_eq!(tokens[0].attr_get("class"), Some("rw-radio wide"));
        assert_eq!(tokens[0].attr_get(GROUP_ATTR), Some("os"));
        assert_eq!(tokens[1].map, Some((2, 9)));
        assert_eq!(tokens[1].attr_get("role"), Some("tablist"));
    }

    #[test]
    fn test_first_option_active() {
        let tokens = build(vec![
            option("A", Some((0, 1))),
            option("B", Some((1, 2))),
            option("C", Some((2, 3))),
        ]);
        let headers = of_kind(&tokens, &TokenKind::RadioButtonOpen);
        let panels = of_kind(&tokens, &TokenKind::RadioPanelOpen);
        assert_eq!(headers.len(), 3);
        assert_eq!(panels.len(), 3);

        for (idx, (header, panel)) in headers.iter().zip(&panels).enumerate() {
            let active = idx == 0;
            assert_eq!(header.attr_get(ACTIVE_ATTR), Some(flag(active)));
            assert_eq!(header.attr_get("aria-selected"), Some(flag(active)));
            assert_eq!(header.attr_get("tabindex"), Some(if active { "0" } else { "-1" }));
            let panel_active = panel
                .attr_get("class")
                .is_some_and(|class| class.split(' ').any(|c| c == ACTIVE_CLASS));
            assert_eq!(panel_active, active);
        }
    }

    #[test]
    fn test_aria_links() {
        let tokens = build(vec![option("Linux", Some((0, 2)))]);
        let header = of_kind(&tokens, &TokenKind::RadioButtonOpen)[0];
        let panel = of_kind(&tokens, &TokenKind::RadioPanelOpen)[0];
        assert_eq!(header.attr_get("aria-controls"), panel.attr_get("id"));
        assert_eq!(panel.attr_get("aria-labelledby"), header.attr_get(ID_ATTR));
        assert_eq!(header.attr_get("id"), Some("linux"));
        assert_eq!(panel.attr_get("data-title"), Some("Linux"));
        assert_eq!(header.map, Some((0, 2)));
        assert_eq!(header.markup, "-");
    }

    #[test]
    fn test_custom_anchor() {
        let tokens = build(vec![
            option("Label", Some((0, 1))),
            option("Label {#custom}", Some((1, 2))),
        ]);
        let headers = of_kind(&tokens, &TokenKind::RadioButtonOpen);
        assert_eq!(headers[0].attr_get(ID_ATTR), Some("label"));
        assert_eq!(headers[1].attr_get(ID_ATTR), Some("custom"));
        assert_eq!(headers[1].attr_get(KEY_ATTR), Some("custom"));

        let labels: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Inline && !t.children.is_empty())
            .map(|t| t.children[0].content.as_str())
            .collect();
        assert_eq!(labels, vec!["Label", "Label"]);
    }

    #[test]
    fn test_duplicate_names_get_distinct_ids_same_key() {
        let tokens = build(vec![option("Alpha", Some((0, 1))), option("alpha", Some((1, 2)))]);
        let headers = of_kind(&tokens, &TokenKind::RadioButtonOpen);
        assert_eq!(headers[0].attr_get(ID_ATTR), Some("alpha"));
        assert_eq!(headers[1].attr_get(ID_ATTR), Some("alpha-1"));
        assert_eq!(headers[0].attr_get(KEY_ATTR), headers[1].attr_get(KEY_ATTR));
    }

    #[test]
    fn test_bodies_untouched() {
        let options = vec![option("A", Some((0, 1)))];
        let body = options[0].tokens.clone();
        let tokens = build(options);
        assert_eq!(tokens[7..10].to_vec(), body);
    }

    #[test]
    fn test_missing_line_mapping_is_fatal() {
        let mut session = TransformSession::new(1);
        let container = Container {
            group: "os",
            classes: "",
        };
        let err = synthesize(
            vec![option("A", Some((0, 1))), option("B", None)],
            &container,
            &mut session,
        )
        .unwrap_err();
        assert!(matches!(err, TransformError::MissingLineMapping { name } if name == "B"));
    }

    #[test]
    fn test_no_extra_classes() {
        let mut session = TransformSession::new(1);
        let container = Container {
            group: "g",
            classes: "  ",
        };
        let tokens = synthesize(vec![option("A", Some((0, 1)))], &container, &mut session).unwrap();
        assert_eq!(tokens[0].attr_get("class"), Some("rw-radio"));
    }
}
