//! Radio list blocks for markdown.
//!
//! A radio list is a markdown list wrapped in `{% list radio %}` and
//! `{% endlist %}` markers. Each top-level item becomes an option: its first
//! paragraph is the option name and the rest is the option body. The
//! transform replaces the list with a container holding a tab-style header
//! list and one panel per option, ready for the selection runtime.
//!
//! # Architecture
//!
//! The transform works on a flat token stream ([`Token`]) with open/close
//! pairing and source line maps:
//! - [`tokenize`]: pulldown-cmark events to tokens
//! - [`RadioTransform`]: finds markers, extracts options, splices in the
//!   synthesized container and records runtime assets in [`DocumentEnv`]
//! - [`HtmlRenderer`]: tokens to HTML
//!
//! Stable option ids are slugs of the option names, unique within one pass
//! ([`TransformSession`]). Option keys are case-insensitive and shared by
//! every list in the same group, which is how the runtime keeps lists in
//! sync.
//!
//! # Example
//!
//! ```
//! use rw_radio::{DocumentEnv, RadioOptions, RadioTransform, TransformOptions};
//!
//! let markdown = "\
//! {% list radio group=pm %}
//!
//! - npm
//!
//!   `npm install`
//!
//! - Yarn {#yarn-classic}
//!
//!   `yarn add`
//!
//! {% endlist %}
//! ";
//!
//! let transform = RadioTransform::new(RadioOptions::default().with_bundle(false));
//! let rendered = transform
//!     .render(markdown, &mut DocumentEnv::new(), &TransformOptions::default())
//!     .unwrap();
//!
//! assert!(rendered.html.contains(r#"data-rw-key="yarn-classic""#));
//! assert!(rendered.html.contains(">Yarn</div>"));
//! ```

mod assets;
mod error;
mod extract;
mod grammar;
mod html;
mod markdown;
mod name;
mod session;
mod slug;
mod synthesize;
mod token;
mod transform;

pub use assets::{BUILTIN_SCRIPT, BUILTIN_STYLE, DocumentEnv, DocumentMeta, builtin_asset};
pub use error::TransformError;
pub use extract::RadioOption;
pub use html::{HtmlRenderer, escape_html};
pub use markdown::{parser_options, tokenize};
pub use name::OptionName;
pub use session::TransformSession;
pub use slug::{Slugger, slugify};
pub use token::{LineRange, Token, TokenKind};
pub use transform::{
    RadioOptions, RadioTransform, Rendered, TransformOptions, TransformOutput, UNCLOSED_ATTR,
};
