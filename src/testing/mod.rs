//! Test helpers: build a throwaway tree and capture its markup.
//!
//! ```ignore
//! use gilt_markup::testing::render_fragment;
//!
//! let out = render_fragment(|dom, body| {
//!     dom.paragraph(body, "hello")?;
//!     Ok(())
//! })?;
//! assert_eq!(out, "\t<p>hello</p>\n");
//! ```

use crate::config::RenderConfig;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::error::Result;
use crate::scope::Scope;

/// Run `build` against the body of a fresh tree and render the body's children.
pub fn render_fragment<F>(build: F) -> Result<String>
where
    F: FnOnce(&mut Dom<'static>, NodeId) -> Result<()>,
{
    let mut dom = Dom::new();
    let root = dom.root();
    build(&mut dom, root)?;
    Ok(dom.render_fragment())
}

/// Like [`render_fragment`], with a scope and configuration.
pub fn render_fragment_with<'s, F>(scope: &'s dyn Scope, config: RenderConfig, build: F) -> Result<String>
where
    F: FnOnce(&mut Dom<'s>, NodeId) -> Result<()>,
{
    let mut dom = Dom::with_scope(scope).with_config(config);
    let root = dom.root();
    build(&mut dom, root)?;
    Ok(dom.render_fragment())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarkupError;
    use crate::scope::RequestScope;
    use pretty_assertions::assert_eq;

    #[test]
    fn fragment_without_body_wrapper() {
        let out = render_fragment(|dom, body| {
            dom.paragraph(body, "hello")?;
            Ok(())
        })
        .unwrap();
        assert_eq!(out, "\t<p>hello</p>\n");
    }

    #[test]
    fn build_errors_propagate() {
        let err = render_fragment(|dom, body| {
            dom.div_with_id(body, "a")?;
            dom.div_with_id(body, "a")?;
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, MarkupError::DuplicateId { .. }));
    }

    #[test]
    fn scope_and_config() {
        let scope = RequestScope::new().with("h", "v");
        let config = RenderConfig::default().with_no_results_text("none");
        let out = render_fragment_with(&scope, config, |dom, body| {
            dom.hidden(body, "h", crate::element::Binding::Unbound)?;
            let none = dom.config().no_results_text.clone();
            dom.add_text(body, none)?;
            Ok(())
        })
        .unwrap();
        assert!(out.contains("value=\"v\""));
        assert!(out.contains("none"));
    }
}
