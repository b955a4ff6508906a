//! Document: a full page around a [`Dom`].
//!
//! [`Document`] ties together the page head (title, metas, stylesheets) and the
//! body tree. The body is the `Dom` root; build into it through
//! [`dom_mut`](Document::dom_mut) and call [`render`](Document::render) once
//! the tree is complete.

use crate::config::RenderConfig;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::render::escape_html;
use crate::scope::Scope;

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A complete HTML page.
pub struct Document<'s> {
    title: String,
    metas: Vec<(String, String)>,
    stylesheets: Vec<String>,
    dom: Dom<'s>,
}

impl Document<'static> {
    /// A page with an empty body and default configuration.
    pub fn new(title: impl Into<String>) -> Self {
        Self::from_dom(title, Dom::new())
    }
}

impl<'s> Document<'s> {
    /// A page whose inputs resolve against `scope`.
    pub fn with_scope(title: impl Into<String>, scope: &'s dyn Scope) -> Self {
        Self::from_dom(title, Dom::with_scope(scope))
    }

    /// Wrap an existing tree.
    pub fn from_dom(title: impl Into<String>, dom: Dom<'s>) -> Self {
        Self {
            title: title.into(),
            metas: Vec::new(),
            stylesheets: Vec::new(),
            dom,
        }
    }

    /// Replace the tree's configuration (builder).
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.dom = self.dom.with_config(config);
        self
    }

    /// Add a `<meta name content>` entry (builder).
    pub fn with_meta(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.metas.push((name.into(), content.into()));
        self
    }

    /// Link a stylesheet from the head (builder).
    pub fn with_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheets.push(href.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn dom(&self) -> &Dom<'s> {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut Dom<'s> {
        &mut self.dom
    }

    /// The body node.
    pub fn body(&self) -> NodeId {
        self.dom.root()
    }

    /// Render the whole page. Rendering is repeatable.
    pub fn render(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        out.push_str(&format!(
            "<html lang=\"{}\">\n<head>\n",
            escape_html(&self.dom.config().lang)
        ));
        out.push_str("\t<meta charset=\"utf-8\" />\n");
        out.push_str(&format!("\t<title>{}</title>\n", escape_html(&self.title)));
        for (name, content) in &self.metas {
            out.push_str(&format!(
                "\t<meta name=\"{}\" content=\"{}\" />\n",
                escape_html(name),
                escape_html(content)
            ));
        }
        for href in &self.stylesheets {
            out.push_str(&format!(
                "\t<link href=\"{}\" rel=\"stylesheet\" />\n",
                escape_html(href)
            ));
        }
        out.push_str("</head>\n");
        out.push_str(&self.dom.render());
        out.push_str("</html>\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Binding;
    use crate::scope::RequestScope;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_page() {
        let doc = Document::new("Home");
        let expected = "<!DOCTYPE html>\n\
            <html lang=\"en\">\n\
            <head>\n\
            \t<meta charset=\"utf-8\" />\n\
            \t<title>Home</title>\n\
            </head>\n\
            <body>\n\
            </body>\n\
            </html>\n";
        assert_eq!(doc.render(), expected);
    }

    #[test]
    fn head_entries_and_body() {
        let mut doc = Document::new("A & B")
            .with_meta("author", "me")
            .with_stylesheet("/css/site.css");
        let body = doc.body();
        doc.dom_mut().paragraph(body, "hi").unwrap();
        let out = doc.render();
        assert!(out.contains("\t<title>A &amp; B</title>\n"));
        assert!(out.contains("\t<meta name=\"author\" content=\"me\" />\n"));
        assert!(out.contains("\t<link href=\"/css/site.css\" rel=\"stylesheet\" />\n"));
        assert!(out.ends_with("<body>\n\t<p>hi</p>\n</body>\n</html>\n"));
        assert_eq!(out, doc.render());
    }

    #[test]
    fn lang_from_config() {
        let doc = Document::new("x").with_config(RenderConfig::default().with_lang("de"));
        assert!(doc.render().contains("<html lang=\"de\">"));
    }

    #[test]
    fn inputs_resolve_against_scope() {
        let scope = RequestScope::new().with("q", "rust");
        let mut doc = Document::with_scope("Search", &scope);
        let body = doc.body();
        doc.dom_mut().text_input(body, "q", Binding::Unbound, None).unwrap();
        assert!(doc.render().contains("value=\"rust\""));
    }
}
