//! Standalone page rendering for assembled preview documents.

use askama::Template;
use thiserror::Error;

use crate::application::preview::{PreviewDocument, Script};

#[derive(Debug, Error)]
#[error("template rendering failed: {0}")]
pub struct PageRenderError(#[from] askama::Error);

#[derive(Template)]
#[template(path = "preview.html")]
struct PreviewPage<'a> {
    title: &'a str,
    styles: Vec<&'a str>,
    body: &'a str,
    scripts: Vec<&'a str>,
}

/// Render a preview document into a single self-contained HTML page.
///
/// Styles and scripts are embedded in document order; the document's own
/// ordering guarantees (override priority, library-before-bootstrap) carry
/// through unchanged.
pub fn render_page(title: &str, document: &PreviewDocument) -> Result<String, PageRenderError> {
    let page = PreviewPage {
        title,
        styles: document
            .stylesheets
            .iter()
            .map(|sheet| sheet.css.as_str())
            .collect(),
        body: document.html.as_str(),
        scripts: document.scripts.iter().map(Script::source).collect(),
    };
    Ok(page.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::preview::Stylesheet;

    fn document() -> PreviewDocument {
        PreviewDocument {
            html: "<p>hello</p>".to_owned(),
            stylesheets: vec![
                Stylesheet {
                    name: "jupyter-main.css".to_owned(),
                    css: "body { margin: 0 }".to_owned(),
                },
                Stylesheet {
                    name: "jupyter-katex.min.css".to_owned(),
                    css: ".katex { display: inline }".to_owned(),
                },
            ],
            scripts: vec![
                Script::Bundled {
                    name: "jupyter-katex.min.js".to_owned(),
                    js: "var katex = {};".to_owned(),
                },
                Script::Inline {
                    source: "renderMathInElement(document.body);".to_owned(),
                },
            ],
        }
    }

    #[test]
    fn page_embeds_body_styles_and_scripts_in_order() {
        let page = render_page("demo.ipynb", &document()).expect("page renders");

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>demo.ipynb</title>"));
        assert!(page.contains("<p>hello</p>"));

        let main = page.find("body { margin: 0 }").expect("main css present");
        let katex_css = page.find(".katex").expect("katex css present");
        assert!(main < katex_css);

        let library = page.find("var katex").expect("library present");
        let bootstrap = page
            .find("renderMathInElement(document.body);")
            .expect("bootstrap present");
        assert!(library < bootstrap);
    }

    #[test]
    fn title_is_escaped() {
        let page = render_page("a<b>.ipynb", &document()).expect("page renders");
        assert!(page.contains("a&lt;b&gt;.ipynb"));
    }
}

