use crate::{Directory, LinkRecord};
use lazy_regex::regex;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

const E: &str = "Invalid selector";
lazy_static! {
    static ref BASE: Selector = Selector::parse("base[href]").expect(E);
    static ref CATEGORIES_LIST: Selector = Selector::parse("#categories_list").expect(E);
    static ref A: Selector = Selector::parse("a").expect(E);
    static ref NUMERIC_LABEL: Selector = Selector::parse(".h5.m-0").expect(E);
}

/// Labels carrying a modifier class on top of `h5 m-0` are not counts.
const NUMERIC_LABEL_CLASSES: usize = 2;

/// Returns the first maximal run of ASCII digits in `text`.
pub fn first_digit_run(text: &str) -> Option<String> {
    regex!(r"[0-9]+").find(text).map(|m| m.as_str().to_string())
}

fn text_content(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Resolves an anchor the way the DOM `href` property does: absolute
/// against the document base, empty when the attribute is missing, verbatim
/// when it cannot be resolved.
fn resolve_href(base: &Url, href: Option<&str>) -> String {
    match href {
        Some(href) => base
            .join(href)
            .map(String::from)
            .unwrap_or_else(|_| href.to_string()),
        None => String::new(),
    }
}

/// Document base URL: the first `<base href>` joined onto the page URL, or
/// the page URL itself.
fn document_base(doc: &Html, page_url: &Url) -> Url {
    doc.select(&BASE)
        .next()
        .and_then(|base| base.value().attr("href"))
        .and_then(|href| page_url.join(href).ok())
        .unwrap_or_else(|| page_url.clone())
}

#[derive(Debug, Default)]
pub struct CapterraDirectory;

impl Directory for CapterraDirectory {
    fn extract_categories(&self, doc: &Html, page_url: &Url, limit: usize) -> Vec<LinkRecord> {
        let Some(list) = doc.select(&CATEGORIES_LIST).next() else {
            return vec![];
        };

        let base = document_base(doc, page_url);
        list.select(&A)
            .take(limit)
            .map(|a| {
                LinkRecord::new(
                    resolve_href(&base, a.value().attr("href")),
                    text_content(&a),
                )
            })
            .collect()
    }

    fn extract_numeric_labels(&self, doc: &Html) -> Vec<Option<String>> {
        doc.select(&NUMERIC_LABEL)
            .filter(|el| el.value().classes().count() == NUMERIC_LABEL_CLASSES)
            .map(|el| {
                let number = first_digit_run(&text_content(&el));
                if number.is_none() {
                    debug!("No number found");
                }
                number
            })
            .collect()
    }
}
