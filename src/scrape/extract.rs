use scraper::{ElementRef, Html, Selector};

use super::error::ExtractError;

/// Strategy for pulling one text field out of a fund page. Each source owns its locator
/// so a markup change on one page only touches that page's strategy.
pub trait FieldLocator: std::fmt::Debug {
    fn locate(&self, document: &Html) -> Result<String, ExtractError>;
}

/// Position-based locator: the `outer_index`-th element matching `outer`, then the
/// `inner_index`-th element matching `inner` beneath it. Indices are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuralPath {
    pub outer: &'static str,
    pub outer_index: usize,
    pub inner: &'static str,
    pub inner_index: usize,
}

impl FieldLocator for StructuralPath {
    fn locate(&self, document: &Html) -> Result<String, ExtractError> {
        let outer = parse_selector(self.outer)?;
        let inner = parse_selector(self.inner)?;

        let block = nth_match(document.select(&outer), self.outer, self.outer_index)?;
        let field = nth_match(block.select(&inner), self.inner, self.inner_index)?;
        Ok(field.text().collect())
    }
}

/// Parses `html` and runs `locator` over it. The parsed document never outlives the call.
pub fn extract(html: &str, locator: &dyn FieldLocator) -> Result<String, ExtractError> {
    let document = Html::parse_document(html);
    locator.locate(&document)
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn nth_match<'a>(
    matches: impl Iterator<Item = ElementRef<'a>>,
    selector: &str,
    index: usize,
) -> Result<ElementRef<'a>, ExtractError> {
    let mut found = 0;
    for element in matches {
        if found == index {
            return Ok(element);
        }
        found += 1;
    }
    Err(ExtractError::NotFound {
        selector: selector.to_string(),
        index,
        found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: StructuralPath = StructuralPath {
        outer: ".block",
        outer_index: 2,
        inner: ".cell",
        inner_index: 1,
    };

    const PAGE: &str = r#"
        <html><body>
          <div class="block"><span class="cell">a0</span><span class="cell">a1</span></div>
          <div class="block"><span class="cell">b0</span><span class="cell">b1</span></div>
          <section class="block wide">
            <span class="cell">Return 1Y</span>
            <span class="cell"><b>+7</b>,25%</span>
            <span class="cell">c2</span>
          </section>
        </body></html>
    "#;

    #[test]
    fn locates_nested_cell_by_position() {
        assert_eq!(extract(PAGE, &PATH).expect("path exists"), "+7,25%");
    }

    #[test]
    fn first_level_index_out_of_range() {
        let path = StructuralPath {
            outer_index: 3,
            ..PATH
        };
        match extract(PAGE, &path) {
            Err(ExtractError::NotFound {
                selector,
                index,
                found,
            }) => {
                assert_eq!(selector, ".block");
                assert_eq!(index, 3);
                assert_eq!(found, 3);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn second_level_index_is_relative_to_block() {
        let path = StructuralPath {
            outer_index: 0,
            inner_index: 2,
            ..PATH
        };
        match extract(PAGE, &path) {
            Err(ExtractError::NotFound { selector, found, .. }) => {
                assert_eq!(selector, ".cell");
                assert_eq!(found, 2);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn empty_match_is_empty_text_not_error() {
        let page = r#"<div class="block"></div><div class="block"></div>
            <div class="block"><i class="cell">x</i><i class="cell"></i></div>"#;
        assert_eq!(extract(page, &PATH).expect("path exists"), "");
    }

    #[test]
    fn invalid_selector_is_reported() {
        let path = StructuralPath {
            outer: "..broken",
            ..PATH
        };
        assert!(matches!(
            extract(PAGE, &path),
            Err(ExtractError::Selector { .. })
        ));
    }

    #[test]
    fn empty_document_misses_first_level() {
        assert!(matches!(
            extract("", &PATH),
            Err(ExtractError::NotFound { found: 0, .. })
        ));
    }
}
