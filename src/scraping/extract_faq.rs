use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::config::config::SelectorConfig;
use crate::errors::SelectorError;
use crate::faq_data::RawFaqRecord;

/// Parsed selectors for every marker of the FAQ structure.
#[derive(Debug, Clone)]
pub struct FaqSelectors {
    category_heading: Selector,
    accordion_container: Selector,
    accordion_item: Selector,
    item_title: Selector,
    item_content: Selector,
}

impl FaqSelectors {
    pub fn from_config(config: &SelectorConfig) -> Result<Self, SelectorError> {
        Ok(Self {
            category_heading: parse_selector("category heading", &config.category_heading)?,
            accordion_container: parse_selector("accordion container", &config.accordion_container)?,
            accordion_item: parse_selector("accordion item", &config.accordion_item)?,
            item_title: parse_selector("item title", &config.item_title)?,
            item_content: parse_selector("item content", &config.item_content)?,
        })
    }
}

fn parse_selector(role: &'static str, css: &str) -> Result<Selector, SelectorError> {
    Selector::parse(css).map_err(|e| SelectorError {
        role,
        css: css.to_string(),
        reason: e.to_string(),
    })
}

/// Read-only cursor over the document's elements in document order.
struct ElementCursor<'a, 'doc> {
    elements: &'a [ElementRef<'doc>],
}

impl<'a, 'doc> ElementCursor<'a, 'doc> {
    fn new(elements: &'a [ElementRef<'doc>]) -> Self {
        Self { elements }
    }

    /// Positions of every element matching `selector`.
    fn positions_of(&self, selector: &Selector) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| selector.matches(element))
            .map(|(position, _)| position)
            .collect()
    }

    /// First element after `from` and before `until` that matches `selector`.
    fn next_matching(&self, selector: &Selector, from: usize, until: usize) -> Option<ElementRef<'doc>> {
        let until = until.min(self.elements.len());
        if from + 1 >= until {
            return None;
        }
        self.elements[from + 1..until]
            .iter()
            .find(|element| selector.matches(element))
            .copied()
    }
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

/// Extracts (category, question, answer) triples from the FAQ page markup.
///
/// Each category heading is paired with the first accordion container found
/// after it and before the next heading. Items without a title are skipped,
/// items without a content block get an empty answer.
pub fn extract_faq(html_content: &str, selectors: &FaqSelectors) -> Vec<RawFaqRecord> {
    let document = Html::parse_document(html_content);
    let elements: Vec<ElementRef> = document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .collect();
    let cursor = ElementCursor::new(&elements);

    let headings = cursor.positions_of(&selectors.category_heading);
    let mut records = Vec::new();

    for (index, &heading_position) in headings.iter().enumerate() {
        let category = element_text(elements[heading_position]);
        let next_heading = headings.get(index + 1).copied().unwrap_or(elements.len());

        let Some(container) =
            cursor.next_matching(&selectors.accordion_container, heading_position, next_heading)
        else {
            debug!(category = category.trim(), "No accordion found for category");
            continue;
        };

        for (item_index, item) in container.select(&selectors.accordion_item).enumerate() {
            let Some(title) = item.select(&selectors.item_title).next() else {
                warn!(
                    category = category.trim(),
                    item = item_index,
                    "Skipping accordion item without a title"
                );
                continue;
            };

            let answer = item
                .select(&selectors.item_content)
                .next()
                .map(element_text)
                .unwrap_or_default();

            records.push(RawFaqRecord {
                category: category.clone(),
                question: element_text(title),
                answer,
            });
        }
    }

    debug!(records = records.len(), categories = headings.len(), "Extraction finished");
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors() -> FaqSelectors {
        FaqSelectors::from_config(&SelectorConfig {
            category_heading: "h2.elementor-heading-title".to_string(),
            accordion_container: "div.jupiterx-advanced-accordion-wrapper".to_string(),
            accordion_item: "div.jupiterx-single-advanced-accordion-wrapper".to_string(),
            item_title: "span.jx-ac-title".to_string(),
            item_content: "div.jupiterx-ac-content-is-editor".to_string(),
        })
        .unwrap()
    }

    fn item(question: &str, answer: &str) -> String {
        format!(
            r#"<div class="jupiterx-single-advanced-accordion-wrapper">
                 <div class="jx-ac-header"><span class="jx-ac-title">{question}</span></div>
                 <div class="jupiterx-ac-content-is-editor"><p>{answer}</p></div>
               </div>"#
        )
    }

    fn accordion(items: &[String]) -> String {
        format!(
            r#"<div class="jupiterx-advanced-accordion-wrapper">{}</div>"#,
            items.concat()
        )
    }

    fn heading(text: &str) -> String {
        format!(r#"<h2 class="elementor-heading-title elementor-size-default">{text}</h2>"#)
    }

    fn page(body: &str) -> String {
        format!("<!DOCTYPE html><html><head><title>FAQ</title></head><body>{body}</body></html>")
    }

    fn triple(record: &RawFaqRecord) -> (&str, &str, &str) {
        (
            record.category.trim(),
            record.question.trim(),
            record.answer.trim(),
        )
    }

    #[test]
    fn pairs_each_heading_with_following_accordion() {
        let html = page(&format!(
            "{}{}{}{}",
            heading("Tickets"),
            accordion(&[
                item("Wanneer gaan de deuren open?", "Om 10:00."),
                item("Kan ik mijn ticket doorverkopen?", "Ja, via de ticketshop."),
            ]),
            heading("Camping"),
            accordion(&[item("Mag ik een tent meenemen?", "Nee.")]),
        ));

        let records = extract_faq(&html, &selectors());

        let triples: Vec<_> = records.iter().map(triple).collect();
        assert_eq!(
            triples,
            vec![
                ("Tickets", "Wanneer gaan de deuren open?", "Om 10:00."),
                ("Tickets", "Kan ik mijn ticket doorverkopen?", "Ja, via de ticketshop."),
                ("Camping", "Mag ik een tent meenemen?", "Nee."),
            ]
        );
    }

    #[test]
    fn accordion_found_outside_heading_siblings() {
        let html = page(&format!(
            r#"<section><div class="elementor-widget">{}</div></section>
               <section><div class="elementor-column">{}</div></section>"#,
            heading("Eten en drinken"),
            accordion(&[item("Is er vegetarisch eten?", "Ja.")]),
        ));

        let records = extract_faq(&html, &selectors());

        assert_eq!(records.len(), 1);
        assert_eq!(triple(&records[0]), ("Eten en drinken", "Is er vegetarisch eten?", "Ja."));
    }

    #[test]
    fn trailing_heading_without_accordion_yields_nothing() {
        let html = page(&format!(
            "{}{}{}<p>Meer informatie volgt.</p>",
            heading("Tickets"),
            accordion(&[item("Wat kost een ticket?", "35 euro.")]),
            heading("Parkeren"),
        ));

        let records = extract_faq(&html, &selectors());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, "Tickets");
    }

    #[test]
    fn heading_does_not_borrow_accordion_of_next_heading() {
        let html = page(&format!(
            "{}{}{}",
            heading("Leeg"),
            heading("Tickets"),
            accordion(&[item("Wat kost een ticket?", "35 euro.")]),
        ));

        let records = extract_faq(&html, &selectors());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, "Tickets");
    }

    #[test]
    fn item_without_title_is_skipped() {
        let untitled = r#"<div class="jupiterx-single-advanced-accordion-wrapper">
                 <div class="jupiterx-ac-content-is-editor"><p>Zonder vraag.</p></div>
               </div>"#
            .to_string();
        let html = page(&format!(
            "{}{}",
            heading("Tickets"),
            accordion(&[untitled, item("Wat kost een ticket?", "35 euro.")]),
        ));

        let records = extract_faq(&html, &selectors());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "Wat kost een ticket?");
    }

    #[test]
    fn item_without_content_gets_empty_answer() {
        let unanswered = r#"<div class="jupiterx-single-advanced-accordion-wrapper">
                 <span class="jx-ac-title">Komt er een line-up?</span>
               </div>"#
            .to_string();
        let html = page(&format!("{}{}", heading("Programma"), accordion(&[unanswered])));

        let records = extract_faq(&html, &selectors());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "Komt er een line-up?");
        assert_eq!(records[0].answer, "");
    }

    #[test]
    fn page_without_markers_yields_nothing() {
        let records = extract_faq(&page("<h1>Onderhoud</h1>"), &selectors());
        assert!(records.is_empty());
    }

    #[test]
    fn invalid_selector_is_reported_with_its_role() {
        let mut config = SelectorConfig {
            category_heading: "h2".to_string(),
            accordion_container: "div".to_string(),
            accordion_item: "div".to_string(),
            item_title: "span".to_string(),
            item_content: "div".to_string(),
        };
        config.item_title = "span[".to_string();

        let error = FaqSelectors::from_config(&config).unwrap_err();

        assert_eq!(error.role, "item title");
        assert_eq!(error.css, "span[");
    }
}
