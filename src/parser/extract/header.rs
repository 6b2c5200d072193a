use std::sync::LazyLock;

use chrono::NaiveDateTime;
use scraper::{Html, Selector};

use crate::error::ParseError;
use crate::parser::text::{element_text, normalize};

static MARKER: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[name]").unwrap());
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").unwrap());
static CREATED: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h4").unwrap());

/// Characters before the timestamp in the creation note, e.g. `"(erstellt: "`.
const CREATED_AT_OFFSET: usize = 11;
/// Day and month come with or without a leading zero.
const CREATED_AT_FORMAT: &str = "%d.%m.%Y um %H:%M Uhr";

/// `name` of the fragment's day marker, verbatim.
pub fn find_date(document: &Html) -> String {
    document
        .select(&MARKER)
        .next()
        .and_then(|a| a.value().attr("name"))
        .unwrap_or_default()
        .to_string()
}

pub fn find_title(document: &Html) -> String {
    document
        .select(&TITLE)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Parse the creation note of the first `h4`, e.g.
/// `(erstellt: 12.10.2023 um 14:22 Uhr)`.
pub fn find_created_at(document: &Html) -> Result<NaiveDateTime, ParseError> {
    let heading = document
        .select(&CREATED)
        .next()
        .ok_or(ParseError::ElementNotFound("creation heading (h4)"))?;
    parse_created_at(&element_text(heading))
}

fn parse_created_at(text: &str) -> Result<NaiveDateTime, ParseError> {
    let start = text
        .char_indices()
        .nth(CREATED_AT_OFFSET)
        .map(|(i, _)| i)
        .ok_or_else(|| ParseError::format("creation note", format!("too short: {:?}", text)))?;
    let end = text
        .find(')')
        .filter(|&end| end >= start)
        .ok_or_else(|| ParseError::format("creation note", format!("no closing parenthesis: {:?}", text)))?;

    let stamp = normalize(&text[start..end]);
    NaiveDateTime::parse_from_str(&stamp, CREATED_AT_FORMAT)
        .map_err(|e| ParseError::format("creation note", format!("{:?}: {}", stamp, e)))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn doc(body: &str) -> Html {
        Html::parse_document(body)
    }

    #[test]
    fn date_is_marker_name_verbatim() {
        let d = doc(r#"<a name=" 13.10.2023 "></a><a name="other"></a>"#);
        assert_eq!(find_date(&d), " 13.10.2023 ");
    }

    #[test]
    fn missing_marker_and_title_are_empty() {
        let d = doc("<p>leer</p>");
        assert_eq!(find_date(&d), "");
        assert_eq!(find_title(&d), "");
    }

    #[test]
    fn title_is_first_h2_normalized() {
        let d = doc("<h2>\n Vertretungsplan für\tFreitag, 13.10.2023 </h2><h2>zweite</h2>");
        assert_eq!(find_title(&d), "Vertretungsplan für Freitag, 13.10.2023");
    }

    #[test]
    fn created_at_padded() {
        let d = doc("<h4>(erstellt: 12.10.2023 um 14:22 Uhr)</h4>");
        let t = find_created_at(&d).unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2023, 10, 12));
        assert_eq!((t.hour(), t.minute()), (14, 22));
    }

    #[test]
    fn created_at_without_leading_zeros() {
        let d = doc("<h4>(erstellt: 2.9.2023 um 7:05 Uhr)</h4>");
        let t = find_created_at(&d).unwrap();
        assert_eq!((t.month(), t.day(), t.hour(), t.minute()), (9, 2, 7, 5));
    }

    #[test]
    fn created_at_missing_heading() {
        let err = find_created_at(&doc("<h2>x</h2>")).unwrap_err();
        assert!(matches!(err, ParseError::ElementNotFound(_)));
    }

    #[test]
    fn created_at_without_closing_parenthesis() {
        let err = find_created_at(&doc("<h4>(erstellt: 12.10.2023 um 14:22 Uhr</h4>")).unwrap_err();
        assert!(matches!(err, ParseError::Format { .. }));
    }

    #[test]
    fn created_at_short_heading() {
        let err = find_created_at(&doc("<h4>(kurz)</h4>")).unwrap_err();
        assert!(matches!(err, ParseError::Format { .. }));
        let err = find_created_at(&doc("<h4>kurz</h4>")).unwrap_err();
        assert!(matches!(err, ParseError::Format { .. }));
    }

    #[test]
    fn created_at_garbage() {
        let err = find_created_at(&doc("<h4>(erstellt: gestern abend)</h4>")).unwrap_err();
        assert!(matches!(err, ParseError::Format { .. }));
    }
}
