pub mod schedule;
pub mod title;

use scraper::Html;
use tracing::debug;

use crate::record::IpoRecord;

/// Two-part extraction: title (name + code) → schedule table.
/// Pages without a complete title are skipped.
pub fn extract_record(doc: &Html, url: &str) -> Option<IpoRecord> {
    let title = title::extract(doc);
    let (Some(company_name), Some(stock_code)) = (title.company_name, title.stock_code) else {
        debug!(url, "No company name or stock code, skipping");
        return None;
    };

    Some(IpoRecord {
        url: url.to_string(),
        company_name,
        stock_code,
        schedule: schedule::extract(doc),
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn parse(fixture: &str) -> Html {
        let html = std::fs::read_to_string(format!("tests/fixtures/{}.html", fixture)).unwrap();
        Html::parse_document(&html)
    }

    #[test]
    fn sakuratech_record() {
        let url = "https://www.ipokiso.com/company/2024/sakuratech.html";
        let rec = extract_record(&parse("sakuratech"), url).unwrap();
        assert_eq!(rec.url, url);
        assert_eq!(rec.company_name, "サクラテック");
        assert_eq!(rec.stock_code, "5588");
        assert_eq!(rec.schedule.apply_start, NaiveDate::from_ymd_opt(2024, 12, 5).unwrap());
        assert_eq!(rec.schedule.apply_end, NaiveDate::from_ymd_opt(2024, 12, 11).unwrap());
        assert_eq!(rec.schedule.winning_announce, NaiveDate::from_ymd_opt(2024, 12, 12).unwrap());
    }

    #[test]
    fn minatofoods_without_table_keeps_default_schedule() {
        let rec = extract_record(&parse("minatofoods"), "u").unwrap();
        assert_eq!(rec.company_name, "ミナトフーズ");
        assert_eq!(rec.stock_code, "2934");
        assert!(rec.schedule.is_unset());
    }

    #[test]
    fn kitaguni_without_title_is_skipped() {
        assert!(extract_record(&parse("kitaguni"), "u").is_none());
    }
}
