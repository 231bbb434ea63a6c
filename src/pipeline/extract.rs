use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};

use crate::config::EtlConfig;
use crate::types::{ExtractReport, ExtractedCompany, Extraction, SegmentMatch};

static DIV_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div").expect("static div selector"));
static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("static p selector"));

// "<rank>. <name> dengan pendapatan Rp<digits and dots>", anchored at the start only
static COMPANY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)\.\s(.+)\sdengan pendapatan\sRp(\d[\d.]*)")
        .expect("static company pattern")
});

/// Pulls ranked companies out of the article prose.
pub struct Extractor {
    container_class: String,
    preamble_phrase: String,
    segment_delimiter: String,
}

impl Extractor {
    pub fn new(
        container_class: impl Into<String>,
        preamble_phrase: impl Into<String>,
        segment_delimiter: impl Into<String>,
    ) -> Self {
        Self {
            container_class: container_class.into(),
            preamble_phrase: preamble_phrase.into(),
            segment_delimiter: segment_delimiter.into(),
        }
    }

    pub fn from_config(config: &EtlConfig) -> Self {
        Self::new(
            config.container_class.clone(),
            config.preamble_phrase.clone(),
            config.segment_delimiter.clone(),
        )
    }

    /// Extract every matching company from the page. A missing container or
    /// unmatched text produces fewer records, never an error.
    #[instrument(skip(self, html), fields(html_len = html.len()))]
    pub fn extract(&self, html: &str) -> Extraction {
        let document = Html::parse_document(html);
        let mut report = ExtractReport::default();
        let mut companies = Vec::new();

        let Some(container) = self.find_container(&document) else {
            warn!(
                container_class = %self.container_class,
                "Content container not found - the page structure may have changed"
            );
            return Extraction { companies, report };
        };
        report.container_found = true;

        for paragraph in container.select(&PARAGRAPH_SELECTOR) {
            let text = paragraph.text().collect::<String>();
            report.paragraphs_seen += 1;

            if text.starts_with(&self.preamble_phrase) {
                report.paragraphs_skipped += 1;
                continue;
            }

            for segment in self.split_segments(&text) {
                report.segments_seen += 1;
                match match_segment(segment) {
                    SegmentMatch::Matched(company) => {
                        report.segments_matched += 1;
                        companies.push(company);
                    }
                    SegmentMatch::Unmatched(rest) => {
                        report.segments_unmatched += 1;
                        debug!(segment = %rest, "Segment did not match company pattern");
                    }
                }
            }
        }

        info!(
            companies = companies.len(),
            paragraphs = report.paragraphs_seen,
            unmatched = report.segments_unmatched,
            "Extracted companies"
        );
        if companies.is_empty() {
            warn!("No companies found - the page structure may have changed");
        }

        Extraction { companies, report }
    }

    fn find_container<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document
            .select(&DIV_SELECTOR)
            .find(|div| div.value().attr("class") == Some(self.container_class.as_str()))
    }

    /// Split paragraph text on the delimiter, dropping blank pieces.
    pub fn split_segments<'t>(&self, text: &'t str) -> Vec<&'t str> {
        text.split(self.segment_delimiter.as_str())
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect()
    }
}

/// Classify a single segment against the company pattern.
pub fn match_segment(segment: &str) -> SegmentMatch {
    let Some(caps) = COMPANY_PATTERN.captures(segment) else {
        return SegmentMatch::Unmatched(segment.to_string());
    };

    // Ranks past i64 cannot be stored as an SQLite INTEGER
    let Ok(rank) = caps[1].parse::<i64>() else {
        return SegmentMatch::Unmatched(segment.to_string());
    };

    SegmentMatch::Matched(ExtractedCompany {
        rank,
        name: caps[2].trim().to_string(),
        revenue_raw: caps[3].to_string(),
    })
}
