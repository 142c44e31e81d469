//! Reader for the NNDC NuDat decay-search page.
//!
//! The page is HTML. The first table carries the Q-value in the second row,
//! fourth cell from the end; the second-to-last table lists gamma lines with
//! the energy in cell 1 and the intensity in percent in cell 2. Only `<td>`
//! cells are collected, so header rows built from `<th>` come out empty.

use super::{DecayDocumentError, DecayTable};
use crate::domain::IsotopeId;
use scraper::{Html, Selector};

pub const NNDC_DECAY_SEARCH_URL: &str = "https://www.nndc.bnl.gov/nudat2/decaysearchdirect.jsp";

pub fn decay_search_url(base: &str, isotope: &IsotopeId) -> String {
    format!("{base}?nuc={isotope}&unc=nds")
}

type HtmlRow = Vec<String>;
type HtmlTable = Vec<HtmlRow>;

pub fn parse_decay_document(html: &str) -> Result<DecayTable, DecayDocumentError> {
    let tables = extract_tables(html)?;
    if tables.len() < 2 {
        return Err(DecayDocumentError::MissingTables {
            expected: 2,
            actual: tables.len(),
        });
    }

    let q_value = parse_q_value(&tables[0])?;
    let rows: Vec<(f64, f64)> = tables[tables.len() - 2]
        .iter()
        .filter_map(|row| gamma_row(row))
        .collect();
    if rows.is_empty() {
        return Err(DecayDocumentError::NoGammaLines);
    }

    DecayTable::new(q_value, rows)
}

fn parse_q_value(table: &HtmlTable) -> Result<f64, DecayDocumentError> {
    let row = table.get(1).ok_or(DecayDocumentError::MissingQRow)?;
    if row.len() < 4 {
        return Err(DecayDocumentError::MissingQCell { actual: row.len() });
    }

    let raw = row[row.len() - 4].replace('\u{a0}', " ");
    first_token(&raw)
        .and_then(parse_number)
        .ok_or_else(|| DecayDocumentError::InvalidQValue {
            value: raw.trim().to_string(),
        })
}

// Energy and intensity are taken together so a non-numeric cell drops the
// whole row instead of shifting one column against the other.
fn gamma_row(row: &[String]) -> Option<(f64, f64)> {
    let energy = first_token(row.get(1)?).and_then(parse_number)?;
    let intensity = first_token(row.get(2)?).and_then(parse_number)?;
    Some((energy, intensity / 100.0))
}

fn first_token(cell: &str) -> Option<&str> {
    cell.split_whitespace().next()
}

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn extract_tables(html: &str) -> Result<Vec<HtmlTable>, DecayDocumentError> {
    let document = Html::parse_document(html);
    let table_selector = selector("table")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let tables = document
        .select(&table_selector)
        .map(|table| {
            table
                .select(&row_selector)
                .map(|row| {
                    row.select(&cell_selector)
                        .map(|cell| cell.text().collect::<String>().trim().to_string())
                        .collect::<HtmlRow>()
                })
                .collect::<HtmlTable>()
        })
        .collect();
    Ok(tables)
}

fn selector(css: &str) -> Result<Selector, DecayDocumentError> {
    Selector::parse(css).map_err(|_| DecayDocumentError::InvalidSelector {
        selector: css.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{decay_search_url, extract_tables, parse_decay_document};
    use crate::decay::DecayDocumentError;
    use crate::domain::{DesError, IsotopeId};

    const AM241_PAGE: &str = r#"
<html><head><title>Decay Radiation</title>
<script>if (a < b) { document.write("<table>"); }</script>
</head><body>
<table border="1">
  <tr><th>Parent</th><th>T1/2</th><th>Q (keV)</th><th>Mode</th><th>%</th><th>Ref</th></tr>
  <tr><td>241Am</td><td>432.6 y</td><td>&nbsp;5637.82&nbsp;12</td><td>&alpha;</td><td>100</td><td>NDS</td></tr>
</table>
<!-- <table><tr><td>commented out</td></tr></table> -->
<table>
  <tr><th>Type</th><th>Energy (keV)</th><th>Intensity (%)</th><th>Dose</th></tr>
  <tr><td>XR l</td><td>13.9</td><td>~37</td><td></td></tr>
  <tr><td>G</td><td>26.3446 <i>2</i></td><td>2.31 8</td><td>0.001</td></tr>
  <tr><td>G</td><td>59.5409 <i>1</i></td><td>35.92 17</td><td>0.0342</td></tr>
  <tr><td>G</td><td>59.5409 <i>1</i></td><td>35.92 17</td><td>0.0342</td></tr>
</table>
<table><tr><td>Page generated by NuDat</td></tr></table>
</body></html>
"#;

    #[test]
    fn url_embeds_isotope_and_uncertainty_style() {
        let isotope = IsotopeId::parse("Am-241").expect("isotope should parse");
        assert_eq!(
            decay_search_url("https://example.org/decay.jsp", &isotope),
            "https://example.org/decay.jsp?nuc=Am-241&unc=nds"
        );
    }

    #[test]
    fn document_yields_q_value_and_gamma_lines() {
        let table = parse_decay_document(AM241_PAGE).expect("document should parse");
        assert_eq!(table.q_value(), 5637.82);

        let lines: Vec<(f64, f64)> = table
            .lines()
            .iter()
            .map(|line| (line.energy, line.intensity))
            .collect();
        assert_eq!(lines, vec![(26.3446, 2.31 / 100.0), (59.5409, 35.92 / 100.0)]);
    }

    #[test]
    fn tables_skip_script_and_comment_markup() {
        let tables = extract_tables(AM241_PAGE).expect("tables should extract");
        assert_eq!(tables.len(), 3);
        assert_eq!(tables[0].len(), 2);
        assert!(tables[0][0].is_empty());
        assert_eq!(tables[2][0], vec!["Page generated by NuDat".to_string()]);
    }

    #[test]
    fn annihilation_rows_above_full_intensity_are_kept() {
        let page = r#"
<table>
  <tr><th>Parent</th><th>T1/2</th><th>Q</th><th>Mode</th><th>%</th><th>Ref</th></tr>
  <tr><td>22Na</td><td>2.6018 y</td><td>2842.2&nbsp;2</td><td>&epsilon;+&beta;+</td><td>100</td><td>NDS</td></tr>
</table>
<table>
  <tr><th>Type</th><th>Energy (keV)</th><th>Intensity (%)</th></tr>
  <tr><td>Annihil.</td><td>511.0</td><td>180.7 2</td></tr>
  <tr><td>G</td><td>1274.537 <i>7</i></td><td>99.94 13</td></tr>
</table>
<table><tr><td>footer</td></tr></table>
"#;
        let table = parse_decay_document(page).expect("annihilation line should not abort parsing");
        assert_eq!(table.q_value(), 2842.2);

        let lines: Vec<(f64, f64)> = table
            .lines()
            .iter()
            .map(|line| (line.energy, line.intensity))
            .collect();
        assert_eq!(lines, vec![(511.0, 180.7 / 100.0), (1274.537, 99.94 / 100.0)]);
    }

    #[test]
    fn cell_text_decodes_entities_and_inline_markup() {
        let tables = extract_tables(
            "<table><tr><td>a&amp;b&#65;&#x42;&lt;</td><td>59.5409 <i>1</i></td></tr></table>",
        )
        .expect("tables should extract");
        assert_eq!(tables, vec![vec![vec!["a&bAB<".to_string(), "59.5409 1".to_string()]]]);
    }

    #[test]
    fn malformed_documents_are_reported() {
        assert_eq!(
            parse_decay_document("<html>nothing here</html>"),
            Err(DecayDocumentError::MissingTables {
                expected: 2,
                actual: 0
            })
        );

        let no_gammas = "<table><tr></tr><tr><td>1</td><td>2</td><td>3</td><td>4</td></tr></table>\
                         <table><tr><td>none</td></tr></table><table></table>";
        assert_eq!(
            parse_decay_document(no_gammas),
            Err(DecayDocumentError::NoGammaLines)
        );

        let bad_q = "<table><tr></tr><tr><td>n/a</td><td>x</td><td>y</td><td>z</td></tr></table>\
                     <table><tr><td>G</td><td>10</td><td>50</td></tr></table><table></table>";
        let error: DesError = parse_decay_document(bad_q)
            .expect_err("Q-value should be rejected")
            .into();
        assert_eq!(error.code(), "DATA.DECAY_DOCUMENT");
        assert_eq!(error.exit_code(), 3);
        assert!(error.message().contains("n/a"));
    }
}
