// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Report building
//!
//! Turns survey records into sanitized tabular data: one detail row
//! per site plus a summary table. Cells are stripped of control
//! characters and length-capped so any spreadsheet writer can
//! serialize them as-is; the CLI writes both tables as CSV.

use crate::domain::models::category::Category;
use crate::domain::models::survey::SurveyRecord;
use crate::utils::text::truncate_chars;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Spreadsheet formats cap cell contents at 32767 characters; stay
/// a few under.
pub const MAX_CELL_LEN: usize = 32_760;

/// Column headers of the detail table, in row order.
pub fn report_header() -> Vec<&'static str> {
    vec![
        "Universidad",
        "País",
        "URL",
        "Categoría Encontrada",
        "Término de Búsqueda",
        "Fecha Análisis",
        "Sitio Accesible",
        "Idioma Detectado",
        "Ciencia Abierta",
        "CA - Score",
        "CA - Términos",
        "Comunicación Pública",
        "CP - Score",
        "CP - Términos",
        "Diplomacia Científica",
        "DC - Score",
        "DC - Términos",
        "URLs Analizadas",
        "Contenido Muestra",
    ]
}

/// One sanitized row per survey record, in record order.
pub fn build_rows(records: &[SurveyRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            let mut row = vec![
                record.institution.name.clone(),
                record.institution.country.clone(),
                record.institution.url.clone(),
                record
                    .category
                    .map(|c| c.label().to_string())
                    .unwrap_or_else(|| "Control".to_string()),
                record.search_term.clone().unwrap_or_default(),
                record.analyzed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                yes_no(record.scorecard.accessible),
                record.scorecard.detected_language.clone(),
            ];
            for category in Category::ALL {
                let result = record.scorecard.category(category);
                row.push(yes_no(result.found));
                row.push(result.score.to_string());
                row.push(result.matched_terms().join(", "));
            }
            row.push(record.scorecard.analyzed_urls.join("; "));
            row.push(record.scorecard.sample_content.clone());
            row.iter().map(|cell| sanitize_cell(cell)).collect()
        })
        .collect()
}

/// Aggregate metrics over a finished run: totals, accessibility,
/// per-category found counts, top countries and languages.
pub fn build_summary(records: &[SurveyRecord]) -> Vec<(String, String)> {
    let total = records.len();
    if total == 0 {
        return vec![("Total Universidades Analizadas".to_string(), "0".to_string())];
    }

    let accessible = records.iter().filter(|r| r.scorecard.accessible).count();
    let mut summary = vec![
        (
            "Total Universidades Analizadas".to_string(),
            total.to_string(),
        ),
        (
            "Sitios Web Accesibles".to_string(),
            format!("{}/{} ({})", accessible, total, pct(accessible, total)),
        ),
    ];

    for category in Category::ALL {
        let found = records
            .iter()
            .filter(|r| r.scorecard.category(category).found)
            .count();
        summary.push((
            format!("Con {}", category.label()),
            format!("{} ({})", found, pct(found, total)),
        ));
    }

    let countries = frequency_table(records.iter().map(|r| r.institution.country.as_str()));
    summary.push((
        "Países más representados".to_string(),
        join_counts(&countries, 5),
    ));

    let languages = frequency_table(
        records
            .iter()
            .map(|r| r.scorecard.detected_language.as_str())
            .filter(|l| !l.is_empty()),
    );
    summary.push((
        "Idiomas detectados".to_string(),
        join_counts(&languages, usize::MAX),
    ));

    summary
}

/// Strip control characters (newlines and tabs become spaces) and
/// cap the cell length.
pub fn sanitize_cell(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect();
    truncate_chars(&cleaned, MAX_CELL_LEN)
}

/// Write a table as CSV with RFC 4180 quoting.
pub fn write_csv(path: &Path, header: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_row(&mut writer, header.iter().copied())?;
    for row in rows {
        write_row(&mut writer, row.iter().map(String::as_str))?;
    }
    writer.flush()
}

/// Write the summary table as a two-column CSV.
pub fn write_summary_csv(path: &Path, entries: &[(String, String)]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_row(&mut writer, ["Métrica", "Valor"].into_iter())?;
    for (metric, value) in entries {
        write_row(&mut writer, [metric.as_str(), value.as_str()].into_iter())?;
    }
    writer.flush()
}

fn write_row<'a, W: Write>(
    writer: &mut W,
    cells: impl Iterator<Item = &'a str>,
) -> io::Result<()> {
    let mut first = true;
    for cell in cells {
        if !first {
            write!(writer, ",")?;
        }
        first = false;
        if cell.contains(',') || cell.contains('"') {
            write!(writer, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(writer, "{}", cell)?;
        }
    }
    writeln!(writer)
}

fn yes_no(value: bool) -> String {
    if value { "Sí" } else { "No" }.to_string()
}

fn pct(part: usize, total: usize) -> String {
    format!("{:.1}%", part as f64 / total as f64 * 100.0)
}

/// Count occurrences, sorted by count descending then name for a
/// deterministic report.
fn frequency_table<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut table: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    table.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    table
}

fn join_counts(table: &[(String, usize)], limit: usize) -> String {
    table
        .iter()
        .take(limit)
        .map(|(name, count)| format!("{}: {}", name, count))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::institution::InstitutionRecord;
    use crate::domain::models::scorecard::{CategoryResult, SiteScorecard, TermHit};
    use chrono::TimeZone;
    use chrono::Utc;

    fn record(accessible: bool, country: &str, language: &str, ca_terms: &[&str]) -> SurveyRecord {
        let scorecard = if accessible {
            let mut card = SiteScorecard::inaccessible("https://www.uji.es");
            card.accessible = true;
            card.detected_language = language.to_string();
            card.sample_content = "muestra".to_string();
            card.analyzed_urls = vec!["https://www.uji.es".to_string()];
            card.categories.insert(
                Category::CienciaAbierta,
                CategoryResult::from_hits(
                    ca_terms
                        .iter()
                        .map(|t| TermHit {
                            term: t.to_string(),
                            context: format!("contexto con {}", t),
                        })
                        .collect(),
                ),
            );
            card
        } else {
            SiteScorecard::inaccessible("https://www.uji.es")
        };
        SurveyRecord {
            institution: InstitutionRecord {
                name: "Universitat Jaume I".to_string(),
                url: "https://www.uji.es".to_string(),
                domain: "www.uji.es".to_string(),
                country: country.to_string(),
            },
            category: Some(Category::CienciaAbierta),
            search_term: Some("universidad ciencia abierta".to_string()),
            analyzed_at: Utc.with_ymd_and_hms(2025, 9, 15, 12, 0, 0).unwrap(),
            scorecard,
        }
    }

    #[test]
    fn test_rows_align_with_header() {
        let records = vec![record(true, "España", "español", &["open science"])];
        let rows = build_rows(&records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), report_header().len());
        assert_eq!(rows[0][0], "Universitat Jaume I");
        assert_eq!(rows[0][6], "Sí");
        assert_eq!(rows[0][8], "Sí");
        assert_eq!(rows[0][9], "1");
        assert_eq!(rows[0][10], "open science");
        // comunicación pública found nothing
        assert_eq!(rows[0][11], "No");
    }

    #[test]
    fn test_sanitize_cell() {
        assert_eq!(sanitize_cell("a\nb\tc\u{0007}d"), "a b cd");
        let long = "x".repeat(MAX_CELL_LEN + 100);
        assert_eq!(sanitize_cell(&long).chars().count(), MAX_CELL_LEN);
    }

    #[test]
    fn test_summary_counts() {
        let records = vec![
            record(true, "España", "español", &["open science"]),
            record(true, "Chile", "español", &[]),
            record(false, "España", "", &[]),
        ];
        let summary = build_summary(&records);
        let map: HashMap<&str, &str> = summary
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(map["Total Universidades Analizadas"], "3");
        assert_eq!(map["Sitios Web Accesibles"], "2/3 (66.7%)");
        assert_eq!(map["Con Ciencia Abierta"], "1 (33.3%)");
        assert_eq!(map["Con Comunicación Pública"], "0 (0.0%)");
        assert_eq!(map["Países más representados"], "España: 2, Chile: 1");
        assert_eq!(map["Idiomas detectados"], "español: 2");
    }

    #[test]
    fn test_empty_run_summary() {
        let summary = build_summary(&[]);
        assert_eq!(summary[0].1, "0");
    }

    #[test]
    fn test_csv_quoting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("informe.csv");
        let rows = vec![vec![
            "Universidad, S.A.".to_string(),
            "con \"comillas\"".to_string(),
            "simple".to_string(),
        ]];
        write_csv(&path, &["a", "b", "c"], &rows).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "a,b,c\n\"Universidad, S.A.\",\"con \"\"comillas\"\"\",simple\n"
        );
    }
}
