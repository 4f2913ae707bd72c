use crate::card::{header, Card};
use crate::error::Result;
use crate::log_info;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

pub fn ensure_directory(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// File stem for a set: spaces become underscores, periods and path
/// separators become hyphens. Falls back to `default_name` when no usable
/// title was found.
pub fn output_stem(title: Option<&str>, default_name: &str) -> String {
    match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => title
            .chars()
            .map(|c| match c {
                ' ' => '_',
                '.' | '/' | '\\' => '-',
                c => c,
            })
            .collect(),
        None => default_name.to_string(),
    }
}

pub fn output_path(
    dir: impl AsRef<Path>,
    title: Option<&str>,
    default_name: &str,
    format: OutputFormat,
) -> PathBuf {
    dir.as_ref().join(format!(
        "{}.{}",
        output_stem(title, default_name),
        format.extension()
    ))
}

/// Header row followed by one row per card, in the given order.
pub fn write_csv<W: Write>(writer: W, cards: &[Card]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(header())?;
    for card in cards {
        csv_writer.serialize(card)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(mut writer: W, cards: &[Card]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, cards)?;
    writeln!(writer)?;
    Ok(())
}

/// Writes every card to `path` in one go, creating the parent directory.
pub fn save_cards(cards: &[Card], path: impl AsRef<Path>, format: OutputFormat) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }

    let file = File::create(path)?;
    match format {
        OutputFormat::Csv => write_csv(file, cards)?,
        OutputFormat::Json => write_json(file, cards)?,
    }

    log_info!(
        "[writer] Cards found: {}, saved to {}",
        cards.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Field;

    fn card(number: &str, effect: &str) -> Card {
        Card::from_fn(|field| match field {
            Field::Number => number.to_string(),
            Field::Effect => effect.to_string(),
            _ => "null".to_string(),
        })
    }

    #[test]
    fn stem_replaces_spaces_and_periods() {
        assert_eq!(
            output_stem(Some("BOOSTER Release Special Booster Ver.1.0 [BT01-03]"), "digifile"),
            "BOOSTER_Release_Special_Booster_Ver-1-0_[BT01-03]"
        );
    }

    #[test]
    fn stem_falls_back_to_default() {
        assert_eq!(output_stem(None, "digifile"), "digifile");
        assert_eq!(output_stem(Some("  "), "digifile"), "digifile");
    }

    #[test]
    fn stem_never_escapes_the_output_directory() {
        assert_eq!(output_stem(Some("../BT1/2"), "digifile"), "---BT1-2");
    }

    #[test]
    fn path_uses_format_extension() {
        let path = output_path("data", Some("BT-01"), "digifile", OutputFormat::Json);
        assert_eq!(path, Path::new("data").join("BT-01.json"));
    }

    #[test]
    fn csv_has_header_even_without_cards() {
        let mut out = Vec::new();
        write_csv(&mut out, &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), [header().join(",")]);
    }

    #[test]
    fn csv_quotes_only_when_needed() {
        let mut out = Vec::new();
        write_csv(
            &mut out,
            &[card("BT1-001", "plain"), card("BT1-002", "Draw 1, then \"trash\"")],
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("BT1-001,null,"));
        assert!(lines[1].contains(",plain,"));
        assert!(lines[2].contains(r#","Draw 1, then ""trash""","#));
    }

    #[test]
    fn csv_quotes_line_breaks() {
        let mut out = Vec::new();
        write_csv(&mut out, &[card("BT1-003", "[On Play] Draw 1.\n[Security] Play this card.")])
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains(",\"[On Play] Draw 1.\n[Security] Play this card.\","));
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][13], "[On Play] Draw 1.\n[Security] Play this card.");
    }

    #[test]
    fn json_keeps_field_names() {
        let mut out = Vec::new();
        write_json(&mut out, &[card("BT1-001", "plain")]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["number"], "BT1-001");
        assert_eq!(value[0]["type"], "null");
        assert_eq!(value[0]["effect"], "plain");
    }
}
