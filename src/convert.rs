//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use crate::config::{ClassifierToml, IoToml};

use kvote_io::ReaderConfig;
use kvote_knn::{KnnConfig, MetricKind};

/// Parses a field delimiter. Accepts a single ASCII character or `"tab"`.
pub fn parse_delimiter(s: &str) -> Result<u8> {
    if s.eq_ignore_ascii_case("tab") || s == "\\t" {
        return Ok(b'\t');
    }
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => bail!("delimiter must be a single ASCII character, got {s:?}"),
    }
}

/// Builds a [`ReaderConfig`] from the `[io]` table.
pub fn build_reader_config(io: &IoToml) -> Result<ReaderConfig> {
    let config = ReaderConfig::default()
        .with_has_headers(io.has_headers)
        .with_label_column(io.label_column)
        .with_delimiter(parse_delimiter(&io.delimiter)?);
    config.validate().context("invalid [io] configuration")?;
    Ok(config)
}

/// Builds a [`KnnConfig`] from the `[classifier]` table.
pub fn build_knn_config(classifier: &ClassifierToml) -> Result<KnnConfig> {
    let metric: MetricKind = classifier.metric.parse()?;
    let config = KnnConfig::new(classifier.k).with_metric(metric);
    config
        .validate()
        .context("invalid [classifier] configuration")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_variants() {
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert_eq!(parse_delimiter("\t").unwrap(), b'\t');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn reader_config_from_toml() {
        let io = IoToml {
            has_headers: true,
            label_column: 2,
            delimiter: "|".to_string(),
            ..IoToml::default()
        };
        let cfg = build_reader_config(&io).unwrap();
        assert!(cfg.has_headers());
        assert_eq!(cfg.label_column(), 2);
        assert_eq!(cfg.delimiter(), b'|');
    }

    #[test]
    fn reader_config_rejects_quote_delimiter() {
        let io = IoToml {
            delimiter: "\"".to_string(),
            ..IoToml::default()
        };
        assert!(build_reader_config(&io).is_err());
    }

    #[test]
    fn knn_config_from_toml() {
        let classifier = ClassifierToml {
            k: 3,
            metric: "l1".to_string(),
        };
        let cfg = build_knn_config(&classifier).unwrap();
        assert_eq!(cfg.k(), 3);
        assert_eq!(cfg.metric(), MetricKind::Manhattan);
    }

    #[test]
    fn knn_config_rejects_zero_k() {
        let classifier = ClassifierToml {
            k: 0,
            ..ClassifierToml::default()
        };
        let err = build_knn_config(&classifier).unwrap_err();
        assert!(format!("{err:#}").contains("k must be >= 1"));
    }

    #[test]
    fn knn_config_rejects_unknown_metric() {
        let classifier = ClassifierToml {
            metric: "cosine".to_string(),
            ..ClassifierToml::default()
        };
        assert!(build_knn_config(&classifier).is_err());
    }
}
