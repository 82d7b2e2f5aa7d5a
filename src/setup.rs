//! Shared start-up for subcommands: config overrides and classifier loading.

use anyhow::{Context, Result, bail};
use tracing::info;

use kvote_io::read_samples;
use kvote_knn::{Classifier, KnnConfig, MetricKind};

use crate::cli::ClassifierArgs;
use crate::config::{self, KvoteConfig};
use crate::convert;

/// Loads the config file named on the command line and applies CLI overrides.
pub fn load_config(args: &ClassifierArgs) -> Result<KvoteConfig> {
    let mut config = config::load(args.config.as_deref())?;
    if let Some(ref input) = args.input {
        config.io.input = Some(input.clone());
    }
    if let Some(k) = args.k {
        config.classifier.k = k;
    }
    if let Some(ref metric) = args.metric {
        config.classifier.metric = metric.clone();
    }
    Ok(config)
}

/// Reads the labeled samples named by `[io] input` into a new classifier.
pub fn load_classifier(
    config: &KvoteConfig,
) -> Result<(Classifier<Vec<f64>, MetricKind>, KnnConfig)> {
    let Some(ref input) = config.io.input else {
        bail!("no input file: set [io] input in the config or pass --input");
    };
    let reader_cfg = convert::build_reader_config(&config.io)?;
    let knn_cfg = convert::build_knn_config(&config.classifier)?;

    info!(path = %input.display(), "reading samples");
    let samples = read_samples(input, &reader_cfg)
        .with_context(|| format!("failed to read samples: {}", input.display()))?;

    let mut clf = Classifier::from_config(&knn_cfg).context("failed to build classifier")?;
    clf.add_samples(samples);
    info!(
        samples = clf.pool().len(),
        k = knn_cfg.k(),
        metric = %knn_cfg.metric(),
        "classifier ready"
    );
    Ok((clf, knn_cfg))
}
