use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, info_span, warn};

use kvote_knn::SampleId;

use crate::cli::SelfTestArgs;
use crate::report::{self, Accuracy, SelfTestReport, TrialRecord};
use crate::setup;

pub fn run(args: SelfTestArgs) -> Result<()> {
    let _cmd = info_span!("self_test").entered();

    let mut config = setup::load_config(&args.classifier)?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(trials) = args.trials {
        config.self_test.trials = trials;
    }

    let mut trials = config.self_test.trials;
    if trials == 0 {
        bail!("trials must be >= 1");
    }
    if args.sample.is_some() && trials > 1 {
        warn!(trials, "a fixed --sample runs a single trial");
        trials = 1;
    }

    let (mut clf, knn_cfg) = setup::load_classifier(&config)?;
    if clf.pool().len() < 2 {
        bail!(
            "self-test needs at least 2 samples, found {}",
            clf.pool().len()
        );
    }

    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut accuracy = Accuracy::default();
    let mut results = Vec::with_capacity(trials);

    for trial in 0..trials {
        let test = match args.sample {
            Some(id) => clf.self_test_with(SampleId(id)),
            None => clf.self_test(&mut rng),
        }
        .with_context(|| format!("self-test trial {} failed", trial + 1))?;
        debug!(
            trial,
            held_out = %test.held_out(),
            predicted = test.predicted(),
            actual = test.actual(),
            "trial complete"
        );

        report::print_self_test(&mut out, trial, &test)?;
        accuracy.record(&test);
        results.push(TrialRecord::from(&test));
    }
    clf.restore_held_out();

    report::print_accuracy(&mut out, &accuracy)?;
    info!(
        correct = accuracy.correct,
        total = accuracy.total,
        "self-test complete"
    );

    if let Some(ref path) = args.output {
        let summary = SelfTestReport {
            k: knn_cfg.k(),
            metric: knn_cfg.metric().to_string(),
            seed: config.seed,
            samples: clf.pool().len(),
            correct: accuracy.correct,
            trials: accuracy.total,
            accuracy: accuracy.ratio(),
            results,
        };
        report::write_json(path, &summary)?;
    }

    Ok(())
}
