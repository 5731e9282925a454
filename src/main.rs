// For picking random rows
use rand::{rngs::SmallRng, SeedableRng};

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{error, warn};

use mnist_peek::image_dims::ImageDims;
use mnist_peek::render::{PngSink, RenderSink, WindowSink};
use mnist_peek::{visualize, VisualizeOptions, DEFAULT_SAMPLE_COUNT};

// The outputs of the preprocessing pipeline, shown when no files are given
const DEFAULT_SOURCES: [(&str, &str); 4] = [
    ("mnist.csv", "original MNIST"),
    ("mnist_gaussian.csv", "Gaussian-filtered"),
    ("mnist_sobel.csv", "sobel"),
    ("mnist_hog_images.csv", "hog"),
];

/// Show random rows of flattened-image CSV files as labeled images
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CSV files to sample from [default: mnist.csv and its filtered variants]
    sources: Vec<PathBuf>,

    /// Number of images drawn from each file
    #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_COUNT)]
    samples: usize,

    /// Seed for the random generator; without it every run draws different rows
    #[arg(long)]
    seed: Option<u64>,

    /// Image width in pixels; images are assumed square when omitted
    #[arg(long, requires = "height")]
    width: Option<usize>,

    /// Image height in pixels
    #[arg(long, requires = "width")]
    height: Option<usize>,

    /// The files have no header row
    #[arg(long)]
    no_headers: bool,

    /// Write PNG strips into this directory instead of opening a window
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Carry on with the remaining files when one of them fails
    #[arg(long)]
    keep_going: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let outcome = run(&args);
    match failure_message(&outcome) {
        None => ExitCode::SUCCESS,
        Some(message) => {
            error!("{}", message);
            // Logging may be switched off; the reason for a failed run is always printed
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn failure_message(outcome: &mnist_peek::Result<usize>) -> Option<String> {
    match outcome {
        Ok(0) => None,
        Ok(failed) => Some(format!("{} of the sources could not be shown", failed)),
        Err(err) => Some(err.to_string()),
    }
}

fn run(args: &Args) -> mnist_peek::Result<usize> {
    let mut sink: Box<dyn RenderSink> = match &args.output_dir {
        Some(dir) => Box::new(PngSink::new(dir)),
        None => Box::new(WindowSink::new()),
    };
    run_with_sink(args, sink.as_mut())
}

// Returns the number of sources skipped under --keep-going
fn run_with_sink(args: &Args, sink: &mut dyn RenderSink) -> mnist_peek::Result<usize> {
    let options = VisualizeOptions {
        dims: args
            .width
            .zip(args.height)
            .map(|(width, height)| ImageDims::new(width, height)),
        has_headers: !args.no_headers,
    };

    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let sources: Vec<(PathBuf, String)> = if args.sources.is_empty() {
        DEFAULT_SOURCES
            .iter()
            .map(|(path, description)| {
                (
                    PathBuf::from(path),
                    format!("Visualizing {} images:", description),
                )
            })
            .collect()
    } else {
        args.sources
            .iter()
            .map(|path| (path.clone(), format!("Visualizing {}:", path.display())))
            .collect()
    };

    let mut failed = 0;
    for (source, headline) in &sources {
        println!("{}", headline);
        let now = Instant::now();
        match visualize(source, args.samples, &options, &mut rng, sink) {
            Ok(()) => println!("Done [{}ms]", now.elapsed().as_millis()),
            Err(err) if args.keep_going => {
                warn!("Skipping {}: {}", source.display(), err);
                failed += 1;
            }
            Err(err) => {
                // Whatever was drawn before the failure is still shown,
                // but the failure itself is what gets reported
                if let Err(render_err) = sink.finish() {
                    warn!("Could not show earlier figures: {}", render_err);
                }
                return Err(err);
            }
        }
    }

    sink.finish()?;
    Ok(failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnist_peek::figure::Figure;
    use mnist_peek::VisualizeError;
    use std::fs;
    use std::path::Path;

    // A good file, a missing one and another good file, in that order
    struct Sources {
        dir: tempfile::TempDir,
    }

    impl Sources {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let csv = "a,b,c,d,label\n0,1,2,3,7\n4,5,6,7,1\n";
            fs::write(dir.path().join("first.csv"), csv).unwrap();
            fs::write(dir.path().join("last.csv"), csv).unwrap();
            Sources { dir }
        }

        fn path(&self, name: &str) -> String {
            self.dir.path().join(name).display().to_string()
        }

        fn out(&self) -> std::path::PathBuf {
            self.dir.path().join("out")
        }

        fn args(&self, extra: &[&str]) -> Args {
            let mut argv = vec![
                "mnist-peek".to_string(),
                self.path("first.csv"),
                self.path("missing.csv"),
                self.path("last.csv"),
                "-n".to_string(),
                "1".to_string(),
                "--seed".to_string(),
                "0".to_string(),
                "--output-dir".to_string(),
                self.out().display().to_string(),
            ];
            argv.extend(extra.iter().map(|arg| arg.to_string()));
            Args::parse_from(argv)
        }
    }

    fn written(out: &Path, stem: &str) -> bool {
        out.join(format!("{stem}.png")).exists()
    }

    // Accepts figures but cannot show them
    #[derive(Default)]
    struct BrokenDisplay {
        figures: usize,
    }

    impl RenderSink for BrokenDisplay {
        fn render(&mut self, _figure: Figure) -> mnist_peek::Result<()> {
            self.figures += 1;
            Ok(())
        }

        fn finish(&mut self) -> mnist_peek::Result<()> {
            Err(VisualizeError::Render {
                message: "no display".to_string(),
            })
        }
    }

    #[test]
    fn test_first_failure_aborts_run() {
        let sources = Sources::new();
        let err = run(&sources.args(&[])).unwrap_err();
        assert!(matches!(err, VisualizeError::NotFound { .. }));
        assert!(written(&sources.out(), "first"));
        assert!(!written(&sources.out(), "last"));
    }

    #[test]
    fn test_keep_going_skips_failed_source() {
        let sources = Sources::new();
        let outcome = run(&sources.args(&["--keep-going"]));
        assert!(matches!(outcome, Ok(1)));
        assert!(written(&sources.out(), "first"));
        assert!(written(&sources.out(), "last"));
        assert_eq!(
            failure_message(&outcome).as_deref(),
            Some("1 of the sources could not be shown")
        );
    }

    #[test]
    fn test_abort_reports_source_error_over_display_error() {
        let sources = Sources::new();
        let mut sink = BrokenDisplay::default();
        let err = run_with_sink(&sources.args(&[]), &mut sink).unwrap_err();
        assert!(matches!(err, VisualizeError::NotFound { .. }));
        assert_eq!(sink.figures, 1);
    }

    #[test]
    fn test_display_error_reported_after_successful_sources() {
        let sources = Sources::new();
        let mut sink = BrokenDisplay::default();
        let err = run_with_sink(&sources.args(&["--keep-going"]), &mut sink).unwrap_err();
        assert!(matches!(err, VisualizeError::Render { .. }));
        assert_eq!(sink.figures, 2);
    }

    #[test]
    fn test_failure_message() {
        assert_eq!(failure_message(&Ok(0)), None);
        assert_eq!(
            failure_message(&Ok(2)).as_deref(),
            Some("2 of the sources could not be shown")
        );
        let message = failure_message(&Err(VisualizeError::EmptySample)).unwrap();
        assert_eq!(message, "sample count must be at least 1");
    }
}
