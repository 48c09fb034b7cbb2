use std::io::{self, IsTerminal};

use audiodiff_engine::{diff_paths, Outcome, ReportStyle, Reporter};
use audiodiff_media::{CodecRegistry, FfmpegDecoder};
use tracing::debug;

use crate::cli::Cli;

/// Exit status after Ctrl-C.
pub const INTERRUPTED_EXIT_CODE: u8 = 130;

/// Compare the two paths on the command line and return the worst outcome.
pub fn run(cli: &Cli) -> anyhow::Result<Outcome> {
    let options = cli.to_options();
    let color = cli.color.enabled(io::stdout().is_terminal());
    if let Some(force) = cli.color.forced() {
        colored::control::set_override(force);
    }
    let style = ReportStyle::from_options(&options)
        .with_format(cli.format.into())
        .with_color(color);
    debug!(?options, ?style, "starting comparison");

    let decoder = FfmpegDecoder::new(&options.ffmpeg_bin);
    let codecs = CodecRegistry::with_defaults();
    let mut reporter = Reporter::new(style, io::stdout().lock(), io::stderr().lock());
    let outcome = diff_paths(&cli.left, &cli.right, &options, &decoder, &codecs, &mut reporter)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("audiodiff").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn compares_plain_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        let c = dir.path().join("c.txt");
        fs::write(&a, "same").unwrap();
        fs::write(&b, "same").unwrap();
        fs::write(&c, "other").unwrap();

        let same = cli(&["--color", "never", a.to_str().unwrap(), b.to_str().unwrap()]);
        assert_eq!(run(&same).unwrap(), Outcome::Identical);

        let differ = cli(&["--color", "never", a.to_str().unwrap(), c.to_str().unwrap()]);
        assert_eq!(run(&differ).unwrap(), Outcome::Differ);
    }

    #[test]
    fn missing_path_is_an_error_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let here = dir.path().to_str().unwrap();
        let args = cli(&["--color", "never", missing.to_str().unwrap(), here]);
        assert_eq!(run(&args).unwrap(), Outcome::Error);
    }
}
