use std::collections::BTreeSet;
use std::path::PathBuf;

use audiodiff_engine::{CompareMode, DiffOptions, ReportFormat};
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "audiodiff",
    about = "Compare two files or directories recursively, audio-aware",
    long_about = "Compare two files or directories recursively. Supported audio files \
(wav, flac, m4a, mp3) are matched as if their extensions were removed, so \
`audiodiff x y` compares `x/a.flac` with `y/a.m4a`. Audio files are equal if \
their decoded streams and their normalized tags (except `encodedby`) are equal; \
every other file is compared byte for byte.",
    version
)]
pub struct Cli {
    /// First file or directory
    pub left: PathBuf,

    /// Second file or directory
    pub right: PathBuf,

    /// Compare only audio streams
    #[arg(short = 'a', long)]
    pub streams: bool,

    /// Compare only tags; useful since decoding audio streams is slow
    #[arg(short, long)]
    pub tags: bool,

    /// Report only whether tags differ
    #[arg(short = 'q', long)]
    pub brief: bool,

    /// Report when two files are the same
    #[arg(short = 's', long = "report-identical-files")]
    pub report_identical: bool,

    /// ffmpeg binary path
    #[arg(long = "ffmpeg_bin", value_name = "PATH", env = "FFMPEG_BIN", default_value = "ffmpeg")]
    pub ffmpeg_bin: PathBuf,

    /// Tag key to ignore; repeat for several (default: encodedby)
    #[arg(long = "ignore-tag", value_name = "KEY")]
    pub ignore_tags: Vec<String>,

    /// When to color tag blocks
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorChoice,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }

    /// The override to install in `colored`, if any. `Auto` leaves its
    /// environment checks (`NO_COLOR`, `CLICOLOR`) in charge.
    pub fn forced(self) -> Option<bool> {
        match self {
            ColorChoice::Auto => None,
            ColorChoice::Always => Some(true),
            ColorChoice::Never => Some(false),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

impl Cli {
    /// Comparison options for this invocation. `--streams` wins over `--tags`.
    pub fn to_options(&self) -> DiffOptions {
        let mode = if self.streams {
            CompareMode::StreamsOnly
        } else if self.tags {
            CompareMode::TagsOnly
        } else {
            CompareMode::Full
        };
        let defaults = DiffOptions::default();
        let ignored_tags = if self.ignore_tags.is_empty() {
            defaults.ignored_tags
        } else {
            self.ignore_tags
                .iter()
                .map(|key| key.to_lowercase())
                .collect::<BTreeSet<_>>()
        };
        DiffOptions {
            mode,
            brief: self.brief,
            report_identical: self.report_identical,
            ffmpeg_bin: self.ffmpeg_bin.clone(),
            ignored_tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("audiodiff").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn requires_two_paths() {
        assert!(Cli::try_parse_from(["audiodiff", "x"]).is_err());
        assert!(Cli::try_parse_from(["audiodiff", "x", "y", "z"]).is_err());
    }

    #[test]
    fn defaults() {
        let cli = parse(&["x", "y"]);
        let options = cli.to_options();
        assert_eq!(options.mode, CompareMode::Full);
        assert!(!options.brief);
        assert!(!options.report_identical);
        assert!(options.is_ignored("encodedby"));
        assert_eq!(cli.color, ColorChoice::Auto);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn streams_win_over_tags() {
        assert_eq!(parse(&["-a", "-t", "x", "y"]).to_options().mode, CompareMode::StreamsOnly);
        assert_eq!(parse(&["-t", "x", "y"]).to_options().mode, CompareMode::TagsOnly);
    }

    #[test]
    fn short_flags() {
        let options = parse(&["-qs", "x", "y"]).to_options();
        assert!(options.brief);
        assert!(options.report_identical);
    }

    #[test]
    fn ffmpeg_path_and_ignored_tags() {
        let cli = parse(&[
            "--ffmpeg_bin",
            "/opt/ffmpeg",
            "--ignore-tag",
            "Comment",
            "--ignore-tag",
            "date",
            "x",
            "y",
        ]);
        let options = cli.to_options();
        assert_eq!(options.ffmpeg_bin, PathBuf::from("/opt/ffmpeg"));
        assert!(options.is_ignored("comment"));
        assert!(options.is_ignored("date"));
        assert!(!options.is_ignored("encodedby"));
    }

    #[test]
    fn color_and_format() {
        let cli = parse(&["--color", "never", "--format", "json", "x", "y"]);
        assert!(!cli.color.enabled(true));
        assert!(ColorChoice::Always.enabled(false));
        assert!(ColorChoice::Auto.enabled(true));
        assert_eq!(ColorChoice::Auto.forced(), None);
        assert_eq!(ColorChoice::Always.forced(), Some(true));
        assert_eq!(ColorChoice::Never.forced(), Some(false));
        assert_eq!(ReportFormat::from(cli.format), ReportFormat::Json);
    }
}
