//! Rendering of comparison decisions.
//!
//! Text output follows the `diff(1)` conventions: verdict lines, `Only in`
//! lines, and a unified-diff-style block for tag differences. JSON output
//! writes one object per event. Errors always go to the error stream as
//! `audiodiff: <message>`.

use std::borrow::Cow;
use std::io::{self, Write};
use std::path::Path;

use audiodiff_diff::{DiffRecord, Sign};
use audiodiff_types::TagValue;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize, Serializer};

use crate::config::DiffOptions;

/// Program name prefixed to error lines.
pub const PROGRAM: &str = "audiodiff";

/// Values longer than this are shortened in tag blocks.
const MAX_VALUE_CHARS: usize = 100;
const HEAD_CHARS: usize = 92;
const TAIL_CHARS: usize = 5;

/// Output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// How events are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReportStyle {
    pub format: ReportFormat,
    /// Color `-` lines red and `+` lines green.
    pub color: bool,
    /// Report tag differences as a single line.
    pub brief: bool,
    /// Report identical verdicts and unchanged tag records.
    pub verbose: bool,
}

impl ReportStyle {
    /// Plain text style for the given options.
    pub fn from_options(options: &DiffOptions) -> Self {
        Self {
            format: ReportFormat::Text,
            color: false,
            brief: options.brief,
            verbose: options.report_identical,
        }
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// One reported decision.
///
/// Paths serialize lossily, so names that are not valid UTF-8 still
/// produce a JSON line.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event<'a> {
    /// Decoded streams of an audio pair were compared.
    Streams {
        #[serde(serialize_with = "lossy_path")]
        left: &'a Path,
        #[serde(serialize_with = "lossy_path")]
        right: &'a Path,
        equal: bool,
    },
    /// Tags of an audio pair were compared.
    Tags {
        #[serde(serialize_with = "lossy_path")]
        left: &'a Path,
        #[serde(serialize_with = "lossy_path")]
        right: &'a Path,
        equal: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        records: Option<&'a [DiffRecord<String, TagValue>]>,
    },
    /// Two non-audio files were compared byte for byte.
    Files {
        #[serde(serialize_with = "lossy_path")]
        left: &'a Path,
        #[serde(serialize_with = "lossy_path")]
        right: &'a Path,
        equal: bool,
    },
    /// An entry exists in only one of two directories.
    OnlyIn {
        #[serde(serialize_with = "lossy_path")]
        dir: &'a Path,
        #[serde(serialize_with = "lossy_path")]
        name: &'a Path,
    },
    Error { message: String },
}

fn lossy_path<S: Serializer>(path: &&Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// Writes events to an output stream and an error stream.
pub struct Reporter<W: Write, E: Write> {
    style: ReportStyle,
    out: W,
    err: E,
}

impl<W: Write, E: Write> Reporter<W, E> {
    pub fn new(style: ReportStyle, out: W, err: E) -> Self {
        Self { style, out, err }
    }

    pub fn style(&self) -> &ReportStyle {
        &self.style
    }

    /// Render one event.
    ///
    /// Only a failed write is an error. An event that cannot be encoded as
    /// JSON is reported on the error stream instead of the output stream.
    pub fn report(&mut self, event: &Event<'_>) -> io::Result<()> {
        if let Event::Error { message } = event {
            return writeln!(self.err, "{PROGRAM}: {message}");
        }
        match self.style.format {
            ReportFormat::Json => match serde_json::to_string(event) {
                Ok(line) => writeln!(self.out, "{line}"),
                Err(e) => writeln!(self.err, "{PROGRAM}: cannot encode event: {e}"),
            },
            ReportFormat::Text => self.write_text(event),
        }
    }

    pub fn streams(&mut self, left: &Path, right: &Path, equal: bool) -> io::Result<()> {
        self.report(&Event::Streams { left, right, equal })
    }

    pub fn tags(
        &mut self,
        left: &Path,
        right: &Path,
        equal: bool,
        records: Option<&[DiffRecord<String, TagValue>]>,
    ) -> io::Result<()> {
        self.report(&Event::Tags {
            left,
            right,
            equal,
            records,
        })
    }

    pub fn files(&mut self, left: &Path, right: &Path, equal: bool) -> io::Result<()> {
        self.report(&Event::Files { left, right, equal })
    }

    pub fn only_in(&mut self, dir: &Path, name: &Path) -> io::Result<()> {
        self.report(&Event::OnlyIn { dir, name })
    }

    pub fn error(&mut self, message: impl Into<String>) -> io::Result<()> {
        self.report(&Event::Error {
            message: message.into(),
        })
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }

    /// Consume the reporter and return both streams.
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    fn write_text(&mut self, event: &Event<'_>) -> io::Result<()> {
        match *event {
            Event::Streams { left, right, equal } => {
                self.verdict("Audio streams in", left, right, equal)
            }
            Event::Tags {
                left,
                right,
                equal,
                records,
            } => match records {
                Some(records) if !equal && !self.style.brief => {
                    self.tag_block(left, right, records)
                }
                _ => self.verdict("Tags in", left, right, equal),
            },
            Event::Files { left, right, equal } => self.verdict("Files", left, right, equal),
            Event::OnlyIn { dir, name } => {
                writeln!(self.out, "Only in {}: {}", dir.display(), name.display())
            }
            Event::Error { .. } => Ok(()),
        }
    }

    fn verdict(&mut self, what: &str, left: &Path, right: &Path, equal: bool) -> io::Result<()> {
        let verb = match equal {
            true if !self.style.verbose => return Ok(()),
            true => "are identical",
            false => "differ",
        };
        writeln!(self.out, "{what} {} and {} {verb}", left.display(), right.display())
    }

    fn tag_block(
        &mut self,
        left: &Path,
        right: &Path,
        records: &[DiffRecord<String, TagValue>],
    ) -> io::Result<()> {
        let header = self.paint(Sign::Removed, format!("--- {}", left.display()));
        writeln!(self.out, "{header}")?;
        let header = self.paint(Sign::Added, format!("+++ {}", right.display()));
        writeln!(self.out, "{header}")?;
        for record in records {
            if record.sign == Sign::Unchanged && !self.style.verbose {
                continue;
            }
            let value = record.value.to_string();
            let line = format!("{}{}: {}", record.sign, record.key, shorten(&value));
            let line = self.paint(record.sign, line);
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    fn paint(&self, sign: Sign, line: String) -> ColoredString {
        match sign {
            Sign::Removed if self.style.color => line.as_str().red(),
            Sign::Added if self.style.color => line.as_str().green(),
            _ => line.as_str().normal(),
        }
    }
}

/// Shorten a value to its first 92 and last 5 characters when it is longer
/// than 100 characters.
pub fn shorten(value: &str) -> Cow<'_, str> {
    let count = value.chars().count();
    if count <= MAX_VALUE_CHARS {
        return Cow::Borrowed(value);
    }
    let head: String = value.chars().take(HEAD_CHARS).collect();
    let tail: String = value.chars().skip(count - TAIL_CHARS).collect();
    Cow::Owned(format!("{head}...{tail}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use audiodiff_diff::diff_maps;
    use audiodiff_types::TagMap;

    fn reporter(style: ReportStyle) -> Reporter<Vec<u8>, Vec<u8>> {
        Reporter::new(style, Vec::new(), Vec::new())
    }

    fn output(reporter: Reporter<Vec<u8>, Vec<u8>>) -> (String, String) {
        let (out, err) = reporter.into_inner();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    fn tags(pairs: &[(&str, &str)]) -> TagMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), TagValue::from(*v)))
            .collect()
    }

    fn sample_records() -> Vec<DiffRecord<String, TagValue>> {
        let left = tags(&[("album", "X"), ("title", "A")]);
        let right = tags(&[("album", "X"), ("title", "B")]);
        diff_maps(&left, &right).records
    }

    #[test]
    fn identical_verdicts_need_verbose() {
        let mut quiet = reporter(ReportStyle::default());
        quiet.files(Path::new("x/a"), Path::new("y/a"), true).unwrap();
        quiet.files(Path::new("x/b"), Path::new("y/b"), false).unwrap();
        assert_eq!(output(quiet).0, "Files x/b and y/b differ\n");

        let mut verbose = reporter(ReportStyle {
            verbose: true,
            ..Default::default()
        });
        verbose.streams(Path::new("x/a.flac"), Path::new("y/a.mp3"), true).unwrap();
        assert_eq!(
            output(verbose).0,
            "Audio streams in x/a.flac and y/a.mp3 are identical\n"
        );
    }

    #[test]
    fn tag_block_hides_unchanged_records() {
        let records = sample_records();
        let mut r = reporter(ReportStyle::default());
        r.tags(Path::new("x/a.flac"), Path::new("y/a.flac"), false, Some(&records))
            .unwrap();
        assert_eq!(
            output(r).0,
            "--- x/a.flac\n+++ y/a.flac\n-title: A\n+title: B\n"
        );
    }

    #[test]
    fn verbose_tag_block_shows_every_record() {
        let records = sample_records();
        let mut r = reporter(ReportStyle {
            verbose: true,
            ..Default::default()
        });
        r.tags(Path::new("l"), Path::new("r"), false, Some(&records))
            .unwrap();
        assert_eq!(output(r).0, "--- l\n+++ r\n album: X\n-title: A\n+title: B\n");
    }

    #[test]
    fn brief_reports_one_line() {
        let records = sample_records();
        let mut r = reporter(ReportStyle {
            brief: true,
            ..Default::default()
        });
        r.tags(Path::new("l"), Path::new("r"), false, Some(&records))
            .unwrap();
        assert_eq!(output(r).0, "Tags in l and r differ\n");
    }

    #[test]
    fn colored_lines_keep_their_text() {
        let records = sample_records();
        let mut r = reporter(ReportStyle::default().with_color(true));
        r.tags(Path::new("l"), Path::new("r"), false, Some(&records))
            .unwrap();
        let (out, _) = output(r);
        assert!(out.contains("-title: A"));
        assert!(out.contains("+title: B"));
    }

    #[test]
    fn only_in_and_errors() {
        let mut r = reporter(ReportStyle::default());
        r.only_in(Path::new("x"), Path::new("b.txt")).unwrap();
        r.error("No such file or directory: 'z'").unwrap();
        let (out, err) = output(r);
        assert_eq!(out, "Only in x: b.txt\n");
        assert_eq!(err, "audiodiff: No such file or directory: 'z'\n");
    }

    #[test]
    fn long_values_are_shortened() {
        let value: String = (0..120).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let short = shorten(&value);
        assert_eq!(short.chars().count(), 100);
        assert!(short.starts_with(&value[..92]));
        assert!(short.ends_with(&format!("...{}", &value[115..])));
        assert_eq!(shorten("short"), "short");
        assert_eq!(shorten(&"é".repeat(100)).chars().count(), 100);
    }

    #[test]
    fn lists_render_as_quoted_sequences() {
        let mut left = TagMap::new();
        left.insert(
            "artist".into(),
            TagValue::List(vec!["a".into(), "b".into()]),
        );
        let diff = diff_maps(&left, &TagMap::new());
        let mut r = reporter(ReportStyle::default());
        r.tags(Path::new("l"), Path::new("r"), false, Some(&diff.records))
            .unwrap();
        assert!(output(r).0.ends_with("-artist: [\"a\", \"b\"]\n"));
    }

    #[test]
    fn json_lines() {
        let records = sample_records();
        let mut r = reporter(ReportStyle::default().with_format(ReportFormat::Json));
        r.files(Path::new("x/a"), Path::new("y/a"), true).unwrap();
        r.tags(Path::new("l"), Path::new("r"), false, Some(&records))
            .unwrap();
        r.error("boom").unwrap();
        let (out, err) = output(r);
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "files");
        assert_eq!(lines[0]["equal"], true);
        assert_eq!(lines[1]["event"], "tags");
        assert_eq!(lines[1]["records"][1]["sign"], "-");
        assert_eq!(lines[1]["records"][1]["value"], "A");
        assert_eq!(err, "audiodiff: boom\n");
    }

    #[cfg(unix)]
    #[test]
    fn json_names_need_not_be_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = Path::new(OsStr::from_bytes(b"bad\xff.txt"));
        let mut r = reporter(ReportStyle::default().with_format(ReportFormat::Json));
        r.only_in(Path::new("x"), name).unwrap();
        let (out, err) = output(r);
        let line: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(line["name"], "bad\u{fffd}.txt");
        assert_eq!(err, "");
    }
}
