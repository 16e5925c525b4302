use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

use super::model::{Metric, MetricType, Sample};

static METRIC_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z_:][a-zA-Z0-9_:]*$").expect("valid metric name regex"));
static FLOAT_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("valid float regex")
});

/// One classified line of exposition text.
#[derive(Debug, PartialEq)]
enum Line<'a> {
    Help { name: &'a str, text: &'a str },
    Type { name: &'a str, kind: MetricType },
    Comment,
    Sample { name: &'a str, sample: Sample },
}

/// Parses Prometheus exposition text into metrics ordered by the first line
/// that mentions each name. Lines that fit none of the line kinds are
/// dropped.
pub fn parse(text: &str) -> Vec<Metric> {
    let mut builder = MetricSetBuilder::default();
    let mut dropped = 0usize;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match lex_line(line) {
            Some(Line::Help { name, text }) => builder.entry(name).help = text.to_string(),
            Some(Line::Type { name, kind }) => builder.entry(name).metric_type = kind,
            Some(Line::Comment) => {}
            Some(Line::Sample { name, sample }) => builder.entry(name).samples.push(sample),
            None => {
                dropped += 1;
                log::trace!("Dropping malformed exposition line: {line}");
            }
        }
    }

    let metrics = builder.finish();
    log::debug!(
        "Parsed {} metrics from exposition text ({} lines dropped)",
        metrics.len(),
        dropped
    );
    metrics
}

/// Like [`parse`], for a raw scrape body. Bytes that are not UTF-8 text are
/// rejected instead of parsed.
pub fn parse_bytes(bytes: &[u8]) -> Result<Vec<Metric>> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        Error::InvalidArgument(format!("exposition text is not valid UTF-8: {e}"))
    })?;
    Ok(parse(text))
}

/// Metrics in first-seen order with a name index beside them.
#[derive(Default)]
struct MetricSetBuilder {
    metrics: Vec<Metric>,
    index: HashMap<String, usize>,
}

impl MetricSetBuilder {
    fn entry(&mut self, name: &str) -> &mut Metric {
        let position = match self.index.get(name) {
            Some(&position) => position,
            None => {
                let position = self.metrics.len();
                self.metrics.push(Metric::new(name));
                self.index.insert(name.to_string(), position);
                position
            }
        };
        &mut self.metrics[position]
    }

    fn finish(self) -> Vec<Metric> {
        self.metrics
    }
}

fn lex_line(line: &str) -> Option<Line<'_>> {
    match line.strip_prefix('#') {
        Some(comment) => Some(lex_comment(comment)),
        None => parse_sample_line(line).map(|(name, sample)| Line::Sample { name, sample }),
    }
}

fn lex_comment(comment: &str) -> Line<'_> {
    let (keyword, rest) = split_token(comment);
    match keyword {
        "HELP" => {
            let (name, text) = split_token(rest);
            if METRIC_NAME.is_match(name) {
                return Line::Help { name, text };
            }
        }
        "TYPE" => {
            let (name, rest) = split_token(rest);
            let (kind, _) = split_token(rest);
            if METRIC_NAME.is_match(name) && !kind.is_empty() {
                return Line::Type {
                    name,
                    kind: MetricType::from(kind),
                };
            }
        }
        _ => {}
    }
    Line::Comment
}

/// Splits off the first whitespace-delimited token, returning it and the
/// remainder with leading whitespace removed.
fn split_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], s[end..].trim_start()),
        None => (s, ""),
    }
}

/// Parses `name{label="value",...} value [timestamp]`.
fn parse_sample_line(line: &str) -> Option<(&str, Sample)> {
    let mut cursor = Cursor::new(line);

    let name = cursor.take_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':');
    if !METRIC_NAME.is_match(name) {
        return None;
    }

    let labels = if cursor.eat('{') {
        parse_labels(&mut cursor)?
    } else {
        BTreeMap::new()
    };

    if cursor.skip_whitespace() == 0 {
        return None;
    }
    let value = parse_value(cursor.take_while(|c| !c.is_whitespace()))?;

    cursor.skip_whitespace();
    let timestamp = if cursor.is_done() {
        None
    } else {
        let token = cursor.take_while(|c| !c.is_whitespace());
        cursor.skip_whitespace();
        Some(token.parse::<i64>().ok()?)
    };

    if !cursor.is_done() {
        return None;
    }

    Some((
        name,
        Sample {
            labels,
            value,
            timestamp,
        },
    ))
}

/// Parses the label set after the opening brace, consuming the closing one.
fn parse_labels(cursor: &mut Cursor<'_>) -> Option<BTreeMap<String, String>> {
    let mut labels = BTreeMap::new();
    loop {
        cursor.skip_whitespace();
        if cursor.eat('}') {
            return Some(labels);
        }

        let key = cursor.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        if key.is_empty() || key.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        cursor.skip_whitespace();
        if !cursor.eat('=') {
            return None;
        }
        cursor.skip_whitespace();
        let value = parse_quoted(cursor)?;
        labels.insert(key.to_string(), value);

        cursor.skip_whitespace();
        if cursor.eat(',') {
            continue;
        }
        if cursor.eat('}') {
            return Some(labels);
        }
        return None;
    }
}

fn parse_quoted(cursor: &mut Cursor<'_>) -> Option<String> {
    if !cursor.eat('"') {
        return None;
    }
    let mut value = String::new();
    loop {
        match cursor.bump()? {
            '"' => return Some(value),
            '\\' => match cursor.bump()? {
                'n' => value.push('\n'),
                '"' => value.push('"'),
                '\\' => value.push('\\'),
                other => {
                    value.push('\\');
                    value.push(other);
                }
            },
            c => value.push(c),
        }
    }
}

fn parse_value(token: &str) -> Option<f64> {
    match token {
        "NaN" => Some(f64::NAN),
        "+Inf" | "Inf" => Some(f64::INFINITY),
        "-Inf" => Some(f64::NEG_INFINITY),
        _ if FLOAT_VALUE.is_match(token) => token.parse().ok(),
        _ => None,
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn is_done(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn skip_whitespace(&mut self) -> usize {
        self.take_while(char::is_whitespace).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prom::test_data::{NODE_EXPORTER, SERVICE_METRICS};

    #[test]
    fn test_parse_empty() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \n").is_empty());
    }

    #[test]
    fn test_help_and_type() {
        let metrics = parse(
            "# HELP http_requests_total The total number of HTTP requests.\n\
             # TYPE http_requests_total counter\n\
             http_requests_total{method=\"post\",code=\"200\"} 1027 1395066363000\n\
             http_requests_total{method=\"post\",code=\"400\"}    3 1395066363000\n",
        );
        assert_eq!(metrics.len(), 1);
        let metric = &metrics[0];
        assert_eq!(metric.name, "http_requests_total");
        assert_eq!(metric.help, "The total number of HTTP requests.");
        assert_eq!(metric.metric_type, MetricType::Counter);
        assert_eq!(metric.samples.len(), 2);
        assert_eq!(metric.samples[0].label("code"), Some("200"));
        assert_eq!(metric.samples[0].value, 1027.0);
        assert_eq!(metric.samples[0].timestamp, Some(1395066363000));
        assert_eq!(metric.samples[1].value, 3.0);
    }

    #[test]
    fn test_last_help_wins() {
        let metrics = parse("# HELP up first\n# HELP up second\nup 1");
        assert_eq!(metrics[0].help, "second");
    }

    #[test]
    fn test_first_seen_order() {
        let metrics = parse("b 1\n# TYPE a gauge\na 2\n# HELP c text\nb 3");
        let names: Vec<&str> = metrics.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(metrics[0].samples.len(), 2);
        assert!(metrics[2].samples.is_empty());
    }

    #[test]
    fn test_malformed_lines_dropped() {
        let metrics = parse(
            "ok 1\n\
             not a sample line\n\
             missing_value\n\
             bad_value abc\n\
             bad_labels{a=b} 1\n\
             unterminated{a=\"b} 1\n\
             1leading_digit 1\n\
             trailing 1 2 3\n\
             bad_ts 1 12.5\n",
        );
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].name, "ok");
    }

    #[test]
    fn test_plain_comments_ignored() {
        let metrics = parse("# just a comment\n#\n# TYPE\n# HELP\nup 1");
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].metric_type, MetricType::Unset);
    }

    #[test]
    fn test_help_without_text() {
        let metrics = parse("# HELP up");
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].help, "");
    }

    #[test]
    fn test_values() {
        assert_eq!(parse_value("-1.5e3"), Some(-1500.0));
        assert_eq!(parse_value("+2"), Some(2.0));
        assert_eq!(parse_value(".5"), Some(0.5));
        assert_eq!(parse_value("+Inf"), Some(f64::INFINITY));
        assert_eq!(parse_value("-Inf"), Some(f64::NEG_INFINITY));
        assert!(parse_value("NaN").unwrap().is_nan());
        assert_eq!(parse_value("inf"), None);
        assert_eq!(parse_value("1,5"), None);
        assert_eq!(parse_value(""), None);
    }

    #[test]
    fn test_label_escapes_and_whitespace() {
        let (name, sample) =
            parse_sample_line(r#"msg{ path = "C:\\dir" , quote="say \"hi\"", nl="a\nb", } 1"#)
                .unwrap();
        assert_eq!(name, "msg");
        assert_eq!(sample.label("path"), Some("C:\\dir"));
        assert_eq!(sample.label("quote"), Some("say \"hi\""));
        assert_eq!(sample.label("nl"), Some("a\nb"));
    }

    #[test]
    fn test_empty_label_set() {
        let (_, sample) = parse_sample_line("up{} 1").unwrap();
        assert!(sample.labels.is_empty());
    }

    #[test]
    fn test_duplicate_label_last_wins() {
        let (_, sample) = parse_sample_line(r#"up{a="1",a="2"} 1"#).unwrap();
        assert_eq!(sample.labels.len(), 1);
        assert_eq!(sample.label("a"), Some("2"));
    }

    #[test]
    fn test_histogram_buckets_keep_own_names() {
        let metrics = parse(SERVICE_METRICS);
        let bucket = metrics
            .iter()
            .find(|m| m.name == "http_request_duration_seconds_bucket")
            .unwrap();
        assert_eq!(bucket.samples.len(), 4);
        assert_eq!(bucket.samples[3].label("le"), Some("+Inf"));
        let family = metrics
            .iter()
            .find(|m| m.name == "http_request_duration_seconds")
            .unwrap();
        assert_eq!(family.metric_type, MetricType::Histogram);
        assert!(family.samples.is_empty());
    }

    #[test]
    fn test_parse_is_repeatable() {
        assert_eq!(parse(NODE_EXPORTER), parse(NODE_EXPORTER));
    }

    #[test]
    fn test_parse_bytes_rejects_non_utf8() {
        assert!(parse_bytes(b"up 1\n").unwrap().len() == 1);
        let err = parse_bytes(&[0x75, 0x70, 0xff, 0x20, 0x31]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_crlf_lines() {
        let metrics = parse("# TYPE up gauge\r\nup 1\r\n");
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].samples[0].value, 1.0);
    }
}
