use crate::model::LogRecord;
use once_cell::sync::Lazy;
use regex::Regex;

/// Apache/Nginx combined log format, anchored at the start of the line only.
///
/// Groups: address, identity, userid, timestamp, method, url, protocol, status, size.
/// Anything after the size field (referrer, user agent) is ignored.
///
/// Character classes are ASCII-only: digits are `0-9`, word characters are
/// `[0-9A-Za-z_]` and whitespace is ` \t\n\x0B\x0C\r`. A non-ASCII digit after
/// the size is trailing content, and a no-break space is an ordinary character.
pub const COMBINED_LOG_PATTERN: &str = concat!(
    r#"^([^ \t\n\x0B\x0C\r]+) ([^ \t\n\x0B\x0C\r]+) ([^ \t\n\x0B\x0C\r]+) "#,
    r#"\[((?-u:[\w:/])+(?-u:\s)[+\-](?-u:\d){4})\] "#,
    r#""([^ \t\n\x0B\x0C\r]+) ([^ \t\n\x0B\x0C\r]+) ([^ \t\n\x0B\x0C\r]+)" "#,
    r#"((?-u:\d){3}) ((?-u:\d)+|-)"#,
);

static COMBINED_LOG: Lazy<Regex> =
    Lazy::new(|| Regex::new(COMBINED_LOG_PATTERN).expect("combined log pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Parsed(LogRecord),
    /// The line does not have the combined log shape. Normal filtering, not an error.
    Unmatched,
    /// The shape matched but a numeric field did not fit its integer type.
    Malformed,
}

pub fn classify_line(line: &str) -> LineOutcome {
    let Some(caps) = COMBINED_LOG.captures(line) else {
        return LineOutcome::Unmatched;
    };

    let Ok(status_code) = caps[8].parse::<u16>() else {
        return LineOutcome::Malformed;
    };

    let response_size = match &caps[9] {
        "-" => 0,
        digits => match digits.parse::<u64>() {
            Ok(size) => size,
            // e.g. a size wider than u64
            Err(_) => return LineOutcome::Malformed,
        },
    };

    LineOutcome::Parsed(LogRecord {
        ip_address: caps[1].to_string(),
        timestamp: caps[4].to_string(),
        method: caps[5].to_string(),
        url: caps[6].to_string(),
        status_code,
        response_size,
    })
}

/// Parses one line, returning `None` for anything that is not a usable record.
pub fn parse_line(line: &str) -> Option<LogRecord> {
    match classify_line(line) {
        LineOutcome::Parsed(record) => Some(record),
        LineOutcome::Unmatched | LineOutcome::Malformed => None,
    }
}
