use thiserror::Error;

// Positional layout of the ui access log: the URL sits in the request field
// at index 7, the request time is always the final field.
const URL_FIELD: usize = 7;
const MIN_FIELDS: usize = 9;

/// One successfully parsed log line.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub url: String,
    pub request_time: f64,
}

/// Why a single line failed to parse. Failures are counted by the caller,
/// never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("line has {0} fields, expected at least 9")]
    TooFewFields(usize),

    #[error("URL field is empty")]
    EmptyUrl,

    #[error("invalid request time: {0:?}")]
    InvalidTime(String),
}

/// Extract {url, request_time} from one raw line.
pub fn parse_line(line: &str) -> Result<LogRecord, ParseError> {
    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() < MIN_FIELDS {
        return Err(ParseError::TooFewFields(fields.len()));
    }

    let url = fields[URL_FIELD];
    if url.is_empty() {
        return Err(ParseError::EmptyUrl);
    }

    let raw_time = fields[fields.len() - 1];
    let request_time: f64 = raw_time
        .parse()
        .map_err(|_| ParseError::InvalidTime(raw_time.to_string()))?;
    if !request_time.is_finite() || request_time < 0.0 {
        return Err(ParseError::InvalidTime(raw_time.to_string()));
    }

    Ok(LogRecord {
        url: url.to_string(),
        request_time,
    })
}
