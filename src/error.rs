use std::fmt;

#[derive(Debug)]
pub enum Error {
    InvalidMaxWidth(f32),
    InvalidFirstLineIndent(f32),
    UnsortedTabStops { index: usize, pos: f32 },
    InvalidParagraph(String),
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidMaxWidth(w) => {
                write!(f, "max width must be finite and positive, got {w}")
            }
            Error::InvalidFirstLineIndent(v) => {
                write!(f, "first-line indent override must be finite, got {v}")
            }
            Error::UnsortedTabStops { index, pos } => write!(
                f,
                "tab stops must be strictly ascending: stop {index} at {pos}px is out of order"
            ),
            Error::InvalidParagraph(reason) => write!(f, "not a valid paragraph: {reason}"),
            Error::Json(e) => write!(f, "JSON error: {e}"),
            Error::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
