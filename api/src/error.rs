use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("SECURITY_TOKEN environment variable not set")]
    MissingToken,
    #[error("Error fetching data from server: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Server responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Response body is not valid UTF-8")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("Failed parsing XML: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("Error parsing start time {value:?}: {source}")]
    TimeParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Point position {position} does not follow position {previous}")]
    UnorderedPositions { previous: u32, position: u32 },
    #[error("Acknowledgement {code}: {text}")]
    Acknowledgement { code: String, text: String },
    #[error("Point position {position} is outside the {span} hour period")]
    PositionOutOfRange { position: u32, span: i64 },
}
