use std::fmt::{Display, Formatter};

use sheet_stitch::StitchError;
use worker::{Response, Result};

use crate::models::ErrorResponse;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    NoValidInput(String),
    Concatenation(String),
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::NoValidInput(_) => "no_valid_input",
            Self::Concatenation(_) => "concatenation_error",
            Self::Internal(_) => "internal_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(message)
            | Self::NotFound(message)
            | Self::NoValidInput(message)
            | Self::Concatenation(message)
            | Self::Internal(message) => message,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound(_) => 404,
            Self::NoValidInput(_) | Self::Concatenation(_) => 422,
            Self::Internal(_) => 500,
        }
    }

    pub fn into_response(self) -> Result<Response> {
        let mut response = Response::from_json(&ErrorResponse {
            code: self.code().to_string(),
            message: self.message().to_string(),
        })?;
        response.headers_mut().set("Cache-Control", "no-store")?;
        Ok(response.with_status(self.status_code()))
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ApiError {}

impl From<worker::Error> for ApiError {
    fn from(error: worker::Error) -> Self {
        Self::Internal(error.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(error: url::ParseError) -> Self {
        Self::BadRequest(error.to_string())
    }
}

impl From<StitchError> for ApiError {
    fn from(error: StitchError) -> Self {
        match error {
            StitchError::NoValidInput { ref skipped } if !skipped.is_empty() => {
                let details = skipped
                    .iter()
                    .map(|file| format!("{} ({})", file.name, file.reason))
                    .collect::<Vec<_>>()
                    .join("; ");
                Self::NoValidInput(format!("{error}: {details}"))
            }
            StitchError::NoValidInput { .. } => Self::NoValidInput(error.to_string()),
            StitchError::Concatenation(_) => Self::Concatenation(error.to_string()),
            StitchError::InvalidOption(_) => Self::BadRequest(error.to_string()),
            StitchError::Io(_) | StitchError::Csv(_) => Self::Internal(error.to_string()),
        }
    }
}
