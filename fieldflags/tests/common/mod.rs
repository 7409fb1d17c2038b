//! Field types shared by the integration tests.

use std::fmt;

use fieldflags::{BoxError, TextCodec, Value};

/// A settable value accepting `low`, `medium` or `high`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    #[default]
    Unset,
    Low,
    Medium,
    High,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unset => "",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

impl Value for Level {
    fn set(&mut self, text: &str) -> Result<(), BoxError> {
        *self = match text {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            other => return Err(format!("unknown level {other:?}").into()),
        };
        Ok(())
    }
}

/// A text codec written as `x:y`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl TextCodec for Point {
    fn marshal_text(&self) -> Result<String, BoxError> {
        Ok(format!("{}:{}", self.x, self.y))
    }

    fn unmarshal_text(&mut self, text: &str) -> Result<(), BoxError> {
        let (x, y) = text
            .split_once(':')
            .ok_or_else(|| format!("expected x:y, got {text:?}"))?;
        self.x = x.trim().parse()?;
        self.y = y.trim().parse()?;
        Ok(())
    }
}
