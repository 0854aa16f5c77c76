use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Default parameter values declared by the node.
pub mod defaults {
    pub const RESOURCE: &str = "prompt";
    pub const OPERATION: &str = "getAll";
    pub const QUESTION: &str = "";
    pub const MEMORY_KEY: &str = "";
    pub const PRODUCTIVE: bool = true;
}

/// Remote resource the node operates on.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    #[default]
    Prompt,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
        }
    }
}

impl FromStr for Resource {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prompt" => Ok(Self::Prompt),
            other => Err(ParseSelectorError::new("resource", other)),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation performed against a [`Resource`].
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    /// List every prompt visible to the token.
    #[default]
    GetAll,
    /// Run a single prompt with a question.
    Run,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetAll => "getAll",
            Self::Run => "run",
        }
    }
}

impl FromStr for Operation {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "getAll" => Ok(Self::GetAll),
            "run" => Ok(Self::Run),
            other => Err(ParseSelectorError::new("operation", other)),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a resource or operation string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSelectorError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseSelectorError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ParseSelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported {} '{}'", self.kind, self.value)
    }
}

impl Error for ParseSelectorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!("prompt".parse::<Resource>(), Ok(Resource::Prompt));
        assert_eq!("getAll".parse::<Operation>(), Ok(Operation::GetAll));
        assert_eq!("run".parse::<Operation>(), Ok(Operation::Run));
        assert_eq!(defaults::OPERATION.parse::<Operation>(), Ok(Operation::default()));
    }

    #[test]
    fn rejects_unknown_selectors() {
        let error = "delete".parse::<Operation>().unwrap_err();
        assert_eq!(error.to_string(), "unsupported operation 'delete'");
        assert!("user".parse::<Resource>().is_err());
    }
}
