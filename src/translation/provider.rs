use serde::{Deserialize, Serialize};

use super::language::AUTO_DETECT;

/// Shape of the JSON body a provider expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    /// `{ "text", "source", "target" }`
    #[default]
    Text,
    /// `{ "input", "source_language_code", "target_language_code", "model" }`
    Input,
}

impl PayloadFormat {
    /// Name used in the config file.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Input => "input",
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Payload<'a> {
    Text {
        text: &'a str,
        source: &'a str,
        target: &'a str,
    },
    Input {
        input: &'a str,
        source_language_code: &'a str,
        target_language_code: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        model: Option<&'a str>,
    },
}

/// One translation backend in the fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub name: String,
    pub endpoint: String,
    pub format: PayloadFormat,
    pub model: Option<String>,
    pub api_key: Option<String>,
    /// Header carrying the raw API key. `None` sends `Authorization: Bearer`.
    pub api_key_header: Option<String>,
    /// Replacement for the `auto` source code. `None` forwards `auto` as is.
    pub auto_source: Option<String>,
}

impl Provider {
    /// A keyless provider using the given payload format.
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        format: PayloadFormat,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            format,
            model: None,
            api_key: None,
            api_key_header: None,
            auto_source: None,
        }
    }

    /// Source code as this provider wants to see it.
    pub fn source_code<'a>(&'a self, source: &'a str) -> &'a str {
        match &self.auto_source {
            Some(sentinel) if source == AUTO_DETECT => sentinel.as_str(),
            _ => source,
        }
    }

    /// Builds the request body for one line. Pure.
    pub fn build_payload<'a>(
        &'a self,
        line: &'a str,
        source: &'a str,
        target: &'a str,
    ) -> Payload<'a> {
        let source = self.source_code(source);
        match self.format {
            PayloadFormat::Text => Payload::Text {
                text: line,
                source,
                target,
            },
            PayloadFormat::Input => Payload::Input {
                input: line,
                source_language_code: source,
                target_language_code: target,
                model: self.model.as_deref(),
            },
        }
    }
}
