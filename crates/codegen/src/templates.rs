use regex::Regex;
use resgen_core::{GeneratorError, GeneratorResult};
use std::collections::HashMap;

/// Placeholders every resource stub must contain
pub const REQUIRED_PLACEHOLDERS: [&str; 3] = ["resourceClass", "columns", "relations"];

const KNOWN_PLACEHOLDERS: [&str; 4] = ["namespace", "resourceClass", "columns", "relations"];

/// A template with `{{name}}` (or `{{ name }}`) placeholders
#[derive(Debug, Clone)]
pub struct Stub {
    text: String,
    placeholder: Regex,
}

impl Stub {
    pub fn new(text: impl Into<String>) -> GeneratorResult<Self> {
        let placeholder = Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}")
            .map_err(|e| GeneratorError::template(format!("Regex error: {}", e)))?;

        let stub = Self {
            text: text.into(),
            placeholder,
        };
        stub.validate()?;
        Ok(stub)
    }

    /// The built-in Laravel `JsonResource` stub
    pub fn builtin() -> GeneratorResult<Self> {
        Self::new(RESOURCE_STUB)
    }

    fn placeholders(&self) -> Vec<&str> {
        self.placeholder
            .captures_iter(&self.text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    fn validate(&self) -> GeneratorResult<()> {
        let found = self.placeholders();

        for required in REQUIRED_PLACEHOLDERS {
            if !found.contains(&required) {
                return Err(GeneratorError::template(format!(
                    "Resource stub is missing the {{{{{}}}}} placeholder",
                    required
                )));
            }
        }

        for name in found.iter().filter(|name| !KNOWN_PLACEHOLDERS.contains(name)) {
            tracing::warn!(placeholder = %name, "unknown placeholder in resource stub is left as is");
        }

        Ok(())
    }

    /// Substitute placeholders from `context`. A line holding nothing but a
    /// placeholder that renders empty is dropped; unknown placeholders are
    /// kept verbatim.
    pub fn render(&self, context: &HashMap<&str, String>) -> String {
        let mut result = String::with_capacity(self.text.len());

        for line in self.text.split_inclusive('\n') {
            if self.is_empty_placeholder_line(line, context) {
                continue;
            }

            let rendered = self.placeholder.replace_all(line, |caps: &regex::Captures<'_>| {
                context
                    .get(&caps[1])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            });
            result.push_str(&rendered);
        }

        result
    }

    fn is_empty_placeholder_line(&self, line: &str, context: &HashMap<&str, String>) -> bool {
        let content = line.trim();
        match self.placeholder.captures(content) {
            Some(caps) => {
                let whole = caps.get(0).map_or(0, |m| m.len());
                whole == content.len() && context.get(&caps[1]).is_some_and(|value| value.is_empty())
            }
            None => false,
        }
    }
}

pub static RESOURCE_STUB: &str = r#"<?php

namespace {{namespace}};

use Illuminate\Http\Request;
use Illuminate\Http\Resources\Json\JsonResource;

class {{resourceClass}} extends JsonResource
{
    /**
     * Transform the resource into an array.
     *
     * @return array<string, mixed>
     */
    public function toArray(Request $request): array
    {
        return [
            {{columns}}
            {{relations}}
        ];
    }
}
"#;
