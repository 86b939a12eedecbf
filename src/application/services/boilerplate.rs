use regex::Regex;

pub const DEFAULT_HEADER_PATTERNS: &[&str] = &[r"JEDEC Standard No\."];
pub const DEFAULT_FOOTER_PATTERNS: &[&str] = &[r"JESD\d+-[A-Z]\d+\s+\d+"];

#[derive(Debug, thiserror::Error)]
#[error("invalid boilerplate pattern `{pattern}`: {source}")]
pub struct BoilerplatePatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Running headers and footers stripped from section text and excluded from
/// subtitle detection.
#[derive(Debug, Clone)]
pub struct BoilerplateRules {
    header_lines: Vec<Regex>,
    footer_lines: Vec<Regex>,
    footer_inline: Vec<Regex>,
}

impl Default for BoilerplateRules {
    fn default() -> Self {
        Self::from_patterns(DEFAULT_HEADER_PATTERNS, DEFAULT_FOOTER_PATTERNS)
            .unwrap_or_else(|_| Self::none())
    }
}

impl BoilerplateRules {
    pub fn none() -> Self {
        Self {
            header_lines: Vec::new(),
            footer_lines: Vec::new(),
            footer_inline: Vec::new(),
        }
    }

    /// Header patterns match at the start of a line (case-insensitive).
    /// Footer patterns remove whole lines and inline occurrences.
    pub fn from_patterns<H, F>(
        headers: &[H],
        footers: &[F],
    ) -> Result<Self, BoilerplatePatternError>
    where
        H: AsRef<str>,
        F: AsRef<str>,
    {
        let header_lines = headers
            .iter()
            .map(|p| compile(p.as_ref(), |p| format!("(?i)^(?:{p})")))
            .collect::<Result<Vec<_>, _>>()?;
        let footer_lines = footers
            .iter()
            .map(|p| compile(p.as_ref(), |p| format!("^(?:{p})$")))
            .collect::<Result<Vec<_>, _>>()?;
        let footer_inline = footers
            .iter()
            .map(|p| compile(p.as_ref(), |p| p.to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            header_lines,
            footer_lines,
            footer_inline,
        })
    }

    pub fn is_header(&self, line: &str) -> bool {
        self.header_lines.iter().any(|re| re.is_match(line))
    }

    pub fn is_footer(&self, line: &str) -> bool {
        self.footer_lines.iter().any(|re| re.is_match(line))
    }

    pub fn strip_inline_footers(&self, text: &str) -> String {
        self.footer_inline
            .iter()
            .fold(text.to_string(), |acc, re| re.replace_all(&acc, "").into_owned())
    }
}

fn compile(
    pattern: &str,
    wrap: impl Fn(&str) -> String,
) -> Result<Regex, BoilerplatePatternError> {
    Regex::new(&wrap(pattern)).map_err(|source| BoilerplatePatternError {
        pattern: pattern.to_string(),
        source,
    })
}
