use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::KeyPath,
    error::{Error, Result},
};

/// One reference syntax: a regex plus the capture group that holds the key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReferencePattern {
    pub pattern: String,
    #[serde(default = "default_group")]
    pub group: usize,
}

fn default_group() -> usize {
    1
}

impl ReferencePattern {
    pub fn new(pattern: impl Into<String>, group: usize) -> Self {
        Self {
            pattern: pattern.into(),
            group,
        }
    }

    pub fn compile(&self) -> Result<CompiledPattern> {
        let regex = Regex::new(&self.pattern).map_err(|e| Error::Pattern {
            pattern: self.pattern.clone(),
            source: Box::new(e),
        })?;
        // captures_len counts the implicit whole-match group 0.
        if self.group >= regex.captures_len() {
            return Err(Error::config(format!(
                "pattern \"{}\" has no capture group {} (it has {})",
                self.pattern,
                self.group,
                regex.captures_len() - 1
            )));
        }
        Ok(CompiledPattern {
            regex,
            group: self.group,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    group: usize,
}

impl CompiledPattern {
    /// Literal keys this pattern finds in `text`.
    pub fn keys<'t>(&'t self, text: &'t str) -> impl Iterator<Item = KeyPath> + 't {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(self.group))
            .filter_map(|m| literal_key(m.as_str()))
    }
}

/// Accept a captured literal only if it is a well-formed static key.
///
/// Interpolated template strings (`a.${b}`) and concatenation stubs
/// (`'prefix.' + x` captures `prefix.`) are not keys.
fn literal_key(raw: &str) -> Option<KeyPath> {
    let raw = raw.trim();
    if raw.contains("${") || raw.contains("{{") {
        return None;
    }
    KeyPath::parse(raw)
}

// Any of ' " ` around a key. The key itself cannot contain a quote.
const QUOTED: &str = r#"['"`]([^'"`\r\n]+)['"`]"#;

/// Built-in reference syntaxes, in match order.
pub fn default_patterns() -> Vec<ReferencePattern> {
    vec![
        // translate.instant('KEY'), t("KEY"), $t(`KEY`), i18n.t('KEY')
        ReferencePattern::new(
            format!(
                r"(?:\b(?:translate|instant|get|stream|t)|\$t)\(\s*{}",
                QUOTED
            ),
            1,
        ),
        // {{ 'KEY' | translate }}
        ReferencePattern::new(format!(r"{}\s*\|\s*translate\b", QUOTED), 1),
        // <span translate="KEY">
        ReferencePattern::new(r#"\btranslate\s*=\s*["']([^"'\r\n]+)["']"#, 1),
        // <span [translate]="'KEY'">, [translate]='"KEY"', [translate]="`KEY`"
        ReferencePattern::new(
            format!(r#"\[translate\]\s*=\s*["']\s*{}\s*["']"#, QUOTED),
            1,
        ),
        // marker('KEY'), _('KEY')
        ReferencePattern::new(format!(r"(?:\bmarker|\b_)\(\s*{}", QUOTED), 1),
    ]
}

pub fn compile_all(patterns: &[ReferencePattern]) -> Result<Vec<CompiledPattern>> {
    patterns.iter().map(ReferencePattern::compile).collect()
}
