//! Configuration types and management for docoracle-rs.
//!
//! Every heuristic the pipeline applies (sentence delimiters, equivalence
//! phrasing, guard markers, name-matching rules, placeholders) is driven by
//! this configuration so stricter strategies can be dropped in without
//! touching the pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{DocOracleError, Result};

/// Main configuration for the oracle synthesis engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocOracleConfig {
    /// Sentence segmentation settings
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Equivalence statement detection settings
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Guard clause extraction settings
    #[serde(default)]
    pub condition: ConditionConfig,

    /// Subject (name) matching settings
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Overload resolution settings
    #[serde(default)]
    pub resolution: ResolutionConfig,

    /// Oracle synthesis settings
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// External validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Performance settings
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl DocOracleConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            DocOracleError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        serde_yaml::from_str(&content).map_err(Into::into)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            DocOracleError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        self.segmentation.validate()?;
        self.detection.validate()?;
        self.condition.validate()?;
        self.matching.validate()?;
        self.resolution.validate()?;
        self.synthesis.validate()?;
        self.validation.validate()?;
        Ok(())
    }
}

/// Sentence segmentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Characters that end a sentence when followed by a space
    pub delimiters: Vec<char>,
    /// Trimmed sentences shorter than this are discarded as noise
    pub min_sentence_length: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            delimiters: vec!['.', ';'],
            min_sentence_length: 3,
        }
    }
}

impl SegmentationConfig {
    /// Validate segmentation configuration
    pub fn validate(&self) -> Result<()> {
        if self.delimiters.is_empty() {
            return Err(DocOracleError::config_field(
                "at least one sentence delimiter is required",
                "segmentation.delimiters",
            ));
        }
        if self.delimiters.iter().any(|c| c.is_whitespace()) {
            return Err(DocOracleError::config_field(
                "sentence delimiters cannot be whitespace",
                "segmentation.delimiters",
            ));
        }
        Ok(())
    }
}

/// Equivalence detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Phrases declaring exact equivalence
    pub equivalence_phrases: Vec<String>,
    /// Phrases declaring approximate (similarity) equivalence
    pub similarity_phrases: Vec<String>,
    /// Words that negate a following equivalence phrase
    pub negation_words: Vec<String>,
    /// Number of words before the phrase scanned for negation
    pub negation_window: usize,
    /// Words that make an equivalence conditional when present in the sentence
    pub conditional_markers: Vec<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            equivalence_phrases: to_strings(&[
                "equivalent to",
                "equivalent of",
                "the same as",
                "same as",
                "identical to",
                "equal to",
                "shorthand for",
                "alias for",
                "synonym for",
            ]),
            similarity_phrases: to_strings(&[
                "similar to",
                "analogous to",
                "behaves like",
                "works like",
                "acts like",
                "like",
            ]),
            negation_words: to_strings(&["not", "never", "isn't", "aren't"]),
            negation_window: 3,
            conditional_markers: to_strings(&["if", "when"]),
        }
    }
}

impl DetectionConfig {
    /// Validate detection configuration
    pub fn validate(&self) -> Result<()> {
        if self.equivalence_phrases.is_empty() && self.similarity_phrases.is_empty() {
            return Err(DocOracleError::config_field(
                "at least one equivalence or similarity phrase is required",
                "detection.equivalence_phrases",
            ));
        }
        let all = self
            .equivalence_phrases
            .iter()
            .chain(&self.similarity_phrases)
            .chain(&self.negation_words)
            .chain(&self.conditional_markers);
        for phrase in all {
            if phrase.trim().is_empty() {
                return Err(DocOracleError::config_field(
                    "detection phrases cannot be blank",
                    "detection",
                ));
            }
        }
        Ok(())
    }
}

/// Guard clause extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionConfig {
    /// Markers that open a guard clause, tried in order
    pub markers: Vec<String>,
    /// Characters that close a guard clause
    pub terminators: Vec<char>,
    /// Accept a guard that runs to the end of the sentence when no terminator follows it
    pub allow_sentence_end: bool,
}

impl Default for ConditionConfig {
    fn default() -> Self {
        Self {
            markers: to_strings(&["if", "when"]),
            terminators: vec![','],
            allow_sentence_end: false,
        }
    }
}

impl ConditionConfig {
    /// Validate condition configuration
    pub fn validate(&self) -> Result<()> {
        if self.markers.is_empty() {
            return Err(DocOracleError::config_field(
                "at least one guard marker is required",
                "condition.markers",
            ));
        }
        if self.terminators.is_empty() && !self.allow_sentence_end {
            return Err(DocOracleError::config_field(
                "guard clauses need a terminator or allow_sentence_end",
                "condition.terminators",
            ));
        }
        Ok(())
    }
}

/// Name matching rule applied by the subject matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Identical simple names
    Exact,
    /// Names equal ignoring ASCII case
    CaseInsensitive,
    /// Names equal after dropping accessor prefixes and a third-person `s`
    Normalized,
}

/// Subject matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Rules tried in order; the first one matching any candidate wins
    pub rules: Vec<MatchRule>,
    /// Accessor prefixes dropped by [`MatchRule::Normalized`]
    pub verb_prefixes: Vec<String>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                MatchRule::Exact,
                MatchRule::CaseInsensitive,
                MatchRule::Normalized,
            ],
            verb_prefixes: to_strings(&["get", "is", "has"]),
        }
    }
}

impl MatchingConfig {
    /// Validate matching configuration
    pub fn validate(&self) -> Result<()> {
        if !self.rules.contains(&MatchRule::Exact) {
            return Err(DocOracleError::config_field(
                "the exact rule must always be enabled",
                "matching.rules",
            ));
        }
        Ok(())
    }
}

/// Overload resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Largest compatibility distance accepted for a single argument
    pub max_argument_distance: u32,
    /// Use the documented member's own parameters when the reference has no arguments
    pub fallback_to_member_parameters: bool,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            max_argument_distance: 10,
            fallback_to_member_parameters: true,
        }
    }
}

impl ResolutionConfig {
    /// Validate resolution configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_argument_distance == 0 {
            return Err(DocOracleError::config_field(
                "max_argument_distance must be positive",
                "resolution.max_argument_distance",
            ));
        }
        Ok(())
    }
}

/// Which oracle fills the slot when several guard translations succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleSelection {
    /// Keep the first successful oracle
    First,
    /// Keep the last successful oracle
    Last,
}

/// Oracle synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Placeholder for the documented member's return value
    pub result_placeholder: String,
    /// Placeholder for the documented member's arguments; `{index}` is replaced by the position
    pub argument_placeholder: String,
    /// Oracle kept when a sentence yields several
    pub oracle_selection: OracleSelection,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            result_placeholder: "RESULT".to_string(),
            argument_placeholder: "args[{index}]".to_string(),
            oracle_selection: OracleSelection::Last,
        }
    }
}

impl SynthesisConfig {
    /// Validate synthesis configuration
    pub fn validate(&self) -> Result<()> {
        if self.result_placeholder.trim().is_empty() {
            return Err(DocOracleError::config_field(
                "result placeholder cannot be empty",
                "synthesis.result_placeholder",
            ));
        }
        if !self.argument_placeholder.contains("{index}") {
            return Err(DocOracleError::config_field(
                "argument placeholder must contain {index}",
                "synthesis.argument_placeholder",
            ));
        }
        Ok(())
    }

    /// Render the placeholder for the argument at `index`
    pub fn argument(&self, index: usize) -> String {
        self.argument_placeholder
            .replace("{index}", &index.to_string())
    }
}

/// External validator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// External validator command line (program followed by arguments)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    /// Time allowed for one external validation, in milliseconds
    pub timeout_ms: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            command: None,
            timeout_ms: 10_000,
        }
    }
}

impl ValidationConfig {
    /// Validate validation configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(command) = &self.command {
            if command.is_empty() || command[0].trim().is_empty() {
                return Err(DocOracleError::config_field(
                    "validator command cannot be empty",
                    "validation.command",
                ));
            }
        }
        if self.timeout_ms == 0 {
            return Err(DocOracleError::config_field(
                "timeout_ms must be positive",
                "validation.timeout_ms",
            ));
        }
        Ok(())
    }
}

/// Performance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Analyze catalog members in parallel
    pub parallel: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
