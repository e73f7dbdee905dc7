//! # Config
//!
//! Module dedicated to the search parser configuration.

use crate::{Error, Result};

/// The search parser configuration.
///
/// The default configuration reproduces the historical behaviour of
/// the mock server parser.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case", default)
)]
pub struct SearchParserConfig {
    /// Number of consecutive `SUBJECT` builds that forces the two most
    /// recent filters to be folded into a conjunction.
    ///
    /// `None` disables the folding. A threshold must be at least 2,
    /// since a single filter has nothing to fold with.
    pub subject_fold_threshold: Option<usize>,

    /// Protect the whitespace of every quoted phrase instead of the
    /// first one only.
    pub protect_all_quoted_phrases: bool,

    /// Maximum number of reduction steps. When `None`, the number of
    /// operands left on the stack is used.
    pub max_reduce_steps: Option<usize>,
}

impl Default for SearchParserConfig {
    fn default() -> Self {
        Self {
            subject_fold_threshold: Some(3),
            protect_all_quoted_phrases: false,
            max_reduce_steps: None,
        }
    }
}

impl SearchParserConfig {
    pub fn set_subject_fold_threshold(&mut self, threshold: Option<usize>) {
        self.subject_fold_threshold = threshold;
    }

    pub fn with_subject_fold_threshold(mut self, threshold: Option<usize>) -> Self {
        self.set_subject_fold_threshold(threshold);
        self
    }

    pub fn set_protect_all_quoted_phrases(&mut self, protect: bool) {
        self.protect_all_quoted_phrases = protect;
    }

    pub fn with_protect_all_quoted_phrases(mut self, protect: bool) -> Self {
        self.set_protect_all_quoted_phrases(protect);
        self
    }

    /// Checks the configuration before any parsing happens.
    pub fn validate(&self) -> Result<()> {
        match self.subject_fold_threshold {
            Some(threshold) if threshold < 2 => {
                Err(Error::InvalidSubjectFoldThresholdError(threshold))
            }
            _ => Ok(()),
        }
    }

    pub fn set_max_reduce_steps(&mut self, steps: Option<usize>) {
        self.max_reduce_steps = steps;
    }

    pub fn with_max_reduce_steps(mut self, steps: Option<usize>) -> Self {
        self.set_max_reduce_steps(steps);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::SearchParserConfig;
    use crate::Error;

    #[test]
    fn validate_subject_fold_threshold() {
        let config = SearchParserConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.clone().with_subject_fold_threshold(None).validate().is_ok());
        assert!(config.clone().with_subject_fold_threshold(Some(2)).validate().is_ok());

        assert!(matches!(
            config.clone().with_subject_fold_threshold(Some(0)).validate(),
            Err(Error::InvalidSubjectFoldThresholdError(0))
        ));
        assert!(matches!(
            config.with_subject_fold_threshold(Some(1)).validate(),
            Err(Error::InvalidSubjectFoldThresholdError(1))
        ));
    }

    #[cfg(feature = "derive")]
    #[test]
    fn deserialize_kebab_case() {
        let config: SearchParserConfig = serde_json::from_str(
            r#"{ "subject-fold-threshold": null, "protect-all-quoted-phrases": true }"#,
        )
        .unwrap();

        assert_eq!(
            config,
            SearchParserConfig::default()
                .with_subject_fold_threshold(None)
                .with_protect_all_quoted_phrases(true)
        );
    }
}
