//! Main oracle synthesis engine.
//!
//! Per documented member: split the comment into sentences, then for each
//! sentence detect an equivalence, extract and translate its guard when the
//! equivalence is conditional, match and resolve the referenced member,
//! synthesize, check and validate the oracle. Every retained sentence yields
//! exactly one [`EquivalenceMatch`], resolved or not.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::api::results::{AnalysisReport, MemberOutcome, MemberReport};
use crate::catalog::enumerator::CandidateEnumerator;
use crate::catalog::type_catalog::TypeCatalog;
use crate::core::config::{DocOracleConfig, OracleSelection};
use crate::core::errors::{DocOracleError, Result};
use crate::guard::pattern::PatternGuardTranslator;
use crate::guard::translator::GuardTranslator;
use crate::matching::overload::OverloadResolver;
use crate::matching::subject::SubjectMatcher;
use crate::model::code_element::CodeElement;
use crate::model::equivalence::{EquivalenceMatch, MethodReference, UnresolvedReason};
use crate::model::member::DocumentedMember;
use crate::oracle::synthesizer::OracleSynthesizer;
use crate::oracle::validator::{ChainValidator, CommandValidator, OracleValidator, SyntaxValidator};
use crate::text::condition::{ConditionExtractor, DelimitedConditionExtractor};
use crate::text::equivalence::{EquivalenceDetector, PhraseEquivalenceDetector};
use crate::text::sentences::SentenceSplitter;

/// Free-text to oracle translator with pluggable collaborators
pub struct FreeTextTranslator {
    config: Arc<DocOracleConfig>,
    splitter: SentenceSplitter,
    detector: Arc<dyn EquivalenceDetector>,
    conditions: Arc<dyn ConditionExtractor>,
    enumerator: Arc<dyn CandidateEnumerator>,
    guards: Arc<dyn GuardTranslator>,
    validator: Arc<dyn OracleValidator>,
    matcher: SubjectMatcher,
    resolver: OverloadResolver,
    synthesizer: OracleSynthesizer,
}

impl FreeTextTranslator {
    /// Create a translator with the shipped strategies configured from `config`
    pub fn new(config: DocOracleConfig, enumerator: Arc<dyn CandidateEnumerator>) -> Result<Self> {
        config.validate()?;

        let detector = Arc::new(PhraseEquivalenceDetector::new(&config.detection)?);
        let conditions = Arc::new(DelimitedConditionExtractor::new(&config.condition)?);
        let guards = Arc::new(PatternGuardTranslator::new(&config.condition, &config.synthesis)?);
        let validator = Self::default_validator(&config)?;

        debug!(
            external_validator = config.validation.command.is_some(),
            parallel = config.performance.parallel,
            "translator initialized"
        );

        Ok(Self {
            splitter: SentenceSplitter::new(config.segmentation.clone()),
            matcher: SubjectMatcher::new(config.matching.clone()),
            resolver: OverloadResolver::new(config.resolution.clone(), config.synthesis.clone()),
            synthesizer: OracleSynthesizer::new(config.synthesis.clone()),
            config: Arc::new(config),
            detector,
            conditions,
            enumerator,
            guards,
            validator,
        })
    }

    /// Translator over a type catalog with default configuration
    pub fn for_catalog(catalog: Arc<TypeCatalog>) -> Result<Self> {
        Self::new(DocOracleConfig::default(), catalog)
    }

    // Syntax check first, then the external command when one is configured.
    fn default_validator(config: &DocOracleConfig) -> Result<Arc<dyn OracleValidator>> {
        let syntax = Arc::new(SyntaxValidator::new(&config.synthesis)?);
        match &config.validation.command {
            Some(command) => {
                let external = CommandValidator::new(
                    command,
                    Duration::from_millis(config.validation.timeout_ms),
                )?;
                Ok(Arc::new(ChainValidator::new().with(syntax).with(Arc::new(external))))
            }
            None => Ok(syntax),
        }
    }

    pub fn with_detector(mut self, detector: Arc<dyn EquivalenceDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_condition_extractor(mut self, conditions: Arc<dyn ConditionExtractor>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_guard_translator(mut self, guards: Arc<dyn GuardTranslator>) -> Self {
        self.guards = guards;
        self
    }

    pub fn with_validator(mut self, validator: Arc<dyn OracleValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_enumerator(mut self, enumerator: Arc<dyn CandidateEnumerator>) -> Self {
        self.enumerator = enumerator;
        self
    }

    pub fn config(&self) -> &DocOracleConfig {
        &self.config
    }

    /// One record per retained sentence of the member's comment.
    ///
    /// A collaborator failure fails the whole member; use
    /// [`FreeTextTranslator::translate_isolated`] to keep the records produced
    /// before the failure.
    pub fn translate(&self, member: &DocumentedMember) -> Result<Vec<EquivalenceMatch>> {
        let outcome = self.translate_isolated(member);
        match outcome.error {
            Some(error) => Err(error),
            None => Ok(outcome.matches),
        }
    }

    /// Like [`FreeTextTranslator::translate`], keeping partial results on failure
    pub fn translate_isolated(&self, member: &DocumentedMember) -> MemberOutcome {
        let Some(comment) = member.comment() else {
            return MemberOutcome::completed(Vec::new());
        };

        let mut matches = Vec::new();
        let mut candidates = None;
        for sentence in self.splitter.split(comment.text()) {
            match self.analyze_sentence(&sentence, member, &mut candidates) {
                Ok(analyzed) => matches.push(analyzed),
                Err(error) => {
                    let error = error.with_context(member.signature());
                    warn!(member = %member, %error, "member analysis failed");
                    return MemberOutcome::failed(matches, error);
                }
            }
        }
        MemberOutcome::completed(matches)
    }

    /// Analyze every commented member of `catalog`.
    ///
    /// Candidates come from this translator's enumerator, which is normally
    /// the same catalog.
    pub fn analyze_catalog(&self, catalog: &TypeCatalog) -> AnalysisReport {
        self.analyze_members(&catalog.documented_members())
    }

    /// Analyze independent members, in parallel when configured; report order follows `members`
    pub fn analyze_members(&self, members: &[DocumentedMember]) -> AnalysisReport {
        let start = Instant::now();
        let analyze =
            |member: &DocumentedMember| MemberReport::from_outcome(member.signature(), self.translate_isolated(member));

        let reports: Vec<MemberReport> = if self.config.performance.parallel {
            members.par_iter().map(analyze).collect()
        } else {
            members.iter().map(analyze).collect()
        };

        let report = AnalysisReport::new(reports);
        info!(
            members = report.summary.members,
            failed = report.summary.failed_members,
            detected = report.summary.detected,
            resolved = report.summary.resolved,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "catalog analysis completed"
        );
        report
    }

    fn analyze_sentence(
        &self,
        sentence: &str,
        member: &DocumentedMember,
        candidates: &mut Option<Vec<CodeElement>>,
    ) -> Result<EquivalenceMatch> {
        let detected = self.detector.detect(sentence);
        let Some(reference) = detected.reference().cloned() else {
            debug!(sentence, "no equivalence");
            return Ok(detected);
        };
        debug!(
            sentence,
            reference = %reference.signature,
            similarity = detected.is_similarity(),
            negated = detected.is_negated(),
            "equivalence detected"
        );

        if !detected.is_similarity() {
            return self.resolve(detected, &reference, member, candidates, &[None]);
        }

        let Some(clause) = self.conditions.extract(sentence) else {
            debug!(sentence, "conditional equivalence without a guard clause");
            return Ok(detected.unresolved(UnresolvedReason::NoGuard));
        };
        let guards: Vec<Option<String>> = self
            .guards
            .translate(&clause, member)?
            .into_iter()
            .map(|series| series.translation().trim().to_string())
            .filter(|translation| !translation.is_empty())
            .map(Some)
            .collect();
        if guards.is_empty() {
            debug!(clause = %clause, "guard translation empty");
            return Ok(detected.unresolved(UnresolvedReason::EmptyGuardTranslation));
        }

        self.resolve(detected, &reference, member, candidates, &guards)
    }

    fn resolve(
        &self,
        detected: EquivalenceMatch,
        reference: &MethodReference,
        member: &DocumentedMember,
        candidates: &mut Option<Vec<CodeElement>>,
        guards: &[Option<String>],
    ) -> Result<EquivalenceMatch> {
        let candidates = self.candidates(member, candidates)?;
        let named = self.matcher.subject_match(&reference.simple_name, candidates);
        if named.is_empty() {
            debug!(name = %reference.simple_name, "no candidate with a matching name");
            return Ok(detected.unresolved(UnresolvedReason::NoSubjectMatch));
        }

        let Some(matched) = self
            .resolver
            .resolve(reference, member, &named, self.enumerator.hierarchy())
        else {
            debug!(reference = %reference.signature, matches = named.len(), "no compatible overload");
            return Ok(detected.unresolved(UnresolvedReason::NoCompatibleOverload));
        };

        let mut accepted = Vec::new();
        let mut rejection = UnresolvedReason::ValidationRejected;
        for guard in guards {
            let oracle = self
                .synthesizer
                .synthesize(member, &matched, detected.is_negated(), guard.as_deref());
            if let Err(violation) = oracle.check(member, matched.element(), matched.receiver()) {
                debug!(oracle = %oracle, %violation, "structural check failed");
                rejection = UnresolvedReason::StructurallyInvalid(violation.to_string());
                continue;
            }
            let rendered = oracle.render();
            let guard_text = guard.as_deref().unwrap_or_default();
            if self.validator.validate(member, &rendered, guard_text)? {
                accepted.push(rendered);
            } else {
                debug!(oracle = %rendered, "validator rejected oracle");
                rejection = UnresolvedReason::ValidationRejected;
            }
        }

        let selected = match self.config.synthesis.oracle_selection {
            OracleSelection::First => accepted.first(),
            OracleSelection::Last => accepted.last(),
        }
        .cloned();
        Ok(match selected {
            Some(oracle) => detected.resolved(accepted, oracle),
            None => detected.unresolved(rejection),
        })
    }

    // Enumerated once per member, and only when a sentence needs candidates.
    fn candidates<'c>(
        &self,
        member: &DocumentedMember,
        cache: &'c mut Option<Vec<CodeElement>>,
    ) -> Result<&'c [CodeElement]> {
        if cache.is_none() {
            let enumerated = self.enumerator.enumerate(member).map_err(|e| match e {
                DocOracleError::Catalog { .. } | DocOracleError::Collaborator { .. } => e,
                other => DocOracleError::collaborator("candidate enumerator", other.to_string()),
            })?;
            *cache = Some(enumerated);
        }
        Ok(cache.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
