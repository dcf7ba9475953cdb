//! Parser state machine
//!
//! [`ParserState::step`] is the whole of the parser's behaviour: it takes the
//! current state and one element event and returns the next state plus any
//! finished record. It does not touch the XML reader or the result store.

use super::helpers::{optional_parsed, required_attr, required_parsed, Attributes};
use crate::pepxml::dispatch::{element_role, score_setter, ElementRole};
use crate::pepxml::models::{Psm, SearchHit};
use crate::pepxml::PepXmlError;

const SPECTRUM_QUERY: &str = "spectrum_query";
const SEARCH_HIT: &str = "search_hit";
const SEARCH_SCORE: &str = "search_score";
const PEPTIDEPROPHET_RESULT: &str = "peptideprophet_result";

/// An element boundary, with attributes decoded for opening tags
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ElementEvent {
    Open { name: String, attributes: Attributes },
    Close,
}

/// Record produced by a transition
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Emitted {
    /// A `spectrum_query` closed; the PSM is complete
    Query(Psm),
    /// A `search_score` whose name is not in the dispatch table
    UnknownScore(String),
}

/// Everything the parser knows between two events
#[derive(Debug, Default)]
pub(crate) struct ParserState {
    stack: Vec<String>,
    current: Option<Psm>,
    hit: Option<SearchHit>,
}

impl ParserState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of currently open elements
    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Name of the innermost open element
    pub(crate) fn innermost(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    /// Whether opening `name` next would need its attributes
    pub(crate) fn wants_attributes(&self, name: &str) -> bool {
        element_role(self.depth() + 1, name).is_some()
    }

    /// Apply one event
    pub(crate) fn step(
        mut self,
        event: ElementEvent,
    ) -> Result<(Self, Option<Emitted>), PepXmlError> {
        let emitted = match event {
            ElementEvent::Open { name, attributes } => {
                self.stack.push(name);
                let depth = self.stack.len();
                match element_role(depth, &self.stack[depth - 1]) {
                    Some(role) => self.open(role, &attributes)?,
                    None => None,
                }
            }
            ElementEvent::Close => {
                let depth = self.stack.len();
                // Pop unconditionally so depth stays right for unknown elements
                let name = self.stack.pop().ok_or_else(|| {
                    PepXmlError::InvalidStructure("closing tag without open element".into())
                })?;
                match element_role(depth, &name) {
                    Some(ElementRole::SearchHit) => {
                        if let (Some(hit), Some(psm)) = (self.hit.take(), self.current.as_mut()) {
                            psm.hits.push(hit);
                        }
                        None
                    }
                    Some(ElementRole::SpectrumQuery) => {
                        self.hit = None;
                        self.current.take().map(Emitted::Query)
                    }
                    _ => None,
                }
            }
        };
        Ok((self, emitted))
    }

    fn open(
        &mut self,
        role: ElementRole,
        attrs: &Attributes,
    ) -> Result<Option<Emitted>, PepXmlError> {
        match role {
            ElementRole::SpectrumQuery => {
                self.current = Some(read_spectrum_query(attrs)?);
                self.hit = None;
                Ok(None)
            }
            ElementRole::SearchHit => {
                if self.current.is_none() {
                    return Err(PepXmlError::InvalidStructure(
                        "<search_hit> outside of <spectrum_query>".into(),
                    ));
                }
                self.hit = Some(read_search_hit(attrs)?);
                Ok(None)
            }
            ElementRole::SearchScore => {
                let (Some(psm), Some(hit)) = (self.current.as_mut(), self.hit.as_mut()) else {
                    return Err(PepXmlError::InvalidStructure(
                        "<search_score> outside of <search_hit>".into(),
                    ));
                };
                let name = required_attr(attrs, SEARCH_SCORE, "name")?;
                match score_setter(name) {
                    Some(setter) => {
                        let value = attrs.get("value").unwrap_or_default();
                        setter.apply(name, value, psm, hit)?;
                        Ok(None)
                    }
                    None => Ok(Some(Emitted::UnknownScore(name.to_string()))),
                }
            }
            ElementRole::PeptideProphetResult => {
                if let Some(hit) = self.hit.as_mut() {
                    hit.tpp_pep_prob = optional_parsed(attrs, PEPTIDEPROPHET_RESULT, "probability")?;
                }
                Ok(None)
            }
        }
    }
}

fn read_spectrum_query(attrs: &Attributes) -> Result<Psm, PepXmlError> {
    let spectrum_id = required_attr(attrs, SPECTRUM_QUERY, "spectrum")?;
    let mut psm = Psm::new(
        spectrum_id,
        required_parsed(attrs, SPECTRUM_QUERY, "assumed_charge")?,
        required_parsed(attrs, SPECTRUM_QUERY, "precursor_neutral_mass")?,
    );
    psm.start_scan = optional_parsed(attrs, SPECTRUM_QUERY, "start_scan")?;
    psm.end_scan = optional_parsed(attrs, SPECTRUM_QUERY, "end_scan")?;
    psm.retention_time_sec = optional_parsed(attrs, SPECTRUM_QUERY, "retention_time_sec")?;
    Ok(psm)
}

fn read_search_hit(attrs: &Attributes) -> Result<SearchHit, PepXmlError> {
    Ok(SearchHit {
        hit_rank: required_parsed(attrs, SEARCH_HIT, "hit_rank")?,
        peptide: required_attr(attrs, SEARCH_HIT, "peptide")?.to_string(),
        protein: required_attr(attrs, SEARCH_HIT, "protein")?.to_string(),
        missed_cleavages: required_parsed(attrs, SEARCH_HIT, "num_missed_cleavages")?,
        num_tryptic_ends: optional_parsed(attrs, SEARCH_HIT, "num_tol_term")?,
        ions_matched: optional_parsed(attrs, SEARCH_HIT, "num_matched_ions")?,
        ions_observed: optional_parsed(attrs, SEARCH_HIT, "tot_num_ions")?,
        ..Default::default()
    })
}
