//! Streaming pepXML parser using quick-xml
//!
//! The reader is pulled one event at a time; only the derived PSM records are
//! kept in memory. Each call to [`PepXmlParser::parse`] builds its own state and
//! store, so nothing is shared between parses.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::models::PsmStore;
use super::PepXmlError;

use helpers::Attributes;
use state::{ElementEvent, Emitted, ParserState};

mod helpers;
mod state;


/// Default input buffer size (64 KiB)
pub const DEFAULT_INPUT_BUFFER_SIZE: usize = 64 * 1024;

/// Counters collected while parsing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// `spectrum_query` elements seen, duplicates included
    pub spectrum_queries: usize,
    /// `search_hit` elements kept in the final store
    pub search_hits: usize,
    /// `spectrum_query` elements whose id had already been seen
    pub duplicate_spectra: usize,
    /// `search_score` elements with a name outside the dispatch table
    pub ignored_scores: usize,
}

/// Result of a completed parse
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    /// PSMs keyed by spectrum id
    pub store: PsmStore,
    /// Parse counters
    pub stats: ParseStats,
}

/// Streaming parser for pepXML files
pub struct PepXmlParser<R: BufRead> {
    reader: Reader<R>,
}

impl PepXmlParser<BufReader<File>> {
    /// Open a pepXML file for parsing
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PepXmlError> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::with_capacity(DEFAULT_INPUT_BUFFER_SIZE, file);
        Ok(Self::new(reader))
    }
}

impl<R: BufRead> PepXmlParser<R> {
    /// Create a new parser from a BufRead source
    pub fn new(reader: R) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);
        Self { reader: xml_reader }
    }

    /// Read the whole document and collect its PSMs.
    ///
    /// Any error aborts the parse; no partial store is returned.
    pub fn parse(mut self) -> Result<ParseOutput, PepXmlError> {
        let mut state = ParserState::new();
        let mut output = ParseOutput::default();
        let mut buf = Vec::new();

        loop {
            let decoder = self.reader.decoder();
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let event = open_event(&state, e, decoder)?;
                    state = advance(state, event, &mut output)?;
                }
                Ok(Event::Empty(ref e)) => {
                    let event = open_event(&state, e, decoder)?;
                    state = advance(state, event, &mut output)?;
                    state = advance(state, ElementEvent::Close, &mut output)?;
                }
                Ok(Event::End(_)) => {
                    state = advance(state, ElementEvent::Close, &mut output)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(PepXmlError::XmlError(e)),
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = state.innermost() {
            return Err(PepXmlError::InvalidStructure(format!(
                "document ended inside <{}>",
                open
            )));
        }

        output.stats.search_hits = output.store.hit_count();
        debug!(
            "Parsed {} spectrum queries ({} unique, {} hits, {} duplicates, {} ignored scores)",
            output.stats.spectrum_queries,
            output.store.len(),
            output.stats.search_hits,
            output.stats.duplicate_spectra,
            output.stats.ignored_scores
        );
        Ok(output)
    }
}

/// Parse a pepXML file into a PSM store
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<PsmStore, PepXmlError> {
    Ok(PepXmlParser::open(path)?.parse()?.store)
}

fn open_event(
    state: &ParserState,
    e: &BytesStart,
    decoder: quick_xml::encoding::Decoder,
) -> Result<ElementEvent, PepXmlError> {
    let name = std::str::from_utf8(e.local_name().into_inner())?.to_string();
    let attributes = if state.wants_attributes(&name) {
        Attributes::from_start(e, decoder)?
    } else {
        Attributes::default()
    };
    Ok(ElementEvent::Open { name, attributes })
}

fn advance(
    state: ParserState,
    event: ElementEvent,
    output: &mut ParseOutput,
) -> Result<ParserState, PepXmlError> {
    let (state, emitted) = state.step(event)?;
    match emitted {
        Some(Emitted::Query(psm)) => {
            output.stats.spectrum_queries += 1;
            let spectrum_id = psm.spectrum_id.clone();
            if output.store.insert(psm).is_some() {
                output.stats.duplicate_spectra += 1;
                warn!("Duplicate PSM: {}", spectrum_id);
            }
        }
        Some(Emitted::UnknownScore(name)) => {
            output.stats.ignored_scores += 1;
            debug!("Ignoring search_score '{}'", name);
        }
        None => {}
    }
    Ok(state)
}
