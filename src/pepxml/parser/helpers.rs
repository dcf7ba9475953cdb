use std::str::FromStr;

use quick_xml::encoding::Decoder;
use quick_xml::events::BytesStart;

use crate::pepxml::dispatch::parse_text;
use crate::pepxml::PepXmlError;

/// Decoded attributes of one element, in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Decode and unescape every attribute of a start tag
    pub(crate) fn from_start(e: &BytesStart, decoder: Decoder) -> Result<Self, PepXmlError> {
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|e| PepXmlError::XmlError(quick_xml::Error::from(e)))?;
            let key = std::str::from_utf8(attr.key.local_name().into_inner())?.to_string();
            let value = attr.decode_and_unescape_value(decoder)?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self(attributes))
    }

    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
impl<const N: usize> From<[(&str, &str); N]> for Attributes {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Read an attribute that must be present
pub(crate) fn required_attr<'a>(
    attrs: &'a Attributes,
    element: &'static str,
    attribute: &'static str,
) -> Result<&'a str, PepXmlError> {
    attrs
        .get(attribute)
        .ok_or(PepXmlError::MissingAttribute { element, attribute })
}

/// Read and parse an attribute that must be present and non-blank
pub(crate) fn required_parsed<T: FromStr>(
    attrs: &Attributes,
    element: &'static str,
    attribute: &'static str,
) -> Result<T, PepXmlError> {
    let raw = required_attr(attrs, element, attribute)?;
    parse_text(element, attribute, raw)?
        .ok_or_else(|| PepXmlError::invalid_value(element, attribute, raw))
}

/// Read and parse an optional attribute; absent or blank yields `None`
pub(crate) fn optional_parsed<T: FromStr>(
    attrs: &Attributes,
    element: &'static str,
    attribute: &'static str,
) -> Result<Option<T>, PepXmlError> {
    match attrs.get(attribute) {
        Some(raw) => parse_text(element, attribute, raw),
        None => Ok(None),
    }
}
