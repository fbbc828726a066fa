//! WHOIS answer parsing.

use std::collections::HashMap;

use whois_service::WhoisResponse;

use super::types::WhoisRecord;

/// Converts a whois-service response into a [`WhoisRecord`].
///
/// The raw answer is always parsed so fields the client does not extract
/// stay available.
pub(crate) fn convert_response(response: &WhoisResponse) -> WhoisRecord {
    let record = parse_whois(&response.raw_data);
    match &response.parsed_data {
        Some(parsed) => record
            .with_registrar(parsed.registrar.clone())
            .with_registrant(parsed.registrant_name.clone()),
        None => record,
    }
}

/// Parses a raw WHOIS answer.
///
/// Every line containing a `:` contributes one field: the trimmed text before
/// the first colon (lower-cased) maps to the trimmed text after it. Lines
/// without a colon, such as legal notices, are ignored. Later occurrences of
/// a key replace earlier ones.
pub fn parse_whois(text: &str) -> WhoisRecord {
    let mut fields = HashMap::new();
    for line in text.lines() {
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            fields.insert(key, value.trim().to_string());
        }
    }
    WhoisRecord::from_fields(fields)
}
