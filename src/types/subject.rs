use crate::error::{AppResult, ErrorReason};
use x509_parser::{
    der_parser::asn1_rs::{PrintableString, SerializeResult, ToDer, Utf8String},
    x509::{AttributeTypeAndValue, X509Name},
};

/// Recognised attribute types in the order they appear in the rendered string.
const RENDER_ORDER: [(&str, &str); 9] = [
    ("2.5.4.5", "SERIALNUMBER"),
    ("2.5.4.3", "CN"),
    ("2.5.4.11", "OU"),
    ("2.5.4.10", "O"),
    ("2.5.4.17", "POSTALCODE"),
    ("2.5.4.9", "STREET"),
    ("2.5.4.7", "L"),
    ("2.5.4.8", "ST"),
    ("2.5.4.6", "C"),
];

/// Attributes that keep only their last occurrence.
const SINGLE_VALUED: [&str; 2] = ["2.5.4.3", "2.5.4.5"];

/// Renders a distinguished name as the canonical `CN=...,O=...,C=...` string
/// the allow-list is written in.
///
/// Recognised attributes are regrouped into a fixed order no matter how the
/// name was encoded, so two encodings of the same identity compare equal.
/// Unrecognised attributes follow as `<oid>=#<hex DER>`, last encoded first.
pub fn canonical_subject(name: &X509Name<'_>) -> AppResult<String> {
    let mut known: Vec<Vec<&str>> = vec![Vec::new(); RENDER_ORDER.len()];
    let mut unknown: Vec<String> = Vec::new();

    for attr in name.iter_rdn().flat_map(|rdn| rdn.iter()) {
        let oid = attr.attr_type().to_id_string();
        let Some(slot) = RENDER_ORDER.iter().position(|(id, _)| *id == oid) else {
            let der = encode_value(attr).map_err(|e| ErrorReason::Subject(e.to_string()))?;
            unknown.push(format!("{}=#{}", oid, hex::encode(der)));
            continue;
        };
        // Non-string values of recognised types are dropped
        let Ok(value) = attr.as_str() else {
            continue;
        };
        if SINGLE_VALUED.contains(&oid.as_str()) {
            known[slot].clear();
        }
        known[slot].push(value);
    }

    let rendered = RENDER_ORDER
        .iter()
        .zip(known.iter())
        .filter(|(_, values)| !values.is_empty())
        .map(|((_, short), values)| {
            values
                .iter()
                .map(|value| format!("{}={}", short, escape_value(value)))
                .collect::<Vec<_>>()
                .join("+")
        });

    Ok(rendered
        .chain(unknown.into_iter().rev())
        .collect::<Vec<_>>()
        .join(","))
}

fn escape_value(value: &str) -> String {
    let last = value.len().saturating_sub(1);
    let mut escaped = String::with_capacity(value.len());
    for (idx, c) in value.char_indices() {
        let escape = match c {
            ',' | '+' | '"' | '\\' | '<' | '>' | ';' => true,
            ' ' => idx == 0 || idx == last,
            '#' => idx == 0,
            _ => false,
        };
        if escape {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Re-encodes an attribute value the way a decoded value is marshalled back:
/// text as a PrintableString when its charset allows, a UTF8String otherwise,
/// anything else as its original encoding.
fn encode_value(attr: &AttributeTypeAndValue<'_>) -> SerializeResult<Vec<u8>> {
    match attr.as_str() {
        Ok(text) if text.bytes().all(is_printable) => PrintableString::new(text).to_der_vec(),
        Ok(text) => Utf8String::new(text).to_der_vec(),
        Err(_) => attr.attr_value().to_der_vec(),
    }
}

fn is_printable(b: u8) -> bool {
    matches!(b,
        b'a'..=b'z'
        | b'A'..=b'Z'
        | b'0'..=b'9'
        | b'\''..=b')'
        | b'+'..=b'/'
        | b' '
        | b':'
        | b'='
        | b'?'
    )
}
