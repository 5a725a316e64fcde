use crate::{
    error::{AppResult, ErrorReason},
    types::TrustListEntry,
};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use std::collections::HashMap;

pub const DEFAULT_TRUST_LIST_URL: &str = "https://support.apple.com/en-us/HT208125";

pub const SECTION_MARKER: &str = "<div id=\"trusted\"";
const SECTION_END: &str = "</div>";

pub const NAME_COLUMN: &str = "Certificate name";
pub const FINGERPRINT_COLUMN: &str = "Fingerprint (SHA-256)";

const NBSP: &str = "&nbsp;";

lazy_static! {
    static ref ROW: Regex = Regex::new(r"(?s)<tr(?:\s[^>]*)?>(.*?)</tr>").unwrap();
    static ref HEADER_CELL: Regex = Regex::new(r"(?s)<th(?:\s[^>]*)?>(.*?)</th>").unwrap();
    static ref DATA_CELL: Regex = Regex::new(r"(?s)<td(?:\s[^>]*)?>(.*?)</td>").unwrap();
    static ref LINE_BREAK: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
}

/// Retrieves the vendor page listing the currently trusted roots.
#[derive(Clone, Debug)]
pub struct TrustListFetcher {
    client: Client,
    url: String,
}

impl TrustListFetcher {
    pub fn new(url: impl Into<String>) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> AppResult<String> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

/// Extracts the entries of the trusted-roots table, in document order.
///
/// Structural problems (no trusted section, a missing column, a short row)
/// are errors; nothing is returned for a partially understood document.
pub fn parse_trust_list(document: &str) -> AppResult<Vec<TrustListEntry>> {
    let section = trusted_section(document)?;
    let mut rows = ROW
        .captures_iter(section)
        .filter_map(|caps| caps.get(1))
        .map(|row| row.as_str());

    let columns = ColumnMap::from_header(rows.next().unwrap_or_default());
    let name_col = columns.position(NAME_COLUMN)?;
    let fingerprint_col = columns.position(FINGERPRINT_COLUMN)?;
    let required = name_col.max(fingerprint_col) + 1;

    rows.enumerate()
        .map(|(idx, row)| -> AppResult<TrustListEntry> {
            let cells: Vec<&str> = DATA_CELL
                .captures_iter(row)
                .filter_map(|caps| caps.get(1))
                .map(|cell| cell.as_str())
                .collect();
            if cells.len() < required {
                return Err(ErrorReason::RowShape {
                    row: idx + 1,
                    cells: cells.len(),
                    required,
                }
                .into());
            }

            Ok(TrustListEntry::new(
                normalize_name(cells[name_col]),
                normalize_fingerprint(cells[fingerprint_col]),
            ))
        })
        .collect()
}

fn trusted_section(document: &str) -> AppResult<&str> {
    let start = document
        .find(SECTION_MARKER)
        .ok_or(ErrorReason::SectionNotFound(SECTION_MARKER))?;
    let section = &document[start..];
    let end = section
        .find(SECTION_END)
        .ok_or(ErrorReason::UnterminatedSection)?;
    Ok(&section[..end])
}

/// Column positions of a table, looked up by header label.
#[derive(Clone, Debug, Default)]
struct ColumnMap(HashMap<String, usize>);

impl ColumnMap {
    fn from_header(row: &str) -> Self {
        let columns = HEADER_CELL
            .captures_iter(row)
            .filter_map(|caps| caps.get(1))
            .enumerate()
            .map(|(idx, label)| (label.as_str().trim().to_owned(), idx))
            .collect();
        Self(columns)
    }

    fn position(&self, label: &'static str) -> AppResult<usize> {
        self.0
            .get(label)
            .copied()
            .ok_or_else(|| ErrorReason::ColumnNotFound(label).into())
    }
}

fn normalize_name(cell: &str) -> String {
    cell.replace(NBSP, "")
}

fn normalize_fingerprint(cell: &str) -> String {
    LINE_BREAK
        .replace_all(cell, "")
        .replace(NBSP, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
