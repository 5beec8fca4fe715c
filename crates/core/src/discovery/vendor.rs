//! Vendor identification table.
//!
//! Launchers from different distributions print different banners. The table
//! maps a regular expression over that text to a vendor name. It is plain
//! configuration data so hosts can extend it without touching the parser.

use crate::config::VendorPattern;
use crate::error::{JvmScopeError, Result};
use regex::Regex;

/// Built-in table. More specific distributions come before the generic
/// `OpenJDK` entry.
pub fn default_vendor_patterns() -> Vec<VendorPattern> {
    vec![
        VendorPattern::new("Eclipse Adoptium", r"(?i)temurin|adoptium"),
        VendorPattern::new("AdoptOpenJDK", r"(?i)adoptopenjdk"),
        VendorPattern::new("Azul Zulu", r"(?i)zulu|azul"),
        VendorPattern::new("Amazon Corretto", r"(?i)corretto|amazon"),
        VendorPattern::new("GraalVM", r"(?i)graalvm"),
        VendorPattern::new("Microsoft", r"(?i)microsoft"),
        VendorPattern::new("BellSoft Liberica", r"(?i)liberica|bellsoft"),
        VendorPattern::new("SAP SapMachine", r"(?i)sapmachine"),
        VendorPattern::new("IBM", r"(?i)\bibm\b|openj9|semeru"),
        VendorPattern::new("Oracle", r"Java\(TM\)|Oracle Corporation"),
        VendorPattern::new("OpenJDK", r"(?i)openjdk"),
    ]
}

/// Compiled vendor table.
#[derive(Debug, Clone)]
pub struct VendorTable {
    entries: Vec<(String, Regex)>,
}

impl VendorTable {
    pub fn compile(patterns: &[VendorPattern]) -> Result<Self> {
        let entries = patterns
            .iter()
            .map(|p| {
                Regex::new(&p.pattern)
                    .map(|re| (p.vendor.clone(), re))
                    .map_err(|source| JvmScopeError::VendorPattern {
                        vendor: p.vendor.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// First vendor whose pattern matches `evidence`.
    pub fn identify(&self, evidence: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, re)| re.is_match(evidence))
            .map(|(vendor, _)| vendor.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
