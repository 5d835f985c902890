//! Two-stage decoding of stored review results.
//!
//! The service returns an outer [`ReviewRecord`] envelope whose
//! `ai_result_json` field is itself a serialized JSON document. The outer
//! shape is checked structurally when the HTTP response is parsed; this
//! module handles the second stage: picking the authoritative record and
//! decoding its payload into an [`AnalysisResult`].

use crate::error::{Error, Result};
use crate::types::{AnalysisResult, ReviewRecord};

/// Decode a serialized analysis payload.
///
/// Pure: the same input always yields the same result. Malformed or
/// schema-mismatched input is a decode failure, never a panic, and never
/// mistaken for "no result yet".
pub fn parse_analysis(payload: &str) -> Result<AnalysisResult> {
    serde_json::from_str(payload).map_err(|e| Error::Decode(e.to_string()))
}

/// Decode the most recent record of a non-empty result set.
///
/// Records arrive most recent first, so the first one is authoritative for
/// display. Callers treat an empty set as "pending" and are expected not to
/// get here with one.
pub fn decode_latest(records: &[ReviewRecord]) -> Result<AnalysisResult> {
    let record = records
        .first()
        .ok_or_else(|| Error::Internal("no review records to decode".to_string()))?;

    parse_analysis(&record.ai_result_json)
}
