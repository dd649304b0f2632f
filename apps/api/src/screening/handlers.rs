//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::parse_skill_list;
use crate::errors::AppError;
use crate::models::document::{CandidateInput, Document, ExtractionFailure};
use crate::screening::attributes::AttributeExtractor;
use crate::screening::extraction::extract_candidate;
use crate::screening::normalizer::require_text;
use crate::screening::pipeline::{screen, ScreeningOptions, ScreeningReport};
use crate::state::AppState;

const REFERENCE_ID: &str = "job-description";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CandidatePayload {
    /// Defaults to `resume-N` (1-based submission position).
    pub id: Option<String>,
    /// `null` marks a document whose text could not be extracted upstream.
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScreeningRequest {
    /// `null` or missing means the reference could not be obtained and the
    /// run is aborted. An empty string is scored normally (everything 0).
    pub reference_text: Option<String>,
    #[serde(default)]
    pub candidates: Vec<CandidatePayload>,
    pub skills: Option<Vec<String>>,
    pub shortlist_size: Option<usize>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screenings
///
/// Ranks already-extracted candidate texts against a reference text.
/// A reference with no vocabulary terms scores every candidate 0.
pub async fn handle_screen(
    State(state): State<AppState>,
    Json(request): Json<ScreeningRequest>,
) -> Result<Json<ScreeningReport>, AppError> {
    let reference_text =
        require_text(REFERENCE_ID, request.reference_text).map_err(reference_unreadable)?;

    let options = build_options(&state, request.skills, request.shortlist_size);
    let reference = Document::new(REFERENCE_ID, 0, reference_text);
    let candidates = request
        .candidates
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let id = c.id.unwrap_or_else(|| default_candidate_id(i));
            CandidateInput::from_optional(id, c.text)
        })
        .collect();

    Ok(Json(screen(&reference, candidates, &options)))
}

/// POST /api/v1/screenings/upload
///
/// Multipart form: one `reference` PDF, any number of `candidate` PDFs and an
/// optional comma-separated `skills` field. Only the first page of each PDF
/// is read. An unreadable reference aborts the run; an unreadable candidate
/// is reported in `failures`.
pub async fn handle_screen_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningReport>, AppError> {
    let mut reference: Option<(String, Vec<u8>)> = None;
    let mut uploads: Vec<(String, Vec<u8>)> = Vec::new();
    let mut skills: Option<Vec<String>> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "reference" => {
                if reference.is_some() {
                    return Err(AppError::Validation(
                        "exactly one reference document is allowed".to_string(),
                    ));
                }
                let id = field
                    .file_name()
                    .map(String::from)
                    .unwrap_or_else(|| REFERENCE_ID.to_string());
                reference = Some((id, field.bytes().await?.to_vec()));
            }
            "candidate" => {
                let id = field
                    .file_name()
                    .map(String::from)
                    .unwrap_or_else(|| default_candidate_id(uploads.len()));
                uploads.push((id, field.bytes().await?.to_vec()));
            }
            "skills" => {
                skills = Some(parse_skill_list(&field.text().await?));
            }
            other => debug!("Ignoring unknown upload field '{other}'"),
        }
    }

    let (reference_id, reference_bytes) = reference.ok_or_else(|| {
        AppError::Validation("a reference document is required".to_string())
    })?;

    info!(
        "Received upload: reference '{reference_id}' and {} candidates",
        uploads.len()
    );

    let reference_text = extract_candidate(reference_id.clone(), reference_bytes)
        .await
        .text
        .map_err(reference_unreadable)?;
    let reference = Document::new(reference_id, 0, reference_text);

    let mut candidates = Vec::with_capacity(uploads.len());
    for (id, bytes) in uploads {
        candidates.push(extract_candidate(id, bytes).await);
    }

    let options = build_options(&state, skills, None);
    Ok(Json(screen(&reference, candidates, &options)))
}

fn build_options(
    state: &AppState,
    skills: Option<Vec<String>>,
    shortlist_size: Option<usize>,
) -> ScreeningOptions {
    let skills = skills
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| state.config.skills.clone());
    ScreeningOptions {
        extractor: AttributeExtractor::new(&skills, state.numeric_rules.as_ref().clone()),
        shortlist_size: shortlist_size.unwrap_or(state.config.shortlist_size),
    }
}

/// Without a reference there is nothing to rank against; the run aborts.
fn reference_unreadable(failure: ExtractionFailure) -> AppError {
    AppError::UnprocessableEntity(format!(
        "could not read reference '{}': {}",
        failure.candidate_id, failure.reason
    ))
}

fn default_candidate_id(index: usize) -> String {
    format!("resume-{}", index + 1)
}
