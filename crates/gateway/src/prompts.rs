//! Prompt builders. Each folds the heading context and document type into
//! the instructions so output matches the section being written.

use crate::request::EnhanceRequest;

const DEFAULT_DOCUMENT_TYPE: &str = "property inspection report";

fn document_type_or_default(document_type: Option<&str>) -> &str {
    document_type
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DOCUMENT_TYPE)
}

fn section_clause(heading_context: Option<&str>) -> String {
    match heading_context.map(str::trim).filter(|h| !h.is_empty()) {
        Some(heading) => format!(" The text belongs to the section \"{heading}\"."),
        None => String::new(),
    }
}

/// Asks for a factual caption for a photo.
pub fn photo_description_prompt(
    photo_data: &str,
    heading_context: Option<&str>,
    document_type: Option<&str>,
) -> EnhanceRequest {
    let doc = document_type_or_default(document_type);
    let system = format!(
        "You are a building surveyor writing a {doc}. Describe only what is visible, \
         in one or two factual sentences.{}",
        section_clause(heading_context)
    );
    EnhanceRequest::text(system, "Describe this photo for the report.").with_photo(photo_data)
}

/// Asks for a rewrite of a passage in professional report style.
pub fn text_enhancement_prompt(
    text: &str,
    heading_context: Option<&str>,
    document_type: Option<&str>,
) -> EnhanceRequest {
    let doc = document_type_or_default(document_type);
    let system = format!(
        "You edit passages of a {doc}. Improve clarity and grammar, keep every fact, \
         and return only the rewritten text.{}",
        section_clause(heading_context)
    );
    EnhanceRequest::text(system, text)
}

/// Asks for short topical tags as a JSON array.
pub fn tagging_prompt(
    image_data: &str,
    heading_context: Option<&str>,
    document_type: Option<&str>,
) -> EnhanceRequest {
    let doc = document_type_or_default(document_type);
    let system = format!(
        "You tag photos for a {doc}. Reply with a JSON array of 3 to 8 short lowercase \
         tags naming building elements, materials and defects.{}",
        section_clause(heading_context)
    );
    EnhanceRequest::text(system, "Tag this photo.").with_photo(image_data)
}
