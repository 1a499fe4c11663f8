//! Ordered multimodal prompt assembly.
//!
//! The sequence layout is fixed and significant: instruction block, existing
//! profile context, transcript, then one part per evidence item in
//! submission order. Test fixtures depend on this ordering.

use serde_json::Value as JsonValue;

use wealthsync_core::{ClassifiedEvidence, PromptPart};

/// Directive used when an existing profile context is supplied.
const INCORPORATE_DIRECTIVE: &str =
    "Incorporate these new details into the existing client profile provided below.";

/// Directive used for a fresh analysis.
const CREATE_DIRECTIVE: &str = "Create a new comprehensive financial analysis.";

/// The required JSON shape the model must emit, embedded verbatim in the
/// instruction block. The note_on_totals rule keeps recurring contributions
/// as stated periodic sums rather than projected lump values.
const JSON_CONTRACT: &str = r#"REQUIRED JSON STRUCTURE:
{
  "client_profile": { "name": "String", "risk_tolerance": "Conservative/Moderate/Aggressive", "life_stage": "String", "potential_rank": number },
  "financial_snapshot": { "net_worth": "String", "monthly_burn": "String", "savings_rate": "String", "total_assets_value": "String" },
  "assets_detail": [
    { "type": "Mutual Fund/Property/Jewellery/SIP", "value": "String", "description": "String" }
  ],
  "category_totals": [
    { "type": "String", "total_value": "String" }
  ],
  "note_on_totals": "For SIPs, total_value should be the SUM of monthly amounts (e.g., '50,000/month'). Do NOT multiply monthly amounts by assumed tenures to create large 'Lakh' values unless explicitly stated in documents.",
  "goals_detected": [
    { "goal": "String", "timeline": "String", "feasibility": "High/Medium/Low" }
  ],
  "key_risks": ["Risk 1", "Risk 2"],
  "strategic_roadmap": [
    { "step": "1", "action": "String", "reasoning": "String" }
  ],
  "portfolio_allocation": [
    { "category": "String", "percentage": number }
  ],
  "insurance_analysis": {
    "life_insurance": { "status": "Detected/Not Found", "coverage_amount": "String", "is_sufficient": boolean, "gap_details": "String" },
    "health_insurance": { "status": "Detected/Not Found", "coverage_amount": "String", "is_sufficient": boolean, "gap_details": "String" },
    "rm_suggestion": "String"
  }
}"#;

/// Build the instruction block that opens every analysis prompt.
fn instruction_block(has_profile_context: bool) -> String {
    let directive = if has_profile_context {
        INCORPORATE_DIRECTIVE
    } else {
        CREATE_DIRECTIVE
    };

    format!(
        "You are an elite Wealth Manager. Analyze the attached client documents, \
         whiteboard photos, and audio.\n{}\n\n\
         Output a comprehensive financial analysis in strict JSON format.\n\
         You must detect specific assets like Mutual Funds, Jewellery, Properties, \
         and SIPs if mentioned.\n\
         You must also calculate a 'potential_rank' (1-10) based on their net worth, \
         assets, and investable surplus.\n\n{}",
        directive, JSON_CONTRACT
    )
}

/// Assemble the ordered prompt sequence for one analysis call.
///
/// Unsupported evidence contributes nothing; the processor has already
/// accounted for it.
pub fn assemble(
    existing_profile: Option<&JsonValue>,
    transcript: Option<&str>,
    evidence: &[ClassifiedEvidence],
) -> Vec<PromptPart> {
    let mut parts = Vec::with_capacity(evidence.len() + 3);

    parts.push(PromptPart::Text(instruction_block(
        existing_profile.is_some(),
    )));

    if let Some(profile) = existing_profile {
        parts.push(PromptPart::Text(format!(
            "EXISTING CLIENT DATA (CONTEXT):\n{}",
            profile
        )));
    }

    if let Some(transcript) = transcript {
        parts.push(PromptPart::Text(format!(
            "MEETING TRANSCRIPT:\n{}",
            transcript
        )));
    }

    for item in evidence {
        match item {
            ClassifiedEvidence::Image { media_type, bytes } => {
                parts.push(PromptPart::InlineImage {
                    media_type: media_type.clone(),
                    bytes: bytes.clone(),
                });
            }
            ClassifiedEvidence::RemoteFile(handle) => {
                parts.push(PromptPart::FileRef(handle.clone()));
            }
            ClassifiedEvidence::InlineText { filename, text } => {
                parts.push(PromptPart::Text(format!(
                    "Content from {}:\n{}",
                    filename, text
                )));
            }
            ClassifiedEvidence::Unsupported { .. } => {}
        }
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wealthsync_core::RemoteFileHandle;

    fn image() -> ClassifiedEvidence {
        ClassifiedEvidence::Image {
            media_type: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        }
    }

    fn remote_pdf() -> ClassifiedEvidence {
        ClassifiedEvidence::RemoteFile(RemoteFileHandle {
            uri: "files/abc-123".to_string(),
            media_type: "application/pdf".to_string(),
            display_name: "statement.pdf".to_string(),
        })
    }

    fn text_part(parts: &[PromptPart], idx: usize) -> &str {
        match &parts[idx] {
            PromptPart::Text(t) => t,
            other => panic!("part {} is not text: {:?}", idx, other),
        }
    }

    #[test]
    fn full_scenario_ordering() {
        // Two evidence items (.jpg then .pdf) plus transcript and an
        // existing profile: instruction, context, transcript, image, file.
        let profile = json!({"client_profile": {"name": "Jane Doe"}});
        let evidence = vec![image(), remote_pdf()];

        let parts = assemble(
            Some(&profile),
            Some("Discussed retirement at 55."),
            &evidence,
        );

        assert_eq!(parts.len(), 5);
        assert!(text_part(&parts, 0).contains("Incorporate these new details"));
        assert!(text_part(&parts, 1).starts_with("EXISTING CLIENT DATA (CONTEXT):"));
        assert!(text_part(&parts, 1).contains("Jane Doe"));
        assert!(text_part(&parts, 2).contains("Discussed retirement at 55."));
        assert!(matches!(parts[3], PromptPart::InlineImage { .. }));
        assert!(matches!(parts[4], PromptPart::FileRef(_)));
    }

    #[test]
    fn no_profile_uses_create_directive() {
        let parts = assemble(None, None, &[]);
        assert_eq!(parts.len(), 1);
        let instruction = text_part(&parts, 0);
        assert!(instruction.contains("Create a new comprehensive financial analysis."));
        assert!(!instruction.contains("Incorporate these new details"));
    }

    #[test]
    fn instruction_embeds_json_contract_and_totals_rule() {
        let parts = assemble(None, None, &[]);
        let instruction = text_part(&parts, 0);
        assert!(instruction.contains("REQUIRED JSON STRUCTURE:"));
        assert!(instruction.contains("\"insurance_analysis\""));
        assert!(instruction.contains("Do NOT multiply monthly amounts by assumed tenures"));
    }

    #[test]
    fn evidence_order_is_submission_order_not_type_order() {
        let evidence = vec![
            remote_pdf(),
            ClassifiedEvidence::InlineText {
                filename: "notes.txt".to_string(),
                text: "cash reserves 12L".to_string(),
            },
            image(),
        ];

        let parts = assemble(None, None, &evidence);
        assert_eq!(parts.len(), 4);
        assert!(matches!(parts[1], PromptPart::FileRef(_)));
        assert_eq!(
            text_part(&parts, 2),
            "Content from notes.txt:\ncash reserves 12L"
        );
        assert!(matches!(parts[3], PromptPart::InlineImage { .. }));
    }

    #[test]
    fn unsupported_items_contribute_nothing() {
        let evidence = vec![
            ClassifiedEvidence::Unsupported {
                filename: "blob.xyz".to_string(),
            },
            image(),
        ];

        let parts = assemble(None, None, &evidence);
        assert_eq!(parts.len(), 2);
        assert!(matches!(parts[1], PromptPart::InlineImage { .. }));
    }

    #[test]
    fn transcript_without_profile_sits_directly_after_instruction() {
        let parts = assemble(None, Some("short sync"), &[]);
        assert_eq!(parts.len(), 2);
        assert!(text_part(&parts, 0).contains("Create a new"));
        assert_eq!(text_part(&parts, 1), "MEETING TRANSCRIPT:\nshort sync");
    }
}
