//! LLM prompt engineering for claim extraction

use argus_domain::Item;

/// Builds prompts for the LLM to extract claims
pub struct PromptBuilder<'a> {
    item: &'a Item,
    max_text_length: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder for one item
    pub fn new(item: &'a Item, max_text_length: usize) -> Self {
        Self {
            item,
            max_text_length,
        }
    }

    /// The fixed instruction prompt: taxonomy and required JSON shape
    pub fn system_prompt(&self) -> &'static str {
        EXTRACTION_INSTRUCTIONS
    }

    /// Build the per-item user prompt: metadata plus the text to analyze
    pub fn user_prompt(&self) -> String {
        let mut prompt = String::new();

        if let Some(title) = &self.item.title {
            prompt.push_str(&format!("Title: {}\n", title));
        }
        if let Some(url) = &self.item.url {
            prompt.push_str(&format!("URL: {}\n", url));
        }
        prompt.push_str(&format!("Content type: {}\n", self.item.item_type.as_str()));
        if let Some(published_at) = self.item.published_at {
            prompt.push_str(&format!("Published at (unix): {}\n", published_at));
        }
        prompt.push('\n');

        prompt.push_str("Text to analyze:\n");
        prompt.push_str("---\n");
        prompt.push_str(self.truncated_body());
        prompt.push_str("\n---\n\n");

        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }

    /// Body truncated to the configured bound, on a char boundary
    fn truncated_body(&self) -> &str {
        let body = &self.item.body;
        if body.len() <= self.max_text_length {
            return body;
        }
        let mut end = self.max_text_length;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        &body[..end]
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You extract atomic, falsifiable claims from crypto-related news and social content.

Each claim must be one of these types:
- regulatory_action: a regulator or government action (enforcement, approval, ban)
- exploit_or_hack: a protocol exploit, hack, or theft of funds
- price_prediction: a prediction about future asset price
- listing: an exchange listing or delisting
- partnership: a partnership or integration between projects/companies
- onchain_activity: an observable on-chain event (transfer, mint, upgrade)
- rumor: an unattributed or speculative assertion
- misc_claim: anything falsifiable that fits no other type

Each claim must follow this JSON shape:

{
  "text": "single falsifiable assertion in plain language",
  "claim_type": "one of the types above",
  "assets": ["BTC", "ETH"],
  "asserted_at": 1700000000,
  "resolution_type": "immediate|scheduled|indefinite",
  "resolve_by": 1710000000,
  "falsifiability": 0.0-1.0,
  "confidence": 0.0-1.0,
  "notes": "optional context"
}

Rules:
- One idea per claim; split compound statements
- Only include assertions that could in principle be proven true or false
- assets is the list of ticker symbols the claim is about; empty if none
- resolution_type is "immediate" if verifiable now, "scheduled" if verifiable
  by a known deadline (set resolve_by to that unix time), "indefinite" otherwise
- falsifiability is how checkable the claim is; a dated price target is high,
  a vague "big news soon" is low
- confidence is how likely the claim is true given only this content - if the
  source hedges ("reportedly", "rumor has it"), lower it
- asserted_at is the unix time the assertion was made, if the text gives one
- Do not invent claims the text does not make"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (JSON array only, no additional text):
[
  {
    "text": "...",
    "claim_type": "...",
    "assets": [],
    "asserted_at": null,
    "resolution_type": "...",
    "resolve_by": null,
    "falsifiability": 0.0-1.0,
    "confidence": 0.0-1.0,
    "notes": null
  }
]

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;
