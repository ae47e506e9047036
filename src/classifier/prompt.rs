/// Only this many characters of a transcript are sent for classification.
pub const TRANSCRIPT_CHAR_LIMIT: usize = 4000;

pub const TRUNCATION_MARKER: &str = "...";

pub const SYSTEM_PROMPT: &str = "You are an expert analyst of artificial intelligence content. \
Your job is to categorize YouTube videos about AI and extract the relevant information from them.";

/// First [`TRANSCRIPT_CHAR_LIMIT`] characters of `transcript`, cut on a char boundary.
pub fn truncate_transcript(transcript: &str) -> &str {
    match transcript.char_indices().nth(TRANSCRIPT_CHAR_LIMIT) {
        Some((idx, _)) => &transcript[..idx],
        None => transcript,
    }
}

pub fn build_analysis_prompt(transcript: &str, video_title: &str, channel_name: &str) -> String {
    format!(
        r#"Analyze the following content from a YouTube video about artificial intelligence and return a JSON object with this structure:

{{
  "category": "TOOLS|NEWS|TUTORIAL|RESEARCH|STARTUP|UNCATEGORIZED",
  "priority": "LOW|MEDIUM|HIGH|CRITICAL",
  "summary": "Summary of the main content (2-3 sentences)",
  "tools": [
    {{
      "name": "Tool name",
      "description": "Short description",
      "category": "VIDEO|IMAGE|TEXT|AUDIO|CODE|DATA|DESIGN|PRODUCTIVITY|OTHER",
      "url": "URL if mentioned",
      "pricing": "Pricing information if mentioned",
      "features": ["feature1", "feature2"]
    }}
  ],
  "news": [
    {{
      "title": "News title",
      "summary": "News summary",
      "importance": "LOW|MEDIUM|HIGH|CRITICAL"
    }}
  ]
}}

**Categorization criteria:**
- TOOLS: demonstrates specific AI tools
- NEWS: sector news, launches, updates
- TUTORIAL: step-by-step how-to
- RESEARCH: papers, research, techniques
- STARTUP: companies, investment, market
- UNCATEGORIZED: none of the above

**Priority criteria:**
- CRITICAL: disruptive major launches
- HIGH: very useful tools, relevant news
- MEDIUM: interesting but not urgent
- LOW: filler or niche content

**Video information:**
- Channel: {channel_name}
- Title: {video_title}
- Transcript: {transcript}{marker}

Respond ONLY with valid JSON, no additional text.
"#,
        channel_name = channel_name,
        video_title = video_title,
        transcript = truncate_transcript(transcript),
        marker = TRUNCATION_MARKER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_transcript_is_untouched() {
        assert_eq!(truncate_transcript("hello"), "hello");
    }

    #[test]
    fn test_long_transcript_is_cut_at_limit() {
        let transcript = format!("{}{}", "a".repeat(TRANSCRIPT_CHAR_LIMIT), "TAIL");
        let cut = truncate_transcript(&transcript);
        assert_eq!(cut.chars().count(), TRANSCRIPT_CHAR_LIMIT);
        assert!(!cut.contains("TAIL"));
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let transcript = "ñ".repeat(TRANSCRIPT_CHAR_LIMIT + 10);
        let cut = truncate_transcript(&transcript);
        assert_eq!(cut.chars().count(), TRANSCRIPT_CHAR_LIMIT);
    }

    #[test]
    fn test_prompt_carries_context_and_marker() {
        let transcript = format!("{}XYZ", "b".repeat(TRANSCRIPT_CHAR_LIMIT));
        let prompt = build_analysis_prompt(&transcript, "GPT-5 is here", "Example AI");

        assert!(prompt.contains("- Channel: Example AI"));
        assert!(prompt.contains("- Title: GPT-5 is here"));
        assert!(prompt.contains(&format!("{}...", "b".repeat(TRANSCRIPT_CHAR_LIMIT))));
        assert!(!prompt.contains("XYZ"));
        assert!(prompt.contains("- STARTUP: companies, investment, market"));
    }
}
