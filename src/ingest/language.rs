/// Decides the transcript language of a newly registered channel.
pub trait LanguagePolicy: Send + Sync {
    fn detect(&self, url: &str, channel_name: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct LanguageRule {
    pub language: String,
    /// Case-sensitive substrings looked for in the submitted URL
    pub url_markers: Vec<String>,
    /// Case-sensitive substrings looked for in the resolved channel name
    pub name_markers: Vec<String>,
}

/// First rule with a matching marker wins; otherwise `default_language`.
#[derive(Debug, Clone)]
pub struct KeywordLanguagePolicy {
    pub rules: Vec<LanguageRule>,
    pub default_language: String,
}

impl Default for KeywordLanguagePolicy {
    fn default() -> Self {
        Self {
            rules: vec![LanguageRule {
                language: "es".to_string(),
                url_markers: vec!["DotCSV".to_string()],
                name_markers: vec!["Español".to_string(), "Spanish".to_string()],
            }],
            default_language: "en".to_string(),
        }
    }
}

impl LanguagePolicy for KeywordLanguagePolicy {
    fn detect(&self, url: &str, channel_name: &str) -> String {
        self.rules
            .iter()
            .find(|rule| {
                rule.url_markers.iter().any(|m| url.contains(m.as_str()))
                    || rule.name_markers.iter().any(|m| channel_name.contains(m.as_str()))
            })
            .map(|rule| rule.language.clone())
            .unwrap_or_else(|| self.default_language.clone())
    }
}
