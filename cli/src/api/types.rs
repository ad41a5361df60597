use serde::{Deserialize, Deserializer, Serialize};

/// Snippet record returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snippet {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "shortId")]
    pub short_id: String,
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub language: String,
    pub code: String,
    /// Relative install path suggested by the author
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Snippet {
    /// Whether `id` names this snippet, either by server id or short id.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id == id || (!self.short_id.is_empty() && self.short_id == id)
    }

    /// Identifier shown to users; the short id when the server provides one.
    pub fn display_id(&self) -> &str {
        if self.short_id.is_empty() {
            &self.id
        } else {
            &self.short_id
        }
    }
}

/// Response wrapper shared by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Fetch payload. Older API revisions wrap the single snippet in a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SnippetPayload {
    One(Snippet),
    Many(Vec<Snippet>),
}

impl SnippetPayload {
    pub fn into_snippet(self) -> Option<Snippet> {
        match self {
            SnippetPayload::One(snippet) => Some(snippet),
            SnippetPayload::Many(snippets) => snippets.into_iter().next(),
        }
    }
}

/// Filters for a snippet search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub lang: Option<String>,
    pub tag: Option<String>,
    pub limit: usize,
}

impl SearchQuery {
    pub const DEFAULT_LIMIT: usize = 10;

    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            lang: None,
            tag: None,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn with_lang(mut self, lang: Option<String>) -> Self {
        self.lang = lang.filter(|l| !l.trim().is_empty());
        self
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// URL parameters in the order the service expects them.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", self.query.trim().to_string())];
        if let Some(lang) = &self.lang {
            params.push(("lang", lang.clone()));
        }
        if let Some(tag) = &self.tag {
            params.push(("tag", tag.clone()));
        }
        params.push(("limit", self.limit.to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_wire_names() {
        let json = r#"{
            "_id": "65f0c2",
            "shortId": "abc123",
            "title": "Button",
            "description": "A button",
            "language": "tsx",
            "code": "export const Button = () => null;",
            "path": "components/ui/button.tsx",
            "tags": ["ui", "shadcnui"]
        }"#;

        let snippet: Snippet = serde_json::from_str(json).unwrap();
        assert_eq!(snippet.id, "65f0c2");
        assert_eq!(snippet.short_id, "abc123");
        assert_eq!(snippet.path, "components/ui/button.tsx");
        assert_eq!(snippet.tags, vec!["ui", "shadcnui"]);
    }

    #[test]
    fn test_snippet_missing_fields_default() {
        let snippet: Snippet =
            serde_json::from_str(r#"{"_id": "abc123", "title": "x", "language": "go", "code": "package main"}"#)
                .unwrap();
        assert!(snippet.path.is_empty());
        assert!(snippet.tags.is_empty());
        assert_eq!(snippet.display_id(), "abc123");
    }

    #[test]
    fn test_matches_either_id() {
        let snippet = Snippet {
            id: "65f0c2".to_string(),
            short_id: "abc123".to_string(),
            ..Snippet::default()
        };
        assert!(snippet.matches_id("65f0c2"));
        assert!(snippet.matches_id("abc123"));
        assert!(!snippet.matches_id("zzz"));
    }

    #[test]
    fn test_envelope_without_data() {
        let envelope: Envelope<Snippet> =
            serde_json::from_str(r#"{"success": false, "error": "Invalid API key"}"#).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.error.as_deref(), Some("Invalid API key"));
    }

    #[test]
    fn test_null_path_and_tags() {
        let snippet: Snippet =
            serde_json::from_str(r#"{"_id": "a", "path": null, "tags": null}"#).unwrap();
        assert!(snippet.path.is_empty());
        assert!(snippet.tags.is_empty());
    }

    #[test]
    fn test_payload_accepts_object_or_list() {
        let one: Envelope<SnippetPayload> =
            serde_json::from_str(r#"{"success": true, "data": {"_id": "a"}}"#).unwrap();
        assert_eq!(one.data.unwrap().into_snippet().unwrap().id, "a");

        let many: Envelope<SnippetPayload> =
            serde_json::from_str(r#"{"success": true, "data": [{"_id": "b"}]}"#).unwrap();
        assert_eq!(many.data.unwrap().into_snippet().unwrap().id, "b");

        let empty: Envelope<SnippetPayload> =
            serde_json::from_str(r#"{"success": true, "data": []}"#).unwrap();
        assert!(empty.data.unwrap().into_snippet().is_none());
    }

    #[test]
    fn test_search_params_skip_empty_filters() {
        let query = SearchQuery::new(" button ")
            .with_lang(Some("".to_string()))
            .with_tag(Some("ui".to_string()))
            .with_limit(5);

        assert_eq!(
            query.params(),
            vec![
                ("q", "button".to_string()),
                ("tag", "ui".to_string()),
                ("limit", "5".to_string()),
            ]
        );
    }
}
