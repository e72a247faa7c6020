/// Prompt template with `{{context}}` and `{{query}}` placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub system: String,
    pub user: String,
}

impl PromptTemplate {
    #[must_use]
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }

    /// Substitute context and query into the template and render the
    /// full prompt text.
    #[must_use]
    pub fn build(&self, context: &str, query: &str) -> String {
        let user = self
            .user
            .replace("{{context}}", context)
            .replace("{{query}}", query);
        format!("System: {}\n\nUser: {}", self.system, user)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            system: "You are a helpful assistant that answers questions based on the provided context."
                .to_string(),
            user: "Context: {{context}}\n\nQuestion: {{query}}\n\nAnswer:".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_substitution() {
        let template = PromptTemplate::default();
        let prompt = template.build("cats sit on mats", "where do cats sit?");
        assert!(prompt.starts_with("System: You are a helpful assistant"));
        assert!(prompt.contains("Context: cats sit on mats"));
        assert!(prompt.contains("Question: where do cats sit?"));
        assert!(prompt.trim_end().ends_with("Answer:"));
    }

    #[test]
    fn test_placeholders_replaced_everywhere() {
        let template = PromptTemplate::new("sys", "{{query}} / {{context}} / {{query}}");
        let prompt = template.build("C", "Q");
        assert_eq!(prompt, "System: sys\n\nUser: Q / C / Q");
    }
}
