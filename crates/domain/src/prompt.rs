//! Prompt construction for community topic labeling

use crate::model::CompletionRequest;

/// System message sent ahead of every labeling prompt
pub const SYSTEM_PROMPT: &str =
    "You are a research assistant helping a professor with their research on machine learning.";

const PROMPT_HEAD: &str = "Here is a list of the top 50 hubs and top 50 authorities by score for a research community in a paper citation network:

<hubs_and_authorities>
";

const PROMPT_TAIL: &str = r#"
</hubs_and_authorities>

Please carefully analyze the titles of the hubs and authorities to determine the main research topic that this community appears to be focused on.

Then, write a 100-200 word description of this research area. The description should provide an overview of the main problems, methods, and goals of the research area for a general scientific audience. Do not copy text verbatim from the hubs and authorities titles, but rather synthesize the information to provide a coherent summary in your own words.

Then, write a one sentence summary of the key research topic. Maximum 10 words.

Return a json object with the following structure:
{
  "description": "",
  "topic": ""
}
"#;

/// Render the labeling prompt, embedding `papers` verbatim
pub fn build_topic_prompt(papers: &str) -> String {
    let mut prompt = String::with_capacity(PROMPT_HEAD.len() + papers.len() + PROMPT_TAIL.len());
    prompt.push_str(PROMPT_HEAD);
    prompt.push_str(papers);
    prompt.push_str(PROMPT_TAIL);
    prompt
}

/// Build the completion request for one community
pub fn build_topic_request(papers: &str) -> CompletionRequest {
    CompletionRequest {
        system: SYSTEM_PROMPT.to_string(),
        user: build_topic_prompt(papers),
        json_output: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_papers_verbatim() {
        let papers = "Hubs:\n1. Attention Is All You Need\n2. {weird} \"quoted\" title\n\nAuthorities:\n1. Deep Residual Learning";
        let prompt = build_topic_prompt(papers);

        let expected = format!("<hubs_and_authorities>\n{}\n</hubs_and_authorities>", papers);
        assert!(prompt.contains(&expected));
    }

    #[test]
    fn test_prompt_asks_for_description_and_topic_keys() {
        let prompt = build_topic_prompt("papers");
        assert!(prompt.contains("\"description\""));
        assert!(prompt.contains("\"topic\""));
        assert!(prompt.contains("100-200 word"));
        assert!(prompt.contains("Maximum 10 words"));
    }

    #[test]
    fn test_request_requires_json_output() {
        let request = build_topic_request("papers");
        assert_eq!(request.system, SYSTEM_PROMPT);
        assert!(request.json_output);
        assert!(request.user.contains("papers"));
    }
}
