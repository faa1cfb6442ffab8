//! The subset of Slack Block Kit the digest renders.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Text {
    #[serde(rename = "plain_text")]
    Plain { text: String, emoji: bool },
    #[serde(rename = "mrkdwn")]
    Markdown { text: String },
}

impl Text {
    pub fn plain(text: impl Into<String>) -> Self {
        Text::Plain {
            text: text.into(),
            emoji: true,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Text::Markdown { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Text::Plain { text, .. } | Text::Markdown { text } => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Primary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "button")]
pub struct Button {
    pub text: Text,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ButtonStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header {
        text: Text,
    },
    Section {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<Text>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<Text>>,
    },
    Actions {
        elements: Vec<Button>,
    },
    Context {
        elements: Vec<Text>,
    },
    Divider,
}

impl Block {
    pub fn header(text: impl Into<String>) -> Self {
        Block::Header {
            text: Text::plain(text),
        }
    }

    pub fn text_section(markdown: impl Into<String>) -> Self {
        Block::Section {
            text: Some(Text::markdown(markdown)),
            fields: None,
        }
    }

    pub fn fields_section(fields: Vec<Text>) -> Self {
        Block::Section {
            text: None,
            fields: Some(fields),
        }
    }

    pub fn is_divider(&self) -> bool {
        matches!(self, Block::Divider)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_header_shape() {
        let value = serde_json::to_value(Block::header("Beta")).unwrap();
        assert_eq!(
            value,
            json!({"type": "header", "text": {"type": "plain_text", "text": "Beta", "emoji": true}})
        );
    }

    #[test]
    fn test_sections_omit_absent_parts() {
        let text = serde_json::to_value(Block::text_section("*hi*")).unwrap();
        assert_eq!(
            text,
            json!({"type": "section", "text": {"type": "mrkdwn", "text": "*hi*"}})
        );

        let fields =
            serde_json::to_value(Block::fields_section(vec![Text::markdown("a")])).unwrap();
        assert_eq!(
            fields,
            json!({"type": "section", "fields": [{"type": "mrkdwn", "text": "a"}]})
        );
    }

    #[test]
    fn test_divider_and_context() {
        assert_eq!(
            serde_json::to_value(Block::Divider).unwrap(),
            json!({"type": "divider"})
        );
        let context = Block::Context {
            elements: vec![Text::markdown("footer")],
        };
        assert_eq!(
            serde_json::to_value(context).unwrap(),
            json!({"type": "context", "elements": [{"type": "mrkdwn", "text": "footer"}]})
        );
    }

    #[test]
    fn test_buttons() {
        let actions = Block::Actions {
            elements: vec![
                Button {
                    text: Text::plain("View Milestone"),
                    url: "https://example.com/m".to_string(),
                    style: Some(ButtonStyle::Primary),
                },
                Button {
                    text: Text::plain("View Issues"),
                    url: "https://example.com/i".to_string(),
                    style: None,
                },
            ],
        };
        let value = serde_json::to_value(actions).unwrap();
        assert_eq!(value["type"], "actions");
        assert_eq!(value["elements"][0]["type"], "button");
        assert_eq!(value["elements"][0]["style"], "primary");
        assert!(value["elements"][1].get("style").is_none());
    }
}
