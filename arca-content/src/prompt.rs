//! Prompt templates for story and quiz generation.
//!
//! The built-in templates are compiled in. A TOML file can replace either
//! of them without a rebuild:
//!
//! ```toml
//! [story]
//! template = "Conte uma história curta sobre {topic}..."
//!
//! [quiz]
//! template = "Crie 3 perguntas sobre {topic}..."
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ProviderError;

/// Story topics offered as one-click presets.
pub const STORY_TOPICS: [&str; 6] = [
    "Davi e Golias",
    "A Arca de Noé",
    "O Nascimento de Jesus",
    "Daniel na Cova dos Leões",
    "Jonas e o Grande Peixe",
    "A Parábola da Ovelha Perdida",
];

/// Placeholder replaced by the requested topic.
pub const TOPIC_PLACEHOLDER: &str = "{topic}";

/// Story prompt.
pub const STORY_TEMPLATE: &str = r#"Conte uma história bíblica infantil sobre: "{topic}".
A história deve ser envolvente, fácil de entender para crianças de 5 a 10 anos, e fiel aos ensinamentos bíblicos.
Use uma linguagem alegre e respeitosa.

Retorne um JSON com os campos:
- title: Um título criativo para a história.
- content: O texto da história (máximo 300 palavras), pode usar emojis.
- moral: Uma frase curta explicando o que aprendemos com essa história (A Lição de Hoje)."#;

/// Quiz prompt.
pub const QUIZ_TEMPLATE: &str = r#"Crie um quiz bíblico infantil com 3 perguntas sobre: "{topic}".
As perguntas devem ser adequadas para crianças.

Retorne um JSON estrito no seguinte formato:
{
  "questions": [
    {
      "question": "Texto da pergunta",
      "options": ["Opção 1", "Opção 2", "Opção 3", "Opção 4"],
      "correctAnswer": 0,
      "explanation": "Breve explicação amigável do porquê está correto."
    }
  ]
}
O campo correctAnswer é o índice da resposta correta (0 a 3)."#;

/// Simple template interpolation for prompts.
///
/// Replaces `{key}` with the corresponding value. Unknown placeholders are
/// left as they are.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

// ---------------------------------------------------------------------------
// PromptTemplates — built-ins with TOML overrides
// ---------------------------------------------------------------------------

/// Identifies a prompt template by purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptId {
    /// Bible story for children.
    Story,
    /// Three-question quiz.
    Quiz,
}

impl PromptId {
    /// All prompt IDs.
    #[must_use]
    pub fn all() -> &'static [PromptId] {
        &[Self::Story, Self::Quiz]
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Story => write!(f, "story"),
            Self::Quiz => write!(f, "quiz"),
        }
    }
}

impl FromStr for PromptId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "story" => Ok(Self::Story),
            "quiz" => Ok(Self::Quiz),
            _ => Err(format!("unknown prompt id: '{s}'")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlPromptFile {
    #[serde(default)]
    story: Option<TomlPrompt>,
    #[serde(default)]
    quiz: Option<TomlPrompt>,
}

#[derive(Debug, Deserialize)]
struct TomlPrompt {
    template: String,
}

/// The story and quiz templates in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    story: String,
    quiz: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PromptTemplates {
    /// The compiled-in templates.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            story: STORY_TEMPLATE.into(),
            quiz: QUIZ_TEMPLATE.into(),
        }
    }

    /// Built-ins with any sections present in `content` replacing them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the TOML is malformed or a template lacks
    /// the `{topic}` placeholder.
    pub fn from_toml(content: &str) -> Result<Self, ProviderError> {
        let parsed: TomlPromptFile = toml::from_str(content)
            .map_err(|e| ProviderError::ConfigError(format!("failed to parse prompts: {e}")))?;

        let mut templates = Self::builtin();
        for (id, section) in [(PromptId::Story, parsed.story), (PromptId::Quiz, parsed.quiz)] {
            let Some(section) = section else { continue };
            if !section.template.contains(TOPIC_PLACEHOLDER) {
                return Err(ProviderError::ConfigError(format!(
                    "prompt '{id}' has no {TOPIC_PLACEHOLDER} placeholder"
                )));
            }
            *templates.slot(id) = section.template;
        }
        Ok(templates)
    }

    /// Load overrides from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ProviderError::ConfigError(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// The raw template for `id`.
    #[must_use]
    pub fn get(&self, id: PromptId) -> &str {
        match id {
            PromptId::Story => &self.story,
            PromptId::Quiz => &self.quiz,
        }
    }

    /// Render the template for `id` with `topic` filled in.
    #[must_use]
    pub fn render(&self, id: PromptId, topic: &str) -> String {
        render_template(self.get(id), &[("topic", topic)])
    }

    fn slot(&mut self, id: PromptId) -> &mut String {
        match id {
            PromptId::Story => &mut self.story,
            PromptId::Quiz => &mut self.quiz,
        }
    }
}
