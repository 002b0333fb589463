//! Scene and choice definitions - the static nodes of the story graph.

use serde::{Deserialize, Serialize};
use survival_rules::{meets, Condition, Effect, Mode, PlayerState};

/// Stable identifier of a scene in the story graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(pub String);

impl SceneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SceneId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Placeholder in scene text replaced with the current day.
pub const DAY_TOKEN: &str = "{day}";

/// An immutable node of the story graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Opaque background reference, passed through to the presentation layer.
    pub background: String,

    /// Narrative text. May contain [`DAY_TOKEN`].
    pub text: String,

    /// Ordered choices. Empty for the dispatch node and pure termini.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Scene {
    pub fn new(background: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            background: background.into(),
            text: text.into(),
            choices: Vec::new(),
        }
    }

    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Scene text with every `{day}` replaced by `day`.
    pub fn render_text(&self, day: i32) -> String {
        self.text.replace(DAY_TOKEN, &day.to_string())
    }

    /// Choices whose condition holds against `state`, in authored order.
    pub fn eligible_choices<'a, 's>(
        &'a self,
        state: &'s PlayerState,
    ) -> impl Iterator<Item = &'a Choice> + 's
    where
        'a: 's,
    {
        self.choices.iter().filter(move |choice| choice.is_eligible(state))
    }

    pub fn choice(&self, label: &str) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.label == label)
    }
}

/// A selectable action within a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Stable identifying label, unique within its scene.
    pub label: String,

    /// Display text, either shared by all modes or one per mode.
    pub text: ChoiceText,

    /// Gate evaluated on every visit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,

    #[serde(default)]
    pub effect: Effect,

    /// Target scene when no fatal ending interrupts.
    pub next: SceneId,
}

impl Choice {
    pub fn new(label: impl Into<String>, text: ChoiceText, next: impl Into<SceneId>) -> Self {
        Self {
            label: label.into(),
            text,
            condition: None,
            effect: Effect::default(),
            next: next.into(),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_effect(mut self, effect: impl Into<Effect>) -> Self {
        self.effect = effect.into();
        self
    }

    pub fn is_eligible(&self, state: &PlayerState) -> bool {
        meets(state, self.condition.as_ref())
    }

    pub fn display_text(&self, mode: Mode) -> &str {
        self.text.for_mode(mode)
    }
}

/// Choice text: one line for every mode, or a full per-mode set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceText {
    Plain(String),
    Variants(ModeTexts),
}

impl ChoiceText {
    pub fn plain(text: impl Into<String>) -> Self {
        ChoiceText::Plain(text.into())
    }

    pub fn for_mode(&self, mode: Mode) -> &str {
        match self {
            ChoiceText::Plain(text) => text,
            ChoiceText::Variants(texts) => texts.get(mode),
        }
    }
}

/// A line for each psychological mode. All four are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModeTexts {
    pub base: String,
    pub power: String,
    pub distance: String,
    pub broken: String,
}

impl ModeTexts {
    pub fn get(&self, mode: Mode) -> &str {
        match mode {
            Mode::Base => &self.base,
            Mode::Power => &self.power,
            Mode::Distance => &self.distance,
            Mode::Broken => &self.broken,
        }
    }
}
