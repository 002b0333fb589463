//! Story graph - the read-only table of scenes the engine walks.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::{Scene, SceneId};
use crate::config::EngineConfig;
use crate::error::ContentError;
use survival_rules::Ending;

/// All scenes of a story, keyed by id.
///
/// Loaded once and never mutated by sessions; sessions borrow it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoryGraph {
    scenes: HashMap<SceneId, Scene>,
}

impl StoryGraph {
    /// Create a new empty story graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a story from JSON: `{ "scenes": { "<id>": { ... } } }`.
    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a story from TOML: one `[scenes.<id>]` table per scene.
    pub fn from_toml_str(source: &str) -> Result<Self, ContentError> {
        Ok(toml::from_str(source)?)
    }

    /// Add or replace a scene.
    pub fn insert(&mut self, id: impl Into<SceneId>, scene: Scene) -> Option<Scene> {
        self.scenes.insert(id.into(), scene)
    }

    pub fn with_scene(mut self, id: impl Into<SceneId>, scene: Scene) -> Self {
        self.insert(id, scene);
        self
    }

    pub fn scene(&self, id: &SceneId) -> Option<&Scene> {
        self.scenes.get(id)
    }

    pub fn contains(&self, id: &SceneId) -> bool {
        self.scenes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scene ids in sorted order.
    pub fn scene_ids(&self) -> Vec<&SceneId> {
        let mut ids: Vec<_> = self.scenes.keys().collect();
        ids.sort();
        ids
    }

    /// Report authoring problems without rejecting the story.
    ///
    /// The dispatch id counts as a valid target even when it has no scene.
    pub fn validate(&self, config: &EngineConfig) -> Vec<ContentIssue> {
        let mut issues = Vec::new();

        for (role, id) in [
            ("start", &config.start_scene),
            ("day loop", &config.day_loop_scene),
        ] {
            if !self.contains(id) {
                issues.push(ContentIssue::MissingScene {
                    role,
                    id: id.clone(),
                });
            }
        }

        for ending in Ending::ALL {
            if ending.reachable_in(config.ruleset) && !self.contains(&SceneId::from(ending.scene_id()))
            {
                issues.push(ContentIssue::MissingEnding { ending });
            }
        }

        for id in self.scene_ids() {
            let scene = &self.scenes[id];
            let mut seen = HashSet::new();

            for choice in &scene.choices {
                if !seen.insert(choice.label.as_str()) {
                    issues.push(ContentIssue::DuplicateLabel {
                        scene: id.clone(),
                        label: choice.label.clone(),
                    });
                }
                if choice.next != config.resolve_scene && !self.contains(&choice.next) {
                    issues.push(ContentIssue::DanglingTarget {
                        scene: id.clone(),
                        label: choice.label.clone(),
                        next: choice.next.clone(),
                    });
                }
            }
        }

        issues
    }
}

/// A problem found by [`StoryGraph::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIssue {
    /// A scene the configuration relies on is absent.
    MissingScene { role: &'static str, id: SceneId },
    /// An ending reachable under the configured ruleset has no scene.
    MissingEnding { ending: Ending },
    /// A choice points at a scene that does not exist.
    DanglingTarget {
        scene: SceneId,
        label: String,
        next: SceneId,
    },
    DuplicateLabel { scene: SceneId, label: String },
}

impl std::fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentIssue::MissingScene { role, id } => {
                write!(f, "{} scene '{}' is not in the story", role, id)
            }
            ContentIssue::MissingEnding { ending } => {
                write!(f, "ending scene '{}' is not in the story", ending.scene_id())
            }
            ContentIssue::DanglingTarget { scene, label, next } => write!(
                f,
                "choice '{}' in '{}' leads to missing scene '{}'",
                label, scene, next
            ),
            ContentIssue::DuplicateLabel { scene, label } => {
                write!(f, "scene '{}' has more than one choice labelled '{}'", scene, label)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Choice, ChoiceText};

    fn ending_scenes(graph: StoryGraph) -> StoryGraph {
        Ending::ALL.into_iter().fold(graph, |graph, ending| {
            graph.with_scene(
                ending.scene_id(),
                Scene::new("bg.jpg", "The end.").with_choice(Choice::new(
                    "restart",
                    ChoiceText::plain("From the beginning"),
                    "prologue",
                )),
            )
        })
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut graph = StoryGraph::new();
        graph.insert("prologue", Scene::new("bg.jpg", "It rained."));

        assert!(graph.contains(&SceneId::from("prologue")));
        assert_eq!(graph.scene(&SceneId::from("prologue")).unwrap().text, "It rained.");
        assert!(graph.scene(&SceneId::from("nowhere")).is_none());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_from_json() {
        let graph = StoryGraph::from_json_str(
            r#"{
                "scenes": {
                    "prologue": {
                        "background": "bg.jpg",
                        "text": "It rained.",
                        "choices": [
                            {"label": "go", "text": "Go", "next": "day_start",
                             "condition": {"power_gte": 1}}
                        ]
                    },
                    "day_start": {"background": "bg.jpg", "text": "Day {day}."}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(graph.len(), 2);
        let prologue = graph.scene(&SceneId::from("prologue")).unwrap();
        assert_eq!(prologue.choices.len(), 1);
        assert!(prologue.choices[0].condition.is_some());
    }

    #[test]
    fn test_malformed_content_is_an_error() {
        let unknown_stat = r#"{"scenes": {"a": {"background": "", "text": "",
            "choices": [{"label": "x", "text": "X", "next": "a",
                         "effect": {"apply": {"morale": 1}}}]}}}"#;
        assert!(matches!(
            StoryGraph::from_json_str(unknown_stat),
            Err(ContentError::Json(_))
        ));

        let bad_condition = "[scenes.a]\nbackground = \"\"\ntext = \"\"\n\
            [[scenes.a.choices]]\nlabel = \"x\"\ntext = \"X\"\nnext = \"a\"\n\
            condition = { power_above = 1 }\n";
        assert!(matches!(
            StoryGraph::from_toml_str(bad_condition),
            Err(ContentError::Toml(_))
        ));
    }

    #[test]
    fn test_validate_clean_graph() {
        let graph = ending_scenes(
            StoryGraph::new()
                .with_scene(
                    "prologue",
                    Scene::new("bg.jpg", "It rained.").with_choice(Choice::new(
                        "go",
                        ChoiceText::plain("Go"),
                        "day_start",
                    )),
                )
                .with_scene(
                    "day_start",
                    Scene::new("bg.jpg", "Day {day}.").with_choice(Choice::new(
                        "sleep",
                        ChoiceText::plain("Sleep"),
                        "resolve_end",
                    )),
                ),
        );

        assert_eq!(graph.validate(&EngineConfig::default()), Vec::new());
    }

    #[test]
    fn test_validate_reports_problems() {
        let graph = StoryGraph::new().with_scene(
            "prologue",
            Scene::new("bg.jpg", "It rained.")
                .with_choice(Choice::new("go", ChoiceText::plain("Go"), "warehouse_1"))
                .with_choice(Choice::new("go", ChoiceText::plain("Go again"), "prologue")),
        );

        let issues = graph.validate(&EngineConfig::default());

        assert!(issues.contains(&ContentIssue::MissingScene {
            role: "day loop",
            id: SceneId::from("day_start"),
        }));
        assert!(issues.contains(&ContentIssue::MissingEnding {
            ending: Ending::Dead
        }));
        assert!(!issues.contains(&ContentIssue::MissingEnding {
            ending: Ending::Together
        }));
        assert!(issues.contains(&ContentIssue::DanglingTarget {
            scene: SceneId::from("prologue"),
            label: "go".to_string(),
            next: SceneId::from("warehouse_1"),
        }));
        assert!(issues.contains(&ContentIssue::DuplicateLabel {
            scene: SceneId::from("prologue"),
            label: "go".to_string(),
        }));
    }

    #[test]
    fn test_issue_display() {
        let issue = ContentIssue::DanglingTarget {
            scene: SceneId::from("route_power_1"),
            label: "search_armory".to_string(),
            next: SceneId::from("warehouse_1"),
        };
        assert_eq!(
            issue.to_string(),
            "choice 'search_armory' in 'route_power_1' leads to missing scene 'warehouse_1'"
        );
    }
}
