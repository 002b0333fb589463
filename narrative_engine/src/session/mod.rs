//! Session - walks the story graph one player action at a time.
//!
//! Each call runs to completion before returning:
//! 1. **Lookup**: resolve the current scene; the dispatch id runs the ending
//!    checkpoint and enters its result instead
//! 2. **Filter**: offer only choices whose condition holds right now
//! 3. **Fallback**: if none hold, offer a single continuation to the day loop
//! 4. **Activate**: reset, or apply the delta, check fatal endings, and move
//!    to the ending or the declared target

mod view;

pub use view::*;

use serde::{Deserialize, Serialize};
use survival_rules::{
    immediate_ending, resolve_ending, Effect, Ending, Mode, PlayerState, Resolution, StatDiff,
};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::content::{Choice, Scene, SceneId, StoryGraph};
use crate::error::SessionError;
use crate::events::SessionEvent;

/// Unique identifier for sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A choice as offered on one visit.
enum Offered<'g> {
    Authored(&'g Choice),
    Fallback,
}

/// One player's run through a story.
///
/// Owns exactly one [`PlayerState`]; the story graph is borrowed and shared
/// read-only between any number of sessions.
pub struct Session<'g> {
    id: SessionId,
    graph: &'g StoryGraph,
    config: EngineConfig,
    state: PlayerState,
    current: Option<SceneId>,
}

impl<'g> Session<'g> {
    /// Create a session. Nothing is shown until [`start`](Self::start).
    pub fn new(graph: &'g StoryGraph, config: EngineConfig) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            id: SessionId::new(),
            graph,
            state: PlayerState::new(config.ruleset),
            config,
            current: None,
        })
    }

    /// Create a session with the default configuration.
    pub fn with_defaults(graph: &'g StoryGraph) -> Self {
        Self {
            id: SessionId::new(),
            graph,
            state: PlayerState::default(),
            config: EngineConfig::default(),
            current: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn current_scene(&self) -> Option<&SceneId> {
        self.current.as_ref()
    }

    /// Whether the session is sitting on an ending scene.
    pub fn is_finished(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|id| Ending::from_scene_id(id.as_str()).is_some())
    }

    /// Reset state and enter the start scene.
    pub fn start(&mut self) -> Step {
        tracing::info!(session = %self.id, "session started");
        self.begin(SessionEvent::Started)
    }

    /// Same as a reset choice fired from outside the story.
    pub fn restart(&mut self) -> Step {
        tracing::info!(session = %self.id, "session restarted");
        self.begin(SessionEvent::Restarted)
    }

    fn begin(&mut self, event: SessionEvent) -> Step {
        self.state = PlayerState::new(self.config.ruleset);
        self.current = None;

        let mut events = vec![event];
        let start = self.config.start_scene.clone();
        let view = self.enter(start, &mut events);

        Step {
            view,
            changes: StatDiff::default(),
            events,
        }
    }

    /// The current scene as it should be shown now.
    pub fn view(&self) -> Option<SceneView> {
        let id = self.current.as_ref()?;
        let scene = self.graph.scene(id)?;
        Some(self.render(id, scene))
    }

    /// Activate the offered choice with `label`.
    ///
    /// Fails without touching state when the session has not started or the
    /// label is not offered on this visit.
    pub fn choose(&mut self, label: &str) -> Result<Step, SessionError> {
        let scene_id = self.current.clone().ok_or(SessionError::NotStarted)?;
        let graph = self.graph;
        let scene = graph.scene(&scene_id).ok_or(SessionError::NotStarted)?;

        let offered = self
            .offered(scene)
            .into_iter()
            .find(|offer| self.offer_label(offer) == label)
            .ok_or_else(|| SessionError::ChoiceUnavailable {
                scene: scene_id.clone(),
                label: label.to_string(),
            })?;

        let choice = match offered {
            Offered::Fallback => {
                tracing::debug!(session = %self.id, scene = %scene_id, "fallback continuation taken");
                let mut events = vec![SessionEvent::FallbackTaken { scene: scene_id }];
                let target = self.config.day_loop_scene.clone();
                let view = self.enter(target, &mut events);
                return Ok(Step {
                    view,
                    changes: StatDiff::default(),
                    events,
                });
            }
            Offered::Authored(choice) => choice,
        };

        tracing::debug!(session = %self.id, scene = %scene_id, choice = %choice.label, "choice taken");
        let mut events = vec![SessionEvent::ChoiceTaken {
            scene: scene_id,
            label: choice.label.clone(),
        }];

        let (target, changes) = match &choice.effect {
            Effect::Reset => {
                self.state = self.state.reset();
                events.push(SessionEvent::Restarted);
                (choice.next.clone(), StatDiff::default())
            }
            Effect::Apply(delta) => {
                let (next, changes) = self.state.apply_delta_with_diff(delta);
                self.state = next;
                if !changes.is_empty() {
                    events.push(SessionEvent::StatsChanged(changes.clone()));
                }

                match immediate_ending(&self.state) {
                    Some(ending) => {
                        tracing::info!(
                            session = %self.id,
                            ending = %ending,
                            declared = %choice.next,
                            "fatal state overrides choice target"
                        );
                        events.push(SessionEvent::AutoEnding { ending });
                        (SceneId::from(ending.scene_id()), changes)
                    }
                    None => (choice.next.clone(), changes),
                }
            }
        };

        let view = self.enter(target, &mut events);
        Ok(Step {
            view,
            changes,
            events,
        })
    }

    /// Move to `target`, running the checkpoint if it is the dispatch id.
    ///
    /// A missing scene leaves the session where it was.
    fn enter(&mut self, target: SceneId, events: &mut Vec<SessionEvent>) -> Option<SceneView> {
        let target = if target == self.config.resolve_scene {
            self.dispatch(events)
        } else {
            target
        };

        let graph = self.graph;
        let Some(scene) = graph.scene(&target) else {
            tracing::warn!(session = %self.id, scene = %target, "scene not found in story graph");
            events.push(SessionEvent::MissingScene { id: target });
            return None;
        };

        tracing::debug!(session = %self.id, scene = %target, "entered scene");
        let view = self.render(&target, scene);
        self.current = Some(target);
        Some(view)
    }

    fn dispatch(&self, events: &mut Vec<SessionEvent>) -> SceneId {
        match resolve_ending(&self.state) {
            Resolution::Ending(ending) => {
                tracing::info!(session = %self.id, ending = %ending, "checkpoint resolved an ending");
                events.push(SessionEvent::EndingResolved { ending });
                SceneId::from(ending.scene_id())
            }
            Resolution::Continue => {
                tracing::debug!(session = %self.id, "checkpoint found no ending");
                events.push(SessionEvent::LoopContinued);
                self.config.day_loop_scene.clone()
            }
        }
    }

    fn offered<'s>(&self, scene: &'s Scene) -> Vec<Offered<'s>> {
        let offered: Vec<_> = scene
            .choices
            .iter()
            .filter(|choice| choice.is_eligible(&self.state))
            .map(Offered::Authored)
            .collect();

        if offered.is_empty() {
            vec![Offered::Fallback]
        } else {
            offered
        }
    }

    fn offer_label<'a>(&'a self, offer: &'a Offered<'_>) -> &'a str {
        match offer {
            Offered::Authored(choice) => &choice.label,
            Offered::Fallback => &self.config.fallback_label,
        }
    }

    fn render(&self, id: &SceneId, scene: &Scene) -> SceneView {
        let mode = Mode::classify(&self.state);

        let choices = self
            .offered(scene)
            .into_iter()
            .map(|offer| match offer {
                Offered::Authored(choice) => ChoiceView {
                    label: choice.label.clone(),
                    text: choice.display_text(mode).to_string(),
                    synthesized: false,
                },
                Offered::Fallback => {
                    tracing::warn!(session = %self.id, scene = %id, "no eligible choices, offering fallback");
                    ChoiceView {
                        label: self.config.fallback_label.clone(),
                        text: self.config.fallback_text.clone(),
                        synthesized: true,
                    }
                }
            })
            .collect();

        SceneView {
            scene_id: id.clone(),
            background: scene.background.clone(),
            text: scene.render_text(self.state.day()),
            mode,
            choices,
        }
    }
}
