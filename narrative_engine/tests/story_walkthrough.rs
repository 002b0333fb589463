//! End-to-end walks through the bundled survivor story.

use narrative_engine::{EngineConfig, SceneId, Session, SessionEvent, StoryGraph};
use survival_rules::{Ending, Mode, PlayerState, Stat};

const SURVIVOR: &str = include_str!("../stories/survivor.toml");

fn story() -> StoryGraph {
    StoryGraph::from_toml_str(SURVIVOR).expect("bundled story parses")
}

fn walk(session: &mut Session<'_>, labels: &[&str]) {
    for label in labels {
        session
            .choose(label)
            .unwrap_or_else(|e| panic!("choosing '{label}' failed: {e}"));
    }
}

#[test]
fn bundled_story_validates_cleanly() {
    let graph = story();
    let issues = graph.validate(&EngineConfig::default());
    assert!(issues.is_empty(), "content issues: {issues:?}");
}

#[test]
fn bundled_story_loads_from_json_too() {
    let graph = story();
    let json = serde_json::to_string(&graph).unwrap();
    let reloaded = StoryGraph::from_json_str(&json).unwrap();
    assert_eq!(reloaded.scene_ids(), graph.scene_ids());
}

#[test]
fn survive_first_reaches_the_day_loop() {
    let graph = story();
    let mut session = Session::with_defaults(&graph);
    let opening = session.start().view.unwrap();
    assert_eq!(opening.labels(), vec!["vow_power", "vow_distance", "survive_first"]);
    assert_eq!(session.state(), &PlayerState::default());

    let step = session.choose("survive_first").unwrap();

    assert_eq!(session.state().get(Stat::Hp), 8);
    assert_eq!(session.state().get(Stat::Food), 3);
    assert_eq!(session.state().get(Stat::Loss), 4);
    assert_eq!(step.ending(), None);

    let view = step.view.unwrap();
    assert_eq!(view.scene_id, SceneId::from("day_start"));
    assert!(view.text.starts_with("Day 1."));
    // Neither distance nor power is high enough for the gated options.
    assert_eq!(view.labels(), vec!["go_market", "go_houses"]);
}

#[test]
fn power_route_ends_as_guardian() {
    let graph = story();
    let mut session = Session::with_defaults(&graph);
    session.start();

    walk(&mut session, &["vow_power", "train", "stop"]);
    let view = session.view().unwrap();
    assert_eq!(view.mode, Mode::Power);
    assert_eq!(
        view.choice("push_through").unwrap().text,
        "Break through. Hesitate and die."
    );

    // Day 1: fight through, checkpoint finds nothing yet.
    walk(&mut session, &["push_through", "push_through_fight", "sleep"]);
    let step = session.choose("continue").unwrap();
    assert!(step.events.contains(&SessionEvent::LoopContinued));
    assert_eq!(step.view.unwrap().text.lines().next(), Some("Day 2. It starts again."));

    // Day 2: strong enough, still standing, not isolated.
    walk(&mut session, &["push_through", "let_them_clash", "sleep"]);
    let step = session.choose("continue").unwrap();

    assert_eq!(step.ending(), Some(Ending::Guardian));
    assert_eq!(step.view.unwrap().scene_id, SceneId::from("end_guardian"));
    assert!(session.is_finished());
    assert_eq!(session.state().get(Stat::Power), 6);
    assert_eq!(session.state().get(Stat::Day), 3);

    let step = session.choose("restart").unwrap();
    assert_eq!(session.state(), &PlayerState::default());
    assert_eq!(step.view.unwrap().scene_id, SceneId::from("prologue"));
}

#[test]
fn starvation_interrupts_mid_day() {
    let graph = story();
    let mut session = Session::with_defaults(&graph);
    session.start();

    walk(&mut session, &["survive_first", "go_houses", "leave", "sleep", "continue"]);
    assert_eq!(session.current_scene(), Some(&SceneId::from("day_start")));
    assert_eq!(session.state().get(Stat::Food), 1);

    let step = session.choose("go_houses").unwrap();

    assert_eq!(step.changes.amount(Stat::Food), -1);
    assert!(step
        .events
        .contains(&SessionEvent::AutoEnding { ending: Ending::Starve }));
    assert_eq!(step.view.unwrap().scene_id, SceneId::from("end_starve"));
}

#[test]
fn external_restart_from_mid_story() {
    let graph = story();
    let mut session = Session::with_defaults(&graph);
    session.start();
    walk(&mut session, &["vow_distance", "cut_radio"]);
    assert_ne!(session.state(), &PlayerState::default());

    let step = session.restart();

    assert_eq!(step.events.first(), Some(&SessionEvent::Restarted));
    assert_eq!(session.state(), &PlayerState::default());
    assert_eq!(session.current_scene(), Some(&SceneId::from("prologue")));
}
