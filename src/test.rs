use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{self, Instant};

use crate::error::{ReplayError, Result};
use crate::headless::run_headless;
use crate::models::{
    AnimationState, BattleRequest, BattleResponse, BattleResult, HpUpdate, LogEventKind, PlaybackSettings,
    PotionInfo, Side, SpriteSheet,
};
use crate::parsing::{ActorNames, classify_line};
use crate::playback::{BattleStage, PlaybackStatus, ResultOrchestrator};
use crate::resolver::{CombatResolver, StaticResolver};

const REQUEST: BattleRequest = BattleRequest { attacker_id: 1, defender_id: 2 };

fn response(log: &[&str], winner_id: i64) -> BattleResponse {
    BattleResponse {
        winner_id,
        winner_name: "Hero".into(),
        loser_id: 2,
        loser_name: "Slime".into(),
        battle_log: log.iter().map(|line| line.to_string()).collect(),
        gold_reward: 35,
        attacker_name: "Hero".into(),
        defender_name: "Slime".into(),
        attacker_avatar: Some("warrior_1".into()),
        defender_avatar: None,
        attacker_class: Some("WARRIOR".into()),
        defender_class: None,
        attacker_max_hp: 30,
        defender_max_hp: 18,
        attacker_final_hp: None,
        defender_final_hp: None,
        attacker_potions: vec![PotionInfo {
            name: "Healing Potion".into(),
            buff_type: "HEAL".into(),
            quantity: 1,
        }],
        defender_potions: Vec::new(),
    }
}

fn stage_for(log: &[&str]) -> (BattleStage, ActorNames) {
    let result = BattleResult::from_response(REQUEST, response(log, 1));
    (BattleStage::new(&result, &SpriteSheet::default()), ActorNames::from_result(&result))
}

fn orchestrator(log: &[&str], winner_id: i64, settings: PlaybackSettings) -> ResultOrchestrator<StaticResolver> {
    ResultOrchestrator::new(StaticResolver::new(response(log, winner_id)), REQUEST, settings)
}

struct RejectingResolver;

#[async_trait]
impl CombatResolver for RejectingResolver {
    async fn resolve(&self, _request: BattleRequest) -> Result<BattleResponse> {
        Err(ReplayError::Rejected {
            status: 404,
            message: "Character not found".into(),
        })
    }
}

const FIGHT: &[&str] = &[
    "=== Round 1 ===",
    "Hero -> Slime (hit, remaining HP: 12)",
    "Slime dodged!",
    "Hero's Healing Potion used! (HP: 30)",
    "Slime -> Hero (critical hit, remaining HP: 21)",
    "Hero -> Slime (hit, remaining HP: -3)",
    "Slime collapses...",
    "Hero wins!",
];

#[test]
fn test_scenario_a_hit_line() {
    let (mut stage, names) = stage_for(&[]);
    let event = classify_line("Hero -> Slime (hit, remaining HP: 12)", &names);

    assert_eq!(event.kind, LogEventKind::AttackHit);
    assert_eq!(event.acting_side, Some(Side::Attacker));
    assert_eq!(event.hp_update, Some(HpUpdate { side: Side::Defender, new_value: 12 }));

    stage.apply(&event);
    assert_eq!(stage.actor(Side::Attacker).animation, AnimationState::Attack);
    assert_eq!(stage.actor(Side::Defender).animation, AnimationState::Hit);
    assert_eq!(stage.actor(Side::Defender).displayed_hp, 12);
}

#[test]
fn test_scenario_b_dodge_line() {
    let (mut stage, names) = stage_for(&[]);
    stage.settle();
    let event = classify_line("Slime dodged!", &names);

    assert_eq!(event.kind, LogEventKind::AttackMiss);
    assert_eq!(event.acting_side, Some(Side::Defender));

    stage.apply(&event);
    assert_eq!(stage.actor(Side::Defender).animation, AnimationState::Attack);
    assert_eq!(stage.actor(Side::Attacker).animation, AnimationState::Idle);
    assert!(stage.actor(Side::Attacker).paused, "attacker should be left as it was");
}

#[test]
fn test_scenario_c_round_marker() {
    let (mut stage, names) = stage_for(&[]);
    stage.apply(&classify_line("Hero -> Slime (hit, remaining HP: 12)", &names));
    let event = classify_line("=== Round 2 ===", &names);

    assert_eq!(event.kind, LogEventKind::RoundMarker);
    stage.apply(&event);
    for side in [Side::Attacker, Side::Defender] {
        assert_eq!(stage.actor(side).animation, AnimationState::Idle);
        assert!(!stage.actor(side).paused);
    }
}

#[test]
fn test_scenario_d_defeat_zeroes_hp() {
    let (mut stage, names) = stage_for(&[]);
    let event = classify_line("Hero collapses...", &names);

    assert_eq!(event.kind, LogEventKind::Defeat);
    assert_eq!(event.defeated, Some(Side::Attacker));

    stage.apply(&event);
    assert_eq!(stage.actor(Side::Attacker).displayed_hp, 0);
    assert_eq!(stage.actor(Side::Defender).displayed_hp, 18);
}

#[test]
fn test_finishing_blow_animates_as_a_hit() {
    let (mut stage, names) = stage_for(&[]);
    let event = classify_line("Hero -> Slime (hit, remaining HP: 0) Slime collapses!", &names);

    assert_eq!(event.kind, LogEventKind::AttackHit);
    assert_eq!(event.defeated, Some(Side::Defender));

    stage.apply(&event);
    assert_eq!(stage.actor(Side::Attacker).animation, AnimationState::Attack);
    assert_eq!(stage.actor(Side::Defender).animation, AnimationState::Hit);
    assert_eq!(stage.actor(Side::Defender).displayed_hp, 0);

    let settings = PlaybackSettings::default();
    assert_eq!(crate::playback::line_delay(event.kind, &settings), Duration::from_millis(800));
}

#[test]
fn test_scenario_e_terminal_freeze() {
    let result = BattleResult::from_response(REQUEST, response(&[], 1));
    let mut stage = BattleStage::new(&result, &SpriteSheet::default());
    let names = ActorNames::from_result(&result);
    stage.apply(&classify_line("Slime -> Hero (hit, remaining HP: 2)", &names));

    assert_eq!(stage.finish(&result).unwrap(), Side::Attacker);

    let attacker = stage.actor(Side::Attacker);
    assert_eq!((attacker.animation, attacker.paused, attacker.frozen_frame), (AnimationState::Idle, true, Some(0)));
    let defender = stage.actor(Side::Defender);
    assert_eq!((defender.animation, defender.paused, defender.frozen_frame), (AnimationState::Death, true, Some(2)));

    // Later lines may not disturb the freeze
    for line in FIGHT {
        stage.apply(&classify_line(line, &names));
        stage.settle();
    }
    assert_eq!(stage.actor(Side::Defender).animation, AnimationState::Death);
    assert_eq!(stage.actor(Side::Defender).frozen_frame, Some(2));
    assert_eq!(stage.actor(Side::Attacker).frozen_frame, Some(0));
}

#[test]
fn test_scenario_f_unrecognized_line() {
    let (mut stage, names) = stage_for(&[]);
    let event = classify_line("The wind blows.", &names);

    assert_eq!(event.kind, LogEventKind::StatusOrOther);
    assert_eq!(event.acting_side, None);
    assert_eq!(event.hp_update, None);

    stage.apply(&event);
    stage.settle();
    for side in [Side::Attacker, Side::Defender] {
        assert_eq!(stage.actor(side).animation, AnimationState::Idle);
        assert!(stage.actor(side).paused);
    }
    assert_eq!(stage.actor(Side::Attacker).displayed_hp, 30);
}

#[test]
fn test_classification_is_repeatable() {
    let names = ActorNames::new("Hero", "Slime");
    for line in FIGHT {
        assert_eq!(classify_line(line, &names), classify_line(line, &names), "line: {}", line);
    }
}

#[test]
fn test_hp_stays_in_bounds() {
    let (mut stage, names) = stage_for(&[]);
    let corpus = [
        "Hero -> Slime (hit, remaining HP: 400)",
        "Slime -> Hero (hit, remaining HP: -50)",
        "Slime revives! HP 99",
        "Hero's blessing (HP: 12345)",
        "용사 -> 슬라임 명중! (남은HP:-1)",
    ];
    for line in FIGHT.iter().chain(corpus.iter()) {
        stage.apply(&classify_line(line, &names));
        for side in [Side::Attacker, Side::Defender] {
            let actor = stage.actor(side);
            assert!(actor.displayed_hp <= actor.max_hp, "{} out of bounds after {:?}", side, line);
        }
    }
}

#[test]
fn test_used_potion_is_recorded_for_its_owner() {
    let (mut stage, names) = stage_for(&[]);
    stage.apply(&classify_line("Hero's Healing Potion used! (HP: 30)", &names));
    assert!(stage.actor(Side::Attacker).used_consumables.contains("Healing Potion"));

    let names = ActorNames::new("용사", "슬라임");
    let event = classify_line("슬라임의 독 물약 발동! (POISON)", &names);
    assert_eq!(event.acting_side, Some(Side::Defender));
    assert_eq!(event.potion_consumed.as_deref(), Some("독 물약"));
}

#[tokio::test(start_paused = true)]
async fn test_full_playback_reveals_every_line_in_order() {
    let mut orchestrator = orchestrator(FIGHT, 1, PlaybackSettings::default());
    let mut updates = orchestrator.subscribe();

    let watcher = tokio::spawn(async move {
        let mut counts = Vec::new();
        loop {
            let (count, finished) = {
                let state = updates.borrow_and_update();
                (state.revealed_lines.len(), state.finished)
            };
            counts.push(count);
            if finished || updates.changed().await.is_err() {
                return counts;
            }
        }
    });

    let start = Instant::now();
    let winner = orchestrator.run().await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(winner, Side::Attacker);
    // 600 + 800*4 + 400 + 1000*2
    assert!(elapsed >= Duration::from_millis(6200), "finished too early: {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(6300), "finished too late: {:?}", elapsed);

    let counts = watcher.await.unwrap();
    assert!(counts.windows(2).all(|pair| pair[1] == pair[0] || pair[1] == pair[0] + 1), "{:?}", counts);
    assert_eq!(counts.last().copied(), Some(FIGHT.len()));

    let state = orchestrator.snapshot();
    assert_eq!(state.status, PlaybackStatus::Finished);
    assert_eq!(state.winner_id, Some(1));
    assert_eq!(state.current_line_index, Some(FIGHT.len() - 1));
    let texts: Vec<&str> = state.revealed_lines.iter().map(|line| line.text.as_str()).collect();
    assert_eq!(texts, FIGHT);
    assert_eq!(state.actor(Side::Defender).unwrap().displayed_hp, 0);
    assert_eq!(state.actor(Side::Attacker).unwrap().displayed_hp, 21);
}

#[tokio::test(start_paused = true)]
async fn test_frame_clocks_hold_the_terminal_frames() {
    let mut orchestrator = orchestrator(&["Hero -> Slime (hit, remaining HP: 0)"], 1, PlaybackSettings::default());
    orchestrator.run().await.unwrap();

    time::sleep(Duration::from_secs(2)).await;
    let state = orchestrator.snapshot();
    assert_eq!(state.actor(Side::Attacker).unwrap().frame, 0);
    assert_eq!(state.actor(Side::Defender).unwrap().frame, 2);
    assert_eq!(state.actor(Side::Defender).unwrap().animation, AnimationState::Death);
}

#[tokio::test(start_paused = true)]
async fn test_new_line_supersedes_pending_idle_return() {
    let settings = PlaybackSettings {
        idle_return_ms: 1000,
        ..PlaybackSettings::default()
    };
    let log = ["Hero -> Slime (hit, remaining HP: 12)", "Slime dodged!", "=== Round 2 ==="];
    let mut orchestrator = orchestrator(&log, 1, settings);
    let updates = orchestrator.subscribe();
    let start = Instant::now();
    let playback = tokio::spawn(async move {
        let outcome = orchestrator.run().await;
        (orchestrator, outcome)
    });

    // First line at 800ms arms a return to idle for 1800ms; the second line at 1600ms replaces it.
    time::sleep_until(start + Duration::from_millis(1900)).await;
    {
        let state = updates.borrow();
        assert_eq!(state.revealed_lines.len(), 2);
        assert_eq!(state.actor(Side::Attacker).unwrap().animation, AnimationState::Attack);
        assert_eq!(state.actor(Side::Defender).unwrap().animation, AnimationState::Attack);
        assert!(!state.actor(Side::Defender).unwrap().paused);
    }

    let (orchestrator, outcome) = playback.await.unwrap();
    assert_eq!(outcome.unwrap(), Side::Attacker);
    assert!(orchestrator.snapshot().finished);
}

#[tokio::test(start_paused = true)]
async fn test_idle_return_settles_both_actors() {
    let log = ["Hero -> Slime (hit, remaining HP: 12)", "Hero wins!"];
    let mut orchestrator = orchestrator(&log, 1, PlaybackSettings::default());
    let updates = orchestrator.subscribe();
    let start = Instant::now();
    let playback = tokio::spawn(async move {
        let outcome = orchestrator.run().await;
        (orchestrator, outcome)
    });

    // Revealed at 800ms, settled at 1300ms, next line at 1800ms
    time::sleep_until(start + Duration::from_millis(1400)).await;
    {
        let state = updates.borrow();
        for side in [Side::Attacker, Side::Defender] {
            let actor = state.actor(side).unwrap();
            assert_eq!((actor.animation, actor.paused, actor.frozen_frame), (AnimationState::Idle, true, Some(0)));
        }
    }

    let (_orchestrator, outcome) = playback.await.unwrap();
    assert!(outcome.is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_teardown_mid_playback_cancels_every_timer() {
    let mut orchestrator = orchestrator(FIGHT, 1, PlaybackSettings::default());
    let mut updates = orchestrator.subscribe();

    // Tearing down the view drops the run future between the first and second lines
    let interrupted = time::timeout(Duration::from_millis(1000), orchestrator.run()).await;
    assert!(interrupted.is_err());
    orchestrator.teardown();
    assert!(!orchestrator.is_running_tasks());

    let _ = updates.borrow_and_update();
    time::sleep(Duration::from_secs(10)).await;
    assert!(!updates.has_changed().unwrap(), "a timer kept publishing after teardown");

    let state = orchestrator.snapshot();
    assert_eq!(state.revealed_lines.len(), 1);
    assert!(!state.finished);
}

#[tokio::test(start_paused = true)]
async fn test_unattributed_attack_lines_still_play() {
    let names = ActorNames::new("용사", "슬라임");
    let crit = classify_line("크리티컬 히트!", &names);
    assert_eq!(crit.kind, LogEventKind::AttackHit);
    assert_eq!(crit.acting_side, None);

    let log = ["Hero -> Slime (hit, remaining HP: 12)", "크리티컬 히트!", "Hero wins!"];
    let mut orchestrator = orchestrator(&log, 1, PlaybackSettings::default());
    assert_eq!(orchestrator.run().await.unwrap(), Side::Attacker);

    let state = orchestrator.snapshot();
    assert_eq!(state.revealed_lines.len(), 3);
    assert_eq!(state.revealed_lines[1].kind, LogEventKind::AttackHit);
}

#[tokio::test(start_paused = true)]
async fn test_failed_request_starts_nothing() {
    let mut orchestrator = ResultOrchestrator::new(RejectingResolver, REQUEST, PlaybackSettings::default());

    let err = orchestrator.run().await.unwrap_err();
    assert!(matches!(err, ReplayError::Rejected { status: 404, .. }));
    assert!(!orchestrator.is_running_tasks());

    let state = orchestrator.snapshot();
    match &state.status {
        PlaybackStatus::Failed(message) => assert!(message.contains("Character not found")),
        other => panic!("expected a failed status, got {:?}", other),
    }
    assert!(state.revealed_lines.is_empty());
    assert!(state.stage.is_none());

    assert!(matches!(orchestrator.run().await, Err(ReplayError::AlreadyStarted)));
}

#[tokio::test(start_paused = true)]
async fn test_unknown_winner_freezes_in_place() {
    let log = ["Slime -> Hero (hit, remaining HP: 9)"];
    let mut orchestrator = orchestrator(&log, 99, PlaybackSettings::default());

    let err = orchestrator.run().await.unwrap_err();
    assert!(matches!(err, ReplayError::UnresolvableWinner { winner_id: 99 }));

    let state = orchestrator.snapshot();
    assert!(state.finished);
    assert!(state.issue.is_some());
    assert_eq!(state.winner_name(), None);
    assert_eq!(state.actor(Side::Defender).unwrap().animation, AnimationState::Attack);
    assert_eq!(state.actor(Side::Attacker).unwrap().animation, AnimationState::Hit);
}

#[tokio::test(start_paused = true)]
async fn test_headless_prints_lines_and_summary() {
    let mut orchestrator = orchestrator(FIGHT, 1, PlaybackSettings::default());
    let mut out = Vec::new();

    let outcome = run_headless(&mut orchestrator, &mut out).await.unwrap();
    assert_eq!(outcome.winner, Side::Attacker);
    assert_eq!(outcome.lines_printed, FIGHT.len());
    assert_eq!(outcome.final_hp, (21, 0));

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Slime dodged!"));
    assert!(printed.contains("Hero 30/30 | Slime 12/18"));
    assert!(printed.trim_end().ends_with("Winner: Hero (+35 gold)"));
}
