//! End-to-end pipeline tests over a synthetic raw snapshot.

use feed_pipeline::lineup::LineupCache;
use feed_pipeline::process_snapshot;
use serde_json::json;
use types::event::EventDetails;
use types::ids::EventId;
use types::states::ThrowInState;
use types::team::Team;

fn sample_snapshot() -> serde_json::Value {
    json!({
        "lineupUpdates": [{
            "team": "Home",
            "lineup": {
                "startingOnPitch": [{
                    "internalId": "h9",
                    "sourceId": "1234",
                    "sourceName": "A. Striker",
                    "shirtNumber": 9
                }],
                "startingBench": [],
                "formation": "4-3-3"
            }
        }],
        "phaseChanges": [{
            "id": 1,
            "timestampUtc": "2025-03-01T20:00:00.000Z",
            "previousPhase": "PreMatch",
            "currentPhase": "FirstHalf",
            "currentPhaseStartTime": "2025-03-01T20:00:00.000Z"
        }],
        "kickOffs": [{
            "id": 2,
            "timestampUtc": "2025-03-01T20:00:05.000Z",
            "phase": "FirstHalf",
            "timeElapsedInPhase": "00:00:05",
            "team": "Home",
            "playerInternalId": "h9"
        }],
        "throwIns": [{
            "id": 40,
            "sequenceId": 40,
            "timestampUtc": "2025-03-01T20:08:00.000Z",
            "phase": "FirstHalf",
            "timeElapsedInPhase": "00:08:00",
            "team": "Away"
        }],
        "dangerStateChanges": [
            {
                "id": 41,
                "sequenceId": 41,
                "timestampUtc": "2025-03-01T20:08:02.000Z",
                "phase": "FirstHalf",
                "timeElapsedInPhase": "00:08:00",
                "dangerState": "AwayAttack",
                "isConfirmed": true
            },
            {
                "id": 60,
                "sequenceId": 60,
                "timestampUtc": "2025-03-01T20:12:00.000Z",
                "phase": "FirstHalf",
                "timeElapsedInPhase": "00:12:00",
                "dangerState": "HomeAttackingFreeKick",
                "isConfirmed": true
            }
        ],
        "fouls": [{
            "id": 61,
            "timestampUtc": "2025-03-01T20:12:00.000Z",
            "phase": "FirstHalf",
            "timeElapsedInPhase": "00:12:00",
            "foulingTeam": "Away",
            "isConfirmed": true
        }],
        "cornersV2": [{
            "id": 70,
            "phase": "FirstHalf",
            "team": "Home",
            "awarded": {
                "isConfirmed": true,
                "timestampUtc": "2025-03-01T20:13:00.000Z",
                "timeElapsedInPhase": "00:13:00"
            },
            "taken": {
                "isConfirmed": false,
                "timestampUtc": "2025-03-01T20:13:30.000Z",
                "timeElapsedInPhase": "00:13:30"
            }
        }],
        "goals": [{
            "id": 80,
            "timestampUtc": "2025-03-01T20:14:03.120Z",
            "phase": "FirstHalf",
            "timeElapsedInPhase": "00:14:03",
            "team": "Home",
            "scoredByInternalId": "h9",
            "isConfirmed": true
        }],
        "systemMessages": [
            {
                "id": 90,
                "message": "Standby",
                "messageId": 2000,
                "timestampUtc": "2025-03-01T19:55:00.000Z",
                "phase": "PreMatch",
                "timeElapsedInPhase": "00:00:00"
            },
            {
                "id": 91,
                "message": "Match Awaiting Kick Off",
                "messageId": 2001,
                "timestampUtc": "2025-03-01T19:58:00.000Z",
                "phase": "PreMatch",
                "timeElapsedInPhase": "00:00:00"
            }
        ]
    })
}

#[test]
fn full_pipeline_produces_ordered_feed() {
    let mut lineups = LineupCache::new();
    let events = process_snapshot(&sample_snapshot(), &mut lineups).unwrap();

    // Standby heartbeat dropped, unconfirmed corner-taken dropped
    let labels: Vec<&str> = events.iter().map(|e| e.event_type_label()).collect();
    assert_eq!(
        labels,
        vec![
            "goal",
            "cornerAwarded",
            "dangerState",
            "foul",
            "dangerState",
            "throwIn",
            "kickOff",
            "phaseChange",
            "systemMessage",
        ]
    );

    // Foul follows its co-timestamped free kick despite a lower raw id
    let foul = events.iter().find(|e| e.is_foul()).unwrap();
    assert_eq!(foul.id, EventId::foul(61));
    assert_eq!(foul.team, Team::Home);

    // Scorer resolved through the lineup update in the same snapshot
    match &events[0].details {
        EventDetails::Goal { scored_by, .. } => {
            assert_eq!(scored_by.as_ref().unwrap().source_name, "A. Striker");
        }
        other => panic!("Expected goal first, got {other:?}"),
    }

    // Throw-in classified from the following danger state
    let throw_in = events
        .iter()
        .find(|e| e.event_type_label() == "throwIn")
        .unwrap();
    match &throw_in.details {
        EventDetails::ThrowIn { throw_in_state, .. } => {
            assert_eq!(*throw_in_state, Some(ThrowInState::Attack));
        }
        other => panic!("Expected throw-in, got {other:?}"),
    }
}

#[test]
fn reprocessing_is_deterministic() {
    let snapshot = sample_snapshot();

    let mut lineups_a = LineupCache::new();
    let mut lineups_b = LineupCache::new();
    let first = process_snapshot(&snapshot, &mut lineups_a).unwrap();
    let second = process_snapshot(&snapshot, &mut lineups_b).unwrap();
    assert_eq!(first, second);

    // Same cache reused across snapshots is also stable
    let third = process_snapshot(&snapshot, &mut lineups_a).unwrap();
    assert_eq!(first, third);
}

#[test]
fn empty_snapshot_yields_empty_feed() {
    let mut lineups = LineupCache::new();
    let events = process_snapshot(&json!({}), &mut lineups).unwrap();
    assert!(events.is_empty());
    assert!(lineups.is_empty());
}
