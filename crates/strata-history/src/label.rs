//! Label and description generation for undoable analyst actions.
//!
//! Producers describe an action once, stamp the action-level pair on
//! the representative record, and stamp each per-entity pair on the
//! matching sub-record. Entities with no pair here get none, which is
//! exactly what the grouping filter strips from the timeline.

// A change is any bitwise-different value, not a tolerance band.
#![allow(clippy::float_cmp)]

use std::collections::BTreeMap;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::model::{DetectionId, EventId};

const MULTIPLE: &str = "Multiple";
const UNKNOWN_TIME: &str = "Unknown";

/// A detection as the labels need it: station and current phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSummary {
    pub id: DetectionId,
    pub station: String,
    pub phase: String,
}

impl DetectionSummary {
    pub fn new(
        id: impl Into<DetectionId>,
        station: impl Into<String>,
        phase: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            station: station.into(),
            phase: phase.into(),
        }
    }
}

/// An event as the labels need it: preferred-solution time in epoch
/// seconds, absent when no solution exists yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: EventId,
    pub time: Option<f64>,
}

impl EventSummary {
    pub fn new(id: impl Into<EventId>, time: Option<f64>) -> Self {
        Self {
            id: id.into(),
            time,
        }
    }
}

/// A detection together with its arrival time in epoch seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionArrival {
    pub detection: DetectionSummary,
    pub time: f64,
}

/// Before/after arrival values for one detection. `detection.phase` is
/// the current phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalTimeUpdate {
    pub detection: DetectionSummary,
    pub old_time: f64,
    pub new_time: f64,
    pub old_uncertainty: f64,
    pub new_uncertainty: f64,
}

/// The undoable analyst actions that get custom labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AnalystAction {
    AssociateDetections {
        event: EventSummary,
        detections: Vec<DetectionSummary>,
    },
    UnassociateDetections {
        event: EventSummary,
        detections: Vec<DetectionSummary>,
    },
    /// Covers both detection-derived and virtual events.
    CreateEvent { event: EventSummary },
    DuplicateEvents { events: Vec<EventSummary> },
    RejectEvents { events: Vec<EventSummary> },
    DeleteEvents { events: Vec<EventSummary> },
    CreateDetection { arrival: DetectionArrival },
    UpdateDetectionTimes { updates: Vec<ArrivalTimeUpdate> },
    /// `detections` carry their previous phase; `phase` is the one
    /// they all moved to.
    UpdateDetectionPhases {
        detections: Vec<DetectionSummary>,
        phase: String,
    },
    DeleteDetections { arrivals: Vec<DetectionArrival> },
}

/// One label/description pair as it lands on a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelPair {
    pub label: String,
    pub description: String,
}

impl LabelPair {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }
}

/// The generated pairs for one action: the action-level pair plus the
/// per-event and per-detection pairs for sub-records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionLabels {
    pub action: LabelPair,
    pub events: BTreeMap<EventId, LabelPair>,
    pub detections: BTreeMap<DetectionId, LabelPair>,
}

/// Generate the label/description pairs for one analyst action.
#[must_use]
pub fn describe(action: &AnalystAction) -> ActionLabels {
    match action {
        AnalystAction::AssociateDetections { event, detections } => {
            association_labels("Association", "associated", event, detections)
        }
        AnalystAction::UnassociateDetections { event, detections } => {
            association_labels("Unassociation", "unassociated", event, detections)
        }
        AnalystAction::CreateEvent { event } => {
            event_labels("Creation", "created", std::slice::from_ref(event))
        }
        AnalystAction::DuplicateEvents { events } => {
            event_labels("Creation", "created (duplicate)", events)
        }
        AnalystAction::RejectEvents { events } => event_labels("Rejection", "rejected", events),
        AnalystAction::DeleteEvents { events } => event_labels("Deletion", "deleted", events),
        AnalystAction::CreateDetection { arrival } => {
            let text = format!(
                "{}-{} created at {}",
                arrival.detection.station,
                arrival.detection.phase,
                format_time(arrival.time)
            );
            let mut labels = ActionLabels {
                action: LabelPair::new("Creation", text.clone()),
                ..ActionLabels::default()
            };
            labels
                .detections
                .insert(arrival.detection.id.clone(), LabelPair::new("Creation", text));
            labels
        }
        AnalystAction::UpdateDetectionTimes { updates } => arrival_time_labels(updates),
        AnalystAction::UpdateDetectionPhases { detections, phase } => {
            phase_labels(detections, phase)
        }
        AnalystAction::DeleteDetections { arrivals } => deletion_labels(arrivals),
    }
}

fn association_labels(
    label: &str,
    verb: &str,
    event: &EventSummary,
    detections: &[DetectionSummary],
) -> ActionLabels {
    let event_time = format_event_time(event.time);
    let mut labels = ActionLabels::default();
    let mut texts = Vec::with_capacity(detections.len());
    for detection in detections {
        let text = format!(
            "{}-{} {verb} to EV-{event_time}",
            detection.station, detection.phase
        );
        texts.push(text.clone());
        labels
            .detections
            .insert(detection.id.clone(), LabelPair::new(label, text));
    }
    labels.action = LabelPair::new(label, collapse(&texts));
    labels
}

fn event_labels(label: &str, suffix: &str, events: &[EventSummary]) -> ActionLabels {
    let mut labels = ActionLabels::default();
    let mut texts = Vec::with_capacity(events.len());
    for event in events {
        let text = format!("EV-{} {suffix}", format_event_time(event.time));
        texts.push(text.clone());
        labels
            .events
            .insert(event.id.clone(), LabelPair::new(label, text));
    }
    labels.action = LabelPair::new(label, collapse(&texts));
    labels
}

fn arrival_time_labels(updates: &[ArrivalTimeUpdate]) -> ActionLabels {
    let label = "Time";
    let mut labels = ActionLabels::default();
    let mut texts = Vec::with_capacity(updates.len());
    for update in updates {
        let time_changed = update.new_time != update.old_time;
        let uncertainty_changed = update.new_uncertainty != update.old_uncertainty;
        // An uncertainty-only edit gets its own wording; any time
        // change wins otherwise.
        let (noun, old, new) = if uncertainty_changed && !time_changed {
            (
                "time uncertainty",
                format!("{:.3}s", update.old_uncertainty),
                format!("{:.3}s", update.new_uncertainty),
            )
        } else {
            (
                "time",
                format_time(update.old_time),
                format_time(update.new_time),
            )
        };
        let text = format!(
            "{}-{} {noun} changed from {old} to {new}",
            update.detection.station, update.detection.phase
        );
        texts.push(text.clone());
        labels
            .detections
            .insert(update.detection.id.clone(), LabelPair::new(label, text));
    }
    labels.action = LabelPair::new(label, collapse(&texts));
    labels
}

fn phase_labels(detections: &[DetectionSummary], phase: &str) -> ActionLabels {
    let label = "Phase";
    let mut labels = ActionLabels::default();
    let mut texts = Vec::with_capacity(detections.len());
    for detection in detections {
        let text = format!(
            "{}-{} phase changed to {phase}",
            detection.station, detection.phase
        );
        texts.push(text.clone());
        labels
            .detections
            .insert(detection.id.clone(), LabelPair::new(label, text));
    }
    labels.action = match texts.as_slice() {
        [only] => LabelPair::new(label, only.clone()),
        _ => LabelPair::new(label, format!("{MULTIPLE} to {phase}")),
    };
    labels
}

fn deletion_labels(arrivals: &[DetectionArrival]) -> ActionLabels {
    let label = "Deletion";
    let mut labels = ActionLabels::default();
    let mut texts = Vec::with_capacity(arrivals.len());
    for arrival in arrivals {
        let text = format!(
            "{}-{} deleted at {}",
            arrival.detection.station,
            arrival.detection.phase,
            format_time(arrival.time)
        );
        texts.push(text.clone());
        labels
            .detections
            .insert(arrival.detection.id.clone(), LabelPair::new(label, text));
    }
    labels.action = LabelPair::new(label, collapse(&texts));
    labels
}

fn collapse(texts: &[String]) -> String {
    match texts {
        [only] => only.clone(),
        _ => MULTIPLE.to_owned(),
    }
}

fn format_event_time(time: Option<f64>) -> String {
    time.map_or_else(|| UNKNOWN_TIME.to_owned(), format_time)
}

// Saturating float cast; out-of-range instants fall out as None below.
#[allow(clippy::cast_possible_truncation)]
fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return UNKNOWN_TIME.to_owned();
    }
    let millis = (seconds * 1000.0).round() as i64;
    DateTime::from_timestamp_millis(millis).map_or_else(
        || UNKNOWN_TIME.to_owned(),
        |instant| instant.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn asar(id: &str, phase: &str) -> DetectionSummary {
        DetectionSummary::new(id, "ASAR", phase)
    }

    fn detection_text<'a>(labels: &'a ActionLabels, id: &str) -> &'a str {
        &labels.detections[&DetectionId::from(id)].description
    }

    fn event_text<'a>(labels: &'a ActionLabels, id: &str) -> &'a str {
        &labels.events[&EventId::from(id)].description
    }

    #[test]
    fn associating_one_detection_names_it_in_the_description() {
        let action = AnalystAction::AssociateDetections {
            event: EventSummary::new("e1", Some(3600.0)),
            detections: vec![asar("d1", "P")],
        };
        let labels = describe(&action);

        assert_eq!(labels.action.label, "Association");
        assert_eq!(
            labels.action.description,
            "ASAR-P associated to EV-1970-01-01 01:00:00.000"
        );
        assert_eq!(
            detection_text(&labels, "d1"),
            "ASAR-P associated to EV-1970-01-01 01:00:00.000"
        );
        assert!(labels.events.is_empty());
    }

    #[test]
    fn unassociating_many_detections_collapses_to_multiple() {
        let action = AnalystAction::UnassociateDetections {
            event: EventSummary::new("e1", Some(3600.0)),
            detections: vec![asar("d1", "P"), DetectionSummary::new("d2", "AAK", "Pn")],
        };
        let labels = describe(&action);

        assert_eq!(labels.action.description, "Multiple");
        assert_eq!(
            detection_text(&labels, "d2"),
            "AAK-Pn unassociated to EV-1970-01-01 01:00:00.000"
        );
        assert_eq!(labels.detections.len(), 2);
    }

    #[test]
    fn created_events_format_their_preferred_time() {
        let action = AnalystAction::CreateEvent {
            event: EventSummary::new("e1", Some(20.0)),
        };
        let labels = describe(&action);

        assert_eq!(labels.action.label, "Creation");
        assert_eq!(labels.action.description, "EV-1970-01-01 00:00:20.000 created");
        assert_eq!(event_text(&labels, "e1"), "EV-1970-01-01 00:00:20.000 created");
    }

    #[test]
    fn events_without_a_solution_render_unknown() {
        let action = AnalystAction::CreateEvent {
            event: EventSummary::new("e1", None),
        };
        assert_eq!(describe(&action).action.description, "EV-Unknown created");
    }

    #[test]
    fn duplicating_events_marks_the_copies() {
        let action = AnalystAction::DuplicateEvents {
            events: vec![
                EventSummary::new("e1", Some(20.0)),
                EventSummary::new("e2", Some(40.0)),
            ],
        };
        let labels = describe(&action);

        assert_eq!(labels.action.description, "Multiple");
        assert_eq!(
            event_text(&labels, "e2"),
            "EV-1970-01-01 00:00:40.000 created (duplicate)"
        );
    }

    #[test]
    fn rejection_and_deletion_share_the_event_wording() {
        let rejected = describe(&AnalystAction::RejectEvents {
            events: vec![EventSummary::new("e1", Some(20.0))],
        });
        assert_eq!(rejected.action.label, "Rejection");
        assert_eq!(rejected.action.description, "EV-1970-01-01 00:00:20.000 rejected");

        let deleted = describe(&AnalystAction::DeleteEvents {
            events: vec![EventSummary::new("e1", Some(20.0))],
        });
        assert_eq!(deleted.action.label, "Deletion");
        assert_eq!(deleted.action.description, "EV-1970-01-01 00:00:20.000 deleted");
    }

    #[test]
    fn created_detections_show_their_arrival_time() {
        let action = AnalystAction::CreateDetection {
            arrival: DetectionArrival {
                detection: asar("d1", "Pg"),
                time: 100.0,
            },
        };
        let labels = describe(&action);

        assert_eq!(
            labels.action.description,
            "ASAR-Pg created at 1970-01-01 00:01:40.000"
        );
        assert_eq!(labels.detections.len(), 1);
    }

    #[test]
    fn arrival_time_changes_show_both_instants() {
        let action = AnalystAction::UpdateDetectionTimes {
            updates: vec![ArrivalTimeUpdate {
                detection: DetectionSummary::new("d1", "AAK", "Pn"),
                old_time: 100.0,
                new_time: 120.5,
                old_uncertainty: 0.1,
                new_uncertainty: 0.1,
            }],
        };
        let labels = describe(&action);

        assert_eq!(labels.action.label, "Time");
        assert_eq!(
            labels.action.description,
            "AAK-Pn time changed from 1970-01-01 00:01:40.000 to 1970-01-01 00:02:00.500"
        );
    }

    #[test]
    fn uncertainty_only_changes_use_second_wording() {
        let action = AnalystAction::UpdateDetectionTimes {
            updates: vec![ArrivalTimeUpdate {
                detection: DetectionSummary::new("d1", "AAK", "Pn"),
                old_time: 100.0,
                new_time: 100.0,
                old_uncertainty: 0.1,
                new_uncertainty: 0.25,
            }],
        };
        assert_eq!(
            describe(&action).action.description,
            "AAK-Pn time uncertainty changed from 0.100s to 0.250s"
        );
    }

    #[test]
    fn simultaneous_time_and_uncertainty_changes_report_the_time() {
        let action = AnalystAction::UpdateDetectionTimes {
            updates: vec![ArrivalTimeUpdate {
                detection: DetectionSummary::new("d1", "AAK", "Pn"),
                old_time: 100.0,
                new_time: 101.0,
                old_uncertainty: 0.1,
                new_uncertainty: 0.2,
            }],
        };
        assert_eq!(
            describe(&action).action.description,
            "AAK-Pn time changed from 1970-01-01 00:01:40.000 to 1970-01-01 00:01:41.000"
        );
    }

    #[test]
    fn phase_changes_name_the_previous_phase() {
        let single = describe(&AnalystAction::UpdateDetectionPhases {
            detections: vec![asar("d1", "P")],
            phase: "Pg".to_owned(),
        });
        assert_eq!(single.action.description, "ASAR-P phase changed to Pg");

        let multiple = describe(&AnalystAction::UpdateDetectionPhases {
            detections: vec![asar("d1", "P"), DetectionSummary::new("d2", "AAK", "Pn")],
            phase: "Pg".to_owned(),
        });
        assert_eq!(multiple.action.description, "Multiple to Pg");
        assert_eq!(detection_text(&multiple, "d2"), "AAK-Pn phase changed to Pg");
    }

    #[test]
    fn deleted_detections_show_their_arrival_time() {
        let action = AnalystAction::DeleteDetections {
            arrivals: vec![
                DetectionArrival {
                    detection: asar("d1", "Pg"),
                    time: 100.0,
                },
                DetectionArrival {
                    detection: DetectionSummary::new("d2", "AAK", "Pn"),
                    time: 200.0,
                },
            ],
        };
        let labels = describe(&action);

        assert_eq!(labels.action.description, "Multiple");
        assert_eq!(
            detection_text(&labels, "d1"),
            "ASAR-Pg deleted at 1970-01-01 00:01:40.000"
        );
    }

    #[test]
    fn unrepresentable_times_render_unknown() {
        assert_eq!(format_time(f64::NAN), "Unknown");
        assert_eq!(format_time(f64::INFINITY), "Unknown");
        assert_eq!(format_time(1.0e300), "Unknown");
    }

    #[test]
    fn actions_round_trip_through_tagged_json() {
        let action = AnalystAction::UpdateDetectionPhases {
            detections: vec![asar("d1", "P")],
            phase: "Pg".to_owned(),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "updateDetectionPhases");
        assert_eq!(json["phase"], "Pg");

        let back: AnalystAction = serde_json::from_value(json).unwrap();
        assert_eq!(back, action);
    }
}
