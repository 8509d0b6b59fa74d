//! Optimistic moves of planning events.
//!
//! A move is applied to the local list first, then persisted with exactly one
//! backend call. A failed call restores the event's previous range. Every
//! outgoing move carries a per-event sequence number and only the response to
//! the latest one may touch local state.
//!
//! A re-projection keeps an in-flight move when the server still reports the
//! event at its pre-move range, and supersedes it otherwise.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use thiserror::Error;

use super::gesture::OutOfDay;
use super::projector::{sort_events, EventProjector};
use crate::models::planning_event::{EventKey, Ineligibility, PlanningEvent};
use crate::models::step::Step;
use crate::services::api::{ApiError, ApiRequest, PlanningBackend};

/// Reasons a move is refused before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("event {0} is not on the planning board")]
    UnknownEvent(EventKey),
    #[error("event {key} cannot be moved: {reason}")]
    Ineligible {
        key: EventKey,
        reason: Ineligibility,
    },
    #[error(transparent)]
    OutOfDay(#[from] OutOfDay),
    #[error("a save is already in progress for event {0}")]
    InFlight(EventKey),
}

impl MoveError {
    pub fn user_message(&self) -> String {
        match self {
            MoveError::UnknownEvent(_) => {
                "Cet élément n'existe plus dans le planning. Actualisez puis réessayez.".to_string()
            }
            MoveError::Ineligible {
                reason: Ineligibility::MissingAddress,
                ..
            } => "Adresse manquante : ajoutez une adresse à cet élément avant de le déplacer, \
                  elle est nécessaire au calcul des trajets."
                .to_string(),
            MoveError::Ineligible {
                reason: Ineligibility::MissingStepAddress,
                ..
            } => "Adresse manquante : l'étape de cet élément n'a pas d'adresse, \
                  elle est nécessaire au calcul des trajets."
                .to_string(),
            MoveError::OutOfDay(_) => {
                "Déplacement impossible : l'élément doit rester dans la même journée (00:00 - 24:00)."
                    .to_string()
            }
            MoveError::InFlight(_) => {
                "Enregistrement en cours pour cet élément, patientez avant de le déplacer à nouveau."
                    .to_string()
            }
        }
    }
}

/// Why the backend refused or failed a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveFailure {
    /// Route computation lacks an origin or destination address
    MissingRouteAddress,
    /// Non-2xx response
    Rejected { status: u16 },
    /// Transport failure
    Network(String),
    /// Anything else, e.g. an unreadable response
    Unexpected(String),
}

impl MoveFailure {
    pub fn from_api_error(err: &ApiError) -> Self {
        if err.is_missing_route_address() {
            return MoveFailure::MissingRouteAddress;
        }

        match err {
            ApiError::Status { status, .. } => MoveFailure::Rejected { status: *status },
            ApiError::Network(message) => MoveFailure::Network(message.clone()),
            ApiError::Decode(message) => MoveFailure::Unexpected(message.clone()),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            MoveFailure::MissingRouteAddress => {
                "Impossible de calculer le trajet : l'adresse de départ ou d'arrivée est manquante. \
                 Complétez les adresses puis réessayez."
                    .to_string()
            }
            MoveFailure::Rejected { status } => format!(
                "Le serveur a refusé la modification (HTTP {}). L'élément a été remis à sa place.",
                status
            ),
            MoveFailure::Network(_) => {
                "Le serveur est injoignable. L'élément a été remis à sa place.".to_string()
            }
            MoveFailure::Unexpected(_) => {
                "Une erreur inattendue est survenue. L'élément a été remis à sa place.".to_string()
            }
        }
    }
}

/// Identifies one issued move and remembers what to restore on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReceipt {
    pub key: EventKey,
    pub sequence: u64,
    pub previous: (NaiveDateTime, NaiveDateTime),
}

/// A move that was applied locally and still has to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveTicket {
    pub receipt: MoveReceipt,
    pub request: ApiRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResolution {
    Confirmed(EventKey),
    RolledBack {
        key: EventKey,
        failure: MoveFailure,
    },
    /// A newer move or a reload superseded this response; nothing changed
    Stale(EventKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlightMove {
    sequence: u64,
    previous: (NaiveDateTime, NaiveDateTime),
    target: (NaiveDateTime, NaiveDateTime),
}

/// Local event list of the planning grid plus the bookkeeping of in-flight
/// moves.
#[derive(Debug, Default)]
pub struct PlanningBoard {
    events: Vec<PlanningEvent>,
    projector: EventProjector,
    sequences: HashMap<EventKey, u64>,
    in_flight: HashMap<EventKey, InFlightMove>,
}

impl PlanningBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PlanningEvent] {
        &self.events
    }

    pub fn find(&self, key: &EventKey) -> Option<&PlanningEvent> {
        self.events.iter().find(|event| &event.key() == key)
    }

    pub fn is_in_flight(&self, key: &EventKey) -> bool {
        self.in_flight.contains_key(key)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Re-project from `steps` when their content changed. Returns whether
    /// the local list was replaced.
    ///
    /// An in-flight move survives the replacement only if the new list still
    /// has its event at the pre-move range; its optimistic range is applied
    /// again. Any other in-flight move is superseded and its response will be
    /// stale.
    pub fn sync_steps(&mut self, steps: &[Step]) -> bool {
        let Some(mut events) = self.projector.project_if_changed(steps) else {
            return false;
        };

        let mut superseded = 0;
        self.in_flight.retain(|key, pending| {
            match events.iter_mut().find(|event| &event.key() == key) {
                Some(event) if (event.start, event.end) == pending.previous => {
                    (event.start, event.end) = pending.target;
                    true
                }
                _ => {
                    superseded += 1;
                    false
                }
            }
        });
        if superseded > 0 {
            log::info!("Reload superseded {} in-flight move(s)", superseded);
        }

        sort_events(&mut events);
        self.events = events;
        true
    }

    /// Make the next `sync_steps` re-project even for equal content, e.g. after
    /// an edit changed fields the signature does not cover.
    pub fn invalidate(&mut self) {
        self.projector.invalidate();
    }

    /// Validate and apply a move locally, returning the request to send.
    pub fn begin_move(
        &mut self,
        key: &EventKey,
        new_start: NaiveDateTime,
        new_end: NaiveDateTime,
    ) -> Result<MoveTicket, MoveError> {
        if self.is_in_flight(key) {
            return Err(MoveError::InFlight(key.clone()));
        }

        let event = self
            .events
            .iter_mut()
            .find(|event| &event.key() == key)
            .ok_or_else(|| MoveError::UnknownEvent(key.clone()))?;

        event
            .eligibility()
            .map_err(|reason| MoveError::Ineligible {
                key: key.clone(),
                reason,
            })?;

        let previous = (event.start, event.end);
        let request = ApiRequest::move_event(event, new_start, new_end);
        event.start = new_start;
        event.end = new_end;
        sort_events(&mut self.events);

        let sequence = self.sequences.entry(key.clone()).or_insert(0);
        *sequence += 1;
        let sequence = *sequence;
        self.in_flight.insert(
            key.clone(),
            InFlightMove {
                sequence,
                previous,
                target: (new_start, new_end),
            },
        );

        log::info!(
            "Moving {} to {} - {} (seq {})",
            key,
            new_start,
            new_end,
            sequence
        );

        Ok(MoveTicket {
            receipt: MoveReceipt {
                key: key.clone(),
                sequence,
                previous,
            },
            request,
        })
    }

    /// Apply the backend's answer to a move.
    pub fn finish_move(
        &mut self,
        receipt: &MoveReceipt,
        outcome: Result<(), ApiError>,
    ) -> MoveResolution {
        let current = self.in_flight.get(&receipt.key).map(|pending| pending.sequence);
        if current != Some(receipt.sequence) {
            log::warn!(
                "Discarding stale response for {} (seq {})",
                receipt.key,
                receipt.sequence
            );
            return MoveResolution::Stale(receipt.key.clone());
        }
        self.in_flight.remove(&receipt.key);

        match outcome {
            Ok(()) => {
                log::info!("Move of {} confirmed", receipt.key);
                MoveResolution::Confirmed(receipt.key.clone())
            }
            Err(err) => {
                log::warn!("Move of {} failed, rolling back: {}", receipt.key, err);
                if let Some(event) = self
                    .events
                    .iter_mut()
                    .find(|event| event.key() == receipt.key)
                {
                    (event.start, event.end) = receipt.previous;
                }
                sort_events(&mut self.events);

                MoveResolution::RolledBack {
                    key: receipt.key.clone(),
                    failure: MoveFailure::from_api_error(&err),
                }
            }
        }
    }

    /// Move an event and wait for the backend in the calling thread.
    pub fn attempt_move(
        &mut self,
        backend: &dyn PlanningBackend,
        key: &EventKey,
        new_start: NaiveDateTime,
        new_end: NaiveDateTime,
    ) -> Result<MoveResolution, MoveError> {
        let ticket = self.begin_move(key, new_start, new_end)?;
        let outcome = backend.send(&ticket.request);
        Ok(self.finish_move(&ticket.receipt, outcome))
    }
}
