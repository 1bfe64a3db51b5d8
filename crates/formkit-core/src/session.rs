#![forbid(unsafe_code)]

//! Drag gesture lifecycle over an [`Arrangement`].
//!
//! ```text
//! Idle -> Dragging -> Committing -> Idle
//!             \-----> Cancelling -> Idle
//! ```
//!
//! [`DragMachine`] owns the arrangement and at most one [`DragSession`]. It
//! is the only mutator of the arrangement while a gesture is active.
//!
//! # Invariants
//!
//! 1. At most one session exists; `begin` while dragging is a no-op.
//! 2. The carried occupant is out of the arrangement for the whole gesture
//!    and is put back exactly once: at the provisional position on commit,
//!    at its origin on cancel.
//! 3. After every terminal transition the arrangement holds every occupant
//!    it held before the gesture began.
//! 4. Transitions are a pure function of the call sequence and the layouts
//!    passed in. No clocks, no randomness.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Outcome |
//! |---------|-------|---------|
//! | Drop with no target under pointer | pointer left every zone | `Cancelled { NoDropTarget }` |
//! | Drop onto a filled slot | slots never swap | `Cancelled { SlotOccupied }` |
//! | Structural error on put-back | caller corrupted the arrangement | [`InvariantPolicy`] |

use std::fmt;

use crate::collection::{Arrangement, CollectionError, OccupantId};
use crate::geometry::{Point, Size};
use crate::layout::{LayoutSnapshot, Zone};
use crate::spatial::SpatialIndex;

/// Lifecycle phase.
///
/// `Committing` and `Cancelling` are never resting states: they are reported
/// as the `via` phase of the transition that returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DragPhase {
    Idle,
    Dragging,
    Committing,
    Cancelling,
}

/// Why a gesture ended without a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CancelReason {
    /// Released with no valid drop target under the pointer.
    NoDropTarget,
    /// Released over a slot that already holds an occupant.
    SlotOccupied,
    PointerCancel,
    PointerLeave,
    EscapeKey,
    Blur,
    /// Cancelled by the widget itself (e.g. submit during a drag).
    Programmatic,
}

/// Why a call changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NoopReason {
    IdleWithoutActiveDrag,
    ActiveDragAlreadyInProgress,
    UnknownOccupant,
    ProvisionalUnchanged,
}

/// What to do when the arrangement is found structurally broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantPolicy {
    /// Panic with the offending error. Development default.
    Panic,
    /// Restore the arrangement from the snapshot taken when the gesture
    /// began and log a warning.
    Recover,
}

impl Default for InvariantPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Panic
        } else {
            Self::Recover
        }
    }
}

/// One active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragSession<P> {
    carried: OccupantId,
    origin: P,
    provisional: Option<P>,
    size_hint: Option<Size>,
    started_sequence: u64,
}

impl<P: Copy> DragSession<P> {
    /// Occupant being moved.
    #[must_use]
    pub const fn carried(&self) -> OccupantId {
        self.carried
    }

    /// Where the gesture began.
    #[must_use]
    pub const fn origin(&self) -> P {
        self.origin
    }

    /// Current candidate destination; `None` means no valid target.
    #[must_use]
    pub const fn provisional(&self) -> Option<P> {
        self.provisional
    }

    /// Rendered size of the carried occupant when it was picked up.
    #[must_use]
    pub const fn size_hint(&self) -> Option<Size> {
        self.size_hint
    }

    #[must_use]
    pub const fn started_sequence(&self) -> u64 {
        self.started_sequence
    }
}

/// Effect of one machine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "effect", rename_all = "snake_case"))]
pub enum DragEffect<P> {
    Lifted {
        occupant: OccupantId,
        origin: P,
        zone: Zone,
    },
    Retargeted {
        occupant: OccupantId,
        previous: Option<P>,
        current: Option<P>,
    },
    Committed {
        occupant: OccupantId,
        origin: P,
        destination: P,
    },
    Cancelled {
        occupant: OccupantId,
        origin: P,
        reason: CancelReason,
    },
    /// The arrangement was rebuilt from its pre-gesture snapshot.
    Recovered {
        occupant: OccupantId,
        error: CollectionError,
    },
    Noop {
        reason: NoopReason,
    },
}

impl<P> DragEffect<P> {
    /// Whether the call ended a gesture.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Committed { .. } | Self::Cancelled { .. } | Self::Recovered { .. }
        )
    }

    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::Noop { .. })
    }
}

/// One state-machine transition with deterministic telemetry fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragTransition<P> {
    pub transition_id: u64,
    pub sequence: u64,
    pub from: DragPhase,
    /// Transient phase passed through, for terminal transitions.
    pub via: Option<DragPhase>,
    pub to: DragPhase,
    pub effect: DragEffect<P>,
}

/// Machine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragConfig {
    /// Hit-testing rule.
    pub spatial: SpatialIndex,
    pub invariant_policy: InvariantPolicy,
}

impl DragConfig {
    #[must_use]
    pub fn with_spatial(mut self, spatial: SpatialIndex) -> Self {
        self.spatial = spatial;
        self
    }

    #[must_use]
    pub fn with_invariant_policy(mut self, policy: InvariantPolicy) -> Self {
        self.invariant_policy = policy;
        self
    }
}

/// Drag lifecycle machine; sole mutator of its arrangement.
#[derive(Clone)]
pub struct DragMachine<A: Arrangement> {
    arrangement: A,
    known_good: A,
    membership: usize,
    session: Option<DragSession<A::Position>>,
    config: DragConfig,
    transition_counter: u64,
    next_sequence: u64,
}

impl<A: Arrangement> fmt::Debug for DragMachine<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragMachine")
            .field("arrangement", &self.arrangement)
            .field("session", &self.session)
            .field("transitions", &self.transition_counter)
            .finish()
    }
}

impl<A: Arrangement> DragMachine<A> {
    #[must_use]
    pub fn new(arrangement: A, config: DragConfig) -> Self {
        Self {
            membership: arrangement.occupant_count(),
            known_good: arrangement.clone(),
            arrangement,
            session: None,
            config,
            transition_counter: 0,
            next_sequence: 1,
        }
    }

    /// Authoritative arrangement. While dragging it excludes the carried
    /// occupant.
    #[must_use]
    pub const fn arrangement(&self) -> &A {
        &self.arrangement
    }

    /// Arrangement a cancel would settle on: the pre-lift snapshot while
    /// dragging, otherwise the current arrangement.
    #[must_use]
    pub const fn settled(&self) -> &A {
        if self.session.is_some() {
            &self.known_good
        } else {
            &self.arrangement
        }
    }

    /// Active gesture, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession<A::Position>> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn config(&self) -> DragConfig {
        self.config
    }

    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        if self.session.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Occupants the arrangement holds when idle.
    #[must_use]
    pub const fn membership(&self) -> usize {
        self.membership
    }

    /// Pick up `occupant`.
    ///
    /// The occupant leaves the arrangement immediately (a slot origin is
    /// vacated right away) and the provisional position starts at the origin.
    pub fn begin(
        &mut self,
        occupant: OccupantId,
        layout: &LayoutSnapshot,
    ) -> DragTransition<A::Position> {
        let sequence = self.bump_sequence();
        if self.session.is_some() {
            return self.finish(
                sequence,
                None,
                DragEffect::Noop {
                    reason: NoopReason::ActiveDragAlreadyInProgress,
                },
            );
        }
        let snapshot = self.arrangement.clone();
        let origin = match self.arrangement.remove(occupant) {
            Ok(origin) => origin,
            Err(_) => {
                return self.finish(
                    sequence,
                    None,
                    DragEffect::Noop {
                        reason: NoopReason::UnknownOccupant,
                    },
                );
            }
        };
        self.known_good = snapshot;
        self.session = Some(DragSession {
            carried: occupant,
            origin,
            provisional: Some(origin),
            size_hint: layout.size_hint(occupant),
            started_sequence: sequence,
        });
        tracing::debug!(
            message = "drag.begin",
            occupant = occupant.get(),
            origin = ?origin,
            sequence
        );
        self.finish(
            sequence,
            None,
            DragEffect::Lifted {
                occupant,
                origin,
                zone: A::zone_of(origin),
            },
        )
    }

    /// Re-resolve the provisional position for a pointer move.
    pub fn update(&mut self, point: Point, layout: &LayoutSnapshot) -> DragTransition<A::Position> {
        let sequence = self.bump_sequence();
        let Some(session) = self.session else {
            return self.finish(
                sequence,
                None,
                DragEffect::Noop {
                    reason: NoopReason::IdleWithoutActiveDrag,
                },
            );
        };
        let current =
            self.arrangement
                .resolve(layout, &self.config.spatial, point, Some(session.carried));
        if current == session.provisional {
            return self.finish(
                sequence,
                None,
                DragEffect::Noop {
                    reason: NoopReason::ProvisionalUnchanged,
                },
            );
        }
        self.session = Some(DragSession {
            provisional: current,
            ..session
        });
        tracing::trace!(
            message = "drag.retarget",
            occupant = session.carried.get(),
            previous = ?session.provisional,
            current = ?current,
            sequence
        );
        self.finish(
            sequence,
            None,
            DragEffect::Retargeted {
                occupant: session.carried,
                previous: session.provisional,
                current,
            },
        )
    }

    /// Pointer released: commit at the provisional position, or cancel when
    /// there is none or the destination refuses the occupant.
    pub fn release(&mut self) -> DragTransition<A::Position> {
        let sequence = self.bump_sequence();
        let Some(session) = self.session.take() else {
            return self.finish(
                sequence,
                None,
                DragEffect::Noop {
                    reason: NoopReason::IdleWithoutActiveDrag,
                },
            );
        };
        let Some(destination) = session.provisional else {
            return self.put_back(sequence, session, CancelReason::NoDropTarget);
        };
        match self.arrangement.insert_at(session.carried, destination) {
            Ok(destination) => {
                if let Err(error) = self.verify_membership(session.carried) {
                    return self.recover(sequence, session, error);
                }
                tracing::debug!(
                    message = "drag.commit",
                    occupant = session.carried.get(),
                    origin = ?session.origin,
                    destination = ?destination,
                    sequence
                );
                self.finish(
                    sequence,
                    Some(DragPhase::Committing),
                    DragEffect::Committed {
                        occupant: session.carried,
                        origin: session.origin,
                        destination,
                    },
                )
            }
            Err(CollectionError::SlotOccupied { .. }) => {
                self.put_back(sequence, session, CancelReason::SlotOccupied)
            }
            Err(error) => self.recover(sequence, session, error),
        }
    }

    /// Abandon the gesture and return the occupant to its origin.
    pub fn cancel(&mut self, reason: CancelReason) -> DragTransition<A::Position> {
        let sequence = self.bump_sequence();
        match self.session.take() {
            Some(session) => self.put_back(sequence, session, reason),
            None => self.finish(
                sequence,
                None,
                DragEffect::Noop {
                    reason: NoopReason::IdleWithoutActiveDrag,
                },
            ),
        }
    }

    /// Cancel with [`CancelReason::Programmatic`] if a gesture is active.
    pub fn force_cancel(&mut self) -> Option<DragTransition<A::Position>> {
        self.session
            .is_some()
            .then(|| self.cancel(CancelReason::Programmatic))
    }

    fn put_back(
        &mut self,
        sequence: u64,
        session: DragSession<A::Position>,
        reason: CancelReason,
    ) -> DragTransition<A::Position> {
        let restored = self
            .arrangement
            .insert_at(session.carried, session.origin)
            .and_then(|_| self.verify_membership(session.carried));
        if let Err(error) = restored {
            return self.recover(sequence, session, error);
        }
        tracing::debug!(
            message = "drag.cancel",
            occupant = session.carried.get(),
            origin = ?session.origin,
            ?reason,
            sequence
        );
        self.finish(
            sequence,
            Some(DragPhase::Cancelling),
            DragEffect::Cancelled {
                occupant: session.carried,
                origin: session.origin,
                reason,
            },
        )
    }

    fn verify_membership(&self, carried: OccupantId) -> Result<(), CollectionError> {
        if self.arrangement.occupant_count() == self.membership
            && self.arrangement.contains(carried)
        {
            Ok(())
        } else {
            Err(CollectionError::DuplicateOccupant { id: carried })
        }
    }

    fn recover(
        &mut self,
        sequence: u64,
        session: DragSession<A::Position>,
        error: CollectionError,
    ) -> DragTransition<A::Position> {
        match self.config.invariant_policy {
            InvariantPolicy::Panic => {
                panic!("drag machine invariant violated for {}: {error}", session.carried)
            }
            InvariantPolicy::Recover => {
                tracing::warn!(
                    message = "drag.invariant_recovered",
                    occupant = session.carried.get(),
                    %error,
                    sequence
                );
                self.arrangement = self.known_good.clone();
                self.finish(
                    sequence,
                    Some(DragPhase::Cancelling),
                    DragEffect::Recovered {
                        occupant: session.carried,
                        error,
                    },
                )
            }
        }
    }

    fn bump_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        sequence
    }

    fn finish(
        &mut self,
        sequence: u64,
        via: Option<DragPhase>,
        effect: DragEffect<A::Position>,
    ) -> DragTransition<A::Position> {
        let from = match (&effect, via) {
            (_, Some(_)) => DragPhase::Dragging,
            (DragEffect::Lifted { .. }, None) => DragPhase::Idle,
            (DragEffect::Noop { .. }, None) => self.phase(),
            (_, None) => DragPhase::Dragging,
        };
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            sequence,
            from,
            via,
            to: self.phase(),
            effect,
        }
    }
}
