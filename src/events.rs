//! # Events Module
//!
//! Outward notifications raised by the core, plus the subscription bus the
//! session owns.
//!
//! Notifications are fire-and-forget: any number of subscribers, no
//! ordering guarantees between them, and no subscriber can veto a state
//! change. Hosts that prefer polling over callbacks can drain the same
//! events from [`crate::GameSession::poll_events`].

use crate::board::SlotIndex;
use crate::systems::wheel::RewardKind;
use crate::tiles::TileId;

/// A state change the presentation layer may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Two tiles merged; `tile` is the surviving tile in `slot`.
    TileMerged {
        tile: TileId,
        slot: SlotIndex,
        value: u64,
    },
    /// A tile's value matched the goal; the tile has been consumed.
    GoalReached { tile: TileId, value: u64 },
    /// A tile appeared on the board (player generation, effects, or load).
    TileGenerated {
        tile: TileId,
        slot: SlotIndex,
        value: u64,
        transform: bool,
    },
    /// The bonus inventory changed.
    InventoryChanged {
        double_merge: bool,
        pending_mystery_tiles: u32,
    },
    /// The energy store changed.
    EnergyChanged { current: u32, max: u32 },
    /// The reward wheel resolved and its reward was applied.
    WheelRewardGranted { kind: RewardKind, count: u32 },
}

/// Handle for removing a subscription.
pub type SubscriptionId = u64;

type EventHandler = Box<dyn FnMut(&GameEvent)>;

/// Observer registry with an explicit subscribe/unsubscribe lifecycle.
///
/// Owned by the session rather than living in process-wide statics, so
/// subscriptions cannot leak across session teardowns.
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<(SubscriptionId, EventHandler)>,
    next_id: SubscriptionId,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler; the returned ID unsubscribes it later.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Removes a handler. Returns false if the ID was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Delivers an event to every subscriber in subscription order.
    pub fn publish(&mut self, event: &GameEvent) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
