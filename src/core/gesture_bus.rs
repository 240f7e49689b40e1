//=========================================================================
// Gesture Bus
//=========================================================================
//
// Fan-out of gesture events to any number of subscribers.
//
// Architecture:
//   GestureRecognizer → publish() ─┬─ filter → Sender ─→ Subscription A
//                                  ├─ filter → Sender ─→ Subscription B
//                                  └─ ...
//
// Pattern: subscribe (on start) → drain receiver each frame → unsubscribe
// (on stop). Each subscription owns a crossbeam receiver, so consumers can
// live on any thread. A subscription whose receiver was dropped is pruned
// on the next publish.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender, TryIter};
use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::input::{GestureEvent, GestureFilter};

//=== SubscriptionId ======================================================

/// Handle used to cancel a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

//=== Subscription ========================================================

/// Consumer side of a bus subscription.
///
/// Events accepted by the subscription's filter arrive in publish order.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: Receiver<GestureEvent>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Iterates over the events received so far without blocking.
    pub fn try_iter(&self) -> TryIter<'_, GestureEvent> {
        self.receiver.try_iter()
    }

    /// Collects every pending event.
    pub fn drain(&self) -> Vec<GestureEvent> {
        self.receiver.try_iter().collect()
    }

    /// Underlying channel, for `select!` or blocking receives.
    pub fn receiver(&self) -> &Receiver<GestureEvent> {
        &self.receiver
    }
}

//=== GestureBus ==========================================================

struct Subscriber {
    id: SubscriptionId,
    filter: GestureFilter,
    sender: Sender<GestureEvent>,
}

/// Explicit-lifetime publish/subscribe channel for gesture events.
pub struct GestureBus {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl GestureBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    //--- Subscription Management ------------------------------------------

    /// Registers a consumer for the kinds accepted by `filter`.
    pub fn subscribe(&mut self, filter: GestureFilter) -> Subscription {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let (sender, receiver) = unbounded();
        self.subscribers.push(Subscriber { id, filter, sender });

        debug!(target: "gesture", "Subscription {:?} registered ({:?})", id, filter);
        Subscription { id, receiver }
    }

    /// Cancels a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|subscriber| subscriber.id != id);

        let removed = self.subscribers.len() != before;
        if removed {
            debug!(target: "gesture", "Subscription {:?} released", id);
        }
        removed
    }

    //--- Publishing -------------------------------------------------------

    /// Delivers `events` to every subscriber whose filter accepts them.
    pub fn publish(&mut self, events: &[GestureEvent]) {
        if events.is_empty() {
            return;
        }

        self.subscribers.retain(|subscriber| {
            for event in events.iter().filter(|e| subscriber.filter.accepts(e.kind())) {
                if subscriber.sender.send(*event).is_err() {
                    trace!(target: "gesture", "Subscription {:?} dropped, pruning", subscriber.id);
                    return false;
                }
            }
            true
        });
    }

    //--- Query API --------------------------------------------------------

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for GestureBus {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
