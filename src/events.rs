//! Gesture Event Channels
//!
//! Each gesture kind has its own [`EventChannel`]: an ordered list of
//! subscriber callbacks that are invoked synchronously, in subscription order,
//! whenever the engine emits on that channel. Subscribers are removed
//! explicitly with the [`SubscriptionId`] returned at subscription time.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::gesture::{DragStatus, HoldStatus, SwipeDirection, TouchStatus};
use crate::math::Vec2;

/// Touch presence: down, held (every frame while down), up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub status: TouchStatus,
    pub position: Vec2,
}

/// Short press and release inside the dead zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapEvent {
    pub position: Vec2,
}

/// Press and release inside the dead zone after the tap window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongTapEvent {
    pub position: Vec2,
}

/// Stationary hold beginning or ending
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldEvent {
    pub status: HoldStatus,
    pub position: Vec2,
}

/// Drag progress; `delta` is the movement reported for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    pub status: DragStatus,
    pub position: Vec2,
    pub delta: Vec2,
}

/// Completed swipe; `vector` is the unit displacement from begin to release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeEvent {
    pub direction: SwipeDirection,
    pub vector: Vec2,
}

/// Change in distance between two contacts (positive when pinching in)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchZoomEvent {
    pub delta: f32,
}

/// Any gesture event, for subscribers that want everything in order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Touch(TouchEvent),
    Tap(TapEvent),
    LongTap(LongTapEvent),
    Hold(HoldEvent),
    Drag(DragEvent),
    Swipe(SwipeEvent),
    PinchZoom(PinchZoomEvent),
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureEvent::Touch(e) => write!(f, "Touch {:?} {}", e.status, e.position),
            GestureEvent::Tap(e) => write!(f, "Tap {}", e.position),
            GestureEvent::LongTap(e) => write!(f, "LongTap {}", e.position),
            GestureEvent::Hold(e) => write!(f, "Hold {:?} {}", e.status, e.position),
            GestureEvent::Drag(e) => {
                write!(f, "Drag {:?} {} delta {}", e.status, e.position, e.delta)
            }
            GestureEvent::Swipe(e) => write!(f, "Swipe {} {}", e.direction, e.vector),
            GestureEvent::PinchZoom(e) => write!(f, "PinchZoom {:.2}", e.delta),
        }
    }
}

/// Handle for removing a subscriber from a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered list of subscribers for one event type
pub struct EventChannel<E> {
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut(&E)>)>,
    next_id: u64,
}

impl<E> EventChannel<E> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Add a subscriber; it runs after every subscriber added before it
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber
    ///
    /// Returns false if `id` was not subscribed to this channel.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Invoke every subscriber with `event`
    pub fn emit(&mut self, event: &E) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(event);
        }
    }

    pub fn has_subscribers(&self) -> bool {
        !self.subscribers.is_empty()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<E> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscriptions created by [`GestureEvents::subscribe_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllSubscriptions {
    touch: SubscriptionId,
    tap: SubscriptionId,
    long_tap: SubscriptionId,
    hold: SubscriptionId,
    drag: SubscriptionId,
    swipe: SubscriptionId,
    pinch_zoom: SubscriptionId,
}

type SharedCallback = Rc<RefCell<dyn FnMut(GestureEvent)>>;

fn forward(callback: &SharedCallback, event: GestureEvent) {
    let mut callback = callback.borrow_mut();
    (&mut *callback)(event);
}

/// The full set of gesture channels exposed by the engine
#[derive(Default)]
pub struct GestureEvents {
    pub touch: EventChannel<TouchEvent>,
    pub tap: EventChannel<TapEvent>,
    pub long_tap: EventChannel<LongTapEvent>,
    pub hold: EventChannel<HoldEvent>,
    pub drag: EventChannel<DragEvent>,
    pub swipe: EventChannel<SwipeEvent>,
    pub pinch_zoom: EventChannel<PinchZoomEvent>,
}

impl GestureEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe one callback to every channel
    ///
    /// The callback sees all events in emission order.
    pub fn subscribe_all(&mut self, callback: impl FnMut(GestureEvent) + 'static) -> AllSubscriptions {
        let shared: SharedCallback = Rc::new(RefCell::new(callback));

        let cb = shared.clone();
        let touch = self.touch.subscribe(move |e| forward(&cb, GestureEvent::Touch(*e)));
        let cb = shared.clone();
        let tap = self.tap.subscribe(move |e| forward(&cb, GestureEvent::Tap(*e)));
        let cb = shared.clone();
        let long_tap = self
            .long_tap
            .subscribe(move |e| forward(&cb, GestureEvent::LongTap(*e)));
        let cb = shared.clone();
        let hold = self.hold.subscribe(move |e| forward(&cb, GestureEvent::Hold(*e)));
        let cb = shared.clone();
        let drag = self.drag.subscribe(move |e| forward(&cb, GestureEvent::Drag(*e)));
        let cb = shared.clone();
        let swipe = self.swipe.subscribe(move |e| forward(&cb, GestureEvent::Swipe(*e)));
        let cb = shared;
        let pinch_zoom = self
            .pinch_zoom
            .subscribe(move |e| forward(&cb, GestureEvent::PinchZoom(*e)));

        AllSubscriptions {
            touch,
            tap,
            long_tap,
            hold,
            drag,
            swipe,
            pinch_zoom,
        }
    }

    /// Undo [`subscribe_all`](Self::subscribe_all)
    pub fn unsubscribe_all(&mut self, subscriptions: AllSubscriptions) {
        self.touch.unsubscribe(subscriptions.touch);
        self.tap.unsubscribe(subscriptions.tap);
        self.long_tap.unsubscribe(subscriptions.long_tap);
        self.hold.unsubscribe(subscriptions.hold);
        self.drag.unsubscribe(subscriptions.drag);
        self.swipe.unsubscribe(subscriptions.swipe);
        self.pinch_zoom.unsubscribe(subscriptions.pinch_zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_run_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut channel = EventChannel::<TapEvent>::new();

        let first = log.clone();
        channel.subscribe(move |_| first.borrow_mut().push("first"));
        let second = log.clone();
        channel.subscribe(move |_| second.borrow_mut().push("second"));

        channel.emit(&TapEvent { position: Vec2::ZERO });
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut channel = EventChannel::<PinchZoomEvent>::new();
        let counter = count.clone();
        let id = channel.subscribe(move |_| *counter.borrow_mut() += 1);

        channel.emit(&PinchZoomEvent { delta: 1.0 });
        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        channel.emit(&PinchZoomEvent { delta: 1.0 });

        assert_eq!(*count.borrow(), 1);
        assert!(!channel.has_subscribers());
    }

    #[test]
    fn test_subscribe_all_sees_every_channel() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut events = GestureEvents::new();
        let sink = log.clone();
        let subs = events.subscribe_all(move |e| sink.borrow_mut().push(e));

        events.tap.emit(&TapEvent { position: Vec2::new(1.0, 2.0) });
        events.pinch_zoom.emit(&PinchZoomEvent { delta: -1.0 });
        assert_eq!(
            *log.borrow(),
            vec![
                GestureEvent::Tap(TapEvent { position: Vec2::new(1.0, 2.0) }),
                GestureEvent::PinchZoom(PinchZoomEvent { delta: -1.0 }),
            ]
        );

        events.unsubscribe_all(subs);
        assert_eq!(events.touch.subscriber_count(), 0);
        assert_eq!(events.swipe.subscriber_count(), 0);
    }
}
