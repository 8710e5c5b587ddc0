use std::collections::VecDeque;
use std::io::{self, Write};

use log::{debug, warn};
use tokio::sync::watch;

use super::base::{Overlay, OverlayContext, OverlayEntry};
use super::registry::LifecycleStatesRegistry;
use super::stack::LifoStack;
use super::types::{KeyEvent, LifecycleState, NavigationRequest, OverlayId};
use crate::base::{Dumpable, add_dump_tab};
use crate::display::{DisplayMonitor, Orientation, Point};
use crate::menu::MenuPositionDataSource;

type CompletionListener = Box<dyn FnOnce()>;

/// Coordinator for the overlay back stack.
///
/// All navigation intents are serialized into a one-at-a-time pipeline: a call
/// made while a transition is in flight only enqueues a request, it never
/// executes inline. The pipeline genuinely pauses between "destroy requested"
/// and the host's [`confirm_dismissed`](Self::confirm_dismissed) call; a
/// never-confirmed dismissal stalls it indefinitely, there is deliberately no
/// timeout (the host window system is trusted to always deliver the signal).
///
/// Everything runs on the caller's thread; the `navigating` flag is a
/// cooperative reentrancy guard, not a lock.
pub struct OverlayManager {
    display: Box<dyn DisplayMonitor>,
    menu_positions: MenuPositionDataSource,

    /// All overlays, from the root to the top visible one.
    back_stack: LifoStack<OverlayEntry>,
    /// Pending navigation requests, drained in enqueue order.
    request_queue: VecDeque<NavigationRequest>,
    /// Saved lifecycle states while the stack is hidden.
    lifecycles: LifecycleStatesRegistry,

    /// True while navigation requests are being executed.
    navigating: bool,
    /// The overlay shown above the whole back stack, if any. Not stacked.
    top_overlay: Option<OverlayEntry>,
    /// Notifies the caller of `navigate_up_to_root` once the queue drains.
    up_to_root_listener: Option<CompletionListener>,

    /// Publishes the back stack top, only between navigations.
    top_tx: watch::Sender<Option<OverlayId>>,
    /// Last orientation reported by the host, display metrics for new overlays.
    orientation: Orientation,
    next_id: u64,
}

impl OverlayManager {
    pub fn new(display: Box<dyn DisplayMonitor>) -> Self {
        let orientation = display.orientation();
        let (top_tx, _) = watch::channel(None);
        Self {
            display,
            menu_positions: MenuPositionDataSource::new(),
            back_stack: LifoStack::new(),
            request_queue: VecDeque::new(),
            lifecycles: LifecycleStatesRegistry::new(),
            navigating: false,
            top_overlay: None,
            up_to_root_listener: None,
            top_tx,
            orientation,
            next_id: 0,
        }
    }

    /// Display the provided overlay and pause the current one, if any.
    pub fn navigate_to(&mut self, overlay: Box<dyn Overlay>, hide_current: bool) {
        debug!(
            "Queueing NavigateTo request: hide_current={hide_current}, overlay={}, \
             currently navigating: {}",
            overlay.name(),
            self.navigating
        );

        self.request_queue.push_back(NavigationRequest::NavigateTo {
            overlay,
            hide_current,
        });
        if !self.navigating {
            self.process_requests();
        }
    }

    /// Destroy the currently shown overlay.
    ///
    /// Returns false if the back stack is empty; callers must check this.
    pub fn navigate_up(&mut self) -> bool {
        if self.back_stack.is_empty() {
            return false;
        }
        debug!(
            "Queueing NavigateUp request, currently navigating: {}",
            self.navigating
        );

        self.request_queue.push_back(NavigationRequest::NavigateUp);
        if !self.navigating {
            self.process_requests();
        }
        true
    }

    /// Destroy all overlays in the back stack except the root one.
    ///
    /// `listener` fires once every overlay above the root is confirmed
    /// destroyed, or synchronously if there is nothing to destroy.
    pub fn navigate_up_to_root(&mut self, listener: impl FnOnce() + 'static) {
        if self.back_stack.len() <= 1 {
            listener();
            return;
        }

        self.up_to_root_listener = Some(Box::new(listener));
        let navigate_up_count = self.back_stack.len() - 1;
        debug!(
            "Navigating to root, queueing {navigate_up_count} NavigateUp requests, \
             currently navigating: {}",
            self.navigating
        );

        for _ in 0..navigate_up_count {
            self.request_queue.push_back(NavigationRequest::NavigateUp);
        }
        if !self.navigating {
            self.process_requests();
        }
    }

    /// Destroy all overlays: the top overlay slot immediately, the whole back
    /// stack through the pipeline. Any queued requests are discarded.
    pub fn close_all(&mut self) {
        if self.top_overlay.is_none() && self.back_stack.is_empty() {
            return;
        }

        debug!(
            "Closing all overlays ({} stacked), currently navigating: {}",
            self.back_stack.len(),
            self.navigating
        );

        self.request_queue.clear();
        if let Some(mut top) = self.top_overlay.take() {
            top.request_destroy();
        }
        for _ in 0..self.back_stack.len() {
            self.request_queue.push_back(NavigationRequest::NavigateUp);
        }
        if !self.navigating {
            self.process_requests();
        }
    }

    /// The host window system confirmed the teardown of an overlay window.
    ///
    /// Only now is the overlay popped from the back stack and the request
    /// pipeline resumed. A confirmation for the top overlay slot clears the
    /// slot. Confirmations naming an unknown overlay, or one whose destroy
    /// was never requested, are logged and ignored.
    pub fn confirm_dismissed(&mut self, id: OverlayId) {
        if let Some(top) = self.top_overlay.as_ref().filter(|top| top.id() == id) {
            if !top.is_pending_dismiss() {
                warn!("Dismissal confirmed for live top overlay {id}, ignoring");
                return;
            }
            debug!("Top overlay {id} dismissed");
            self.top_overlay = None;
            return;
        }

        match self.back_stack.peek().filter(|top| top.id() == id) {
            Some(top) if top.is_pending_dismiss() => {}
            Some(_) => {
                warn!("Dismissal confirmed for overlay {id} without a destroy request, ignoring");
                return;
            }
            None => {
                warn!("Dismissal confirmed for unknown overlay {id}, ignoring");
                return;
            }
        }

        debug!("Overlay {id} dismissed");
        if let Some(mut entry) = self.back_stack.pop() {
            entry.mark_destroyed();
        }

        // No overlays left, no need to keep track of the orientation.
        if self.back_stack.is_empty() {
            self.display.stop_monitoring();
        }

        self.process_requests();
    }

    /// Propagate the provided key event to the focused overlay, if any.
    pub fn propagate_key_event(&mut self, event: &KeyEvent) -> bool {
        debug!("Propagating key event {event:?}");

        if let Some(top) = self.top_overlay.as_mut() {
            return top.handle_key_event(event);
        }
        if let Some(top) = self.back_stack.peek_mut() {
            return top.handle_key_event(event);
        }
        false
    }

    /// The host display rotated. Propagated to every stacked overlay, top to
    /// bottom. Ignored while orientation monitoring is inactive.
    pub fn notify_orientation_changed(&mut self, orientation: Orientation) {
        if !self.display.is_monitoring() {
            return;
        }
        debug!("Display orientation changed to {orientation:?}");

        self.orientation = orientation;
        for entry in self.back_stack.iter_rev_mut() {
            entry.change_orientation(orientation);
        }
    }

    /// Hide all overlays on the back stack.
    ///
    /// Their lifecycle states are saved and can be restored with
    /// [`restore_visibility`](Self::restore_visibility).
    pub fn hide_all(&mut self) {
        if self.is_stack_hidden() {
            return;
        }

        debug!("Hiding all overlays on the stack");

        // Save the states first, hiding changes them.
        self.lifecycles.save_states(self.back_stack.iter());
        // Hide from the top to the bottom of the stack.
        for entry in self.back_stack.iter_rev_mut() {
            entry.hide();
        }
    }

    /// Restore the states of all overlays saved by [`hide_all`](Self::hide_all).
    ///
    /// Only `Started` and `Resumed` saved states trigger a restorative call;
    /// anything else leaves the overlay untouched. The registry is always
    /// cleared afterwards.
    pub fn restore_visibility(&mut self) {
        if !self.is_stack_hidden() {
            return;
        }

        let states = self.lifecycles.restore_states();
        if self.back_stack.is_empty() || states.is_empty() {
            return;
        }

        debug!("Restoring overlays visibility");

        // Restore from the bottom to the top of the stack.
        for entry in self.back_stack.iter_mut() {
            match states.get(&entry.id()) {
                Some(LifecycleState::Started) => entry.start(),
                Some(LifecycleState::Resumed) => entry.resume(),
                Some(state) => debug!("Overlay {} stays in {state:?}", entry.id()),
                None => warn!(
                    "State for overlay {} not found, can't restore it",
                    entry.id()
                ),
            }
        }
    }

    /// True if the overlay stack has been hidden via [`hide_all`](Self::hide_all).
    pub fn is_stack_hidden(&self) -> bool {
        self.lifecycles.have_states()
    }

    pub fn is_overlay_stack_visible(&self) -> bool {
        self.back_stack.peek().is_some_and(OverlayEntry::is_visible)
    }

    /// Show an overlay above everything in the back stack, "an overlay for
    /// overlays". It is not stacked and has an independent lifecycle.
    ///
    /// No-op if a top overlay is already set or the back stack is empty (the
    /// top overlay borrows its display context from the current stack top).
    pub fn set_top_overlay(&mut self, overlay: Box<dyn Overlay>) {
        if self.top_overlay.is_some() || self.back_stack.is_empty() {
            return;
        }

        let ctx = self.current_context();
        let id = self.allocate_id();
        debug!("Creating top overlay {id} ({})", overlay.name());

        let mut entry = OverlayEntry::create(id, overlay, &ctx);
        entry.resume();
        self.top_overlay = Some(entry);
    }

    /// Remove and destroy the overlay set with [`set_top_overlay`](Self::set_top_overlay).
    pub fn remove_top_overlay(&mut self) {
        debug!("Removing top overlay");

        if let Some(mut top) = self.top_overlay.take() {
            top.request_destroy();
        }
    }

    pub fn lock_menu_position(&mut self, position: Point) {
        self.menu_positions.lock_position(position);
    }

    pub fn unlock_menu_position(&mut self) {
        self.menu_positions.unlock_position();
    }

    pub fn menu_positions(&self) -> &MenuPositionDataSource {
        &self.menu_positions
    }

    pub fn menu_positions_mut(&mut self) -> &mut MenuPositionDataSource {
        &mut self.menu_positions
    }

    /// Observable top of the back stack, published only between navigations.
    pub fn back_stack_top(&self) -> watch::Receiver<Option<OverlayId>> {
        self.top_tx.subscribe()
    }

    pub fn back_stack_top_id(&self) -> Option<OverlayId> {
        self.back_stack.peek().map(OverlayEntry::id)
    }

    pub fn stack_size(&self) -> usize {
        self.back_stack.len()
    }

    pub fn is_navigating(&self) -> bool {
        self.navigating
    }

    /// Current lifecycle state of a stacked or top overlay.
    pub fn overlay_state(&self, id: OverlayId) -> Option<LifecycleState> {
        if let Some(top) = self.top_overlay.as_ref().filter(|top| top.id() == id) {
            return Some(top.state());
        }
        self.back_stack
            .iter()
            .find(|entry| entry.id() == id)
            .map(OverlayEntry::state)
    }

    fn allocate_id(&mut self) -> OverlayId {
        self.next_id += 1;
        OverlayId(self.next_id)
    }

    fn current_context(&self) -> OverlayContext {
        OverlayContext {
            display_size: self.display.size(),
            orientation: self.orientation,
        }
    }

    /// The execution loop. Drains the request queue one request at a time;
    /// a NavigateUp leaves the loop until the dismissal is confirmed.
    fn process_requests(&mut self) {
        self.navigating = true;

        loop {
            let Some(request) = self.request_queue.pop_front() else {
                self.on_navigation_completed();
                return;
            };
            debug!("Executing navigation request {request:?}");

            match request {
                NavigationRequest::NavigateTo {
                    overlay,
                    hide_current,
                } => self.execute_navigate_to(overlay, hide_current),
                NavigationRequest::NavigateUp => {
                    if let Some(top) = self.back_stack.peek_mut() {
                        top.pause();
                        top.stop();
                        top.request_destroy();
                        // The overlay stays stacked until the host confirms
                        // the teardown; processing resumes from there.
                        return;
                    }
                    // Nothing left to destroy, move on to the next request.
                }
            }
        }
    }

    fn execute_navigate_to(&mut self, overlay: Box<dyn Overlay>, hide_current: bool) {
        // First overlay on the stack? Start tracking the display orientation.
        if self.back_stack.is_empty() {
            self.display.start_monitoring();
        }

        // Create the new overlay before touching the current top.
        let ctx = self.current_context();
        let id = self.allocate_id();
        let mut entry = OverlayEntry::create(id, overlay, &ctx);

        if let Some(current) = self.back_stack.peek_mut() {
            current.pause();
            if hide_current {
                current.stop();
            }
        }

        entry.start();
        self.back_stack.push(entry);
    }

    fn on_navigation_completed(&mut self) {
        if !self.back_stack.is_empty() {
            if !self.is_stack_hidden() {
                debug!("No more pending requests, resuming stack top overlay");
                if let Some(top) = self.back_stack.peek_mut() {
                    top.resume();
                }
            } else {
                debug!("No more pending requests, but stack is hidden, delaying resume");
            }
        }

        if let Some(listener) = self.up_to_root_listener.take() {
            listener();
        }

        let top_id = self.back_stack_top_id();
        self.top_tx.send_if_modified(|current| {
            if *current != top_id {
                debug!("New back stack top: {top_id:?}");
                *current = top_id;
                true
            } else {
                false
            }
        });

        self.navigating = false;
    }
}

impl Dumpable for OverlayManager {
    fn dump(&self, writer: &mut dyn Write, prefix: &str) -> io::Result<()> {
        let content_prefix = add_dump_tab(prefix);
        let item_prefix = add_dump_tab(&content_prefix);

        writeln!(writer, "{prefix}* OverlayManager:")?;

        writeln!(
            writer,
            "{content_prefix}- RequestQueue ({} pending):",
            self.request_queue.len()
        )?;
        for request in &self.request_queue {
            writeln!(writer, "{item_prefix}{request:?}")?;
        }

        writeln!(
            writer,
            "{content_prefix}- BackStack ({} overlays, navigating={}, hidden={}):",
            self.back_stack.len(),
            self.navigating,
            self.is_stack_hidden(),
        )?;
        for entry in self.back_stack.iter_rev() {
            entry.dump(writer, &item_prefix)?;
        }

        if let Some(top) = &self.top_overlay {
            writeln!(writer, "{content_prefix}- TopOverlay:")?;
            top.dump(writer, &item_prefix)?;
        }

        Ok(())
    }
}
