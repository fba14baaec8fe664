//! Machines: stateful instances driven through a shared schema.

use crate::binding::{Binding, Strong, Unbound};
use crate::core::{Direction, State, StateHistory, TransitionRecord};
use crate::schema::Schema;
use std::fmt;
use std::rc::{self, Rc};
use std::sync::{self, Arc};

/// Post-transition hook.
///
/// Called with `(previous_state, event, current_state, direction)` after the
/// machine has been fully updated.
pub type Observer<S, E> = Box<dyn FnMut(&S, &E, &S, Direction)>;

/// A state machine instance bound to one schema and one interactor.
///
/// All mutation goes through [`Machine::handle_event`]. Events that have no
/// transition, or that arrive after the interactor is gone, are ignored.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Direction, State};
/// use waypoint::machine::Machine;
/// use waypoint::schema::{goto, Schema};
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Turnstile { Locked, Unlocked }
///
/// impl State for Turnstile {
///     fn determine_direction(&self, _previous: &Self) -> Direction {
///         Direction::Idle
///     }
/// }
///
/// enum Input { Coin, Push }
///
/// let schema: Schema<Turnstile, Input, ()> = Schema::new(Turnstile::Locked, |state, event| match (state, event) {
///     (Turnstile::Locked, Input::Coin) => goto(Turnstile::Unlocked),
///     (Turnstile::Unlocked, Input::Push) => goto(Turnstile::Locked),
///     _ => None,
/// });
///
/// let mut machine = Machine::new(schema, (), None);
///
/// machine.handle_event(Input::Push);
/// assert_eq!(machine.current_state(), &Turnstile::Locked);
///
/// machine.handle_event(Input::Coin);
/// assert_eq!(machine.current_state(), &Turnstile::Unlocked);
/// assert_eq!(machine.previous_state(), &Turnstile::Locked);
/// ```
pub struct Machine<S, E, B: Binding> {
    current_state: S,
    previous_state: S,
    transition_direction: Direction,
    schema: Schema<S, E, B::Target>,
    binding: B,
    on_transition: Option<Observer<S, E>>,
    history: Option<StateHistory<S>>,
}

impl<S: State, E, I> Machine<S, E, Strong<I>> {
    /// Create a machine that owns its interactor.
    pub fn new(schema: Schema<S, E, I>, interactor: I, on_transition: Option<Observer<S, E>>) -> Self {
        Self::with_binding(schema, Strong(interactor), on_transition)
    }

    pub fn interactor(&self) -> &I {
        self.binding.get()
    }

    pub fn interactor_mut(&mut self) -> &mut I {
        self.binding.get_mut()
    }
}

impl<S: State, E, I: ?Sized> Machine<S, E, rc::Weak<I>> {
    /// Create a machine that only observes its interactor.
    ///
    /// Once the last `Rc` to the interactor is dropped the machine becomes
    /// inert.
    pub fn new_weak(
        schema: Schema<S, E, I>,
        interactor: &Rc<I>,
        on_transition: Option<Observer<S, E>>,
    ) -> Self {
        Self::with_binding(schema, Rc::downgrade(interactor), on_transition)
    }
}

impl<S: State, E, I: ?Sized> Machine<S, E, sync::Weak<I>> {
    /// Like [`Machine::new_weak`] for interactors shared across threads.
    pub fn new_weak_shared(
        schema: Schema<S, E, I>,
        interactor: &Arc<I>,
        on_transition: Option<Observer<S, E>>,
    ) -> Self {
        Self::with_binding(schema, Arc::downgrade(interactor), on_transition)
    }
}

impl<S: State, E, I: ?Sized> Machine<S, E, Unbound<I>> {
    /// Create a machine with no interactor. It ignores every event.
    pub fn unbound(schema: Schema<S, E, I>) -> Self {
        Self::with_binding(schema, Unbound::new(), None)
    }
}

impl<S: State, E, B: Binding> Machine<S, E, B> {
    /// Create a machine with an arbitrary interactor binding.
    pub fn with_binding(
        schema: Schema<S, E, B::Target>,
        binding: B,
        on_transition: Option<Observer<S, E>>,
    ) -> Self {
        let initial = schema.initial_state().clone();
        Self {
            current_state: initial.clone(),
            previous_state: initial,
            transition_direction: Direction::Forward,
            schema,
            binding,
            on_transition,
            history: None,
        }
    }

    /// Start recording applied transitions.
    pub fn with_history(mut self) -> Self {
        self.history.get_or_insert_with(StateHistory::new);
        self
    }

    pub fn current_state(&self) -> &S {
        &self.current_state
    }

    pub fn previous_state(&self) -> &S {
        &self.previous_state
    }

    pub fn transition_direction(&self) -> Direction {
        self.transition_direction
    }

    pub fn schema(&self) -> &Schema<S, E, B::Target> {
        &self.schema
    }

    pub fn binding(&self) -> &B {
        &self.binding
    }

    pub fn binding_mut(&mut self) -> &mut B {
        &mut self.binding
    }

    /// Whether the interactor can currently be resolved.
    ///
    /// `false` means the next event will be ignored regardless of the schema.
    pub fn is_bound(&self) -> bool {
        self.binding.is_available()
    }

    /// Recorded transitions, if recording was enabled.
    pub fn history(&self) -> Option<&StateHistory<S>> {
        self.history.as_ref()
    }

    /// Mutable access to the recorded transitions, e.g. to
    /// [`StateHistory::clear`] them. Recording continues afterwards.
    pub fn history_mut(&mut self) -> Option<&mut StateHistory<S>> {
        self.history.as_mut()
    }

    /// Hand back what has been recorded so far and start a fresh history.
    ///
    /// Returns `None` when recording was never enabled.
    pub fn take_history(&mut self) -> Option<StateHistory<S>> {
        self.history.as_mut().map(std::mem::take)
    }

    /// Install or replace the transition observer.
    pub fn set_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&S, &E, &S, Direction) + 'static,
    {
        self.on_transition = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.on_transition = None;
    }

    /// Apply `event`.
    ///
    /// Does nothing when the interactor is unavailable or the schema has no
    /// transition for the current state and `event`. Otherwise the previous
    /// state is updated, the effect runs against the interactor, the new
    /// state and direction are stored, and finally the observer is notified.
    ///
    /// A panic inside the effect leaves `previous_state` already updated and
    /// `current_state` untouched.
    pub fn handle_event(&mut self, event: E) {
        let Self {
            current_state,
            previous_state,
            schema,
            binding,
            ..
        } = self;

        let applied = binding.with_interactor(|interactor| {
            let effect = schema.transition(current_state, &event)?;
            *previous_state = current_state.clone();
            *current_state = effect(interactor);
            Some(())
        });

        match applied {
            None => {
                tracing::debug!(state = ?self.current_state, "interactor unavailable; event ignored");
                return;
            }
            Some(None) => {
                tracing::trace!(state = ?self.current_state, "no transition defined; event ignored");
                return;
            }
            Some(Some(())) => {}
        }

        self.transition_direction = self
            .current_state
            .determine_direction(&self.previous_state);

        tracing::debug!(
            from = ?self.previous_state,
            to = ?self.current_state,
            direction = ?self.transition_direction,
            "transition applied"
        );

        if let Some(history) = self.history.as_mut() {
            history.record(TransitionRecord::now(
                self.previous_state.clone(),
                self.current_state.clone(),
                self.transition_direction,
            ));
        }

        if let Some(observer) = self.on_transition.as_mut() {
            observer(
                &self.previous_state,
                &event,
                &self.current_state,
                self.transition_direction,
            );
        }
    }
}

impl<S: fmt::Debug, E, B: Binding + fmt::Debug> fmt::Debug for Machine<S, E, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("current_state", &self.current_state)
            .field("previous_state", &self.previous_state)
            .field("transition_direction", &self.transition_direction)
            .field("binding", &self.binding)
            .field("has_observer", &self.on_transition.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{effect, goto};
    use std::cell::{Cell, RefCell};

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum Step {
        Intro,
        Details,
        Review,
    }

    impl Step {
        fn index(self) -> u8 {
            self as u8
        }
    }

    impl State for Step {
        fn determine_direction(&self, previous: &Self) -> Direction {
            Direction::between(&self.index(), &previous.index())
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Nav {
        Next,
        Back,
        Stay,
    }

    /// Counts effect invocations.
    #[derive(Default)]
    struct Wizard {
        visits: Cell<u32>,
    }

    fn wizard_schema() -> Schema<Step, Nav, Wizard> {
        Schema::new(Step::Intro, |state, event| {
            let next = match (state, event) {
                (Step::Intro, Nav::Next) => Step::Details,
                (Step::Details, Nav::Next) => Step::Review,
                (Step::Details, Nav::Back) => Step::Intro,
                (Step::Review, Nav::Back) => Step::Details,
                (s, Nav::Stay) => *s,
                _ => return None,
            };
            effect(move |wizard: &Wizard| {
                wizard.visits.set(wizard.visits.get() + 1);
                next
            })
        })
    }

    type Seen = Rc<RefCell<Vec<(Step, Nav, Step, Direction)>>>;

    fn recording_observer(seen: &Seen) -> Observer<Step, Nav> {
        let seen = Rc::clone(seen);
        Box::new(move |prev, event, current, direction| {
            seen.borrow_mut().push((*prev, *event, *current, direction));
        })
    }

    #[test]
    fn new_machine_starts_at_initial_state() {
        let machine = Machine::new(wizard_schema(), Wizard::default(), None);

        assert_eq!(machine.current_state(), &Step::Intro);
        assert_eq!(machine.previous_state(), &Step::Intro);
        assert_eq!(machine.transition_direction(), Direction::Forward);
        assert!(machine.is_bound());
        assert!(machine.history().is_none());
        assert_eq!(machine.schema().initial_state(), &Step::Intro);
    }

    #[test]
    fn defined_transition_updates_states_and_direction() {
        let mut machine = Machine::new(wizard_schema(), Wizard::default(), None);

        machine.handle_event(Nav::Next);
        assert_eq!(machine.current_state(), &Step::Details);
        assert_eq!(machine.previous_state(), &Step::Intro);
        assert_eq!(machine.transition_direction(), Direction::Forward);

        machine.handle_event(Nav::Back);
        assert_eq!(machine.current_state(), &Step::Intro);
        assert_eq!(machine.previous_state(), &Step::Details);
        assert_eq!(machine.transition_direction(), Direction::Back);

        machine.handle_event(Nav::Stay);
        assert_eq!(machine.current_state(), &Step::Intro);
        assert_eq!(machine.previous_state(), &Step::Intro);
        assert_eq!(machine.transition_direction(), Direction::Idle);
    }

    #[test]
    fn undefined_transition_is_ignored() {
        let seen = Seen::default();
        let mut machine = Machine::new(
            wizard_schema(),
            Wizard::default(),
            Some(recording_observer(&seen)),
        );
        machine.handle_event(Nav::Next);
        machine.handle_event(Nav::Back);

        machine.handle_event(Nav::Back);

        assert_eq!(machine.current_state(), &Step::Intro);
        assert_eq!(machine.previous_state(), &Step::Details);
        assert_eq!(machine.transition_direction(), Direction::Back);
        assert_eq!(machine.interactor().visits.get(), 2);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn effect_runs_once_per_applied_transition() {
        let mut machine = Machine::new(wizard_schema(), Wizard::default(), None);

        machine.handle_event(Nav::Next);
        machine.handle_event(Nav::Next);
        machine.handle_event(Nav::Next);

        assert_eq!(machine.current_state(), &Step::Review);
        assert_eq!(machine.interactor().visits.get(), 2);
    }

    #[test]
    fn observer_sees_fully_updated_transition() {
        let seen = Seen::default();
        let mut machine = Machine::new(
            wizard_schema(),
            Wizard::default(),
            Some(recording_observer(&seen)),
        );

        machine.handle_event(Nav::Next);
        machine.handle_event(Nav::Back);

        assert_eq!(
            *seen.borrow(),
            vec![
                (Step::Intro, Nav::Next, Step::Details, Direction::Forward),
                (Step::Details, Nav::Back, Step::Intro, Direction::Back),
            ]
        );
    }

    #[test]
    fn set_observer_replaces_previous_one() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let mut machine = Machine::new(wizard_schema(), Wizard::default(), None);

        let counter = Rc::clone(&first);
        machine.set_observer(move |_, _, _, _| counter.set(counter.get() + 1));
        machine.handle_event(Nav::Next);

        let counter = Rc::clone(&second);
        machine.set_observer(move |_, _, _, _| counter.set(counter.get() + 1));
        machine.handle_event(Nav::Next);

        machine.clear_observer();
        machine.handle_event(Nav::Back);

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn weak_machine_goes_inert_after_interactor_drops() {
        let wizard = Rc::new(Wizard::default());
        let seen = Seen::default();
        let mut machine =
            Machine::new_weak(wizard_schema(), &wizard, Some(recording_observer(&seen)));

        machine.handle_event(Nav::Next);
        assert_eq!(wizard.visits.get(), 1);
        assert_eq!(Rc::strong_count(&wizard), 1);

        drop(wizard);
        assert!(!machine.is_bound());

        machine.handle_event(Nav::Next);
        machine.handle_event(Nav::Back);

        assert_eq!(machine.current_state(), &Step::Details);
        assert_eq!(machine.previous_state(), &Step::Intro);
        assert_eq!(machine.transition_direction(), Direction::Forward);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn shared_weak_machine_goes_inert_after_interactor_drops() {
        let wizard = Arc::new(Wizard::default());
        let mut machine = Machine::new_weak_shared(wizard_schema(), &wizard, None);

        machine.handle_event(Nav::Next);
        drop(wizard);
        machine.handle_event(Nav::Next);

        assert_eq!(machine.current_state(), &Step::Details);
    }

    #[test]
    fn unbound_machine_ignores_everything() {
        let mut machine = Machine::unbound(wizard_schema());

        machine.handle_event(Nav::Next);

        assert!(!machine.is_bound());
        assert_eq!(machine.current_state(), &Step::Intro);
    }

    #[test]
    fn machine_holds_interactor_reference_cycle_free() {
        struct Controller {
            machine: RefCell<Option<Machine<Step, Nav, rc::Weak<Controller>>>>,
            steps: Cell<u32>,
        }

        let schema: Schema<Step, Nav, Controller> =
            Schema::new(Step::Intro, |state, event| match (state, event) {
                (Step::Intro, Nav::Next) => effect(|c: &Controller| {
                    c.steps.set(c.steps.get() + 1);
                    Step::Details
                }),
                _ => None,
            });

        let controller = Rc::new(Controller {
            machine: RefCell::new(None),
            steps: Cell::new(0),
        });
        *controller.machine.borrow_mut() = Some(Machine::new_weak(schema, &controller, None));

        let weak = Rc::downgrade(&controller);
        let mut machine = controller.machine.borrow_mut().take().unwrap();
        machine.handle_event(Nav::Next);
        assert_eq!(controller.steps.get(), 1);

        *controller.machine.borrow_mut() = Some(machine);
        drop(controller);

        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn history_records_only_applied_transitions() {
        let mut machine = Machine::new(wizard_schema(), Wizard::default(), None).with_history();

        machine.handle_event(Nav::Next);
        machine.handle_event(Nav::Next);
        machine.handle_event(Nav::Next);
        machine.handle_event(Nav::Back);

        let history = machine.history().unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.get_path(),
            vec![&Step::Intro, &Step::Details, &Step::Review, &Step::Details]
        );
        assert_eq!(history.last().unwrap().direction, Direction::Back);
    }

    #[test]
    fn cleared_history_keeps_recording() {
        let mut machine = Machine::new(wizard_schema(), Wizard::default(), None).with_history();

        machine.handle_event(Nav::Next);
        machine.handle_event(Nav::Next);
        machine.history_mut().unwrap().clear();
        assert!(machine.history().unwrap().is_empty());

        machine.handle_event(Nav::Back);

        let history = machine.history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.get_path(), vec![&Step::Review, &Step::Details]);
    }

    #[test]
    fn take_history_drains_and_restarts_recording() {
        let mut plain = Machine::new(wizard_schema(), Wizard::default(), None);
        assert!(plain.take_history().is_none());
        assert!(plain.history_mut().is_none());

        let mut machine = Machine::new(wizard_schema(), Wizard::default(), None).with_history();
        machine.handle_event(Nav::Next);
        machine.handle_event(Nav::Next);

        let drained = machine.take_history().unwrap();
        assert_eq!(drained.len(), 2);
        assert!(machine.history().unwrap().is_empty());

        machine.handle_event(Nav::Back);
        machine.handle_event(Nav::Back);

        let history = machine.history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().to, Step::Intro);
    }

    #[test]
    fn panicking_effect_leaves_previous_state_updated() {
        let schema: Schema<Step, Nav, ()> = Schema::new(Step::Intro, |state, event| {
            match (state, event) {
                (Step::Intro, Nav::Next) => goto(Step::Details),
                (Step::Details, Nav::Next) => effect(|_: &()| -> Step { panic!("effect failed") }),
                _ => None,
            }
        });
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut machine = Machine::new(schema, (), None);
        machine.set_observer(move |_, _, _, _| counter.set(counter.get() + 1));

        machine.handle_event(Nav::Next);
        assert_eq!(machine.previous_state(), &Step::Intro);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            machine.handle_event(Nav::Next);
        }));

        assert!(outcome.is_err());
        assert_eq!(machine.current_state(), &Step::Details);
        assert_eq!(machine.previous_state(), &Step::Details);
        assert_eq!(machine.transition_direction(), Direction::Forward);
        assert_eq!(calls.get(), 1);
    }

    mod logging {
        use super::*;
        use std::io;
        use std::rc::Rc;
        use std::sync::{Arc, Mutex};
        use tracing::Level;

        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Capture {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        impl Capture {
            fn lines(&self) -> Vec<String> {
                let bytes = self.0.lock().unwrap();
                String::from_utf8_lossy(&bytes)
                    .lines()
                    .map(str::to_owned)
                    .collect()
            }
        }

        fn logged<F: FnOnce()>(f: F) -> Vec<String> {
            let capture = Capture::default();
            let writer = capture.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_max_level(Level::TRACE)
                .with_ansi(false)
                .without_time()
                .with_writer(move || writer.clone())
                .finish();
            tracing::subscriber::with_default(subscriber, f);
            capture.lines()
        }

        #[test]
        fn undefined_pair_is_logged_as_missing_transition() {
            let mut machine = Machine::new(wizard_schema(), Wizard::default(), None);

            let lines = logged(|| machine.handle_event(Nav::Back));

            assert_eq!(lines.len(), 1);
            assert!(lines[0].contains("TRACE"));
            assert!(lines[0].contains("no transition defined"));
        }

        #[test]
        fn released_interactor_is_logged_as_unavailable() {
            let wizard = Rc::new(Wizard::default());
            let mut machine = Machine::new_weak(wizard_schema(), &wizard, None);
            drop(wizard);

            let lines = logged(|| machine.handle_event(Nav::Next));

            assert_eq!(lines.len(), 1);
            assert!(lines[0].contains("DEBUG"));
            assert!(lines[0].contains("interactor unavailable"));
        }

        #[test]
        fn applied_transition_logs_endpoints() {
            let mut machine = Machine::new(wizard_schema(), Wizard::default(), None);

            let lines = logged(|| machine.handle_event(Nav::Next));

            assert_eq!(lines.len(), 1);
            assert!(lines[0].contains("transition applied"));
            assert!(lines[0].contains("from=Intro"));
            assert!(lines[0].contains("to=Details"));
            assert!(lines[0].contains("direction=Forward"));
        }
    }

    #[test]
    fn strong_interactor_is_mutable_between_events() {
        let schema: Schema<Step, Nav, u32> = Schema::new(Step::Intro, |state, event| {
            match (state, event) {
                (Step::Intro, Nav::Next) => effect(|limit: &u32| {
                    if *limit > 0 {
                        Step::Details
                    } else {
                        Step::Intro
                    }
                }),
                _ => goto(Step::Intro),
            }
        });
        let mut machine = Machine::new(schema, 0, None);

        machine.handle_event(Nav::Next);
        assert_eq!(machine.current_state(), &Step::Intro);
        assert_eq!(machine.transition_direction(), Direction::Idle);

        *machine.interactor_mut() = 1;
        assert_eq!(machine.binding().get(), &1);
        *machine.binding_mut().get_mut() += 1;
        machine.handle_event(Nav::Next);
        assert_eq!(machine.current_state(), &Step::Details);
    }
}
