//! Signup Wizard
//!
//! This example drives a linear wizard whose controller owns its machine.
//!
//! Key concepts:
//! - Direction derived from declaration order
//! - Weak interactor binding (no reference cycle)
//! - Observer reporting every applied transition
//! - Ignored events (undefined pairs, dropped controller)
//!
//! Run with: cargo run --example wizard

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use waypoint::core::Direction;
use waypoint::schema::{effect, goto, Schema};
use waypoint::{ordered_states, Machine};

ordered_states! {
    enum Page {
        Welcome,
        Account,
        Preferences,
        Summary,
        Help,
    }
    idle: [Help]
}

#[derive(Clone, Copy, Debug)]
enum Nav {
    Next,
    Back,
    Help,
    Close,
}

struct Controller {
    saved_accounts: Cell<u32>,
    machine: RefCell<Option<Machine<Page, Nav, Weak<Controller>>>>,
}

impl Controller {
    fn new() -> Rc<Self> {
        let controller = Rc::new(Controller {
            saved_accounts: Cell::new(0),
            machine: RefCell::new(None),
        });

        let schema: Schema<Page, Nav, Controller> =
            Schema::new(Page::Welcome, |page, nav| match (page, nav) {
                (Page::Welcome, Nav::Next) => goto(Page::Account),
                (Page::Account, Nav::Next) => effect(|c: &Controller| {
                    c.saved_accounts.set(c.saved_accounts.get() + 1);
                    Page::Preferences
                }),
                (Page::Preferences, Nav::Next) => goto(Page::Summary),
                (Page::Account, Nav::Back) => goto(Page::Welcome),
                (Page::Preferences, Nav::Back) => goto(Page::Account),
                (Page::Summary, Nav::Back) => goto(Page::Preferences),
                (Page::Account | Page::Preferences, Nav::Help) => goto(Page::Help),
                (Page::Help, Nav::Close) => goto(Page::Account),
                _ => None,
            });

        let mut machine = Machine::new_weak(schema, &controller, None);
        machine.set_observer(|from, nav, to, direction| {
            let arrow = match direction {
                Direction::Forward => "-->",
                Direction::Back => "<--",
                Direction::Idle => "---",
            };
            println!("  {:?} {} {:?}   (on {:?})", from, arrow, to, nav);
        });

        *controller.machine.borrow_mut() = Some(machine);
        controller
    }

    fn send(&self, nav: Nav) {
        if let Some(machine) = self.machine.borrow_mut().as_mut() {
            machine.handle_event(nav);
        }
    }

    fn page(&self) -> Option<Page> {
        self.machine.borrow().as_ref().map(|m| *m.current_state())
    }
}

fn main() {
    println!("=== Signup Wizard ===\n");

    let controller = Controller::new();
    println!("Initial page: {:?}\n", controller.page());

    println!("Transitions:");
    for nav in [
        Nav::Next,
        Nav::Next,
        Nav::Help,
        Nav::Close,
        Nav::Back,
        Nav::Close, // ignored: nothing to close on Welcome
        Nav::Next,
        Nav::Next,
        Nav::Next,
    ] {
        controller.send(nav);
    }

    println!("\nFinal page: {:?}", controller.page());
    println!("Accounts saved: {}", controller.saved_accounts.get());

    let weak = Rc::downgrade(&controller);
    drop(controller);
    println!(
        "\nController dropped; still alive: {}",
        weak.upgrade().is_some()
    );

    println!("\n=== Example Complete ===");
}
