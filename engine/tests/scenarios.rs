//! End-to-end behaviour of worlds driven through an `App`.

use std::{cell::RefCell, rc::Rc, time::Duration};

use rusty_ecs::ecs::{debug, ident};
use rusty_ecs::prelude::*;

#[derive(Component, Debug, PartialEq)]
struct Marker;

#[derive(Component, Debug, PartialEq)]
struct Counter(u32);

#[derive(Resource, Debug, Default)]
struct Flag(bool);

#[derive(State, Debug, Clone, PartialEq)]
struct Route(&'static str);

#[derive(State, Debug, Clone, PartialEq)]
enum Mode {
    Edit,
    View,
}

type Log = Rc<RefCell<Vec<String>>>;

fn recorder(log: &Log, entry: &'static str) -> impl FnMut() + 'static {
    let log = log.clone();
    move || log.borrow_mut().push(entry.to_string())
}

fn counter(count: &Rc<RefCell<u32>>) -> impl FnMut() + 'static {
    let count = count.clone();
    move || *count.borrow_mut() += 1
}

#[test]
fn kinds_resolve_to_stable_distinct_idents() {
    assert_eq!(ident::of::<Marker>(), ident::of::<Marker>());
    assert_ne!(ident::of::<Marker>(), ident::of::<Counter>());
}

#[test]
fn route_change_runs_on_enter_once() {
    let entered = Rc::new(RefCell::new(0));
    let mut app = App::new();
    app.insert_state(Route("/"))
        .add_system(OnEnter(Route("/a")), counter(&entered))
        .unwrap();
    app.startup().unwrap();
    assert_eq!(*entered.borrow(), 0);

    app.world().next_state(Route("/a")).unwrap();
    app.update(Duration::ZERO).unwrap();
    assert_eq!(*entered.borrow(), 1);
    assert_eq!(app.world().state::<Route>().unwrap(), Route("/a"));

    // Later ticks without a change do not re-enter.
    app.update(Duration::ZERO).unwrap();
    assert_eq!(*entered.borrow(), 1);
}

#[test]
fn marker_filter_selects_the_marked_counter() {
    let world = World::new();
    let marked = world.spawn((Marker, Counter(0)));

    let matches = || {
        world
            .query::<(Entity, Counter)>([Filter::and::<Marker>()])
            .map(|(entity, _)| entity)
            .collect::<Vec<_>>()
    };
    assert_eq!(matches(), vec![marked]);

    world.spawn(Counter(0));
    assert_eq!(matches(), vec![marked]);
    assert_eq!(world.query::<Counter>([Filter::not::<Marker>()]).count(), 1);
}

#[test]
fn despawn_unlinks_and_keeps_children() {
    let world = World::new();
    let root = world.spawn(Counter(0));
    let middle = world.spawn_child(root, Counter(1)).unwrap();
    let leaf = world.spawn_child(middle, Counter(2)).unwrap();

    world.despawn(middle, false).unwrap();
    assert!(world.children(root).unwrap().is_empty());
    assert!(matches!(
        world.entity_by_id(middle.id()),
        Err(Error::EntityNotFound(_))
    ));
    assert!(world.contains(leaf));
    assert_eq!(world.query::<Counter>([]).count(), 2);
}

#[test]
fn root_query_skips_children() {
    let world = World::new();
    let root = world.spawn(Marker);
    world.spawn_child(root, Marker).unwrap();
    world.spawn_child(root, Marker).unwrap();

    assert_eq!(world.query_root::<Entity>([]).collect::<Vec<_>>(), vec![root]);
    assert_eq!(world.query::<Entity>([]).count(), 3);
}

#[test]
fn redundant_transition_is_a_no_op() {
    let log: Log = Rc::default();
    let mut app = App::new();
    app.insert_state(Mode::Edit)
        .add_system(OnExit(Mode::Edit), recorder(&log, "exit"))
        .unwrap()
        .add_system(OnEnter(Mode::Edit), recorder(&log, "enter"))
        .unwrap();
    app.startup().unwrap();
    assert_eq!(*log.borrow(), vec!["enter"]);

    app.world().next_state(Mode::Edit).unwrap();
    let transition = app.world().commit_states();
    assert!(transition.is_empty());

    app.update(Duration::ZERO).unwrap();
    assert_eq!(*log.borrow(), vec!["enter"]);
}

#[test]
fn differing_value_commits_one_pair() {
    let world = World::new();
    world.insert_state(Mode::Edit);
    world.commit_states();

    world.next_state(Mode::View).unwrap();
    let transition = world.commit_states();
    assert_eq!(transition.exited, vec![StateValue::new(Mode::Edit)]);
    assert_eq!(transition.entered, vec![StateValue::new(Mode::View)]);
    assert_eq!(world.state::<Mode>().unwrap(), Mode::View);
}

#[test]
fn on_enter_ignores_other_values() {
    let entered = Rc::new(RefCell::new(0));
    let mut app = App::new();
    app.insert_state(Mode::Edit)
        .add_system(OnEnter(Mode::View), counter(&entered))
        .unwrap();
    app.startup().unwrap();
    assert_eq!(*entered.borrow(), 0);

    app.world().next_state(Mode::View).unwrap();
    app.update(Duration::ZERO).unwrap();
    assert_eq!(*entered.borrow(), 1);

    app.world().next_state(Mode::Edit).unwrap();
    app.update(Duration::ZERO).unwrap();
    assert_eq!(*entered.borrow(), 1);
}

#[test]
fn phases_run_in_fixed_order() {
    let log: Log = Rc::default();
    let mut app = App::new();
    for phase in Phase::ALL.into_iter().rev() {
        let log = log.clone();
        app.add_system(phase, move || log.borrow_mut().push(phase.to_string()))
            .unwrap();
    }

    app.run([Duration::ZERO]).unwrap();
    let expected: Vec<String> = Phase::ALL.iter().map(Phase::to_string).collect();
    assert_eq!(*log.borrow(), expected);
}

#[test]
fn async_systems_settle_before_the_next_phase() {
    let log: Log = Rc::default();
    let mut app = App::new();
    app.insert_resource(Flag::default());

    let slow = log.clone();
    app.add_system(Phase::Update, move || {
        let log = slow.clone();
        async move {
            for _ in 0..3 {
                yield_now().await;
            }
            log.borrow_mut().push("slow done".to_string());
            res::<Flag>()?.borrow_mut().0 = true;
            Ok::<(), Error>(())
        }
    })
    .unwrap();
    app.add_system(Phase::Update, recorder(&log, "sync done"))
        .unwrap();
    let after = log.clone();
    app.add_system(Phase::PostUpdate, move || -> Result<()> {
        let flag = res::<Flag>()?.borrow().0;
        after.borrow_mut().push(format!("post sees {flag}"));
        Ok(())
    })
    .unwrap();

    app.update(Duration::ZERO).unwrap();
    assert_eq!(
        *log.borrow(),
        vec!["sync done", "slow done", "post sees true"]
    );
}

#[test]
fn run_conditions_gate_systems() {
    let ran = Rc::new(RefCell::new(0));
    let mut app = App::new();
    app.insert_state(Mode::Edit)
        .add_system(Phase::Update, counter(&ran).run_if(in_state(Mode::View)))
        .unwrap();

    app.update(Duration::ZERO).unwrap();
    assert_eq!(*ran.borrow(), 0);

    app.world().next_state(Mode::View).unwrap();
    app.update(Duration::ZERO).unwrap();
    app.update(Duration::ZERO).unwrap();
    assert_eq!(*ran.borrow(), 1);
}

#[test]
fn in_state_without_the_state_is_false() {
    let ran = Rc::new(RefCell::new(0));
    let mut app = App::new();
    app.add_system(Phase::Update, counter(&ran).run_if(in_state(Mode::Edit)))
        .unwrap();
    app.update(Duration::ZERO).unwrap();
    assert_eq!(*ran.borrow(), 0);
}

#[test]
fn running_another_world_inside_a_system_conflicts() {
    let other = World::new();
    let outcome: Rc<RefCell<Option<Error>>> = Rc::default();

    let world = World::new();
    let seen = outcome.clone();
    world
        .add_system(Phase::Update, move || {
            *seen.borrow_mut() = other.run_phase(Phase::Update).err();
        })
        .unwrap();
    world.run_phase(Phase::Update).unwrap();

    assert!(matches!(
        *outcome.borrow(),
        Some(Error::WorldContextConflict { .. })
    ));
}

#[test]
fn same_world_scope_nests_inside_a_system() {
    let world = World::new();
    world.insert_resource(Flag::default());
    let handle = world.downgrade();
    world
        .add_system(Phase::Update, move || -> Result<()> {
            let Some(world) = handle.upgrade() else {
                return Ok(());
            };
            world.scope(|_| res::<Flag>().map(|flag| flag.borrow_mut().0 = true))??;
            // The outer activation survives the nested scope.
            res::<Flag>().map(drop)
        })
        .unwrap();

    world.run_phase(Phase::Update).unwrap();
    assert!(world.resource::<Flag>().unwrap().borrow().0);
}

#[test]
fn accessors_fail_outside_a_running_world() {
    assert!(matches!(res::<Flag>(), Err(Error::NoActiveWorldContext)));
    assert!(matches!(
        commands::spawn(Marker),
        Err(Error::NoActiveWorldContext)
    ));
}

#[test]
fn invalid_schedules_are_rejected() {
    let mut app = App::new();
    assert!(matches!(
        app.add_system("Render", || {}),
        Err(Error::InvalidScheduleRegistration(_))
    ));
    assert!(matches!(
        app.add_system(42u8, || {}),
        Err(Error::InvalidScheduleRegistration(_))
    ));
    assert!(app.add_system("Update", || {}).is_ok());
}

#[test]
fn time_tracks_frames() {
    let deltas: Log = Rc::default();
    let mut app = App::new();
    let seen = deltas.clone();
    app.add_system(Phase::First, move || -> Result<()> {
        let time = res::<Time>()?;
        let time = time.borrow();
        seen.borrow_mut()
            .push(format!("{} {:?}", time.frame, time.delta));
        Ok(())
    })
    .unwrap();

    let ticks = app
        .run([10, 30, 60].map(Duration::from_millis))
        .unwrap();
    assert_eq!(ticks, 3);
    assert_eq!(*deltas.borrow(), vec!["1 10ms", "2 20ms", "3 30ms"]);
}

#[test]
fn snapshot_lists_entities_systems_and_states() {
    let mut app = App::new();
    app.insert_state(Mode::Edit)
        .add_system(Phase::Update, || {})
        .unwrap()
        .add_system(OnEnter(Mode::View), || {})
        .unwrap();
    let root = app.world().spawn((Marker, Counter(0)));
    app.world().spawn_child(root, Marker).unwrap();
    app.startup().unwrap();

    let snapshot = debug::snapshot_all()
        .into_iter()
        .find(|snapshot| snapshot.world == app.world().id())
        .unwrap();
    assert_eq!(snapshot.entities.len(), 1);
    assert_eq!(snapshot.entities[0].components, vec!["Marker", "Counter"]);
    assert_eq!(snapshot.entities[0].count(), 2);
    let labels: Vec<&str> = snapshot.systems.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["Update", "OnEnter(View)"]);
    assert_eq!(snapshot.states, vec!["Edit"]);
}
