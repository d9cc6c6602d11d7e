//! A headless counter app.
//!
//! A home panel holds a button and a label. The button is "clicked" every half second of
//! simulated time, the label mirrors the click count, and after a few clicks the app routes to an
//! about panel. The final world is printed as a debug tree.

use std::time::Duration;

use log::info;
use rusty_ecs::ecs::debug;
use rusty_ecs::prelude::*;

#[derive(Component, Debug)]
struct Panel(&'static str);

#[derive(Component, Debug)]
struct Button;

#[derive(Component, Debug, Default)]
struct Clicks(u32);

#[derive(Component, Debug, Default)]
struct Text(String);

#[derive(Resource, Debug)]
struct Settings {
    click_every: Duration,
    clicks_to_leave: u32,
}

#[derive(State, Debug, Clone, PartialEq)]
enum Route {
    Home,
    About,
}

fn spawn_home() -> Result<()> {
    commands::spawn_with_children(Panel("home"), |children| {
        children.spawn((Button, Clicks::default()))?;
        children.spawn(Text("0 clicks".to_string()))?;
        Ok(())
    })?;
    Ok(())
}

fn spawn_about() -> Result<()> {
    commands::spawn_with_children(Panel("about"), |children| {
        children.spawn(Text("rusty_ecs demo".to_string()))?;
        Ok(())
    })?;
    Ok(())
}

fn despawn_panels() -> Result<()> {
    let panels: Vec<Entity> = query_root::<Entity>([Filter::and::<Panel>()])?.collect();
    for panel in panels {
        for child in commands::children(panel)? {
            commands::despawn(child, false)?;
        }
        commands::despawn(panel, false)?;
    }
    Ok(())
}

/// Simulated input: click every button on a fixed cadence.
fn click() -> Result<()> {
    let (elapsed, delta) = {
        let time = res::<Time>()?;
        let time = time.borrow();
        (time.elapsed, time.delta)
    };
    let every = res::<Settings>()?.borrow().click_every;
    if elapsed.as_nanos() / every.as_nanos() == (elapsed - delta).as_nanos() / every.as_nanos() {
        return Ok(());
    }

    for clicks in query::<Clicks>([Filter::and::<Button>()])? {
        clicks.borrow_mut().0 += 1;
    }
    Ok(())
}

fn sync_labels() -> Result<()> {
    let total: u32 = query::<Clicks>([])?.map(|clicks| clicks.borrow().0).sum();
    for text in query::<Text>([])? {
        text.borrow_mut().0 = format!("{total} clicks");
    }
    Ok(())
}

async fn leave_home() -> Result<()> {
    // Let the other Update systems finish first.
    yield_now().await;
    let total: u32 = query::<Clicks>([])?.map(|clicks| clicks.borrow().0).sum();
    if total >= res::<Settings>()?.borrow().clicks_to_leave {
        info!("Leaving home after {total} clicks");
        next_state(Route::About)?;
    }
    Ok(())
}

fn counter_plugin(app: &mut App) -> Result<()> {
    app.insert_resource(Settings {
        click_every: Duration::from_millis(500),
        clicks_to_leave: 3,
    })
    .insert_state(Route::Home)
    .add_system(OnEnter(Route::Home), spawn_home)?
    .add_system(OnExit(Route::Home), despawn_panels)?
    .add_system(OnEnter(Route::About), spawn_about)?
    .add_system(Phase::PreUpdate, click.run_if(in_state(Route::Home)))?
    .add_system(Phase::Update, leave_home.run_if(in_state(Route::Home)))?
    .add_system(Phase::PostUpdate, sync_labels)?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut app = App::new();
    app.add_plugin(counter_plugin)?;

    let config = Config {
        frame_interval: Duration::from_millis(16),
        max_frames: Some(150),
    };
    let ticks = app.run_with_config(&config)?;
    info!("Ran {ticks} ticks, route is {:?}", app.world().state::<Route>()?);

    for snapshot in debug::snapshot_all() {
        print!("{snapshot}");
    }
    Ok(())
}
