//! Arena Duel entry point
//!
//! Headless runner: replays a scripted key sequence through the fixed-step
//! clock, as a windowed front end would, and logs how the match plays out.
//!
//! Usage: `arena-duel [settings.json] [script.json]`
//!
//! `ARENA_DUEL_QUALITY=low|medium|high` overrides the effects preset.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;

    use arena_duel::{QualityPreset, Settings};
    use arena_duel::platform::{FrameClock, ScriptStep, expand_script, parse_script};
    use arena_duel::sim::{MatchEvent, MatchState, tick};
    use arena_duel::view::FrameView;

    /// Display refresh the replay pretends to run at
    const DISPLAY_HZ: f32 = 144.0;

    fn step(keys: &str, frames: u32) -> ScriptStep {
        ScriptStep {
            keys: keys.to_string(),
            frames,
        }
    }

    /// Both fighters close in, trade volleys, then go hypercharged
    fn default_script() -> Vec<ScriptStep> {
        vec![
            step("dj", 40),
            step("17", 120),
            step("28", 90),
            step("1w39", 60),
            step("40", 1),
            step("123789", 600),
            step("r", 1),
        ]
    }

    fn load_script(path: &Path) -> Option<Vec<ScriptStep>> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read script {}: {}", path.display(), e);
                return None;
            }
        };
        match parse_script(&json) {
            Ok(script) => Some(script),
            Err(e) => {
                log::warn!("Invalid script in {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Arena Duel (headless) starting...");

        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut settings = args
            .first()
            .map(|p| Settings::load(Path::new(p)))
            .unwrap_or_default();
        if let Ok(name) = std::env::var("ARENA_DUEL_QUALITY") {
            match name.parse::<QualityPreset>() {
                Ok(quality) => settings.quality = quality,
                Err(e) => log::warn!("Ignoring ARENA_DUEL_QUALITY: {}", e),
            }
        }
        let script = args
            .get(1)
            .and_then(|p| load_script(Path::new(p)))
            .unwrap_or_else(default_script);

        log::info!(
            "Seed {}, quality {}, {} script steps",
            settings.seed,
            settings.quality.as_str(),
            script.len()
        );

        let inputs = expand_script(&settings.bindings, &script);
        let mut state = MatchState::new(&settings);
        let mut clock = FrameClock::new(settings.arena.tick_dt());
        let mut pending = inputs.into_iter();
        let mut last_banner = None;

        'frames: loop {
            for _ in 0..clock.advance(1.0 / DISPLAY_HZ) {
                let Some(input) = pending.next() else {
                    break 'frames;
                };
                tick(&mut state, &input);

                for event in &state.events {
                    match event {
                        MatchEvent::MatchOver { .. } => {
                            last_banner = FrameView::capture(&state).banner();
                        }
                        MatchEvent::Reset => log::info!("Rematch!"),
                        other => log::trace!("{:?}", other),
                    }
                }
            }
        }

        let frame = FrameView::capture(&state);
        for fighter in &frame.fighters {
            println!(
                "{:<16} health {:>5.1}/{:.0}  hypercharge {}",
                fighter.name,
                fighter.health,
                fighter.max_health,
                if fighter.hypercharge_ready { "ready" } else { "charging" }
            );
        }
        match frame.banner().or(last_banner) {
            Some(banner) => println!("{}", banner),
            None => println!("No winner after {} ticks", state.tick),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web front end not implemented
}
