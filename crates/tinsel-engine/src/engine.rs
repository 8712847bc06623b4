//! The runtime owner of the particle collection, surface, and frame loop

use crate::effect::Effect;
use crate::particle::Particle;
use instant::Instant;
use std::time::Duration;
use tinsel_core::{Result, TinselError, Vec2};
use tinsel_render::{Canvas, DisplayList};

/// Population cap: appends beyond this are silently dropped
pub const DEFAULT_MAX_PARTICLES: usize = 500;
/// Default minimum interval between spawns (~one 60 Hz frame)
pub const DEFAULT_SPAWN_INTERVAL_MS: u64 = 16;

const DEFAULT_VIEWPORT: (u32, u32) = (1280, 720);

/// Engine lifecycle. `Destroyed` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EngineState {
    #[default]
    Idle,
    Running,
    Destroyed,
}

/// The adapter seam for acquiring a real drawing surface. Acquisition
/// failure is the one fatal construction error the engine reports.
pub trait SurfaceProvider {
    fn acquire(&mut self, width: u32, height: u32) -> Result<Box<dyn Canvas>>;
}

/// Engine construction options. An explicit surface wins; otherwise a
/// provider is asked for one; otherwise a fresh `DisplayList` sized to the
/// viewport is created (the overlay-on-the-document-root default).
#[derive(Default)]
pub struct EngineOptions {
    pub surface: Option<Box<dyn Canvas>>,
    pub provider: Option<Box<dyn SurfaceProvider>>,
    pub viewport: Option<(u32, u32)>,
    pub max_particles: Option<usize>,
}

/// Throttle + minimum-distance spawn admission
struct SpawnGate {
    last_accepted: Option<(Instant, Vec2)>,
}

impl SpawnGate {
    fn new() -> Self {
        Self {
            last_accepted: None,
        }
    }

    /// Admit iff enough wall-clock time has passed AND the pointer moved
    /// far enough since the last *accepted* spawn. Acceptance updates both.
    fn admit(&mut self, pos: Vec2, now: Instant, throttle: Duration, min_distance: f32) -> bool {
        let admitted = match self.last_accepted {
            None => true,
            Some((at, from)) => {
                now.duration_since(at) >= throttle && pos.distance(from) >= min_distance
            }
        };
        if admitted {
            self.last_accepted = Some((now, pos));
        }
        admitted
    }
}

/// Input listener registration, tied 1:1 to the running state. Attach and
/// detach are idempotent so repeated start/stop cycles never double-register.
#[derive(Default)]
struct ListenerBinding {
    attached: bool,
}

impl ListenerBinding {
    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}

/// One engine instance per active overlay. Sole mutator of its particle
/// collection and sole driver of the frame loop between `new` and `destroy`.
///
/// The host forwards pointer events via `pointer_moved`/`touch_moved` and
/// calls `frame` on every display refresh tick while it returns `true`.
pub struct Engine<S: Canvas> {
    surface: Option<S>,
    particles: Vec<Particle>,
    max_particles: usize,
    effect: Option<Effect>,
    state: EngineState,
    gate: SpawnGate,
    listeners: ListenerBinding,
    rng: tinsel_core::FxRng,
}

/// Build an engine from options. Fails only when a surface provider is
/// configured and cannot deliver a surface.
pub fn create_engine(options: EngineOptions) -> Result<Engine<Box<dyn Canvas>>> {
    let viewport = options.viewport.unwrap_or(DEFAULT_VIEWPORT);
    let surface: Box<dyn Canvas> = match (options.surface, options.provider) {
        (Some(surface), _) => surface,
        (None, Some(mut provider)) => provider
            .acquire(viewport.0, viewport.1)
            .map_err(|e| TinselError::Surface(format!("failed to acquire surface: {e}")))?,
        (None, None) => Box::new(DisplayList::new(viewport.0, viewport.1)),
    };
    Ok(Engine::with_surface_and_capacity(
        surface,
        options.max_particles.unwrap_or(DEFAULT_MAX_PARTICLES),
    ))
}

impl<S: Canvas> Engine<S> {
    pub fn with_surface(surface: S) -> Self {
        Self::with_surface_and_capacity(surface, DEFAULT_MAX_PARTICLES)
    }

    pub fn with_surface_and_capacity(surface: S, max_particles: usize) -> Self {
        Self {
            surface: Some(surface),
            particles: Vec::new(),
            max_particles,
            effect: None,
            state: EngineState::Idle,
            gate: SpawnGate::new(),
            listeners: ListenerBinding::default(),
            rng: tinsel_core::FxRng::from_entropy(),
        }
    }

    /// Bind an effect and enter the running state. A no-op while already
    /// running (the second effect is dropped, not swapped) and once
    /// destroyed.
    pub fn start(&mut self, effect: Effect) {
        if self.state != EngineState::Idle {
            return;
        }
        log::debug!("engine start: {}", effect.kind().name());
        self.effect = Some(effect);
        self.listeners.attach();
        self.state = EngineState::Running;
    }

    /// Leave the running state. Detaches listeners synchronously: no spawn,
    /// physics, or paint work runs after this returns. No-op unless running.
    pub fn stop(&mut self) {
        if self.state != EngineState::Running {
            return;
        }
        log::debug!("engine stop");
        self.listeners.detach();
        self.state = EngineState::Idle;
    }

    /// Tear down: stop, drop all particles, detach the surface. Safe to
    /// call any number of times, from any state.
    pub fn destroy(&mut self) {
        if self.state == EngineState::Destroyed {
            return;
        }
        self.stop();
        self.clear();
        self.effect = None;
        self.surface = None;
        self.state = EngineState::Destroyed;
    }

    /// Drop every live particle and wipe the surface
    pub fn clear(&mut self) {
        self.particles.clear();
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
    }

    /// Pointer movement, stamped with the current time
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer_moved_at(x, y, Instant::now());
    }

    /// Pointer movement with an explicit timestamp, for hosts whose event
    /// loops carry one. Spawn-gate evaluation happens fully before the
    /// effect is invoked, which happens fully before particles are appended.
    pub fn pointer_moved_at(&mut self, x: f32, y: f32, now: Instant) {
        if self.state != EngineState::Running || !self.listeners.is_attached() {
            return;
        }
        let Some(effect) = self.effect.as_ref() else {
            return;
        };

        let throttle = effect
            .throttle()
            .unwrap_or(Duration::from_millis(DEFAULT_SPAWN_INTERVAL_MS));
        let min_distance = effect.min_move_distance().unwrap_or(0.0);
        if !self.gate.admit(Vec2::new(x, y), now, throttle, min_distance) {
            return;
        }

        let batch = effect.on_pointer_move(x, y, &mut self.rng);
        self.add_particles(batch);
    }

    /// Touch movement: only the first active contact point spawns
    pub fn touch_moved(&mut self, touches: &[Vec2]) {
        if let Some(first) = touches.first() {
            self.pointer_moved(first.x, first.y);
        }
    }

    /// Touch movement with an explicit timestamp
    pub fn touch_moved_at(&mut self, touches: &[Vec2], now: Instant) {
        if let Some(first) = touches.first() {
            self.pointer_moved_at(first.x, first.y, now);
        }
    }

    /// Append one particle unless the population cap is reached
    pub fn add_particle(&mut self, particle: Particle) {
        if self.particles.len() < self.max_particles {
            self.particles.push(particle);
        }
    }

    /// Append a batch, truncating to the remaining capacity. Existing
    /// particles are never evicted to make room.
    pub fn add_particles(&mut self, batch: Vec<Particle>) {
        let available = self.max_particles.saturating_sub(self.particles.len());
        self.particles.extend(batch.into_iter().take(available));
    }

    /// One display tick: update physics on every particle, evict the dead,
    /// clear the surface, paint survivors in insertion order. Returns
    /// whether the engine is still running, i.e. whether the host should
    /// schedule another tick. Runs regardless of pointer activity.
    pub fn frame(&mut self) -> bool {
        if self.state != EngineState::Running {
            return false;
        }

        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(|p| !p.is_dead());

        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
            for particle in &self.particles {
                particle.draw(surface);
            }
        }

        true
    }

    /// Resynchronize the surface to the viewport. Existing particle
    /// positions are untouched. Ignored once destroyed.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.state == EngineState::Destroyed {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(width, height);
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    /// The surface, `None` once destroyed
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }
}
