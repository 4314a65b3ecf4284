//! Brand title animation: letter glow flashes, a swinging letter and a
//! field of lightning bolts.
//!
//! Flashes run on a [`TaskQueue`]: a recurring `Flash` task lights one to
//! three random letters, each with its own `Unlight` task 0.1 to 0.3 s later.
//! Every task can be cancelled; `cancel_all` is the teardown path.

use globe_camera::EasingFunction;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::lightning::LightningBolt;
use crate::tasks::{TaskHandle, TaskQueue};

pub const TITLE: &str = "MADWRLD";
/// Index of the letter that hangs and swings (the `R`).
pub const HANGING_LETTER: usize = 4;

const BOLT_COUNT: usize = 10;
const SWING_PERIOD: f32 = 4.0;
const SWING_DEGREES: f32 = 5.0;
const FLOAT_PERIOD: f32 = 3.0;
const FLOAT_PIXELS: f32 = 10.0;

/// Work item on the title's task queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TitleTask {
    /// Light random letters and reschedule.
    Flash,
    /// Drop one glow from the letter at this index.
    Unlight(usize),
}

/// Deterministic, seeded title animation.
#[derive(Clone, Debug)]
pub struct TitleAnimator {
    letters: Vec<char>,
    hanging: usize,
    rng: ChaCha8Rng,
    interval: f32,
    time: f32,
    tasks: TaskQueue<TitleTask>,
    flash: Option<TaskHandle>,
    /// Outstanding glows per letter; lit while non-zero.
    glow: Vec<u32>,
    bolts: Vec<LightningBolt>,
}

impl TitleAnimator {
    pub fn new(seed: u64) -> Self {
        Self::with_title(TITLE, HANGING_LETTER, seed)
    }

    pub fn with_title(title: &str, hanging: usize, seed: u64) -> Self {
        let letters: Vec<char> = title.chars().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let interval = rng.random_range(1.0..2.0);
        let bolts = (0..BOLT_COUNT)
            .map(|_| LightningBolt::random(&mut rng))
            .collect();

        let mut tasks = TaskQueue::new();
        let flash = (!letters.is_empty()).then(|| tasks.schedule(interval, TitleTask::Flash));

        Self {
            glow: vec![0; letters.len()],
            letters,
            hanging,
            rng,
            interval,
            time: 0.0,
            tasks,
            flash,
            bolts,
        }
    }

    /// Advance the animation clock and run the tasks that came due.
    ///
    /// Tasks scheduled while running wait for the next update, and flashes
    /// missed during a long step collapse into one.
    pub fn update(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            return;
        }
        self.time += dt;
        let mut due_now = Vec::new();
        while let Some(item) = self.tasks.pop_due(self.time) {
            due_now.push(item);
        }
        for (due, task) in due_now {
            self.run(due, task);
        }
    }

    fn run(&mut self, due: f32, task: TitleTask) {
        match task {
            TitleTask::Flash => {
                let count = self.rng.random_range(1..=3);
                for _ in 0..count {
                    let letter = self.rng.random_range(0..self.letters.len());
                    let hold = self.rng.random_range(0.1..0.3);
                    self.glow[letter] += 1;
                    self.tasks.schedule(due + hold, TitleTask::Unlight(letter));
                }
                tracing::trace!(count, time = due, "title flash");
                let next = self.next_flash_after(due);
                self.flash = Some(self.tasks.schedule(next, TitleTask::Flash));
            }
            TitleTask::Unlight(letter) => {
                if let Some(glow) = self.glow.get_mut(letter) {
                    *glow = glow.saturating_sub(1);
                }
            }
        }
    }

    /// First slot on the flash cadence strictly after the current time.
    fn next_flash_after(&self, due: f32) -> f32 {
        let missed = ((self.time - due) / self.interval).floor().max(0.0);
        let next = due + self.interval * (missed + 1.0);
        if next > self.time {
            next
        } else {
            self.time + self.interval
        }
    }

    /// Stop scheduling new flashes; glows already lit still fade out.
    pub fn stop_flashing(&mut self) -> bool {
        self.flash
            .take()
            .is_some_and(|handle| self.tasks.cancel(handle))
    }

    /// Cancel every pending task and clear all glows.
    pub fn cancel_all(&mut self) {
        self.tasks.cancel_all();
        self.flash = None;
        self.glow.fill(0);
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn hanging_index(&self) -> usize {
        self.hanging
    }

    /// Seconds between flashes, fixed per animator in 1..2.
    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_lit(&self, letter: usize) -> bool {
        self.glow.get(letter).is_some_and(|&g| g > 0)
    }

    /// Indices of the currently glowing letters.
    pub fn lit_letters(&self) -> Vec<usize> {
        (0..self.letters.len()).filter(|&i| self.is_lit(i)).collect()
    }

    pub fn bolts(&self) -> &[LightningBolt] {
        &self.bolts
    }

    /// Rotation of the hanging letter in degrees, swinging between -5 and 5.
    pub fn hanging_angle(&self) -> f32 {
        let phase = (self.time / SWING_PERIOD).rem_euclid(1.0);
        let half = if phase < 0.5 { phase * 2.0 } else { 2.0 - phase * 2.0 };
        -SWING_DEGREES + 2.0 * SWING_DEGREES * EasingFunction::EaseInOut.apply(half)
    }

    /// Vertical bob of the whole title in pixels, 0 to -10.
    pub fn float_offset(&self) -> f32 {
        let phase = (self.time / FLOAT_PERIOD).rem_euclid(1.0);
        let half = if phase < 0.5 { phase * 2.0 } else { 2.0 - phase * 2.0 };
        -FLOAT_PIXELS * EasingFunction::EaseInOut.apply(half)
    }
}
