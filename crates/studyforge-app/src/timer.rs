use rand::seq::SliceRandom;

pub const MIN_MINUTES: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerPreset {
    pub name: &'static str,
    pub work_minutes: u32,
    pub break_minutes: u32,
}

pub const PRESETS: [TimerPreset; 2] = [
    TimerPreset {
        name: "Pomodoro",
        work_minutes: 25,
        break_minutes: 5,
    },
    TimerPreset {
        name: "Deep Work",
        work_minutes: 50,
        break_minutes: 10,
    },
];

pub fn preset(name: &str) -> Option<TimerPreset> {
    let wanted = name.trim().to_lowercase().replace(['-', '_'], " ");
    PRESETS
        .iter()
        .copied()
        .find(|p| p.name.to_lowercase() == wanted)
}

const START_MESSAGES: [&str; 3] = [
    "Let's get started! Focus and do your best.",
    "Time to dive in. You've got this!",
    "Okay, deep breath. Let's begin the work.",
];

const BREAK_MESSAGES: [&str; 3] = [
    "Time for a quick break. Stretch your legs!",
    "You've earned this pause. Relax for a bit.",
    "Step away for a moment. You're doing great.",
];

const END_MESSAGES: [&str; 3] = [
    "Session complete! Awesome work.",
    "Great job! Take a well-deserved rest.",
    "Another session in the books. Fantastic effort!",
];

const READY_TO_WORK: &str = "Ready for a focus session?";
const READY_TO_BREAK: &str = "Time for a short break!";

fn pick(pool: &[&'static str]) -> &'static str {
    pool.choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(START_MESSAGES[0])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Working,
    OnBreak,
}

/// Emitted by [`FocusTimer::tick`] on a phase transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A work phase ran out; record a session of `minutes`
    WorkCompleted { minutes: u32 },
    BreakCompleted,
}

/// Two-phase countdown driven by one-second ticks.
///
/// The counter reaches 00:00 on the last second of a phase; the following
/// tick performs the transition and pauses, so the user starts each phase.
#[derive(Debug, Clone)]
pub struct FocusTimer {
    work_minutes: u32,
    break_minutes: u32,
    phase: Phase,
    remaining_secs: u32,
    running: bool,
    sessions_completed: u32,
    message: &'static str,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(PRESETS[0].work_minutes, PRESETS[0].break_minutes)
    }
}

impl FocusTimer {
    pub fn new(work_minutes: u32, break_minutes: u32) -> Self {
        let work_minutes = work_minutes.max(MIN_MINUTES);
        Self {
            work_minutes,
            break_minutes: break_minutes.max(MIN_MINUTES),
            phase: Phase::Working,
            remaining_secs: work_minutes * 60,
            running: false,
            sessions_completed: 0,
            message: START_MESSAGES[0],
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    /// Accountability-partner line for the current state
    pub fn message(&self) -> &str {
        self.message
    }

    fn phase_secs(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Working => self.work_minutes * 60,
            Phase::OnBreak => self.break_minutes * 60,
        }
    }

    /// `MM:SS`
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }

    /// Elapsed fraction of the current phase, 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        let total = self.phase_secs(self.phase);
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.remaining_secs);
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        if self.remaining_secs == 0 {
            self.reset(self.phase);
        }
        if self.remaining_secs == self.phase_secs(self.phase) {
            self.message = match self.phase {
                Phase::Working => pick(&START_MESSAGES),
                Phase::OnBreak => pick(&BREAK_MESSAGES),
            };
        }
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stops and rewinds to the start of `phase` without recording anything
    pub fn reset(&mut self, phase: Phase) {
        self.running = false;
        self.phase = phase;
        self.remaining_secs = self.phase_secs(phase);
        self.message = match phase {
            Phase::Working => READY_TO_WORK,
            Phase::OnBreak => READY_TO_BREAK,
        };
    }

    /// Advances one second
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            return None;
        }

        self.running = false;
        match self.phase {
            Phase::Working => {
                self.sessions_completed += 1;
                self.phase = Phase::OnBreak;
                self.remaining_secs = self.phase_secs(Phase::OnBreak);
                self.message = pick(&END_MESSAGES);
                Some(TimerEvent::WorkCompleted {
                    minutes: self.work_minutes,
                })
            }
            Phase::OnBreak => {
                self.phase = Phase::Working;
                self.remaining_secs = self.phase_secs(Phase::Working);
                self.message = pick(&START_MESSAGES);
                Some(TimerEvent::BreakCompleted)
            }
        }
    }

    /// Sets both durations. The counter only rewinds while stopped.
    pub fn apply_preset(&mut self, work_minutes: u32, break_minutes: u32) {
        self.work_minutes = work_minutes.max(MIN_MINUTES);
        self.break_minutes = break_minutes.max(MIN_MINUTES);
        if !self.running {
            self.phase = Phase::Working;
            self.remaining_secs = self.phase_secs(Phase::Working);
        }
    }

    /// Takes effect on the counter only while stopped
    pub fn set_work_minutes(&mut self, minutes: u32) {
        self.work_minutes = minutes.max(MIN_MINUTES);
        if !self.running {
            self.reset(Phase::Working);
        }
    }

    /// Applies immediately; the running counter is left alone
    pub fn set_break_minutes(&mut self, minutes: u32) {
        self.break_minutes = minutes.max(MIN_MINUTES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pomodoro_cycle() {
        let mut timer = FocusTimer::new(25, 5);
        timer.start();

        for _ in 0..1500 {
            assert_eq!(timer.tick(), None);
        }
        assert_eq!(timer.display(), "00:00");
        assert_eq!(timer.phase(), Phase::Working);

        assert_eq!(timer.tick(), Some(TimerEvent::WorkCompleted { minutes: 25 }));
        assert_eq!(timer.phase(), Phase::OnBreak);
        assert_eq!(timer.display(), "05:00");
        assert!(!timer.is_running());
        assert_eq!(timer.sessions_completed(), 1);
        assert!(END_MESSAGES.contains(&timer.message()));
    }

    #[test]
    fn test_break_returns_to_work() {
        let mut timer = FocusTimer::new(1, 1);
        timer.reset(Phase::OnBreak);
        timer.start();
        assert!(BREAK_MESSAGES.contains(&timer.message()));
        for _ in 0..60 {
            timer.tick();
        }
        assert_eq!(timer.tick(), Some(TimerEvent::BreakCompleted));
        assert_eq!(timer.phase(), Phase::Working);
        assert_eq!(timer.remaining_secs(), 60);
        assert_eq!(timer.sessions_completed(), 0);
    }

    #[test]
    fn test_pause_preserves_remaining() {
        let mut timer = FocusTimer::default();
        timer.start();
        timer.tick();
        timer.pause();
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.display(), "24:59");
        assert!(timer.progress() > 0.0);
    }

    #[test]
    fn test_durations_clamp_and_respect_running_state() {
        let mut timer = FocusTimer::new(0, 0);
        assert_eq!(timer.work_minutes(), 1);
        assert_eq!(timer.break_minutes(), 1);

        timer.set_work_minutes(30);
        assert_eq!(timer.display(), "30:00");

        timer.start();
        timer.apply_preset(50, 10);
        assert_eq!(timer.display(), "30:00");
        timer.pause();
        timer.apply_preset(50, 10);
        assert_eq!(timer.display(), "50:00");
        assert_eq!(preset("deep-work"), Some(PRESETS[1]));
    }

    #[test]
    fn test_start_at_zero_rewinds_phase() {
        let mut timer = FocusTimer::new(1, 1);
        timer.start();
        for _ in 0..60 {
            timer.tick();
        }
        timer.pause();
        assert_eq!(timer.remaining_secs(), 0);
        timer.start();
        assert_eq!(timer.remaining_secs(), 60);
        assert!(timer.is_running());
    }
}
