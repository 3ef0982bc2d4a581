use crate::config::settings::MixerSettings;
use std::process::{Command, Stdio};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeDirection {
    Up,
    Down,
}

impl VolumeDirection {
    fn sign(self) -> char {
        match self {
            VolumeDirection::Up => '+',
            VolumeDirection::Down => '-',
        }
    }
}

/// System volume is owned by an external mixer; we only nudge it.
pub trait VolumeControl {
    /// Returns whether any control accepted the change.
    fn adjust(&mut self, direction: VolumeDirection) -> bool;
}

pub trait CommandRunner {
    fn run(&mut self, program: &str, args: &[String]) -> bool;
}

/// Runs commands with all output discarded and reports their exit status.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[String]) -> bool {
        match Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) => status.success(),
            Err(e) => {
                debug!("Could not run {}: {}", program, e);
                false
            }
        }
    }
}

/// `amixer set <control> <step>%±`, trying each control until one works.
#[derive(Debug, Clone)]
pub struct Mixer<R = SystemRunner> {
    program: String,
    controls: Vec<String>,
    step_percent: u8,
    runner: R,
}

impl Mixer<SystemRunner> {
    pub fn new(settings: &MixerSettings) -> Self {
        Self::with_runner(settings, SystemRunner)
    }
}

impl<R: CommandRunner> Mixer<R> {
    pub fn with_runner(settings: &MixerSettings, runner: R) -> Self {
        Self {
            program: settings.program.clone(),
            controls: settings.controls.clone(),
            step_percent: settings.step_percent,
            runner,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}

impl<R: CommandRunner> VolumeControl for Mixer<R> {
    fn adjust(&mut self, direction: VolumeDirection) -> bool {
        let amount = format!("{}%{}", self.step_percent, direction.sign());

        for control in &self.controls {
            let args = ["set".to_string(), control.clone(), amount.clone()];
            if self.runner.run(&self.program, &args) {
                info!("Volume {:?} via {} {}", direction, self.program, control);
                return true;
            }
            debug!("{} {} rejected {}", self.program, control, amount);
        }

        info!("Volume {:?} failed on every control", direction);
        false
    }
}
