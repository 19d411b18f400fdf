//! Engine thread that owns the engine and enforces the tick cadence.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::compute::{ChannelObserver, EngineError, Generation, LifeEngine};
use crate::schema::EngineConfig;

use super::commands::{DriverState, EngineCommand};
use super::ticker::Ticker;

/// Generations buffered for the consumer; later ones are dropped until it reads.
const GENERATION_BUFFER: usize = 1;

/// Handle for controlling the engine thread.
///
/// Every operation is a message to the single thread that owns the engine,
/// so periodic steps and cell edits never run concurrently.
pub struct EngineHandle {
    /// Thread handle
    thread: Option<JoinHandle<()>>,
    /// Channel to send commands to the engine
    command_tx: Sender<EngineCommand>,
    /// Channel to receive generations from the engine
    generation_rx: Receiver<Generation>,
    /// State as last requested
    state: DriverState,
}

impl EngineHandle {
    /// Move an engine onto its own thread, stepping every `interval` while running.
    pub fn spawn(mut engine: LifeEngine, interval: Duration) -> Self {
        let (command_tx, command_rx) = mpsc::channel();
        let (generation_tx, generation_rx) = mpsc::sync_channel(GENERATION_BUFFER);

        engine.subscribe(ChannelObserver::new(generation_tx));
        let state = if engine.is_running() {
            DriverState::Running
        } else {
            DriverState::Paused
        };

        let thread = thread::spawn(move || {
            run_engine(engine, interval, command_rx);
        });

        Self {
            thread: Some(thread),
            command_tx,
            generation_rx,
            state,
        }
    }

    /// Build a random engine from configuration and spawn it.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let engine = LifeEngine::from_config(config)?;
        Ok(Self::spawn(engine, config.tick_interval()))
    }

    fn send(&self, command: EngineCommand) -> Result<(), EngineError> {
        self.command_tx
            .send(command)
            .map_err(|_| EngineError::DriverStopped)
    }

    pub fn start(&mut self) -> Result<(), EngineError> {
        self.send(EngineCommand::Start)?;
        self.state = DriverState::Running;
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), EngineError> {
        self.send(EngineCommand::Stop)?;
        self.state = DriverState::Paused;
        Ok(())
    }

    /// Execute a single step regardless of the running state.
    pub fn step(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::Step)
    }

    pub fn reset(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::Reset)
    }

    /// Override one cell and wait for the engine to apply it.
    pub fn set_cell(&self, row: usize, col: usize, alive: bool) -> Result<(), EngineError> {
        let (reply, rx) = mpsc::channel();
        self.send(EngineCommand::SetCell {
            row,
            col,
            alive,
            reply,
        })?;
        rx.recv().map_err(|_| EngineError::DriverStopped)?
    }

    /// Flip one cell and return its new state.
    pub fn toggle_cell(&self, row: usize, col: usize) -> Result<bool, EngineError> {
        let (reply, rx) = mpsc::channel();
        self.send(EngineCommand::Toggle { row, col, reply })?;
        rx.recv().map_err(|_| EngineError::DriverStopped)?
    }

    /// Copy of the current grid.
    pub fn snapshot(&self) -> Result<Generation, EngineError> {
        let (reply, rx) = mpsc::channel();
        self.send(EngineCommand::Snapshot { reply })?;
        rx.recv().map_err(|_| EngineError::DriverStopped)
    }

    /// Try to receive the latest generation (non-blocking)
    pub fn try_recv_generation(&self) -> Option<Generation> {
        let mut latest = None;
        // Drain all available generations, keep only the latest
        loop {
            match self.generation_rx.try_recv() {
                Ok(generation) => latest = Some(generation),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
        latest
    }

    /// Wait up to `timeout` for the next generation.
    pub fn recv_generation_timeout(&self, timeout: Duration) -> Option<Generation> {
        self.generation_rx.recv_timeout(timeout).ok()
    }

    /// Check if the engine is running
    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Shutdown the engine thread
    pub fn shutdown(&mut self) {
        let _ = self.command_tx.send(EngineCommand::Shutdown);
        self.state = DriverState::Stopped;
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Main engine loop running in its own thread
fn run_engine(mut engine: LifeEngine, interval: Duration, command_rx: Receiver<EngineCommand>) {
    let mut ticker = Ticker::new(interval);
    if engine.is_running() {
        ticker.arm(Instant::now());
    }
    log::info!("engine thread started, tick interval {:?}", interval);

    loop {
        let command = match ticker.time_until(Instant::now()) {
            Some(wait) => match command_rx.recv_timeout(wait) {
                Ok(command) => Some(command),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            },
            // Nothing scheduled: block until the next command
            None => match command_rx.recv() {
                Ok(command) => Some(command),
                Err(_) => break,
            },
        };

        if let Some(command) = command {
            if !handle_command(&mut engine, &mut ticker, command) {
                break;
            }
        }

        if ticker.poll(Instant::now()) {
            engine.step();
        }
    }

    log::info!("engine thread stopped at generation {}", engine.generation());
}

/// Apply one command. Returns false on shutdown.
fn handle_command(engine: &mut LifeEngine, ticker: &mut Ticker, command: EngineCommand) -> bool {
    match command {
        EngineCommand::Start => {
            engine.start();
            ticker.arm(Instant::now());
        }
        EngineCommand::Stop => {
            engine.stop();
            ticker.disarm();
        }
        EngineCommand::Step => engine.step(),
        EngineCommand::SetCell {
            row,
            col,
            alive,
            reply,
        } => {
            let _ = reply.send(engine.set_cell(row, col, alive));
        }
        EngineCommand::Toggle { row, col, reply } => {
            let _ = reply.send(engine.toggle_cell(row, col));
        }
        EngineCommand::Reset => engine.reset(),
        EngineCommand::Snapshot { reply } => {
            let _ = reply.send(engine.snapshot());
        }
        EngineCommand::Shutdown => {
            engine.stop();
            return false;
        }
    }
    true
}
