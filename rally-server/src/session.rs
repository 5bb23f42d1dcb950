use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use rally_core::{Command, GameSession, GuessOutcome, Step, history};
use rally_types::{ClientMessage, ServerMessage, TeamDraft};

/// Wall-clock cadence the round clock counts at.
const TICK_PERIOD: Duration = Duration::from_secs(1);
const COMMAND_BUFFER: usize = 64;
const UPDATE_BUFFER: usize = 64;

enum HubCommand {
    Client(ClientMessage),
    Tick { generation: u64 },
}

/// Cheap cloneable handle the transport layer uses to reach the hub task.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<HubCommand>,
    updates: broadcast::Sender<ServerMessage>,
}

impl SessionHandle {
    pub async fn send(&self, message: ClientMessage) {
        if self
            .commands
            .send(HubCommand::Client(message))
            .await
            .is_err()
        {
            warn!("Session hub is no longer running");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerMessage> {
        self.updates.subscribe()
    }
}

struct RoundTimer {
    generation: u64,
    task: JoinHandle<()>,
}

/// Single-session actor: owns the game, the round clock and the fan-out
/// channel. All mutation happens on its task, one command at a time.
pub struct SessionHub {
    session: Option<GameSession>,
    session_id: Option<Uuid>,
    timer: Option<RoundTimer>,
    generation: u64,
    commands: mpsc::Receiver<HubCommand>,
    command_sender: mpsc::Sender<HubCommand>,
    updates: broadcast::Sender<ServerMessage>,
}

impl SessionHub {
    /// Spawns the hub and hands back the handle consoles connect through.
    pub fn spawn() -> SessionHandle {
        let (command_sender, commands) = mpsc::channel(COMMAND_BUFFER);
        let (updates, _) = broadcast::channel(UPDATE_BUFFER);
        let handle = SessionHandle {
            commands: command_sender.clone(),
            updates: updates.clone(),
        };
        let hub = Self {
            session: None,
            session_id: None,
            timer: None,
            generation: 0,
            commands,
            command_sender,
            updates,
        };
        tokio::spawn(hub.run());
        handle
    }

    async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            match command {
                HubCommand::Client(message) => self.handle_client(message),
                HubCommand::Tick { generation } => self.handle_tick(generation),
            }
        }
        self.disarm_timer();
    }

    fn handle_client(&mut self, message: ClientMessage) {
        match message {
            ClientMessage::CreateSession { team_one, team_two } => {
                self.create_session(team_one, team_two)
            }
            ClientMessage::ResetSession => self.reset_session(),
            ClientMessage::Refresh => self.broadcast_snapshot(),
            ClientMessage::Start => self.apply(Command::Start),
            ClientMessage::Pause => self.apply(Command::Pause),
            ClientMessage::MarkCorrect => self.apply(Command::Advance(GuessOutcome::Correct)),
            ClientMessage::SkipWord => self.apply(Command::Advance(GuessOutcome::Skip)),
            ClientMessage::SwitchTeam => self.apply(Command::SwitchTeam),
            ClientMessage::NextRound => self.apply(Command::NextRound),
            ClientMessage::ToggleResults => self.apply(Command::ToggleResults),
        }
    }

    fn create_session(&mut self, team_one: TeamDraft, team_two: TeamDraft) {
        // One session at a time; the live one must be reset first
        if self.session.is_some() {
            debug!("Ignoring CreateSession: a session is already live");
            return;
        }
        match GameSession::new(&team_one, &team_two) {
            Ok(session) => {
                let id = Uuid::new_v4();
                info!(
                    "Session {} created for {} vs {}",
                    id,
                    session.teams()[0].name,
                    session.teams()[1].name
                );
                self.session = Some(session);
                self.session_id = Some(id);
                self.broadcast_snapshot();
            }
            Err(error) => {
                warn!("Session rejected: {}", error);
                self.broadcast(ServerMessage::Error {
                    message: error.to_string(),
                });
            }
        }
    }

    fn reset_session(&mut self) {
        if self.session.take().is_none() {
            debug!("Ignoring ResetSession: nothing to clear");
            return;
        }
        self.disarm_timer();
        if let Some(id) = self.session_id.take() {
            info!("Session {} cleared", id);
        }
        self.broadcast(ServerMessage::SessionCleared);
    }

    fn apply(&mut self, command: Command) {
        let Some(session) = self.session.as_mut() else {
            debug!("Ignoring {:?}: no live session", command);
            return;
        };
        match session.apply(command) {
            Ok(Step::Changed) => {
                self.reconcile_timer();
                self.broadcast_snapshot();
            }
            Ok(Step::Ignored) => {}
            Ok(Step::RoundOver(result)) => {
                self.reconcile_timer();
                self.broadcast(ServerMessage::RoundEnded { result });
                self.broadcast_snapshot();
            }
            Err(error) => {
                warn!("{:?} rejected: {}", command, error);
                self.broadcast(ServerMessage::Warning {
                    message: error.to_string(),
                });
            }
        }
    }

    fn handle_tick(&mut self, generation: u64) {
        // Ticks from an aborted clock can already be queued; drop them
        if self.timer.as_ref().map(|timer| timer.generation) != Some(generation) {
            debug!("Dropping stale tick for generation {}", generation);
            return;
        }
        self.apply(Command::Tick);
    }

    /// Keeps the ticker task in lockstep with the session: armed exactly
    /// while a round is live, disarmed otherwise.
    fn reconcile_timer(&mut self) {
        let playing = self
            .session
            .as_ref()
            .is_some_and(|session| session.is_playing());
        match (playing, self.timer.is_some()) {
            (true, false) => self.arm_timer(),
            (false, true) => self.disarm_timer(),
            _ => {}
        }
    }

    fn arm_timer(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let sender = self.command_sender.clone();
        let task = tokio::spawn(async move {
            // First tick fires a full period from now, not immediately
            let mut interval = time::interval_at(time::Instant::now() + TICK_PERIOD, TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if sender
                    .send(HubCommand::Tick { generation })
                    .await
                    .is_err()
                {
                    break;
                }
            }
        });
        self.timer = Some(RoundTimer { generation, task });
        debug!("Round clock armed (generation {})", generation);
    }

    fn disarm_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.task.abort();
            debug!("Round clock disarmed (generation {})", timer.generation);
        }
    }

    fn broadcast_snapshot(&self) {
        if let Some(session) = self.session.as_ref() {
            self.broadcast(ServerMessage::SessionUpdate {
                state: session.state().clone(),
                teams: session.teams().clone(),
                summaries: history::summaries(session.teams()),
            });
        }
    }

    fn broadcast(&self, message: ServerMessage) {
        // A send error only means no console is connected right now
        let _ = self.updates.send(message);
    }
}
