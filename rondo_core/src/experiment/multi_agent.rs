use std::collections::{HashMap, HashSet};
use crate::agent::{AgentRoster, TurnAgent};
use crate::env::{SequentialSimulation, TurnEnvironment, TurnIter};
use crate::error::{ProtocolError, RondoError};
use crate::experiment::{ExperimentWriter, MemoryWriter, ProgressClock, SilentWriter, StepMarker};
use crate::scheme::Scheme;

/// Construction options of a [`MultiAgentExperiment`].
#[derive(Debug, Clone, Default)]
pub struct ExperimentOptions{
    /// Explicit run name; when absent the roster label is used instead.
    pub name: Option<String>,
    /// Suppresses per-episode info logging.
    pub quiet: bool,
    /// Enables the per-step loss/schedule diagnostic channels of the
    /// writer.
    pub write_loss: bool,
}

/// Experiment driver running repeated episodes over a turn-based
/// multi-agent environment.
///
/// The driver owns the progress counters and the per-agent episode return
/// accumulators; the environment owns the turn order. Each live turn is
/// routed to the agent registered for the acting identifier; each agent's
/// episode return is flushed to the metrics writer exactly once, on the
/// agent's first done turn, keyed by the frame counter at that moment.
pub struct MultiAgentExperiment<S, Sim, R, W>
where
    S: Scheme,
    Sim: SequentialSimulation<S>,
    R: AgentRoster<S>,
    W: ExperimentWriter,
{
    env: TurnEnvironment<S, Sim>,
    roster: R,
    agents: HashMap<S::AgentId, Box<dyn TurnAgent<S>>>,
    writer: W,
    clock: ProgressClock,
    label: String,
    quiet: bool,
}

impl<S, Sim, R, W> MultiAgentExperiment<S, Sim, R, W>
where
    S: Scheme,
    Sim: SequentialSimulation<S>,
    R: AgentRoster<S>,
    W: ExperimentWriter,
{
    /// Builds the experiment, deriving the run label and handing it to the
    /// writer factory exactly once, together with the loss-recording flag
    /// and a live handle to the progress counters.
    ///
    /// The learning agent registry is built here and stays fixed for the
    /// lifetime of the driver.
    pub fn new<F>(roster: R, env: TurnEnvironment<S, Sim>, options: ExperimentOptions, make_writer: F)
        -> Result<Self, RondoError<S>>
    where
        F: FnOnce(&str, bool, ProgressClock) -> Result<W, RondoError<S>>,
    {
        let base = options.name.unwrap_or_else(|| roster.label().to_string());
        let label = format!("{}_{}", base, env.name());
        let clock = ProgressClock::new();
        let writer = make_writer(&label, options.write_loss, clock.clone())?;
        let agents = roster.agents();
        Ok(Self{
            env,
            roster,
            agents,
            writer,
            clock,
            label,
            quiet: options.quiet,
        })
    }

    /// Runs `episodes` full episodes with the learning registry. Agents may
    /// update their internal parameters on every own turn.
    pub fn train(&mut self, episodes: usize) -> Result<&mut Self, RondoError<S>>{
        let mut agents = std::mem::take(&mut self.agents);
        let outcome = (0..episodes).try_for_each(|_| self.run_episode(&mut agents));
        self.agents = agents;
        outcome?;
        Ok(self)
    }

    /// Runs `episodes` full episodes with a freshly built frozen registry:
    /// identical turn routing and metric flushing, no parameter updates.
    pub fn test(&mut self, episodes: usize) -> Result<&mut Self, RondoError<S>>{
        let mut agents = self.roster.evaluation_agents();
        for _ in 0..episodes{
            self.run_episode(&mut agents)?;
        }
        Ok(self)
    }

    pub fn frame(&self) -> u64{
        self.clock.frame()
    }

    pub fn episode(&self) -> u64{
        self.clock.episode()
    }

    /// Live handle to the progress counters.
    pub fn clock(&self) -> ProgressClock{
        self.clock.clone()
    }

    pub fn label(&self) -> &str{
        &self.label
    }

    pub fn is_quiet(&self) -> bool{
        self.quiet
    }

    pub fn env(&self) -> &TurnEnvironment<S, Sim>{
        &self.env
    }

    pub fn writer(&self) -> &W{
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W{
        &mut self.writer
    }

    fn run_episode(&mut self, agents: &mut HashMap<S::AgentId, Box<dyn TurnAgent<S>>>)
        -> Result<(), RondoError<S>>{
        self.env.reset()?;
        let mut returns: HashMap<S::AgentId, f32> = self.env.agents().iter()
            .map(|id| (id.clone(), 0.0f32))
            .collect();
        let mut flushed: HashSet<S::AgentId> = HashSet::with_capacity(returns.len());

        let mut turns = self.env.agent_iter();
        while let Some(agent) = turns.next(){
            let state = TurnIter::last(&turns)?;
            let accumulated = returns.get_mut(&agent)
                .ok_or_else(|| ProtocolError::UnknownAgent(agent.clone()))?;
            *accumulated += state.reward();
            let total = *accumulated;
            let actor = agents.get_mut(&agent)
                .ok_or_else(|| ProtocolError::UnknownAgent(agent.clone()))?;
            if state.is_done(){
                // the agent still sees its final turn, but cannot act on it
                let _ = actor.act(&state)?;
                turns.step(None)?;
                if flushed.insert(agent.clone()){
                    self.writer.add_evaluation(
                        &format!("{}/returns", &agent),
                        total,
                        StepMarker::Frame,
                    )?;
                }
            } else {
                self.clock.tick_frame();
                let action = actor.act(&state)?;
                turns.step(action)?;
            }
        }

        self.clock.tick_episode();
        #[cfg(feature = "log_info")]
        if !self.quiet{
            log::info!(
                "{}: episode {} finished at frame {}, returns: {:?}",
                &self.label, self.clock.episode(), self.clock.frame(), &returns
            );
        }
        Ok(())
    }
}

impl<S, Sim, R> MultiAgentExperiment<S, Sim, R, SilentWriter>
where
    S: Scheme,
    Sim: SequentialSimulation<S>,
    R: AgentRoster<S>,
{
    /// Experiment discarding all metrics.
    pub fn silent(roster: R, env: TurnEnvironment<S, Sim>, options: ExperimentOptions)
        -> Result<Self, RondoError<S>>{
        Self::new(roster, env, options, |_, _, _| Ok(SilentWriter))
    }
}

impl<S, Sim, R> MultiAgentExperiment<S, Sim, R, MemoryWriter>
where
    S: Scheme,
    Sim: SequentialSimulation<S>,
    R: AgentRoster<S>,
{
    /// Experiment recording all metrics in memory.
    pub fn recording(roster: R, env: TurnEnvironment<S, Sim>, options: ExperimentOptions)
        -> Result<Self, RondoError<S>>{
        Self::new(roster, env, options, |_, write_loss, clock| Ok(MemoryWriter::new(clock, write_loss)))
    }
}
