use std::collections::BTreeMap;
use log::info;
use rand::Rng;
use serde::Serialize;
use rondo_classic::domain::DuelPlayer;
use rondo_classic::policy::{ActionValuePolicy, TitForTat};
use rondo_classic::{IteratedDuelState, SymmetricRewardTable};
use rondo_core::agent::{IndependentRoster, SharedPreset, StaticPreset};
use rondo_core::env::TurnEnvironment;
use rondo_core::experiment::{ExperimentOptions, MultiAgentExperiment, TboardWriter};
use crate::duel::options::DuelOptions;

pub fn setup_logger(options: &DuelOptions) -> Result<(), fern::InitError> {
    let dispatch = fern::Dispatch::new()

        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(options.log_level);

    match &options.log_file{
        None => dispatch.chain(std::io::stdout()),
        Some(f) => dispatch.chain(fern::log_file(f)?)
    }

        .apply()?;
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SessionSummary{
    pub label: String,
    pub frames: u64,
    pub episodes: u64,
    pub returns: BTreeMap<String, Vec<f32>>,
}

/// Trains the action-value learner against tit-for-tat, then evaluates it
/// frozen; metrics go to tensorboard when a directory is given and stay in
/// memory otherwise.
pub fn run(options: DuelOptions) -> anyhow::Result<()>{
    let seed = options.seed.unwrap_or_else(|| rand::rng().random());
    let sim = IteratedDuelState::new(options.rounds, SymmetricRewardTable::prisoners_dilemma());
    let mut env = TurnEnvironment::new(sim, "iterated_duel");
    env.seed(seed);
    info!("Duel session over {} rounds, seed {}", options.rounds, seed);

    let learner = SharedPreset::new(ActionValuePolicy::new(options.epsilon));
    let policy = learner.policy();
    let roster = IndependentRoster::new("duel")
        .with_preset(DuelPlayer::One, learner)
        .with_preset(DuelPlayer::Two, StaticPreset::new(TitForTat{}));
    let experiment_options = ExperimentOptions{
        name: options.name.clone(),
        quiet: options.quiet,
        write_loss: options.write_loss,
    };

    match &options.tboard{
        Some(base) => {
            let base = base.clone();
            let mut experiment = MultiAgentExperiment::new(
                roster,
                env,
                experiment_options,
                |label, write_loss, clock| {
                    TboardWriter::create(base.join(label), write_loss, clock).map_err(Into::into)
                },
            )?;
            experiment.train(options.episodes)?.test(options.test_episodes)?;
            info!(
                "Session {} finished at frame {} after {} episodes",
                experiment.label(), experiment.frame(), experiment.episode()
            );
        }
        None => {
            let mut experiment = MultiAgentExperiment::recording(roster, env, experiment_options)?;
            experiment.train(options.episodes)?.test(options.test_episodes)?;
            let summary = SessionSummary{
                label: experiment.label().to_string(),
                frames: experiment.frame(),
                episodes: experiment.episode(),
                returns: experiment.writer().data().iter()
                    .map(|(key, series)| (key.clone(), series.values.clone()))
                    .collect(),
            };
            if options.json{
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                info!(
                    "Session {} finished at frame {} after {} episodes",
                    summary.label, summary.frames, summary.episodes
                );
            }
        }
    }

    info!("Learned action values: {:?}", policy.lock().unwrap().values());
    Ok(())
}
