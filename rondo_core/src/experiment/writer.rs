use std::collections::HashMap;
use crate::error::WriterError;
use crate::experiment::{ProgressClock, StepMarker};

/// Sink for scalar experiment metrics.
///
/// `add_evaluation` and `add_summary` are derived channels: evaluations
/// land under `evaluation/{name}` and summaries fan out into `{name}/mean`
/// and `{name}/std`. The loss and schedule channels exist for per-step
/// learning diagnostics and implementations only record them when their
/// loss-recording flag is enabled.
pub trait ExperimentWriter: Send{
    fn add_scalar(&mut self, key: &str, value: f32, step: StepMarker) -> Result<(), WriterError>;

    fn add_loss(&mut self, name: &str, value: f32, step: StepMarker) -> Result<(), WriterError>;

    fn add_schedule(&mut self, name: &str, value: f32, step: StepMarker) -> Result<(), WriterError>;

    fn add_evaluation(&mut self, name: &str, value: f32, step: StepMarker) -> Result<(), WriterError>{
        self.add_scalar(&format!("evaluation/{}", name), value, step)
    }

    fn add_summary(&mut self, name: &str, mean: f32, std: f32, step: StepMarker) -> Result<(), WriterError>{
        self.add_evaluation(&format!("{}/mean", name), mean, step)?;
        self.add_evaluation(&format!("{}/std", name), std, step)
    }
}

impl<W: ExperimentWriter + ?Sized> ExperimentWriter for Box<W>{
    fn add_scalar(&mut self, key: &str, value: f32, step: StepMarker) -> Result<(), WriterError> {
        self.as_mut().add_scalar(key, value, step)
    }

    fn add_loss(&mut self, name: &str, value: f32, step: StepMarker) -> Result<(), WriterError> {
        self.as_mut().add_loss(name, value, step)
    }

    fn add_schedule(&mut self, name: &str, value: f32, step: StepMarker) -> Result<(), WriterError> {
        self.as_mut().add_schedule(name, value, step)
    }

    fn add_evaluation(&mut self, name: &str, value: f32, step: StepMarker) -> Result<(), WriterError> {
        self.as_mut().add_evaluation(name, value, step)
    }

    fn add_summary(&mut self, name: &str, mean: f32, std: f32, step: StepMarker) -> Result<(), WriterError> {
        self.as_mut().add_summary(name, mean, std, step)
    }
}

/// Writer discarding every metric.
#[derive(Debug, Copy, Clone, Default)]
pub struct SilentWriter;

impl ExperimentWriter for SilentWriter{
    fn add_scalar(&mut self, _key: &str, _value: f32, _step: StepMarker) -> Result<(), WriterError> {
        Ok(())
    }

    fn add_loss(&mut self, _name: &str, _value: f32, _step: StepMarker) -> Result<(), WriterError> {
        Ok(())
    }

    fn add_schedule(&mut self, _name: &str, _value: f32, _step: StepMarker) -> Result<(), WriterError> {
        Ok(())
    }
}

/// One recorded metric series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series{
    pub values: Vec<f32>,
    pub steps: Vec<u64>,
}

/// In-memory writer keeping every recorded series, resolving step markers
/// against the live progress counters at write time. Useful in tests and
/// for programmatic inspection of a finished run.
#[derive(Debug, Clone)]
pub struct MemoryWriter{
    clock: ProgressClock,
    write_loss: bool,
    series: HashMap<String, Series>,
}

impl MemoryWriter{
    pub fn new(clock: ProgressClock, write_loss: bool) -> Self{
        Self{clock, write_loss, series: HashMap::new()}
    }

    pub fn series(&self, key: &str) -> Option<&Series>{
        self.series.get(key)
    }

    pub fn data(&self) -> &HashMap<String, Series>{
        &self.series
    }

    pub fn clear(&mut self){
        self.series.clear();
    }
}

impl ExperimentWriter for MemoryWriter{
    fn add_scalar(&mut self, key: &str, value: f32, step: StepMarker) -> Result<(), WriterError> {
        let resolved = step.resolve(&self.clock);
        let series = self.series.entry(key.to_string()).or_default();
        series.values.push(value);
        series.steps.push(resolved);
        Ok(())
    }

    fn add_loss(&mut self, name: &str, value: f32, step: StepMarker) -> Result<(), WriterError> {
        if self.write_loss{
            self.add_scalar(&format!("loss/{}", name), value, step)
        } else {
            Ok(())
        }
    }

    fn add_schedule(&mut self, name: &str, value: f32, step: StepMarker) -> Result<(), WriterError> {
        if self.write_loss{
            self.add_scalar(&format!("schedule/{}", name), value, step)
        } else {
            Ok(())
        }
    }
}

/// Tensorboard-backed writer flushing scalars into an event file.
#[cfg(feature = "tboard")]
pub struct TboardWriter{
    writer: tboard::EventWriter<std::fs::File>,
    clock: ProgressClock,
    write_loss: bool,
}

#[cfg(feature = "tboard")]
impl TboardWriter{
    /// Creates the event writer inside `directory` (typically
    /// `runs/{label}`).
    pub fn create<P: AsRef<std::path::Path>>(directory: P, write_loss: bool, clock: ProgressClock)
        -> Result<Self, WriterError>{
        let writer = tboard::EventWriter::create(directory)
            .map_err(|e| WriterError::Tboard {
                context: "Creating tboard EventWriter".into(),
                error: format!("{e}"),
            })?;
        Ok(Self{writer, clock, write_loss})
    }
}

#[cfg(feature = "tboard")]
impl ExperimentWriter for TboardWriter{
    fn add_scalar(&mut self, key: &str, value: f32, step: StepMarker) -> Result<(), WriterError> {
        let resolved = step.resolve(&self.clock);
        self.writer.write_scalar(resolved as i64, key, value)
            .map_err(|e| WriterError::Tboard {
                context: format!("Writing scalar {}", key),
                error: format!("{e}"),
            })
    }

    fn add_loss(&mut self, name: &str, value: f32, step: StepMarker) -> Result<(), WriterError> {
        if self.write_loss{
            self.add_scalar(&format!("loss/{}", name), value, step)
        } else {
            Ok(())
        }
    }

    fn add_schedule(&mut self, name: &str, value: f32, step: StepMarker) -> Result<(), WriterError> {
        if self.write_loss{
            self.add_scalar(&format!("schedule/{}", name), value, step)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn evaluation_and_summary_derive_their_keys(){
        let clock = ProgressClock::new();
        let mut writer = MemoryWriter::new(clock.clone(), true);
        clock.tick_frame();
        writer.add_evaluation("first/returns", 6.0, StepMarker::Frame).unwrap();
        writer.add_summary("first/returns", 1.5, 0.5, StepMarker::Episode).unwrap();

        assert_eq!(
            writer.series("evaluation/first/returns").unwrap().values,
            vec![6.0]
        );
        assert_eq!(writer.series("evaluation/first/returns").unwrap().steps, vec![1]);
        assert_eq!(
            writer.series("evaluation/first/returns/mean").unwrap().values,
            vec![1.5]
        );
        assert_eq!(
            writer.series("evaluation/first/returns/std").unwrap().values,
            vec![0.5]
        );
    }

    #[test]
    fn loss_channel_honors_the_recording_flag(){
        let clock = ProgressClock::new();
        let mut recording = MemoryWriter::new(clock.clone(), true);
        let mut muted = MemoryWriter::new(clock.clone(), false);

        recording.add_loss("policy", 0.3, StepMarker::Frame).unwrap();
        muted.add_loss("policy", 0.3, StepMarker::Frame).unwrap();
        muted.add_schedule("epsilon", 0.1, StepMarker::Frame).unwrap();

        assert!(recording.series("loss/policy").is_some());
        assert!(muted.series("loss/policy").is_none());
        assert!(muted.series("schedule/epsilon").is_none());
    }

    #[test]
    fn markers_are_resolved_at_write_time(){
        let clock = ProgressClock::new();
        let mut writer = MemoryWriter::new(clock.clone(), false);
        writer.add_scalar("x", 1.0, StepMarker::Frame).unwrap();
        clock.tick_frame();
        clock.tick_frame();
        writer.add_scalar("x", 2.0, StepMarker::Frame).unwrap();
        assert_eq!(writer.series("x").unwrap().steps, vec![0, 2]);
    }
}
