use crate::prelude::{Container, ProcessResult, Processor, ReferenceState};

/// Re-bases container time so the first sample of a series lands at zero.
///
/// Samples are expected in non-decreasing time order. Nothing is reordered:
/// a late sample simply comes out with a negative time.
#[derive(Debug, Clone, Default)]
pub struct TimeZeroProcessor {
    start_time: Option<i64>,
}

impl TimeZeroProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_time(&self) -> Option<i64> {
        self.start_time
    }
}

impl Processor for TimeZeroProcessor {
    fn name(&self) -> &str {
        "TimeZeroProcessor"
    }

    fn process(
        &mut self,
        mut container: Container,
        _context: &mut ReferenceState,
    ) -> ProcessResult<Container> {
        let start = *self.start_time.get_or_insert(container.time);
        container.time -= start;
        Ok(container)
    }

    fn reset(&mut self) {
        self.start_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: i64) -> Container {
        Container::coordinates(time, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    #[test]
    fn rebases_against_first_sample() {
        let mut processor = TimeZeroProcessor::new();
        let mut context = ReferenceState::new();
        let times: Vec<i64> = [5, 7, 3]
            .into_iter()
            .map(|t| processor.process(sample(t), &mut context).unwrap().time)
            .collect();
        assert_eq!(times, vec![0, 2, -2]);
        assert_eq!(processor.start_time(), Some(5));
    }

    #[test]
    fn reset_starts_a_new_series() {
        let mut processor = TimeZeroProcessor::new();
        let mut context = ReferenceState::new();
        processor.process(sample(100), &mut context).unwrap();
        processor.reset();
        assert_eq!(processor.start_time(), None);
        let output = processor.process(sample(40), &mut context).unwrap();
        assert_eq!(output.time, 0);
    }

    #[test]
    fn works_on_every_variant() {
        let mut processor = TimeZeroProcessor::new();
        let mut context = ReferenceState::new();
        let axes = Container::principal_axes(20, 0.1, 0.2, 0.3, 0.0, 0.0, 0.0);
        let output = processor.process(axes, &mut context).unwrap();
        assert_eq!(output.time, 0);
        assert_eq!(output.payload, axes.payload);
    }
}
