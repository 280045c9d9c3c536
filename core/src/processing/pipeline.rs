use crate::prelude::{Container, ProcessResult, Processor, ReferenceState};
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::MetricsRecorder;
use std::fmt;
use std::sync::Arc;

/// Ordered chain of processors that is itself a processor.
///
/// Index 0 runs first. The first failing element stops the run and its error
/// is returned as-is; elements after it never see the container. No check is
/// made that neighbouring elements agree on the container variant.
pub struct Pipeline {
    name: String,
    processors: Vec<Box<dyn Processor>>,
    metrics: Option<Arc<MetricsRecorder>>,
    logger: LogManager,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::named("Pipeline")
    }

    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            logger: LogManager::new(name.clone()),
            name,
            processors: Vec::new(),
            metrics: None,
        }
    }

    /// Attaches a recorder that counts successful and failed runs.
    pub fn with_metrics(mut self, metrics: Arc<MetricsRecorder>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn push<P: Processor + 'static>(&mut self, processor: P) {
        self.processors.push(Box::new(processor));
    }

    /// Inserts at `index`, shifting later elements. Panics if `index > len`.
    pub fn insert<P: Processor + 'static>(&mut self, index: usize, processor: P) {
        self.processors.insert(index, Box::new(processor));
    }

    /// Removes the element at `index`. Panics if out of bounds.
    pub fn remove(&mut self, index: usize) -> Box<dyn Processor> {
        self.processors.remove(index)
    }

    pub fn pop(&mut self) -> Option<Box<dyn Processor>> {
        self.processors.pop()
    }

    pub fn clear(&mut self) {
        self.processors.clear();
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn Processor> {
        self.processors.get(index).map(|p| &**p)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut dyn Processor> {
        self.processors.get_mut(index).map(|p| -> &mut dyn Processor { &mut **p })
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Processor> + '_ {
        self.processors.iter().map(|p| &**p)
    }

    /// Element names in execution order.
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|p| p.name().to_string()).collect()
    }

    /// Folds `container` through every element in index order.
    pub fn run(
        &mut self,
        container: Container,
        context: &mut ReferenceState,
    ) -> ProcessResult<Container> {
        let result = self.fold(container, context);
        if let Some(metrics) = &self.metrics {
            match &result {
                Ok(_) => metrics.record_processed(),
                Err(err) => metrics.record_failure(err),
            }
        }
        result
    }

    fn fold(
        &mut self,
        mut container: Container,
        context: &mut ReferenceState,
    ) -> ProcessResult<Container> {
        for (index, processor) in self.processors.iter_mut().enumerate() {
            self.logger.trace(&format!(
                "stage {} `{}` t={}",
                index,
                processor.name(),
                container.time
            ));
            container = match processor.process(container, context) {
                Ok(next) => next,
                Err(err) => {
                    self.logger
                        .trace(&format!("stage {} `{}` failed: {}", index, processor.name(), err));
                    return Err(err);
                }
            };
        }
        Ok(container)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("processors", &self.names())
            .finish()
    }
}

impl Processor for Pipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(
        &mut self,
        container: Container,
        context: &mut ReferenceState,
    ) -> ProcessResult<Container> {
        self.run(container, context)
    }

    fn reset(&mut self) {
        for processor in &mut self.processors {
            processor.reset();
        }
    }
}

impl Extend<Box<dyn Processor>> for Pipeline {
    fn extend<I: IntoIterator<Item = Box<dyn Processor>>>(&mut self, iter: I) {
        self.processors.extend(iter);
    }
}

impl FromIterator<Box<dyn Processor>> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Box<dyn Processor>>>(iter: I) -> Self {
        let mut pipeline = Pipeline::new();
        pipeline.extend(iter);
        pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::{GeoPoint, ProcessError};
    use crate::processing::builtin::{null_processor, print_processor, FnProcessor};
    use crate::processing::{SetOriginProcessor, TimeZeroProcessor};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample() -> Container {
        Container::coordinates(5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0)
    }

    fn add_lat(delta: f64) -> FnProcessor<impl FnMut(Container) -> Container + Send> {
        FnProcessor::new("add_lat", move |mut c: Container| {
            if let crate::container::Payload::Coordinates(coords) = &mut c.payload {
                coords.lat += delta;
            }
            c
        })
    }

    fn scale_lat(factor: f64) -> FnProcessor<impl FnMut(Container) -> Container + Send> {
        FnProcessor::new("scale_lat", move |mut c: Container| {
            if let crate::container::Payload::Coordinates(coords) = &mut c.payload {
                coords.lat *= factor;
            }
            c
        })
    }

    fn lat(container: &Container) -> f64 {
        container.as_coordinates().map(|c| c.lat).unwrap()
    }

    struct Failing;

    impl Processor for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn process(
            &mut self,
            _container: Container,
            _context: &mut ReferenceState,
        ) -> ProcessResult<Container> {
            Err(ProcessError::failed("failing", "boom"))
        }
    }

    struct Counting(Arc<AtomicUsize>);

    impl Processor for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn process(
            &mut self,
            container: Container,
            _context: &mut ReferenceState,
        ) -> ProcessResult<Container> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(container)
        }
    }

    struct Unimplemented;

    impl Processor for Unimplemented {
        fn name(&self) -> &str {
            "unimplemented"
        }
    }

    #[test]
    fn empty_pipeline_returns_input() {
        let mut pipeline = Pipeline::new();
        let mut context = ReferenceState::new();
        assert_eq!(pipeline.run(sample(), &mut context).unwrap(), sample());
    }

    #[test]
    fn identity_pipeline_preserves_every_field() {
        let mut pipeline = Pipeline::new();
        pipeline.push(null_processor());
        let mut context = ReferenceState::new();
        for container in [
            sample(),
            Container::principal_axes(1, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6),
            Container::position(-4, 7.0, 8.0, 9.0, 1.0, 2.0, 3.0),
        ] {
            assert_eq!(pipeline.run(container, &mut context).unwrap(), container);
        }
    }

    #[test]
    fn lower_index_runs_first() {
        let mut pipeline = Pipeline::new();
        pipeline.push(add_lat(1.0));
        pipeline.push(scale_lat(10.0));
        let mut context = ReferenceState::new();
        // (1 + 1) * 10, not 1 * 10 + 1
        assert_eq!(lat(&pipeline.run(sample(), &mut context).unwrap()), 20.0);
    }

    #[test]
    fn insert_changes_execution_order() {
        let mut pipeline = Pipeline::new();
        pipeline.push(add_lat(1.0));
        pipeline.insert(0, scale_lat(10.0));
        assert_eq!(pipeline.names(), vec!["scale_lat", "add_lat"]);
        let mut context = ReferenceState::new();
        assert_eq!(lat(&pipeline.run(sample(), &mut context).unwrap()), 11.0);
    }

    #[test]
    fn sequence_operations_behave_like_a_list() {
        let mut pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        pipeline.push(null_processor());
        pipeline.push(print_processor());
        pipeline.push(TimeZeroProcessor::new());
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline.get(1).map(|p| p.name()), Some("print_process"));
        assert!(pipeline.get(3).is_none());

        let removed = pipeline.remove(0);
        assert_eq!(removed.name(), "null_process");
        let popped = pipeline.pop().unwrap();
        assert_eq!(popped.name(), "TimeZeroProcessor");
        assert_eq!(pipeline.names(), vec!["print_process"]);

        pipeline.clear();
        assert!(pipeline.pop().is_none());
    }

    #[test]
    fn get_mut_resets_a_single_element() {
        let mut pipeline = Pipeline::new();
        pipeline.push(TimeZeroProcessor::new());
        pipeline.push(TimeZeroProcessor::new());
        let mut context = ReferenceState::new();
        pipeline.run(sample(), &mut context).unwrap();

        pipeline.get_mut(0).unwrap().reset();
        assert!(pipeline.get_mut(2).is_none());

        // first element re-captures 9, second keeps the 0 it saw first
        let later = Container::coordinates(9, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0);
        assert_eq!(pipeline.run(later, &mut context).unwrap().time, 0);
        let again = Container::coordinates(12, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0);
        assert_eq!(pipeline.run(again, &mut context).unwrap().time, 3);
    }

    #[test]
    fn nested_pipeline_matches_flat_pipeline() {
        let mut flat = Pipeline::new();
        flat.push(add_lat(1.0));
        flat.push(scale_lat(3.0));
        flat.push(add_lat(-0.5));

        let mut inner = Pipeline::named("inner");
        inner.push(add_lat(1.0));
        inner.push(scale_lat(3.0));
        let mut outer = Pipeline::named("outer");
        outer.push(inner);
        outer.push(add_lat(-0.5));

        let mut context = ReferenceState::new();
        let expected = flat.run(sample(), &mut context).unwrap();
        assert_eq!(outer.run(sample(), &mut context).unwrap(), expected);
        assert_eq!(outer.names(), vec!["inner", "add_lat"]);
    }

    #[test]
    fn failure_stops_the_fold() {
        let before = Arc::new(AtomicUsize::new(0));
        let after = Arc::new(AtomicUsize::new(0));
        let mut pipeline = Pipeline::new();
        pipeline.push(Counting(before.clone()));
        pipeline.push(Failing);
        pipeline.push(Counting(after.clone()));

        let mut context = ReferenceState::new();
        let err = pipeline.run(sample(), &mut context).unwrap_err();
        assert_eq!(err, ProcessError::failed("failing", "boom"));
        assert_eq!(before.load(Ordering::SeqCst), 1);
        assert_eq!(after.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn nested_failure_propagates_unchanged() {
        let mut inner = Pipeline::named("inner");
        inner.push(Failing);
        let mut outer = Pipeline::named("outer");
        outer.push(inner);

        let mut context = ReferenceState::new();
        let err = outer.run(sample(), &mut context).unwrap_err();
        assert_eq!(err.processor(), "failing");
    }

    #[test]
    fn unimplemented_processor_aborts_the_run() {
        let mut pipeline = Pipeline::new();
        pipeline.push(Unimplemented);
        let mut context = ReferenceState::new();
        let err = pipeline.run(sample(), &mut context).unwrap_err();
        assert_eq!(err, ProcessError::NotImplemented("unimplemented".into()));
        assert_eq!(
            err.to_string(),
            "processor `unimplemented` does not implement process"
        );
    }

    #[test]
    fn state_already_written_before_a_failure_is_kept() {
        let mut pipeline = Pipeline::new();
        pipeline.push(SetOriginProcessor::new());
        pipeline.push(Failing);
        let mut context = ReferenceState::new();
        assert!(pipeline.run(sample(), &mut context).is_err());
        assert_eq!(context.origin(), GeoPoint::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn metrics_count_runs_and_failures() {
        let metrics = Arc::new(MetricsRecorder::new());
        let mut good = Pipeline::new().with_metrics(metrics.clone());
        good.push(null_processor());
        let mut bad = Pipeline::new().with_metrics(metrics.clone());
        bad.push(Failing);

        let mut context = ReferenceState::new();
        good.run(sample(), &mut context).unwrap();
        good.run(sample(), &mut context).unwrap();
        let _ = bad.run(sample(), &mut context);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.processed, 2);
        assert_eq!(snapshot.failed, 1);
        assert_eq!(snapshot.failures_by_processor.get("failing"), Some(&1));
    }

    #[test]
    fn reset_reaches_nested_stateful_processors() {
        let mut inner = Pipeline::named("inner");
        inner.push(TimeZeroProcessor::new());
        let mut outer = Pipeline::named("outer");
        outer.push(inner);
        outer.push(SetOriginProcessor::new());

        let mut context = ReferenceState::new();
        outer.run(sample(), &mut context).unwrap();
        outer.reset();

        let next = Container::coordinates(40, 2.0, 2.0, 2.0, 0.0, 0.0, 0.0);
        let output = outer.run(next, &mut context).unwrap();
        assert_eq!(output.time, 0);
        assert_eq!(context.origin(), GeoPoint::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn demonstration_flight_end_to_end() {
        let mut pipeline = Pipeline::new();
        pipeline.push(print_processor());
        pipeline.push(null_processor());
        pipeline.push(TimeZeroProcessor::new());
        pipeline.push(print_processor());
        pipeline.push(SetOriginProcessor::new());

        let mut context = ReferenceState::new();

        let first = pipeline.run(sample(), &mut context).unwrap();
        assert_eq!(first.time, 0);
        assert_eq!(first.payload, sample().payload);
        assert_eq!(context.origin(), GeoPoint::new(1.0, 1.0, 1.0));

        let second_in = Container::coordinates(7, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0);
        let second = pipeline.run(second_in, &mut context).unwrap();
        assert_eq!(second.time, 2);
        assert_eq!(second.payload, second_in.payload);
        assert_eq!(context.origin(), GeoPoint::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn boxed_processors_collect_into_a_pipeline() {
        let boxed: Vec<Box<dyn Processor>> =
            vec![Box::new(null_processor()), Box::new(TimeZeroProcessor::new())];
        let mut pipeline: Pipeline = boxed.into_iter().collect();
        let mut context = ReferenceState::new();
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.run(sample(), &mut context).unwrap().time, 0);
    }
}
