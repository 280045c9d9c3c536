use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use log::info;
use telemcore::{Container, ReferenceState};

pub struct WorkflowResult {
    pub outputs: Vec<Container>,
    pub reference: ReferenceState,
    /// First raw sample time on the boot-time clock, before any re-basing.
    pub started_at: Option<i64>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Runs every sample through one freshly built pipeline, in order.
    pub fn execute(&self, samples: Vec<Container>) -> anyhow::Result<WorkflowResult> {
        let mut pipeline = self.config.build_pipeline();
        let mut reference = self.config.initial_reference();
        let mut outputs = Vec::with_capacity(samples.len());
        let started_at = samples
            .first()
            .map(|sample| reference.to_boot_relative(sample.time));

        info!(
            "running {} samples through `{}` ({} processors)",
            samples.len(),
            self.config.name,
            pipeline.len()
        );

        for (index, sample) in samples.into_iter().enumerate() {
            let output = pipeline
                .run(sample, &mut reference)
                .with_context(|| format!("processing sample {} (t={})", index, sample.time))?;
            outputs.push(output);
        }

        Ok(WorkflowResult {
            outputs,
            reference,
            started_at,
        })
    }
}
