use crate::generator::profile::GeneratorConfig;
use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use telemcore::processing::{build_pipeline, ProcessorKind};
use telemcore::{GeoPoint, Pipeline, ReferenceState};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub name: String,
    pub processors: Vec<ProcessorKind>,
    /// Boot time in milliseconds on whatever clock the samples came from.
    pub boot_time: i64,
    /// Observer location that `relative_position` can anchor on.
    pub reference: Option<GeoPoint>,
    pub generator: GeneratorConfig,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            name: "conditioning".into(),
            processors: vec![
                ProcessorKind::Print,
                ProcessorKind::Null,
                ProcessorKind::TimeZero,
                ProcessorKind::Print,
                ProcessorKind::SetOrigin,
            ],
            boot_time: 0,
            reference: None,
            generator: GeneratorConfig::default(),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            !self.processors.is_empty(),
            "workflow `{}` declares no processors",
            self.name
        );
        Ok(())
    }

    pub fn build_pipeline(&self) -> Pipeline {
        build_pipeline(&self.name, &self.processors)
    }

    pub fn initial_reference(&self) -> ReferenceState {
        let mut state = ReferenceState::new();
        state.set_boot_time(self.boot_time);
        if let Some(reference) = self.reference {
            state.set_reference(reference.lat, reference.long, reference.alt);
        }
        state
    }
}
