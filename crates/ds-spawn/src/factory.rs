use ds_component::Component;

use crate::SpawnItem;

/// Builds the components of a spawned agent's pipeline.
///
/// Any `FnMut(&SpawnItem) -> Result<Vec<Box<dyn Component>>, String>` is a
/// factory.  An `Err` is a recoverable spawn failure (for example a resource
/// pool running dry) and is handled by the spawn point's retry policy.
pub trait PipelineFactory {
    fn build(&mut self, item: &SpawnItem) -> Result<Vec<Box<dyn Component>>, String>;
}

impl<F> PipelineFactory for F
where
    F: FnMut(&SpawnItem) -> Result<Vec<Box<dyn Component>>, String>,
{
    fn build(&mut self, item: &SpawnItem) -> Result<Vec<Box<dyn Component>>, String> {
        self(item)
    }
}

/// Factory for runs without spawn points.  Every build fails.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoFactory;

impl PipelineFactory for NoFactory {
    fn build(&mut self, _item: &SpawnItem) -> Result<Vec<Box<dyn Component>>, String> {
        Err("no pipeline factory configured".into())
    }
}
