use ds_core::{AgentId, Tick};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// Due components of `agent` depend on each other in a loop.
    #[error("dependency cycle on {tick} in {agent} among [{}]", .components.join(", "))]
    CyclicDependency {
        tick:       Tick,
        agent:      AgentId,
        /// Names of the components that lie on the loop, in slot order.
        components: Vec<String>,
    },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
