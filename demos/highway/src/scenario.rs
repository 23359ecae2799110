//! Scenario files: TOML description of vehicles, spawns and events.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use ds_agent::{AgentStore, AgentStoreBuilder, KinematicState, VehicleParams};
use ds_collision::CollisionConfig;
use ds_component::Component;
use ds_component::library::{Actuator, CruiseDriver, EventTriggeredBrake, FrontSensor, KinematicDynamics};
use ds_core::{AgentKind, SimConfig, SpawnItemId, Tick, Vec2, WorldInit};
use ds_event::{CollisionOccurred, EventDetector, OutOfBounds, SpeedAbove, TickReached};
use ds_spawn::{SpawnItem, SpawnPoint, SpawnPolicy};

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub sim: SimConfig,
    #[serde(default)]
    pub world: WorldInit,
    #[serde(default)]
    pub collision: CollisionConfig,
    #[serde(default)]
    pub vehicles: Vec<VehicleSpec>,
    pub spawn: Option<SpawnSpec>,
    #[serde(default)]
    pub events: Vec<EventSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleSpec {
    #[serde(default)]
    pub kind: AgentKind,
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub yaw: f64,
    pub speed: f64,
    pub desired_speed: f64,
    #[serde(default)]
    pub sensor_noise: f64,
    /// Event name that triggers an emergency brake.
    pub brake_on: Option<String>,
    #[serde(default = "default_deceleration")]
    pub deceleration: f64,
}

fn default_deceleration() -> f64 {
    6.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpawnSpec {
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ticks: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    pub capacity_limit: Option<usize>,
    pub desired_speed: f64,
    #[serde(default)]
    pub items: Vec<SpawnItemSpec>,
}

fn default_retry_delay() -> u64 {
    1
}

fn default_max_attempts() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpawnItemSpec {
    pub tick: u64,
    #[serde(default)]
    pub kind: AgentKind,
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub yaw: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventSpec {
    TickReached {
        name: String,
        tick: u64,
        #[serde(default)]
        terminate: bool,
    },
    OutOfBounds {
        name: String,
        min: [f64; 2],
        max: [f64; 2],
        #[serde(default)]
        terminate: bool,
    },
    SpeedAbove {
        name: String,
        threshold: f64,
        #[serde(default)]
        terminate: bool,
    },
    CollisionOccurred {
        name: String,
        #[serde(default)]
        terminate: bool,
    },
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(text)?;
        ensure!(!scenario.vehicles.is_empty(), "scenario has no vehicles");
        for (i, v) in scenario.vehicles.iter().enumerate() {
            ensure!(v.desired_speed > 0.0, "vehicle {i}: desired_speed must be positive");
        }
        Ok(scenario)
    }

    pub fn agents(&self) -> AgentStore {
        self.vehicles
            .iter()
            .fold(AgentStoreBuilder::new(), |b, v| {
                b.agent(v.kind, VehicleParams::for_kind(v.kind), KinematicState::at(Vec2::new(v.x, v.y), v.yaw, v.speed))
            })
            .build()
    }

    pub fn pipelines(&self) -> Vec<Vec<Box<dyn Component>>> {
        self.vehicles.iter().map(VehicleSpec::pipeline).collect()
    }

    pub fn detector(&self) -> EventDetector {
        let mut detector = EventDetector::new();
        for spec in &self.events {
            match spec {
                EventSpec::TickReached { name, tick, terminate } => {
                    detector.register(TickReached::new(name.as_str(), Tick(*tick)), action(*terminate));
                }
                EventSpec::OutOfBounds { name, min, max, terminate } => detector.register(
                    OutOfBounds::new(name.as_str(), Vec2::new(min[0], min[1]), Vec2::new(max[0], max[1])),
                    action(*terminate),
                ),
                EventSpec::SpeedAbove { name, threshold, terminate } => {
                    detector.register(SpeedAbove::new(name.as_str(), *threshold), action(*terminate));
                }
                EventSpec::CollisionOccurred { name, terminate } => {
                    detector.register(CollisionOccurred::new(name.as_str()), action(*terminate));
                }
            }
        }
        detector
    }

    /// The on-ramp spawn point, with every configured item scheduled.
    pub fn spawn_point(&self) -> Result<Option<SpawnPoint>> {
        let Some(spec) = &self.spawn else {
            return Ok(None);
        };
        let policy = SpawnPolicy::Retry {
            delay_ticks:  spec.retry_delay_ticks,
            max_attempts: spec.max_attempts,
        };
        let mut point = SpawnPoint::new("on_ramp", policy);
        if let Some(limit) = spec.capacity_limit {
            point = point.with_capacity_limit(limit);
        }
        for (i, item) in spec.items.iter().enumerate() {
            let state = KinematicState::at(Vec2::new(item.x, item.y), item.yaw, item.speed);
            let id = SpawnItemId::try_from(i).context("too many spawn items")?;
            point.schedule(
                SpawnItem::new(id, item.kind, state, Tick(item.tick)).with_params(VehicleParams::for_kind(item.kind)),
            )?;
        }
        Ok(Some(point))
    }
}

fn action(terminate: bool) -> ds_event::EventAction {
    if terminate { ds_event::EventAction::Terminate } else { ds_event::EventAction::Notify }
}

impl VehicleSpec {
    fn pipeline(&self) -> Vec<Box<dyn Component>> {
        let mut components: Vec<Box<dyn Component>> = vec![
            Box::new(FrontSensor::default().with_noise(self.sensor_noise)),
            Box::new(CruiseDriver::new(self.desired_speed)),
            Box::new(Actuator::new()),
            Box::new(KinematicDynamics::new()),
        ];
        if let Some(trigger) = &self.brake_on {
            components.push(Box::new(EventTriggeredBrake::new(trigger.as_str(), self.deceleration)));
        }
        components
    }
}

/// Standard pipeline for agents entering from the on-ramp.
pub fn ramp_pipeline(desired_speed: f64) -> Vec<Box<dyn Component>> {
    vec![
        Box::new(FrontSensor::default()),
        Box::new(CruiseDriver::new(desired_speed)),
        Box::new(Actuator::new()),
        Box::new(KinematicDynamics::new()),
    ]
}
