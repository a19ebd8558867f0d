// src/config/validate.rs

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{RawScenarioFile, ScenarioFile};
use crate::errors::{Result, SimError};

impl TryFrom<RawScenarioFile> for ScenarioFile {
    type Error = crate::errors::SimError;

    fn try_from(raw: RawScenarioFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_scenario(&raw)?;
        Ok(ScenarioFile::new_unchecked(raw.task, raw.agent))
    }
}

fn validate_raw_scenario(cfg: &RawScenarioFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_unique_ids(cfg)?;
    validate_task_numbers(cfg)?;
    validate_task_dependencies(cfg)?;
    validate_agent_capabilities(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &RawScenarioFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(SimError::ConfigError(
            "scenario must contain at least one [[task]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_unique_ids(cfg: &RawScenarioFile) -> Result<()> {
    let mut seen = HashSet::new();
    for task in cfg.task.iter() {
        if !seen.insert(task.id.as_str()) {
            return Err(SimError::ConfigError(format!(
                "duplicate task id '{}'",
                task.id
            )));
        }
    }

    let mut seen = HashSet::new();
    for agent in cfg.agent.iter() {
        if !seen.insert(agent.id.as_str()) {
            return Err(SimError::ConfigError(format!(
                "duplicate agent id '{}'",
                agent.id
            )));
        }
    }
    Ok(())
}

fn validate_task_numbers(cfg: &RawScenarioFile) -> Result<()> {
    for task in cfg.task.iter() {
        if task.base_duration == 0 || task.min_duration == 0 {
            return Err(SimError::ConfigError(format!(
                "task '{}' must have base_duration and min_duration >= 1",
                task.id
            )));
        }
        if !(task.cost_weight.is_finite() && task.cost_weight > 0.0) {
            return Err(SimError::ConfigError(format!(
                "task '{}' must have a positive cost_weight (got {})",
                task.id, task.cost_weight
            )));
        }
    }
    Ok(())
}

fn validate_task_dependencies(cfg: &RawScenarioFile) -> Result<()> {
    let ids: HashSet<&str> = cfg.task.iter().map(|t| t.id.as_str()).collect();

    for task in cfg.task.iter() {
        for dep in task.dependencies.iter() {
            if dep == &task.id {
                return Err(SimError::ConfigError(format!(
                    "task '{}' cannot depend on itself",
                    task.id
                )));
            }
            if !ids.contains(dep.as_str()) {
                return Err(SimError::ConfigError(format!(
                    "task '{}' has unknown dependency '{}'",
                    task.id, dep
                )));
            }
        }
    }
    Ok(())
}

fn validate_agent_capabilities(cfg: &RawScenarioFile) -> Result<()> {
    let ids: HashSet<&str> = cfg.task.iter().map(|t| t.id.as_str()).collect();

    for agent in cfg.agent.iter() {
        for cap in agent.capabilities.iter() {
            if !ids.contains(cap.as_str()) {
                return Err(SimError::ConfigError(format!(
                    "agent '{}' lists unknown task '{}' in capabilities",
                    agent.id, cap
                )));
            }
        }
    }
    Ok(())
}

fn validate_dag(cfg: &RawScenarioFile) -> Result<()> {
    // Edge direction: dependency -> dependent.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for task in cfg.task.iter() {
        graph.add_node(task.id.as_str());
    }

    for task in cfg.task.iter() {
        for dep in task.dependencies.iter() {
            graph.add_edge(dep.as_str(), task.id.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(SimError::DependencyCycle(format!(
            "cycle detected in task dependencies involving task '{}'",
            cycle.node_id()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{AgentConfig, TaskConfig};

    fn task(id: &str, deps: &[&str]) -> TaskConfig {
        TaskConfig {
            id: id.to_string(),
            name: None,
            base_duration: 10,
            duration_spread: 0,
            min_duration: 1,
            cost_weight: 1.0,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn rejects_empty_scenario() {
        let err = ScenarioFile::try_from(RawScenarioFile::default()).unwrap_err();
        assert!(matches!(err, SimError::ConfigError(_)));
    }

    #[test]
    fn rejects_cycle() {
        let raw = RawScenarioFile {
            task: vec![task("a", &["b"]), task("b", &["a"])],
            agent: vec![],
        };
        match ScenarioFile::try_from(raw) {
            Err(SimError::DependencyCycle(msg)) => assert!(msg.contains("cycle detected")),
            other => panic!("expected DependencyCycle, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_capability() {
        let raw = RawScenarioFile {
            task: vec![task("a", &[])],
            agent: vec![AgentConfig {
                id: "x".into(),
                name: None,
                capabilities: vec!["nope".into()],
            }],
        };
        match ScenarioFile::try_from(raw) {
            Err(SimError::ConfigError(msg)) => assert!(msg.contains("nope")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_task_ids() {
        let raw = RawScenarioFile {
            task: vec![task("a", &[]), task("a", &[])],
            agent: vec![],
        };
        assert!(ScenarioFile::try_from(raw).is_err());
    }

    #[test]
    fn demo_plan_passes_validation() {
        let demo = ScenarioFile::demo();
        let raw = RawScenarioFile {
            task: demo.tasks().to_vec(),
            agent: demo.agents().to_vec(),
        };
        assert!(ScenarioFile::try_from(raw).is_ok());
    }
}
