// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{
    load_and_validate_config, parse_yaml, NodeKindConfig, OperationConfig, RuntimeBuilder,
};
use crate::errors::{ConfigError, ValidationError};
use crate::network::NodeState;
use crate::paraconsistent::{BlockParams, Region};
use crate::signal::Signal;
use std::io::Write;

fn labels(signals: &[Signal]) -> Vec<Region> {
    signals
        .iter()
        .filter_map(|s| match s {
            Signal::Classified(c) => Some(c.label),
            _ => None,
        })
        .collect()
}

/// Test that the YAML pipeline loads with the expected structure
#[test]
fn test_pipeline_yaml_loading() {
    let config = load_and_validate_config("configs/pipeline.yaml").unwrap();

    assert_eq!(config.params, BlockParams::default());
    assert!(config.blocks.is_empty());
    assert_eq!(config.nodes.len(), 4);
    assert_eq!(config.nodes[0].id, "sensor");
    assert_eq!(config.nodes[0].kind, NodeKindConfig::Input);
    assert_eq!(config.nodes[1].depends_on, vec!["sensor"]);
    assert_eq!(
        config.nodes[2].operation,
        Some(OperationConfig::RegionClassifier { params: None })
    );
    assert_eq!(config.signals.len(), 2);
    assert_eq!(config.signals[1].source, "sensorX");
}

/// Test that the TOML aggregation description loads, blocks included
#[test]
fn test_aggregation_toml_loading() {
    let config = load_and_validate_config("configs/aggregation.toml").unwrap();

    assert_eq!(config.blocks.len(), 1);
    assert_eq!(config.blocks[0].id, "analysis");
    assert!(config.blocks[0].params.is_none());
    assert_eq!(config.nodes[2].depends_on, vec!["left", "right"]);
    assert_eq!(config.nodes[2].operation, Some(OperationConfig::Average));
    assert_eq!(config.signals[2].node, "analysis.in");
}

#[test]
fn test_pipeline_yaml_runs() {
    let config = load_and_validate_config("configs/pipeline.yaml").unwrap();
    let mut runtime = RuntimeBuilder::from_config(&config).unwrap();
    runtime.run().unwrap();

    let network = &runtime.network;
    assert_eq!(network.get_outputs("parser").len(), 2);
    assert_eq!(
        labels(network.get_outputs("classifier")),
        vec![Region::True, Region::QuasiInconsistentTowardTrue]
    );

    let batch = network.get_outputs("batch");
    assert_eq!(batch.len(), 1);
    match &batch[0] {
        Signal::Classified(c) => {
            assert_eq!(c.label, Region::QuasiTrueTowardInconsistent);
            assert!((c.confidence - 0.45).abs() < 1e-9);
            assert_eq!(c.source_id, "sensorX");
        }
        other => panic!("expected classified signal, got {:?}", other),
    }
}

#[test]
fn test_aggregation_toml_runs() {
    let config = load_and_validate_config("configs/aggregation.toml").unwrap();
    let mut runtime = RuntimeBuilder::from_config(&config).unwrap();
    runtime.run().unwrap();

    let network = &runtime.network;
    let average = network.get_outputs("average");
    assert_eq!(average.len(), 1);
    let (mu, lambda) = average[0].evidence().unwrap();
    assert!((mu - 0.7).abs() < 1e-9);
    assert!((lambda - 0.1).abs() < 1e-9);
    assert_eq!(average[0].source_id(), "aggregated");

    assert_eq!(labels(network.get_outputs("report")), vec![Region::True]);

    let block = &runtime.blocks[0];
    let record = block.complete(network).unwrap();
    assert_eq!(record.mu, 0.85);
    assert_eq!(record.label, Region::QuasiTrueTowardInconsistent);
    assert_eq!(
        block.classified(network).unwrap().label,
        Region::QuasiTrueTowardInconsistent
    );
}

#[test]
fn test_runtime_repeated_runs_are_stable() {
    let config = load_and_validate_config("configs/pipeline.yaml").unwrap();
    let mut runtime = RuntimeBuilder::from_config(&config).unwrap();

    runtime.run().unwrap();
    let first = runtime.network.get_outputs("classifier").to_vec();
    runtime.run().unwrap();

    assert_eq!(runtime.network.get_outputs("classifier"), first.as_slice());
    assert_eq!(
        runtime.network.node("classifier").unwrap().state(),
        NodeState::Propagated
    );
}

#[test]
fn test_block_params_override_shared() {
    let yaml = r#"
params: { ftc: 0.5 }
blocks:
  - id: strict
    params: { ftc: 0.9 }
  - id: lenient
signals:
  - { node: strict.in, mu: 0.8, lambda: 0.2 }
  - { node: lenient.in, mu: 0.8, lambda: 0.2 }
"#;

    let config = parse_yaml(yaml).unwrap();
    let mut runtime = RuntimeBuilder::from_config(&config).unwrap();
    runtime.run().unwrap();

    let strict = runtime.blocks[0].complete(&runtime.network).unwrap();
    let lenient = runtime.blocks[1].complete(&runtime.network).unwrap();
    assert_eq!(strict.ftc, 0.9);
    assert_ne!(strict.label, Region::True);
    assert_eq!(lenient.ftc, 0.5);
    assert_eq!(lenient.label, Region::True);
}

#[test]
fn test_invalid_files_collect_every_error() {
    let yaml = r#"
nodes:
  - id: a
    kind: input
    operation: { type: identity }
  - id: b
    kind: output
    depends_on: [ghost]
signals:
  - { node: b, mu: 0.5, lambda: 0.5 }
"#;

    let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    match load_and_validate_config(file.path()) {
        Err(ConfigError::Validation(errors)) => {
            assert!(errors.contains(&ValidationError::OperationOnInputNode {
                node_id: "a".into()
            }));
            assert!(errors.contains(&ValidationError::MissingOperation {
                node_id: "b".into()
            }));
            assert!(errors.contains(&ValidationError::UnresolvedDependency {
                node_id: "b".into(),
                missing_dependency: "ghost".into(),
            }));
            assert!(errors.contains(&ValidationError::UnknownSignalTarget {
                node_id: "b".into()
            }));
        }
        other => panic!("expected validation errors, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_builder_reports_unvalidated_problems() {
    let yaml = r#"
nodes:
  - { id: a, kind: input }
  - { id: a, kind: input }
"#;

    let config = parse_yaml(yaml).unwrap();
    assert!(matches!(
        RuntimeBuilder::from_config(&config),
        Err(ConfigError::Network(_))
    ));
}
