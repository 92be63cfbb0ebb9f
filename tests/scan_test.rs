//! Integration tests for the scan engine
//!
//! These tests drive the public library API over in-memory graphs to
//! verify the engine's contract:
//! - Scoring and grading are deterministic and bounded
//! - Re-scanning an unchanged graph is idempotent
//! - Summary tallies match the findings list
//! - Findings are ordered by severity rank
//! - The documented detection scenarios hold

use stacklint::graph::{kind, Edge, Graph, IngressRule, Node};
use stacklint::models::{Category, Severity};
use stacklint::rules::{
    default_rules, BucketEncryptionRule, FlowLogsRule, UnprotectedInstanceRule,
};
use stacklint::scan::Scanner;
use std::sync::Arc;

fn node(id: &str, resource_type: &str) -> Node {
    Node {
        id: id.to_string(),
        resource_type: resource_type.to_string(),
        label: format!("{} label", id),
        attributes: Default::default(),
    }
}

fn edge(source: &str, target: &str) -> Edge {
    Edge {
        source: source.to_string(),
        target: target.to_string(),
    }
}

/// A graph that satisfies every default rule.
fn compliant_graph() -> Graph {
    let mut vpc = node("vpc-1", kind::VPC);
    vpc.attributes.flow_logs = Some(true);

    let instance = node("i-1", kind::INSTANCE);

    let mut sg = node("sg-1", kind::SECURITY_GROUP);
    sg.attributes.ingress = vec![IngressRule {
        protocol: "tcp".to_string(),
        from_port: 22,
        to_port: 22,
        cidr: "10.0.0.0/8".to_string(),
    }];

    let mut bucket = node("b-1", kind::BUCKET);
    bucket.attributes.encryption = Some("aes256".to_string());
    bucket.attributes.public_access = Some(false);
    bucket.attributes.access_logging = Some(true);
    bucket.attributes.versioning = Some(true);

    let mut database = node("db-1", kind::DATABASE);
    database.attributes.encryption = Some("kms".to_string());
    database.attributes.backup_retention_days = Some(7);
    database.attributes.public_access = Some(false);

    let mut balancer = node("lb-1", kind::LOAD_BALANCER);
    balancer.attributes.listener_protocol = Some("https".to_string());

    Graph {
        nodes: vec![vpc, instance, sg, bucket, database, balancer],
        edges: vec![edge("i-1", "sg-1"), edge("lb-1", "i-1")],
    }
}

/// A graph with assorted misconfigurations.
fn messy_graph() -> Graph {
    let vpc = node("vpc-1", kind::VPC); // no flow logs
    let instance = node("i-1", kind::INSTANCE); // no security group
    let bucket = node("b-1", kind::BUCKET); // unencrypted, unlogged, unversioned
    let mut database = node("db-1", kind::DATABASE);
    database.attributes.public_access = Some(true); // exposed, unencrypted, no backups
    Graph {
        nodes: vec![vpc, instance, bucket, database],
        edges: vec![],
    }
}

#[test]
fn empty_graph_scores_perfect() {
    let scanner = Scanner::new(default_rules());
    let result = scanner.run(&Graph::default()).expect("scan");
    assert_eq!(result.score, 100);
    assert_eq!(result.grade, "A");
    assert!(result.findings.is_empty());
    assert_eq!(result.total_resources, 0);
    assert_eq!(result.by_severity.total, 0);
    assert_eq!(result.by_category.total(), 0);
}

#[test]
fn compliant_graph_scores_perfect() {
    let scanner = Scanner::new(default_rules());
    let result = scanner.run(&compliant_graph()).expect("scan");
    assert!(
        result.findings.is_empty(),
        "unexpected findings: {:?}",
        result
            .findings
            .iter()
            .map(|f| f.rule_id.clone())
            .collect::<Vec<_>>()
    );
    assert_eq!(result.score, 100);
    assert_eq!(result.grade, "A");
    assert_eq!(result.total_resources, 6);
}

#[test]
fn score_is_bounded_and_grade_deterministic() {
    let scanner = Scanner::new(default_rules());
    for graph in [Graph::default(), compliant_graph(), messy_graph()] {
        let result = scanner.run(&graph).expect("scan");
        assert!(result.score <= 100);
        assert_eq!(result.grade, {
            let s = result.score;
            if s >= 90 {
                "A"
            } else if s >= 75 {
                "B"
            } else if s >= 60 {
                "C"
            } else if s >= 40 {
                "D"
            } else {
                "F"
            }
        });
    }
}

#[test]
fn rescan_is_idempotent() {
    let scanner = Scanner::new(default_rules());
    let graph = messy_graph();
    let first = scanner.run(&graph).expect("first scan");
    let second = scanner.run(&graph).expect("second scan");

    assert_eq!(first.score, second.score);
    assert_eq!(first.grade, second.grade);
    assert_eq!(first.findings.len(), second.findings.len());
    for (a, b) in first.findings.iter().zip(second.findings.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.rule_id, b.rule_id);
        assert_eq!(a.title, b.title);
        assert_eq!(a.affected_node_ids, b.affected_node_ids);
    }
}

#[test]
fn summary_tallies_match_findings() {
    let scanner = Scanner::new(default_rules());
    let result = scanner.run(&messy_graph()).expect("scan");
    assert!(!result.findings.is_empty());

    let s = &result.by_severity;
    assert_eq!(
        s.critical + s.high + s.medium + s.low + s.info,
        result.findings.len()
    );
    assert_eq!(s.total, result.findings.len());
    assert_eq!(result.by_category.total(), result.findings.len());
}

#[test]
fn findings_ordered_by_severity_rank() {
    let scanner = Scanner::new(default_rules());
    let result = scanner.run(&messy_graph()).expect("scan");
    for pair in result.findings.windows(2) {
        assert!(
            pair[0].severity >= pair[1].severity,
            "{:?} precedes {:?}",
            pair[0].severity,
            pair[1].severity
        );
    }
}

#[test]
fn unprotected_instance_scenario() {
    // One compute instance with no security-group neighbor => exactly one
    // critical/network finding referencing that node's id
    let graph = Graph {
        nodes: vec![node("i-1", kind::INSTANCE)],
        edges: vec![],
    };
    let scanner = Scanner::new(vec![Arc::new(UnprotectedInstanceRule)]);
    let result = scanner.run(&graph).expect("scan");

    assert_eq!(result.findings.len(), 1);
    let finding = &result.findings[0];
    assert_eq!(finding.severity, Severity::Critical);
    assert_eq!(finding.category, Category::Network);
    assert_eq!(finding.affected_node_ids, vec!["i-1".to_string()]);
}

#[test]
fn bucket_encryption_scenario() {
    // Two buckets, one unencrypted => exactly one high/encryption finding
    // referencing only the unencrypted bucket
    let mut encrypted = node("b-good", kind::BUCKET);
    encrypted.attributes.encryption = Some("aes256".to_string());
    let unencrypted = node("b-bad", kind::BUCKET);

    let graph = Graph {
        nodes: vec![encrypted, unencrypted],
        edges: vec![],
    };
    let scanner = Scanner::new(vec![Arc::new(BucketEncryptionRule)]);
    let result = scanner.run(&graph).expect("scan");

    assert_eq!(result.findings.len(), 1);
    let finding = &result.findings[0];
    assert_eq!(finding.severity, Severity::High);
    assert_eq!(finding.category, Category::Encryption);
    assert_eq!(finding.affected_node_ids, vec!["b-bad".to_string()]);
}

#[test]
fn penalty_arithmetic_scenario() {
    // 1 critical (unprotected instance) + 2 medium (two VPCs without flow
    // logs) => penalty 25 + 16 = 41 => score 59 => grade D
    let graph = Graph {
        nodes: vec![
            node("i-1", kind::INSTANCE),
            node("vpc-1", kind::VPC),
            node("vpc-2", kind::VPC),
        ],
        edges: vec![],
    };
    let scanner = Scanner::new(vec![
        Arc::new(UnprotectedInstanceRule),
        Arc::new(FlowLogsRule),
    ]);
    let result = scanner.run(&graph).expect("scan");

    assert_eq!(result.by_severity.critical, 1);
    assert_eq!(result.by_severity.medium, 2);
    assert_eq!(result.score, 59);
    assert_eq!(result.grade, "D");
}

#[test]
fn dangling_edges_do_not_affect_scan() {
    let mut graph = Graph {
        nodes: vec![node("i-1", kind::INSTANCE), node("sg-1", kind::SECURITY_GROUP)],
        edges: vec![edge("i-1", "sg-1")],
    };
    let scanner = Scanner::new(vec![Arc::new(UnprotectedInstanceRule)]);
    assert!(scanner.run(&graph).expect("scan").findings.is_empty());

    // A stale edge to a deleted node changes nothing
    graph.edges.push(edge("i-1", "deleted-node"));
    assert!(scanner.run(&graph).expect("scan").findings.is_empty());
}

#[test]
fn disabled_rules_are_skipped() {
    // Mirrors the config path: filtering the registry before building the
    // scanner removes the rule's findings entirely
    let graph = messy_graph();
    let all = Scanner::new(default_rules()).run(&graph).expect("scan");
    assert!(all.findings.iter().any(|f| f.rule_id == "vpc-flow-logs"));

    let subset: Vec<_> = default_rules()
        .into_iter()
        .filter(|r| r.metadata().id != "vpc-flow-logs")
        .collect();
    let filtered = Scanner::new(subset).run(&graph).expect("scan");
    assert!(!filtered.findings.iter().any(|f| f.rule_id == "vpc-flow-logs"));
    assert!(filtered.score > all.score);
}

#[test]
fn snapshot_file_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("design.json");
    std::fs::write(
        &path,
        r#"{
            "nodes": [
                {"id": "i-1", "resource_type": "instance", "label": "web-1"},
                {"id": "sg-1", "resource_type": "security_group", "label": "web-sg"}
            ],
            "edges": [{"source": "i-1", "target": "sg-1"}]
        }"#,
    )
    .expect("write snapshot");

    let graph = Graph::from_path(&path).expect("load snapshot");
    assert_eq!(graph.node_count(), 2);

    let scanner = Scanner::new(vec![Arc::new(UnprotectedInstanceRule)]);
    let result = scanner.run(&graph).expect("scan");
    assert!(result.findings.is_empty());
    assert_eq!(result.total_resources, 2);
}
