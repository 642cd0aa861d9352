//! # Catalog Flows
//!
//! Option vocabularies as the lifecycle and the HTTP layer see them.

use cw_02_evaluation_catalog::{CatalogError, EvaluationCatalogApi, OptionInput};
use shared_types::{Criterion, ErrorKind, Perspective};

use super::fixtures::World;

fn labels(w: &World, perspective: Perspective, criterion: Criterion) -> Vec<(String, u32, u32)> {
    w.container
        .catalog
        .get_options(perspective, criterion)
        .unwrap()
        .into_iter()
        .map(|o| (o.label, o.points, o.order))
        .collect()
}

#[test]
fn test_upsert_then_get_round_trip() {
    let w = World::new();
    let options = vec![
        OptionInput::new("Rất dễ", 1, 0),
        OptionInput::new("Rất khó", 5, 1),
    ];

    w.container
        .catalog
        .upsert_options(Perspective::User, Criterion::Difficulty, options.clone())
        .unwrap();
    assert_eq!(
        labels(&w, Perspective::User, Criterion::Difficulty),
        vec![
            ("Rất dễ".to_string(), 1, 0),
            ("Rất khó".to_string(), 5, 1),
        ]
    );

    w.container
        .catalog
        .upsert_options(Perspective::User, Criterion::Difficulty, options)
        .unwrap();
    assert_eq!(labels(&w, Perspective::User, Criterion::Difficulty).len(), 2);

    let configs = w
        .container
        .catalog
        .list_configs(Some(Perspective::User), Some(Criterion::Difficulty))
        .unwrap();
    assert_eq!(configs.len(), 1);
}

#[test]
fn test_options_follow_order_not_insertion() {
    let w = World::new();
    w.container
        .catalog
        .upsert_options(
            Perspective::Admin,
            Criterion::Urgency,
            vec![
                OptionInput::new("Khan cap", 3, 2),
                OptionInput::new("Binh thuong", 1, 0),
                OptionInput::new("Gap", 2, 1),
            ],
        )
        .unwrap();

    let orders: Vec<u32> = labels(&w, Perspective::Admin, Criterion::Urgency)
        .into_iter()
        .map(|(_, _, order)| order)
        .collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[test]
fn test_seed_defaults_fills_only_missing_pairs() {
    let w = World::new();
    w.container
        .catalog
        .upsert_options(
            Perspective::User,
            Criterion::Time,
            vec![OptionInput::new("Nhanh", 1, 0)],
        )
        .unwrap();

    let created = w.container.catalog.seed_defaults().unwrap();
    assert!(created > 0);
    assert_eq!(labels(&w, Perspective::User, Criterion::Time).len(), 1);
    assert_eq!(w.container.catalog.seed_defaults().unwrap(), 0);
}

#[test]
fn test_deactivated_pair_reads_empty() {
    let w = World::new();
    let catalog = &w.container.catalog;
    catalog
        .upsert_options(
            Perspective::User,
            Criterion::Form,
            vec![OptionInput::new("Hai long", 4, 0)],
        )
        .unwrap();
    catalog
        .deactivate(Perspective::User, Criterion::Form)
        .unwrap();

    assert!(labels(&w, Perspective::User, Criterion::Form).is_empty());
    let err = catalog
        .deactivate(Perspective::User, Criterion::Form)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_form_is_not_an_admin_criterion() {
    let w = World::new();
    let err = w
        .container
        .catalog
        .upsert_options(
            Perspective::Admin,
            Criterion::Form,
            vec![OptionInput::new("Dep", 1, 0)],
        )
        .unwrap_err();
    assert!(matches!(err, CatalogError::CriterionNotAllowed { .. }));
    assert_eq!(err.kind(), ErrorKind::Validation);
}
