use super::*;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use roster_core::{Candidate, CandidateStatus, SequentialIds, seed_candidates};

use crate::filter_types::{FilterOperator, SortDirection};

fn sheet() -> Sheet<Candidate, SequentialIds> {
    let seed = seed_candidates();
    let ids = SequentialIds::after(seed.iter().map(|c| &c.id));
    Sheet::new(seed, ids)
        .unwrap()
        .with_context(EvalContext::new(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()))
}

fn id(raw: &str) -> RecordId {
    RecordId::from(raw)
}

fn ids(records: &[&Candidate]) -> Vec<String> {
    records.iter().map(|r| r.id.to_string()).collect()
}

#[test]
fn test_new_condition_targets_first_column() {
    let mut sheet = sheet();
    let condition = sheet.add_condition().unwrap().clone();

    assert_eq!(condition.id, "filter-1");
    assert_eq!(condition.column, "name");
    assert_eq!(condition.operator, FilterOperator::Is);
    assert!(!condition.is_active());
    assert_eq!(sheet.filtered().len(), 5);

    assert_eq!(sheet.add_condition().unwrap().id, "filter-2");
}

#[test]
fn test_update_condition_filters_view() {
    let mut sheet = sheet();
    let added = sheet.add_condition().unwrap().clone();
    sheet.set_condition_column(&added.id, "location").unwrap();

    let edited = sheet.conditions()[0]
        .clone()
        .with_operator(FilterOperator::EndsWith)
        .with_value("ca");
    sheet.update_condition(&added.id, edited).unwrap();

    assert_eq!(ids(&sheet.filtered()), vec!["2", "4"]);
}

#[test]
fn test_update_condition_rejects_unknown_column_and_id() {
    let mut sheet = sheet();
    let added = sheet.add_condition().unwrap().clone();

    let mut bad = added.clone();
    bad.column = "salary".to_string();
    assert!(matches!(
        sheet.update_condition(&added.id, bad),
        Err(RosterError::UnknownColumn(_))
    ));
    assert!(matches!(
        sheet.update_condition("filter-99", added.clone()),
        Err(RosterError::ConditionNotFound(_))
    ));
    assert!(matches!(
        sheet.set_condition_column(&added.id, "salary"),
        Err(RosterError::UnknownColumn(_))
    ));
    // the stored condition is untouched
    assert_eq!(sheet.conditions(), &[added]);
}

#[test]
fn test_remove_and_clear_filters() {
    let mut sheet = sheet();
    sheet.set_query("san");
    let first = sheet.add_condition().unwrap().id.clone();
    sheet.add_condition().unwrap();

    let removed = sheet.remove_condition(&first).unwrap();
    assert_eq!(removed.id, first);
    assert_eq!(sheet.conditions().len(), 1);
    assert_eq!(sheet.filtered().len(), 2);

    sheet.clear_filters();
    assert_eq!(sheet.query(), "");
    assert!(sheet.conditions().is_empty());
    assert_eq!(sheet.filtered().len(), 5);
}

#[test]
fn test_request_sort_toggles_and_orders_view() {
    let mut sheet = sheet();
    sheet.request_sort("annualSalaryExpectation").unwrap();
    assert_eq!(ids(&sheet.visible()), vec!["5", "2", "4", "1", "3"]);

    let config = sheet.request_sort("annualSalaryExpectation").unwrap();
    assert_eq!(config.direction, SortDirection::Descending);
    assert_eq!(ids(&sheet.visible()), vec!["3", "1", "4", "2", "5"]);

    assert!(matches!(
        sheet.request_sort("salary"),
        Err(RosterError::UnknownColumn(_))
    ));
    assert_eq!(sheet.sort(), Some(&SortConfig::descending("annualSalaryExpectation")));

    sheet.clear_sort();
    assert_eq!(ids(&sheet.visible()), vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn test_toggle_all_visible_follows_the_filtered_view() {
    let mut sheet = sheet();
    sheet.set_query("san");
    sheet.toggle_all_visible();
    assert_eq!(
        sheet.selection().ids().cloned().collect::<Vec<_>>(),
        vec![id("2"), id("4")]
    );

    // narrowing the view does not prune the selection
    sheet.set_query("diego");
    assert_eq!(sheet.selection().len(), 2);

    // {2, 4} is not exactly the visible {4}, so the selection is replaced
    sheet.toggle_all_visible();
    assert_eq!(sheet.selection().ids().cloned().collect::<Vec<_>>(), vec![id("4")]);

    sheet.toggle_all_visible();
    assert!(sheet.selection().is_empty());
}

#[test]
fn test_toggle_selection_requires_existing_record() {
    let mut sheet = sheet();
    sheet.toggle_selection(&id("3")).unwrap();
    assert!(sheet.selection().contains(&id("3")));
    assert!(matches!(
        sheet.toggle_selection(&id("42")),
        Err(RosterError::RecordNotFound(_))
    ));
}

#[test]
fn test_rank_conflict_keeps_prior_value() {
    let mut sheet = sheet();
    let result = sheet.set_rank(&id("4"), Some(2));
    assert!(matches!(
        result,
        Err(RosterError::InvalidRank(RankError::Duplicate { rank: 2, .. }))
    ));
    assert_eq!(sheet.record(&id("4")).unwrap().rank, None);

    assert!(matches!(
        sheet.update_field(&id("1"), RANK_KEY, Value::from(0i64)),
        Err(RosterError::InvalidRank(RankError::NonPositive { rank: 0 }))
    ));
    assert_eq!(sheet.record(&id("1")).unwrap().rank, Some(1));
}

#[test]
fn test_rank_assignment_and_release() {
    let mut sheet = sheet();
    sheet.set_rank(&id("4"), Some(4)).unwrap();
    sheet.set_rank(&id("1"), None).unwrap();
    sheet.set_rank(&id("5"), Some(1)).unwrap();

    let ranks: Vec<Option<i64>> = sheet.records().iter().map(|c| c.rank).collect();
    assert_eq!(ranks, vec![None, Some(2), Some(3), Some(4), Some(1)]);
}

#[test]
fn test_snapshots_are_not_affected_by_mutation() {
    let mut sheet = sheet();
    let before = sheet.records();
    sheet
        .update_field(&id("2"), "status", Value::from("hired"))
        .unwrap();
    sheet.delete_record(&id("5")).unwrap();

    assert_eq!(before.len(), 5);
    assert_eq!(before[1].status, CandidateStatus::Screening);
    assert_eq!(sheet.record(&id("2")).unwrap().status, CandidateStatus::Hired);
    assert_eq!(sheet.len(), 4);
}

#[test]
fn test_update_field_rejects_bad_input() {
    let mut sheet = sheet();
    assert!(matches!(
        sheet.update_field(&id("1"), "salary", Value::from(1.0)),
        Err(RosterError::UnknownColumn(_))
    ));
    assert!(matches!(
        sheet.update_field(&id("1"), ID_KEY, Value::from("9")),
        Err(RosterError::ImmutableField(_))
    ));
    assert!(matches!(
        sheet.update_field(&id("9"), "name", Value::from("X")),
        Err(RosterError::RecordNotFound(_))
    ));
}

#[test]
fn test_duplicate_appends_copy_without_rank() {
    let mut sheet = sheet();
    let copy_id = sheet.duplicate_record(&id("1")).unwrap();

    assert_eq!(copy_id, id("6"));
    let records = sheet.records();
    let copy = records.last().unwrap();
    assert_eq!(copy.id, copy_id);
    assert_eq!(copy.name, "John Doe");
    assert_eq!(copy.skills, records[0].skills);
    assert_eq!(copy.rank, None);
    assert_eq!(records[0].rank, Some(1));
}

#[test]
fn test_generated_ids_skip_existing_records() {
    let seed = seed_candidates();
    let mut sheet = Sheet::new(seed, SequentialIds::new(4)).unwrap();
    let copy_id = sheet.duplicate_record(&id("2")).unwrap();
    assert_eq!(copy_id, id("6"));
}

#[test]
fn test_delete_record_prunes_selection() {
    let mut sheet = sheet();
    for raw in ["1", "2", "3"] {
        sheet.toggle_selection(&id(raw)).unwrap();
    }
    let removed = sheet.delete_record(&id("2")).unwrap();

    assert_eq!(removed.name, "Jane Smith");
    assert_eq!(
        sheet.selection().ids().cloned().collect::<Vec<_>>(),
        vec![id("1"), id("3")]
    );
}

#[test]
fn test_delete_selected() {
    let mut sheet = sheet();
    sheet.toggle_selection(&id("2")).unwrap();
    sheet.toggle_selection(&id("5")).unwrap();

    assert_eq!(sheet.delete_selected(), 2);
    assert!(sheet.selection().is_empty());
    assert_eq!(ids(&sheet.visible()), vec!["1", "3", "4"]);
    assert_eq!(sheet.delete_selected(), 0);
}

#[test]
fn test_bulk_update_is_all_or_nothing() {
    let mut sheet = sheet();
    sheet.toggle_selection(&id("4")).unwrap();
    sheet.toggle_selection(&id("5")).unwrap();

    assert_eq!(sheet.bulk_update_field("starred", Value::from(true)).unwrap(), 2);
    let starred: Vec<bool> = sheet.records().iter().map(|c| c.starred).collect();
    assert_eq!(starred, vec![true, false, true, true, true]);

    assert!(sheet.bulk_update_field("rating", Value::from(9i64)).is_err());
    assert_eq!(sheet.record(&id("4")).unwrap().rating, Some(3));
    assert_eq!(sheet.record(&id("5")).unwrap().rating, None);
}

#[test]
fn test_bulk_rank_assignment_is_rejected() {
    let mut sheet = sheet();
    sheet.toggle_selection(&id("4")).unwrap();
    sheet.toggle_selection(&id("5")).unwrap();
    assert!(matches!(
        sheet.bulk_update_field(RANK_KEY, Value::from(7i64)),
        Err(RosterError::InvalidRank(RankError::BulkAssignment { count: 2 }))
    ));
}

#[test]
fn test_add_record() {
    let mut sheet = sheet();
    let new_id = sheet
        .add_record(|id| Candidate {
            location: "Denver, CO".into(),
            ..Candidate::new(id, "Ada Park")
        })
        .unwrap();
    assert_eq!(new_id, id("6"));
    assert_eq!(sheet.len(), 6);

    sheet.set_query("denver");
    assert_eq!(ids(&sheet.visible()), vec!["6"]);

    let conflict = sheet.add_record(|id| Candidate {
        rank: Some(3),
        ..Candidate::new(id, "Late Entry")
    });
    assert!(matches!(conflict, Err(RosterError::InvalidRank(_))));
    assert_eq!(sheet.len(), 6);
}

#[test]
fn test_seed_with_repeated_identity_is_rejected() {
    let seed = vec![Candidate::new("1", "Ann"), Candidate::new("1", "Bob")];
    let err = Sheet::new(seed, SequentialIds::default()).unwrap_err();
    assert!(matches!(err, RosterError::InvalidValue { ref column, .. } if column == ID_KEY));
}

#[test]
fn test_seed_with_shared_rank_is_rejected() {
    let seed = vec![
        Candidate {
            rank: Some(1),
            ..Candidate::new("1", "Ann")
        },
        Candidate {
            rank: Some(1),
            ..Candidate::new("2", "Bob")
        },
    ];
    let err = Sheet::new(seed, SequentialIds::default()).unwrap_err();
    assert!(matches!(
        err,
        RosterError::InvalidRank(RankError::Duplicate { rank: 1, ref holder }) if *holder == id("1")
    ));
}

#[test]
fn test_seed_with_invalid_fields_is_rejected() {
    let negative_rank = vec![Candidate {
        rank: Some(-4),
        ..Candidate::new("1", "Ann")
    }];
    assert!(matches!(
        Sheet::new(negative_rank, SequentialIds::default()),
        Err(RosterError::InvalidRank(RankError::NonPositive { rank: -4 }))
    ));

    let bad_rating = vec![Candidate {
        rating: Some(9),
        ..Candidate::new("1", "Ann")
    }];
    assert!(matches!(
        Sheet::new(bad_rating, SequentialIds::default()),
        Err(RosterError::InvalidValue { ref column, .. }) if column == "rating"
    ));
}

#[test]
fn test_ranks_beyond_exact_range_are_rejected() {
    let mut sheet = sheet();
    let err = sheet.set_rank(&id("4"), Some(9_007_199_254_740_993)).unwrap_err();
    assert!(matches!(err, RosterError::InvalidValue { .. }));
    assert!(matches!(
        sheet.update_field(&id("4"), RANK_KEY, Value::from("1e30")),
        Err(RosterError::InvalidValue { .. })
    ));
    assert_eq!(sheet.record(&id("4")).unwrap().rank, None);

    sheet.set_rank(&id("4"), Some(9_007_199_254_740_991)).unwrap();
    assert_eq!(sheet.record(&id("4")).unwrap().rank, Some(9_007_199_254_740_991));
}

#[test]
fn test_generated_ids_after_largest_identity() {
    let seed = vec![Candidate::new("18446744073709551615", "Ann"), Candidate::new("1", "Bob")];
    let ids = SequentialIds::after(seed.iter().map(|c| &c.id));
    let mut sheet = Sheet::new(seed, ids).unwrap();
    assert_eq!(sheet.duplicate_record(&id("1")).unwrap(), id("2"));
}
