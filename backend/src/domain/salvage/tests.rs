//! Tests for the salvage merge rule.

use super::*;
use rstest::{fixture, rstest};

fn id(raw: u32) -> ItemId {
    ItemId::new(raw).expect("valid item id")
}

#[fixture]
fn existing_record() -> SalvageRecord {
    let submission =
        SalvageSubmission::new(id(1), 2, [MaterialEntry::new(id(11), 3)]).expect("valid");
    SalvageRecord::from_submission(&submission)
}

#[rstest]
fn first_submission_becomes_record_verbatim() {
    let submission = SalvageSubmission::new(
        id(5),
        4,
        [MaterialEntry::new(id(50), 1), MaterialEntry::new(id(51), 2)],
    )
    .expect("valid");

    let record = SalvageRecord::from_submission(&submission);

    assert_eq!(record.item_id(), id(5));
    assert_eq!(record.salvage_count(), 4);
    assert_eq!(
        record.materials(),
        &[MaterialEntry::new(id(50), 1), MaterialEntry::new(id(51), 2)]
    );
    assert_eq!(record.revision(), 1);
}

#[rstest]
fn resubmission_increments_existing_and_appends_new(existing_record: SalvageRecord) {
    let again = SalvageSubmission::new(
        id(1),
        1,
        [MaterialEntry::new(id(11), 2), MaterialEntry::new(id(12), 5)],
    )
    .expect("valid");

    let merged = existing_record.absorb(&again).expect("merge succeeds");

    assert_eq!(merged.salvage_count(), 3);
    assert_eq!(
        merged.materials(),
        &[MaterialEntry::new(id(11), 5), MaterialEntry::new(id(12), 5)]
    );
    assert_eq!(merged.revision(), 2);
}

#[rstest]
fn resubmission_without_materials_only_bumps_count(existing_record: SalvageRecord) {
    let again = SalvageSubmission::new(id(1), 7, []).expect("valid");

    let merged = existing_record.absorb(&again).expect("merge succeeds");

    assert_eq!(merged.salvage_count(), 9);
    assert_eq!(merged.materials(), existing_record.materials());
}

#[rstest]
fn overflowing_salvage_count_is_rejected(existing_record: SalvageRecord) {
    let again = SalvageSubmission::new(id(1), u32::MAX, []).expect("valid");

    let result = existing_record.absorb(&again);

    assert_eq!(
        result,
        Err(SalvageValidationError::CountOverflow { item_id: id(1) })
    );
    assert_eq!(existing_record.salvage_count(), 2);
}

#[rstest]
fn overflowing_material_count_is_rejected(existing_record: SalvageRecord) {
    let again =
        SalvageSubmission::new(id(1), 1, [MaterialEntry::new(id(11), u32::MAX)]).expect("valid");

    assert_eq!(
        existing_record.absorb(&again),
        Err(SalvageValidationError::CountOverflow { item_id: id(11) })
    );
}

#[rstest]
fn submission_merges_repeated_materials() {
    let submission = SalvageSubmission::new(
        id(1),
        1,
        [MaterialEntry::new(id(11), 2), MaterialEntry::new(id(11), 4)],
    )
    .expect("valid");

    assert_eq!(submission.materials(), &[MaterialEntry::new(id(11), 6)]);
}

#[rstest]
#[case(0, vec![], SalvageValidationError::ZeroSalvageCount)]
#[case(
    1,
    vec![MaterialEntry::new(id(11), 0)],
    SalvageValidationError::ZeroMaterialCount { item_id: id(11) }
)]
fn submission_rejects_zero_counts(
    #[case] salvage_count: u32,
    #[case] materials: Vec<MaterialEntry>,
    #[case] expected: SalvageValidationError,
) {
    assert_eq!(
        SalvageSubmission::new(id(1), salvage_count, materials),
        Err(expected)
    );
}

#[rstest]
fn restore_rejects_duplicate_materials() {
    let result = SalvageRecord::restore(
        id(1),
        1,
        vec![MaterialEntry::new(id(11), 1), MaterialEntry::new(id(11), 2)],
        1,
    );

    assert_eq!(
        result,
        Err(SalvageValidationError::DuplicateMaterial { item_id: id(11) })
    );
}
