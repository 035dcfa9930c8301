use super::*;
use std::collections::BTreeSet;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_typed_id_creation() {
    let id = CategoryId::new();
    assert!(!id.to_string().is_empty());
}

#[test]
fn test_typed_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = ItemId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
    assert_eq!(ItemId::from(uuid), id);
    assert_eq!(Uuid::from(id), uuid);
}

#[test]
fn test_typed_id_display() {
    let uuid = Uuid::new_v4();
    let id = CategoryId::from_uuid(uuid);
    assert_eq!(format!("{id}"), uuid.to_string());
}

#[test]
fn test_typed_id_from_str() {
    let uuid = Uuid::new_v4();
    let id = ActualEntryId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_id_from_str_error() {
    assert!(CategoryId::from_str("invalid").is_err());
}

#[test]
fn test_typed_ids_are_ordered_for_sets() {
    let a = CategoryId::from_uuid(Uuid::from_u128(1));
    let b = CategoryId::from_uuid(Uuid::from_u128(2));
    let set: BTreeSet<_> = [b, a, b].into_iter().collect();
    assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![a, b]);
}
