use super::*;

#[test]
fn tag_with_all_variants() {
    let info = TagInfo::with_all_variants(vec![vec![], vec![0], vec![6, 6]]);

    assert_eq!(info.variant_count(), 3);
    assert_eq!(info.largest_variants(), &[0, 1, 2]);
    assert_eq!(info.variant(2), &[6, 6]);
    assert!(info.has_discriminant());
}

#[test]
fn single_variant_has_no_discriminant() {
    let info = TagInfo::with_all_variants(vec![vec![6]]);
    assert!(!info.has_discriminant());
}

#[test]
fn empty_union() {
    let info = TagInfo::new(vec![], vec![]);
    assert_eq!(info.variant_count(), 0);
    assert!(!info.has_discriminant());
}

#[test]
#[should_panic(expected = "largest-variant hint 3 out of range")]
fn hint_out_of_range() {
    TagInfo::new(vec![vec![], vec![]], vec![3]);
}

#[test]
#[should_panic(expected = "largest-variant hint is empty")]
fn hint_empty() {
    TagInfo::new(vec![vec![]], vec![]);
}

#[test]
#[should_panic(expected = "variant 5 out of range")]
fn variant_out_of_range() {
    TagInfo::with_all_variants(vec![vec![]]).variant(5);
}

#[test]
fn table_lookup() {
    let tables = ShapeTables::new(vec![TagInfo::with_all_variants(vec![vec![0]])], vec![0xdead]);

    assert_eq!(tables.tag(TagId(0)).variant(0), &[0]);
    assert_eq!(tables.resource(ResId(0)), 0xdead);
}

#[test]
#[should_panic(expected = "unknown tag id 1")]
fn unknown_tag() {
    ShapeTables::default().tag(TagId(1));
}

#[test]
#[should_panic(expected = "unknown resource id 0")]
fn unknown_resource() {
    ShapeTables::default().resource(ResId(0));
}
