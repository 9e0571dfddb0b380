//! Tests for named entries.

use super::{Response, TestContext, TestHook, pass};
use hook_pipeline::{HookPipeline, PipelineError, PipelineItem};
use std::sync::Arc;

fn names(pipeline: &HookPipeline<TestContext, Response>) -> Vec<&str> {
    pipeline
        .items()
        .iter()
        .map(|item| item.name().unwrap_or("-"))
        .collect()
}

fn named(name: &str) -> PipelineItem<TestContext, Response> {
    PipelineItem::named(name, pass())
}

fn pipeline_of(entries: &[&str]) -> HookPipeline<TestContext, Response> {
    let mut pipeline = HookPipeline::new();
    for name in entries {
        pipeline.add_to_end(named(name));
    }
    pipeline
}

#[test]
fn adding_existing_name_to_end_moves_it_to_the_end() {
    let mut pipeline = pipeline_of(&["auth", "csrf", "cache"]);

    pipeline.add_to_end(named("auth"));

    assert_eq!(names(&pipeline), ["csrf", "cache", "auth"]);
}

#[test]
fn adding_existing_name_to_start_moves_it_to_the_start() {
    let mut pipeline = pipeline_of(&["auth", "csrf", "cache"]);

    pipeline.add_to_start(named("cache"));

    assert_eq!(names(&pipeline), ["cache", "auth", "csrf"]);
}

#[test]
fn in_place_variants_keep_the_existing_slot() {
    let mut pipeline = pipeline_of(&["auth", "csrf", "cache"]);
    let replacement: TestHook = pass();

    pipeline.add_to_start_in_place(PipelineItem::named("csrf", Arc::clone(&replacement)));
    pipeline.add_to_end_in_place(named("auth"));
    pipeline.insert_at_in_place(0, named("cache")).unwrap();

    assert_eq!(names(&pipeline), ["auth", "csrf", "cache"]);
    assert!(Arc::ptr_eq(pipeline.items()[1].hook(), &replacement));
}

#[test]
fn in_place_variants_without_match_use_requested_position() {
    let mut pipeline = pipeline_of(&["auth"]);

    pipeline.add_to_start_in_place(named("cors"));
    pipeline.add_to_end_in_place(named("cache"));
    pipeline.insert_at_in_place(1, named("csrf")).unwrap();

    assert_eq!(names(&pipeline), ["cors", "csrf", "auth", "cache"]);
}

#[test]
fn insert_at_in_place_validates_index_first() {
    let mut pipeline = pipeline_of(&["auth", "csrf"]);

    let result = pipeline.insert_at_in_place(5, named("auth"));

    assert_eq!(result, Err(PipelineError::IndexOutOfRange { index: 5, len: 2 }));
    assert_eq!(names(&pipeline), ["auth", "csrf"]);
}

#[test]
fn insert_before_places_item_before_named_entry() {
    let mut pipeline = pipeline_of(&["auth", "cache"]);

    pipeline.insert_before("cache", named("csrf"));

    assert_eq!(names(&pipeline), ["auth", "csrf", "cache"]);
}

#[test]
fn insert_before_unknown_name_inserts_at_start() {
    let mut pipeline = pipeline_of(&["auth", "cache"]);

    pipeline.insert_before("missing", named("cors"));

    assert_eq!(names(&pipeline), ["cors", "auth", "cache"]);
}

#[test]
fn insert_after_places_item_after_named_entry() {
    let mut pipeline = pipeline_of(&["auth", "cache"]);

    pipeline.insert_after("auth", named("csrf"));

    assert_eq!(names(&pipeline), ["auth", "csrf", "cache"]);
}

#[test]
fn insert_after_unknown_name_inserts_at_end() {
    let mut pipeline = pipeline_of(&["auth", "cache"]);

    pipeline.insert_after("missing", named("log"));

    assert_eq!(names(&pipeline), ["auth", "cache", "log"]);
}

#[test]
fn insert_after_moves_existing_entry_with_same_name() {
    let mut pipeline = pipeline_of(&["csrf", "auth", "cache"]);

    pipeline.insert_after("cache", named("csrf"));

    assert_eq!(names(&pipeline), ["auth", "cache", "csrf"]);
}

#[test]
fn reinserting_entry_before_itself_keeps_its_slot() {
    let mut pipeline = pipeline_of(&["x", "a", "y"]);
    let replacement: TestHook = pass();

    pipeline.insert_before("a", PipelineItem::named("a", Arc::clone(&replacement)));

    assert_eq!(names(&pipeline), ["x", "a", "y"]);
    assert!(Arc::ptr_eq(pipeline.items()[1].hook(), &replacement));
}

#[test]
fn reinserting_entry_after_itself_keeps_its_slot() {
    let mut pipeline = pipeline_of(&["x", "a", "y"]);
    let replacement: TestHook = pass();

    pipeline.insert_after("a", PipelineItem::named("a", Arc::clone(&replacement)));

    assert_eq!(names(&pipeline), ["x", "a", "y"]);
    assert!(Arc::ptr_eq(pipeline.items()[1].hook(), &replacement));
}

#[test]
fn insert_before_moves_earlier_entry_next_to_anchor() {
    let mut pipeline = pipeline_of(&["csrf", "auth", "cache"]);

    pipeline.insert_before("cache", named("csrf"));

    assert_eq!(names(&pipeline), ["auth", "csrf", "cache"]);
}

#[test]
fn insert_after_moves_later_entry_next_to_anchor() {
    let mut pipeline = pipeline_of(&["auth", "cache", "csrf"]);

    pipeline.insert_after("auth", named("csrf"));

    assert_eq!(names(&pipeline), ["auth", "csrf", "cache"]);
}

#[test]
fn unnamed_items_can_be_anchored_around_named_ones() {
    let mut pipeline = pipeline_of(&["auth"]);

    pipeline.insert_before("auth", pass());
    pipeline.insert_after("auth", pass());

    assert_eq!(names(&pipeline), ["-", "auth", "-"]);
}

#[test]
fn remove_by_name_returns_former_index() {
    let mut pipeline = pipeline_of(&["auth", "csrf", "cache"]);

    assert_eq!(pipeline.remove_by_name("csrf"), Some(1));
    assert_eq!(names(&pipeline), ["auth", "cache"]);
}

#[test]
fn remove_by_unknown_name_returns_none() {
    let mut pipeline = pipeline_of(&["auth"]);

    assert_eq!(pipeline.remove_by_name("csrf"), None);
    assert_eq!(pipeline.len(), 1);
}

#[test]
fn concat_replaces_entries_with_matching_names() {
    let mut pipeline = pipeline_of(&["auth", "csrf"]);
    let other = pipeline_of(&["auth", "cache"]);

    pipeline.concat(&other);

    assert_eq!(names(&pipeline), ["csrf", "auth", "cache"]);
    assert_eq!(names(&other), ["auth", "cache"]);
}

#[test]
fn position_finds_named_entries() {
    let pipeline = pipeline_of(&["auth", "csrf"]);

    assert_eq!(pipeline.position("auth"), Some(0));
    assert_eq!(pipeline.position("csrf"), Some(1));
    assert_eq!(pipeline.position("cache"), None);
}
