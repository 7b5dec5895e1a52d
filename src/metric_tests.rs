use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::*;
use crate::rule::Threshold;
use crate::test_fixtures::TempTree;

fn now() -> SystemTime {
    SystemTime::now()
}

/// Whole-second instant, so file systems with coarse timestamps store it exactly.
fn fixed_instant() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

#[test]
fn observation_reads_size_and_age() {
    let tree = TempTree::new();
    tree.file("a.txt", 12);
    let written = fixed_instant();
    tree.set_modified("a.txt", written);

    let observation =
        FileObservation::read(&tree.path().join("a.txt"), written + Duration::from_secs(120))
            .unwrap();
    assert_eq!(observation.name, "a.txt");
    assert_eq!(observation.size, 12);
    assert_eq!(observation.age, Duration::from_secs(120));
}

#[test]
fn future_modification_time_clamps_age_to_zero() {
    let tree = TempTree::new();
    tree.file("a.txt", 1);
    let at = now();
    tree.set_modified("a.txt", at + Duration::from_secs(3600));

    let observation = FileObservation::read(&tree.path().join("a.txt"), at).unwrap();
    assert_eq!(observation.age, Duration::ZERO);
}

#[test]
fn missing_file_is_an_io_error() {
    let tree = TempTree::new();
    assert!(FileObservation::read(&tree.path().join("gone.txt"), now()).is_err());
}

#[test]
fn count_compares_number_of_files() {
    let tree = TempTree::new();
    tree.file("a.txt", 1);
    tree.file("b.txt", 1);
    let files = tree.canonical(&["a.txt", "b.txt"]);
    let mut trace = TraceStore::new();

    let more_than_two = tree.rule(Mode::Count, Comparator::Greater, Threshold::Count(2));
    let evaluation = evaluate_files(&more_than_two, &files, &mut trace, now());
    assert_eq!(evaluation.outcome, Outcome::Fail);
    assert_eq!(evaluation.sub_results.len(), 2);
    assert!(evaluation.sub_results.iter().all(|s| s.result.is_pass()));

    let more_than_one = tree.rule(Mode::Count, Comparator::Greater, Threshold::Count(1));
    assert_eq!(
        evaluate_files(&more_than_one, &files, &mut trace, now()).outcome,
        Outcome::Pass
    );
}

#[test]
fn count_of_zero_files() {
    let tree = TempTree::new();
    let mut trace = TraceStore::new();

    let rule = tree.rule(Mode::Count, Comparator::Less, Threshold::Count(1));
    assert_eq!(evaluate_files(&rule, &[], &mut trace, now()).outcome, Outcome::Pass);

    let rule = tree.rule(Mode::Count, Comparator::Greater, Threshold::Count(0));
    assert_eq!(evaluate_files(&rule, &[], &mut trace, now()).outcome, Outcome::Fail);
}

#[test]
fn size_threshold_boundaries() {
    let tree = TempTree::new();
    tree.file("a.txt", 100);
    let files = tree.canonical(&["a.txt"]);
    let mut trace = TraceStore::new();

    let cases = [
        (Comparator::Greater, Outcome::Fail),
        (Comparator::Less, Outcome::Fail),
        (Comparator::Equal, Outcome::Pass),
    ];
    for (comparator, expected) in cases {
        let rule = tree.rule(Mode::Size, comparator, Threshold::Count(100));
        let evaluation = evaluate_files(&rule, &files, &mut trace, now());
        assert_eq!(evaluation.outcome, expected, "comparator {comparator}");
        assert_eq!(evaluation.sub_results[0].file_size, 100);
    }
}

#[test]
fn one_failing_file_fails_the_rule() {
    let tree = TempTree::new();
    tree.file("small.txt", 10);
    tree.file("large.txt", 5000);
    let files = tree.canonical(&["small.txt", "large.txt"]);
    let mut trace = TraceStore::new();

    let rule = tree.rule(Mode::Size, Comparator::Less, Threshold::Count(1024));
    let evaluation = evaluate_files(&rule, &files, &mut trace, now());
    assert_eq!(evaluation.outcome, Outcome::Fail);
    assert_eq!(evaluation.sub_results[0].result, Outcome::Pass);
    assert_eq!(evaluation.sub_results[1].result, Outcome::Fail);
}

#[test]
fn age_compares_time_since_last_write() {
    let tree = TempTree::new();
    tree.file("old.txt", 1);
    let at = fixed_instant();
    tree.set_modified("old.txt", at - Duration::from_secs(3 * 86400));
    let files = tree.canonical(&["old.txt"]);
    let mut trace = TraceStore::new();

    let one_day = Threshold::Age(Duration::from_secs(86400));
    let younger_than_a_day = tree.rule(Mode::Age, Comparator::Less, one_day);
    let evaluation = evaluate_files(&younger_than_a_day, &files, &mut trace, at);
    assert_eq!(evaluation.outcome, Outcome::Fail);
    assert_eq!(evaluation.sub_results[0].file_age, Duration::from_secs(3 * 86400));

    let older_than_a_day = tree.rule(Mode::Age, Comparator::Greater, one_day);
    assert_eq!(
        evaluate_files(&older_than_a_day, &files, &mut trace, at).outcome,
        Outcome::Pass
    );
}

#[test]
fn size_and_age_without_files() {
    let tree = TempTree::new();
    let mut trace = TraceStore::new();

    let less = tree.rule(Mode::Age, Comparator::Less, Threshold::Age(Duration::from_secs(60)));
    assert_eq!(evaluate_files(&less, &[], &mut trace, now()).outcome, Outcome::Pass);

    let mut less_required = less.clone();
    less_required.fail_if_not_found = true;
    assert_eq!(
        evaluate_files(&less_required, &[], &mut trace, now()).outcome,
        Outcome::Fail
    );

    let greater = tree.rule(Mode::Size, Comparator::Greater, Threshold::Count(0));
    assert_eq!(evaluate_files(&greater, &[], &mut trace, now()).outcome, Outcome::Fail);
}

#[test]
fn trace_first_sighting_passes_with_zero_age() {
    let tree = TempTree::new();
    tree.file("a.txt", 1);
    let files = tree.canonical(&["a.txt"]);
    let mut trace = TraceStore::new();
    let at = now();

    let rule = tree.rule(Mode::Trace, Comparator::Less, Threshold::Age(Duration::ZERO));
    let evaluation = evaluate_files(&rule, &files, &mut trace, at);
    assert_eq!(evaluation.outcome, Outcome::Pass);
    assert_eq!(evaluation.sub_results[0].file_age, Duration::ZERO);
    assert_eq!(trace.len(), 1);
}

#[test]
fn trace_reports_time_under_observation() {
    let tree = TempTree::new();
    tree.file("a.txt", 1);
    let files = tree.canonical(&["a.txt"]);
    let mut trace = TraceStore::new();
    let at = now();
    let rule = tree.rule(Mode::Trace, Comparator::Less, Threshold::Age(Duration::from_secs(600)));

    evaluate_files(&rule, &files, &mut trace, at);

    let evaluation = evaluate_files(&rule, &files, &mut trace, at + Duration::from_secs(300));
    assert_eq!(evaluation.outcome, Outcome::Pass);
    assert_eq!(evaluation.sub_results[0].file_age, Duration::from_secs(300));

    let evaluation = evaluate_files(&rule, &files, &mut trace, at + Duration::from_secs(601));
    assert_eq!(evaluation.outcome, Outcome::Fail);
}

#[test]
fn trace_forgets_files_that_stop_matching() {
    let tree = TempTree::new();
    tree.file("a.txt", 1);
    tree.file("b.txt", 1);
    let both = tree.canonical(&["a.txt", "b.txt"]);
    let mut trace = TraceStore::new();
    let rule = tree.rule(Mode::Trace, Comparator::Less, Threshold::Age(Duration::from_secs(60)));

    evaluate_files(&rule, &both, &mut trace, now());
    assert_eq!(trace.len(), 2);

    evaluate_files(&rule, &both[..1], &mut trace, now());
    assert_eq!(trace.len(), 1);
    assert!(trace.get(&both[1]).is_none());
}

#[test]
fn trace_without_files_passes() {
    let tree = TempTree::new();
    let mut trace = TraceStore::new();

    let minute = Threshold::Age(Duration::from_secs(60));
    let mut rule = tree.rule(Mode::Trace, Comparator::Greater, minute);
    rule.fail_if_not_found = true;
    assert_eq!(evaluate_files(&rule, &[], &mut trace, now()).outcome, Outcome::Pass);
}

#[test]
fn vanished_file_is_skipped() {
    let tree = TempTree::new();
    tree.file("a.txt", 1);
    tree.file("b.txt", 1);
    let files = tree.canonical(&["a.txt", "b.txt"]);
    tree.remove("b.txt");
    let mut trace = TraceStore::new();

    let rule = tree.rule(Mode::Size, Comparator::Less, Threshold::Count(10));
    let evaluation = evaluate_files(&rule, &files, &mut trace, now());
    assert_eq!(evaluation.outcome, Outcome::Pass);
    assert_eq!(evaluation.sub_results.len(), 1);
    assert_eq!(evaluation.sub_results[0].file_name, "a.txt");

    let count = tree.rule(Mode::Count, Comparator::Greater, Threshold::Count(1));
    assert_eq!(evaluate_files(&count, &files, &mut trace, now()).outcome, Outcome::Pass);
}
