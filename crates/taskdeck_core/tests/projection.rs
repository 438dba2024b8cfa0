use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use taskdeck_core::{
    project, stats, Priority, Scope, SortKey, StatusFilter, Task, TaskQuery, ValidationError,
};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn task(id: u64, title: &str, due: Option<NaiveDate>, priority: Priority) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: String::new(),
        list_id: None,
        priority,
        due_date: due,
        completed: false,
        // Spread creation stamps so the `created` sort has distinct keys.
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::hours(id as i64),
        completed_at: None,
        list_name: None,
    }
}

fn ids(tasks: &[Task]) -> Vec<u64> {
    tasks.iter().map(|t| t.id).collect()
}

fn sample() -> Vec<Task> {
    vec![
        task(1, "A", Some(date(2024, 1, 10)), Priority::Low),
        task(2, "B", None, Priority::High),
        task(3, "C", Some(date(2024, 1, 5)), Priority::Medium),
    ]
}

#[test]
fn due_date_sort_orders_dated_tasks_and_pushes_undated_last() {
    let query = TaskQuery::new();
    let view = project(&sample(), &query, fixed_now());
    assert_eq!(ids(&view), vec![3, 1, 2]);
}

#[test]
fn priority_sort_is_descending_by_rank() {
    let query = TaskQuery {
        sort: SortKey::Priority,
        ..TaskQuery::new()
    };
    let view = project(&sample(), &query, fixed_now());
    assert_eq!(ids(&view), vec![2, 3, 1]);
}

#[test]
fn undated_tasks_keep_their_relative_order() {
    let tasks = vec![
        task(1, "x", None, Priority::Medium),
        task(2, "y", Some(date(2024, 2, 1)), Priority::Medium),
        task(3, "z", None, Priority::Medium),
    ];
    let view = project(&tasks, &TaskQuery::new(), fixed_now());
    assert_eq!(ids(&view), vec![2, 1, 3]);
}

#[test]
fn created_sort_is_newest_first() {
    let query = TaskQuery {
        sort: SortKey::Created,
        ..TaskQuery::new()
    };
    let view = project(&sample(), &query, fixed_now());
    assert_eq!(ids(&view), vec![3, 2, 1]);
}

#[test]
fn title_sort_is_case_insensitive() {
    let tasks = vec![
        task(1, "banana", None, Priority::Medium),
        task(2, "Apple", None, Priority::Medium),
        task(3, "cherry", None, Priority::Medium),
    ];
    let query = TaskQuery {
        sort: SortKey::Title,
        ..TaskQuery::new()
    };
    let view = project(&tasks, &query, fixed_now());
    assert_eq!(ids(&view), vec![2, 1, 3]);
}

#[test]
fn today_scope_keeps_open_tasks_due_today() {
    let mut done_today = task(4, "done", Some(date(2024, 1, 10)), Priority::Medium);
    done_today.completed = true;
    done_today.completed_at = Some(fixed_now());

    let mut tasks = sample();
    tasks.push(done_today);
    tasks.push(task(5, "tomorrow", Some(date(2024, 1, 11)), Priority::Low));

    let query = TaskQuery {
        scope: Scope::Today,
        ..TaskQuery::new()
    };
    let view = project(&tasks, &query, fixed_now());
    assert_eq!(ids(&view), vec![1]);
}

#[test]
fn upcoming_scope_keeps_open_tasks_due_strictly_after_today() {
    let mut tasks = sample();
    tasks.push(task(5, "tomorrow", Some(date(2024, 1, 11)), Priority::Low));
    tasks.push(task(6, "yesterday", Some(date(2024, 1, 9)), Priority::Low));

    let query = TaskQuery {
        scope: Scope::Upcoming,
        ..TaskQuery::new()
    };
    let view = project(&tasks, &query, fixed_now());
    assert_eq!(ids(&view), vec![5]);
}

#[test]
fn list_scope_keeps_tasks_regardless_of_completion() {
    let mut member = task(1, "member", None, Priority::Medium);
    member.list_id = Some(7);
    let mut done_member = task(2, "done member", None, Priority::Medium);
    done_member.list_id = Some(7);
    done_member.completed = true;
    done_member.completed_at = Some(fixed_now());
    let outsider = task(3, "outsider", None, Priority::Medium);

    let query = TaskQuery {
        scope: Scope::ByList(7),
        ..TaskQuery::new()
    };
    let view = project(&[member, done_member, outsider], &query, fixed_now());
    assert_eq!(ids(&view), vec![1, 2]);
}

#[test]
fn search_matches_title_or_description_case_insensitively() {
    let mut with_description = task(1, "plain", None, Priority::Medium);
    with_description.description = "contains Foo bar".to_string();
    let with_title = task(2, "FOOtball season", None, Priority::Medium);
    let unrelated = task(3, "nothing here", None, Priority::Medium);

    let query = TaskQuery {
        search: "foo".to_string(),
        ..TaskQuery::new()
    };
    let view = project(
        &[with_description, with_title, unrelated],
        &query,
        fixed_now(),
    );
    assert_eq!(ids(&view), vec![1, 2]);
}

#[test]
fn blank_search_is_a_no_op() {
    let query = TaskQuery {
        search: "   ".to_string(),
        ..TaskQuery::new()
    };
    assert_eq!(project(&sample(), &query, fixed_now()).len(), 3);
}

#[test]
fn overdue_filter_never_returns_completed_or_undated_tasks() {
    let overdue = task(1, "late", Some(date(2024, 1, 5)), Priority::Medium);
    let mut done_late = task(2, "done late", Some(date(2024, 1, 5)), Priority::Medium);
    done_late.completed = true;
    done_late.completed_at = Some(fixed_now());
    let undated = task(3, "undated", None, Priority::Medium);
    let future = task(4, "future", Some(date(2024, 1, 20)), Priority::Medium);

    let query = TaskQuery {
        status: StatusFilter::Overdue,
        ..TaskQuery::new()
    };
    let view = project(&[overdue, done_late, undated, future], &query, fixed_now());
    assert_eq!(ids(&view), vec![1]);
    assert!(view.iter().all(|t| !t.completed && t.due_date.is_some()));
}

#[test]
fn active_and_completed_filters_split_on_the_flag() {
    let open = task(1, "open", None, Priority::Medium);
    let mut done = task(2, "done", None, Priority::Medium);
    done.completed = true;
    done.completed_at = Some(fixed_now());
    let tasks = [open, done];

    let active = TaskQuery {
        status: StatusFilter::Active,
        ..TaskQuery::new()
    };
    assert_eq!(ids(&project(&tasks, &active, fixed_now())), vec![1]);

    let completed = TaskQuery {
        status: StatusFilter::Completed,
        ..TaskQuery::new()
    };
    assert_eq!(ids(&project(&tasks, &completed, fixed_now())), vec![2]);
}

#[test]
fn priority_filter_is_an_exact_match() {
    let query = TaskQuery {
        priority: Some(Priority::High),
        ..TaskQuery::new()
    };
    let view = project(&sample(), &query, fixed_now());
    assert_eq!(ids(&view), vec![2]);
}

#[test]
fn filters_compose_in_scope_search_status_priority_order() {
    let mut hit = task(1, "ship release notes", Some(date(2024, 1, 11)), Priority::High);
    hit.description = "draft and send".to_string();
    let wrong_scope = task(2, "ship hotfix", Some(date(2024, 1, 9)), Priority::High);
    let mut wrong_priority = task(3, "ship newsletter", Some(date(2024, 1, 12)), Priority::Low);
    wrong_priority.description = "send to everyone".to_string();

    let query = TaskQuery {
        scope: Scope::Upcoming,
        search: "ship".to_string(),
        status: StatusFilter::Active,
        priority: Some(Priority::High),
        ..TaskQuery::new()
    };
    let view = project(&[hit, wrong_scope, wrong_priority], &query, fixed_now());
    assert_eq!(ids(&view), vec![1]);
}

#[test]
fn archive_query_sorts_by_completion_falling_back_to_creation() {
    let mut first = task(1, "first done", None, Priority::Medium);
    first.completed = true;
    first.completed_at = Some(Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap());
    let mut second = task(2, "second done", None, Priority::Medium);
    second.completed = true;
    second.completed_at = Some(Utc.with_ymd_and_hms(2024, 1, 9, 9, 0, 0).unwrap());
    // Legacy record without a stamp: the archive key falls back to `created_at`.
    let mut unstamped = task(3, "no stamp", None, Priority::Medium);
    unstamped.completed = true;
    let open = task(4, "still open", None, Priority::Medium);

    let view = project(
        &[first, second, unstamped, open],
        &TaskQuery::archive(),
        fixed_now(),
    );
    // created_at for id 3 is 2024-01-01, earlier than both stamps.
    assert_eq!(ids(&view), vec![2, 1, 3]);
}

#[test]
fn stats_counts_totals_active_completed_and_overdue() {
    let mut done = task(2, "done", None, Priority::Medium);
    done.completed = true;
    done.completed_at = Some(fixed_now());
    let tasks = [
        task(1, "late", Some(date(2024, 1, 5)), Priority::Medium),
        done,
        task(3, "future", Some(date(2024, 1, 20)), Priority::Medium),
    ];

    let snapshot = stats(&tasks, fixed_now());
    assert_eq!(snapshot.total, 3);
    assert_eq!(snapshot.completed, 1);
    assert_eq!(snapshot.active, 2);
    assert_eq!(snapshot.overdue, 1);
}

#[test]
fn scope_parses_route_text_and_rejects_malformed_input() {
    assert_eq!(Scope::parse("all").unwrap(), Scope::All);
    assert_eq!(Scope::parse("today").unwrap(), Scope::Today);
    assert_eq!(Scope::parse("upcoming").unwrap(), Scope::Upcoming);
    assert_eq!(Scope::parse("list:7").unwrap(), Scope::ByList(7));

    assert!(matches!(
        Scope::parse("list:abc").unwrap_err(),
        ValidationError::InvalidId(_)
    ));
    assert!(matches!(
        Scope::parse("archive").unwrap_err(),
        ValidationError::UnknownScope(_)
    ));
}
