use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use u_timetable::models::{Catalog, Course, CourseRequest, Schedule, Section, SlotMask, TimeGrid};
use u_timetable::ranking::{RankingEngine, RankingRule};
use u_timetable::scheduler::generate;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn random_catalog(rng: &mut SmallRng, grid: &TimeGrid) -> Catalog {
    let mut catalog = Catalog::default();
    for c in 0..rng.random_range(2..6) {
        let code = format!("C{c}");
        let mut course = Course::new(code.as_str());
        for n in 0..rng.random_range(1..5) {
            let blocks: Vec<usize> = (0..rng.random_range(1..4))
                .map(|_| rng.random_range(0..grid.render_len()))
                .collect();
            course = course.with_section(
                Section::lecture(grid, code.as_str(), n.to_string(), "Staff", blocks).unwrap(),
            );
        }
        catalog = catalog.with_course(course);
    }
    catalog
}

/// Every conflict-free combination in depth-first order.
fn brute_force<'a>(lists: &[Vec<&'a Section>]) -> Vec<Vec<&'a Section>> {
    let mut out = Vec::new();
    let mut chosen = Vec::new();
    expand(lists, &mut chosen, &mut out);
    out
}

fn expand<'a>(
    lists: &[Vec<&'a Section>],
    chosen: &mut Vec<&'a Section>,
    out: &mut Vec<Vec<&'a Section>>,
) {
    let Some((first, rest)) = lists.split_first() else {
        if !chosen.is_empty() {
            out.push(chosen.clone());
        }
        return;
    };
    for &section in first {
        if chosen.iter().any(|s| s.conflicts(section.mask())) {
            continue;
        }
        chosen.push(section);
        expand(rest, chosen, out);
        chosen.pop();
    }
}

fn union_of(schedule: &Schedule, grid: &TimeGrid) -> SlotMask {
    let mut mask = SlotMask::empty(grid.chunk_count());
    for s in &schedule.selection {
        mask.union_with(s.mask());
    }
    mask
}

#[test]
fn test_random_catalogs_match_brute_force() {
    init_tracing();
    let grid = TimeGrid::default();
    let mut rng = SmallRng::seed_from_u64(42);

    for _ in 0..50 {
        let catalog = random_catalog(&mut rng, &grid);
        let requests: Vec<CourseRequest> =
            catalog.iter().map(|c| CourseRequest::any(c.code.as_str())).collect();

        let result = generate(&requests, &catalog, &grid).unwrap();
        assert!(result.warnings.is_empty());

        let lists: Vec<Vec<&Section>> = catalog.iter().map(|c| c.sections.iter().collect()).collect();
        let expected = brute_force(&lists);
        assert_eq!(result.schedules.len(), expected.len());

        for (schedule, combo) in result.schedules.iter().zip(&expected) {
            let ids: Vec<&str> = combo.iter().map(|s| s.id.as_str()).collect();
            assert_eq!(schedule.section_ids(), ids);
            assert_eq!(schedule.section_count(), catalog.len());
            assert_eq!(schedule.mask, union_of(schedule, &grid));

            for (i, a) in schedule.selection.iter().enumerate() {
                for b in &schedule.selection[i + 1..] {
                    assert!(!a.conflicts(b.mask()));
                }
            }
        }
    }
}

#[test]
fn test_scores_follow_mask() {
    let grid = TimeGrid::default();
    let mut rng = SmallRng::seed_from_u64(7);

    for _ in 0..20 {
        let catalog = random_catalog(&mut rng, &grid);
        let requests: Vec<CourseRequest> =
            catalog.iter().map(|c| CourseRequest::any(c.code.as_str())).collect();
        let result = generate(&requests, &catalog, &grid).unwrap();

        for schedule in &result.schedules {
            let occupied: u32 = schedule.scores.day_scores.iter().sum();
            assert_eq!(occupied, schedule.mask.count_ones());
            assert_eq!(schedule.scores.day_scores.len(), grid.day_count());
            let days_used = schedule.scores.day_scores.iter().filter(|&&d| d > 0).count() as u32;
            assert!(schedule.scores.short_day_score <= 2 * days_used);
            assert_eq!(schedule.scores.slot_avoidance_score, 0);
        }
    }
}

#[test]
fn test_ranking_is_sorted_permutation() {
    let grid = TimeGrid::default();
    let mut rng = SmallRng::seed_from_u64(2024);
    let engine = RankingEngine::new(grid.clone())
        .with_rule(RankingRule::minimize_gaps())
        .with_rule(RankingRule::avoid_day(4))
        .with_rule(RankingRule::avoid_slot(1, 0))
        .with_rule(RankingRule::prefer_later());

    for _ in 0..20 {
        let catalog = random_catalog(&mut rng, &grid);
        let requests: Vec<CourseRequest> =
            catalog.iter().map(|c| CourseRequest::any(c.code.as_str())).collect();
        let schedules = generate(&requests, &catalog, &grid).unwrap().schedules;

        let mut before: Vec<Vec<String>> = schedules
            .iter()
            .map(|s| s.section_ids().iter().map(|id| id.to_string()).collect())
            .collect();
        let ranked = engine.rank(schedules);

        let mut after: Vec<Vec<String>> = ranked
            .iter()
            .map(|s| s.section_ids().iter().map(|id| id.to_string()).collect())
            .collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);

        assert!(ranked
            .windows(2)
            .all(|w| engine.evaluate(&w[0]) <= engine.evaluate(&w[1])));
    }
}

#[test]
fn test_lunch_blocks_never_conflict() {
    let grid = TimeGrid::default();
    let lunch = grid.render_index(0, grid.lunch_row_index()).unwrap();
    let catalog = Catalog::default()
        .with_course(
            Course::new("A").with_section(Section::lecture(&grid, "A", "1", "Kim", vec![lunch]).unwrap()),
        )
        .with_course(
            Course::new("B").with_section(Section::lecture(&grid, "B", "1", "Lee", vec![lunch]).unwrap()),
        );

    let requests = vec![CourseRequest::any("A"), CourseRequest::any("B")];
    let result = generate(&requests, &catalog, &grid).unwrap();
    assert_eq!(result.len(), 1);
    assert!(result.schedules[0].mask.is_empty());
}

#[test]
fn test_mismatched_grid_is_rejected() {
    let grid = TimeGrid::default();
    let wide = TimeGrid::new(
        u_timetable::models::GridConfig::default()
            .with_days(["D1", "D2", "D3", "D4", "D5", "D6", "D7", "D8"]),
    )
    .unwrap();
    let catalog = Catalog::default().with_course(
        Course::new("A").with_section(Section::lecture(&wide, "A", "1", "Kim", vec![0]).unwrap()),
    );

    let err = generate(&[CourseRequest::any("A")], &catalog, &grid).unwrap_err();
    assert!(matches!(
        err,
        u_timetable::TimetableError::MaskWidthMismatch { .. }
    ));
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_public_types_are_send_sync() {
    assert_send_sync::<TimeGrid>();
    assert_send_sync::<Catalog>();
    assert_send_sync::<Schedule>();
    assert_send_sync::<RankingEngine>();
    assert_send_sync::<u_timetable::scheduler::TimetableGenerator>();
    assert_send_sync::<u_timetable::TimetableError>();
}
