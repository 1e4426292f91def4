use pagegrid_testing::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn horizontal_rule(item_count: usize, rows: usize, columns: usize) -> PagerTestRule {
    init_logging();
    PagerTestRule::new(
        PagerGridConfig::grid(rows, columns, Orientation::Horizontal),
        item_count,
        Viewport::new(500, 100),
    )
    .unwrap()
}

#[test]
fn five_column_strip_pages_by_usable_width() {
    let mut rule = horizontal_rule(25, 1, 5);
    assert_eq!(rule.manager().page_capacity(), 5);
    assert_eq!(rule.manager().total_page_count(), 5);
    assert_eq!(rule.manager().snap_offset_for(5), (500, 0));
    assert_eq!(
        rule.page_events(),
        vec![PageEvent::CountChanged(5), PageEvent::Selected(0)]
    );

    let (manager, host) = rule.split();
    assert!(manager.on_fling(host, 1500));
    rule.run_animation();

    assert_eq!(rule.manager().offset_xy(), (500, 0));
    assert_eq!(rule.manager().current_page_index(), 1);
    assert_eq!(rule.manager().scroll_phase(), ScrollPhase::Idle);
    assert_eq!(rule.selected_pages(), vec![0, 1]);
}

#[test]
fn first_layout_places_first_page_and_one_column_ahead() {
    let rule = horizontal_rule(25, 1, 5);
    assert_eq!(rule.host().live_indices(), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(rule.host().frame_of(0), Some(IntRect::new(0, 0, 100, 100)));
    assert_eq!(rule.host().frame_of(5), Some(IntRect::new(500, 0, 600, 100)));
    assert_eq!(rule.manager().window().range(), 0..20);
}

#[test]
fn repeated_layout_keeps_the_same_views() {
    let mut rule = horizontal_rule(25, 1, 5);
    {
        let (manager, host) = rule.split();
        manager.scroll_by(host, 730);
    }
    let window = rule.manager().window();
    let live = rule.host().live_indices();
    let materialized = rule.host().materialized_count();
    let released = rule.host().released_count();

    rule.layout();

    assert_eq!(rule.manager().window(), window);
    assert_eq!(rule.host().live_indices(), live);
    assert_eq!(rule.host().materialized_count(), materialized);
    assert_eq!(rule.host().released_count(), released);
    assert!(rule.manager().recycler_stats().reused >= live.len());
}

#[test]
fn scrolling_moves_views_and_releases_old_ones() {
    let mut rule = horizontal_rule(25, 1, 5);
    {
        let (manager, host) = rule.split();
        manager.scroll_by(host, 1000);
    }
    // Display area [900, 1600) in content coordinates.
    assert_eq!(rule.host().live_indices(), (9..=15).collect::<Vec<_>>());
    assert_eq!(rule.host().frame_of(10), Some(IntRect::new(0, 0, 100, 100)));
    assert_eq!(rule.host().frame_of(9), Some(IntRect::new(-100, 0, 0, 100)));
    assert_eq!(rule.manager().window().range(), 0..20);
}

#[test]
fn emptying_the_items_reports_zero_and_clears_views() {
    let mut rule = horizontal_rule(25, 1, 5);
    {
        let (manager, host) = rule.split();
        manager.go_to_page(host, 2).unwrap();
    }
    rule.take_events();

    rule.set_item_count(0);

    assert_eq!(
        rule.page_events(),
        vec![PageEvent::CountChanged(0), PageEvent::Selected(0)]
    );
    assert_eq!(rule.host().live_count(), 0);
    assert!(rule.manager().window().is_empty());
    assert_eq!(rule.manager().recycler().attached_count(), 0);
    assert_eq!(rule.manager().offset(), 0);
    assert_eq!(rule.manager().total_page_count(), 0);

    // Another pass over the empty set stays quiet.
    rule.take_events();
    rule.layout();
    assert!(rule.events().is_empty());
}

#[test]
fn emptying_a_single_page_still_reports_selection() {
    let mut rule = horizontal_rule(3, 1, 5);
    rule.take_events();
    rule.set_item_count(0);
    assert_eq!(
        rule.page_events(),
        vec![PageEvent::CountChanged(0), PageEvent::Selected(0)]
    );
}

#[test]
fn starting_empty_reports_zero() {
    let rule = horizontal_rule(0, 2, 2);
    assert_eq!(
        rule.page_events(),
        vec![PageEvent::CountChanged(0), PageEvent::Selected(0)]
    );
    assert_eq!(rule.host().live_count(), 0);
}

#[test]
fn shrinking_items_pulls_offset_back() {
    let mut rule = horizontal_rule(25, 1, 5);
    {
        let (manager, host) = rule.split();
        manager.go_to_page(host, 4).unwrap();
    }
    rule.take_events();

    rule.set_item_count(12);

    assert_eq!(rule.manager().max_scroll(), 1000);
    assert_eq!(rule.manager().offset(), 1000);
    assert_eq!(
        rule.page_events(),
        vec![PageEvent::CountChanged(3), PageEvent::Selected(2)]
    );
}

#[test]
fn growing_items_adds_pages_without_moving() {
    let mut rule = horizontal_rule(10, 1, 5);
    rule.take_events();
    rule.set_item_count(11);
    assert_eq!(rule.page_events(), vec![PageEvent::CountChanged(3)]);
    assert_eq!(rule.manager().offset(), 0);
}

#[test]
fn padding_offsets_every_placement() {
    init_logging();
    let viewport = Viewport::new(540, 120).with_padding(Padding {
        left: 20,
        top: 10,
        right: 20,
        bottom: 10,
    });
    let rule = PagerTestRule::new(
        PagerGridConfig::grid(1, 5, Orientation::Horizontal),
        25,
        viewport,
    )
    .unwrap();
    assert_eq!(rule.manager().usable_extent(), 500);
    assert_eq!(rule.host().frame_of(0), Some(IntRect::new(20, 10, 120, 110)));
    assert_eq!(rule.host().frame_of(4), Some(IntRect::new(420, 10, 520, 110)));
}

#[test]
fn vertical_pages_stack_downwards() {
    init_logging();
    let rule = PagerTestRule::new(
        PagerGridConfig::grid(2, 2, Orientation::Vertical),
        8,
        Viewport::new(200, 400),
    )
    .unwrap();
    assert_eq!(rule.manager().max_scroll_xy(), (0, 400));
    assert_eq!(rule.host().live_indices(), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(rule.host().frame_of(3), Some(IntRect::new(100, 200, 200, 400)));
    assert_eq!(rule.host().frame_of(4), Some(IntRect::new(0, 400, 100, 600)));
}

#[test]
fn explicit_item_size_is_used_for_frames() {
    init_logging();
    let config = PagerGridConfig {
        item_size: Some(ItemSize::new(80, 50)),
        ..PagerGridConfig::grid(2, 5, Orientation::Horizontal)
    };
    let mut rule = PagerTestRule::new(config, 20, Viewport::new(500, 100)).unwrap();
    let frame = rule.manager_mut().item_frame(7);
    assert_eq!(frame.rect(), IntRect::new(160, 50, 240, 100));
    let frame = rule.manager_mut().item_frame(10);
    assert_eq!(frame.rect(), IntRect::new(500, 0, 580, 50));
}

#[test]
fn resizing_the_viewport_rebuilds_frames() {
    let mut rule = horizontal_rule(25, 1, 5);
    rule.set_viewport(Viewport::new(1000, 200));
    assert_eq!(rule.manager().max_scroll(), 4000);
    assert_eq!(rule.host().frame_of(1), Some(IntRect::new(200, 0, 400, 200)));
}

#[test]
fn detach_hands_back_every_view() {
    let mut rule = horizontal_rule(25, 1, 5);
    {
        let (manager, host) = rule.split();
        manager.detach(host);
    }
    assert_eq!(rule.host().live_count(), 0);
    assert!(!rule.manager().is_attached());
}
