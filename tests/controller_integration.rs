/*
 *  tests/controller_integration.rs
 *
 *  Integration tests for the display controller against the mock panel
 *
 *  croaster-display - eyes on the roast
 *  (c) 2020-26 Stuart Hunter
 */

use std::time::{Duration, Instant};

use croaster_display::constants::SPLASH_HOLD;
use croaster_display::display::discovery::PIN_CANDIDATES;
use croaster_display::{
    DisplayController, MockPanel, RoastSnapshot, SharedRoast, StaticAddress,
};

const DEFAULT_ADDRESS: u8 = 0x3A;

fn controller_with(panel: MockPanel) -> (DisplayController<MockPanel>, SharedRoast) {
    let roast = SharedRoast::new();
    let controller = DisplayController::new(
        panel,
        Box::new(roast.clone()),
        Box::new(StaticAddress("10.0.0.9".to_string())),
        DEFAULT_ADDRESS,
    );
    (controller, roast)
}

fn reporting_snapshot() -> RoastSnapshot {
    RoastSnapshot {
        bt: 201.5,
        et: 228.0,
        ror_bt: 7.0,
        ror_et: 12.4,
        unit: "C".to_string(),
    }
}

#[test]
fn discovery_latches_first_responder_in_order() {
    let mut panel = MockPanel::new();
    panel.respond_at(PIN_CANDIDATES[2], 0x3C);
    panel.respond_at(PIN_CANDIDATES[3], DEFAULT_ADDRESS);

    let (mut controller, _) = controller_with(panel);
    assert!(controller.discover());
    assert!(controller.is_present());
    // the later responder never gets a chance
    assert_eq!(controller.bus_address(), 0x3C);

    let ops = controller.panel().state();
    let ops = ops.lock().unwrap();
    assert_eq!(ops.rewires.len(), 3);
    assert_eq!(ops.probes.last(), Some(&(PIN_CANDIDATES[2], 0x3C)));
}

#[test]
fn wrong_address_retried_before_next_wiring() {
    let mut panel = MockPanel::new();
    panel.respond_at(PIN_CANDIDATES[0], 0x3D);

    let (mut controller, _) = controller_with(panel);
    assert!(controller.discover());
    assert_eq!(controller.bus_address(), 0x3D);

    let ops = controller.panel().state();
    let ops = ops.lock().unwrap();
    // all three addresses tried on the first wiring, no second rewire
    assert_eq!(
        ops.probes,
        vec![
            (PIN_CANDIDATES[0], DEFAULT_ADDRESS),
            (PIN_CANDIDATES[0], 0x3C),
            (PIN_CANDIDATES[0], 0x3D),
        ]
    );
    assert_eq!(ops.rewires, vec![PIN_CANDIDATES[0]]);
}

#[test]
fn bare_bus_check_salvages_discovery() {
    let mut panel = MockPanel::new();
    panel.set_bus_check_result(true);

    let (mut controller, _) = controller_with(panel);
    controller.begin(false).unwrap();

    assert!(controller.is_present());
    // the address stays at the configured default
    assert_eq!(controller.bus_address(), DEFAULT_ADDRESS);

    let ops = controller.panel().state();
    let ops = ops.lock().unwrap();
    assert_eq!(ops.bus_checks, 1);
    assert_eq!(ops.attached, Some(DEFAULT_ADDRESS));
}

#[test]
fn absent_panel_degrades_every_operation_to_noop() {
    let panel = MockPanel::new();

    let (mut controller, roast) = controller_with(panel);
    controller.begin(true).unwrap();
    assert!(!controller.is_present());

    roast.publish(reporting_snapshot());
    let start = Instant::now();
    for i in 0..200u64 {
        controller.tick(start + Duration::from_millis(i * 800));
    }
    controller.rotate_screen();
    controller.set_indicator(true);
    controller.splash().unwrap();

    let ops = controller.panel().state();
    let ops = ops.lock().unwrap();
    assert_eq!(ops.attach_count, 0);
    assert_eq!(ops.flush_count, 0);
    assert_eq!(ops.clear_count, 0);
    assert!(ops.last_invert.is_none());
    assert!(ops.last_rotation.is_none());
}

#[test]
fn attach_failure_collapses_to_absent() {
    let mut panel = MockPanel::new();
    panel.respond_at(PIN_CANDIDATES[0], 0x3C);
    panel.fail_attach();

    let (mut controller, _) = controller_with(panel);
    controller.begin(true).unwrap();

    assert!(!controller.is_present());
    let start = Instant::now();
    controller.tick(start + Duration::from_secs(2));

    let ops = controller.panel().state();
    let ops = ops.lock().unwrap();
    assert_eq!(ops.attach_count, 1);
    assert_eq!(ops.flush_count, 0);
}

#[test]
fn splash_runs_during_begin() {
    let mut panel = MockPanel::new();
    panel.respond_at(PIN_CANDIDATES[0], 0x3C);

    let (mut controller, _) = controller_with(panel);
    controller.begin(true).unwrap();

    let ops = controller.panel().state();
    let ops = ops.lock().unwrap();
    // one flush per animation frame, two phase holds
    assert!(ops.flush_count > 30);
    assert_eq!(
        ops.settles.iter().filter(|&&s| s == SPLASH_HOLD).count(),
        2
    );
}

#[test]
fn first_tick_refreshes_immediately() {
    let mut panel = MockPanel::new();
    panel.respond_at(PIN_CANDIDATES[0], 0x3C);

    let (mut controller, roast) = controller_with(panel);
    controller.begin(false).unwrap();
    roast.publish(reporting_snapshot());

    let start = Instant::now();
    controller.tick(start);

    let ops = controller.panel().state();
    assert_eq!(ops.lock().unwrap().flush_count, 1);
    assert!(controller.panel().framebuffer().on_count() > 0);
}

#[test]
fn refresh_fires_on_the_second_cadence() {
    let mut panel = MockPanel::new();
    panel.respond_at(PIN_CANDIDATES[0], 0x3C);

    let (mut controller, roast) = controller_with(panel);
    controller.begin(false).unwrap();
    roast.publish(reporting_snapshot());

    let start = Instant::now();
    controller.tick(start);
    let ops = controller.panel().state();
    assert_eq!(ops.lock().unwrap().flush_count, 1);

    // under a second since the last refresh: nothing redrawn
    controller.tick(start + Duration::from_millis(500));
    assert_eq!(ops.lock().unwrap().flush_count, 1);

    controller.tick(start + Duration::from_millis(1100));
    assert_eq!(ops.lock().unwrap().flush_count, 2);
}

#[test]
fn inversion_alternates_with_asymmetric_phases() {
    let mut panel = MockPanel::new();
    panel.respond_at(PIN_CANDIDATES[0], 0x3C);

    let (mut controller, _) = controller_with(panel);
    controller.begin(false).unwrap();

    let start = Instant::now();
    controller.tick(start);
    assert!(!controller.is_inverted());

    // just before the normal-phase boundary
    controller.tick(start + Duration::from_millis(59_500));
    assert!(!controller.is_inverted());

    // crossing it inverts exactly once
    let inverted_at = start + Duration::from_millis(60_500);
    controller.tick(inverted_at);
    assert!(controller.is_inverted());
    controller.tick(inverted_at);
    assert!(controller.is_inverted());

    // the inverted phase is shorter: ten seconds later it reverts
    controller.tick(inverted_at + Duration::from_millis(5_000));
    assert!(controller.is_inverted());
    controller.tick(inverted_at + Duration::from_millis(10_500));
    assert!(!controller.is_inverted());

    let ops = controller.panel().state();
    let ops = ops.lock().unwrap();
    assert_eq!(ops.invert_history, vec![true, false]);
}

#[test]
fn address_toggle_is_latent_until_next_refresh() {
    let mut panel = MockPanel::new();
    panel.respond_at(PIN_CANDIDATES[0], 0x3C);

    let (mut controller, _) = controller_with(panel);
    controller.begin(false).unwrap();

    let start = Instant::now();
    controller.tick(start);
    assert!(!controller.showing_address());
    let title_pixels = controller.panel().framebuffer().on_count_in(0, 0, 108, 10);
    assert!(title_pixels > 0);

    // the toggle fires after the title dwell, but the refresh in the same
    // pass still drew the title: the flag is read at the next redraw
    controller.tick(start + Duration::from_millis(10_200));
    assert!(controller.showing_address());
    assert_eq!(
        controller.panel().framebuffer().on_count_in(0, 0, 108, 10),
        title_pixels
    );

    // next refresh picks the address up; it is shorter than the title
    controller.tick(start + Duration::from_millis(11_300));
    let address_pixels = controller.panel().framebuffer().on_count_in(0, 0, 108, 10);
    assert!(address_pixels > 0);
    assert!(address_pixels < title_pixels);
}

#[test]
fn rotate_twice_restores_orientation() {
    let mut panel = MockPanel::new();
    panel.respond_at(PIN_CANDIDATES[0], 0x3C);

    let (mut controller, _) = controller_with(panel);
    controller.begin(false).unwrap();
    assert_eq!(controller.rotation(), 0);

    controller.rotate_screen();
    assert_eq!(controller.rotation(), 180);

    controller.rotate_screen();
    assert_eq!(controller.rotation(), 0);

    let ops = controller.panel().state();
    let ops = ops.lock().unwrap();
    assert_eq!(ops.rotation_history, vec![180, 0]);
    assert_eq!(ops.flush_count, 2);
}

#[test]
fn indicator_fills_and_clears_its_dot() {
    let mut panel = MockPanel::new();
    panel.respond_at(PIN_CANDIDATES[0], 0x3C);

    let (mut controller, _) = controller_with(panel);
    controller.begin(false).unwrap();

    controller.set_indicator(true);
    assert!(controller.panel().framebuffer().on_count_in(121, 0, 7, 7) > 0);

    controller.set_indicator(false);
    assert_eq!(controller.panel().framebuffer().on_count_in(121, 0, 7, 7), 0);

    let ops = controller.panel().state();
    assert_eq!(ops.lock().unwrap().flush_count, 2);
}

#[test]
fn silent_sensor_renders_labels_without_readings() {
    let mut panel = MockPanel::new();
    panel.respond_at(PIN_CANDIDATES[0], 0x3C);

    let (mut controller, roast) = controller_with(panel);
    controller.begin(false).unwrap();

    let start = Instant::now();
    // default snapshot: temperatures are NaN
    controller.tick(start);

    let fb = controller.panel().framebuffer();
    // labels are there
    assert!(fb.on_count_in(0, 16, 14, 10) > 0);
    assert!(fb.on_count_in(0, 43, 14, 10) > 0);
    // no large reading, no rate line
    assert_eq!(fb.on_count_in(40, 16, 88, 20), 0);
    assert_eq!(fb.on_count_in(0, 30, 128, 10), 0);

    // once the probe reports, both appear
    roast.publish(reporting_snapshot());
    controller.tick(start + Duration::from_millis(1_100));
    let fb = controller.panel().framebuffer();
    assert!(fb.on_count_in(40, 16, 88, 20) > 0);
    assert!(fb.on_count_in(0, 30, 40, 10) > 0);
}
