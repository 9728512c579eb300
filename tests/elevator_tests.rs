//! Scenario tests driving the building one step at a time.
//!
//! No threads and no sleeping: each test calls `Building::step` directly and
//! checks the state after every step.

use rs_elevator::{Building, CabinState, Category, ElevatorConfig, Step, Weight};

fn running_building() -> Building {
    let building = Building::default();
    building.start().unwrap();
    building
}

fn step(building: &Building) -> Step {
    building.step(|_| {})
}

/// Step until the cabin is idle, returning every step taken.
fn run_until_idle(building: &Building) -> Vec<Step> {
    let mut steps = Vec::new();
    for _ in 0..200 {
        let s = step(building);
        if s == Step::Waited(CabinState::Idle) {
            return steps;
        }
        steps.push(s);
    }
    panic!("cabin never went idle: {steps:?}");
}

// ============================================================================
// Single Passenger
// ============================================================================

#[test]
fn single_worker_from_ground_floor() {
    let building = running_building();
    building.issue(1, 4, Category::Worker).unwrap();
    assert_eq!(building.state(), CabinState::Loading);

    assert_eq!(
        step(&building),
        Step::Loaded {
            floor: 1,
            unloaded: 0,
            boarded: 1,
            next: CabinState::MovingUp,
        }
    );
    let status = building.status();
    assert_eq!(status.occupant_count(), 1);
    assert_eq!(status.total_weight, Weight::from_units(1));

    assert_eq!(step(&building), Step::Moved { floor: 2, stopped: false });
    assert_eq!(step(&building), Step::Moved { floor: 3, stopped: false });
    assert_eq!(step(&building), Step::Moved { floor: 4, stopped: true });
    assert_eq!(building.state(), CabinState::Loading);

    assert_eq!(
        step(&building),
        Step::Loaded {
            floor: 4,
            unloaded: 1,
            boarded: 0,
            next: CabinState::Idle,
        }
    );
    let status = building.status();
    assert_eq!(status.state, CabinState::Idle);
    assert_eq!(status.occupant_count(), 0);
    assert_eq!(status.total_weight, Weight::ZERO);
    assert_eq!(status.serviced_total, 1);
}

#[test]
fn idle_cabin_travels_down_to_pickup() {
    let building = Building::new(ElevatorConfig::default().with_initial_floor(5));
    building.start().unwrap();
    building.issue(2, 1, Category::Lawyer).unwrap();
    assert_eq!(building.state(), CabinState::MovingDown);

    assert_eq!(step(&building), Step::Moved { floor: 4, stopped: false });
    assert_eq!(step(&building), Step::Moved { floor: 3, stopped: false });
    assert_eq!(step(&building), Step::Moved { floor: 2, stopped: true });

    let steps = run_until_idle(&building);
    assert_eq!(
        steps.last(),
        Some(&Step::Loaded {
            floor: 1,
            unloaded: 1,
            boarded: 0,
            next: CabinState::Idle,
        })
    );
    assert_eq!(building.current_floor(), 1);
}

#[test]
fn same_floor_request_is_delivered_immediately() {
    let building = running_building();
    building.issue(1, 1, Category::Visitor).unwrap();

    // Boards, then the occupant is bound for the floor it is already on, so
    // the cabin stays put and unloads on the next cycle
    let steps = run_until_idle(&building);
    assert!(steps
        .iter()
        .all(|s| !matches!(s, Step::Moved { .. })));
    assert_eq!(building.status().serviced_total, 1);
}

// ============================================================================
// Capacity
// ============================================================================

#[test]
fn fifth_rider_boards_sixth_waits() {
    let building = running_building();
    for _ in 0..4 {
        building.issue(1, 5, Category::Worker).unwrap();
    }
    building.issue(2, 5, Category::Boss).unwrap();
    building.issue(2, 5, Category::Boss).unwrap();

    assert!(matches!(
        step(&building),
        Step::Loaded { boarded: 4, next: CabinState::MovingUp, .. }
    ));
    assert_eq!(building.status().total_weight, Weight::from_units(4));

    assert_eq!(step(&building), Step::Moved { floor: 2, stopped: true });
    assert!(matches!(
        step(&building),
        Step::Loaded { floor: 2, boarded: 1, .. }
    ));

    let status = building.status();
    assert_eq!(status.occupant_count(), 5);
    assert_eq!(status.total_weight, Weight::from_units(6));
    assert_eq!(status.floor(2).unwrap().waiting.len(), 1);
    assert_eq!(status.floor(2).unwrap().waiting[0].category, Category::Boss);
}

#[test]
fn weight_limit_blocks_first_in_line() {
    let building = running_building();
    for _ in 0..4 {
        building.issue(1, 3, Category::Boss).unwrap();
    }
    building.issue(1, 3, Category::Visitor).unwrap();

    assert!(matches!(step(&building), Step::Loaded { boarded: 3, .. }));

    // The fourth boss would make 8; the visitor behind cannot jump ahead
    let status = building.status();
    let waiting = &status.floor(1).unwrap().waiting;
    assert_eq!(waiting.len(), 2);
    assert_eq!(waiting[0].category, Category::Boss);
    assert_eq!(waiting[1].category, Category::Visitor);
    assert_eq!(status.total_weight, Weight::from_units(6));
}

#[test]
fn left_behind_passengers_are_collected_later() {
    let building = running_building();
    for _ in 0..6 {
        building.issue(1, 2, Category::Worker).unwrap();
    }

    run_until_idle(&building);

    let status = building.status();
    assert_eq!(status.serviced_total, 6);
    assert_eq!(status.waiting_total, 0);
    assert_eq!(status.occupant_count(), 0);
}

#[test]
fn half_unit_weights_add_exactly() {
    let building = running_building();
    building.issue(1, 5, Category::Lawyer).unwrap();
    building.issue(1, 5, Category::Lawyer).unwrap();
    building.issue(1, 5, Category::Visitor).unwrap();
    step(&building);

    let status = building.status();
    assert_eq!(status.total_weight, Weight::from_half_units(7));
    assert!(status.to_string().contains("Current load: 3.5 lbs"));
}

// ============================================================================
// Direction Policy
// ============================================================================

#[test]
fn occupants_take_priority_over_waiting() {
    let building = Building::new(ElevatorConfig::default().with_initial_floor(3));
    building.start().unwrap();
    building.issue(3, 1, Category::Worker).unwrap();
    building.issue(5, 1, Category::Worker).unwrap();

    // Rider is bound down even though someone waits above
    assert!(matches!(
        step(&building),
        Step::Loaded { next: CabinState::MovingDown, .. }
    ));
}

#[test]
fn waiting_above_preferred_over_below() {
    let building = Building::new(ElevatorConfig::default().with_initial_floor(3));
    building.start().unwrap();
    building.issue(3, 3, Category::Worker).unwrap();
    building.issue(1, 5, Category::Worker).unwrap();
    building.issue(5, 1, Category::Worker).unwrap();

    assert!(matches!(step(&building), Step::Loaded { boarded: 1, .. }));
    // Unloads the same-floor rider, then heads for floor 5 first
    assert!(matches!(
        step(&building),
        Step::Loaded { unloaded: 1, next: CabinState::MovingUp, .. }
    ));
}

#[test]
fn should_stop_for_riders_and_waiting() {
    let building = running_building();
    assert!(!building.should_stop(3));

    building.issue(3, 5, Category::Worker).unwrap();
    assert!(building.should_stop(3));
    assert!(!building.should_stop(5));
    assert!(!building.should_stop(0));
    assert!(!building.should_stop(6));
}

#[test]
fn passes_floors_with_nothing_to_do() {
    let building = running_building();
    building.issue(1, 5, Category::Worker).unwrap();
    step(&building);

    let moves: Vec<Step> = (0..4).map(|_| step(&building)).collect();
    assert_eq!(
        moves,
        vec![
            Step::Moved { floor: 2, stopped: false },
            Step::Moved { floor: 3, stopped: false },
            Step::Moved { floor: 4, stopped: false },
            Step::Moved { floor: 5, stopped: true },
        ]
    );
}

#[test]
fn picks_up_along_the_way() {
    let building = running_building();
    building.issue(1, 5, Category::Worker).unwrap();
    step(&building);
    building.issue(3, 4, Category::Lawyer).unwrap();

    assert_eq!(step(&building), Step::Moved { floor: 2, stopped: false });
    assert_eq!(step(&building), Step::Moved { floor: 3, stopped: true });
    assert!(matches!(
        step(&building),
        Step::Loaded { floor: 3, boarded: 1, next: CabinState::MovingUp, .. }
    ));
    assert_eq!(step(&building), Step::Moved { floor: 4, stopped: true });
    assert!(matches!(
        step(&building),
        Step::Loaded { floor: 4, unloaded: 1, .. }
    ));
}

// ============================================================================
// Status Report
// ============================================================================

#[test]
fn text_report_after_boarding() {
    let building = running_building();
    building.issue(1, 4, Category::Worker).unwrap();
    step(&building);
    building.issue(2, 3, Category::Boss).unwrap();

    let text = building.status().to_string();
    let expected = "\
Elevator state: UP
Current floor: 1
Current load: 1 lbs
Elevator status: P4
[ ] Floor 5: 0
[ ] Floor 4: 0
[ ] Floor 3: 0
[ ] Floor 2: 1 B3
[*] Floor 1: 0

Number of passengers: 1
Number of passengers waiting: 1
Number of passengers serviced: 0
";
    assert_eq!(text, expected);
}
