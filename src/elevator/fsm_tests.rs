/*
 * Unit tests for the elevator state machine
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Timing expectations: doors stay open for DOOR_OPEN_TICKS (3) ticks, an
 * empty cabin waits IDLE_WAIT_TICKS (5) ticks before repositioning, and a
 * run always carries the cabin through to its terminal floor.
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod fsm_tests {
    use crate::elevator::fsm::{Behaviour, ElevatorFSM, DOOR_OPEN_TICKS, IDLE_WAIT_TICKS};
    use crate::shared::{Request, SystemError};

    fn setup_fsm(n_floors: u8, capacity: u8) -> ElevatorFSM {
        ElevatorFSM::new(n_floors, capacity)
    }

    fn request(from: u8, to: u8) -> Request {
        Request::new(from, to).unwrap()
    }

    // Drive a started cabin to the top floor through the idle shuttle.
    fn park_at_top(fsm: &mut ElevatorFSM, n_floors: u8) {
        fsm.test_expire_idle_timer();
        fsm.step(); // repositioning begins
        for _ in 0..n_floors - 1 {
            fsm.step();
        }
        assert_eq!(fsm.current_floor(), n_floors - 1);
        assert!(fsm.is_taking_requests());
    }

    #[test]
    fn test_fsm_init() {
        // Arrange
        let fsm = setup_fsm(10, 5);

        // Assert
        assert_eq!(fsm.test_get_behaviour(), Behaviour::OutOfService);
        assert_eq!(fsm.current_floor(), 0);
        assert!(!fsm.is_taking_requests());

        let report = fsm.report();
        assert!(!report.taking_requests);
        assert_eq!(report.door_timer, 0);
        assert_eq!(report.idle_timer, 0);
    }

    #[test]
    fn test_fsm_start() {
        // Arrange
        let mut fsm = setup_fsm(10, 5);

        // Act
        fsm.start();

        // Assert
        assert_eq!(fsm.test_get_behaviour(), Behaviour::Idle);
        assert!(fsm.is_taking_requests());
        assert_eq!(fsm.report().idle_timer, IDLE_WAIT_TICKS);
        assert_eq!(fsm.remaining_capacity(), 5);
    }

    #[test]
    fn test_fsm_start_is_noop_while_serving() {
        // Arrange
        let mut fsm = setup_fsm(3, 3);
        fsm.start();
        fsm.load_requests(vec![request(0, 1)]).unwrap();

        // Act
        fsm.start();

        // Assert: the running batch is untouched
        assert_eq!(fsm.test_get_behaviour(), Behaviour::Moving);
        assert_eq!(fsm.test_get_manifest().len(), 1);
    }

    #[test]
    fn test_fsm_load_requests_rejected_out_of_service() {
        // Arrange
        let mut fsm = setup_fsm(3, 3);

        // Act
        let result = fsm.load_requests(vec![request(0, 1)]);

        // Assert
        assert!(matches!(result, Err(SystemError::InvalidState(_))));
        assert_eq!(fsm.test_get_manifest().len(), 0);
    }

    #[test]
    fn test_fsm_load_requests_rejected_over_capacity() {
        // Arrange
        let mut fsm = setup_fsm(3, 3);
        fsm.start();
        let batch = vec![
            request(0, 1),
            request(0, 2),
            request(0, 1),
            request(0, 2),
        ];

        // Act
        let result = fsm.load_requests(batch);

        // Assert: rejected without state change
        assert!(matches!(result, Err(SystemError::InvalidRequest(_))));
        assert_eq!(fsm.test_get_behaviour(), Behaviour::Idle);
        assert!(fsm.is_taking_requests());
    }

    #[test]
    fn test_fsm_load_requests_rejected_mixed_directions() {
        // Arrange
        let mut fsm = setup_fsm(3, 3);
        fsm.start();

        // Act
        let result = fsm.load_requests(vec![request(0, 1), request(1, 0)]);

        // Assert
        assert!(matches!(result, Err(SystemError::InvalidRequest(_))));
        assert_eq!(fsm.test_get_behaviour(), Behaviour::Idle);
    }

    #[test]
    fn test_fsm_load_requests_rejected_out_of_range() {
        // Arrange
        let mut fsm = setup_fsm(3, 3);
        fsm.start();

        // Act
        let result = fsm.load_requests(vec![request(0, 5)]);

        // Assert
        assert!(matches!(result, Err(SystemError::InvalidRequest(_))));
        assert_eq!(fsm.test_get_behaviour(), Behaviour::Idle);
    }

    #[test]
    fn test_fsm_empty_batch_is_noop() {
        // Arrange
        let mut fsm = setup_fsm(3, 3);
        fsm.start();

        // Act
        let result = fsm.load_requests(Vec::new());

        // Assert
        assert!(result.is_ok());
        assert_eq!(fsm.test_get_behaviour(), Behaviour::Idle);
        assert!(fsm.is_taking_requests());
    }

    #[test]
    fn test_fsm_boarding_opens_doors_at_dispatch_floor() {
        // Arrange
        let mut fsm = setup_fsm(3, 3);
        fsm.start();
        fsm.load_requests(vec![request(0, 1)]).unwrap();

        // Act: first tick boards at floor 0 instead of moving
        fsm.step();

        // Assert
        assert_eq!(fsm.test_get_behaviour(), Behaviour::DoorOpen);
        assert_eq!(fsm.current_floor(), 0);
        assert_eq!(fsm.report().door_timer, DOOR_OPEN_TICKS);

        // Act: the countdown starts on the following tick
        fsm.step();

        // Assert
        assert_eq!(fsm.report().door_timer, DOOR_OPEN_TICKS - 1);
    }

    #[test]
    fn test_fsm_up_run_sweeps_to_top() {
        // Arrange
        let mut fsm = setup_fsm(3, 3);
        fsm.start();
        fsm.load_requests(vec![request(0, 1)]).unwrap();

        // Act: board (4 ticks), serve floor 1 (5 ticks), sweep to the top
        for _ in 0..9 {
            fsm.step();
        }

        // Assert: the cabin parks at the top, empty and available again
        assert_eq!(fsm.current_floor(), 2);
        assert!(fsm.is_taking_requests());
        assert_eq!(fsm.test_get_manifest().len(), 0);
        assert_eq!(fsm.report().idle_timer, IDLE_WAIT_TICKS);
    }

    #[test]
    fn test_fsm_idle_countdown_then_reposition() {
        // Arrange
        let mut fsm = setup_fsm(3, 3);
        fsm.start();

        // Act: five idle ticks burn the countdown
        for expected in (0..IDLE_WAIT_TICKS).rev() {
            fsm.step();
            assert_eq!(fsm.report().idle_timer, expected);
        }
        assert_eq!(fsm.test_get_behaviour(), Behaviour::Idle);

        // The sixth tick begins the shuttle toward the top
        fsm.step();

        // Assert
        assert_eq!(fsm.test_get_behaviour(), Behaviour::Moving);
        assert!(!fsm.is_taking_requests());
    }

    #[test]
    fn test_fsm_down_run_from_top_parks_at_ground() {
        // Arrange
        let mut fsm = setup_fsm(3, 3);
        fsm.start();
        park_at_top(&mut fsm, 3);
        fsm.load_requests(vec![request(1, 0)]).unwrap();

        // Act: move to 1, door cycle, move to 0, door cycle
        for _ in 0..10 {
            fsm.step();
        }

        // Assert
        assert_eq!(fsm.current_floor(), 0);
        assert!(fsm.is_taking_requests());
        assert_eq!(fsm.test_get_manifest().len(), 0);
    }

    #[test]
    fn test_fsm_take_out_of_service_drops_availability_immediately() {
        // Arrange
        let mut fsm = setup_fsm(3, 3);
        fsm.start();

        // Act
        fsm.take_out_of_service();

        // Assert: intent recorded, transition still pending
        assert!(!fsm.is_taking_requests());
        assert_ne!(fsm.test_get_behaviour(), Behaviour::OutOfService);

        // One tick at the ground floor completes it
        fsm.step();
        assert_eq!(fsm.test_get_behaviour(), Behaviour::OutOfService);
    }

    #[test]
    fn test_fsm_take_out_of_service_returns_from_top() {
        // Arrange
        let mut fsm = setup_fsm(3, 3);
        fsm.start();
        park_at_top(&mut fsm, 3);

        // Act
        fsm.take_out_of_service();
        fsm.step(); // turn toward the ground floor
        fsm.step(); // 2 -> 1
        fsm.step(); // 1 -> 0, shutdown completes

        // Assert
        assert_eq!(fsm.current_floor(), 0);
        assert_eq!(fsm.test_get_behaviour(), Behaviour::OutOfService);
    }

    #[test]
    fn test_fsm_take_out_of_service_releases_passengers_at_ground() {
        // Arrange: a passenger boards at floor 0, bound for floor 2
        let mut fsm = setup_fsm(3, 3);
        fsm.start();
        fsm.load_requests(vec![request(0, 2)]).unwrap();
        fsm.step(); // doors open for boarding
        assert_eq!(fsm.test_get_manifest().len(), 1);

        // Act: shutdown arrives mid door cycle
        fsm.take_out_of_service();
        fsm.step(); // door timer 3 -> 2
        fsm.step(); // 2 -> 1
        fsm.step(); // 1 -> 0, doors close at floor 0

        // Assert: released at the ground floor, never carried upward
        assert_eq!(fsm.test_get_behaviour(), Behaviour::OutOfService);
        assert_eq!(fsm.current_floor(), 0);
        assert_eq!(fsm.test_get_manifest().len(), 0);
    }

    #[test]
    fn test_fsm_restart_after_interrupted_shutdown() {
        // Arrange
        let mut fsm = setup_fsm(3, 3);
        fsm.start();
        fsm.take_out_of_service();
        fsm.step();
        assert_eq!(fsm.test_get_behaviour(), Behaviour::OutOfService);

        // Act
        fsm.start();

        // Assert
        assert!(fsm.is_taking_requests());
        assert_eq!(fsm.report().idle_timer, IDLE_WAIT_TICKS);
    }

    #[test]
    fn test_fsm_single_floor_building_stays_parked() {
        // Arrange
        let mut fsm = setup_fsm(1, 3);
        fsm.start();

        // Act: run well past the idle countdown
        for _ in 0..2 * IDLE_WAIT_TICKS {
            fsm.step();
        }

        // Assert: nowhere to shuttle to
        assert_eq!(fsm.test_get_behaviour(), Behaviour::Idle);
        assert_eq!(fsm.current_floor(), 0);
    }
}
